use axum::{
    Json,
    extract::{OriginalUri, Request},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{AppError, ErrorResponse};

/// Fallback handler for unknown routes.
pub async fn not_found() -> Response {
    AppError::NotFound("The requested resource was not found".to_string()).into_response()
}

/// Stamps the client's request path into error envelopes.
///
/// Responses built from [`AppError`] carry their [`ErrorResponse`] as a
/// response extension with an empty `path`. This middleware rewrites such
/// bodies with the original request path. Envelopes that already have a path
/// are passed through, so the layer can be stacked on nested routers.
///
/// ```ignore
/// use axum::{Router, middleware};
/// use axum_helpers::errors::error_path;
///
/// let app = Router::new().layer(middleware::from_fn(error_path));
/// ```
pub async fn error_path(request: Request, next: Next) -> Response {
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.0.path().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let response = next.run(request).await;

    let Some(mut envelope) = response.extensions().get::<ErrorResponse>().cloned() else {
        return response;
    };
    if !envelope.path.is_empty() {
        return response;
    }
    envelope.path = path;

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    let body = Json(&envelope).into_response().into_body();
    parts.extensions.insert(envelope);

    Response::from_parts(parts, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http, http::StatusCode, middleware, routing::get};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn missing() -> Result<&'static str, AppError> {
        Err(AppError::NotFound("Widget with id 7 not found".to_string()))
    }

    async fn read_envelope(response: Response) -> ErrorResponse {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_error_path_fills_nested_request_path() {
        let inner = Router::new()
            .route("/{id}", get(missing))
            .layer(middleware::from_fn(error_path));
        let app = Router::new().nest("/api/widgets", inner);

        let response = app
            .oneshot(
                http::Request::builder()
                    .uri("/api/widgets/7")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let envelope = read_envelope(response).await;
        assert_eq!(envelope.path, "/api/widgets/7");
        assert_eq!(envelope.error, "Not Found");
        assert_eq!(envelope.message, "Widget with id 7 not found");
    }

    #[tokio::test]
    async fn test_error_path_leaves_success_untouched() {
        let app = Router::new()
            .route("/ok", get(|| async { "fine" }))
            .layer(middleware::from_fn(error_path));

        let response = app
            .oneshot(http::Request::builder().uri("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"fine");
    }

    #[tokio::test]
    async fn test_not_found_fallback() {
        let app = Router::new()
            .fallback(not_found)
            .layer(middleware::from_fn(error_path));

        let response = app
            .oneshot(
                http::Request::builder()
                    .uri("/nowhere")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let envelope = read_envelope(response).await;
        assert_eq!(envelope.path, "/nowhere");
        assert_eq!(envelope.status, 404);
    }
}
