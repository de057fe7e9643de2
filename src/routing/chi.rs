//! Third-party router flavour: axum with router-wide middleware.

use axum::{
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::get,
    Router,
};

use crate::http::handlers::{self, RouterFlavor};
use crate::http::middleware::access_log;

/// Build the axum router. The access log layer covers routes and fallback alike.
pub fn router() -> Router {
    Router::new()
        .route("/path/", get(handlers::chi_path))
        .route("/task/{id}/", get(handlers::chi_task))
        .fallback(not_found)
        .layer(from_fn_with_state(RouterFlavor::Chi, access_log))
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404 page not found\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::ConnectInfo;
    use axum::http::{Method, Request};
    use http_body_util::BodyExt;
    use std::net::SocketAddr;
    use tower::ServiceExt;
    use tracing_test::traced_test;

    fn get_request(uri: &str) -> Request<Body> {
        let mut request = Request::builder()
            .uri(uri)
            .header("host", "localhost:8091")
            .body(Body::empty())
            .unwrap();
        let remote: SocketAddr = "127.0.0.1:65388".parse().unwrap();
        request.extensions_mut().insert(ConnectInfo(remote));
        request
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_path_endpoint() {
        let response = router().oneshot(get_request("/path/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "Chi: Hit GET path endpoint\n");
    }

    #[tokio::test]
    async fn test_task_endpoint() {
        let response = router().oneshot(get_request("/task/f0cd2e/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_string(response).await,
            "Chi: Hit GET task by id={f0cd2e} endpoint\n"
        );
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let response = router().oneshot(get_request("/unknown/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, "404 page not found\n");
    }

    #[tokio::test]
    async fn test_wrong_method() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/path/")
            .body(Body::empty())
            .unwrap();
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_one_access_line_per_request() {
        let response = router().oneshot(get_request("/task/7/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        logs_assert(|lines: &[&str]| {
            let hits: Vec<_> = lines
                .iter()
                .filter(|line| line.contains("\"GET http://localhost:8091/task/7/ HTTP/1.1\""))
                .collect();
            match hits.as_slice() {
                [line] if line.contains("from 127.0.0.1:65388 - 200 37B in ") => Ok(()),
                [line] => Err(format!("unexpected access line: {}", line)),
                other => Err(format!("expected one access line, got {}", other.len())),
            }
        });
    }

    #[tokio::test]
    #[traced_test]
    async fn test_not_found_is_logged() {
        let response = router().oneshot(get_request("/nope")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(logs_contain("/nope HTTP/1.1\" from 127.0.0.1:65388 - 404"));
    }
}
