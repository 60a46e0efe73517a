use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// A wrapper around [`axum::Json`] that rejects with an [`AppError`].
///
/// Any body axum cannot read as `T` (wrong content type, broken JSON,
/// wrong field types) becomes a 400 `{"error": "Invalid request body"}`.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "json body rejected");
                Err(AppError::bad_request("Invalid request body"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, response::IntoResponse};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        name: String,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn extracts_valid_body() {
        let ApiJson(probe) = ApiJson::<Probe>::from_request(json_request(r#"{"name":"x"}"#), &())
            .await
            .unwrap();
        assert_eq!(probe.name, "x");
    }

    #[tokio::test]
    async fn broken_json_is_bad_request() {
        let rejection = ApiJson::<Probe>::from_request(json_request("{not json"), &())
            .await
            .err()
            .unwrap();
        assert_eq!(rejection.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_content_type_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .body(Body::from(r#"{"name":"x"}"#))
            .unwrap();
        let rejection = ApiJson::<Probe>::from_request(request, &())
            .await
            .err()
            .unwrap();
        assert_eq!(rejection.status_code(), StatusCode::BAD_REQUEST);
    }
}
