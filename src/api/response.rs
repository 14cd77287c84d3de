use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use super::status::ResponseTemplateStatus;
use crate::error::ResponseError;

/// Uniform envelope returned by every endpoint: `{ status, message, data }`.
///
/// `data` is `null` whenever `status` is not a success.
#[derive(Debug, Serialize)]
pub struct ResponseTemplate<T: Serialize> {
    pub status: ResponseTemplateStatus,
    pub message: &'static str,
    pub data: Option<T>,
    #[serde(skip)]
    pub http_status: StatusCode,
}

impl<T: Serialize> ResponseTemplate<T> {
    /// Successful envelope carrying a payload
    pub fn success(data: T) -> Self {
        Self {
            status: ResponseTemplateStatus::Success,
            message: ResponseTemplateStatus::Success.message(),
            data: Some(data),
            http_status: StatusCode::OK,
        }
    }

    /// Failure envelope; the transport status stays 200
    pub fn failure(status: ResponseTemplateStatus) -> Self {
        Self {
            status,
            message: status.message(),
            data: None,
            http_status: StatusCode::OK,
        }
    }

    /// Override the transport status (used by the auth layer only)
    pub fn with_http_status(mut self, http_status: StatusCode) -> Self {
        self.http_status = http_status;
        self
    }
}

impl<T: Serialize> From<ResponseTemplateStatus> for ResponseTemplate<T> {
    fn from(status: ResponseTemplateStatus) -> Self {
        Self::failure(status)
    }
}

impl<T: Serialize> From<ResponseError> for ResponseTemplate<T> {
    fn from(err: ResponseError) -> Self {
        Self::failure(err.status())
    }
}

impl<T: Serialize> From<Result<T, ResponseError>> for ResponseTemplate<T> {
    fn from(result: Result<T, ResponseError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::failure(err.status()),
        }
    }
}

impl<T: Serialize> IntoResponse for ResponseTemplate<T> {
    fn into_response(self) -> Response {
        (self.http_status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_shape() {
        let v = serde_json::to_value(ResponseTemplate::success(42_i64)).unwrap();
        assert_eq!(
            v,
            json!({ "status": 1000, "message": "Request succeeded.", "data": 42 })
        );
    }

    #[test]
    fn failure_envelope_has_null_data() {
        let t: ResponseTemplate<String> = ResponseTemplateStatus::NotAuthor.into();
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["status"], json!(8004));
        assert_eq!(v["message"], json!(ResponseTemplateStatus::NotAuthor.message()));
        assert!(v["data"].is_null());
        assert_eq!(t.http_status, StatusCode::OK);
    }

    #[test]
    fn converts_from_service_result() {
        let ok: ResponseTemplate<&str> = Ok("done").into();
        assert_eq!(ok.status, ResponseTemplateStatus::Success);
        assert_eq!(ok.data, Some("done"));

        let err: ResponseTemplate<&str> =
            Err(ResponseError::from(ResponseTemplateStatus::PostNotFound)).into();
        assert_eq!(err.status, ResponseTemplateStatus::PostNotFound);
        assert!(err.data.is_none());
    }

    #[test]
    fn http_status_is_not_serialized() {
        let t = ResponseTemplate::<()>::failure(ResponseTemplateStatus::EmptyJwt)
            .with_http_status(StatusCode::UNAUTHORIZED);
        let v = serde_json::to_value(&t).unwrap();
        assert!(v.get("http_status").is_none());
        assert_eq!(t.http_status, StatusCode::UNAUTHORIZED);
    }
}
