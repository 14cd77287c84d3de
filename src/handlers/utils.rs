use axum::extract::{
    rejection::{JsonRejection, PathRejection, QueryRejection},
    Json, Path, Query,
};

use crate::api::ResponseTemplateStatus;
use crate::error::ServiceResult;

/// Unwrap a JSON body, reporting malformed input as an envelope status
pub fn read_body<T>(body: Result<Json<T>, JsonRejection>) -> ServiceResult<T> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!("Rejected request body: {}", rejection);
            Err(ResponseTemplateStatus::InvalidRequestBody.into())
        }
    }
}

/// Unwrap a numeric path identifier such as `{postIdx}`
pub fn read_idx(path: Result<Path<i64>, PathRejection>) -> ServiceResult<i64> {
    match path {
        Ok(Path(idx)) => Ok(idx),
        Err(rejection) => {
            tracing::debug!("Rejected path parameter: {}", rejection);
            Err(ResponseTemplateStatus::InvalidPathParameter.into())
        }
    }
}

/// Unwrap a query string such as `?from=1&to=3`
pub fn read_query<T>(query: Result<Query<T>, QueryRejection>) -> ServiceResult<T> {
    match query {
        Ok(Query(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!("Rejected query string: {}", rejection);
            Err(ResponseTemplateStatus::InvalidRequestBody.into())
        }
    }
}
