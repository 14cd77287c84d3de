// Business error type shared by every service
use thiserror::Error;

use crate::api::status::ResponseTemplateStatus;
use crate::database::manager::DatabaseError;

/// A failed service call, carrying the status the controller will report.
///
/// Services return `Result<T, ResponseError>`; the controller turns it into a
/// `ResponseTemplate` without looking at why it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ResponseError(ResponseTemplateStatus);

impl ResponseError {
    pub fn new(status: ResponseTemplateStatus) -> Self {
        Self(status)
    }

    pub fn status(&self) -> ResponseTemplateStatus {
        self.0
    }
}

impl From<ResponseTemplateStatus> for ResponseError {
    fn from(status: ResponseTemplateStatus) -> Self {
        Self(status)
    }
}

impl From<DatabaseError> for ResponseError {
    fn from(err: DatabaseError) -> Self {
        // Log the real error but report a generic status
        tracing::error!("Database error: {}", err);
        Self(ResponseTemplateStatus::DbError)
    }
}

pub type ServiceResult<T> = Result<T, ResponseError>;
