use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::api::{ResponseTemplate, ResponseTemplateStatus};
use crate::state::AppState;

/// Identity of the caller, resolved from a validated JWT
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub email: String,
}

/// JWT authentication middleware that validates tokens and extracts the caller.
///
/// Rejections are still envelopes, sent with 401.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ResponseTemplate<()>> {
    let token = extract_jwt_from_headers(request.headers()).map_err(reject)?;

    let claims = state.jwt.validate_jwt(token).map_err(|e| {
        tracing::debug!("Rejected token: {}", e);
        reject(ResponseTemplateStatus::InvalidJwt)
    })?;

    request.extensions_mut().insert(AuthUser { email: claims.sub });

    Ok(next.run(request).await)
}

fn reject(status: ResponseTemplateStatus) -> ResponseTemplate<()> {
    ResponseTemplate::failure(status).with_http_status(StatusCode::UNAUTHORIZED)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<&str, ResponseTemplateStatus> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(ResponseTemplateStatus::EmptyJwt)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ResponseTemplateStatus::InvalidJwt)?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if token.trim().is_empty() => Err(ResponseTemplateStatus::EmptyJwt),
        Some(token) => Ok(token.trim()),
        None => Err(ResponseTemplateStatus::InvalidJwt),
    }
}
