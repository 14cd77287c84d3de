// handlers/protected/mod.rs - handlers behind jwt_auth_middleware
//
// Every handler here receives the caller as Extension<AuthUser>.

pub mod post;
