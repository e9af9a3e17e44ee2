use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use contracts::system::auth::TokenClaims;

use crate::shared::error::AppError;

/// Claims of the admin that passed `require_admin`
/// Usage in handlers: `async fn handler(CurrentAdmin(claims): CurrentAdmin) -> Response`
pub struct CurrentAdmin(pub TokenClaims);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by the middleware
        parts
            .extensions
            .get::<TokenClaims>()
            .cloned()
            .map(CurrentAdmin)
            .ok_or_else(|| AppError::Unauthorized("Admin authentication required".into()))
    }
}
