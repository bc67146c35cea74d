//! Admin JWT authentication extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use shared::jwt::{extract_admin_id, AdminRole};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

/// Authenticated platform administrator.
///
/// Validates the Bearer token in the Authorization header and requires the
/// `super_admin` role. The admin id is the actor stamped on plan writes.
#[derive(Debug, Clone)]
pub struct AdminAuth {
    pub admin_id: Uuid,
    pub role: AdminRole,
    pub jti: String,
}

fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let header = parts
        .headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization header format".to_string()))
}

#[async_trait]
impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = state.jwt.validate_access_token(token)?;
        let admin_id = extract_admin_id(&claims)?;

        if claims.role != AdminRole::SuperAdmin {
            tracing::warn!(
                admin_id = %admin_id,
                role = %claims.role,
                "Admin lacks super_admin role for plan console"
            );
            return Err(ApiError::Forbidden(
                "Super admin role required".to_string(),
            ));
        }

        Ok(AdminAuth {
            admin_id,
            role: claims.role,
            jti: claims.jti,
        })
    }
}
