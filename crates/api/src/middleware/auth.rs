//! Admin gate for protected routes.
//!
//! Authentication and session management live in an upstream collaborator:
//! after validating the session, it forwards the verified caller identity in
//! the `x-user-id` and `x-user-role` headers. This middleware enforces the
//! admin-only access rule on everything behind it; no session logic exists
//! in this service.

use axum::{
    Json,
    extract::{FromRequestParts, Request},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use uuid::Uuid;

use boekhoud_shared::types::UserId;

/// Header carrying the verified caller's user ID.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the verified caller's role.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Verified caller identity injected by the upstream auth layer.
#[derive(Debug, Clone)]
pub struct CallerIdentity {
    /// The caller's user ID.
    pub user_id: UserId,
    /// The caller's role.
    pub role: String,
}

impl CallerIdentity {
    /// Returns true if the caller holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("admin")
    }
}

/// Middleware rejecting everything but admin callers.
///
/// Responds 401 when no verified identity is present and 403 when the
/// identity's role is not `admin`; otherwise stores the identity in request
/// extensions for handlers to access.
pub async fn require_admin(mut request: Request, next: Next) -> Response {
    let headers = request.headers();
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let user_id = header(USER_ID_HEADER).and_then(|v| Uuid::parse_str(v).ok());
    let role = header(USER_ROLE_HEADER);

    let (Some(user_id), Some(role)) = (user_id, role) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "UNAUTHORIZED",
                "message": "No verified caller identity present"
            })),
        )
            .into_response();
    };

    let identity = CallerIdentity {
        user_id: UserId::from_uuid(user_id),
        role: role.to_string(),
    };

    if !identity.is_admin() {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "FORBIDDEN",
                "message": "Admin role is required"
            })),
        )
            .into_response();
    }

    request.extensions_mut().insert(identity);
    next.run(request).await
}

/// Extractor for the verified admin caller.
///
/// Use this in handlers behind [`require_admin`]:
///
/// ```ignore
/// async fn handler(admin: AdminUser) -> impl IntoResponse {
///     let user_id = admin.user_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AdminUser(pub CallerIdentity);

impl AdminUser {
    /// Returns the caller's user ID.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.0.user_id
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CallerIdentity>()
            .cloned()
            .map(AdminUser)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "error": "UNAUTHORIZED",
                        "message": "No verified caller identity present"
                    })),
                )
                    .into_response()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_admin_case_insensitive() {
        let identity = CallerIdentity {
            user_id: UserId::new(),
            role: "Admin".to_string(),
        };
        assert!(identity.is_admin());

        let identity = CallerIdentity {
            user_id: UserId::new(),
            role: "operator".to_string(),
        };
        assert!(!identity.is_admin());
    }
}
