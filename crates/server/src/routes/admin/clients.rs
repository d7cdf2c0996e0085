//! Admin client (user) management.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use atelier_core::UserId;

use crate::db::users::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::User;
use crate::state::AppState;

/// List all registered users.
#[instrument(skip(state, _admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<User>>> {
    let users = UserRepository::new(state.pool()).list().await?;
    Ok(Json(users))
}

/// Admin-flag change request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAdminBody {
    pub is_admin: bool,
}

/// Grant or revoke the admin flag for a user.
///
/// Admins cannot revoke their own flag; that would make a store with a
/// single admin unrecoverable from the UI.
#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn set_admin(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
    Json(body): Json<SetAdminBody>,
) -> Result<Json<User>> {
    let target = UserId::new(id);
    if target == admin.id && !body.is_admin {
        return Err(AppError::BadRequest(
            "cannot revoke your own admin access".to_string(),
        ));
    }

    let user = UserRepository::new(state.pool())
        .set_admin(target, body.is_admin)
        .await?;
    Ok(Json(user))
}
