//! Newsletter subscription route handlers.
//!
//! Subscribing an email that is already on the list reports success: the
//! subscriber is in the system either way, and a distinct error would
//! leak who is subscribed.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use atelier_core::Email;

use crate::db::RepositoryError;
use crate::db::subscribers::SubscriberRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Subscription request body.
#[derive(Debug, Deserialize)]
pub struct SubscribeBody {
    pub email: String,
}

/// Subscribe to the newsletter.
#[instrument(skip(state), fields(email = %body.email))]
pub async fn subscribe(
    State(state): State<AppState>,
    Json(body): Json<SubscribeBody>,
) -> Result<Json<serde_json::Value>> {
    let email = Email::parse(&body.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let token = generate_unsubscribe_token();

    match SubscriberRepository::new(state.pool())
        .subscribe(&email, &token)
        .await
    {
        Ok(_) => {
            tracing::info!(email = %email, "Newsletter subscription successful");
        }
        Err(RepositoryError::Conflict(_)) => {
            tracing::info!(email = %email, "Email already subscribed - treating as success");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Json(json!({ "subscribed": true })))
}

/// Unsubscribe via the token from the newsletter footer link.
#[instrument(skip(state, token))]
pub async fn unsubscribe(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<StatusCode> {
    let removed = SubscriberRepository::new(state.pool())
        .unsubscribe_by_token(&token)
        .await?;

    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("unknown unsubscribe token".to_string()))
    }
}

/// Generate an opaque unsubscribe token.
fn generate_unsubscribe_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsubscribe_tokens_are_unique() {
        let a = generate_unsubscribe_token();
        let b = generate_unsubscribe_token();
        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
