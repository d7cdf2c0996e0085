//! Newsletter subscriber repository.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use atelier_core::{Email, SubscriberId};

use super::RepositoryError;

/// A newsletter subscriber.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: SubscriberId,
    pub email: Email,
    #[serde(skip_serializing)]
    pub unsubscribe_token: String,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct SubscriberRow {
    id: i32,
    email: String,
    unsubscribe_token: String,
    created_at: DateTime<Utc>,
}

impl SubscriberRow {
    fn into_domain(self) -> Result<Subscriber, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        Ok(Subscriber {
            id: SubscriberId::new(self.id),
            email,
            unsubscribe_token: self.unsubscribe_token,
            created_at: self.created_at,
        })
    }
}

/// Repository for newsletter subscriber operations.
pub struct SubscriberRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubscriberRepository<'a> {
    /// Create a new subscriber repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Subscribe an email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already subscribed.
    pub async fn subscribe(
        &self,
        email: &Email,
        unsubscribe_token: &str,
    ) -> Result<Subscriber, RepositoryError> {
        let row = sqlx::query_as::<_, SubscriberRow>(
            r"
            INSERT INTO subscribers (email, unsubscribe_token)
            VALUES ($1, $2)
            RETURNING id, email, unsubscribe_token, created_at
            ",
        )
        .bind(email.as_str())
        .bind(unsubscribe_token)
        .fetch_one(self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)?;

        row.into_domain()
    }

    /// Remove a subscriber by their unsubscribe token.
    ///
    /// Returns `true` if a subscriber was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn unsubscribe_by_token(&self, token: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM subscribers WHERE unsubscribe_token = $1")
            .bind(token)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List all subscribers, newest first (admin screen).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Subscriber>, RepositoryError> {
        let rows = sqlx::query_as::<_, SubscriberRow>(
            "SELECT id, email, unsubscribe_token, created_at FROM subscribers ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(SubscriberRow::into_domain).collect()
    }

    /// Delete a subscriber by ID (admin action).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the subscriber doesn't exist.
    pub async fn delete(&self, id: SubscriberId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM subscribers WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
