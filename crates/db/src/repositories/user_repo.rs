//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

const COLUMNS: &str = "id, username, display_name, email, avatar, url, \
                       is_enabled, is_deleted, created_at, updated_at";

/// Provides user creation, batch lookup and name search.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, display_name, email, avatar, url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.display_name)
            .bind(&input.email)
            .bind(&input.avatar)
            .bind(&input.url)
            .fetch_one(pool)
            .await
    }

    /// Fetch every user whose username is in `usernames`. Unknown names are
    /// simply absent from the result.
    pub async fn find_by_usernames(
        pool: &PgPool,
        usernames: &[String],
    ) -> Result<Vec<User>, sqlx::Error> {
        if usernames.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = ANY($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(usernames)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search over username and display name.
    ///
    /// Disabled and deleted users are excluded.
    pub async fn search_by_name(
        pool: &PgPool,
        query_text: &str,
        limit: i64,
    ) -> Result<Vec<User>, sqlx::Error> {
        let pattern = format!("%{}%", escape_like(query_text));
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE is_enabled AND NOT is_deleted
               AND (username ILIKE $1 OR display_name ILIKE $1)
             ORDER BY username
             LIMIT $2"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&pattern)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}

/// Escape `LIKE` metacharacters so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
