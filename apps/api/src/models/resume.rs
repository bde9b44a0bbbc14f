//! Resume lookup. Storage itself is owned elsewhere; the AI layer only needs
//! the extracted text of a resume that belongs to the caller.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;

/// Read-only access to stored resume text, keyed by owner and resume id.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// `Ok(None)` when the resume does not exist or belongs to another user.
    /// A resume whose text was never extracted yields an empty string.
    async fn find_raw_text(&self, user_id: i64, resume_id: i64)
        -> Result<Option<String>, AppError>;
}

/// `ResumeStore` backed by the `resumes` table.
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    /// Lookups are single-row reads, so a small pool is enough.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        info!("Connecting to PostgreSQL...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn find_raw_text(
        &self,
        user_id: i64,
        resume_id: i64,
    ) -> Result<Option<String>, AppError> {
        let raw_text: Option<Option<String>> =
            sqlx::query_scalar("SELECT raw_text FROM resumes WHERE id = $1 AND user_id = $2")
                .bind(resume_id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(raw_text.map(Option::unwrap_or_default))
    }
}
