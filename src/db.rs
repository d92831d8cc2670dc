use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::{error, info};

/// Failures coming out of either store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} already exists")]
    Duplicate(String),
    #[error("invalid id `{0}`")]
    InvalidId(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Maps a postgres unique violation onto `Duplicate`, keeping every other error as-is.
    pub fn from_insert(err: sqlx::Error, what: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::Duplicate(what.to_string())
            }
            _ => Self::Database(err),
        }
    }
}

pub async fn connect(database_url: &str) -> anyhow::Result<PgPool> {
    let db = match PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
    {
        Ok(pool) => {
            info!("connected to database");
            pool
        }
        Err(e) => {
            error!(error = %e, "database connection error");
            return Err(e).context("connect to database");
        }
    };

    if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
        error!(error = %e, "migration failed");
        return Err(e).context("run migrations");
    }

    Ok(db)
}
