use crate::auth::repo::{PgUserRepo, UserRepo};
use crate::config::{AppConfig, StoreBackend};
use crate::memory::MemoryStore;
use crate::webtoons::repo::{PgWebtoonRepo, WebtoonRepo};
use anyhow::Context;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepo>,
    pub webtoons: Arc<dyn WebtoonRepo>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let config = Arc::new(config);

        match config.store {
            StoreBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL must be set for the postgres backend")?;
                let db = crate::db::connect(url).await?;
                Ok(Self {
                    users: Arc::new(PgUserRepo::new(db.clone())),
                    webtoons: Arc::new(PgWebtoonRepo::new(db)),
                    config,
                })
            }
            StoreBackend::Memory => {
                info!("using in-memory store; records are lost on exit");
                Ok(Self::in_memory(config))
            }
        }
    }

    pub fn in_memory(config: Arc<AppConfig>) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            config,
            users: store.clone(),
            webtoons: store,
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            store: StoreBackend::Memory,
            database_url: None,
            jwt: crate::config::JwtConfig {
                secret: "test".into(),
                ttl_seconds: crate::config::DEFAULT_TOKEN_TTL_SECONDS,
            },
            host: "127.0.0.1".into(),
            port: crate::config::DEFAULT_PORT,
        });
        Self::in_memory(config)
    }
}
