use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    auth::{repo::UserRepo, repo_types::User},
    db::StoreError,
    webtoons::repo::{parse_id, NewWebtoon, Webtoon, WebtoonRepo},
};

/// Process-local store backing both collections. Records keep insertion order.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    webtoons: RwLock<Vec<Webtoon>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn create(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == username) {
            return Err(StoreError::Duplicate("username".into()));
        }
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl WebtoonRepo for MemoryStore {
    async fn list(&self) -> Result<Vec<Webtoon>, StoreError> {
        Ok(self.webtoons.read().await.clone())
    }

    async fn create(&self, new: NewWebtoon) -> Result<Webtoon, StoreError> {
        let webtoon = Webtoon {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            characters: new.characters,
        };
        self.webtoons.write().await.push(webtoon.clone());
        Ok(webtoon)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Webtoon>, StoreError> {
        let id = parse_id(id)?;
        let webtoons = self.webtoons.read().await;
        Ok(webtoons.iter().find(|w| w.id == id).cloned())
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Webtoon>, StoreError> {
        let id = parse_id(id)?;
        let mut webtoons = self.webtoons.write().await;
        Ok(webtoons
            .iter()
            .position(|w| w.id == id)
            .map(|idx| webtoons.remove(idx)))
    }
}
