//! Revoked login sessions.
//!
//! Tokens are stateless, so logout records the session id until the token
//! would have expired anyway. Carried in `AppState` as `Arc<dyn RevocationStore>`.

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;

#[async_trait]
pub trait RevocationStore: Send + Sync {
    async fn revoke(&self, session_id: Uuid, ttl_secs: u64) -> Result<(), AppError>;

    async fn is_revoked(&self, session_id: Uuid) -> Result<bool, AppError>;
}

pub struct RedisRevocationStore {
    client: redis::Client,
}

impl RedisRevocationStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }
}

fn revocation_key(session_id: Uuid) -> String {
    format!("session:revoked:{session_id}")
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn revoke(&self, session_id: Uuid, ttl_secs: u64) -> Result<(), AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        redis::cmd("SET")
            .arg(revocation_key(session_id))
            .arg(1)
            .arg("EX")
            .arg(ttl_secs.max(1))
            .query_async::<_, ()>(&mut conn)
            .await?;
        debug!("Revoked session {session_id} for {ttl_secs}s");
        Ok(())
    }

    async fn is_revoked(&self, session_id: Uuid) -> Result<bool, AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let exists: bool = redis::cmd("EXISTS")
            .arg(revocation_key(session_id))
            .query_async(&mut conn)
            .await?;
        Ok(exists)
    }
}

#[cfg(test)]
pub mod memory {
    use std::collections::HashSet;

    use tokio::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoryRevocationStore {
        revoked: Mutex<HashSet<Uuid>>,
    }

    #[async_trait]
    impl RevocationStore for MemoryRevocationStore {
        async fn revoke(&self, session_id: Uuid, _ttl_secs: u64) -> Result<(), AppError> {
            self.revoked.lock().await.insert(session_id);
            Ok(())
        }

        async fn is_revoked(&self, session_id: Uuid) -> Result<bool, AppError> {
            Ok(self.revoked.lock().await.contains(&session_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryRevocationStore;
    use super::*;

    #[test]
    fn test_key_format() {
        let id = Uuid::nil();
        assert_eq!(
            revocation_key(id),
            "session:revoked:00000000-0000-0000-0000-000000000000"
        );
    }

    #[tokio::test]
    async fn test_memory_store_revokes() {
        let store = MemoryRevocationStore::default();
        let id = Uuid::new_v4();
        assert!(!store.is_revoked(id).await.unwrap());
        store.revoke(id, 60).await.unwrap();
        assert!(store.is_revoked(id).await.unwrap());
    }
}
