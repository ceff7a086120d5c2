//! Skill-set store: one slot per user holding the most recently declared
//! skill labels as a JSON array.

use std::collections::HashMap;

use async_trait::async_trait;
use redis::AsyncCommands;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Failed to encode skill set: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Skill slot {key} kept changing; gave up after {attempts} attempts")]
    Contended { key: String, attempts: u32 },
}

/// Read-modify-write step for [`SkillStore::update`]. Receives the current
/// raw payload and returns the labels to write, or `None` to leave the slot
/// untouched. May run more than once if the backend retries.
pub type SlotUpdate<'a> = dyn FnMut(Option<&str>) -> Option<Vec<String>> + Send + 'a;

/// Read/overwrite access to a user's skill slot.
///
/// `get` returns the raw stored payload; decoding into a `SkillSet` (and
/// deciding what an undecodable payload means) is the resolver's job.
#[async_trait]
pub trait SkillStore: Send + Sync {
    async fn get(&self, user_id: Uuid) -> Result<Option<String>, StoreError>;

    async fn put(&self, user_id: Uuid, labels: &[String]) -> Result<(), StoreError>;

    /// Applies `apply` to the slot atomically with respect to other writers
    /// of the same slot. Returns whether anything was written.
    async fn update(&self, user_id: Uuid, apply: &mut SlotUpdate<'_>) -> Result<bool, StoreError>;
}

/// Optimistic-transaction retries before [`StoreError::Contended`].
const MAX_UPDATE_ATTEMPTS: u32 = 8;

// ────────────────────────────────────────────────────────────────────────────
// Redis
// ────────────────────────────────────────────────────────────────────────────

pub struct RedisSkillStore {
    client: redis::Client,
    slot_prefix: String,
}

impl RedisSkillStore {
    pub fn new(client: redis::Client, slot_prefix: impl Into<String>) -> Self {
        Self {
            client,
            slot_prefix: slot_prefix.into(),
        }
    }

    fn slot_key(&self, user_id: Uuid) -> String {
        format!("{}:{}", self.slot_prefix, user_id)
    }
}

#[async_trait]
impl SkillStore for RedisSkillStore {
    async fn get(&self, user_id: Uuid) -> Result<Option<String>, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let key = self.slot_key(user_id);
        let value: Option<String> = conn.get(&key).await?;
        debug!("Read skill slot {key} (present: {})", value.is_some());
        Ok(value)
    }

    async fn put(&self, user_id: Uuid, labels: &[String]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(labels)?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let key = self.slot_key(user_id);
        conn.set::<_, _, ()>(&key, payload).await?;
        debug!("Wrote {} skills to slot {key}", labels.len());
        Ok(())
    }

    async fn update(&self, user_id: Uuid, apply: &mut SlotUpdate<'_>) -> Result<bool, StoreError> {
        // WATCH is per connection; this connection is opened for this call only.
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let key = self.slot_key(user_id);

        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            redis::cmd("WATCH")
                .arg(&key)
                .query_async::<_, ()>(&mut conn)
                .await?;
            let current: Option<String> = conn.get(&key).await?;

            let Some(labels) = apply(current.as_deref()) else {
                redis::cmd("UNWATCH").query_async::<_, ()>(&mut conn).await?;
                return Ok(false);
            };
            let payload = serde_json::to_string(&labels)?;

            // EXEC replies nil when the watched key changed underneath us.
            let committed: Option<redis::Value> = redis::pipe()
                .atomic()
                .set(&key, payload)
                .query_async(&mut conn)
                .await?;
            if committed.is_some() {
                debug!("Updated slot {key} with {} skills", labels.len());
                return Ok(true);
            }
            debug!("Slot {key} changed during update (attempt {attempt}), retrying");
        }

        Err(StoreError::Contended {
            key,
            attempts: MAX_UPDATE_ATTEMPTS,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory (local dev, tests)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemorySkillStore {
    slots: RwLock<HashMap<Uuid, String>>,
}

impl InMemorySkillStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a raw payload, bypassing encoding. Lets tests plant corrupt slots.
    #[cfg(test)]
    pub async fn put_raw(&self, user_id: Uuid, payload: &str) {
        self.slots.write().await.insert(user_id, payload.to_string());
    }
}

#[async_trait]
impl SkillStore for InMemorySkillStore {
    async fn get(&self, user_id: Uuid) -> Result<Option<String>, StoreError> {
        Ok(self.slots.read().await.get(&user_id).cloned())
    }

    async fn put(&self, user_id: Uuid, labels: &[String]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(labels)?;
        self.slots.write().await.insert(user_id, payload);
        Ok(())
    }

    async fn update(&self, user_id: Uuid, apply: &mut SlotUpdate<'_>) -> Result<bool, StoreError> {
        // The write guard is held across read, apply and write.
        let mut slots = self.slots.write().await;
        let Some(labels) = apply(slots.get(&user_id).map(String::as_str)) else {
            return Ok(false);
        };
        slots.insert(user_id, serde_json::to_string(&labels)?);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_put_overwrites_slot() {
        let store = InMemorySkillStore::new();
        let user = Uuid::new_v4();

        store
            .put(user, &["Python".to_string(), "SQL".to_string()])
            .await
            .unwrap();
        store.put(user, &["Rust".to_string()]).await.unwrap();

        assert_eq!(store.get(user).await.unwrap().as_deref(), Some(r#"["Rust"]"#));
    }

    #[tokio::test]
    async fn test_in_memory_slots_are_per_user() {
        let store = InMemorySkillStore::new();
        store
            .put(Uuid::new_v4(), &["Go".to_string()])
            .await
            .unwrap();
        assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_in_memory_update_sees_current_slot() {
        let store = InMemorySkillStore::new();
        let user = Uuid::new_v4();
        store.put(user, &["Python".to_string()]).await.unwrap();

        let mut seen = None;
        let wrote = store
            .update(user, &mut |payload: Option<&str>| {
                seen = payload.map(str::to_string);
                Some(vec!["Python".to_string(), "SQL".to_string()])
            })
            .await
            .unwrap();

        assert!(wrote);
        assert_eq!(seen.as_deref(), Some(r#"["Python"]"#));
        assert_eq!(
            store.get(user).await.unwrap().as_deref(),
            Some(r#"["Python","SQL"]"#)
        );
    }

    #[tokio::test]
    async fn test_in_memory_update_can_skip_write() {
        let store = InMemorySkillStore::new();
        let user = Uuid::new_v4();

        let wrote = store
            .update(user, &mut |payload: Option<&str>| {
                assert!(payload.is_none());
                None
            })
            .await
            .unwrap();

        assert!(!wrote);
        assert!(store.get(user).await.unwrap().is_none());
    }

    #[test]
    fn test_redis_slot_key_uses_prefix() {
        let client = redis::Client::open("redis://127.0.0.1/").unwrap();
        let store = RedisSkillStore::new(client, "userSkills");
        let user = Uuid::nil();
        assert_eq!(
            store.slot_key(user),
            "userSkills:00000000-0000-0000-0000-000000000000"
        );
    }
}
