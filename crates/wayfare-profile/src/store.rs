//! Storage backends for user profile records
//!
//! This module provides the storage abstraction for profiles: a SurrealDB
//! document database as the primary backend and an in-memory map used both
//! for tests and as the degradation fallback.

use crate::model::UserProfile;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use surrealdb::{
    RecordId, Surreal,
    engine::local::{Db, Mem, SurrealKv},
};
use tokio::sync::RwLock;
use wayfare_common::{PROFILE_TABLE, Result, WayfareError};

/// A trait defining operations for a profile storage backend
#[async_trait]
pub trait ProfileBackend: Send + Sync {
    /// Store a new profile record
    async fn insert(&self, profile: &UserProfile) -> Result<()>;

    /// Retrieve a profile by user id
    async fn fetch(&self, user_id: &str) -> Result<Option<UserProfile>>;

    /// Overwrite a profile record
    async fn replace(&self, profile: &UserProfile) -> Result<()>;

    /// Delete a profile record, reporting whether it existed
    async fn remove(&self, user_id: &str) -> Result<bool>;

    /// List profiles in creation order (oldest first) within a page window
    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<UserProfile>>;
}

/// SurrealDB configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SurrealConfig {
    /// File-based SurrealDB
    File {
        path: PathBuf,
        namespace: String,
        database: String,
    },
    /// Memory-based SurrealDB
    Memory { namespace: String, database: String },
}

impl Default for SurrealConfig {
    fn default() -> Self {
        SurrealConfig::File {
            path: PathBuf::from("./data/profiles.db"),
            namespace: "wayfare".to_string(),
            database: "profiles".to_string(),
        }
    }
}

/// SurrealDB representation of a profile with RecordId.
///
/// `created_at` is duplicated as an RFC3339 string so listings can order on
/// it without touching the nested record.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SurrealProfileRecord {
    id: RecordId,
    created_at: String,
    profile: UserProfile,
}

impl SurrealProfileRecord {
    fn from_profile(profile: &UserProfile) -> Self {
        Self {
            id: RecordId::from((PROFILE_TABLE, profile.user_id.clone())),
            created_at: profile.created_at.to_rfc3339(),
            profile: profile.clone(),
        }
    }
}

/// SurrealDB-backed profile store
#[derive(Clone)]
pub struct SurrealProfileStore {
    db: Surreal<Db>,
}

impl SurrealProfileStore {
    /// Create a new SurrealDB profile store
    pub async fn new(config: SurrealConfig) -> Result<Self> {
        let db = match &config {
            SurrealConfig::File {
                path,
                namespace,
                database,
            } => {
                tracing::debug!("Initializing SurrealDB in file mode at: {:?}", path);

                let db: Surreal<Db> =
                    Surreal::new::<SurrealKv>(path.clone()).await.map_err(|e| {
                        WayfareError::Storage(format!(
                            "Failed to create SurrealDB file connection: {}",
                            e
                        ))
                    })?;

                db.use_ns(namespace).use_db(database).await.map_err(|e| {
                    WayfareError::Storage(format!("Failed to set namespace/database: {}", e))
                })?;

                tracing::info!("SurrealDB initialized with file backend at: {:?}", path);
                db
            }
            SurrealConfig::Memory {
                namespace,
                database,
            } => {
                tracing::debug!("Initializing SurrealDB in memory mode");

                let db: Surreal<Db> = Surreal::new::<Mem>(()).await.map_err(|e| {
                    WayfareError::Storage(format!("Failed to create SurrealDB connection: {}", e))
                })?;

                db.use_ns(namespace).use_db(database).await.map_err(|e| {
                    WayfareError::Storage(format!("Failed to set namespace/database: {}", e))
                })?;

                tracing::info!("SurrealDB initialized with in-memory backend");
                db
            }
        };

        Ok(Self { db })
    }

    /// Initialize the database schema
    pub async fn initialize_schema(&self) -> Result<()> {
        tracing::debug!("Initializing SurrealDB profile schema");

        self.db
            .query(format!("DEFINE TABLE {} SCHEMALESS;", PROFILE_TABLE))
            .await
            .map_err(|e| {
                WayfareError::Storage(format!("Failed to define profile table: {}", e))
            })?;

        self.db
            .query(format!(
                "DEFINE INDEX profile_created ON {} FIELDS created_at;",
                PROFILE_TABLE
            ))
            .await
            .map_err(|e| WayfareError::Storage(format!("Failed to create index: {}", e)))?;

        tracing::info!("SurrealDB profile schema initialized");
        Ok(())
    }
}

#[async_trait]
impl ProfileBackend for SurrealProfileStore {
    async fn insert(&self, profile: &UserProfile) -> Result<()> {
        let record = SurrealProfileRecord::from_profile(profile);
        let _: Option<SurrealProfileRecord> = self
            .db
            .create((PROFILE_TABLE, profile.user_id.as_str()))
            .content(record)
            .await
            .map_err(|e| WayfareError::Storage(format!("Failed to store profile: {}", e)))?;

        tracing::debug!("Stored profile: {}", profile.user_id);
        Ok(())
    }

    async fn fetch(&self, user_id: &str) -> Result<Option<UserProfile>> {
        let record: Option<SurrealProfileRecord> = self
            .db
            .select((PROFILE_TABLE, user_id))
            .await
            .map_err(|e| WayfareError::Storage(format!("Failed to load profile: {}", e)))?;

        Ok(record.map(|r| r.profile))
    }

    async fn replace(&self, profile: &UserProfile) -> Result<()> {
        let record = SurrealProfileRecord::from_profile(profile);
        let _: Option<SurrealProfileRecord> = self
            .db
            .update((PROFILE_TABLE, profile.user_id.as_str()))
            .content(record)
            .await
            .map_err(|e| WayfareError::Storage(format!("Failed to update profile: {}", e)))?;

        tracing::debug!("Updated profile: {}", profile.user_id);
        Ok(())
    }

    async fn remove(&self, user_id: &str) -> Result<bool> {
        let deleted: Option<SurrealProfileRecord> = self
            .db
            .delete((PROFILE_TABLE, user_id))
            .await
            .map_err(|e| WayfareError::Storage(format!("Failed to delete profile: {}", e)))?;

        Ok(deleted.is_some())
    }

    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<UserProfile>> {
        let mut response = self
            .db
            .query(format!(
                "SELECT * FROM {} ORDER BY created_at ASC LIMIT $limit START $offset",
                PROFILE_TABLE
            ))
            .bind(("limit", limit))
            .bind(("offset", offset))
            .await
            .map_err(|e| WayfareError::Storage(format!("Failed to list profiles: {}", e)))?;

        let records: Vec<SurrealProfileRecord> = response
            .take(0)
            .map_err(|e| WayfareError::Storage(format!("Failed to read profile rows: {}", e)))?;

        Ok(records.into_iter().map(|r| r.profile).collect())
    }
}

/// In-memory profile store.
///
/// Used directly in tests and as the process-local fallback once the
/// primary backend has degraded. `replace` is insert-or-replace so that a
/// write which failed on the primary still lands here.
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<String, UserProfile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileBackend for MemoryProfileStore {
    async fn insert(&self, profile: &UserProfile) -> Result<()> {
        let mut profiles = self.profiles.write().await;
        profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }

    async fn fetch(&self, user_id: &str) -> Result<Option<UserProfile>> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(user_id).cloned())
    }

    async fn replace(&self, profile: &UserProfile) -> Result<()> {
        let mut profiles = self.profiles.write().await;
        profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }

    async fn remove(&self, user_id: &str) -> Result<bool> {
        let mut profiles = self.profiles.write().await;
        Ok(profiles.remove(user_id).is_some())
    }

    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<UserProfile>> {
        let profiles = self.profiles.read().await;
        let mut all: Vec<UserProfile> = profiles.values().cloned().collect();
        // Stable creation order; user_id breaks ties between equal timestamps
        all.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });

        Ok(all.into_iter().skip(offset).take(limit).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AccessibilityProfile, BasicInfo, TravelInterests, UserPreferences, UserProfile,
    };
    use chrono::{Duration, Utc};

    fn sample_profile(user_id: &str, created_offset_secs: i64) -> UserProfile {
        let created = Utc::now() + Duration::seconds(created_offset_secs);
        UserProfile {
            user_id: user_id.to_string(),
            basic_info: BasicInfo {
                name: format!("User {}", user_id),
                email: format!("{}@example.com", user_id),
                age: None,
                nationality: "US".to_string(),
                home_location: "Portland".to_string(),
                phone: None,
                emergency_contact: None,
            },
            travel_interests: TravelInterests::default(),
            accessibility_profile: AccessibilityProfile::default(),
            preferences: UserPreferences::default(),
            created_at: created,
            updated_at: created,
            last_active: None,
            profile_complete: false,
            onboarding_completed: false,
            travel_history: Vec::new(),
            learned_preferences: serde_json::Map::new(),
        }
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryProfileStore::new();
        let profile = sample_profile("u1", 0);

        store.insert(&profile).await.unwrap();
        let fetched = store.fetch("u1").await.unwrap();
        assert_eq!(fetched, Some(profile));

        assert!(store.remove("u1").await.unwrap());
        assert!(!store.remove("u1").await.unwrap());
        assert_eq!(store.fetch("u1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store_list_window_in_creation_order() {
        let store = MemoryProfileStore::new();
        for (i, id) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            store.insert(&sample_profile(id, i as i64)).await.unwrap();
        }

        let page = store.list(2, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].user_id, "c");
        assert_eq!(page[1].user_id, "d");
    }

    #[tokio::test]
    async fn test_surreal_store_roundtrip() {
        let config = SurrealConfig::Memory {
            namespace: "test".to_string(),
            database: "profiles".to_string(),
        };
        let store = SurrealProfileStore::new(config).await.unwrap();
        store.initialize_schema().await.unwrap();

        let profile = sample_profile("u1", 0);
        store.insert(&profile).await.unwrap();

        let fetched = store.fetch("u1").await.unwrap();
        assert_eq!(fetched, Some(profile.clone()));

        let mut renamed = profile.clone();
        renamed.basic_info.name = "Renamed".to_string();
        store.replace(&renamed).await.unwrap();
        let fetched = store.fetch("u1").await.unwrap().unwrap();
        assert_eq!(fetched.basic_info.name, "Renamed");

        assert!(store.remove("u1").await.unwrap());
        assert_eq!(store.fetch("u1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_surreal_store_list_ordering() {
        let config = SurrealConfig::Memory {
            namespace: "test".to_string(),
            database: "profiles".to_string(),
        };
        let store = SurrealProfileStore::new(config).await.unwrap();
        store.initialize_schema().await.unwrap();

        for (i, id) in ["a", "b", "c"].iter().enumerate() {
            store.insert(&sample_profile(id, i as i64)).await.unwrap();
        }

        let all = store.list(10, 0).await.unwrap();
        let ids: Vec<&str> = all.iter().map(|p| p.user_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
