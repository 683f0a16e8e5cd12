//! Profile service with CRUD operations and storage degradation policy
//!
//! The service owns the canonical profile records. It writes to a primary
//! document-database backend when one is available; the first failed
//! primary operation permanently demotes the service to a process-local
//! in-memory store for the rest of the process lifetime. Storage failures
//! never escape to callers: reads degrade to `None`, mutations to `false`.

use crate::model::{CreateProfileRequest, ProfileSummary, UpdateProfileRequest, UserProfile};
use crate::store::{MemoryProfileStore, ProfileBackend, SurrealConfig, SurrealProfileStore};
use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};
use wayfare_common::{Pagination, Result, WayfareError, generate_id};

/// Service for managing user profiles
pub struct ProfileService {
    primary: Option<Arc<dyn ProfileBackend>>,
    fallback: MemoryProfileStore,
    degraded: AtomicBool,
}

impl ProfileService {
    /// Create a service over an explicit primary backend
    pub fn new(primary: Arc<dyn ProfileBackend>) -> Self {
        Self {
            primary: Some(primary),
            fallback: MemoryProfileStore::new(),
            degraded: AtomicBool::new(false),
        }
    }

    /// Create a service backed only by the in-memory store.
    ///
    /// This is a deliberate mode (tests, local development), not a
    /// degradation, so `is_degraded` stays false.
    pub fn in_memory() -> Self {
        Self {
            primary: None,
            fallback: MemoryProfileStore::new(),
            degraded: AtomicBool::new(false),
        }
    }

    /// Create a service with a SurrealDB primary backend.
    ///
    /// If the database cannot be initialized the service starts degraded on
    /// the in-memory store, mirroring the call-time failover policy.
    pub async fn with_surreal(config: SurrealConfig) -> Self {
        match SurrealProfileStore::new(config).await {
            Ok(store) => match store.initialize_schema().await {
                Ok(()) => {
                    info!("ProfileService initialized with SurrealDB backend");
                    Self::new(Arc::new(store))
                }
                Err(e) => {
                    error!("Failed to initialize profile schema: {}", e);
                    Self::degraded_from_boot()
                }
            },
            Err(e) => {
                error!("Failed to initialize SurrealDB client: {}", e);
                Self::degraded_from_boot()
            }
        }
    }

    fn degraded_from_boot() -> Self {
        warn!("Using in-memory profile storage as fallback");
        Self {
            primary: None,
            fallback: MemoryProfileStore::new(),
            degraded: AtomicBool::new(true),
        }
    }

    /// Whether the service has fallen back to in-memory storage after a
    /// primary-backend failure
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Relaxed)
    }

    /// Storage mode for health reporting
    pub fn storage_mode(&self) -> &'static str {
        if self.is_degraded() {
            "degraded"
        } else if self.primary.is_some() {
            "primary"
        } else {
            "memory"
        }
    }

    fn active_primary(&self) -> Option<&Arc<dyn ProfileBackend>> {
        if self.degraded.load(Ordering::Relaxed) {
            None
        } else {
            self.primary.as_ref()
        }
    }

    /// One-time, process-lifetime demotion; the primary is never retried
    fn mark_degraded(&self, op: &str, err: &WayfareError) {
        warn!(
            "Primary profile backend failed during {}, falling back to memory store: {}",
            op, err
        );
        self.degraded.store(true, Ordering::Relaxed);
    }

    async fn store_insert(&self, profile: &UserProfile) -> Result<()> {
        if let Some(primary) = self.active_primary() {
            match primary.insert(profile).await {
                Ok(()) => return Ok(()),
                Err(e) => self.mark_degraded("insert", &e),
            }
        }
        self.fallback.insert(profile).await
    }

    async fn store_fetch(&self, user_id: &str) -> Result<Option<UserProfile>> {
        if let Some(primary) = self.active_primary() {
            match primary.fetch(user_id).await {
                Ok(found) => return Ok(found),
                Err(e) => self.mark_degraded("fetch", &e),
            }
        }
        self.fallback.fetch(user_id).await
    }

    async fn store_replace(&self, profile: &UserProfile) -> Result<()> {
        if let Some(primary) = self.active_primary() {
            match primary.replace(profile).await {
                Ok(()) => return Ok(()),
                Err(e) => self.mark_degraded("replace", &e),
            }
        }
        self.fallback.replace(profile).await
    }

    async fn store_remove(&self, user_id: &str) -> Result<bool> {
        if let Some(primary) = self.active_primary() {
            match primary.remove(user_id).await {
                Ok(removed) => return Ok(removed),
                Err(e) => self.mark_degraded("remove", &e),
            }
        }
        self.fallback.remove(user_id).await
    }

    async fn store_list(&self, limit: usize, offset: usize) -> Result<Vec<UserProfile>> {
        if let Some(primary) = self.active_primary() {
            match primary.list(limit, offset).await {
                Ok(profiles) => return Ok(profiles),
                Err(e) => self.mark_degraded("list", &e),
            }
        }
        self.fallback.list(limit, offset).await
    }

    /// Create a new user profile.
    ///
    /// Fails with a validation error when the basic info is unusable;
    /// storage problems are absorbed by the fallback and never surfaced.
    pub async fn create(&self, request: CreateProfileRequest) -> Result<UserProfile> {
        if request.basic_info.name.trim().is_empty() {
            return Err(WayfareError::Validation(
                "basic_info.name must not be empty".to_string(),
            ));
        }
        if request.basic_info.email.trim().is_empty() {
            return Err(WayfareError::Validation(
                "basic_info.email must not be empty".to_string(),
            ));
        }

        let now = Utc::now();
        let mut profile = UserProfile {
            user_id: generate_id(),
            basic_info: request.basic_info,
            travel_interests: request.travel_interests.unwrap_or_default(),
            accessibility_profile: request.accessibility_profile.unwrap_or_default(),
            preferences: request.preferences.unwrap_or_default(),
            created_at: now,
            updated_at: now,
            last_active: None,
            profile_complete: false,
            onboarding_completed: false,
            travel_history: Vec::new(),
            learned_preferences: serde_json::Map::new(),
        };
        profile.profile_complete = profile.is_complete();

        self.store_insert(&profile).await?;

        info!("Created user profile: {}", profile.user_id);
        Ok(profile)
    }

    /// Get a profile by user id; `None` when absent or storage fails
    pub async fn get(&self, user_id: &str) -> Option<UserProfile> {
        match self.store_fetch(user_id).await {
            Ok(found) => found,
            Err(e) => {
                error!("Error getting user profile {}: {}", user_id, e);
                None
            }
        }
    }

    /// Merge the provided fields into an existing profile.
    ///
    /// Returns `None` when the id is unknown; no record is created (no
    /// upsert semantics). `updated_at` is always refreshed; completeness is
    /// recomputed only when a completeness-relevant section was updated.
    pub async fn update(
        &self,
        user_id: &str,
        request: UpdateProfileRequest,
    ) -> Option<UserProfile> {
        let mut profile = self.get(user_id).await?;

        let completeness_relevant = request.basic_info.is_some()
            || request.travel_interests.is_some()
            || request.accessibility_profile.is_some();

        if let Some(basic_info) = request.basic_info {
            profile.basic_info = basic_info;
        }
        if let Some(travel_interests) = request.travel_interests {
            profile.travel_interests = travel_interests;
        }
        if let Some(accessibility_profile) = request.accessibility_profile {
            profile.accessibility_profile = accessibility_profile;
        }
        if let Some(preferences) = request.preferences {
            profile.preferences = preferences;
        }

        profile.updated_at = Utc::now();
        if completeness_relevant {
            profile.profile_complete = profile.is_complete();
        }

        match self.store_replace(&profile).await {
            Ok(()) => Some(profile),
            Err(e) => {
                error!("Error updating user profile {}: {}", user_id, e);
                None
            }
        }
    }

    /// Delete a profile. Idempotent: deleting an unknown id returns false
    pub async fn delete(&self, user_id: &str) -> bool {
        match self.store_remove(user_id).await {
            Ok(removed) => {
                if removed {
                    info!("Deleted user profile: {}", user_id);
                }
                removed
            }
            Err(e) => {
                error!("Error deleting user profile {}: {}", user_id, e);
                false
            }
        }
    }

    /// List profile summaries in creation order within a page window
    pub async fn list(&self, pagination: Pagination) -> Vec<ProfileSummary> {
        match self.store_list(pagination.limit, pagination.offset).await {
            Ok(profiles) => profiles.iter().map(|p| p.summary()).collect(),
            Err(e) => {
                error!("Error listing user profiles: {}", e);
                Vec::new()
            }
        }
    }

    /// Refresh only the last-active timestamp
    pub async fn touch_last_active(&self, user_id: &str) -> bool {
        let Some(mut profile) = self.get(user_id).await else {
            return false;
        };
        profile.last_active = Some(Utc::now());

        match self.store_replace(&profile).await {
            Ok(()) => true,
            Err(e) => {
                error!("Error updating last active for {}: {}", user_id, e);
                false
            }
        }
    }

    /// Explicitly mark onboarding as finished (or not); never derived
    pub async fn set_onboarding_completed(&self, user_id: &str, completed: bool) -> bool {
        let Some(mut profile) = self.get(user_id).await else {
            return false;
        };
        profile.onboarding_completed = completed;
        profile.updated_at = Utc::now();

        match self.store_replace(&profile).await {
            Ok(()) => true,
            Err(e) => {
                error!("Error setting onboarding for {}: {}", user_id, e);
                false
            }
        }
    }

    /// Append an entry to the free-form travel history log
    pub async fn append_travel_history(&self, user_id: &str, entry: serde_json::Value) -> bool {
        let Some(mut profile) = self.get(user_id).await else {
            return false;
        };
        profile.travel_history.push(entry);
        profile.updated_at = Utc::now();

        match self.store_replace(&profile).await {
            Ok(()) => true,
            Err(e) => {
                error!("Error appending travel history for {}: {}", user_id, e);
                false
            }
        }
    }

    /// Merge learned preferences from conversations into the profile
    pub async fn merge_learned_preferences(
        &self,
        user_id: &str,
        preferences: serde_json::Map<String, serde_json::Value>,
    ) -> bool {
        let Some(mut profile) = self.get(user_id).await else {
            return false;
        };
        for (key, value) in preferences {
            profile.learned_preferences.insert(key, value);
        }
        profile.updated_at = Utc::now();

        match self.store_replace(&profile).await {
            Ok(()) => true,
            Err(e) => {
                error!("Error merging learned preferences for {}: {}", user_id, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AccessibilityProfile, BasicInfo, TravelInterests, UserPreferences};
    use async_trait::async_trait;
    use wayfare_common::CommunicationStyle;

    fn basic_info(name: &str) -> BasicInfo {
        BasicInfo {
            name: name.to_string(),
            email: format!("{}@example.com", name),
            age: Some(30),
            nationality: "US".to_string(),
            home_location: "Seattle".to_string(),
            phone: None,
            emergency_contact: None,
        }
    }

    fn create_request(name: &str) -> CreateProfileRequest {
        CreateProfileRequest {
            basic_info: basic_info(name),
            travel_interests: Some(TravelInterests {
                preferred_destinations: vec!["Paris".to_string()],
                ..Default::default()
            }),
            accessibility_profile: None,
            preferences: None,
        }
    }

    // Backend that fails every operation, for degradation tests
    struct FailingBackend;

    #[async_trait]
    impl ProfileBackend for FailingBackend {
        async fn insert(&self, _profile: &UserProfile) -> Result<()> {
            Err(WayfareError::Storage("backend unavailable".to_string()))
        }

        async fn fetch(&self, _user_id: &str) -> Result<Option<UserProfile>> {
            Err(WayfareError::Storage("backend unavailable".to_string()))
        }

        async fn replace(&self, _profile: &UserProfile) -> Result<()> {
            Err(WayfareError::Storage("backend unavailable".to_string()))
        }

        async fn remove(&self, _user_id: &str) -> Result<bool> {
            Err(WayfareError::Storage("backend unavailable".to_string()))
        }

        async fn list(&self, _limit: usize, _offset: usize) -> Result<Vec<UserProfile>> {
            Err(WayfareError::Storage("backend unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_create_computes_completeness() {
        let service = ProfileService::in_memory();
        let profile = service.create(create_request("ada")).await.unwrap();

        assert!(profile.profile_complete);
        assert!(!profile.onboarding_completed);
        assert_eq!(profile.created_at, profile.updated_at);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let service = ProfileService::in_memory();
        let mut request = create_request("ada");
        request.basic_info.name = "  ".to_string();

        let result = service.create(request).await;
        assert!(matches!(result, Err(WayfareError::Validation(_))));
    }

    #[tokio::test]
    async fn test_idempotent_delete() {
        let service = ProfileService::in_memory();
        let profile = service.create(create_request("ada")).await.unwrap();

        assert!(service.delete(&profile.user_id).await);
        assert!(!service.delete(&profile.user_id).await);
        assert!(service.get(&profile.user_id).await.is_none());
    }

    #[tokio::test]
    async fn test_partial_update_preserves_unrelated_sections() {
        let service = ProfileService::in_memory();
        let mut request = create_request("ada");
        request.accessibility_profile = Some(AccessibilityProfile {
            mobility_needs: vec!["wheelchair_accessible".to_string()],
            ..Default::default()
        });
        let created = service.create(request).await.unwrap();

        let update = UpdateProfileRequest {
            preferences: Some(UserPreferences {
                communication_style: CommunicationStyle::Brief,
                ..Default::default()
            }),
            ..Default::default()
        };
        let updated = service.update(&created.user_id, update).await.unwrap();

        assert_eq!(
            updated.preferences.communication_style,
            CommunicationStyle::Brief
        );
        assert_eq!(updated.travel_interests, created.travel_interests);
        assert_eq!(updated.accessibility_profile, created.accessibility_profile);
        assert_eq!(updated.profile_complete, created.profile_complete);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_update_recomputes_completeness_when_relevant() {
        let service = ProfileService::in_memory();
        let created = service.create(create_request("ada")).await.unwrap();
        assert!(created.profile_complete);

        // Empty out the travel interests; accessibility is also empty
        let update = UpdateProfileRequest {
            travel_interests: Some(TravelInterests::default()),
            ..Default::default()
        };
        let updated = service.update(&created.user_id, update).await.unwrap();
        assert!(!updated.profile_complete);
    }

    #[tokio::test]
    async fn test_update_unknown_id_does_not_upsert() {
        let service = ProfileService::in_memory();

        let result = service
            .update("missing", UpdateProfileRequest::default())
            .await;
        assert!(result.is_none());
        assert!(service.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_pagination_window() {
        let service = ProfileService::in_memory();
        let mut ids = Vec::new();
        for name in ["p0", "p1", "p2", "p3", "p4"] {
            ids.push(service.create(create_request(name)).await.unwrap().user_id);
        }

        let page = service.list(Pagination::new(2, 2)).await;
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].user_id, ids[2]);
        assert_eq!(page[1].user_id, ids[3]);
    }

    #[tokio::test]
    async fn test_touch_last_active() {
        let service = ProfileService::in_memory();
        let created = service.create(create_request("ada")).await.unwrap();
        assert!(created.last_active.is_none());

        assert!(service.touch_last_active(&created.user_id).await);
        let fetched = service.get(&created.user_id).await.unwrap();
        assert!(fetched.last_active.is_some());
        // Only last_active moves
        assert_eq!(fetched.updated_at, created.updated_at);

        assert!(!service.touch_last_active("missing").await);
    }

    #[tokio::test]
    async fn test_backend_fallback_transparency() {
        let service = ProfileService::new(Arc::new(FailingBackend));
        assert!(!service.is_degraded());

        let profile = service.create(create_request("ada")).await.unwrap();
        assert!(service.is_degraded());
        assert_eq!(service.storage_mode(), "degraded");

        // The record is readable from the fallback and identical
        let fetched = service.get(&profile.user_id).await.unwrap();
        assert_eq!(fetched, profile);
    }

    #[tokio::test]
    async fn test_set_onboarding_completed() {
        let service = ProfileService::in_memory();
        let created = service.create(create_request("ada")).await.unwrap();

        assert!(service.set_onboarding_completed(&created.user_id, true).await);
        let fetched = service.get(&created.user_id).await.unwrap();
        assert!(fetched.onboarding_completed);

        assert!(!service.set_onboarding_completed("missing", true).await);
    }

    #[tokio::test]
    async fn test_learned_preferences_merge() {
        let service = ProfileService::in_memory();
        let created = service.create(create_request("ada")).await.unwrap();

        let mut prefs = serde_json::Map::new();
        prefs.insert("seat".to_string(), serde_json::json!("aisle"));
        assert!(service.merge_learned_preferences(&created.user_id, prefs).await);

        let fetched = service.get(&created.user_id).await.unwrap();
        assert_eq!(
            fetched.learned_preferences.get("seat"),
            Some(&serde_json::json!("aisle"))
        );
    }
}
