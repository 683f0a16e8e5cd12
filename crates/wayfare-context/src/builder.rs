//! Context injection: profile → session state
//!
//! The builder reads profiles through `ProfileService` and copies derived
//! summaries into session state. It never mutates stored profiles, raises
//! no domain errors, and mutates the session only when the whole injection
//! can succeed — a conversation always proceeds, with or without
//! personalization.

use crate::instructions;
use crate::session::Session;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};
use wayfare_common::CommunicationStyle;
use wayfare_profile::{ProfileService, UserProfile};

/// Session-state keys written by the builder
pub const KEY_USER_PROFILE: &str = "user_profile";
pub const KEY_USER_ID: &str = "user_id";
pub const KEY_CONTEXT_INJECTED: &str = "context_injected";
pub const KEY_CONTEXT_TIMESTAMP: &str = "context_timestamp";
pub const KEY_PERSONALIZED_CONTEXT: &str = "personalized_context";
pub const KEY_LEARNED_PREFERENCES: &str = "learned_preferences";

/// Identity fields surfaced to agents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub age: Option<u32>,
    pub nationality: String,
    pub home_location: String,
}

/// Flattened accessibility summary for agents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessibilitySummary {
    pub has_mobility_needs: bool,
    pub has_sensory_needs: bool,
    pub has_cognitive_needs: bool,
    pub mobility_needs: Vec<String>,
    pub sensory_needs: Vec<String>,
    pub cognitive_needs: Vec<String>,
    pub assistance_preferences: HashMap<String, String>,
    pub mobility_aids: Vec<String>,
    pub accessibility_priorities: Vec<String>,
    pub barrier_concerns: Vec<String>,
    pub dietary_restrictions: Vec<String>,
    pub service_animal: Option<HashMap<String, String>>,
    pub communication_needs: Vec<String>,
}

/// Travel-preferences summary for agents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelPreferencesSummary {
    pub preferred_destinations: Vec<String>,
    pub travel_styles: Vec<wayfare_common::TravelStyle>,
    pub budget_range: wayfare_common::BudgetRange,
    pub group_size_preference: String,
    pub accommodation_preferences: Vec<String>,
    pub activity_interests: Vec<String>,
    pub transportation_preferences: Vec<String>,
}

/// The personalized context block written into session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalizedContext {
    pub user_info: UserInfo,
    pub accessibility_summary: AccessibilitySummary,
    pub travel_preferences: TravelPreferencesSummary,
    pub communication_style: CommunicationStyle,
    /// Instruction string per agent role, keyed by wire name
    pub personalized_instructions: HashMap<String, String>,
}

impl PersonalizedContext {
    /// Build the full context projection from a profile
    pub fn from_profile(profile: &UserProfile) -> Self {
        let access = &profile.accessibility_profile;
        let interests = &profile.travel_interests;

        Self {
            user_info: UserInfo {
                name: profile.basic_info.name.clone(),
                age: profile.basic_info.age,
                nationality: profile.basic_info.nationality.clone(),
                home_location: profile.basic_info.home_location.clone(),
            },
            accessibility_summary: AccessibilitySummary {
                has_mobility_needs: !access.mobility_needs.is_empty(),
                has_sensory_needs: !access.sensory_needs.is_empty(),
                has_cognitive_needs: !access.cognitive_needs.is_empty(),
                mobility_needs: access.mobility_needs.clone(),
                sensory_needs: access.sensory_needs.clone(),
                cognitive_needs: access.cognitive_needs.clone(),
                assistance_preferences: access.assistance_preferences.clone(),
                mobility_aids: access.mobility_aids.clone(),
                accessibility_priorities: access.accessibility_priorities.clone(),
                barrier_concerns: access.barrier_concerns.clone(),
                dietary_restrictions: access.dietary_restrictions.clone(),
                service_animal: access.service_animal.clone(),
                communication_needs: access.communication_needs.clone(),
            },
            travel_preferences: TravelPreferencesSummary {
                preferred_destinations: interests.preferred_destinations.clone(),
                travel_styles: interests.travel_style.clone(),
                budget_range: interests.budget_range,
                group_size_preference: interests.group_size_preference.clone(),
                accommodation_preferences: interests.accommodation_preferences.clone(),
                activity_interests: interests.activity_interests.clone(),
                transportation_preferences: interests.transportation_preferences.clone(),
            },
            communication_style: profile.preferences.communication_style,
            personalized_instructions: instructions::personalized_instructions(profile),
        }
    }
}

/// Everything a caller can read back from an injected session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserContext {
    pub user_profile: Value,
    pub user_id: String,
    pub personalized_context: PersonalizedContext,
    pub context_timestamp: String,
}

/// Service for managing user context in conversation sessions
pub struct ContextBuilder {
    profiles: Arc<ProfileService>,
}

impl ContextBuilder {
    pub fn new(profiles: Arc<ProfileService>) -> Self {
        Self { profiles }
    }

    /// Inject profile-derived context into a session.
    ///
    /// Returns false with zero session mutation when the profile cannot be
    /// resolved or serialized; no partial injection is possible.
    pub async fn inject(&self, session: &mut Session, user_id: &str) -> bool {
        let Some(profile) = self.profiles.get(user_id).await else {
            warn!("No user profile found for user_id: {}", user_id);
            return false;
        };

        let personalized = PersonalizedContext::from_profile(&profile);

        let profile_value = match serde_json::to_value(&profile) {
            Ok(value) => value,
            Err(e) => {
                error!("Error serializing profile for {}: {}", user_id, e);
                return false;
            }
        };
        let context_value = match serde_json::to_value(&personalized) {
            Ok(value) => value,
            Err(e) => {
                error!("Error serializing context for {}: {}", user_id, e);
                return false;
            }
        };

        // Everything serialized; safe to mutate the session now
        session
            .state
            .insert(KEY_USER_PROFILE.to_string(), profile_value);
        session
            .state
            .insert(KEY_USER_ID.to_string(), Value::String(user_id.to_string()));
        session
            .state
            .insert(KEY_CONTEXT_INJECTED.to_string(), Value::Bool(true));
        session.state.insert(
            KEY_CONTEXT_TIMESTAMP.to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
        session
            .state
            .insert(KEY_PERSONALIZED_CONTEXT.to_string(), context_value);

        info!("Injected user context for user_id: {}", user_id);
        true
    }

    /// Read the injected context back from session state.
    ///
    /// Pure read; `None` unless a successful injection happened earlier.
    pub fn get_context(&self, session: &Session) -> Option<UserContext> {
        if session.state.get(KEY_CONTEXT_INJECTED) != Some(&Value::Bool(true)) {
            return None;
        }

        let user_profile = session.state.get(KEY_USER_PROFILE)?.clone();
        let user_id = session.state.get(KEY_USER_ID)?.as_str()?.to_string();
        let context_timestamp = session
            .state
            .get(KEY_CONTEXT_TIMESTAMP)?
            .as_str()?
            .to_string();
        let personalized_context: PersonalizedContext =
            serde_json::from_value(session.state.get(KEY_PERSONALIZED_CONTEXT)?.clone()).ok()?;

        Some(UserContext {
            user_profile,
            user_id,
            personalized_context,
            context_timestamp,
        })
    }

    /// Merge preferences learned during a conversation into session state
    pub fn update_learned_preferences(
        &self,
        session: &mut Session,
        preferences: Map<String, Value>,
    ) -> bool {
        if !session.state.contains_key(KEY_USER_ID) {
            return false;
        }

        let mut learned = match session.state.get(KEY_LEARNED_PREFERENCES) {
            Some(Value::Object(existing)) => existing.clone(),
            _ => Map::new(),
        };
        for (key, value) in preferences {
            learned.insert(key, value);
        }
        session
            .state
            .insert(KEY_LEARNED_PREFERENCES.to_string(), Value::Object(learned));
        true
    }
}
