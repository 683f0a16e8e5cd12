//! User profile data model
//!
//! One explicit schema shared by the storage layer and the context builder,
//! validated at the API boundary once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use wayfare_common::{BudgetRange, CommunicationStyle, RiskTolerance, TravelStyle};

/// Basic traveler information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    /// Traveler's full name
    pub name: String,
    /// Traveler's email address
    pub email: String,
    /// Traveler's age
    #[serde(default)]
    pub age: Option<u32>,
    /// Nationality / passport country
    pub nationality: String,
    /// Home city or location
    pub home_location: String,
    /// Phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Emergency contact information
    #[serde(default)]
    pub emergency_contact: Option<HashMap<String, String>>,
}

/// Travel interests and preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TravelInterests {
    /// Preferred destination types or regions
    #[serde(default)]
    pub preferred_destinations: Vec<String>,
    /// Preferred travel styles
    #[serde(default)]
    pub travel_style: Vec<TravelStyle>,
    /// Preferred budget range
    #[serde(default)]
    pub budget_range: BudgetRange,
    /// Preferred group size (solo, couple, family, etc.)
    #[serde(default = "default_group_size")]
    pub group_size_preference: String,
    /// Hotel, Airbnb, accessible, etc.
    #[serde(default)]
    pub accommodation_preferences: Vec<String>,
    /// Museums, outdoor, food, etc.
    #[serde(default)]
    pub activity_interests: Vec<String>,
    /// Flight, train, accessible transport
    #[serde(default)]
    pub transportation_preferences: Vec<String>,
}

fn default_group_size() -> String {
    "flexible".to_string()
}

/// Comprehensive accessibility profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AccessibilityProfile {
    /// Wheelchair accessible, step-free access, etc.
    #[serde(default)]
    pub mobility_needs: Vec<String>,
    /// Hearing assistance, visual assistance, etc.
    #[serde(default)]
    pub sensory_needs: Vec<String>,
    /// Clear signage, quiet spaces, etc.
    #[serde(default)]
    pub cognitive_needs: Vec<String>,

    /// Assistance preferences keyed by context (airport, hotel, ...)
    #[serde(default)]
    pub assistance_preferences: HashMap<String, String>,
    /// Wheelchair, walker, cane, etc.
    #[serde(default)]
    pub mobility_aids: Vec<String>,
    /// Relevant medical conditions
    #[serde(default)]
    pub medical_conditions: Vec<String>,

    /// Food allergies, dietary needs
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    /// Travel medication needs
    #[serde(default)]
    pub medication_requirements: Vec<String>,

    /// Most important accessibility features
    #[serde(default)]
    pub accessibility_priorities: Vec<String>,
    /// Specific barriers to avoid
    #[serde(default)]
    pub barrier_concerns: Vec<String>,

    /// Service animal information
    #[serde(default)]
    pub service_animal: Option<HashMap<String, String>>,
    /// Sign language, written communication, etc.
    #[serde(default)]
    pub communication_needs: Vec<String>,
}

/// General preferences and settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Preferred communication style
    #[serde(default)]
    pub communication_style: CommunicationStyle,
    /// Risk tolerance for travel
    #[serde(default)]
    pub risk_tolerance: RiskTolerance,
    /// How far in advance to plan
    #[serde(default = "default_planning_horizon")]
    pub planning_horizon: String,

    /// Notification settings
    #[serde(default)]
    pub notification_preferences: HashMap<String, bool>,
    /// Privacy preferences
    #[serde(default)]
    pub privacy_settings: HashMap<String, bool>,

    /// Preferred languages
    #[serde(default)]
    pub language_preferences: Vec<String>,
    /// Preferred currency
    #[serde(default = "default_currency")]
    pub currency_preference: String,
    /// Traveler's timezone
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_planning_horizon() -> String {
    "1_month".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            communication_style: CommunicationStyle::default(),
            risk_tolerance: RiskTolerance::default(),
            planning_horizon: default_planning_horizon(),
            notification_preferences: HashMap::new(),
            privacy_settings: HashMap::new(),
            language_preferences: Vec::new(),
            currency_preference: default_currency(),
            timezone: default_timezone(),
        }
    }
}

/// Complete user profile record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique user identifier, generated at creation, immutable
    pub user_id: String,
    pub basic_info: BasicInfo,
    pub travel_interests: TravelInterests,
    pub accessibility_profile: AccessibilityProfile,
    pub preferences: UserPreferences,

    // Metadata
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Last activity timestamp, refreshed on each chat turn with a user id
    #[serde(default)]
    pub last_active: Option<DateTime<Utc>>,

    // Profile completeness and validation
    #[serde(default)]
    pub profile_complete: bool,
    /// Set explicitly by a caller, never derived
    #[serde(default)]
    pub onboarding_completed: bool,

    // Travel history and preferences learned from interactions
    #[serde(default)]
    pub travel_history: Vec<serde_json::Value>,
    #[serde(default)]
    pub learned_preferences: serde_json::Map<String, serde_json::Value>,
}

impl UserProfile {
    /// Whether the profile has the minimum required content.
    ///
    /// Complete iff basic_info has non-empty name, email, nationality and
    /// home_location, and at least one of travel interests
    /// (destinations/styles/activities) or accessibility content
    /// (mobility/sensory needs or assistance preferences) is present.
    pub fn is_complete(&self) -> bool {
        let basic_complete = !self.basic_info.name.is_empty()
            && !self.basic_info.email.is_empty()
            && !self.basic_info.nationality.is_empty()
            && !self.basic_info.home_location.is_empty();

        let interests_complete = !self.travel_interests.preferred_destinations.is_empty()
            || !self.travel_interests.travel_style.is_empty()
            || !self.travel_interests.activity_interests.is_empty();

        let accessibility_complete = !self.accessibility_profile.mobility_needs.is_empty()
            || !self.accessibility_profile.sensory_needs.is_empty()
            || !self.accessibility_profile.assistance_preferences.is_empty();

        basic_complete && (interests_complete || accessibility_complete)
    }

    /// Number of distinct accessibility needs across the three need lists
    pub fn accessibility_needs_count(&self) -> usize {
        self.accessibility_profile.mobility_needs.len()
            + self.accessibility_profile.sensory_needs.len()
            + self.accessibility_profile.cognitive_needs.len()
    }

    /// Number of travel-interest entries across destinations, activities
    /// and accommodation preferences
    pub fn travel_interests_count(&self) -> usize {
        self.travel_interests.preferred_destinations.len()
            + self.travel_interests.activity_interests.len()
            + self.travel_interests.accommodation_preferences.len()
    }

    /// Project this profile into a listing summary
    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            user_id: self.user_id.clone(),
            name: self.basic_info.name.clone(),
            email: self.basic_info.email.clone(),
            created_at: self.created_at,
            last_active: self.last_active,
            profile_complete: self.profile_complete,
            accessibility_needs_count: self.accessibility_needs_count(),
            travel_interests_count: self.travel_interests_count(),
        }
    }
}

/// Request body for creating a user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProfileRequest {
    pub basic_info: BasicInfo,
    #[serde(default)]
    pub travel_interests: Option<TravelInterests>,
    #[serde(default)]
    pub accessibility_profile: Option<AccessibilityProfile>,
    #[serde(default)]
    pub preferences: Option<UserPreferences>,
}

/// Request body for partially updating a user profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub basic_info: Option<BasicInfo>,
    #[serde(default)]
    pub travel_interests: Option<TravelInterests>,
    #[serde(default)]
    pub accessibility_profile: Option<AccessibilityProfile>,
    #[serde(default)]
    pub preferences: Option<UserPreferences>,
}

/// Summary of a user profile for listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub last_active: Option<DateTime<Utc>>,
    pub profile_complete: bool,
    pub accessibility_needs_count: usize,
    pub travel_interests_count: usize,
}
