//! Per-agent personalized instruction templating
//!
//! Pure string composition: a shared header naming the traveler, an
//! accessibility block (only when any need is recorded), a
//! travel-preferences block, and a fixed per-role closing paragraph.
//! Roles are enumerated so new roles are added here, not at call sites.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use wayfare_profile::UserProfile;

/// Agent roles that receive personalized instructions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    Root,
    Inspiration,
    Planning,
    Booking,
    AccessibilityResearch,
    MobilityPreparation,
    TransitSupport,
    BarrierNavigation,
}

impl AgentRole {
    /// Every role that receives an instruction block
    pub const ALL: [AgentRole; 8] = [
        AgentRole::Root,
        AgentRole::Inspiration,
        AgentRole::Planning,
        AgentRole::Booking,
        AgentRole::AccessibilityResearch,
        AgentRole::MobilityPreparation,
        AgentRole::TransitSupport,
        AgentRole::BarrierNavigation,
    ];

    /// Wire name used as the instruction-map key and the agent name
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Root => "root_agent",
            AgentRole::Inspiration => "inspiration_agent",
            AgentRole::Planning => "planning_agent",
            AgentRole::Booking => "booking_agent",
            AgentRole::AccessibilityResearch => "accessibility_research_agent",
            AgentRole::MobilityPreparation => "mobility_preparation_agent",
            AgentRole::TransitSupport => "transit_support_agent",
            AgentRole::BarrierNavigation => "barrier_navigation_agent",
        }
    }

    /// Parse a wire name back into a role
    pub fn from_str(name: &str) -> Option<AgentRole> {
        AgentRole::ALL.iter().copied().find(|r| r.as_str() == name)
    }

    /// Fixed closing paragraph describing what this role should emphasize
    fn guidance(&self) -> &'static str {
        match self {
            AgentRole::Root => {
                "Route requests to the most appropriate specialized agent based on the user's \
                 accessibility needs and travel preferences.\n\
                 Always prioritize accessibility considerations in your routing decisions.\n"
            }
            AgentRole::Inspiration => {
                "Focus on destinations and experiences that match both the user's interests and \
                 accessibility needs.\n\
                 Highlight accessibility features and disabled traveler reviews when available.\n"
            }
            AgentRole::Planning => {
                "Prioritize accessible flights, hotels, and transportation options.\n\
                 Always consider the user's mobility aids and assistance needs when making \
                 recommendations.\n\
                 Include accessibility features and costs in all suggestions.\n"
            }
            AgentRole::Booking => {
                "Automatically include all necessary accessibility accommodations in bookings.\n\
                 Communicate the user's specific needs to service providers.\n\
                 Ensure all accessibility services are confirmed and documented.\n"
            }
            AgentRole::AccessibilityResearch => {
                "Focus your research on the user's specific accessibility needs and concerns.\n\
                 Prioritize information about barriers they've identified as concerning.\n\
                 Look for reviews from travelers with similar accessibility profiles.\n"
            }
            AgentRole::MobilityPreparation => {
                "Focus on the user's specific mobility aids and medical requirements.\n\
                 Provide detailed guidance for their particular equipment and documentation \
                 needs.\n\
                 Consider their travel style and destinations when making preparation \
                 recommendations.\n"
            }
            AgentRole::TransitSupport => {
                "Arrange assistance services that match the user's specific preferences and \
                 needs.\n\
                 Focus on their preferred assistance types and communication methods.\n\
                 Ensure all arrangements accommodate their mobility aids and requirements.\n"
            }
            AgentRole::BarrierNavigation => {
                "Prioritize solutions for the barriers the user has identified as most \
                 concerning.\n\
                 Provide alternatives that match their accessibility needs and travel \
                 preferences.\n\
                 Consider their risk tolerance when suggesting workarounds.\n"
            }
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn list_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

/// Shared header naming the traveler and their interaction preferences
fn base_context(profile: &UserProfile) -> String {
    let info = &profile.basic_info;
    let age = info
        .age
        .map(|a| a.to_string())
        .unwrap_or_else(|| "adult".to_string());

    format!(
        "You are helping {}, a {} traveler from {}, {}.\n\n\
         COMMUNICATION STYLE: {} - Adapt your responses accordingly.\n\
         RISK TOLERANCE: {} - Consider this in recommendations.\n",
        info.name,
        age,
        info.home_location,
        info.nationality,
        profile.preferences.communication_style,
        profile.preferences.risk_tolerance,
    )
}

/// Accessibility block, present only when any need list is non-empty
fn accessibility_context(profile: &UserProfile) -> Option<String> {
    let access = &profile.accessibility_profile;
    if access.mobility_needs.is_empty()
        && access.sensory_needs.is_empty()
        && access.cognitive_needs.is_empty()
    {
        return None;
    }

    let mut assistance: Vec<String> = access
        .assistance_preferences
        .iter()
        .map(|(context, kind)| format!("{}: {}", context, kind))
        .collect();
    assistance.sort();
    let assistance = if assistance.is_empty() {
        "None specified".to_string()
    } else {
        assistance.join(", ")
    };

    Some(format!(
        "\nACCESSIBILITY NEEDS:\n\
         - Mobility: {}\n\
         - Sensory: {}\n\
         - Cognitive: {}\n\
         - Mobility Aids: {}\n\
         - Priority Concerns: {}\n\n\
         ASSISTANCE PREFERENCES: {}\n",
        list_or(&access.mobility_needs, "None specified"),
        list_or(&access.sensory_needs, "None specified"),
        list_or(&access.cognitive_needs, "None specified"),
        list_or(&access.mobility_aids, "None"),
        list_or(&access.barrier_concerns, "None specified"),
        assistance,
    ))
}

/// Travel-preferences block, always present
fn travel_context(profile: &UserProfile) -> String {
    let interests = &profile.travel_interests;
    let styles = if interests.travel_style.is_empty() {
        "Flexible".to_string()
    } else {
        interests
            .travel_style
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "\nTRAVEL PREFERENCES:\n\
         - Destinations: {}\n\
         - Travel Style: {}\n\
         - Budget: {}\n\
         - Group Size: {}\n\
         - Activities: {}\n",
        list_or(&interests.preferred_destinations, "Open to suggestions"),
        styles,
        interests.budget_range,
        interests.group_size_preference,
        list_or(&interests.activity_interests, "Open to suggestions"),
    )
}

/// Compose the full personalized instruction string for one role
pub fn compose(profile: &UserProfile, role: AgentRole) -> String {
    let mut instruction = base_context(profile);
    if let Some(accessibility) = accessibility_context(profile) {
        instruction.push_str(&accessibility);
    }
    instruction.push_str(&travel_context(profile));
    instruction.push('\n');
    instruction.push_str(role.guidance());
    instruction
}

/// Personalized instructions for every known role, keyed by wire name
pub fn personalized_instructions(profile: &UserProfile) -> HashMap<String, String> {
    AgentRole::ALL
        .iter()
        .map(|role| (role.as_str().to_string(), compose(profile, *role)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use wayfare_profile::{
        AccessibilityProfile, BasicInfo, TravelInterests, UserPreferences, UserProfile,
    };

    fn sample_profile() -> UserProfile {
        let now = Utc::now();
        UserProfile {
            user_id: "u1".to_string(),
            basic_info: BasicInfo {
                name: "Maya".to_string(),
                email: "maya@example.com".to_string(),
                age: Some(41),
                nationality: "CA".to_string(),
                home_location: "Toronto".to_string(),
                phone: None,
                emergency_contact: None,
            },
            travel_interests: TravelInterests {
                preferred_destinations: vec!["Lisbon".to_string()],
                ..Default::default()
            },
            accessibility_profile: AccessibilityProfile {
                mobility_needs: vec!["wheelchair_accessible".to_string()],
                mobility_aids: vec!["wheelchair".to_string()],
                ..Default::default()
            },
            preferences: UserPreferences::default(),
            created_at: now,
            updated_at: now,
            last_active: None,
            profile_complete: true,
            onboarding_completed: false,
            travel_history: Vec::new(),
            learned_preferences: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_instructions_cover_every_role() {
        let instructions = personalized_instructions(&sample_profile());
        assert_eq!(instructions.len(), AgentRole::ALL.len());
        for role in AgentRole::ALL {
            assert!(instructions.contains_key(role.as_str()));
        }
    }

    #[test]
    fn test_compose_includes_needs_and_header() {
        let text = compose(&sample_profile(), AgentRole::Planning);
        assert!(text.contains("You are helping Maya, a 41 traveler from Toronto, CA."));
        assert!(text.contains("wheelchair_accessible"));
        assert!(text.contains("Prioritize accessible flights"));
        assert!(text.contains("- Destinations: Lisbon"));
    }

    #[test]
    fn test_accessibility_block_omitted_without_needs() {
        let mut profile = sample_profile();
        profile.accessibility_profile = AccessibilityProfile::default();

        let text = compose(&profile, AgentRole::Inspiration);
        assert!(!text.contains("ACCESSIBILITY NEEDS"));
        assert!(text.contains("TRAVEL PREFERENCES"));
    }

    #[test]
    fn test_age_falls_back_to_adult() {
        let mut profile = sample_profile();
        profile.basic_info.age = None;

        let text = compose(&profile, AgentRole::Root);
        assert!(text.contains("an adult traveler") || text.contains("a adult traveler"));
    }

    #[test]
    fn test_role_wire_names_roundtrip() {
        for role in AgentRole::ALL {
            assert_eq!(AgentRole::from_str(role.as_str()), Some(role));
        }
        assert_eq!(AgentRole::from_str("unknown_agent"), None);
        assert_eq!(AgentRole::Planning.as_str(), "planning_agent");
    }
}
