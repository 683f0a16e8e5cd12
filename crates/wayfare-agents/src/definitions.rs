//! Declarative agent-tree wiring
//!
//! Which agent owns which tools and which specialist handles which kind of
//! request. The definitions are data; execution happens behind
//! `AgentExecutor`.

use crate::prompts;
use serde::Serialize;

/// A single agent definition in the tree
#[derive(Debug, Clone, Serialize)]
pub struct AgentDefinition {
    /// Wire name, matching the personalized-instruction keys where one exists
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    /// Static system instruction handed to the executor
    #[serde(skip)]
    pub instruction: &'static str,
    /// Tool names this agent may call
    pub tools: &'static [&'static str],
}

/// The root agent and its specialists
#[derive(Debug, Clone, Serialize)]
pub struct AgentTree {
    pub root: AgentDefinition,
    pub sub_agents: Vec<AgentDefinition>,
}

/// Build the full inclusive-travel agent tree
pub fn agent_tree() -> AgentTree {
    AgentTree {
        root: AgentDefinition {
            name: "root_agent",
            display_name: "Inclusive Travel Agent",
            description: "An inclusive travel agent with comprehensive accessibility support, \
                          automated notifications, and intelligent safety monitoring",
            instruction: prompts::ROOT_AGENT_INSTR,
            tools: &[],
        },
        sub_agents: vec![
            AgentDefinition {
                name: "inspiration_agent",
                display_name: "Inspiration",
                description: "Inspires users with accessible destinations, activities, and \
                              experiences matched to their needs",
                instruction: prompts::INSPIRATION_AGENT_INSTR,
                tools: &["place_search", "poi_search"],
            },
            AgentDefinition {
                name: "planning_agent",
                display_name: "Planning",
                description: "Finds accessible flights, seats, and lodging and assembles \
                              inclusive itineraries",
                instruction: prompts::PLANNING_AGENT_INSTR,
                tools: &["flight_search", "seat_selection", "hotel_search"],
            },
            AgentDefinition {
                name: "booking_agent",
                display_name: "Booking",
                description: "Completes bookings with accessibility accommodations and \
                              payment processing",
                instruction: prompts::BOOKING_AGENT_INSTR,
                tools: &["create_reservation", "payment_choice", "process_payment"],
            },
            AgentDefinition {
                name: "accessibility_research_agent",
                display_name: "Accessibility Research",
                description: "Researches accessibility information, disabled traveler \
                              reviews, and barrier assessments",
                instruction: prompts::ACCESSIBILITY_RESEARCH_AGENT_INSTR,
                tools: &["search_grounding", "accessible_venues", "airport_accessibility"],
            },
            AgentDefinition {
                name: "mobility_preparation_agent",
                display_name: "Mobility Preparation",
                description: "Prepares mobility aids, medical documentation, and assistive \
                              equipment for travel",
                instruction: prompts::MOBILITY_PREPARATION_AGENT_INSTR,
                tools: &["search_grounding", "equipment_checklist"],
            },
            AgentDefinition {
                name: "transit_support_agent",
                display_name: "Transit Support",
                description: "Coordinates airport assistance, priority services, and \
                              accessible ground transportation",
                instruction: prompts::TRANSIT_SUPPORT_AGENT_INSTR,
                tools: &["assistance_request", "airport_accessibility"],
            },
            AgentDefinition {
                name: "barrier_navigation_agent",
                display_name: "Barrier Navigation",
                description: "Provides real-time alternatives when accessibility barriers \
                              are encountered",
                instruction: prompts::BARRIER_NAVIGATION_AGENT_INSTR,
                tools: &["accessible_venues", "place_search"],
            },
            AgentDefinition {
                name: "notification_agent",
                display_name: "Notification",
                description: "Sends email notifications, booking confirmations, and \
                              accessibility communications",
                instruction: prompts::NOTIFICATION_AGENT_INSTR,
                tools: &["send_notification_email", "send_provider_notification"],
            },
            AgentDefinition {
                name: "accessibility_communication_agent",
                display_name: "Accessibility Communication",
                description: "Notifies hotels and airlines about accessibility needs and \
                              coordinates confirmation of services",
                instruction: prompts::ACCESSIBILITY_COMMUNICATION_AGENT_INSTR,
                tools: &["send_provider_notification", "memorize"],
            },
            AgentDefinition {
                name: "web_checkin_agent",
                display_name: "Web Check-in",
                description: "Automates flight and hotel check-in with seating and \
                              accessibility preferences applied",
                instruction: prompts::WEB_CHECKIN_AGENT_INSTR,
                tools: &["flight_checkin", "hotel_checkin"],
            },
            AgentDefinition {
                name: "smart_guardrails_agent",
                display_name: "Smart Guardrails",
                description: "Monitors safety and compliance and proactively prevents \
                              accessibility issues",
                instruction: prompts::SMART_GUARDRAILS_AGENT_INSTR,
                tools: &["compliance_check", "memorize"],
            },
        ],
    }
}

/// Look up an agent definition by wire name, root included
pub fn find_agent(name: &str) -> Option<AgentDefinition> {
    let tree = agent_tree();
    if tree.root.name == name {
        return Some(tree.root);
    }
    tree.sub_agents.into_iter().find(|a| a.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfare_context::AgentRole;

    #[test]
    fn test_tree_has_unique_names() {
        let tree = agent_tree();
        let mut names: Vec<&str> = tree.sub_agents.iter().map(|a| a.name).collect();
        names.push(tree.root.name);
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_every_instruction_role_has_an_agent() {
        for role in AgentRole::ALL {
            assert!(
                find_agent(role.as_str()).is_some(),
                "no agent definition for role {}",
                role.as_str()
            );
        }
    }

    #[test]
    fn test_find_agent() {
        assert!(find_agent("root_agent").is_some());
        assert!(find_agent("planning_agent").is_some());
        assert!(find_agent("nonexistent_agent").is_none());
    }
}
