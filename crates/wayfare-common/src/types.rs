//! Domain enums and query types shared across Wayfare components

use serde::{Deserialize, Serialize};

/// Travel style preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
    Cultural,
    Adventure,
    Relaxation,
    Business,
    Family,
    Solo,
    Accessible,
}

impl std::fmt::Display for TravelStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TravelStyle::Cultural => write!(f, "cultural"),
            TravelStyle::Adventure => write!(f, "adventure"),
            TravelStyle::Relaxation => write!(f, "relaxation"),
            TravelStyle::Business => write!(f, "business"),
            TravelStyle::Family => write!(f, "family"),
            TravelStyle::Solo => write!(f, "solo"),
            TravelStyle::Accessible => write!(f, "accessible"),
        }
    }
}

/// Budget range preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetRange {
    Budget,
    #[default]
    MidRange,
    Luxury,
    Flexible,
}

impl std::fmt::Display for BudgetRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetRange::Budget => write!(f, "budget"),
            BudgetRange::MidRange => write!(f, "mid-range"),
            BudgetRange::Luxury => write!(f, "luxury"),
            BudgetRange::Flexible => write!(f, "flexible"),
        }
    }
}

/// Communication style preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommunicationStyle {
    Brief,
    #[default]
    Detailed,
    Conversational,
    Professional,
}

impl std::fmt::Display for CommunicationStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommunicationStyle::Brief => write!(f, "brief"),
            CommunicationStyle::Detailed => write!(f, "detailed"),
            CommunicationStyle::Conversational => write!(f, "conversational"),
            CommunicationStyle::Professional => write!(f, "professional"),
        }
    }
}

/// Risk tolerance levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTolerance::Low => write!(f, "low"),
            RiskTolerance::Medium => write!(f, "medium"),
            RiskTolerance::High => write!(f, "high"),
        }
    }
}

/// Pagination parameters for list queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of items to return
    pub limit: usize,
    /// Number of items to skip
    pub offset: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: crate::constants::DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

impl Pagination {
    /// Create a page window, clamping the limit into [1, MAX_PAGE_SIZE]
    pub fn new(limit: usize, offset: usize) -> Self {
        Self {
            limit: limit.clamp(1, crate::constants::MAX_PAGE_SIZE),
            offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&TravelStyle::Accessible).unwrap(),
            "\"accessible\""
        );
        assert_eq!(
            serde_json::to_string(&BudgetRange::MidRange).unwrap(),
            "\"mid-range\""
        );
        assert_eq!(
            serde_json::to_string(&CommunicationStyle::Conversational).unwrap(),
            "\"conversational\""
        );
        assert_eq!(serde_json::to_string(&RiskTolerance::Low).unwrap(), "\"low\"");

        let style: TravelStyle = serde_json::from_str("\"cultural\"").unwrap();
        assert_eq!(style, TravelStyle::Cultural);
        let budget: BudgetRange = serde_json::from_str("\"mid-range\"").unwrap();
        assert_eq!(budget, BudgetRange::MidRange);
    }

    #[test]
    fn test_display_matches_wire_names() {
        assert_eq!(BudgetRange::MidRange.to_string(), "mid-range");
        assert_eq!(CommunicationStyle::Detailed.to_string(), "detailed");
        assert_eq!(RiskTolerance::High.to_string(), "high");
        assert_eq!(TravelStyle::Solo.to_string(), "solo");
    }

    #[test]
    fn test_pagination_clamping() {
        let p = Pagination::new(0, 0);
        assert_eq!(p.limit, 1);

        let p = Pagination::new(500, 10);
        assert_eq!(p.limit, crate::constants::MAX_PAGE_SIZE);
        assert_eq!(p.offset, 10);

        let p = Pagination::default();
        assert_eq!(p.limit, crate::constants::DEFAULT_PAGE_SIZE);
        assert_eq!(p.offset, 0);
    }
}
