//! The closed classification taxonomy: categories, intents, business impact.
//!
//! Declaration order is significant. `Category::ALL` is the tie-break order of
//! the pattern classifier (first declared wins), so variants must never be
//! reordered without bumping `FEATURE_SET_VERSION` in triage-patterns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A value outside one of the closed enumerations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Issue categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ServiceAvailability,
    CapacityQuota,
    ComplianceRegulatory,
    TechnicalSupport,
    FeatureRequest,
    RoadmapInquiry,
    CostBilling,
    General,
}

impl Category {
    /// Total number of categories.
    pub const COUNT: usize = 8;

    /// All variants in declaration (tie-break) order.
    pub const ALL: [Category; 8] = [
        Self::ServiceAvailability,
        Self::CapacityQuota,
        Self::ComplianceRegulatory,
        Self::TechnicalSupport,
        Self::FeatureRequest,
        Self::RoadmapInquiry,
        Self::CostBilling,
        Self::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ServiceAvailability => "service_availability",
            Self::CapacityQuota => "capacity_quota",
            Self::ComplianceRegulatory => "compliance_regulatory",
            Self::TechnicalSupport => "technical_support",
            Self::FeatureRequest => "feature_request",
            Self::RoadmapInquiry => "roadmap_inquiry",
            Self::CostBilling => "cost_billing",
            Self::General => "general",
        }
    }

    /// Intent assumed when only the category is known.
    pub fn default_intent(&self) -> Intent {
        match self {
            Self::ServiceAvailability => Intent::RequestAccess,
            Self::CapacityQuota => Intent::RequestAccess,
            Self::ComplianceRegulatory => Intent::SeekGuidance,
            Self::TechnicalSupport => Intent::ReportProblem,
            Self::FeatureRequest => Intent::RequestFeature,
            Self::RoadmapInquiry => Intent::SeekInformation,
            Self::CostBilling => Intent::SeekInformation,
            Self::General => Intent::SeekInformation,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| UnknownVariant {
                kind: "category",
                value: s.to_string(),
            })
    }
}

/// What the submitter wants done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    RequestAccess,
    ReportProblem,
    RequestFeature,
    SeekGuidance,
    SeekInformation,
    Escalate,
}

impl Intent {
    pub const COUNT: usize = 6;

    pub const ALL: [Intent; 6] = [
        Self::RequestAccess,
        Self::ReportProblem,
        Self::RequestFeature,
        Self::SeekGuidance,
        Self::SeekInformation,
        Self::Escalate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RequestAccess => "request_access",
            Self::ReportProblem => "report_problem",
            Self::RequestFeature => "request_feature",
            Self::SeekGuidance => "seek_guidance",
            Self::SeekInformation => "seek_information",
            Self::Escalate => "escalate",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|i| i.as_str() == needle)
            .ok_or_else(|| UnknownVariant {
                kind: "intent",
                value: s.to_string(),
            })
    }
}

/// Business impact, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessImpact {
    Critical,
    High,
    Medium,
    Low,
}

impl BusinessImpact {
    pub const ALL: [BusinessImpact; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for BusinessImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BusinessImpact {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|b| b.as_str() == needle)
            .ok_or_else(|| UnknownVariant {
                kind: "business impact",
                value: s.to_string(),
            })
    }
}
