//! Intent name → handler lookup.

/// Intents the skill understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillIntent {
    GetStatus,
    GetRoadmap,
    GetInventory,
    CloseShop,
    OpenShop,
    Help,
}

/// Every accepted intent name. Matching is exact and case-sensitive.
pub const INTENT_TABLE: &[(&str, SkillIntent)] = &[
    ("GetStatus", SkillIntent::GetStatus),
    ("GetRoadmap", SkillIntent::GetRoadmap),
    ("GetInventory", SkillIntent::GetInventory),
    ("CloseShop", SkillIntent::CloseShop),
    ("OpenShop", SkillIntent::OpenShop),
    ("AMAZON.HelpIntent", SkillIntent::Help),
    ("Help", SkillIntent::Help),
];

impl SkillIntent {
    /// Look up an intent by the name the voice platform sends.
    pub fn from_name(name: &str) -> Option<Self> {
        INTENT_TABLE
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, intent)| *intent)
    }

    /// Canonical name, used in logs.
    pub fn name(self) -> &'static str {
        match self {
            SkillIntent::GetStatus => "GetStatus",
            SkillIntent::GetRoadmap => "GetRoadmap",
            SkillIntent::GetInventory => "GetInventory",
            SkillIntent::CloseShop => "CloseShop",
            SkillIntent::OpenShop => "OpenShop",
            SkillIntent::Help => "AMAZON.HelpIntent",
        }
    }
}
