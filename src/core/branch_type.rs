//! Git Flow branch type registry
//!
//! The five branch categories the form offers, together with the metadata the
//! form and the prompt display for each of them. Requests are not limited to
//! the registry: [`BranchTag`] carries whatever prefix the caller asked for.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FlownameError;

/// Git Flow branch categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BranchType {
    /// New features and enhancements (default)
    #[default]
    Feature,
    /// Bug fixes during development
    Bugfix,
    /// Critical production fixes
    Hotfix,
    /// Release preparation
    Release,
    /// Maintenance and legacy support
    Support,
}

impl BranchType {
    /// Get the tag used as branch prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            BranchType::Feature => "feature",
            BranchType::Bugfix => "bugfix",
            BranchType::Hotfix => "hotfix",
            BranchType::Release => "release",
            BranchType::Support => "support",
        }
    }

    /// Get a human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            BranchType::Feature => "Feature",
            BranchType::Bugfix => "Bugfix",
            BranchType::Hotfix => "Hotfix",
            BranchType::Release => "Release",
            BranchType::Support => "Support",
        }
    }

    /// Short description shown next to the selector
    pub fn description(&self) -> &'static str {
        match self {
            BranchType::Feature => "New features and enhancements",
            BranchType::Bugfix => "Bug fixes during development",
            BranchType::Hotfix => "Critical production fixes",
            BranchType::Release => "Release preparation branches",
            BranchType::Support => "Maintenance and legacy support",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            BranchType::Feature => "✨",
            BranchType::Bugfix => "🐛",
            BranchType::Hotfix => "🔥",
            BranchType::Release => "🚀",
            BranchType::Support => "🛠️",
        }
    }

    /// Example slugs for this category (without the type prefix)
    pub fn examples(&self) -> &'static [&'static str] {
        match self {
            BranchType::Feature => &["user-authentication", "payment-integration", "dark-mode"],
            BranchType::Bugfix => &["login-error", "memory-leak", "broken-links"],
            BranchType::Hotfix => &["security-patch", "api-timeout", "data-corruption"],
            BranchType::Release => &["v1.2.0", "v2024.01", "spring-release"],
            BranchType::Support => &["legacy-v1", "ios-12", "old-api"],
        }
    }

    /// Get all branch types in registry order
    pub fn all() -> &'static [BranchType] {
        &[
            BranchType::Feature,
            BranchType::Bugfix,
            BranchType::Hotfix,
            BranchType::Release,
            BranchType::Support,
        ]
    }

    /// Registry row for this type
    pub fn info(&self) -> BranchTypeInfo {
        BranchTypeInfo {
            branch_type: *self,
            label: self.label(),
            description: self.description(),
            icon: self.icon(),
            examples: self.examples(),
        }
    }
}

impl FromStr for BranchType {
    type Err = FlownameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        BranchType::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == tag)
            .ok_or_else(|| FlownameError::UnknownBranchType(s.to_string()))
    }
}

impl std::fmt::Display for BranchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for BranchType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Branch prefix requested by a caller
///
/// Usually one of the registry types, but any tag is accepted and used as a
/// literal prefix once reduced to lowercase ASCII words joined by hyphens.
/// A tag with nothing left after that falls back to `feature`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchTag(String);

impl BranchTag {
    pub fn parse(raw: &str) -> Self {
        let lowered = raw.to_lowercase();
        let tag = lowered
            .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
            .filter(|word| !word.is_empty())
            .collect::<Vec<_>>()
            .join("-");

        if tag.is_empty() {
            Self::default()
        } else {
            Self(tag)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The registry entry for this tag, if there is one
    pub fn known(&self) -> Option<BranchType> {
        self.0.parse().ok()
    }
}

impl Default for BranchTag {
    fn default() -> Self {
        BranchType::default().into()
    }
}

impl From<BranchType> for BranchTag {
    fn from(branch_type: BranchType) -> Self {
        Self(branch_type.as_str().to_string())
    }
}

impl AsRef<str> for BranchTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Serializable registry entry, as listed by `GET /branch-types`
#[derive(Debug, Clone, Serialize)]
pub struct BranchTypeInfo {
    #[serde(rename = "type")]
    pub branch_type: BranchType,
    pub label: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub examples: &'static [&'static str],
}

/// Full registry in display order
pub fn registry() -> Vec<BranchTypeInfo> {
    BranchType::all().iter().map(BranchType::info).collect()
}
