use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub username: String,
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub philosophy: Option<String>,
}

impl Profile {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Display name, falling back to the username.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.username.as_str(),
        }
    }

    pub fn initial(&self) -> String {
        self.display_name()
            .chars()
            .next()
            .map(|ch| ch.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }

    pub fn tagline(&self) -> &str {
        self.tagline.as_deref().unwrap_or("")
    }

    pub fn philosophy(&self) -> &str {
        self.philosophy.as_deref().unwrap_or("")
    }
}

/// A named focus sector: a decorative spiral arm on the banner and a wedge
/// on the radar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Arm {
    pub name: String,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub repo: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub arm: usize,
}

impl Project {
    /// Repository name without the owner prefix.
    pub fn short_name(&self) -> &str {
        self.repo.rsplit('/').next().unwrap_or(&self.repo)
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Index of the owning arm, wrapped into `0..arm_count`.
    pub fn arm_index(&self, arm_count: usize) -> Option<usize> {
        if arm_count == 0 {
            None
        } else {
            Some(self.arm % arm_count)
        }
    }
}

pub type Stats = BTreeMap<String, u64>;

pub type LanguageBytes = BTreeMap<String, u64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_falls_back_to_username() {
        let mut profile = Profile::new("stellar");
        assert_eq!(profile.display_name(), "stellar");
        assert_eq!(profile.initial(), "S");
        profile.name = Some("  ".to_string());
        assert_eq!(profile.display_name(), "stellar");
        profile.name = Some("ada Lovelace".to_string());
        assert_eq!(profile.initial(), "A");
        assert_eq!(profile.tagline(), "");
    }

    #[test]
    fn empty_profile_initial_is_placeholder() {
        assert_eq!(Profile::default().initial(), "?");
    }

    #[test]
    fn project_short_name_and_arm_wrap() {
        let project = Project {
            repo: "octo/nebula-db".to_string(),
            description: None,
            arm: 5,
        };
        assert_eq!(project.short_name(), "nebula-db");
        assert_eq!(project.arm_index(3), Some(2));
        assert_eq!(project.arm_index(0), None);
        assert_eq!(project.description(), "");
    }
}
