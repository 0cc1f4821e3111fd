//! Subscription tiers and access codes.
//!
//! `ACCESS_CODES` is the only place codes are defined; the premium code list
//! is derived from it. Limits are published here for the account layer to
//! enforce, nothing in this crate checks them.

use serde::{Deserialize, Serialize};

/// Subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Free,
    Premium,
    Pro,
}

impl Default for Tier {
    fn default() -> Self {
        Self::Free
    }
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Premium => "Premium",
            Self::Pro => "Pro",
        }
    }

    /// Card and folder caps for this tier. `None` means unlimited.
    pub fn limits(&self) -> TierLimits {
        match self {
            Self::Free => TierLimits {
                max_cards: Some(100),
                max_folders: Some(3),
            },
            Self::Premium | Self::Pro => TierLimits {
                max_cards: None,
                max_folders: None,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierLimits {
    pub max_cards: Option<u32>,
    pub max_folders: Option<u32>,
}

/// Code that unlocks a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessCode {
    pub code: &'static str,
    pub tier: Tier,
    pub label: &'static str,
}

const fn premium(code: &'static str, label: &'static str) -> AccessCode {
    AccessCode {
        code,
        tier: Tier::Premium,
        label,
    }
}

pub const ACCESS_CODES: &[AccessCode] = &[
    premium("FOUNDER-UNLIMITED", "Founder unlimited access"),
    premium("STUDENT-2025-A", "Student cohort A"),
    premium("VBX-PREM-K7M9P", "Premium code"),
    premium("VBX-PREM-R4T2X", "Premium code"),
    premium("VBX-PREM-N8Q5W", "Premium code"),
    premium("VBX-PREM-L3H6Y", "Premium code"),
    premium("VBX-PREM-F9J2Z", "Premium code"),
    premium("VBX-PREM-D5C8V", "Premium code"),
    premium("VBX-PREM-S1A4B", "Premium code"),
    premium("VBX-PREM-G6E3N", "Premium code"),
    premium("VBX-PREM-P7M1K", "Premium code"),
    premium("VBX-PREM-X2T8R", "Premium code"),
    premium("VBX-PREM-W9Q4L", "Premium code"),
    premium("VBX-PREM-Y5H7F", "Premium code"),
    premium("VBX-PREM-Z3J6D", "Premium code"),
    premium("VBX-PREM-C8A2S", "Premium code"),
    premium("VBX-PREM-V4B9G", "Premium code"),
    premium("VBX-PREM-N1E5P", "Premium code"),
    premium("VBX-PREM-K7M3X", "Premium code"),
    premium("VBX-PREM-R2T6W", "Premium code"),
    premium("VBX-PREM-L9Q1Y", "Premium code"),
    premium("VBX-PREM-F4H8Z", "Premium code"),
];

/// Codes granting the premium tier.
pub fn premium_codes() -> impl Iterator<Item = &'static str> {
    ACCESS_CODES
        .iter()
        .filter(|entry| entry.tier == Tier::Premium)
        .map(|entry| entry.code)
}

/// Look up a code, ignoring case and surrounding whitespace.
pub fn resolve_access_code(input: &str) -> Option<&'static AccessCode> {
    let input = input.trim();
    ACCESS_CODES
        .iter()
        .find(|entry| entry.code.eq_ignore_ascii_case(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_are_unique() {
        let unique: HashSet<_> = ACCESS_CODES.iter().map(|c| c.code).collect();
        assert_eq!(unique.len(), ACCESS_CODES.len());
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let entry = resolve_access_code("  founder-unlimited ").unwrap();
        assert_eq!(entry.tier, Tier::Premium);
        assert_eq!(entry.label, "Founder unlimited access");
        assert!(resolve_access_code("VBX-PREM-00000").is_none());
        assert!(resolve_access_code("").is_none());
    }

    #[test]
    fn premium_list_is_derived() {
        let codes: Vec<_> = premium_codes().collect();
        assert_eq!(codes.len(), 22);
        assert_eq!(codes[0], "FOUNDER-UNLIMITED");
        assert!(codes.contains(&"VBX-PREM-F4H8Z"));
    }

    #[test]
    fn free_tier_is_capped() {
        assert_eq!(Tier::default(), Tier::Free);
        assert_eq!(Tier::Free.limits().max_cards, Some(100));
        assert_eq!(Tier::Pro.limits().max_folders, None);
    }
}
