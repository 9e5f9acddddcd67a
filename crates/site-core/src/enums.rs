//! Business types, draft lifecycle phases and blog sort orders.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `DraftPhase` provides `allowed_next_states()` describing the editing
//! lifecycle driven by the draft store.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// BusinessType
// ---------------------------------------------------------------------------

/// Template family a site is built from.
///
/// Unknown tags resolve to [`BusinessType::Business`], matching the way
/// templates fall back to the generic business profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Business,
    Salon,
    Gym,
    Restaurant,
    Freelancer,
    Hotel,
    Ecommerce,
    Automobile,
    Wedding,
}

impl BusinessType {
    /// Every business type, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Business,
        Self::Salon,
        Self::Gym,
        Self::Restaurant,
        Self::Freelancer,
        Self::Hotel,
        Self::Ecommerce,
        Self::Automobile,
        Self::Wedding,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Salon => "salon",
            Self::Gym => "gym",
            Self::Restaurant => "restaurant",
            Self::Freelancer => "freelancer",
            Self::Hotel => "hotel",
            Self::Ecommerce => "ecommerce",
            Self::Automobile => "automobile",
            Self::Wedding => "wedding",
        }
    }

    /// Resolve a type tag as found in entity documents. Never fails.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(tag.trim()))
            .unwrap_or(Self::Business)
    }

    /// Exact parse of a known tag. `None` for anything unrecognised.
    #[must_use]
    pub fn parse_exact(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BusinessType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

// ---------------------------------------------------------------------------
// DraftPhase
// ---------------------------------------------------------------------------

/// Where the draft store is in its editing lifecycle.
///
/// ```text
/// no_draft → clean → dirty → clean   (commit / discard)
///            clean, dirty → no_draft (clear)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DraftPhase {
    NoDraft,
    Clean,
    Dirty,
}

impl DraftPhase {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::NoDraft => &[Self::Clean, Self::NoDraft],
            Self::Clean => &[Self::Dirty, Self::Clean, Self::NoDraft],
            Self::Dirty => &[Self::Clean, Self::Dirty, Self::NoDraft],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoDraft => "no_draft",
            Self::Clean => "clean",
            Self::Dirty => "dirty",
        }
    }
}

impl fmt::Display for DraftPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// BlogSort
// ---------------------------------------------------------------------------

/// Ordering applied to the filtered blog list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BlogSort {
    #[default]
    Newest,
    Oldest,
    Popular,
    Liked,
}

impl BlogSort {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Popular => "popular",
            Self::Liked => "liked",
        }
    }
}

impl fmt::Display for BlogSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlogSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "popular" => Ok(Self::Popular),
            "liked" => Ok(Self::Liked),
            other => Err(format!("unknown blog sort: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("freelancer", BusinessType::Freelancer)]
    #[case("Hotel", BusinessType::Hotel)]
    #[case(" wedding ", BusinessType::Wedding)]
    #[case("bakery", BusinessType::Business)]
    #[case("", BusinessType::Business)]
    fn business_type_from_tag(#[case] tag: &str, #[case] expected: BusinessType) {
        assert_eq!(BusinessType::from_tag(tag), expected);
    }

    #[test]
    fn business_type_serde_matches_as_str() {
        for ty in BusinessType::ALL {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.as_str()));
        }
    }

    #[test]
    fn draft_phase_transitions() {
        assert!(DraftPhase::NoDraft.can_transition_to(DraftPhase::Clean));
        assert!(!DraftPhase::NoDraft.can_transition_to(DraftPhase::Dirty));
        assert!(DraftPhase::Dirty.can_transition_to(DraftPhase::Clean));
        assert!(DraftPhase::Dirty.can_transition_to(DraftPhase::NoDraft));
    }

    #[test]
    fn blog_sort_parse() {
        assert_eq!("liked".parse::<BlogSort>().unwrap(), BlogSort::Liked);
        assert!("random".parse::<BlogSort>().is_err());
        assert_eq!(BlogSort::default(), BlogSort::Newest);
    }
}
