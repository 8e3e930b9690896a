//! Catalog reference data: categories and the skills filed under them.
//!
//! Both are read-mostly and have no mutation path in the core.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Wrap a raw identifier.
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Raw numeric value.
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a [`Category`].
    CategoryId
);
numeric_id!(
    /// Identifier of a [`Skill`].
    SkillId
);

/// Grouping such as "Programming" or "Languages".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    name: String,
    description: String,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

/// A teachable skill joined with the name of its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    id: SkillId,
    name: String,
    category_id: CategoryId,
    category_name: String,
    description: String,
}

/// Field bundle used to build a [`Skill`].
#[derive(Debug, Clone)]
pub struct SkillDraft {
    pub id: SkillId,
    pub name: String,
    pub category_id: CategoryId,
    pub category_name: String,
    pub description: String,
}

impl Skill {
    pub fn new(draft: SkillDraft) -> Self {
        let SkillDraft {
            id,
            name,
            category_id,
            category_name,
            description,
        } = draft;
        Self {
            id,
            name,
            category_id,
            category_name,
            description,
        }
    }

    pub fn id(&self) -> SkillId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    pub fn category_name(&self) -> &str {
        self.category_name.as_str()
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Case-insensitive substring match against name or description.
    ///
    /// `needle` must already be lower-cased.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.description.to_lowercase().contains(needle)
    }
}

/// Optional skill filters combined with AND.
///
/// Blank search strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillFilter {
    category_id: Option<CategoryId>,
    search: Option<String>,
}

impl SkillFilter {
    pub fn new(category_id: Option<CategoryId>, search: Option<&str>) -> Self {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        Self {
            category_id,
            search,
        }
    }

    pub fn category_id(&self) -> Option<CategoryId> {
        self.category_id
    }

    /// Lower-cased search needle, if any.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn matches(&self, skill: &Skill) -> bool {
        let category_ok = self
            .category_id
            .is_none_or(|category| skill.category_id() == category);
        let search_ok = self
            .search
            .as_deref()
            .is_none_or(|needle| skill.matches_search(needle));
        category_ok && search_ok
    }
}
