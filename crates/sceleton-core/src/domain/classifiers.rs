//! PyPI trove classifier catalog.
//!
//! The catalog is built once from a newline-delimited resource and is
//! read-only afterwards. Callers receive it by reference; there is no
//! process-wide mutable state.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::error::DomainError;

/// Top-level classifier groups, keyed by their line prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassifierCategory {
    DevelopmentStatus,
    Environment,
    Framework,
    IntendedAudience,
    License,
    NaturalLanguage,
    OperatingSystem,
    ProgrammingLanguage,
    Topic,
}

impl ClassifierCategory {
    /// Every category, in catalog order.
    pub const ALL: [ClassifierCategory; 9] = [
        Self::DevelopmentStatus,
        Self::Environment,
        Self::Framework,
        Self::IntendedAudience,
        Self::License,
        Self::NaturalLanguage,
        Self::OperatingSystem,
        Self::ProgrammingLanguage,
        Self::Topic,
    ];

    /// The string every classifier of this category starts with.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::DevelopmentStatus => "Development Status",
            Self::Environment => "Environment",
            Self::Framework => "Framework",
            Self::IntendedAudience => "Intended Audience",
            Self::License => "License",
            Self::NaturalLanguage => "Natural Language",
            Self::OperatingSystem => "Operating System",
            Self::ProgrammingLanguage => "Programming Language",
            Self::Topic => "Topic",
        }
    }

    /// Category a classifier line belongs to, if any.
    pub fn of(line: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| {
            line.strip_prefix(c.prefix())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with(" ::"))
        })
    }
}

impl fmt::Display for ClassifierCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for ClassifierCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|c| {
                let key: String = c
                    .prefix()
                    .chars()
                    .filter(|ch| ch.is_ascii_alphanumeric())
                    .collect::<String>()
                    .to_ascii_lowercase();
                key == wanted
            })
            .ok_or_else(|| DomainError::UnknownCategory { name: s.into() })
    }
}

/// Immutable, categorised list of trove classifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifierCatalog {
    lists: BTreeMap<ClassifierCategory, Vec<String>>,
}

impl ClassifierCatalog {
    /// Partition a newline-delimited classifier list by category prefix.
    ///
    /// Blank lines and `#` comments are ignored. Lines matching no known
    /// prefix are skipped.
    pub fn parse(text: &str) -> Self {
        let mut lists: BTreeMap<ClassifierCategory, Vec<String>> = BTreeMap::new();

        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match ClassifierCategory::of(line) {
                Some(category) => lists.entry(category).or_default().push(line.to_string()),
                None => debug!(line, "skipping classifier with unknown prefix"),
            }
        }

        Self { lists }
    }

    /// Ensure every category has at least one classifier.
    pub fn validate(&self) -> Result<(), DomainError> {
        for category in ClassifierCategory::ALL {
            if self.get(category).is_empty() {
                return Err(DomainError::EmptyCatalogCategory {
                    category: category.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Classifiers of one category, in resource order.
    pub fn get(&self, category: ClassifierCategory) -> &[String] {
        self.lists.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Resolve 1-based menu indices into classifier strings.
    pub fn pick(
        &self,
        category: ClassifierCategory,
        indices: &[usize],
    ) -> Result<Vec<String>, DomainError> {
        let list = self.get(category);
        indices
            .iter()
            .map(|&i| {
                i.checked_sub(1)
                    .and_then(|idx| list.get(idx))
                    .cloned()
                    .ok_or_else(|| DomainError::InvalidSelection {
                        input: i.to_string(),
                        max: list.len(),
                    })
            })
            .collect()
    }

    /// Total number of classifiers across all categories.
    pub fn len(&self) -> usize {
        self.lists.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
