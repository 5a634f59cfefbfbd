//! Supported project licenses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// A license the scaffolder can write a `LICENSE` file for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum License {
    #[default]
    Mit,
    Apache2,
    Gpl3,
    Bsd3,
    Isc,
    Unlicense,
}

impl License {
    pub const ALL: [License; 6] = [
        Self::Mit,
        Self::Apache2,
        Self::Gpl3,
        Self::Bsd3,
        Self::Isc,
        Self::Unlicense,
    ];

    /// Value written to the `license=` field of `setup.py`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mit => "MIT License",
            Self::Apache2 => "Apache Software License",
            Self::Gpl3 => "GNU General Public License v3 (GPLv3)",
            Self::Bsd3 => "BSD License",
            Self::Isc => "ISC License (ISCL)",
            Self::Unlicense => "The Unlicense (Unlicense)",
        }
    }

    /// Matching trove classifier.
    pub fn classifier(self) -> String {
        format!("License :: OSI Approved :: {}", self.name())
    }

    /// SPDX identifier, accepted on the command line and in config.
    pub const fn spdx(self) -> &'static str {
        match self {
            Self::Mit => "MIT",
            Self::Apache2 => "Apache-2.0",
            Self::Gpl3 => "GPL-3.0",
            Self::Bsd3 => "BSD-3-Clause",
            Self::Isc => "ISC",
            Self::Unlicense => "Unlicense",
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for License {
    type Err = DomainError;

    /// Accepts the display name or the SPDX id, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(s) || l.spdx().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::UnknownLicense { name: s.into() })
    }
}

impl TryFrom<String> for License {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<License> for String {
    fn from(value: License) -> Self {
        value.name().to_string()
    }
}
