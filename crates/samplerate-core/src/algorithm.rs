//! Interpolation algorithm catalog
//!
//! Ids, names and descriptions match libsamplerate's converter table.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported interpolation algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "sinc-best")]
    SincBest,
    #[serde(rename = "sinc-medium")]
    SincMedium,
    #[serde(rename = "sinc-fastest")]
    SincFastest,
    #[serde(rename = "zoh")]
    ZeroOrderHold,
    #[serde(rename = "linear")]
    Linear,
}

struct Entry {
    algorithm: Algorithm,
    slug: &'static str,
    name: &'static str,
    description: &'static str,
}

static CATALOG: [Entry; 5] = [
    Entry {
        algorithm: Algorithm::SincBest,
        slug: "sinc-best",
        name: "Best Sinc Interpolator",
        description: "Band limited sinc interpolation, best quality, 144dB SNR, 96% BW.",
    },
    Entry {
        algorithm: Algorithm::SincMedium,
        slug: "sinc-medium",
        name: "Medium Sinc Interpolator",
        description: "Band limited sinc interpolation, medium quality, 121dB SNR, 90% BW.",
    },
    Entry {
        algorithm: Algorithm::SincFastest,
        slug: "sinc-fastest",
        name: "Fastest Sinc Interpolator",
        description: "Band limited sinc interpolation, fastest, 97dB SNR, 80% BW.",
    },
    Entry {
        algorithm: Algorithm::ZeroOrderHold,
        slug: "zoh",
        name: "ZOH Interpolator",
        description: "Zero order hold interpolator, very fast, poor quality.",
    },
    Entry {
        algorithm: Algorithm::Linear,
        slug: "linear",
        name: "Linear Interpolator",
        description: "Linear interpolator, very fast, poor quality.",
    },
];

impl Algorithm {
    /// Every algorithm, ordered by id
    pub const ALL: [Algorithm; 5] = [
        Algorithm::SincBest,
        Algorithm::SincMedium,
        Algorithm::SincFastest,
        Algorithm::ZeroOrderHold,
        Algorithm::Linear,
    ];

    /// Resolve a raw numeric id
    pub fn from_id(id: i32) -> Result<Self> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| CATALOG.get(idx))
            .map(|entry| entry.algorithm)
            .ok_or(Error::UnknownAlgorithm(id))
    }

    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        self.entry().name
    }

    pub fn description(self) -> &'static str {
        self.entry().description
    }

    /// Short identifier used in configuration files and on the command line
    pub fn slug(self) -> &'static str {
        self.entry().slug
    }

    pub fn is_sinc(self) -> bool {
        matches!(
            self,
            Algorithm::SincBest | Algorithm::SincMedium | Algorithm::SincFastest
        )
    }

    fn entry(self) -> &'static Entry {
        &CATALOG[self as usize]
    }
}

/// Human-readable name for a raw algorithm id
pub fn name_of(id: i32) -> Result<&'static str> {
    Algorithm::from_id(id).map(Algorithm::name)
}

/// Quality/performance description for a raw algorithm id
pub fn description_of(id: i32) -> Result<&'static str> {
    Algorithm::from_id(id).map(Algorithm::description)
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Accepts a slug (`linear`), a catalog name (`Linear Interpolator`) or a numeric id
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(id) = s.parse::<i32>() {
            return Self::from_id(id);
        }
        CATALOG
            .iter()
            .find(|entry| entry.slug.eq_ignore_ascii_case(s) || entry.name.eq_ignore_ascii_case(s))
            .map(|entry| entry.algorithm)
            .ok_or(Error::UnknownAlgorithm(-1))
    }
}
