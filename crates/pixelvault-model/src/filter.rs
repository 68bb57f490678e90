// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Sentinel accepted wherever a filter dimension can be switched off.
pub const ALL_SELECTION: &str = "all";

/// Parses a filter dropdown value: `"all"` or blank disables the filter.
pub fn parse_selection<T: FromStr>(raw: &str) -> Result<Option<T>, T::Err> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_SELECTION) {
        return Ok(None);
    }
    trimmed.parse().map(Some)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Category(String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Platform(String);

macro_rules! impl_tag {
    ($name:ident, $kind:literal) => {
        impl $name {
            pub fn parse(input: &str) -> Result<Self, ValidationError> {
                let trimmed = input.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError(concat!($kind, " must not be empty").to_string()));
                }
                Ok(Self(trimmed.to_string()))
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Tags compare ASCII case-insensitively so deep links such as
            /// `?category=rpg` select `RPG`.
            #[must_use]
            pub fn matches(&self, value: &str) -> bool {
                self.0.eq_ignore_ascii_case(value)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

impl_tag!(Category, "category");
impl_tag!(Platform, "platform");

/// Fixed price buckets. Bounds are inclusive on both ends, so a price that
/// sits exactly on a boundary belongs to both neighbouring buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub enum PriceRange {
    Under30,
    From30To50,
    From50To70,
    Over70,
}

impl PriceRange {
    pub const ALL: [Self; 4] = [Self::Under30, Self::From30To50, Self::From50To70, Self::Over70];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Under30 => "under-30",
            Self::From30To50 => "30-50",
            Self::From50To70 => "50-70",
            Self::Over70 => "over-70",
        }
    }

    #[must_use]
    pub const fn bounds(self) -> (f64, Option<f64>) {
        match self {
            Self::Under30 => (0.0, Some(30.0)),
            Self::From30To50 => (30.0, Some(50.0)),
            Self::From50To70 => (50.0, Some(70.0)),
            Self::Over70 => (70.0, None),
        }
    }

    #[must_use]
    pub fn contains(self, price: f64) -> bool {
        let (min, max) = self.bounds();
        price >= min && max.map_or(true, |max| price <= max)
    }
}

impl FromStr for PriceRange {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "under-30" | "0-30" => Ok(Self::Under30),
            "30-50" => Ok(Self::From30To50),
            "50-70" => Ok(Self::From50To70),
            "over-70" | "70+" | "70-plus" => Ok(Self::Over70),
            other => Err(ValidationError(format!("unknown price range `{other}`"))),
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for PriceRange {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PriceRange> for String {
    fn from(value: PriceRange) -> Self {
        value.as_str().to_string()
    }
}

/// Catalog ordering. `Featured` keeps dataset order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortKey {
    #[default]
    Featured,
    Alphabetical,
    PriceLow,
    PriceHigh,
    Rating,
    Newest,
}

impl SortKey {
    pub const ALL: [Self; 6] = [
        Self::Featured,
        Self::Alphabetical,
        Self::PriceLow,
        Self::PriceHigh,
        Self::Rating,
        Self::Newest,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::Alphabetical => "alphabetical",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Rating => "rating",
            Self::Newest => "newest",
        }
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "featured" => Ok(Self::Featured),
            "alphabetical" | "name" => Ok(Self::Alphabetical),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "rating" => Ok(Self::Rating),
            "newest" | "release" => Ok(Self::Newest),
            other => Err(ValidationError(format!("unknown sort key `{other}`"))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for SortKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortKey> for String {
    fn from(value: SortKey) -> Self {
        value.as_str().to_string()
    }
}
