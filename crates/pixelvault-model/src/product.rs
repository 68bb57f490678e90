// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, NaiveDate};
use pixelvault_core::ProductId;
use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Half a cent; prices closer than this are treated as equal.
const PRICE_EPSILON: f64 = 0.005;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "uniqueIdentifier", alias = "id")]
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub discount_percentage: f64,
    pub category: String,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub user_score: f64,
    #[serde(default)]
    pub critic_score: f64,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_assets: Option<VisualAssets>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub screenshots: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_requirements: Option<SystemRequirements>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VisualAssets {
    #[serde(default)]
    pub primary_image: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SystemRequirements {
    #[serde(default)]
    pub minimum: Option<RequirementSpec>,
    #[serde(default)]
    pub recommended: Option<RequirementSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RequirementSpec {
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default)]
    pub processor: Option<String>,
    #[serde(default)]
    pub memory: Option<String>,
    #[serde(default)]
    pub graphics: Option<String>,
    #[serde(default)]
    pub storage: Option<String>,
}

impl Product {
    /// List price before discount. Datasets omit it for undiscounted titles.
    #[must_use]
    pub fn original_price(&self) -> f64 {
        self.original_price.unwrap_or(self.price)
    }

    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.discount_percentage > 0.0
    }

    /// Image used for cart lines and cards: `visualAssets.primaryImage`
    /// first, then the flat `image` field.
    #[must_use]
    pub fn primary_image(&self) -> &str {
        self.visual_assets
            .as_ref()
            .and_then(|v| v.primary_image.as_deref())
            .or(self.image.as_deref())
            .unwrap_or("")
    }

    /// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
    #[must_use]
    pub fn release_date(&self) -> Option<NaiveDate> {
        let raw = self.release_date.as_deref()?.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()))
    }

    #[must_use]
    pub fn is_available_on(&self, platform: &str) -> bool {
        self.platforms
            .iter()
            .any(|p| p.eq_ignore_ascii_case(platform))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError(format!("product {} has an empty title", self.id)));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError(format!(
                "product {} has an invalid price {}",
                self.id, self.price
            )));
        }
        if !(0.0..=100.0).contains(&self.discount_percentage) {
            return Err(ValidationError(format!(
                "product {} discountPercentage must be within 0..=100",
                self.id
            )));
        }
        let original = self.original_price();
        if self.has_discount() {
            if self.price > original + PRICE_EPSILON {
                return Err(ValidationError(format!(
                    "product {} is discounted but price {} exceeds originalPrice {}",
                    self.id, self.price, original
                )));
            }
        } else if (self.price - original).abs() > PRICE_EPSILON {
            return Err(ValidationError(format!(
                "product {} has no discount but price {} differs from originalPrice {}",
                self.id, self.price, original
            )));
        }
        Ok(())
    }
}
