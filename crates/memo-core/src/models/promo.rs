// ABOUTME: Home page promotional slide model
// ABOUTME: Slides link either to an in-app route or to an external URL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Target of a promo call-to-action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromoActionType {
    /// In-app route such as `/courses`
    Route,
    /// External link
    Url,
}

impl PromoActionType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Route => "route",
            Self::Url => "url",
        }
    }
}

/// Insert payload for a promo slide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPromo {
    /// Headline
    pub title: String,
    /// Secondary line
    pub subtitle: String,
    /// Corner badge text
    pub badge: Option<String>,
    /// Button label
    pub action_text: String,
    /// Material icon name
    pub icon_name: String,
    /// Background image
    pub image_url: Option<String>,
    /// Background gradient stops
    pub gradient_colors: Vec<String>,
    /// Button target kind
    pub action_type: PromoActionType,
    /// Route or URL
    pub action_value: String,
    /// 1-based slider position
    pub display_order: i64,
    /// Shown in the slider
    pub is_active: bool,
}
