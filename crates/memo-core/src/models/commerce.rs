// ABOUTME: Commerce fixture models: course levels, payment receipts and subscriptions
// ABOUTME: Subscription activity is derived from the expiry timestamp at write time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Course difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseLevel {
    /// No prerequisites
    Beginner,
    /// Some prior knowledge
    Intermediate,
    /// In-depth course
    Advanced,
}

impl CourseLevel {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// How a receipt payment was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Bank wire
    BankTransfer,
    /// Postal account (CCP)
    Ccp,
    /// BaridiMob mobile payment
    Baridimob,
}

impl PaymentMethod {
    /// Every payment method
    pub const ALL: [Self; 3] = [Self::BankTransfer, Self::Ccp, Self::Baridimob];

    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BankTransfer => "bank_transfer",
            Self::Ccp => "ccp",
            Self::Baridimob => "baridimob",
        }
    }
}

/// Review state of a payment receipt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    /// Awaiting review
    Pending,
    /// Accepted, grants a subscription
    Approved,
    /// Refused
    Rejected,
}

impl ReceiptStatus {
    /// Every status
    pub const ALL: [Self; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Whether an administrator has looked at the receipt
    #[must_use]
    pub const fn is_reviewed(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// What activated a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationSource {
    /// Approved payment receipt
    Receipt,
    /// Redeemed subscription code
    Code,
}

impl ActivationSource {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Receipt => "receipt",
            Self::Code => "code",
        }
    }
}

/// Insert payload for a paid or free course
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    /// Related subject
    pub subject_id: Option<i64>,
    /// Arabic title
    pub title_ar: String,
    /// Unique ASCII slug
    pub slug: String,
    /// Arabic description
    pub description_ar: String,
    /// Thumbnail path
    pub thumbnail_url: String,
    /// Price in Algerian dinars, zero for free courses
    pub price_dzd: u32,
    /// Access length granted by a subscription
    pub duration_days: u32,
    /// Difficulty tier
    pub level: CourseLevel,
    /// Accent color name
    pub color: String,
    /// Visible in the catalogue
    pub is_published: bool,
    /// Publication time
    pub published_at: Option<DateTime<Utc>>,
    /// Author account
    pub created_by: i64,
}

impl NewCourse {
    /// Free courses need no receipt or code
    #[must_use]
    pub const fn is_free(&self) -> bool {
        self.price_dzd == 0
    }
}

/// Insert payload for a course lesson
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourseLesson {
    /// Owning module
    pub course_module_id: i64,
    /// Arabic title
    pub title_ar: String,
    /// Arabic description
    pub description_ar: String,
    /// Video link
    pub video_url: String,
    /// Video length
    pub video_duration_seconds: u32,
    /// Lesson ships a PDF
    pub has_pdf: bool,
    /// PDF path
    pub pdf_path: Option<String>,
    /// 1-based position within the module
    pub sort_order: i64,
    /// Watchable without a subscription
    pub is_preview: bool,
}

/// What a subscription code unlocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum CodeTarget {
    /// A single course
    Course(i64),
    /// A whole package
    Package(i64),
}

/// Insert payload for a subscription code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscriptionCode {
    /// Redeemable code
    pub code: String,
    /// Unlocked course or package
    pub target: CodeTarget,
    /// Redemption limit
    pub max_uses: u32,
    /// Redemptions so far
    pub current_uses: u32,
    /// Expiry, `None` for codes that never expire
    pub expires_at: Option<DateTime<Utc>>,
    /// Redeemable
    pub is_active: bool,
    /// Issuing administrator
    pub created_by: i64,
}

/// Insert payload for a payment receipt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaymentReceipt {
    /// Paying student
    pub user_id: i64,
    /// Purchased course
    pub course_id: i64,
    /// Uploaded image path
    pub receipt_image_url: String,
    /// Paid amount in Algerian dinars
    pub amount_dzd: u32,
    /// Payment channel
    pub payment_method: PaymentMethod,
    /// Review state
    pub status: ReceiptStatus,
    /// Reviewer note
    pub admin_note: Option<String>,
    /// Review time
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Reviewing administrator
    pub reviewed_by: Option<i64>,
    /// Upload time
    pub submitted_at: DateTime<Utc>,
}

/// Insert payload for a user subscription
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserSubscription {
    /// Subscriber
    pub user_id: i64,
    /// Subscribed course
    pub course_id: i64,
    /// Activation path
    pub activated_by: ActivationSource,
    /// Receipt that granted the subscription
    pub receipt_id: Option<i64>,
    /// Code that granted the subscription
    pub code_id: Option<i64>,
    /// Activation time
    pub activated_at: DateTime<Utc>,
    /// Expiry time
    pub expires_at: DateTime<Utc>,
    /// Denormalized `expires_at > now` at write time
    pub is_active: bool,
}

impl NewUserSubscription {
    /// Build a subscription whose `is_active` flag agrees with `expires_at` at `now`
    #[must_use]
    pub fn new(
        user_id: i64,
        course_id: i64,
        activated_by: ActivationSource,
        activated_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            course_id,
            activated_by,
            receipt_id: None,
            code_id: None,
            activated_at,
            expires_at,
            is_active: expires_at > now,
        }
    }

    /// Link the receipt that granted the subscription
    #[must_use]
    pub const fn with_receipt(mut self, receipt_id: i64) -> Self {
        self.receipt_id = Some(receipt_id);
        self
    }

    /// Link the code that granted the subscription
    #[must_use]
    pub const fn with_code(mut self, code_id: i64) -> Self {
        self.code_id = Some(code_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_expired_subscription_is_inactive() {
        let now = Utc::now();
        let expired = NewUserSubscription::new(
            1,
            1,
            ActivationSource::Code,
            now - Duration::days(60),
            now - Duration::days(1),
            now,
        );
        assert!(!expired.is_active);

        let running = NewUserSubscription::new(
            1,
            1,
            ActivationSource::Receipt,
            now - Duration::days(1),
            now + Duration::days(30),
            now,
        );
        assert!(running.is_active);
    }
}
