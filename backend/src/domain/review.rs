//! Reviews left after a completed exchange and the rating average derived
//! from them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{RequestId, UserId};

/// Identifier assigned to a stored review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(Uuid);

impl ReviewId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

/// Raised when a rating falls outside `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rating must be between {RATING_MIN} and {RATING_MAX}, got {0}")]
pub struct RatingOutOfRange(pub i64);

/// Star rating between one and five inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|v| (RATING_MIN..=RATING_MAX).contains(v))
            .map(Self)
            .ok_or(RatingOutOfRange(value))
    }
}

/// A requester's review of the member who taught them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    id: ReviewId,
    from_user: UserId,
    to_user: UserId,
    request_id: RequestId,
    rating: Rating,
    comment: String,
    created_at: DateTime<Utc>,
}

/// Field bundle used to build a [`Review`].
#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub id: ReviewId,
    pub from_user: UserId,
    pub to_user: UserId,
    pub request_id: RequestId,
    pub rating: Rating,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(draft: ReviewDraft) -> Self {
        let ReviewDraft {
            id,
            from_user,
            to_user,
            request_id,
            rating,
            comment,
            created_at,
        } = draft;
        Self {
            id,
            from_user,
            to_user,
            request_id,
            rating,
            comment,
            created_at,
        }
    }

    pub fn id(&self) -> ReviewId {
        self.id
    }

    pub fn from_user(&self) -> &UserId {
        &self.from_user
    }

    pub fn to_user(&self) -> &UserId {
        &self.to_user
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn comment(&self) -> &str {
        self.comment.as_str()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Running total of ratings received by one member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingSummary {
    count: u32,
    total: u32,
}

impl RatingSummary {
    pub fn add(&mut self, rating: Rating) {
        self.count += 1;
        self.total += u32::from(rating.get());
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Mean rating rounded to one decimal place; `0.0` when nothing has been
    /// rated yet.
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let mean = f64::from(self.total) / f64::from(self.count);
        (mean * 10.0).round() / 10.0
    }
}

impl<'a> FromIterator<&'a Review> for RatingSummary {
    fn from_iter<I: IntoIterator<Item = &'a Review>>(iter: I) -> Self {
        let mut summary = Self::default();
        for review in iter {
            summary.add(review.rating());
        }
        summary
    }
}
