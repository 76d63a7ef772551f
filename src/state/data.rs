//! Shared data structures for the gallery state
//!
//! These structs represent the data model that flows between
//! the key-value store and the presentation layer. Field names
//! serialize in camelCase so snapshots stay readable by the
//! browser build of the gallery.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Unique image identifier (milliseconds since epoch at upload time)
pub type ImageId = i64;

/// The person using the gallery in this session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Display handle, the only identity mechanism
    pub nickname: String,
    pub join_date: DateTime<Utc>,
    /// Number of images this user has published
    pub uploads_count: u32,
}

impl User {
    pub fn new(nickname: impl Into<String>, join_date: DateTime<Utc>) -> Self {
        Self {
            nickname: nickname.into(),
            join_date,
            uploads_count: 0,
        }
    }
}

/// A single thumbs-up / thumbs-down opinion
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Vote {
    Good,
    CanImprove,
}

/// Aggregate vote tallies for an image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ratings {
    pub good: u32,
    pub can_improve: u32,
}

impl Ratings {
    pub fn new(good: u32, can_improve: u32) -> Self {
        Self { good, can_improve }
    }

    fn slot(&mut self, vote: Vote) -> &mut u32 {
        match vote {
            Vote::Good => &mut self.good,
            Vote::CanImprove => &mut self.can_improve,
        }
    }

    pub fn increment(&mut self, vote: Vote) {
        *self.slot(vote) += 1;
    }

    /// Never goes below zero, even for records whose tallies were edited by hand
    pub fn decrement(&mut self, vote: Vote) {
        let slot = self.slot(vote);
        *slot = slot.saturating_sub(1);
    }

    pub fn total(&self) -> u32 {
        self.good + self.can_improve
    }

    /// Share of "good" votes in percent (0.0 when nobody voted)
    pub fn approval_percentage(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        f64::from(self.good) / f64::from(total) * 100.0
    }
}

/// Represents a single image in the gallery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: ImageId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Uploader's nickname at publish time (a copy, not a live reference)
    pub author: String,
    /// Data URL or remote URL
    pub image_url: String,
    pub upload_date: DateTime<Utc>,
    #[serde(default)]
    pub ratings: Ratings,
    /// Each voter's current vote, keyed by nickname
    #[serde(default)]
    pub user_ratings: BTreeMap<String, Vote>,
    #[serde(default)]
    pub views: u64,
    /// Reserved for comments; always empty for now
    #[serde(default)]
    pub comments: Vec<serde_json::Value>,
}

impl Image {
    /// The vote `nickname` currently holds on this image, if any
    pub fn vote_of(&self, nickname: &str) -> Option<Vote> {
        self.user_ratings.get(nickname).copied()
    }

    pub fn total_votes(&self) -> u32 {
        self.ratings.total()
    }

    /// Strictly more "good" than "can improve" votes
    pub fn is_top_rated(&self) -> bool {
        self.ratings.good > self.ratings.can_improve
    }
}
