use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A swipeable profile card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: u64,
    pub name: String,
    pub age: u8,
    #[serde(default)]
    pub bio: String,
    #[serde(rename = "distanceKm", default)]
    pub distance_km: u16,
    #[serde(rename = "isVerified", default)]
    pub is_verified: bool,
    #[serde(rename = "imageUrls", default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Horizontal swipe direction
///
/// `Right` always denotes the positive action (like), `Left` the negative
/// one (skip). Every caller translating a direction into a domain action
/// must preserve this mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

/// Action applied to the top card of the deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeAction {
    Skip,
    Like,
    Superlike,
}

impl SwipeAction {
    /// Direction contract: right = like, left = skip
    pub fn from_direction(direction: Direction) -> Self {
        match direction {
            Direction::Right => SwipeAction::Like,
            Direction::Left => SwipeAction::Skip,
        }
    }

    /// Exit direction for a card leaving the deck under this action
    pub fn exit_direction(self) -> Direction {
        match self {
            SwipeAction::Skip => Direction::Left,
            SwipeAction::Like | SwipeAction::Superlike => Direction::Right,
        }
    }
}

/// Committed action retained on the history stack for undo
#[derive(Debug, Clone)]
pub struct ActionRecord {
    pub candidate: Candidate,
    pub action: SwipeAction,
    /// Cursor position at the time the action committed; undo restores it
    pub index: usize,
    pub recorded_at: DateTime<Utc>,
}

/// Per-session like/superlike budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaCounters {
    pub likes_remaining: u32,
    pub super_likes_remaining: u32,
}

impl QuotaCounters {
    pub fn new(likes: u32, super_likes: u32) -> Self {
        Self {
            likes_remaining: likes,
            super_likes_remaining: super_likes,
        }
    }

    /// Whether the budget allows committing this action
    pub fn allows(&self, action: SwipeAction) -> bool {
        match action {
            SwipeAction::Skip => true,
            SwipeAction::Like => self.likes_remaining > 0,
            SwipeAction::Superlike => self.super_likes_remaining > 0,
        }
    }

    /// Decrement the counter paid by this action. Skip charges nothing.
    /// Must only be called after `allows` returned true.
    pub fn charge(&mut self, action: SwipeAction) {
        match action {
            SwipeAction::Skip => {}
            SwipeAction::Like => self.likes_remaining -= 1,
            SwipeAction::Superlike => self.super_likes_remaining -= 1,
        }
    }

    /// Inverse of `charge`, applied on undo
    pub fn refund(&mut self, action: SwipeAction) {
        match action {
            SwipeAction::Skip => {}
            SwipeAction::Like => self.likes_remaining += 1,
            SwipeAction::Superlike => self.super_likes_remaining += 1,
        }
    }
}

/// Pointer position in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Translate + rotate applied to the top card element
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub rotate_deg: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translate_x: 0.0,
        translate_y: 0.0,
        rotate_deg: 0.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}
