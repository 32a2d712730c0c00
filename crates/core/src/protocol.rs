// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wire envelope and topic names.
//!
//! Every frame in either direction is a JSON object naming the topic and
//! carrying an arbitrary payload:
//!
//! ```json
//! {"event": "points-update", "data": {"pointsGained": 50}}
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Topic names used on the wire and by the local event router.
pub mod topics {
    pub const JOIN_COURSE: &str = "join-course";
    pub const LEAVE_COURSE: &str = "leave-course";
    pub const JOIN_LEADERBOARD: &str = "join-leaderboard";
    pub const LEAVE_LEADERBOARD: &str = "leave-leaderboard";
    pub const QUIZ_ANSWER: &str = "quiz-answer";
    pub const START_QUIZ: &str = "start-quiz";
    pub const LESSON_COMPLETED: &str = "lesson-completed";
    pub const HEARTBEAT: &str = "heartbeat";
    pub const USER_ACTIVITY: &str = "user-activity";

    pub const LEADERBOARD_UPDATE: &str = "leaderboard-update";
    pub const POINTS_UPDATE: &str = "points-update";
    pub const BADGE_UNLOCKED: &str = "badge-unlocked";
    pub const STREAK_UPDATE: &str = "streak-update";
    pub const QUIZ_SESSION_UPDATE: &str = "quiz-session-update";
    pub const COURSE_ENROLLMENT: &str = "course-enrollment";
    pub const NOTIFICATION: &str = "notification";
    pub const COMPETITION_ANNOUNCEMENT: &str = "competition-announcement";

    /// Local signal: the transport reported opened.
    pub const CONNECTION_ESTABLISHED: &str = "connection-established";
    /// Local signal: an established connection went away.
    pub const CONNECTION_LOST: &str = "connection-lost";
    /// Local signal: the retry budget is spent.
    pub const CONNECTION_EXHAUSTED: &str = "connection-exhausted";

    /// Inbound topics that also produce a notification intent.
    pub const RESERVED: [&str; 5] = [
        POINTS_UPDATE,
        BADGE_UNLOCKED,
        STREAK_UPDATE,
        NOTIFICATION,
        COMPETITION_ANNOUNCEMENT,
    ];

    /// Returns true if the topic is wired to the notification emitter.
    pub fn is_reserved(topic: &str) -> bool {
        RESERVED.contains(&topic)
    }
}

/// A single frame on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    /// Topic name.
    #[serde(rename = "event")]
    pub topic: String,
    /// Topic payload. Missing payloads decode as `null`.
    #[serde(rename = "data", default)]
    pub payload: Value,
}

impl Envelope {
    /// Creates an envelope for the given topic.
    pub fn new(topic: impl Into<String>, payload: Value) -> Self {
        Envelope {
            topic: topic.into(),
            payload,
        }
    }

    /// Serializes the envelope to JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserializes an envelope from JSON.
    pub fn from_json(s: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Payload of `points-update`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PointsUpdate {
    pub points_gained: i64,
}

/// Payload of `badge-unlocked`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BadgeUnlocked {
    #[serde(deserialize_with = "lenient_string")]
    pub badge_name: String,
}

/// Payload of `streak-update`.
///
/// The milestone is kept as raw JSON so truthiness can be judged the same way
/// the server sends it (number, bool or string).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StreakUpdate {
    pub streak_milestone: Option<Value>,
}

/// Payload of `notification`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerNotification {
    #[serde(rename = "type", deserialize_with = "lenient_tag")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub message: String,
}

/// Payload of `competition-announcement`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct CompetitionAnnouncement {
    #[serde(deserialize_with = "lenient_string")]
    pub message: String,
}

/// Text field that tolerates whatever JSON the server put there.
///
/// `null` reads as empty; numbers, bools and structures are rendered as JSON.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Tag field that is only meaningful as a string; anything else is absent.
fn lenient_tag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
