// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Translation of reserved inbound topics into notification intents.
//!
//! An intent says *what* the user should be told; the presentation layer
//! decides *how*. Translation is pure: the same topic and payload always
//! produce the same intent, and topics outside
//! [`topics::RESERVED`](crate::protocol::topics::RESERVED) never produce one.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::protocol::{
    topics, BadgeUnlocked, CompetitionAnnouncement, PointsUpdate, ServerNotification,
    StreakUpdate,
};

/// What kind of notification to present.
#[derive(Debug, Clone, PartialEq)]
pub enum IntentKind {
    PointsEarned { amount: i64 },
    BadgeUnlocked { badge_name: String },
    StreakMilestone { milestone: Value },
    GenericInfo,
    GenericWarning,
    GenericError,
    CompetitionAnnouncement,
}

/// Visual tone hint for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentStyle {
    Success,
    Info,
    Warning,
    Error,
}

/// A structured request to show the user something.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationIntent {
    pub kind: IntentKind,
    pub style: IntentStyle,
    /// Human-readable text.
    pub message: String,
    /// If true the notification should stay until dismissed.
    pub persistent: bool,
    /// The inbound payload the intent was derived from.
    pub payload: Value,
}

impl NotificationIntent {
    fn new(kind: IntentKind, style: IntentStyle, message: String, payload: &Value) -> Self {
        NotificationIntent {
            kind,
            style,
            message,
            persistent: false,
            payload: payload.clone(),
        }
    }

    /// The intent raised when the client stops retrying.
    pub fn connection_exhausted(attempts: u32) -> Self {
        NotificationIntent {
            kind: IntentKind::GenericError,
            style: IntentStyle::Error,
            message: "Connection lost. Please reload to reconnect.".to_string(),
            persistent: true,
            payload: serde_json::json!({ "attempts": attempts }),
        }
    }
}

/// Translates an inbound message into an intent, if the topic calls for one.
pub fn translate(topic: &str, payload: &Value) -> Option<NotificationIntent> {
    match topic {
        topics::POINTS_UPDATE => {
            let update: PointsUpdate = parse(payload)?;
            (update.points_gained > 0).then(|| {
                NotificationIntent::new(
                    IntentKind::PointsEarned {
                        amount: update.points_gained,
                    },
                    IntentStyle::Success,
                    format!("+{} points earned!", update.points_gained),
                    payload,
                )
            })
        }
        topics::BADGE_UNLOCKED => {
            let badge: BadgeUnlocked = parse(payload).unwrap_or_default();
            Some(NotificationIntent::new(
                IntentKind::BadgeUnlocked {
                    badge_name: badge.badge_name.clone(),
                },
                IntentStyle::Success,
                format!("Badge unlocked: {}", badge.badge_name),
                payload,
            ))
        }
        topics::STREAK_UPDATE => {
            let update: StreakUpdate = parse(payload)?;
            let milestone = update.streak_milestone.filter(is_truthy)?;
            let message = format!("{}-day streak milestone!", display_value(&milestone));
            Some(NotificationIntent::new(
                IntentKind::StreakMilestone { milestone },
                IntentStyle::Success,
                message,
                payload,
            ))
        }
        topics::NOTIFICATION => {
            let notification: ServerNotification = parse(payload).unwrap_or_default();
            let (kind, style) = match notification.kind.as_deref() {
                Some("success") => (IntentKind::GenericInfo, IntentStyle::Success),
                Some("warning") => (IntentKind::GenericWarning, IntentStyle::Warning),
                Some("error") => (IntentKind::GenericError, IntentStyle::Error),
                _ => (IntentKind::GenericInfo, IntentStyle::Info),
            };
            Some(NotificationIntent::new(
                kind,
                style,
                notification.message,
                payload,
            ))
        }
        topics::COMPETITION_ANNOUNCEMENT => {
            let announcement: CompetitionAnnouncement = parse(payload).unwrap_or_default();
            Some(NotificationIntent::new(
                IntentKind::CompetitionAnnouncement,
                IntentStyle::Info,
                announcement.message,
                payload,
            ))
        }
        _ => None,
    }
}

fn parse<T: DeserializeOwned>(payload: &Value) -> Option<T> {
    serde_json::from_value(payload.clone()).ok()
}

/// JSON truthiness: null, false, 0, "" and NaN are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "intent_tests.rs"]
mod tests;
