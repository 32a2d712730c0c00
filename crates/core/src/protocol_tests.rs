// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use serde_json::json;
use yare::parameterized;

#[test]
fn envelope_json_format() {
    let env = Envelope::new(topics::JOIN_COURSE, json!({"courseId": "c1", "userId": "u1"}));
    let value: Value = serde_json::from_str(&env.to_json().unwrap()).unwrap();
    assert_eq!(value["event"], "join-course");
    assert_eq!(value["data"]["courseId"], "c1");
    assert_eq!(value["data"]["userId"], "u1");
}

#[test]
fn envelope_without_data_decodes_as_null() {
    let env = Envelope::from_json(r#"{"event":"leaderboard-update"}"#).unwrap();
    assert_eq!(env.topic, "leaderboard-update");
    assert_eq!(env.payload, Value::Null);
}

#[test]
fn envelope_without_event_is_rejected() {
    assert!(Envelope::from_json(r#"{"data":{}}"#).is_err());
}

#[parameterized(
    points = { "points-update", true },
    badge = { "badge-unlocked", true },
    streak = { "streak-update", true },
    notification = { "notification", true },
    competition = { "competition-announcement", true },
    leaderboard = { "leaderboard-update", false },
    enrollment = { "course-enrollment", false },
    local_signal = { "connection-lost", false },
)]
fn reserved_topics(topic: &str, reserved: bool) {
    assert_eq!(topics::is_reserved(topic), reserved);
}

#[test]
fn points_update_missing_field_defaults_to_zero() {
    let update: PointsUpdate = serde_json::from_value(json!({"totalPoints": 900})).unwrap();
    assert_eq!(update.points_gained, 0);
}

#[test]
fn streak_update_keeps_raw_milestone() {
    let update: StreakUpdate =
        serde_json::from_value(json!({"currentStreak": 7, "streakMilestone": 7})).unwrap();
    assert_eq!(update.streak_milestone, Some(json!(7)));

    let update: StreakUpdate = serde_json::from_value(json!({"currentStreak": 3})).unwrap();
    assert_eq!(update.streak_milestone, None);
}

#[test]
fn server_notification_reads_type_field() {
    let n: ServerNotification =
        serde_json::from_value(json!({"type": "warning", "message": "Quiz closes soon"})).unwrap();
    assert_eq!(n.kind.as_deref(), Some("warning"));
    assert_eq!(n.message, "Quiz closes soon");
}

#[test]
fn server_notification_tolerates_non_string_fields() {
    let n: ServerNotification =
        serde_json::from_value(json!({"type": "error", "message": null})).unwrap();
    assert_eq!(n.kind.as_deref(), Some("error"));
    assert_eq!(n.message, "");

    let badge: BadgeUnlocked = serde_json::from_value(json!({"badgeName": 12})).unwrap();
    assert_eq!(badge.badge_name, "12");
}

#[test]
fn malformed_envelope_is_json_error() {
    let err = Envelope::from_json("not json").unwrap_err();
    assert!(matches!(err, crate::Error::Json(_)));
}
