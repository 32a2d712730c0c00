// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use serde_json::json;
use yare::parameterized;

#[test]
fn points_gained_produces_points_earned() {
    let payload = json!({"pointsGained": 50, "totalPoints": 1250});
    let intent = translate("points-update", &payload).unwrap();
    assert_eq!(intent.kind, IntentKind::PointsEarned { amount: 50 });
    assert_eq!(intent.style, IntentStyle::Success);
    assert!(intent.message.contains("50"));
    assert_eq!(intent.payload, payload);
    assert!(!intent.persistent);
}

#[parameterized(
    zero = { json!({"pointsGained": 0}) },
    negative = { json!({"pointsGained": -10}) },
    missing = { json!({"totalPoints": 100}) },
    wrong_type = { json!({"pointsGained": "lots"}) },
)]
fn points_without_gain_produce_nothing(payload: Value) {
    assert!(translate("points-update", &payload).is_none());
}

#[test]
fn badge_unlocked_carries_name() {
    let intent = translate("badge-unlocked", &json!({"badgeName": "Quiz Master"})).unwrap();
    assert_eq!(
        intent.kind,
        IntentKind::BadgeUnlocked {
            badge_name: "Quiz Master".to_string()
        }
    );
    assert!(intent.message.contains("Quiz Master"));
}

#[parameterized(
    number = { json!({"streakMilestone": 7}) },
    string = { json!({"streakMilestone": "30"}) },
    boolean = { json!({"streakMilestone": true}) },
)]
fn truthy_streak_milestone_produces_intent(payload: Value) {
    let intent = translate("streak-update", &payload).unwrap();
    assert!(matches!(intent.kind, IntentKind::StreakMilestone { .. }));
}

#[parameterized(
    absent = { json!({"currentStreak": 4}) },
    null = { json!({"streakMilestone": null}) },
    zero = { json!({"streakMilestone": 0}) },
    empty = { json!({"streakMilestone": ""}) },
    falsy_bool = { json!({"streakMilestone": false}) },
)]
fn falsy_streak_milestone_produces_nothing(payload: Value) {
    assert!(translate("streak-update", &payload).is_none());
}

#[test]
fn streak_message_includes_milestone() {
    let intent = translate("streak-update", &json!({"streakMilestone": 7})).unwrap();
    assert_eq!(intent.message, "7-day streak milestone!");
}

#[parameterized(
    success = { Some("success"), IntentKind::GenericInfo, IntentStyle::Success },
    info = { Some("info"), IntentKind::GenericInfo, IntentStyle::Info },
    warning = { Some("warning"), IntentKind::GenericWarning, IntentStyle::Warning },
    error = { Some("error"), IntentKind::GenericError, IntentStyle::Error },
    unknown = { Some("celebration"), IntentKind::GenericInfo, IntentStyle::Info },
    missing = { None, IntentKind::GenericInfo, IntentStyle::Info },
)]
fn notification_type_table(kind: Option<&str>, expected: IntentKind, style: IntentStyle) {
    let payload = match kind {
        Some(k) => json!({"type": k, "message": "hello"}),
        None => json!({"message": "hello"}),
    };
    let intent = translate("notification", &payload).unwrap();
    assert_eq!(intent.kind, expected);
    assert_eq!(intent.style, style);
    assert_eq!(intent.message, "hello");
}

#[parameterized(
    null_message = { json!({"type": "error", "message": null}), IntentKind::GenericError, IntentStyle::Error, "" },
    numeric_message = { json!({"type": "warning", "message": 404}), IntentKind::GenericWarning, IntentStyle::Warning, "404" },
    missing_message = { json!({"type": "success"}), IntentKind::GenericInfo, IntentStyle::Success, "" },
    numeric_type = { json!({"type": 3, "message": "hello"}), IntentKind::GenericInfo, IntentStyle::Info, "hello" },
)]
fn notification_type_survives_odd_message(
    payload: Value,
    expected: IntentKind,
    style: IntentStyle,
    message: &str,
) {
    let intent = translate("notification", &payload).unwrap();
    assert_eq!(intent.kind, expected);
    assert_eq!(intent.style, style);
    assert_eq!(intent.message, message);
}

#[test]
fn competition_announcement_is_always_produced() {
    let intent = translate(
        "competition-announcement",
        &json!({"message": "Weekly sprint starts now"}),
    )
    .unwrap();
    assert_eq!(intent.kind, IntentKind::CompetitionAnnouncement);
    assert_eq!(intent.message, "Weekly sprint starts now");

    let intent = translate("competition-announcement", &Value::Null).unwrap();
    assert_eq!(intent.kind, IntentKind::CompetitionAnnouncement);
}

#[parameterized(
    leaderboard = { "leaderboard-update" },
    quiz_session = { "quiz-session-update" },
    enrollment = { "course-enrollment" },
    unknown = { "something-else" },
)]
fn unreserved_topics_produce_nothing(topic: &str) {
    assert!(translate(topic, &json!({"pointsGained": 50})).is_none());
}

#[test]
fn connection_exhausted_is_persistent_error() {
    let intent = NotificationIntent::connection_exhausted(5);
    assert_eq!(intent.kind, IntentKind::GenericError);
    assert_eq!(intent.style, IntentStyle::Error);
    assert!(intent.persistent);
    assert_eq!(intent.payload["attempts"], 5);
}
