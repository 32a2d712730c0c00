// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]

use super::*;
use chrono::TimeZone;
use yare::parameterized;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap()
}

#[parameterized(
    join_course = { OutboundCommand::join_course("c1", "u1"), "join-course" },
    leave_course = { OutboundCommand::leave_course("c1", "u1"), "leave-course" },
    join_leaderboard = { OutboundCommand::join_leaderboard("u1"), "join-leaderboard" },
    leave_leaderboard = { OutboundCommand::leave_leaderboard("u1"), "leave-leaderboard" },
    quiz_answer = { OutboundCommand::submit_quiz_answer("c1", "q1", "qq1", 2, 30, "u1"), "quiz-answer" },
    start_quiz = { OutboundCommand::start_quiz("c1", "q1", "u1"), "start-quiz" },
    lesson_completed = { OutboundCommand::complete_lesson("c1", "l1", "u1", 600), "lesson-completed" },
    heartbeat = { OutboundCommand::heartbeat("u1"), "heartbeat" },
    user_activity = { OutboundCommand::update_activity("u1", "watching"), "user-activity" },
)]
fn command_topic(cmd: OutboundCommand, topic: &str) {
    assert_eq!(cmd.topic(), topic);
    assert!(cmd.validate().is_ok());
}

#[parameterized(
    join_course_course = { OutboundCommand::join_course("", "u1"), "courseId" },
    join_course_user = { OutboundCommand::join_course("c1", ""), "userId" },
    blank_is_missing = { OutboundCommand::join_leaderboard("   "), "userId" },
    quiz_question = { OutboundCommand::submit_quiz_answer("c1", "q1", "", 2, 30, "u1"), "questionId" },
    start_quiz_quiz = { OutboundCommand::start_quiz("c1", "", "u1"), "quizId" },
    lesson_lesson = { OutboundCommand::complete_lesson("c1", "", "u1", 600), "lessonId" },
    activity = { OutboundCommand::update_activity("u1", ""), "activity" },
)]
fn command_missing_field(cmd: OutboundCommand, expected: &str) {
    match cmd.validate() {
        Err(Error::MissingField { field, command }) => {
            assert_eq!(field, expected);
            assert_eq!(command, cmd.topic());
        }
        other => panic!("expected MissingField, got {:?}", other),
    }
}

#[test]
fn quiz_answer_payload_shape() {
    let cmd = OutboundCommand::submit_quiz_answer("c1", "q1", "qq1", 2, 30, "u1");
    let payload = cmd.payload(fixed_now());
    assert_eq!(
        payload,
        json!({
            "courseId": "c1",
            "quizId": "q1",
            "questionId": "qq1",
            "answer": 2,
            "timeSpent": 30,
            "userId": "u1",
        })
    );
}

#[test]
fn lesson_completed_payload_shape() {
    let payload = OutboundCommand::complete_lesson("c1", "l9", "u1", 600).payload(fixed_now());
    assert_eq!(
        payload,
        json!({"courseId": "c1", "lessonId": "l9", "userId": "u1", "timeSpent": 600})
    );
}

#[test]
fn heartbeat_is_stamped_with_clock_time() {
    let payload = OutboundCommand::heartbeat("u1").payload(fixed_now());
    assert_eq!(payload["userId"], "u1");
    assert_eq!(payload["timestamp"], "2026-03-14T15:09:26.000Z");
}

#[test]
fn user_activity_is_stamped_with_clock_time() {
    let payload = OutboundCommand::update_activity("u1", "viewing-lesson").payload(fixed_now());
    assert_eq!(payload["activity"], "viewing-lesson");
    assert_eq!(payload["timestamp"], "2026-03-14T15:09:26.000Z");
}

#[test]
fn commands_without_time_carry_no_timestamp() {
    let payload = OutboundCommand::join_course("c1", "u1").payload(fixed_now());
    assert!(payload.get("timestamp").is_none());
}

#[test]
fn to_envelope_validates_first() {
    assert!(OutboundCommand::join_course("", "u1")
        .to_envelope(fixed_now())
        .is_err());

    let env = OutboundCommand::join_leaderboard("u1")
        .to_envelope(fixed_now())
        .unwrap();
    assert_eq!(env.topic, "join-leaderboard");
    assert_eq!(env.payload, json!({"userId": "u1"}));
}
