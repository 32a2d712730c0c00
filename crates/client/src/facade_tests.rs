// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use serde_json::Value;
use std::sync::Mutex;

/// Realtime that only records submitted commands.
#[derive(Default)]
struct Recorder {
    submitted: Mutex<Vec<OutboundCommand>>,
}

impl Realtime for Recorder {
    fn state(&self) -> ConnectionState {
        ConnectionState::Connected
    }

    fn subscribe(&self, _topic: &str, _callback: Callback) -> SubscriptionId {
        SubscriptionId::DETACHED
    }

    fn unsubscribe(&self, _topic: &str, _id: SubscriptionId) -> bool {
        false
    }

    fn unsubscribe_callback(&self, _topic: &str, _callback: &Callback) -> bool {
        false
    }

    fn unsubscribe_all(&self, _topic: &str) -> usize {
        0
    }

    fn add_presenter(&self, _presenter: Arc<dyn Presenter>) {}

    fn submit(&self, command: OutboundCommand) {
        self.submitted.lock().unwrap().push(command);
    }

    fn stop(&self) {}

    fn restart(&self) {}
}

#[test]
fn convenience_methods_build_commands() {
    let recorder = Recorder::default();

    recorder.join_course("c1", "u1");
    recorder.leave_course("c1", "u1");
    recorder.join_leaderboard("u1");
    recorder.leave_leaderboard("u1");
    recorder.submit_quiz_answer("c1", "q1", "n1", 2, 30, "u1");
    recorder.start_quiz("c1", "q1", "u1");
    recorder.complete_lesson("c1", "l1", "u1", 120);
    recorder.send_heartbeat("u1");
    recorder.update_activity("u1", "watching");

    let topics: Vec<&str> = recorder
        .submitted
        .lock()
        .unwrap()
        .iter()
        .map(|c| c.topic())
        .collect();
    assert_eq!(
        topics,
        vec![
            "join-course",
            "leave-course",
            "join-leaderboard",
            "leave-leaderboard",
            "quiz-answer",
            "start-quiz",
            "lesson-completed",
            "heartbeat",
            "user-activity",
        ]
    );
}

#[test]
fn quiz_answer_keeps_argument_order() {
    let recorder = Recorder::default();
    recorder.submit_quiz_answer("c1", "q1", "n1", 2, 30, "u1");

    let submitted = recorder.submitted.lock().unwrap();
    assert_eq!(
        submitted[0],
        OutboundCommand::submit_quiz_answer("c1", "q1", "n1", 2, 30, "u1")
    );
}

#[test]
fn default_is_connected_follows_state() {
    assert!(Recorder::default().is_connected());
    assert!(!NoopRealtime.is_connected());
}

#[test]
fn noop_accepts_everything() {
    let service: Arc<dyn Realtime> = Arc::new(NoopRealtime);
    let called = Arc::new(Mutex::new(false));
    let flag = Arc::clone(&called);

    let callback: Callback = Arc::new(move |_: &Value| {
        *flag.lock().unwrap() = true;
        Ok(())
    });
    let id = service.subscribe("leaderboard-update", Arc::clone(&callback));
    service.add_presenter(Arc::new(|_: &pulse_core::NotificationIntent| {}));
    service.join_course("c1", "u1");
    service.send_heartbeat("u1");
    service.stop();
    service.restart();

    assert_eq!(id, SubscriptionId::DETACHED);
    assert!(!service.unsubscribe("leaderboard-update", id));
    assert!(!service.unsubscribe_callback("leaderboard-update", &callback));
    assert_eq!(service.unsubscribe_all("leaderboard-update"), 0);
    assert_eq!(service.state(), ConnectionState::Idle);
    assert!(!*called.lock().unwrap());
}

#[test]
fn noop_ignores_malformed_commands() {
    let service = NoopRealtime;
    service.join_course("", "");
    assert_eq!(service.state(), ConnectionState::Idle);
}
