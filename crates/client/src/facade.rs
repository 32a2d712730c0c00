// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Application-facing surface of the realtime service.
//!
//! Application code talks to `Arc<dyn Realtime>` and never learns whether a
//! live connection exists. Outside an interactive runtime the factory hands
//! out [`NoopRealtime`], which accepts every call and does nothing.

use std::sync::Arc;

use pulse_core::{ConnectionState, OutboundCommand};

use crate::notify::Presenter;
use crate::router::{Callback, SubscriptionId};

/// Realtime client operations available to application code.
pub trait Realtime: Send + Sync {
    /// Current connection state.
    fn state(&self) -> ConnectionState;

    /// True if messages can currently be sent.
    fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Register a callback for `topic`.
    fn subscribe(&self, topic: &str, callback: Callback) -> SubscriptionId;

    /// Remove one subscription. Returns true if it existed.
    fn unsubscribe(&self, topic: &str, id: SubscriptionId) -> bool;

    /// Remove the first subscription holding this exact callback.
    fn unsubscribe_callback(&self, topic: &str, callback: &Callback) -> bool;

    /// Remove every subscription for `topic`, returning how many were removed.
    fn unsubscribe_all(&self, topic: &str) -> usize;

    /// Register a consumer of notification intents.
    fn add_presenter(&self, presenter: Arc<dyn Presenter>);

    /// Send a command upstream if connected; otherwise drop it.
    fn submit(&self, command: OutboundCommand);

    /// Disconnect and stop retrying.
    fn stop(&self);

    /// Reconnect with a fresh retry budget.
    fn restart(&self);

    fn join_course(&self, course_id: &str, user_id: &str) {
        self.submit(OutboundCommand::join_course(course_id, user_id));
    }

    fn leave_course(&self, course_id: &str, user_id: &str) {
        self.submit(OutboundCommand::leave_course(course_id, user_id));
    }

    fn join_leaderboard(&self, user_id: &str) {
        self.submit(OutboundCommand::join_leaderboard(user_id));
    }

    fn leave_leaderboard(&self, user_id: &str) {
        self.submit(OutboundCommand::leave_leaderboard(user_id));
    }

    fn submit_quiz_answer(
        &self,
        course_id: &str,
        quiz_id: &str,
        question_id: &str,
        answer: i64,
        time_spent: i64,
        user_id: &str,
    ) {
        self.submit(OutboundCommand::submit_quiz_answer(
            course_id,
            quiz_id,
            question_id,
            answer,
            time_spent,
            user_id,
        ));
    }

    fn start_quiz(&self, course_id: &str, quiz_id: &str, user_id: &str) {
        self.submit(OutboundCommand::start_quiz(course_id, quiz_id, user_id));
    }

    fn complete_lesson(&self, course_id: &str, lesson_id: &str, user_id: &str, time_spent: i64) {
        self.submit(OutboundCommand::complete_lesson(
            course_id, lesson_id, user_id, time_spent,
        ));
    }

    fn send_heartbeat(&self, user_id: &str) {
        self.submit(OutboundCommand::heartbeat(user_id));
    }

    fn update_activity(&self, user_id: &str, activity: &str) {
        self.submit(OutboundCommand::update_activity(user_id, activity));
    }
}

/// Stand-in used where no live connection can exist.
///
/// Reports `Idle` forever, never invokes callbacks and never sends.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRealtime;

impl Realtime for NoopRealtime {
    fn state(&self) -> ConnectionState {
        ConnectionState::Idle
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
        tracing::trace!(topic = command.topic(), "no realtime service, command ignored");
    }

    fn stop(&self) {}

    fn restart(&self) {}
}

#[cfg(test)]
#[path = "facade_tests.rs"]
mod tests;
