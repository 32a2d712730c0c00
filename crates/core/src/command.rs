// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound commands and their wire schema.
//!
//! Each command maps to a fixed topic and a fixed set of required fields.
//! Identifier fields must be non-empty; integer fields are typed and so are
//! always present. `heartbeat` and `user-activity` are stamped with the
//! current time when they are turned into an [`Envelope`].

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::protocol::{topics, Envelope};

/// A command the application sends upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundCommand {
    JoinCourse {
        course_id: String,
        user_id: String,
    },
    LeaveCourse {
        course_id: String,
        user_id: String,
    },
    JoinLeaderboard {
        user_id: String,
    },
    LeaveLeaderboard {
        user_id: String,
    },
    SubmitQuizAnswer {
        course_id: String,
        quiz_id: String,
        question_id: String,
        answer: i64,
        time_spent: i64,
        user_id: String,
    },
    StartQuiz {
        course_id: String,
        quiz_id: String,
        user_id: String,
    },
    CompleteLesson {
        course_id: String,
        lesson_id: String,
        user_id: String,
        time_spent: i64,
    },
    Heartbeat {
        user_id: String,
    },
    UpdateActivity {
        user_id: String,
        activity: String,
    },
}

impl OutboundCommand {
    /// Creates a JoinCourse command.
    pub fn join_course(course_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        OutboundCommand::JoinCourse {
            course_id: course_id.into(),
            user_id: user_id.into(),
        }
    }

    /// Creates a LeaveCourse command.
    pub fn leave_course(course_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        OutboundCommand::LeaveCourse {
            course_id: course_id.into(),
            user_id: user_id.into(),
        }
    }

    /// Creates a JoinLeaderboard command.
    pub fn join_leaderboard(user_id: impl Into<String>) -> Self {
        OutboundCommand::JoinLeaderboard {
            user_id: user_id.into(),
        }
    }

    /// Creates a LeaveLeaderboard command.
    pub fn leave_leaderboard(user_id: impl Into<String>) -> Self {
        OutboundCommand::LeaveLeaderboard {
            user_id: user_id.into(),
        }
    }

    /// Creates a SubmitQuizAnswer command.
    pub fn submit_quiz_answer(
        course_id: impl Into<String>,
        quiz_id: impl Into<String>,
        question_id: impl Into<String>,
        answer: i64,
        time_spent: i64,
        user_id: impl Into<String>,
    ) -> Self {
        OutboundCommand::SubmitQuizAnswer {
            course_id: course_id.into(),
            quiz_id: quiz_id.into(),
            question_id: question_id.into(),
            answer,
            time_spent,
            user_id: user_id.into(),
        }
    }

    /// Creates a StartQuiz command.
    pub fn start_quiz(
        course_id: impl Into<String>,
        quiz_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        OutboundCommand::StartQuiz {
            course_id: course_id.into(),
            quiz_id: quiz_id.into(),
            user_id: user_id.into(),
        }
    }

    /// Creates a CompleteLesson command.
    pub fn complete_lesson(
        course_id: impl Into<String>,
        lesson_id: impl Into<String>,
        user_id: impl Into<String>,
        time_spent: i64,
    ) -> Self {
        OutboundCommand::CompleteLesson {
            course_id: course_id.into(),
            lesson_id: lesson_id.into(),
            user_id: user_id.into(),
            time_spent,
        }
    }

    /// Creates a Heartbeat command.
    pub fn heartbeat(user_id: impl Into<String>) -> Self {
        OutboundCommand::Heartbeat {
            user_id: user_id.into(),
        }
    }

    /// Creates an UpdateActivity command.
    pub fn update_activity(user_id: impl Into<String>, activity: impl Into<String>) -> Self {
        OutboundCommand::UpdateActivity {
            user_id: user_id.into(),
            activity: activity.into(),
        }
    }

    /// Get the wire topic for this command.
    pub fn topic(&self) -> &'static str {
        match self {
            OutboundCommand::JoinCourse { .. } => topics::JOIN_COURSE,
            OutboundCommand::LeaveCourse { .. } => topics::LEAVE_COURSE,
            OutboundCommand::JoinLeaderboard { .. } => topics::JOIN_LEADERBOARD,
            OutboundCommand::LeaveLeaderboard { .. } => topics::LEAVE_LEADERBOARD,
            OutboundCommand::SubmitQuizAnswer { .. } => topics::QUIZ_ANSWER,
            OutboundCommand::StartQuiz { .. } => topics::START_QUIZ,
            OutboundCommand::CompleteLesson { .. } => topics::LESSON_COMPLETED,
            OutboundCommand::Heartbeat { .. } => topics::HEARTBEAT,
            OutboundCommand::UpdateActivity { .. } => topics::USER_ACTIVITY,
        }
    }

    /// Required string fields as (wire name, value) pairs.
    fn required_strings(&self) -> Vec<(&'static str, &str)> {
        match self {
            OutboundCommand::JoinCourse { course_id, user_id }
            | OutboundCommand::LeaveCourse { course_id, user_id } => {
                vec![("courseId", course_id.as_str()), ("userId", user_id.as_str())]
            }
            OutboundCommand::JoinLeaderboard { user_id }
            | OutboundCommand::LeaveLeaderboard { user_id }
            | OutboundCommand::Heartbeat { user_id } => vec![("userId", user_id.as_str())],
            OutboundCommand::SubmitQuizAnswer {
                course_id,
                quiz_id,
                question_id,
                user_id,
                ..
            } => vec![
                ("courseId", course_id.as_str()),
                ("quizId", quiz_id.as_str()),
                ("questionId", question_id.as_str()),
                ("userId", user_id.as_str()),
            ],
            OutboundCommand::StartQuiz {
                course_id,
                quiz_id,
                user_id,
            } => vec![
                ("courseId", course_id.as_str()),
                ("quizId", quiz_id.as_str()),
                ("userId", user_id.as_str()),
            ],
            OutboundCommand::CompleteLesson {
                course_id,
                lesson_id,
                user_id,
                ..
            } => vec![
                ("courseId", course_id.as_str()),
                ("lessonId", lesson_id.as_str()),
                ("userId", user_id.as_str()),
            ],
            OutboundCommand::UpdateActivity { user_id, activity } => {
                vec![("userId", user_id.as_str()), ("activity", activity.as_str())]
            }
        }
    }

    /// Checks that every required string field is non-blank.
    ///
    /// Returns the first missing field.
    pub fn validate(&self) -> Result<()> {
        match self
            .required_strings()
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
        {
            Some((field, _)) => Err(Error::MissingField {
                command: self.topic(),
                field,
            }),
            None => Ok(()),
        }
    }

    /// Builds the JSON payload, stamping time-bearing commands with `now`.
    pub fn payload(&self, now: DateTime<Utc>) -> Value {
        match self {
            OutboundCommand::JoinCourse { course_id, user_id }
            | OutboundCommand::LeaveCourse { course_id, user_id } => {
                json!({ "courseId": course_id, "userId": user_id })
            }
            OutboundCommand::JoinLeaderboard { user_id }
            | OutboundCommand::LeaveLeaderboard { user_id } => json!({ "userId": user_id }),
            OutboundCommand::SubmitQuizAnswer {
                course_id,
                quiz_id,
                question_id,
                answer,
                time_spent,
                user_id,
            } => json!({
                "courseId": course_id,
                "quizId": quiz_id,
                "questionId": question_id,
                "answer": answer,
                "timeSpent": time_spent,
                "userId": user_id,
            }),
            OutboundCommand::StartQuiz {
                course_id,
                quiz_id,
                user_id,
            } => json!({ "courseId": course_id, "quizId": quiz_id, "userId": user_id }),
            OutboundCommand::CompleteLesson {
                course_id,
                lesson_id,
                user_id,
                time_spent,
            } => json!({
                "courseId": course_id,
                "lessonId": lesson_id,
                "userId": user_id,
                "timeSpent": time_spent,
            }),
            OutboundCommand::Heartbeat { user_id } => {
                json!({ "userId": user_id, "timestamp": timestamp(now) })
            }
            OutboundCommand::UpdateActivity { user_id, activity } => json!({
                "userId": user_id,
                "activity": activity,
                "timestamp": timestamp(now),
            }),
        }
    }

    /// Validates the command and wraps it in a wire envelope.
    pub fn to_envelope(&self, now: DateTime<Utc>) -> Result<Envelope> {
        self.validate()?;
        Ok(Envelope::new(self.topic(), self.payload(now)))
    }
}

/// RFC 3339 with millisecond precision and a `Z` suffix.
fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
