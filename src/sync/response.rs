//! Handler reply translation.
//!
//! # Responsibilities
//! - Turn a handler's reply into a success or error outcome, in one place
//! - Apply a success outcome to an entity's attribute state
//!
//! # Design Decisions
//! - A string reply is always an error, intended or not
//! - `Null` succeeds without a payload
//! - Model reads replace state; creates and updates merge into it

use serde_json::Value;

use crate::sync::request::{Action, Attributes};

/// The translated result of a persistence attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Succeeded, optionally with attributes for the entity.
    Success(Option<Attributes>),
    /// Succeeded with an ordered list of member attributes (collection reads).
    SuccessList(Vec<Attributes>),
    /// Failed with a message. Entity state is left untouched.
    Error(String),
}

impl Outcome {
    /// Interpret a handler reply.
    pub fn from_reply(reply: Value) -> Self {
        match reply {
            Value::Null => Outcome::Success(None),
            Value::String(message) => Outcome::Error(message),
            Value::Object(attrs) => Outcome::Success(Some(attrs)),
            Value::Array(items) => {
                let total = items.len();
                let members: Vec<Attributes> = items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Object(attrs) => Some(attrs),
                        _ => None,
                    })
                    .collect();
                if members.len() != total {
                    tracing::warn!(
                        dropped = total - members.len(),
                        "Non-object entries in handler reply list ignored"
                    );
                }
                Outcome::SuccessList(members)
            }
            other => {
                tracing::debug!(reply = %other, "Scalar handler reply treated as empty success");
                Outcome::Success(None)
            }
        }
    }

    pub fn is_success(&self) -> bool {
        !self.is_error()
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Outcome::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Apply this outcome to a model's attributes for `action`.
    ///
    /// Returns true if `attrs` changed.
    pub fn apply(&self, action: Action, attrs: &mut Attributes) -> bool {
        let Outcome::Success(Some(payload)) = self else {
            return false;
        };
        match action {
            Action::Read => {
                *attrs = payload.clone();
                true
            }
            Action::Create | Action::Update | Action::Patch => {
                for (key, value) in payload {
                    attrs.insert(key.clone(), value.clone());
                }
                !payload.is_empty()
            }
            Action::Delete => false,
        }
    }
}
