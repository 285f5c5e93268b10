//! # Rejection Payload
//!
//! The 409 body the identity server expects from a denying webhook:
//!
//! ```json
//! {
//!   "messages": [
//!     {
//!       "instance_ptr": "#/traits/email",
//!       "messages": [ { "id": 1377, "text": "Trait is read-only.", "type": "conflict" } ]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::check::Violation;

/// Message id identifying "read-only trait violated".
pub const READ_ONLY_MESSAGE_ID: i64 = 1377;

/// Human-readable text attached to every read-only violation.
pub const READ_ONLY_MESSAGE_TEXT: &str = "Trait is read-only.";

/// Message classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Conflict,
}

/// One message attached to an instance pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionMessage {
    pub id: i64,
    pub text: String,
    #[serde(rename = "type")]
    pub message_type: MessageType,
}

impl RejectionMessage {
    pub fn read_only() -> Self {
        Self {
            id: READ_ONLY_MESSAGE_ID,
            text: READ_ONLY_MESSAGE_TEXT.to_string(),
            message_type: MessageType::Conflict,
        }
    }
}

/// All messages for one trait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionContainer {
    pub instance_ptr: String,
    pub messages: Vec<RejectionMessage>,
}

/// Complete rejection body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionPayload {
    pub messages: Vec<RejectionContainer>,
}

impl RejectionPayload {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Group violations by instance pointer, preserving first-seen order.
pub fn format_rejection(violations: &[Violation]) -> RejectionPayload {
    let mut containers: Vec<RejectionContainer> = Vec::with_capacity(violations.len());
    for violation in violations {
        let message = RejectionMessage::read_only();
        match containers
            .iter_mut()
            .find(|c| c.instance_ptr == violation.instance_ptr)
        {
            Some(container) => container.messages.push(message),
            None => containers.push(RejectionContainer {
                instance_ptr: violation.instance_ptr.clone(),
                messages: vec![message],
            }),
        }
    }
    RejectionPayload {
        messages: containers,
    }
}
