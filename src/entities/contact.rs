// ✉️ Contact Submission Entity
//
// Inquiries left through the contact form. Two states only:
//   unread → read
// The transition happens through `mark_read`; nothing reverts it.

use crate::schema::{FieldReader, ValidationErrors};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// What the visitor is interested in (buying, selling, ...)
    pub interest: Option<String>,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
    pub is_read: bool,
}

impl ContactSubmission {
    pub(crate) fn from_new(id: u32, new: NewContactSubmission, submitted_at: DateTime<Utc>) -> Self {
        ContactSubmission {
            id,
            name: new.name,
            email: new.email,
            phone: new.phone,
            interest: new.interest,
            message: new.message,
            submitted_at,
            is_read: false,
        }
    }

    /// Idempotent
    pub fn mark_read(&mut self) {
        self.is_read = true;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub interest: Option<String>,
    pub message: String,
}

impl NewContactSubmission {
    pub fn from_json(input: &Value) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(input);
        let submission = NewContactSubmission {
            name: reader.required_text("name"),
            email: reader.required_text("email"),
            phone: reader.required_text("phone"),
            interest: reader.nullable_text("interest").flatten(),
            message: reader.required_text("message"),
        };

        if !submission.email.is_empty() {
            reader.check("email", submission.email.contains('@'), "Invalid email");
        }

        reader.finish(submission)
    }
}
