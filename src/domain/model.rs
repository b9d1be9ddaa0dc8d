use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The two user-editable controls of the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Email,
    Password,
}

impl Field {
    /// Form control name, also the key used when serializing the form.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Password => "password",
        }
    }

    pub fn input_id(&self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Password => "password",
        }
    }

    pub fn message_id(&self) -> &'static str {
        match self {
            Field::Email => "emailValidation",
            Field::Password => "passwordValidation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
    Neutral,
    Valid,
    Invalid,
}

impl ValidationState {
    pub fn input_class(&self) -> Option<&'static str> {
        match self {
            ValidationState::Neutral => None,
            ValidationState::Valid => Some("input-valid"),
            ValidationState::Invalid => Some("input-invalid"),
        }
    }

    pub fn message_class(&self) -> Option<&'static str> {
        match self {
            ValidationState::Neutral => None,
            ValidationState::Valid => Some("validation-valid"),
            ValidationState::Invalid => Some("validation-invalid"),
        }
    }
}

/// Result of checking one field: the visual state plus the text shown under the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidation {
    pub state: ValidationState,
    pub message: &'static str,
}

impl FieldValidation {
    pub fn neutral() -> Self {
        Self {
            state: ValidationState::Neutral,
            message: "",
        }
    }

    pub fn valid(message: &'static str) -> Self {
        Self {
            state: ValidationState::Valid,
            message,
        }
    }

    pub fn invalid(message: &'static str) -> Self {
        Self {
            state: ValidationState::Invalid,
            message,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.state == ValidationState::Valid
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn class_name(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }
}

pub type NotificationId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Time elapsed since the notification was created, as of `now`.
    pub fn age_at(&self, now: DateTime<Utc>) -> chrono::Duration {
        now.signed_duration_since(self.created_at)
    }
}

/// Serialized form controls in document order, as `application/x-www-form-urlencoded` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Body returned by the forms API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// What the submitter observed: HTTP status class plus the decoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReply {
    pub http_ok: bool,
    pub body: SubmitResponse,
}

impl SubmitReply {
    pub fn is_success(&self) -> bool {
        self.http_ok && self.body.success
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// A submission was already in flight; the event was ignored.
    Busy,
    /// Client-side validation failed, nothing was sent.
    Rejected,
    Accepted { message: Option<String> },
    Failed { message: String },
    NetworkError { message: String },
}

impl SubmissionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionOutcome::Accepted { .. })
    }
}
