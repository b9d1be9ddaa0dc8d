pub mod controller;
pub mod messages;
pub mod notification;
pub mod validator;

pub use crate::domain::model::{
    Field, FieldValidation, FormData, Notification, NotificationKind, SubmissionOutcome,
    SubmitReply, SubmitResponse, ValidationState,
};
pub use crate::domain::ports::{
    ConfigProvider, FormSubmitter, FormView, NotificationSurface, Timings,
};
pub use crate::utils::error::Result;
