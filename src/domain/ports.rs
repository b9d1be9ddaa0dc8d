use crate::domain::model::{Field, FieldValidation, FormData, Notification, NotificationId, SubmitReply};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// The page the controller is attached to: form controls, their feedback elements and the submit button.
pub trait FormView: Send + Sync {
    fn field_value(&self, field: Field) -> String;
    fn apply_validation(&self, field: Field, validation: &FieldValidation);
    fn set_loading(&self, loading: bool);
    fn is_loading(&self) -> bool;
    fn serialize_form(&self) -> FormData;
    /// Restores every control to its default value.
    fn reset_form(&self);
    fn password_visible(&self) -> bool;
    fn set_password_visible(&self, visible: bool);
}

/// Where notifications are rendered.
pub trait NotificationSurface: Send + Sync {
    fn clear_notifications(&self);
    fn mount_notification(&self, notification: &Notification);
    fn reveal_notification(&self, id: NotificationId);
    fn hide_notification(&self, id: NotificationId);
    fn remove_notification(&self, id: NotificationId);
}

#[async_trait]
pub trait FormSubmitter: Send + Sync {
    async fn submit(&self, data: &FormData) -> Result<SubmitReply>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub reset_delay: Duration,
    pub notification_reveal: Duration,
    pub notification_display: Duration,
    pub notification_fade: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            reset_delay: Duration::from_millis(2000),
            notification_reveal: Duration::from_millis(10),
            notification_display: Duration::from_millis(5000),
            notification_fade: Duration::from_millis(400),
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    /// Hidden controls serialized ahead of the user-editable fields.
    fn hidden_fields(&self) -> Vec<(String, String)>;
    fn timings(&self) -> Timings;
}
