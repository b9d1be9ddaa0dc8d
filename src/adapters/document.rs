use crate::domain::model::{Field, FieldValidation, FormData, Notification, NotificationId};
use crate::domain::ports::{FormView, NotificationSurface};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

pub const FORM_ID: &str = "loginForm";
pub const LOGIN_BUTTON_ID: &str = "loginButton";
pub const TOGGLE_PASSWORD_ID: &str = "togglePassword";
pub const TOGGLE_ICON_ID: &str = "togglePasswordIcon";

const VALIDATION_CLASSES: [&str; 2] = ["validation-valid", "validation-invalid"];
const INPUT_CLASSES: [&str; 2] = ["input-valid", "input-invalid"];

#[derive(Debug, Clone, Default)]
struct Element {
    classes: BTreeSet<String>,
    text: String,
    name: Option<String>,
    value: String,
    default_value: String,
    input_type: Option<String>,
    disabled: bool,
}

impl Element {
    fn input(name: &str, input_type: &str, default_value: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            value: default_value.to_string(),
            default_value: default_value.to_string(),
            input_type: Some(input_type.to_string()),
            ..Self::default()
        }
    }

    fn with_classes(classes: &[&str]) -> Self {
        Self {
            classes: classes.iter().map(|c| c.to_string()).collect(),
            ..Self::default()
        }
    }

    fn remove_classes(&mut self, classes: &[&str]) {
        for class in classes {
            self.classes.remove(*class);
        }
    }

    fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }
}

#[derive(Debug, Default)]
struct DocumentState {
    elements: HashMap<String, Element>,
    /// Ids of the form's controls in document order.
    controls: Vec<String>,
    /// Notification element ids appended to the body, oldest first.
    body: Vec<String>,
}

impl DocumentState {
    fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }
}

/// Headless model of the login page: element ids, CSS classes, text content and form control values.
#[derive(Debug)]
pub struct InMemoryDocument {
    state: Mutex<DocumentState>,
}

impl InMemoryDocument {
    /// Builds the page with the given hidden controls placed ahead of email and password.
    pub fn new(hidden_fields: Vec<(String, String)>) -> Self {
        let mut state = DocumentState::default();

        for (index, (name, value)) in hidden_fields.iter().enumerate() {
            let id = format!("hidden-{}", index);
            state
                .elements
                .insert(id.clone(), Element::input(name, "hidden", value));
            state.controls.push(id);
        }

        for (field, input_type) in [(Field::Email, "email"), (Field::Password, "password")] {
            state.elements.insert(
                field.input_id().to_string(),
                Element::input(field.name(), input_type, ""),
            );
            state.controls.push(field.input_id().to_string());
            state
                .elements
                .insert(field.message_id().to_string(), Element::default());
        }

        state
            .elements
            .insert(FORM_ID.to_string(), Element::default());
        state
            .elements
            .insert(LOGIN_BUTTON_ID.to_string(), Element::default());
        state
            .elements
            .insert(TOGGLE_PASSWORD_ID.to_string(), Element::default());
        state
            .elements
            .insert(TOGGLE_ICON_ID.to_string(), Element::with_classes(&["fa", "fa-eye"]));

        Self {
            state: Mutex::new(state),
        }
    }

    /// Sets the value of a user-editable control, as typing would.
    pub fn type_into(&self, field: Field, value: &str) {
        let mut state = self.lock();
        if let Some(element) = state.element_mut(field.input_id()) {
            element.value = value.to_string();
        }
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.lock()
            .element(id)
            .map(|e| e.classes.contains(class))
            .unwrap_or(false)
    }

    pub fn classes(&self, id: &str) -> Vec<String> {
        self.lock()
            .element(id)
            .map(|e| e.classes.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn text(&self, id: &str) -> String {
        self.lock()
            .element(id)
            .map(|e| e.text.clone())
            .unwrap_or_default()
    }

    pub fn input_type(&self, id: &str) -> String {
        self.lock()
            .element(id)
            .and_then(|e| e.input_type.clone())
            .unwrap_or_default()
    }

    pub fn is_disabled(&self, id: &str) -> bool {
        self.lock().element(id).map(|e| e.disabled).unwrap_or(false)
    }

    /// Texts of the notifications currently attached to the body.
    pub fn notification_messages(&self) -> Vec<String> {
        let state = self.lock();
        state
            .body
            .iter()
            .filter_map(|id| state.element(id))
            .map(|e| e.text.clone())
            .collect()
    }

    /// Texts of the attached notifications that carry the `show` class.
    pub fn visible_notifications(&self) -> Vec<String> {
        let state = self.lock();
        state
            .body
            .iter()
            .filter_map(|id| state.element(id))
            .filter(|e| e.classes.contains("show"))
            .map(|e| e.text.clone())
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, DocumentState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn notification_element_id(id: NotificationId) -> String {
        format!("notification-{}", id)
    }
}

impl FormView for InMemoryDocument {
    fn field_value(&self, field: Field) -> String {
        self.lock()
            .element(field.input_id())
            .map(|e| e.value.clone())
            .unwrap_or_default()
    }

    fn apply_validation(&self, field: Field, validation: &FieldValidation) {
        let mut state = self.lock();

        if let Some(input) = state.element_mut(field.input_id()) {
            input.remove_classes(&INPUT_CLASSES);
            if let Some(class) = validation.state.input_class() {
                input.add_class(class);
            }
        }

        if let Some(message) = state.element_mut(field.message_id()) {
            message.remove_classes(&VALIDATION_CLASSES);
            if let Some(class) = validation.state.message_class() {
                message.add_class(class);
            }
            message.text = validation.message.to_string();
        }
    }

    fn set_loading(&self, loading: bool) {
        let mut state = self.lock();
        if let Some(button) = state.element_mut(LOGIN_BUTTON_ID) {
            if loading {
                button.add_class("loading");
            } else {
                button.remove_classes(&["loading"]);
            }
            button.disabled = loading;
        }
    }

    fn is_loading(&self) -> bool {
        self.lock()
            .element(LOGIN_BUTTON_ID)
            .map(|b| b.disabled || b.classes.contains("loading"))
            .unwrap_or(false)
    }

    fn serialize_form(&self) -> FormData {
        let state = self.lock();
        let mut data = FormData::new();
        for element in state.controls.iter().filter_map(|id| state.element(id)) {
            if element.disabled {
                continue;
            }
            if let Some(name) = &element.name {
                data.append(name.clone(), element.value.clone());
            }
        }
        data
    }

    fn reset_form(&self) {
        let mut state = self.lock();
        let controls = state.controls.clone();
        for id in controls {
            if let Some(element) = state.element_mut(&id) {
                element.value = element.default_value.clone();
            }
        }
    }

    fn password_visible(&self) -> bool {
        self.input_type(Field::Password.input_id()) == "text"
    }

    fn set_password_visible(&self, visible: bool) {
        let mut state = self.lock();
        if let Some(input) = state.element_mut(Field::Password.input_id()) {
            input.input_type = Some(if visible { "text" } else { "password" }.to_string());
        }
        if let Some(icon) = state.element_mut(TOGGLE_ICON_ID) {
            icon.remove_classes(&["fa-eye", "fa-eye-slash"]);
            icon.add_class(if visible { "fa-eye-slash" } else { "fa-eye" });
        }
    }
}

impl NotificationSurface for InMemoryDocument {
    fn clear_notifications(&self) {
        let mut state = self.lock();
        let attached = std::mem::take(&mut state.body);
        for id in attached {
            state.elements.remove(&id);
        }
    }

    fn mount_notification(&self, notification: &Notification) {
        let id = Self::notification_element_id(notification.id);
        let mut element = Element::with_classes(&["notification", notification.kind.class_name()]);
        element.text = notification.message.clone();

        let mut state = self.lock();
        state.elements.insert(id.clone(), element);
        state.body.push(id);
    }

    fn reveal_notification(&self, id: NotificationId) {
        if let Some(element) = self.lock().element_mut(&Self::notification_element_id(id)) {
            element.add_class("show");
        }
    }

    fn hide_notification(&self, id: NotificationId) {
        if let Some(element) = self.lock().element_mut(&Self::notification_element_id(id)) {
            element.remove_classes(&["show"]);
        }
    }

    fn remove_notification(&self, id: NotificationId) {
        let element_id = Self::notification_element_id(id);
        let mut state = self.lock();
        state.body.retain(|attached| *attached != element_id);
        state.elements.remove(&element_id);
    }
}
