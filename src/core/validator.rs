use crate::core::messages;
use crate::domain::model::FieldValidation;
use regex::Regex;
use std::sync::LazyLock;

pub const MIN_PASSWORD_LENGTH: usize = 6;

// U+FEFF is excluded alongside `\s`, as browsers treat it as whitespace.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$")
        .expect("email pattern is a valid regex")
});

/// Checks an already-trimmed address against the permissive `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Length is counted in UTF-16 code units, so a character outside the BMP counts twice.
pub fn is_valid_password(password: &str) -> bool {
    password.encode_utf16().count() >= MIN_PASSWORD_LENGTH
}

/// Whitespace as browsers trim it: Unicode whitespace plus the byte order mark.
fn is_form_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Validation while typing: an empty field is left neutral.
pub fn validate_email_input(raw: &str) -> FieldValidation {
    let email = raw.trim_matches(is_form_whitespace);
    if email.is_empty() {
        return FieldValidation::neutral();
    }
    email_verdict(email)
}

pub fn validate_password_input(password: &str) -> FieldValidation {
    if password.is_empty() {
        return FieldValidation::neutral();
    }
    password_verdict(password)
}

/// Validation on submit: an empty field is an error.
pub fn validate_email_submit(raw: &str) -> FieldValidation {
    let email = raw.trim_matches(is_form_whitespace);
    if email.is_empty() {
        return FieldValidation::invalid(messages::EMAIL_REQUIRED);
    }
    email_verdict(email)
}

pub fn validate_password_submit(password: &str) -> FieldValidation {
    if password.is_empty() {
        return FieldValidation::invalid(messages::PASSWORD_REQUIRED);
    }
    password_verdict(password)
}

fn email_verdict(email: &str) -> FieldValidation {
    if is_valid_email(email) {
        FieldValidation::valid(messages::EMAIL_VALID)
    } else {
        FieldValidation::invalid(messages::EMAIL_INVALID)
    }
}

fn password_verdict(password: &str) -> FieldValidation {
    if is_valid_password(password) {
        FieldValidation::valid(messages::PASSWORD_VALID)
    } else {
        FieldValidation::invalid(messages::PASSWORD_TOO_SHORT)
    }
}
