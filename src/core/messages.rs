// User-facing strings. The page is German-only.

pub const EMAIL_VALID: &str = "E-Mail-Adresse ist gültig";
pub const EMAIL_INVALID: &str = "Bitte geben Sie eine gültige E-Mail-Adresse ein";
pub const EMAIL_REQUIRED: &str = "E-Mail-Adresse ist erforderlich";

pub const PASSWORD_VALID: &str = "Passwort ist sicher";
pub const PASSWORD_TOO_SHORT: &str = "Passwort muss mindestens 6 Zeichen lang sein";
pub const PASSWORD_REQUIRED: &str = "Passwort ist erforderlich";

pub const CHECK_INPUT: &str = "Bitte überprüfen Sie Ihre Eingaben";
pub const SUBMIT_SUCCESS: &str = "Anmeldung erfolgreich! Daten wurden übermittelt.";
pub const SUBMIT_FAILED_PREFIX: &str = "Fehler bei der Übermittlung: ";
pub const UNKNOWN_ERROR: &str = "Unbekannter Fehler";
pub const NETWORK_ERROR_PREFIX: &str = "Netzwerkfehler: ";
