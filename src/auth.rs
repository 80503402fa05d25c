//! Credential form checks run before a login or registration is attempted.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("valid phone regex"));

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    FullName,
    Email,
    Phone,
    Password,
    ConfirmPassword,
    Terms,
}

/// Field → message, empty when the form is good to submit.
pub type FieldErrors = BTreeMap<Field, &'static str>;

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub accept_terms: bool,
}

pub fn validate_login(email: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Some(msg) = email_error(email) {
        errors.insert(Field::Email, msg);
    }
    if password.is_empty() {
        errors.insert(Field::Password, "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(Field::Password, "Password must be at least 6 characters");
    }
    errors
}

pub fn validate_registration(form: &RegistrationForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if form.full_name.trim().is_empty() {
        errors.insert(Field::FullName, "Full Name is required");
    }
    if let Some(msg) = email_error(&form.email) {
        errors.insert(Field::Email, msg);
    }

    // optional, but must look like a number when given
    if !form.phone.trim().is_empty() {
        let compact: String = form
            .phone
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
            .collect();
        if !PHONE_RE.is_match(&compact) {
            errors.insert(Field::Phone, "Please enter a valid phone number");
        }
    }

    if form.password.is_empty() {
        errors.insert(Field::Password, "Password is required");
    } else if form.password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(Field::Password, "Password must be at least 6 characters");
    } else if !is_mixed(&form.password) {
        errors.insert(
            Field::Password,
            "Password must contain uppercase, lowercase and numbers",
        );
    }

    if form.confirm_password.is_empty() {
        errors.insert(Field::ConfirmPassword, "Please confirm your password");
    } else if form.password != form.confirm_password {
        errors.insert(Field::ConfirmPassword, "Passwords do not match");
    }

    if !form.accept_terms {
        errors.insert(Field::Terms, "You must accept the Terms & Conditions");
    }

    errors
}

fn email_error(email: &str) -> Option<&'static str> {
    if email.trim().is_empty() {
        Some("Email is required")
    } else if !EMAIL_RE.is_match(email) {
        Some("Please enter a valid email")
    } else {
        None
    }
}

fn is_mixed(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}
