//! Client-side form validation for the auth screens.
//!
//! Validation runs before any API call; the messages here are shown under the
//! offending field.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use crate::net::types::{Role, SignupProfile};

pub const MIN_PASSWORD_LEN: usize = 6;

/// `local@domain.tld` with no whitespace anywhere.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    email.match_indices('@').any(|(at, _)| {
        let domain = &email[at + 1..];
        at > 0
            && domain
                .char_indices()
                .any(|(dot, c)| c == '.' && dot > 0 && dot + 1 < domain.len())
    })
}

fn email_error(email: &str) -> Option<&'static str> {
    if email.is_empty() {
        Some("Email is required")
    } else if !is_valid_email(email) {
        Some("Please enter a valid email")
    } else {
        None
    }
}

// =============================================================================
// LOGIN
// =============================================================================

/// Per-field login errors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginErrors {
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl LoginErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

/// Trimmed email and raw password when both pass.
///
/// # Errors
///
/// Returns the per-field messages when any field is invalid.
pub fn validate_login(email: &str, password: &str) -> Result<(String, String), LoginErrors> {
    let email = email.trim();
    let errors = LoginErrors {
        email: email_error(email),
        password: password.is_empty().then_some("Password is required"),
    };
    if errors.is_empty() { Ok((email.to_owned(), password.to_owned())) } else { Err(errors) }
}

// =============================================================================
// SIGNUP
// =============================================================================

/// Raw signup form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
    pub phone: String,
    pub specialization: String,
}

/// Per-field signup errors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupErrors {
    pub full_name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
    pub confirm_password: Option<&'static str>,
    pub specialization: Option<&'static str>,
}

impl SignupErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.confirm_password.is_none()
            && self.specialization.is_none()
    }
}

fn optional_field(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

/// Build the signup request body from a valid form.
///
/// Specialization is sent for doctors only.
///
/// # Errors
///
/// Returns the per-field messages when any field is invalid.
pub fn validate_signup(form: &SignupForm) -> Result<SignupProfile, SignupErrors> {
    let full_name = form.full_name.trim();
    let email = form.email.trim();
    let specialization = optional_field(&form.specialization);

    let password = if form.password.is_empty() {
        Some("Password is required")
    } else if form.password.chars().count() < MIN_PASSWORD_LEN {
        Some("Password must be at least 6 characters")
    } else {
        None
    };
    let errors = SignupErrors {
        full_name: full_name.is_empty().then_some("Full name is required"),
        email: email_error(email),
        password,
        confirm_password: (form.password != form.confirm_password).then_some("Passwords do not match"),
        specialization: (form.role == Role::Doctor && specialization.is_none())
            .then_some("Specialization is required for doctors"),
    };
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(SignupProfile {
        full_name: full_name.to_owned(),
        email: email.to_owned(),
        password: form.password.clone(),
        role: form.role,
        phone: optional_field(&form.phone),
        specialization: if form.role == Role::Doctor { specialization } else { None },
    })
}
