//! Form Validation
//!
//! Checks run before a request is sent. Limits mirror the ones the service
//! enforces so obviously bad input never costs a round trip.

use crate::shared::error::SharedError;

pub const BOARD_TITLE_LIMITS: (usize, usize) = (3, 50);
pub const BOARD_DESCRIPTION_MAX: usize = 200;
pub const LIST_TITLE_LIMITS: (usize, usize) = (3, 50);
pub const CARD_TITLE_LIMITS: (usize, usize) = (3, 100);
pub const CARD_DESCRIPTION_MAX: usize = 500;
pub const CHECKLIST_TEXT_LIMITS: (usize, usize) = (1, 200);
pub const USERNAME_LIMITS: (usize, usize) = (3, 50);
pub const PASSWORD_MIN: usize = 8;

fn check_length(
    field: &str,
    label: &str,
    value: &str,
    (min, max): (usize, usize),
) -> Result<String, SharedError> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len == 0 {
        return Err(SharedError::validation(field, format!("{} is required", label)));
    }
    if len < min {
        return Err(SharedError::validation(
            field,
            format!("{} must be at least {} characters", label, min),
        ));
    }
    if len > max {
        return Err(SharedError::validation(
            field,
            format!("{} must be at most {} characters", label, max),
        ));
    }
    Ok(trimmed.to_string())
}

/// Blank descriptions become `None`
fn check_description(value: &str, max: usize) -> Result<Option<String>, SharedError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > max {
        return Err(SharedError::validation(
            "description",
            format!("Description must be at most {} characters", max),
        ));
    }
    Ok(Some(trimmed.to_string()))
}

/// Returns the trimmed title
pub fn board_title(title: &str) -> Result<String, SharedError> {
    check_length("title", "Title", title, BOARD_TITLE_LIMITS)
}

pub fn board_description(description: &str) -> Result<Option<String>, SharedError> {
    check_description(description, BOARD_DESCRIPTION_MAX)
}

pub fn list_title(title: &str) -> Result<String, SharedError> {
    check_length("title", "List title", title, LIST_TITLE_LIMITS)
}

pub fn card_title(title: &str) -> Result<String, SharedError> {
    check_length("title", "Card title", title, CARD_TITLE_LIMITS)
}

pub fn card_description(description: &str) -> Result<Option<String>, SharedError> {
    check_description(description, CARD_DESCRIPTION_MAX)
}

pub fn checklist_text(text: &str) -> Result<String, SharedError> {
    check_length("checklist", "Checklist item", text, CHECKLIST_TEXT_LIMITS)
}

pub fn email(email: &str) -> Result<String, SharedError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(SharedError::validation("email", "Email is required"));
    }
    let valid = trimmed
        .split_once('@')
        .map(|(local, domain)| {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        })
        .unwrap_or(false);
    if !valid {
        return Err(SharedError::validation("email", "Invalid email format"));
    }
    Ok(trimmed.to_string())
}

pub fn username(username: &str) -> Result<String, SharedError> {
    check_length("username", "Username", username, USERNAME_LIMITS)
}

/// Password policy for new accounts
pub fn new_password(password: &str, confirmation: &str) -> Result<(), SharedError> {
    if password.chars().count() < PASSWORD_MIN {
        return Err(SharedError::validation(
            "password",
            format!("Password must be at least {} characters", PASSWORD_MIN),
        ));
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        return Err(SharedError::validation(
            "password",
            "Password must contain at least one uppercase letter",
        ));
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        return Err(SharedError::validation(
            "password",
            "Password must contain at least one lowercase letter",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(SharedError::validation(
            "password",
            "Password must contain at least one number",
        ));
    }
    if password != confirmation {
        return Err(SharedError::validation("confirm_password", "Passwords do not match"));
    }
    Ok(())
}

/// Login only needs both fields present
pub fn login(email: &str, password: &str) -> Result<(), SharedError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(SharedError::validation("email", "Email and password are required"));
    }
    Ok(())
}
