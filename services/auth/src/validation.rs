//! Profile input validation

use common::models::{ContactPreference, NewProfile, UpdateProfile};
use regex::Regex;
use std::sync::OnceLock;

pub const DISPLAY_NAME_MAX_CHARS: usize = 50;

/// Validate display name
pub fn validate_display_name(display_name: &str) -> Result<(), String> {
    let trimmed = display_name.trim();

    if trimmed.is_empty() {
        return Err("Display name is required".to_string());
    }

    if trimmed.chars().count() > DISPLAY_NAME_MAX_CHARS {
        return Err(format!(
            "Display name must be at most {} characters long",
            DISPLAY_NAME_MAX_CHARS
        ));
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate phone number: 7 to 15 digits, optional leading `+`, with spaces,
/// dashes or parentheses as separators
pub fn validate_phone(phone: &str) -> Result<(), String> {
    static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = PHONE_REGEX.get_or_init(|| {
        Regex::new(r"^\+?[0-9 ()-]+$").expect("Failed to compile phone regex")
    });

    if !regex.is_match(phone) {
        return Err(
            "Phone number can only contain digits, spaces, dashes and parentheses".to_string(),
        );
    }

    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if !(7..=15).contains(&digits) {
        return Err("Phone number must have between 7 and 15 digits".to_string());
    }

    Ok(())
}

/// Validate contact info against the way the user wants to be reached
pub fn validate_contact_info(preference: ContactPreference, info: &str) -> Result<(), String> {
    let info = info.trim();
    if info.is_empty() {
        return Ok(());
    }

    if preference.is_phone_based() {
        validate_phone(info)
    } else {
        validate_email(info)
    }
}

/// Validate a new profile
pub fn validate_new_profile(profile: &NewProfile) -> Result<(), String> {
    validate_display_name(&profile.display_name)?;

    if let Some(info) = &profile.contact_info {
        validate_contact_info(profile.contact_preference, info)?;
    }

    Ok(())
}

/// Validate a profile update. Contact info is checked against the new
/// preference if one is given, otherwise against `current_preference`.
pub fn validate_update(
    changes: &UpdateProfile,
    current_preference: Option<ContactPreference>,
) -> Result<(), String> {
    if let Some(display_name) = &changes.display_name {
        validate_display_name(display_name)?;
    }

    if let (Some(info), Some(preference)) = (
        &changes.contact_info,
        changes.contact_preference.or(current_preference),
    ) {
        validate_contact_info(preference, info)?;
    }

    Ok(())
}
