// src/leads/intake.rs
use crate::errors::ServerError;
use crate::leads::model::{BudgetRange, LeadDetails, NewLead, PropertyType};

/// Fallback message stored when a generic-site visitor leaves the field blank.
pub const DEFAULT_GENERIC_MESSAGE: &str = "Interested in learning more about LeadGen Pro";

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;
const MESSAGE_MAX: usize = 500;
const LOCATION_MAX: usize = 100;

/// Raw field values from the generic-site capture form.
#[derive(Debug, Default, Clone)]
pub struct GenericIntake {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub message: String,
}

/// Raw field values from the real-estate enquiry form.
#[derive(Debug, Default, Clone)]
pub struct RealEstateIntake {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub property_type: String,
    pub budget: String,
    pub preferred_location: String,
    pub message: String,
}

/// Validate a generic-site submission. Mirrors the client-side rules so a
/// request that skips the browser gets the same answers.
pub fn validate_generic(input: &GenericIntake) -> Result<NewLead, ServerError> {
    let full_name = normalize_name(&input.full_name)?;
    let email = normalize_email(&input.email)?;
    let phone = normalize_phone(&input.phone)?;
    let message = normalize_message(&input.message)?;

    let company = input.company.trim();
    let company = if company.is_empty() {
        None
    } else {
        Some(company.to_string())
    };

    let message = if message.is_empty() {
        DEFAULT_GENERIC_MESSAGE.to_string()
    } else {
        message
    };

    Ok(NewLead {
        full_name,
        email,
        phone,
        message,
        details: LeadDetails::Generic { company },
    })
}

/// Validate a real-estate enquiry. Property type and budget are required
/// selects; preferred location is free text.
pub fn validate_real_estate(input: &RealEstateIntake) -> Result<NewLead, ServerError> {
    let full_name = normalize_name(&input.full_name)?;
    let email = normalize_email(&input.email)?;
    let phone = normalize_phone(&input.phone)?;
    let message = normalize_message(&input.message)?;

    let property_type = match input.property_type.trim() {
        "" => return Err(ServerError::BadRequest("Please select a property type".into())),
        code => PropertyType::from_str(code)
            .ok_or_else(|| ServerError::BadRequest("Please select a valid property type".into()))?,
    };

    let budget = match input.budget.trim() {
        "" => return Err(ServerError::BadRequest("Please select a budget range".into())),
        code => BudgetRange::from_str(code)
            .ok_or_else(|| ServerError::BadRequest("Please select a valid budget range".into()))?,
    };

    let location = input.preferred_location.trim();
    if location.chars().count() > LOCATION_MAX {
        return Err(ServerError::BadRequest(
            "Preferred location is too long".into(),
        ));
    }
    let preferred_location = if location.is_empty() {
        None
    } else {
        Some(location.to_string())
    };

    Ok(NewLead {
        full_name,
        email,
        phone,
        message,
        details: LeadDetails::RealEstate {
            property_type: Some(property_type),
            budget: Some(budget),
            preferred_location,
        },
    })
}

/// Trim + length + letters/spaces only.
fn normalize_name(name: &str) -> Result<String, ServerError> {
    let n = name.trim();
    if n.is_empty() {
        return Err(ServerError::BadRequest("Full name is required".into()));
    }
    let count = n.chars().count();
    if count < NAME_MIN {
        return Err(ServerError::BadRequest(
            "Name must be at least 2 characters".into(),
        ));
    }
    if count > NAME_MAX {
        return Err(ServerError::BadRequest(
            "Name must not exceed 50 characters".into(),
        ));
    }
    if !n.chars().all(|c| c.is_alphabetic() || c == ' ') {
        return Err(ServerError::BadRequest(
            "Name should only contain letters and spaces".into(),
        ));
    }
    Ok(n.to_string())
}

/// Trim + lowercase, minimal shape check: non-empty local part, a domain
/// with at least one dot, no whitespace.
fn normalize_email(email: &str) -> Result<String, ServerError> {
    let e = email.trim().to_lowercase();
    if e.is_empty() {
        return Err(ServerError::BadRequest("Email is required".into()));
    }
    let valid = match e.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !e.contains(char::is_whitespace)
                && !domain.contains('@')
        }
        None => false,
    };
    if !valid {
        return Err(ServerError::BadRequest(
            "Please enter a valid email address".into(),
        ));
    }
    Ok(e)
}

/// Accepts the usual separators, requires 10-15 digits underneath.
fn normalize_phone(phone: &str) -> Result<String, ServerError> {
    let p = phone.trim();
    if p.is_empty() {
        return Err(ServerError::BadRequest("Phone number is required".into()));
    }
    let digits: String = p
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.' | '+'))
        .collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ServerError::BadRequest(
            "Please enter a valid phone number".into(),
        ));
    }
    if digits.len() < 10 || digits.len() > 15 {
        return Err(ServerError::BadRequest(
            "Please enter a valid phone number".into(),
        ));
    }
    Ok(p.to_string())
}

fn normalize_message(message: &str) -> Result<String, ServerError> {
    let m = message.trim();
    if m.chars().count() > MESSAGE_MAX {
        return Err(ServerError::BadRequest(
            "Message must not exceed 500 characters".into(),
        ));
    }
    Ok(m.to_string())
}
