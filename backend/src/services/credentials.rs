//! Account input rules: phone number, email and password checks.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::FieldErrors;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_EMAIL_LENGTH: usize = 254;

/// 10 digits, leading 7, 8 or 9.
static PHONE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[789]\d{9}$").expect("Invalid regex"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@([a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}$",
    )
    .expect("Invalid regex")
});

pub fn is_valid_phone_number(phone_number: &str) -> bool {
    PHONE_NUMBER_RE.is_match(phone_number)
}

pub fn is_valid_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LENGTH && EMAIL_RE.is_match(email)
}

/// Every rule `password` breaks; empty when it is acceptable.
pub fn password_problems(password: &str) -> Vec<&'static str> {
    let mut problems = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        problems.push("Password must be at least 8 characters long.");
    }
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_letter = password.chars().any(char::is_alphabetic);
    if !has_digit || !has_letter {
        problems.push("Password must be alphanumeric (contains both letters and digits).");
    }
    problems
}

/// Raw registration input, before validation.
#[derive(Debug, Clone, Default)]
pub struct RegistrationInput {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Registration input that passed every format rule. Uniqueness of the phone
/// number is checked against the database separately.
#[derive(Debug, Clone)]
pub struct ValidRegistration {
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub password: String,
}

/// Checks every field and reports all failures together.
pub fn validate_registration(input: RegistrationInput) -> Result<ValidRegistration, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = input.name.map(|n| n.trim().to_string()).unwrap_or_default();
    if name.is_empty() {
        errors.add("name", "This field is required.");
    } else if name.chars().count() > MAX_NAME_LENGTH {
        errors.add("name", "Ensure this field has no more than 100 characters.");
    }

    let phone_number = input.phone_number.map(|p| p.trim().to_string()).unwrap_or_default();
    if phone_number.is_empty() {
        errors.add("phone_number", "This field is required.");
    } else if !is_valid_phone_number(&phone_number) {
        errors.add(
            "phone_number",
            "The phone number must be a valid 10-digit number starting with 7, 8 or 9.",
        );
    }

    let email = input
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty());
    if let Some(email) = &email {
        if !is_valid_email(email) {
            errors.add("email", "Enter a valid email address.");
        }
    }

    let password = input.password.unwrap_or_default();
    if password.is_empty() {
        errors.add("password", "Password is required.");
    } else {
        for problem in password_problems(&password) {
            errors.add("password", problem);
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidRegistration {
        name,
        phone_number,
        email,
        password,
    })
}
