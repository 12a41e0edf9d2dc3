use crate::error::{FormField, MIN_PASSWORD_LEN, ValidationError};

use super::Registration;

fn required<'a>(value: &'a str, field: FormField) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Missing(field))
    } else {
        Ok(trimmed)
    }
}

/// Checks the login form. Returns the trimmed email.
pub fn validate_login(email: &str, password: &str) -> Result<String, ValidationError> {
    let email = required(email, FormField::Email)?;
    if password.is_empty() {
        return Err(ValidationError::Missing(FormField::Password));
    }
    Ok(email.to_string())
}

/// Checks the registration form. Returns the trimmed name and email.
pub fn validate_registration(form: &Registration) -> Result<(String, String), ValidationError> {
    let name = required(&form.name, FormField::Name)?;
    let email = required(&form.email, FormField::Email)?;
    if form.password.is_empty() {
        return Err(ValidationError::Missing(FormField::Password));
    }
    if let Some(confirm) = &form.confirm_password {
        if *confirm != form.password {
            return Err(ValidationError::PasswordMismatch);
        }
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok((name.to_string(), email.to_string()))
}
