use crate::api::{ApiError, Credentials};

pub const MIN_PASSWORD_LENGTH: usize = 8;

pub fn validate_email(raw: &str) -> Result<String, ApiError> {
    let email = raw.trim();
    if email.is_empty() {
        return Err(ApiError::validation("Email is required"));
    }
    let mut parts = email.split('@');
    let valid = matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty()
    );
    if !valid {
        return Err(ApiError::validation("Please enter a valid email address"));
    }
    Ok(email.to_string())
}

pub fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_credentials(email: &str, password: &str) -> Result<Credentials, ApiError> {
    let email = validate_email(email)?;
    validate_password(password)?;
    Ok(Credentials {
        email,
        password: password.to_string(),
    })
}
