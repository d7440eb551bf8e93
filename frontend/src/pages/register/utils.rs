use crate::api::{ApiError, Credentials, Role, SignUpProfile};
use crate::pages::login::utils::{validate_email, validate_password};

#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationRequest {
    pub credentials: Credentials,
    pub profile: SignUpProfile,
}

/// Role choices offered by the form, as `(value, label)` pairs.
pub fn role_options() -> Vec<(&'static str, &'static str)> {
    Role::ALL.iter().map(|r| (r.as_str(), r.label())).collect()
}

pub fn prepare_registration(
    name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> Result<RegistrationRequest, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::validation("Name is required"));
    }
    let email = validate_email(email)?;
    validate_password(password)?;
    if role.trim().is_empty() {
        return Err(ApiError::validation("Please select a role"));
    }
    let role: Role = role
        .parse()
        .map_err(|_| ApiError::validation(format!("Unknown role: {role}")))?;

    Ok(RegistrationRequest {
        credentials: Credentials {
            email,
            password: password.to_string(),
        },
        profile: SignUpProfile {
            name: name.to_string(),
            role,
        },
    })
}
