use super::utils::RegistrationRequest;
use crate::api::{ApiError, AuthUser, UserProfile, UserStatus};
use crate::state::auth::SessionStore;

/// Result of the two registration steps once the account exists.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationOutcome {
    Completed(UserProfile),
    /// The account was created but its profile row was not written.
    ProfileWriteFailed { user: AuthUser, error: ApiError },
}

pub fn profile_row(user: &AuthUser, request: &RegistrationRequest) -> UserProfile {
    UserProfile {
        id: user.id.clone(),
        name: Some(
            user.display_name()
                .unwrap_or(&request.profile.name)
                .to_string(),
        ),
        email: Some(
            user.email_address()
                .unwrap_or(&request.credentials.email)
                .to_string(),
        ),
        role: Some(user.role().unwrap_or(request.profile.role)),
        status: Some(UserStatus::Active),
        created_at: user.created_at,
    }
}

/// Creates the account, then its profile row. A failed sign-up is returned as
/// an error and no row is written.
pub async fn register(
    store: &SessionStore,
    request: RegistrationRequest,
) -> Result<RegistrationOutcome, ApiError> {
    let user = store
        .sign_up(request.credentials.clone(), request.profile.clone())
        .await?;
    let row = profile_row(&user, &request);
    match store.api().insert_user_profile(&row).await {
        Ok(()) => Ok(RegistrationOutcome::Completed(row)),
        Err(error) => {
            log::error!("Account {} created without profile row: {error}", user.id);
            Ok(RegistrationOutcome::ProfileWriteFailed { user, error })
        }
    }
}
