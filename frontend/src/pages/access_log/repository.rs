use crate::api::{AccessAction, ApiClient, ApiError, NewAccessLog};

/// Appends one row; the backend stamps the time.
pub async fn log_access(api: &ApiClient, user_id: &str, action: AccessAction) -> Result<(), ApiError> {
    api.insert_access_log(&NewAccessLog {
        user_id: user_id.to_string(),
        action,
    })
    .await
}
