use crate::api::{AccessLogEntry, ApiClient, ApiError, StatusAction, UserProfile};
use std::rc::Rc;

#[derive(Clone)]
pub struct AdminRepository {
    client: Rc<ApiClient>,
}

impl Default for AdminRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminRepository {
    pub fn new() -> Self {
        Self::new_with_client(Rc::new(ApiClient::new()))
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn fetch_logs(&self) -> Result<Vec<AccessLogEntry>, ApiError> {
        self.client.list_access_logs().await
    }

    pub async fn fetch_users(&self) -> Result<Vec<UserProfile>, ApiError> {
        self.client.list_users().await
    }

    pub async fn change_status(&self, user_id: &str, action: StatusAction) -> Result<(), ApiError> {
        self.client
            .update_user_status(user_id, action.target_status())
            .await
    }
}
