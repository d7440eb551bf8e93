use reqwest::Method;

use super::{
    client::{ApiClient, Service},
    types::{ApiError, StatusUpdate, UserProfile, UserStatus},
};

const USERS_TABLE: &str = "users";

impl ApiClient {
    pub async fn list_users(&self) -> Result<Vec<UserProfile>, ApiError> {
        let builder = self
            .rest_request(Method::GET, USERS_TABLE)
            .await?
            .query(&[("select", "*")]);
        Self::send_json(builder, Service::Rest).await
    }

    pub async fn insert_user_profile(&self, profile: &UserProfile) -> Result<(), ApiError> {
        let builder = self
            .rest_request(Method::POST, USERS_TABLE)
            .await?
            .header("Prefer", "return=minimal")
            .json(profile);
        Self::send_empty(builder, Service::Rest).await
    }

    pub async fn update_user_status(
        &self,
        user_id: &str,
        status: UserStatus,
    ) -> Result<(), ApiError> {
        let builder = self
            .rest_request(Method::PATCH, USERS_TABLE)
            .await?
            .query(&[("id", format!("eq.{}", user_id))])
            .header("Prefer", "return=minimal")
            .json(&StatusUpdate { status });
        Self::send_empty(builder, Service::Rest).await
    }
}
