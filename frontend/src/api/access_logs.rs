use reqwest::Method;

use super::{
    client::{ApiClient, Service},
    types::{AccessLogEntry, ApiError, NewAccessLog},
};

const ACCESS_LOGS_TABLE: &str = "access_logs";

impl ApiClient {
    pub async fn list_access_logs(&self) -> Result<Vec<AccessLogEntry>, ApiError> {
        let builder = self
            .rest_request(Method::GET, ACCESS_LOGS_TABLE)
            .await?
            .query(&[("select", "*")]);
        Self::send_json(builder, Service::Rest).await
    }

    /// The row's timestamp is assigned by the store.
    pub async fn insert_access_log(&self, entry: &NewAccessLog) -> Result<(), ApiError> {
        let builder = self
            .rest_request(Method::POST, ACCESS_LOGS_TABLE)
            .await?
            .header("Prefer", "return=minimal")
            .json(entry);
        Self::send_empty(builder, Service::Rest).await
    }
}
