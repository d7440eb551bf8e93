use reqwest::Method;

use super::{
    client::{clear_session, load_session, persist_session, with_expiry, ApiClient, Service},
    types::{
        ApiError, AuthSession, AuthUser, Credentials, RefreshRequest, SignUpProfile,
        SignUpRequest, SignUpResponse,
    },
};

impl ApiClient {
    pub async fn sign_up(
        &self,
        credentials: Credentials,
        profile: SignUpProfile,
    ) -> Result<(AuthUser, Option<AuthSession>), ApiError> {
        let request = SignUpRequest {
            email: credentials.email,
            password: credentials.password,
            data: profile,
        };
        let builder = self
            .auth_request(Method::POST, "/signup", None)
            .await?
            .json(&request);
        let response: SignUpResponse = Self::send_json(builder, Service::Auth).await?;
        let (user, session) = response.into_parts();
        let session = session.map(with_expiry);
        if let Some(session) = &session {
            persist_session(session)?;
        }
        Ok((user, session))
    }

    pub async fn sign_in_with_password(
        &self,
        credentials: Credentials,
    ) -> Result<AuthSession, ApiError> {
        let builder = self
            .auth_request(Method::POST, "/token", None)
            .await?
            .query(&[("grant_type", "password")])
            .json(&credentials);
        let session: AuthSession = Self::send_json(builder, Service::Auth).await?;
        let session = with_expiry(session);
        persist_session(&session)?;
        Ok(session)
    }

    pub async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, ApiError> {
        let builder = self
            .auth_request(Method::POST, "/token", None)
            .await?
            .query(&[("grant_type", "refresh_token")])
            .json(&RefreshRequest {
                refresh_token: refresh_token.to_string(),
            });
        let session: AuthSession = Self::send_json(builder, Service::Auth).await?;
        let session = with_expiry(session);
        persist_session(&session)?;
        Ok(session)
    }

    pub async fn get_user(&self, access_token: &str) -> Result<AuthUser, ApiError> {
        let builder = self
            .auth_request(Method::GET, "/user", Some(access_token))
            .await?;
        Self::send_json(builder, Service::Auth).await
    }

    /// Revokes the stored session at the provider. The local copy is cleared
    /// whatever the provider answers.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        let Some(session) = load_session() else {
            return Ok(());
        };
        let result = match self
            .auth_request(Method::POST, "/logout", Some(&session.access_token))
            .await
        {
            Ok(builder) => Self::send_empty(builder, Service::Auth).await,
            Err(err) => Err(err),
        };
        clear_session();
        result
    }
}
