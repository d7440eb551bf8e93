#![cfg(not(coverage))]

use super::*;
use httpmock::prelude::*;
use httpmock::Method::PATCH;
use serde_json::json;

const ANON: &str = "anon-key";

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new_with_base_url(server.base_url(), ANON)
}

fn user_json(id: &str, role: &str) -> serde_json::Value {
    json!({
        "id": id,
        "email": "ada@lab.edu",
        "created_at": "2024-10-01T08:00:00Z",
        "user_metadata": { "name": "Ada", "role": role, "email": "ada@lab.edu" }
    })
}

fn session_json(id: &str, role: &str) -> serde_json::Value {
    json!({
        "access_token": "access-1",
        "refresh_token": "refresh-1",
        "expires_in": 3600,
        "token_type": "bearer",
        "user": user_json(id, role)
    })
}

fn credentials() -> Credentials {
    Credentials {
        email: "ada@lab.edu".into(),
        password: "correct-horse".into(),
    }
}

#[tokio::test]
async fn sign_in_with_password_persists_session() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/auth/v1/token")
                .query_param("grant_type", "password")
                .header("apikey", ANON)
                .json_body(json!({ "email": "ada@lab.edu", "password": "correct-horse" }));
            then.status(200).json_body(session_json("u1", "admin"));
        })
        .await;

    let session = client(&server)
        .sign_in_with_password(credentials())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(session.user.role(), Some(Role::Admin));
    assert!(session.expires_at.is_some());
    assert_eq!(load_session().map(|s| s.access_token), Some("access-1".into()));
}

#[tokio::test]
async fn sign_in_rejection_surfaces_provider_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/v1/token");
            then.status(400).json_body(json!({
                "error": "invalid_grant",
                "error_description": "Invalid login credentials"
            }));
        })
        .await;

    let err = client(&server)
        .sign_in_with_password(credentials())
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Auth);
    assert_eq!(err.user_message(), "Invalid login credentials");
    assert!(load_session().is_none());
}

#[tokio::test]
async fn sign_up_sends_profile_metadata() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/v1/signup").json_body(json!({
                "email": "ada@lab.edu",
                "password": "correct-horse",
                "data": { "name": "Ada", "role": "faculty" }
            }));
            then.status(200).json_body(session_json("u1", "faculty"));
        })
        .await;

    let (user, session) = client(&server)
        .sign_up(
            credentials(),
            SignUpProfile {
                name: "Ada".into(),
                role: Role::Faculty,
            },
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(user.id, "u1");
    assert!(session.is_some());
    assert!(load_session().is_some());
}

#[tokio::test]
async fn sign_up_without_session_leaves_storage_empty() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/v1/signup");
            then.status(200).json_body(user_json("u2", "student"));
        })
        .await;

    let (user, session) = client(&server)
        .sign_up(
            credentials(),
            SignUpProfile {
                name: "Ada".into(),
                role: Role::Student,
            },
        )
        .await
        .unwrap();

    assert_eq!(user.id, "u2");
    assert!(session.is_none());
    assert!(load_session().is_none());
}

#[tokio::test]
async fn refresh_session_uses_refresh_grant() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/auth/v1/token")
                .query_param("grant_type", "refresh_token")
                .json_body(json!({ "refresh_token": "refresh-0" }));
            then.status(200).json_body(session_json("u1", "staff"));
        })
        .await;

    let session = client(&server).refresh_session("refresh-0").await.unwrap();

    mock.assert_async().await;
    assert_eq!(session.refresh_token, "refresh-1");
}

#[tokio::test]
async fn get_user_sends_access_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/auth/v1/user")
                .header("authorization", "Bearer access-9");
            then.status(200).json_body(user_json("u1", "janitor"));
        })
        .await;

    let user = client(&server).get_user("access-9").await.unwrap();

    mock.assert_async().await;
    assert_eq!(user.role(), Some(Role::Janitor));
}

#[tokio::test]
async fn sign_out_clears_session_even_when_provider_fails() {
    let server = MockServer::start_async().await;
    let api = client(&server);
    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/v1/token");
            then.status(200).json_body(session_json("u1", "admin"));
        })
        .await;
    let logout = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/auth/v1/logout")
                .header("authorization", "Bearer access-1");
            then.status(500).body("upstream down");
        })
        .await;

    api.sign_in_with_password(credentials()).await.unwrap();
    let result = api.sign_out().await;

    logout.assert_async().await;
    assert!(result.is_err());
    assert!(load_session().is_none());
}

#[tokio::test]
async fn sign_out_without_session_skips_network() {
    let server = MockServer::start_async().await;
    let logout = server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/v1/logout");
            then.status(204);
        })
        .await;

    client(&server).sign_out().await.unwrap();

    assert_eq!(logout.hits_async().await, 0);
}

#[tokio::test]
async fn list_users_selects_all_with_user_bearer() {
    let server = MockServer::start_async().await;
    let api = client(&server);
    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/v1/token");
            then.status(200).json_body(session_json("u1", "admin"));
        })
        .await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/v1/users")
                .query_param("select", "*")
                .header("apikey", ANON)
                .header("authorization", "Bearer access-1");
            then.status(200).json_body(json!([
                {
                    "id": "u1",
                    "name": "Ada",
                    "email": "ada@lab.edu",
                    "role": "admin",
                    "status": "active",
                    "created_at": "2024-10-01T08:00:00+00:00"
                },
                {
                    "id": "u2",
                    "name": "Bob",
                    "email": "bob@lab.edu",
                    "role": "janitor",
                    "status": "suspended",
                    "created_at": null
                }
            ]));
        })
        .await;

    api.sign_in_with_password(credentials()).await.unwrap();
    let users = api.list_users().await.unwrap();

    mock.assert_async().await;
    assert_eq!(users.len(), 2);
    assert_eq!(users[1].status, Some(UserStatus::Suspended));
    assert_eq!(users[1].role, Some(Role::Janitor));
}

#[tokio::test]
async fn anonymous_rest_calls_use_anon_bearer() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/v1/access_logs")
                .header("authorization", format!("Bearer {}", ANON));
            then.status(200).json_body(json!([]));
        })
        .await;

    let logs = client(&server).list_access_logs().await.unwrap();

    mock.assert_async().await;
    assert!(logs.is_empty());
}

#[tokio::test]
async fn update_user_status_patches_single_row() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/rest/v1/users")
                .query_param("id", "eq.u2")
                .json_body(json!({ "status": "suspended" }));
            then.status(204);
        })
        .await;

    client(&server)
        .update_user_status("u2", UserStatus::Suspended)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn insert_access_log_posts_user_and_action() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/rest/v1/access_logs")
                .json_body(json!({ "user_id": "u1", "action": "check-in" }));
            then.status(201);
        })
        .await;

    client(&server)
        .insert_access_log(&NewAccessLog {
            user_id: "u1".into(),
            action: AccessAction::CheckIn,
        })
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn insert_profile_conflict_is_data_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/rest/v1/users");
            then.status(409).json_body(json!({
                "code": "23505",
                "details": "Key (id)=(u1) already exists.",
                "hint": null,
                "message": "duplicate key value violates unique constraint \"users_pkey\""
            }));
        })
        .await;

    let err = client(&server)
        .insert_user_profile(&UserProfile {
            id: "u1".into(),
            name: Some("Ada".into()),
            email: Some("ada@lab.edu".into()),
            role: Some(Role::Student),
            status: Some(UserStatus::Active),
            created_at: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Data);
    assert!(err.user_message().starts_with("duplicate key value"));
}

#[tokio::test]
async fn malformed_success_body_is_unknown_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/v1/access_logs");
            then.status(200).body("not json");
        })
        .await;

    let err = client(&server).list_access_logs().await.unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Unknown);
    assert_eq!(err.user_message(), UNKNOWN_ERROR_MESSAGE);
}
