use chrono::{DateTime, NaiveDateTime, Utc};
use leptos::*;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};

pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Faculty,
    Staff,
    Janitor,
    Admin,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Student,
        Role::Faculty,
        Role::Staff,
        Role::Janitor,
        Role::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Faculty => "faculty",
            Role::Staff => "staff",
            Role::Janitor => "janitor",
            Role::Admin => "admin",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Faculty => "Faculty Member",
            Role::Staff => "Staff Member",
            Role::Janitor => "Janitor",
            Role::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| format!("Unknown role: {raw}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Suspended,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Suspended => "suspended",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Suspended => "Suspended",
        }
    }
}

/// Operator actions on a user's status from the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusAction {
    Activate,
    Suspend,
}

impl StatusAction {
    pub fn target_status(&self) -> UserStatus {
        match self {
            StatusAction::Activate => UserStatus::Active,
            StatusAction::Suspend => UserStatus::Suspended,
        }
    }

    /// An action is offered only when it would change the status.
    pub fn is_available_for(&self, current: UserStatus) -> bool {
        self.target_status() != current
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusAction::Activate => "Activate",
            StatusAction::Suspend => "Suspend",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessAction {
    #[serde(rename = "check-in")]
    CheckIn,
    #[serde(rename = "check-out")]
    CheckOut,
}

impl AccessAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessAction::CheckIn => "check-in",
            AccessAction::CheckOut => "check-out",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccessAction::CheckIn => "Check In",
            AccessAction::CheckOut => "Check Out",
        }
    }
}

/// Row of the `users` table. The table has no constraints, so missing or
/// unrecognised values read as `None` instead of failing the whole listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_role")]
    pub role: Option<Role>,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<UserStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Whether `action` is offered for this row; a row with an unrecognised
    /// status offers both.
    pub fn offers(&self, action: StatusAction) -> bool {
        self.status
            .map_or(true, |status| action.is_available_for(status))
    }
}

/// Row of the `access_logs` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessLogEntry {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub user_id: String,
    #[serde(deserialize_with = "lenient_action")]
    pub action: AccessAction,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAccessLog {
    pub user_id: String,
    pub action: AccessAction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusUpdate {
    pub status: UserStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_role")]
    pub role: Option<Role>,
    #[serde(default)]
    pub email: Option<String>,
}

/// User object returned by the auth provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl AuthUser {
    pub fn role(&self) -> Option<Role> {
        self.user_metadata.role
    }

    pub fn display_name(&self) -> Option<&str> {
        self.user_metadata
            .name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }

    pub fn email_address(&self) -> Option<&str> {
        self.email
            .as_deref()
            .or(self.user_metadata.email.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default, skip_serializing)]
    pub expires_in: Option<i64>,
    pub user: AuthUser,
}

/// Sign-up answers with a full session, or with a bare user when the provider
/// requires email confirmation first.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(AuthSession),
    User(AuthUser),
}

impl SignUpResponse {
    pub fn into_parts(self) -> (AuthUser, Option<AuthSession>) {
        match self {
            SignUpResponse::Session(session) => (session.user.clone(), Some(session)),
            SignUpResponse::User(user) => (user, None),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignUpProfile {
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub data: SignUpProfile,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Auth,
    Data,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.user_message().into_view()
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "VALIDATION_ERROR")
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "AUTH_ERROR")
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "DATA_ERROR")
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "UNKNOWN")
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "REQUEST_FAILED")
    }

    fn with_code(msg: impl Into<String>, code: &str) -> Self {
        Self {
            error: msg.into(),
            code: code.to_string(),
            details: None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.code.as_str() {
            "AUTH_ERROR" => ErrorCategory::Auth,
            "DATA_ERROR" | "REQUEST_FAILED" => ErrorCategory::Data,
            "VALIDATION_ERROR" => ErrorCategory::Validation,
            _ => ErrorCategory::Unknown,
        }
    }

    /// Text shown to the viewer; unrecognized errors collapse to a generic message.
    pub fn user_message(&self) -> String {
        match self.category() {
            ErrorCategory::Auth | ErrorCategory::Data | ErrorCategory::Validation
                if !self.error.trim().is_empty() =>
            {
                self.error.clone()
            }
            _ => UNKNOWN_ERROR_MESSAGE.to_string(),
        }
    }

    /// Builds an error from a non-success backend response. Auth and REST
    /// endpoints disagree on the field holding the message, so the first
    /// present of `msg`, `message`, `error_description`, `error` wins.
    pub fn from_response(status: u16, body: &str, category: ErrorCategory) -> Self {
        let parsed: Option<Value> = serde_json::from_str(body).ok();
        let message = parsed.as_ref().and_then(|value| {
            ["msg", "message", "error_description", "error"]
                .iter()
                .find_map(|key| value.get(*key).and_then(Value::as_str))
                .map(str::to_string)
        });
        match message {
            Some(message) => {
                let mut error = match category {
                    ErrorCategory::Auth => Self::auth(message),
                    ErrorCategory::Data => Self::data(message),
                    ErrorCategory::Validation => Self::validation(message),
                    ErrorCategory::Unknown => Self::unknown(message),
                };
                error.details = parsed.map(|value| {
                    serde_json::json!({
                        "status": status,
                        "body": value,
                    })
                });
                error
            }
            None => {
                let mut error = Self::unknown(format!("Request failed with status {status}"));
                error.details = Some(serde_json::json!({ "status": status, "body": body }));
                error
            }
        }
    }
}

fn lenient_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}

fn lenient_status<'de, D>(deserializer: D) -> Result<Option<UserStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value.trim().to_ascii_lowercase().as_str() {
        "active" => Some(UserStatus::Active),
        "suspended" => Some(UserStatus::Suspended),
        _ => None,
    }))
}

// Anything that is not a check-in is shown as a check-out.
fn lenient_action<'de, D>(deserializer: D) -> Result<AccessAction, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(match raw.as_deref().map(str::trim) {
        Some(value) if value.eq_ignore_ascii_case(AccessAction::CheckIn.as_str()) => {
            AccessAction::CheckIn
        }
        _ => AccessAction::CheckOut,
    })
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

// `timestamptz` columns carry an offset, plain `timestamp` columns do not.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| serde::de::Error::custom(format!("invalid timestamp {raw}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_parses_case_insensitively_and_rejects_unknown() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("janitor".parse::<Role>().unwrap(), Role::Janitor);
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn status_actions_toggle_between_states() {
        let status = StatusAction::Suspend.target_status();
        assert_eq!(status, UserStatus::Suspended);
        assert!(!StatusAction::Suspend.is_available_for(status));
        assert!(StatusAction::Activate.is_available_for(status));
        assert_eq!(StatusAction::Activate.target_status(), UserStatus::Active);
    }

    #[test]
    fn access_action_uses_hyphenated_labels_on_the_wire() {
        let payload = NewAccessLog {
            user_id: "u1".into(),
            action: AccessAction::CheckOut,
        };
        assert_eq!(
            serde_json::to_value(payload).unwrap(),
            json!({ "user_id": "u1", "action": "check-out" })
        );
    }

    #[test]
    fn access_log_accepts_numeric_ids_and_naive_timestamps() {
        let entry: AccessLogEntry = serde_json::from_value(json!({
            "id": 42,
            "user_id": "u1",
            "action": "check-in",
            "timestamp": "2024-10-01T08:30:00.123456"
        }))
        .unwrap();
        assert_eq!(entry.id, "42");
        assert_eq!(entry.action, AccessAction::CheckIn);
        assert_eq!(entry.timestamp.to_rfc3339(), "2024-10-01T08:30:00.123456+00:00");
    }

    #[test]
    fn access_log_accepts_offset_timestamps() {
        let entry: AccessLogEntry = serde_json::from_value(json!({
            "id": "log-1",
            "user_id": "u1",
            "action": "check-out",
            "timestamp": "2024-10-01T10:30:00+02:00"
        }))
        .unwrap();
        assert_eq!(entry.timestamp.to_rfc3339(), "2024-10-01T08:30:00+00:00");
    }

    #[test]
    fn user_rows_with_missing_or_unknown_values_still_parse() {
        let users: Vec<UserProfile> = serde_json::from_value(json!([
            { "id": "u1", "name": "Kim", "email": "kim@lab.edu", "role": "student", "status": "active" },
            { "id": "u2", "name": null, "email": null, "role": "", "status": "active" },
            { "id": 3, "role": "wizard", "status": "banned" }
        ]))
        .unwrap();

        assert_eq!(users.len(), 3);
        assert_eq!(users[0].role, Some(Role::Student));
        assert_eq!(users[0].status, Some(UserStatus::Active));
        assert_eq!(users[1].name, None);
        assert_eq!(users[1].role, None);
        assert!(!users[1].offers(StatusAction::Activate));
        assert_eq!(users[2].id, "3");
        assert_eq!(users[2].status, None);
        assert!(users[2].offers(StatusAction::Activate));
        assert!(users[2].offers(StatusAction::Suspend));
    }

    #[test]
    fn log_rows_with_unexpected_action_read_as_check_out() {
        let logs: Vec<AccessLogEntry> = serde_json::from_value(json!([
            { "id": 1, "user_id": "u1", "action": "check-in", "timestamp": "2024-10-01T08:00:00Z" },
            { "id": 2, "user_id": null, "action": "door-forced", "timestamp": "2024-10-01T09:00:00Z" }
        ]))
        .unwrap();

        assert_eq!(logs[0].action, AccessAction::CheckIn);
        assert_eq!(logs[1].action, AccessAction::CheckOut);
        assert_eq!(logs[1].user_id, "");
    }

    #[test]
    fn auth_user_ignores_unknown_role_labels() {
        let user: AuthUser = serde_json::from_value(json!({
            "id": "u1",
            "email": "a@x.com",
            "user_metadata": { "name": "Ada", "role": "wizard" }
        }))
        .unwrap();
        assert_eq!(user.role(), None);
        assert_eq!(user.display_name(), Some("Ada"));
    }

    #[test]
    fn sign_up_response_distinguishes_session_from_bare_user() {
        let with_session: SignUpResponse = serde_json::from_value(json!({
            "access_token": "at",
            "refresh_token": "rt",
            "expires_in": 3600,
            "user": { "id": "u1", "user_metadata": { "role": "staff" } }
        }))
        .unwrap();
        let (user, session) = with_session.into_parts();
        assert_eq!(user.role(), Some(Role::Staff));
        assert!(session.is_some());

        let bare: SignUpResponse =
            serde_json::from_value(json!({ "id": "u2", "email": "b@x.com" })).unwrap();
        let (user, session) = bare.into_parts();
        assert_eq!(user.id, "u2");
        assert!(session.is_none());
    }

    #[test]
    fn api_error_constructors_set_codes_and_categories() {
        assert_eq!(ApiError::validation("bad").category(), ErrorCategory::Validation);
        assert_eq!(ApiError::auth("bad").category(), ErrorCategory::Auth);
        assert_eq!(ApiError::data("bad").category(), ErrorCategory::Data);
        assert_eq!(ApiError::request_failed("bad").category(), ErrorCategory::Data);
        assert_eq!(ApiError::unknown("bad").category(), ErrorCategory::Unknown);
    }

    #[test]
    fn api_error_display_and_string_conversion_match_error_text() {
        let error = ApiError::auth("Invalid login credentials");
        assert_eq!(format!("{}", error), "Invalid login credentials");
        let raw: String = ApiError::validation("bad input").into();
        assert_eq!(raw, "bad input");
    }

    #[test]
    fn unknown_errors_show_generic_message() {
        assert_eq!(ApiError::unknown("parse failure").user_message(), UNKNOWN_ERROR_MESSAGE);
        assert_eq!(ApiError::data("").user_message(), UNKNOWN_ERROR_MESSAGE);
        assert_eq!(ApiError::data("duplicate key").user_message(), "duplicate key");
    }

    #[test]
    fn from_response_reads_auth_and_rest_error_shapes() {
        let auth = ApiError::from_response(
            400,
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
            ErrorCategory::Auth,
        );
        assert_eq!(auth.error, "Invalid login credentials");
        assert_eq!(auth.category(), ErrorCategory::Auth);

        let signup = ApiError::from_response(
            422,
            r#"{"code":422,"error_code":"user_already_exists","msg":"User already registered"}"#,
            ErrorCategory::Auth,
        );
        assert_eq!(signup.error, "User already registered");

        let rest = ApiError::from_response(
            409,
            r#"{"code":"23505","message":"duplicate key value violates unique constraint"}"#,
            ErrorCategory::Data,
        );
        assert_eq!(rest.category(), ErrorCategory::Data);
        assert!(rest.error.contains("duplicate key"));
    }

    #[test]
    fn from_response_falls_back_to_unknown_for_opaque_bodies() {
        let error = ApiError::from_response(502, "<html>Bad Gateway</html>", ErrorCategory::Data);
        assert_eq!(error.category(), ErrorCategory::Unknown);
        assert_eq!(error.user_message(), UNKNOWN_ERROR_MESSAGE);
        assert!(error.error.contains("502"));
    }

    #[test]
    fn api_error_can_be_converted_to_view() {
        let runtime = create_runtime();
        let _: View = ApiError::request_failed("request failed").into_view();
        runtime.dispose();
    }
}
