use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::client::{self, ApiError, Auth, Body, Method};
use crate::api::fields::{self, deserialize_opt_id};
use crate::storage;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SessionUser {
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub name: String,
    #[serde(default)]
    pub is_guest: bool,
}

impl SessionUser {
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .or_else(|| self.email.as_deref().and_then(|e| e.chars().next()))
            .unwrap_or('U')
            .to_ascii_uppercase()
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct SessionTokens {
    pub access: Option<String>,
    pub refresh: Option<String>,
}

/// Auth endpoints return tokens at the top level and the user either under
/// `user` or flattened next to the tokens.
pub fn session_from_payload(payload: &Value, name_override: Option<&str>) -> (SessionUser, SessionTokens) {
    let tokens = SessionTokens {
        access: fields::str_field(payload, "access_token"),
        refresh: fields::str_field(payload, "refresh_token"),
    };

    let user = payload.get("user").filter(|u| u.is_object()).unwrap_or(payload);
    let email = fields::str_field(user, "email");
    let name = name_override
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .or_else(|| fields::str_field(user, "name"))
        .or_else(|| {
            email
                .as_deref()
                .and_then(|e| e.split('@').next())
                .filter(|local| !local.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "User".to_string());

    let session = SessionUser {
        id: user.get("id").and_then(fields::id_string),
        email,
        name,
        is_guest: user.get("is_guest").and_then(Value::as_bool).unwrap_or(false),
    };
    (session, tokens)
}

pub async fn signup(name: &str, email: &str, password: &str) -> Result<Value, ApiError> {
    let body = json!({ "name": name, "email": email, "password": password });
    client::request(Method::Post, "/auth/signup", Body::Json(body), Auth::None).await
}

pub async fn signin(email: &str, password: &str) -> Result<Value, ApiError> {
    let body = json!({ "email": email, "password": password });
    client::request(Method::Post, "/auth/signin", Body::Json(body), Auth::None).await
}

pub async fn guest() -> Result<Value, ApiError> {
    client::request(Method::Post, "/auth/guest", Body::Empty, Auth::None).await
}

pub async fn forgot_password(email: &str) -> Result<Value, ApiError> {
    let body = json!({ "email": email });
    client::request(Method::Post, "/auth/password/forgot", Body::Json(body), Auth::None).await
}

/// Trades the stored refresh token for a new access token. Returns whether a
/// new token was stored.
pub async fn refresh_access_token() -> bool {
    let Some(refresh) = storage::get(storage::REFRESH_TOKEN) else {
        return false;
    };
    let body = Body::Json(json!({ "refresh_token": refresh }));
    let response = match client::send_once(Method::Post, "/auth/token/refresh", &body, None).await {
        Ok(response) => response,
        Err(e) => {
            log::warn!("Token refresh request failed: {}", e);
            return false;
        }
    };
    match client::read_json(response, |status| format!("Refresh failed ({})", status)).await {
        Ok(data) => match fields::str_field(&data, "access_token") {
            Some(token) => {
                storage::set(storage::ACCESS_TOKEN, &token);
                true
            }
            None => false,
        },
        Err(e) => {
            log::warn!("{}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_user_and_tokens() {
        let payload = json!({
            "access_token": "aaa",
            "refresh_token": "rrr",
            "user": {"id": 7, "email": "jane@realty.com", "name": "Jane", "is_guest": false}
        });
        let (user, tokens) = session_from_payload(&payload, None);
        assert_eq!(user.id.as_deref(), Some("7"));
        assert_eq!(user.name, "Jane");
        assert_eq!(tokens.access.as_deref(), Some("aaa"));
        assert_eq!(tokens.refresh.as_deref(), Some("rrr"));
    }

    #[test]
    fn name_falls_back_to_email_local_part() {
        let payload = json!({"access_token": "t", "id": "u1", "email": "mark@agency.io"});
        let (user, tokens) = session_from_payload(&payload, None);
        assert_eq!(user.name, "mark");
        assert_eq!(user.id.as_deref(), Some("u1"));
        assert_eq!(tokens.refresh, None);
    }

    #[test]
    fn override_wins_and_guest_flag_is_kept() {
        let payload = json!({"access_token": "t", "user": {"id": 99, "is_guest": true}});
        let (user, _) = session_from_payload(&payload, Some("Guest"));
        assert_eq!(user.name, "Guest");
        assert!(user.is_guest);
        assert_eq!(user.email, None);

        let (anonymous, _) = session_from_payload(&json!({}), None);
        assert_eq!(anonymous.name, "User");
        assert_eq!(anonymous.initial(), 'U');
    }

    #[test]
    fn cached_user_accepts_numeric_id() {
        let user: SessionUser =
            serde_json::from_str(r#"{"id":12,"email":null,"name":"sam","is_guest":false}"#).unwrap();
        assert_eq!(user.id.as_deref(), Some("12"));
        assert_eq!(user.initial(), 'S');
    }
}
