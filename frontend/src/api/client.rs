use std::fmt;

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use web_sys::FormData;

use crate::api::{admin, auth};
use crate::browser;
use crate::config;
use crate::storage;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("{0}")]
    Server(String),

    #[error("Your session expired. Please sign in again.")]
    Unauthorized,

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// Which credentials a request carries, and how a 401/403 is recovered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Auth {
    None,
    Client,
    Admin,
}

#[derive(Clone)]
pub enum Body {
    Empty,
    Json(Value),
    Form(FormData),
}

fn token_for(auth: Auth) -> Option<String> {
    match auth {
        Auth::None => None,
        Auth::Client => storage::access_token(),
        Auth::Admin => admin::stored_session().map(|session| session.token),
    }
}

pub fn is_auth_failure(status: u16) -> bool {
    status == 401 || status == 403
}

/// Picks the human readable error out of a backend error body.
pub fn error_message(data: &Value, fallback: String) -> String {
    let detail = data.get("detail").and_then(Value::as_str);
    let message = data.get("message").and_then(Value::as_str);
    detail
        .or(message)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .unwrap_or(fallback)
}

/// Single round-trip without any token recovery. Token refresh goes through
/// here so it never re-enters `send`.
pub(crate) async fn send_once(
    method: Method,
    path: &str,
    body: &Body,
    token: Option<&str>,
) -> Result<Response, ApiError> {
    let url = format!("{}{}", config::get_backend_url(), path);
    let mut request = match method {
        Method::Get => Request::get(&url),
        Method::Post => Request::post(&url),
    };
    if let Some(token) = token {
        request = request.header("Authorization", &format!("Bearer {}", token));
    }
    let request = match body {
        Body::Empty => request,
        Body::Json(value) => request.json(value)?,
        Body::Form(form) => request.body(form.clone()),
    };
    Ok(request.send().await?)
}

fn expire_session(auth: Auth) {
    match auth {
        Auth::None => {}
        Auth::Client => {
            log::warn!("Token refresh failed, clearing session");
            storage::clear();
            browser::hard_redirect("/portal");
        }
        Auth::Admin => {
            log::warn!("Admin token refresh failed, clearing admin session");
            storage::remove(storage::ADMIN_SESSION);
            browser::hard_redirect("/admin-login");
        }
    }
}

/// Sends a request, refreshing the token once on 401/403. A failed refresh
/// clears the stored session and navigates away.
pub async fn send(method: Method, path: &str, body: Body, auth: Auth) -> Result<Response, ApiError> {
    let response = send_once(method, path, &body, token_for(auth).as_deref()).await?;
    if auth == Auth::None || !is_auth_failure(response.status()) {
        return Ok(response);
    }

    let refreshed = match auth {
        Auth::Client => auth::refresh_access_token().await,
        Auth::Admin => admin::refresh_session().await,
        Auth::None => false,
    };
    if refreshed {
        return send_once(method, path, &body, token_for(auth).as_deref()).await;
    }

    expire_session(auth);
    Err(ApiError::Unauthorized)
}

/// Reads the body as JSON (an empty or non-JSON body becomes `null`) and turns
/// non-2xx statuses into `ApiError::Server`.
pub async fn read_json(response: Response, fallback: impl FnOnce(u16) -> String) -> Result<Value, ApiError> {
    let status = response.status();
    let ok = response.ok();
    let text = response.text().await.unwrap_or_default();
    let data = serde_json::from_str::<Value>(&text).unwrap_or(Value::Null);
    if !ok {
        return Err(ApiError::Server(error_message(&data, fallback(status))));
    }
    Ok(data)
}

pub async fn request(method: Method, path: &str, body: Body, auth: Auth) -> Result<Value, ApiError> {
    let response = send(method, path, body, auth).await?;
    read_json(response, |status| match auth {
        Auth::None => format!("Request failed ({})", status),
        _ => format!("{} {} failed ({})", method, path, status),
    })
    .await
}

pub async fn get<T: DeserializeOwned>(path: &str, auth: Auth) -> Result<T, ApiError> {
    let value = request(Method::Get, path, Body::Empty, auth).await?;
    Ok(serde_json::from_value(value)?)
}

pub async fn post<T: DeserializeOwned>(path: &str, body: Body, auth: Auth) -> Result<T, ApiError> {
    let value = request(Method::Post, path, body, auth).await?;
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prefers_detail_over_message() {
        let body = json!({"detail": "Email already registered", "message": "Bad request"});
        assert_eq!(error_message(&body, "x".into()), "Email already registered");
    }

    #[test]
    fn falls_back_to_message_then_default() {
        let body = json!({"message": "Invalid email or password"});
        assert_eq!(error_message(&body, "x".into()), "Invalid email or password");

        // FastAPI validation errors carry a list in `detail`.
        let body = json!({"detail": [{"loc": ["body", "email"]}]});
        assert_eq!(
            error_message(&body, "POST /auth/signup failed (422)".into()),
            "POST /auth/signup failed (422)"
        );
        assert_eq!(error_message(&Value::Null, "Request failed (500)".into()), "Request failed (500)");
    }

    #[test]
    fn only_401_and_403_trigger_refresh() {
        assert!(is_auth_failure(401));
        assert!(is_auth_failure(403));
        assert!(!is_auth_failure(404));
        assert!(!is_auth_failure(500));
    }

    #[test]
    fn method_display_matches_http_verbs() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
    }
}
