use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use web_sys::{File, FormData};

use crate::api::client::{self, ApiError, Auth, Body, Method};
use crate::api::fields::{self, deserialize_opt_id};
use crate::api::portal::{js_error, Video};
use crate::storage;

const ADMIN_AUTH_PREFIX: &str = "/api/admin/auth/admin";

/// Admin credentials persisted under the `admin` key.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AdminSession {
    pub email: String,
    pub token: String,
    #[serde(rename = "refreshToken", default)]
    pub refresh_token: Option<String>,
}

pub fn stored_session() -> Option<AdminSession> {
    storage::get_json::<AdminSession>(storage::ADMIN_SESSION).filter(|s| !s.token.is_empty())
}

fn store_session(session: &AdminSession) {
    storage::set_json(storage::ADMIN_SESSION, session);
}

pub fn clear_session() {
    storage::remove(storage::ADMIN_SESSION);
}

fn session_from_response(email: &str, data: &Value, previous_refresh: Option<String>) -> Option<AdminSession> {
    let token = fields::str_field(data, "token")?;
    Some(AdminSession {
        email: email.to_string(),
        token,
        refresh_token: fields::str_field(data, "refresh_token").or(previous_refresh),
    })
}

const NETWORK_MESSAGE: &str = "Network error or server is unreachable.";

async fn credentials_request(action: &str, email: &str, password: &str, fallback: &str) -> Result<Value, String> {
    let body = Body::Json(json!({ "email": email, "password": password }));
    let path = format!("{}/{}", ADMIN_AUTH_PREFIX, action);
    let response = client::send_once(Method::Post, &path, &body, None).await.map_err(|e| {
        log::error!("Admin {} failed: {}", action, e);
        NETWORK_MESSAGE.to_string()
    })?;
    let ok = response.ok();
    let data = response.json::<Value>().await.unwrap_or(Value::Null);
    if !ok {
        return Err(fields::str_field(&data, "message").unwrap_or_else(|| fallback.to_string()));
    }
    Ok(data)
}

pub async fn login(email: &str, password: &str) -> Result<AdminSession, String> {
    let data = credentials_request("login", email, password, "Invalid email or password").await?;
    let session = session_from_response(email, &data, None)
        .ok_or_else(|| "Login response did not include a token.".to_string())?;
    store_session(&session);
    Ok(session)
}

/// Registers and signs in. Returns the session and the server's message.
pub async fn register(email: &str, password: &str) -> Result<(AdminSession, String), String> {
    let data = credentials_request("register", email, password, "Registration failed").await?;
    let session = session_from_response(email, &data, None)
        .ok_or_else(|| "Registration response did not include a token.".to_string())?;
    store_session(&session);
    let message = fields::str_field(&data, "message").unwrap_or_else(|| "Registration successful".to_string());
    Ok((session, message))
}

/// Exchanges the stored admin refresh token. Any failure drops the session.
pub async fn refresh_session() -> bool {
    let Some(session) = stored_session() else {
        return false;
    };
    let Some(refresh) = session.refresh_token.clone() else {
        log::warn!("No refresh token found for admin");
        clear_session();
        return false;
    };

    let body = Body::Json(json!({ "refreshToken": refresh }));
    let path = format!("{}/refresh", ADMIN_AUTH_PREFIX);
    let refreshed = match client::send_once(Method::Post, &path, &body, Some(&refresh)).await {
        Ok(response) if response.ok() => {
            let data = response.json::<Value>().await.unwrap_or(Value::Null);
            session_from_response(&session.email, &data, Some(refresh))
        }
        Ok(response) => {
            log::error!("Admin token refresh failed ({})", response.status());
            None
        }
        Err(e) => {
            log::error!("Admin token refresh network error: {}", e);
            None
        }
    };

    match refreshed {
        Some(session) => {
            store_session(&session);
            true
        }
        None => {
            clear_session();
            false
        }
    }
}

/// Best effort backend logout; the local session is always dropped.
pub async fn logout() {
    if let Some(session) = stored_session() {
        let path = format!("{}/logout", ADMIN_AUTH_PREFIX);
        if let Err(e) = client::send_once(Method::Post, &path, &Body::Empty, Some(&session.token)).await {
            log::error!("Admin logout failed on backend: {}", e);
        }
    }
    clear_session();
}

#[derive(Clone, Debug, PartialEq)]
pub struct AdminOrder {
    /// Display/selection key: the client id when present.
    pub id: String,
    pub client: Option<String>,
    pub order_id: Option<String>,
    pub status: String,
    pub package: String,
    pub photos: u32,
    pub date: String,
    pub video_url: Option<String>,
    pub final_video_url: Option<String>,
    pub videos: Vec<Video>,
}

impl AdminOrder {
    /// Id sent to the status endpoint: the backend order id, else the key.
    pub fn status_target(&self) -> &str {
        self.order_id.as_deref().unwrap_or(&self.id)
    }
}

/// Pulls the order list out of the management payload, whatever its wrapping.
pub fn extract_order_array(data: &Value) -> Result<Vec<Value>, String> {
    match data {
        Value::Array(list) => Ok(list.clone()),
        Value::Object(map) => {
            for key in ["orders", "data", "items", "results"] {
                if let Some(Value::Array(list)) = map.get(key) {
                    return Ok(list.clone());
                }
            }
            if map.get("order_id").map_or(false, |v| !v.is_null()) {
                return Ok(vec![data.clone()]);
            }
            if let Some(list) = map.values().find_map(Value::as_array) {
                return Ok(list.clone());
            }
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            Err(format!(
                "Invalid data format. Expected array but got object with keys: {}",
                keys.join(", ")
            ))
        }
        other => Err(format!("Unexpected data type: {}", json_type(other))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub fn normalize_admin_orders(list: &[Value]) -> Vec<AdminOrder> {
    list.iter()
        .enumerate()
        .map(|(i, o)| {
            let videos: Vec<Video> = o
                .get("videos")
                .cloned()
                .and_then(|v| serde_json::from_value(v).ok())
                .unwrap_or_default();
            let client = o.get("client").and_then(fields::id_string);
            let order_id = o.get("order_id").and_then(fields::id_string);
            AdminOrder {
                id: client
                    .clone()
                    .or_else(|| order_id.clone())
                    .or_else(|| o.get("id").and_then(fields::id_string))
                    .unwrap_or_else(|| format!("order-{}", i)),
                client,
                order_id,
                status: fields::str_field(o, "status").unwrap_or_else(|| "unknown".to_string()),
                package: fields::str_field(o, "package").unwrap_or_else(|| "Unknown".to_string()),
                photos: fields::u32_field(o, "photos").unwrap_or(0),
                date: fields::str_field(o, "date").unwrap_or_else(|| Utc::now().to_rfc3339()),
                video_url: videos.first().and_then(|v| v.url.clone()),
                final_video_url: None,
                videos,
            }
        })
        .collect()
}

pub async fn orders() -> Result<Vec<AdminOrder>, ApiError> {
    let data = client::request(Method::Get, "/api/Admin/order_management", Body::Empty, Auth::Admin).await?;
    let list = extract_order_array(&data).map_err(ApiError::Decode)?;
    Ok(normalize_admin_orders(&list))
}

pub fn numeric_order_id(id: &str) -> Result<u64, String> {
    id.trim()
        .parse::<u64>()
        .map_err(|_| format!("Invalid order ID: {}. Expected a numeric ID.", id))
}

pub async fn update_order_status(order_id: &str, status: &str) -> Result<Value, ApiError> {
    let id = numeric_order_id(order_id).map_err(ApiError::Server)?;
    let path = format!("/api/admin/orders/{}/status?order_id={}", id, id);
    client::request(Method::Post, &path, Body::Json(json!({ "status": status })), Auth::Admin).await
}

pub async fn upload_final_video(client_id: &str, file: &File) -> Result<Value, ApiError> {
    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename("file", file, &file.name()).map_err(js_error)?;
    let path = format!("/api/admin/final-video?user_id={}", urlencoding::encode(client_id));
    client::request(Method::Post, &path, Body::Form(form), Auth::Admin).await
}

/// Folds a status or upload response into the order.
pub fn apply_status_result(order: &AdminOrder, status: &str, result: &Value) -> AdminOrder {
    AdminOrder {
        status: status.to_string(),
        video_url: fields::str_field(result, "video_url").or_else(|| order.video_url.clone()),
        ..order.clone()
    }
}

pub fn apply_upload_result(order: &AdminOrder, filename: &str, result: &Value) -> AdminOrder {
    let video_url = fields::str_field(result, "video_url");
    let mut videos = order.videos.clone();
    if let Some(url) = &video_url {
        videos.push(Video {
            filename: Some(filename.to_string()),
            url: Some(url.clone()),
            status: Some("completed".to_string()),
        });
    }
    AdminOrder {
        status: fields::str_field(result, "status").unwrap_or_else(|| order.status.clone()),
        final_video_url: video_url
            .or_else(|| fields::first_str(result, &["final_video_url", "local_url"]))
            .or_else(|| order.final_video_url.clone()),
        videos,
        ..order.clone()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    Processing,
    Succeeded,
    Failed,
}

impl JobStatus {
    pub const ALL: [JobStatus; 4] = [
        JobStatus::Queued,
        JobStatus::Processing,
        JobStatus::Succeeded,
        JobStatus::Failed,
    ];

    pub fn key(self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Processing => "processing",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
        }
    }

    pub fn progress_width(self) -> &'static str {
        match self {
            JobStatus::Succeeded | JobStatus::Failed => "100%",
            JobStatus::Processing => "60%",
            JobStatus::Queued => "30%",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct JobLog {
    pub video_id: Option<String>,
    pub order_id: Option<String>,
    pub username: Option<String>,
    pub package: Option<String>,
    pub created_at: Option<String>,
    pub status: JobStatus,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LogsSnapshot {
    pub logs: Vec<JobLog>,
    pub counts: [usize; 4],
}

impl LogsSnapshot {
    pub fn count(&self, status: JobStatus) -> usize {
        self.counts[status as usize]
    }

    pub fn total_pages(&self) -> usize {
        self.logs.len().div_ceil(LOGS_PAGE_SIZE)
    }

    /// One-based page of logs.
    pub fn page(&self, page: usize) -> &[JobLog] {
        let start = page.saturating_sub(1) * LOGS_PAGE_SIZE;
        if start >= self.logs.len() {
            return &[];
        }
        let end = (start + LOGS_PAGE_SIZE).min(self.logs.len());
        &self.logs[start..end]
    }
}

pub const LOGS_PAGE_SIZE: usize = 8;

pub fn parse_logs(data: &Value) -> LogsSnapshot {
    let mut snapshot = LogsSnapshot::default();
    let details = data.get("details");
    for status in JobStatus::ALL {
        let entries = details
            .and_then(|d| d.get(status.key()))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        snapshot.counts[status as usize] = entries.len();
        snapshot.logs.extend(entries.iter().map(|e| JobLog {
            video_id: e.get("video_id").and_then(fields::id_string),
            order_id: e.get("order_id").and_then(fields::id_string),
            username: fields::str_field(e, "username"),
            package: fields::str_field(e, "package"),
            created_at: fields::str_field(e, "created_at"),
            status,
        }));
    }
    snapshot
}

pub async fn logs_status() -> Result<LogsSnapshot, ApiError> {
    let data = client::request(Method::Get, "/api/admin/logs-status", Body::Empty, Auth::Admin).await?;
    Ok(parse_logs(&data))
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Notification {
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub video_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub image_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub order_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeTone {
    Success,
    Warning,
    Error,
    Info,
    Plain,
}

impl BadgeTone {
    pub fn css_class(self) -> &'static str {
        match self {
            BadgeTone::Success => "badge badge-success",
            BadgeTone::Warning => "badge badge-warning",
            BadgeTone::Error => "badge badge-error",
            BadgeTone::Info => "badge badge-info",
            BadgeTone::Plain => "badge",
        }
    }
}

pub fn badge_tone(category: Option<&str>) -> BadgeTone {
    let Some(category) = category.filter(|c| !c.is_empty()) else {
        return BadgeTone::Plain;
    };
    let lower = category.to_lowercase();
    if lower.contains("completed") || lower.contains("success") {
        BadgeTone::Success
    } else if lower.contains("processing") || lower.contains("pending") {
        BadgeTone::Warning
    } else if lower.contains("error") || lower.contains("failed") {
        BadgeTone::Error
    } else {
        BadgeTone::Info
    }
}

/// `order_completed` -> `Order Completed`.
pub fn format_category(category: Option<&str>) -> String {
    let Some(category) = category.filter(|c| !c.is_empty()) else {
        return "Unknown".to_string();
    };
    category
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn parse_notifications(data: &Value) -> Vec<Notification> {
    let list = data
        .as_array()
        .or_else(|| data.get("notifications").and_then(Value::as_array));
    list.map(|l| {
        l.iter()
            .filter_map(|n| serde_json::from_value(n.clone()).ok())
            .collect()
    })
    .unwrap_or_default()
}

pub async fn notifications() -> Result<Vec<Notification>, ApiError> {
    let data = client::request(Method::Get, "/api/admin/notifications", Body::Empty, Auth::Admin).await?;
    Ok(parse_notifications(&data))
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Client {
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub joined: String,
    #[serde(default)]
    pub orders: Value,
}

impl Client {
    pub fn orders_label(&self) -> String {
        match &self.orders {
            Value::Null => "0".to_string(),
            Value::String(s) => s.clone(),
            Value::Array(list) => list.len().to_string(),
            other => other.to_string(),
        }
    }
}

pub async fn clients() -> Result<Vec<Client>, ApiError> {
    let data = client::request(Method::Get, "/api/admin/clients", Body::Empty, Auth::Admin).await?;
    let list = data
        .as_array()
        .or_else(|| data.get("clients").and_then(Value::as_array))
        .cloned()
        .unwrap_or_default();
    Ok(list
        .into_iter()
        .filter_map(|c| serde_json::from_value(c).ok())
        .collect())
}

pub async fn regenerate(image_id: &str, prompt: &str) -> Result<Value, ApiError> {
    let path = format!("/api/admin/orders/{}/regenerate", urlencoding::encode(image_id.trim()));
    client::request(Method::Post, &path, Body::Json(json!({ "prompt": prompt })), Auth::Admin).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_array_shapes() {
        assert_eq!(extract_order_array(&json!([{"a": 1}])).unwrap().len(), 1);
        for key in ["orders", "data", "items", "results"] {
            let mut map = serde_json::Map::new();
            map.insert(key.to_string(), json!([{}, {}]));
            let data = Value::Object(map);
            assert_eq!(extract_order_array(&data).unwrap().len(), 2, "{}", key);
        }
        let single = json!({"order_id": 4, "status": "queued"});
        assert_eq!(extract_order_array(&single).unwrap(), vec![single.clone()]);
        let other = json!({"total": 1, "payload": [{}]});
        assert_eq!(extract_order_array(&other).unwrap().len(), 1);
    }

    #[test]
    fn order_array_rejects_unknown_shapes() {
        let err = extract_order_array(&json!({"total": 0})).unwrap_err();
        assert!(err.contains("keys: total"));
        assert_eq!(extract_order_array(&json!("x")).unwrap_err(), "Unexpected data type: string");
    }

    #[test]
    fn admin_orders_keyed_by_client() {
        let list = vec![
            json!({"client": 12, "order_id": 301, "status": "processing", "package": "Premium", "photos": 24,
                   "date": "2025-04-01", "videos": [{"filename": "a.mp4", "url": "https://v/a.mp4"}]}),
            json!({"id": "o2"}),
        ];
        let orders = normalize_admin_orders(&list);
        assert_eq!(orders[0].id, "12");
        assert_eq!(orders[0].status_target(), "301");
        assert_eq!(orders[0].video_url.as_deref(), Some("https://v/a.mp4"));
        assert_eq!(orders[1].id, "o2");
        assert_eq!(orders[1].status, "unknown");
        assert_eq!(orders[1].package, "Unknown");
        assert_eq!(orders[1].photos, 0);
        assert_eq!(orders[1].status_target(), "o2");
    }

    #[test]
    fn status_update_needs_numeric_id() {
        assert_eq!(numeric_order_id("301"), Ok(301));
        assert_eq!(
            numeric_order_id("order-1").unwrap_err(),
            "Invalid order ID: order-1. Expected a numeric ID."
        );
    }

    #[test]
    fn upload_result_appends_video() {
        let order = normalize_admin_orders(&[json!({"client": 3, "status": "completed"})]).remove(0);
        let updated = apply_upload_result(&order, "final.mp4", &json!({"video_url": "https://v/f.mp4"}));
        assert_eq!(updated.final_video_url.as_deref(), Some("https://v/f.mp4"));
        assert_eq!(updated.videos.len(), 1);
        assert_eq!(updated.status, "completed");

        let untouched = apply_upload_result(&order, "x.mp4", &json!({"local_url": "/tmp/x.mp4"}));
        assert!(untouched.videos.is_empty());
        assert_eq!(untouched.final_video_url.as_deref(), Some("/tmp/x.mp4"));

        let status = apply_status_result(&order, "processing", &json!({}));
        assert_eq!(status.status, "processing");
    }

    #[test]
    fn logs_flatten_in_status_order() {
        let data = json!({"details": {
            "failed": [{"video_id": 9}],
            "queued": [{"video_id": 1, "username": "amy"}, {"video_id": 2}],
            "succeeded": []
        }});
        let snapshot = parse_logs(&data);
        let statuses: Vec<JobStatus> = snapshot.logs.iter().map(|l| l.status).collect();
        assert_eq!(statuses, vec![JobStatus::Queued, JobStatus::Queued, JobStatus::Failed]);
        assert_eq!(snapshot.count(JobStatus::Queued), 2);
        assert_eq!(snapshot.count(JobStatus::Processing), 0);
        assert_eq!(snapshot.count(JobStatus::Failed), 1);
        assert_eq!(snapshot.logs[0].username.as_deref(), Some("amy"));
        assert_eq!(parse_logs(&json!({})).logs.len(), 0);
    }

    #[test]
    fn logs_paginate_by_eight() {
        let queued: Vec<Value> = (0..19).map(|i| json!({"video_id": i})).collect();
        let snapshot = parse_logs(&json!({"details": {"queued": queued}}));
        assert_eq!(snapshot.total_pages(), 3);
        assert_eq!(snapshot.page(1).len(), 8);
        assert_eq!(snapshot.page(3).len(), 3);
        assert_eq!(snapshot.page(3)[0].video_id.as_deref(), Some("16"));
        assert!(snapshot.page(4).is_empty());
        assert_eq!(LogsSnapshot::default().total_pages(), 0);
    }

    #[test]
    fn progress_by_status() {
        assert_eq!(JobStatus::Succeeded.progress_width(), "100%");
        assert_eq!(JobStatus::Processing.progress_width(), "60%");
        assert_eq!(JobStatus::Queued.progress_width(), "30%");
    }

    #[test]
    fn category_formatting_and_tone() {
        assert_eq!(format_category(Some("order_completed")), "Order Completed");
        assert_eq!(format_category(Some("VIDEO_failed")), "Video Failed");
        assert_eq!(format_category(None), "Unknown");
        assert_eq!(badge_tone(Some("order_completed")), BadgeTone::Success);
        assert_eq!(badge_tone(Some("payment_pending")), BadgeTone::Warning);
        assert_eq!(badge_tone(Some("render_failed")), BadgeTone::Error);
        assert_eq!(badge_tone(Some("welcome")), BadgeTone::Info);
        assert_eq!(badge_tone(None), BadgeTone::Plain);
    }

    #[test]
    fn notifications_bare_or_wrapped() {
        let wrapped = json!({"notifications": [{"id": 1, "category": "order_completed", "order_id": 5}]});
        let list = parse_notifications(&wrapped);
        assert_eq!(list[0].order_id.as_deref(), Some("5"));
        assert_eq!(parse_notifications(&json!([{}, {}])).len(), 2);
        assert!(parse_notifications(&json!({"x": 1})).is_empty());
    }

    #[test]
    fn admin_session_storage_shape() {
        let session = session_from_response("a@qt.io", &json!({"token": "t", "refresh_token": "r"}), None).unwrap();
        let raw = serde_json::to_value(&session).unwrap();
        assert_eq!(raw, json!({"email": "a@qt.io", "token": "t", "refreshToken": "r"}));
        let kept = session_from_response("a@qt.io", &json!({"token": "t2"}), Some("r".into())).unwrap();
        assert_eq!(kept.refresh_token.as_deref(), Some("r"));
        assert!(session_from_response("a@qt.io", &json!({}), None).is_none());
    }

    #[test]
    fn client_order_counts() {
        let c: Client = serde_json::from_value(json!({"id": 1, "name": "Ann", "email": "a@b", "joined": "2024", "orders": 3})).unwrap();
        assert_eq!(c.orders_label(), "3");
    }
}
