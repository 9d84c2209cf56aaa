use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{File, FormData};

use crate::api::client::{self, ApiError, Auth, Body, Method};
use crate::api::fields::{self, deserialize_opt_id};
use crate::pricing::addons::AddOnSelection;

const CLIENT_PREFIX: &str = "/api/client";
const STRIPE_PREFIX: &str = "/stripe";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    pub id: String,
    pub package: String,
    pub status: String,
    pub date: String,
    pub videos: Vec<Video>,
    pub photos: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OrderStatus {
    Submitted,
    Processing,
    Completed,
}

impl OrderStatus {
    pub fn from_key(key: &str) -> Self {
        match key {
            "processing" => OrderStatus::Processing,
            "completed" => OrderStatus::Completed,
            _ => OrderStatus::Submitted,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Submitted => "Submitted",
            OrderStatus::Processing => "Processing",
            OrderStatus::Completed => "Completed",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            OrderStatus::Submitted => "status-submitted",
            OrderStatus::Processing => "status-processing",
            OrderStatus::Completed => "status-completed",
        }
    }
}

impl Order {
    pub fn status(&self) -> OrderStatus {
        OrderStatus::from_key(&self.status)
    }

    pub fn is_completed(&self) -> bool {
        self.status == "completed"
    }
}

/// The order list arrives either bare or wrapped in `{ "orders": [...] }`.
pub fn normalize_orders(data: &Value) -> Vec<Order> {
    let list = data
        .get("orders")
        .and_then(Value::as_array)
        .or_else(|| data.as_array());
    let Some(list) = list else {
        return Vec::new();
    };

    list.iter()
        .enumerate()
        .map(|(i, o)| {
            let videos: Vec<Video> = o
                .get("videos")
                .cloned()
                .and_then(|v| serde_json::from_value(v).ok())
                .unwrap_or_default();
            Order {
                id: fields::first_id(o, &["order_id", "id"]).unwrap_or_else(|| format!("order-{}", i)),
                package: fields::str_field(o, "package").unwrap_or_else(|| "Unknown".to_string()),
                status: fields::str_field(o, "status")
                    .map(|s| s.to_lowercase())
                    .unwrap_or_else(|| "submitted".to_string()),
                date: fields::first_str(o, &["date", "created_at", "updated_at"])
                    .unwrap_or_else(|| Utc::now().to_rfc3339()),
                photos: fields::u32_field(o, "photos").unwrap_or(videos.len() as u32),
                videos,
            }
        })
        .collect()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

/// `YYYY-MM-DD`, or the raw string when it is not a recognizable date.
pub fn format_ymd(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Long form used on invoices and downloads, e.g. `March 04, 2025`.
pub fn format_long_date(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    parse_date(raw)
        .map(|d| d.format("%B %d, %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[derive(Clone, Debug, PartialEq)]
pub struct DownloadItem {
    pub id: String,
    pub order_id: String,
    pub name: String,
    pub url: Option<String>,
    pub created: String,
}

fn strip_video_extension(filename: &str) -> &str {
    let lower = filename.to_ascii_lowercase();
    if lower.ends_with(".mp4") || lower.ends_with(".mov") {
        &filename[..filename.len() - 4]
    } else {
        filename
    }
}

/// Flattens the download center payload. Entries are either orders holding a
/// `videos` list or individual videos.
pub fn flatten_downloads(data: &Value) -> Vec<DownloadItem> {
    let Some(entries) = data.get("downloads").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut items = Vec::new();
    for entry in entries {
        if let Some(videos) = entry.get("videos").and_then(Value::as_array) {
            let order_id = fields::first_id(entry, &["order_id", "id"]).unwrap_or_default();
            let created = fields::first_str(entry, &["date", "created_at"]).unwrap_or_default();
            for (idx, video) in videos.iter().enumerate() {
                let name = fields::str_field(video, "filename")
                    .map(|f| strip_video_extension(&f).to_string())
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| format!("Video {}", idx + 1));
                items.push(DownloadItem {
                    id: format!("{}-{}", order_id, idx),
                    order_id: order_id.clone(),
                    name,
                    url: fields::str_field(video, "url"),
                    created: created.clone(),
                });
            }
        } else {
            let video_id = fields::first_id(entry, &["video_id", "id"]).unwrap_or_default();
            let name = fields::str_field(entry, "filename")
                .map(|f| strip_video_extension(&f).to_string())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| format!("Video {}", video_id));
            items.push(DownloadItem {
                id: video_id.clone(),
                order_id: fields::first_id(entry, &["order_id"]).unwrap_or(video_id),
                name,
                url: fields::str_field(entry, "url"),
                created: fields::first_str(entry, &["created_at", "date"]).unwrap_or_default(),
            });
        }
    }
    items
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Invoice {
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub date: Option<String>,
}

impl Invoice {
    pub fn amount_label(&self) -> String {
        format!("${:.2}", self.amount.unwrap_or(0.0))
    }
}

pub fn parse_invoices(data: &Value) -> Vec<Invoice> {
    let list = data
        .get("invoices")
        .and_then(Value::as_array)
        .or_else(|| data.as_array());
    list.map(|l| {
        l.iter()
            .filter_map(|inv| serde_json::from_value(inv.clone()).ok())
            .collect()
    })
    .unwrap_or_default()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CheckoutMetadata {
    pub package_name: String,
    pub package_price: String,
    pub addons: String,
    pub addons_total: String,
    pub grand_total: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CheckoutRequest {
    pub user_id: String,
    pub amount: u64,
    pub currency: String,
    pub success_url: String,
    pub cancel_url: String,
    pub addon_type: String,
    pub metadata: CheckoutMetadata,
}

impl CheckoutRequest {
    pub fn new(
        user_id: &str,
        origin: &str,
        package_name: &str,
        package_price: u32,
        addons: &AddOnSelection,
    ) -> Result<Self, ApiError> {
        let addons_total = addons.total();
        let grand_total = package_price + addons_total;
        Ok(Self {
            user_id: user_id.to_string(),
            amount: grand_total as u64 * 100,
            currency: "usd".to_string(),
            success_url: format!("{}/portal?start=upload&paid=1&session_id={{CHECKOUT_SESSION_ID}}", origin),
            cancel_url: format!("{}/portal?paid=0", origin),
            addon_type: addons.addon_type().to_string(),
            metadata: CheckoutMetadata {
                package_name: package_name.to_string(),
                package_price: package_price.to_string(),
                addons: serde_json::to_string(addons)?,
                addons_total: addons_total.to_string(),
                grand_total: grand_total.to_string(),
            },
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CheckoutSession {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Stripe checkout URLs carry the session id as a `/cs_…` path segment.
pub fn session_id_from_url(url: &str) -> Option<String> {
    let start = url.find("/cs_")? + 1;
    let rest = &url[start..];
    let end = rest.find(|c| c == '/' || c == '?' || c == '#').unwrap_or(rest.len());
    let id = &rest[..end];
    (id.len() > 3).then(|| id.to_string())
}

impl CheckoutSession {
    pub fn session_id(&self) -> Option<String> {
        self.id
            .clone()
            .filter(|id| !id.is_empty())
            .or_else(|| self.url.as_deref().and_then(session_id_from_url))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PaymentStatus {
    #[serde(default)]
    pub status: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ClientStatus {
    #[serde(default)]
    pub has_orders: bool,
}

pub async fn client_status() -> Result<ClientStatus, ApiError> {
    client::get(&format!("{}/client/status", CLIENT_PREFIX), Auth::Client).await
}

pub async fn user_orders() -> Result<Vec<Order>, ApiError> {
    let data: Value = client::get(&format!("{}/orders/status", CLIENT_PREFIX), Auth::Client).await?;
    Ok(normalize_orders(&data))
}

pub async fn create_order(
    user_id: &str,
    package_name: &str,
    addons: &AddOnSelection,
    files: &[File],
) -> Result<Value, ApiError> {
    let form = FormData::new().map_err(js_error)?;
    form.append_with_str("user_id", user_id).map_err(js_error)?;
    form.append_with_str("package", package_name).map_err(js_error)?;
    form.append_with_str("add_ons", &serde_json::to_string(addons)?).map_err(js_error)?;
    for file in files {
        form.append_with_blob_and_filename("files", file, &file.name()).map_err(js_error)?;
    }
    client::request(Method::Post, &format!("{}/orders/new", CLIENT_PREFIX), Body::Form(form), Auth::Client).await
}

pub async fn reorder(order_id: &str) -> Result<Value, ApiError> {
    let path = format!("{}/orders/{}/reorder", CLIENT_PREFIX, urlencoding::encode(order_id));
    client::request(Method::Post, &path, Body::Empty, Auth::Client).await
}

pub async fn downloads() -> Result<Vec<DownloadItem>, ApiError> {
    let data: Value = client::get(&format!("{}/download-center", CLIENT_PREFIX), Auth::Client).await?;
    Ok(flatten_downloads(&data))
}

pub async fn invoices() -> Result<Vec<Invoice>, ApiError> {
    let data: Value = client::get(&format!("{}/invoices", CLIENT_PREFIX), Auth::Client).await?;
    Ok(parse_invoices(&data))
}

/// An invoice document: the backend answers with a PDF or with JSON.
pub enum InvoiceDocument {
    Pdf(web_sys::Blob),
    Json(Value),
}

pub async fn invoice_document(invoice_id: &str) -> Result<InvoiceDocument, ApiError> {
    let path = format!("{}/invoice/{}", CLIENT_PREFIX, urlencoding::encode(invoice_id));
    let response = client::send(Method::Get, &path, Body::Empty, Auth::Client).await?;
    if !response.ok() {
        return Err(ApiError::Server(format!("GET {} failed ({})", path, response.status())));
    }
    let content_type = response.headers().get("content-type").unwrap_or_default();
    if content_type.contains("application/pdf") {
        let promise = response.as_raw().blob().map_err(js_error)?;
        let blob = wasm_bindgen_futures::JsFuture::from(promise).await.map_err(js_error)?;
        return Ok(InvoiceDocument::Pdf(blob.unchecked_into()));
    }
    let data = response.json::<Value>().await.unwrap_or_else(|_| json!({}));
    Ok(InvoiceDocument::Json(data))
}

pub async fn pay_invoice(invoice_id: &str) -> Result<Value, ApiError> {
    let path = format!("{}/invoice/{}/pay", CLIENT_PREFIX, urlencoding::encode(invoice_id));
    client::request(Method::Post, &path, Body::Empty, Auth::Client).await
}

pub async fn create_checkout_session(request: &CheckoutRequest) -> Result<CheckoutSession, ApiError> {
    let body = Body::Json(serde_json::to_value(request)?);
    client::post(&format!("{}/create-checkout-session", STRIPE_PREFIX), body, Auth::Client).await
}

pub async fn payment_status(session_id: &str) -> Result<PaymentStatus, ApiError> {
    let path = format!("{}/payment-status/{}", STRIPE_PREFIX, urlencoding::encode(session_id));
    client::get(&path, Auth::Client).await
}

pub(crate) fn js_error(e: JsValue) -> ApiError {
    ApiError::Network(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::addons::Bundle;

    #[test]
    fn one_order_per_backend_object() {
        let data = json!({"orders": [
            {"order_id": 11, "package": "Starter", "status": "PROCESSING", "date": "2025-03-04T10:00:00Z", "photos": 8},
            {"id": "x9", "videos": [{"filename": "a.mp4", "url": "u"}], "created_at": "2025-03-05"},
            {}
        ]});
        let orders = normalize_orders(&data);
        assert_eq!(orders.len(), 3);

        assert_eq!(orders[0].id, "11");
        assert_eq!(orders[0].status, "processing");
        assert_eq!(orders[0].status().label(), "Processing");
        assert_eq!(orders[0].photos, 8);

        assert_eq!(orders[1].id, "x9");
        assert_eq!(orders[1].package, "Unknown");
        assert_eq!(orders[1].status, "submitted");
        assert_eq!(orders[1].photos, 1);
        assert_eq!(orders[1].date, "2025-03-05");

        assert_eq!(orders[2].id, "order-2");
        assert!(!orders[2].date.is_empty());
    }

    #[test]
    fn bare_array_of_orders() {
        let data = json!([{"order_id": "A1", "status": "completed"}]);
        let orders = normalize_orders(&data);
        assert_eq!(orders.len(), 1);
        assert!(orders[0].is_completed());
        assert!(normalize_orders(&json!({"detail": "nope"})).is_empty());
    }

    #[test]
    fn unknown_status_displays_as_submitted() {
        assert_eq!(OrderStatus::from_key("on_hold").label(), "Submitted");
    }

    #[test]
    fn dates_format_as_ymd() {
        assert_eq!(format_ymd("2025-03-04T23:10:00+00:00"), "2025-03-04");
        assert_eq!(format_ymd("2025-03-04T23:10:00.123456"), "2025-03-04");
        assert_eq!(format_ymd("2025-03-04 08:00:00"), "2025-03-04");
        assert_eq!(format_ymd("last tuesday"), "last tuesday");
        assert_eq!(format_long_date("2025-03-04"), "March 04, 2025");
        assert_eq!(format_long_date(""), "");
    }

    #[test]
    fn downloads_grouped_by_order() {
        let data = json!({"downloads": [
            {"order_id": 5, "date": "2025-01-01", "videos": [
                {"filename": "Kitchen.MP4", "url": "https://cdn/k.mp4"},
                {"url": "https://cdn/2.mp4"}
            ]}
        ]});
        let items = flatten_downloads(&data);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "5-0");
        assert_eq!(items[0].name, "Kitchen");
        assert_eq!(items[1].name, "Video 2");
        assert_eq!(items[1].url.as_deref(), Some("https://cdn/2.mp4"));
    }

    #[test]
    fn downloads_as_flat_videos() {
        let data = json!({"downloads": [
            {"video_id": 31, "filename": "tour.mov", "url": "https://cdn/t.mov", "created_at": "2025-02-02T00:00:00Z"},
            {"video_id": 32}
        ]});
        let items = flatten_downloads(&data);
        assert_eq!(items[0].id, "31");
        assert_eq!(items[0].name, "tour");
        assert_eq!(items[1].name, "Video 32");
        assert_eq!(items[1].url, None);
        assert!(flatten_downloads(&json!({})).is_empty());
    }

    #[test]
    fn invoices_parse_with_defaults() {
        let data = json!({"invoices": [
            {"id": 4, "amount": 149.0, "is_paid": true, "date": "2025-03-01"},
            {"id": "inv-5"}
        ]});
        let invoices = parse_invoices(&data);
        assert_eq!(invoices.len(), 2);
        assert_eq!(invoices[0].id.as_deref(), Some("4"));
        assert_eq!(invoices[0].amount_label(), "$149.00");
        assert!(!invoices[1].is_paid);
        assert_eq!(invoices[1].amount_label(), "$0.00");
    }

    #[test]
    fn checkout_request_carries_cents_and_metadata() {
        let mut addons = AddOnSelection::default();
        addons.set_bundle(Some(Bundle::SocialBoost));
        let req = CheckoutRequest::new("7", "https://qt.example", "Starter", 49, &addons).unwrap();
        assert_eq!(req.amount, (49 + 90) * 100);
        assert_eq!(req.addon_type, "socialBoost");
        assert_eq!(
            req.success_url,
            "https://qt.example/portal?start=upload&paid=1&session_id={CHECKOUT_SESSION_ID}"
        );
        assert_eq!(req.cancel_url, "https://qt.example/portal?paid=0");
        assert_eq!(req.metadata.grand_total, "139");
        assert_eq!(req.metadata.addons_total, "90");
        assert!(req.metadata.addons.contains("\"bundle\":\"socialBoost\""));
    }

    #[test]
    fn session_id_from_id_or_url() {
        let s = CheckoutSession { id: Some("cs_test_123".into()), url: None };
        assert_eq!(s.session_id().as_deref(), Some("cs_test_123"));

        let s = CheckoutSession {
            id: None,
            url: Some("https://checkout.stripe.com/c/pay/cs_test_a1B2#fidkdWxOYHwnPyd1blpxYHZxWjA0".into()),
        };
        assert_eq!(s.session_id().as_deref(), Some("cs_test_a1B2"));

        let s = CheckoutSession { id: None, url: Some("https://example.com/pay?x=1".into()) };
        assert_eq!(s.session_id(), None);
        assert_eq!(CheckoutSession::default().session_id(), None);
    }
}
