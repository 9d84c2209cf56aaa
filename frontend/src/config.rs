
#[cfg(debug_assertions)]
const DEFAULT_BACKEND_URL: &str = "http://localhost:8000"; // Development URL when running locally

#[cfg(not(debug_assertions))]
const DEFAULT_BACKEND_URL: &str = "https://qunatum-tour.onrender.com"; // Production URL

/// Base URL of the REST backend. `QT_BACKEND_URL` at build time wins over the
/// per-profile default.
pub fn get_backend_url() -> &'static str {
    option_env!("QT_BACKEND_URL").unwrap_or(DEFAULT_BACKEND_URL)
}

pub fn stripe_publishable_key() -> Option<&'static str> {
    option_env!("QT_STRIPE_PUBLISHABLE_KEY").filter(|key| !key.is_empty())
}
