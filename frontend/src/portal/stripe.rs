use serde::Serialize;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use crate::api::portal::CheckoutSession;
use crate::browser;
use crate::config;

#[wasm_bindgen]
extern "C" {
    type StripeJs;

    // Stripe.js is loaded from index.html and exposes a global `Stripe`.
    #[wasm_bindgen(catch, js_name = Stripe)]
    fn load_stripe(publishable_key: &str) -> Result<StripeJs, JsValue>;

    #[wasm_bindgen(method, js_name = redirectToCheckout)]
    fn redirect_to_checkout(this: &StripeJs, options: &JsValue) -> js_sys::Promise;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RedirectOptions<'a> {
    session_id: &'a str,
}

fn js_message(value: &JsValue) -> String {
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| "Unable to start checkout".to_string())
}

async fn redirect_with_stripe(key: &str, session_id: &str) -> Result<(), String> {
    let stripe = load_stripe(key).map_err(|e| js_message(&e))?;
    let options = serde_wasm_bindgen::to_value(&RedirectOptions { session_id }).map_err(|e| e.to_string())?;
    let result = JsFuture::from(stripe.redirect_to_checkout(&options))
        .await
        .map_err(|e| js_message(&e))?;
    // Resolves with `{ error }` when the redirect could not happen.
    let error = js_sys::Reflect::get(&result, &JsValue::from_str("error")).unwrap_or(JsValue::UNDEFINED);
    if error.is_undefined() || error.is_null() {
        Ok(())
    } else {
        Err(js_message(&error))
    }
}

/// Sends the browser to Stripe Checkout: through Stripe.js when a publishable
/// key is configured, else by following the session URL.
pub async fn go_to_checkout(session: &CheckoutSession) -> Result<(), String> {
    if let (Some(session_id), Some(key)) = (session.session_id(), config::stripe_publishable_key()) {
        return redirect_with_stripe(key, &session_id).await;
    }
    match session.url.as_deref().filter(|u| !u.is_empty()) {
        Some(url) => {
            browser::hard_redirect(url);
            Ok(())
        }
        None => Err("Checkout session missing id/url".to_string()),
    }
}
