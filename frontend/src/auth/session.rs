use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use gloo_timers::callback::Timeout;
use serde_json::Value;
use yew::prelude::*;

use crate::api::auth::{self as auth_api, SessionUser};
use crate::api::client::ApiError;
use crate::browser;
use crate::storage;

pub const SESSION_EXPIRED: &str = "Your session expired. Please sign in again.";

/// Reads the `exp` claim (seconds since epoch) without verifying the token.
pub fn jwt_expiry(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Value = serde_json::from_slice(&bytes).ok()?;
    match claims.get("exp")? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        _ => None,
    }
}

/// Milliseconds until the token expires, clamped to what `setTimeout` accepts.
/// Zero means already expired.
pub fn expiry_delay_ms(exp_secs: i64, now_ms: f64) -> u32 {
    let remaining = exp_secs as f64 * 1000.0 - now_ms;
    if remaining <= 0.0 {
        0
    } else {
        remaining.min(i32::MAX as f64) as u32
    }
}

fn expire_now(with_alert: bool) {
    storage::clear();
    if with_alert {
        browser::alert(SESSION_EXPIRED);
    }
    browser::hard_redirect("/portal");
}

/// Arms the auto-logout timer for the stored access token. Dropping the
/// returned handle cancels it.
fn schedule_expiry() -> Option<Timeout> {
    let token = storage::access_token()?;
    let Some(exp) = jwt_expiry(&token) else {
        log::warn!("Access token has no readable exp claim");
        return None;
    };
    match expiry_delay_ms(exp, js_sys::Date::now()) {
        0 => {
            expire_now(false);
            None
        }
        delay => Some(Timeout::new(delay, || expire_now(true))),
    }
}

fn restore_user() -> Option<SessionUser> {
    storage::access_token()?;
    storage::get_json::<SessionUser>(storage::SESSION_USER)
}

#[derive(Clone, PartialEq)]
pub struct Session {
    pub user: Option<SessionUser>,
    pub loading: bool,
    user_handle: UseStateHandle<Option<SessionUser>>,
}

impl Session {
    pub fn signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn email(&self) -> Option<String> {
        self.user.as_ref().and_then(|u| u.email.clone())
    }

    /// Stores tokens and user from an auth response and publishes the user.
    pub fn apply(&self, payload: &Value, name_override: Option<&str>) -> SessionUser {
        let (user, tokens) = auth_api::session_from_payload(payload, name_override);
        if let Some(access) = tokens.access {
            storage::set(storage::ACCESS_TOKEN, &access);
        }
        if let Some(refresh) = tokens.refresh {
            storage::set(storage::REFRESH_TOKEN, &refresh);
        }
        storage::set_json(storage::SESSION_USER, &user);
        self.user_handle.set(Some(user.clone()));
        user
    }

    pub async fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<SessionUser, ApiError> {
        let data = auth_api::signup(name, email, password).await?;
        Ok(self.apply(&data, Some(name)))
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SessionUser, ApiError> {
        let data = auth_api::signin(email, password).await?;
        Ok(self.apply(&data, None))
    }

    pub async fn sign_in_as_guest(&self) -> Result<SessionUser, ApiError> {
        let data = auth_api::guest().await?;
        Ok(self.apply(&data, Some("Guest")))
    }

    pub async fn request_password_reset(&self, email: &str) -> Result<Value, ApiError> {
        auth_api::forgot_password(email).await
    }

    pub fn sign_out(&self) {
        storage::remove(storage::ACCESS_TOKEN);
        storage::remove(storage::SESSION_USER);
        self.user_handle.set(None);
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let user = use_state(|| None::<SessionUser>);
    let loading = use_state(|| true);

    {
        let user = user.clone();
        let loading = loading.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(restored) = restore_user() {
                    log::info!("Restored session for {}", restored.name);
                    user.set(Some(restored));
                }
                loading.set(false);
                || ()
            },
            (),
        );
    }

    // Re-armed whenever the signed-in user changes, since a new sign-in
    // brings a new token.
    use_effect_with_deps(
        move |_| {
            let timer = schedule_expiry();
            move || drop(timer)
        },
        (*user).clone(),
    );

    let session = Session {
        user: (*user).clone(),
        loading: *loading,
        user_handle: user,
    };

    html! {
        <ContextProvider<Session> context={session}>
            { for props.children.iter() }
        </ContextProvider<Session>>
    }
}

#[hook]
pub fn use_session() -> Option<Session> {
    use_context::<Session>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with(claims: &str) -> String {
        format!("eyJhbGciOiJIUzI1NiJ9.{}.sig", URL_SAFE_NO_PAD.encode(claims))
    }

    #[test]
    fn reads_exp_claim() {
        assert_eq!(jwt_expiry(&token_with(r#"{"sub":"7","exp":1760000000}"#)), Some(1_760_000_000));
        assert_eq!(jwt_expiry(&token_with(r#"{"exp":1760000000.5}"#)), Some(1_760_000_000));
    }

    #[test]
    fn unreadable_tokens_have_no_expiry() {
        assert_eq!(jwt_expiry("not-a-jwt"), None);
        assert_eq!(jwt_expiry(&token_with(r#"{"sub":"7"}"#)), None);
        assert_eq!(jwt_expiry("a.%%%.c"), None);
        assert_eq!(jwt_expiry(&token_with(r#"{"exp":"soon"}"#)), None);
    }

    #[test]
    fn padded_payload_is_accepted() {
        let padded = format!("h.{}==.s", URL_SAFE_NO_PAD.encode(r#"{"exp":10}"#));
        assert_eq!(jwt_expiry(&padded), Some(10));
    }

    #[test]
    fn delay_until_expiry() {
        assert_eq!(expiry_delay_ms(100, 40_000.0), 60_000);
        assert_eq!(expiry_delay_ms(100, 100_000.0), 0);
        assert_eq!(expiry_delay_ms(100, 200_000.0), 0);
        assert_eq!(expiry_delay_ms(i64::MAX / 2000, 0.0), i32::MAX as u32);
    }
}
