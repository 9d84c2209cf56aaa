use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use web_sys::{window, Storage};

pub const ACCESS_TOKEN: &str = "access_token";
pub const REFRESH_TOKEN: &str = "refresh_token";
pub const SESSION_USER: &str = "session_user";
pub const ADMIN_SESSION: &str = "admin";

// Survive the Stripe redirect round-trip.
pub const PRESELECTED_PACKAGE: &str = "qt_pkgId";
pub const PRESELECTED_ADDONS: &str = "qt_addons";

fn local_storage() -> Option<Storage> {
    window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
}

pub fn get(key: &str) -> Option<String> {
    local_storage()
        .and_then(|storage| storage.get_item(key).ok())
        .flatten()
}

pub fn set(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        if storage.set_item(key, value).is_err() {
            log::warn!("Failed to write {} to localStorage", key);
        }
    }
}

pub fn remove(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

pub fn clear() {
    if let Some(storage) = local_storage() {
        let _ = storage.clear();
    }
}

pub fn get_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    get(key).and_then(|raw| serde_json::from_str(&raw).ok())
}

pub fn set_json<T: Serialize>(key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => set(key, &raw),
        Err(e) => log::error!("Failed to serialize {}: {}", key, e),
    }
}

pub fn access_token() -> Option<String> {
    get(ACCESS_TOKEN).filter(|t| !t.is_empty())
}

/// Per-user portal flags, keyed by email.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PortalState {
    #[serde(rename = "hasOrder", default)]
    pub has_order: bool,
}

pub fn portal_state_key(email: &str) -> String {
    format!("qt_portal_state_{}", email)
}

pub fn get_portal_state(email: Option<&str>) -> PortalState {
    email
        .and_then(|email| get_json(&portal_state_key(email)))
        .unwrap_or_default()
}

pub fn set_portal_state(email: Option<&str>, has_order: bool) -> Option<PortalState> {
    let email = email?;
    let mut state = get_portal_state(Some(email));
    state.has_order = has_order;
    set_json(&portal_state_key(email), &state);
    Some(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portal_state_key_is_scoped_by_email() {
        assert_eq!(portal_state_key("a@b.com"), "qt_portal_state_a@b.com");
    }

    #[test]
    fn portal_state_uses_camel_case_flag() {
        let state: PortalState = serde_json::from_str(r#"{"hasOrder":true}"#).unwrap();
        assert!(state.has_order);
        let missing: PortalState = serde_json::from_str("{}").unwrap();
        assert!(!missing.has_order);
        assert_eq!(
            serde_json::to_string(&PortalState { has_order: false }).unwrap(),
            r#"{"hasOrder":false}"#
        );
    }
}
