use gloo_timers::future::TimeoutFuture;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::Route;

pub const MIN_NEW_PASSWORD_LEN: usize = 8;

pub fn passwords_valid(password: &str, confirm: &str) -> bool {
    password.chars().count() >= MIN_NEW_PASSWORD_LEN && password == confirm
}

pub fn validate(token: Option<&str>, password: &str, confirm: &str) -> Result<(), &'static str> {
    if token.map_or(true, str::is_empty) {
        return Err("Reset link is invalid or expired.");
    }
    if !passwords_valid(password, confirm) {
        return Err("Please meet the password rules.");
    }
    Ok(())
}

#[function_component]
pub fn SetNewPassword() -> Html {
    let token = yew_hooks::use_search_param("token".to_string());
    let password = use_state(String::new);
    let confirm = use_state(String::new);
    let is_loading = use_state(|| false);
    let error = use_state(|| None::<String>);
    let done = use_state(|| false);

    let onsubmit = {
        let password = password.clone();
        let confirm = confirm.clone();
        let error_setter = error.clone();
        let loading_setter = is_loading.clone();
        let done = done.clone();
        let token = token.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            error_setter.set(None);
            if let Err(message) = validate(token.as_deref(), &password, &confirm) {
                error_setter.set(Some(message.to_string()));
                return;
            }
            let loading_setter = loading_setter.clone();
            let done = done.clone();
            loading_setter.set(true);
            // No reset endpoint exists yet; the form only confirms locally.
            spawn_local(async move {
                TimeoutFuture::new(900).await;
                done.set(true);
                loading_setter.set(false);
            });
        })
    };

    let bind = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };
    let valid = passwords_valid(&password, &confirm);

    html! {
        <section class="auth-shell">
            <div class="auth-card">
                <h1>{"Set new password"}</h1>
                <div class="auth-divider">{"Choose a strong password"}</div>
                if let Some(message) = (*error).as_ref() {
                    <div class="error-message">{message}</div>
                }
                if *done {
                    <div class="success-message">
                        <strong>{"Done! "}</strong>
                        {"Your password has been updated. You can now sign in."}
                        <br />
                        <Link<Route> to={Route::SignIn}>{"Back to sign in →"}</Link<Route>>
                    </div>
                } else {
                    <form onsubmit={onsubmit}>
                        <label>{"New password"}</label>
                        <input type="password" placeholder="At least 8 characters"
                            value={(*password).clone()} oninput={bind(&password)} />
                        <label>{"Confirm password"}</label>
                        <input type="password" placeholder="Re-enter password"
                            value={(*confirm).clone()} oninput={bind(&confirm)} />
                        <p class="hint">{"Password must be at least "}<b>{"8 characters"}</b>{"."}</p>
                        <button type="submit" class="submit-button" disabled={*is_loading || !valid}>
                            { if *is_loading { "Saving…" } else { "Reset password" } }
                        </button>
                    </form>
                }
            </div>
            <aside class="brand-pane">
                <div class="brand-logo">{"QuantumTours"}</div>
                <h2>{"Reset & get back in "}<span>{"#withQuantum"}</span></h2>
            </aside>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_token_is_reported_first() {
        assert_eq!(validate(None, "longenough", "longenough"), Err("Reset link is invalid or expired."));
        assert_eq!(validate(Some(""), "x", "y"), Err("Reset link is invalid or expired."));
    }

    #[test]
    fn needs_eight_matching_characters() {
        assert!(!passwords_valid("short", "short"));
        assert!(!passwords_valid("longenough", "longenougH"));
        assert!(passwords_valid("longenough", "longenough"));
        assert_eq!(validate(Some("t"), "1234567", "1234567"), Err("Please meet the password rules."));
        assert_eq!(validate(Some("t"), "12345678", "12345678"), Ok(()));
    }
}
