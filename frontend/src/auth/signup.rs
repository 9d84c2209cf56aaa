use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::auth::guard::{navigate_to, return_target};
use crate::auth::session::use_session;
use crate::browser;
use crate::Route;

pub const MIN_PASSWORD_LEN: usize = 6;

pub struct SignUpForm<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm: &'a str,
}

/// Blocks submission unless every field is filled and the passwords agree.
pub fn validate(form: &SignUpForm) -> Result<(), &'static str> {
    if [form.name, form.email, form.password, form.confirm]
        .iter()
        .any(|f| f.trim().is_empty())
    {
        return Err("Please fill all fields.");
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Use at least 6 characters.");
    }
    if form.password != form.confirm {
        return Err("Passwords do not match.");
    }
    Ok(())
}

#[function_component]
pub fn SignUp() -> Html {
    let name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let confirm = use_state(String::new);
    let show_password = use_state(|| false);
    let error = use_state(|| None::<String>);
    let is_loading = use_state(|| false);
    let session = use_session();
    let navigator = use_navigator();
    let from = yew_hooks::use_search_param("from".to_string());

    let onsubmit = {
        let name = name.clone();
        let email = email.clone();
        let password = password.clone();
        let confirm = confirm.clone();
        let error_setter = error.clone();
        let loading_setter = is_loading.clone();
        let session = session.clone();
        let navigator = navigator.clone();
        let from = from.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            error_setter.set(None);
            let form = SignUpForm {
                name: &name,
                email: &email,
                password: &password,
                confirm: &confirm,
            };
            if let Err(message) = validate(&form) {
                error_setter.set(Some(message.to_string()));
                return;
            }
            let Some(session) = session.clone() else { return };
            let (name, email, password) = ((*name).clone(), (*email).clone(), (*password).clone());
            let error_setter = error_setter.clone();
            let loading_setter = loading_setter.clone();
            let target = return_target(from.as_deref(), "/portal");
            let navigator = navigator.clone();
            loading_setter.set(true);
            spawn_local(async move {
                match session.sign_up(&name, &email, &password).await {
                    Ok(user) => {
                        log::info!("Account created for {}", user.name);
                        match navigator {
                            Some(navigator) => navigate_to(&navigator, &target),
                            None => browser::hard_redirect(&target),
                        }
                    }
                    Err(e) => {
                        let message = e.to_string();
                        error_setter.set(Some(if message.is_empty() {
                            "Could not create your account.".to_string()
                        } else {
                            message
                        }));
                    }
                }
                loading_setter.set(false);
            });
        })
    };

    let on_guest = {
        let error_setter = error.clone();
        let session = session.clone();
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(session) = session.clone() else { return };
            let error_setter = error_setter.clone();
            let navigator = navigator.clone();
            error_setter.set(None);
            spawn_local(async move {
                match session.sign_in_as_guest().await {
                    Ok(_) => match navigator {
                        Some(navigator) => navigate_to(&navigator, "/portal?new=1"),
                        None => browser::hard_redirect("/portal?new=1"),
                    },
                    Err(e) => error_setter.set(Some(format!("Guest sign-in failed. {}", e))),
                }
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
    let toggle_show = {
        let show_password = show_password.clone();
        Callback::from(move |_: MouseEvent| show_password.set(!*show_password))
    };
    let password_type = if *show_password { "text" } else { "password" };

    html! {
        <section class="auth-shell">
            <div class="auth-card">
                <h1>{"Sign Up"}</h1>
                <div class="auth-divider">{"Create your account"}</div>
                if let Some(message) = (*error).as_ref() {
                    <div class="error-message">{message}</div>
                }
                <form onsubmit={onsubmit}>
                    <label>{"Name"}</label>
                    <input type="text" placeholder="Your name" value={(*name).clone()} oninput={bind(&name)} />
                    <label>{"Email"}</label>
                    <input type="email" placeholder="you@gmail.com" value={(*email).clone()} oninput={bind(&email)} />
                    <label>{"Password"}</label>
                    <div class="password-wrap">
                        <input type={password_type} placeholder="••••••••" value={(*password).clone()} oninput={bind(&password)} />
                        <button type="button" class="eye-button" onclick={toggle_show.clone()}>
                            { if *show_password { "Hide" } else { "Show" } }
                        </button>
                    </div>
                    <label>{"Confirm password"}</label>
                    <input type={password_type} placeholder="••••••••" value={(*confirm).clone()} oninput={bind(&confirm)} />
                    <button type="submit" class="submit-button" disabled={*is_loading}>
                        { if *is_loading { "Creating account…" } else { "Create account" } }
                    </button>
                </form>
                <button type="button" class="guest-button" onclick={on_guest}>{"Continue as guest"}</button>
                <p class="auth-redirect">
                    {"Already have an account? "}
                    <Link<Route> to={Route::SignIn}>{"Sign in"}</Link<Route>>
                </p>
            </div>
            <aside class="brand-pane">
                <div class="brand-logo">{"QuantumTours"}</div>
                <h2>{"Make every photo a tour "}<span>{"#withQuantumTours"}</span></h2>
                <p>{"We turn your stills into smooth, on-brand walkthroughs. Fast turnaround. Budget-friendly."}</p>
            </aside>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form<'a>(name: &'a str, email: &'a str, password: &'a str, confirm: &'a str) -> SignUpForm<'a> {
        SignUpForm { name, email, password, confirm }
    }

    #[test]
    fn mismatched_passwords_are_blocked() {
        assert_eq!(
            validate(&form("Jane", "jane@realty.com", "secret1", "secret2")),
            Err("Passwords do not match.")
        );
    }

    #[test]
    fn every_field_is_required() {
        assert_eq!(validate(&form("", "a@b.c", "secret1", "secret1")), Err("Please fill all fields."));
        assert_eq!(validate(&form("Jane", "a@b.c", "secret1", "  ")), Err("Please fill all fields."));
    }

    #[test]
    fn short_passwords_are_rejected() {
        assert_eq!(validate(&form("Jane", "a@b.c", "abc", "abc")), Err("Use at least 6 characters."));
        assert_eq!(validate(&form("Jane", "a@b.c", "abcdef", "abcdef")), Ok(()));
    }
}
