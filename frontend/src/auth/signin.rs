use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::auth::guard::{navigate_to, return_target};
use crate::auth::session::use_session;
use crate::browser;
use crate::Route;

#[function_component]
pub fn SignIn() -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let show_password = use_state(|| false);
    let error = use_state(|| None::<String>);
    let is_loading = use_state(|| false);
    let session = use_session();
    let navigator = use_navigator();
    let from = yew_hooks::use_search_param("from".to_string());

    let go = {
        let navigator = navigator.clone();
        move |target: String| match &navigator {
            Some(navigator) => navigate_to(navigator, &target),
            None => browser::hard_redirect(&target),
        }
    };

    let onsubmit = {
        let email = email.clone();
        let password = password.clone();
        let error_setter = error.clone();
        let loading_setter = is_loading.clone();
        let session = session.clone();
        let from = from.clone();
        let go = go.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(session) = session.clone() else { return };
            let email = (*email).clone();
            let password = (*password).clone();
            let error_setter = error_setter.clone();
            let loading_setter = loading_setter.clone();
            let target = return_target(from.as_deref(), "/portal");
            let go = go.clone();
            error_setter.set(None);
            loading_setter.set(true);
            spawn_local(async move {
                match session.sign_in(&email, &password).await {
                    Ok(_) => go(target),
                    Err(e) => {
                        log::warn!("Sign in failed: {}", e);
                        error_setter.set(Some(e.to_string()));
                    }
                }
                loading_setter.set(false);
            });
        })
    };

    let on_guest = {
        let error_setter = error.clone();
        let session = session.clone();
        let from = from.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(session) = session.clone() else { return };
            let error_setter = error_setter.clone();
            let target = return_target(from.as_deref(), "/portal?new=1");
            let go = go.clone();
            error_setter.set(None);
            spawn_local(async move {
                match session.sign_in_as_guest().await {
                    Ok(_) => go(target),
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

    html! {
        <section class="auth-shell">
            <div class="auth-card">
                <h1>{"Sign in"}</h1>
                <div class="auth-divider">{"Sign in with email"}</div>
                if let Some(message) = (*error).as_ref() {
                    <div class="error-message">{message}</div>
                }
                <form onsubmit={onsubmit}>
                    <label>{"Email"}</label>
                    <input type="email" required=true placeholder="you@gmail.com"
                        value={(*email).clone()} oninput={bind(&email)} />
                    <label>{"Password"}</label>
                    <div class="password-wrap">
                        <input type={if *show_password { "text" } else { "password" }} required=true
                            placeholder="••••••••" value={(*password).clone()} oninput={bind(&password)} />
                        <button type="button" class="eye-button" onclick={toggle_show}>
                            { if *show_password { "Hide" } else { "Show" } }
                        </button>
                    </div>
                    <ForgotPassword initial_email={(*email).clone()} />
                    <button type="submit" class="submit-button" disabled={*is_loading}>
                        { if *is_loading { "Signing in…" } else { "Sign in" } }
                    </button>
                </form>
                <button type="button" class="guest-button" onclick={on_guest}>{"Continue as guest"}</button>
                <p class="auth-redirect">
                    {"No account? "}
                    <Link<Route> to={Route::SignUp}>{"Create one"}</Link<Route>>
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

#[derive(Properties, PartialEq)]
pub struct ForgotPasswordProps {
    #[prop_or_default]
    pub initial_email: String,
}

/// "Forgot password" link plus its reset-link dialog.
#[function_component(ForgotPassword)]
pub fn forgot_password(props: &ForgotPasswordProps) -> Html {
    let open = use_state(|| false);
    let email = use_state(String::new);
    let busy = use_state(|| false);
    let message = use_state(|| None::<String>);
    let error = use_state(|| None::<String>);
    let session = use_session();

    let on_open = {
        let open = open.clone();
        let email = email.clone();
        let message = message.clone();
        let error = error.clone();
        let initial = props.initial_email.clone();
        Callback::from(move |_: MouseEvent| {
            email.set(initial.clone());
            message.set(None);
            error.set(None);
            open.set(true);
        })
    };
    let on_close = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(false))
    };

    // The dialog sits inside the sign-in form, so it must not submit it.
    let on_send = {
        let email = email.clone();
        let busy = busy.clone();
        let message = message.clone();
        let error = error.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            let Some(session) = session.clone() else { return };
            let email = (*email).clone();
            if email.trim().is_empty() {
                error.set(Some("Please enter your email.".to_string()));
                return;
            }
            let busy = busy.clone();
            let message = message.clone();
            let error = error.clone();
            busy.set(true);
            error.set(None);
            spawn_local(async move {
                match session.request_password_reset(&email).await {
                    Ok(_) => message.set(Some("If that email is registered, a reset link has been sent.".to_string())),
                    Err(e) => error.set(Some(format!("Couldn’t send reset link. {}", e))),
                }
                busy.set(false);
            });
        })
    };

    html! {
        <>
            <div class="forgot-row">
                <span role="link" tabindex="0" class="forgot-link" onclick={on_open}>{"Forgot password"}</span>
            </div>
            if *open {
                <div class="dialog-overlay">
                    <div class="dialog" role="dialog" aria-modal="true">
                        <h3>{"Reset your password"}</h3>
                        <p>{"Enter your account email and we’ll send you a reset link."}</p>
                        if let Some(err) = (*error).as_ref() {
                            <div class="error-message">{err}</div>
                        }
                        if let Some(ok) = (*message).as_ref() {
                            <div class="success-message">{ok}</div>
                        } else {
                            <input
                                type="email"
                                placeholder="you@gmail.com"
                                value={(*email).clone()}
                                oninput={let email = email.clone(); move |e: InputEvent| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    email.set(input.value());
                                }}
                            />
                            <div class="dialog-buttons">
                                <button type="button" class="submit-button" disabled={*busy} onclick={on_send}>
                                    { if *busy { "Sending…" } else { "Send link" } }
                                </button>
                            </div>
                        }
                        <button type="button" class="ghost-button" onclick={on_close}>{"Close"}</button>
                    </div>
                </div>
            }
        </>
    }
}
