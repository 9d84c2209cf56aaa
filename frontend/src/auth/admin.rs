use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::admin::{self as admin_api, AdminSession};
use crate::Route;

/// Admin sign-in state shared with the header and the admin guard.
#[derive(Clone, PartialEq)]
pub struct AdminAuth {
    pub admin: Option<AdminSession>,
    handle: UseStateHandle<Option<AdminSession>>,
}

impl AdminAuth {
    pub async fn login(&self, email: &str, password: &str) -> Result<(), String> {
        let session = admin_api::login(email, password).await?;
        self.handle.set(Some(session));
        Ok(())
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<String, String> {
        let (session, message) = admin_api::register(email, password).await?;
        self.handle.set(Some(session));
        Ok(message)
    }

    pub async fn logout(&self) {
        admin_api::logout().await;
        self.handle.set(None);
    }
}

#[derive(Properties, PartialEq)]
pub struct AdminAuthProviderProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(AdminAuthProvider)]
pub fn admin_auth_provider(props: &AdminAuthProviderProps) -> Html {
    let admin = use_state(admin_api::stored_session);
    let auth = AdminAuth {
        admin: (*admin).clone(),
        handle: admin,
    };
    html! {
        <ContextProvider<AdminAuth> context={auth}>
            { for props.children.iter() }
        </ContextProvider<AdminAuth>>
    }
}

#[hook]
pub fn use_admin_auth() -> Option<AdminAuth> {
    use_context::<AdminAuth>()
}

#[derive(Properties, PartialEq)]
pub struct AdminGuardProps {
    #[prop_or_default]
    pub children: Children,
}

/// Renders its children only with an admin session.
#[function_component(AdminGuard)]
pub fn admin_guard(props: &AdminGuardProps) -> Html {
    let signed_in = use_admin_auth().map_or(false, |auth| auth.admin.is_some());
    if !signed_in {
        return html! { <Redirect<Route> to={Route::AdminLogin} /> };
    }
    html! { <>{ for props.children.iter() }</> }
}

pub mod forms {
    use web_sys::HtmlInputElement;
    use yew::prelude::*;
    use yew_router::prelude::*;
    use wasm_bindgen_futures::spawn_local;

    use super::use_admin_auth;
    use crate::admin::portal::AdminRoute;
    use crate::Route;

    #[function_component]
    pub fn AdminLogin() -> Html {
        let email = use_state(String::new);
        let password = use_state(String::new);
        let error = use_state(|| None::<String>);
        let is_loading = use_state(|| false);
        let auth = use_admin_auth();
        let navigator = use_navigator();

        let onsubmit = {
            let email = email.clone();
            let password = password.clone();
            let error_setter = error.clone();
            let loading_setter = is_loading.clone();
            Callback::from(move |e: SubmitEvent| {
                e.prevent_default();
                let Some(auth) = auth.clone() else { return };
                let email = (*email).clone();
                let password = (*password).clone();
                let error_setter = error_setter.clone();
                let loading_setter = loading_setter.clone();
                let navigator = navigator.clone();
                loading_setter.set(true);
                error_setter.set(None);
                spawn_local(async move {
                    match auth.login(&email, &password).await {
                        Ok(()) => {
                            if let Some(navigator) = navigator {
                                navigator.push(&AdminRoute::Home);
                            }
                        }
                        Err(message) => error_setter.set(Some(message)),
                    }
                    loading_setter.set(false);
                });
            })
        };

        html! {
            <div class="auth-shell">
                <div class="auth-card">
                    <h1>{"Admin Login"}</h1>
                    if let Some(message) = (*error).as_ref() {
                        <div class="error-message">{message}</div>
                    }
                    <form onsubmit={onsubmit}>
                        <label>{"Email"}</label>
                        <input
                            type="email"
                            required=true
                            placeholder="admin@quantumtours.com"
                            value={(*email).clone()}
                            oninput={let email = email.clone(); move |e: InputEvent| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                email.set(input.value());
                            }}
                        />
                        <label>{"Password"}</label>
                        <input
                            type="password"
                            required=true
                            value={(*password).clone()}
                            oninput={let password = password.clone(); move |e: InputEvent| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                password.set(input.value());
                            }}
                        />
                        <button type="submit" class="submit-button" disabled={*is_loading}>
                            { if *is_loading { "Signing in…" } else { "Sign in" } }
                        </button>
                    </form>
                    <div class="auth-redirect">
                        {"Need an admin account? "}
                        <Link<Route> to={Route::AdminRegister}>{"Register"}</Link<Route>>
                    </div>
                </div>
            </div>
        }
    }

    #[function_component]
    pub fn AdminRegister() -> Html {
        let email = use_state(String::new);
        let password = use_state(String::new);
        let confirm = use_state(String::new);
        let error = use_state(|| None::<String>);
        let success = use_state(|| None::<String>);
        let is_loading = use_state(|| false);
        let auth = use_admin_auth();
        let navigator = use_navigator();

        let onsubmit = {
            let email = email.clone();
            let password = password.clone();
            let confirm = confirm.clone();
            let error_setter = error.clone();
            let success_setter = success.clone();
            let loading_setter = is_loading.clone();
            Callback::from(move |e: SubmitEvent| {
                e.prevent_default();
                if *password != *confirm {
                    error_setter.set(Some("Passwords do not match.".to_string()));
                    return;
                }
                let Some(auth) = auth.clone() else { return };
                let email = (*email).clone();
                let password = (*password).clone();
                let error_setter = error_setter.clone();
                let success_setter = success_setter.clone();
                let loading_setter = loading_setter.clone();
                let navigator = navigator.clone();
                loading_setter.set(true);
                error_setter.set(None);
                spawn_local(async move {
                    match auth.register(&email, &password).await {
                        Ok(message) => {
                            success_setter.set(Some(message));
                            gloo_timers::future::TimeoutFuture::new(1_000).await;
                            if let Some(navigator) = navigator {
                                navigator.push(&AdminRoute::Home);
                            }
                        }
                        Err(message) => error_setter.set(Some(message)),
                    }
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

        html! {
            <div class="auth-shell">
                <div class="auth-card">
                    <h1>{"Admin Registration"}</h1>
                    if let Some(message) = (*error).as_ref() {
                        <div class="error-message">{message}</div>
                    }
                    if let Some(message) = (*success).as_ref() {
                        <div class="success-message">{message}</div>
                    }
                    <form onsubmit={onsubmit}>
                        <label>{"Email"}</label>
                        <input type="email" required=true value={(*email).clone()} oninput={bind(&email)} />
                        <label>{"Password"}</label>
                        <input type="password" required=true value={(*password).clone()} oninput={bind(&password)} />
                        <label>{"Confirm password"}</label>
                        <input type="password" required=true value={(*confirm).clone()} oninput={bind(&confirm)} />
                        <button type="submit" class="submit-button" disabled={*is_loading}>
                            { if *is_loading { "Registering…" } else { "Register" } }
                        </button>
                    </form>
                    <div class="auth-redirect">
                        {"Already registered? "}
                        <Link<Route> to={Route::AdminLogin}>{"Sign in"}</Link<Route>>
                    </div>
                </div>
            </div>
        }
    }
}
