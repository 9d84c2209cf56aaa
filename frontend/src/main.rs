use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, Level};
use web_sys::MouseEvent;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

mod config;
mod storage;
mod browser;
mod api {
    pub mod client;
    pub mod fields;
    pub mod auth;
    pub mod portal;
    pub mod admin;
}
mod auth {
    pub mod session;
    pub mod admin;
    pub mod guard;
    pub mod signup;
    pub mod signin;
    pub mod set_password;
}
mod pricing {
    pub mod addons;
    pub mod packages;
}
mod portal {
    pub mod addons;
    pub mod payment;
    pub mod stripe;
    pub mod upload;
    pub mod gate;
    pub mod hub;
    pub mod order_status;
    pub mod downloads;
    pub mod invoices;
    pub mod reorder;
    pub mod brand_assets;
    pub mod client_portal;
}
mod admin {
    pub mod portal;
    pub mod orders;
    pub mod logs;
    pub mod notifications;
    pub mod clients;
    pub mod pricing_editor;
    pub mod prompts;
}
mod pages {
    pub mod home;
    pub mod pricing;
    pub mod footer;
}

use admin::portal::AdminPortal;
use auth::admin::forms::{AdminLogin, AdminRegister};
use auth::admin::{use_admin_auth, AdminAuthProvider, AdminGuard};
use auth::guard::ProtectedRoute;
use auth::session::{use_session, SessionProvider};
use auth::set_password::SetNewPassword;
use auth::signin::SignIn;
use auth::signup::SignUp;
use pages::footer::Footer;
use pages::home::Home;
use pages::pricing::PricingPage;
use portal::client_portal::ClientPortal;
use pricing::packages::PricingProvider;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/pricing")]
    Pricing,
    #[at("/signin")]
    SignIn,
    #[at("/signup")]
    SignUp,
    #[at("/set-password")]
    SetPassword,
    #[at("/portal")]
    Portal,
    #[at("/admin-login")]
    AdminLogin,
    #[at("/admin-register")]
    AdminRegister,
    #[at("/admin")]
    AdminRoot,
    #[at("/admin/*")]
    Admin,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        },
        Route::Pricing => {
            info!("Rendering Pricing page");
            html! { <PricingPage /> }
        },
        Route::SignIn => html! { <SignIn /> },
        Route::SignUp => html! { <SignUp /> },
        Route::SetPassword => html! { <SetNewPassword /> },
        Route::Portal => {
            info!("Rendering client portal");
            html! {
                <ProtectedRoute>
                    <ClientPortal />
                </ProtectedRoute>
            }
        },
        Route::AdminLogin => html! { <AdminLogin /> },
        Route::AdminRegister => html! { <AdminRegister /> },
        Route::AdminRoot | Route::Admin => {
            info!("Rendering admin portal");
            html! {
                <AdminGuard>
                    <AdminPortal />
                </AdminGuard>
            }
        },
        Route::NotFound => html! { <Redirect<Route> to={Route::Home} /> },
    }
}

/// The header steps aside for the full-page auth screens.
pub fn is_auth_path(path: &str) -> bool {
    ["/signin", "/signup", "/set-password"]
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

#[function_component(Header)]
pub fn header() -> Html {
    let session = use_session();
    let admin_auth = use_admin_auth();
    let navigator = use_navigator();
    let route = use_route::<Route>();
    let path = use_location().map(|l| l.path().to_string()).unwrap_or_default();
    let menu_open = use_state(|| false);
    let is_scrolled = use_state(|| false);

    {
        let is_scrolled = is_scrolled.clone();
        use_effect_with_deps(move |_| {
            let window = web_sys::window();
            let listener = window.as_ref().map(|w| {
                let target = w.clone();
                let scroll_callback = Closure::wrap(Box::new(move || {
                    is_scrolled.set(target.scroll_y().unwrap_or(0.0) > 40.0);
                }) as Box<dyn FnMut()>);
                let _ = w.add_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref());
                scroll_callback
            });

            move || {
                if let (Some(w), Some(cb)) = (window, listener) {
                    let _ = w.remove_event_listener_with_callback("scroll", cb.as_ref().unchecked_ref());
                }
            }
        }, ());
    }

    if is_auth_path(&path) {
        return html! {};
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(false))
    };

    let go = |target: Route| {
        let navigator = navigator.clone();
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
            if let Some(nav) = navigator.as_ref() {
                nav.push(&target);
            }
        })
    };

    let handle_sign_out = {
        let session = session.clone();
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(session) = session.as_ref() {
                session.sign_out();
            }
            if let Some(nav) = navigator.as_ref() {
                nav.push(&Route::Home);
            }
        })
    };

    let handle_admin_sign_out = {
        let admin_auth = admin_auth.clone();
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            let admin_auth = admin_auth.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                if let Some(auth) = admin_auth {
                    auth.logout().await;
                }
                if let Some(nav) = navigator {
                    nav.push(&Route::Home);
                }
            });
        })
    };

    let is_admin_area = path.starts_with("/admin");
    let admin_signed_in = admin_auth.as_ref().map_or(false, |a| a.admin.is_some());
    let user = session.as_ref().and_then(|s| s.user.clone());

    let nav_link = |target: Route, label: &'static str| {
        let active = match (&route, &target) {
            (Some(Route::Admin), Route::AdminRoot) => true,
            (Some(current), target) => current == target,
            (None, _) => false,
        };
        html! {
            <div onclick={close_menu.clone()}>
                <Link<Route> to={target} classes={classes!("nav-link", active.then_some("is-active"))}>
                    {label}
                </Link<Route>>
            </div>
        }
    };

    let menu_class = if *menu_open {
        "nav-right mobile-menu-open"
    } else {
        "nav-right"
    };

    html! {
        <nav class={classes!("top-nav", (*is_scrolled).then(|| "scrolled"))}>
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {"QuantumTours"}
                </Link<Route>>

                <button class="burger-menu" onclick={toggle_menu}>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={menu_class}>
                    { nav_link(Route::Home, "Home") }
                    { nav_link(Route::Portal, "Client Portal") }
                    { nav_link(Route::Pricing, "Pricing") }
                    { nav_link(Route::AdminRoot, "Admin Panel") }
                    <div class="header-actions">
                        if is_admin_area && admin_signed_in {
                            <button class="nav-logout-button" onclick={handle_admin_sign_out}>
                                {"Admin Sign out"}
                            </button>
                        } else if let Some(user) = user {
                            <button class="nav-avatar" title={user.name.clone()} onclick={go(Route::Portal)}>
                                {user.initial().to_string()}
                            </button>
                            <button class="nav-logout-button" onclick={handle_sign_out}>
                                {"Sign out"}
                            </button>
                        } else {
                            <button class="nav-login-button" onclick={go(Route::SignIn)}>
                                {"Sign in"}
                            </button>
                            <button class="nav-cta-button" onclick={go(Route::SignUp)}>
                                {"Get Started"}
                            </button>
                        }
                    </div>
                </div>
            </div>
        </nav>
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <SessionProvider>
                <AdminAuthProvider>
                    <PricingProvider>
                        <div class="app">
                            <Header />
                            <Switch<Route> render={switch} />
                            <Footer />
                        </div>
                    </PricingProvider>
                </AdminAuthProvider>
            </SessionProvider>
        </BrowserRouter>
    }
}

fn main() {
    console_error_panic_hook::set_once();

    if let Err(e) = console_log::init_with_level(Level::Info) {
        gloo_console::error!(format!("error initializing log: {}", e));
    }

    info!("Starting QuantumTours frontend");
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_resolve() {
        assert!(matches!(Route::recognize("/portal"), Some(Route::Portal)));
        assert!(matches!(Route::recognize("/admin"), Some(Route::AdminRoot)));
        assert!(matches!(Route::recognize("/admin/orders"), Some(Route::Admin)));
        assert!(matches!(Route::recognize("/nowhere"), Some(Route::NotFound)));
        assert_eq!(Route::SetPassword.to_path(), "/set-password");
    }

    #[test]
    fn header_hides_on_auth_paths() {
        assert!(is_auth_path("/signin"));
        assert!(is_auth_path("/set-password"));
        assert!(!is_auth_path("/admin-login"));
        assert!(!is_auth_path("/"));
    }
}
