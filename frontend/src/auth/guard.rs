use yew::prelude::*;
use yew_router::prelude::*;

use crate::auth::session::use_session;
use crate::Route;

/// Where to go after sign-in: the page the guard bounced us from, else the
/// given default.
pub fn return_target(from: Option<&str>, default: &str) -> String {
    match from {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => default.to_string(),
    }
}

/// Splits `/path?a=1&b=2` into the path and decoded query pairs.
pub fn split_target(target: &str) -> (String, Vec<(String, String)>) {
    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    let pairs = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let decode = |s: &str| {
                urlencoding::decode(&s.replace('+', " "))
                    .map(|d| d.into_owned())
                    .unwrap_or_else(|_| s.to_string())
            };
            (decode(key), decode(value))
        })
        .collect();
    (path.to_string(), pairs)
}

/// In-app navigation to a path that may carry a query string.
pub fn navigate_to(navigator: &Navigator, target: &str) {
    let (path, query) = split_target(target);
    let route = Route::recognize(&path).unwrap_or(Route::Home);
    if query.is_empty() {
        navigator.replace(&route);
    } else if let Err(e) = navigator.replace_with_query(&route, &query) {
        log::error!("Navigation to {} failed: {:?}", target, e);
        navigator.replace(&route);
    }
}

#[derive(Properties, PartialEq)]
pub struct ProtectedRouteProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(ProtectedRoute)]
pub fn protected_route(props: &ProtectedRouteProps) -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let location = use_location();

    let loading = session.as_ref().map_or(false, |s| s.loading);
    let signed_in = session.as_ref().map_or(false, |s| s.signed_in());

    {
        let from = location
            .as_ref()
            .map(|l| format!("{}{}", l.path(), l.query_str()))
            .unwrap_or_default();
        use_effect_with_deps(
            move |(loading, signed_in)| {
                if !*loading && !*signed_in {
                    if let Some(navigator) = navigator {
                        if let Err(e) = navigator.replace_with_query(&Route::SignIn, &[("from", from)]) {
                            log::error!("Failed to redirect to sign in: {:?}", e);
                            navigator.replace(&Route::SignIn);
                        }
                    }
                }
                || ()
            },
            (loading, signed_in),
        );
    }

    if loading || !signed_in {
        return html! {};
    }
    html! { <>{ for props.children.iter() }</> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_to_origin_path() {
        assert_eq!(return_target(Some("/portal?tab=invoices"), "/portal"), "/portal?tab=invoices");
        assert_eq!(return_target(None, "/portal?new=1"), "/portal?new=1");
    }

    #[test]
    fn splits_path_and_query() {
        let (path, query) = split_target("/portal?new=1&from=%2Fpricing");
        assert_eq!(path, "/portal");
        assert_eq!(
            query,
            vec![("new".to_string(), "1".to_string()), ("from".to_string(), "/pricing".to_string())]
        );
        assert_eq!(split_target("/signin"), ("/signin".to_string(), vec![]));
    }

    #[test]
    fn ignores_offsite_targets() {
        assert_eq!(return_target(Some("https://evil.example"), "/portal"), "/portal");
        assert_eq!(return_target(Some("//evil.example"), "/portal"), "/portal");
    }
}
