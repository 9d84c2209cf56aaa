use chrono::Datelike;
use yew::prelude::*;
use yew_router::prelude::*;

/// Paths where the auth screens take the whole page.
const HIDE_ON: [&str; 6] = ["/signin", "/signup", "/register", "/auth", "/forgot-password", "/set-password"];

pub fn hidden_on(path: &str) -> bool {
    HIDE_ON.iter().any(|prefix| path.starts_with(prefix))
}

const SOCIAL: [(&str, &str, &str); 4] = [
    ("Facebook", "fa-facebook", "https://facebook.com"),
    ("Instagram", "fa-instagram", "https://instagram.com"),
    ("Twitter", "fa-x-twitter", "https://twitter.com"),
    ("LinkedIn", "fa-linkedin", "https://linkedin.com"),
];

#[function_component(Footer)]
pub fn footer() -> Html {
    let path = use_location().map(|l| l.path().to_string()).unwrap_or_default();
    if hidden_on(&path) {
        return html! {};
    }
    let year = chrono::Local::now().year();

    html! {
        <footer class="footer">
            <div class="footer-row">
                <div class="footer-brand">
                    <span class="footer-logo">{"QuantumTours"}</span>
                    <p class="footer-tagline">{"Transforming real estate marketing"}</p>
                </div>
                <div class="social-links">
                    { for SOCIAL.iter().map(|(name, icon, url)| html! {
                        <a key={*name} href={*url} target="_blank" rel="noopener noreferrer"
                            aria-label={*name} class="social-icon">
                            <i class={classes!("fa-brands", *icon)}></i>
                        </a>
                    }) }
                </div>
                <p class="copyright">{format!("© {} QuantumTours. All rights reserved.", year)}</p>
            </div>
            <div class="additional-links">
                <a href="/privacy">{"Privacy Policy"}</a>
                <a href="/terms">{"Terms of Service"}</a>
                <a href="/contact">{"Contact Us"}</a>
            </div>
        </footer>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_on_auth_screens_only() {
        assert!(hidden_on("/signin"));
        assert!(hidden_on("/set-password"));
        assert!(!hidden_on("/portal"));
        assert!(!hidden_on("/"));
    }
}
