use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{File, HtmlInputElement, HtmlSelectElement, Url};
use yew::prelude::*;

use crate::browser;

pub const FONTS: [&str; 6] = ["Montserrat", "Roboto", "Open Sans", "Playfair Display", "Inter", "Poppins"];
pub const DEFAULT_COLOR: &str = "#21ABB5";
pub const DEFAULT_FONT: &str = "Montserrat";

pub fn font_link_id(name: &str) -> String {
    format!("gf-{}", name.split_whitespace().collect::<Vec<_>>().join("-").to_lowercase())
}

pub fn font_href(name: &str) -> String {
    format!(
        "https://fonts.googleapis.com/css2?family={}:wght@400;600;700&display=swap",
        urlencoding::encode(name)
    )
}

/// Adds the Google Fonts stylesheet for `name` unless it is already present.
fn ensure_google_font(name: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let id = font_link_id(name);
    if document.get_element_by_id(&id).is_some() {
        return;
    }
    let Ok(link) = document.create_element("link") else {
        return;
    };
    link.set_id(&id);
    let _ = link.set_attribute("rel", "stylesheet");
    let _ = link.set_attribute("href", &font_href(name));
    if let Some(head) = document.head() {
        let _ = head.append_child(&link);
    }
}

fn revoke(url: &str) {
    if url.starts_with("blob:") {
        let _ = Url::revoke_object_url(url);
    }
}

#[derive(Clone)]
struct Logo {
    id: u32,
    url: String,
    file: File,
}

#[function_component(BrandAssets)]
pub fn brand_assets() -> Html {
    let logos = use_state(Vec::<Logo>::new);
    let next_id = use_mut_ref(|| 0u32);
    // Object URLs still alive, revoked on unmount.
    let live_urls: Rc<RefCell<Vec<String>>> = use_mut_ref(Vec::new);
    let color = use_state(|| DEFAULT_COLOR.to_string());
    let font = use_state(|| DEFAULT_FONT.to_string());

    use_effect_with_deps(
        |_| {
            FONTS.iter().for_each(|f| ensure_google_font(f));
            || ()
        },
        (),
    );

    {
        let live_urls = live_urls.clone();
        use_effect_with_deps(
            move |_| {
                move || {
                    for url in live_urls.borrow().iter() {
                        revoke(url);
                    }
                }
            },
            (),
        );
    }

    let on_files = {
        let logos = logos.clone();
        let live_urls = live_urls.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(list) = input.files() else {
                return;
            };
            let mut next = (*logos).clone();
            for file in (0..list.length()).filter_map(|i| list.item(i)) {
                let Ok(url) = Url::create_object_url_with_blob(&file) else {
                    continue;
                };
                let id = {
                    let mut counter = next_id.borrow_mut();
                    *counter += 1;
                    *counter
                };
                live_urls.borrow_mut().push(url.clone());
                next.push(Logo { id, url, file });
            }
            input.set_value("");
            logos.set(next);
        })
    };

    let remove = |id: u32| {
        let logos = logos.clone();
        let live_urls = live_urls.clone();
        Callback::from(move |_: ()| {
            let mut next = (*logos).clone();
            if let Some(pos) = next.iter().position(|l| l.id == id) {
                let removed = next.remove(pos);
                revoke(&removed.url);
                live_urls.borrow_mut().retain(|u| u != &removed.url);
            }
            logos.set(next);
        })
    };

    let on_color = {
        let color = color.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            color.set(input.value());
        })
    };

    let on_font = {
        let font = font.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            font.set(select.value());
        })
    };

    let onsubmit = {
        let logos = logos.clone();
        let color = color.clone();
        let font = font.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let names: Vec<String> = logos.iter().map(|l| l.file.name()).collect();
            log::info!("Brand assets saved: logos={:?} color={} font={}", names, *color, *font);
            browser::alert("Brand assets updated successfully!");
        })
    };

    let upload_input = html! {
        <input type="file" accept="image/*" multiple=true aria-label="Upload logo" onchange={on_files} />
    };

    html! {
        <div class="brand-host"
            style={format!("--accent: {}; font-family: '{}', system-ui, sans-serif;", *color, *font)}>
            <div class="portal-card">
                <h4 class="card-header">{"Brand Assets"}</h4>
                <form class="brand-form" {onsubmit}>
                    <fieldset class="group-card">
                        <legend class="group-title">{"Primary Logos"}</legend>
                        <div class="thumb-grid">
                            if logos.is_empty() {
                                <label class="thumb" title="Upload logo">
                                    { upload_input }
                                    <span>{"Logo+"}</span>
                                </label>
                            } else {
                                { for logos.iter().map(|logo| html! {
                                    <figure class="thumb" key={logo.id}>
                                        <img src={logo.url.clone()} alt="" onerror={remove(logo.id).reform(|_: Event| ())} />
                                        <button type="button" class="remove-thumb" aria-label="Remove logo"
                                            title="Remove" onclick={remove(logo.id).reform(|_: MouseEvent| ())}>{"×"}</button>
                                    </figure>
                                }) }
                                <label class="thumb add-thumb" title="Add logos">
                                    { upload_input }
                                    <span aria-hidden="true">{"＋"}</span>
                                </label>
                            }
                        </div>
                        <small class="help">{"Upload one or many logos (PNG/SVG/JPG)."}</small>
                    </fieldset>

                    <fieldset class="group-card">
                        <legend class="group-title">{"Primary Color"}</legend>
                        <div class="color-row">
                            <input type="color" value={(*color).clone()} oninput={on_color} />
                            <code>{(*color).clone()}</code>
                        </div>
                    </fieldset>

                    <fieldset class="group-card">
                        <legend class="group-title">{"Font Family"}</legend>
                        <select aria-label="Font family" onchange={on_font}>
                            { for FONTS.iter().map(|f| html! {
                                <option value={*f} selected={*font == *f}
                                    style={format!("font-family: '{}', sans-serif;", f)}>{*f}</option>
                            }) }
                        </select>
                    </fieldset>

                    <button type="submit" class="submit-button">{"Save Changes"}</button>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_ids_are_slugged() {
        assert_eq!(font_link_id("Playfair Display"), "gf-playfair-display");
        assert_eq!(font_link_id("Inter"), "gf-inter");
    }

    #[test]
    fn font_href_encodes_family() {
        assert_eq!(
            font_href("Open Sans"),
            "https://fonts.googleapis.com/css2?family=Open%20Sans:wght@400;600;700&display=swap"
        );
    }
}
