use web_sys::{File, HtmlInputElement};
use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::portal as portal_api;
use crate::browser;
use crate::pricing::addons::AddOnSelection;
use crate::pricing::packages::{package_by_id, validate_photo_count, PACKAGE_OPTIONS};

#[derive(Properties, PartialEq)]
pub struct UploadScreenProps {
    pub package_id: Option<u32>,
    pub addons: Option<AddOnSelection>,
    pub user_id: Option<String>,
    pub on_submitted: Callback<()>,
    pub on_back: Callback<()>,
}

fn files_from(input: &HtmlInputElement) -> Vec<File> {
    let Some(list) = input.files() else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.item(i)).collect()
}

#[function_component(UploadScreen)]
pub fn upload_screen(props: &UploadScreenProps) -> Html {
    let files = use_state(Vec::<File>::new);
    let selected_package = use_state(|| props.package_id);
    let is_submitting = use_state(|| false);

    {
        let selected_package = selected_package.clone();
        use_effect_with_deps(
            move |package_id| {
                if package_id.is_some() {
                    selected_package.set(*package_id);
                }
                || ()
            },
            props.package_id,
        );
    }

    let package = (*selected_package).and_then(package_by_id);
    let addons = props.addons.clone().unwrap_or_default();
    let package_price = package.map_or(0, |p| p.price);
    let addons_total = addons.total();
    let chips = addons.chips();

    let on_files = {
        let files = files.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            files.set(files_from(&input));
        })
    };

    let onsubmit = {
        let files = files.clone();
        let is_submitting = is_submitting.clone();
        let user_id = props.user_id.clone();
        let on_submitted = props.on_submitted.clone();
        let addons = addons.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(package) = package else {
                browser::alert("Please choose a package.");
                return;
            };
            if let Err(message) = validate_photo_count(package, files.len()) {
                browser::alert(&message);
                return;
            }
            let user_id = user_id.clone().unwrap_or_default();
            let selected: Vec<File> = (*files).clone();
            let files = files.clone();
            let is_submitting = is_submitting.clone();
            let on_submitted = on_submitted.clone();
            let addons = addons.clone();
            is_submitting.set(true);
            spawn_local(async move {
                match portal_api::create_order(&user_id, package.name, &addons, &selected).await {
                    Ok(order) => {
                        log::info!("Order submitted: {}", order);
                        files.set(Vec::new());
                        on_submitted.emit(());
                    }
                    Err(e) => {
                        log::error!("Order submission error: {}", e);
                        browser::alert(&e.to_string());
                    }
                }
                is_submitting.set(false);
            });
        })
    };

    let on_back = {
        let on_back = props.on_back.clone();
        Callback::from(move |_: MouseEvent| on_back.emit(()))
    };

    let package_picker = if props.package_id.is_some() {
        html! {
            <div class="package-group">
                <div class="package-label">{"Selected Package"}</div>
                <div class="package-selected">
                    { package.map(|p| format!("{} • {} photos • ${}", p.name, p.photos, p.price)).unwrap_or_default() }
                </div>
            </div>
        }
    } else {
        html! {
            <div class="package-group">
                <div class="package-label">{"Select Package"}</div>
                <div class="package-grid">
                    { for PACKAGE_OPTIONS.iter().map(|p| {
                        let id = p.id;
                        let selected_package = selected_package.clone();
                        let active = *selected_package == Some(id);
                        html! {
                            <div class={classes!("package-card", active.then(|| "selected"))}
                                onclick={Callback::from(move |_: MouseEvent| selected_package.set(Some(id)))}>
                                <h5>{p.name}</h5>
                                <p>{format!("{} photos", p.photos)}</p>
                                <p class="price">{format!("${}", p.price)}</p>
                            </div>
                        }
                    }) }
                </div>
            </div>
        }
    };

    html! {
        <div class="portal-screen upload-screen">
            <header class="screen-header">
                <button class="back-button" onclick={on_back}>{"← Back"}</button>
                <h1>{"Upload Photos"}</h1>
            </header>
            <div class="card">
                <div class="card-header">{"Create New Order"}</div>
                <form class="card-body" {onsubmit}>
                    <div class="file-upload-group">
                        <label>{"Upload Property Photos"}</label>
                        <input type="file" multiple=true accept="image/*" required=true onchange={on_files} />
                        <small>{"Upload 5–30 high quality photos of your property"}</small>
                        if !files.is_empty() {
                            <div class="file-upload-info"><small>{format!("{} file(s) selected", files.len())}</small></div>
                        }
                    </div>
                    { package_picker }
                    <div class="summary-card">
                        <div class="summary-row"><span>{"Package"}</span><strong>{format!("${}", package_price)}</strong></div>
                        <div class="summary-row"><span>{"Add-ons"}</span><strong>{format!("${}", addons_total)}</strong></div>
                        <div class="summary-chips">
                            { if chips.is_empty() { "No add-ons selected".to_string() } else { chips.join(" • ") } }
                        </div>
                        <hr />
                        <div class="summary-row summary-grand">
                            <span>{"Total"}</span><strong>{format!("${}", package_price + addons_total)}</strong>
                        </div>
                    </div>
                    <button type="submit" class="submit-button"
                        disabled={files.is_empty() || package.is_none() || *is_submitting}>
                        { if *is_submitting { "Processing..." } else { "Submit Order" } }
                    </button>
                </form>
            </div>
        </div>
    }
}
