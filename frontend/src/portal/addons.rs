use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::portal::{self as portal_api, CheckoutRequest};
use crate::browser;
use crate::portal::stripe;
use crate::pricing::addons::{AddOn, AddOnSelection, Bundle, OutputFormat, Quantity};
use crate::pricing::packages::PackageOption;
use crate::storage;

#[derive(Properties, PartialEq)]
pub struct AddOnsScreenProps {
    pub package: Option<PackageOption>,
    pub user_id: Option<String>,
    pub on_back: Callback<()>,
    /// Called instead of checkout when nothing is owed.
    pub on_continue: Callback<AddOnSelection>,
}

fn describe(addon: AddOn) -> (&'static str, Option<&'static str>) {
    match addon {
        AddOn::VoiceoverAi => (
            "Voiceover (AI-generated)",
            Some("Professional AI voice reading your script or property highlights."),
        ),
        AddOn::TalkThrough => (
            "Talk-through narration",
            Some("AI avatar or digital agent delivering a walkthrough for personality & connection."),
        ),
        AddOn::ReelSplit => (
            "Reel Split",
            Some("Cuts your video into 3 vertical reels (10–25s). Great for TikTok, Reels, Shorts."),
        ),
        AddOn::Rush12h => ("Rush Delivery (12 hr)", None),
        AddOn::PremiumEdit => (
            "Premium Edit",
            Some("Advanced transitions, smoother pacing, cinematic polish. FREE in Pro & Ultra."),
        ),
    }
}

async fn start_checkout(user_id: String, package: Option<PackageOption>, selection: AddOnSelection) -> Result<(), String> {
    storage::set(
        storage::PRESELECTED_PACKAGE,
        &package.as_ref().map(|p| p.id.to_string()).unwrap_or_default(),
    );
    storage::set_json(storage::PRESELECTED_ADDONS, &selection);

    let (name, price) = package.as_ref().map_or(("", 0), |p| (p.name, p.price));
    let request = CheckoutRequest::new(&user_id, &browser::origin(), name, price, &selection)
        .map_err(|e| e.to_string())?;
    let session = portal_api::create_checkout_session(&request)
        .await
        .map_err(|e| e.to_string())?;
    stripe::go_to_checkout(&session).await
}

#[function_component(AddOnsScreen)]
pub fn addons_screen(props: &AddOnsScreenProps) -> Html {
    let selection = use_state(AddOnSelection::default);
    let checking_out = use_state(|| false);

    let update = {
        let selection = selection.clone();
        move |f: fn(&mut AddOnSelection)| {
            let mut next = (*selection).clone();
            f(&mut next);
            selection.set(next);
        }
    };

    let package_price = props.package.as_ref().map_or(0, |p| p.price);
    let addons_total = selection.total();
    let grand_total = package_price + addons_total;

    let on_checkout = {
        let selection = selection.clone();
        let checking_out = checking_out.clone();
        let package = props.package.clone();
        let user_id = props.user_id.clone();
        let on_continue = props.on_continue.clone();
        Callback::from(move |_: MouseEvent| {
            let current = (*selection).clone();
            if grand_total == 0 {
                on_continue.emit(current);
                return;
            }
            let Some(user_id) = user_id.clone() else {
                browser::alert("Please sign in again.");
                return;
            };
            let checking_out = checking_out.clone();
            let package = package.clone();
            checking_out.set(true);
            spawn_local(async move {
                if let Err(message) = start_checkout(user_id, package, current).await {
                    log::error!("Checkout failed: {}", message);
                    browser::alert(&message);
                }
                checking_out.set(false);
            });
        })
    };

    let addon_row = |addon: AddOn| -> Html {
        let (title, blurb) = describe(addon);
        let covered = selection.is_covered(addon);
        let onchange = {
            let selection = selection.clone();
            Callback::from(move |_: Event| {
                let mut next = (*selection).clone();
                next.toggle(addon);
                selection.set(next);
            })
        };
        html! {
            <label class={classes!("addon-row", covered.then(|| "covered"))}>
                <input type="checkbox" checked={selection.is_checked(addon)} disabled={covered} {onchange} />
                <div>
                    <div class="addon-name">{format!("{} — ${}", title, addon.price())}</div>
                    if let Some(blurb) = blurb {
                        <div class="addon-blurb">{blurb}</div>
                    }
                </div>
            </label>
        }
    };

    let quantity = |kind: Quantity, label: &'static str| -> Html {
        let value = match kind {
            Quantity::ExtraReels => selection.extra_reels,
            Quantity::RevisionRounds => selection.revision_rounds,
        };
        let step = |delta: i32| {
            let selection = selection.clone();
            Callback::from(move |_: MouseEvent| {
                let mut next = (*selection).clone();
                next.adjust(kind, delta);
                selection.set(next);
            })
        };
        html! {
            <div class="qty" role="group" aria-label={label}>
                <button type="button" onclick={step(-1)}>{"–"}</button>
                <span>{value}</span>
                <button type="button" onclick={step(1)}>{"+"}</button>
            </div>
        }
    };

    let free_toggle = |label: &'static str, checked: bool, f: fn(&mut AddOnSelection)| -> Html {
        let update = update.clone();
        html! {
            <label class="addon-row">
                <input type="checkbox" {checked} onchange={Callback::from(move |_: Event| update(f))} />
                <div class="addon-name">{label}</div>
            </label>
        }
    };

    let bundle_row = |bundle: Bundle| -> Html {
        let onchange = {
            let selection = selection.clone();
            Callback::from(move |_: Event| {
                let mut next = (*selection).clone();
                next.set_bundle(Some(bundle));
                selection.set(next);
            })
        };
        html! {
            <label class="addon-row">
                <input type="radio" name="bundle" checked={selection.bundle == Some(bundle)} {onchange} />
                <div>
                    <div class="addon-name">{format!("{} — ${}", bundle.name(), bundle.price())}</div>
                    <div class="addon-blurb">{bundle.blurb()}</div>
                </div>
            </label>
        }
    };

    let format_choice = |format: OutputFormat| -> Html {
        let selection = selection.clone();
        let checked = selection.free_format == Some(format);
        let onchange = Callback::from(move |_: Event| {
            let mut next = (*selection).clone();
            next.free_format = Some(format);
            selection.set(next);
        });
        html! {
            <label><input type="radio" name="freeFormat" {checked} {onchange} />{" "}{format.label()}</label>
        }
    };

    let clear_bundle = {
        let selection = selection.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*selection).clone();
            next.set_bundle(None);
            selection.set(next);
        })
    };
    let on_back = {
        let on_back = props.on_back.clone();
        Callback::from(move |_: MouseEvent| on_back.emit(()))
    };

    html! {
        <div class="portal-screen addons-screen">
            <header class="screen-header">
                <button class="back-button" onclick={on_back}>{"← Back"}</button>
                <h1>{"Add-Ons"}</h1>
                <p>{"Enhance your QuantumTour with narration, social cuts, rush delivery, and more."}</p>
            </header>

            <section class="addon-group">
                <h3>{"🎤 Narration & Presentation"}</h3>
                { addon_row(AddOn::VoiceoverAi) }
                { addon_row(AddOn::TalkThrough) }
            </section>

            <section class="addon-group">
                <h3>{"📱 Social Media"}</h3>
                { addon_row(AddOn::ReelSplit) }
                <div class="addon-row">
                    <div class="addon-name">{"Additional reels — $10 each"}</div>
                    { quantity(Quantity::ExtraReels, "Additional reels") }
                </div>
            </section>

            <section class="addon-group">
                <h3>{"⚡ Delivery & Edits"}</h3>
                { addon_row(AddOn::Rush12h) }
                <div class="addon-row">
                    <div class="addon-name">{"Revisions (per extra round) — $10"}</div>
                    { quantity(Quantity::RevisionRounds, "Extra revision rounds") }
                </div>
                { addon_row(AddOn::PremiumEdit) }
            </section>

            <section class="addon-group">
                <h3>{"📦 Packaged Add-On Bundles"}</h3>
                { for Bundle::ALL.into_iter().map(bundle_row) }
                <button class="clear-button" onclick={clear_bundle} disabled={selection.bundle.is_none()}>
                    {"Clear bundle"}
                </button>
            </section>

            <section class="addon-group">
                <h3>{"✅ Free Options"}</h3>
                { free_toggle("Custom AI-generated soundtrack", selection.free_soundtrack, |s| s.free_soundtrack = !s.free_soundtrack) }
                <div class="addon-row">
                    <div>
                        <div class="addon-name">{"Choice of format"}</div>
                        <div class="addon-blurb">{"Pick one: horizontal, vertical, or square"}</div>
                    </div>
                    <div class="control-group" role="radiogroup" aria-label="Output format">
                        { for OutputFormat::ALL.into_iter().map(format_choice) }
                    </div>
                </div>
                { free_toggle("Branding overlay (logos, colors, watermark)", selection.free_branding_overlay, |s| s.free_branding_overlay = !s.free_branding_overlay) }
                { free_toggle("Intro/outro title cards", selection.free_title_cards, |s| s.free_title_cards = !s.free_title_cards) }
            </section>

            <footer class="addons-footer">
                <div class="total">
                    {"Total: "}<strong>{format!("${}", grand_total)}</strong>
                    <small>{format!(" (Package ${} + Add-Ons ${})", package_price, addons_total)}</small>
                </div>
                <button class="next-button" onclick={on_checkout} disabled={*checking_out}>
                    { if *checking_out { "Redirecting…" } else { "Continue to Payment" } }
                </button>
            </footer>
        </div>
    }
}
