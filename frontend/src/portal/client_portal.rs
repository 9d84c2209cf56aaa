use std::cell::Cell;
use std::rc::Rc;

use yew::prelude::*;
use yew_router::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::portal::{self as portal_api, Order};
use crate::auth::guard::split_target;
use crate::auth::session::use_session;
use crate::browser;
use crate::portal::addons::AddOnsScreen;
use crate::portal::brand_assets::BrandAssets;
use crate::portal::downloads::DownloadCenter;
use crate::portal::gate::PackageGate;
use crate::portal::hub::{OrderHub, Tab};
use crate::portal::invoices::Invoices;
use crate::portal::order_status::OrderStatusView;
use crate::portal::payment::{poll_payment, session_to_poll, PaymentOutcome};
use crate::portal::reorder::Reorder;
use crate::portal::upload::UploadScreen;
use crate::pricing::addons::AddOnSelection;
use crate::pricing::packages::package_by_id;
use crate::storage;
use crate::Route;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Stage {
    Loading,
    Gate,
    AddOns,
    Upload,
    Hub,
    Portal(Tab),
}

impl Stage {
    fn needs_orders(self) -> bool {
        matches!(self, Stage::Hub | Stage::Portal(Tab::Status) | Stage::Portal(Tab::Reorder))
    }
}

/// Query parameters the portal reacts to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PortalQuery {
    pub start_upload: bool,
    pub paid: Option<String>,
    pub session_id: Option<String>,
}

impl PortalQuery {
    pub fn parse(query: &str) -> Self {
        let (_, pairs) = split_target(&format!("?{}", query.trim_start_matches('?')));
        let mut parsed = PortalQuery::default();
        for (key, value) in pairs {
            match key.as_str() {
                "start" => parsed.start_upload = value == "upload",
                "paid" => parsed.paid = Some(value),
                "session_id" => parsed.session_id = Some(value),
                _ => {}
            }
        }
        parsed
    }
}

/// Package and add-ons persisted before the Stripe redirect.
fn read_preselection() -> (Option<u32>, Option<AddOnSelection>) {
    let package = storage::get(storage::PRESELECTED_PACKAGE).and_then(|raw| raw.parse().ok());
    let addons = storage::get_json(storage::PRESELECTED_ADDONS);
    (package, addons)
}

fn clear_preselection() {
    storage::remove(storage::PRESELECTED_PACKAGE);
    storage::remove(storage::PRESELECTED_ADDONS);
}

#[function_component(ClientPortal)]
pub fn client_portal() -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let location = use_location();

    let query = location
        .as_ref()
        .map(|l| PortalQuery::parse(l.query_str()))
        .unwrap_or_default();
    let user = session.as_ref().and_then(|s| s.user.clone());
    let user_id = user.as_ref().and_then(|u| u.id.clone());
    let email = session.as_ref().and_then(|s| s.email());
    let auth_loading = session.as_ref().map_or(true, |s| s.loading);

    let stage = use_state(|| Stage::Loading);
    let preselected_package = use_state(|| None::<u32>);
    let preselected_addons = use_state(|| None::<AddOnSelection>);
    let orders = use_state(Vec::<Order>::new);
    let orders_loading = use_state(|| false);
    let checked_status = use_state(|| false);

    // Initial stage from the backend, unless we are coming back from checkout.
    {
        let checked_now = *checked_status;
        let stage = stage.clone();
        let checked_status = checked_status.clone();
        let email = email.clone();
        let start_upload = query.start_upload;
        use_effect_with_deps(
            move |(auth_loading, user_id, checked)| {
                if !*auth_loading && user_id.is_some() && !*checked {
                    checked_status.set(true);
                    if !start_upload {
                        spawn_local(async move {
                            match portal_api::client_status().await {
                                Ok(status) => {
                                    gloo_console::log!(format!("Client status: has_orders={}", status.has_orders));
                                    storage::set_portal_state(email.as_deref(), status.has_orders);
                                    stage.set(if status.has_orders { Stage::Hub } else { Stage::Gate });
                                }
                                Err(e) => {
                                    log::error!("Failed to fetch client status: {}", e);
                                    stage.set(Stage::Gate);
                                }
                            }
                        });
                    }
                }
                || ()
            },
            (auth_loading, user_id.clone(), checked_now),
        );
    }

    // Orders back the hub, the status tab and the reorder tab.
    {
        let orders = orders.clone();
        let orders_loading = orders_loading.clone();
        use_effect_with_deps(
            move |(stage, user_id)| {
                if user_id.is_some() && stage.needs_orders() {
                    spawn_local(async move {
                        orders_loading.set(true);
                        match portal_api::user_orders().await {
                            Ok(list) => orders.set(list),
                            Err(e) => {
                                log::error!("Orders fetch failed: {}", e);
                                orders.set(Vec::new());
                            }
                        }
                        orders_loading.set(false);
                    });
                }
                || ()
            },
            (*stage, user_id.clone()),
        );
    }

    // Payment confirmation after the Stripe redirect.
    {
        let stage = stage.clone();
        let email = email.clone();
        let sid = session_to_poll(query.session_id.as_deref(), query.paid.as_deref());
        use_effect_with_deps(
            move |(sid, start_upload)| {
                let cancelled = Rc::new(Cell::new(false));
                if let Some(sid) = sid.clone() {
                    let cancelled = cancelled.clone();
                    let start_upload = *start_upload;
                    spawn_local(async move {
                        match poll_payment(sid, start_upload, cancelled).await {
                            PaymentOutcome::Paid => {
                                storage::set_portal_state(email.as_deref(), true);
                                stage.set(Stage::Upload);
                            }
                            PaymentOutcome::Stopped(Some(message)) => browser::alert(&message),
                            PaymentOutcome::Stopped(None) | PaymentOutcome::Cancelled => {}
                        }
                    });
                }
                move || cancelled.set(true)
            },
            (sid, query.start_upload),
        );
    }

    {
        let stage = stage.clone();
        let preselected_package = preselected_package.clone();
        let preselected_addons = preselected_addons.clone();
        use_effect_with_deps(
            move |start_upload| {
                if *start_upload {
                    let (package, addons) = read_preselection();
                    if package.is_some() {
                        preselected_package.set(package);
                    }
                    if addons.is_some() {
                        preselected_addons.set(addons);
                    }
                    stage.set(Stage::Upload);
                }
                || ()
            },
            query.start_upload,
        );
    }

    let clear_query = {
        let navigator = navigator.clone();
        move || {
            if let Some(navigator) = &navigator {
                navigator.replace(&Route::Portal);
            }
        }
    };

    let to_gate = {
        let stage = stage.clone();
        let email = email.clone();
        let preselected_package = preselected_package.clone();
        let preselected_addons = preselected_addons.clone();
        let navigator = navigator.clone();
        Callback::from(move |_: ()| {
            storage::set_portal_state(email.as_deref(), false);
            preselected_package.set(None);
            preselected_addons.set(None);
            stage.set(Stage::Gate);
            if let Some(navigator) = &navigator {
                if let Err(e) = navigator.replace_with_query(&Route::Portal, &[("new", "1")]) {
                    log::error!("Failed to mark new order: {:?}", e);
                }
            }
        })
    };

    let set_stage = |next: Stage| {
        let stage = stage.clone();
        Callback::from(move |_: ()| stage.set(next))
    };

    match *stage {
        Stage::Gate => {
            let stage = stage.clone();
            let preselected_package = preselected_package.clone();
            let on_continue = Callback::from(move |id: u32| {
                preselected_package.set(Some(id));
                stage.set(Stage::AddOns);
            });
            html! { <PackageGate {on_continue} /> }
        }
        Stage::AddOns => {
            let stage = stage.clone();
            let preselected_addons = preselected_addons.clone();
            let on_continue = Callback::from(move |addons: AddOnSelection| {
                preselected_addons.set(Some(addons));
                stage.set(Stage::Upload);
            });
            html! {
                <AddOnsScreen
                    package={(*preselected_package).and_then(package_by_id).cloned()}
                    user_id={user_id.clone()}
                    on_back={set_stage(Stage::Gate)}
                    {on_continue} />
            }
        }
        Stage::Upload => {
            let on_submitted = {
                let stage = stage.clone();
                let email = email.clone();
                let clear_query = clear_query.clone();
                Callback::from(move |_: ()| {
                    storage::set_portal_state(email.as_deref(), true);
                    clear_query();
                    clear_preselection();
                    stage.set(Stage::Hub);
                })
            };
            let on_back = {
                let stage = stage.clone();
                Callback::from(move |_: ()| {
                    clear_preselection();
                    stage.set(Stage::AddOns);
                })
            };
            html! {
                <UploadScreen
                    package_id={*preselected_package}
                    addons={(*preselected_addons).clone()}
                    user_id={user_id.clone()}
                    {on_submitted}
                    {on_back} />
            }
        }
        Stage::Hub => {
            let stage = stage.clone();
            let on_go = Callback::from(move |tab: Tab| stage.set(Stage::Portal(tab)));
            html! { <OrderHub {on_go} on_start_order={to_gate} /> }
        }
        Stage::Portal(tab) => {
            let go_back = {
                let stage = stage.clone();
                Callback::from(move |_: MouseEvent| {
                    clear_query();
                    stage.set(Stage::Hub);
                })
            };
            let screen = match tab {
                Tab::Status => html! { <OrderStatusView orders={(*orders).clone()} loading={*orders_loading} /> },
                Tab::Downloads => html! { <DownloadCenter user_id={user_id.clone()} /> },
                Tab::Branding => html! { <BrandAssets /> },
                Tab::Reorder => {
                    let completed: Vec<Order> = orders.iter().filter(|o| o.is_completed()).cloned().collect();
                    html! { <Reorder past_orders={completed} /> }
                }
                Tab::Invoices => html! { <Invoices user_id={user_id.clone()} /> },
            };
            html! {
                <div class="screen-wrap">
                    <button class="back-button" onclick={go_back}>{"← Back"}</button>
                    { screen }
                </div>
            }
        }
        Stage::Loading => html! { <div class="portal-container">{"Loading…"}</div> },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stripe_return_query() {
        let q = PortalQuery::parse("?start=upload&paid=1&session_id=cs_test_123");
        assert!(q.start_upload);
        assert_eq!(q.paid.as_deref(), Some("1"));
        assert_eq!(q.session_id.as_deref(), Some("cs_test_123"));
    }

    #[test]
    fn ignores_unrelated_params() {
        let q = PortalQuery::parse("new=1");
        assert_eq!(q, PortalQuery::default());
        assert!(!PortalQuery::parse("start=gate").start_upload);
    }

    #[test]
    fn orders_are_needed_on_hub_status_and_reorder() {
        assert!(Stage::Hub.needs_orders());
        assert!(Stage::Portal(Tab::Status).needs_orders());
        assert!(Stage::Portal(Tab::Reorder).needs_orders());
        assert!(!Stage::Portal(Tab::Downloads).needs_orders());
        assert!(!Stage::Gate.needs_orders());
    }
}
