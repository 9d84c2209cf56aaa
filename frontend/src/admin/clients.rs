use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::admin::{self as admin_api, Client};

#[function_component(ClientList)]
pub fn client_list() -> Html {
    let clients = use_state(Vec::<Client>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let reload = use_state(|| 0u32);

    {
        let clients = clients.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with_deps(
            move |_| {
                loading.set(true);
                error.set(None);
                spawn_local(async move {
                    match admin_api::clients().await {
                        Ok(list) => clients.set(list),
                        Err(e) => {
                            log::error!("Error fetching clients: {}", e);
                            error.set(Some(e.to_string()));
                        }
                    }
                    loading.set(false);
                });
                || ()
            },
            *reload,
        );
    }

    let refresh = {
        let reload = reload.clone();
        Callback::from(move |_: MouseEvent| reload.set(*reload + 1))
    };

    html! {
        <div class="admin-card">
            <div class="admin-card-header">
                <h5>{"Client Management"}</h5>
                <button class="export-button" onclick={refresh} disabled={*loading}>
                    { if *loading { "Refreshing..." } else { "Refresh" } }
                </button>
            </div>
            <div class="admin-card-body">
                if let Some(message) = (*error).as_ref() {
                    <div class="alert alert-danger">{message}</div>
                }
                if *loading {
                    <div class="loading-container">
                        <div class="spinner"></div>
                        <span class="loading-text">{"Loading clients..."}</span>
                    </div>
                } else if clients.is_empty() {
                    <div class="no-data">{"No clients found"}</div>
                } else {
                    <div class="table-wrapper">
                        <table class="client-table">
                            <thead>
                                <tr>
                                    <th>{"Client"}</th>
                                    <th>{"Email"}</th>
                                    <th>{"Joined"}</th>
                                    <th>{"Orders"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                { for clients.iter().enumerate().map(|(i, c)| html! {
                                    <tr key={c.id.clone().unwrap_or_else(|| i.to_string())}>
                                        <td data-label="Client">{&c.name}</td>
                                        <td data-label="Email">{&c.email}</td>
                                        <td data-label="Joined">{&c.joined}</td>
                                        <td data-label="Orders">{c.orders_label()}</td>
                                    </tr>
                                }) }
                            </tbody>
                        </table>
                    </div>
                }
            </div>
        </div>
    }
}
