use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::admin::{self as admin_api, badge_tone, format_category, Notification};

fn dash(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

#[function_component(Notifications)]
pub fn notifications() -> Html {
    let list = use_state(Vec::<Notification>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let attempt = use_state(|| 0u32);

    {
        let list = list.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with_deps(
            move |_| {
                loading.set(true);
                error.set(None);
                spawn_local(async move {
                    match admin_api::notifications().await {
                        Ok(items) => list.set(items),
                        Err(e) => {
                            log::error!("Failed to fetch notifications: {}", e);
                            error.set(Some(e.to_string()));
                        }
                    }
                    loading.set(false);
                });
                || ()
            },
            *attempt,
        );
    }

    let retry = {
        let attempt = attempt.clone();
        Callback::from(move |_: MouseEvent| attempt.set(*attempt + 1))
    };

    let body = if *loading {
        html! {
            <div class="loading-wrapper">
                <div class="spinner"></div>
                <span class="loading-text">{"Loading notifications..."}</span>
            </div>
        }
    } else if let Some(message) = (*error).clone() {
        html! {
            <div class="error-wrapper">
                <p class="error-message">{message}</p>
                <button class="retry-button" onclick={retry}>{"Retry"}</button>
            </div>
        }
    } else if list.is_empty() {
        html! { <p class="no-data">{"No notifications available."}</p> }
    } else {
        html! {
            <div class="table-wrapper">
                <table class="notifications-table">
                    <thead>
                        <tr>
                            <th>{"Category"}</th>
                            <th>{"Message"}</th>
                            <th>{"Video ID"}</th>
                            <th>{"Image ID"}</th>
                            <th>{"Order ID"}</th>
                            <th>{"User"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for list.iter().enumerate().map(|(i, n)| html! {
                            <tr key={n.id.clone().unwrap_or_else(|| i.to_string())}>
                                <td data-label="Category">
                                    <span class={badge_tone(n.category.as_deref()).css_class()}>
                                        {format_category(n.category.as_deref())}
                                    </span>
                                </td>
                                <td data-label="Message" class="message-cell">{dash(&n.message)}</td>
                                <td data-label="Video ID">{dash(&n.video_id)}</td>
                                <td data-label="Image ID">{dash(&n.image_id)}</td>
                                <td data-label="Order ID">
                                    {n.order_id.as_ref().map(|id| format!("#{}", id)).unwrap_or_else(|| "-".to_string())}
                                </td>
                                <td data-label="User">
                                    <div class="user-info">
                                        <div class="user-id">{format!("ID: {}", dash(&n.user_id))}</div>
                                        <div class="user-email">{dash(&n.user_email)}</div>
                                    </div>
                                </td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            </div>
        }
    };

    html! {
        <div class="admin-card">
            <div class="admin-card-header"><h5>{"Notifications"}</h5></div>
            <div class="admin-card-body">{ body }</div>
        </div>
    }
}
