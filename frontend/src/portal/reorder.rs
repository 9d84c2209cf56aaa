use gloo_timers::future::TimeoutFuture;
use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::portal::{self as portal_api, format_long_date, Order};

const NOTICE_MS: u32 = 3_500;

#[derive(Clone, Debug, PartialEq)]
enum Notice {
    Success(String),
    Error(String),
}

/// Hands out a ticket per notice so a timer only clears the notice it set.
#[derive(Debug, Default)]
pub struct NoticeTickets {
    latest: u32,
}

impl NoticeTickets {
    pub fn issue(&mut self) -> u32 {
        self.latest = self.latest.wrapping_add(1);
        self.latest
    }

    pub fn is_current(&self, ticket: u32) -> bool {
        self.latest == ticket
    }
}

#[derive(Properties, PartialEq)]
pub struct ReorderProps {
    /// Completed orders only.
    pub past_orders: Vec<Order>,
}

#[function_component(Reorder)]
pub fn reorder(props: &ReorderProps) -> Html {
    let notice = use_state(|| None::<Notice>);
    let tickets = use_mut_ref(NoticeTickets::default);

    let on_reorder = |order_id: String| {
        let notice = notice.clone();
        let tickets = tickets.clone();
        Callback::from(move |_: MouseEvent| {
            let order_id = order_id.clone();
            let notice = notice.clone();
            let tickets = tickets.clone();
            spawn_local(async move {
                match portal_api::reorder(&order_id).await {
                    Ok(_) => notice.set(Some(Notice::Success(format!(
                        "✅ Order #{} has been recreated successfully!",
                        order_id
                    )))),
                    Err(e) => {
                        log::error!("Reorder failed: {}", e);
                        notice.set(Some(Notice::Error(
                            "❌ Failed to reorder. Please try again later.".to_string(),
                        )));
                    }
                }
                let ticket = tickets.borrow_mut().issue();
                TimeoutFuture::new(NOTICE_MS).await;
                if tickets.borrow().is_current(ticket) {
                    notice.set(None);
                }
            });
        })
    };

    html! {
        <div class="reorder-wrapper">
            { match (*notice).as_ref() {
                Some(Notice::Success(message)) => html! { <div class="alert-box success">{message}</div> },
                Some(Notice::Error(message)) => html! { <div class="alert-box error">{message}</div> },
                None => html! {},
            } }
            <h2 class="title">{"Past Orders"}</h2>
            <div class="reorder-card">
                <div class="table-header">
                    <div>{"Order ID"}</div>
                    <div>{"Date"}</div>
                    <div>{"Package"}</div>
                    <div>{"Photos"}</div>
                    <div>{"Action"}</div>
                </div>
                <div class="order-list">
                    { for props.past_orders.iter().map(|order| html! {
                        <div class="order-row" key={order.id.clone()}>
                            <div>{format!("#{}", order.id)}</div>
                            <div>{format_long_date(&order.date)}</div>
                            <div><span class="package-badge">{&order.package}</span></div>
                            <div>{order.photos}</div>
                            <div>
                                <button class="reorder-button" onclick={on_reorder(order.id.clone())}>
                                    {"Reorder"}
                                </button>
                            </div>
                        </div>
                    }) }
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn older_timer_does_not_clear_newer_notice() {
        let mut tickets = NoticeTickets::default();
        let first = tickets.issue();
        let second = tickets.issue();
        assert!(!tickets.is_current(first));
        assert!(tickets.is_current(second));
    }
}
