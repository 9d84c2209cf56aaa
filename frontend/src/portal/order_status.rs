use yew::prelude::*;

use crate::api::portal::{format_ymd, Order};

const PALETTES: [&str; 3] = ["palette-purple", "palette-blue", "palette-teal"];

#[derive(Properties, PartialEq)]
pub struct OrderStatusProps {
    pub orders: Vec<Order>,
    pub loading: bool,
}

#[function_component(OrderStatusView)]
pub fn order_status_view(props: &OrderStatusProps) -> Html {
    html! {
        <div class="portal-card order-card">
            <h4 class="order-header">{"Your Orders"}</h4>
            <div class="order-body">
                if props.loading {
                    <div class="loading-container"><div class="spinner"></div></div>
                } else if props.orders.is_empty() {
                    <p class="empty">{"No orders yet."}</p>
                } else {
                    <div class="order-grid">
                        { for props.orders.iter().enumerate().map(|(i, order)| {
                            let status = order.status();
                            html! {
                                <div class={classes!("order-item", PALETTES[i % PALETTES.len()])} key={order.id.clone()}>
                                    <div class="order-top">
                                        <h5 class="order-id">{format!("Order #{}", order.id)}</h5>
                                        <span class="order-date">{format_ymd(&order.date)}</span>
                                    </div>
                                    <div class="order-mid">
                                        <div class="order-package-section">
                                            <span class="order-package-label">{"Package Type"}</span>
                                            <span class="order-package">{&order.package}</span>
                                        </div>
                                        <span class={classes!("order-status", status.css_class())}>{status.label()}</span>
                                    </div>
                                </div>
                            }
                        }) }
                    </div>
                }
            </div>
        </div>
    }
}
