use yew::prelude::*;

/// Dashboard tabs reachable from the hub.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tab {
    Downloads,
    Status,
    Invoices,
    Reorder,
    Branding,
}

struct Tile {
    title: &'static str,
    desc: &'static str,
    icon: &'static str,
    tab: Option<Tab>,
}

const TILES: [Tile; 6] = [
    Tile { title: "Download Center", desc: "Grab your delivered videos.", icon: "fa-cloud-arrow-down", tab: Some(Tab::Downloads) },
    Tile { title: "Order Status", desc: "Track progress in real-time.", icon: "fa-clock-rotate-left", tab: Some(Tab::Status) },
    Tile { title: "Invoices", desc: "View and download receipts.", icon: "fa-receipt", tab: Some(Tab::Invoices) },
    Tile { title: "Re-order", desc: "Duplicate a previous order.", icon: "fa-arrows-rotate", tab: Some(Tab::Reorder) },
    Tile { title: "Brand Assets", desc: "Manage your logo & colors.", icon: "fa-palette", tab: Some(Tab::Branding) },
    Tile { title: "New Order", desc: "Choose a package and upload photos.", icon: "fa-circle-plus", tab: None },
];

#[derive(Properties, PartialEq)]
pub struct OrderHubProps {
    pub on_go: Callback<Tab>,
    pub on_start_order: Callback<()>,
}

#[function_component(OrderHub)]
pub fn order_hub(props: &OrderHubProps) -> Html {
    html! {
        <div class="hub-wrap">
            <div class="hub-inner">
                <header class="hub-header">
                    <h1 class="hub-title">{"Order Submitted "}<span>{"🎉"}</span></h1>
                    <p class="hub-sub">{"What would you like to do next?"}</p>
                </header>
                <div class="hub-grid">
                    { for TILES.iter().map(|tile| {
                        let onclick = match tile.tab {
                            Some(tab) => props.on_go.reform(move |_: MouseEvent| tab),
                            None => props.on_start_order.reform(|_: MouseEvent| ()),
                        };
                        html! {
                            <article class="hub-tile" key={tile.title}>
                                <div class="icon-wrap"><i class={classes!("fa-solid", tile.icon)}></i></div>
                                <h3 class="tile-title">{tile.title}</h3>
                                <p class="tile-desc">{tile.desc}</p>
                                <button class="open-button" {onclick}>
                                    { if tile.tab.is_some() { "Open" } else { "Start" } }
                                </button>
                            </article>
                        }
                    }) }
                </div>
            </div>
        </div>
    }
}
