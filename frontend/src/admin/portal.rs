use log::info;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::admin::clients::ClientList;
use crate::admin::logs::JobTracker;
use crate::admin::notifications::Notifications;
use crate::admin::orders::OrderManagement;
use crate::admin::pricing_editor::PricingEditor;
use crate::admin::prompts::PromptFeedback;

#[derive(Clone, Routable, PartialEq)]
pub enum AdminRoute {
    #[at("/admin")]
    Home,
    #[at("/admin/orders")]
    Orders,
    #[at("/admin/prompts")]
    Prompts,
    #[at("/admin/logs")]
    Logs,
    #[at("/admin/clients")]
    Clients,
    #[at("/admin/pricing")]
    Pricing,
    #[at("/admin/notifications")]
    Notifications,
    #[not_found]
    #[at("/admin/404")]
    NotFound,
}

struct Tile {
    title: &'static str,
    desc: &'static str,
    icon: &'static str,
    route: AdminRoute,
}

fn tiles() -> [Tile; 6] {
    [
        Tile { title: "Order Management", desc: "View and manage all customer orders.", icon: "fa-list-check", route: AdminRoute::Orders },
        Tile { title: "Prompt Feedback", desc: "Review and respond to customer prompts.", icon: "fa-comment-dots", route: AdminRoute::Prompts },
        Tile { title: "Logs & Status", desc: "Monitor system logs and job statuses.", icon: "fa-clipboard-list", route: AdminRoute::Logs },
        Tile { title: "Client Management", desc: "Manage client accounts and permissions.", icon: "fa-users", route: AdminRoute::Clients },
        Tile { title: "Pricing Editor", desc: "Configure service packages and pricing.", icon: "fa-tag", route: AdminRoute::Pricing },
        Tile { title: "Notifications", desc: "Manage system alerts and notifications.", icon: "fa-bell", route: AdminRoute::Notifications },
    ]
}

#[function_component]
fn AdminHome() -> Html {
    html! {
        <div class="admin-grid">
            { for tiles().into_iter().map(|tile| html! {
                <article class="admin-tile" key={tile.title}>
                    <div class="icon-wrap"><i class={classes!("fa-solid", tile.icon)}></i></div>
                    <h3 class="tile-title">{tile.title}</h3>
                    <p class="tile-desc">{tile.desc}</p>
                    <Link<AdminRoute> to={tile.route} classes="open-button">{"Open"}</Link<AdminRoute>>
                </article>
            }) }
        </div>
    }
}

fn switch_admin(route: AdminRoute) -> Html {
    match route {
        AdminRoute::Home => html! { <AdminHome /> },
        AdminRoute::Orders => {
            info!("Rendering admin orders");
            html! { <OrderManagement /> }
        }
        AdminRoute::Prompts => html! { <PromptFeedback /> },
        AdminRoute::Logs => {
            info!("Rendering admin logs");
            html! { <JobTracker /> }
        }
        AdminRoute::Clients => html! { <ClientList /> },
        AdminRoute::Pricing => html! { <PricingEditor /> },
        AdminRoute::Notifications => html! { <Notifications /> },
        AdminRoute::NotFound => html! { <Redirect<AdminRoute> to={AdminRoute::Home} /> },
    }
}

#[function_component]
pub fn AdminPortal() -> Html {
    let route = use_route::<AdminRoute>();
    let at_home = matches!(route, None | Some(AdminRoute::Home));

    html! {
        <div class="admin-container">
            <div class="admin-inner">
                if !at_home {
                    <Link<AdminRoute> to={AdminRoute::Home} classes="back-button">
                        <i class="fa-solid fa-arrow-left"></i>{" Back"}
                    </Link<AdminRoute>>
                }
                <header class="admin-header">
                    <h1 class="admin-title">{"Admin Portal"}</h1>
                    <p class="admin-sub">{"Manage your QuantumTours system"}</p>
                </header>
                <Switch<AdminRoute> render={switch_admin} />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_paths_resolve() {
        assert!(matches!(AdminRoute::recognize("/admin"), Some(AdminRoute::Home)));
        assert!(matches!(AdminRoute::recognize("/admin/logs"), Some(AdminRoute::Logs)));
        assert_eq!(AdminRoute::Pricing.to_path(), "/admin/pricing");
    }
}
