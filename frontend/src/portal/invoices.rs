use gloo_timers::future::TimeoutFuture;
use serde_json::Value;
use web_sys::Url;
use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::fields;
use crate::api::portal::{self as portal_api, format_long_date, Invoice, InvoiceDocument};
use crate::browser;

/// How long a PDF object URL stays alive once the new tab has been opened.
pub const PDF_URL_LIFETIME_MS: u32 = 60_000;

/// A URL the backend wants the browser to open, from an invoice or payment
/// response.
pub fn link_in(data: &Value) -> Option<String> {
    fields::first_str(data, &["url", "download_url", "checkout_url", "payment_url"])
}

async fn download(invoice_id: String) -> Result<(), String> {
    match portal_api::invoice_document(&invoice_id).await.map_err(|e| e.to_string())? {
        InvoiceDocument::Pdf(blob) => {
            let url = Url::create_object_url_with_blob(&blob)
                .map_err(|_| "Could not open the invoice PDF.".to_string())?;
            browser::open_in_new_tab(&url);
            spawn_local(async move {
                TimeoutFuture::new(PDF_URL_LIFETIME_MS).await;
                if Url::revoke_object_url(&url).is_err() {
                    log::warn!("Could not revoke invoice object URL");
                }
            });
            Ok(())
        }
        InvoiceDocument::Json(data) => match link_in(&data) {
            Some(url) => {
                browser::open_in_new_tab(&url);
                Ok(())
            }
            None => Err("Invoice is not available for download yet.".to_string()),
        },
    }
}

async fn pay(invoice_id: String) -> Result<(), String> {
    let result = portal_api::pay_invoice(&invoice_id).await.map_err(|e| e.to_string())?;
    match link_in(&result) {
        Some(url) => browser::hard_redirect(&url),
        None => browser::alert("Payment request sent."),
    }
    Ok(())
}

#[derive(Properties, PartialEq)]
pub struct InvoicesProps {
    pub user_id: Option<String>,
}

#[function_component(Invoices)]
pub fn invoices(props: &InvoicesProps) -> Html {
    let list = use_state(Vec::<Invoice>::new);
    let busy = use_state(|| None::<String>);

    {
        let list = list.clone();
        use_effect_with_deps(
            move |user_id: &Option<String>| {
                if user_id.is_some() {
                    spawn_local(async move {
                        match portal_api::invoices().await {
                            Ok(invoices) => list.set(invoices),
                            Err(e) => {
                                log::error!("Invoices fetch failed: {}", e);
                                list.set(Vec::new());
                            }
                        }
                    });
                }
                || ()
            },
            props.user_id.clone(),
        );
    }

    let action = |id: &str, pay_it: bool| {
        let id = id.to_string();
        let busy = busy.clone();
        Callback::from(move |_: MouseEvent| {
            let id = id.clone();
            let busy = busy.clone();
            busy.set(Some(id.clone()));
            spawn_local(async move {
                let result = if pay_it { pay(id).await } else { download(id).await };
                if let Err(message) = result {
                    log::error!("Invoice action failed: {}", message);
                    browser::alert(&message);
                }
                busy.set(None);
            });
        })
    };

    html! {
        <div class="invoices-wrapper">
            <div class="header-bar">
                <h2 class="title">{"Invoice History"}</h2>
            </div>
            <div class="invoice-card">
                <div class="table-header">
                    <div>{"Invoice ID"}</div>
                    <div>{"Date"}</div>
                    <div>{"Amount"}</div>
                    <div>{"Status"}</div>
                    <div>{"Action"}</div>
                </div>
                <div class="invoice-list">
                    { for list.iter().enumerate().map(|(i, inv)| {
                        let id = inv.id.clone().unwrap_or_default();
                        let working = busy.as_deref() == Some(id.as_str());
                        html! {
                            <div class="invoice-row" key={format!("{}-{}", id, i)}>
                                <div>{format!("#{}", id)}</div>
                                <div>{inv.date.as_deref().map(format_long_date).unwrap_or_default()}</div>
                                <div>{inv.amount_label()}</div>
                                <div>
                                    <span class={classes!("badge", if inv.is_paid { "status-paid" } else { "status-pending" })}>
                                        { if inv.is_paid { "Paid" } else { "Pending" } }
                                    </span>
                                </div>
                                <div class="invoice-actions">
                                    <button class="invoice-download" disabled={working || id.is_empty()}
                                        onclick={action(&id, false)}>{"Download"}</button>
                                    if !inv.is_paid {
                                        <button class="invoice-pay" disabled={working || id.is_empty()}
                                            onclick={action(&id, true)}>{"Pay"}</button>
                                    }
                                </div>
                            </div>
                        }
                    }) }
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn finds_first_non_empty_link() {
        assert_eq!(link_in(&json!({"url": "https://x/inv.pdf"})), Some("https://x/inv.pdf".into()));
        assert_eq!(link_in(&json!({"checkout_url": "https://pay"})), Some("https://pay".into()));
        assert_eq!(link_in(&json!({"status": "ok"})), None);
    }
}
