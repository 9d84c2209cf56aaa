use web_sys::HtmlInputElement;
use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::admin::{self as admin_api, AdminOrder};
use crate::api::portal::format_long_date;
use crate::browser;

pub const MAX_VIDEO_BYTES: f64 = 50.0 * 1024.0 * 1024.0;
const VIDEO_TYPES: [&str; 5] = ["video/mp4", "video/avi", "video/mov", "video/wmv", "video/flv"];

pub fn validate_video(size: f64, mime: &str) -> Result<(), &'static str> {
    if size > MAX_VIDEO_BYTES {
        return Err("File size too large. Please select a video under 50MB.");
    }
    if !mime.starts_with("video/") && !VIDEO_TYPES.contains(&mime) {
        return Err("Please select a valid video file (MP4, AVI, MOV, WMV, FLV).");
    }
    Ok(())
}

#[derive(Clone, PartialEq)]
enum Load {
    Loading,
    Failed(String),
    Ready,
}

#[function_component(OrderManagement)]
pub fn order_management() -> Html {
    let orders = use_state(Vec::<AdminOrder>::new);
    let load = use_state(|| Load::Loading);
    let uploading = use_state(|| None::<String>);
    let modal_video = use_state(|| None::<String>);
    let reload = use_state(|| 0u32);

    {
        let orders = orders.clone();
        let load = load.clone();
        use_effect_with_deps(
            move |_| {
                load.set(Load::Loading);
                spawn_local(async move {
                    match admin_api::orders().await {
                        Ok(list) => {
                            log::info!("Loaded {} admin orders", list.len());
                            orders.set(list);
                            load.set(Load::Ready);
                        }
                        Err(e) => {
                            log::error!("Order management fetch failed: {}", e);
                            load.set(Load::Failed(e.to_string()));
                        }
                    }
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

    let change_status = |order: &AdminOrder, status: &'static str| {
        let order = order.clone();
        let orders = orders.clone();
        Callback::from(move |_: MouseEvent| {
            let order = order.clone();
            let orders = orders.clone();
            spawn_local(async move {
                match admin_api::update_order_status(order.status_target(), status).await {
                    Ok(result) => {
                        let updated = admin_api::apply_status_result(&order, status, &result);
                        orders.set(orders.iter().map(|o| if o.id == order.id { updated.clone() } else { o.clone() }).collect());
                    }
                    Err(e) => browser::alert(&format!("Error updating order status: {}", e)),
                }
            });
        })
    };

    let on_video = |order: &AdminOrder| {
        let order = order.clone();
        let orders = orders.clone();
        let uploading = uploading.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|l| l.item(0)) else {
                return;
            };
            if let Err(message) = validate_video(file.size(), &file.type_()) {
                browser::alert(message);
                input.set_value("");
                return;
            }
            log::info!("Selected file: {} size={} type={}", file.name(), file.size(), file.type_());
            let order = order.clone();
            let orders = orders.clone();
            let uploading = uploading.clone();
            uploading.set(Some(order.id.clone()));
            spawn_local(async move {
                let client_id = order.client.clone().unwrap_or_else(|| order.id.clone());
                match admin_api::upload_final_video(&client_id, &file).await {
                    Ok(result) => {
                        let updated = admin_api::apply_upload_result(&order, &file.name(), &result);
                        orders.set(orders.iter().map(|o| if o.id == order.id { updated.clone() } else { o.clone() }).collect());
                        browser::alert("Final video uploaded successfully!");
                    }
                    Err(e) => browser::alert(&format!("Error uploading final video: {}", e)),
                }
                uploading.set(None);
            });
        })
    };

    let open_modal = |url: String| {
        let modal_video = modal_video.clone();
        Callback::from(move |_: MouseEvent| modal_video.set(Some(url.clone())))
    };
    let close_modal = {
        let modal_video = modal_video.clone();
        Callback::from(move |_: MouseEvent| modal_video.set(None))
    };

    match &*load {
        Load::Loading => {
            return html! {
                <div class="loading-wrapper">
                    <div class="spinner"></div>
                    <span class="loading-text">{"Loading orders..."}</span>
                </div>
            };
        }
        Load::Failed(message) => {
            return html! {
                <div class="admin-card">
                    <div class="admin-card-header"><h5>{"Order List"}</h5></div>
                    <div class="error-message">
                        <h3>{"Error Loading Orders"}</h3>
                        <p>{message}</p>
                        <p class="error-details">{"Data format issue. Please check:"}</p>
                        <ul>
                            <li>{"Backend response format"}</li>
                            <li>{"Check browser console for details"}</li>
                            <li>{"Backend server status"}</li>
                        </ul>
                        <button class="retry-button" onclick={refresh}>{"Retry"}</button>
                    </div>
                </div>
            };
        }
        Load::Ready => {}
    }

    let card = |order: &AdminOrder| -> Html {
        let is_uploading = uploading.as_deref() == Some(order.id.as_str());
        let input_id = format!("file-upload-{}", order.id);
        html! {
            <div class="order-card" key={order.id.clone()}>
                <div class="card-header">
                    <div class="order-basic-info">
                        <span class={classes!("order-status", format!("status-{}", order.status))}>
                            {order.status.to_uppercase()}
                        </span>
                        <div class="order-meta">
                            <span class="order-id">{format!("Client #{}", order.id)}</span>
                            <span class="order-date">{format_long_date(&order.date)}</span>
                        </div>
                    </div>
                    <div class="package-info">
                        <span class="package-name">{&order.package}</span>
                        <span class="photos-count">{format!("{} photos", order.photos)}</span>
                    </div>
                </div>

                <div class="card-content">
                    <h4 class="section-title">{"VIDEO PREVIEW"}</h4>
                    if let Some(url) = order.video_url.clone() {
                        <div class="video-preview" onclick={open_modal(url.clone())}>
                            <video class="video-player" controls=true>
                                <source src={url} type="video/mp4" />
                            </video>
                            <span class="fullscreen-text">{"▶ Click for fullscreen"}</span>
                        </div>
                    } else if order.videos.is_empty() {
                        <div class="no-video">{"No preview videos available"}</div>
                    }
                    if !order.videos.is_empty() {
                        <p class="video-count">{format!("+{} more video(s) available", order.videos.len())}</p>
                    }
                    if let Some(url) = order.final_video_url.clone() {
                        <a class="final-video-link" href={url} target="_blank">{"Final video"}</a>
                    }
                </div>

                <div class="card-actions">
                    <h4 class="section-title">{"UPDATE STATUS"}</h4>
                    <div class="status-buttons">
                        <button class={classes!("status-button", (order.status == "processing").then(|| "status-active"))}
                            disabled={order.status == "processing"}
                            onclick={change_status(order, "processing")}>
                            { if order.status == "processing" { "✓ Processing" } else { "Mark Processing" } }
                        </button>
                        <button class={classes!("status-button", (order.status == "completed").then(|| "status-active"))}
                            disabled={order.status == "completed"}
                            onclick={change_status(order, "completed")}>
                            { if order.status == "completed" { "✓ Completed" } else { "Mark Completed" } }
                        </button>
                    </div>
                    if order.status == "completed" {
                        <h4 class="section-title">{"UPLOAD FINAL VIDEO"}</h4>
                        <div class="upload-section">
                            <input type="file" accept="video/mp4,.mp4,video/*" id={input_id.clone()}
                                class="upload-input" disabled={is_uploading} onchange={on_video(order)} />
                            <label for={input_id} class="upload-label">{"Choose Video File"}</label>
                            if is_uploading {
                                <div class="uploading-indicator">{"⏳ Uploading..."}</div>
                            }
                            <div class="upload-hint">{"Max 50MB, MP4 format recommended"}</div>
                        </div>
                    }
                </div>
            </div>
        }
    };

    html! {
        <>
            <div class="admin-card">
                <div class="admin-card-header">
                    <h5>{"Order List"}</h5>
                    <button class="refresh-button" onclick={refresh}>{"Refresh Orders"}</button>
                </div>
                <div class="orders-grid">
                    if orders.is_empty() {
                        <div class="no-orders">{"No orders available."}</div>
                    } else {
                        { for orders.iter().map(card) }
                    }
                </div>
                if !orders.is_empty() {
                    <div class="orders-count">{format!("Total Orders: {}", orders.len())}</div>
                }
            </div>
            if let Some(url) = (*modal_video).clone() {
                <div class="modal-overlay" role="dialog" aria-modal="true" onclick={close_modal.clone()}>
                    <div class="modal-content" onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
                        <button class="modal-close" aria-label="Close video preview" onclick={close_modal}>{"×"}</button>
                        <video src={url} controls=true autoplay=true class="modal-video"></video>
                    </div>
                </div>
            }
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_oversized_videos() {
        assert_eq!(
            validate_video(MAX_VIDEO_BYTES + 1.0, "video/mp4"),
            Err("File size too large. Please select a video under 50MB.")
        );
        assert_eq!(validate_video(MAX_VIDEO_BYTES, "video/mp4"), Ok(()));
    }

    #[test]
    fn rejects_non_video_types() {
        assert_eq!(
            validate_video(1024.0, "image/png"),
            Err("Please select a valid video file (MP4, AVI, MOV, WMV, FLV).")
        );
        assert_eq!(validate_video(1024.0, "video/quicktime"), Ok(()));
    }
}
