use gloo_timers::callback::Interval;
use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::admin::{self as admin_api, JobStatus, LogsSnapshot};
use crate::api::portal::format_long_date;

const REFRESH_MS: u32 = 5_000;

fn status_class(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Queued => "queued",
        JobStatus::Processing => "processing",
        JobStatus::Succeeded => "success",
        JobStatus::Failed => "error",
    }
}

fn fetch_into(data: UseStateHandle<Option<LogsSnapshot>>, loading: UseStateHandle<bool>) {
    spawn_local(async move {
        match admin_api::logs_status().await {
            Ok(snapshot) => data.set(Some(snapshot)),
            Err(e) => log::error!("Error fetching logs-status: {}", e),
        }
        loading.set(false);
    });
}

#[function_component(JobTracker)]
pub fn job_tracker() -> Html {
    let data = use_state(|| None::<LogsSnapshot>);
    let loading = use_state(|| true);
    let page = use_state(|| 1usize);

    {
        let data = data.clone();
        let loading = loading.clone();
        use_effect_with_deps(
            move |_| {
                fetch_into(data.clone(), loading.clone());
                let interval = Interval::new(REFRESH_MS, move || fetch_into(data.clone(), loading.clone()));
                move || drop(interval)
            },
            (),
        );
    }

    if *loading {
        return html! {
            <div class="loading-wrapper">
                <div class="pulse-spinner"></div>
                <span class="loading-text">{"Loading logs..."}</span>
            </div>
        };
    }

    let snapshot = (*data).clone().unwrap_or_default();
    let total_pages = snapshot.total_pages();
    // A refresh can shrink the list under the current page.
    let current = (*page).clamp(1, total_pages.max(1));
    let go_to = |target: usize| {
        let page = page.clone();
        Callback::from(move |_: MouseEvent| page.set(target))
    };

    html! {
        <div class="job-tracker-card">
            <div class="job-tracker-header">
                <h5 class="job-tracker-title">{"Job Status Monitor"}</h5>
                <div class="last-update">{"Real-time updates • Auto-refresh every 5s"}</div>
            </div>
            <div class="job-tracker-body">
                if data.is_some() {
                    <div class="status-summary">
                        <span class="status-badge queued">{format!("Queued: {}", snapshot.count(JobStatus::Queued))}</span>
                        <span class="status-badge processing">{format!("Processing: {}", snapshot.count(JobStatus::Processing))}</span>
                        <span class="status-badge success">{format!("Succeeded: {}", snapshot.count(JobStatus::Succeeded))}</span>
                        <span class="status-badge error">{format!("Failed: {}", snapshot.count(JobStatus::Failed))}</span>
                    </div>
                }
                <div class="logs-timeline">
                    if snapshot.logs.is_empty() {
                        <div class="no-logs">
                            <span class="no-logs-text">{"No logs available"}</span>
                            <span class="no-logs-subtext">{"Logs will appear here as jobs are processed"}</span>
                        </div>
                    } else {
                        { for snapshot.page(current).iter().enumerate().map(|(i, log)| html! {
                            <div class="timeline-item" key={format!("{}-{}", log.video_id.clone().unwrap_or_default(), i)}>
                                <div class="log-node">
                                    <div class="node-header">
                                        <div class="node-main-info">
                                            <span class={classes!("status-indicator", status_class(log.status))}>{log.status.key()}</span>
                                            <div class="id-info">
                                                <span class="video-id">{format!("Video: {}", log.video_id.clone().unwrap_or_default())}</span>
                                                <span class="order-id">{format!("Order: {}", log.order_id.clone().unwrap_or_default())}</span>
                                                <span class="email">{log.username.clone().unwrap_or_else(|| "Guest".to_string())}</span>
                                            </div>
                                        </div>
                                        <div class="node-meta">
                                            <span class="package-tag">{log.package.clone().unwrap_or_else(|| "Standard".to_string())}</span>
                                            <span class="created-time">{log.created_at.as_deref().map(format_long_date).unwrap_or_default()}</span>
                                        </div>
                                    </div>
                                    <div class="progress-bar">
                                        <div class={classes!("progress-fill", status_class(log.status))}
                                            style={format!("width: {}", log.status.progress_width())}></div>
                                    </div>
                                </div>
                            </div>
                        }) }
                    }
                </div>
                if total_pages > 1 {
                    <div class="pagination-container">
                        <div class="pagination-wrapper">
                            <button class="pagination-arrow" disabled={current == 1}
                                onclick={go_to(current.saturating_sub(1).max(1))}>{"‹"}</button>
                            { for (1..=total_pages).map(|n| html! {
                                <button key={n} class={classes!("pagination-item", (n == current).then(|| "active"))}
                                    onclick={go_to(n)}>{n}</button>
                            }) }
                            <button class="pagination-arrow" disabled={current == total_pages}
                                onclick={go_to((current + 1).min(total_pages))}>{"›"}</button>
                        </div>
                        <div class="page-info">
                            {format!("Page {} of {} • {} total logs", current, total_pages, snapshot.logs.len())}
                        </div>
                    </div>
                }
            </div>
        </div>
    }
}
