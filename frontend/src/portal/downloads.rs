use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::portal::{self as portal_api, format_long_date, DownloadItem};
use crate::browser;

const PALETTES: [&str; 3] = ["palette-purple", "palette-blue", "palette-teal"];

pub fn ready_label(count: usize) -> String {
    format!(
        "Found {} video{} ready for download",
        count,
        if count == 1 { "" } else { "s" }
    )
}

#[derive(Properties, PartialEq)]
pub struct DownloadCenterProps {
    pub user_id: Option<String>,
}

#[function_component(DownloadCenter)]
pub fn download_center(props: &DownloadCenterProps) -> Html {
    let videos = use_state(Vec::<DownloadItem>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    {
        let videos = videos.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with_deps(
            move |user_id: &Option<String>| {
                if user_id.is_some() {
                    spawn_local(async move {
                        loading.set(true);
                        error.set(None);
                        match portal_api::downloads().await {
                            Ok(items) => {
                                gloo_console::log!(format!("Download center returned {} videos", items.len()));
                                videos.set(items);
                            }
                            Err(e) => {
                                log::error!("Download center fetch failed: {}", e);
                                error.set(Some(format!("Failed to load videos: {}", e)));
                                videos.set(Vec::new());
                            }
                        }
                        loading.set(false);
                    });
                } else {
                    loading.set(false);
                }
                || ()
            },
            props.user_id.clone(),
        );
    }

    let on_download = {
        let error = error.clone();
        move |item: &DownloadItem| {
            let url = item.url.clone();
            let error = error.clone();
            Callback::from(move |_: MouseEvent| match url.as_deref().filter(|u| !u.is_empty()) {
                Some(url) => browser::open_in_new_tab(url),
                None => error.set(Some("No download URL available for this video".to_string())),
            })
        }
    };

    if *loading {
        return html! {
            <div class="downloads-wrap">
                <div class="loading">
                    <div class="spinner"></div>
                    <p>{"Loading your videos..."}</p>
                </div>
            </div>
        };
    }

    let dismiss = {
        let error = error.clone();
        Callback::from(move |_: MouseEvent| error.set(None))
    };

    html! {
        <div class="downloads-wrap">
            <header class="downloads-header">
                <h1>{"Your Videos"}</h1>
            </header>
            if let Some(message) = (*error).as_ref() {
                <div class="alert">
                    {message}
                    <button class="alert-close" onclick={dismiss}>{"×"}</button>
                </div>
            }
            if videos.is_empty() {
                <div class="empty">
                    <div class="empty-icon">{"🎬"}</div>
                    <div class="empty-title">{"No completed videos yet"}</div>
                    <div class="empty-sub">
                        {"When your orders are finished, your download links will appear here."}
                    </div>
                    if props.user_id.is_none() {
                        <div class="empty-action">{"Please log in to view your videos"}</div>
                    }
                </div>
            } else {
                <div class="stats">{ready_label(videos.len())}</div>
                <div class="video-grid">
                    { for videos.iter().enumerate().map(|(i, video)| html! {
                        <div class={classes!("video-card", PALETTES[i % PALETTES.len()])} key={video.id.clone()}>
                            <div class="video-top">
                                <h3 class="video-name">{format!("Video #{}", video.order_id)}</h3>
                                <span class="video-date">{format_long_date(&video.created)}</span>
                            </div>
                            <div class="video-mid">
                                <div class="video-info">
                                    <span class="video-info-label">{"Video Name"}</span>
                                    <span class="video-id">{&video.name}</span>
                                </div>
                                <button type="button" class="download-button" onclick={on_download(video)}>
                                    {"Video Link"}
                                </button>
                            </div>
                        </div>
                    }) }
                </div>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pluralizes_ready_count() {
        assert_eq!(ready_label(1), "Found 1 video ready for download");
        assert_eq!(ready_label(3), "Found 3 videos ready for download");
    }
}
