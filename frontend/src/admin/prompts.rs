use serde_json::Value;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::admin as admin_api;

pub const MAX_FEEDBACK_CHARS: usize = 500;

/// Field/value rows for the regeneration response table.
pub fn response_rows(data: &Value) -> Vec<(String, String)> {
    let Some(map) = data.as_object() else {
        return vec![("response".to_string(), data.to_string())];
    };
    map.iter()
        .map(|(key, value)| {
            let shown = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.replace('_', " "), shown)
        })
        .collect()
}

#[function_component(PromptFeedback)]
pub fn prompt_feedback() -> Html {
    let image_id = use_state(String::new);
    let feedback = use_state(String::new);
    let response = use_state(|| None::<Value>);
    let loading = use_state(|| false);
    let error = use_state(String::new);

    let onsubmit = {
        let image_id = image_id.clone();
        let feedback = feedback.clone();
        let response = response.clone();
        let loading = loading.clone();
        let error = error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if image_id.trim().is_empty() {
                error.set("Enter the image id to regenerate.".to_string());
                return;
            }
            let id = (*image_id).clone();
            let prompt = (*feedback).clone();
            let feedback = feedback.clone();
            let response = response.clone();
            let loading = loading.clone();
            let error = error.clone();
            loading.set(true);
            error.set(String::new());
            response.set(None);
            spawn_local(async move {
                match admin_api::regenerate(&id, &prompt).await {
                    Ok(data) => {
                        response.set(Some(data));
                        feedback.set(String::new());
                    }
                    Err(e) => {
                        log::error!("Regeneration failed: {}", e);
                        error.set(e.to_string());
                    }
                }
                loading.set(false);
            });
        })
    };

    let on_image_id = {
        let image_id = image_id.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            image_id.set(input.value());
        })
    };
    let on_feedback = {
        let feedback = feedback.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            let value: String = input.value().chars().take(MAX_FEEDBACK_CHARS).collect();
            feedback.set(value);
        })
    };

    html! {
        <div class="admin-card">
            <div class="admin-card-header"><h5>{"Prompt Management"}</h5></div>
            <div class="admin-card-body">
                <form class="feedback-form" {onsubmit}>
                    <div class="form-header">
                        <h6 class="section-title">{"Request Regeneration"}</h6>
                        <div class="form-hint">{"Provide feedback to regenerate the video with improvements"}</div>
                    </div>
                    <label class="form-label">{"Image ID"}<span class="required">{"*"}</span></label>
                    <input type="text" class="form-control" placeholder="e.g. 10" required=true
                        value={(*image_id).clone()} oninput={on_image_id} disabled={*loading} />
                    <label class="form-label">{"Your Feedback & Instructions"}<span class="required">{"*"}</span></label>
                    <textarea rows="4" class="form-control" required=true disabled={*loading}
                        placeholder="Describe what changes you'd like in the regenerated video..."
                        value={(*feedback).clone()} oninput={on_feedback} />
                    <div class="char-count">{format!("{}/{} characters", feedback.chars().count(), MAX_FEEDBACK_CHARS)}</div>
                    if !error.is_empty() {
                        <div class="error-message">{(*error).clone()}</div>
                    }
                    <div class="form-actions">
                        <button type="submit" class="submit-button" disabled={*loading || feedback.trim().is_empty()}>
                            { if *loading { "Processing..." } else { "Request Regeneration" } }
                        </button>
                        <div class="help-text">{"This will generate a new video based on your feedback"}</div>
                    </div>
                </form>
                if let Some(data) = (*response).as_ref() {
                    <div class="response-section">
                        <div class="response-header">
                            <h6 class="section-title">{"Regeneration Complete"}</h6>
                            <div class="success-badge">{"Success"}</div>
                        </div>
                        <table class="response-table">
                            <thead><tr><th>{"Field"}</th><th>{"Value"}</th></tr></thead>
                            <tbody>
                                { for response_rows(data).into_iter().map(|(field, value)| html! {
                                    <tr key={field.clone()}>
                                        <td data-label="Field">{field.clone()}</td>
                                        <td data-label="Value">
                                            if field == "video url" {
                                                <a href={value} target="_blank" rel="noopener noreferrer" class="video-link">
                                                    {"View Generated Video"}
                                                </a>
                                            } else {
                                                {value}
                                            }
                                        </td>
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_keys_are_humanized() {
        let rows = response_rows(&json!({"video_url": "https://v/1.mp4", "image_id": 10}));
        assert!(rows.contains(&("video url".to_string(), "https://v/1.mp4".to_string())));
        assert!(rows.contains(&("image id".to_string(), "10".to_string())));
    }

    #[test]
    fn non_object_response_is_one_row() {
        assert_eq!(response_rows(&json!("ok")), vec![("response".to_string(), "\"ok\"".to_string())]);
    }
}
