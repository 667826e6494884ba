//! Dismissible status banners shared by the form-bearing screens.

use yew::prelude::*;

use crate::services::api::ApiError;

/// Outcome of a user-initiated write, surfaced until dismissed.
#[derive(Clone, PartialEq)]
pub enum Feedback {
    Success(String),
    Error(String),
}

#[derive(Properties, PartialEq)]
pub struct FeedbackBannerProps {
    pub feedback: Option<Feedback>,
    pub on_dismiss: Callback<()>,
}

#[function_component(FeedbackBanner)]
pub fn feedback_banner(props: &FeedbackBannerProps) -> Html {
    let Some(feedback) = &props.feedback else {
        return Html::default();
    };
    let (class, text) = match feedback {
        Feedback::Success(text) => ("message success", text),
        Feedback::Error(text) => ("message error", text),
    };
    let dismiss = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_| on_dismiss.emit(()))
    };
    html! {
        <div class={class}>
            <span>{ text }</span>
            <button class="message-dismiss" onclick={dismiss} aria-label="Dismiss">{ "✕" }</button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LoadErrorProps {
    pub error: ApiError,
    /// Re-triggers the fetch; retries are always user-initiated
    pub on_retry: Callback<()>,
}

#[function_component(LoadError)]
pub fn load_error(props: &LoadErrorProps) -> Html {
    let retry = {
        let on_retry = props.on_retry.clone();
        Callback::from(move |_| on_retry.emit(()))
    };
    html! {
        <div class="error-message">
            <span>{ props.error.to_string() }</span>
            <button class="retry-button" onclick={retry}>{ "Retry" }</button>
        </div>
    }
}
