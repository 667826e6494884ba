//! Username/password login screen.

use shared::LoginRequest;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct LoginProps {
    /// Anonymous client; login is the one call made without a token
    pub api: ApiClient,
    /// Emits `(access_token, username)` on success
    pub on_login: Callback<(String, String)>,
}

#[function_component(Login)]
pub fn login(props: &LoginProps) -> Html {
    let username = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| Option::<String>::None);
    let submitting = use_state(|| false);

    let onsubmit = {
        let api = props.api.clone();
        let on_login = props.on_login.clone();
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let submitting = submitting.clone();

        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let api = api.clone();
            let on_login = on_login.clone();
            let username = username.clone();
            let password = password.clone();
            let error = error.clone();
            let submitting = submitting.clone();

            spawn_local(async move {
                error.set(None);
                submitting.set(true);

                let request = LoginRequest {
                    username: (*username).clone(),
                    password: (*password).clone(),
                };
                match api.login(&request).await {
                    Ok(token) => {
                        on_login.emit((token.access_token, (*username).clone()));
                    }
                    Err(failure) => {
                        Logger::warn_with_component("login", "login attempt rejected");
                        error.set(Some(failure.to_string()));
                    }
                }

                submitting.set(false);
            });
        })
    };

    let on_username_change = {
        let username = username.clone();
        let error = error.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            username.set(input.value());
            error.set(None);
        })
    };

    let on_password_change = {
        let password = password.clone();
        let error = error.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            password.set(input.value());
            error.set(None);
        })
    };

    html! {
        <div class="login-container">
            <div class="login-box">
                <div class="login-header">
                    <h1>{ "IM Hub" }</h1>
                    <p class="tagline">{ "Humanitarian information management, in one place" }</p>
                </div>

                <form class="login-form" onsubmit={onsubmit}>
                    <h2>{ "Sign in" }</h2>

                    {if let Some(message) = &*error {
                        html! { <div class="error-message">{ message }</div> }
                    } else {
                        Html::default()
                    }}

                    <div class="form-group">
                        <label for="username">{ "Username" }</label>
                        <input
                            id="username"
                            type="text"
                            required={true}
                            value={(*username).clone()}
                            onchange={on_username_change}
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">{ "Password" }</label>
                        <input
                            id="password"
                            type="password"
                            required={true}
                            value={(*password).clone()}
                            onchange={on_password_change}
                        />
                    </div>

                    <button type="submit" class="submit-button" disabled={*submitting}>
                        { if *submitting { "Signing in..." } else { "Sign in" } }
                    </button>
                </form>
            </div>
        </div>
    }
}
