//! App header with the signed-in user and the logout control.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    #[prop_or_default]
    pub username: Option<String>,
    pub on_logout: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_| on_logout.emit(()))
    };
    html! {
        <header class="app-header">
            <div class="app-title">
                <h1>{ "IM Hub" }</h1>
                <span class="app-subtitle">{ "Response coordination workspace" }</span>
            </div>
            <div class="header-actions">
                {if let Some(username) = &props.username {
                    html! { <span class="header-username">{ username }</span> }
                } else {
                    Html::default()
                }}
                <button class="logout-button" onclick={logout}>{ "Log out" }</button>
            </div>
        </header>
    }
}
