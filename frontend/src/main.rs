//! App shell: token verification, tab navigation and screen routing.

mod collection;
mod components;
mod hooks;
mod services;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::admin_page::AdminPage;
use crate::components::contacts_page::ContactsPage;
use crate::components::groups_page::GroupsPage;
use crate::components::header::Header;
use crate::components::home::Home;
use crate::components::links_page::LinksPage;
use crate::components::login::Login;
use crate::components::map_feed::MapFeed;
use crate::components::navigation::{Navigation, Tab};
use crate::components::resources_page::ResourcesPage;
use crate::hooks::use_overlay::{OverlayAction, OverlayRegistry, OverlayState};
use crate::services::api::ApiClient;
use crate::services::auth::AuthSession;
use crate::services::logging::Logger;

#[function_component(App)]
fn app() -> Html {
    let session = use_state(AuthSession::restore);
    let checking = use_state(|| true);
    let username = use_state(|| Option::<String>::None);
    let active_tab = use_state(|| Tab::Home);
    let overlays = use_reducer(OverlayState::default);

    // Verify whatever token the last visit left behind. An auth failure
    // here (and only here) clears the stored token and forces re-login;
    // other failures leave the token in place for the next visit.
    {
        let session = session.clone();
        let checking = checking.clone();
        let username = username.clone();
        use_effect_with((), move |_| {
            let current = (*session).clone();
            if !current.is_authenticated() {
                checking.set(false);
                return;
            }
            let api = ApiClient::new(current);
            spawn_local(async move {
                match api.verify().await {
                    Ok(verified) => {
                        username.set(Some(verified.username));
                    }
                    Err(failure) if failure.is_auth() => {
                        Logger::info_with_component("app", "stored token rejected, signing out");
                        let cleared = AuthSession::anonymous();
                        cleared.persist();
                        session.set(cleared);
                    }
                    Err(_) => {
                        Logger::warn_with_component("app", "token verification unreachable");
                        session.set(AuthSession::anonymous());
                    }
                }
                checking.set(false);
            });
        });
    }

    let on_login = {
        let session = session.clone();
        let username = username.clone();
        Callback::from(move |(token, name): (String, String)| {
            let authenticated = AuthSession::with_token(token);
            authenticated.persist();
            session.set(authenticated);
            username.set(Some(name));
        })
    };

    let on_logout = {
        let session = session.clone();
        let username = username.clone();
        let active_tab = active_tab.clone();
        Callback::from(move |_| {
            let cleared = AuthSession::anonymous();
            cleared.persist();
            session.set(cleared);
            username.set(None);
            active_tab.set(Tab::Home);
        })
    };

    let on_select_tab = {
        let active_tab = active_tab.clone();
        let overlays = overlays.clone();
        Callback::from(move |tab: Tab| {
            overlays.dispatch(OverlayAction::CloseAll);
            active_tab.set(tab);
        })
    };

    if *checking {
        return html! { <div class="loading">{ "Loading..." }</div> };
    }

    let api = ApiClient::new((*session).clone());
    if !session.is_authenticated() {
        return html! { <Login api={api} on_login={on_login} /> };
    }

    let is_authenticated = session.is_authenticated();
    let screen = match *active_tab {
        Tab::Home => html! { <Home api={api.clone()} /> },
        Tab::Groups => html! { <GroupsPage api={api.clone()} /> },
        Tab::Contacts => html! { <ContactsPage api={api.clone()} /> },
        Tab::Links => html! { <LinksPage api={api.clone()} is_authenticated={is_authenticated} /> },
        Tab::Resources => html! { <ResourcesPage api={api.clone()} /> },
        Tab::Maps => html! { <MapFeed api={api.clone()} limit={10} /> },
        Tab::Admin => html! { <AdminPage api={api.clone()} /> },
    };

    html! {
        <ContextProvider<OverlayRegistry> context={overlays.clone()}>
            <div class="app-shell">
                <Header username={(*username).clone()} on_logout={on_logout} />
                <Navigation
                    active={*active_tab}
                    is_authenticated={is_authenticated}
                    on_select={on_select_tab}
                />
                <main class="app-content">
                    { screen }
                </main>
            </div>
        </ContextProvider<OverlayRegistry>>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
