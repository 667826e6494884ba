//! Landing screen: announcements plus the latest map products.

use yew::prelude::*;

use crate::components::announcements::Announcements;
use crate::components::map_feed::MapFeed;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct HomeProps {
    pub api: ApiClient,
}

#[function_component(Home)]
pub fn home(props: &HomeProps) -> Html {
    html! {
        <div class="home-section">
            <h2>{ "Welcome" }</h2>
            <p class="intro-text">
                { "Dashboards, coordination groups, contacts and shared resources for the response, behind one login." }
            </p>
            <Announcements api={props.api.clone()} limit={Some(3)} />
            <MapFeed api={props.api.clone()} limit={5} />
        </div>
    }
}
