//! Latest map products from the external map feed.

use shared::MapEntry;
use yew::prelude::*;

use crate::components::feedback::LoadError;
use crate::hooks::use_collection::use_collection;
use crate::services::api::ApiClient;
use crate::services::date_utils::format_display_datetime;

#[derive(Properties, PartialEq)]
pub struct MapFeedProps {
    pub api: ApiClient,
    /// How many entries to show before "Show all"
    #[prop_or(5)]
    pub limit: usize,
    #[prop_or(true)]
    pub show_title: bool,
}

#[function_component(MapFeed)]
pub fn map_feed(props: &MapFeedProps) -> Html {
    let feed = use_collection(props.api.clone(), |api: ApiClient| async move {
        api.map_feed().await.map(|feed| feed.maps)
    });
    let show_all = use_state(|| false);

    let title = if props.show_title {
        html! { <h2>{ "Latest maps" }</h2> }
    } else {
        Html::default()
    };

    let entries = match &feed.items {
        Some(entries) => entries.clone(),
        None => {
            return html! {
                <div class="mapaction-feed">
                    { title }
                    {if let Some(error) = feed.state.error() {
                        html! { <LoadError error={error.clone()} on_retry={feed.refresh.clone()} /> }
                    } else {
                        html! { <div class="loading">{ "Loading maps..." }</div> }
                    }}
                </div>
            }
        }
    };

    let visible: Vec<&MapEntry> = if *show_all {
        entries.iter().collect()
    } else {
        entries.iter().take(props.limit).collect()
    };

    let toggle_show_all = {
        let show_all = show_all.clone();
        Callback::from(move |_| show_all.set(!*show_all))
    };

    html! {
        <div class="mapaction-feed">
            { title }

            {if let Some(error) = feed.state.error() {
                html! { <LoadError error={error.clone()} on_retry={feed.refresh.clone()} /> }
            } else {
                Html::default()
            }}

            <div class="map-list">
                {for visible.iter().map(|entry| html! {
                    <div key={entry.id.clone()} class="map-card">
                        <div class="map-card-header">
                            {if let Some(code) = entry.map_code() {
                                html! { <span class="map-code">{ code }</span> }
                            } else {
                                Html::default()
                            }}
                            <a href={entry.link.clone()} target="_blank" rel="noopener noreferrer" class="map-title">
                                { &entry.title }
                            </a>
                        </div>
                        <p class="map-summary">{ &entry.summary }</p>
                        <div class="map-meta">
                            {if let Some(published) = &entry.published {
                                html! { <span class="map-date">{ format!("Published {}", format_display_datetime(published)) }</span> }
                            } else {
                                Html::default()
                            }}
                            {if let Some(package_url) = &entry.package_url {
                                let label = match &entry.package_type {
                                    Some(kind) => format!("Download ({})", kind),
                                    None => "Download".to_string(),
                                };
                                html! {
                                    <a href={package_url.clone()} class="map-download" target="_blank" rel="noopener noreferrer">
                                        { label }
                                    </a>
                                }
                            } else {
                                Html::default()
                            }}
                        </div>
                    </div>
                })}
            </div>

            {if entries.len() > props.limit {
                html! {
                    <button class="show-all-button" onclick={toggle_show_all}>
                        { if *show_all { "Show fewer" } else { "Show all" } }
                    </button>
                }
            } else {
                Html::default()
            }}
        </div>
    }
}
