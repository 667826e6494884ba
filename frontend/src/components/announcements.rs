//! Announcements feed shown on the home screen.

use shared::Announcement;
use yew::prelude::*;

use crate::components::feedback::LoadError;
use crate::hooks::use_collection::use_collection;
use crate::services::api::ApiClient;
use crate::services::date_utils::format_display_date;

#[derive(Properties, PartialEq)]
pub struct AnnouncementsProps {
    pub api: ApiClient,
    /// Caps how many entries the backend returns; `None` fetches them all
    #[prop_or_default]
    pub limit: Option<usize>,
}

fn priority_icon(announcement: &Announcement) -> &'static str {
    match announcement.priority {
        shared::Priority::High => "🔴",
        shared::Priority::Medium => "🟠",
        shared::Priority::Low => "⚪",
        shared::Priority::Normal => "🔵",
    }
}

#[function_component(Announcements)]
pub fn announcements(props: &AnnouncementsProps) -> Html {
    let feed = use_collection(
        (props.api.clone(), props.limit),
        |(api, limit): (ApiClient, Option<usize>)| async move { api.announcements(limit).await },
    );
    let expanded = use_state(|| Option::<i64>::None);

    let items = match &feed.items {
        Some(items) => items.clone(),
        None => {
            return html! {
                <div class="announcements-section">
                    <h2>{ "📢 Announcements" }</h2>
                    {if let Some(error) = feed.state.error() {
                        html! { <LoadError error={error.clone()} on_retry={feed.refresh.clone()} /> }
                    } else {
                        html! { <div class="loading">{ "Loading announcements..." }</div> }
                    }}
                </div>
            }
        }
    };

    // An empty feed renders nothing rather than an empty section
    if items.is_empty() {
        return Html::default();
    }

    html! {
        <div class="announcements-section">
            <h2>{ "📢 Announcements" }</h2>

            {if let Some(error) = feed.state.error() {
                html! { <LoadError error={error.clone()} on_retry={feed.refresh.clone()} /> }
            } else {
                Html::default()
            }}

            <div class="announcements-list">
                {for items.iter().map(|announcement| {
                    let is_expanded = *expanded == Some(announcement.id);
                    let toggle = {
                        let expanded = expanded.clone();
                        let id = announcement.id;
                        Callback::from(move |_| {
                            expanded.set(if *expanded == Some(id) { None } else { Some(id) });
                        })
                    };
                    let card_class = format!(
                        "announcement-card {}{}",
                        announcement.priority.css_class(),
                        if is_expanded { " expanded" } else { "" },
                    );
                    html! {
                        <div key={announcement.id.to_string()} class={card_class}>
                            <button class="announcement-header" onclick={toggle}>
                                <span class="priority-icon">{ priority_icon(announcement) }</span>
                                <span class="announcement-title">{ &announcement.title }</span>
                                {if let Some(date) = &announcement.date {
                                    html! { <span class="announcement-date">{ format_display_date(date) }</span> }
                                } else {
                                    Html::default()
                                }}
                            </button>
                            {if is_expanded {
                                html! {
                                    <div class="announcement-body">
                                        { Html::from_html_unchecked(AttrValue::from(announcement.content.clone())) }
                                        <div class="announcement-meta">
                                            {if let Some(author) = &announcement.author {
                                                html! { <span class="announcement-author">{ author }</span> }
                                            } else {
                                                Html::default()
                                            }}
                                            {for announcement.tags.iter().map(|tag| html! {
                                                <span key={tag.clone()} class="announcement-tag">{ tag }</span>
                                            })}
                                        </div>
                                    </div>
                                }
                            } else {
                                Html::default()
                            }}
                        </div>
                    }
                })}
            </div>
        </div>
    }
}
