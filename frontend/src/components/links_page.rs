//! URL shortener: browse, create, edit and retire short links.

use std::rc::Rc;

use shared::{is_valid_slug, SaveLinkRequest, ShortLink};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::collection::columns::ColumnDescriptor;
use crate::collection::pipeline::Pipeline;
use crate::collection::view_state::ViewMode;
use crate::components::actions_dropdown::{ActionsDropdown, MenuAction};
use crate::components::feedback::{Feedback, FeedbackBanner, LoadError};
use crate::components::paginated_table::PaginatedTable;
use crate::hooks::use_collection_view::use_collection_view;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct LinksPageProps {
    pub api: ApiClient,
    /// Editing controls only appear for signed-in users
    pub is_authenticated: bool,
}

#[derive(Clone, Default, PartialEq)]
struct LinkForm {
    title: String,
    slug: String,
    url: String,
    description: String,
}

impl LinkForm {
    fn from_link(link: &ShortLink) -> Self {
        Self {
            title: link.title.clone(),
            slug: link.slug.clone(),
            url: link.url.clone(),
            description: link.description.clone().unwrap_or_default(),
        }
    }

    fn to_request(&self) -> SaveLinkRequest {
        let description = self.description.trim();
        SaveLinkRequest {
            title: self.title.trim().to_string(),
            slug: self.slug.trim().to_string(),
            url: self.url.trim().to_string(),
            description: if description.is_empty() {
                None
            } else {
                Some(description.to_string())
            },
        }
    }
}

fn short_url(slug: &str) -> String {
    let origin = web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default();
    format!("{}/link/{}", origin, slug)
}

fn truncate_url(url: &str) -> String {
    if url.chars().count() > 50 {
        let cut: String = url.chars().take(50).collect();
        format!("{}...", cut)
    } else {
        url.to_string()
    }
}

#[function_component(LinksPage)]
pub fn links_page(props: &LinksPageProps) -> Html {
    let handle = use_collection_view(
        10,
        ViewMode::Cards,
        props.api.clone(),
        |api: ApiClient| async move { api.short_links().await },
    );

    let pipeline = use_memo((), |_| {
        Pipeline::<ShortLink>::new().search_fields(|link| {
            let mut fields = vec![link.title.clone(), link.slug.clone(), link.url.clone()];
            if let Some(description) = &link.description {
                fields.push(description.clone());
            }
            fields
        })
    });

    let show_form = use_state(|| false);
    let editing_id = use_state(|| Option::<i64>::None);
    let form = use_state(LinkForm::default);
    let form_error = use_state(|| Option::<String>::None);
    let submitting = use_state(|| false);
    let feedback = use_state(|| Option::<Feedback>::None);

    let links = handle.items.clone().unwrap_or_default();
    let filtered = Rc::new(pipeline.apply(&links, &handle.view.filters));

    let on_search_input = {
        let set_search = handle.set_search.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            set_search.emit(input.value());
        })
    };
    let to_cards = {
        let set_view_mode = handle.set_view_mode.clone();
        Callback::from(move |_| set_view_mode.emit(ViewMode::Cards))
    };
    let to_table = {
        let set_view_mode = handle.set_view_mode.clone();
        Callback::from(move |_| set_view_mode.emit(ViewMode::Table))
    };

    let reset_form = {
        let show_form = show_form.clone();
        let editing_id = editing_id.clone();
        let form = form.clone();
        let form_error = form_error.clone();
        Callback::from(move |_: ()| {
            form.set(LinkForm::default());
            form_error.set(None);
            editing_id.set(None);
            show_form.set(false);
        })
    };

    let toggle_form = {
        let show_form = show_form.clone();
        let reset_form = reset_form.clone();
        Callback::from(move |_| {
            if *show_form {
                reset_form.emit(());
            } else {
                show_form.set(true);
            }
        })
    };

    let start_edit = {
        let show_form = show_form.clone();
        let editing_id = editing_id.clone();
        let form = form.clone();
        let form_error = form_error.clone();
        Callback::from(move |link: ShortLink| {
            form.set(LinkForm::from_link(&link));
            form_error.set(None);
            editing_id.set(Some(link.id));
            show_form.set(true);
        })
    };

    let onsubmit = {
        let api = props.api.clone();
        let form = form.clone();
        let form_error = form_error.clone();
        let editing_id = editing_id.clone();
        let submitting = submitting.clone();
        let feedback = feedback.clone();
        let refresh = handle.refresh.clone();
        let reset_form = reset_form.clone();

        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let request = form.to_request();
            if !is_valid_slug(&request.slug) {
                form_error.set(Some(
                    "Slugs may only contain letters, numbers, hyphens and underscores.".to_string(),
                ));
                return;
            }

            let api = api.clone();
            let form_error = form_error.clone();
            let editing = *editing_id;
            let submitting = submitting.clone();
            let feedback = feedback.clone();
            let refresh = refresh.clone();
            let reset_form = reset_form.clone();

            spawn_local(async move {
                submitting.set(true);
                form_error.set(None);

                let outcome = match editing {
                    Some(id) => api.update_link(id, &request).await.map(|_| "Link updated"),
                    None => api.create_link(&request).await.map(|_| "Link created"),
                };
                match outcome {
                    Ok(message) => {
                        feedback.set(Some(Feedback::Success(message.to_string())));
                        reset_form.emit(());
                        refresh.emit(());
                    }
                    Err(failure) => {
                        Logger::warn_with_component("links-page", "saving link failed");
                        form_error.set(Some(failure.to_string()));
                    }
                }

                submitting.set(false);
            });
        })
    };

    let delete_link = {
        let api = props.api.clone();
        let feedback = feedback.clone();
        let refresh = handle.refresh.clone();
        Callback::from(move |id: i64| {
            let api = api.clone();
            let feedback = feedback.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                match api.delete_link(id).await {
                    Ok(()) => {
                        feedback.set(Some(Feedback::Success("Link deleted".to_string())));
                        refresh.emit(());
                    }
                    Err(failure) => {
                        feedback.set(Some(Feedback::Error(failure.to_string())));
                    }
                }
            });
        })
    };

    let copy_link = {
        let feedback = feedback.clone();
        Callback::from(move |slug: String| {
            feedback.set(Some(Feedback::Success(format!(
                "Short link: {}",
                short_url(&slug)
            ))));
        })
    };

    let dismiss_feedback = {
        let feedback = feedback.clone();
        Callback::from(move |_| feedback.set(None))
    };

    let field = |update: fn(&mut LinkForm, String)| {
        let form = form.clone();
        let form_error = form_error.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let mut next = (*form).clone();
            update(&mut next, input.value());
            form.set(next);
            form_error.set(None);
        })
    };
    let on_description_change = {
        let form = form.clone();
        Callback::from(move |event: Event| {
            let area: HtmlTextAreaElement = event.target_unchecked_into();
            let mut next = (*form).clone();
            next.description = area.value();
            form.set(next);
        })
    };

    let link_actions = |link: &ShortLink| -> Html {
        if !props.is_authenticated {
            return Html::default();
        }
        let edit = {
            let start_edit = start_edit.clone();
            let link = link.clone();
            Callback::from(move |_| start_edit.emit(link.clone()))
        };
        let delete = {
            let delete_link = delete_link.clone();
            let id = link.id;
            Callback::from(move |_| delete_link.emit(id))
        };
        html! {
            <ActionsDropdown
                actions={vec![
                    MenuAction::new("Edit", edit),
                    MenuAction::danger("Delete", delete),
                ]}
            />
        }
    };

    let columns = {
        let copy_link = copy_link.clone();
        let link_actions_cell = {
            let start_edit = start_edit.clone();
            let delete_link = delete_link.clone();
            let is_authenticated = props.is_authenticated;
            move |link: &ShortLink| -> Html {
                let copy = {
                    let copy_link = copy_link.clone();
                    let slug = link.slug.clone();
                    Callback::from(move |_| copy_link.emit(slug.clone()))
                };
                let dropdown = if is_authenticated {
                    let edit = {
                        let start_edit = start_edit.clone();
                        let link = link.clone();
                        Callback::from(move |_| start_edit.emit(link.clone()))
                    };
                    let delete = {
                        let delete_link = delete_link.clone();
                        let id = link.id;
                        Callback::from(move |_| delete_link.emit(id))
                    };
                    html! {
                        <ActionsDropdown
                            actions={vec![
                                MenuAction::new("Edit", edit),
                                MenuAction::danger("Delete", delete),
                            ]}
                        />
                    }
                } else {
                    Html::default()
                };
                html! {
                    <div class="table-actions">
                        <button class="join-button table-join" onclick={copy}>{ "Copy Link" }</button>
                        { dropdown }
                    </div>
                }
            }
        };

        vec![
            ColumnDescriptor::new("title", "Title", |link: &ShortLink| {
                html! { <span class="group-name">{ &link.title }</span> }
            }),
            ColumnDescriptor::new("slug", "Short URL", |link: &ShortLink| {
                html! { <code class="slug-code">{ link.short_path() }</code> }
            }).with_width("160px"),
            ColumnDescriptor::new("url", "Destination URL", |link: &ShortLink| {
                html! {
                    <a
                        class="destination-url"
                        href={link.url.clone()}
                        title={link.url.clone()}
                        target="_blank"
                        rel="noopener noreferrer"
                    >
                        { truncate_url(&link.url) }
                    </a>
                }
            }),
            ColumnDescriptor::new("actions", "Actions", link_actions_cell).with_width("200px"),
        ]
    };

    html! {
        <div class="links-page">
            <h2>{ "URL Shortener" }</h2>
            <p class="description">{ "Create and manage shortened URLs for easy sharing" }</p>

            <FeedbackBanner feedback={(*feedback).clone()} on_dismiss={dismiss_feedback} />

            {if let Some(error) = handle.error() {
                html! { <LoadError error={error.clone()} on_retry={handle.refresh.clone()} /> }
            } else {
                Html::default()
            }}

            <div class="section-header">
                <div>
                    <h3>{ "Shortened Links" }</h3>
                    <p class="section-description">
                        { "Create short, memorable URLs that redirect to any destination" }
                    </p>
                </div>
                {if props.is_authenticated {
                    html! {
                        <button class="add-group-button" onclick={toggle_form}>
                            { if *show_form { "Cancel" } else { "+ Create Link" } }
                        </button>
                    }
                } else {
                    Html::default()
                }}
            </div>

            {if *show_form {
                html! {
                    <div class="add-group-form">
                        <h3>{ if editing_id.is_some() { "Edit Link" } else { "Create New Short Link" } }</h3>
                        {if let Some(message) = &*form_error {
                            html! { <div class="error-message">{ message }</div> }
                        } else {
                            Html::default()
                        }}
                        <form onsubmit={onsubmit}>
                            <div class="form-row">
                                <div class="form-group">
                                    <label for="link-title">{ "Title *" }</label>
                                    <input
                                        id="link-title"
                                        type="text"
                                        required={true}
                                        value={form.title.clone()}
                                        placeholder="e.g., Damage Assessment Form"
                                        onchange={field(|form, value| form.title = value)}
                                    />
                                </div>
                                <div class="form-group">
                                    <label for="link-slug">{ "Short URL Slug *" }</label>
                                    <input
                                        id="link-slug"
                                        type="text"
                                        required={true}
                                        value={form.slug.clone()}
                                        placeholder="e.g., damage-form"
                                        onchange={field(|form, value| form.slug = value)}
                                    />
                                    <small class="form-hint">
                                        { format!(
                                            "Will create: /link/{}",
                                            if form.slug.is_empty() { "your-slug" } else { &form.slug },
                                        ) }
                                    </small>
                                </div>
                            </div>
                            <div class="form-group">
                                <label for="link-url">{ "Destination URL *" }</label>
                                <input
                                    id="link-url"
                                    type="url"
                                    required={true}
                                    value={form.url.clone()}
                                    placeholder="https://example.com/long/url/here"
                                    onchange={field(|form, value| form.url = value)}
                                />
                            </div>
                            <div class="form-group">
                                <label for="link-description">{ "Description (Optional)" }</label>
                                <textarea
                                    id="link-description"
                                    rows="3"
                                    value={form.description.clone()}
                                    placeholder="Brief description of what this link is for"
                                    onchange={on_description_change}
                                />
                            </div>
                            <div class="form-actions">
                                <button type="submit" class="submit-button" disabled={*submitting}>
                                    { if *submitting {
                                        "Saving..."
                                    } else if editing_id.is_some() {
                                        "Update Link"
                                    } else {
                                        "Create Link"
                                    } }
                                </button>
                                <p class="form-note">{ "* Required fields" }</p>
                            </div>
                        </form>
                    </div>
                }
            } else {
                Html::default()
            }}

            <div class="controls">
                <div class="filters">
                    <input
                        type="text"
                        class="search-input"
                        placeholder="Search links..."
                        value={handle.view.filters.search().to_string()}
                        oninput={on_search_input}
                    />
                </div>
                <div class="view-toggle">
                    <button
                        class={if handle.view.view_mode == ViewMode::Cards { "view-button active" } else { "view-button" }}
                        onclick={to_cards}
                    >
                        { "Cards" }
                    </button>
                    <button
                        class={if handle.view.view_mode == ViewMode::Table { "view-button active" } else { "view-button" }}
                        onclick={to_table}
                    >
                        { "Table" }
                    </button>
                </div>
            </div>

            {if handle.is_loading() && handle.items.is_none() {
                html! { <div class="loading">{ "Loading links..." }</div> }
            } else if handle.view.view_mode == ViewMode::Table {
                html! {
                    <PaginatedTable<ShortLink>
                        rows={filtered.clone()}
                        columns={columns}
                        page={handle.view.page()}
                        items_per_page={handle.view.items_per_page()}
                        on_page_change={handle.set_page.clone()}
                        row_key={Callback::from(|link: ShortLink| link.id.to_string())}
                        empty_message="No links found"
                    />
                }
            } else {
                html! {
                    <div class="groups-grid">
                        {if filtered.is_empty() {
                            html! {
                                <div class="empty-state">
                                    <p>{ "No links found. Create your first shortened link to get started!" }</p>
                                </div>
                            }
                        } else {
                            html! {
                                {for filtered.iter().map(|link| {
                                    let copy = {
                                        let copy_link = copy_link.clone();
                                        let slug = link.slug.clone();
                                        Callback::from(move |_| copy_link.emit(slug.clone()))
                                    };
                                    html! {
                                        <div key={link.id.to_string()} class="group-card">
                                            <div class="group-header">
                                                <h3>{ &link.title }</h3>
                                                { link_actions(link) }
                                            </div>
                                            {if let Some(description) = &link.description {
                                                html! { <p class="group-description">{ description }</p> }
                                            } else {
                                                Html::default()
                                            }}
                                            <div class="link-details">
                                                <div class="link-info-row">
                                                    <strong>{ "Short URL:" }</strong>
                                                    <code class="slug-code">{ link.short_path() }</code>
                                                </div>
                                                <div class="link-info-row">
                                                    <strong>{ "Destination:" }</strong>
                                                    <a
                                                        class="destination-url"
                                                        href={link.url.clone()}
                                                        title={link.url.clone()}
                                                        target="_blank"
                                                        rel="noopener noreferrer"
                                                    >
                                                        { truncate_url(&link.url) }
                                                    </a>
                                                </div>
                                            </div>
                                            <div class="group-actions">
                                                <button class="join-button" onclick={copy}>{ "Copy Link" }</button>
                                                {if let Some(creator) = &link.created_by {
                                                    html! { <span class="created-by-text">{ format!("by {}", creator) }</span> }
                                                } else {
                                                    Html::default()
                                                }}
                                            </div>
                                        </div>
                                    }
                                })}
                            }
                        }}
                    </div>
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_destinations_are_truncated_for_display() {
        let long = "https://example.org/".to_string() + &"a".repeat(60);
        let shown = truncate_url(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), 53);

        assert_eq!(truncate_url("https://example.org"), "https://example.org");
    }

    #[test]
    fn test_form_round_trip_preserves_optional_description() {
        let form = LinkForm {
            title: " Damage form ".to_string(),
            slug: "damage-form".to_string(),
            url: "https://example.org/forms/damage".to_string(),
            description: "   ".to_string(),
        };
        let request = form.to_request();
        assert_eq!(request.title, "Damage form");
        assert_eq!(request.description, None);
    }
}
