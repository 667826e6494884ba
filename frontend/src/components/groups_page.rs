//! WhatsApp coordination groups: browse, search, and register new groups.

use std::collections::BTreeSet;
use std::rc::Rc;

use shared::{GroupSubmission, WhatsAppGroup};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::collection::columns::{optional_text, ColumnDescriptor};
use crate::collection::pipeline::{Pipeline, ALL};
use crate::collection::view_state::ViewMode;
use crate::components::feedback::{Feedback, FeedbackBanner, LoadError};
use crate::components::paginated_table::PaginatedTable;
use crate::hooks::use_collection_view::use_collection_view;
use crate::services::api::{ApiClient, ListScope};
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct GroupsPageProps {
    pub api: ApiClient,
}

#[derive(Clone, Default, PartialEq)]
struct GroupForm {
    name: String,
    sector: String,
    description: String,
    link: String,
    contact_name: String,
    contact_email: String,
}

impl GroupForm {
    fn to_submission(&self) -> GroupSubmission {
        GroupSubmission {
            name: self.name.trim().to_string(),
            sector: self.sector.trim().to_string(),
            description: self.description.trim().to_string(),
            link: self.link.trim().to_string(),
            contact_name: optional(&self.contact_name),
            contact_email: optional(&self.contact_email),
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[function_component(GroupsPage)]
pub fn groups_page(props: &GroupsPageProps) -> Html {
    let handle = use_collection_view(
        10,
        ViewMode::Cards,
        props.api.clone(),
        |api: ApiClient| async move { api.whatsapp_groups(ListScope::approved()).await },
    );

    let pipeline = use_memo((), |_| {
        Pipeline::<WhatsAppGroup>::new()
            .filter("sector", |group, value| group.sector == value)
            .search_fields(|group| {
                let mut fields = vec![
                    group.name.clone(),
                    group.description.clone(),
                    group.sector.clone(),
                ];
                if let Some(contact) = &group.contact_name {
                    fields.push(contact.clone());
                }
                fields
            })
            .sort_by(|a, b| a.sector.cmp(&b.sector).then_with(|| a.name.cmp(&b.name)))
    });

    let show_form = use_state(|| false);
    let form = use_state(GroupForm::default);
    let submitting = use_state(|| false);
    let feedback = use_state(|| Option::<Feedback>::None);

    let groups = handle.items.clone().unwrap_or_default();
    let filtered = Rc::new(pipeline.apply(&groups, &handle.view.filters));
    let sectors: Vec<String> = groups
        .iter()
        .map(|group| group.sector.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let on_sector_change = {
        let set_filter = handle.set_filter.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            set_filter.emit(("sector", select.value()));
        })
    };
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

    let toggle_form = {
        let show_form = show_form.clone();
        let form = form.clone();
        Callback::from(move |_| {
            if *show_form {
                form.set(GroupForm::default());
            }
            show_form.set(!*show_form);
        })
    };

    let onsubmit = {
        let api = props.api.clone();
        let form = form.clone();
        let show_form = show_form.clone();
        let submitting = submitting.clone();
        let feedback = feedback.clone();
        let refresh = handle.refresh.clone();

        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let api = api.clone();
            let form = form.clone();
            let show_form = show_form.clone();
            let submitting = submitting.clone();
            let feedback = feedback.clone();
            let refresh = refresh.clone();

            spawn_local(async move {
                submitting.set(true);
                feedback.set(None);

                match api.submit_group(&form.to_submission()).await {
                    Ok(()) => {
                        form.set(GroupForm::default());
                        show_form.set(false);
                        feedback.set(Some(Feedback::Success(
                            "Group submitted. It will appear once a moderator approves it."
                                .to_string(),
                        )));
                        refresh.emit(());
                    }
                    Err(failure) => {
                        Logger::warn_with_component("groups-page", "group submission rejected");
                        feedback.set(Some(Feedback::Error(failure.to_string())));
                    }
                }

                submitting.set(false);
            });
        })
    };

    let dismiss_feedback = {
        let feedback = feedback.clone();
        Callback::from(move |_| feedback.set(None))
    };

    let field = |update: fn(&mut GroupForm, String)| {
        let form = form.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let mut next = (*form).clone();
            update(&mut next, input.value());
            form.set(next);
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

    let columns = vec![
        ColumnDescriptor::new("name", "Group", |group: &WhatsAppGroup| {
            html! { <span class="group-name">{ &group.name }</span> }
        }),
        ColumnDescriptor::new("sector", "Sector", |group: &WhatsAppGroup| {
            html! { <span class="sector-badge">{ &group.sector }</span> }
        }).with_width("140px"),
        ColumnDescriptor::new("description", "Description", |group: &WhatsAppGroup| {
            html! { {&group.description} }
        }),
        ColumnDescriptor::new("contact", "Registered by", |group: &WhatsAppGroup| {
            optional_text(group.contact_name.as_deref())
        }).with_width("160px"),
        ColumnDescriptor::new("actions", "Actions", |group: &WhatsAppGroup| {
            html! {
                <a
                    class="join-button table-join"
                    href={group.link.clone()}
                    target="_blank"
                    rel="noopener noreferrer"
                >
                    { "Join" }
                </a>
            }
        }).with_width("100px"),
    ];

    html! {
        <div class="groups-page">
            <h2>{ "WhatsApp Coordination Groups" }</h2>
            <p class="description">{ "Sector coordination groups for field updates and data collection" }</p>

            <FeedbackBanner feedback={(*feedback).clone()} on_dismiss={dismiss_feedback} />

            {if let Some(error) = handle.error() {
                html! { <LoadError error={error.clone()} on_retry={handle.refresh.clone()} /> }
            } else {
                Html::default()
            }}

            <div class="section-header">
                <h3>{ "Browse groups" }</h3>
                <button class="add-group-button" onclick={toggle_form}>
                    { if *show_form { "Cancel" } else { "+ Register Group" } }
                </button>
            </div>

            {if *show_form {
                html! {
                    <div class="add-group-form">
                        <h3>{ "Register a coordination group" }</h3>
                        <form onsubmit={onsubmit}>
                            <div class="form-row">
                                <div class="form-group">
                                    <label for="group-name">{ "Group name *" }</label>
                                    <input
                                        id="group-name"
                                        type="text"
                                        required={true}
                                        value={form.name.clone()}
                                        onchange={field(|form, value| form.name = value)}
                                    />
                                </div>
                                <div class="form-group">
                                    <label for="group-sector">{ "Sector *" }</label>
                                    <input
                                        id="group-sector"
                                        type="text"
                                        required={true}
                                        value={form.sector.clone()}
                                        placeholder="e.g., WASH"
                                        onchange={field(|form, value| form.sector = value)}
                                    />
                                </div>
                            </div>
                            <div class="form-group">
                                <label for="group-description">{ "Description *" }</label>
                                <textarea
                                    id="group-description"
                                    required={true}
                                    rows="3"
                                    value={form.description.clone()}
                                    onchange={on_description_change}
                                />
                            </div>
                            <div class="form-group">
                                <label for="group-link">{ "Invite link *" }</label>
                                <input
                                    id="group-link"
                                    type="url"
                                    required={true}
                                    value={form.link.clone()}
                                    placeholder="https://chat.whatsapp.com/..."
                                    onchange={field(|form, value| form.link = value)}
                                />
                            </div>
                            <div class="form-row">
                                <div class="form-group">
                                    <label for="group-contact-name">{ "Your name" }</label>
                                    <input
                                        id="group-contact-name"
                                        type="text"
                                        value={form.contact_name.clone()}
                                        onchange={field(|form, value| form.contact_name = value)}
                                    />
                                </div>
                                <div class="form-group">
                                    <label for="group-contact-email">{ "Your email" }</label>
                                    <input
                                        id="group-contact-email"
                                        type="email"
                                        value={form.contact_email.clone()}
                                        onchange={field(|form, value| form.contact_email = value)}
                                    />
                                </div>
                            </div>
                            <div class="form-actions">
                                <button type="submit" class="submit-button" disabled={*submitting}>
                                    { if *submitting { "Submitting..." } else { "Submit for review" } }
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
                    <select onchange={on_sector_change} aria-label="Filter by sector">
                        <option value={ALL} selected={handle.view.filters.value("sector") == ALL}>
                            { "All sectors" }
                        </option>
                        {for sectors.iter().map(|sector| html! {
                            <option
                                key={sector.clone()}
                                value={sector.clone()}
                                selected={handle.view.filters.value("sector") == sector}
                            >
                                { sector }
                            </option>
                        })}
                    </select>
                    <input
                        type="text"
                        class="search-input"
                        placeholder="Search groups..."
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
                html! { <div class="loading">{ "Loading groups..." }</div> }
            } else if handle.view.view_mode == ViewMode::Table {
                html! {
                    <PaginatedTable<WhatsAppGroup>
                        rows={filtered.clone()}
                        columns={columns}
                        page={handle.view.page()}
                        items_per_page={handle.view.items_per_page()}
                        on_page_change={handle.set_page.clone()}
                        row_key={Callback::from(|group: WhatsAppGroup| group.id.to_string())}
                        empty_message="No groups found"
                    />
                }
            } else {
                html! {
                    <div class="groups-grid">
                        {if filtered.is_empty() {
                            html! {
                                <div class="empty-state">
                                    <p>{ "No groups match the current filters." }</p>
                                </div>
                            }
                        } else {
                            html! {
                                {for filtered.iter().map(|group| html! {
                                    <div key={group.id.to_string()} class="group-card">
                                        <div class="group-header">
                                            <h3>{ &group.name }</h3>
                                            <span class="sector-badge">{ &group.sector }</span>
                                        </div>
                                        <p class="group-description">{ &group.description }</p>
                                        <div class="group-actions">
                                            <a
                                                class="join-button"
                                                href={group.link.clone()}
                                                target="_blank"
                                                rel="noopener noreferrer"
                                            >
                                                { "Join group" }
                                            </a>
                                            {if let Some(contact) = &group.contact_name {
                                                html! { <span class="created-by-text">{ format!("by {}", contact) }</span> }
                                            } else {
                                                Html::default()
                                            }}
                                        </div>
                                    </div>
                                })}
                            }
                        }}
                    </div>
                }
            }}
        </div>
    }
}
