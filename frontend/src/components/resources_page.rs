//! Curated resources: guidelines, tools, templates and reference links.

use std::collections::BTreeSet;
use std::rc::Rc;

use shared::{Resource, ResourceSubmission};
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
pub struct ResourcesPageProps {
    pub api: ApiClient,
}

#[derive(Clone, Default, PartialEq)]
struct ResourceForm {
    title: String,
    url: String,
    description: String,
    category: String,
    sector: String,
    submitted_by: String,
    email: String,
}

impl ResourceForm {
    fn to_submission(&self) -> ResourceSubmission {
        ResourceSubmission {
            title: self.title.trim().to_string(),
            url: self.url.trim().to_string(),
            description: optional(&self.description),
            category: optional(&self.category),
            sector: optional(&self.sector),
            submitted_by: optional(&self.submitted_by),
            email: optional(&self.email),
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

#[function_component(ResourcesPage)]
pub fn resources_page(props: &ResourcesPageProps) -> Html {
    let handle = use_collection_view(
        10,
        ViewMode::Cards,
        props.api.clone(),
        |api: ApiClient| async move { api.resources(ListScope::approved()).await },
    );

    let pipeline = use_memo((), |_| {
        Pipeline::<Resource>::new()
            .filter("category", |resource, value| {
                resource.category.as_deref() == Some(value)
            })
            .filter("sector", |resource, value| {
                resource.sector.as_deref() == Some(value)
            })
            .search_fields(|resource| {
                let mut fields = vec![resource.title.clone(), resource.url.clone()];
                for value in [&resource.description, &resource.category, &resource.sector] {
                    if let Some(value) = value {
                        fields.push(value.clone());
                    }
                }
                fields
            })
            .sort_by(|a, b| a.title.cmp(&b.title))
    });

    let show_form = use_state(|| false);
    let form = use_state(ResourceForm::default);
    let submitting = use_state(|| false);
    let feedback = use_state(|| Option::<Feedback>::None);

    let resources = handle.items.clone().unwrap_or_default();
    let filtered = Rc::new(pipeline.apply(&resources, &handle.view.filters));

    let categories: Vec<String> = resources
        .iter()
        .filter_map(|resource| resource.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let sectors: Vec<String> = resources
        .iter()
        .filter_map(|resource| resource.sector.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let on_category_change = {
        let set_filter = handle.set_filter.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            set_filter.emit(("category", select.value()));
        })
    };
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
                form.set(ResourceForm::default());
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

                match api.submit_resource(&form.to_submission()).await {
                    Ok(()) => {
                        form.set(ResourceForm::default());
                        show_form.set(false);
                        feedback.set(Some(Feedback::Success(
                            "Resource submitted. It will appear once a moderator approves it."
                                .to_string(),
                        )));
                        refresh.emit(());
                    }
                    Err(failure) => {
                        Logger::warn_with_component("resources-page", "resource submission rejected");
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

    let field = |update: fn(&mut ResourceForm, String)| {
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
        ColumnDescriptor::new("title", "Resource", |resource: &Resource| {
            html! {
                <a
                    class="group-name"
                    href={resource.url.clone()}
                    target="_blank"
                    rel="noopener noreferrer"
                >
                    { &resource.title }
                </a>
            }
        }),
        ColumnDescriptor::new("category", "Category", |resource: &Resource| {
            optional_text(resource.category.as_deref())
        }).with_width("130px"),
        ColumnDescriptor::new("sector", "Sector", |resource: &Resource| {
            optional_text(resource.sector.as_deref())
        }).with_width("130px"),
        ColumnDescriptor::new("description", "Description", |resource: &Resource| {
            optional_text(resource.description.as_deref())
        }),
        ColumnDescriptor::new("submitted_by", "Submitted by", |resource: &Resource| {
            optional_text(resource.submitted_by.as_deref())
        }).with_width("150px"),
    ];

    html! {
        <div class="resources-page">
            <h2>{ "Resources" }</h2>
            <p class="description">{ "Guidelines, tools, templates and reference material for the response" }</p>

            <FeedbackBanner feedback={(*feedback).clone()} on_dismiss={dismiss_feedback} />

            {if let Some(error) = handle.error() {
                html! { <LoadError error={error.clone()} on_retry={handle.refresh.clone()} /> }
            } else {
                Html::default()
            }}

            <div class="section-header">
                <h3>{ "Browse resources" }</h3>
                <button class="add-group-button" onclick={toggle_form}>
                    { if *show_form { "Cancel" } else { "+ Submit Resource" } }
                </button>
            </div>

            {if *show_form {
                html! {
                    <div class="add-group-form">
                        <h3>{ "Submit a resource" }</h3>
                        <form onsubmit={onsubmit}>
                            <div class="form-row">
                                <div class="form-group">
                                    <label for="resource-title">{ "Title *" }</label>
                                    <input
                                        id="resource-title"
                                        type="text"
                                        required={true}
                                        value={form.title.clone()}
                                        onchange={field(|form, value| form.title = value)}
                                    />
                                </div>
                                <div class="form-group">
                                    <label for="resource-url">{ "URL *" }</label>
                                    <input
                                        id="resource-url"
                                        type="url"
                                        required={true}
                                        value={form.url.clone()}
                                        onchange={field(|form, value| form.url = value)}
                                    />
                                </div>
                            </div>
                            <div class="form-row">
                                <div class="form-group">
                                    <label for="resource-category">{ "Category" }</label>
                                    <input
                                        id="resource-category"
                                        type="text"
                                        value={form.category.clone()}
                                        placeholder="e.g., guideline, tool, template"
                                        onchange={field(|form, value| form.category = value)}
                                    />
                                </div>
                                <div class="form-group">
                                    <label for="resource-sector">{ "Sector" }</label>
                                    <input
                                        id="resource-sector"
                                        type="text"
                                        value={form.sector.clone()}
                                        onchange={field(|form, value| form.sector = value)}
                                    />
                                </div>
                            </div>
                            <div class="form-group">
                                <label for="resource-description">{ "Description" }</label>
                                <textarea
                                    id="resource-description"
                                    rows="3"
                                    value={form.description.clone()}
                                    onchange={on_description_change}
                                />
                            </div>
                            <div class="form-row">
                                <div class="form-group">
                                    <label for="resource-submitted-by">{ "Your name" }</label>
                                    <input
                                        id="resource-submitted-by"
                                        type="text"
                                        value={form.submitted_by.clone()}
                                        onchange={field(|form, value| form.submitted_by = value)}
                                    />
                                </div>
                                <div class="form-group">
                                    <label for="resource-email">{ "Your email" }</label>
                                    <input
                                        id="resource-email"
                                        type="email"
                                        value={form.email.clone()}
                                        onchange={field(|form, value| form.email = value)}
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
                    <select onchange={on_category_change} aria-label="Filter by category">
                        <option value={ALL} selected={handle.view.filters.value("category") == ALL}>
                            { "All categories" }
                        </option>
                        {for categories.iter().map(|category| html! {
                            <option
                                key={category.clone()}
                                value={category.clone()}
                                selected={handle.view.filters.value("category") == category}
                            >
                                { category }
                            </option>
                        })}
                    </select>
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
                        placeholder="Search resources..."
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
                html! { <div class="loading">{ "Loading resources..." }</div> }
            } else if handle.view.view_mode == ViewMode::Table {
                html! {
                    <PaginatedTable<Resource>
                        rows={filtered.clone()}
                        columns={columns}
                        page={handle.view.page()}
                        items_per_page={handle.view.items_per_page()}
                        on_page_change={handle.set_page.clone()}
                        row_key={Callback::from(|resource: Resource| resource.id.to_string())}
                        empty_message="No resources found"
                    />
                }
            } else {
                html! {
                    <div class="groups-grid">
                        {if filtered.is_empty() {
                            html! {
                                <div class="empty-state">
                                    <p>{ "No resources match the current filters." }</p>
                                </div>
                            }
                        } else {
                            html! {
                                {for filtered.iter().map(|resource| html! {
                                    <div key={resource.id.to_string()} class="group-card">
                                        <div class="group-header">
                                            <h3>{ &resource.title }</h3>
                                            {if let Some(category) = &resource.category {
                                                html! { <span class="sector-badge">{ category }</span> }
                                            } else {
                                                Html::default()
                                            }}
                                        </div>
                                        {if let Some(description) = &resource.description {
                                            html! { <p class="group-description">{ description }</p> }
                                        } else {
                                            Html::default()
                                        }}
                                        <div class="group-actions">
                                            <a
                                                class="join-button"
                                                href={resource.url.clone()}
                                                target="_blank"
                                                rel="noopener noreferrer"
                                            >
                                                { "Open" }
                                            </a>
                                            {if let Some(submitter) = &resource.submitted_by {
                                                html! { <span class="created-by-text">{ format!("by {}", submitter) }</span> }
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
