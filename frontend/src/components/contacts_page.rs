//! Contact directory with sector/parish filters and a map-style view of
//! geolocated focal points.

use std::collections::BTreeSet;
use std::rc::Rc;

use shared::{Contact, ContactSubmissionRequest};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::collection::columns::{optional_text, ColumnDescriptor};
use crate::collection::pipeline::{Pipeline, ALL};
use crate::collection::view_state::ViewMode;
use crate::components::feedback::{Feedback, FeedbackBanner, LoadError};
use crate::components::paginated_table::PaginatedTable;
use crate::hooks::use_collection_view::use_collection_view;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct ContactsPageProps {
    pub api: ApiClient,
}

fn option_matches(field: Option<&str>, value: &str) -> bool {
    field == Some(value)
}

#[derive(Clone, Default, PartialEq)]
struct ContactForm {
    organization: String,
    focal_point_name: String,
    email: String,
    phone: String,
    sector: String,
    role: String,
    location: String,
    additional_info: String,
}

impl ContactForm {
    fn to_request(&self) -> ContactSubmissionRequest {
        ContactSubmissionRequest {
            organization: self.organization.trim().to_string(),
            focal_point_name: self.focal_point_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: optional(&self.phone),
            sector: optional(&self.sector),
            role: optional(&self.role),
            location: optional(&self.location),
            additional_info: optional(&self.additional_info),
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

#[function_component(ContactsPage)]
pub fn contacts_page(props: &ContactsPageProps) -> Html {
    let handle = use_collection_view(
        10,
        ViewMode::Table,
        props.api.clone(),
        |api: ApiClient| async move { api.contacts().await },
    );

    let pipeline = use_memo((), |_| {
        Pipeline::<Contact>::new()
            .filter("sector", |contact, value| {
                option_matches(contact.sector.as_deref(), value)
            })
            .filter("parish", |contact, value| {
                option_matches(contact.parish.as_deref(), value)
            })
            .search_fields(|contact| {
                let mut fields = vec![contact.name.clone(), contact.organization.clone()];
                for value in [
                    &contact.position,
                    &contact.sector,
                    &contact.parish,
                    &contact.community,
                    &contact.email,
                ] {
                    if let Some(value) = value {
                        fields.push(value.clone());
                    }
                }
                fields
            })
            .sort_by(|a, b| a.organization.cmp(&b.organization).then_with(|| a.name.cmp(&b.name)))
    });

    let show_form = use_state(|| false);
    let form = use_state(ContactForm::default);
    let submitting = use_state(|| false);
    let feedback = use_state(|| Option::<Feedback>::None);

    let contacts = handle.items.clone().unwrap_or_default();
    let filtered = Rc::new(pipeline.apply(&contacts, &handle.view.filters));

    let sectors: Vec<String> = contacts
        .iter()
        .filter_map(|contact| contact.sector.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let parishes: Vec<String> = contacts
        .iter()
        .filter_map(|contact| contact.parish.clone())
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
    let on_parish_change = {
        let set_filter = handle.set_filter.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            set_filter.emit(("parish", select.value()));
        })
    };
    let on_search_input = {
        let set_search = handle.set_search.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            set_search.emit(input.value());
        })
    };

    let toggle_form = {
        let show_form = show_form.clone();
        let form = form.clone();
        Callback::from(move |_| {
            if *show_form {
                form.set(ContactForm::default());
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

        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let api = api.clone();
            let form = form.clone();
            let show_form = show_form.clone();
            let submitting = submitting.clone();
            let feedback = feedback.clone();

            spawn_local(async move {
                submitting.set(true);
                feedback.set(None);

                match api.submit_contact(&form.to_request()).await {
                    Ok(()) => {
                        form.set(ContactForm::default());
                        show_form.set(false);
                        feedback.set(Some(Feedback::Success(
                            "Contact information submitted. It will appear in the directory once approved."
                                .to_string(),
                        )));
                    }
                    Err(failure) => {
                        Logger::warn_with_component("contacts-page", "contact submission rejected");
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

    let field = |update: fn(&mut ContactForm, String)| {
        let form = form.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let mut next = (*form).clone();
            update(&mut next, input.value());
            form.set(next);
        })
    };
    let on_info_change = {
        let form = form.clone();
        Callback::from(move |event: Event| {
            let area: HtmlTextAreaElement = event.target_unchecked_into();
            let mut next = (*form).clone();
            next.additional_info = area.value();
            form.set(next);
        })
    };

    let registration_form = if *show_form {
        html! {
            <div class="add-group-form">
                <h3>{ "Register contact information" }</h3>
                <form onsubmit={onsubmit}>
                    <div class="form-row">
                        <div class="form-group">
                            <label for="contact-organization">{ "Organization *" }</label>
                            <input
                                id="contact-organization"
                                type="text"
                                required={true}
                                value={form.organization.clone()}
                                onchange={field(|form, value| form.organization = value)}
                            />
                        </div>
                        <div class="form-group">
                            <label for="contact-focal-point">{ "Focal point name *" }</label>
                            <input
                                id="contact-focal-point"
                                type="text"
                                required={true}
                                value={form.focal_point_name.clone()}
                                onchange={field(|form, value| form.focal_point_name = value)}
                            />
                        </div>
                    </div>
                    <div class="form-row">
                        <div class="form-group">
                            <label for="contact-email">{ "Email *" }</label>
                            <input
                                id="contact-email"
                                type="email"
                                required={true}
                                value={form.email.clone()}
                                onchange={field(|form, value| form.email = value)}
                            />
                        </div>
                        <div class="form-group">
                            <label for="contact-phone">{ "Phone" }</label>
                            <input
                                id="contact-phone"
                                type="tel"
                                value={form.phone.clone()}
                                onchange={field(|form, value| form.phone = value)}
                            />
                        </div>
                    </div>
                    <div class="form-row">
                        <div class="form-group">
                            <label for="contact-sector">{ "Sector" }</label>
                            <input
                                id="contact-sector"
                                type="text"
                                value={form.sector.clone()}
                                placeholder="e.g., WASH"
                                onchange={field(|form, value| form.sector = value)}
                            />
                        </div>
                        <div class="form-group">
                            <label for="contact-role">{ "Role" }</label>
                            <input
                                id="contact-role"
                                type="text"
                                value={form.role.clone()}
                                onchange={field(|form, value| form.role = value)}
                            />
                        </div>
                        <div class="form-group">
                            <label for="contact-location">{ "Location" }</label>
                            <input
                                id="contact-location"
                                type="text"
                                value={form.location.clone()}
                                placeholder="Parish or community"
                                onchange={field(|form, value| form.location = value)}
                            />
                        </div>
                    </div>
                    <div class="form-group">
                        <label for="contact-info">{ "Additional information" }</label>
                        <textarea
                            id="contact-info"
                            rows="3"
                            value={form.additional_info.clone()}
                            onchange={on_info_change}
                        />
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
    };

    let mode_button = |mode: ViewMode, label: &'static str| {
        let set_view_mode = handle.set_view_mode.clone();
        let active = handle.view.view_mode == mode;
        let onclick = Callback::from(move |_| set_view_mode.emit(mode));
        html! {
            <button
                class={if active { "view-button active" } else { "view-button" }}
                onclick={onclick}
            >
                { label }
            </button>
        }
    };

    let columns = vec![
        ColumnDescriptor::new("name", "Name", |contact: &Contact| {
            html! { <span class="contact-name">{ &contact.name }</span> }
        }),
        ColumnDescriptor::new("organization", "Organization", |contact: &Contact| {
            html! { {&contact.organization} }
        }),
        ColumnDescriptor::new("sector", "Sector", |contact: &Contact| {
            optional_text(contact.sector.as_deref())
        }).with_width("120px"),
        ColumnDescriptor::new("parish", "Parish", |contact: &Contact| {
            optional_text(contact.parish.as_deref())
        }).with_width("130px"),
        ColumnDescriptor::new("community", "Community", |contact: &Contact| {
            optional_text(contact.community.as_deref())
        }),
        ColumnDescriptor::new("email", "Email", |contact: &Contact| match &contact.email {
            Some(email) => html! { <a href={format!("mailto:{}", email)}>{ email }</a> },
            None => optional_text(None),
        }),
        ColumnDescriptor::new("phone", "Phone", |contact: &Contact| {
            optional_text(contact.phone.as_deref())
        }).with_width("130px"),
    ];

    let body = if handle.is_loading() && handle.items.is_none() {
        html! { <div class="loading">{ "Loading contacts..." }</div> }
    } else {
        match handle.view.view_mode {
            ViewMode::Table => html! {
                <PaginatedTable<Contact>
                    rows={filtered.clone()}
                    columns={columns}
                    page={handle.view.page()}
                    items_per_page={handle.view.items_per_page()}
                    on_page_change={handle.set_page.clone()}
                    row_key={Callback::from(|contact: Contact| contact.id.to_string())}
                    empty_message="No contacts found"
                />
            },
            ViewMode::Cards => html! {
                <div class="groups-grid">
                    {if filtered.is_empty() {
                        html! { <div class="empty-state"><p>{ "No contacts match the current filters." }</p></div> }
                    } else {
                        html! {
                            {for filtered.iter().map(|contact| html! {
                                <div key={contact.id.to_string()} class="contact-card">
                                    <div class="group-header">
                                        <h3>{ &contact.name }</h3>
                                        {if let Some(sector) = &contact.sector {
                                            html! { <span class="sector-badge">{ sector }</span> }
                                        } else {
                                            Html::default()
                                        }}
                                    </div>
                                    <p class="contact-organization">{ &contact.organization }</p>
                                    {if let Some(position) = &contact.position {
                                        html! { <p class="contact-position">{ position }</p> }
                                    } else {
                                        Html::default()
                                    }}
                                    <div class="contact-details">
                                        { optional_text(contact.parish.as_deref()) }
                                        { " · " }
                                        { optional_text(contact.community.as_deref()) }
                                    </div>
                                    {if let Some(email) = &contact.email {
                                        html! { <a class="contact-email" href={format!("mailto:{}", email)}>{ email }</a> }
                                    } else {
                                        Html::default()
                                    }}
                                </div>
                            })}
                        }
                    }}
                </div>
            },
            ViewMode::Map => {
                // Tile rendering is an external embed; this view lists the
                // geolocated focal points grouped by parish.
                let located: Vec<&Contact> = filtered
                    .iter()
                    .filter(|contact| contact.coordinates().is_some())
                    .collect();
                let unlocated = filtered.len() - located.len();
                let parishes_on_map: Vec<String> = located
                    .iter()
                    .map(|contact| {
                        contact
                            .parish
                            .clone()
                            .unwrap_or_else(|| "Parish not recorded".to_string())
                    })
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect();

                html! {
                    <div class="contact-map">
                        {if unlocated > 0 {
                            html! {
                                <p class="map-note">
                                    { format!("{} contact(s) without location data are not shown in map view.", unlocated) }
                                </p>
                            }
                        } else {
                            Html::default()
                        }}
                        {for parishes_on_map.iter().map(|parish| {
                            let members: Vec<&&Contact> = located
                                .iter()
                                .filter(|contact| {
                                    contact.parish.as_deref().unwrap_or("Parish not recorded") == parish
                                })
                                .collect();
                            html! {
                                <div key={parish.clone()} class="map-parish-group">
                                    <h4>{ format!("{} ({})", parish, members.len()) }</h4>
                                    <ul class="map-parish-contacts">
                                        {for members.iter().map(|contact| {
                                            let coordinates = contact
                                                .coordinates()
                                                .map(|(lat, lon)| format!("{:.4}, {:.4}", lat, lon))
                                                .unwrap_or_default();
                                            html! {
                                                <li key={contact.id.to_string()}>
                                                    <span class="contact-name">{ &contact.name }</span>
                                                    { " · " }
                                                    <span>{ &contact.organization }</span>
                                                    <span class="map-coordinates">{ coordinates }</span>
                                                </li>
                                            }
                                        })}
                                    </ul>
                                </div>
                            }
                        })}
                    </div>
                }
            }
        }
    };

    html! {
        <div class="contacts-page">
            <h2>{ "Contact Directory" }</h2>
            <p class="description">{ "Humanitarian contact information and focal points" }</p>

            <FeedbackBanner feedback={(*feedback).clone()} on_dismiss={dismiss_feedback} />

            {if let Some(error) = handle.error() {
                html! { <LoadError error={error.clone()} on_retry={handle.refresh.clone()} /> }
            } else {
                Html::default()
            }}

            <div class="section-header">
                <h3>{ "Browse contacts" }</h3>
                <button class="add-group-button" onclick={toggle_form}>
                    { if *show_form { "Cancel" } else { "+ Register Contact" } }
                </button>
            </div>

            { registration_form }

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
                    <select onchange={on_parish_change} aria-label="Filter by parish">
                        <option value={ALL} selected={handle.view.filters.value("parish") == ALL}>
                            { "All parishes" }
                        </option>
                        {for parishes.iter().map(|parish| html! {
                            <option
                                key={parish.clone()}
                                value={parish.clone()}
                                selected={handle.view.filters.value("parish") == parish}
                            >
                                { parish }
                            </option>
                        })}
                    </select>
                    <input
                        type="text"
                        class="search-input"
                        placeholder="Search contacts..."
                        value={handle.view.filters.search().to_string()}
                        oninput={on_search_input}
                    />
                </div>
                <div class="view-toggle">
                    { mode_button(ViewMode::Cards, "Cards") }
                    { mode_button(ViewMode::Table, "Table") }
                    { mode_button(ViewMode::Map, "Map") }
                </div>
            </div>

            { body }
        </div>
    }
}
