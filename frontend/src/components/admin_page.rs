//! Moderation queues: pending groups, resources and contact submissions.
//!
//! Queues are fetched with widened server scoping (`approved_only=false`,
//! plus soft-deleted groups) and still run through the same client-side
//! pipeline as the public screens.

use std::future::Future;
use std::rc::Rc;

use shared::{ContactSubmission, Resource, WhatsAppGroup};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::collection::columns::{optional_text, ColumnDescriptor};
use crate::collection::pipeline::Pipeline;
use crate::collection::view_state::ViewMode;
use crate::components::actions_dropdown::{ActionsDropdown, MenuAction};
use crate::components::feedback::{Feedback, FeedbackBanner, LoadError};
use crate::components::paginated_table::PaginatedTable;
use crate::hooks::use_collection_view::{use_collection_view, CollectionViewHandle};
use crate::services::api::{ApiClient, ApiError, ListScope};
use crate::services::date_utils::format_display_date;

#[derive(Properties, PartialEq)]
pub struct AdminPageProps {
    pub api: ApiClient,
}

/// Which moderation queue is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Queue {
    Groups,
    Resources,
    Contacts,
}

impl Queue {
    fn label(&self) -> &'static str {
        match self {
            Queue::Groups => "WhatsApp Groups",
            Queue::Resources => "Resources",
            Queue::Contacts => "Contact Submissions",
        }
    }
}

fn run_action<F>(
    feedback: UseStateHandle<Option<Feedback>>,
    refresh: Callback<()>,
    success: &'static str,
    action: F,
) where
    F: Future<Output = Result<(), ApiError>> + 'static,
{
    spawn_local(async move {
        match action.await {
            Ok(()) => {
                feedback.set(Some(Feedback::Success(success.to_string())));
                refresh.emit(());
            }
            Err(failure) => {
                feedback.set(Some(Feedback::Error(failure.to_string())));
            }
        }
    });
}

fn status_badge(approved: bool, deleted: bool) -> Html {
    let (class, label) = if deleted {
        ("status-badge deleted", "Deleted")
    } else if approved {
        ("status-badge approved", "Approved")
    } else {
        ("status-badge pending", "Pending")
    };
    html! { <span class={class}>{ label }</span> }
}

fn queue_controls<T>(handle: &CollectionViewHandle<T>, placeholder: &'static str) -> Html {
    let on_search_input = {
        let set_search = handle.set_search.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            set_search.emit(input.value());
        })
    };
    html! {
        <div class="controls">
            <div class="filters">
                <input
                    type="text"
                    class="search-input"
                    placeholder={placeholder}
                    value={handle.view.filters.search().to_string()}
                    oninput={on_search_input}
                />
            </div>
        </div>
    }
}

#[function_component(AdminPage)]
pub fn admin_page(props: &AdminPageProps) -> Html {
    let active = use_state(|| Queue::Groups);
    let feedback = use_state(|| Option::<Feedback>::None);

    // Each queue refetches when the active tab (or the session) changes
    let groups = use_collection_view(
        10,
        ViewMode::Table,
        (props.api.clone(), *active),
        |(api, _): (ApiClient, Queue)| async move {
            api.whatsapp_groups(ListScope::moderation().with_deleted()).await
        },
    );
    let resources = use_collection_view(
        10,
        ViewMode::Table,
        (props.api.clone(), *active),
        |(api, _): (ApiClient, Queue)| async move { api.resources(ListScope::moderation()).await },
    );
    let contacts = use_collection_view(
        10,
        ViewMode::Table,
        (props.api.clone(), *active),
        |(api, _): (ApiClient, Queue)| async move {
            api.contact_submissions(ListScope::moderation()).await
        },
    );

    let group_pipeline = use_memo((), |_| {
        Pipeline::<WhatsAppGroup>::new().search_fields(|group| {
            vec![group.name.clone(), group.sector.clone(), group.description.clone()]
        })
    });
    let resource_pipeline = use_memo((), |_| {
        Pipeline::<Resource>::new().search_fields(|resource| {
            let mut fields = vec![resource.title.clone(), resource.url.clone()];
            if let Some(category) = &resource.category {
                fields.push(category.clone());
            }
            fields
        })
    });
    let contact_pipeline = use_memo((), |_| {
        Pipeline::<ContactSubmission>::new().search_fields(|submission| {
            vec![
                submission.organization.clone(),
                submission.focal_point_name.clone(),
                submission.email.clone(),
            ]
        })
    });

    let dismiss_feedback = {
        let feedback = feedback.clone();
        Callback::from(move |_| feedback.set(None))
    };

    let group_columns = {
        let api = props.api.clone();
        let feedback = feedback.clone();
        let refresh = groups.refresh.clone();
        let actions_cell = move |group: &WhatsAppGroup| -> Html {
            let mut actions = Vec::new();
            if !group.approved && !group.deleted {
                let api = api.clone();
                let feedback = feedback.clone();
                let refresh = refresh.clone();
                let id = group.id;
                actions.push(MenuAction::new(
                    "Approve",
                    Callback::from(move |_| {
                        let api = api.clone();
                        run_action(feedback.clone(), refresh.clone(), "Group approved", async move {
                            api.approve_group(id).await
                        });
                    }),
                ));
            }
            if group.deleted {
                {
                    let api = api.clone();
                    let feedback = feedback.clone();
                    let refresh = refresh.clone();
                    let id = group.id;
                    actions.push(MenuAction::new(
                        "Restore",
                        Callback::from(move |_| {
                            let api = api.clone();
                            run_action(feedback.clone(), refresh.clone(), "Group restored", async move {
                                api.restore_group(id).await
                            });
                        }),
                    ));
                }
                let api = api.clone();
                let feedback = feedback.clone();
                let refresh = refresh.clone();
                let id = group.id;
                actions.push(MenuAction::danger(
                    "Delete permanently",
                    Callback::from(move |_| {
                        let api = api.clone();
                        run_action(
                            feedback.clone(),
                            refresh.clone(),
                            "Group permanently deleted",
                            async move { api.purge_group(id).await },
                        );
                    }),
                ));
            } else {
                let api = api.clone();
                let feedback = feedback.clone();
                let refresh = refresh.clone();
                let id = group.id;
                actions.push(MenuAction::danger(
                    "Remove",
                    Callback::from(move |_| {
                        let api = api.clone();
                        run_action(feedback.clone(), refresh.clone(), "Group removed", async move {
                            api.delete_group(id).await
                        });
                    }),
                ));
            }
            html! { <ActionsDropdown actions={actions} /> }
        };

        vec![
            ColumnDescriptor::new("name", "Group", |group: &WhatsAppGroup| {
                html! { <span class="group-name">{ &group.name }</span> }
            }),
            ColumnDescriptor::new("sector", "Sector", |group: &WhatsAppGroup| {
                html! { {&group.sector} }
            }).with_width("120px"),
            ColumnDescriptor::new("status", "Status", |group: &WhatsAppGroup| {
                status_badge(group.approved, group.deleted)
            }).with_width("110px"),
            ColumnDescriptor::new("submitted_by", "Submitted by", |group: &WhatsAppGroup| {
                optional_text(group.contact_name.as_deref())
            }).with_width("150px"),
            ColumnDescriptor::new("created", "Created", |group: &WhatsAppGroup| {
                match &group.created_at {
                    Some(created) => html! { {format_display_date(created)} },
                    None => optional_text(None),
                }
            }).with_width("140px"),
            ColumnDescriptor::new("actions", "Actions", actions_cell).with_width("90px"),
        ]
    };

    let resource_columns = {
        let api = props.api.clone();
        let feedback = feedback.clone();
        let refresh = resources.refresh.clone();
        let actions_cell = move |resource: &Resource| -> Html {
            let mut actions = Vec::new();
            if !resource.approved {
                let api = api.clone();
                let feedback = feedback.clone();
                let refresh = refresh.clone();
                let id = resource.id;
                actions.push(MenuAction::new(
                    "Approve",
                    Callback::from(move |_| {
                        let api = api.clone();
                        run_action(feedback.clone(), refresh.clone(), "Resource approved", async move {
                            api.approve_resource(id).await
                        });
                    }),
                ));
            }
            let api = api.clone();
            let feedback = feedback.clone();
            let refresh = refresh.clone();
            let id = resource.id;
            actions.push(MenuAction::danger(
                "Delete",
                Callback::from(move |_| {
                    let api = api.clone();
                    run_action(feedback.clone(), refresh.clone(), "Resource deleted", async move {
                        api.delete_resource(id).await
                    });
                }),
            ));
            html! { <ActionsDropdown actions={actions} /> }
        };

        vec![
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
            }).with_width("120px"),
            ColumnDescriptor::new("status", "Status", |resource: &Resource| {
                status_badge(resource.approved, false)
            }).with_width("110px"),
            ColumnDescriptor::new("submitted_by", "Submitted by", |resource: &Resource| {
                optional_text(resource.submitted_by.as_deref())
            }).with_width("150px"),
            ColumnDescriptor::new("actions", "Actions", actions_cell).with_width("90px"),
        ]
    };

    let contact_columns = {
        let api = props.api.clone();
        let feedback = feedback.clone();
        let refresh = contacts.refresh.clone();
        let actions_cell = move |submission: &ContactSubmission| -> Html {
            let mut actions = Vec::new();
            if !submission.approved {
                let api = api.clone();
                let feedback = feedback.clone();
                let refresh = refresh.clone();
                let id = submission.id;
                actions.push(MenuAction::new(
                    "Approve",
                    Callback::from(move |_| {
                        let api = api.clone();
                        run_action(
                            feedback.clone(),
                            refresh.clone(),
                            "Contact submission approved",
                            async move { api.approve_contact_submission(id).await },
                        );
                    }),
                ));
            }
            let api = api.clone();
            let feedback = feedback.clone();
            let refresh = refresh.clone();
            let id = submission.id;
            actions.push(MenuAction::danger(
                "Delete",
                Callback::from(move |_| {
                    let api = api.clone();
                    run_action(
                        feedback.clone(),
                        refresh.clone(),
                        "Contact submission deleted",
                        async move { api.delete_contact_submission(id).await },
                    );
                }),
            ));
            html! { <ActionsDropdown actions={actions} /> }
        };

        vec![
            ColumnDescriptor::new("organization", "Organization", |submission: &ContactSubmission| {
                html! { <span class="group-name">{ &submission.organization }</span> }
            }),
            ColumnDescriptor::new("focal_point", "Focal point", |submission: &ContactSubmission| {
                html! { {&submission.focal_point_name} }
            }),
            ColumnDescriptor::new("email", "Email", |submission: &ContactSubmission| {
                html! { {&submission.email} }
            }),
            ColumnDescriptor::new("sector", "Sector", |submission: &ContactSubmission| {
                optional_text(submission.sector.as_deref())
            }).with_width("120px"),
            ColumnDescriptor::new("status", "Status", |submission: &ContactSubmission| {
                status_badge(submission.approved, false)
            }).with_width("110px"),
            ColumnDescriptor::new("actions", "Actions", actions_cell).with_width("90px"),
        ]
    };

    let queue_tabs = html! {
        <div class="admin-tabs">
            {for [Queue::Groups, Queue::Resources, Queue::Contacts].into_iter().map(|queue| {
                let on_click = {
                    let active = active.clone();
                    Callback::from(move |_| active.set(queue))
                };
                let class = if queue == *active { "admin-tab active" } else { "admin-tab" };
                html! {
                    <button key={queue.label()} class={class} onclick={on_click}>
                        { queue.label() }
                    </button>
                }
            })}
        </div>
    };

    let body = match *active {
        Queue::Groups => {
            let items = groups.items.clone().unwrap_or_default();
            let filtered = Rc::new(group_pipeline.apply(&items, &groups.view.filters));
            html! {
                <>
                    { queue_controls(&groups, "Search pending groups...") }
                    {if let Some(error) = groups.error() {
                        html! { <LoadError error={error.clone()} on_retry={groups.refresh.clone()} /> }
                    } else {
                        Html::default()
                    }}
                    {if groups.is_loading() && groups.items.is_none() {
                        html! { <div class="loading">{ "Loading groups..." }</div> }
                    } else {
                        html! {
                            <PaginatedTable<WhatsAppGroup>
                                rows={filtered}
                                columns={group_columns}
                                page={groups.view.page()}
                                items_per_page={groups.view.items_per_page()}
                                on_page_change={groups.set_page.clone()}
                                row_key={Callback::from(|group: WhatsAppGroup| group.id.to_string())}
                                empty_message="No groups awaiting moderation"
                            />
                        }
                    }}
                </>
            }
        }
        Queue::Resources => {
            let items = resources.items.clone().unwrap_or_default();
            let filtered = Rc::new(resource_pipeline.apply(&items, &resources.view.filters));
            html! {
                <>
                    { queue_controls(&resources, "Search pending resources...") }
                    {if let Some(error) = resources.error() {
                        html! { <LoadError error={error.clone()} on_retry={resources.refresh.clone()} /> }
                    } else {
                        Html::default()
                    }}
                    {if resources.is_loading() && resources.items.is_none() {
                        html! { <div class="loading">{ "Loading resources..." }</div> }
                    } else {
                        html! {
                            <PaginatedTable<Resource>
                                rows={filtered}
                                columns={resource_columns}
                                page={resources.view.page()}
                                items_per_page={resources.view.items_per_page()}
                                on_page_change={resources.set_page.clone()}
                                row_key={Callback::from(|resource: Resource| resource.id.to_string())}
                                empty_message="No resources awaiting moderation"
                            />
                        }
                    }}
                </>
            }
        }
        Queue::Contacts => {
            let items = contacts.items.clone().unwrap_or_default();
            let filtered = Rc::new(contact_pipeline.apply(&items, &contacts.view.filters));
            html! {
                <>
                    { queue_controls(&contacts, "Search contact submissions...") }
                    {if let Some(error) = contacts.error() {
                        html! { <LoadError error={error.clone()} on_retry={contacts.refresh.clone()} /> }
                    } else {
                        Html::default()
                    }}
                    {if contacts.is_loading() && contacts.items.is_none() {
                        html! { <div class="loading">{ "Loading contact submissions..." }</div> }
                    } else {
                        html! {
                            <PaginatedTable<ContactSubmission>
                                rows={filtered}
                                columns={contact_columns}
                                page={contacts.view.page()}
                                items_per_page={contacts.view.items_per_page()}
                                on_page_change={contacts.set_page.clone()}
                                row_key={Callback::from(|submission: ContactSubmission| submission.id.to_string())}
                                empty_message="No contact submissions awaiting moderation"
                            />
                        }
                    }}
                </>
            }
        }
    };

    html! {
        <div class="admin-page">
            <h2>{ "Moderation" }</h2>
            <p class="description">{ "Review, approve and remove submitted content" }</p>

            <FeedbackBanner feedback={(*feedback).clone()} on_dismiss={dismiss_feedback} />

            { queue_tabs }
            { body }
        </div>
    }
}
