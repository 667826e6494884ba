//! Kebab-style per-row actions menu.
//!
//! Open/closed state lives in the app-wide overlay registry, so opening
//! any other menu (or modal) closes this one without a document-level
//! click listener per instance.

use yew::prelude::*;

use crate::hooks::use_overlay::{use_overlay_id, OverlayAction, OverlayRegistry};

/// One entry in the menu.
#[derive(Clone, PartialEq)]
pub struct MenuAction {
    pub label: AttrValue,
    /// Renders in the destructive style
    pub danger: bool,
    pub on_select: Callback<()>,
}

impl MenuAction {
    pub fn new(label: impl Into<AttrValue>, on_select: Callback<()>) -> Self {
        Self {
            label: label.into(),
            danger: false,
            on_select,
        }
    }

    pub fn danger(label: impl Into<AttrValue>, on_select: Callback<()>) -> Self {
        Self {
            label: label.into(),
            danger: true,
            on_select,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ActionsDropdownProps {
    pub actions: Vec<MenuAction>,
    #[prop_or(AttrValue::Static("Actions"))]
    pub button_label: AttrValue,
}

#[function_component(ActionsDropdown)]
pub fn actions_dropdown(props: &ActionsDropdownProps) -> Html {
    let id = use_overlay_id();
    let overlays = use_context::<OverlayRegistry>().expect("overlay registry context missing");
    let open = overlays.is_open(id);

    let toggle = {
        let overlays = overlays.clone();
        Callback::from(move |_| overlays.dispatch(OverlayAction::Toggle(id)))
    };

    html! {
        <div class="actions-dropdown">
            <button
                class="actions-button"
                onclick={toggle}
                aria-label={props.button_label.clone()}
                aria-expanded={open.to_string()}
            >
                { "⋮" }
            </button>
            {if open {
                html! {
                    <div class="dropdown-menu">
                        {for props.actions.iter().map(|action| {
                            let on_click = {
                                let overlays = overlays.clone();
                                let on_select = action.on_select.clone();
                                Callback::from(move |_| {
                                    on_select.emit(());
                                    overlays.dispatch(OverlayAction::Close(id));
                                })
                            };
                            let class = if action.danger {
                                "dropdown-item delete"
                            } else {
                                "dropdown-item"
                            };
                            html! {
                                <button key={action.label.as_str().to_string()} class={class} onclick={on_click}>
                                    { action.label.to_string() }
                                </button>
                            }
                        })}
                    </div>
                }
            } else {
                Html::default()
            }}
        </div>
    }
}
