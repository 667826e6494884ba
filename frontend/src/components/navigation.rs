//! Tab bar and the set of screens it switches between.

use yew::prelude::*;

/// Top-level screens of the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Groups,
    Contacts,
    Links,
    Resources,
    Maps,
    Admin,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Groups => "Groups",
            Tab::Contacts => "Contacts",
            Tab::Links => "Links",
            Tab::Resources => "Resources",
            Tab::Maps => "Maps",
            Tab::Admin => "Admin",
        }
    }

    /// Tabs visible for the current auth state; moderation is admin-only
    pub fn visible(is_authenticated: bool) -> Vec<Tab> {
        let mut tabs = vec![
            Tab::Home,
            Tab::Groups,
            Tab::Contacts,
            Tab::Links,
            Tab::Resources,
            Tab::Maps,
        ];
        if is_authenticated {
            tabs.push(Tab::Admin);
        }
        tabs
    }
}

#[derive(Properties, PartialEq)]
pub struct NavigationProps {
    pub active: Tab,
    pub is_authenticated: bool,
    pub on_select: Callback<Tab>,
}

#[function_component(Navigation)]
pub fn navigation(props: &NavigationProps) -> Html {
    html! {
        <nav class="main-navigation">
            {for Tab::visible(props.is_authenticated).into_iter().map(|tab| {
                let on_click = {
                    let on_select = props.on_select.clone();
                    Callback::from(move |_| on_select.emit(tab))
                };
                let class = if tab == props.active {
                    "nav-tab active"
                } else {
                    "nav-tab"
                };
                html! {
                    <button key={tab.label()} class={class} onclick={on_click}>
                        { tab.label() }
                    </button>
                }
            })}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_tab_requires_authentication() {
        assert!(!Tab::visible(false).contains(&Tab::Admin));
        assert!(Tab::visible(true).contains(&Tab::Admin));
    }
}
