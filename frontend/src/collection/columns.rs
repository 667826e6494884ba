//! Column descriptors decoupling record shape from table presentation.
//!
//! A view hands the generic table a list of descriptors; the table renders
//! cell `(i, j)` as `columns[j].render(rows[i])` and knows nothing about
//! the record type itself.

use std::rc::Rc;

use yew::prelude::*;

/// Placeholder rendered for absent optional fields, so "no value" is never
/// confused with an empty string.
pub const MISSING_PLACEHOLDER: &str = "N/A";

/// Maps one logical column to its header and cell projection.
///
/// `key` must be unique among the columns handed to a single table; that is
/// a caller contract, not a runtime check. `render` must be a pure
/// projection of the record; interactive cells attach their callbacks to
/// the Html they return.
pub struct ColumnDescriptor<T> {
    pub key: &'static str,
    pub header: &'static str,
    /// CSS width hint, e.g. `"200px"`
    pub width: Option<&'static str>,
    render: Rc<dyn Fn(&T) -> Html>,
}

impl<T> ColumnDescriptor<T> {
    pub fn new(key: &'static str, header: &'static str, render: impl Fn(&T) -> Html + 'static) -> Self {
        Self {
            key,
            header,
            width: None,
            render: Rc::new(render),
        }
    }

    pub fn with_width(mut self, width: &'static str) -> Self {
        self.width = Some(width);
        self
    }

    pub fn render(&self, item: &T) -> Html {
        (self.render)(item)
    }
}

impl<T> Clone for ColumnDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            header: self.header,
            width: self.width,
            render: Rc::clone(&self.render),
        }
    }
}

impl<T> std::fmt::Debug for ColumnDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

impl<T> PartialEq for ColumnDescriptor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.header == other.header
            && self.width == other.width
            && Rc::ptr_eq(&self.render, &other.render)
    }
}

/// Renders an optional field, falling back to [`MISSING_PLACEHOLDER`] when
/// the value is absent.
pub fn optional_text(value: Option<&str>) -> Html {
    match value {
        Some(text) => html! { {text} },
        None => html! { <span class="missing-value">{ MISSING_PLACEHOLDER }</span> },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Row {
        name: String,
        phone: Option<String>,
    }

    #[test]
    fn test_cell_is_the_column_projection_of_the_row() {
        let column =
            ColumnDescriptor::new("name", "Name", |row: &Row| html! { {row.name.clone()} });
        let row = Row {
            name: "Water trucking".to_string(),
            phone: None,
        };
        assert_eq!(column.render(&row), html! { {"Water trucking"} });
        assert_eq!(column.key, "name");
        assert_eq!(column.header, "Name");
    }

    #[test]
    fn test_width_hint_is_optional() {
        let plain = ColumnDescriptor::new("a", "A", |_: &Row| Html::default());
        assert_eq!(plain.width, None);
        let sized = ColumnDescriptor::new("a", "A", |_: &Row| Html::default()).with_width("200px");
        assert_eq!(sized.width, Some("200px"));
    }

    #[test]
    fn test_absent_fields_render_the_placeholder() {
        let row = Row {
            name: "Clinic support".to_string(),
            phone: None,
        };
        let rendered = optional_text(row.phone.as_deref());
        let expected = html! { <span class="missing-value">{ MISSING_PLACEHOLDER }</span> };
        assert_eq!(rendered, expected);

        let with_value = optional_text(Some("876-555-0000"));
        assert_eq!(with_value, html! { {"876-555-0000"} });
    }

    #[test]
    fn test_descriptor_equality_is_by_identity_of_the_renderer() {
        let a = ColumnDescriptor::new("name", "Name", |row: &Row| html! { {row.name.clone()} });
        let b = a.clone();
        assert_eq!(a, b);

        let c = ColumnDescriptor::new("name", "Name", |row: &Row| html! { {row.name.clone()} });
        assert_ne!(a, c);
    }
}
