//! Generic paginated table used by every list screen.
//!
//! Purely presentational: the owning screen filters the collection and
//! owns the page number; the table cuts the visible slice, renders it
//! through the column descriptors and reports page-change clicks back up.

use std::rc::Rc;

use yew::prelude::*;

use crate::collection::columns::ColumnDescriptor;
use crate::collection::pager::slice_page;

#[derive(Properties, PartialEq)]
pub struct PaginatedTableProps<T: PartialEq> {
    /// Already-filtered rows; the table never filters
    pub rows: Rc<Vec<T>>,
    pub columns: Vec<ColumnDescriptor<T>>,
    /// Requested page; out-of-range values are clamped before rendering
    pub page: usize,
    #[prop_or(10)]
    pub items_per_page: usize,
    pub on_page_change: Callback<usize>,
    /// Stable row key, e.g. the record id
    pub row_key: Callback<T, String>,
    #[prop_or(AttrValue::Static("No items found"))]
    pub empty_message: AttrValue,
}

#[function_component]
pub fn PaginatedTable<T>(props: &PaginatedTableProps<T>) -> Html
where
    T: PartialEq + Clone + 'static,
{
    let page = slice_page(&props.rows, props.page, props.items_per_page);

    let previous = {
        let on_page_change = props.on_page_change.clone();
        let target = page.page.saturating_sub(1).max(1);
        Callback::from(move |_| on_page_change.emit(target))
    };
    let next = {
        let on_page_change = props.on_page_change.clone();
        let target = (page.page + 1).min(page.total_pages);
        Callback::from(move |_| on_page_change.emit(target))
    };

    html! {
        <div class="paginated-table-container">
            <div class="table-wrapper">
                <table class="paginated-table">
                    <thead>
                        <tr>
                            {for props.columns.iter().map(|column| {
                                let style = column.width.map(|width| format!("width: {}", width));
                                html! { <th key={column.key} style={style}>{ column.header }</th> }
                            })}
                        </tr>
                    </thead>
                    <tbody>
                        {if page.items.is_empty() {
                            html! {
                                <tr>
                                    <td colspan={props.columns.len().to_string()} class="no-results-table">
                                        { props.empty_message.to_string() }
                                    </td>
                                </tr>
                            }
                        } else {
                            html! {
                                {for page.items.iter().map(|item| {
                                    let key = props.row_key.emit(item.clone());
                                    html! {
                                        <tr key={key}>
                                            {for props.columns.iter().map(|column| html! {
                                                <td key={column.key}>{ column.render(item) }</td>
                                            })}
                                        </tr>
                                    }
                                })}
                            }
                        }}
                    </tbody>
                </table>
            </div>

            {if page.total_pages > 1 {
                html! {
                    <div class="pagination">
                        <button
                            class="pagination-button"
                            onclick={previous}
                            disabled={!page.has_previous()}
                        >
                            { "← Previous" }
                        </button>
                        <div class="pagination-info">
                            { format!("Page {} of {}", page.page, page.total_pages) }
                        </div>
                        <button
                            class="pagination-button"
                            onclick={next}
                            disabled={!page.has_next()}
                        >
                            { "Next →" }
                        </button>
                    </div>
                }
            } else {
                Html::default()
            }}

            <div class="results-count">
                { format!(
                    "Showing {}-{} of {} items",
                    page.first_index(),
                    page.last_index(),
                    page.total_items,
                ) }
            </div>
        </div>
    }
}
