//! Generic table chrome: payload states, sortable headers, pagination footer.

#[cfg(test)]
#[path = "data_table_test.rs"]
mod data_table_test;

use leptos::prelude::*;

use traces::columns::ColumnDef;
use traces::order::{OrderBy, SortDirection};
use traces::page::{PAGE_SIZES, Pagination};

/// Tagged fetch state handed to the table renderer — the render branches on
/// this explicitly instead of throwing.
#[derive(Clone, Debug, PartialEq)]
pub enum TablePayload<T> {
    Loading,
    Error(String),
    Ready(T),
}

impl<T> Default for TablePayload<T> {
    fn default() -> Self {
        Self::Loading
    }
}

/// Sort indicator for a header cell.
#[must_use]
pub fn sort_indicator(order: Option<&OrderBy>, column: &str) -> &'static str {
    match order {
        Some(o) if o.column == column => match o.direction {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        },
        _ => "",
    }
}

/// Footer label, e.g. `Page 2 of 3`.
#[must_use]
pub fn page_label(page: Pagination, total: u64) -> String {
    format!("Page {} of {}", page.page_index + 1, page.page_count(total))
}

/// One header cell; clicking a sortable column cycles the sort.
#[component]
pub fn SortHeader(
    def: &'static ColumnDef,
    #[prop(into)] order: Signal<Option<OrderBy>>,
    on_sort: Callback<String>,
) -> impl IntoView {
    let class = if def.sortable {
        "trace-table__header trace-table__header--sortable"
    } else {
        "trace-table__header"
    };
    view! {
        <th
            class=class
            title=def.header_tooltip
            on:click=move |_| {
                if def.sortable {
                    on_sort.run(def.id.to_owned());
                }
            }
        >
            <span>{def.header}</span>
            <span class="trace-table__sort-indicator">
                {move || sort_indicator(order.get().as_ref(), def.id)}
            </span>
        </th>
    }
}

/// Pagination footer: total count, page-size selector, prev/next.
#[component]
pub fn PaginationFooter(
    #[prop(into)] page: Signal<Pagination>,
    #[prop(into)] total: Signal<u64>,
    on_page: Callback<usize>,
    on_page_size: Callback<usize>,
) -> impl IntoView {
    let can_prev = move || page.get().page_index > 0;
    let can_next = move || {
        let p = page.get();
        p.page_index + 1 < p.page_count(total.get())
    };

    view! {
        <div class="trace-table__footer">
            <span class="trace-table__total">{move || format!("{} traces", total.get())}</span>
            <span class="trace-table__spacer"></span>
            <label class="trace-table__page-size">
                "Rows"
                <select on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                        on_page_size.run(size);
                    }
                }>
                    {PAGE_SIZES
                        .into_iter()
                        .map(|size| {
                            view! {
                                <option
                                    value=size.to_string()
                                    selected=move || page.get().page_size == size
                                >
                                    {size.to_string()}
                                </option>
                            }
                        })
                        .collect::<Vec<_>>()}
                </select>
            </label>
            <span class="trace-table__page-label">{move || page_label(page.get(), total.get())}</span>
            <button
                class="btn trace-table__page-prev"
                disabled=move || !can_prev()
                on:click=move |_| on_page.run(page.get_untracked().page_index.saturating_sub(1))
            >
                "‹"
            </button>
            <button
                class="btn trace-table__page-next"
                disabled=move || !can_next()
                on:click=move |_| on_page.run(page.get_untracked().page_index + 1)
            >
                "›"
            </button>
        </div>
    }
}
