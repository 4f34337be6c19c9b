//! Trace listing page — the paginated, filterable, sortable trace grid.
//!
//! SYSTEM CONTEXT
//! ==============
//! Data flow: URL state → query assembly → remote fetch → row transformation
//! → registry-driven rendering → user interaction → URL update → refetch.
//! Filter/sort/pagination/search live in the URL; only the row selection and
//! transient fetch state are held in memory. Interactions navigate first and
//! let the fetch effect chase the URL, so the address bar is always the
//! source of truth.
//!
//! Three fetch families run independently: the primary listing, the
//! filter-options query (never batched with the listing, so the grid renders
//! without waiting on it), and one lazy detail fetch per mounted
//! input/output/metadata cell.

#[cfg(test)]
#[path = "traces_test.rs"]
mod traces_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map, use_query_map};

use traces::columns::{self, ColumnDef, ColumnKind};
use traces::filter::FilterState;
use traces::options::{FilterOptions, TimeWindow, time_window};
use traces::order::OrderBy;
use traces::params::TableUrlState;
use traces::query::TraceQuery;
use traces::record::{TraceRecord, TraceScore};
use traces::row::TraceRow;
use traces::selection::{HeaderCheckbox, SelectionState};

use crate::components::bulk_action_bar::BulkActionBar;
use crate::components::column_menu::ColumnMenu;
use crate::components::data_table::{PaginationFooter, SortHeader, TablePayload};
use crate::components::filter_builder::FilterBuilder;
use crate::components::io_cell::{DetailField, IoCell};
use crate::components::level_badge::LevelBadge;
use crate::components::star_toggle::StarToggle;
use crate::components::tag_popover::TagPopover;
use crate::state::capability::CapabilityState;
use crate::state::table::{self, PARAM_USER};
use crate::util::format::{format_cost, format_count, format_duration, format_ts, usage_summary};
use crate::util::ui_persistence::{hidden_columns_key, load_json, save_json};

/// One loaded listing page plus the filtered window's total row count.
#[derive(Clone, Debug, PartialEq)]
struct TraceListing {
    rows: Vec<TraceRow>,
    total: u64,
}

/// Copyable bundle of everything a cell renderer may need.
#[derive(Clone, Copy)]
struct CellCtx {
    selection: RwSignal<SelectionState>,
    project: Memo<String>,
    invalidate: Callback<()>,
    known_tags: Signal<Vec<String>>,
    can_delete: Signal<bool>,
}

#[component]
pub fn TracesPage() -> impl IntoView {
    let params = use_params_map();
    let query_map = use_query_map();
    let navigate = use_navigate();

    // ---- URL-backed state ----------------------------------------------
    let project_id = Memo::new(move |_| {
        params.get().get("project_id").unwrap_or_else(|| "demo".to_owned())
    });
    let table_state = Memo::new(move |_| {
        let query = query_map.get();
        table::from_lookup(|key| query.get(key))
    });
    // Caller-provided user scope: becomes the implicit user filter and prunes
    // the user_id column from the filter builder.
    let user_scope = Memo::new(move |_| query_map.get().get(PARAM_USER));

    let trace_query = Memo::new(move |_| {
        let state = table_state.get();
        TraceQuery::assemble(
            &project_id.get(),
            state.page,
            &state.filter,
            user_scope.get().as_deref(),
            state.search.as_deref(),
            state.order_by.as_ref(),
        )
    });

    // Interactions navigate; the URL update lands before the fetch effect
    // re-runs, so state and refetch can never disagree.
    let push_state = {
        let navigate = navigate.clone();
        Callback::new(move |next: TableUrlState| {
            let url = table::href(
                &project_id.get_untracked(),
                &next,
                user_scope.get_untracked().as_deref(),
            );
            navigate(&url, NavigateOptions::default());
        })
    };

    // ---- Primary listing fetch -----------------------------------------
    let refresh = RwSignal::new(0u64);
    let invalidate = Callback::new(move |()| refresh.update(|n| *n += 1));

    // The assembled query's cache key identifies the listing view; mutations
    // bump `refresh` to invalidate it, and an unchanged key (e.g. a
    // navigation that rewrote an equivalent URL) issues no duplicate fetch.
    let fetched_key = RwSignal::new(String::new());
    let listing = RwSignal::new(TablePayload::<TraceListing>::Loading);
    Effect::new(move || {
        let query = trace_query.get();
        let key = format!("{}#{}", query.cache_key(), refresh.get());
        if fetched_key.get_untracked() == key {
            return;
        }
        fetched_key.set(key);
        listing.set(TablePayload::Loading);
        fetch_listing(query, listing);
    });

    // ---- Filter options (independent, never batched with the listing) --
    let filter_options = RwSignal::new(FilterOptions::default());
    let window = Memo::new(move |_| time_window(table_state.get().filter.predicates()));
    Effect::new(move || {
        let project = project_id.get();
        let win = window.get();
        fetch_options(project, win, filter_options);
    });

    // ---- Selection (in-memory only; survives refetch and pagination) ---
    let selection = RwSignal::new(SelectionState::default());
    let page_ids = Memo::new(move |_| match listing.get() {
        TablePayload::Ready(data) => data.rows.iter().map(|r| r.id.clone()).collect::<Vec<_>>(),
        _ => Vec::new(),
    });
    let header_state = Memo::new(move |_| selection.get().header_state(&page_ids.get()));

    // ---- Column visibility ---------------------------------------------
    let hidden = RwSignal::new(Vec::<String>::new());
    Effect::new(move || {
        let project = project_id.get();
        let stored = load_json::<Vec<String>>(&hidden_columns_key(&project));
        hidden.set(stored.unwrap_or_else(|| {
            columns::default_hidden_ids().into_iter().map(str::to_owned).collect()
        }));
    });
    let toggle_column = Callback::new(move |id: String| {
        hidden.update(|h| {
            if let Some(pos) = h.iter().position(|x| *x == id) {
                h.remove(pos);
            } else {
                h.push(id);
            }
        });
        save_json(&hidden_columns_key(&project_id.get_untracked()), &hidden.get_untracked());
    });

    // ---- Interactions ---------------------------------------------------
    let on_sort = Callback::new(move |column: String| {
        let mut next = table_state.get_untracked();
        next.order_by = OrderBy::cycle(next.order_by.as_ref(), &column);
        push_state.run(next);
    });
    let on_page = Callback::new(move |index: usize| {
        let mut next = table_state.get_untracked();
        next.page.page_index = index;
        push_state.run(next);
    });
    let on_page_size = Callback::new(move |size: usize| {
        let mut next = table_state.get_untracked();
        next.page = next.page.with_page_size(size);
        push_state.run(next);
    });
    let on_filter = Callback::new(move |filter: FilterState| {
        let mut next = table_state.get_untracked();
        next.filter = filter;
        // A changed filter means a different result set; restart at page one.
        next.page.page_index = 0;
        push_state.run(next);
    });

    let search_draft = RwSignal::new(String::new());
    Effect::new(move || {
        search_draft.set(table_state.get().search.unwrap_or_default());
    });
    let submit_search = move || {
        let mut next = table_state.get_untracked();
        let draft = search_draft.get_untracked();
        let trimmed = draft.trim();
        let next_search = if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) };
        if next.search == next_search {
            return;
        }
        next.search = next_search;
        next.page.page_index = 0;
        push_state.run(next);
    };

    // ---- Bulk delete ----------------------------------------------------
    let capability = expect_context::<RwSignal<CapabilityState>>();
    let can_delete = Signal::derive(move || capability.get().can_delete);
    let action_error = RwSignal::new(None::<String>);
    let deleting = RwSignal::new(false);

    let on_bulk_delete = Callback::new(move |()| {
        if deleting.get_untracked() {
            return;
        }
        let ids = selection.get_untracked().actionable_ids(&page_ids.get_untracked());
        if ids.is_empty() {
            return;
        }
        deleting.set(true);
        run_bulk_delete(
            project_id.get_untracked(),
            ids,
            selection,
            deleting,
            action_error,
            invalidate,
        );
    });
    let on_deselect = Callback::new(move |()| selection.update(SelectionState::clear));

    let ctx = CellCtx {
        selection,
        project: project_id,
        invalidate,
        known_tags: Signal::derive(move || filter_options.get().tags),
        can_delete,
    };
    let order = Signal::derive(move || table_state.get().order_by.clone());

    view! {
        <div class="traces-page">
            <header class="traces-page__toolbar">
                <span class="traces-page__title">"Traces"</span>
                <Show when=move || user_scope.get().is_some()>
                    <span class="traces-page__scope">
                        {move || format!("user: {}", user_scope.get().unwrap_or_default())}
                    </span>
                </Show>
                <input
                    class="traces-page__search"
                    type="text"
                    placeholder="Search id, name, user"
                    prop:value=move || search_draft.get()
                    on:input=move |ev| search_draft.set(event_target_value(&ev))
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            submit_search();
                        }
                    }
                    on:blur=move |_| submit_search()
                />
                <span class="traces-page__spacer"></span>
                <ColumnMenu hidden=hidden on_toggle=toggle_column/>
            </header>

            <FilterBuilder
                filter=Signal::derive(move || table_state.get().filter.clone())
                options=filter_options
                omit=if user_scope.get_untracked().is_some() { vec!["user_id"] } else { Vec::new() }
                on_change=on_filter
            />

            <Show when=move || action_error.get().is_some()>
                <p class="traces-page__error">{move || action_error.get().unwrap_or_default()}</p>
            </Show>

            <Show when=move || selection.get().bulk_visible(&page_ids.get())>
                <BulkActionBar
                    count=Signal::derive(move || {
                        selection.get().actionable_ids(&page_ids.get()).len()
                    })
                    can_delete=can_delete
                    busy=deleting
                    on_delete=on_bulk_delete
                    on_deselect=on_deselect
                />
            </Show>

            <table class="trace-table">
                <thead>
                    <tr>
                        {move || {
                            let hidden_now = hidden.get();
                            columns::registry()
                                .iter()
                                .filter(|def| !hidden_now.iter().any(|h| h == def.id))
                                .map(|def| {
                                    header_cell(def, selection, page_ids, header_state, order, on_sort)
                                })
                                .collect::<Vec<_>>()
                        }}
                    </tr>
                </thead>
                <tbody>
                    {move || match listing.get() {
                        TablePayload::Loading => {
                            view! {
                                <tr class="trace-table__status-row">
                                    <td colspan="25">"Loading traces…"</td>
                                </tr>
                            }
                                .into_any()
                        }
                        TablePayload::Error(message) => {
                            view! {
                                <tr class="trace-table__status-row trace-table__status-row--error">
                                    <td colspan="25">{message}</td>
                                </tr>
                            }
                                .into_any()
                        }
                        TablePayload::Ready(data) if data.rows.is_empty() => {
                            view! {
                                <tr class="trace-table__status-row">
                                    <td colspan="25">"No traces match."</td>
                                </tr>
                            }
                                .into_any()
                        }
                        TablePayload::Ready(data) => {
                            let rows = data.rows;
                            view! {
                                <For
                                    each=move || rows.clone()
                                    key=|row| row.id.clone()
                                    children=move |row: TraceRow| {
                                        view! {
                                            <tr class="trace-table__row">
                                                {columns::registry()
                                                    .iter()
                                                    .map(|def| {
                                                        // StoredValue gives the cell a Copy handle to
                                                        // the row, so a visibility toggle of THIS
                                                        // column can rebuild the cell while other
                                                        // state changes leave it mounted.
                                                        let row = StoredValue::new(row.clone());
                                                        view! {
                                                            <Show when=move || {
                                                                !hidden.get().iter().any(|h| h == def.id)
                                                            }>
                                                                {move || {
                                                                    row.with_value(|row| trace_cell(def, row, ctx))
                                                                }}
                                                            </Show>
                                                        }
                                                    })
                                                    .collect::<Vec<_>>()}
                                            </tr>
                                        }
                                    }
                                />
                            }
                                .into_any()
                        }
                    }}
                </tbody>
            </table>

            <PaginationFooter
                page=Signal::derive(move || table_state.get().page)
                total=Signal::derive(move || match listing.get() {
                    TablePayload::Ready(data) => data.total,
                    _ => 0,
                })
                on_page=on_page
                on_page_size=on_page_size
            />
        </div>
    }
}

// =============================================================================
// CELL RENDERING
// =============================================================================

fn header_cell(
    def: &'static ColumnDef,
    selection: RwSignal<SelectionState>,
    page_ids: Memo<Vec<String>>,
    header_state: Memo<HeaderCheckbox>,
    order: Signal<Option<OrderBy>>,
    on_sort: Callback<String>,
) -> AnyView {
    match def.kind {
        ColumnKind::Select => view! {
            <th class="trace-table__header trace-table__header--select">
                <input
                    type="checkbox"
                    prop:checked=move || matches!(header_state.get(), HeaderCheckbox::Checked)
                    prop:indeterminate=move || {
                        matches!(header_state.get(), HeaderCheckbox::Indeterminate)
                    }
                    on:change=move |_| {
                        selection.update(|s| s.toggle_header(&page_ids.get_untracked()));
                    }
                />
            </th>
        }
        .into_any(),
        _ => view! { <SortHeader def=def order=order on_sort=on_sort/> }.into_any(),
    }
}

/// Registry-driven cell dispatch.
fn trace_cell(def: &'static ColumnDef, row: &TraceRow, ctx: CellCtx) -> AnyView {
    match def.id {
        "select" => {
            let id = row.id.clone();
            let check_id = id.clone();
            view! {
                <td class="trace-table__cell trace-table__cell--select">
                    <input
                        type="checkbox"
                        prop:checked=move || ctx.selection.get().is_selected(&check_id)
                        on:change=move |_| ctx.selection.update(|s| s.toggle(&id))
                    />
                </td>
            }
            .into_any()
        }
        "bookmarked" => view! {
            <td class="trace-table__cell trace-table__cell--bookmark">
                <StarToggle
                    project_id=ctx.project.get_untracked()
                    trace_id=row.id.clone()
                    bookmarked=row.bookmarked
                    on_change=ctx.invalidate
                />
            </td>
        }
        .into_any(),
        "timestamp" => text_cell(format_ts(row.timestamp)),
        "name" => text_cell(row.name.clone()),
        "user_id" => text_cell(row.user_id.clone().unwrap_or_default()),
        "session_id" => text_cell(row.session_id.clone().unwrap_or_default()),
        "latency" => text_cell(row.latency.map(format_duration).unwrap_or_default()),
        "level" => view! {
            <td class="trace-table__cell trace-table__cell--level">
                <LevelBadge level=row.level/>
            </td>
        }
        .into_any(),
        "observation_count" => text_cell(format_count(row.observation_count)),
        "input" => io_cell(row, ctx, DetailField::Input),
        "output" => io_cell(row, ctx, DetailField::Output),
        "metadata" => io_cell(row, ctx, DetailField::Metadata),
        "scores" => {
            let chips = row.scores.iter().map(score_chip_label).collect::<Vec<_>>();
            view! {
                <td class="trace-table__cell trace-table__cell--scores">
                    {chips
                        .into_iter()
                        .map(|chip| view! { <span class="score-chip">{chip}</span> })
                        .collect::<Vec<_>>()}
                </td>
            }
            .into_any()
        }
        "tags" => view! {
            <td class="trace-table__cell trace-table__cell--tags">
                <TagPopover
                    project_id=ctx.project.get_untracked()
                    trace_id=row.id.clone()
                    tags=row.tags.clone()
                    known_tags=ctx.known_tags
                    on_change=ctx.invalidate
                />
            </td>
        }
        .into_any(),
        "usage" => text_cell(usage_summary(&row.usage)),
        "prompt_tokens" => text_cell(format_count(row.usage.prompt_tokens)),
        "completion_tokens" => text_cell(format_count(row.usage.completion_tokens)),
        "total_tokens" => text_cell(format_count(row.usage.total_tokens)),
        "input_cost" => {
            text_cell(row.cost.and_then(|c| c.input).map(format_cost).unwrap_or_default())
        }
        "output_cost" => {
            text_cell(row.cost.and_then(|c| c.output).map(format_cost).unwrap_or_default())
        }
        "total_cost" => {
            text_cell(row.cost.and_then(|c| c.total).map(format_cost).unwrap_or_default())
        }
        "release" => text_cell(row.release.clone().unwrap_or_default()),
        "version" => text_cell(row.version.clone().unwrap_or_default()),
        "id" => text_cell(row.id.clone()),
        "action" => view! {
            <td class="trace-table__cell trace-table__cell--action">
                <RowDelete
                    project_id=ctx.project.get_untracked()
                    trace_id=row.id.clone()
                    can_delete=ctx.can_delete
                    on_done=ctx.invalidate
                />
            </td>
        }
        .into_any(),
        _ => text_cell(String::new()),
    }
}

fn text_cell(text: String) -> AnyView {
    view! { <td class="trace-table__cell">{text}</td> }.into_any()
}

fn io_cell(row: &TraceRow, ctx: CellCtx, field: DetailField) -> AnyView {
    view! {
        <td class="trace-table__cell trace-table__cell--io">
            <IoCell project_id=ctx.project.get_untracked() trace_id=row.id.clone() field=field/>
        </td>
    }
    .into_any()
}

/// Chip text for one score.
fn score_chip_label(score: &TraceScore) -> String {
    format!("{}: {:.2}", score.name, score.value)
}

/// Per-row delete control, shown only with delete capability.
#[component]
fn RowDelete(
    project_id: String,
    trace_id: String,
    #[prop(into)] can_delete: Signal<bool>,
    on_done: Callback<()>,
) -> impl IntoView {
    let target = StoredValue::new((project_id, trace_id));
    let confirm = RwSignal::new(false);
    let busy = RwSignal::new(false);

    view! {
        <Show when=move || can_delete.get()>
            <button
                class="row-delete"
                title="Delete trace"
                on:click=move |_| confirm.set(true)
            >
                "✕"
            </button>
            <Show when=move || confirm.get()>
                <div class="dialog-backdrop" on:click=move |_| confirm.set(false)>
                    <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                        <h2>"Delete Trace"</h2>
                        <p class="dialog__danger">
                            "This will permanently delete this trace and its scores."
                        </p>
                        <div class="dialog__actions">
                            <button class="btn" on:click=move |_| confirm.set(false)>
                                "Cancel"
                            </button>
                            <button
                                class="btn btn--danger"
                                disabled=move || busy.get()
                                on:click=move |_| {
                                    busy.set(true);
                                    send_row_delete(target, confirm, busy, on_done);
                                }
                            >
                                "Delete"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </Show>
    }
}

// =============================================================================
// FETCH HELPERS
// =============================================================================

/// Transform wire records into view rows, dropping records that fail the
/// validation boundary instead of rendering half-blank rows.
fn transform_records(records: Vec<TraceRecord>) -> Vec<TraceRow> {
    records
        .into_iter()
        .filter_map(|record| match TraceRow::from_record(record) {
            Ok(row) => Some(row),
            Err(err) => {
                leptos::logging::warn!("dropping unrenderable trace record: {err}");
                None
            }
        })
        .collect()
}

fn fetch_listing(query: TraceQuery, listing: RwSignal<TablePayload<TraceListing>>) {
    #[cfg(feature = "csr")]
    {
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_traces(&query).await {
                Ok(page) => {
                    let total = page.total_count;
                    let rows = transform_records(page.traces);
                    listing.set(TablePayload::Ready(TraceListing { rows, total }));
                }
                Err(message) => listing.set(TablePayload::Error(message)),
            }
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (query, listing);
    }
}

fn fetch_options(
    project_id: String,
    window: Option<TimeWindow>,
    options: RwSignal<FilterOptions>,
) {
    #[cfg(feature = "csr")]
    {
        leptos::task::spawn_local(async move {
            if let Some(response) =
                crate::net::api::fetch_filter_options(&project_id, window).await
            {
                options.set(FilterOptions::from_response(response));
            }
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (project_id, window, options);
    }
}

fn run_bulk_delete(
    project_id: String,
    trace_ids: Vec<String>,
    selection: RwSignal<SelectionState>,
    deleting: RwSignal<bool>,
    error: RwSignal<Option<String>>,
    invalidate: Callback<()>,
) {
    #[cfg(feature = "csr")]
    {
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_traces(&project_id, &trace_ids).await {
                Ok(()) => {
                    // Bulk delete succeeded: the whole selection goes, not
                    // just the deleted page's ids.
                    selection.update(SelectionState::clear);
                    error.set(None);
                    invalidate.run(());
                }
                Err(message) => error.set(Some(message)),
            }
            deleting.set(false);
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (project_id, trace_ids, selection, deleting, error, invalidate);
    }
}

fn send_row_delete(
    target: StoredValue<(String, String)>,
    confirm: RwSignal<bool>,
    busy: RwSignal<bool>,
    on_done: Callback<()>,
) {
    #[cfg(feature = "csr")]
    {
        leptos::task::spawn_local(async move {
            let (project_id, trace_id) = target.get_value();
            match crate::net::api::delete_traces(&project_id, &[trace_id]).await {
                Ok(()) => {
                    confirm.set(false);
                    on_done.run(());
                }
                Err(message) => leptos::logging::warn!("trace delete failed: {message}"),
            }
            busy.set(false);
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (target, confirm, busy, on_done);
    }
}
