//! Filter builder: predicate chips plus an add-predicate row.
//!
//! DESIGN
//! ======
//! Only user-editable predicates pass through here — the synthetic user-scope
//! filter is appended at query-assembly time and never reaches this control.
//! The column list comes from the registry, pruned by the caller's omission
//! list (a user-scoped view omits the `user_id` filter its scope fixes).

#[cfg(test)]
#[path = "filter_builder_test.rs"]
mod filter_builder_test;

use leptos::prelude::*;

use traces::columns::{filter_kind, filterable_columns};
use traces::filter::{FilterKind, FilterOperator, FilterPredicate, FilterState, FilterValue};
use traces::level::TraceLevel;
use traces::options::FilterOptions;

#[component]
pub fn FilterBuilder(
    #[prop(into)] filter: Signal<FilterState>,
    #[prop(into)] options: Signal<FilterOptions>,
    #[prop(optional)] omit: Vec<&'static str>,
    on_change: Callback<FilterState>,
) -> impl IntoView {
    let available = StoredValue::new(filterable_columns(&omit));
    let first_column =
        available.with_value(|cols| cols.first().map(|c| c.id.to_owned()).unwrap_or_default());

    let column = RwSignal::new(first_column);
    let operator = RwSignal::new(default_operator(&column.get_untracked()));
    let value = RwSignal::new(String::new());

    let current_kind = move || filter_kind(&column.get());

    // Dynamic value suggestions for columns the options query covers.
    let value_options = move || {
        let opts = options.get();
        match column.get().as_str() {
            "tags" => opts.tags,
            "name" => opts.names,
            "release" => opts.releases,
            _ => Vec::new(),
        }
    };

    let add = move || {
        let col = column.get_untracked();
        let Some(kind) = filter_kind(&col) else {
            return;
        };
        let Some(op) = FilterOperator::parse(&operator.get_untracked()) else {
            return;
        };
        let Some(parsed) = FilterValue::parse(kind, value.get_untracked().trim()) else {
            return;
        };
        let mut next = filter.get_untracked();
        next.push(FilterPredicate { column: col, op, value: parsed });
        on_change.run(next);
        value.set(String::new());
    };

    view! {
        <div class="filter-builder">
            <div class="filter-builder__chips">
                {move || {
                    filter
                        .get()
                        .predicates()
                        .iter()
                        .enumerate()
                        .map(|(index, pred)| {
                            let summary = predicate_summary(pred);
                            view! {
                                <span class="filter-builder__chip">
                                    {summary}
                                    <button
                                        class="filter-builder__chip-remove"
                                        on:click=move |_| {
                                            let mut next = filter.get_untracked();
                                            next.remove(index);
                                            on_change.run(next);
                                        }
                                    >
                                        "×"
                                    </button>
                                </span>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </div>
            <div class="filter-builder__add">
                <select
                    class="filter-builder__column"
                    on:change=move |ev| {
                        let next = event_target_value(&ev);
                        operator.set(default_operator(&next));
                        column.set(next);
                        value.set(String::new());
                    }
                >
                    {available
                        .get_value()
                        .into_iter()
                        .map(|def| {
                            view! {
                                <option value=def.id selected=move || column.get() == def.id>
                                    {if def.header.is_empty() { def.id } else { def.header }}
                                </option>
                            }
                        })
                        .collect::<Vec<_>>()}
                </select>
                <select
                    class="filter-builder__operator"
                    on:change=move |ev| operator.set(event_target_value(&ev))
                >
                    {move || {
                        current_kind()
                            .map(FilterOperator::for_kind)
                            .unwrap_or(&[])
                            .iter()
                            .map(|op| {
                                let text = op.as_str();
                                view! {
                                    <option value=text selected=move || operator.get() == text>
                                        {op_symbol(*op)}
                                    </option>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </select>
                {move || match current_kind() {
                    Some(FilterKind::Level) => {
                        view! {
                            <select
                                class="filter-builder__value"
                                on:change=move |ev| value.set(event_target_value(&ev))
                            >
                                <option value="" selected=move || value.get().is_empty()>
                                    "level…"
                                </option>
                                {TraceLevel::ALL
                                    .iter()
                                    .map(|level| {
                                        let text = level.as_str();
                                        view! {
                                            <option
                                                value=text
                                                selected=move || value.get() == text
                                            >
                                                {text}
                                            </option>
                                        }
                                    })
                                    .collect::<Vec<_>>()}
                            </select>
                        }
                            .into_any()
                    }
                    Some(FilterKind::Flag) => {
                        view! {
                            <select
                                class="filter-builder__value"
                                on:change=move |ev| value.set(event_target_value(&ev))
                            >
                                <option value="" selected=move || value.get().is_empty()>
                                    "…"
                                </option>
                                <option value="true" selected=move || value.get() == "true">
                                    "true"
                                </option>
                                <option value="false" selected=move || value.get() == "false">
                                    "false"
                                </option>
                            </select>
                        }
                            .into_any()
                    }
                    kind => {
                        view! {
                            <input
                                class="filter-builder__value"
                                type="text"
                                list="filter-value-suggestions"
                                placeholder=placeholder_for(kind)
                                prop:value=move || value.get()
                                on:input=move |ev| value.set(event_target_value(&ev))
                                on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                                    if ev.key() == "Enter" {
                                        ev.prevent_default();
                                        add();
                                    }
                                }
                            />
                            <datalist id="filter-value-suggestions">
                                {move || {
                                    value_options()
                                        .into_iter()
                                        .map(|option| view! { <option value=option></option> })
                                        .collect::<Vec<_>>()
                                }}
                            </datalist>
                        }
                            .into_any()
                    }
                }}
                <button class="btn filter-builder__apply" on:click=move |_| add()>
                    "Add filter"
                </button>
            </div>
        </div>
    }
}

/// Default operator (wire form) for a column, the first applicable one.
fn default_operator(column: &str) -> String {
    filter_kind(column)
        .and_then(|kind| FilterOperator::for_kind(kind).first().copied())
        .map(|op| op.as_str().to_owned())
        .unwrap_or_default()
}

/// Display symbol for an operator.
fn op_symbol(op: FilterOperator) -> &'static str {
    match op {
        FilterOperator::Eq => "=",
        FilterOperator::Neq => "≠",
        FilterOperator::Contains => "contains",
        FilterOperator::Gt => ">",
        FilterOperator::Gte => "≥",
        FilterOperator::Lt => "<",
        FilterOperator::Lte => "≤",
        FilterOperator::AnyOf => "any of",
        FilterOperator::AllOf => "all of",
    }
}

/// Chip text for an applied predicate.
fn predicate_summary(pred: &FilterPredicate) -> String {
    format!("{} {} {}", pred.column, op_symbol(pred.op), pred.value.encode())
}

fn placeholder_for(kind: Option<FilterKind>) -> &'static str {
    match kind {
        Some(FilterKind::Number) => "e.g. 1.5",
        Some(FilterKind::Timestamp) => "epoch ms",
        Some(FilterKind::List) => "comma,separated",
        _ => "value",
    }
}
