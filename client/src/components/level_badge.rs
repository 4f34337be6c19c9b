//! Severity badge cell.

use leptos::prelude::*;

use traces::level::{TraceLevel, level_display};

#[component]
pub fn LevelBadge(level: TraceLevel) -> impl IntoView {
    let display = level_display(level);
    view! {
        <span class="level-badge" style=format!("border-color: {0}; color: {0}", display.color)>
            {display.label}
        </span>
    }
}
