//! Per-row bookmark toggle.
//!
//! The flip is optimistic: the star updates immediately, the mutation runs in
//! the background, and a failure rolls the star back. On success the listing
//! is invalidated through `on_change` so the server state wins.

use leptos::prelude::*;

#[component]
pub fn StarToggle(
    project_id: String,
    trace_id: String,
    bookmarked: bool,
    on_change: Callback<()>,
) -> impl IntoView {
    let starred = RwSignal::new(bookmarked);
    let pending = RwSignal::new(false);

    let on_click = move |_| {
        if pending.get_untracked() {
            return;
        }
        let next = !starred.get_untracked();
        starred.set(next);
        pending.set(true);
        send_bookmark(project_id.clone(), trace_id.clone(), next, starred, pending, on_change);
    };

    view! {
        <button
            class=move || {
                if starred.get() { "star-toggle star-toggle--active" } else { "star-toggle" }
            }
            title="Bookmark trace"
            on:click=on_click
        >
            {move || if starred.get() { "★" } else { "☆" }}
        </button>
    }
}

fn send_bookmark(
    project_id: String,
    trace_id: String,
    bookmarked: bool,
    starred: RwSignal<bool>,
    pending: RwSignal<bool>,
    on_change: Callback<()>,
) {
    #[cfg(feature = "csr")]
    {
        leptos::task::spawn_local(async move {
            match crate::net::api::set_bookmark(&project_id, &trace_id, bookmarked).await {
                Ok(()) => on_change.run(()),
                Err(message) => {
                    leptos::logging::warn!("bookmark update failed: {message}");
                    starred.set(!bookmarked);
                }
            }
            pending.set(false);
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (project_id, trace_id, bookmarked, starred, pending, on_change);
    }
}
