//! Tag chips with an editor popover.
//!
//! The editor gets the full set of known tag values from the filter-options
//! query so typing offers typeahead suggestions; saving replaces the trace's
//! tag set and invalidates the listing through `on_change`.

#[cfg(test)]
#[path = "tag_popover_test.rs"]
mod tag_popover_test;

use leptos::prelude::*;

use traces::options::FilterOptions;

#[component]
pub fn TagPopover(
    project_id: String,
    trace_id: String,
    tags: Vec<String>,
    #[prop(into)] known_tags: Signal<Vec<String>>,
    on_change: Callback<()>,
) -> impl IntoView {
    let open = RwSignal::new(false);
    let draft = RwSignal::new(String::new());
    let applied = RwSignal::new(tags);
    let saving = RwSignal::new(false);

    let suggestions = move || {
        let options = FilterOptions { tags: known_tags.get(), ..FilterOptions::default() };
        options
            .tag_suggestions(&draft.get(), &applied.get())
            .into_iter()
            .map(str::to_owned)
            .collect::<Vec<_>>()
    };

    let add_draft = move || {
        let tag = draft.get_untracked();
        applied.update(|tags| *tags = with_tag(std::mem::take(tags), tag.trim()));
        draft.set(String::new());
    };

    // Callback rather than a plain closure: the popover body is rebuilt on
    // every open, and only a Copy handle can cross that rebuild.
    let save = Callback::new(move |()| {
        if saving.get_untracked() {
            return;
        }
        saving.set(true);
        send_tags(
            project_id.clone(),
            trace_id.clone(),
            applied.get_untracked(),
            open,
            saving,
            on_change,
        );
    });

    view! {
        <span class="tag-cell">
            {move || {
                applied
                    .get()
                    .into_iter()
                    .map(|tag| view! { <span class="tag-cell__chip">{tag}</span> })
                    .collect::<Vec<_>>()
            }}
            <button class="tag-cell__edit" title="Edit tags" on:click=move |_| open.set(true)>
                "✎"
            </button>
            <Show when=move || open.get()>
                <div class="popover-backdrop" on:click=move |_| open.set(false)>
                    <div class="popover" on:click=move |ev| ev.stop_propagation()>
                        <div class="popover__chips">
                            {move || {
                                applied
                                    .get()
                                    .into_iter()
                                    .map(|tag| {
                                        let remove = tag.clone();
                                        view! {
                                            <span class="popover__chip">
                                                {tag}
                                                <button
                                                    class="popover__chip-remove"
                                                    on:click=move |_| {
                                                        applied
                                                            .update(|tags| {
                                                                *tags = without_tag(std::mem::take(tags), &remove);
                                                            });
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
                        <input
                            class="popover__input"
                            type="text"
                            placeholder="Add tag"
                            prop:value=move || draft.get()
                            on:input=move |ev| draft.set(event_target_value(&ev))
                            on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                                if ev.key() == "Enter" {
                                    ev.prevent_default();
                                    add_draft();
                                }
                            }
                        />
                        <div class="popover__suggestions">
                            {move || {
                                suggestions()
                                    .into_iter()
                                    .map(|tag| {
                                        let chosen = tag.clone();
                                        view! {
                                            <button
                                                class="popover__suggestion"
                                                on:click=move |_| {
                                                    applied
                                                        .update(|tags| {
                                                            *tags = with_tag(std::mem::take(tags), &chosen);
                                                        });
                                                    draft.set(String::new());
                                                }
                                            >
                                                {tag}
                                            </button>
                                        }
                                    })
                                    .collect::<Vec<_>>()
                            }}
                        </div>
                        <div class="popover__actions">
                            <button class="btn" on:click=move |_| open.set(false)>
                                "Cancel"
                            </button>
                            <button
                                class="btn btn--primary"
                                disabled=move || saving.get()
                                on:click=move |_| save.run(())
                            >
                                "Save"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </span>
    }
}

/// Append a tag, ignoring blanks and duplicates.
fn with_tag(mut tags: Vec<String>, tag: &str) -> Vec<String> {
    let tag = tag.trim();
    if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
        tags.push(tag.to_owned());
    }
    tags
}

/// Remove a tag, keeping order.
fn without_tag(mut tags: Vec<String>, tag: &str) -> Vec<String> {
    tags.retain(|t| t != tag);
    tags
}

fn send_tags(
    project_id: String,
    trace_id: String,
    tags: Vec<String>,
    open: RwSignal<bool>,
    saving: RwSignal<bool>,
    on_change: Callback<()>,
) {
    #[cfg(feature = "csr")]
    {
        leptos::task::spawn_local(async move {
            match crate::net::api::update_tags(&project_id, &trace_id, &tags).await {
                Ok(()) => {
                    open.set(false);
                    on_change.run(());
                }
                Err(message) => leptos::logging::warn!("tag update failed: {message}"),
            }
            saving.set(false);
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (project_id, trace_id, tags, open, saving, on_change);
    }
}
