//! Multi-select bulk-action bar with confirm dialog.
//!
//! Shown only when the selection intersects the loaded page — selections
//! parked on other pages are not actionable. The delete button additionally
//! requires the delete capability.

use leptos::prelude::*;

#[component]
pub fn BulkActionBar(
    #[prop(into)] count: Signal<usize>,
    #[prop(into)] can_delete: Signal<bool>,
    #[prop(into)] busy: Signal<bool>,
    on_delete: Callback<()>,
    on_deselect: Callback<()>,
) -> impl IntoView {
    let confirm = RwSignal::new(false);

    view! {
        <div class="bulk-bar">
            <span class="bulk-bar__count">
                {move || format!("{} selected", count.get())}
            </span>
            <button class="btn bulk-bar__deselect" on:click=move |_| on_deselect.run(())>
                "Deselect all"
            </button>
            <Show when=move || can_delete.get()>
                <button
                    class="btn btn--danger bulk-bar__delete"
                    disabled=move || busy.get()
                    on:click=move |_| confirm.set(true)
                >
                    "Delete"
                </button>
            </Show>
            <Show when=move || confirm.get()>
                <div class="dialog-backdrop" on:click=move |_| confirm.set(false)>
                    <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                        <h2>"Delete Traces"</h2>
                        <p class="dialog__danger">
                            {move || {
                                format!(
                                    "This will permanently delete {} trace(s) and their scores.",
                                    count.get(),
                                )
                            }}
                        </p>
                        <div class="dialog__actions">
                            <button class="btn" on:click=move |_| confirm.set(false)>
                                "Cancel"
                            </button>
                            <button
                                class="btn btn--danger"
                                on:click=move |_| {
                                    confirm.set(false);
                                    on_delete.run(());
                                }
                            >
                                "Delete"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
