//! Column-visibility menu.

use leptos::prelude::*;

use traces::columns::{ColumnKind, registry};

#[component]
pub fn ColumnMenu(
    #[prop(into)] hidden: Signal<Vec<String>>,
    on_toggle: Callback<String>,
) -> impl IntoView {
    let open = RwSignal::new(false);

    // Structural columns cannot be hidden.
    let choices = registry()
        .iter()
        .filter(|def| !matches!(def.kind, ColumnKind::Select | ColumnKind::Action))
        .collect::<Vec<_>>();

    view! {
        <span class="column-menu">
            <button class="btn column-menu__toggle" on:click=move |_| open.update(|o| *o = !*o)>
                "Columns"
            </button>
            <Show when=move || open.get()>
                <div class="column-menu__list">
                    {choices
                        .iter()
                        .map(|def| {
                            let id = def.id;
                            view! {
                                <label class="column-menu__item">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || {
                                            !hidden.get().iter().any(|h| h == id)
                                        }
                                        on:change=move |_| on_toggle.run(id.to_owned())
                                    />
                                    {def.header}
                                </label>
                            }
                        })
                        .collect::<Vec<_>>()}
                </div>
            </Show>
        </span>
    }
}
