//! Application shell: router, meta context, and global capability state.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

use crate::pages::traces::TracesPage;
use crate::state::capability::CapabilityState;

/// Project shown when none is named in the URL.
pub const DEFAULT_PROJECT: &str = "demo";

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Delete capability is global (token-based, not per-project); fetch it
    // once and let pages read it from context.
    let capability = RwSignal::new(CapabilityState::default());
    provide_context(capability);
    fetch_capabilities(capability);

    view! {
        <Title text="TraceDeck"/>
        <Router>
            <main class="app">
                <Routes fallback=|| view! { <p class="app__not-found">"Not found."</p> }>
                    <Route
                        path=path!("/")
                        view=|| view! { <Redirect path=format!("/p/{DEFAULT_PROJECT}/traces")/> }
                    />
                    <Route path=path!("/p/:project_id/traces") view=TracesPage/>
                </Routes>
            </main>
        </Router>
    }
}

fn fetch_capabilities(capability: RwSignal<CapabilityState>) {
    #[cfg(feature = "csr")]
    {
        leptos::task::spawn_local(async move {
            let can_delete = crate::net::api::fetch_capabilities().await;
            capability.set(CapabilityState { can_delete, loaded: true });
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = capability;
    }
}
