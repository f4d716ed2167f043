pub mod state;

use std::rc::{Rc, Weak};

use contracts::domain::a002_company::CompanyFill;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use self::state::{SearchBox, SearchRequest, SearchState};
use crate::domain::a002_company::api::{CompanyDirectory, RegistryDirectory};
use crate::shared::config::AppConfig;
use crate::shared::timer::BrowserScheduler;

/// Search box wired to the public registry. Responses are reported back
/// through a weak reference so a dropped box ignores late answers.
fn create_search_box(config: &AppConfig) -> Rc<SearchBox> {
    let directory = Rc::new(RegistryDirectory::new(config));
    let delay_ms = config.search_debounce_ms;
    let min_chars = config.company_search_min_chars;

    Rc::new_cyclic(|weak: &Weak<SearchBox>| {
        let weak = weak.clone();
        SearchBox::new(
            Rc::new(BrowserScheduler),
            delay_ms,
            min_chars,
            move |request: SearchRequest| {
                let weak = weak.clone();
                let directory = directory.clone();
                spawn_local(async move {
                    let outcome = directory.search(&request.query).await;
                    let Some(search) = weak.upgrade() else {
                        return;
                    };
                    match outcome {
                        Ok(results) => {
                            search.on_results(request.generation, results);
                        }
                        Err(e) => search.on_failure(request.generation, &e),
                    }
                });
            },
        )
    })
}

#[component]
pub fn CompanySearchField(
    #[prop(into)] placeholder: String,
    /// Receives the fields of the picked company
    on_pick: Callback<CompanyFill>,
) -> impl IntoView {
    let config = use_context::<AppConfig>().unwrap_or_default();
    let search = create_search_box(&config);

    let snapshot = RwSignal::new(SearchState::default());
    search.state().subscribe(move |s| snapshot.set(s.clone()));
    let search = StoredValue::new_local(search);

    let wrapper = NodeRef::<leptos::html::Div>::new();

    // click outside collapses the dropdown
    let handle = window_event_listener(leptos::ev::click, move |ev| {
        let target = ev.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
        let inside = match (wrapper.get_untracked(), target) {
            (Some(el), Some(target)) => el.contains(Some(&target)),
            _ => false,
        };
        if !inside {
            search.with_value(|s| s.dismiss());
        }
    });
    on_cleanup(move || handle.remove());

    view! {
        <div class="search-wrapper" node_ref=wrapper>
            <input
                type="text"
                class="search-input"
                placeholder=placeholder
                autocomplete="off"
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    search.with_value(|s| s.on_input(&value));
                }
            />
            <div
                class="search-results"
                class:hidden=move || !snapshot.with(|s| s.is_open())
            >
                {move || snapshot.with(|s| {
                    s.results()
                        .iter()
                        .enumerate()
                        .map(|(index, company)| {
                            let label = company.display_label();
                            view! {
                                <div
                                    class="search-result-item"
                                    on:click=move |_| {
                                        if let Some(company) = search.with_value(|s| s.select(index)) {
                                            on_pick.run(company.to_fill());
                                        }
                                    }
                                >
                                    {label}
                                </div>
                            }
                        })
                        .collect_view()
                })}
            </div>
        </div>
    }
}
