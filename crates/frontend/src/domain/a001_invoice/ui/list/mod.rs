pub mod state;

use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::state::build_rows;
use crate::domain::a001_invoice::ui::page::view_model::PageState;
use crate::domain::a001_invoice::ui::page::PageHandle;
use crate::shared::icons::icon;

/// Sidebar with generated and imported invoices, newest first
#[component]
pub fn InvoiceList(page: PageHandle, state: RwSignal<PageState>) -> impl IntoView {
    let on_refresh = move |_| {
        let page = page.get_value();
        spawn_local(async move { page.refresh().await });
    };

    let rows = move || state.with(build_rows);

    view! {
        <aside class="sidebar">
            <div class="sidebar-header">
                <h2>{icon("invoices")} " Factures"</h2>
                <div class="sidebar-actions">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| page.with_value(|p| p.show_form())
                    >
                        {icon("plus")}
                        " Nouvelle"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=on_refresh
                        disabled=Signal::derive(move || state.with(|s| s.loading))
                    >
                        {icon("refresh")}
                    </Button>
                </div>
            </div>

            <div class="invoice-list">
                <For
                    each=rows
                    key=|row| row.clone()
                    children=move |row| {
                        let id = row.id.clone();
                        view! {
                            <div
                                class="invoice-list-item"
                                class:active=row.active
                                on:click=move |_| {
                                    page.with_value(|p| p.show_detail(&id));
                                }
                            >
                                <div class="invoice-id">{row.id}</div>
                                <div class="invoice-meta">
                                    <span>{row.date}</span>
                                    <span class="invoice-amount">{row.amount}</span>
                                </div>
                            </div>
                        }
                    }
                />
                <Show when=move || state.with(|s| s.invoices.is_empty())>
                    <p class="no-invoices">"Aucune facture"</p>
                </Show>
            </div>
        </aside>
    }
}
