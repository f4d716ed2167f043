use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::view_model::{InvoicePage, Mode, Notice, Panel};
use crate::domain::a001_invoice::api::HttpInvoiceApi;
use crate::domain::a001_invoice::ui::details::InvoiceDetails;
use crate::domain::a001_invoice::ui::form::model::InvoiceForm;
use crate::domain::a001_invoice::ui::form::InvoiceFormView;
use crate::domain::a001_invoice::ui::list::InvoiceList;
use crate::domain::a001_invoice::ui::upload::UploadPanel;
use crate::shared::config::AppConfig;
use crate::shared::date_utils::today_iso;
use crate::shared::download::BrowserFileSaver;
use crate::shared::timer::BrowserScheduler;

pub(crate) fn notice_view(notice: Option<Notice>) -> impl IntoView {
    notice.map(|n| view! { <div class=n.kind.css_class()>{n.text}</div> })
}

/// Invoice list, creation/import form and detail panel
#[component]
pub fn InvoicesPage() -> impl IntoView {
    let config = use_context::<AppConfig>().unwrap_or_default();

    let controller = InvoicePage::new(
        Rc::new(HttpInvoiceApi::new(config.clone())),
        Rc::new(BrowserFileSaver),
        Rc::new(BrowserScheduler),
        config.clone(),
    );
    let state = RwSignal::new(controller.snapshot());
    controller.state().subscribe(move |s| state.set(s.clone()));
    let page = StoredValue::new_local(controller);

    let form = RwSignal::new(InvoiceForm::new(&config, today_iso()));

    // initial load
    Effect::new(move |_| {
        let page = page.get_value();
        spawn_local(async move { page.refresh().await });
    });

    let mode_is = move |mode: Mode| state.with(|s| s.mode == mode);
    let panel_is = move |panel: Panel| state.with(|s| s.panel == panel);

    view! {
        <div class="app-layout">
            <InvoiceList page=page state=state />

            <main class="main-content">
                {move || notice_view(state.with(|s| s.message.clone()))}

                <div class="view form-view" class:hidden=move || !panel_is(Panel::Form)>
                    <div class="mode-toggle">
                        <button
                            type="button"
                            class="mode-btn"
                            class:active=move || mode_is(Mode::Create)
                            on:click=move |_| page.with_value(|p| p.switch_mode(Mode::Create))
                        >
                            "Creer une facture"
                        </button>
                        <button
                            type="button"
                            class="mode-btn"
                            class:active=move || mode_is(Mode::Upload)
                            on:click=move |_| page.with_value(|p| p.switch_mode(Mode::Upload))
                        >
                            "Importer une facture"
                        </button>
                    </div>

                    <div class:hidden=move || !mode_is(Mode::Create)>
                        <InvoiceFormView page=page state=state form=form />
                    </div>
                    <div class:hidden=move || !mode_is(Mode::Upload)>
                        <UploadPanel page=page state=state />
                    </div>
                </div>

                <Show when=move || panel_is(Panel::Detail)>
                    <InvoiceDetails page=page state=state />
                </Show>
            </main>
        </div>
    }
}

