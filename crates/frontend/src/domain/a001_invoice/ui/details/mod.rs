pub mod model;

use contracts::domain::a001_invoice::DocumentFormat;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::model::{InvoiceDetail, PartyBlock};
use crate::domain::a001_invoice::ui::page::view_model::{delete_prompt, PageState};
use crate::domain::a001_invoice::ui::page::PageHandle;
use crate::shared::icons::icon;

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

fn party_view(party: PartyBlock) -> impl IntoView {
    view! {
        <div class="detail-section">
            <h4>{party.title}</h4>
            <div class="company-name">{party.name}</div>
            {party.address.map(|a| view! { <div class="address">{a}</div> })}
            {party.vat_id.map(|v| view! { <div class="tax-id">"TVA: " {v}</div> })}
        </div>
    }
}

/// Selected invoice with its actions
#[component]
pub fn InvoiceDetails(page: PageHandle, state: RwSignal<PageState>) -> impl IntoView {
    let download = move |format: DocumentFormat| {
        let page = page.get_value();
        spawn_local(async move { page.download(format).await });
    };

    let on_send = move |_| {
        let page = page.get_value();
        spawn_local(async move { page.send_current().await });
    };

    let on_delete = move |_| {
        let Some(id) = state.with(|s| s.current_invoice_id.clone()) else {
            return;
        };
        if !confirm(&delete_prompt(&id)) {
            return;
        }
        let page = page.get_value();
        spawn_local(async move { page.delete_current().await });
    };

    let detail = move || state.with(|s| s.current_invoice().map(InvoiceDetail::from_summary));

    view! {
        <div class="detail-view">
            <div class="detail-actions">
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| page.with_value(|p| p.show_form())
                >
                    {icon("back")}
                    " Retour"
                </Button>
                <div class="detail-actions__right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| download(DocumentFormat::Pdf)
                    >
                        {icon("download")}
                        " PDF"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| download(DocumentFormat::Xml)
                    >
                        {icon("download")}
                        " XML"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=on_send
                        disabled=Signal::derive(move || state.with(|s| s.sending))
                    >
                        {move || if state.with(|s| s.sending) {
                            view! { <Spinner /> " Envoi..." }.into_any()
                        } else {
                            view! { {icon("send")} " Envoyer" }.into_any()
                        }}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=on_delete
                        disabled=Signal::derive(move || state.with(|s| s.deleting))
                    >
                        {move || if state.with(|s| s.deleting) {
                            view! { <Spinner /> " Suppression..." }.into_any()
                        } else {
                            view! { {icon("delete")} " Supprimer" }.into_any()
                        }}
                    </Button>
                </div>
            </div>

            {move || match detail() {
                Some(d) => view! {
                    <div class="invoice-detail">
                        <div class="detail-header">
                            <div class="invoice-number">{d.id}</div>
                            <div class="invoice-date">"Date: " {d.date}</div>
                            {d.imported.then(|| view! { <span class="badge">"Importee"</span> })}
                        </div>
                        <div class="detail-body">
                            <div class="detail-grid">
                                {party_view(d.seller)}
                                {party_view(d.buyer)}
                            </div>
                            <div class="detail-totals">
                                <div class="total-row">
                                    <span class="label">"Total HT"</span>
                                    <span class="value">{d.total_ht}</span>
                                </div>
                                <div class="total-row">
                                    <span class="label">"TVA"</span>
                                    <span class="value">{d.vat}</span>
                                </div>
                                <div class="total-row grand-total">
                                    <span class="label">"Total TTC"</span>
                                    <span class="value">{d.total_ttc}</span>
                                </div>
                            </div>
                        </div>
                    </div>
                }.into_any(),
                None => view! { <div class="empty-state">"Facture introuvable"</div> }.into_any(),
            }}
        </div>
    }
}
