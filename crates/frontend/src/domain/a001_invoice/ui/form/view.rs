use contracts::domain::a002_company::CompanyFill;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::model::{
    InvoiceForm, LineItemColumn, LineItemRow, PartyForm, PartyRole, LINE_ITEM_COLUMNS,
};
use crate::domain::a001_invoice::ui::page::view_model::PageState;
use crate::domain::a001_invoice::ui::page::PageHandle;
use crate::domain::a002_company::ui::search::CompanySearchField;
use crate::shared::icons::icon;

/// UNTDID 4461 payment means offered in the form
const PAYMENT_MODES: &[(&str, &str)] = &[
    ("58", "Virement SEPA"),
    ("30", "Virement"),
    ("49", "Prelevement"),
    ("48", "Carte bancaire"),
    ("10", "Especes"),
];

#[component]
fn FormSection(title: &'static str, children: Children) -> impl IntoView {
    let collapsed = RwSignal::new(false);
    view! {
        <section class="form-section" class:collapsed=move || collapsed.get()>
            <div class="section-header" on:click=move |_| collapsed.update(|c| *c = !*c)>
                <h3>{title}</h3>
                {move || if collapsed.get() { icon("chevron-right") } else { icon("chevron-down") }}
            </div>
            <div class="section-body">{children()}</div>
        </section>
    }
}

fn text_field(
    label: &'static str,
    input_type: &'static str,
    required: bool,
    value: Signal<String>,
    on_input: impl Fn(String) + 'static,
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">{label}</label>
            <input
                class="form__input"
                type=input_type
                required=required
                prop:value=move || value.get()
                on:input=move |ev| on_input(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
fn PartyFields(form: RwSignal<InvoiceForm>, role: PartyRole) -> impl IntoView {
    let field = move |label: &'static str,
                      required: bool,
                      get: fn(&PartyForm) -> &String,
                      set: fn(&mut PartyForm) -> &mut String| {
        text_field(
            label,
            "text",
            required,
            Signal::derive(move || form.with(|f| get(f.party(role)).clone())),
            move |v| form.update(|f| *set(f.party_mut(role)) = v),
        )
    };

    let on_pick = Callback::new(move |fill: CompanyFill| {
        form.update(|f| f.party_mut(role).apply_fill(&fill, role));
    });

    view! {
        <CompanySearchField
            placeholder="Rechercher une entreprise (nom, SIREN...)"
            on_pick=on_pick
        />
        <div class="form-grid">
            {field("Raison sociale", true, |p| &p.name, |p| &mut p.name)}
            {role.has_siret().then(|| field("SIRET", false, |p| &p.siret, |p| &mut p.siret))}
            {field("N° TVA", false, |p| &p.vat_id, |p| &mut p.vat_id)}
            {field("Adresse", true, |p| &p.street, |p| &mut p.street)}
            {field("Code postal", true, |p| &p.zip_code, |p| &mut p.zip_code)}
            {field("Ville", true, |p| &p.city, |p| &mut p.city)}
            {field("Pays", true, |p| &p.country_code, |p| &mut p.country_code)}
            {role.has_siret().then(|| field("Email", false, |p| &p.email, |p| &mut p.email))}
        </div>
    }
}

fn row_value(form: RwSignal<InvoiceForm>, key: u64, get: fn(&LineItemRow) -> &String) -> String {
    form.with(|f| {
        f.items
            .rows()
            .iter()
            .find(|r| r.key == key)
            .map(|r| get(r).clone())
            .unwrap_or_default()
    })
}

#[component]
fn LineItemsEditor(page: PageHandle, form: RwSignal<InvoiceForm>) -> impl IntoView {
    let cell = move |key: u64, column: LineItemColumn| {
        let LineItemColumn { get, set, .. } = column;
        view! {
            <input
                class=format!("form__input {}", column.class)
                type=column.input_type
                step=column.step()
                placeholder=column.placeholder
                prop:value=move || row_value(form, key, get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| f.items.update(key, |r| *set(r) = value));
                }
            />
        }
    };

    let remove = move |key: u64| {
        let result = form
            .try_update(|f| f.items.remove_item(key))
            .unwrap_or(Ok(()));
        if let Err(e) = result {
            page.with_value(|p| p.report_error(e.to_string()));
        }
    };

    view! {
        <div class="items-container">
            <For
                each=move || form.with(|f| f.items.rows().to_vec())
                key=|row| row.key
                children=move |row| {
                    let key = row.key;
                    view! {
                        <div class="line-item">
                            {LINE_ITEM_COLUMNS
                                .into_iter()
                                .map(|column| cell(key, column))
                                .collect_view()}
                            <button
                                type="button"
                                class="btn-remove-item"
                                title="Supprimer la ligne"
                                on:click=move |_| remove(key)
                            >
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
        <Button
            appearance=ButtonAppearance::Subtle
            on_click=move |_| {
                form.update(|f| {
                    f.items.add_item();
                });
            }
        >
            {icon("plus")}
            " Ajouter une ligne"
        </Button>
    }
}

/// Invoice creation form
#[component]
pub fn InvoiceFormView(
    page: PageHandle,
    state: RwSignal<PageState>,
    form: RwSignal<InvoiceForm>,
) -> impl IntoView {
    let plain = move |label: &'static str,
                      input_type: &'static str,
                      required: bool,
                      get: fn(&InvoiceForm) -> &String,
                      set: fn(&mut InvoiceForm) -> &mut String| {
        text_field(
            label,
            input_type,
            required,
            Signal::derive(move || form.with(|f| get(f).clone())),
            move |v| form.update(|f| *set(f) = v),
        )
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let snapshot = form.get_untracked();
        let page = page.get_value();
        spawn_local(async move { page.submit(&snapshot).await });
    };

    view! {
        <form class="invoice-form" on:submit=on_submit>
            <FormSection title="Informations generales">
                <div class="form-grid">
                    {plain("N° de facture", "text", true, |f| &f.invoice_number, |f| &mut f.invoice_number)}
                    {plain("Date", "date", true, |f| &f.date, |f| &mut f.date)}
                </div>
            </FormSection>

            <FormSection title={PartyRole::Seller.title()}>
                <PartyFields form=form role=PartyRole::Seller />
            </FormSection>

            <FormSection title={PartyRole::Buyer.title()}>
                <PartyFields form=form role=PartyRole::Buyer />
            </FormSection>

            <FormSection title="Lignes de facture">
                <LineItemsEditor page=page form=form />
            </FormSection>

            <FormSection title="Paiement">
                <div class="form-grid">
                    {plain("IBAN", "text", false, |f| &f.payment_iban, |f| &mut f.payment_iban)}
                    <div class="form__group">
                        <label class="form__label">"Mode de paiement"</label>
                        <select
                            class="form__select"
                            prop:value=move || form.with(|f| f.payment_mode.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.payment_mode = value);
                            }
                        >
                            {PAYMENT_MODES
                                .iter()
                                .map(|(code, label)| {
                                    view! {
                                        <option
                                            value={*code}
                                            selected=move || form.with(|f| f.payment_mode == *code)
                                        >
                                            {*label}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </div>
                </div>
            </FormSection>

            <FormSection title="References">
                <div class="form-grid">
                    {plain("Reference acheteur", "text", false, |f| &f.buyer_reference, |f| &mut f.buyer_reference)}
                    {plain("N° de commande", "text", false, |f| &f.order_reference, |f| &mut f.order_reference)}
                </div>
            </FormSection>

            <div class="form-actions">
                <button
                    type="submit"
                    class="button button--primary"
                    disabled=move || state.with(|s| s.submitting)
                >
                    {move || if state.with(|s| s.submitting) {
                        view! { <Spinner /> " Generation..." }.into_any()
                    } else {
                        view! { {icon("invoices")} " Generer la facture" }.into_any()
                    }}
                </button>
            </div>
        </form>
    }
}
