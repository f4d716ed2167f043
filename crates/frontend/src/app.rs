use crate::domain::a001_invoice::ui::page::InvoicesPage;
use crate::shared::config::AppConfig;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Backend location, registry and timings for the whole app
    let config = AppConfig::load();
    log::debug!("API base: {:?}", config.api_base);
    provide_context(config);

    view! {
        <header class="app-header">
            <h1>"Factur-X"</h1>
            <span class="app-subtitle">"Generation et import de factures electroniques"</span>
        </header>
        <InvoicesPage />
    }
}
