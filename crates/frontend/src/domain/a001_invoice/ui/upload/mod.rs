pub mod model;

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::domain::a001_invoice::api::StagedFile;
use crate::domain::a001_invoice::ui::page::view::notice_view;
use crate::domain::a001_invoice::ui::page::view_model::PageState;
use crate::domain::a001_invoice::ui::page::PageHandle;
use crate::shared::icons::icon;
use crate::shared::number_format::format_file_size;

async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Lecture du fichier impossible: {:?}", e))?;
    let array = js_sys::Uint8Array::new(&buffer);
    let mut bytes = vec![0; array.length() as usize];
    array.copy_to(&mut bytes);
    Ok(bytes)
}

/// Validates the name, then reads the content and stages it
fn stage_browser_file(page: PageHandle, file: web_sys::File) {
    let name = file.name();
    let Some(format) = page.with_value(|p| p.accept_file_name(&name)) else {
        return;
    };
    spawn_local(async move {
        match read_file_bytes(&file).await {
            Ok(bytes) => page.with_value(|p| {
                p.stage_file(StagedFile {
                    name,
                    size: file.size() as u64,
                    format,
                    bytes: Arc::from(bytes),
                })
            }),
            Err(e) => {
                log::error!("{}", e);
                page.with_value(|p| p.report_upload_error(e));
            }
        }
    });
}

#[component]
pub fn UploadPanel(page: PageHandle, state: RwSignal<PageState>) -> impl IntoView {
    let (drag_over, set_drag_over) = signal(false);
    let file_input = NodeRef::<leptos::html::Input>::new();

    let on_file_change = move |ev: web_sys::Event| {
        let input = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
        if let Some(input) = input {
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                stage_browser_file(page, file);
            }
            // picking the same file again must fire `change`
            input.set_value("");
        }
    };

    let on_upload = move |_| {
        let page = page.get_value();
        spawn_local(async move { page.upload().await });
    };

    view! {
        <div class="upload-section">
            <input
                type="file"
                accept=".pdf,.xml"
                class="hidden"
                node_ref=file_input
                on:change=on_file_change
            />

            {move || match state.with(|s| s.staged_file.clone()) {
                None => view! {
                    <div
                        class="upload-dropzone"
                        class:dragover=move || drag_over.get()
                        on:click=move |_| {
                            if let Some(input) = file_input.get() {
                                input.click();
                            }
                        }
                        on:dragover=move |ev: web_sys::DragEvent| {
                            ev.prevent_default();
                            ev.stop_propagation();
                            set_drag_over.set(true);
                        }
                        on:dragleave=move |ev: web_sys::DragEvent| {
                            ev.prevent_default();
                            ev.stop_propagation();
                            set_drag_over.set(false);
                        }
                        on:drop=move |ev: web_sys::DragEvent| {
                            ev.prevent_default();
                            ev.stop_propagation();
                            set_drag_over.set(false);
                            let file = ev
                                .data_transfer()
                                .and_then(|dt| dt.files())
                                .and_then(|files| files.get(0));
                            if let Some(file) = file {
                                stage_browser_file(page, file);
                            }
                        }
                    >
                        {icon("upload")}
                        <p class="upload-title">"Glissez-deposez votre facture ici"</p>
                        <p class="upload-hint">"ou cliquez pour choisir un fichier (PDF Factur-X ou XML)"</p>
                    </div>
                }.into_any(),
                Some(file) => view! {
                    <div class="file-preview">
                        <div class="file-info">
                            <span class="file-name">{file.name.clone()}</span>
                            <span class="file-size">{format_file_size(file.size)}</span>
                        </div>
                        <button
                            type="button"
                            class="btn-remove-file"
                            title="Retirer le fichier"
                            on:click=move |_| page.with_value(|p| p.clear_staged())
                        >
                            {icon("x")}
                        </button>
                    </div>
                }.into_any(),
            }}

            {move || notice_view(state.with(|s| s.upload_message.clone()))}

            <Button
                appearance=ButtonAppearance::Primary
                on_click=on_upload
                disabled=Signal::derive(move || !state.with(|s| s.can_upload()))
            >
                {move || if state.with(|s| s.uploading) {
                    view! { <Spinner /> " Import en cours..." }.into_any()
                } else {
                    view! { {icon("upload")} " Importer la facture" }.into_any()
                }}
            </Button>
        </div>
    }
}
