//! Page controller for the invoices screen
//!
//! `InvoicePage` owns the whole screen state (list, selection, panels,
//! message areas, staged upload) in an [`Observable`]. Components call its
//! commands and mirror the published snapshots into signals.

use std::rc::Rc;

use contracts::domain::a001_invoice::{sort_newest_first, DocumentFormat, InvoiceSummary};

use crate::domain::a001_invoice::api::{InvoiceApi, StagedFile};
use crate::domain::a001_invoice::ui::form::model::InvoiceForm;
use crate::domain::a001_invoice::ui::upload::model::check_file_name;
use crate::shared::config::AppConfig;
use crate::shared::download::FileSaver;
use crate::shared::observable::Observable;
use crate::shared::timer::Scheduler;

/// Right-hand panel; exactly one is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Form,
    Detail,
}

/// Content of the form panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Create,
    Upload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn css_class(self) -> &'static str {
        match self {
            NoticeKind::Success => "message success",
            NoticeKind::Error => "message error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    /// Identifies this notice so a stale dismiss timer can't hide a newer one
    pub id: u64,
    pub kind: NoticeKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessageArea {
    Page,
    Upload,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageState {
    pub panel: Panel,
    pub mode: Mode,
    /// Newest first
    pub invoices: Vec<InvoiceSummary>,
    pub current_invoice_id: Option<String>,
    pub message: Option<Notice>,
    pub upload_message: Option<Notice>,
    pub staged_file: Option<StagedFile>,
    pub loading: bool,
    pub submitting: bool,
    pub sending: bool,
    pub deleting: bool,
    pub uploading: bool,
    next_notice_id: u64,
}

impl PageState {
    pub fn current_invoice(&self) -> Option<&InvoiceSummary> {
        let id = self.current_invoice_id.as_deref()?;
        self.invoices.iter().find(|inv| inv.id == id)
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.current_invoice_id.as_deref() == Some(id)
    }

    pub fn can_upload(&self) -> bool {
        self.staged_file.is_some() && !self.uploading
    }

    fn slot(&mut self, area: MessageArea) -> &mut Option<Notice> {
        match area {
            MessageArea::Page => &mut self.message,
            MessageArea::Upload => &mut self.upload_message,
        }
    }
}

/// Browser confirmation shown before a delete
pub fn delete_prompt(id: &str) -> String {
    format!("Etes-vous sur de vouloir supprimer la facture {} ?", id)
}

pub struct InvoicePage<A> {
    api: Rc<A>,
    saver: Rc<dyn FileSaver>,
    scheduler: Rc<dyn Scheduler>,
    config: Rc<AppConfig>,
    state: Rc<Observable<PageState>>,
}

impl<A> Clone for InvoicePage<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            saver: self.saver.clone(),
            scheduler: self.scheduler.clone(),
            config: self.config.clone(),
            state: self.state.clone(),
        }
    }
}

impl<A: InvoiceApi + 'static> InvoicePage<A> {
    pub fn new(
        api: Rc<A>,
        saver: Rc<dyn FileSaver>,
        scheduler: Rc<dyn Scheduler>,
        config: AppConfig,
    ) -> Self {
        Self {
            api,
            saver,
            scheduler,
            config: Rc::new(config),
            state: Rc::new(Observable::new(PageState::default())),
        }
    }

    pub fn state(&self) -> Rc<Observable<PageState>> {
        self.state.clone()
    }

    pub fn snapshot(&self) -> PageState {
        self.state.get()
    }

    // ========================================================================
    // Messages
    // ========================================================================

    /// Shows an error in the page message area
    pub fn report_error(&self, text: impl Into<String>) {
        self.notify(MessageArea::Page, NoticeKind::Error, text.into());
    }

    /// Shows an error in the upload panel
    pub fn report_upload_error(&self, text: impl Into<String>) {
        self.notify(MessageArea::Upload, NoticeKind::Error, text.into());
    }

    fn notify(&self, area: MessageArea, kind: NoticeKind, text: String) {
        let id = self.state.update(|s| {
            s.next_notice_id += 1;
            let id = s.next_notice_id;
            *s.slot(area) = Some(Notice { id, kind, text });
            id
        });

        if kind == NoticeKind::Success {
            let state = self.state.clone();
            self.scheduler.schedule(
                self.config.success_dismiss_ms,
                Box::new(move || {
                    state.update(|s| {
                        let slot = s.slot(area);
                        if slot.as_ref().map(|n| n.id) == Some(id) {
                            *slot = None;
                        }
                    });
                }),
            );
        }
    }

    fn clear_message(&self, area: MessageArea) {
        if self.state.with(|s| match area {
            MessageArea::Page => s.message.is_some(),
            MessageArea::Upload => s.upload_message.is_some(),
        }) {
            self.state.update(|s| *s.slot(area) = None);
        }
    }

    // ========================================================================
    // List and detail
    // ========================================================================

    /// Reloads summaries. Failures are logged and keep the current list.
    pub async fn refresh(&self) {
        self.state.update(|s| s.loading = true);
        match self.api.list_invoices().await {
            Ok(mut invoices) => {
                sort_newest_first(&mut invoices);
                log::debug!("Loaded {} invoices", invoices.len());
                self.state.update(|s| {
                    s.invoices = invoices;
                    s.loading = false;
                });
            }
            Err(e) => {
                log::error!("Failed to fetch invoices: {}", e);
                self.state.update(|s| s.loading = false);
            }
        }
    }

    /// "New invoice" and "back to list"
    pub fn show_form(&self) {
        self.state.update(|s| {
            s.panel = Panel::Form;
            s.current_invoice_id = None;
        });
    }

    /// Opens a cached invoice. Unknown ids are ignored.
    pub fn show_detail(&self, id: &str) -> bool {
        let known = self.state.with(|s| s.invoices.iter().any(|inv| inv.id == id));
        if !known {
            log::warn!("Invoice {} is not in the list", id);
            return false;
        }
        self.state.update(|s| {
            s.current_invoice_id = Some(id.to_string());
            s.panel = Panel::Detail;
        });
        true
    }

    fn current_id(&self) -> Option<String> {
        self.state.with(|s| s.current_invoice_id.clone())
    }

    // ========================================================================
    // Commands on the backend
    // ========================================================================

    /// Generates the invoice, saves the returned PDF, then reloads the list
    pub async fn submit(&self, form: &InvoiceForm) {
        if self.state.with(|s| s.submitting) {
            return;
        }
        self.clear_message(MessageArea::Page);
        self.state.update(|s| s.submitting = true);

        let draft = form.to_draft();
        let outcome = match self.api.create_invoice(&draft).await {
            Ok(bytes) => self.saver.save(
                &bytes,
                &draft.pdf_file_name(),
                DocumentFormat::Pdf.mime_type(),
            ),
            Err(e) => Err(e.to_string()),
        };

        self.state.update(|s| s.submitting = false);
        match outcome {
            Ok(()) => self.notify(
                MessageArea::Page,
                NoticeKind::Success,
                "Facture generee avec succes !".to_string(),
            ),
            Err(e) => {
                log::error!("Invoice generation failed: {}", e);
                self.report_error(format!("Erreur lors de la generation : {}", e));
            }
        }

        self.refresh().await;
    }

    pub async fn download(&self, format: DocumentFormat) {
        let Some(id) = self.current_id() else {
            return;
        };
        self.clear_message(MessageArea::Page);

        let outcome = match self.api.fetch_document(&id, format).await {
            Ok(bytes) => self
                .saver
                .save(&bytes, &format.file_name_for(&id), format.mime_type()),
            Err(e) => Err(e.to_string()),
        };
        match outcome {
            Ok(()) => log::debug!("Downloaded {} as {}", id, format.label()),
            Err(e) => {
                log::error!("Download of {} failed: {}", id, e);
                self.report_error(format!("Erreur de telechargement: {}", e));
            }
        }
    }

    pub async fn send_current(&self) {
        let Some(id) = self.current_id() else {
            return;
        };
        if self.state.with(|s| s.sending) {
            return;
        }
        self.clear_message(MessageArea::Page);
        self.state.update(|s| s.sending = true);

        let result = self.api.send_invoice(&id).await;
        self.state.update(|s| s.sending = false);
        match result {
            Ok(()) => self.notify(
                MessageArea::Page,
                NoticeKind::Success,
                "Facture envoyee avec succes !".to_string(),
            ),
            Err(e) => self.report_error(format!("Erreur d'envoi: {}", e)),
        }
    }

    /// Deletes the selected invoice; the caller asks for confirmation first
    pub async fn delete_current(&self) {
        let Some(id) = self.current_id() else {
            return;
        };
        if self.state.with(|s| s.deleting) {
            return;
        }
        self.clear_message(MessageArea::Page);
        self.state.update(|s| s.deleting = true);

        let result = self.api.delete_invoice(&id).await;
        self.state.update(|s| s.deleting = false);
        match result {
            Ok(()) => {
                self.notify(
                    MessageArea::Page,
                    NoticeKind::Success,
                    "Facture supprimee avec succes !".to_string(),
                );
                self.show_form();
                self.refresh().await;
            }
            Err(e) => self.report_error(format!("Erreur de suppression: {}", e)),
        }
    }

    // ========================================================================
    // Upload
    // ========================================================================

    pub fn switch_mode(&self, mode: Mode) {
        self.state.update(|s| {
            s.mode = mode;
            s.message = None;
            s.upload_message = None;
        });
    }

    /// Checks a picked or dropped file name before its content is read.
    /// A rejected file leaves any staged file in place.
    pub fn accept_file_name(&self, name: &str) -> Option<DocumentFormat> {
        match check_file_name(name) {
            Ok(format) => Some(format),
            Err(e) => {
                log::warn!("Rejected file {}: {}", name, e);
                self.report_upload_error(e.to_string());
                None
            }
        }
    }

    pub fn stage_file(&self, file: StagedFile) {
        log::debug!("Staged {} ({} bytes)", file.name, file.size);
        self.state.update(|s| {
            s.staged_file = Some(file);
            s.upload_message = None;
        });
    }

    pub fn clear_staged(&self) {
        self.state.update(|s| s.staged_file = None);
    }

    /// Drops the staged file only if it is still the one that was sent
    fn release_uploaded(&self, sent: &StagedFile) {
        self.state.update(|s| {
            let same = s
                .staged_file
                .as_ref()
                .is_some_and(|f| f.name == sent.name && f.size == sent.size);
            if same {
                s.staged_file = None;
            }
        });
    }

    /// Posts the staged file. On success the list is reloaded and the
    /// imported invoice opens after the navigation delay.
    pub async fn upload(&self) {
        let Some(file) = self
            .state
            .with(|s| if s.uploading { None } else { s.staged_file.clone() })
        else {
            return;
        };
        self.clear_message(MessageArea::Upload);
        self.state.update(|s| s.uploading = true);

        let result = self.api.upload_invoice(&file).await;
        self.state.update(|s| s.uploading = false);

        match result {
            Ok(uploaded) => {
                self.notify(
                    MessageArea::Upload,
                    NoticeKind::Success,
                    format!("Facture {} importee avec succes !", uploaded.id),
                );
                self.release_uploaded(&file);
                self.refresh().await;

                let page = self.clone();
                let id = uploaded.id;
                self.scheduler.schedule(
                    self.config.post_upload_navigation_ms,
                    Box::new(move || {
                        page.show_detail(&id);
                    }),
                );
            }
            Err(e) => {
                log::error!("Upload error: {}", e);
                self.report_upload_error(format!("Erreur lors de l'import: {}", e));
            }
        }
    }
}
