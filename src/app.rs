//! Application state and core logic

use crate::config::QuoteConfig;
use crate::error::{QuoteError, SubmitError, UploadError};
use crate::platform::{COPY_KEY, COPY_MODIFIER};
use crate::services::{HttpPhotoUploader, PhotoUploader, QuoteSubmitter, SimulatedSubmitter};
use crate::state::{
    ChangeOutcome, FieldId, FieldKind, FieldValue, PhotoFile, PhotoSession, QuoteController,
    UploadReceipt,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Which side of the screen receives key input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Form,
    Photos,
}

/// A row the form cursor can rest on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRow {
    Field(FieldId),
    Submit,
}

/// Result of a background operation, delivered back to the UI loop
#[derive(Debug)]
pub enum TaskResult {
    Submitted(Result<(), SubmitError>),
    Uploaded(Result<UploadReceipt, UploadError>),
}

/// Main application struct
pub struct App {
    pub controller: QuoteController,
    pub photos: PhotoSession,
    pub panel: Panel,
    /// Index into `form_rows()`
    pub active_row: usize,
    /// Paths typed into the photo panel
    pub photo_input: String,
    /// Index into staged photos followed by uploaded photos
    pub photo_cursor: usize,
    /// Validation message awaiting dismissal
    pub error_dialog: Option<String>,
    pub status_message: Option<String>,
    pub backend_url: String,
    submitter: Arc<dyn QuoteSubmitter>,
    uploader: Arc<dyn PhotoUploader>,
    tasks_tx: UnboundedSender<TaskResult>,
    tasks_rx: UnboundedReceiver<TaskResult>,
    quit: bool,
}

impl App {
    /// Create an App wired to the simulated submitter and the HTTP uploader
    pub fn new(config: &QuoteConfig) -> Result<Self> {
        let uploader = HttpPhotoUploader::new(&config.backend_url())?;
        let submitter = SimulatedSubmitter::new(config.submit_delay());
        Ok(Self::with_services(
            config,
            Arc::new(submitter),
            Arc::new(uploader),
        ))
    }

    pub fn with_services(
        config: &QuoteConfig,
        submitter: Arc<dyn QuoteSubmitter>,
        uploader: Arc<dyn PhotoUploader>,
    ) -> Self {
        let (tasks_tx, tasks_rx) = unbounded_channel();
        let photos = PhotoSession::new().with_callback(|photos| {
            let names: Vec<&str> = photos.iter().map(|p| p.original_name.as_str()).collect();
            tracing::info!(?names, "photos attached to quote request");
        });

        Self {
            controller: QuoteController::new(config.contact_email()),
            photos,
            panel: Panel::Form,
            active_row: 0,
            photo_input: String::new(),
            photo_cursor: 0,
            error_dialog: None,
            status_message: None,
            backend_url: config.backend_url(),
            submitter,
            uploader,
            tasks_tx,
            tasks_rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Rows of the form in display order, ending with the submit button
    pub fn form_rows(&self) -> Vec<FormRow> {
        let mut rows: Vec<FormRow> = self
            .controller
            .form()
            .visible_fields()
            .into_iter()
            .map(FormRow::Field)
            .collect();
        rows.push(FormRow::Submit);
        rows
    }

    pub fn active_form_row(&self) -> FormRow {
        let rows = self.form_rows();
        rows.get(self.active_row)
            .copied()
            .unwrap_or(FormRow::Submit)
    }

    /// Drain finished background operations without waiting
    pub fn poll_tasks(&mut self) {
        while let Ok(result) = self.tasks_rx.try_recv() {
            self.apply_task(result);
        }
    }

    /// Wait for the next background operation to finish
    #[cfg(test)]
    pub async fn wait_for_task(&mut self) {
        if let Some(result) = self.tasks_rx.recv().await {
            self.apply_task(result);
        }
    }

    fn apply_task(&mut self, result: TaskResult) {
        match result {
            TaskResult::Submitted(outcome) => {
                self.controller.finish_submit(outcome);
                if let Some(notice) = self.controller.notice() {
                    self.status_message = Some(notice.to_string());
                }
            }
            TaskResult::Uploaded(outcome) => {
                self.photos.finish_upload(outcome);
                self.clamp_photo_cursor();
            }
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.error_dialog.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.error_dialog = None;
            }
            return Ok(());
        }

        if self.controller.acknowledgment().is_some() {
            return self.handle_acknowledged_key(key);
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => {
                    self.submit();
                    return Ok(());
                }
                KeyCode::Char('u') => {
                    self.start_upload();
                    return Ok(());
                }
                KeyCode::Char('p') => {
                    self.panel = match self.panel {
                        Panel::Form => Panel::Photos,
                        Panel::Photos => Panel::Form,
                    };
                    return Ok(());
                }
                _ => {}
            }
        }

        match self.panel {
            Panel::Form => self.handle_form_key(key),
            Panel::Photos => self.handle_photo_key(key),
        }
        Ok(())
    }

    fn handle_acknowledged_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(COPY_MODIFIER) && key.code == KeyCode::Char(COPY_KEY) {
            self.copy_contact_email();
            return Ok(());
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char('n') => {
                if self.controller.reset() {
                    self.active_row = 0;
                    self.panel = Panel::Form;
                    self.status_message = None;
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
        Ok(())
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let row_count = self.form_rows().len();
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.active_row = (self.active_row + 1) % row_count;
                return;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.active_row = if self.active_row == 0 {
                    row_count - 1
                } else {
                    self.active_row - 1
                };
                return;
            }
            _ => {}
        }

        let field = match self.active_form_row() {
            FormRow::Submit => {
                if key.code == KeyCode::Enter {
                    self.submit();
                }
                return;
            }
            FormRow::Field(field) => field,
        };

        match field.kind() {
            FieldKind::Flag => {
                if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
                    let checked = self.controller.form().flag(field).unwrap_or(false);
                    self.change_field(field, FieldValue::Flag(!checked));
                }
            }
            FieldKind::Choice(options) => {
                let current = self.controller.form().text(field).unwrap_or_default();
                let position = options.iter().position(|o| *o == current);
                let next = match key.code {
                    KeyCode::Right | KeyCode::Char(' ') => {
                        Some(position.map_or(0, |i| (i + 1) % options.len()))
                    }
                    KeyCode::Left => Some(match position {
                        None | Some(0) => options.len() - 1,
                        Some(i) => i - 1,
                    }),
                    KeyCode::Enter => {
                        self.active_row = (self.active_row + 1) % row_count;
                        None
                    }
                    _ => None,
                };
                if let Some(index) = next {
                    self.change_field(field, FieldValue::text(options[index]));
                }
            }
            FieldKind::Text { multiline } => {
                let mut value = self
                    .controller
                    .form()
                    .text(field)
                    .unwrap_or_default()
                    .to_string();
                match key.code {
                    KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                        value.push(c)
                    }
                    KeyCode::Backspace => {
                        value.pop();
                    }
                    KeyCode::Enter if multiline => value.push('\n'),
                    KeyCode::Enter => {
                        self.active_row = (self.active_row + 1) % row_count;
                        return;
                    }
                    _ => return,
                }
                self.change_field(field, FieldValue::Text(value));
            }
        }
    }

    fn change_field(&mut self, field: FieldId, value: FieldValue) {
        match self.controller.on_field_change(field, value) {
            Ok(ChangeOutcome::Blocked) => {
                self.status_message =
                    Some("Regular cleaning is included while deep cleaning is selected".to_string());
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(error = %err, "field change rejected");
                self.status_message = Some(err.to_string());
            }
        }
        let last = self.form_rows().len() - 1;
        self.active_row = self.active_row.min(last);
    }

    fn handle_photo_key(&mut self, key: KeyEvent) {
        let total = self.photos.staged().len() + self.photos.uploaded().len();
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.photo_input.push(c)
            }
            KeyCode::Backspace => {
                self.photo_input.pop();
            }
            KeyCode::Enter => self.add_photo_paths(),
            KeyCode::Down if total > 0 => self.photo_cursor = (self.photo_cursor + 1) % total,
            KeyCode::Up if total > 0 => {
                self.photo_cursor = if self.photo_cursor == 0 {
                    total - 1
                } else {
                    self.photo_cursor - 1
                };
            }
            KeyCode::Delete => self.remove_selected_photo(),
            KeyCode::Esc => self.panel = Panel::Form,
            _ => {}
        }
    }

    /// Stage every path typed into the photo input
    fn add_photo_paths(&mut self) {
        let input = std::mem::take(&mut self.photo_input);
        let mut files = Vec::new();
        let mut unreadable = 0;

        for raw in split_paths(&input) {
            match PhotoFile::from_path(Path::new(&raw)) {
                Ok(file) => files.push(file),
                Err(err) => {
                    tracing::warn!(path = %raw, error = %err, "cannot stage photo");
                    unreadable += 1;
                }
            }
        }

        if files.is_empty() && unreadable == 0 {
            return;
        }
        self.photos.select_files(files);
        if unreadable > 0 {
            self.photos.note_skipped();
        }
    }

    fn remove_selected_photo(&mut self) {
        let staged = self.photos.staged().len();
        if self.photo_cursor < staged {
            let id = self.photos.staged()[self.photo_cursor].id;
            self.photos.remove_staged(id);
        } else {
            self.photos.remove_uploaded(self.photo_cursor - staged);
        }
        self.clamp_photo_cursor();
    }

    fn clamp_photo_cursor(&mut self) {
        let total = self.photos.staged().len() + self.photos.uploaded().len();
        self.photo_cursor = self.photo_cursor.min(total.saturating_sub(1));
    }

    /// Validate and send the quote request in the background
    fn submit(&mut self) {
        match self.controller.begin_submit() {
            Ok(payload) => {
                self.status_message = None;
                let submitter = Arc::clone(&self.submitter);
                let tx = self.tasks_tx.clone();
                let work = tokio::spawn(async move { submitter.submit(&payload).await });
                tokio::spawn(async move {
                    let outcome = work.await.unwrap_or_else(|err| {
                        tracing::error!(error = %err, "submission task failed");
                        Err(SubmitError(format!("submission interrupted: {err}")))
                    });
                    let _ = tx.send(TaskResult::Submitted(outcome));
                });
            }
            Err(QuoteError::Validation(err)) => {
                self.error_dialog = Some(err.to_string());
            }
            Err(err) => {
                tracing::debug!(error = %err, "submit refused");
            }
        }
    }

    /// Upload every staged photo in the background
    fn start_upload(&mut self) {
        let Some(files) = self.photos.begin_upload() else {
            return;
        };
        let uploader = Arc::clone(&self.uploader);
        let tx = self.tasks_tx.clone();
        let work = tokio::spawn(async move { uploader.upload(files).await });
        tokio::spawn(async move {
            let outcome = work.await.unwrap_or_else(|err| {
                tracing::error!(error = %err, "upload task failed");
                Err(UploadError::Interrupted(err.to_string()))
            });
            let _ = tx.send(TaskResult::Uploaded(outcome));
        });
    }

    fn copy_contact_email(&mut self) {
        let Some(ack) = self.controller.acknowledgment() else {
            return;
        };
        let email = ack.contact_email.clone();
        self.status_message = Some(match copy_to_clipboard(&email) {
            Ok(()) => format!("Copied {email}"),
            Err(err) => {
                tracing::warn!(error = %err, "clipboard unavailable");
                "Clipboard unavailable".to_string()
            }
        });
    }
}

/// Split typed input into paths, shell style.
///
/// Whitespace separates paths unless quoted ('...' or "...") or escaped with a
/// backslash, which is how terminals paste dropped files. A backslash before
/// any other character is kept, so Windows paths survive.
fn split_paths(input: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_token = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(c);
                in_token = true;
            }
            (None, '\\') => {
                match chars.next_if(|n| n.is_whitespace() || matches!(*n, '\'' | '"' | '\\')) {
                    Some(escaped) => current.push(escaped),
                    None => current.push('\\'),
                }
                in_token = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_token {
                    paths.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        paths.push(current);
    }
    paths
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    use arboard::Clipboard;
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}
