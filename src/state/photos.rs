//! Photo staging and upload session
//!
//! Selected photos are staged locally with a preview handle, then sent in a
//! single batch. Preview handles are released when their staged record is
//! dropped, which happens on removal and after a successful upload.

use crate::error::UploadError;
use crate::services::PhotoUploader;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use uuid::Uuid;

/// Largest accepted photo, in bytes
pub const MAX_PHOTO_BYTES: u64 = 10 * 1024 * 1024;

/// A file picked by the user, before filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoFile {
    pub path: PathBuf,
    pub name: String,
    pub content_type: String,
    pub size: u64,
}

impl PhotoFile {
    /// Stat a file on disk and infer its content type from the extension
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a file"));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            path: path.to_path_buf(),
            name,
            content_type: content_type_for(path).to_string(),
            size: metadata.len(),
        })
    }

    fn is_accepted(&self) -> bool {
        self.content_type.starts_with("image/") && self.size <= MAX_PHOTO_BYTES
    }
}

/// Content type guessed from a file extension
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Server-confirmed record of an uploaded photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedPhoto {
    /// Path relative to the backend URL
    pub url: String,
    pub original_name: String,
    pub size: u64,
}

impl UploadedPhoto {
    pub fn absolute_url(&self, backend_url: &str) -> String {
        format!(
            "{}/{}",
            backend_url.trim_end_matches('/'),
            self.url.trim_start_matches('/')
        )
    }
}

/// Successful response of the upload endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub uploaded_files: Vec<UploadedPhoto>,
    pub total_uploaded: usize,
}

/// Tracks live preview URIs
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    live: Arc<Mutex<HashSet<String>>>,
}

impl PreviewRegistry {
    fn acquire(&self, id: Uuid) -> PreviewHandle {
        let uri = format!("blob:quote-tui/{id}");
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(uri.clone());
        PreviewHandle {
            uri,
            registry: self.clone(),
        }
    }

    fn release(&self, uri: &str) {
        let removed = self
            .live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(uri);
        if !removed {
            tracing::warn!(%uri, "preview released twice");
        }
    }

    #[cfg(test)]
    pub fn is_live(&self, uri: &str) -> bool {
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(uri)
    }

    #[cfg(test)]
    pub fn live_count(&self) -> usize {
        self.live.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// A preview URI owned by one staged photo; released on drop
#[derive(Debug)]
pub struct PreviewHandle {
    uri: String,
    registry: PreviewRegistry,
}

impl PreviewHandle {
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.registry.release(&self.uri);
    }
}

/// A selected photo waiting to be uploaded
#[derive(Debug)]
pub struct StagedPhoto {
    pub id: Uuid,
    pub file: PhotoFile,
    preview: PreviewHandle,
}

impl StagedPhoto {
    pub fn name(&self) -> &str {
        &self.file.name
    }

    pub fn size(&self) -> u64 {
        self.file.size
    }

    pub fn preview_uri(&self) -> &str {
        self.preview.uri()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Warning,
    Error,
    Success,
}

/// Feedback from the most recent photo operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadStatus {
    pub kind: StatusKind,
    pub message: String,
}

impl UploadStatus {
    fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

type UploadedCallback = Box<dyn Fn(&[UploadedPhoto]) + Send + Sync>;

/// Staged photos, uploaded photos and upload feedback
#[derive(Default)]
pub struct PhotoSession {
    staged: Vec<StagedPhoto>,
    uploaded: Vec<UploadedPhoto>,
    status: Option<UploadStatus>,
    uploading: bool,
    /// Ids sent in the upload currently in flight
    in_flight: Vec<Uuid>,
    previews: PreviewRegistry,
    on_photos_uploaded: Option<UploadedCallback>,
}

impl fmt::Debug for PhotoSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoSession")
            .field("staged", &self.staged)
            .field("uploaded", &self.uploaded)
            .field("status", &self.status)
            .field("uploading", &self.uploading)
            .finish_non_exhaustive()
    }
}

impl PhotoSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notify `callback` with the descriptors of every successful upload batch
    pub fn with_callback(
        mut self,
        callback: impl Fn(&[UploadedPhoto]) + Send + Sync + 'static,
    ) -> Self {
        self.on_photos_uploaded = Some(Box::new(callback));
        self
    }

    pub fn staged(&self) -> &[StagedPhoto] {
        &self.staged
    }

    pub fn uploaded(&self) -> &[UploadedPhoto] {
        &self.uploaded
    }

    pub fn status(&self) -> Option<&UploadStatus> {
        self.status.as_ref()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    #[cfg(test)]
    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    /// Stage every image up to 10 MiB; anything else is dropped with a warning.
    ///
    /// Returns the number of photos staged. Repeated selections accumulate.
    pub fn select_files(&mut self, files: Vec<PhotoFile>) -> usize {
        let offered = files.len();
        let accepted: Vec<PhotoFile> = files.into_iter().filter(PhotoFile::is_accepted).collect();

        if accepted.len() != offered {
            self.note_skipped();
        }

        let count = accepted.len();
        for file in accepted {
            let id = Uuid::new_v4();
            let preview = self.previews.acquire(id);
            self.staged.push(StagedPhoto { id, file, preview });
        }
        tracing::debug!(staged = count, dropped = offered - count, "photos selected");
        count
    }

    /// Report that some selected entries could not be staged
    pub fn note_skipped(&mut self) {
        self.status = Some(UploadStatus::new(
            StatusKind::Warning,
            "Some files were skipped (only images up to 10MB are accepted)",
        ));
    }

    /// Remove a staged photo and release its preview
    pub fn remove_staged(&mut self, id: Uuid) -> bool {
        let before = self.staged.len();
        self.staged.retain(|p| p.id != id);
        self.staged.len() != before
    }

    /// Forget an uploaded photo locally; the server copy is untouched
    pub fn remove_uploaded(&mut self, index: usize) -> Option<UploadedPhoto> {
        (index < self.uploaded.len()).then(|| self.uploaded.remove(index))
    }

    /// Start an upload of everything staged.
    ///
    /// Returns the batch to send, or `None` when nothing should be sent:
    /// either an upload is already in flight or nothing is staged.
    pub fn begin_upload(&mut self) -> Option<Vec<PhotoFile>> {
        if self.uploading {
            return None;
        }
        if self.staged.is_empty() {
            self.status = Some(UploadStatus::new(
                StatusKind::Error,
                "Select at least one photo to upload",
            ));
            return None;
        }

        self.uploading = true;
        self.status = None;
        self.in_flight = self.staged.iter().map(|p| p.id).collect();
        Some(self.staged.iter().map(|p| p.file.clone()).collect())
    }

    /// Settle the upload started by `begin_upload`
    pub fn finish_upload(&mut self, result: Result<UploadReceipt, UploadError>) {
        self.uploading = false;
        let batch = std::mem::take(&mut self.in_flight);

        match result {
            Ok(receipt) => {
                self.uploaded.extend(receipt.uploaded_files.iter().cloned());
                self.staged.retain(|p| !batch.contains(&p.id));
                self.status = Some(UploadStatus::new(
                    StatusKind::Success,
                    format!("{} photo(s) uploaded successfully!", receipt.total_uploaded),
                ));
                tracing::info!(count = receipt.total_uploaded, "photos uploaded");

                if let Some(callback) = &self.on_photos_uploaded {
                    callback(&receipt.uploaded_files);
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "photo upload failed");
                self.status = Some(UploadStatus::new(
                    StatusKind::Error,
                    format!("Failed to upload photos: {err}"),
                ));
            }
        }
    }

    /// Upload everything staged and wait for the result.
    ///
    /// The TUI runs the two halves on either side of a spawned task instead.
    #[allow(dead_code)]
    pub async fn upload(&mut self, uploader: &dyn PhotoUploader) {
        if let Some(files) = self.begin_upload() {
            let result = uploader.upload(files).await;
            self.finish_upload(result);
        }
    }
}

/// Human-readable file size ("0 Bytes", "512 Bytes", "1.5 KB", "2 MB")
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["Bytes", "KB", "MB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{HttpPhotoUploader, MockPhotoUploader};
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const MB: u64 = 1024 * 1024;

    fn image(name: &str, size: u64) -> PhotoFile {
        PhotoFile {
            path: PathBuf::from(format!("/photos/{name}")),
            name: name.to_string(),
            content_type: "image/jpeg".to_string(),
            size,
        }
    }

    fn receipt_for(files: &[PhotoFile]) -> UploadReceipt {
        UploadReceipt {
            uploaded_files: files
                .iter()
                .map(|f| UploadedPhoto {
                    url: format!("/uploads/{}", f.name),
                    original_name: f.name.clone(),
                    size: f.size,
                })
                .collect(),
            total_uploaded: files.len(),
        }
    }

    fn three_images() -> Vec<PhotoFile> {
        vec![image("a.jpg", MB), image("b.jpg", MB), image("c.jpg", MB)]
    }

    mod selection {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_stages_valid_images_with_distinct_previews() {
            let mut session = PhotoSession::new();
            assert_eq!(session.select_files(three_images()), 3);

            let uris: HashSet<&str> = session.staged().iter().map(|p| p.preview_uri()).collect();
            assert_eq!(uris.len(), 3);
            assert_eq!(session.previews().live_count(), 3);
            assert!(session.status().is_none());
        }

        #[test]
        fn test_oversized_image_is_dropped_with_warning() {
            let mut session = PhotoSession::new();
            session.select_files(vec![image("big.jpg", 11 * MB), image("ok.jpg", MB)]);

            assert_eq!(session.staged().len(), 1);
            assert_eq!(session.staged()[0].name(), "ok.jpg");
            assert_eq!(session.status().map(|s| s.kind), Some(StatusKind::Warning));
        }

        #[test]
        fn test_exactly_ten_mib_is_accepted() {
            let mut session = PhotoSession::new();
            session.select_files(vec![image("edge.jpg", MAX_PHOTO_BYTES)]);
            assert_eq!(session.staged().len(), 1);
        }

        #[test]
        fn test_non_image_is_dropped() {
            let mut session = PhotoSession::new();
            let doc = PhotoFile {
                content_type: "application/pdf".to_string(),
                ..image("quote.pdf", MB)
            };
            session.select_files(vec![doc]);
            assert!(session.staged().is_empty());
            assert_eq!(session.status().map(|s| s.kind), Some(StatusKind::Warning));
        }

        #[test]
        fn test_repeated_selection_accumulates() {
            let mut session = PhotoSession::new();
            session.select_files(vec![image("a.jpg", MB)]);
            session.select_files(vec![image("b.jpg", MB)]);
            let names: Vec<&str> = session.staged().iter().map(|p| p.name()).collect();
            assert_eq!(names, vec!["a.jpg", "b.jpg"]);
        }

        #[test]
        fn test_remove_staged_releases_preview() {
            let mut session = PhotoSession::new();
            session.select_files(vec![image("done.jpg", MB)]);
            let batch = session.begin_upload().unwrap();
            session.finish_upload(Ok(receipt_for(&batch)));
            let uploaded_before = session.uploaded().to_vec();

            session.select_files(three_images());
            let victim = session.staged()[1].id;
            let uri = session.staged()[1].preview_uri().to_string();

            assert!(session.remove_staged(victim));

            assert_eq!(session.staged().len(), 2);
            assert!(!session.previews().is_live(&uri));
            assert_eq!(session.previews().live_count(), 2);
            assert_eq!(session.uploaded(), uploaded_before.as_slice());
        }

        #[test]
        fn test_remove_unknown_staged_is_noop() {
            let mut session = PhotoSession::new();
            session.select_files(three_images());
            assert!(!session.remove_staged(Uuid::new_v4()));
            assert_eq!(session.staged().len(), 3);
        }
    }

    mod upload {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_success_moves_staged_to_uploaded() {
            let mut uploader = MockPhotoUploader::new();
            uploader
                .expect_upload()
                .times(1)
                .returning(|files| Ok(receipt_for(&files)));

            let mut session = PhotoSession::new();
            session.select_files(three_images());
            session.upload(&uploader).await;

            assert!(session.staged().is_empty());
            assert_eq!(session.uploaded().len(), 3);
            assert_eq!(session.previews().live_count(), 0);
            assert!(!session.is_uploading());
            assert_eq!(
                session.status(),
                Some(&UploadStatus::new(
                    StatusKind::Success,
                    "3 photo(s) uploaded successfully!"
                ))
            );
        }

        #[tokio::test]
        async fn test_success_invokes_callback() {
            let calls = Arc::new(AtomicUsize::new(0));
            let seen = Arc::clone(&calls);

            let mut uploader = MockPhotoUploader::new();
            uploader
                .expect_upload()
                .returning(|files| Ok(receipt_for(&files)));

            let mut session = PhotoSession::new().with_callback(move |photos| {
                seen.fetch_add(photos.len(), Ordering::SeqCst);
            });
            session.select_files(three_images());
            session.upload(&uploader).await;

            assert_eq!(calls.load(Ordering::SeqCst), 3);
        }

        #[tokio::test]
        async fn test_server_failure_keeps_staged() {
            let mut uploader = MockPhotoUploader::new();
            uploader.expect_upload().times(1).returning(|_| {
                Err(UploadError::Server {
                    status: 500,
                    message: "Disk full".to_string(),
                })
            });

            let mut session = PhotoSession::new();
            session.select_files(three_images());
            session.upload(&uploader).await;

            assert_eq!(session.staged().len(), 3);
            assert_eq!(session.previews().live_count(), 3);
            assert!(session.uploaded().is_empty());
            assert!(!session.is_uploading());
            assert_eq!(
                session.status(),
                Some(&UploadStatus::new(
                    StatusKind::Error,
                    "Failed to upload photos: Disk full"
                ))
            );
        }

        #[tokio::test]
        async fn test_network_failure_keeps_staged() {
            // Bind then drop a listener so the port refuses connections
            let addr = std::net::TcpListener::bind("127.0.0.1:0")
                .unwrap()
                .local_addr()
                .unwrap();
            let uploader = HttpPhotoUploader::new(&format!("http://{addr}")).unwrap();

            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("bedroom.jpg");
            std::fs::write(&path, [7u8; 64]).unwrap();

            let mut session = PhotoSession::new();
            session.select_files(vec![PhotoFile::from_path(&path).unwrap()]);
            let staged_ids: Vec<Uuid> = session.staged().iter().map(|p| p.id).collect();

            session.upload(&uploader).await;

            let status = session.status().unwrap();
            assert_eq!(status.kind, StatusKind::Error);
            assert!(status.message.starts_with("Failed to upload photos: "));
            assert_eq!(
                session.staged().iter().map(|p| p.id).collect::<Vec<_>>(),
                staged_ids
            );
            assert_eq!(session.previews().live_count(), 1);
            assert!(session.uploaded().is_empty());
            assert!(!session.is_uploading());
        }

        #[tokio::test]
        async fn test_empty_upload_sets_error_without_request() {
            let mut uploader = MockPhotoUploader::new();
            uploader.expect_upload().never();

            let mut session = PhotoSession::new();
            session.upload(&uploader).await;

            assert_eq!(session.status().map(|s| s.kind), Some(StatusKind::Error));
            assert!(!session.is_uploading());
        }

        #[test]
        fn test_begin_upload_guards_reentry() {
            let mut session = PhotoSession::new();
            session.select_files(three_images());

            assert!(session.begin_upload().is_some());
            assert!(session.is_uploading());
            assert!(session.begin_upload().is_none());
        }

        #[test]
        fn test_photos_staged_during_upload_survive_success() {
            let mut session = PhotoSession::new();
            session.select_files(vec![image("a.jpg", MB)]);
            let batch = session.begin_upload().unwrap();
            session.select_files(vec![image("late.jpg", MB)]);

            session.finish_upload(Ok(receipt_for(&batch)));

            assert_eq!(session.staged().len(), 1);
            assert_eq!(session.staged()[0].name(), "late.jpg");
            assert_eq!(session.uploaded().len(), 1);
        }

        #[test]
        fn test_uploads_accumulate_and_remove_locally() {
            let mut session = PhotoSession::new();
            for name in ["a.jpg", "b.jpg"] {
                session.select_files(vec![image(name, MB)]);
                let batch = session.begin_upload().unwrap();
                session.finish_upload(Ok(receipt_for(&batch)));
            }
            assert_eq!(session.uploaded().len(), 2);

            let removed = session.remove_uploaded(0).unwrap();
            assert_eq!(removed.original_name, "a.jpg");
            assert_eq!(session.uploaded().len(), 1);
            assert!(session.remove_uploaded(5).is_none());
        }
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(2 * MB), "2 MB");
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for(Path::new("a/B.JPG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("x.png")), "image/png");
        assert_eq!(content_type_for(Path::new("notes.txt")), "application/octet-stream");
        assert_eq!(content_type_for(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn test_absolute_url_joins_paths() {
        let photo = UploadedPhoto {
            url: "/uploads/a.jpg".to_string(),
            original_name: "a.jpg".to_string(),
            size: 1,
        };
        assert_eq!(
            photo.absolute_url("https://example.com/"),
            "https://example.com/uploads/a.jpg"
        );
    }

    #[test]
    fn test_photo_file_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hallway.png");
        std::fs::write(&path, [0u8; 16]).unwrap();

        let file = PhotoFile::from_path(&path).unwrap();

        assert_eq!(file.content_type, "image/png");
        assert_eq!(file.size, 16);
        assert_eq!(file.name, "hallway.png");
        assert!(PhotoFile::from_path(&dir.path().join("missing.png")).is_err());
        assert!(PhotoFile::from_path(dir.path()).is_err());
    }
}
