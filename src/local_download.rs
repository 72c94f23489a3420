//! Downloads on native: copy a local image file to a user-chosen location.

use std::path::{Path, PathBuf};

use atelier_ui::{DownloadError, DownloadRequest, DownloadSink};

/// Decides where a download is written.
pub trait SaveLocation {
    /// `None` when the user cancels.
    fn choose(&mut self, suggested_name: &str) -> Option<PathBuf>;
}

/// Native save dialog starting in the user's download folder.
#[derive(Debug, Default)]
pub struct SaveDialog;

impl SaveLocation for SaveDialog {
    fn choose(&mut self, suggested_name: &str) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new()
            .set_file_name(suggested_name)
            .add_filter("PNG image", &["png"]);
        if let Some(dir) = dirs::download_dir() {
            dialog = dialog.set_directory(dir);
        }
        dialog.save_file()
    }
}

/// Always saves into one directory under the suggested name.
#[derive(Debug, Clone)]
pub struct FixedDirectory(pub PathBuf);

impl SaveLocation for FixedDirectory {
    fn choose(&mut self, suggested_name: &str) -> Option<PathBuf> {
        Some(self.0.join(suggested_name))
    }
}

/// Download sink that copies local files.
///
/// Relative paths in the gallery resolve against `base`, the directory of
/// the gallery file.
#[derive(Debug)]
pub struct FileCopyDownloads<L> {
    base: PathBuf,
    location: L,
}

impl<L: SaveLocation> FileCopyDownloads<L> {
    pub fn new(base: impl Into<PathBuf>, location: L) -> Self {
        Self {
            base: base.into(),
            location,
        }
    }

    /// Existing absolute paths are used as is. Anything else, including
    /// server-rooted URLs like `/results/1.png`, resolves against `base`.
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() && path.is_file() {
            return path.to_path_buf();
        }
        self.base.join(path.strip_prefix("/").unwrap_or(path))
    }
}

impl<L: SaveLocation> DownloadSink for FileCopyDownloads<L> {
    fn download(&mut self, request: &DownloadRequest) -> Result<(), DownloadError> {
        let source = request
            .local_path()
            .ok_or_else(|| DownloadError::UnsupportedSource(request.url.clone()))?;
        let source = self.resolve(&source);
        if !source.is_file() {
            return Err(DownloadError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", source.display()),
            )));
        }

        let target = self
            .location
            .choose(&request.file_name)
            .ok_or(DownloadError::Cancelled)?;
        std::fs::copy(&source, &target)?;
        log::debug!("Copied {:?} to {:?}", source, target);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_ui::trigger_download;

    struct Cancel;

    impl SaveLocation for Cancel {
        fn choose(&mut self, _suggested_name: &str) -> Option<PathBuf> {
            None
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("atelier-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir is writable");
        dir
    }

    #[test]
    fn test_copies_relative_file() {
        let source_dir = scratch_dir("source");
        let target_dir = scratch_dir("target");
        std::fs::write(source_dir.join("cat.png"), b"png bytes").expect("write source");

        let mut sink = FileCopyDownloads::new(&source_dir, FixedDirectory(target_dir.clone()));
        let request = DownloadRequest::enlarged("cat.png");
        assert!(trigger_download(&mut sink, &request));
        assert_eq!(
            std::fs::read(target_dir.join("image.png")).expect("copied"),
            b"png bytes"
        );

        let _ = std::fs::remove_dir_all(source_dir);
        let _ = std::fs::remove_dir_all(target_dir);
    }

    #[test]
    fn test_server_rooted_url_resolves_against_base() {
        let source_dir = scratch_dir("rooted");
        std::fs::create_dir_all(source_dir.join("results")).expect("create results dir");
        std::fs::write(source_dir.join("results").join("1.png"), b"one").expect("write source");
        let target = source_dir.join("saved.png");

        struct Exact(PathBuf);
        impl SaveLocation for Exact {
            fn choose(&mut self, _suggested_name: &str) -> Option<PathBuf> {
                Some(self.0.clone())
            }
        }

        let mut sink = FileCopyDownloads::new(&source_dir, Exact(target.clone()));
        sink.download(&DownloadRequest::enlarged("/results/1.png"))
            .expect("copy succeeds");
        assert_eq!(std::fs::read(&target).expect("copied"), b"one");
        let _ = std::fs::remove_dir_all(source_dir);
    }

    #[test]
    fn test_remote_urls_unsupported() {
        let mut sink = FileCopyDownloads::new(".", Cancel);
        let result = sink.download(&DownloadRequest::enlarged("https://example.com/a.png"));
        assert!(matches!(result, Err(DownloadError::UnsupportedSource(_))));
    }

    #[test]
    fn test_missing_file_reported() {
        let dir = scratch_dir("missing");
        let mut sink = FileCopyDownloads::new(&dir, FixedDirectory(dir.clone()));
        let result = sink.download(&DownloadRequest::enlarged("nope.png"));
        assert!(matches!(result, Err(DownloadError::Io(_))));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_cancelled_dialog() {
        let dir = scratch_dir("cancel");
        std::fs::write(dir.join("a.png"), b"x").expect("write source");
        let mut sink = FileCopyDownloads::new(&dir, Cancel);
        let result = sink.download(&DownloadRequest::thumbnail("a.png", 0));
        assert!(matches!(result, Err(DownloadError::Cancelled)));
        let _ = std::fs::remove_dir_all(dir);
    }
}
