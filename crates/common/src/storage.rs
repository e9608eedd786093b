//! Local filesystem storage for student avatar files.
//!
//! Every student owns at most one avatar file, named after the student
//! identifier and the extension of the originally uploaded file. Files are
//! written without any locking, concurrent uploads for the same student
//! leave the last written file in place.

use std::{
    io,
    path::{Path, PathBuf},
};

use tokio::{
    fs::{self, File},
    io::{AsyncWriteExt, BufReader, BufWriter},
};
use tracing::{debug, warn};

use crate::config;

/// Buffer size used while copying uploaded files to disk.
const COPY_BUFFER_SIZE: usize = 1024;

/// Avatar file storage rooted at the configured directory.
#[derive(Clone, Debug)]
pub struct AvatarStorage {
    root: PathBuf,
}

impl AvatarStorage {
    /// Create new [`AvatarStorage`] from the provided [`Storage`] configuration.
    ///
    /// [`Storage`]: config::Storage
    pub fn new(config: &config::Storage) -> Self {
        Self::at(config.avatars_path.clone())
    }

    /// Create new [`AvatarStorage`] rooted at the provided directory.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory that contains avatar files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Derive the avatar file path for a student.
    ///
    /// Returns [`None`] if the extension derived from `original_name`
    /// is empty or would escape the storage directory.
    pub fn path_for(&self, student_id: i64, original_name: &str) -> Option<PathBuf> {
        let extension = extension(original_name);

        if extension.is_empty() || extension.contains(['/', '\\']) {
            return None;
        }

        Some(self.root.join(format!("{student_id}.{extension}")))
    }

    /// Write `contents` to `path`, replacing any previously stored file.
    ///
    /// Parent directories are created as needed. If the copy fails midway,
    /// the partially written file is removed before the error is returned.
    pub async fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        self.remove(path).await?;

        if let Err(err) = copy_to_file(path, contents).await {
            warn!(path = %path.display(), %err, "avatar write failed, removing partial file");

            if let Err(cleanup_err) = self.remove(path).await {
                warn!(path = %path.display(), %cleanup_err, "unable to remove partial avatar file");
            }

            return Err(err);
        }

        debug!(path = %path.display(), size = contents.len(), "avatar file written");

        Ok(())
    }

    /// Open a stored avatar file for reading.
    ///
    /// Returns [`None`] if the file doesn't exist.
    pub async fn open(&self, path: &Path) -> io::Result<Option<File>> {
        match File::open(path).await {
            Ok(file) => Ok(Some(file)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Remove a stored avatar file.
    ///
    /// Returns `false` if there was no file to remove.
    pub async fn remove(&self, path: &Path) -> io::Result<bool> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }
}

/// Extension of a file name: everything after the last `.`, or the whole
/// name if there is no `.` at all.
pub fn extension(file_name: &str) -> &str {
    file_name
        .rsplit_once('.')
        .map_or(file_name, |(_, extension)| extension)
}

/// File name component of a stored avatar path.
pub fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}

async fn copy_to_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    let file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;

    let mut reader = BufReader::with_capacity(COPY_BUFFER_SIZE, contents);
    let mut writer = BufWriter::with_capacity(COPY_BUFFER_SIZE, file);

    tokio::io::copy_buf(&mut reader, &mut writer).await?;
    writer.flush().await?;
    writer.into_inner().sync_all().await
}
