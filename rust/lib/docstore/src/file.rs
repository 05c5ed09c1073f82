use std::fs;
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::DocError;

/// JsonFile keeps a whole document of type `T` in one pretty-printed JSON
/// file on the local filesystem.
///
/// - A missing file, or one holding only whitespace, reads as `T::default()`.
/// - Every save rewrites the complete document: it is written to a
///   temporary file next to the target, synced, then renamed over it,
///   so a crash leaves either the old or the new document on disk.
/// - [`JsonFile::update`] holds an exclusive lock across
///   load → mutate → save, so two concurrent edits cannot both start
///   from the same prior state.
pub struct JsonFile<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _doc: PhantomData<fn() -> T>,
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Bind to the document at `path`. The parent directory is created if
    /// it doesn't exist; the file itself is only created on first save.
    pub fn open(path: &Path) -> Result<Self, DocError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| DocError::Io(e.to_string()))?;
        }
        Ok(Self {
            path: path.to_path_buf(),
            lock: Mutex::new(()),
            _doc: PhantomData,
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current document.
    pub fn load(&self) -> Result<T, DocError> {
        let _guard = self.acquire()?;
        self.read()
    }

    /// Replace the document on disk with `doc`.
    pub fn save(&self, doc: &T) -> Result<(), DocError> {
        let _guard = self.acquire()?;
        self.write(doc)
    }

    /// Read-modify-write under the lock.
    ///
    /// If `f` fails, nothing is written and its error is returned.
    /// On success the mutated document is saved and `f`'s value returned.
    pub fn update<R, E>(&self, f: impl FnOnce(&mut T) -> Result<R, E>) -> Result<R, E>
    where
        E: From<DocError>,
    {
        let _guard = self.acquire()?;
        let mut doc = self.read()?;
        let out = f(&mut doc)?;
        self.write(&doc)?;
        Ok(out)
    }

    fn acquire(&self) -> Result<MutexGuard<'_, ()>, DocError> {
        self.lock.lock().map_err(|_| DocError::Lock)
    }

    fn read(&self) -> Result<T, DocError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("document {} does not exist, starting empty", self.path.display());
                return Ok(T::default());
            }
            Err(e) => return Err(DocError::Io(e.to_string())),
        };

        if data.iter().all(u8::is_ascii_whitespace) {
            debug!("document {} is empty, starting empty", self.path.display());
            return Ok(T::default());
        }

        serde_json::from_slice(&data).map_err(|e| {
            warn!("document {} failed to parse: {}", self.path.display(), e);
            DocError::Corrupt {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            }
        })
    }

    fn write(&self, doc: &T) -> Result<(), DocError> {
        let mut data =
            serde_json::to_vec_pretty(doc).map_err(|e| DocError::Serialization(e.to_string()))?;
        data.push(b'\n');

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| DocError::Io(e.to_string()))?;
        tmp.write_all(&data).map_err(|e| DocError::Io(e.to_string()))?;
        if let Ok(meta) = fs::metadata(&self.path) {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .map_err(|e| DocError::Io(e.to_string()))?;
        }
        tmp.as_file()
            .sync_all()
            .map_err(|e| DocError::Io(e.to_string()))?;
        tmp.persist(&self.path)
            .map_err(|e| DocError::Io(e.error.to_string()))?;

        debug!("wrote {} bytes to {}", data.len(), self.path.display());
        Ok(())
    }
}
