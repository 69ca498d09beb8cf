use crate::error::{Error, Result};
use crate::model::Roster;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Backing store for a roster. The whole roster is read and written at once.
pub trait Storage {
    /// Read the roster, or `None` if nothing has been stored yet.
    fn load(&self) -> Result<Option<Roster>>;
    /// Replace the stored roster with `roster`.
    fn save(&self, roster: &Roster) -> Result<()>;
    fn location(&self) -> String;
}

/// Roster kept as a pretty-printed JSON object mapping ids to records.
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temporary_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> Error {
        Error::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Storage for JsonFile {
    fn load(&self) -> Result<Option<Roster>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "roster file does not exist yet");
                return Ok(None);
            }
            Err(e) => return Err(self.io_error(e)),
        };
        let roster: Roster = serde_json::from_str(&contents).map_err(|source| Error::Json {
            path: self.path.clone(),
            source,
        })?;
        for (key, student) in &roster {
            if key != student.id() {
                return Err(Error::MismatchedKey {
                    key: key.clone(),
                    id: student.id().to_owned(),
                });
            }
            student.validate().map_err(|source| Error::InvalidRecord {
                path: self.path.clone(),
                key: key.clone(),
                source: Box::new(source),
            })?;
        }
        trace!(path = %self.path.display(), students = roster.len(), "roster loaded");
        Ok(Some(roster))
    }

    fn save(&self, roster: &Roster) -> Result<()> {
        let json = serde_json::to_string_pretty(roster).map_err(|source| Error::Json {
            path: self.path.clone(),
            source,
        })?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        // The temporary file is synced before the rename, so a crash leaves
        // either the previous roster or the new one.
        let tmp = self.temporary_path();
        let written = write_synced(&tmp, json.as_bytes())
            .and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                trace!(path = %tmp.display(), error = %cleanup, "temporary file not removed");
            }
            return Err(self.io_error(e));
        }
        trace!(path = %self.path.display(), students = roster.len(), "roster saved");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents)?;
    file.write_all(b"\n")?;
    file.sync_all()
}
