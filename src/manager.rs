use crate::error::{Error, Result};
use crate::model::{Roster, Student};
use crate::storage::Storage;
use tracing::{debug, info, instrument, warn};

/// Owner of the roster. Every successful mutation is written back to the
/// storage before returning, and records are only handed out as shared
/// references, so nothing can change a student without it being persisted.
/// A mutation whose save fails is undone, so memory matches the storage.
pub struct StudentManager {
    roster: Roster,
    storage: Box<dyn Storage>,
}

impl StudentManager {
    /// Build a manager and load the roster from `storage`. Missing storage
    /// yields an empty roster.
    pub fn open(storage: Box<dyn Storage>) -> Result<Self> {
        let mut manager = Self {
            roster: Roster::new(),
            storage,
        };
        manager.load()?;
        Ok(manager)
    }

    pub fn load(&mut self) -> Result<()> {
        self.roster = self.storage.load()?.unwrap_or_default();
        info!(
            location = %self.storage.location(),
            students = self.roster.len(),
            "roster loaded"
        );
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        self.storage.save(&self.roster)?;
        debug!(location = %self.storage.location(), "roster saved");
        Ok(())
    }

    /// Save the roster, or run `undo` on it and return the failure.
    fn commit(&mut self, undo: impl FnOnce(&mut Roster)) -> Result<()> {
        if let Err(e) = self.save() {
            warn!(error = %e, "roster not saved, change undone");
            undo(&mut self.roster);
            return Err(e);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn add_student(&mut self, id: &str, name: &str) -> Result<&Student> {
        let (id, name) = (id.trim(), name.trim());
        if id.is_empty() {
            return Err(Error::EmptyId);
        }
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        if self.roster.contains_key(id) {
            return Err(Error::DuplicateId(id.to_owned()));
        }
        self.roster.insert(id.to_owned(), Student::new(id, name));
        self.commit(|roster| {
            roster.remove(id);
        })?;
        info!("student added");
        self.get_student(id)
    }

    #[instrument(skip(self))]
    pub fn add_marks(&mut self, id: &str, subject: &str, mark: f64) -> Result<()> {
        let id = id.trim();
        let student = self
            .roster
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(id.to_owned()))?;
        let previous = student.clone();
        student.add_mark(subject, mark)?;
        self.commit(|roster| {
            roster.insert(previous.id().to_owned(), previous);
        })?;
        debug!("mark recorded");
        Ok(())
    }

    pub fn get_student(&self, id: &str) -> Result<&Student> {
        let id = id.trim();
        self.roster
            .get(id)
            .ok_or_else(|| Error::NotFound(id.to_owned()))
    }

    #[instrument(skip(self))]
    pub fn delete_student(&mut self, id: &str) -> Result<Student> {
        let id = id.trim();
        let student = self
            .roster
            .remove(id)
            .ok_or_else(|| Error::NotFound(id.to_owned()))?;
        let restored = student.clone();
        self.commit(|roster| {
            roster.insert(restored.id().to_owned(), restored);
        })?;
        info!("student deleted");
        Ok(student)
    }

    /// All students, ordered by id.
    pub fn list_students(&self) -> Vec<&Student> {
        self.roster.values().collect()
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }
}
