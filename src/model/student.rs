use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;

const MARK_RANGE: RangeInclusive<f64> = 0.0..=100.0;

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum Grade {
    A,
    B,
    C,
    D,
    Fail,
}

impl Grade {
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::Fail];

    /// Letter for an average mark. Each band includes its lower bound.
    pub fn from_average(average: f64) -> Grade {
        if average >= 70.0 {
            Grade::A
        } else if average >= 60.0 {
            Grade::B
        } else if average >= 50.0 {
            Grade::C
        } else if average >= 40.0 {
            Grade::D
        } else {
            Grade::Fail
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Student {
    id: String,
    name: String,
    #[serde(default)]
    subjects: BTreeMap<String, f64>,
}

impl Student {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Student {
        Student {
            id: id.into(),
            name: name.into(),
            subjects: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subjects(&self) -> &BTreeMap<String, f64> {
        &self.subjects
    }

    pub fn mark(&self, subject: &str) -> Option<f64> {
        self.subjects.get(subject).copied()
    }

    /// Record or overwrite the mark for `subject`. An out of range mark
    /// leaves the student untouched.
    pub fn add_mark(&mut self, subject: &str, mark: f64) -> Result<()> {
        check_mark(subject, mark)?;
        self.subjects.insert(subject.to_owned(), mark);
        Ok(())
    }

    pub fn average(&self) -> f64 {
        if self.subjects.is_empty() {
            return 0.0;
        }
        self.subjects.values().sum::<f64>() / self.subjects.len() as f64
    }

    pub fn grade(&self) -> Grade {
        Grade::from_average(self.average())
    }

    /// Check the invariants of a record which did not go through
    /// [`Student::new`] and [`Student::add_mark`], such as a deserialized one.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(Error::EmptyName);
        }
        for (subject, &mark) in &self.subjects {
            check_mark(subject, mark)?;
        }
        Ok(())
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

fn check_mark(subject: &str, mark: f64) -> Result<()> {
    if MARK_RANGE.contains(&mark) {
        Ok(())
    } else {
        Err(Error::InvalidMark {
            subject: subject.to_owned(),
            mark,
        })
    }
}
