pub use self::student::{Grade, Student};

use std::collections::BTreeMap;

mod student;

/// All the students known to the manager, indexed by id.
pub type Roster = BTreeMap<String, Student>;
