use crate::config::MenuConfig;
use crate::display;
use crate::error::{Error, ErrorKind};
use crate::manager::StudentManager;
use eyre::Result;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

const MENU: &str = "\
1. Add student
2. Add marks
3. View all students
4. Search student by id
5. Delete student
6. Exit";

/// Whether the interactive session goes on after an action.
#[derive(Debug, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Menu<'a, R, W> {
    manager: &'a mut StudentManager,
    config: &'a MenuConfig,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(manager: &'a mut StudentManager, config: &'a MenuConfig, input: R, output: W) -> Self {
        Self {
            manager,
            config,
            input,
            output,
        }
    }

    /// Run the menu until the user exits or the input ends. Only storage and
    /// terminal failures are returned, other errors are reported and the menu
    /// is shown again.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\n{MENU}")?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                break;
            };
            let flow = match choice.as_str() {
                "1" => self.add_student()?,
                "2" => self.add_marks()?,
                "3" => self.view_all()?,
                "4" => self.search()?,
                "5" => self.delete()?,
                "6" => Flow::Quit,
                other => {
                    debug!(choice = other, "invalid menu choice");
                    writeln!(self.output, "Invalid choice, please enter a number from 1 to 6.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                break;
            }
        }
        writeln!(self.output, "Goodbye.")?;
        Ok(())
    }

    /// Print `message` and read one trimmed line, or `None` at end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    /// Ask for an id until one of the configured length is entered.
    fn prompt_id(&mut self) -> Result<Option<String>> {
        loop {
            let Some(id) = self.prompt("Student id: ")? else {
                return Ok(None);
            };
            if id.chars().count() == self.config.id_length {
                return Ok(Some(id));
            }
            writeln!(
                self.output,
                "The id must be exactly {} characters long.",
                self.config.id_length
            )?;
        }
    }

    /// Print a core error if the menu can carry on, propagate it otherwise.
    fn report(&mut self, error: Error) -> Result<Flow> {
        if !error.is_recoverable() {
            return Err(error.into());
        }
        warn!(%error, "operation rejected");
        writeln!(self.output, "Error: {error}")?;
        Ok(Flow::Continue)
    }

    fn add_student(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt_id()? else {
            return Ok(Flow::Quit);
        };
        let name = loop {
            let Some(name) = self.prompt("Student name: ")? else {
                return Ok(Flow::Quit);
            };
            if !name.is_empty() {
                break name;
            }
            writeln!(self.output, "The name cannot be empty.")?;
        };
        match self.manager.add_student(&id, &name) {
            Ok(student) => {
                let message = format!("Added {student}.");
                writeln!(self.output, "{message}")?;
                Ok(Flow::Continue)
            }
            Err(e) => self.report(e),
        }
    }

    fn add_marks(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt_id()? else {
            return Ok(Flow::Quit);
        };
        if let Err(e) = self.manager.get_student(&id) {
            return self.report(e);
        }
        let config = self.config;
        for subject in &config.subjects {
            let question = match self.manager.get_student(&id)?.mark(subject) {
                Some(current) => format!("Mark for {subject} (currently {current}, empty to keep): "),
                None => format!("Mark for {subject} (empty to skip): "),
            };
            loop {
                let Some(answer) = self.prompt(&question)? else {
                    return Ok(Flow::Quit);
                };
                if answer.is_empty() {
                    break;
                }
                let Ok(mark) = answer.parse::<f64>() else {
                    writeln!(self.output, "Please enter a number.")?;
                    continue;
                };
                match self.manager.add_marks(&id, subject, mark) {
                    Ok(()) => break,
                    Err(e) if e.kind() == ErrorKind::Validation => {
                        writeln!(self.output, "Error: {e}")?;
                    }
                    Err(e) => return self.report(e),
                }
            }
        }
        let student = self.manager.get_student(&id)?;
        let summary = format!(
            "Marks saved, average {:.2}, grade {}.",
            student.average(),
            student.grade()
        );
        writeln!(self.output, "{summary}")?;
        Ok(Flow::Continue)
    }

    fn view_all(&mut self) -> Result<Flow> {
        display::display_overview(&mut self.output, &self.manager.list_students())?;
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt_id()? else {
            return Ok(Flow::Quit);
        };
        match self.manager.get_student(&id) {
            Ok(student) => {
                display::display_details(&mut self.output, student)?;
                Ok(Flow::Continue)
            }
            Err(e) => self.report(e),
        }
    }

    fn delete(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt_id()? else {
            return Ok(Flow::Quit);
        };
        match self.manager.delete_student(&id) {
            Ok(student) => {
                writeln!(self.output, "Deleted {student}.")?;
                Ok(Flow::Continue)
            }
            Err(e) => self.report(e),
        }
    }
}
