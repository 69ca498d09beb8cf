use crate::model::{Grade, Student};
use crate::stats;
use std::io::{self, Write};

pub fn display_overview<W: Write>(out: &mut W, students: &[&Student]) -> io::Result<()> {
    if students.is_empty() {
        return writeln!(out, "No students recorded.");
    }
    for s in students {
        writeln!(
            out,
            "  - {} {} (average {:.2}, grade {})",
            s.id(),
            s.name(),
            s.average(),
            s.grade()
        )?;
    }
    writeln!(out)?;
    display_stats(out, students)
}

pub fn display_stats<W: Write>(out: &mut W, students: &[&Student]) -> io::Result<()> {
    let summary = stats::summary(students);
    writeln!(
        out,
        "Students: {}, class average: {:.2}",
        summary.students, summary.class_average
    )?;
    writeln!(out, "Grades:")?;
    for grade in Grade::ALL {
        let n = summary.grades[&grade];
        if n != 0 {
            writeln!(
                out,
                "  - {}: {} ({:.2}%)",
                grade,
                n,
                100.0 * n as f64 / summary.students as f64
            )?;
        }
    }
    Ok(())
}

pub fn display_details<W: Write>(out: &mut W, s: &Student) -> io::Result<()> {
    writeln!(out, "{}:", s)?;
    if s.subjects().is_empty() {
        writeln!(out, "  no marks recorded")?;
    }
    for (subject, mark) in s.subjects() {
        writeln!(out, "  - {}: {}", subject, mark)?;
    }
    writeln!(out, "  average: {:.2}", s.average())?;
    writeln!(out, "  grade: {}", s.grade())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_overview() {
        let mut alice = Student::new("0000000000000001", "Alice");
        alice.add_mark("Mathematics", 90.0).unwrap();
        alice.add_mark("Science", 70.0).unwrap();
        let bob = Student::new("0000000000000002", "Bob");
        let text = render(|out| display_overview(out, &[&alice, &bob]));
        assert!(text.contains("0000000000000001 Alice (average 80.00, grade A)"));
        assert!(text.contains("0000000000000002 Bob (average 0.00, grade FAIL)"));
        assert!(text.contains("Students: 2, class average: 40.00"));
        assert!(text.contains("  - A: 1 (50.00%)"));
        assert!(!text.contains("  - B:"));
    }

    #[test]
    fn test_empty_overview() {
        let text = render(|out| display_overview(out, &[]));
        assert_eq!(text, "No students recorded.\n");
    }

    #[test]
    fn test_details() {
        let mut alice = Student::new("0000000000000001", "Alice");
        alice.add_mark("History", 65.5).unwrap();
        let text = render(|out| display_details(out, &alice));
        assert_eq!(
            text,
            "Alice (0000000000000001):\n  - History: 65.5\n  average: 65.50\n  grade: B\n"
        );
    }
}
