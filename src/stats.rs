use crate::model::{Grade, Student};
use std::collections::BTreeMap;

#[derive(Debug, PartialEq)]
pub struct Summary {
    pub students: usize,
    pub class_average: f64,
    pub grades: BTreeMap<Grade, usize>,
}

pub fn summary(students: &[&Student]) -> Summary {
    let mut grades = Grade::ALL.iter().map(|&g| (g, 0)).collect::<BTreeMap<_, _>>();
    for student in students {
        *grades.entry(student.grade()).or_default() += 1;
    }
    let class_average = if students.is_empty() {
        0.0
    } else {
        students.iter().map(|s| s.average()).sum::<f64>() / students.len() as f64
    };
    Summary {
        students: students.len(),
        class_average,
        grades,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: &str, marks: &[f64]) -> Student {
        let mut s = Student::new(id, format!("Student {id}"));
        for (i, &mark) in marks.iter().enumerate() {
            s.add_mark(&format!("Subject {i}"), mark).unwrap();
        }
        s
    }

    #[test]
    fn test_empty() {
        let s = summary(&[]);
        assert_eq!(s.students, 0);
        assert_eq!(s.class_average, 0.0);
        assert!(s.grades.values().all(|&n| n == 0));
        assert_eq!(s.grades.len(), Grade::ALL.len());
    }

    #[test]
    fn test_distribution() {
        let a = student("1", &[90.0, 70.0]);
        let b = student("2", &[40.0]);
        let c = student("3", &[]);
        let s = summary(&[&a, &b, &c]);
        assert_eq!(s.students, 3);
        assert!((s.class_average - 40.0).abs() < 1e-9);
        assert_eq!(s.grades[&Grade::A], 1);
        assert_eq!(s.grades[&Grade::D], 1);
        assert_eq!(s.grades[&Grade::Fail], 1);
        assert_eq!(s.grades[&Grade::B], 0);
    }
}
