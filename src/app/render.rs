use crate::domain::model::{Course, OutputFormat};
use crate::utils::error::Result;
use std::io::Write;

/// `CSCI200, Data Structures`
pub fn course_line(course: &Course) -> String {
    format!("{}, {}", course.number, course.title)
}

/// `Prerequisites: CSCI101, MATH201`, or `Prerequisites: None`.
pub fn prerequisites_line(course: &Course) -> String {
    if course.prerequisites.is_empty() {
        "Prerequisites: None".to_string()
    } else {
        format!("Prerequisites: {}", course.prerequisites.join(", "))
    }
}

pub fn write_course_list<W: Write>(
    out: &mut W,
    courses: &[Course],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for course in courses {
                writeln!(out, "{}", course_line(course))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, courses)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

pub fn write_course_details<W: Write>(
    out: &mut W,
    course: &Course,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "{}", course_line(course))?;
            writeln!(out, "{}", prerequisites_line(course))?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, course)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_details(course: &Course, format: OutputFormat) -> String {
        let mut out = Vec::new();
        write_course_details(&mut out, course, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_details() {
        let course = Course::new("CSCI300", "Introduction to Algorithms", &["CSCI200", "MATH201"]);
        assert_eq!(
            render_details(&course, OutputFormat::Text),
            "CSCI300, Introduction to Algorithms\nPrerequisites: CSCI200, MATH201\n"
        );
    }

    #[test]
    fn test_text_details_without_prerequisites() {
        let course = Course::new("CSCI100", "Introduction to Computer Science", &[]);
        assert_eq!(
            render_details(&course, OutputFormat::Text),
            "CSCI100, Introduction to Computer Science\nPrerequisites: None\n"
        );
    }

    #[test]
    fn test_json_details() {
        let course = Course::new("CSCI200", "Data Structures", &["CSCI101"]);
        let value: serde_json::Value =
            serde_json::from_str(&render_details(&course, OutputFormat::Json)).unwrap();
        assert_eq!(value["number"], "CSCI200");
        assert_eq!(value["title"], "Data Structures");
        assert_eq!(value["prerequisites"][0], "CSCI101");
    }

    #[test]
    fn test_list_formats() {
        let courses = vec![
            Course::new("CSCI100", "Introduction to Computer Science", &[]),
            Course::new("CSCI101", "Introduction to Programming in C++", &["CSCI100"]),
        ];

        let mut text = Vec::new();
        write_course_list(&mut text, &courses, OutputFormat::Text).unwrap();
        assert_eq!(
            String::from_utf8(text).unwrap(),
            "CSCI100, Introduction to Computer Science\nCSCI101, Introduction to Programming in C++\n"
        );

        let mut json = Vec::new();
        write_course_list(&mut json, &courses, OutputFormat::Json).unwrap();
        let parsed: Vec<Course> = serde_json::from_slice(&json).unwrap();
        assert_eq!(parsed, courses);
    }
}
