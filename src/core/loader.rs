use crate::domain::model::{normalize_course_number, Course, LoadReport};
use crate::utils::error::Result;
use std::collections::HashMap;
use std::io::Read;

/// Parse `courseNumber,title[,prerequisite]*` rows and collapse duplicates.
///
/// Every line is one row split on commas; quotes carry no meaning. Blank lines
/// are ignored. Rows without a number or title are skipped and counted in the
/// report. The same number appearing twice keeps the later row.
pub fn load_courses<R: Read>(source: &str, reader: R) -> Result<(Vec<Course>, LoadReport)> {
    let mut report = LoadReport::new(source);

    tracing::debug!("Extracting course rows from {}", source);
    let rows = extract(reader, &mut report)?;
    tracing::debug!("Extracted {} course rows", rows.len());

    let courses = transform(rows, &mut report);
    report.accepted = courses.len();

    Ok((courses, report))
}

/// Read every row into a `Course`, without deduplication.
pub fn extract<R: Read>(reader: R, report: &mut LoadReport) -> Result<Vec<Course>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Utf8 { .. }) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                tracing::warn!("Skipping line {}: not valid UTF-8", line);
                report.skipped += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let number = record.get(0).map(normalize_course_number).unwrap_or_default();
        let title = record.get(1).map(str::trim).unwrap_or_default();

        if number.is_empty() || title.is_empty() {
            tracing::warn!("Skipping line {}: missing course number or title", line);
            report.skipped += 1;
            continue;
        }

        let prerequisites = record
            .iter()
            .skip(2)
            .map(normalize_course_number)
            .filter(|p| !p.is_empty())
            .collect();

        rows.push(Course {
            number,
            title: title.to_string(),
            prerequisites,
        });
    }

    Ok(rows)
}

/// Collapse duplicate course numbers: the last row wins but keeps the slot
/// of the first occurrence.
pub fn transform(rows: Vec<Course>, report: &mut LoadReport) -> Vec<Course> {
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(rows.len());
    let mut courses: Vec<Course> = Vec::with_capacity(rows.len());

    for course in rows {
        match positions.get(&course.number) {
            Some(&index) => {
                tracing::debug!("Course {} redefined, keeping the later row", course.number);
                report.duplicates += 1;
                courses[index] = course;
            }
            None => {
                positions.insert(course.number.clone(), courses.len());
                courses.push(course);
            }
        }
    }

    courses
}
