use crate::course::*;
use crate::course_list::*;
use crate::error::*;
use lazy_static::lazy_static;
use log::{error, info, log, Level};
use regex::Regex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const HEADER: [&str; 20] = [
    "course_number",
    "course_title",
    "professor",
    "credits",
    "class_cap",
    "primary_schedule_day",
    "primary_schedule_start_time",
    "primary_schedule_end_time",
    "primary_schedule_location",
    "secondary_schedule_day",
    "secondary_schedule_start_time",
    "secondary_schedule_end_time",
    "secondary_schedule_location",
    "distributional_area",
    "crosslists",
    "additional_schedule",
    "description",
    "crn_number",
    "program",
    "source",
];

// Stands in for a missing secondary schedule's four columns
const EMPTY_SCHEDULE: &str = ",,,";

lazy_static! {
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

// Failed rows are numbered from 1, header excluded
#[derive(Debug, Default)]
pub struct ReadReport {
    pub rows: usize,
    pub inserted: usize,
    pub continuations: usize,
    pub failures: Vec<(usize, RowError)>,
}

impl ReadReport {
    pub fn fail(&mut self, row: usize, e: RowError, verbose: bool) {
        log!(failure_level(verbose), "Skipping row {}: {}", row, e);

        self.failures.push((row, e));
    }
}

/// Row failures only show at the default filter when `verbose` is set.
pub fn failure_level(verbose: bool) -> Level {
    if verbose {
        Level::Warn
    } else {
        Level::Debug
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriteReport {
    pub written: usize,
    pub skipped: Vec<IncompleteCourse>,
}

// Courses missing a course number, title, credits or CRN are refused
pub fn to_csv_line(course: &Course) -> Result<String, IncompleteCourse> {
    let schedules = course.get_schedules();

    let secondary = schedules
        .get(1)
        .map(|schedule| schedule.to_string())
        .unwrap_or_else(|| EMPTY_SCHEDULE.to_string());

    let additional = schedules
        .iter()
        .skip(2)
        .map(|schedule| schedule.brief())
        .collect::<Vec<String>>()
        .join(", ");

    let fields = [
        course.get_course_number().unwrap_or("").to_string(),
        quote(course.get_title()),
        quote(course.get_professor()),
        course.get_credits().unwrap_or("").to_string(),
        course.get_class_cap().unwrap_or("").to_string(),
        course.get_primary_schedule().to_string(),
        secondary,
        quote(Some(course.get_distributional_area().join(", ").as_str())),
        quote(course.get_crosslists()),
        quote(Some(additional.as_str())),
        quote(course.get_description()),
        course.get_crn_number().to_string(),
        course.get_program().unwrap_or("").to_string(),
        course.get_source().unwrap_or("").to_string(),
    ];

    let line = collapse_whitespace(&fields.join(","));

    let required = [
        ("course_number", course.get_course_number()),
        ("course_title", course.get_title()),
        ("credits", course.get_credits()),
        ("crn_number", Some(course.get_crn_number()).filter(|crn| !crn.is_empty())),
    ];

    let missing: Vec<&'static str> = required
        .iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| *name)
        .collect();

    if !missing.is_empty() {
        return Err(IncompleteCourse {
            crn_number: course.get_crn_number().to_string(),
            missing,
            line,
        });
    }

    Ok(line)
}

pub fn write_courses<W: Write>(mut writer: W, courses: &CourseList) -> std::io::Result<WriteReport> {
    let mut report = WriteReport::default();

    writeln!(writer, "{}", HEADER.join(","))?;

    for course in courses.courses() {
        match to_csv_line(course) {
            Ok(line) => {
                writeln!(writer, "{}", line)?;
                report.written += 1;
            }
            Err(e) => {
                error!("{}", e);
                report.skipped.push(e);
            }
        }
    }

    writer.flush()?;

    Ok(report)
}

pub fn write_file(path: &Path, courses: &CourseList) -> Result<WriteReport> {
    let file = File::create(path)?;
    let report = write_courses(BufWriter::new(file), courses)?;

    info!(
        "Wrote {} courses to {} ({} skipped)",
        report.written,
        path.display(),
        report.skipped.len()
    );

    Ok(report)
}

fn quote(value: Option<&str>) -> String {
    format!("\"{}\"", value.unwrap_or(""))
}

fn collapse_whitespace(line: &str) -> String {
    WHITESPACE_RE.replace_all(line, " ").into_owned()
}
