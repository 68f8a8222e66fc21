// ----------------------------------------------------------------------------
// Reader for the web scrape export: one comma separated row per course page
// entry, with up to four loosely typed "property" pairs on the side. Those
// carry the distribution area, crosslistings, and any lab/screening/extra
// meeting times.
// ----------------------------------------------------------------------------

use crate::course::*;
use crate::course_csv::*;
use crate::course_list::*;
use crate::error::*;
use crate::schedule::*;
use ::serde::*;
use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;
use std::io::Read;

// A non-course entry on the catalog page
const NULL_TITLE: &str = "null";

lazy_static! {
    static ref AM_PM_RE: Regex = Regex::new(r"[AP]M").unwrap();
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ScrapeRow {
    pub title: String,
    pub number: String,
    pub crn: String,
    pub professor: String,
    pub class_cap: String,
    pub credits: String,
    pub description: String,
    pub programs: String,
    #[serde(rename = "programs-href")]
    pub programs_href: String,
    pub schedule: String,
    pub property_1_type: Option<String>,
    pub property_1_value: Option<String>,
    pub property_2_type: Option<String>,
    pub property_2_value: Option<String>,
    pub property_3_type: Option<String>,
    pub property_3_value: Option<String>,
    pub property_4_type: Option<String>,
    pub property_4_value: Option<String>,
}

impl ScrapeRow {
    // Pairs with both cells blank are absent. Otherwise a blank cell reads
    // as "", so a later blank "Dist" still clears an earlier one.
    pub fn properties(&self) -> Vec<(&str, &str)> {
        [
            (&self.property_1_type, &self.property_1_value),
            (&self.property_2_type, &self.property_2_value),
            (&self.property_3_type, &self.property_3_value),
            (&self.property_4_type, &self.property_4_value),
        ]
        .into_iter()
        .filter(|(tag, value)| tag.is_some() || value.is_some())
        .map(|(tag, value)| (tag.as_deref().unwrap_or(""), value.as_deref().unwrap_or("")))
        .collect()
    }
}

pub fn course_from_scrape_row(row: ScrapeRow) -> Result<Course, RowError> {
    if row.title == NULL_TITLE {
        return Err(RowError::NullTitle);
    }

    let schedule = flatten(&row.schedule);
    let primary = ScheduleSlot::full(&schedule, SlotKind::Primary)
        .ok_or(RowError::UnparseableSchedule(schedule))?;

    let mut distributional_area = None;
    let mut crosslists = None;
    let mut extra_schedules = Vec::new();

    for (tag, value) in row.properties() {
        let value = flatten(value);

        // Later properties overwrite earlier ones of the same type
        if tag.starts_with("Dist") {
            distributional_area = Some(value);
        } else if tag.starts_with("Cross") {
            crosslists = Some(value);
        } else if AM_PM_RE.is_match(&value) {
            match ScheduleSlot::full(&value, SlotKind::from_tag(tag)) {
                Some(slot) => extra_schedules.push(slot),
                None => debug!("Skipping unreadable {:?} schedule {:?} for CRN {}", tag, value, row.crn),
            }
        }
    }

    let mut course = Course::new(row.crn, primary);

    course.set_title(Some(row.title));
    course.set_course_number(Some(row.number));
    course.set_professor(Some(row.professor));
    course.set_class_cap(Some(row.class_cap));
    course.set_credits(Some(row.credits));
    course.set_description(Some(row.description));
    course.set_distributional_area(distributional_area.as_deref());
    course.set_crosslists(crosslists);
    course.set_program(Some(row.programs));
    course.set_source(Some(row.programs_href));

    for slot in extra_schedules {
        course.add_schedule(slot);
    }

    Ok(course)
}

pub fn read_scrape<R: Read>(input: R, courses: &mut CourseList, verbose: bool) -> Result<ReadReport> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let mut report = ReadReport::default();

    for (index, record) in reader.records().enumerate() {
        report.rows += 1;

        let course = record
            .and_then(|record| record.deserialize::<ScrapeRow>(Some(&headers)))
            .map_err(RowError::from)
            .and_then(course_from_scrape_row);

        match course {
            Ok(course) => {
                courses.add(course);
                report.inserted += 1;
            }
            Err(e) => report.fail(index + 1, e, verbose),
        }
    }

    info!(
        "Read {} scrape rows ({} courses, {} skipped)",
        report.rows,
        report.inserted,
        report.failures.len()
    );

    Ok(report)
}

fn flatten(value: &str) -> String {
    value.replace('\n', " ")
}
