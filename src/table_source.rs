// ----------------------------------------------------------------------------
// Reader for the registrar's tab separated course table.
//
// A course that meets at more than one time (or whose professor is listed on
// a second line) spans several rows. The extra rows have "and" in the
// unnamed 7th column and belong to the regular row just above them. If that
// row was dropped, they are dropped too.
// ----------------------------------------------------------------------------

use crate::course::*;
use crate::course_csv::*;
use crate::course_list::*;
use crate::error::*;
use crate::schedule::*;
use ::serde::*;
use log::info;
use std::io::Read;

// Unnamed column, counted from 0
const CONTINUATION_COLUMN: usize = 6;
const CONTINUATION_MARKER: &str = "and";

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct TableRow {
    pub subj: String,
    pub crse: String,
    pub section: String,
    pub crn: String,
    pub title: String,
    pub credits: String,
    pub professor: String,
    pub class_cap: String,
    pub m: String,
    pub t: String,
    pub w: String,
    pub th: String,
    pub f: String,
    pub sat: String,
    pub sun: String,
    pub start: String,
    pub end: String,
    pub distribution: String,
    pub dj: String,
}

impl TableRow {
    /// "FILM 101 01"
    pub fn course_number(&self) -> String {
        [self.subj.as_str(), self.crse.as_str(), self.section.as_str()].join(" ")
    }

    pub fn schedule(&self) -> Option<ScheduleSlot> {
        ScheduleSlot::from_day_flags(
            [&self.m, &self.t, &self.w, &self.th, &self.f, &self.sat, &self.sun].map(|flag| flag.as_str()),
            &self.start,
            &self.end,
        )
    }
}

// The table has no description, crosslists, program or source
pub fn course_from_table_row(row: TableRow) -> Result<Course, RowError> {
    let primary = row
        .schedule()
        .ok_or_else(|| RowError::UnparseableSchedule(format!("{} - {}", row.start, row.end)))?;

    let distributional_area = [row.distribution.as_str(), row.dj.as_str()].join(" ");
    let course_number = row.course_number();

    let mut course = Course::new(row.crn, primary);

    course.set_title(Some(row.title));
    course.set_course_number(Some(course_number));
    course.set_professor(Some(row.professor));
    course.set_class_cap(Some(row.class_cap));
    course.set_credits(Some(row.credits));
    course.set_distributional_area(Some(&distributional_area));

    Ok(course)
}

// A continuation row's meeting time goes onto `target`, the course inserted
// just before it. Its professor fills in only a blank one.
pub fn apply_continuation(
    row: TableRow,
    courses: &mut CourseList,
    target: Option<&str>,
) -> Result<(), RowError> {
    let previous = target
        .and_then(|crn| courses.get_mut(crn))
        .ok_or(RowError::OrphanContinuation)?;

    if let Some(schedule) = row.schedule() {
        previous.add_schedule(schedule);
    }

    if previous.get_professor().is_none() {
        previous.set_professor(Some(row.professor));
    }

    Ok(())
}

pub fn read_table<R: Read>(input: R, courses: &mut CourseList, verbose: bool) -> Result<ReadReport> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let mut report = ReadReport::default();

    // One entry per regular row, in order. `None` is a row that was dropped,
    // so the continuation rows under it have nothing to attach to.
    let mut insert_record: Vec<Option<String>> = Vec::new();

    for (index, record) in reader.records().enumerate() {
        report.rows += 1;

        let record = match record {
            Ok(record) => record,
            Err(e) => {
                insert_record.push(None);
                report.fail(index + 1, e.into(), verbose);
                continue;
            }
        };

        let row = record
            .deserialize::<TableRow>(Some(&headers))
            .map_err(RowError::from);

        if record.get(CONTINUATION_COLUMN) == Some(CONTINUATION_MARKER) {
            let target = insert_record.last().cloned().flatten();

            match row.and_then(|row| apply_continuation(row, courses, target.as_deref())) {
                Ok(()) => report.continuations += 1,
                Err(e) => report.fail(index + 1, e, verbose),
            }

            continue;
        }

        match row.and_then(course_from_table_row) {
            Ok(course) => {
                insert_record.push(Some(course.get_crn_number().to_string()));
                courses.add(course);
                report.inserted += 1;
            }
            Err(e) => {
                insert_record.push(None);
                report.fail(index + 1, e, verbose);
            }
        }
    }

    info!(
        "Read {} table rows ({} courses, {} continuations, {} skipped)",
        report.rows,
        report.inserted,
        report.continuations,
        report.failures.len()
    );

    Ok(report)
}
