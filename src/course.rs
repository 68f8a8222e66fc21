use crate::schedule::*;
use ::serde::*;
use lazy_static::lazy_static;
use regex::Regex;

// Distribution areas are short capital acronyms, "A+H", "SA", "PS"...
const AREA_REGEX: &str = r"[A-Z+]{2,3}";

// Straight quotes would break the quoted description column
const TYPOGRAPHIC_QUOTE: &str = "“";

lazy_static! {
    static ref AREA_RE: Regex = Regex::new(AREA_REGEX).unwrap();
}

/// One course section, keyed by its CRN.
///
/// Text fields are `None` until a source supplies a non-empty value. They only
/// turn into empty strings when a row is written out.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Course {
    crn_number: String,
    title: Option<String>,
    course_number: Option<String>,
    professor: Option<String>,
    class_cap: Option<String>,
    credits: Option<String>,
    description: Option<String>,
    distributional_area: Vec<String>,
    crosslists: Option<String>,
    program: Option<String>,
    source: Option<String>,
    schedules: Vec<ScheduleSlot>,
}

impl Course {
    /// Every course starts from its primary meeting, which stays at index 0.
    pub fn new(crn_number: String, primary: ScheduleSlot) -> Self {
        Course {
            crn_number,
            title: None,
            course_number: None,
            professor: None,
            class_cap: None,
            credits: None,
            description: None,
            distributional_area: Vec::new(),
            crosslists: None,
            program: None,
            source: None,
            schedules: vec![primary],
        }
    }

    pub fn get_crn_number(&self) -> &str {
        &self.crn_number
    }

    pub fn get_title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.title = non_empty(title);
    }

    pub fn get_course_number(&self) -> Option<&str> {
        self.course_number.as_deref()
    }

    pub fn set_course_number(&mut self, course_number: Option<String>) {
        self.course_number = non_empty(course_number);
    }

    pub fn get_professor(&self) -> Option<&str> {
        self.professor.as_deref()
    }

    pub fn set_professor(&mut self, professor: Option<String>) {
        self.professor = non_empty(professor);
    }

    pub fn get_class_cap(&self) -> Option<&str> {
        self.class_cap.as_deref()
    }

    pub fn set_class_cap(&mut self, class_cap: Option<String>) {
        self.class_cap = non_empty(class_cap);
    }

    pub fn get_credits(&self) -> Option<&str> {
        self.credits.as_deref()
    }

    pub fn set_credits(&mut self, credits: Option<String>) {
        self.credits = non_empty(credits);
    }

    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = non_empty(description).map(|d| d.replace('"', TYPOGRAPHIC_QUOTE));
    }

    pub fn get_distributional_area(&self) -> &[String] {
        &self.distributional_area
    }

    /// Keeps only the acronyms found in `raw`: "Dist: A+H, SA" -> ["A+H", "SA"]
    pub fn set_distributional_area(&mut self, raw: Option<&str>) {
        self.distributional_area = raw
            .map(|raw| {
                AREA_RE
                    .find_iter(raw)
                    .map(|area| area.as_str().to_string())
                    .collect()
            })
            .unwrap_or_default();
    }

    pub fn get_crosslists(&self) -> Option<&str> {
        self.crosslists.as_deref()
    }

    pub fn set_crosslists(&mut self, crosslists: Option<String>) {
        self.crosslists = non_empty(crosslists);
    }

    pub fn get_program(&self) -> Option<&str> {
        self.program.as_deref()
    }

    pub fn set_program(&mut self, program: Option<String>) {
        self.program = non_empty(program);
    }

    pub fn get_source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn set_source(&mut self, source: Option<String>) {
        self.source = non_empty(source);
    }

    pub fn get_schedules(&self) -> &[ScheduleSlot] {
        &self.schedules
    }

    pub fn get_primary_schedule(&self) -> &ScheduleSlot {
        &self.schedules[0]
    }

    pub fn add_schedule(&mut self, schedule: ScheduleSlot) {
        self.schedules.push(schedule);
    }

    /// Fold a duplicate record of this course into it.
    ///
    /// Description, distribution areas and crosslists take whichever value is
    /// longer; on a tie the stored value stays. Every other field keeps its
    /// first seen value.
    pub fn merge(&mut self, other: &Course) {
        if text_len(&other.description) > text_len(&self.description) {
            self.description = other.description.clone();
        }

        if other.distributional_area.len() > self.distributional_area.len() {
            self.distributional_area = other.distributional_area.clone();
        }

        if text_len(&other.crosslists) > text_len(&self.crosslists) {
            self.crosslists = other.crosslists.clone();
        }
    }
}

/// Empty strings are the sources' way of saying "unset".
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn text_len(value: &Option<String>) -> usize {
    value.as_deref().map(|v| v.chars().count()).unwrap_or(0)
}
