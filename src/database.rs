use crate::course::*;
use crate::course_list::*;
use crate::error::*;
use ::serde::*;
use chrono::{DateTime, Utc};
use log::info;
use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CourseSnapshot {
    pub generated_at: DateTime<Utc>,
    pub record: Record,
    pub courses: Vec<Course>,
}

impl CourseSnapshot {
    pub fn new(courses: &CourseList) -> Self {
        CourseSnapshot {
            generated_at: Utc::now(),
            record: courses.get_record().clone(),
            courses: courses.courses().cloned().collect(),
        }
    }

    // Every course needs its primary slot, which a hand edited file can lose
    pub fn into_course_list(self) -> Result<CourseList> {
        if let Some(course) = self.courses.iter().find(|course| course.get_schedules().is_empty()) {
            return Err(Error::InvalidSnapshot(format!(
                "course {} has no schedules",
                course.get_crn_number()
            )));
        }

        Ok(CourseList::from_parts(self.courses, self.record))
    }
}

// A missing file is an empty list, not an error
pub fn load_course_database(path: &Path) -> Result<CourseList> {
    let file = OpenOptions::new().read(true).open(path);

    match file {
        Err(_) => Ok(CourseList::new()),
        Ok(mut file) => {
            let mut data = String::new();
            file.read_to_string(&mut data)?;

            let snapshot: CourseSnapshot = serde_json::from_str(&data)?;
            info!(
                "Loaded {} courses from {} (saved {})",
                snapshot.courses.len(),
                path.display(),
                snapshot.generated_at
            );

            snapshot.into_course_list()
        }
    }
}

pub fn save_course_database(path: &Path, courses: &CourseList) -> Result<()> {
    let mut writer = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;

    let serialized_output = serde_json::to_string(&CourseSnapshot::new(courses))?;

    writer.write_all(serialized_output.as_bytes())?;

    info!("Saved {} courses to {}", courses.len(), path.display());

    Ok(())
}
