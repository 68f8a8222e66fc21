use crate::course::*;
use ::serde::*;
use log::debug;
use std::collections::HashMap;

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub add: u64,
    pub merge: u64,
}

/// All courses seen so far, keyed by CRN. Iterates in first insertion order.
#[derive(Clone, Debug, Default)]
pub struct CourseList {
    courses: HashMap<String, Course>,
    order: Vec<String>,
    record: Record,
}

impl CourseList {
    pub fn new() -> Self {
        Self::default()
    }

    // Every call counts as an add, a CRN collision also as a merge
    pub fn add(&mut self, course: Course) {
        self.record.add += 1;

        match self.courses.get_mut(course.get_crn_number()) {
            Some(existing) => {
                debug!("Merging duplicate of CRN {}", course.get_crn_number());
                existing.merge(&course);
                self.record.merge += 1;
            }
            None => {
                self.order.push(course.get_crn_number().to_string());
                self.courses.insert(course.get_crn_number().to_string(), course);
            }
        }
    }

    pub fn get(&self, crn_number: &str) -> Option<&Course> {
        self.courses.get(crn_number)
    }

    pub fn get_mut(&mut self, crn_number: &str) -> Option<&mut Course> {
        self.courses.get_mut(crn_number)
    }

    pub fn contains(&self, crn_number: &str) -> bool {
        self.courses.contains_key(crn_number)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|crn| crn.as_str())
    }

    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.order.iter().filter_map(move |crn| self.courses.get(crn))
    }

    pub fn add_count(&self) -> u64 {
        self.record.add
    }

    pub fn merge_count(&self) -> u64 {
        self.record.merge
    }

    pub fn get_record(&self) -> &Record {
        &self.record
    }

    // Counters come from `record`, not from replaying the adds
    pub fn from_parts(courses: Vec<Course>, record: Record) -> Self {
        let mut list = CourseList::new();

        for course in courses {
            list.add(course);
        }

        list.record = record;
        list
    }

    /// "N courses (A added, M merged)"
    pub fn summary(&self) -> String {
        format!(
            "{} courses ({} added, {} merged)",
            self.len(),
            self.record.add,
            self.record.merge
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::*;

    fn course(crn: &str, description: &str) -> Course {
        let slot = ScheduleSlot::full("Mon 9:00 AM - 10:00 AM Hall 1", SlotKind::Primary).unwrap();
        let mut course = Course::new(crn.to_string(), slot);
        course.set_description(Some(description.to_string()));
        course
    }

    #[test]
    fn test_add_and_lookup() {
        let mut list = CourseList::new();
        list.add(course("100", "a"));

        assert!(list.contains("100"));
        assert!(!list.contains("200"));
        assert_eq!(list.get("100").unwrap().get_description(), Some("a"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_counters() {
        let mut list = CourseList::new();
        for crn in ["1", "2", "1", "3", "2", "1"] {
            list.add(course(crn, ""));
        }

        assert_eq!(list.add_count(), 6);
        assert_eq!(list.merge_count(), 3);
        assert_eq!(list.len(), 3);
        assert_eq!(list.summary(), "3 courses (6 added, 3 merged)");
    }

    #[test]
    fn test_iteration_keeps_insertion_order() {
        let mut list = CourseList::new();
        for crn in ["30", "10", "20", "10"] {
            list.add(course(crn, ""));
        }

        assert_eq!(list.iter().collect::<Vec<_>>(), ["30", "10", "20"]);
        assert_eq!(
            list.courses().map(|c| c.get_crn_number()).collect::<Vec<_>>(),
            ["30", "10", "20"]
        );
    }

    #[test]
    fn test_collision_merges_in_place() {
        let mut list = CourseList::new();
        list.add(course("1", "short"));
        list.add(course("1", "much longer"));
        list.add(course("1", "tiny"));

        assert_eq!(list.get("1").unwrap().get_description(), Some("much longer"));
    }

    #[test]
    fn test_from_parts_restores_record() {
        let record = Record { add: 9, merge: 4 };
        let list = CourseList::from_parts(vec![course("1", ""), course("2", "")], record.clone());

        assert_eq!(list.len(), 2);
        assert_eq!(list.get_record(), &record);
    }
}
