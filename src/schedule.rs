// ----------------------------------------------------------------------------
// Meeting times. The catalog pages write them as free text
// ("Tue  Thurs    10:10 AM – 11:30 AM Olin 203"), the registrar export as one
// flag column per weekday plus "10:10 AM" style start/end columns.
//
// Times stay as "H:MM" strings in 24 hour form. Nothing checks that they are
// real clock times beyond what the pattern accepts.
// ----------------------------------------------------------------------------

use ::serde::*;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

// <days> <start> <AM|PM> <one separator glyph> <end> <AM|PM> <location>
const SCHEDULE_REGEX: &str = r"^(.*?)([0-9]{1,2}:[0-9]{1,2})\s*?([AP]M)\s*?[^[:alnum:]]\s*?([0-9]{1,2}:[0-9]{1,2})\s*?([AP]M)\s*(.*)$";

// Flag value that marks a day as present in the registrar export, and the
// abbreviation it becomes. Order is Monday..Sunday.
const DAY_FLAGS: [(&str, &str); 7] = [
    ("M", "Mon"),
    ("T", "Tue"),
    ("W", "Wed"),
    ("Th", "Thurs"),
    ("F", "Fri"),
    ("Sat", "Sat"),
    ("Sun", "Sun"),
];

lazy_static! {
    static ref SCHEDULE_RE: Regex = Regex::new(SCHEDULE_REGEX).unwrap();
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    Primary,
    Lab,
    Screening,
    Additional,
    Unlabeled,
    // Any other tag, kept as written
    Other(String),
}

impl SlotKind {
    /// Classify a property type tag from the scrape export ("Lab:", "Screening", "null", ...).
    pub fn from_tag(tag: &str) -> SlotKind {
        let tag = tag.trim();

        if tag.is_empty() {
            SlotKind::Unlabeled
        } else if tag.starts_with("Primary") {
            SlotKind::Primary
        } else if tag.starts_with("Lab") {
            SlotKind::Lab
        } else if tag.starts_with("Screen") {
            SlotKind::Screening
        } else if tag == "null" || tag.starts_with("Additional") {
            SlotKind::Additional
        } else {
            SlotKind::Other(tag.to_string())
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ScheduleSlot {
    location: String,
    days: Vec<String>,
    start_time: String,
    end_time: String,
    kind: SlotKind,
}

impl ScheduleSlot {
    pub fn new(
        days: Vec<String>,
        start_time: String,
        end_time: String,
        location: String,
        kind: SlotKind,
    ) -> Self {
        ScheduleSlot {
            location,
            days,
            start_time,
            end_time,
            kind,
        }
    }

    /// Parse a free text schedule fragment.
    /// Returns `None` when the fragment does not hold two AM/PM qualified times.
    pub fn full(fragment: &str, kind: SlotKind) -> Option<ScheduleSlot> {
        let captures = SCHEDULE_RE.captures(fragment)?;

        let days = captures[1]
            .split_whitespace()
            .map(|day| day.to_string())
            .collect();

        let start_time = convert_to_24_hour(&captures[2], &captures[3])?;
        let end_time = convert_to_24_hour(&captures[4], &captures[5])?;

        Some(ScheduleSlot {
            location: captures[6].to_string(),
            days,
            start_time,
            end_time,
            kind,
        })
    }

    /// Build a slot from the registrar export's seven day flag columns
    /// (Monday first) and its "10:10 AM" style start/end columns.
    ///
    /// Fails only when no day is flagged and the times cannot be read either.
    /// Flagged days with unreadable times keep empty start/end times.
    pub fn from_day_flags(flags: [&str; 7], start: &str, end: &str) -> Option<ScheduleSlot> {
        let days: Vec<String> = flags
            .iter()
            .zip(DAY_FLAGS.iter())
            .filter(|(flag, (marker, _))| flag.trim() == *marker)
            .map(|(_, (_, day))| day.to_string())
            .collect();

        let times = split_time(start).zip(split_time(end));

        let (start_time, end_time) = match times {
            Some(times) => times,
            None if days.is_empty() => return None,
            None => (String::new(), String::new()),
        };

        Some(ScheduleSlot {
            location: String::new(),
            days,
            start_time,
            end_time,
            kind: SlotKind::Unlabeled,
        })
    }

    pub fn get_location(&self) -> &str {
        &self.location
    }

    pub fn get_days(&self) -> &[String] {
        &self.days
    }

    pub fn get_days_str(&self) -> String {
        self.days.join(" ")
    }

    pub fn get_start_time(&self) -> &str {
        &self.start_time
    }

    pub fn get_end_time(&self) -> &str {
        &self.end_time
    }

    pub fn get_kind(&self) -> &SlotKind {
        &self.kind
    }

    /// "Tue Thurs 10:10-11:30 Olin 203"
    pub fn brief(&self) -> String {
        format!(
            "{} {}-{} {}",
            self.get_days_str(),
            self.start_time,
            self.end_time,
            self.location
        )
    }
}

/// The four output columns of a slot: days, start, end, quoted location.
impl fmt::Display for ScheduleSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, \"{}\"",
            self.get_days_str(),
            self.start_time,
            self.end_time,
            self.location
        )
    }
}

/// "1:30" + "PM" -> "13:30". AM times pass through untouched, so "12:00 AM"
/// stays "12:00".
pub fn convert_to_24_hour(time: &str, marker: &str) -> Option<String> {
    if marker != "PM" {
        return Some(time.to_string());
    }

    let (hour, minute) = time.split_once(':')?;
    let mut hour = hour.trim().parse::<u32>().ok()?;

    // 12 PM is already right
    if hour < 12 {
        hour += 12;
    }

    Some(format!("{}:{}", hour, minute))
}

// "10:10 AM" -> "10:10"
fn split_time(raw: &str) -> Option<String> {
    let parts: Vec<&str> = raw.split_whitespace().collect();

    match parts.as_slice() {
        [time, marker] => convert_to_24_hour(time, marker),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_parses_days_times_and_location() {
        let slot = ScheduleSlot::full("Tue  Thurs    10:10 AM – 11:30 AM Olin 203", SlotKind::Primary).unwrap();

        assert_eq!(slot.get_days(), ["Tue", "Thurs"]);
        assert_eq!(slot.get_start_time(), "10:10");
        assert_eq!(slot.get_end_time(), "11:30");
        assert_eq!(slot.get_location(), "Olin 203");
        assert_eq!(slot.get_kind(), &SlotKind::Primary);
    }

    #[test]
    fn test_full_converts_pm() {
        let slot = ScheduleSlot::full("Mon Wed 1:30 PM - 2:50 PM RKC 103", SlotKind::Lab).unwrap();

        assert_eq!(slot.get_start_time(), "13:30");
        assert_eq!(slot.get_end_time(), "14:50");
        assert_eq!(slot.get_kind(), &SlotKind::Lab);
    }

    #[test]
    fn test_full_without_days_or_location() {
        let slot = ScheduleSlot::full("7:00 PM–9:00 PM", SlotKind::Screening).unwrap();

        assert!(slot.get_days().is_empty());
        assert_eq!(slot.get_start_time(), "19:00");
        assert_eq!(slot.get_end_time(), "21:00");
        assert_eq!(slot.get_location(), "");
    }

    #[test]
    fn test_full_no_match() {
        assert!(ScheduleSlot::full("TBA", SlotKind::Primary).is_none());
        assert!(ScheduleSlot::full("Tue 10:10 AM Olin", SlotKind::Primary).is_none());
        assert!(ScheduleSlot::full("", SlotKind::Primary).is_none());
    }

    #[test]
    fn test_convert_to_24_hour() {
        assert_eq!(convert_to_24_hour("9:00", "AM").unwrap(), "9:00");
        assert_eq!(convert_to_24_hour("1:30", "PM").unwrap(), "13:30");
        assert_eq!(convert_to_24_hour("12:00", "PM").unwrap(), "12:00");
        assert_eq!(convert_to_24_hour("12:00", "AM").unwrap(), "12:00");
        assert!(convert_to_24_hour("noon", "PM").is_none());
    }

    #[test]
    fn test_from_day_flags() {
        let slot = ScheduleSlot::from_day_flags(
            ["M", "", "W", "", "F", "", ""],
            "1:30 PM",
            "2:50 PM",
        )
        .unwrap();

        assert_eq!(slot.get_days(), ["Mon", "Wed", "Fri"]);
        assert_eq!(slot.get_start_time(), "13:30");
        assert_eq!(slot.get_end_time(), "14:50");
        assert_eq!(slot.get_location(), "");
        assert_eq!(slot.get_kind(), &SlotKind::Unlabeled);
    }

    #[test]
    fn test_from_day_flags_thursday_marker() {
        let slot = ScheduleSlot::from_day_flags(
            ["", "T", "", "Th", "", "", ""],
            "10:10 AM",
            "11:30 AM",
        )
        .unwrap();

        assert_eq!(slot.get_days(), ["Tue", "Thurs"]);
    }

    #[test]
    fn test_from_day_flags_failure() {
        assert!(ScheduleSlot::from_day_flags(["", "", "", "", "", "", ""], "", "").is_none());
        assert!(ScheduleSlot::from_day_flags(["", "", "", "", "", "", ""], "TBA", "10:00 AM").is_none());
    }

    #[test]
    fn test_from_day_flags_days_without_times() {
        let slot = ScheduleSlot::from_day_flags(["", "", "", "", "", "Sat", ""], "TBA", "").unwrap();

        assert_eq!(slot.get_days(), ["Sat"]);
        assert_eq!(slot.get_start_time(), "");
        assert_eq!(slot.get_end_time(), "");
    }

    #[test]
    fn test_slot_kind_from_tag() {
        assert_eq!(SlotKind::from_tag("Lab:"), SlotKind::Lab);
        assert_eq!(SlotKind::from_tag("Screening"), SlotKind::Screening);
        assert_eq!(SlotKind::from_tag("null"), SlotKind::Additional);
        assert_eq!(SlotKind::from_tag("Additional Meeting:"), SlotKind::Additional);
        assert_eq!(SlotKind::from_tag(""), SlotKind::Unlabeled);
        assert_eq!(SlotKind::from_tag(" Studio: "), SlotKind::Other("Studio:".to_string()));
    }

    #[test]
    fn test_display_and_brief() {
        let slot = ScheduleSlot::full("Tue Thurs 10:10 AM – 11:30 AM Olin 203", SlotKind::Primary).unwrap();

        assert_eq!(slot.to_string(), "Tue Thurs, 10:10, 11:30, \"Olin 203\"");
        assert_eq!(slot.brief(), "Tue Thurs 10:10-11:30 Olin 203");
    }
}
