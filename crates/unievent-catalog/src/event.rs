//! Event data structure

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Administrative leave granted for attending an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DutyLeave {
    #[serde(rename = "FULL DAY DL")]
    FullDay,
    #[serde(rename = "HALF DAY DL")]
    HalfDay,
    #[serde(rename = "NO DL")]
    NoLeave,
}

impl DutyLeave {
    pub const ALL: [DutyLeave; 3] = [DutyLeave::FullDay, DutyLeave::HalfDay, DutyLeave::NoLeave];

    pub fn as_str(&self) -> &'static str {
        match self {
            DutyLeave::FullDay => "FULL DAY DL",
            DutyLeave::HalfDay => "HALF DAY DL",
            DutyLeave::NoLeave => "NO DL",
        }
    }
}

impl std::fmt::Display for DutyLeave {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DutyLeave {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FULL DAY DL" => Ok(DutyLeave::FullDay),
            "HALF DAY DL" => Ok(DutyLeave::HalfDay),
            "NO DL" => Ok(DutyLeave::NoLeave),
            _ => Err(format!("Unknown duty leave: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    /// Free-form display time, e.g. "10:00 AM"
    pub time: String,
    pub venue: String,
    pub category: String,
    pub duty_leave: DutyLeave,
    /// Image URL
    pub image: String,
    pub available_tickets: u32,
    pub total_tickets: u32,
    #[serde(default)]
    pub featured: bool,
}

impl Event {
    /// Share of tickets still shown as available, in percent
    pub fn availability_percentage(&self) -> f64 {
        if self.total_tickets == 0 {
            return 0.0;
        }
        f64::from(self.available_tickets) / f64::from(self.total_tickets) * 100.0
    }

    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.date > today
    }

    /// Case-insensitive substring match on title or description
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term) || self.description.to_lowercase().contains(&term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Event {
        serde_json::from_value(serde_json::json!({
            "id": "e1",
            "title": "Tech Fest",
            "description": "Annual technical festival",
            "date": "2030-03-15",
            "time": "10:00 AM",
            "venue": "Main Auditorium",
            "category": "Technical",
            "dutyLeave": "HALF DAY DL",
            "image": "https://images.example.com/techfest.jpg",
            "availableTickets": 150,
            "totalTickets": 600
        }))
        .unwrap()
    }

    #[test]
    fn test_event_from_catalog_json() {
        let event = sample();
        assert_eq!(event.duty_leave, DutyLeave::HalfDay);
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2030, 3, 15).unwrap());
        assert!(!event.featured);
    }

    #[test]
    fn test_availability_percentage() {
        let mut event = sample();
        assert_eq!(event.availability_percentage(), 25.0);

        event.total_tickets = 0;
        assert_eq!(event.availability_percentage(), 0.0);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let event = sample();
        assert!(event.matches_search("TECH"));
        assert!(event.matches_search("festival"));
        assert!(!event.matches_search("cultural"));
    }

    #[test]
    fn test_duty_leave_round_trip_names() {
        for leave in DutyLeave::ALL {
            assert_eq!(leave.as_str().parse::<DutyLeave>().unwrap(), leave);
        }
        assert!("HOLIDAY".parse::<DutyLeave>().is_err());
    }
}
