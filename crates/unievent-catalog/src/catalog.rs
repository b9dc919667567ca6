//! Event catalog

use chrono::NaiveDate;
use std::collections::HashSet;
use std::path::Path;

use crate::error::CatalogError;
use crate::event::Event;
use crate::filter::EventFilter;
use crate::Result;

const BUILTIN_EVENTS: &str = include_str!("../data/events.json");

/// Ordered, read-only list of events
#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    events: Vec<Event>,
}

impl EventCatalog {
    pub fn new(events: Vec<Event>) -> Result<Self> {
        let mut seen = HashSet::new();
        for event in &events {
            if !seen.insert(event.id.as_str()) {
                return Err(CatalogError::DuplicateId(event.id.clone()));
            }
        }

        Ok(Self { events })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let events: Vec<Event> = serde_json::from_str(json)?;
        Self::new(events)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json_str(&json)?;

        tracing::info!(
            path = %path.as_ref().display(),
            event_count = catalog.len(),
            "Loaded event catalog"
        );

        Ok(catalog)
    }

    /// The sample catalog bundled with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_EVENTS)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Events flagged for the home page slideshow
    pub fn featured(&self) -> Vec<&Event> {
        self.events.iter().filter(|e| e.featured).collect()
    }

    /// "All" followed by each category in first-seen order
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec!["All".to_string()];
        for event in &self.events {
            if !categories.contains(&event.category) {
                categories.push(event.category.clone());
            }
        }
        categories
    }

    /// "All" followed by each venue in first-seen order
    pub fn venues(&self) -> Vec<String> {
        let mut venues = vec!["All".to_string()];
        for event in &self.events {
            if !venues.contains(&event.venue) {
                venues.push(event.venue.clone());
            }
        }
        venues
    }

    pub fn filter(&self, filter: &EventFilter) -> Vec<&Event> {
        self.events.iter().filter(|e| filter.matches(e)).collect()
    }

    /// Other events dated after `today`, in catalog order
    pub fn upcoming_excluding(&self, event_id: &str, today: NaiveDate, limit: usize) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.id != event_id && e.is_upcoming(today))
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::DutyLeave;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = EventCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.get("3").unwrap().title, "Career Guidance Seminar");
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_featured_and_categories() {
        let catalog = EventCatalog::builtin().unwrap();

        let featured: Vec<_> = catalog.featured().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(featured, vec!["1", "2", "4"]);

        assert_eq!(
            catalog.categories(),
            vec!["All", "Technical", "Cultural", "Academic", "Sports"]
        );
    }

    #[test]
    fn test_filter_combines_fields() {
        let catalog = EventCatalog::builtin().unwrap();

        let all = catalog.filter(&EventFilter::new().category("All"));
        assert_eq!(all.len(), 5);

        let technical = catalog.filter(&EventFilter::new().category("Technical"));
        assert_eq!(technical.len(), 2);

        let half_day = catalog.filter(&EventFilter::new().duty_leave(DutyLeave::HalfDay));
        let ids: Vec<_> = half_day.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "4"]);

        let combined = catalog.filter(
            &EventFilter::new()
                .search("PITCH")
                .category("Technical")
                .duty_leave(DutyLeave::FullDay),
        );
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].id, "5");

        let none = catalog.filter(&EventFilter::new().search("pitch").category("Sports"));
        assert!(none.is_empty());
    }

    #[test]
    fn test_filter_by_venue() {
        let catalog = EventCatalog::builtin().unwrap();

        assert_eq!(
            catalog.venues(),
            vec![
                "All",
                "Baldev Raj Mittal Auditorium",
                "Shanti Devi Mittal Auditorium",
                "Block 34, Seminar Hall",
                "University Sports Ground",
                "Unipolis Hall",
            ]
        );

        let auditorium = catalog.filter(&EventFilter::new().venue("Shanti Devi Mittal Auditorium"));
        let ids: Vec<_> = auditorium.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);

        assert_eq!(catalog.filter(&EventFilter::new().venue("All")).len(), 5);

        let mismatch = catalog.filter(
            &EventFilter::new()
                .category("Technical")
                .venue("Shanti Devi Mittal Auditorium"),
        );
        assert!(mismatch.is_empty());
    }

    #[test]
    fn test_duty_leave_by_name() {
        let catalog = EventCatalog::builtin().unwrap();

        let filter = EventFilter::new().duty_leave_named("FULL DAY DL").unwrap();
        let ids: Vec<_> = catalog.filter(&filter).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "5"]);

        let all = EventFilter::new()
            .duty_leave(DutyLeave::HalfDay)
            .duty_leave_named("All")
            .unwrap();
        assert_eq!(all.duty_leave, None);

        assert!(matches!(
            EventFilter::new().duty_leave_named("QUARTER DAY DL"),
            Err(CatalogError::UnknownDutyLeave(_))
        ));
    }

    #[test]
    fn test_upcoming_excluding() {
        let catalog = EventCatalog::builtin().unwrap();

        let upcoming = catalog.upcoming_excluding("2", date(2025, 3, 15), 3);
        let ids: Vec<_> = upcoming.iter().map(|e| e.id.as_str()).collect();
        // Event 1 is on the same day, so it is not upcoming
        assert_eq!(ids, vec!["3", "4", "5"]);

        assert!(catalog
            .upcoming_excluding("1", date(2030, 1, 1), 3)
            .is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"[
            {"id":"a","title":"A","description":"","date":"2025-01-01","time":"","venue":"",
             "category":"X","dutyLeave":"NO DL","image":"","availableTickets":1,"totalTickets":1},
            {"id":"a","title":"B","description":"","date":"2025-01-02","time":"","venue":"",
             "category":"X","dutyLeave":"NO DL","image":"","availableTickets":1,"totalTickets":1}
        ]"#;

        let err = EventCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(&path, BUILTIN_EVENTS).unwrap();

        let catalog = EventCatalog::from_path(&path).unwrap();
        assert_eq!(catalog.len(), 5);

        assert!(matches!(
            EventCatalog::from_path(dir.path().join("missing.json")),
            Err(CatalogError::Io(_))
        ));
    }
}
