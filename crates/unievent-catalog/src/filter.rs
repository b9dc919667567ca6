//! Event list filters

use crate::error::CatalogError;
use crate::event::{DutyLeave, Event};
use crate::Result;

/// Selection applied to the event list. `None` on a field means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub search: String,
    pub category: Option<String>,
    pub duty_leave: Option<DutyLeave>,
    pub venue: Option<String>,
}

fn selection(value: String) -> Option<String> {
    if value == "All" {
        None
    } else {
        Some(value)
    }
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// "All" clears the category selection
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = selection(category.into());
        self
    }

    pub fn duty_leave(mut self, duty_leave: DutyLeave) -> Self {
        self.duty_leave = Some(duty_leave);
        self
    }

    /// Select duty leave by its display name, e.g. "HALF DAY DL"; "All" clears it
    pub fn duty_leave_named(mut self, name: &str) -> Result<Self> {
        self.duty_leave = match name {
            "All" => None,
            name => Some(name.parse::<DutyLeave>().map_err(CatalogError::UnknownDutyLeave)?),
        };
        Ok(self)
    }

    /// "All" clears the venue selection
    pub fn venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = selection(venue.into());
        self
    }

    pub fn matches(&self, event: &Event) -> bool {
        let matches_search = self.search.is_empty() || event.matches_search(&self.search);
        let matches_category = self
            .category
            .as_deref()
            .map_or(true, |c| event.category == c);
        let matches_duty_leave = self.duty_leave.map_or(true, |d| event.duty_leave == d);
        let matches_venue = self.venue.as_deref().map_or(true, |v| event.venue == v);

        matches_search && matches_category && matches_duty_leave && matches_venue
    }
}
