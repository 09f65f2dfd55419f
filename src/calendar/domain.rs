//! Calendar events and the store that holds them.

use time::Date;

use crate::{
    Error,
    validation::{ValidationError, non_blank},
};

/// The ID of a calendar event.
pub type EventId = i64;

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: EventId,
    pub title: String,
    pub date: Date,
    pub description: Option<String>,
}

/// The events on the calendar, in the order they were added.
#[derive(Debug, Clone, PartialEq)]
pub struct EventCalendar {
    events: Vec<CalendarEvent>,
    next_id: EventId,
}

impl Default for EventCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl EventCalendar {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Add an event on `date`.
    ///
    /// A blank `description` is stored as no description.
    ///
    /// # Errors
    ///
    /// Returns [ValidationError::EmptyEventTitle] if `title` is blank.
    pub fn add_event(
        &mut self,
        title: &str,
        description: &str,
        date: Date,
    ) -> Result<&CalendarEvent, Error> {
        let title = non_blank(title).ok_or(ValidationError::EmptyEventTitle)?;

        let id = self.next_id;
        self.next_id += 1;

        self.events.push(CalendarEvent {
            id,
            title,
            date,
            description: non_blank(description),
        });

        let event = self.events.len() - 1;
        Ok(&self.events[event])
    }

    /// Remove the event `id`, returning it.
    ///
    /// # Errors
    ///
    /// Returns [Error::EventNotFound] if there is no event with that ID.
    pub fn remove_event(&mut self, id: EventId) -> Result<CalendarEvent, Error> {
        let index = self
            .events
            .iter()
            .position(|event| event.id == id)
            .ok_or(Error::EventNotFound(id))?;

        Ok(self.events.remove(index))
    }

    pub fn events_on(&self, date: Date) -> Vec<&CalendarEvent> {
        self.events.iter().filter(|event| event.date == date).collect()
    }

    pub fn has_events(&self, date: Date) -> bool {
        self.events.iter().any(|event| event.date == date)
    }

    /// Up to `limit` events on or after `from`, soonest first.
    pub fn upcoming(&self, from: Date, limit: usize) -> Vec<&CalendarEvent> {
        let mut events = self
            .events
            .iter()
            .filter(|event| event.date >= from)
            .collect::<Vec<_>>();
        events.sort_by_key(|event| (event.date, event.id));
        events.truncate(limit);
        events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
