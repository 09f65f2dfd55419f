//! Attendance at pit sessions and chamber events, and education hours.

use std::{collections::BTreeMap, fmt::Display};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use time::Date;

use crate::{
    Error,
    validation::{ValidationError, non_blank, parse_non_negative_decimal},
};

/// The ID of an attendance record.
pub type AttendanceRecordId = i64;

/// The education hours each member must complete.
pub const REQUIRED_EDUCATION_HOURS: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// The kinds of attendance that are tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AttendanceKind {
    PitSessions,
    ChamberEvents,
    EducationHours,
}

impl AttendanceKind {
    pub const ALL: [AttendanceKind; 3] = [
        AttendanceKind::PitSessions,
        AttendanceKind::ChamberEvents,
        AttendanceKind::EducationHours,
    ];

    /// The identifier used in URLs and forms, e.g. "pit-sessions".
    pub fn slug(self) -> &'static str {
        match self {
            AttendanceKind::PitSessions => "pit-sessions",
            AttendanceKind::ChamberEvents => "chamber-events",
            AttendanceKind::EducationHours => "education-hours",
        }
    }

    /// The plural label used for tabs, e.g. "Pit Sessions".
    pub fn label(self) -> &'static str {
        match self {
            AttendanceKind::PitSessions => "Pit Sessions",
            AttendanceKind::ChamberEvents => "Chamber Events",
            AttendanceKind::EducationHours => "Education Hours",
        }
    }

    /// The label for a single record, e.g. "Pit Session".
    pub fn singular_label(self) -> &'static str {
        match self {
            AttendanceKind::PitSessions => "Pit Session",
            AttendanceKind::ChamberEvents => "Chamber Event",
            AttendanceKind::EducationHours => "Education Hours",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        AttendanceKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == slug)
    }

    pub fn records_hours(self) -> bool {
        self == AttendanceKind::EducationHours
    }
}

impl Display for AttendanceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    pub id: AttendanceRecordId,
    pub kind: AttendanceKind,
    pub member_name: String,
    pub date: Date,
    pub notes: String,
    /// Only set for education hours.
    pub hours: Option<Decimal>,
}

/// A member's education hours against [REQUIRED_EDUCATION_HOURS].
#[derive(Debug, Clone, PartialEq)]
pub struct EducationProgress {
    pub member_name: String,
    pub hours: Decimal,
}

impl EducationProgress {
    /// The share of the required hours completed, rounded down and capped at 100.
    pub fn percent(&self) -> u32 {
        (self.hours * Decimal::ONE_HUNDRED / REQUIRED_EDUCATION_HOURS)
            .floor()
            .min(Decimal::ONE_HUNDRED)
            .to_u32()
            .unwrap_or_default()
    }
}

/// All attendance records, in the order they were added.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceLog {
    records: Vec<AttendanceRecord>,
    next_id: AttendanceRecordId,
}

impl Default for AttendanceLog {
    fn default() -> Self {
        Self::new()
    }
}

impl AttendanceLog {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Record attendance for `member_name`.
    ///
    /// `raw_hours` is only read for [AttendanceKind::EducationHours], where it
    /// must be a number greater than zero.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if the member name is blank or the hours
    /// are missing or invalid. Nothing is recorded on error.
    pub fn add_record(
        &mut self,
        kind: AttendanceKind,
        member_name: &str,
        date: Date,
        notes: &str,
        raw_hours: &str,
    ) -> Result<&AttendanceRecord, Error> {
        let member_name = non_blank(member_name).ok_or(ValidationError::EmptyMemberName)?;

        let hours = if kind.records_hours() {
            if raw_hours.trim().is_empty() {
                return Err(ValidationError::MissingEducationHours.into());
            }

            let hours = parse_non_negative_decimal(raw_hours)?;
            if hours.is_zero() {
                return Err(ValidationError::MissingEducationHours.into());
            }

            Some(hours)
        } else {
            None
        };

        let id = self.next_id;
        self.next_id += 1;

        self.records.push(AttendanceRecord {
            id,
            kind,
            member_name,
            date,
            notes: notes.trim().to_owned(),
            hours,
        });

        let record = self.records.len() - 1;
        Ok(&self.records[record])
    }

    /// Remove the record `id`, returning it.
    ///
    /// # Errors
    ///
    /// Returns [Error::AttendanceRecordNotFound] if there is no record with that ID.
    pub fn remove_record(&mut self, id: AttendanceRecordId) -> Result<AttendanceRecord, Error> {
        let index = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or(Error::AttendanceRecordNotFound(id))?;

        Ok(self.records.remove(index))
    }

    pub fn records(&self, kind: AttendanceKind) -> Vec<&AttendanceRecord> {
        self.records
            .iter()
            .filter(|record| record.kind == kind)
            .collect()
    }

    /// Each member's total education hours, sorted by name.
    pub fn education_hours_by_member(&self) -> Vec<EducationProgress> {
        let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();

        for record in self.records(AttendanceKind::EducationHours) {
            if let Some(hours) = record.hours {
                *totals.entry(record.member_name.as_str()).or_default() += hours;
            }
        }

        totals
            .into_iter()
            .map(|(member_name, hours)| EducationProgress {
                member_name: member_name.to_owned(),
                hours,
            })
            .collect()
    }
}
