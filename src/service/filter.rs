//! Creation-date filtering
//!
//! A `DateFilter` is a plain predicate; pass `|c| filter.matches(c)` to
//! `ContactService::filter_contacts`.

use chrono::NaiveDate;

use crate::contact::Contact;

/// How a contact's creation date is compared to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateComparison {
    Before,
    After,
    OnDate,
}

/// Compares the UTC calendar date of `created_at` against a target date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFilter {
    target: NaiveDate,
    comparison: DateComparison,
}

impl DateFilter {
    pub fn new(target: NaiveDate, comparison: DateComparison) -> Self {
        Self { target, comparison }
    }

    pub fn matches(&self, contact: &Contact) -> bool {
        let created = contact.created_at.date_naive();
        match self.comparison {
            DateComparison::Before => created < self.target,
            DateComparison::After => created > self.target,
            DateComparison::OnDate => created == self.target,
        }
    }
}
