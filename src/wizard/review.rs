//! # Review Operations
//!
//! Local mutations of the staged list during the review step: field edits,
//! deletions, multi-select, and the destructive keyword quick filter.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::collections::{BTreeSet, HashSet};

use super::{
    error::{FieldError, WizardError},
    record::{matches_any_keyword, StagedRecord},
};

/// Ids of the records checked in the review table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Flips one id; returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn insert(&mut self, id: &str) {
        self.ids.insert(id.to_string());
    }

    pub fn remove(&mut self, id: &str) {
        self.ids.remove(id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }
}

/// Fails with the first id that occurs more than once.
pub fn ensure_unique_ids<'a, R, I>(records: I) -> Result<(), WizardError>
where
    R: StagedRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.id()) {
            return Err(WizardError::DuplicateId(record.id().to_string()));
        }
    }
    Ok(())
}

/// Updates one field on one record. The record id never changes.
pub fn edit_field<R: StagedRecord>(
    records: &mut [R],
    id: &str,
    key: &str,
    value: &str,
) -> Result<(), WizardError> {
    let record = records
        .iter_mut()
        .find(|r| r.id() == id)
        .ok_or_else(|| WizardError::UnknownRecord(id.to_string()))?;

    let before = record.clone();
    if let Err(err) = record.set_field(key, value) {
        *record = before;
        return Err(err.into());
    }
    if record.id() != before.id() {
        *record = before;
        return Err(FieldError::ReadOnly(key.to_string()).into());
    }
    Ok(())
}

/// Removes one record and its selection.
pub fn delete_record<R: StagedRecord>(
    records: &mut Vec<R>,
    selection: &mut Selection,
    id: &str,
) -> Result<R, WizardError> {
    let index = records
        .iter()
        .position(|r| r.id() == id)
        .ok_or_else(|| WizardError::UnknownRecord(id.to_string()))?;
    selection.remove(id);
    Ok(records.remove(index))
}

/// Removes every record whose id is listed; returns how many were removed.
pub fn delete_many<R: StagedRecord, S: AsRef<str>>(
    records: &mut Vec<R>,
    selection: &mut Selection,
    ids: &[S],
) -> usize {
    let doomed: HashSet<&str> = ids.iter().map(AsRef::as_ref).collect();
    let before = records.len();
    records.retain(|r| !doomed.contains(r.id()));
    for id in &doomed {
        selection.remove(id);
    }
    before - records.len()
}

/// Removes every record whose display name contains any keyword.
pub fn quick_filter<R: StagedRecord, K: AsRef<str>>(
    records: &mut Vec<R>,
    selection: &mut Selection,
    keywords: &[K],
) -> usize {
    let doomed: Vec<String> = records
        .iter()
        .filter(|r| matches_any_keyword(r.display_name(), keywords))
        .map(|r| r.id().to_string())
        .collect();
    delete_many(records, selection, &doomed)
}
