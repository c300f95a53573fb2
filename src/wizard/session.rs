//! # Wizard Session
//!
//! Plain state container for one import session. Performs no validation;
//! transition rules live in [`ImportWizard`](super::ImportWizard).
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{fmt, ops::Deref};

use super::method::ImportMethod;

/// Wizard phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Method,
    Input,
    Review,
    Complete,
}

impl Phase {
    pub const ALL: [Self; 4] = [Self::Method, Self::Input, Self::Review, Self::Complete];

    pub const fn index(self) -> usize {
        match self {
            Self::Method => 0,
            Self::Input => 1,
            Self::Review => 2,
            Self::Complete => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Method => "Method",
            Self::Input => "Input",
            Self::Review => "Review",
            Self::Complete => "Complete",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().to_lowercase())
    }
}

/// One live import session.
#[derive(Debug, Clone)]
pub struct WizardSession<R> {
    phase: Phase,
    selected_method: Option<ImportMethod>,
    staged: Vec<R>,
    busy: bool,
}

impl<R> Default for WizardSession<R> {
    fn default() -> Self {
        Self {
            phase: Phase::Method,
            selected_method: None,
            staged: Vec::new(),
            busy: false,
        }
    }
}

impl<R> WizardSession<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub const fn selected_method(&self) -> Option<ImportMethod> {
        self.selected_method
    }

    pub fn set_selected_method(&mut self, method: Option<ImportMethod>) {
        self.selected_method = method;
    }

    pub fn staged(&self) -> &[R] {
        &self.staged
    }

    pub fn staged_mut(&mut self) -> &mut Vec<R> {
        &mut self.staged
    }

    pub fn set_staged(&mut self, staged: Vec<R>) {
        self.staged = staged;
    }

    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Marks the session busy until the returned guard is dropped, including
    /// when the future awaiting a host call is itself dropped.
    pub fn busy_guard(&mut self) -> BusyGuard<'_, R> {
        self.busy = true;
        BusyGuard { session: self }
    }

    /// Returns every field to its initial value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Clears the busy flag on drop. Derefs to the session for read access.
pub struct BusyGuard<'a, R> {
    session: &'a mut WizardSession<R>,
}

impl<R> Deref for BusyGuard<'_, R> {
    type Target = WizardSession<R>;

    fn deref(&self) -> &Self::Target {
        self.session
    }
}

impl<R> Drop for BusyGuard<'_, R> {
    fn drop(&mut self) {
        self.session.busy = false;
    }
}
