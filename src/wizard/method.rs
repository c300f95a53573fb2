//! # Import Methods
//!
//! Data-described input modalities. A host declares which methods it offers
//! with [`MethodDescriptor`]s; the wizard dispatches on the [`ImportMethod`] tag.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{fmt, str::FromStr};

/// Input modality tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportMethod {
    Text,
    Voice,
    Photo,
    Barcode,
    DigitalReceipt,
}

impl ImportMethod {
    pub const ALL: [Self; 5] = [
        Self::Text,
        Self::Voice,
        Self::Photo,
        Self::Barcode,
        Self::DigitalReceipt,
    ];

    /// Stable identifier used in config and on the command line.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Voice => "voice",
            Self::Photo => "photo",
            Self::Barcode => "barcode",
            Self::DigitalReceipt => "receipt",
        }
    }
}

impl fmt::Display for ImportMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ImportMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "voice" => Ok(Self::Voice),
            "photo" | "image" => Ok(Self::Photo),
            "barcode" => Ok(Self::Barcode),
            "receipt" | "digital-receipt" | "url" => Ok(Self::DigitalReceipt),
            other => Err(format!("unknown import method '{other}'")),
        }
    }
}

/// Whether a declared method can be chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    #[default]
    Available,
    /// Shown but not selectable (e.g. no converter configured).
    Disabled,
    /// Shown as an upcoming feature, not selectable.
    ComingSoon,
}

/// Static description of one import method, declared by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub method: ImportMethod,
    pub label: String,
    pub description: String,
    pub availability: Availability,
}

impl MethodDescriptor {
    pub fn new(method: ImportMethod, label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            method,
            label: label.into(),
            description: description.into(),
            availability: Availability::Available,
        }
    }

    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.availability = Availability::Disabled;
        self
    }

    #[must_use]
    pub const fn coming_soon(mut self) -> Self {
        self.availability = Availability::ComingSoon;
        self
    }

    pub fn is_selectable(&self) -> bool {
        self.availability == Availability::Available
    }
}

/// A host-declared image import type (what a photo shows).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportType {
    pub key: String,
    pub label: String,
    /// Batch conversion is used when set, single-file conversion otherwise.
    pub supports_multiple: bool,
}

impl ImportType {
    pub fn new(key: impl Into<String>, label: impl Into<String>, supports_multiple: bool) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            supports_multiple,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parsing() {
        assert_eq!("Text".parse::<ImportMethod>(), Ok(ImportMethod::Text));
        assert_eq!("receipt".parse::<ImportMethod>(), Ok(ImportMethod::DigitalReceipt));
        assert_eq!("image".parse::<ImportMethod>(), Ok(ImportMethod::Photo));
        assert!("fax".parse::<ImportMethod>().is_err());
    }

    #[test]
    fn test_descriptor_availability() {
        let d = MethodDescriptor::new(ImportMethod::Voice, "Voice", "Dictate");
        assert!(d.is_selectable());
        assert!(!d.clone().disabled().is_selectable());
        assert!(!d.coming_soon().is_selectable());
    }

    #[test]
    fn test_key_roundtrips_through_from_str() {
        for method in ImportMethod::ALL {
            assert_eq!(method.key().parse::<ImportMethod>(), Ok(method));
        }
    }
}
