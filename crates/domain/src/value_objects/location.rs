//! Event location, structured when address parts are known

use std::fmt;

use serde::{Deserialize, Serialize};

/// Structured postal address parts
///
/// All parts are optional; the display form skips what is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    /// Street and house number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    /// Postal code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// City
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Country
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl PostalAddress {
    /// Whether no part of the address is filled in
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.street.is_none()
            && self.postal_code.is_none()
            && self.city.is_none()
            && self.country.is_none()
    }
}

impl fmt::Display for PostalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(street) = &self.street {
            parts.push(street.clone());
        }
        match (&self.postal_code, &self.city) {
            (Some(code), Some(city)) => parts.push(format!("{code} {city}")),
            (Some(code), None) => parts.push(code.clone()),
            (None, Some(city)) => parts.push(city.clone()),
            (None, None) => {},
        }
        if let Some(country) = &self.country {
            parts.push(country.clone());
        }
        write!(f, "{}", parts.join(", "))
    }
}

/// Where an event takes place
///
/// Composed from structured address parts when the linked resource carries
/// them, otherwise a plain string as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// A structured postal address
    Address(PostalAddress),
    /// Free-form location text
    Freeform(String),
}

impl Location {
    /// The display string sent to the remote provider
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Address(address) => address.to_string(),
            Self::Freeform(text) => text.clone(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
