//! Delivery location

use std::fmt;

use thiserror::Error;
use tracing::{info, warn};

use crate::notifications::Notice;

/// Location assumed when the user has not picked one.
pub const DEFAULT_LOCATION: &str = "New York";

/// Errors related to location input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationError {
    /// The submitted text was empty or whitespace.
    #[error("Please enter a valid location")]
    Empty,
}

/// A non-blank delivery location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location(String);

impl Location {
    /// Validate user input, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::Empty`] if nothing is left after trimming.
    pub fn parse(text: &str) -> Result<Self, LocationError> {
        let trimmed = text.trim();

        if trimmed.is_empty() {
            return Err(LocationError::Empty);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Location text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The location currently used for restaurant search.
#[derive(Debug, Clone, Default)]
pub struct LocationState {
    current: Option<Location>,
    default_location: Option<String>,
}

impl LocationState {
    /// No location chosen yet, falling back to [`DEFAULT_LOCATION`].
    pub fn new() -> Self {
        Self::default()
    }

    /// No location chosen yet, falling back to `default_location`.
    pub fn with_default(default_location: impl Into<String>) -> Self {
        Self {
            current: None,
            default_location: Some(default_location.into()),
        }
    }

    /// Current location, if one has been chosen or defaulted.
    pub fn current(&self) -> Option<&Location> {
        self.current.as_ref()
    }

    /// Fill in the demo default if no location has been chosen.
    ///
    /// Returns the notice to show when the default was applied.
    pub fn apply_default(&mut self) -> Option<Notice> {
        if self.current.is_some() {
            return None;
        }

        let default_location = self.default_location.as_deref().unwrap_or(DEFAULT_LOCATION);
        let location = Location::parse(default_location)
            .or_else(|_err| Location::parse(DEFAULT_LOCATION))
            .ok()?;

        info!(location = %location, "applied default location");

        let notice = Notice::info(format!(
            "We've set your location to {location} for demo purposes"
        ));

        self.current = Some(location);

        Some(notice)
    }

    /// Handle a submission from the location dialog.
    ///
    /// Blank input keeps the previous location and yields an error notice.
    pub fn submit(&mut self, text: &str) -> Notice {
        match Location::parse(text) {
            Ok(location) => {
                info!(location = %location, "location updated");

                let notice = Notice::success(format!("Location updated to {location}"));
                self.current = Some(location);

                notice
            }
            Err(error) => {
                warn!(%error, "rejected location");

                Notice::error(error.to_string())
            }
        }
    }
}
