//! Core error types

use thiserror::Error;

/// Errors raised while validating user-supplied values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Unknown blood group: {0}")]
    UnknownBloodGroup(String),
}

impl Error {
    /// Range check helper
    pub fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<()> {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(Error::OutOfRange {
                field,
                value,
                min,
                max,
            })
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
