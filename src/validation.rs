//! Input validation for simulation runs.
//!
//! Checks structural integrity of the simulated user list before
//! scheduling. Detects:
//! - Duplicate user IDs
//! - Non-positive booking times (every slice must have positive length)
//! - Negative arrival times
//! - Queues whose completion time would overflow the minute clock
//!
//! All problems are collected and reported together.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::SimUser;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two users share the same ID.
    DuplicateId,
    /// A user needs zero or negative service time.
    InvalidDuration,
    /// A user arrives before the booking window opens.
    InvalidArrival,
    /// The Round-Robin quantum is not positive.
    InvalidQuantum,
    /// Latest arrival plus total booking time does not fit in the clock.
    HorizonOverflow,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a user list for scheduling.
///
/// Checks:
/// 1. No duplicate user IDs
/// 2. Every booking time is > 0
/// 3. Every arrival time is >= 0
/// 4. `max(arrival) + sum(booking)` fits in an `i64`, which bounds every
///    clock value a discipline can reach
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_users(users: &[SimUser]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for user in users {
        if !ids.insert(user.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate user ID: {}", user.id),
            ));
        }

        if user.booking_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!(
                    "User {} has non-positive booking time {}",
                    user.id, user.booking_time
                ),
            ));
        }

        if user.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidArrival,
                format!(
                    "User {} arrives before the window opens ({})",
                    user.id, user.arrival_time
                ),
            ));
        }
    }

    let latest_arrival = users.iter().map(|u| u.arrival_time).max().unwrap_or(0);
    let horizon = users
        .iter()
        .try_fold(latest_arrival, |acc, u| acc.checked_add(u.booking_time.max(0)));
    if horizon.is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::HorizonOverflow,
            format!(
                "Queue of {} users cannot complete before the clock overflows",
                users.len()
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a Round-Robin time quantum.
pub fn validate_quantum(quantum: i64) -> ValidationResult {
    if quantum > 0 {
        Ok(())
    } else {
        Err(vec![ValidationError::new(
            ValidationErrorKind::InvalidQuantum,
            format!("Time quantum must be positive, got {quantum}"),
        )])
    }
}
