//! Configuration validation utilities

use crate::PassageError;
use std::fmt;

/// Configuration validation result
pub type ValidationResult = Result<(), ValidationError>;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Value is required but missing
    Required {
        /// Dotted field path
        field: String,
    },
    /// Value is out of acceptable range
    OutOfRange {
        /// Dotted field path
        field: String,
        /// Inclusive lower bound
        min: Option<u64>,
        /// Inclusive upper bound
        max: Option<u64>,
        /// Offending value
        actual: u64,
    },
    /// Value format is invalid
    InvalidFormat {
        /// Dotted field path
        field: String,
        /// Description of the accepted format
        expected: String,
        /// Offending value
        actual: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Required { field } => {
                write!(f, "Field '{field}' is required but missing")
            }
            ValidationError::OutOfRange {
                field,
                min,
                max,
                actual,
            } => {
                let range_desc = match (min, max) {
                    (Some(min), Some(max)) => format!("between {min} and {max}"),
                    (Some(min), None) => format!("at least {min}"),
                    (None, Some(max)) => format!("at most {max}"),
                    (None, None) => "in valid range".to_string(),
                };
                write!(f, "Field '{field}' must be {range_desc} (got {actual})")
            }
            ValidationError::InvalidFormat {
                field,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Field '{field}' has invalid format. Expected: {expected}, got: {actual:?}"
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for PassageError {
    fn from(err: ValidationError) -> Self {
        PassageError::invalid(err.to_string())
    }
}

/// Configuration validator that accumulates validation failures
#[derive(Debug, Default)]
pub struct ConfigValidator {
    errors: Vec<ValidationError>,
    field_prefix: String,
}

impl ConfigValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator for a nested field
    pub fn for_field(&self, field_name: &str) -> Self {
        Self {
            errors: Vec::new(),
            field_prefix: self.full_field_name(field_name),
        }
    }

    /// Validate that a string is non-empty
    pub fn non_empty(&mut self, field_name: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(ValidationError::Required {
                field: self.full_field_name(field_name),
            });
        }
        self
    }

    /// Validate that a number is within range
    pub fn range(
        &mut self,
        field_name: &str,
        value: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> &mut Self {
        let below = min.is_some_and(|min| value < min);
        let above = max.is_some_and(|max| value > max);
        if below || above {
            self.errors.push(ValidationError::OutOfRange {
                field: self.full_field_name(field_name),
                min,
                max,
                actual: value,
            });
        }
        self
    }

    /// Validate that a route path is absolute
    pub fn route(&mut self, field_name: &str, value: &str) -> &mut Self {
        if !value.starts_with('/') || value.chars().any(char::is_whitespace) {
            self.errors.push(ValidationError::InvalidFormat {
                field: self.full_field_name(field_name),
                expected: "absolute path starting with '/'".to_string(),
                actual: value.to_string(),
            });
        }
        self
    }

    /// Validate a collection of items
    pub fn each<T, F>(&mut self, field_name: &str, items: &[T], mut validator: F) -> &mut Self
    where
        F: FnMut(&mut ConfigValidator, &T),
    {
        for (index, item) in items.iter().enumerate() {
            let mut item_validator = self.for_field(&format!("{field_name}[{index}]"));
            validator(&mut item_validator, item);
            self.merge(item_validator);
        }
        self
    }

    /// Merge errors from another validator
    pub fn merge(&mut self, other: ConfigValidator) {
        self.errors.extend(other.errors);
    }

    /// Get validation result, reporting the first failure
    pub fn result(self) -> ValidationResult {
        match self.errors.into_iter().next() {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    /// Get all validation errors
    pub fn all_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    fn full_field_name(&self, field_name: &str) -> String {
        if self.field_prefix.is_empty() {
            field_name.to_string()
        } else {
            format!("{}.{}", self.field_prefix, field_name)
        }
    }
}
