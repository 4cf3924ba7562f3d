use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::core::error::Error;

/// Loose RFC 5322 address check: a local part, an `@`, and a dotted domain
/// with at least one label after the host.
pub(crate) const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FieldError {
    pub(crate) field: &'static str,
    pub(crate) message: &'static str,
}

/// Field-level rule violations, accumulated by value.
///
/// Only the first failure per field is kept, so `check` calls can be chained
/// from the most basic rule ("must be provided") to the most specific one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub(crate) fn check(mut self, ok: bool, field: &'static str, message: &'static str) -> Self {
        if !ok && !self.contains(field) {
            self.0.push(FieldError { field, message });
        }
        self
    }

    #[must_use]
    pub(crate) fn merge(self, other: ValidationErrors) -> Self {
        other
            .0
            .into_iter()
            .fold(self, |acc, e| acc.check(false, e.field, e.message))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    #[cfg(test)]
    pub(crate) fn message(&self, field: &str) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    pub(crate) fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|e| e.field).collect()
    }

    pub(crate) fn into_result<T>(self, value: T) -> Result<T, Error> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(Error::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for e in &self.0 {
            map.serialize_entry(e.field, e.message)?;
        }
        map.end()
    }
}

pub(crate) fn validate_email(pattern: &regex::Regex, email: &str) -> ValidationErrors {
    ValidationErrors::new()
        .check(!email.is_empty(), "email", "must be provided")
        .check(pattern.is_match(email), "email", "must be a valid email address")
}
