// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! The `FieldError` and `FieldErrors` data types.
//!
//! These describe problems with individual fields of a client-supplied entity.  They are the
//! unit of information carried by the `errorsMessages` envelope that the REST layer returns, so
//! the `field` names must match the wire names of the entity fields.

use crate::model::ModelResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A problem with a single field of an entity.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FieldError {
    /// Wire name of the field that has a problem.
    pub field: String,

    /// Human-readable description of the problem.
    pub message: String,
}

impl FieldError {
    /// Creates a new error for `field` described by `message`.
    pub fn new<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Ordered accumulation of field errors.
///
/// Validation of an entity does not stop at the first problem: every field is checked and every
/// problem is recorded here in check order, so that clients can fix all of them in one go.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Records a problem with `field`.
    pub fn push<F: Into<String>, M: Into<String>>(&mut self, field: F, message: M) {
        self.0.push(FieldError::new(field, message));
    }

    /// Consumes the outcome of validating `field` and returns the valid value, if any.
    ///
    /// Failures are recorded in this collection under the name `field`.
    pub fn check<T>(&mut self, field: &str, result: ModelResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.push(field, e.0);
                None
            }
        }
    }

    /// Returns true if no problems have been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of recorded problems.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns an iterator over the recorded problems in the order they were found.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Returns the recorded problems in the order they were found.
    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }
}

impl From<FieldError> for FieldErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelError;

    #[test]
    fn test_fielderrors_check_keeps_order() {
        let mut errors = FieldErrors::default();
        assert_eq!(Some(1), errors.check("first", Ok(1)));
        assert_eq!(None::<i32>, errors.check("second", Err(ModelError("bad 2".to_owned()))));
        assert_eq!(None::<i32>, errors.check("third", Err(ModelError("bad 3".to_owned()))));
        errors.push("fourth", "bad 4");

        assert_eq!(3, errors.len());
        assert_eq!(
            vec![
                FieldError::new("second", "bad 2"),
                FieldError::new("third", "bad 3"),
                FieldError::new("fourth", "bad 4"),
            ],
            errors.into_inner()
        );
    }

    #[test]
    fn test_fielderrors_empty() {
        let errors = FieldErrors::default();
        assert!(errors.is_empty());
        assert_eq!(0, errors.iter().count());
        assert_eq!("", errors.to_string());
    }

    #[test]
    fn test_fielderrors_display() {
        let mut errors = FieldErrors::from(FieldError::new("name", "Cannot be empty"));
        errors.push("email", "Invalid");
        assert_eq!("name: Cannot be empty; email: Invalid", errors.to_string());
    }
}
