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

//! Generic business logic for any service.
//!
//! Every service should implement its own driver type.  In most cases, this type will be
//! parameterized on a database implementation, and as such the definition will look like this:
//!
//! ```rust
//! use roster_core::db::{BareTx, Db};
//! trait Tx: BareTx {}
//!
//! #[derive(Clone)]
//! pub(crate) struct ServiceDriver<D>
//! where
//!     D: Db + Clone + Send + Sync + 'static,
//!     D::Tx: Tx,
//! {
//!     /// The database that the driver uses for storage.
//!     db: D,
//!
//!     // ... other fields here ...
//! }
//! ```
//!
//! Every operation implemented in the driver should consume `self` because this is the layer that
//! coordinates multiple operations against the database inside a single transaction.  Consuming
//! `self` prevents the caller from easily issuing multiple operations against the driver, as this
//! would require a clone and highlight an undesirable pattern.

use crate::db::DbError;
use crate::model::{FieldError, FieldErrors};

/// Business logic errors.  These errors encompass backend and logical errors.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum DriverError {
    /// Catch-all error type for unexpected database errors.
    #[error("{0}")]
    BackendError(String),

    /// Indicates one or more problems in the fields of the input data.
    #[error("{0}")]
    InvalidInput(FieldErrors),

    /// Indicates that a requested entry does not exist.  The error names the field used to look
    /// the entry up.
    #[error("{}", .0.message)]
    NotFound(FieldError),
}

impl From<DbError> for DriverError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::BackendError(_) => DriverError::BackendError(e.to_string()),
            DbError::NotFound => DriverError::NotFound(FieldError::new("id", e.to_string())),
        }
    }
}

/// Result type for this module.
pub type DriverResult<T> = Result<T, DriverError>;
