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

//! Business logic for the service.

use crate::db::DriversTx;
use roster_core::clocks::Clock;
use roster_core::db::{Db, DbError};
use roster_core::driver::DriverError;
use roster_core::model::FieldError;
use std::sync::Arc;

mod entry;
mod roster;
#[cfg(test)]
pub(crate) mod testutils;

/// Message returned when looking up a driver that does not exist.
pub(crate) const DRIVER_NOT_FOUND: &str = "Driver not found";

/// Message returned when modifying a driver that does not exist.
pub(crate) const VEHICLE_NOT_FOUND: &str = "Vehicle not found";

/// Returns a function that maps a lookup failure of a driver by its `id` to a `NotFound` error
/// carrying `message`, and that passes any other error through.
fn not_found(message: &'static str) -> impl FnOnce(DbError) -> DriverError {
    move |e| match e {
        DbError::NotFound => DriverError::NotFound(FieldError::new("id", message)),
        e => e.into(),
    }
}

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": they start and commit a
/// transaction, so it's incorrect for the caller to use two separate calls.  For this reason,
/// these operations consume the driver in an attempt to minimize the possibility of executing
/// two operations.
#[derive(Clone)]
pub(crate) struct RosterDriver<D>
where
    D: Db + Clone + Send + Sync + 'static,
    D::Tx: DriversTx,
{
    /// The database that the driver uses for storage.
    db: D,

    /// Clock instance to obtain the current time.
    clock: Arc<dyn Clock + Send + Sync>,
}

impl<D> RosterDriver<D>
where
    D: Db + Clone + Send + Sync + 'static,
    D::Tx: DriversTx,
{
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(db: D, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { db, clock }
    }
}
