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

//! Database abstraction in terms of the operations needed by the server.

use crate::model::*;
use roster_core::db::{BareTx, DbResult};
use time::OffsetDateTime;

mod memory;
pub(crate) use memory::Roster;

/// A transaction with high-level operations that deal with our types.
#[async_trait::async_trait]
pub(crate) trait DriversTx: BareTx {
    /// Gets all drivers in creation order.
    async fn get_drivers(&mut self) -> DbResult<Vec<Driver>>;

    /// Gets the driver identified by `id`.
    async fn get_driver(&mut self, id: DriverId) -> DbResult<Driver>;

    /// Creates a new driver from `draft`, assigning it a fresh identifier and recording
    /// `created_at` as its creation time.
    ///
    /// Identifiers are never reused, even if the driver that held them is deleted.
    async fn create_driver(
        &mut self,
        draft: DriverDraft,
        created_at: OffsetDateTime,
    ) -> DbResult<Driver>;

    /// Replaces all client-provided details of the driver identified by `id` with `draft`.
    async fn replace_driver(&mut self, id: DriverId, draft: DriverDraft) -> DbResult<()>;

    /// Deletes the driver identified by `id`.
    async fn delete_driver(&mut self, id: DriverId) -> DbResult<()>;

    /// Deletes all drivers and restarts identifier assignment from scratch.
    async fn delete_all(&mut self) -> DbResult<()>;
}
