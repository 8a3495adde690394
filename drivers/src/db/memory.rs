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

//! Implementation of the database abstraction using process memory.

use crate::db::DriversTx;
use crate::model::*;
use roster_core::db::{DbError, DbResult, MemoryTx};
use time::OffsetDateTime;

/// In-memory state of the drivers database.
#[derive(Clone, Default)]
pub(crate) struct Roster {
    /// All drivers in creation order.
    drivers: Vec<Driver>,

    /// Last identifier handed out, or `None` if none has been assigned yet.
    last_id: Option<DriverId>,
}

impl Roster {
    /// Returns the position of the driver identified by `id` in the list of drivers.
    fn position(&self, id: DriverId) -> DbResult<usize> {
        self.drivers.iter().position(|driver| *driver.id() == id).ok_or(DbError::NotFound)
    }
}

#[async_trait::async_trait]
impl DriversTx for MemoryTx<Roster> {
    async fn get_drivers(&mut self) -> DbResult<Vec<Driver>> {
        Ok(self.data().drivers.clone())
    }

    async fn get_driver(&mut self, id: DriverId) -> DbResult<Driver> {
        let roster = self.data();
        let i = roster.position(id)?;
        Ok(roster.drivers[i].clone())
    }

    async fn create_driver(
        &mut self,
        draft: DriverDraft,
        created_at: OffsetDateTime,
    ) -> DbResult<Driver> {
        let roster = self.data_mut();
        let id = match roster.last_id {
            None => DriverId::new(1).map_err(|e| DbError::BackendError(e.to_string()))?,
            Some(last_id) => last_id.next().ok_or_else(|| {
                DbError::BackendError("Ran out of driver identifiers".to_owned())
            })?,
        };
        let driver = Driver::new(id, draft, created_at);
        roster.drivers.push(driver.clone());
        roster.last_id = Some(id);
        Ok(driver)
    }

    async fn replace_driver(&mut self, id: DriverId, draft: DriverDraft) -> DbResult<()> {
        let roster = self.data_mut();
        let i = roster.position(id)?;
        roster.drivers[i].replace(draft);
        Ok(())
    }

    async fn delete_driver(&mut self, id: DriverId) -> DbResult<()> {
        let roster = self.data_mut();
        let i = roster.position(id)?;
        roster.drivers.remove(i);
        Ok(())
    }

    async fn delete_all(&mut self) -> DbResult<()> {
        *self.data_mut() = Roster::default();
        Ok(())
    }
}
