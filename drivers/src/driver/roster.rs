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

//! Operations on the whole collection of drivers.

use crate::db::DriversTx;
use crate::driver::RosterDriver;
use crate::model::*;
use log::{info, warn};
use roster_core::db::{BareTx, Db};
use roster_core::driver::{DriverError, DriverResult};

impl<D> RosterDriver<D>
where
    D: Db + Clone + Send + Sync + 'static,
    D::Tx: DriversTx,
{
    /// Gets a list of all existing drivers in creation order.
    pub(crate) async fn get_drivers(self) -> DriverResult<Vec<Driver>> {
        let mut tx = self.db.begin().await?;
        let drivers = tx.get_drivers().await?;
        tx.commit().await?;
        Ok(drivers)
    }

    /// Creates a new driver from the untrusted `input`.
    pub(crate) async fn create_driver(self, input: DriverInput) -> DriverResult<Driver> {
        let now = self.clock.now_utc();
        let draft = validate(input, now).map_err(|errors| {
            warn!("Rejected new driver: {}", errors);
            DriverError::InvalidInput(errors)
        })?;

        let mut tx = self.db.begin().await?;
        let driver = tx.create_driver(draft, now).await?;
        tx.commit().await?;
        info!("Created driver {}", driver.id());
        Ok(driver)
    }

    /// Deletes all drivers and resets identifier assignment.
    pub(crate) async fn delete_all_drivers(self) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        tx.delete_all().await?;
        tx.commit().await?;
        info!("Deleted all drivers");
        Ok(())
    }
}
