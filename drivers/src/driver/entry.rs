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

//! Operations on one driver.

use crate::db::DriversTx;
use crate::driver::{DRIVER_NOT_FOUND, RosterDriver, VEHICLE_NOT_FOUND, not_found};
use crate::model::*;
use log::{info, warn};
use roster_core::db::{BareTx, Db};
use roster_core::driver::{DriverError, DriverResult};

impl<D> RosterDriver<D>
where
    D: Db + Clone + Send + Sync + 'static,
    D::Tx: DriversTx,
{
    /// Gets the driver identified by `id`.
    pub(crate) async fn get_driver(self, id: DriverId) -> DriverResult<Driver> {
        let mut tx = self.db.begin().await?;
        let driver = tx.get_driver(id).await.map_err(not_found(DRIVER_NOT_FOUND))?;
        tx.commit().await?;
        Ok(driver)
    }

    /// Replaces all client-provided details of the driver identified by `id` with the untrusted
    /// `input`.
    ///
    /// The existence of the driver is checked before validating `input`.
    pub(crate) async fn replace_driver(self, id: DriverId, input: DriverInput) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        tx.get_driver(id).await.map_err(not_found(VEHICLE_NOT_FOUND))?;

        let draft = validate(input, self.clock.now_utc()).map_err(|errors| {
            warn!("Rejected update to driver {}: {}", id, errors);
            DriverError::InvalidInput(errors)
        })?;

        tx.replace_driver(id, draft).await.map_err(not_found(VEHICLE_NOT_FOUND))?;
        tx.commit().await?;
        info!("Updated driver {}", id);
        Ok(())
    }

    /// Deletes the driver identified by `id`.
    pub(crate) async fn delete_driver(self, id: DriverId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        tx.delete_driver(id).await.map_err(not_found(VEHICLE_NOT_FOUND))?;
        tx.commit().await?;
        info!("Deleted driver {}", id);
        Ok(())
    }
}
