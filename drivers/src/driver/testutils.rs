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

//! Test utilities for the business layer.

use crate::db::{DriversTx, Roster};
use crate::driver::RosterDriver;
use crate::model::testutils::*;
use crate::model::*;
use roster_core::clocks::Clock;
use roster_core::clocks::testutils::SettableClock;
use roster_core::db::{BareTx, Db, MemoryDb};
use std::sync::Arc;

pub(crate) struct TestContext {
    db: MemoryDb<Roster>,
    clock: Arc<SettableClock>,
    driver: RosterDriver<MemoryDb<Roster>>,
}

impl TestContext {
    pub(crate) async fn setup() -> Self {
        let db = MemoryDb::<Roster>::default();
        let clock = Arc::from(SettableClock::new(TEST_NOW));
        let driver = RosterDriver::new(db.clone(), clock.clone());
        Self { db, clock, driver }
    }

    pub(crate) fn clock(&self) -> &SettableClock {
        &self.clock
    }

    pub(crate) fn driver(&self) -> RosterDriver<MemoryDb<Roster>> {
        self.driver.clone()
    }

    /// Creates a driver named `name` directly in the database, bypassing the business logic.
    pub(crate) async fn create_driver(&self, name: &str) -> Driver {
        let mut tx = self.db.begin().await.unwrap();
        let driver = tx.create_driver(test_draft(name), self.clock.now_utc()).await.unwrap();
        tx.commit().await.unwrap();
        driver
    }

    pub(crate) async fn get_driver(&self, id: DriverId) -> Driver {
        let mut tx = self.db.begin().await.unwrap();
        tx.get_driver(id).await.unwrap()
    }

    pub(crate) async fn get_drivers(&self) -> Vec<Driver> {
        let mut tx = self.db.begin().await.unwrap();
        tx.get_drivers().await.unwrap()
    }
}
