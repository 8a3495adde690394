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

//! Test utilities for the REST API.

use crate::db::{DriversTx, Roster};
use crate::driver::RosterDriver;
use crate::model::testutils::*;
use crate::model::*;
use crate::rest::app;
use axum::Router;
use roster_core::clocks::testutils::SettableClock;
use roster_core::db::{BareTx, Db, MemoryDb};
use std::sync::Arc;

pub(crate) struct TestContext {
    db: MemoryDb<Roster>,
    app: Router,
}

impl TestContext {
    pub(crate) async fn setup() -> Self {
        let db = MemoryDb::<Roster>::default();
        let clock = Arc::from(SettableClock::new(TEST_NOW));
        let driver = RosterDriver::new(db.clone(), clock);
        let app = app(driver);
        Self { db, app }
    }

    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Creates a driver named `name` directly in the database.
    pub(crate) async fn create_driver(&self, name: &str) -> Driver {
        let mut tx = self.db.begin().await.unwrap();
        let driver = tx.create_driver(test_draft(name), TEST_NOW).await.unwrap();
        tx.commit().await.unwrap();
        driver
    }

    pub(crate) async fn get_drivers(&self) -> Vec<Driver> {
        let mut tx = self.db.begin().await.unwrap();
        tx.get_drivers().await.unwrap()
    }
}
