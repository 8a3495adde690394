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

//! REST service that keeps a roster of ride-hailing drivers and their vehicles.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use log::info;
use roster_core::clocks::SystemClock;
use roster_core::db::MemoryDb;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

mod db;
use db::Roster;
mod driver;
use driver::RosterDriver;
mod model;
mod rest;
use rest::app;

/// Starts the service on `bind_addr` with an empty roster and serves requests until the server
/// fails.
pub async fn serve(bind_addr: impl Into<SocketAddr>) -> Result<(), Box<dyn Error>> {
    let db = MemoryDb::<Roster>::default();
    let driver = RosterDriver::new(db, Arc::from(SystemClock::default()));
    let app = app(driver);

    let bind_addr = bind_addr.into();
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
