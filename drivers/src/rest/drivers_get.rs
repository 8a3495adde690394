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

//! API to list all drivers.

use crate::db::DriversTx;
use crate::driver::RosterDriver;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use roster_core::db::Db;
use roster_core::rest::RestError;

/// API handler.
///
/// Listing never fails, so any request body is ignored.
pub(crate) async fn handler<D>(
    State(driver): State<RosterDriver<D>>,
) -> Result<impl IntoResponse, RestError>
where
    D: Db + Clone + Send + Sync + 'static,
    D::Tx: DriversTx,
{
    let drivers = driver.get_drivers().await?;
    Ok(Json(drivers))
}
