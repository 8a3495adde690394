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

//! API to replace the details of a driver.

use crate::db::DriversTx;
use crate::driver::{RosterDriver, VEHICLE_NOT_FOUND};
use crate::model::DriverInput;
use crate::rest::parse_id;
use axum::extract::{Path, State};
use axum::{Json, http};
use roster_core::db::Db;
use roster_core::rest::RestError;

/// API handler.
pub(crate) async fn handler<D>(
    State(driver): State<RosterDriver<D>>,
    Path(id): Path<String>,
    Json(input): Json<DriverInput>,
) -> Result<http::StatusCode, RestError>
where
    D: Db + Clone + Send + Sync + 'static,
    D::Tx: DriversTx,
{
    let id = parse_id(&id, VEHICLE_NOT_FOUND)?;
    driver.replace_driver(id, input).await?;
    Ok(http::StatusCode::NO_CONTENT)
}
