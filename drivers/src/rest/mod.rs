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

//! Entry point to the REST server.

use crate::db::DriversTx;
use crate::driver::RosterDriver;
use crate::model::DriverId;
use axum::Router;
use roster_core::db::Db;
use roster_core::model::FieldError;
use roster_core::rest::{RestError, RestResult};
use tower_http::cors::CorsLayer;

mod driver_delete;
mod driver_get;
mod driver_put;
mod drivers_get;
mod drivers_post;
mod root_get;
mod testing_all_data_delete;
mod testing_get;
#[cfg(test)]
mod testutils;

/// Parses the `raw` driver identifier given in a path.
///
/// No driver can exist with an identifier that does not parse, so this reports a not-found error
/// with `message` in that case.
fn parse_id(raw: &str, message: &'static str) -> RestResult<DriverId> {
    raw.parse::<DriverId>().map_err(|_| RestError::NotFound(FieldError::new("id", message)))
}

/// Creates the router for the application.
pub(crate) fn app<D>(driver: RosterDriver<D>) -> Router
where
    D: Db + Clone + Send + Sync + 'static,
    D::Tx: DriversTx,
{
    use axum::routing::{delete, get};
    Router::new()
        .route("/", get(root_get::handler))
        .route("/drivers", get(drivers_get::handler).post(drivers_post::handler))
        .route(
            "/drivers/:id",
            get(driver_get::handler).put(driver_put::handler).delete(driver_delete::handler),
        )
        .route("/testing", get(testing_get::handler))
        .route("/testing/all-data", delete(testing_all_data_delete::handler))
        .layer(CorsLayer::permissive())
        .with_state(driver)
}
