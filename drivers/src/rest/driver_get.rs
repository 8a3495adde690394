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

//! API to get one driver.

use crate::db::DriversTx;
use crate::driver::{DRIVER_NOT_FOUND, RosterDriver};
use crate::rest::parse_id;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use roster_core::db::Db;
use roster_core::rest::{EmptyBody, RestError};

/// API handler.
pub(crate) async fn handler<D>(
    State(driver): State<RosterDriver<D>>,
    Path(id): Path<String>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError>
where
    D: Db + Clone + Send + Sync + 'static,
    D::Tx: DriversTx,
{
    let id = parse_id(&id, DRIVER_NOT_FOUND)?;
    let driver = driver.get_driver(id).await?;
    Ok(Json(driver))
}

#[cfg(test)]
mod tests {
    use crate::model::testutils::*;
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use roster_core::rest::testutils::*;
    use serde_json::json;

    fn route(id: &str) -> (http::Method, String) {
        (http::Method::GET, format!("/drivers/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        context.create_driver("First").await;
        let second = context.create_driver("Second").await;

        let response = OneShotBuilder::new(context.into_app(), route("2"))
            .send_empty()
            .await
            .expect_json::<Driver>()
            .await;
        assert_eq!(second, response);
    }

    #[tokio::test]
    async fn test_round_trip() {
        let context = TestContext::setup().await;

        let mut body = test_body("Tom Rider");
        body["vehicleDescription"] = json!("Red convertible");
        body["vehicleFeatures"] = json!(["child-seat", "wi-fi"]);

        let created = OneShotBuilder::new(context.app(), (http::Method::POST, "/drivers"))
            .send_json(&body)
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<serde_json::Value>()
            .await;

        let fetched = OneShotBuilder::new(context.app(), route("1"))
            .send_empty()
            .await
            .expect_json::<serde_json::Value>()
            .await;
        assert_eq!(created, fetched);

        let mut exp = body;
        exp["id"] = json!(1);
        exp["status"] = json!("online");
        exp["createdAt"] = json!("2024-05-17T09:30:00.123Z");
        assert_eq!(exp, fetched);
    }

    #[tokio::test]
    async fn test_idempotent() {
        let context = TestContext::setup().await;

        context.create_driver("First").await;

        let mut bodies = vec![];
        for _ in 0..3 {
            let body = OneShotBuilder::new(context.app(), route("1"))
                .send_empty()
                .await
                .expect_json::<serde_json::Value>()
                .await;
            bodies.push(body);
        }
        assert_eq!(bodies[0], bodies[1]);
        assert_eq!(bodies[1], bodies[2]);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        context.create_driver("First").await;

        OneShotBuilder::new(context.into_app(), route("2"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("id", "^Driver not found$")
            .await;
    }

    #[tokio::test]
    async fn test_malformed_id() {
        let context = TestContext::setup().await;

        context.create_driver("First").await;

        for id in ["0", "-1", "abc", "1.5"] {
            OneShotBuilder::new(context.app(), route(id))
                .send_empty()
                .await
                .expect_status(http::StatusCode::NOT_FOUND)
                .expect_error("id", "^Driver not found$")
                .await;
        }
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route("1"));
}
