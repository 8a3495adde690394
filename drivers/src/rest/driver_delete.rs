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

//! API to delete a driver.

use crate::db::DriversTx;
use crate::driver::{RosterDriver, VEHICLE_NOT_FOUND};
use crate::rest::parse_id;
use axum::extract::{Path, State};
use axum::http;
use roster_core::db::Db;
use roster_core::rest::{EmptyBody, RestError};

/// API handler.
pub(crate) async fn handler<D>(
    State(driver): State<RosterDriver<D>>,
    Path(id): Path<String>,
    _: EmptyBody,
) -> Result<http::StatusCode, RestError>
where
    D: Db + Clone + Send + Sync + 'static,
    D::Tx: DriversTx,
{
    let id = parse_id(&id, VEHICLE_NOT_FOUND)?;
    driver.delete_driver(id).await?;
    Ok(http::StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testutils::*;
    use crate::model::*;
    use crate::rest::testutils::*;
    use roster_core::rest::testutils::*;

    fn route(id: &str) -> (http::Method, String) {
        (http::Method::DELETE, format!("/drivers/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let first = context.create_driver("First").await;
        context.create_driver("Second").await;
        let third = context.create_driver("Third").await;

        OneShotBuilder::new(context.app(), route("2"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NO_CONTENT)
            .expect_empty()
            .await;

        assert_eq!(vec![first, third], context.get_drivers().await);
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let context = TestContext::setup().await;

        context.create_driver("First").await;

        OneShotBuilder::new(context.app(), route("1"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NO_CONTENT)
            .expect_empty()
            .await;

        OneShotBuilder::new(context.app(), (http::Method::GET, "/drivers/1"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("id", "^Driver not found$")
            .await;
    }

    #[tokio::test]
    async fn test_ids_not_reused() {
        let context = TestContext::setup().await;

        context.create_driver("First").await;
        context.create_driver("Second").await;

        OneShotBuilder::new(context.app(), route("2"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NO_CONTENT)
            .expect_empty()
            .await;

        let response = OneShotBuilder::new(context.app(), (http::Method::POST, "/drivers"))
            .send_json(test_body("Third"))
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Driver>()
            .await;
        assert_eq!(3, response.id().as_u64());
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        context.create_driver("First").await;

        OneShotBuilder::new(context.app(), route("5"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("id", "^Vehicle not found$")
            .await;

        OneShotBuilder::new(context.app(), route("abc"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("id", "^Vehicle not found$")
            .await;

        assert_eq!(1, context.get_drivers().await.len());
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route("1"));
}
