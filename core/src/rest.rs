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

//! Generic code for REST handlers.
//!
//! All services should implement an `app` function in this module that returns the `Router` for the
//! application.
//!
//! Every API should be put in its own `.rs` file, using a name like `<entity>_<method>.rs`.  This
//! may seem overkill, but putting every API in its own file makes it easy to ensure all the
//! integration tests for the given API truly belong to that API.
//!
//! More specifically, the `tests` module within an API should define a `route` method that
//! returns the HTTP method and the API path under test.  All integration tests within the module
//! then rely on `route` to obtain this information, ensuring that they all test the desired API.
//!
//! Every error returned to clients uses the same envelope, represented by `ErrorsMessages`:
//!
//! ```json
//! { "errorsMessages": [ { "field": "name", "message": "Name cannot be empty" } ] }
//! ```

use crate::driver::DriverError;
use crate::model::{FieldError, FieldErrors};
use async_trait::async_trait;
use axum::Json;
use axum::body::HttpBody;
use axum::extract::{FromRequest, Request};
use axum::response::IntoResponse;
use log::warn;
use serde::{Deserialize, Serialize};

/// Frontend errors.  These are the errors that are visible to the user on failed requests.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RestError {
    /// Catch-all error type for all unexpected errors.
    #[error("{0}")]
    InternalError(String),

    /// Indicates one or more errors in the contents of the request.
    #[error("{0}")]
    InvalidRequest(FieldErrors),

    /// Indicates that a requested entity does not exist.
    #[error("{}", .0.message)]
    NotFound(FieldError),

    /// Indicates that a request that should have empty content did not.
    #[error("Content should be empty")]
    PayloadNotEmpty,
}

impl From<DriverError> for RestError {
    fn from(e: DriverError) -> Self {
        match e {
            DriverError::BackendError(message) => RestError::InternalError(message),
            DriverError::InvalidInput(errors) => RestError::InvalidRequest(errors),
            DriverError::NotFound(error) => RestError::NotFound(error),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> axum::response::Response {
        let message = self.to_string();
        let (status, errors) = match self {
            RestError::InternalError(_) => {
                warn!("Request failed with internal error: {}", message);
                (http::StatusCode::INTERNAL_SERVER_ERROR, vec![FieldError::new("", message)])
            }
            RestError::InvalidRequest(errors) => (http::StatusCode::BAD_REQUEST, errors.into_inner()),
            RestError::NotFound(error) => (http::StatusCode::NOT_FOUND, vec![error]),
            RestError::PayloadNotEmpty => {
                (http::StatusCode::PAYLOAD_TOO_LARGE, vec![FieldError::new("body", message)])
            }
        };

        (status, Json(ErrorsMessages { errors_messages: errors })).into_response()
    }
}

/// Result type for this module.
pub type RestResult<T> = Result<T, RestError>;

/// The envelope for all error responses.
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct ErrorsMessages {
    /// Problems found while processing the request, in the order in which they were found.
    #[serde(rename = "errorsMessages")]
    pub errors_messages: Vec<FieldError>,
}

/// A request body extractor that forbids any content.
///
/// Any API that doesn't expect a body should use this to ensure we don't get garbage data that we
/// don't care about.  This future-proofs the service.
pub struct EmptyBody {}

#[async_trait]
impl<S> FromRequest<S> for EmptyBody
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        if req.into_body().is_end_stream() {
            Ok(EmptyBody {})
        } else {
            Err(RestError::PayloadNotEmpty)
        }
    }
}

/// Common test code for the REST server.
#[cfg(feature = "testutils")]
pub mod testutils {
    use super::*;
    use axum::Router;
    use axum::http::{self, HeaderName, HeaderValue};
    use serde::Serialize;
    use serde::de::DeserializeOwned;
    use tower::util::ServiceExt;

    /// Maximum body size for testing purposes.
    const MAX_BODY_SIZE: usize = 64 * 1024;

    /// Builder for a single request to the API server.
    #[must_use]
    pub struct OneShotBuilder {
        /// The router for the app being tested.
        app: Router,

        /// Builder for the request that will be sent to the app.
        builder: axum::http::request::Builder,
    }

    impl OneShotBuilder {
        /// Creates a new request against a given `method`/`uri` pair served by an `app` router.
        pub fn new<U: AsRef<str>>(app: Router, (method, uri): (http::Method, U)) -> Self {
            let builder = Request::builder().method(method).uri(uri.as_ref());
            Self { app, builder }
        }

        /// Sets the header `name` to `value` in the outgoing request.
        pub fn with_header<K, V>(mut self, name: K, value: V) -> Self
        where
            HeaderName: TryFrom<K>,
            <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
            HeaderValue: TryFrom<V>,
            <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
        {
            self.builder = self.builder.header(name, value);
            self
        }

        /// Finishes building the request and sends it with an empty payload.
        pub async fn send_empty(self) -> ResponseChecker {
            let request = self.builder.body(axum::body::Body::empty()).unwrap();
            ResponseChecker::from(self.app.oneshot(request).await.unwrap())
        }

        /// Finishes building the request and sends it with a text payload.
        pub async fn send_text<T: Into<String>>(self, text: T) -> ResponseChecker {
            let request = self
                .builder
                .header(http::header::CONTENT_TYPE, mime::TEXT_PLAIN.as_ref())
                .body(axum::body::Body::from(text.into()))
                .unwrap();
            ResponseChecker::from(self.app.oneshot(request).await.unwrap())
        }

        /// Finishes building the request and sends it with a JSON payload.
        pub async fn send_json<T: Serialize>(self, request: T) -> ResponseChecker {
            let request = self
                .builder
                .header(http::header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                .body(axum::body::Body::from(serde_json::to_vec(&request).unwrap()))
                .unwrap();
            ResponseChecker::from(self.app.oneshot(request).await.unwrap())
        }
    }

    /// Type alias for the complex type returned by the `oneshot` function.
    type HttpResponse = http::Response<axum::body::Body>;

    /// Validator for the outcome of a request sent by a `OneShotBuilder`.
    #[must_use]
    pub struct ResponseChecker {
        /// Actual response that we received from the app.
        response: HttpResponse,

        /// Expected HTTP status code in the response above.
        exp_status: http::StatusCode,
    }

    impl From<HttpResponse> for ResponseChecker {
        fn from(response: HttpResponse) -> Self {
            Self { response, exp_status: http::StatusCode::OK }
        }
    }

    impl ResponseChecker {
        /// Sets the expected exit HTTP status to `status`.
        pub fn expect_status(mut self, status: http::StatusCode) -> Self {
            self.exp_status = status;
            self
        }

        /// Performs common validation operations on the response.
        pub fn verify(&self) {
            assert_eq!(self.exp_status, self.response.status());
        }

        /// Consumes the response and returns its body as UTF-8.
        async fn take_body(self) -> String {
            let body =
                axum::body::to_bytes(self.response.into_body(), MAX_BODY_SIZE).await.unwrap();
            String::from_utf8(body.to_vec()).unwrap()
        }

        /// Finishes checking the response and expects it to contain an empty body.
        pub async fn expect_empty(self) {
            self.verify();

            let body = self.take_body().await;
            assert!(body.is_empty(), "Body not empty; got {}", body);
        }

        /// Finishes checking the response and expects its body to be an `ErrorsMessages`
        /// envelope with exactly one entry, which must be for `exp_field` and must have a message
        /// that matches `exp_re`.
        pub async fn expect_error(self, exp_field: &str, exp_re: &str) {
            self.expect_errors(&[(exp_field, exp_re)]).await
        }

        /// Finishes checking the response and expects its body to be an `ErrorsMessages`
        /// envelope whose entries match, in order, the `(field, message_re)` pairs in `exp`.
        pub async fn expect_errors(self, exp: &[(&str, &str)]) {
            self.verify();

            let body = self.take_body().await;
            let response: ErrorsMessages = match serde_json::from_str(&body) {
                Ok(response) => response,
                Err(e) => panic!("Invalid error response due to {}; content was {}", e, body),
            };
            assert_eq!(
                exp.len(),
                response.errors_messages.len(),
                "Unexpected number of errors in {:?}",
                response
            );
            for ((exp_field, exp_re), error) in exp.iter().zip(response.errors_messages.iter()) {
                assert_eq!(*exp_field, error.field, "Unexpected field in {:?}", response);
                let re = regex::Regex::new(exp_re).unwrap();
                assert!(
                    re.is_match(&error.message),
                    "Error message '{}' does not match re '{}'",
                    error.message,
                    exp_re
                );
            }
        }

        /// Finishes checking the response and expects it to contain a valid JSON object of
        /// type `T`.
        pub async fn expect_json<T: DeserializeOwned>(self) -> T {
            self.verify();

            let body = self.take_body().await;
            serde_json::from_str::<T>(&body).unwrap()
        }

        /// Finishes checking the response and expects its body to be valid UTF-8 and to match
        /// `exp_re`.
        pub async fn expect_text(self, exp_re: &str) {
            assert!(!exp_re.is_empty(), "Use expect_empty to validate empty responses");

            self.verify();

            let body = self.take_body().await;
            assert!(
                !body.contains("\"errorsMessages\":"),
                "Use expect_error to validate errors wrapped in an ErrorsMessages"
            );
            let re = regex::Regex::new(exp_re).unwrap();
            assert!(re.is_match(&body), "Body content '{}' does not match re '{}'", body, exp_re);
        }
    }

    /// Generates a test to verify that an API that expects JSON fails when it gets something else.
    #[macro_export]
    macro_rules! test_payload_must_be_json {
        ( $app:expr, $route:expr ) => {
            #[tokio::test]
            async fn test_payload_must_be_json() {
                // Malformed JSON is rejected by the extractor before reaching our handlers, so
                // these responses are plain text and not wrapped in an ErrorsMessages envelope.

                $crate::rest::testutils::OneShotBuilder::new($app, $route)
                    .send_text("this is not json")
                    .await
                    .expect_status(axum::http::StatusCode::UNSUPPORTED_MEDIA_TYPE)
                    .expect_text("Content-Type")
                    .await;

                $crate::rest::testutils::OneShotBuilder::new($app, $route)
                    .with_header(axum::http::header::CONTENT_TYPE, "application/json")
                    .send_text("this is not json")
                    .await
                    .expect_status(axum::http::StatusCode::BAD_REQUEST)
                    .expect_text("expected ident")
                    .await;
            }
        };
    }

    pub use test_payload_must_be_json;

    /// Generates a test to verify that an API that does not expect a payload fails as necessary.
    #[macro_export]
    macro_rules! test_payload_must_be_empty {
        ( $app:expr, $route:expr ) => {
            #[tokio::test]
            async fn test_payload_must_be_empty() {
                $crate::rest::testutils::OneShotBuilder::new($app, $route)
                    .send_text("should not be here")
                    .await
                    .expect_status(axum::http::StatusCode::PAYLOAD_TOO_LARGE)
                    .expect_error("body", "should be empty")
                    .await;
            }
        };
    }

    pub use test_payload_must_be_empty;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Converts `error` into a response and returns its status and parsed envelope.
    async fn render(error: RestError) -> (http::StatusCode, ErrorsMessages) {
        let response = error.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 4096).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_request_keeps_order() {
        let mut errors = FieldErrors::default();
        errors.push("name", "Name cannot be empty");
        errors.push("email", "Email does not look like a valid address");

        let (status, envelope) = render(RestError::InvalidRequest(errors)).await;
        assert_eq!(http::StatusCode::BAD_REQUEST, status);
        assert_eq!(
            ErrorsMessages {
                errors_messages: vec![
                    FieldError::new("name", "Name cannot be empty"),
                    FieldError::new("email", "Email does not look like a valid address"),
                ]
            },
            envelope
        );
    }

    #[tokio::test]
    async fn test_not_found() {
        let (status, envelope) =
            render(RestError::NotFound(FieldError::new("id", "Driver not found"))).await;
        assert_eq!(http::StatusCode::NOT_FOUND, status);
        assert_eq!(
            ErrorsMessages { errors_messages: vec![FieldError::new("id", "Driver not found")] },
            envelope
        );
    }

    #[tokio::test]
    async fn test_payload_not_empty() {
        let (status, envelope) = render(RestError::PayloadNotEmpty).await;
        assert_eq!(http::StatusCode::PAYLOAD_TOO_LARGE, status);
        assert_eq!(
            ErrorsMessages {
                errors_messages: vec![FieldError::new("body", "Content should be empty")]
            },
            envelope
        );
    }

    #[tokio::test]
    async fn test_internal_error() {
        let (status, envelope) =
            render(RestError::from(DriverError::BackendError("oops".to_owned()))).await;
        assert_eq!(http::StatusCode::INTERNAL_SERVER_ERROR, status);
        assert_eq!(ErrorsMessages { errors_messages: vec![FieldError::new("", "oops")] }, envelope);
    }

    #[test]
    fn test_envelope_wire_format() {
        let envelope =
            ErrorsMessages { errors_messages: vec![FieldError::new("id", "Vehicle not found")] };
        assert_eq!(
            r#"{"errorsMessages":[{"field":"id","message":"Vehicle not found"}]}"#,
            serde_json::to_string(&envelope).unwrap()
        );
    }
}
