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

//! Validation of client-provided driver details.
//!
//! Request bodies are first parsed into a `DriverInput`, which accepts any JSON value in any
//! field, and then `validate` turns that into a `DriverDraft`.  Doing it in two steps lets us
//! report every problem in the input at once instead of stopping at the first one, which is what
//! a strongly-typed deserialization would do.

use crate::model::{DriverDraft, VehicleFeature, VehicleYear};
use roster_core::model::{EmailAddress, FieldErrors, ModelError, ModelResult};
use serde::Deserialize;
use serde_json::Value;
use time::OffsetDateTime;

/// Maximum length of a driver's name, in characters.
const MAX_NAME_LENGTH: usize = 15;

/// Maximum length of a driver's phone number, in characters.
const MAX_PHONE_NUMBER_LENGTH: usize = 20;

/// Maximum length of a vehicle's make and model, in characters.
const MAX_VEHICLE_MAKE_MODEL_LENGTH: usize = 100;

/// Maximum length of a vehicle's license plate, in characters.
const MAX_VEHICLE_LICENSE_PLATE_LENGTH: usize = 10;

/// Maximum length of a vehicle's description, in characters.
const MAX_VEHICLE_DESCRIPTION_LENGTH: usize = 200;

/// Body of the requests that create or replace a driver, before validation.
///
/// A field that is missing and a field that is `null` are indistinguishable.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DriverInput {
    /// Candidate value for `DriverDraft::name`.
    name: Option<Value>,

    /// Candidate value for `DriverDraft::phone_number`.
    phone_number: Option<Value>,

    /// Candidate value for `DriverDraft::email`.
    email: Option<Value>,

    /// Candidate value for `DriverDraft::vehicle_make`.
    vehicle_make: Option<Value>,

    /// Candidate value for `DriverDraft::vehicle_model`.
    vehicle_model: Option<Value>,

    /// Candidate value for `DriverDraft::vehicle_year`.
    vehicle_year: Option<Value>,

    /// Candidate value for `DriverDraft::vehicle_license_plate`.
    vehicle_license_plate: Option<Value>,

    /// Candidate value for `DriverDraft::vehicle_description`.
    vehicle_description: Option<Value>,

    /// Candidate value for `DriverDraft::vehicle_features`.
    vehicle_features: Option<Value>,
}

/// Extracts a required string from `value`.  `what` describes the field in error messages.
fn string(value: Option<Value>, what: &str) -> ModelResult<String> {
    match value {
        None => Err(ModelError(format!("{} is required", what))),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ModelError(format!("{} must be a string", what))),
    }
}

/// Extracts a required, non-blank string of at most `max_length` characters from `value`.
fn text(value: Option<Value>, what: &str, max_length: usize) -> ModelResult<String> {
    let s = string(value, what)?;
    if s.trim().is_empty() {
        return Err(ModelError(format!("{} cannot be empty", what)));
    }
    if s.chars().count() > max_length {
        return Err(ModelError(format!(
            "{} cannot be longer than {} characters",
            what, max_length
        )));
    }
    Ok(s)
}

/// Extracts a required email address from `value`.
fn email(value: Option<Value>) -> ModelResult<EmailAddress> {
    EmailAddress::new(string(value, "Email")?)
}

/// Extracts a required vehicle year from `value`, using `now` to compute the upper bound.
fn vehicle_year(value: Option<Value>, now: OffsetDateTime) -> ModelResult<VehicleYear> {
    match value {
        None => Err(ModelError("Vehicle year is required".to_owned())),
        Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
            (Some(year), _) => VehicleYear::new(year, now),
            // Integral floats such as 2020.0.  Huge values saturate and fail the range check.
            (None, Some(year)) if year.is_finite() && year.fract() == 0.0 => {
                VehicleYear::new(year as i64, now)
            }
            _ => Err(ModelError(format!("Vehicle year must be an integer; got {}", n))),
        },
        Some(_) => Err(ModelError("Vehicle year must be an integer".to_owned())),
    }
}

/// Extracts an optional vehicle description from `value`.
fn vehicle_description(value: Option<Value>) -> ModelResult<Option<String>> {
    match value {
        None => Ok(None),
        Some(Value::String(s)) if s.chars().count() > MAX_VEHICLE_DESCRIPTION_LENGTH => {
            Err(ModelError(format!(
                "Vehicle description cannot be longer than {} characters",
                MAX_VEHICLE_DESCRIPTION_LENGTH
            )))
        }
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(ModelError("Vehicle description must be a string or null".to_owned())),
    }
}

/// Extracts an optional set of vehicle features from `value`, preserving their order.
fn vehicle_features(value: Option<Value>) -> ModelResult<Vec<VehicleFeature>> {
    let values = match value {
        None => return Ok(vec![]),
        Some(Value::Array(values)) => values,
        Some(_) => return Err(ModelError("Vehicle features must be an array".to_owned())),
    };

    let mut features = Vec::with_capacity(values.len());
    for value in values {
        let feature = match value {
            Value::String(s) => s.parse::<VehicleFeature>()?,
            other => {
                return Err(ModelError(format!("Vehicle features must be strings; got {}", other)));
            }
        };
        if features.contains(&feature) {
            return Err(ModelError(format!("Duplicate vehicle feature '{}'", feature.as_str())));
        }
        features.push(feature);
    }
    Ok(features)
}

/// Validates all fields of `input` and returns the corresponding draft, or every problem found
/// in the fields, in field order.  `now` is the current time.
pub(crate) fn validate(
    input: DriverInput,
    now: OffsetDateTime,
) -> Result<DriverDraft, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = errors.check("name", text(input.name, "Name", MAX_NAME_LENGTH));
    let phone_number = errors.check(
        "phoneNumber",
        text(input.phone_number, "Phone number", MAX_PHONE_NUMBER_LENGTH),
    );
    let email = errors.check("email", email(input.email));
    let vehicle_make = errors.check(
        "vehicleMake",
        text(input.vehicle_make, "Vehicle make", MAX_VEHICLE_MAKE_MODEL_LENGTH),
    );
    let vehicle_model = errors.check(
        "vehicleModel",
        text(input.vehicle_model, "Vehicle model", MAX_VEHICLE_MAKE_MODEL_LENGTH),
    );
    let vehicle_year = errors.check("vehicleYear", vehicle_year(input.vehicle_year, now));
    let vehicle_license_plate = errors.check(
        "vehicleLicensePlate",
        text(
            input.vehicle_license_plate,
            "Vehicle license plate",
            MAX_VEHICLE_LICENSE_PLATE_LENGTH,
        ),
    );
    let vehicle_description =
        errors.check("vehicleDescription", vehicle_description(input.vehicle_description));
    let vehicle_features =
        errors.check("vehicleFeatures", vehicle_features(input.vehicle_features));

    match (
        name,
        phone_number,
        email,
        vehicle_make,
        vehicle_model,
        vehicle_year,
        vehicle_license_plate,
        vehicle_description,
        vehicle_features,
    ) {
        (
            Some(name),
            Some(phone_number),
            Some(email),
            Some(vehicle_make),
            Some(vehicle_model),
            Some(vehicle_year),
            Some(vehicle_license_plate),
            Some(vehicle_description),
            Some(vehicle_features),
        ) if errors.is_empty() => Ok(DriverDraft::new(
            name,
            phone_number,
            email,
            vehicle_make,
            vehicle_model,
            vehicle_year,
            vehicle_license_plate,
            vehicle_description,
            vehicle_features,
        )),
        _ => Err(errors),
    }
}
