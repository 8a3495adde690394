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

//! High-level data types.

use derive_getters::Getters;
use derive_more::Constructor;
use roster_core::model::{EmailAddress, ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

mod validation;
pub(crate) use validation::{DriverInput, validate};

/// Unique identifier of a driver, assigned by the database on creation.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(transparent)]
pub(crate) struct DriverId(u64);

impl DriverId {
    /// Creates a new identifier, which must be positive.
    pub(crate) fn new(id: u64) -> ModelResult<Self> {
        if id == 0 {
            return Err(ModelError("Driver ids must be positive".to_owned()));
        }
        Ok(Self(id))
    }

    /// Returns the identifier that follows this one, if it can be represented.
    pub(crate) fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Returns the identifier as a `u64`.
    #[cfg(test)]
    pub(crate) fn as_u64(self) -> u64 {
        self.0
    }
}

impl FromStr for DriverId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .parse::<u64>()
            .map_err(|e| ModelError(format!("Invalid driver id '{}': {}", s, e)))?;
        DriverId::new(id)
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Availability of a driver.
///
/// Only one status exists for now, but more will come, so code matching on this should not
/// assume the set is closed.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[non_exhaustive]
pub(crate) enum DriverStatus {
    /// The driver can take rides.
    #[serde(rename = "online")]
    Online,
}

/// Optional amenities offered by a driver's vehicle.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) enum VehicleFeature {
    /// The vehicle offers wireless internet access.
    #[serde(rename = "wi-fi")]
    WiFi,

    /// The vehicle carries a child seat.
    #[serde(rename = "child-seat")]
    ChildSeat,

    /// Pets are welcome in the vehicle.
    #[serde(rename = "pet-friendly")]
    PetFriendly,
}

impl VehicleFeature {
    /// Returns the wire name of the feature.
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            VehicleFeature::WiFi => "wi-fi",
            VehicleFeature::ChildSeat => "child-seat",
            VehicleFeature::PetFriendly => "pet-friendly",
        }
    }
}

impl FromStr for VehicleFeature {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wi-fi" => Ok(VehicleFeature::WiFi),
            "child-seat" => Ok(VehicleFeature::ChildSeat),
            "pet-friendly" => Ok(VehicleFeature::PetFriendly),
            _ => Err(ModelError(format!(
                "Unknown vehicle feature '{}'; must be one of wi-fi, child-seat, pet-friendly",
                s
            ))),
        }
    }
}

/// The oldest vehicle year that we accept.
pub(crate) const MIN_VEHICLE_YEAR: i32 = 1900;

/// Manufacturing year of a vehicle.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(transparent)]
pub(crate) struct VehicleYear(i32);

impl VehicleYear {
    /// Creates a new vehicle year after checking that it is not older than `MIN_VEHICLE_YEAR`
    /// and not newer than the year after `now`, which is when next year's models go on sale.
    pub(crate) fn new(year: i64, now: OffsetDateTime) -> ModelResult<Self> {
        let max = i64::from(now.year()) + 1;
        if year < i64::from(MIN_VEHICLE_YEAR) || year > max {
            return Err(ModelError(format!(
                "Vehicle year must be between {} and {}",
                MIN_VEHICLE_YEAR, max
            )));
        }
        let year = i32::try_from(year).map_err(|e| ModelError(e.to_string()))?;
        Ok(Self(year))
    }

    /// Returns the year as a number.
    #[cfg(test)]
    pub(crate) fn as_i32(self) -> i32 {
        self.0
    }
}

/// All the client-provided details of a driver.
///
/// Values of this type only come out of `validate`, so they always hold valid data.
#[derive(Clone, Constructor, Getters, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
#[serde(rename_all = "camelCase")]
pub(crate) struct DriverDraft {
    /// Full name of the driver.
    name: String,

    /// Contact phone number of the driver.
    phone_number: String,

    /// Contact email address of the driver.
    email: EmailAddress,

    /// Vehicle manufacturer, such as "Toyota".
    vehicle_make: String,

    /// Vehicle model, such as "Camry".
    vehicle_model: String,

    /// Vehicle manufacturing year.
    vehicle_year: VehicleYear,

    /// Vehicle license plate.
    vehicle_license_plate: String,

    /// Free-form description of the vehicle.
    vehicle_description: Option<String>,

    /// Amenities offered by the vehicle, without duplicates.
    vehicle_features: Vec<VehicleFeature>,
}

/// A driver as stored in the database.
#[derive(Clone, Getters, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
#[serde(rename_all = "camelCase")]
pub(crate) struct Driver {
    /// Unique identifier of the driver.
    id: DriverId,

    /// Current availability of the driver.
    status: DriverStatus,

    /// Client-provided details.
    #[serde(flatten)]
    draft: DriverDraft,

    /// Time when the driver was created.
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl Driver {
    /// Creates a new driver with identifier `id` from its `draft` details.  New drivers are
    /// always online.
    pub(crate) fn new(id: DriverId, draft: DriverDraft, created_at: OffsetDateTime) -> Self {
        Self { id, status: DriverStatus::Online, draft, created_at }
    }

    /// Replaces all client-provided details with `draft`, leaving the rest untouched.
    pub(crate) fn replace(&mut self, draft: DriverDraft) {
        self.draft = draft;
    }
}


#[cfg(test)]
mod tests {
    use super::testutils::*;
    use super::*;
    use serde_test::{Token, assert_tokens};
    use time::macros::datetime;

    #[test]
    fn test_driver_id_parse() {
        assert_eq!(DriverId::new(1).unwrap(), "1".parse::<DriverId>().unwrap());
        assert_eq!(DriverId::new(123).unwrap(), "123".parse::<DriverId>().unwrap());
        assert!("0".parse::<DriverId>().is_err());
        assert!("-1".parse::<DriverId>().is_err());
        assert!("abc".parse::<DriverId>().is_err());
        assert!("".parse::<DriverId>().is_err());
    }

    #[test]
    fn test_driver_id_next() {
        assert_eq!(Some(DriverId::new(2).unwrap()), DriverId::new(1).unwrap().next());
        assert_eq!(None, DriverId::new(u64::MAX).unwrap().next());
    }

    #[test]
    fn test_vehicle_feature_ser_de() {
        assert_tokens(
            &VehicleFeature::WiFi,
            &[Token::UnitVariant { name: "VehicleFeature", variant: "wi-fi" }],
        );
        assert_tokens(
            &VehicleFeature::ChildSeat,
            &[Token::UnitVariant { name: "VehicleFeature", variant: "child-seat" }],
        );
        assert_tokens(
            &VehicleFeature::PetFriendly,
            &[Token::UnitVariant { name: "VehicleFeature", variant: "pet-friendly" }],
        );
    }

    #[test]
    fn test_vehicle_feature_parse() {
        for feature in
            [VehicleFeature::WiFi, VehicleFeature::ChildSeat, VehicleFeature::PetFriendly]
        {
            assert_eq!(feature, feature.as_str().parse::<VehicleFeature>().unwrap());
        }
        assert!("WiFi".parse::<VehicleFeature>().is_err());
    }

    #[test]
    fn test_vehicle_year_bounds() {
        let now = datetime!(2024-12-31 23:59:59 UTC);
        assert_eq!(1900, VehicleYear::new(1900, now).unwrap().as_i32());
        assert_eq!(2025, VehicleYear::new(2025, now).unwrap().as_i32());
        assert_eq!(
            ModelError("Vehicle year must be between 1900 and 2025".to_owned()),
            VehicleYear::new(1899, now).unwrap_err()
        );
        assert!(VehicleYear::new(2026, now).is_err());
        assert!(VehicleYear::new(i64::MAX, now).is_err());
    }

    #[test]
    fn test_driver_wire_format() {
        let driver = Driver::new(DriverId::new(1).unwrap(), test_draft("Tom Rider"), TEST_NOW);
        assert_eq!(
            serde_json::json!({
                "id": 1,
                "status": "online",
                "name": "Tom Rider",
                "phoneNumber": "123-456-7890",
                "email": "tom.rider@example.com",
                "vehicleMake": "BMW",
                "vehicleModel": "Cabrio",
                "vehicleYear": 2020,
                "vehicleLicensePlate": "ABC-32145",
                "vehicleDescription": null,
                "vehicleFeatures": [],
                "createdAt": "2024-05-17T09:30:00.123Z",
            }),
            serde_json::to_value(&driver).unwrap()
        );
    }

    #[test]
    fn test_driver_replace_keeps_identity() {
        let mut driver = Driver::new(DriverId::new(7).unwrap(), test_draft("Tom Rider"), TEST_NOW);
        driver.replace(test_draft("Ann Other"));
        assert_eq!(DriverId::new(7).unwrap(), *driver.id());
        assert_eq!(DriverStatus::Online, *driver.status());
        assert_eq!(TEST_NOW, *driver.created_at());
        assert_eq!("Ann Other", driver.draft().name().as_str());
    }
}
