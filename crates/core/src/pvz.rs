//! Pickup points (PVZ) and the cities they may be registered in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Conflict message for a caller-supplied id that is already registered.
pub const PVZ_ID_TAKEN: &str = "pvz with this id already exists";

/// Cities a pickup point may be registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    #[serde(rename = "Москва")]
    Moscow,
    #[serde(rename = "Санкт-Петербург")]
    SaintPetersburg,
    #[serde(rename = "Казань")]
    Kazan,
}

impl City {
    pub const ALL: [City; 3] = [City::Moscow, City::SaintPetersburg, City::Kazan];

    pub fn as_str(self) -> &'static str {
        match self {
            City::Moscow => "Москва",
            City::SaintPetersburg => "Санкт-Петербург",
            City::Kazan => "Казань",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for City {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::Validation("invalid city".into()))
    }
}

/// A registered pickup point. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupPoint {
    pub id: DbId,
    pub registration_date: Timestamp,
    pub city: City,
}

/// Input for registering a pickup point.
///
/// `id` and `registration_date` are fixture overrides; when present they are
/// stored verbatim instead of being generated.
#[derive(Debug, Clone)]
pub struct NewPickupPoint {
    pub city: City,
    pub id: Option<DbId>,
    pub registration_date: Option<Timestamp>,
}

impl NewPickupPoint {
    pub fn in_city(city: City) -> Self {
        Self {
            city,
            id: None,
            registration_date: None,
        }
    }
}
