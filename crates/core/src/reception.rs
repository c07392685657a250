//! Goods-receiving sessions.
//!
//! A reception starts `in_progress` and can only move to `close`. At most one
//! reception per pickup point may be `in_progress` at any time; the stores
//! enforce that, not this module.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_CLOSE: &str = "close";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReceptionStatus {
    #[serde(rename = "in_progress")]
    InProgress,
    #[serde(rename = "close")]
    Close,
}

impl ReceptionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReceptionStatus::InProgress => STATUS_IN_PROGRESS,
            ReceptionStatus::Close => STATUS_CLOSE,
        }
    }

    /// Whether products may still be added to or removed from the reception.
    pub fn is_open(self) -> bool {
        matches!(self, ReceptionStatus::InProgress)
    }
}

impl fmt::Display for ReceptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReceptionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_IN_PROGRESS => Ok(ReceptionStatus::InProgress),
            STATUS_CLOSE => Ok(ReceptionStatus::Close),
            _ => Err(CoreError::Validation("invalid reception status".into())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reception {
    pub id: DbId,
    pub date_time: Timestamp,
    pub pvz_id: DbId,
    pub status: ReceptionStatus,
}
