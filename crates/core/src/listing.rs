//! Paginated, date-filtered listing of pickup points with their receptions.

use serde::Serialize;

use crate::error::CoreError;
use crate::pvz::PickupPoint;
use crate::product::Product;
use crate::reception::Reception;
use crate::types::Timestamp;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 30;

/// Normalised listing window and reception date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter {
    pub page: i64,
    pub limit: i64,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
}

impl ListFilter {
    /// Build a filter from raw query values.
    ///
    /// A missing or non-positive page becomes 1. A missing, non-positive or
    /// over-cap limit becomes 10 (it is reset, not clamped to the cap).
    pub fn new(
        page: Option<i64>,
        limit: Option<i64>,
        start_date: Option<Timestamp>,
        end_date: Option<Timestamp>,
    ) -> Result<Self, CoreError> {
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(CoreError::Validation(
                    "startDate must not be after endDate".into(),
                ));
            }
        }

        let page = match page {
            Some(p) if p >= 1 => p,
            _ => DEFAULT_PAGE,
        };
        let limit = match limit {
            Some(l) if (1..=MAX_LIMIT).contains(&l) => l,
            _ => DEFAULT_LIMIT,
        };

        Ok(Self {
            page,
            limit,
            start_date,
            end_date,
        })
    }

    /// Rows to skip. Saturates, so a huge page lands past the end.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn has_date_range(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    /// Whether a reception opened at `opened_at` falls in the date range.
    pub fn covers(&self, opened_at: Timestamp) -> bool {
        self.start_date.map_or(true, |s| opened_at >= s)
            && self.end_date.map_or(true, |e| opened_at <= e)
    }
}

impl Default for ListFilter {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            start_date: None,
            end_date: None,
        }
    }
}

/// One pickup point with all its receptions, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct PickupPointSummary {
    pub pvz: PickupPoint,
    pub receptions: Vec<ReceptionSummary>,
}

/// One reception with all its products, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct ReceptionSummary {
    pub reception: Reception,
    pub products: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn missing_values_use_defaults() {
        let f = ListFilter::new(None, None, None, None).unwrap();
        assert_eq!(f.page, 1);
        assert_eq!(f.limit, 10);
        assert_eq!(f.offset(), 0);
    }

    #[test]
    fn zero_page_and_limit_normalise() {
        let f = ListFilter::new(Some(0), Some(0), None, None).unwrap();
        assert_eq!((f.page, f.limit), (1, 10));
        let f = ListFilter::new(Some(-3), Some(-1), None, None).unwrap();
        assert_eq!((f.page, f.limit), (1, 10));
    }

    #[test]
    fn limit_above_cap_resets_to_default() {
        let f = ListFilter::new(Some(2), Some(31), None, None).unwrap();
        assert_eq!(f.limit, 10);
        let f = ListFilter::new(Some(2), Some(30), None, None).unwrap();
        assert_eq!(f.limit, 30);
        assert_eq!(f.offset(), 30);
    }

    #[test]
    fn huge_page_offset_saturates() {
        let f = ListFilter::new(Some(i64::MAX), Some(10), None, None).unwrap();
        assert_eq!(f.page, i64::MAX);
        assert_eq!(f.offset(), i64::MAX);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let now = Utc::now();
        let result = ListFilter::new(None, None, Some(now), Some(now - Duration::days(1)));
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn covers_respects_open_bounds() {
        let now = Utc::now();
        let only_start = ListFilter::new(None, None, Some(now), None).unwrap();
        assert!(only_start.covers(now));
        assert!(!only_start.covers(now - Duration::seconds(1)));

        let only_end = ListFilter::new(None, None, None, Some(now)).unwrap();
        assert!(only_end.covers(now - Duration::days(365)));
        assert!(!only_end.covers(now + Duration::seconds(1)));

        assert!(ListFilter::default().covers(now));
        assert!(!ListFilter::default().has_date_range());
    }
}
