use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::job::VendorRef;
use crate::errors::CoreError;

/// Columns stripped from write rows when the remote schema lacks them.
pub const SCHEDULE_TIME_COLUMNS: [&str; 2] = ["scheduled_start_time", "scheduled_end_time"];

/// A line item (job part) as read back from the remote store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobPart {
    pub id: String,
    pub job_id: String,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub quantity_used: i64,
    #[serde(default)]
    pub promised_date: Option<NaiveDate>,
    #[serde(default)]
    pub requires_scheduling: bool,
    #[serde(default)]
    pub no_schedule_reason: Option<String>,
    #[serde(default)]
    pub is_off_site: bool,
    #[serde(default)]
    pub vendor_id: Option<String>,
    #[serde(default)]
    pub scheduled_start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scheduled_end_time: Option<DateTime<Utc>>,
    /// `None` when the vendor relationship is degraded or the item has no vendor.
    #[serde(default)]
    pub vendor: Option<VendorRef>,
}

impl JobPart {
    /// Related vendor name, if projected and non-blank.
    #[must_use]
    pub fn vendor_name(&self) -> Option<&str> {
        self.vendor
            .as_ref()
            .and_then(|v| v.name.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// One line item as submitted from a job form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LineItemInput {
    pub product_id: String,
    pub unit_price: f64,
    /// Defaults to 1.
    #[serde(default)]
    pub quantity_used: Option<i64>,
    #[serde(default)]
    pub requires_scheduling: bool,
    /// Defaults to today (UTC) when scheduling is required.
    #[serde(default)]
    pub promised_date: Option<NaiveDate>,
    #[serde(default)]
    pub no_schedule_reason: Option<String>,
    #[serde(default)]
    pub is_off_site: bool,
    #[serde(default)]
    pub vendor_id: Option<String>,
    #[serde(default)]
    pub scheduled_start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scheduled_end_time: Option<DateTime<Utc>>,
}

/// Write shape for the line-item table.
///
/// `requires_scheduling == true` implies `promised_date.is_some()`;
/// `requires_scheduling == false` implies `promised_date.is_none()`.
/// The scheduling-time fields always serialize, as null when unset; the write
/// path decides per batch whether the columns are sent at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemRow {
    pub job_id: String,
    pub product_id: String,
    pub unit_price: f64,
    pub quantity_used: i64,
    pub promised_date: Option<NaiveDate>,
    pub requires_scheduling: bool,
    pub no_schedule_reason: Option<String>,
    pub is_off_site: bool,
    pub vendor_id: Option<String>,
    #[serde(default)]
    pub scheduled_start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scheduled_end_time: Option<DateTime<Utc>>,
}

impl LineItemRow {
    /// Build a row using the current UTC date as the scheduling default.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank job or product id, a negative
    /// or non-finite price, a non-positive quantity, or an end time before the
    /// start time.
    pub fn from_input(job_id: &str, input: &LineItemInput) -> Result<Self, CoreError> {
        Self::build(job_id, input, Utc::now().date_naive())
    }

    /// Build a row with an explicit "today" for the promised-date default.
    ///
    /// # Errors
    ///
    /// See [`LineItemRow::from_input`].
    pub fn build(job_id: &str, input: &LineItemInput, today: NaiveDate) -> Result<Self, CoreError> {
        let job_id = job_id.trim();
        if job_id.is_empty() {
            return Err(CoreError::Validation("job_id is required".into()));
        }
        let product_id = input.product_id.trim();
        if product_id.is_empty() {
            return Err(CoreError::Validation("product_id is required".into()));
        }
        if !input.unit_price.is_finite() || input.unit_price < 0.0 {
            return Err(CoreError::Validation(format!(
                "unit_price must be a non-negative number, got {}",
                input.unit_price
            )));
        }
        let quantity_used = input.quantity_used.unwrap_or(1);
        if quantity_used <= 0 {
            return Err(CoreError::Validation(format!(
                "quantity_used must be positive, got {quantity_used}"
            )));
        }
        if let (Some(start), Some(end)) = (input.scheduled_start_time, input.scheduled_end_time)
            && end < start
        {
            return Err(CoreError::Validation(
                "scheduled_end_time is before scheduled_start_time".into(),
            ));
        }

        let (promised_date, no_schedule_reason) = if input.requires_scheduling {
            (Some(input.promised_date.unwrap_or(today)), None)
        } else {
            let reason = input
                .no_schedule_reason
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(ToString::to_string);
            (None, reason)
        };

        Ok(Self {
            job_id: job_id.to_string(),
            product_id: product_id.to_string(),
            unit_price: input.unit_price,
            quantity_used,
            promised_date,
            requires_scheduling: input.requires_scheduling,
            no_schedule_reason,
            is_off_site: input.is_off_site,
            vendor_id: input
                .vendor_id
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(ToString::to_string),
            scheduled_start_time: input.scheduled_start_time,
            scheduled_end_time: input.scheduled_end_time,
        })
    }

    /// Whether either scheduling-time field would be written.
    #[must_use]
    pub const fn has_schedule_times(&self) -> bool {
        self.scheduled_start_time.is_some() || self.scheduled_end_time.is_some()
    }

    /// Drop both scheduling-time fields.
    pub fn strip_schedule_times(&mut self) {
        self.scheduled_start_time = None;
        self.scheduled_end_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn input() -> LineItemInput {
        LineItemInput {
            product_id: "prod-1".into(),
            unit_price: 49.5,
            ..Default::default()
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn scheduling_defaults_promised_date_to_today() {
        let item = LineItemInput {
            requires_scheduling: true,
            no_schedule_reason: Some("ignored".into()),
            ..input()
        };
        let row = LineItemRow::build("job-1", &item, day(2026, 3, 14)).unwrap();
        assert_eq!(row.promised_date, Some(day(2026, 3, 14)));
        assert_eq!(row.no_schedule_reason, None);
        assert!(row.requires_scheduling);
    }

    #[test]
    fn from_input_uses_current_utc_date() {
        let item = LineItemInput {
            requires_scheduling: true,
            ..input()
        };
        let expected = Utc::now().format("%Y-%m-%d").to_string();
        let row = LineItemRow::from_input("job-1", &item).unwrap();
        assert_eq!(row.promised_date.unwrap().to_string(), expected);
    }

    #[test]
    fn explicit_promised_date_is_kept() {
        let item = LineItemInput {
            requires_scheduling: true,
            promised_date: Some(day(2026, 4, 1)),
            ..input()
        };
        let row = LineItemRow::build("job-1", &item, day(2026, 3, 14)).unwrap();
        assert_eq!(row.promised_date, Some(day(2026, 4, 1)));
    }

    #[test]
    fn no_scheduling_clears_promised_date_and_keeps_reason() {
        let item = LineItemInput {
            requires_scheduling: false,
            promised_date: Some(day(2026, 4, 1)),
            no_schedule_reason: Some(" installed at delivery ".into()),
            ..input()
        };
        let row = LineItemRow::build("job-1", &item, day(2026, 3, 14)).unwrap();
        assert_eq!(row.promised_date, None);
        assert_eq!(row.no_schedule_reason.as_deref(), Some("installed at delivery"));
    }

    #[test]
    fn quantity_defaults_to_one() {
        let row = LineItemRow::build("job-1", &input(), day(2026, 3, 14)).unwrap();
        assert_eq!(row.quantity_used, 1);
    }

    #[test]
    fn rejects_missing_identifiers() {
        assert!(LineItemRow::build("  ", &input(), day(2026, 3, 14)).is_err());
        let item = LineItemInput {
            product_id: String::new(),
            ..input()
        };
        assert!(LineItemRow::build("job-1", &item, day(2026, 3, 14)).is_err());
    }

    #[test]
    fn rejects_bad_numbers() {
        let negative = LineItemInput {
            unit_price: -1.0,
            ..input()
        };
        assert!(LineItemRow::build("job-1", &negative, day(2026, 3, 14)).is_err());
        let zero_qty = LineItemInput {
            quantity_used: Some(0),
            ..input()
        };
        assert!(LineItemRow::build("job-1", &zero_qty, day(2026, 3, 14)).is_err());
    }

    #[test]
    fn absent_schedule_times_serialize_as_null() {
        let row = LineItemRow::build("job-1", &input(), day(2026, 3, 14)).unwrap();
        let value = serde_json::to_value(&row).unwrap();
        let obj = value.as_object().unwrap();
        for column in SCHEDULE_TIME_COLUMNS {
            assert!(obj[column].is_null());
        }
        assert!(obj["promised_date"].is_null());
    }

    #[test]
    fn strip_schedule_times_clears_both_fields() {
        let start = Utc::now();
        let item = LineItemInput {
            scheduled_start_time: Some(start),
            scheduled_end_time: Some(start + chrono::TimeDelta::hours(2)),
            ..input()
        };
        let mut row = LineItemRow::build("job-1", &item, day(2026, 3, 14)).unwrap();
        assert!(row.has_schedule_times());
        row.strip_schedule_times();
        assert!(!row.has_schedule_times());
    }

    #[test]
    fn rejects_end_before_start() {
        let start = Utc::now();
        let item = LineItemInput {
            scheduled_start_time: Some(start),
            scheduled_end_time: Some(start - chrono::TimeDelta::hours(1)),
            ..input()
        };
        assert!(LineItemRow::build("job-1", &item, day(2026, 3, 14)).is_err());
    }

    #[test]
    fn degraded_part_row_parses_with_null_vendor() {
        let part: JobPart = serde_json::from_value(serde_json::json!({
            "id": "jp-1",
            "job_id": "job-1",
            "unit_price": 10.0,
            "quantity_used": 2,
            "is_off_site": true,
        }))
        .unwrap();
        assert_eq!(part.vendor, None);
        assert_eq!(part.vendor_name(), None);
    }
}
