use crate::error::ApiError;
use chrono::NaiveDate;
use garde::{Report, Validate};
use std::borrow::Cow;

impl From<Report> for ApiError {
	fn from(report: Report) -> Self {
		Self::unprocessable_entity(report.iter().map(|(path, error)| {
			let field = path.to_string();
			let field = if field.is_empty() { "body".to_string() } else { field };
			(Cow::Owned(field), Cow::Owned(error.message().to_string()))
		}))
	}
}

/// Run the garde rules on a request body.
pub fn validated<T>(value: T) -> Result<T, ApiError>
where
	T: Validate,
	T::Context: Default,
{
	value.validate()?;
	Ok(value)
}

/// Unwrap a field garde already marked `required`.
pub fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ApiError> {
	value.ok_or_else(|| ApiError::field(field, "not set"))
}

/// Strict `YYYY-MM-DD` that must name a real calendar day.
pub fn parse_calendar_date(raw: &str, field: &'static str) -> Result<NaiveDate, ApiError> {
	let shaped = raw.len() == 10 && raw.bytes().enumerate().all(|(i, b)| if i == 4 || i == 7 { b == b'-' } else { b.is_ascii_digit() });

	if !shaped {
		return Err(ApiError::field(field, "must be a date formatted as YYYY-MM-DD"));
	}

	NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ApiError::field(field, "must be a valid calendar date"))
}
