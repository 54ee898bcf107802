//! Helpers shared by the request DTOs

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use dc_core::domain::time::{jakarta_offset, parse_date};
use dc_core::errors::ValidationError;
use dc_core::services::ImageUpload;

use crate::handlers::ApiError;

/// Runs the `validator` rules of a DTO and reports the first failing field
pub fn validated<T: Validate>(dto: T) -> Result<T, ApiError> {
    dto.validate().map_err(first_error)?;
    Ok(dto)
}

fn first_error(errors: ValidationErrors) -> ApiError {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.keys().copied().collect();
    fields.sort_unstable();

    let error = fields
        .first()
        .and_then(|field| {
            field_errors
                .get(field)
                .and_then(|errs| errs.first())
                .map(|err| match err.code.as_ref() {
                    "required" => ValidationError::required(*field),
                    "email" => ValidationError::InvalidEmail,
                    _ => ValidationError::format(*field),
                })
        })
        .unwrap_or_else(|| ValidationError::format("payload"));

    error.into()
}

/// Image carried inside a JSON body as base64
///
/// `data` may be a bare base64 string or a `data:<type>;base64,<payload>` URI.
#[derive(Debug, Clone, Deserialize)]
pub struct ImagePayload {
    pub content_type: String,
    pub data: String,
}

impl ImagePayload {
    pub fn into_upload(self) -> Result<ImageUpload, ApiError> {
        let encoded = match self.data.split_once(";base64,") {
            Some((_, payload)) => payload,
            None => self.data.as_str(),
        };
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|_| ApiError::from(ValidationError::format("image")))?;
        Ok(ImageUpload::new(bytes, self.content_type)?)
    }
}

/// Body of the admin status endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdate<S> {
    pub status: S,
}

pub fn optional_image(image: Option<ImagePayload>) -> Result<Option<ImageUpload>, ApiError> {
    image.map(ImagePayload::into_upload).transpose()
}

pub fn date(field: &str, value: &str) -> Result<NaiveDate, ApiError> {
    Ok(parse_date(field, value)?)
}

pub fn optional_date(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| date(field, v))
        .transpose()
}

/// `HH:MM` or `HH:MM:SS`
pub fn time(field: &str, value: &str) -> Result<NaiveTime, ApiError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| ValidationError::format(field).into())
}

pub fn optional_time(field: &str, value: Option<&str>) -> Result<Option<NaiveTime>, ApiError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| time(field, v))
        .transpose()
}

/// RFC 3339 timestamp, or a bare date meaning the end of that day in Jakarta
pub fn optional_instant(field: &str, value: Option<&str>) -> Result<Option<DateTime<Utc>>, ApiError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(instant.with_timezone(&Utc)));
    }

    let day = date(field, value)?;
    let end_of_day = day
        .and_hms_opt(23, 59, 59)
        .and_then(|naive| jakarta_offset().from_local_datetime(&naive).single())
        .ok_or_else(|| ApiError::from(ValidationError::format(field)))?;
    Ok(Some(end_of_day.with_timezone(&Utc)))
}
