use crate::bucketing::parse_date;
use crate::errors::AppError;
use crate::models::{FULL_NAME, SERVICE_DATE};
use std::collections::BTreeMap;

type Fields = BTreeMap<String, String>;

/// Checks a new client card: a name and a real service date are required.
pub fn validate_new_client(fields: &Fields) -> Result<(), AppError> {
    let name = fields.get(FULL_NAME).map(|v| v.trim()).unwrap_or_default();
    if name.is_empty() {
        return Err(AppError::bad_request(format!("field \"{FULL_NAME}\" is required")));
    }

    let date = fields.get(SERVICE_DATE).map(String::as_str).unwrap_or_default();
    if date.is_empty() {
        return Err(AppError::bad_request(format!("field \"{SERVICE_DATE}\" is required")));
    }

    validate_dates(fields)
}

/// Every non-empty date field must hold a real `YYYY-MM-DD` date.
pub fn validate_dates(fields: &Fields) -> Result<(), AppError> {
    for (name, value) in fields {
        if !name.contains("Дата") || value.is_empty() {
            continue;
        }
        if parse_date(value).is_none() {
            return Err(AppError::bad_request(format!(
                "invalid date in field \"{name}\": {value} (expected YYYY-MM-DD)"
            )));
        }
    }
    Ok(())
}
