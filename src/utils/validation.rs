use validator::Validate;
use crate::errors::AppError;

/// Runs the payload's validation rules, replacing the per-field report with `message`.
pub fn validate_payload<T: Validate>(payload: &T, message: &str) -> Result<(), AppError> {
    payload.validate().map_err(|err| {
        log::debug!("validation failed: {}", err);
        AppError::BadRequest(message.to_string())
    })
}
