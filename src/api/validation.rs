use super::ApiError;
use crate::models::BatchAction;

pub fn validate_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid id: {}. Id must be a positive integer",
            id
        )));
    }
    Ok(id)
}

pub fn validate_batch_request(option: &str, ids: &[i32]) -> Result<BatchAction, ApiError> {
    let action = BatchAction::parse(option).ok_or_else(|| {
        ApiError::validation(format!(
            "Unknown option: {}. Expected active, inactive, or delete",
            option
        ))
    })?;

    if ids.is_empty() {
        return Err(ApiError::validation("No ids provided"));
    }

    Ok(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id() {
        assert!(validate_id(1).is_ok());
        assert!(validate_id(12345).is_ok());
        assert!(validate_id(0).is_err());
        assert!(validate_id(-1).is_err());
    }

    #[test]
    fn test_validate_batch_request() {
        assert!(matches!(
            validate_batch_request("active", &[1, 2]),
            Ok(BatchAction::Activate)
        ));
        assert!(matches!(
            validate_batch_request("delete", &[3]),
            Ok(BatchAction::Delete)
        ));
        assert!(validate_batch_request("archive", &[1]).is_err());
        assert!(validate_batch_request("active", &[]).is_err());
    }
}
