pub mod agree;
pub mod generate;
pub mod health;
pub mod history;
pub mod tokens;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiError;

/// Body accepted by the generation endpoints.
#[derive(Debug, Deserialize)]
pub struct InputRequest {
    #[serde(default)]
    pub input: Option<String>,
}

/// Validate a generation body and return the trimmed input.
pub fn read_input(payload: Result<Json<InputRequest>, JsonRejection>) -> Result<String, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        debug!(%rejection, "rejected generation body");
        ApiError::bad_request("No data provided")
    })?;

    let input = request.input.as_deref().map(str::trim).unwrap_or_default();
    if input.is_empty() {
        return Err(ApiError::bad_request("No input provided"));
    }

    Ok(input.to_owned())
}

pub async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_is_trimmed() {
        let payload = Ok(Json(InputRequest {
            input: Some("  rooftop bar \n".to_owned()),
        }));
        assert_eq!(read_input(payload).unwrap(), "rooftop bar");
    }

    #[test]
    fn blank_or_missing_input_is_rejected() {
        for input in [None, Some(String::new()), Some("   ".to_owned())] {
            let err = read_input(Ok(Json(InputRequest { input }))).unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
            assert_eq!(err.message(), "No input provided");
        }
    }
}
