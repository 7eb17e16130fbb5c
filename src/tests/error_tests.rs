#[cfg(test)]
mod tests {
    use crate::error::{AppError, AppResult, OptionExt};
    use crate::store::StoreError;
    use crate::tests::body_json;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_app_error_display() {
        let error = AppError::BadRequest("Invalid input".to_string());
        assert_eq!(format!("{}", error), "Bad request: Invalid input");

        let error = AppError::NotFound("Item not found".to_string());
        assert_eq!(format!("{}", error), "Not found: Item not found");

        let error = AppError::Conflict("no item ids left".to_string());
        assert_eq!(format!("{}", error), "Conflict: no item ids left");

        let error = AppError::Rejected { status: StatusCode::UNPROCESSABLE_ENTITY, message: "bad field".to_string() };
        assert_eq!(format!("{}", error), "Rejected (422): bad field");

        let error = AppError::Persistence("disk full".to_string());
        assert_eq!(format!("{}", error), "Persistence error: disk full");
    }

    #[test]
    fn test_app_error_into_response() {
        assert_eq!(AppError::BadRequest("x".into()).into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("x".into()).into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict("x".into()).into_response().status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::Rejected { status: StatusCode::UNSUPPORTED_MEDIA_TYPE, message: "x".into() }
                .into_response()
                .status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            AppError::Persistence("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_error_body_is_flat() {
        let json = body_json(AppError::BadRequest("Missing 'name' or 'quantity'".into()).into_response()).await;
        assert_eq!(json["error"], "Missing 'name' or 'quantity'");
        assert_eq!(json["code"], "BAD_REQUEST");
        assert_eq!(json["status"], 400);
        assert!(json["timestamp"].is_string());
        assert!(json.get("details").is_none());
    }

    #[tokio::test]
    async fn test_rejection_keeps_extractor_status() {
        let error = AppError::Rejected { status: StatusCode::UNPROCESSABLE_ENTITY, message: "bad field".into() };
        let json = body_json(error.into_response()).await;
        assert_eq!(json["error"], "bad field");
        assert_eq!(json["code"], "INVALID_INPUT");
        assert_eq!(json["status"], 422);
    }

    #[tokio::test]
    async fn test_persistence_error_reports_details() {
        let json = body_json(AppError::Persistence("failed to access data/inventory.json".into()).into_response()).await;
        assert_eq!(json["error"], "The inventory could not be saved");
        assert_eq!(json["code"], "PERSISTENCE_ERROR");
        assert_eq!(json["details"], "failed to access data/inventory.json");
    }

    #[test]
    fn test_from_store_error() {
        let store_error = StoreError::Io {
            path: PathBuf::from("data/inventory.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        match AppError::from(store_error) {
            AppError::Persistence(msg) => {
                assert!(msg.contains("data/inventory.json"));
                assert!(msg.contains("denied"));
            }
            other => panic!("Expected Persistence variant, got {:?}", other),
        }

        match AppError::from(StoreError::IdSpaceExhausted { last: u64::MAX }) {
            AppError::Conflict(msg) => assert!(msg.contains(&u64::MAX.to_string())),
            other => panic!("Expected Conflict variant, got {:?}", other),
        }
    }

    #[test]
    fn test_option_ext() {
        let some_value: Option<i32> = Some(42);
        let result: AppResult<i32> = some_value.ok_or_not_found("Item");
        assert_eq!(result.unwrap(), 42);

        let none_value: Option<i32> = None;
        match none_value.ok_or_not_found("Item") {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Item not found"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }
}
