//! Tests for API module
//!
//! Tests error types, request/response types, and handler functions.

use authgate::storage::FileLedgerStore;
use tempfile::TempDir;

use crate::common::{FailingStore, Stubs};

fn store() -> (TempDir, FileLedgerStore) {
    let temp = TempDir::new().unwrap();
    let store = FileLedgerStore::new(temp.path().join("ledger.json"));
    (temp, store)
}

// =============================================================================
// ERROR TYPES
// =============================================================================

mod error_tests {
    use authgate::api::{ApiError, ErrorCode};
    use authgate::core::error::VerifyError;
    use authgate::core::ledger::LedgerFull;

    #[test]
    fn test_error_code_not_found() {
        let err = ApiError::not_found("Verification not found");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message, "Verification not found");
    }

    #[test]
    fn test_error_code_bad_request() {
        let err = ApiError::bad_request("Invalid input");
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_error_code_upstream() {
        let err = ApiError::upstream("model down");
        assert_eq!(err.status_code(), 502);
        assert_eq!(err.code.as_str(), "UPSTREAM_ERROR");
    }

    #[test]
    fn test_error_code_internal() {
        let err = ApiError::internal("Something went wrong");
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_verify_errors_map_to_codes() {
        let err = ApiError::from(VerifyError::EmptyUrl);
        assert_eq!(err.code, ErrorCode::BadRequest);

        let err = ApiError::from(VerifyError::model(anyhow::anyhow!("quota")));
        assert_eq!(err.code, ErrorCode::Upstream);
        assert!(err.message.contains("quota"));

        let err = ApiError::from(VerifyError::Disagreement {
            validator: 2,
            reason: "sentiment".to_string(),
        });
        assert_eq!(err.code, ErrorCode::Upstream);
    }

    #[test]
    fn test_ledger_errors_map_to_internal() {
        let err = ApiError::from(VerifyError::from(LedgerFull(7)));
        assert_eq!(err.code, ErrorCode::Internal);

        let err = ApiError::from(VerifyError::storage(&anyhow::anyhow!("disk full")));
        assert_eq!(err.status_code(), 500);
        assert!(err.message.contains("disk full"));
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::not_found("Resource missing");
        let display = format!("{err}");
        assert!(display.contains("NOT_FOUND"));
        assert!(display.contains("Resource missing"));
    }
}

// =============================================================================
// RESPONSE TYPES
// =============================================================================

mod response_tests {
    use authgate::api::{ApiResponse, CountData};

    #[test]
    fn test_api_response_success() {
        let response = ApiResponse::success(CountData { count: 3 });
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["count"], 3);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_api_response_error() {
        let response = ApiResponse::<()>::error("NOT_FOUND", "Verification not found: 9");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert!(json.get("data").is_none());
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

mod handler_tests {
    use authgate::api::{self, BatchVerifyRequest, ErrorCode, VerifyRequest};
    use authgate::core::ports::LedgerStore;

    use super::{FailingStore, Stubs, store};

    #[test]
    fn test_create_verification_persists() {
        let (_temp, store) = store();
        let (mut verifier, _) = Stubs::new().build();

        let record = api::create_verification(
            &mut verifier,
            &store,
            &VerifyRequest {
                url: "https://a.example".to_string(),
            },
        )
        .unwrap();

        assert_eq!(record.id, 1);
        let saved = store.load().unwrap();
        assert_eq!(saved.count(), 1);
        assert_eq!(saved.get(1), Some(&record));
    }

    #[test]
    fn test_create_verification_empty_url_is_bad_request() {
        let (_temp, store) = store();
        let (mut verifier, _) = Stubs::new().build();

        let err = api::create_verification(
            &mut verifier,
            &store,
            &VerifyRequest { url: String::new() },
        )
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::BadRequest);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_create_verification_fetch_failure_is_upstream() {
        let (_temp, store) = store();
        let (mut verifier, _) = Stubs::new().fail_fetch_on("https://gone.example").build();

        let err = api::create_verification(
            &mut verifier,
            &store,
            &VerifyRequest {
                url: "https://gone.example".to_string(),
            },
        )
        .unwrap_err();

        assert_eq!(err.status_code(), 502);
        assert_eq!(verifier.get_verification_count(), 0);
    }

    #[test]
    fn test_get_verification_by_id() {
        let (_temp, store) = store();
        let (mut verifier, _) = Stubs::new().build();
        api::create_verification(
            &mut verifier,
            &store,
            &VerifyRequest {
                url: "https://a.example".to_string(),
            },
        )
        .unwrap();

        assert_eq!(api::get_verification(&verifier, "1").unwrap().url, "https://a.example");
        assert_eq!(api::get_verification(&verifier, "2").unwrap_err().code, ErrorCode::NotFound);
        assert_eq!(
            api::get_verification(&verifier, "abc").unwrap_err().code,
            ErrorCode::BadRequest
        );
        assert_eq!(api::get_verification(&verifier, "-1").unwrap_err().code, ErrorCode::BadRequest);
    }

    #[test]
    fn test_batch_verify_persists_all() {
        let (_temp, store) = store();
        let (mut verifier, _) = Stubs::new().build();
        let urls = (0..12).map(|i| format!("https://{i}.example")).collect();

        let data = api::batch_verify(&mut verifier, &store, &BatchVerifyRequest { urls }).unwrap();

        assert_eq!(data.count, 10);
        assert_eq!(store.load().unwrap().count(), 10);
        assert_eq!(api::count_verifications(&verifier).unwrap().count, 10);
        assert_eq!(api::list_verifications(&verifier).unwrap().verifications.len(), 10);
    }

    #[test]
    fn test_batch_verify_requires_urls() {
        let (_temp, store) = store();
        let (mut verifier, _) = Stubs::new().build();

        let err = api::batch_verify(&mut verifier, &store, &BatchVerifyRequest { urls: vec![] })
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::BadRequest);
    }

    #[test]
    fn test_status_reports_ledger_state() {
        let (_temp, store) = store();
        let (mut verifier, _) = Stubs::new().build();
        api::create_verification(
            &mut verifier,
            &store,
            &VerifyRequest {
                url: "https://a.example".to_string(),
            },
        )
        .unwrap();

        let status = api::get_status(&verifier, &store).unwrap();

        assert_eq!(status.model, "stub-model");
        assert_eq!(status.validators, 1);
        assert_eq!(status.verifications, 1);
        assert_eq!(status.next_id, 2);
        assert_eq!(status.batch_limit, 10);
        assert_eq!(status.content_limit, 8000);
        assert!(status.ledger.ends_with("ledger.json"));
    }

    #[test]
    fn test_failed_save_leaves_no_record_behind() {
        let (mut verifier, _) = Stubs::new().build();

        let err = api::create_verification(
            &mut verifier,
            &FailingStore::new(),
            &VerifyRequest {
                url: "https://a.example".to_string(),
            },
        )
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::Internal);
        assert!(err.message.contains("disk full"));
        assert_eq!(verifier.get_verification_count(), 0);
        assert!(api::get_verification(&verifier, "1").is_err());
        assert_eq!(verifier.ledger().next_id(), 1);

        let (_temp, store) = store();
        let record = api::create_verification(
            &mut verifier,
            &store,
            &VerifyRequest {
                url: "https://b.example".to_string(),
            },
        )
        .unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(store.load().unwrap().count(), 1);
    }

    #[test]
    fn test_failed_batch_save_leaves_no_record_behind() {
        let (mut verifier, _) = Stubs::new().build();
        let urls = vec!["https://a.example".to_string(), "https://b.example".to_string()];

        let store = FailingStore::new();
        let err =
            api::batch_verify(&mut verifier, &store, &BatchVerifyRequest { urls }).unwrap_err();

        assert_eq!(err.status_code(), 500);
        assert_eq!(api::count_verifications(&verifier).unwrap().count, 0);
    }

    #[test]
    fn test_ids_continue_from_stored_ledger() {
        let (_temp, store) = store();
        let (mut first, _) = Stubs::new().build();
        let (mut second, _) = Stubs::new().build();

        let a = api::create_verification(
            &mut first,
            &store,
            &VerifyRequest {
                url: "https://a.example".to_string(),
            },
        )
        .unwrap();
        let b = api::create_verification(
            &mut second,
            &store,
            &VerifyRequest {
                url: "https://b.example".to_string(),
            },
        )
        .unwrap();

        assert_eq!((a.id, b.id), (1, 2));
        let saved = store.load().unwrap();
        assert_eq!(saved.get(1).unwrap().url, "https://a.example");
        assert_eq!(saved.get(2).unwrap().url, "https://b.example");
        assert_eq!(api::count_verifications(&second).unwrap().count, 2);
    }
}
