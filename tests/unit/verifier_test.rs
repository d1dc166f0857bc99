//! Tests for the verification pipeline through its public surface

use authgate::adapters::QuorumReconciler;
use authgate::core::error::VerifyError;
use authgate::core::services::{FALLBACK_SUMMARY, MAX_BATCH_SIZE, MAX_CONTENT_CHARS};

use crate::common::{FIXED_CALLER, FIXED_TIMESTAMP, Stubs, VALID_ANSWER, answer};

// =============================================================================
// LEDGER IDENTIFIERS
// =============================================================================

#[test]
fn test_ids_are_sequential_from_one() {
    let (mut verifier, _) = Stubs::new().build();

    let ids: Vec<u64> = (0..5)
        .map(|i| verifier.verify_content(&format!("https://{i}.example")).unwrap().id)
        .collect();

    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(verifier.get_verification_count(), 5);
    assert_eq!(verifier.ledger().next_id(), 6);
}

#[test]
fn test_unknown_ids_are_absent() {
    let (mut verifier, _) = Stubs::new().build();
    assert!(verifier.get_verification(1).is_none());

    verifier.verify_content("https://a.example").unwrap();
    assert!(verifier.get_verification(0).is_none());
    assert!(verifier.get_verification(1).is_some());
    assert!(verifier.get_verification(2).is_none());
}

#[test]
fn test_list_is_sorted_and_matches_count() {
    let (mut verifier, _) = Stubs::new().build();
    for i in 0..12 {
        verifier.verify_content(&format!("https://{i}.example")).unwrap();
    }

    let all = verifier.get_all_verifications();
    assert_eq!(all.len(), verifier.get_verification_count());
    assert!(all.windows(2).all(|w| w[0].id < w[1].id));
    assert_eq!(all[11].url, "https://11.example");
}

#[test]
fn test_empty_ledger_lists_nothing() {
    let (verifier, _) = Stubs::new().build();
    assert!(verifier.get_all_verifications().is_empty());
    assert_eq!(verifier.get_verification_count(), 0);
}

// =============================================================================
// RECORD CONTENTS
// =============================================================================

#[test]
fn test_valid_answer_is_stored_verbatim() {
    let (mut verifier, _) = Stubs::new().default_answer(VALID_ANSWER).build();

    let record = verifier.verify_content("https://rivers.example/essay").unwrap();

    assert_eq!(record.url, "https://rivers.example/essay");
    assert_eq!(record.originality, 88);
    assert_eq!(record.plagiarism, 7);
    assert_eq!(record.deepfake, 12);
    assert_eq!(record.sentiment, "Positive");
    assert_eq!(record.summary, "An essay about rivers.");
    assert_eq!(record.reasoning, "Distinct voice and sourcing.");
    assert_eq!(record.timestamp, FIXED_TIMESTAMP);
    assert_eq!(record.validator, FIXED_CALLER);
    assert_eq!(record.status, "completed");
    assert_eq!(verifier.get_verification(record.id), Some(record));
}

#[test]
fn test_out_of_range_answers_are_not_rejected() {
    let (mut verifier, _) = Stubs::new().default_answer(answer(250, 0, 101, "Ecstatic")).build();

    let record = verifier.verify_content("https://loose.example").unwrap();

    assert_eq!(record.originality, 250);
    assert_eq!(record.deepfake, 101);
    assert_eq!(record.sentiment, "Ecstatic");
    assert!(!record.analysis().is_within_domain());
}

#[test]
fn test_invalid_answer_stores_fallback() {
    let (mut verifier, _) = Stubs::new().default_answer("I think this page is fine.").build();

    let record = verifier.verify_content("https://a.example").unwrap();

    assert_eq!(record.id, 1);
    assert_eq!(record.originality, 75);
    assert_eq!(record.plagiarism, 25);
    assert_eq!(record.deepfake, 20);
    assert_eq!(record.sentiment, "Neutral");
    assert_eq!(record.summary, FALLBACK_SUMMARY);
    assert!(record.reasoning.starts_with("Parse error: "));
    assert_eq!(record.status, "completed");
}

#[test]
fn test_fenced_answer_matches_unfenced() {
    let fenced = format!("```json\n{VALID_ANSWER}\n```");
    let (mut verifier, _) = Stubs::new().answer(fenced).answer(VALID_ANSWER).build();

    let a = verifier.verify_content("https://a.example").unwrap();
    let b = verifier.verify_content("https://a.example").unwrap();

    assert_eq!(a.analysis(), b.analysis());
    assert_eq!(a.originality, 88);
}

#[test]
fn test_missing_fields_take_defaults() {
    let (mut verifier, _) =
        Stubs::new().default_answer(r#"{"originality": 40, "sentiment": null}"#).build();

    let record = verifier.verify_content("https://a.example").unwrap();

    assert_eq!(record.originality, 40);
    assert_eq!(record.plagiarism, 25);
    assert_eq!(record.deepfake, 20);
    assert_eq!(record.sentiment, "Neutral");
    assert_eq!(record.summary, "");
}

#[test]
fn test_url_is_trimmed_before_storage() {
    let (mut verifier, calls) = Stubs::new().build();
    let record = verifier.verify_content("  https://a.example \n").unwrap();
    assert_eq!(record.url, "https://a.example");
    assert_eq!(calls.fetched(), vec!["https://a.example"]);
}

// =============================================================================
// PROMPT
// =============================================================================

#[test]
fn test_content_is_truncated_before_prompting() {
    let content = "Ж".repeat(MAX_CONTENT_CHARS + 1000);
    let (mut verifier, calls) = Stubs::new().content(content).build();

    verifier.verify_content("https://long.example").unwrap();

    let prompts = calls.prompts();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].chars().filter(|c| *c == 'Ж').count(), MAX_CONTENT_CHARS);
}

#[test]
fn test_prompt_carries_page_content() {
    let (mut verifier, calls) = Stubs::new().content("Unique sentence about herons.").build();

    verifier.verify_content("https://herons.example").unwrap();

    let prompt = &calls.prompts()[0];
    assert!(prompt.contains("CONTENT TO ANALYZE:\nUnique sentence about herons."));
    assert!(!prompt.contains("https://herons.example"));
}

// =============================================================================
// FAILURES
// =============================================================================

#[test]
fn test_empty_url_is_rejected_without_fetching() {
    let (mut verifier, calls) = Stubs::new().build();

    assert!(matches!(verifier.verify_content("   "), Err(VerifyError::EmptyUrl)));
    assert!(calls.fetched().is_empty());
    assert_eq!(verifier.get_verification_count(), 0);
}

#[test]
fn test_fetch_failure_writes_nothing() {
    let (mut verifier, calls) = Stubs::new().fail_fetch_on("https://gone.example").build();

    let err = verifier.verify_content("https://gone.example").unwrap_err();

    assert!(matches!(err, VerifyError::Fetch { .. }));
    assert!(err.is_upstream());
    assert_eq!(verifier.get_verification_count(), 0);
    assert_eq!(verifier.ledger().next_id(), 1);
    assert!(calls.prompts().is_empty());

    let record = verifier.verify_content("https://ok.example").unwrap();
    assert_eq!(record.id, 1);
}

#[test]
fn test_model_failure_writes_nothing() {
    let (mut verifier, _) = Stubs::new().fail_model().build();

    let err = verifier.verify_content("https://a.example").unwrap_err();

    assert!(matches!(err, VerifyError::Model(_)));
    assert_eq!(verifier.get_verification_count(), 0);
    assert_eq!(verifier.ledger().next_id(), 1);
}

#[test]
fn test_disagreeing_validators_write_nothing() {
    let (mut verifier, calls) = Stubs::new()
        .answer(answer(90, 5, 5, "Positive"))
        .answer(answer(20, 5, 5, "Positive"))
        .reconciler(QuorumReconciler::new(3, 10))
        .build();

    let err = verifier.verify_content("https://a.example").unwrap_err();

    assert!(matches!(err, VerifyError::Disagreement { validator: 1, .. }));
    assert_eq!(calls.prompts().len(), 2);
    assert_eq!(verifier.get_verification_count(), 0);
}

#[test]
fn test_agreeing_validators_store_leader_answer() {
    let (mut verifier, calls) = Stubs::new()
        .answer(answer(90, 5, 5, "Positive"))
        .answer(answer(85, 8, 2, "positive"))
        .answer(answer(94, 1, 9, "POSITIVE"))
        .reconciler(QuorumReconciler::new(3, 10))
        .build();

    let record = verifier.verify_content("https://a.example").unwrap();

    assert_eq!(calls.prompts().len(), 3);
    assert_eq!(record.originality, 90);
    assert_eq!(record.sentiment, "Positive");
}

// =============================================================================
// BATCH
// =============================================================================

#[test]
fn test_batch_processes_first_ten_in_order() {
    let urls: Vec<String> = (0..15).map(|i| format!("https://{i}.example")).collect();
    let (mut verifier, calls) = Stubs::new().build();

    let records = verifier.batch_verify(&urls).unwrap();

    assert_eq!(records.len(), MAX_BATCH_SIZE);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.url, urls[i]);
        assert_eq!(record.id, i as u64 + 1);
    }
    assert_eq!(calls.fetched(), urls[..MAX_BATCH_SIZE].to_vec());
    assert_eq!(verifier.get_verification_count(), MAX_BATCH_SIZE);
}

#[test]
fn test_batch_continues_numbering() {
    let (mut verifier, _) = Stubs::new().build();
    verifier.verify_content("https://first.example").unwrap();

    let records = verifier.batch_verify(&["https://a.example", "https://b.example"]).unwrap();

    let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[test]
fn test_empty_batch_writes_nothing() {
    let (mut verifier, _) = Stubs::new().build();
    let none: [&str; 0] = [];
    assert!(verifier.batch_verify(&none).unwrap().is_empty());
    assert_eq!(verifier.get_verification_count(), 0);
}

#[test]
fn test_batch_failure_writes_nothing() {
    let urls = [
        "https://a.example",
        "https://b.example",
        "https://bad.example",
        "https://d.example",
    ];
    let (mut verifier, calls) = Stubs::new().fail_fetch_on("https://bad.example").build();

    let err = verifier.batch_verify(&urls).unwrap_err();

    match err {
        VerifyError::Batch { index, url, source } => {
            assert_eq!(index, 2);
            assert_eq!(url, "https://bad.example");
            assert!(matches!(*source, VerifyError::Fetch { .. }));
        },
        other => panic!("expected batch error, got {other:?}"),
    }
    assert_eq!(verifier.get_verification_count(), 0);
    assert_eq!(verifier.ledger().next_id(), 1);
    assert_eq!(calls.fetched().len(), 3);
}

#[test]
fn test_batch_rejects_blank_entry() {
    let (mut verifier, _) = Stubs::new().build();

    let err = verifier.batch_verify(&["https://a.example", " "]).unwrap_err();

    assert!(matches!(err, VerifyError::Batch { index: 1, .. }));
    assert!(!err.is_upstream());
    assert_eq!(verifier.get_verification_count(), 0);
}
