// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the decoration request handler against collaborator
//! fakes, covering the credit-debit-and-rollback protocol.

use std::sync::Arc;
use std::time::Duration;

use redecor_core::{DecorationRequest, RedecorError, Role, SynthesisResult};
use redecor_service::DecorationService;
use redecor_test_utils::{MemoryLedger, ScriptedSynthesis, StaticVerifier};

const TOKEN: &str = "tok-alice";

fn request() -> DecorationRequest {
    DecorationRequest {
        image: b"jpeg bytes".to_vec(),
        mime_type: "image/jpeg".into(),
        style: "Scandinavian".into(),
        room_description: "a sunny living room".into(),
    }
}

struct Harness {
    service: DecorationService,
    ledger: Arc<MemoryLedger>,
    synthesis: Arc<ScriptedSynthesis>,
}

async fn harness(balance: i64, role: Role, synthesis: ScriptedSynthesis) -> Harness {
    let verifier = Arc::new(StaticVerifier::single(TOKEN, "alice"));
    let ledger = Arc::new(
        MemoryLedger::new()
            .with_account("alice", balance, role)
            .await,
    );
    let synthesis = Arc::new(synthesis);
    let service = DecorationService::new(
        verifier,
        ledger.clone(),
        synthesis.clone(),
        Duration::from_secs(5),
    );
    Harness {
        service,
        ledger,
        synthesis,
    }
}

#[tokio::test]
async fn successful_generation_debits_exactly_one_credit() {
    // Scenario A: balance 3, synthesis returns an image.
    let h = harness(3, Role::Normal, ScriptedSynthesis::new()).await;

    let decoration = h.service.handle(TOKEN, request()).await.unwrap();
    assert!(!decoration.base64_image.is_empty());
    assert_eq!(decoration.mime_type, "image/png");

    assert_eq!(h.ledger.balance("alice").await, 2);
    assert_eq!(h.ledger.credit_calls(), 0);
    assert_eq!(h.synthesis.call_count(), 1);
}

#[tokio::test]
async fn exhausted_quota_never_reaches_synthesis() {
    // Scenario B: balance 0, non-admin.
    let h = harness(0, Role::Normal, ScriptedSynthesis::new()).await;

    let err = h.service.handle(TOKEN, request()).await.unwrap_err();
    assert!(matches!(err, RedecorError::QuotaExceeded));

    assert_eq!(h.synthesis.call_count(), 0);
    assert_eq!(h.ledger.debit_calls(), 0);
    assert_eq!(h.ledger.balance("alice").await, 0);
}

#[tokio::test]
async fn content_block_rolls_the_debit_back() {
    // Scenario C: balance 2, synthesis reports a safety block.
    let h = harness(
        2,
        Role::Normal,
        ScriptedSynthesis::with_outcomes(vec![Ok(SynthesisResult::Blocked {
            reason: "SAFETY".into(),
        })]),
    )
    .await;

    let err = h.service.handle(TOKEN, request()).await.unwrap_err();
    assert!(matches!(err, RedecorError::ContentBlocked { .. }));

    assert_eq!(h.ledger.balance("alice").await, 2);
    assert_eq!(h.ledger.credit_calls(), 1);
}

#[tokio::test]
async fn missing_style_fails_before_any_ledger_access() {
    // Scenario D: missing styleName.
    let h = harness(3, Role::Normal, ScriptedSynthesis::new()).await;

    let mut bad = request();
    bad.style.clear();
    let err = h.service.handle(TOKEN, bad).await.unwrap_err();
    assert!(matches!(err, RedecorError::InvalidInput(_)));

    assert_eq!(h.ledger.account_calls(), 0);
    assert_eq!(h.ledger.debit_calls(), 0);
    assert_eq!(h.synthesis.call_count(), 0);
}

#[tokio::test]
async fn admin_is_never_debited() {
    // Scenario E: admin role, balance 0.
    let h = harness(0, Role::Admin, ScriptedSynthesis::new()).await;

    h.service.handle(TOKEN, request()).await.unwrap();

    assert_eq!(h.synthesis.call_count(), 1);
    assert_eq!(h.ledger.debit_calls(), 0);
    assert_eq!(h.ledger.balance("alice").await, 0);
}

#[tokio::test]
async fn admin_failures_do_not_credit() {
    let h = harness(
        0,
        Role::Admin,
        ScriptedSynthesis::with_outcomes(vec![Ok(SynthesisResult::NoImage)]),
    )
    .await;

    let err = h.service.handle(TOKEN, request()).await.unwrap_err();
    assert!(matches!(err, RedecorError::SynthesisFailed { .. }));

    // Nothing was debited, so nothing must be restored.
    assert_eq!(h.ledger.credit_calls(), 0);
    assert_eq!(h.ledger.balance("alice").await, 0);
}

#[tokio::test]
async fn synthesis_fault_after_debit_restores_balance() {
    // Scenario F: network fault mid-call after a successful debit.
    let h = harness(
        2,
        Role::Normal,
        ScriptedSynthesis::with_outcomes(vec![Err(RedecorError::SynthesisFailed {
            message: "connection reset".into(),
            source: None,
        })]),
    )
    .await;

    let err = h.service.handle(TOKEN, request()).await.unwrap_err();
    assert!(matches!(err, RedecorError::SynthesisFailed { .. }));

    assert_eq!(h.ledger.balance("alice").await, 2);
    assert_eq!(h.ledger.credit_calls(), 1);
}

#[tokio::test]
async fn missing_image_in_response_restores_balance() {
    let h = harness(
        1,
        Role::Normal,
        ScriptedSynthesis::with_outcomes(vec![Ok(SynthesisResult::NoImage)]),
    )
    .await;

    let err = h.service.handle(TOKEN, request()).await.unwrap_err();
    assert!(matches!(err, RedecorError::SynthesisFailed { .. }));
    assert_eq!(h.ledger.balance("alice").await, 1);
}

#[tokio::test]
async fn rate_limit_propagates_and_restores_balance() {
    let h = harness(
        2,
        Role::Normal,
        ScriptedSynthesis::with_outcomes(vec![Err(RedecorError::RateLimited)]),
    )
    .await;

    let err = h.service.handle(TOKEN, request()).await.unwrap_err();
    assert!(matches!(err, RedecorError::RateLimited));
    assert_eq!(h.ledger.balance("alice").await, 2);
}

#[tokio::test]
async fn synthesis_timeout_restores_balance() {
    let verifier = Arc::new(StaticVerifier::single(TOKEN, "alice"));
    let ledger = Arc::new(
        MemoryLedger::new()
            .with_account("alice", 2, Role::Normal)
            .await,
    );
    let synthesis = Arc::new(ScriptedSynthesis::new());
    synthesis.set_delay(Duration::from_secs(60)).await;
    let service = DecorationService::new(
        verifier,
        ledger.clone(),
        synthesis,
        Duration::from_millis(50),
    );

    let err = service.handle(TOKEN, request()).await.unwrap_err();
    assert!(matches!(err, RedecorError::Timeout { .. }));
    assert_eq!(ledger.balance("alice").await, 2);
}

#[tokio::test]
async fn ledger_failure_on_debit_prevents_synthesis() {
    let h = harness(3, Role::Normal, ScriptedSynthesis::new()).await;
    h.ledger.fail_debits();

    let err = h.service.handle(TOKEN, request()).await.unwrap_err();
    assert!(matches!(err, RedecorError::Ledger { .. }));
    assert_eq!(h.synthesis.call_count(), 0);
}

#[tokio::test]
async fn failed_rollback_still_reports_the_original_error() {
    let h = harness(
        2,
        Role::Normal,
        ScriptedSynthesis::with_outcomes(vec![Ok(SynthesisResult::Blocked {
            reason: "SAFETY".into(),
        })]),
    )
    .await;
    h.ledger.fail_credits();

    let err = h.service.handle(TOKEN, request()).await.unwrap_err();
    // The caller sees the content block, not the ledger trouble.
    assert!(matches!(err, RedecorError::ContentBlocked { .. }));
    assert_eq!(h.ledger.credit_calls(), 1);
}

#[tokio::test]
async fn bad_credential_fails_before_any_side_effect() {
    let h = harness(3, Role::Normal, ScriptedSynthesis::new()).await;

    let err = h.service.handle("tok-wrong", request()).await.unwrap_err();
    assert!(matches!(err, RedecorError::Unauthenticated(_)));
    assert_eq!(h.ledger.account_calls(), 0);
    assert_eq!(h.synthesis.call_count(), 0);
}

#[tokio::test]
async fn repeated_success_debits_each_time() {
    // Retrying after a genuine success is a second paid generation.
    let h = harness(3, Role::Normal, ScriptedSynthesis::new()).await;

    h.service.handle(TOKEN, request()).await.unwrap();
    h.service.handle(TOKEN, request()).await.unwrap();

    assert_eq!(h.ledger.balance("alice").await, 1);
    assert_eq!(h.ledger.debit_calls(), 2);
    assert_eq!(h.synthesis.call_count(), 2);
}

#[tokio::test]
async fn concurrent_requests_cannot_overdraw_one_credit() {
    let verifier = Arc::new(StaticVerifier::single(TOKEN, "alice"));
    let ledger = Arc::new(
        MemoryLedger::new()
            .with_account("alice", 1, Role::Normal)
            .await,
    );
    let synthesis = Arc::new(ScriptedSynthesis::new());
    let service = Arc::new(DecorationService::new(
        verifier,
        ledger.clone(),
        synthesis.clone(),
        Duration::from_secs(5),
    ));

    let a = tokio::spawn({
        let service = service.clone();
        async move { service.handle(TOKEN, request()).await }
    });
    let b = tokio::spawn({
        let service = service.clone();
        async move { service.handle(TOKEN, request()).await }
    });
    let (a, b) = (a.await.unwrap(), b.await.unwrap());

    let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
    let quota_errors = [&a, &b]
        .iter()
        .filter(|r| matches!(r, Err(RedecorError::QuotaExceeded)))
        .count();
    assert_eq!(successes, 1, "exactly one request wins the last credit");
    assert_eq!(quota_errors, 1, "the loser sees quota exhaustion");
    assert_eq!(synthesis.call_count(), 1);
    assert_eq!(ledger.balance("alice").await, 0);
}

#[tokio::test]
async fn whitespace_description_reaches_synthesis_with_fallback_phrase() {
    let h = harness(1, Role::Normal, ScriptedSynthesis::new()).await;

    let mut req = request();
    req.room_description = "   ".into();
    h.service.handle(TOKEN, req).await.unwrap();

    let instructions = h.synthesis.instructions().await;
    assert_eq!(instructions.len(), 1);
    assert!(instructions[0].contains("a room"));
    assert!(instructions[0].contains("Scandinavian"));
}
