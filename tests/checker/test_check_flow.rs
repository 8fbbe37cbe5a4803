// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! End-to-end checks through FactChecker

use factcheck_node::checker::{CheckOptions, CheckOutcome};
use factcheck_node::intake::{ClaimInput, IntakeError};
use factcheck_node::judge::{Judge, VerdictLabel};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::support::*;

fn text(claim: &str) -> ClaimInput {
    ClaimInput::Text(claim.to_string())
}

#[tokio::test]
async fn test_judged_check_report() {
    let judge = Arc::new(ScriptedJudge::new(JudgeScript::Verdict(VerdictLabel::False, 92)));
    let checker = checker_with(vec![A, B, C], Some(judge.clone() as Arc<dyn Judge>), None);

    let report = checker
        .check(
            text("Students will pay 28% GST on school fees"),
            CheckOptions::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    let verdict = report.outcome.verdict().unwrap();
    assert_eq!(verdict.label, VerdictLabel::False);
    assert_eq!(verdict.confidence, 92);
    assert_eq!(report.corpus.urls(), vec![A, C]);
    assert_eq!(report.evidence.len(), 3);
    assert!(report.assessments.is_empty());
    assert!(report.accuracy.is_none());
    assert!(!report.request_id.is_empty());

    let judged = judge.judged.lock().unwrap();
    assert_eq!(judged.len(), 1);
    assert!(judged[0].0.contains("School fees are exempt."));
    assert!(judged[0].0.contains("No 28% GST on students."));
    assert_eq!(judged[0].1, "Students will pay 28% GST on school fees");
}

#[tokio::test]
async fn test_assessments_in_rank_order_with_average() {
    let judge = Arc::new(
        ScriptedJudge::new(JudgeScript::Verdict(VerdictLabel::Misleading, 60))
            .with_accuracy(A, 80)
            .with_accuracy(C, 40),
    );
    let checker = checker_with(vec![A, B, C], Some(judge.clone() as Arc<dyn Judge>), None);

    let options = CheckOptions {
        assess_sources: true,
        ..CheckOptions::default()
    };
    let report = checker
        .check(text("GST on school fees"), options, &CancellationToken::new())
        .await
        .unwrap();

    let urls: Vec<&str> = report.assessments.iter().map(|a| a.url.as_str()).collect();
    assert_eq!(urls, vec![A, C]);
    assert_eq!(judge.assessed.load(Ordering::SeqCst), 2);

    let accuracy = report.accuracy.unwrap();
    assert_eq!(accuracy.samples.len(), 2);
    assert_eq!(accuracy.average_accuracy, 60.0);
}

#[tokio::test]
async fn test_no_evidence_skips_judge() {
    let judge = Arc::new(ScriptedJudge::new(JudgeScript::Verdict(VerdictLabel::True, 99)));
    let checker = checker_with(vec![B], Some(judge.clone() as Arc<dyn Judge>), None);

    let report = checker
        .check(text("GST on school fees"), CheckOptions::default(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.outcome, CheckOutcome::InsufficientEvidence);
    assert_eq!(judge.judge_calls(), 0);
    assert_eq!(report.evidence.len(), 1);
}

#[tokio::test]
async fn test_claim_without_keywords() {
    let judge = Arc::new(ScriptedJudge::new(JudgeScript::Verdict(VerdictLabel::True, 99)));
    let checker = checker_with(vec![A], Some(judge.clone() as Arc<dyn Judge>), None);

    let report = checker
        .check(text("28% 2024"), CheckOptions::default(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.outcome, CheckOutcome::NoQuery);
    assert!(report.keywords.is_empty());
    assert_eq!(judge.judge_calls(), 0);
}

#[tokio::test]
async fn test_without_judge() {
    let checker = checker_with(vec![A], None, None);

    let report = checker
        .check(text("GST on school fees"), CheckOptions::default(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.outcome, CheckOutcome::JudgeUnavailable);
    assert_eq!(report.corpus.len(), 1);
}

#[tokio::test]
async fn test_judge_failure_message_is_generic() {
    let judge = Arc::new(ScriptedJudge::new(JudgeScript::Fail));
    let checker = checker_with(vec![A], Some(judge as Arc<dyn Judge>), None);

    let report = checker
        .check(text("GST on school fees"), CheckOptions::default(), &CancellationToken::new())
        .await
        .unwrap();

    match report.outcome {
        CheckOutcome::JudgeFailed { message } => {
            assert!(!message.contains("10.0.0.5"));
            assert!(!message.is_empty());
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[tokio::test]
async fn test_judge_timeout() {
    let judge = Arc::new(ScriptedJudge::new(JudgeScript::Hang));
    let checker = checker_with(vec![A], Some(judge as Arc<dyn Judge>), None);

    let start = std::time::Instant::now();
    let report = checker
        .check(text("GST on school fees"), CheckOptions::default(), &CancellationToken::new())
        .await
        .unwrap();

    assert!(matches!(report.outcome, CheckOutcome::JudgeFailed { .. }));
    assert!(start.elapsed() < std::time::Duration::from_secs(2));
}

#[tokio::test]
async fn test_blank_claim_rejected() {
    let checker = checker_with(vec![A], None, None);

    let err = checker
        .check(text("  "), CheckOptions::default(), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, IntakeError::EmptyClaim));
}

#[tokio::test]
async fn test_report_carries_audit_path_and_request_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("req-7.csv");
    let checker = checker_with(vec![A, B], None, None);

    let options = CheckOptions {
        request_id: Some("req-7".to_string()),
        audit_path: Some(path.clone()),
        ..CheckOptions::default()
    };
    let report = checker
        .check(text("GST on school fees"), options, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.request_id, "req-7");
    assert_eq!(report.audit_path.as_deref(), Some(path.as_path()));
    assert!(path.exists());

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["requestId"], "req-7");
    assert_eq!(json["outcome"]["status"], "judgeUnavailable");
    assert_eq!(json["evidence"][1]["status"], "notFound");
}

#[tokio::test]
async fn test_runs_are_independent() {
    let checker = Arc::new(checker_with(vec![A, C], None, None));

    let first = {
        let checker = checker.clone();
        tokio::spawn(async move {
            checker
                .check(text("GST fees"), CheckOptions::default(), &CancellationToken::new())
                .await
                .unwrap()
        })
    };
    let second = {
        let checker = checker.clone();
        tokio::spawn(async move {
            checker
                .check(text("students exemption"), CheckOptions::default(), &CancellationToken::new())
                .await
                .unwrap()
        })
    };

    let (first, second) = (first.await.unwrap(), second.await.unwrap());
    assert_ne!(first.request_id, second.request_id);
    assert_eq!(first.keywords, vec!["GST", "fees"]);
    assert_eq!(second.keywords, vec!["students", "exemption"]);
}

#[tokio::test]
async fn test_assessing_check_runs_on_spawned_task() {
    let judge = Arc::new(ScriptedJudge::new(JudgeScript::Verdict(VerdictLabel::True, 70)).with_accuracy(A, 90));
    let checker = Arc::new(checker_with(vec![A], Some(judge as Arc<dyn Judge>), None));

    let options = CheckOptions {
        assess_sources: true,
        ..CheckOptions::default()
    };
    let task = {
        let checker = checker.clone();
        tokio::spawn(async move {
            let cancel = CancellationToken::new();
            checker.check(text("GST on school fees"), options, &cancel).await
        })
    };

    let report = task.await.unwrap().unwrap();
    assert_eq!(report.assessments.len(), 1);
    assert_eq!(report.assessments[0].url, A);
}
