// Run orchestrator flows over the in-memory store
//
// - Acme calls report end to end
// - Failure in one definition does not stop the sweep
// - last_sent_at only advances after a confirmed delivery
// - On-demand runs ignore the due check and the active flag

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use chrono::Duration;

use helpers::*;
use reportflow::core::AppError;
use reportflow::reports::models::{FailureReason, ReportDefinitionRecord, Schedule};
use reportflow::reports::repositories::InMemoryReportStore;
use reportflow::reports::services::{is_due, DeliveryStatus, ReportRunner};

#[tokio::test]
async fn test_acme_daily_calls_report_end_to_end() {
    let now = monday();
    let store = acme_store().await;
    store.insert_definition(definition("rpt-calls", "calls")).await;

    let durations = [60, 90, 120, 45, 75, 30, 100, 80, 90, 90];
    for (i, seconds) in durations.iter().enumerate() {
        let status = if i < 7 { "ended" } else { "failed" };
        insert_call(&store, status, *seconds, now - Duration::hours(i as i64 + 1)).await;
    }
    // Outside the daily window
    insert_call(&store, "ended", 600, now - Duration::days(3)).await;

    let mailer = ScriptedMailer::delivering();
    let runner = runner(store.clone(), mailer.clone());

    let summary = runner.run_sweep(now).await.unwrap();

    assert_eq!((summary.processed, summary.failed, summary.total), (1, 0, 1));
    assert_eq!(
        store.definition("rpt-calls").await.unwrap().last_sent_at,
        Some(now)
    );

    let sent = mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipients, vec!["ops@acme.io".to_string()]);
    assert_eq!(sent[0].subject, "Call Activity for Acme (October 18, 2026)");

    let html = &sent[0].html;
    assert!(html.contains(">10</td>"), "total calls missing");
    assert!(html.contains(">7</td>"), "completed calls missing");
    assert!(html.contains(">70%</td>"));
    // 780 seconds over 10 calls
    assert!(html.contains(">13 min</td>"));
    assert!(html.contains(">78s</td>"));
}

#[tokio::test]
async fn test_sweep_isolates_failing_definition() {
    let now = monday();
    let store = Arc::new(InMemoryReportStore::new());
    for (id, org) in [("a-first", "org-a"), ("b-second", "org-b"), ("c-third", "org-c")] {
        store
            .insert_definition(ReportDefinitionRecord {
                organization_id: org.to_string(),
                ..definition(id, "team")
            })
            .await;
    }

    let mailer = ScriptedMailer::delivering();
    let runner = ReportRunner::new(
        store.clone(),
        UnreachableFor::new(store.clone(), "org-b"),
        mailer.clone(),
    );

    let summary = runner.run_sweep(now).await.unwrap();

    assert_eq!((summary.processed, summary.failed, summary.total), (2, 1, 3));
    assert!(summary.outcomes[0].success);
    assert_eq!(summary.outcomes[1].report_id, "b-second");
    assert_eq!(summary.outcomes[1].failure, Some(FailureReason::AggregationFailed));
    assert!(summary.outcomes[2].success);

    assert!(store.definition("a-first").await.unwrap().last_sent_at.is_some());
    assert!(store.definition("b-second").await.unwrap().last_sent_at.is_none());
    assert!(store.definition("c-third").await.unwrap().last_sent_at.is_some());
    assert_eq!(mailer.sent().await.len(), 2);
}

#[tokio::test]
async fn test_rejected_delivery_never_advances_state() {
    let now = monday();
    let store = acme_store().await;
    store.insert_definition(definition("rpt-usage", "usage")).await;

    let mailer = ScriptedMailer::rejecting();
    let runner = runner(store.clone(), mailer.clone());

    for attempt in 1..=2 {
        let summary = runner.run_sweep(now + Duration::minutes(attempt)).await.unwrap();
        assert_eq!((summary.processed, summary.failed, summary.total), (0, 1, 1));
        assert_eq!(summary.outcomes[0].failure, Some(FailureReason::DeliveryFailed));
    }

    let stored = store.definition("rpt-usage").await.unwrap();
    assert_eq!(stored.last_sent_at, None);
    assert!(is_due(&Schedule::from_record(&stored), now));
    assert_eq!(mailer.sent().await.len(), 2);
}

#[tokio::test]
async fn test_unconfigured_transport_is_a_failed_run() {
    let store = acme_store().await;
    store.insert_definition(definition("rpt-billing", "billing")).await;

    let runner = runner(store.clone(), ScriptedMailer::new(DeliveryStatus::NotConfigured));

    let summary = runner.run_sweep(monday()).await.unwrap();

    assert_eq!((summary.processed, summary.failed), (0, 1));
    assert_eq!(summary.outcomes[0].failure, Some(FailureReason::NotConfigured));
    assert_eq!(store.definition("rpt-billing").await.unwrap().last_sent_at, None);
}

#[tokio::test]
async fn test_on_demand_bypasses_active_flag_and_due_check() {
    let now = monday();
    let store = acme_store().await;
    store
        .insert_definition(ReportDefinitionRecord {
            is_active: false,
            last_sent_at: Some(now - Duration::minutes(1)),
            ..definition("rpt-paused", "deals")
        })
        .await;

    let mailer = ScriptedMailer::delivering();
    let runner = runner(store.clone(), mailer.clone());

    // Inactive and recently sent: the sweep ignores it
    let summary = runner.run_sweep(now).await.unwrap();
    assert_eq!(summary.total, 0);

    let outcome = runner.run_on_demand("rpt-paused", now).await.unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.report_id, "rpt-paused");
    assert_eq!(
        store.definition("rpt-paused").await.unwrap().last_sent_at,
        Some(now)
    );
    assert_eq!(mailer.sent().await.len(), 1);
}

#[tokio::test]
async fn test_on_demand_unknown_id_is_distinct_not_found() {
    let store = acme_store().await;
    let runner = runner(store, ScriptedMailer::delivering());

    let err = runner.run_on_demand("rpt-missing", monday()).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_weekly_definition_waits_for_its_weekday() {
    let now = monday();
    let store = acme_store().await;
    store
        .insert_definition(ReportDefinitionRecord {
            frequency: "weekly".to_string(),
            day_of_week: Some(2),
            last_sent_at: Some(now - Duration::days(30)),
            ..definition("rpt-tuesday", "campaigns")
        })
        .await;
    store
        .insert_definition(ReportDefinitionRecord {
            frequency: "weekly".to_string(),
            day_of_week: Some(1),
            last_sent_at: Some(now - Duration::days(7)),
            ..definition("rpt-monday", "campaigns")
        })
        .await;

    let mailer = ScriptedMailer::delivering();
    let runner = runner(store.clone(), mailer.clone());

    let summary = runner.run_sweep(now).await.unwrap();

    assert_eq!(summary.total, 1);
    assert_eq!(summary.outcomes[0].report_id, "rpt-monday");
    assert_eq!(
        mailer.sent().await[0].subject,
        "Campaign Performance for Acme (Oct 12 – Oct 19, 2026)"
    );
}

#[tokio::test]
async fn test_state_write_failure_after_delivery() {
    let store = acme_store().await;
    store.insert_definition(definition("rpt-team", "team")).await;

    let mailer = ScriptedMailer::delivering();
    let runner = ReportRunner::new(
        BrokenDefinitions::writes(store.clone()),
        store.clone(),
        mailer.clone(),
    );

    let outcome = runner.run_on_demand("rpt-team", monday()).await.unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.failure, Some(FailureReason::StateUpdateFailed));
    assert_eq!(mailer.sent().await.len(), 1);
    assert_eq!(store.definition("rpt-team").await.unwrap().last_sent_at, None);
}

#[tokio::test]
async fn test_listing_failure_aborts_sweep() {
    let store = acme_store().await;
    store.insert_definition(definition("rpt-calls", "calls")).await;

    let mailer = ScriptedMailer::delivering();
    let runner = ReportRunner::new(BrokenDefinitions::listing(store.clone()), store, mailer.clone());

    let err = runner.run_sweep(monday()).await.unwrap_err();

    assert!(matches!(err, AppError::Database(_)));
    assert!(mailer.sent().await.is_empty());
}

#[tokio::test]
async fn test_blank_recipients_are_not_dispatched() {
    let store = acme_store().await;
    store
        .insert_definition(ReportDefinitionRecord {
            recipients: vec!["  ".to_string(), String::new()],
            ..definition("rpt-blank", "calls")
        })
        .await;

    let mailer = ScriptedMailer::delivering();
    let runner = runner(store.clone(), mailer.clone());

    let summary = runner.run_sweep(monday()).await.unwrap();

    assert_eq!(summary.outcomes[0].failure, Some(FailureReason::NoRecipients));
    assert!(mailer.sent().await.is_empty());
}
