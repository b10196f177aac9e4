//! End-to-end runs against an in-memory playlist service
//!
//! Covers the confirmation gate: no prompt for an empty removal set, no
//! mutation unless the answer is "y", exactly one mutation otherwise.

mod helpers;

use helpers::{days_ago, entry, reference, FakeService, RemovalFailure};
use splanto::deletion::{execute, ExecutionResult, PresetAnswer};
use splanto::pipeline::run;
use splanto::{Error, PlaylistId};

fn mixed_entries() -> Vec<splanto::TrackEntry> {
    vec![
        entry("old-a", &days_ago(10)),
        entry("new-b", &days_ago(3)),
        entry("edge-c", &days_ago(7)),
        entry("old-d", &days_ago(21)),
    ]
}

#[tokio::test]
async fn test_confirmed_run_removes_stale_once() {
    let service = FakeService::with_entries(mixed_entries());
    let mut confirmation = PresetAnswer::new("Y");
    let mut out = Vec::new();

    let outcome = run(&service, "Plan to hear", reference(), &mut confirmation, &mut out)
        .await
        .unwrap();

    assert_eq!(outcome.playlist, PlaylistId::new("pl-plan"));
    assert_eq!(outcome.execution, ExecutionResult::Removed { count: 2 });
    assert_eq!(confirmation.times_asked(), 1);

    let removals = service.removals();
    assert_eq!(removals.len(), 1);
    assert_eq!(removals[0].0, PlaylistId::new("pl-plan"));
    assert_eq!(removals[0].1, vec!["spotify:track:old-a", "spotify:track:old-d"]);

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("Found 2 songs older than a week"));
    assert!(printed.contains("2 songs are still fresh"));
    assert!(printed.contains("- new-b\n- edge-c\n"));
    assert!(printed.ends_with("Playlist has been cleared of old songs.\n"));
}

#[tokio::test]
async fn test_declined_run_never_mutates() {
    for answer in ["n", "N", "", "yes", "no", " ", "q"] {
        let service = FakeService::with_entries(mixed_entries());
        let mut confirmation = PresetAnswer::new(answer);
        let mut out = Vec::new();

        let outcome = run(&service, "Plan to hear", reference(), &mut confirmation, &mut out)
            .await
            .unwrap();

        assert_eq!(outcome.execution, ExecutionResult::Aborted, "answer {:?}", answer);
        assert!(service.removals().is_empty(), "answer {:?}", answer);
        assert!(String::from_utf8(out).unwrap().ends_with("Aborted!\n"));
    }
}

#[tokio::test]
async fn test_nothing_stale_skips_prompt() {
    let service = FakeService::with_entries(vec![
        entry("fresh-1", &days_ago(1)),
        entry("fresh-2", &days_ago(6)),
    ]);
    let mut confirmation = PresetAnswer::yes();
    let mut out = Vec::new();

    let outcome = run(&service, "Plan to hear", reference(), &mut confirmation, &mut out)
        .await
        .unwrap();

    assert_eq!(outcome.execution, ExecutionResult::NothingToRemove);
    assert_eq!(confirmation.times_asked(), 0);
    assert!(service.removals().is_empty());

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("Found 0 songs older than a week"));
    assert!(printed.ends_with("Nothing to remove.\n"));
}

#[tokio::test]
async fn test_empty_playlist() {
    let service = FakeService::with_entries(Vec::new());
    let mut confirmation = PresetAnswer::yes();
    let mut out = Vec::new();

    let outcome = run(&service, "Plan to hear", reference(), &mut confirmation, &mut out)
        .await
        .unwrap();

    assert_eq!(outcome.report.stale_count, 0);
    assert_eq!(outcome.report.fresh_count, 0);
    assert_eq!(outcome.execution, ExecutionResult::NothingToRemove);
    assert!(!String::from_utf8(out).unwrap().contains("left to listen to"));
}

#[tokio::test]
async fn test_malformed_entry_stops_before_prompt() {
    let mut entries = mixed_entries();
    entries.push(entry("broken", "2021-04-xx"));
    let service = FakeService::with_entries(entries);
    let mut confirmation = PresetAnswer::yes();
    let mut out = Vec::new();

    let err = run(&service, "Plan to hear", reference(), &mut confirmation, &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MalformedEntry { .. }));
    assert_eq!(confirmation.times_asked(), 0);
    assert!(service.removals().is_empty());
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_unknown_marker_is_not_found() {
    let service = FakeService::with_entries(mixed_entries());
    let mut confirmation = PresetAnswer::yes();
    let mut out = Vec::new();

    let err = run(&service, "plan to hear", reference(), &mut confirmation, &mut out)
        .await
        .unwrap_err();

    match err {
        Error::NotFound(marker) => assert_eq!(marker, "plan to hear"),
        other => panic!("expected NotFound, got {:?}", other),
    }
    assert_eq!(service.list_calls(), 0);
}

#[tokio::test]
async fn test_removal_failure_is_reported() {
    let mut service = FakeService::with_entries(mixed_entries());
    service.removal_failure = RemovalFailure::Transient;
    let mut confirmation = PresetAnswer::yes();
    let mut out = Vec::new();

    let err = run(&service, "Plan to hear", reference(), &mut confirmation, &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::TransientServiceError(_)));
    assert_eq!(service.removals().len(), 1);
    assert!(!String::from_utf8(out).unwrap().contains("cleared"));
}

#[tokio::test]
async fn test_execute_rejected_token_is_auth_failure() {
    let mut service = FakeService::with_entries(Vec::new());
    service.removal_failure = RemovalFailure::Auth;
    let mut confirmation = PresetAnswer::yes();
    let uris = vec!["spotify:track:x".to_string()];

    let err = execute(&service, &PlaylistId::new("pl"), &uris, &mut confirmation)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::AuthFailure(_)));
}

#[tokio::test]
async fn test_execute_passes_duplicates_through() {
    let service = FakeService::with_entries(Vec::new());
    let mut confirmation = PresetAnswer::yes();
    let uris = vec![
        "spotify:track:x".to_string(),
        "spotify:track:x".to_string(),
    ];

    let result = execute(&service, &PlaylistId::new("pl"), &uris, &mut confirmation)
        .await
        .unwrap();

    assert_eq!(result, ExecutionResult::Removed { count: 2 });
    assert_eq!(service.removals()[0].1, uris);
}
