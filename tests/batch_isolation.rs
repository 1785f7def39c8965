//! Batch validation against a mock host: failures stay with their target.

mod helpers;

use std::path::Path;

use helpers::{mount_gone_repo, mount_healthy_repo, test_config, test_engine, UNREACHABLE_URL};
use repo_validator::{validate_batch, BatchOptions, ValidationTarget, Verdict};
use tokio_util::sync::CancellationToken;
use wiremock::MockServer;

async fn five_targets(server: &MockServer) -> Vec<ValidationTarget> {
    for route in ["/a/one", "/a/two", "/a/four", "/a/five"] {
        mount_healthy_repo(server, route).await;
    }
    vec![
        ValidationTarget::new(1, format!("{}/a/one", server.uri())),
        ValidationTarget::new(2, format!("{}/a/two", server.uri())),
        ValidationTarget::new(3, UNREACHABLE_URL),
        ValidationTarget::new(4, format!("{}/a/four", server.uri())),
        ValidationTarget::new(5, format!("{}/a/five", server.uri())),
    ]
}

#[tokio::test]
async fn test_unreachable_target_does_not_affect_neighbours() {
    let server = MockServer::start().await;
    let targets = five_targets(&server).await;
    let engine = test_engine(&test_config(Path::new("unused.db")));

    let report = validate_batch(
        &engine,
        targets,
        &BatchOptions::default(),
        &CancellationToken::new(),
    )
    .await;

    assert_eq!(report.outcomes.len(), 5);
    assert!(report.skipped.is_empty());
    let ids: Vec<i64> = report.outcomes.iter().map(|o| o.target.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);

    for outcome in &report.outcomes {
        if outcome.target.id == 3 {
            assert_eq!(outcome.verdict, Verdict::Invalid);
            assert!(outcome.result.error.is_some());
            assert!(!outcome.audit.result);
            assert_eq!(outcome.audit.status_code, None);
        } else {
            assert_eq!(outcome.verdict, Verdict::Valid, "target {}", outcome.target.id);
            assert_eq!(outcome.validation_level, 3);
            assert!(outcome.audit.result);
            assert_eq!(outcome.audit.status_code, Some(200));
        }
    }
    assert_eq!(report.valid_count(), 4);
    assert_eq!(report.invalid_count(), 1);
    assert_eq!(report.errored_count(), 1);
}

#[tokio::test]
async fn test_concurrent_batch_keeps_input_order() {
    let server = MockServer::start().await;
    let mut targets = five_targets(&server).await;
    mount_gone_repo(&server, "/a/gone").await;
    targets.push(ValidationTarget::new(6, format!("{}/a/gone", server.uri())));
    let engine = test_engine(&test_config(Path::new("unused.db")));

    let options = BatchOptions {
        max_concurrency: 4,
        ..Default::default()
    };
    let report = validate_batch(&engine, targets, &options, &CancellationToken::new()).await;

    let ids: Vec<i64> = report.outcomes.iter().map(|o| o.target.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    let gone = &report.outcomes[5];
    assert_eq!(gone.verdict, Verdict::Invalid);
    assert_eq!(gone.validation_level, 1);
    assert!(gone.result.error.is_none());
    assert_eq!(report.valid_count(), 4);
    assert_eq!(report.invalid_count(), 2);
}
