/// Tests for the interactive explorer driven by scripted input
mod test_utilities;

use jar_hell::prelude::*;
use std::time::Duration;
use test_utilities::fixtures::*;
use test_utilities::mocks::*;

const ROOT: &str = "com.example:app:1.0";
const CHILD: &str = "com.example:lib:2.0";

fn repository() -> MockPackageRepository {
    let root = with_dependencies(ROOT, vec![resolved(analyzed(CHILD, 1))]);
    let expanded_child = with_dependencies(CHILD, vec![resolved(analyzed("com.example:leaf:3", 0))]);
    MockPackageRepository::new()
        .with_versions("com.example", "app", &["1.0"])
        .with_versions("com.example", "other", &["1"])
        .with_analysis_result(resolved(root))
        .with_analysis_result(resolved(analyzed("com.example:other:1", 0)))
        .with_package(resolved(expanded_child))
}

async fn run_session(repository: MockPackageRepository, store: InMemoryRecentlyViewedStore, script: &str) -> String {
    let reporter = MockProgressReporter::new();
    let session = ExploreSession::new(
        OpenPageUseCase::new(repository.clone(), reporter.clone(), store),
        ExploreTreeUseCase::new(repository, reporter),
        Box::new(TextFormatter::new(false)),
    );
    let mut output = Vec::new();
    let input = tokio::io::BufReader::new(script.as_bytes());
    let start = Route::parse(ROOT).unwrap();

    tokio::time::timeout(Duration::from_secs(5), session.run(&start, input, &mut output))
        .await
        .expect("session should finish")
        .unwrap();
    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn test_opens_start_page_with_first_level_expanded() {
    let output = run_session(repository(), InMemoryRecentlyViewedStore::new(), "quit\n").await;

    assert!(output.contains("Dependency explorer"));
    assert!(output.contains("  0 - com.example:app:1.0"));
    assert!(output.contains("  1   + com.example:lib:2.0 [compile]"));
}

#[tokio::test]
async fn test_toggle_and_wait_reveals_children() {
    let repository = repository();
    let output = run_session(
        repository.clone(),
        InMemoryRecentlyViewedStore::new(),
        "toggle 1\nwait\nquit\n",
    )
    .await;

    assert!(output.contains("com.example:leaf:3"));
    assert_eq!(repository.fetch_count(CHILD), 1);
}

#[tokio::test]
async fn test_pending_fetches_are_drained_at_end_of_input() {
    let repository = repository();
    let output = run_session(repository.clone(), InMemoryRecentlyViewedStore::new(), "expand 1\n").await;

    assert!(output.contains("com.example:leaf:3"));
}

#[tokio::test]
async fn test_navigation_cancels_in_flight_fetches() {
    let repository = repository().with_fetch_delay(Duration::from_secs(30));
    let store = InMemoryRecentlyViewedStore::new();

    let output = run_session(
        repository,
        store.clone(),
        "toggle 1\nopen /packages/com.example:other:1\n",
    )
    .await;

    assert!(!output.contains("com.example:leaf:3"));
    assert_eq!(store.entries()[0].to_string(), "com.example:other:1");
    assert_eq!(store.entries().len(), 2);
}

#[tokio::test]
async fn test_invalid_input_keeps_session_alive() {
    let output = run_session(
        repository(),
        InMemoryRecentlyViewedStore::new(),
        "bogus\nexpand 42\nopen /packages/a:b:c:d:e\nhelp\nquit\n",
    )
    .await;

    assert!(output.contains("Unknown command 'bogus'"));
    assert!(output.contains("No row '42' in the tree."));
    assert!(output.contains("❌ Invalid route: '/packages/a:b:c:d:e'"));
    assert!(output.contains("Commands:"));
}

#[tokio::test]
async fn test_leaf_row_reports_no_dependencies() {
    let output = run_session(
        repository(),
        InMemoryRecentlyViewedStore::new(),
        "toggle 1\nwait\ntoggle 2\nquit\n",
    )
    .await;

    assert!(output.contains("This package has no dependencies."));
}
