use anyhow::Result;
use dockerrmi::cli::run_with_engine;
use dockerrmi::domain::{ContainerScope, RmiError};
use dockerrmi::services::{ArgumentOutcome, ImageRemover, TeardownPolicy};
use dockerrmi::test_support::MockEngine;
use std::sync::Arc;

#[test]
fn test_unreachable_engine_yields_empty_inventory() {
    let mock = Arc::new(MockEngine::new());
    mock.set_fail_on("list_images");
    mock.set_fail_on("list_containers");

    let remover = ImageRemover::load(mock.clone(), TeardownPolicy::default());
    assert!(remover.inventory().images().is_empty());

    let report = remover.run(&["app:1"]);
    assert!(matches!(
        report.outcomes[0].1,
        ArgumentOutcome::Failed(RmiError::NotFound { .. })
    ));
}

#[test]
fn test_records_printed_before_listing_failure_are_removable() {
    let mock = Arc::new(
        MockEngine::new()
            .with_images("aaa:app:1\n")
            .with_containers(ContainerScope::All, "c1|app:1\n"),
    );
    mock.set_fail_on("list_images");
    mock.set_fail_on("list_containers:all");

    let remover = ImageRemover::load(mock.clone(), TeardownPolicy::default());
    let report = remover.run(&["app:1"]);

    assert!(report.all_removed());
    assert!(mock.get_commands().contains(&"remove_container:c1".to_string()));
    assert!(mock.get_commands().contains(&"remove_image:aaa".to_string()));
}

#[test]
fn test_failed_image_removal_moves_on_to_next_argument() -> Result<()> {
    let mock = Arc::new(
        MockEngine::new()
            .with_images("aaa:app:1\nbbb:db:2\n")
            .with_containers(ContainerScope::All, "c1|app:1\n"),
    );
    mock.set_fail_on("remove_image:aaa");

    let report = run_with_engine(
        &["app:1".to_string(), "db:2".to_string()],
        mock.clone(),
        TeardownPolicy::default(),
    )?;

    assert!(matches!(
        report.outcomes[0].1,
        ArgumentOutcome::Failed(RmiError::Engine(_))
    ));
    assert!(report.outcomes[1].1.is_removed());
    assert_eq!(
        mock.get_commands()[3..],
        ["remove_container:c1", "remove_image:aaa", "remove_image:bbb"]
    );
    Ok(())
}

#[test]
fn test_every_stop_failure_is_tolerated() -> Result<()> {
    let mock = Arc::new(
        MockEngine::new()
            .with_images("aaa:app:1\n")
            .with_containers(ContainerScope::All, "r1|app:1\nr2|app:1\n")
            .with_containers(ContainerScope::Running, "r1|app:1\nr2|app:1\n"),
    );
    mock.set_fail_on("stop");

    let report = run_with_engine(&["aaa".to_string()], mock.clone(), TeardownPolicy::default())?;

    match &report.outcomes[0].1 {
        ArgumentOutcome::Removed(teardown) => {
            assert_eq!(teardown.stop_failed, vec!["r1", "r2"]);
            assert_eq!(teardown.removed, vec!["r1", "r2"]);
        }
        other => panic!("expected removal, got {other:?}"),
    }
    Ok(())
}
