use anyhow::Result;
use dockerrmi::cli::run_with_engine;
use dockerrmi::domain::{ContainerScope, RmiError};
use dockerrmi::services::{ArgumentOutcome, TeardownPolicy};
use dockerrmi::test_support::MockEngine;
use std::sync::Arc;

fn engine() -> Arc<MockEngine> {
    Arc::new(
        MockEngine::new()
            .with_images("aaa111:api:2.0\nbbb222:worker:latest\nccc333:cache:7\n")
            .with_containers(
                ContainerScope::All,
                "c-api|api:2.0\nc-old-api api:2.0\nc-worker|bbb2\nc-cache|cache:7\n",
            )
            .with_containers(ContainerScope::Running, "c-api|api:2.0\nc-worker|worker\n"),
    )
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_workflow_auto_stop_removes_everything() -> Result<()> {
    let mock = engine();

    let report = run_with_engine(
        &args(&["api:2.0", "worker"]),
        mock.clone(),
        TeardownPolicy { stop_running: true },
    )?;

    assert!(report.all_removed());
    assert_eq!(
        mock.get_commands(),
        vec![
            "list_images",
            "list_containers:all",
            "list_containers:running",
            "stop:c-api",
            "remove_container:c-api",
            "remove_container:c-old-api",
            "remove_image:aaa111",
            "stop:c-worker",
            "remove_container:c-worker",
            "remove_image:bbb222",
        ]
    );

    Ok(())
}

#[test]
fn test_workflow_manual_policy_skips_blocked_images() -> Result<()> {
    let mock = engine();

    let report = run_with_engine(
        &args(&["api:2.0", "cache:7"]),
        mock.clone(),
        TeardownPolicy {
            stop_running: false,
        },
    )?;

    assert_eq!(report.failures(), 1);
    assert!(matches!(
        report.outcomes[0].1,
        ArgumentOutcome::Failed(RmiError::BlockedByRunningContainers { .. })
    ));

    let commands = mock.get_commands();
    assert!(!commands.contains(&"remove_image:aaa111".to_string()));
    assert!(commands.contains(&"remove_container:c-cache".to_string()));
    assert!(commands.contains(&"remove_image:ccc333".to_string()));
    assert!(!commands.iter().any(|c| c.starts_with("stop:")));

    Ok(())
}

#[test]
fn test_workflow_second_argument_fails_third_still_processed() -> Result<()> {
    let mock = engine();

    let report = run_with_engine(
        &args(&["cache:7", ":broken", "worker"]),
        mock.clone(),
        TeardownPolicy::default(),
    )?;

    let removed: Vec<bool> = report.outcomes.iter().map(|(_, o)| o.is_removed()).collect();
    assert_eq!(removed, vec![true, false, true]);
    assert!(mock.get_commands().contains(&"remove_image:bbb222".to_string()));

    Ok(())
}

#[test]
fn test_workflow_rejects_empty_argument_list() {
    let mock = engine();

    assert!(run_with_engine(&[], mock.clone(), TeardownPolicy::default()).is_err());
    assert!(mock.get_commands().is_empty());
}
