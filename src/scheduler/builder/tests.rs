// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use tokio_util::sync::CancellationToken;

use super::run;
use crate::logging::tree::LogTree;
use crate::model::project::default_phases;
use crate::model::{BuildPlan, Project, SourceSpec};
use crate::options::{OptionTable, Scope};
use crate::report::ProjectOutcome;
use crate::scheduler::bus::{channel, BusMessage, Payload};

fn project(name: &str, dependencies: Vec<String>) -> Project {
    Project {
        name: name.to_string(),
        source: SourceSpec::Url(format!("https://example.org/{name}.git")),
        group: None,
        forced_build_system: None,
        phases: default_phases(),
        source_dir: std::path::PathBuf::new(),
        build_dir: std::path::PathBuf::new(),
        install_dir: std::path::PathBuf::new(),
        log_dir: std::path::PathBuf::new(),
        dependencies,
    }
}

fn no_build_options(names: &[&str]) -> OptionTable {
    let mut options = OptionTable::new();
    for name in names {
        options.set(&Scope::Project((*name).to_string()), "no-build", "true").unwrap();
    }
    options
}

#[tokio::test]
async fn processes_out_of_order_arrivals_in_plan_order() {
    let plan = BuildPlan::new(vec![project("a", vec![]), project("b", vec![])]);
    let options = no_build_options(&["a", "b"]);
    let log_root = tempfile::tempdir().unwrap();
    let log_tree = LogTree::create(log_root.path()).unwrap();
    let (tx, rx) = channel();

    tx.send_async(BusMessage { project: "b".into(), payload: Payload::UpdateOk { revision: "2".into(), files_changed: 0 } })
        .await
        .unwrap();
    tx.send_async(BusMessage { project: "a".into(), payload: Payload::UpdateOk { revision: "1".into(), files_changed: 0 } })
        .await
        .unwrap();
    drop(tx);

    let report = run(&plan, &options, &log_tree, CancellationToken::new(), false, false, false, false, rx).await.unwrap();
    let names: Vec<&str> = report.entries.iter().map(|e| e.project.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[tokio::test]
async fn a_failed_update_skips_its_dependents() {
    let plan = BuildPlan::new(vec![project("a", vec![]), project("b", vec!["a".to_string()])]);
    let options = no_build_options(&["a", "b"]);
    let log_root = tempfile::tempdir().unwrap();
    let log_tree = LogTree::create(log_root.path()).unwrap();
    let (tx, rx) = channel();

    tx.send_async(BusMessage {
        project: "a".into(),
        payload: Payload::UpdateFailed {
            error_kind: crate::git::updater::UpdateErrorKind::NetworkError,
            error_text: "host unreachable".into(),
        },
    })
    .await
    .unwrap();
    tx.send_async(BusMessage { project: "b".into(), payload: Payload::UpdateOk { revision: "1".into(), files_changed: 0 } })
        .await
        .unwrap();
    drop(tx);

    let report = run(&plan, &options, &log_tree, CancellationToken::new(), false, false, false, false, rx).await.unwrap();
    assert!(matches!(report.entries[0].outcome, ProjectOutcome::Failed { .. }));
    assert!(matches!(report.entries[1].outcome, ProjectOutcome::SkippedDependency));
}

#[tokio::test]
async fn no_build_option_skips_the_build_phase() {
    let plan = BuildPlan::new(vec![project("a", vec![])]);
    let options = no_build_options(&["a"]);
    let log_root = tempfile::tempdir().unwrap();
    let log_tree = LogTree::create(log_root.path()).unwrap();
    let (tx, rx) = channel();

    tx.send_async(BusMessage { project: "a".into(), payload: Payload::UpdateOk { revision: "1".into(), files_changed: 0 } })
        .await
        .unwrap();
    drop(tx);

    let report = run(&plan, &options, &log_tree, CancellationToken::new(), false, false, false, false, rx).await.unwrap();
    assert!(matches!(report.entries[0].outcome, ProjectOutcome::SkippedByOption { .. }));
}
