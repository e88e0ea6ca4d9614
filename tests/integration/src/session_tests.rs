//! Multi-pass sessions across the crates
//!
//! Each test loads settings the way the binary does, then runs a series of
//! passes with the source changing in between, checking that the replica
//! converges after every pass.

use mirror_core::{EventKind, EventLog, MirrorSettings, PartialSettings, run_once};
use mirror_fs::{ConfigStore, DirectorySnapshot};
use mirror_test_utils::{TestTree, assert_mirrors};
use pretty_assertions::assert_eq;

/// Write a settings file next to two fresh trees and load it back.
fn session(config_name: &str, config_body: &str) -> (TestTree, MirrorSettings) {
    let workspace = TestTree::new()
        .with_dir("data/source")
        .with_dir("data/replica")
        .with_file(config_name, config_body);
    let settings = PartialSettings::load(&workspace.root().join(config_name))
        .unwrap()
        .resolve()
        .unwrap();
    (workspace, settings)
}

fn pass(settings: &MirrorSettings) -> EventLog {
    let mut log = EventLog::new();
    let result = run_once(&settings.source, &settings.replica, &mut log);
    assert!(result.success(), "pass failed: {:?}", result.failure);
    assert_eq!(result.counts.total_changes(), log.len());
    log
}

fn kinds(log: &EventLog) -> Vec<EventKind> {
    log.events().iter().map(|e| e.kind()).collect()
}

#[test]
fn toml_session_tracks_source_edits() {
    let (workspace, settings) = session(
        "mirror.toml",
        "source = \"data/source\"\nreplica = \"data/replica\"\ninterval = \"00:00:05\"\n",
    );
    assert_eq!(settings.source, workspace.root().join("data/source"));
    assert_eq!(settings.interval, Some(std::time::Duration::from_secs(5)));

    // Pass 1: initial population.
    workspace.write("data/source/readme.md", "hello");
    workspace.write("data/source/src/main.rs", "fn main() {}");
    let log = pass(&settings);
    assert_eq!(
        kinds(&log),
        vec![
            EventKind::Copied,
            EventKind::DirectoryCreated,
            EventKind::Copied
        ]
    );
    assert_mirrors(&settings.source, &settings.replica);

    // Pass 2: edit one file, add one, delete one.
    workspace.write("data/source/readme.md", "hello, world");
    workspace.write("data/source/src/lib.rs", "pub fn f() {}");
    workspace.remove("data/source/src/main.rs");
    let log = pass(&settings);
    // Stale content is pruned first and recopied by the synchronize half.
    assert_eq!(
        kinds(&log),
        vec![
            EventKind::Removed,
            EventKind::Removed,
            EventKind::Copied,
            EventKind::Copied
        ]
    );
    assert_mirrors(&settings.source, &settings.replica);

    // Pass 3: nothing changed.
    assert!(pass(&settings).is_empty());
}

#[test]
fn yaml_session_with_kind_swaps() {
    let (workspace, settings) = session(
        "mirror.yaml",
        "source: data/source\nreplica: data/replica\ninterval: 60\n",
    );

    workspace.write("data/source/thing", "file first");
    workspace.mkdir("data/source/other/deep");
    pass(&settings);
    assert_mirrors(&settings.source, &settings.replica);

    // Swap: `thing` becomes a directory, `other` becomes a file.
    workspace.remove("data/source/thing");
    workspace.write("data/source/thing/inner.txt", "now a dir");
    workspace.remove("data/source/other");
    workspace.write("data/source/other", "now a file");
    pass(&settings);
    assert_mirrors(&settings.source, &settings.replica);

    let replica = DirectorySnapshot::read(&settings.replica).unwrap();
    let names: Vec<_> = replica
        .entries()
        .iter()
        .map(|e| (e.name().to_string_lossy().into_owned(), e.is_dir()))
        .collect();
    assert_eq!(
        names,
        vec![("other".to_string(), false), ("thing".to_string(), true)]
    );
}

#[test]
fn command_line_layer_wins_over_file() {
    let (workspace, from_file) = session(
        "mirror.json",
        r#"{ "source": "data/source", "replica": "data/replica", "interval": "10" }"#,
    );
    let elsewhere = TestTree::new().with_file("only-here.txt", "x");

    let settings = PartialSettings {
        source: Some(elsewhere.root().to_path_buf()),
        ..PartialSettings::default()
    }
    .or(PartialSettings::load(&workspace.root().join("mirror.json")).unwrap())
    .resolve()
    .unwrap();

    assert_eq!(settings.source, elsewhere.root());
    assert_eq!(settings.replica, from_file.replica);

    pass(&settings);
    workspace.assert_file_contains("data/replica/only-here.txt", "x");
}

#[test]
fn unknown_settings_keys_are_rejected() {
    let workspace = TestTree::new().with_file("mirror.toml", "source = \"a\"\ncolour = \"blue\"\n");
    let err = PartialSettings::load(&workspace.root().join("mirror.toml")).unwrap_err();
    assert!(err.to_string().contains("colour"), "unexpected error: {err}");
}

#[test]
fn config_store_reads_plain_structs() {
    #[derive(serde::Deserialize)]
    struct Probe {
        name: String,
    }

    let workspace = TestTree::new().with_file("probe.yml", "name: mirror\n");
    let probe: Probe = ConfigStore::new()
        .load(&workspace.root().join("probe.yml"))
        .unwrap();
    assert_eq!(probe.name, "mirror");
}
