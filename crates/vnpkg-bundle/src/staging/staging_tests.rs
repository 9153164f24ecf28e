#![allow(non_snake_case)]

use super::*;
use tempfile::TempDir;

/// Project directory plus a staging tree inside its `dist/`.
fn setup() -> (TempDir, StagingTree) {
    let project = TempDir::new().unwrap();
    let staging = StagingTree::create(project.path().join("dist").join(".temp-package")).unwrap();
    (project, staging)
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn pattern(s: &str) -> IncludePattern {
    IncludePattern::parse(s).unwrap()
}

#[test]
fn StagingTree___create___replaces_stale_directory() {
    let project = TempDir::new().unwrap();
    let root = project.path().join("staging");
    write(&root, "leftover/old.txt", "stale");

    let staging = StagingTree::create(&root).unwrap();

    assert!(staging.path().is_dir());
    assert_eq!(fs::read_dir(staging.path()).unwrap().count(), 0);
}

#[test]
fn StagingTree___remove___deletes_directory() {
    let (_project, staging) = setup();
    staging.write_file("a/b.txt", b"x").unwrap();
    let path = staging.path().to_path_buf();

    staging.remove().unwrap();

    assert!(!path.exists());
}

#[test]
fn StagingTree___write_file___overwrites_existing_file() {
    let (_project, staging) = setup();
    staging.write_file("manifest.json", b"old").unwrap();

    staging.write_file("manifest.json", b"new").unwrap();

    assert_eq!(
        fs::read_to_string(staging.path().join("manifest.json")).unwrap(),
        "new"
    );
}

#[test]
fn StagingTree___stage___copies_literal_file() {
    let (project, staging) = setup();
    write(project.path(), "README.md", "# Demo");

    let report = staging.stage(project.path(), &pattern("README.md"));

    assert_eq!(
        report.outcome,
        StageOutcome::Files(vec![PathBuf::from("README.md")])
    );
    assert_eq!(
        fs::read_to_string(staging.path().join("README.md")).unwrap(),
        "# Demo"
    );
}

#[test]
fn StagingTree___stage___missing_literal_is_absent() {
    let (project, staging) = setup();

    let report = staging.stage(project.path(), &pattern("LICENSE"));

    assert_eq!(report.outcome, StageOutcome::Absent);
    assert!(!staging.path().join("LICENSE").exists());
}

#[test]
fn StagingTree___stage___literal_directory_copies_recursively() {
    let (project, staging) = setup();
    write(project.path(), "docs/guide.md", "guide");
    write(project.path(), "docs/img/shot.png", "png");

    let report = staging.stage(project.path(), &pattern("docs"));

    let StageOutcome::Directory { dir, files } = report.outcome else {
        panic!("expected a directory outcome");
    };
    assert_eq!(dir, PathBuf::from("docs"));
    assert_eq!(
        files,
        vec![
            PathBuf::from("docs/guide.md"),
            PathBuf::from("docs/img/shot.png")
        ]
    );
    assert!(staging.path().join("docs/img/shot.png").is_file());
}

#[test]
fn StagingTree___stage___wildcard_matches_direct_children_only() {
    let (project, staging) = setup();
    write(project.path(), "dist/index.js", "main");
    write(project.path(), "dist/worker.js", "worker");
    write(project.path(), "dist/index.js.map", "map");
    write(project.path(), "dist/data.json", "{}");
    write(project.path(), "dist/chunks/nested.js", "nested");

    let report = staging.stage(project.path(), &pattern("dist/*.js"));

    assert_eq!(
        report.outcome,
        StageOutcome::Files(vec![
            PathBuf::from("dist/index.js"),
            PathBuf::from("dist/worker.js")
        ])
    );
    assert!(staging.path().join("dist/index.js").is_file());
    assert!(!staging.path().join("dist/chunks").exists());
    assert!(!staging.path().join("dist/data.json").exists());
}

#[test]
fn StagingTree___stage___wildcard_skips_directories_with_matching_names() {
    let (project, staging) = setup();
    fs::create_dir_all(project.path().join("dist/folder.js")).unwrap();

    let report = staging.stage(project.path(), &pattern("dist/*.js"));

    assert_eq!(report.outcome, StageOutcome::Absent);
}

#[test]
fn StagingTree___stage___wildcard_without_matches_is_absent() {
    let (project, staging) = setup();
    write(project.path(), "dist/index.js", "main");

    let report = staging.stage(project.path(), &pattern("dist/*.d.ts"));

    assert_eq!(report.outcome, StageOutcome::Absent);
}

#[test]
fn StagingTree___stage___wildcard_missing_directory_is_absent() {
    let project = TempDir::new().unwrap();
    let staging = StagingTree::create(project.path().join("staging")).unwrap();

    let report = staging.stage(project.path(), &pattern("dist/*.js"));

    assert_eq!(report.outcome, StageOutcome::Absent);
}

#[test]
fn StagingTree___stage___recursive_copies_whole_subtree() {
    let (project, staging) = setup();
    write(project.path(), "assets/logo.png", "logo");
    write(project.path(), "assets/i18n/en/strings.json", "{}");

    let report = staging.stage(project.path(), &pattern("assets/**/*"));

    assert_eq!(
        report.outcome.files(),
        &[
            PathBuf::from("assets/i18n/en/strings.json"),
            PathBuf::from("assets/logo.png")
        ]
    );
    assert!(staging.path().join("assets/i18n/en/strings.json").is_file());
}

#[test]
fn StagingTree___stage___recursive_copies_empty_directories() {
    let (project, staging) = setup();
    fs::create_dir_all(project.path().join("assets/empty")).unwrap();

    let report = staging.stage(project.path(), &pattern("assets/**/*"));

    assert!(report.outcome.files().is_empty());
    assert!(staging.path().join("assets/empty").is_dir());
}

#[test]
fn StagingTree___stage___recursive_missing_directory_is_absent() {
    let (project, staging) = setup();

    let report = staging.stage(project.path(), &pattern("assets/**/*"));

    assert_eq!(report.outcome, StageOutcome::Absent);
}

#[test]
fn StagingTree___stage___does_not_copy_staging_into_itself() {
    let (project, staging) = setup();
    write(project.path(), "dist/index.js", "main");
    staging.write_file("manifest.json", b"{}").unwrap();

    let report = staging.stage(project.path(), &pattern("dist"));

    assert_eq!(report.outcome.files(), &[PathBuf::from("dist/index.js")]);
    assert!(!staging.path().join("dist/.temp-package").exists());
}

#[cfg(unix)]
#[test]
fn StagingTree___stage___unreadable_source_is_skipped_not_fatal() {
    use std::os::unix::fs::PermissionsExt;

    let (project, staging) = setup();
    write(project.path(), "LICENSE", "MIT");
    let license = project.path().join("LICENSE");
    fs::set_permissions(&license, fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores permission bits; nothing to observe in that case.
    if fs::read(&license).is_ok() {
        return;
    }

    let report = staging.stage(project.path(), &pattern("LICENSE"));

    assert!(matches!(report.outcome, StageOutcome::Skipped { .. }));
}
