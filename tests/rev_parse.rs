use crate::common::command::{
    committed_repository_dir, init_repository_dir, run_sprig_command, sprig_stdout,
    write_object, Snapshot,
};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn head_and_its_alias_resolve_through_master(committed_repository_dir: (TempDir, Snapshot)) {
    let (dir, snapshot) = committed_repository_dir;

    for name in ["HEAD", "@", "master", "heads/master", "refs/heads/master"] {
        assert_eq!(
            sprig_stdout(dir.path(), &["rev-parse", name]),
            snapshot.commit,
            "resolving {name}"
        );
    }
}

#[rstest]
fn master_ignores_tags_named_like_hashes(committed_repository_dir: (TempDir, Snapshot)) {
    let (dir, snapshot) = committed_repository_dir;
    run_sprig_command(dir.path(), &["tag", "deadbe", &snapshot.alpha])
        .assert()
        .success();

    assert_eq!(
        sprig_stdout(dir.path(), &["rev-parse", "master"]),
        snapshot.commit
    );
    assert_eq!(
        sprig_stdout(dir.path(), &["rev-parse", "deadbe"]),
        snapshot.alpha
    );
}

#[rstest]
fn hash_prefixes_resolve_case_insensitively(committed_repository_dir: (TempDir, Snapshot)) {
    let (dir, snapshot) = committed_repository_dir;
    let prefix = snapshot.tree[..8].to_ascii_uppercase();

    assert_eq!(
        sprig_stdout(dir.path(), &["rev-parse", &prefix]),
        snapshot.tree
    );
    assert_eq!(
        sprig_stdout(dir.path(), &["rev-parse", &snapshot.tree.to_ascii_uppercase()]),
        snapshot.tree
    );
}

#[rstest]
fn shared_hash_prefix_is_ambiguous(init_repository_dir: TempDir) {
    let (first, second) = common::colliding_blobs();
    let first = write_object(init_repository_dir.path(), "blob", first.as_bytes());
    let second = write_object(init_repository_dir.path(), "blob", second.as_bytes());

    run_sprig_command(init_repository_dir.path(), &["rev-parse", &first[..4]])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ambiguous reference"))
        .stderr(predicate::str::contains(first.clone()))
        .stderr(predicate::str::contains(second.clone()));

    assert_eq!(
        sprig_stdout(init_repository_dir.path(), &["rev-parse", &first[..12]]),
        first
    );
}

#[rstest]
fn short_or_unknown_names_are_not_found(committed_repository_dir: (TempDir, Snapshot)) {
    let (dir, snapshot) = committed_repository_dir;

    for name in ["nope", &snapshot.commit[..3], "ffff"] {
        run_sprig_command(dir.path(), &["rev-parse", name])
            .assert()
            .failure()
            .stderr(predicate::str::contains("no such reference"));
    }
}

#[rstest]
fn commits_dereference_to_their_tree(committed_repository_dir: (TempDir, Snapshot)) {
    let (dir, snapshot) = committed_repository_dir;

    assert_eq!(
        sprig_stdout(dir.path(), &["rev-parse", "-t", "tree", "HEAD"]),
        snapshot.tree
    );
    assert_eq!(
        sprig_stdout(dir.path(), &["rev-parse", "-t", "commit", "HEAD"]),
        snapshot.commit
    );
}

#[rstest]
fn annotated_tags_dereference_to_their_target(committed_repository_dir: (TempDir, Snapshot)) {
    let (dir, snapshot) = committed_repository_dir;
    run_sprig_command(dir.path(), &["tag", "-a", "-m", "release", "v1.0"])
        .assert()
        .success();

    let tag = sprig_stdout(dir.path(), &["rev-parse", "v1.0"]);
    assert_ne!(tag, snapshot.commit);
    assert_eq!(
        sprig_stdout(dir.path(), &["rev-parse", "-t", "tag", "v1.0"]),
        tag
    );
    assert_eq!(
        sprig_stdout(dir.path(), &["rev-parse", "-t", "commit", "v1.0"]),
        snapshot.commit
    );
    assert_eq!(
        sprig_stdout(dir.path(), &["rev-parse", "-t", "tree", "tags/v1.0"]),
        snapshot.tree
    );
}

#[rstest]
fn blobs_cannot_become_trees(committed_repository_dir: (TempDir, Snapshot)) {
    let (dir, snapshot) = committed_repository_dir;

    run_sprig_command(dir.path(), &["rev-parse", "-t", "tree", &snapshot.alpha])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot resolve"));

    run_sprig_command(dir.path(), &["rev-parse", "-t", "commit", &snapshot.tree])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot resolve"));
}

#[rstest]
fn head_on_an_unborn_branch_is_not_found(init_repository_dir: TempDir) {
    init_repository_dir
        .child(".git/refs/heads")
        .assert(predicates::path::is_dir());

    run_sprig_command(init_repository_dir.path(), &["rev-parse", "HEAD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no such reference refs/heads/master"));
}

#[rstest]
fn symbolic_ref_cycles_are_reported(init_repository_dir: TempDir) {
    init_repository_dir
        .child(".git/refs/heads/master")
        .write_str("ref: HEAD\n")
        .unwrap();

    run_sprig_command(init_repository_dir.path(), &["rev-parse", "HEAD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("symbolic reference cycle"));
}
