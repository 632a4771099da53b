use crate::common::command::{
    committed_repository_dir, init_repository_dir, run_sprig_command, sprig_stdout,
    write_object, Snapshot,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn root_commit_renders_an_empty_graph(committed_repository_dir: (TempDir, Snapshot)) {
    let (dir, _) = committed_repository_dir;

    assert_eq!(sprig_stdout(dir.path(), &["log"]), "digraph sprig{\n}");
}

#[rstest]
fn merge_history_renders_each_edge_once(committed_repository_dir: (TempDir, Snapshot)) {
    let (dir, snapshot) = committed_repository_dir;
    let root = snapshot.commit.clone();
    let commit = |parents: &[&str], message: &str| {
        write_object(
            dir.path(),
            "commit",
            &common::commit_payload(&snapshot.tree, parents, message),
        )
    };
    let left = commit(&[&root], "left");
    let right = commit(&[&root], "right");
    let merge = commit(&[&left, &right], "merge");

    assert_eq!(
        sprig_stdout(dir.path(), &["log", &merge]),
        format!(
            "digraph sprig{{\n\
             c_{merge} -> c_{left};\n\
             c_{left} -> c_{root};\n\
             c_{merge} -> c_{right};\n\
             c_{right} -> c_{root};\n\
             }}"
        )
    );
}

#[rstest]
fn log_starts_from_head_by_default(committed_repository_dir: (TempDir, Snapshot)) {
    let (dir, snapshot) = committed_repository_dir;
    let second = write_object(
        dir.path(),
        "commit",
        &common::commit_payload(&snapshot.tree, &[&snapshot.commit], "second"),
    );
    run_sprig_command(dir.path(), &["update-ref", "HEAD", &second])
        .assert()
        .success();

    assert_eq!(
        sprig_stdout(dir.path(), &["log"]),
        format!("digraph sprig{{\nc_{second} -> c_{};\n}}", snapshot.commit)
    );
}

#[rstest]
fn log_of_a_blob_fails(init_repository_dir: TempDir) {
    let blob = write_object(init_repository_dir.path(), "blob", b"data\n");

    run_sprig_command(init_repository_dir.path(), &["log", &blob])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot resolve"));
}
