use crate::common::{AUTHOR_EMAIL, AUTHOR_NAME, commit_payload, tree_payload};
use assert_cmd::Command;
use assert_fs::TempDir;
use derive_new::new;
use rstest::fixture;
use std::path::Path;

const SCRATCH_FILE: &str = ".sprig-scratch";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_sprig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// Object IDs of the snapshot built by [`committed_repository_dir`]
#[derive(Debug, Clone, new)]
pub struct Snapshot {
    pub alpha: String,
    pub beta: String,
    pub subtree: String,
    pub tree: String,
    pub commit: String,
}

/// A repository whose `master` holds one commit of `a.txt` and `sub/b.txt`
#[fixture]
pub fn committed_repository_dir(init_repository_dir: TempDir) -> (TempDir, Snapshot) {
    let dir = init_repository_dir.path();

    let alpha = write_object(dir, "blob", b"alpha\n");
    let beta = write_object(dir, "blob", b"beta\n");
    let subtree = write_object(dir, "tree", &tree_payload(&[("100644", "b.txt", &beta)]));
    let tree = write_object(
        dir,
        "tree",
        &tree_payload(&[("100644", "a.txt", &alpha), ("40000", "sub", &subtree)]),
    );
    let commit = write_object(dir, "commit", &commit_payload(&tree, &[], "Initial commit"));

    run_sprig_command(dir, &["update-ref", "HEAD", &commit])
        .assert()
        .success();

    (
        init_repository_dir,
        Snapshot::new(alpha, beta, subtree, tree, commit),
    )
}

pub fn run_sprig_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("sprig").expect("Failed to find sprig binary");
    cmd.envs(vec![
        ("GIT_AUTHOR_NAME", AUTHOR_NAME),
        ("GIT_AUTHOR_EMAIL", AUTHOR_EMAIL),
    ]);
    cmd.env_remove("SPRIG_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Run a command that must succeed and return its trimmed stdout
pub fn sprig_stdout(dir: &Path, args: &[&str]) -> String {
    let output = run_sprig_command(dir, args).assert().success();
    String::from_utf8(output.get_output().stdout.clone())
        .expect("stdout is not UTF-8")
        .trim_end()
        .to_string()
}

/// Store `content` as an object of `object_type` through `hash-object -w`
pub fn write_object(dir: &Path, object_type: &str, content: &[u8]) -> String {
    let scratch = dir.join(SCRATCH_FILE);
    std::fs::write(&scratch, content).expect("Failed to write scratch file");

    let oid = sprig_stdout(dir, &["hash-object", "-w", "-t", object_type, SCRATCH_FILE]);

    std::fs::remove_file(&scratch).expect("Failed to remove scratch file");
    oid
}
