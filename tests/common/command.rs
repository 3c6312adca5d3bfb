use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// A `gggit` invocation running in `dir`.
pub fn gggit(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gggit").expect("gggit binary should be built");
    cmd.current_dir(dir).args(args);
    cmd
}

/// A `gggit commit` with a generated author exported through the
/// environment, exercising the env-backed provider end to end.
pub fn gggit_commit(dir: &Path, message: &str) -> Command {
    use fake::Fake;
    use fake::faker::internet::en::FreeEmail;
    use fake::faker::name::en::Name;

    let author_name = Name().fake::<String>().replace(' ', "_");
    let author_email = FreeEmail().fake::<String>();

    let mut cmd = gggit(dir, &["commit", "-m", message]);
    cmd.env("GGGIT_AUTHOR_NAME", author_name)
        .env("GGGIT_AUTHOR_EMAIL", author_email);
    cmd
}

/// Seed files at three nesting levels, enough to force sub-trees in the
/// snapshot. There is no staging area: the next commit picks up all of them.
pub fn seed_worktree(root: &Path) {
    for (rel, content) in [("1.txt", "one"), ("a/2.txt", "two"), ("a/b/3.txt", "three")] {
        write_file(FileSpec::new(root.join(rel), content.to_string()));
    }
}

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("temp dir for the repository")
}

/// An initialized repository whose seeded worktree has been committed once
/// on `master`.
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    gggit(repository_dir.path(), &["init"]).assert().success();
    seed_worktree(repository_dir.path());
    gggit_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}
