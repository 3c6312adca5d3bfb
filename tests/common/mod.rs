#![allow(dead_code)]

pub mod command;
pub mod file;

use std::path::Path;

/// Read the HEAD file of a repository
pub fn read_head(repo_dir: &Path) -> String {
    std::fs::read_to_string(repo_dir.join(".gggit").join("HEAD")).expect("Failed to read HEAD")
}

/// Read a branch ref file, keeping the trailing line feed
pub fn read_branch_ref(repo_dir: &Path, name: &str) -> String {
    std::fs::read_to_string(
        repo_dir
            .join(".gggit")
            .join("refs")
            .join("heads")
            .join(name),
    )
    .unwrap_or_else(|e| panic!("Failed to read ref {name}: {e}"))
}

/// Read a branch ref file and trim the trailing line feed, yielding the hash
pub fn read_branch_hash(repo_dir: &Path, name: &str) -> String {
    read_branch_ref(repo_dir, name)
        .trim_end_matches('\n')
        .to_string()
}
