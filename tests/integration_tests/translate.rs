use std::path::Path;

use permalink::git::{CommitId, GitError, Repository, SearchLimits};
use permalink::permalink::{LineSelection, resolve};
use permalink::translate::{LineRange, translate_range};
use rstest::rstest;

use crate::common::{TestRepo, WEB_BASE, hash_filters, numbered_lines, repo_with_remote};

fn translate(repo: &TestRepo, path: &str, start: usize, end: usize) -> Result<LineRange, GitError> {
    let git = Repository::at(repo.root_path());
    let commit = CommitId::new(repo.git_output(&["rev-parse", "origin/main"]));
    translate_range(&git, &commit, path, LineRange { start, end })
}

/// `line 1..=10` with two lines inserted after line 3.
fn with_insertion() -> String {
    numbered_lines(10).replacen("line 3\n", "line 3\nnew a\nnew b\n", 1)
}

#[rstest]
fn test_unchanged_file(repo_with_remote: TestRepo) {
    assert_eq!(
        translate(&repo_with_remote, "src/lib.rs", 2, 7),
        Ok(LineRange { start: 2, end: 7 })
    );
}

#[rstest]
fn test_uncommitted_insertion_shifts_lines(repo_with_remote: TestRepo) {
    repo_with_remote.write_file("src/lib.rs", &with_insertion());

    assert_eq!(
        translate(&repo_with_remote, "src/lib.rs", 8, 9),
        Ok(LineRange { start: 6, end: 7 })
    );
    // Lines above the insertion are untouched
    assert_eq!(
        translate(&repo_with_remote, "src/lib.rs", 1, 3),
        Ok(LineRange { start: 1, end: 3 })
    );
}

#[rstest]
fn test_inserted_line_maps_to_anchor(repo_with_remote: TestRepo) {
    repo_with_remote.write_file("src/lib.rs", &with_insertion());

    assert_eq!(
        translate(&repo_with_remote, "src/lib.rs", 4, 5),
        Ok(LineRange::single(3))
    );
    // Starting on an inserted line moves the start past the anchor
    assert_eq!(
        translate(&repo_with_remote, "src/lib.rs", 5, 8),
        Ok(LineRange { start: 4, end: 6 })
    );
}

#[rstest]
fn test_committed_deletion(repo_with_remote: TestRepo) {
    let without_2_and_3 = numbered_lines(10)
        .replacen("line 2\n", "", 1)
        .replacen("line 3\n", "", 1);
    repo_with_remote.commit_file("src/lib.rs", &without_2_and_3, "Drop two lines");

    // New line 2 is `line 4`
    assert_eq!(
        translate(&repo_with_remote, "src/lib.rs", 2, 2),
        Ok(LineRange::single(4))
    );
}

#[rstest]
fn test_glob_characters_in_file_name(repo_with_remote: TestRepo) {
    // Committed before `a1.rs` exists so `git add` stages only this file
    repo_with_remote.commit_file("src/a[1].rs", &numbered_lines(10), "Add a[1].rs");
    repo_with_remote.commit_file("src/a1.rs", &numbered_lines(10), "Add a1.rs");
    repo_with_remote.push("main");

    // `a[1].rs` as a glob matches `a1.rs`; its edits must not leak in
    repo_with_remote.write_file("src/a1.rs", &format!("new a\nnew b\n{}", numbered_lines(10)));

    assert_eq!(
        translate(&repo_with_remote, "src/a[1].rs", 5, 6),
        Ok(LineRange { start: 5, end: 6 })
    );
}

#[rstest]
fn test_new_file(repo_with_remote: TestRepo) {
    repo_with_remote.commit_file("src/new.rs", "fn new() {}\n", "Add new.rs");

    assert!(matches!(
        translate(&repo_with_remote, "src/new.rs", 1, 1),
        Err(GitError::NewFile { ref path, .. }) if path == "src/new.rs"
    ));
}

#[rstest]
fn test_resolve_range_link(repo_with_remote: TestRepo) {
    repo_with_remote.write_file("src/lib.rs", &with_insertion());
    let git = Repository::at(repo_with_remote.root_path());

    let link = resolve(
        &git,
        Path::new("src/lib.rs"),
        LineSelection::Lines(LineRange { start: 8, end: 9 }),
        SearchLimits::default(),
    )
    .unwrap();

    assert_eq!(link.path, "src/lib.rs");
    assert_eq!(link.remote, "origin");
    assert_eq!(link.lines, Some(LineRange { start: 6, end: 7 }));
    hash_filters().bind(|| {
        insta::assert_snapshot!(link.url, @"https://github.com/acme/widgets/blob/[HASH]/src/lib.rs#L6-L7");
    });
}

#[rstest]
fn test_resolve_from_subdirectory(repo_with_remote: TestRepo) {
    let git = Repository::at(repo_with_remote.root_path().join("src"));

    let link = resolve(
        &git,
        Path::new("lib.rs"),
        LineSelection::Lines(LineRange::single(4)),
        SearchLimits::default(),
    )
    .unwrap();

    assert_eq!(link.path, "src/lib.rs");
    assert_eq!(
        link.url,
        format!(
            "{WEB_BASE}/blob/{}/src/lib.rs#L4",
            repo_with_remote.head_sha()
        )
    );
}

#[rstest]
fn test_resolve_whole_new_file(repo_with_remote: TestRepo) {
    repo_with_remote.commit_file("docs/guide one.md", "# Guide\n", "Add guide");
    let git = Repository::at(repo_with_remote.root_path());

    let link = resolve(
        &git,
        Path::new("docs/guide one.md"),
        LineSelection::WholeFile,
        SearchLimits::default(),
    )
    .unwrap();

    assert!(!link.file_at_commit);
    assert_eq!(link.lines, None);
    hash_filters().bind(|| {
        insta::assert_snapshot!(link.url, @"https://github.com/acme/widgets/blob/[HASH]/docs/guide%20one.md");
    });
}

#[rstest]
fn test_branch_without_remote_uses_primary_remote(repo_with_remote: TestRepo) {
    repo_with_remote.commit_file("notes.txt", "x\n", "Local");
    // A tracking ref with no remote component
    repo_with_remote.run_git(&["update-ref", "refs/remotes/loner", "HEAD"]);
    let git = Repository::at(repo_with_remote.root_path());

    let link = resolve(
        &git,
        Path::new("notes.txt"),
        LineSelection::WholeFile,
        SearchLimits::default(),
    )
    .unwrap();

    assert_eq!(link.published.branch, "loner");
    assert_eq!(link.published.remote, None);
    assert_eq!(link.remote, "origin");
    assert!(link.file_at_commit);
}

#[rstest]
fn test_file_outside_repository(repo_with_remote: TestRepo) {
    let outside = repo_with_remote.temp_path().join("outside.txt");
    std::fs::write(&outside, "x\n").unwrap();
    let git = Repository::at(repo_with_remote.root_path());

    let err = resolve(
        &git,
        &outside,
        LineSelection::WholeFile,
        SearchLimits::default(),
    )
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<GitError>(),
        Some(GitError::FileOutsideRepository { .. })
    ));
}

#[rstest]
fn test_unparsable_remote_url(repo_with_remote: TestRepo) {
    repo_with_remote.run_git(&["remote", "set-url", "origin", "ssh://git@host:22/a/b.git"]);
    let git = Repository::at(repo_with_remote.root_path());

    let err = resolve(
        &git,
        Path::new("src/lib.rs"),
        LineSelection::WholeFile,
        SearchLimits::default(),
    )
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<GitError>(),
        Some(GitError::UnparsableRemoteUrl { remote, .. }) if remote == "origin"
    ));
}
