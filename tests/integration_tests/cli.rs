use insta_cmd::assert_cmd_snapshot;
use rstest::rstest;

use crate::common::{
    TestRepo, WEB_BASE, numbered_lines, repo, repo_with_remote, setup_snapshot_settings,
};

#[rstest]
fn test_range(repo_with_remote: TestRepo) {
    let mut cmd = repo_with_remote.permalink_command();
    cmd.args(["--no-copy", "range", "src/lib.rs", "2", "4"]);

    setup_snapshot_settings().bind(|| {
        assert_cmd_snapshot!(cmd, @r"
        success: true
        exit_code: 0
        ----- stdout -----
        https://github.com/acme/widgets/blob/[HASH]/src/lib.rs#L2-L4

        ----- stderr -----
        ");
    });
}

#[rstest]
fn test_range_end_defaults_to_start(repo_with_remote: TestRepo) {
    let mut cmd = repo_with_remote.permalink_command();
    cmd.args(["range", "src/lib.rs", "7", "--no-copy"]);

    setup_snapshot_settings().bind(|| {
        assert_cmd_snapshot!(cmd, @r"
        success: true
        exit_code: 0
        ----- stdout -----
        https://github.com/acme/widgets/blob/[HASH]/src/lib.rs#L7

        ----- stderr -----
        ");
    });
}

#[rstest]
fn test_range_translates_local_edits(repo_with_remote: TestRepo) {
    let pushed = repo_with_remote.head_sha();
    let edited = numbered_lines(10).replacen("line 1\n", "// header\nline 1\n", 1);
    repo_with_remote.commit_file("src/lib.rs", &edited, "Add header");

    let output = repo_with_remote
        .permalink_command()
        .args(["--no-copy", "range", "src/lib.rs", "5", "6"])
        .output()
        .unwrap();
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        format!("{WEB_BASE}/blob/{pushed}/src/lib.rs#L4-L5")
    );

    let mut cmd = repo_with_remote.permalink_command();
    cmd.args(["--no-copy", "range", "src/lib.rs", "5", "6"]);
    setup_snapshot_settings().bind(|| {
        assert_cmd_snapshot!(cmd, @r"
        success: true
        exit_code: 0
        ----- stdout -----
        https://github.com/acme/widgets/blob/[HASH]/src/lib.rs#L4-L5

        ----- stderr -----
        ");
    });
}

#[rstest]
fn test_file(repo_with_remote: TestRepo) {
    let mut cmd = repo_with_remote.permalink_command();
    cmd.args(["--no-copy", "file", "src/lib.rs"]);

    setup_snapshot_settings().bind(|| {
        assert_cmd_snapshot!(cmd, @r"
        success: true
        exit_code: 0
        ----- stdout -----
        https://github.com/acme/widgets/blob/[HASH]/src/lib.rs

        ----- stderr -----
        ");
    });
}

#[rstest]
fn test_file_not_yet_published_warns(repo_with_remote: TestRepo) {
    repo_with_remote.commit_file("src/new.rs", "fn new() {}\n", "Add new.rs");

    let mut cmd = repo_with_remote.permalink_command();
    cmd.args(["--no-copy", "file", "src/new.rs"]);

    setup_snapshot_settings().bind(|| {
        assert_cmd_snapshot!(cmd, @r"
        success: true
        exit_code: 0
        ----- stdout -----
        https://github.com/acme/widgets/blob/[HASH]/src/new.rs

        ----- stderr -----
        ▲ src/new.rs does not exist at [SHORT]; the link won't resolve until it is pushed
        ");
    });
}

#[rstest]
fn test_range_in_unpublished_file_fails(repo_with_remote: TestRepo) {
    repo_with_remote.commit_file("src/new.rs", "fn new() {}\n", "Add new.rs");

    let mut cmd = repo_with_remote.permalink_command();
    cmd.args(["--no-copy", "range", "src/new.rs", "1"]);

    setup_snapshot_settings().bind(|| {
        assert_cmd_snapshot!(cmd, @r"
        success: false
        exit_code: 1
        ----- stdout -----

        ----- stderr -----
        ✗ src/new.rs does not exist at [SHORT], so its lines have no published location
        ↳ Push a commit that contains the file, then try again
        ");
    });
}

#[rstest]
fn test_range_starting_at_zero(repo_with_remote: TestRepo) {
    let mut cmd = repo_with_remote.permalink_command();
    cmd.args(["--no-copy", "range", "src/lib.rs", "0"]);

    setup_snapshot_settings().bind(|| {
        assert_cmd_snapshot!(cmd, @r"
        success: false
        exit_code: 1
        ----- stdout -----

        ----- stderr -----
        ✗ Invalid line range 0-0
        ↳ Lines are 1-based and the end can't come before the start
        ");
    });
}

#[rstest]
fn test_range_end_before_start(repo_with_remote: TestRepo) {
    let mut cmd = repo_with_remote.permalink_command();
    cmd.args(["--no-copy", "range", "src/lib.rs", "5", "2"]);

    setup_snapshot_settings().bind(|| {
        assert_cmd_snapshot!(cmd, @r"
        success: false
        exit_code: 1
        ----- stdout -----

        ----- stderr -----
        ✗ Invalid line range 5-2
        ↳ Lines are 1-based and the end can't come before the start
        ");
    });
}

#[rstest]
fn test_nothing_published(repo: TestRepo) {
    let mut cmd = repo.permalink_command();
    cmd.args(["--no-copy", "file", "src/lib.rs"]);

    setup_snapshot_settings().bind(|| {
        assert_cmd_snapshot!(cmd, @r"
        success: false
        exit_code: 1
        ----- stdout -----

        ----- stderr -----
        ✗ No remote branch head found within tracking limits (20 commits)
        ↳ Push the current branch, or raise the limit with --max-depth
        ");
    });
}

#[rstest]
fn test_max_depth_sources(repo_with_remote: TestRepo) {
    repo_with_remote.commit_file("a.txt", "a\n", "One");
    repo_with_remote.commit_file("b.txt", "b\n", "Two");
    repo_with_remote.write_test_config("max-depth = 1\ncopy = false\n");

    let settings = setup_snapshot_settings();
    let _guard = settings.bind_to_scope();

    // Config file
    let mut cmd = repo_with_remote.permalink_command();
    cmd.args(["file", "src/lib.rs"]);
    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    ✗ No remote branch head found within tracking limits (1 commits)
    ↳ Push the current branch, or raise the limit with --max-depth
    ");

    // Flag beats config
    let mut cmd = repo_with_remote.permalink_command();
    cmd.args(["--max-depth", "2", "file", "src/lib.rs"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    https://github.com/acme/widgets/blob/[HASH]/src/lib.rs

    ----- stderr -----
    ");

    // Environment beats config
    let mut cmd = repo_with_remote.permalink_command();
    cmd.env("PERMALINK_MAX_DEPTH", "2").args(["file", "src/lib.rs"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    https://github.com/acme/widgets/blob/[HASH]/src/lib.rs

    ----- stderr -----
    ");
}

#[rstest]
fn test_broken_config_names_file(repo_with_remote: TestRepo) {
    repo_with_remote.write_test_config("max-depth = [\n");

    let output = repo_with_remote
        .permalink_command()
        .args(["--no-copy", "file", "src/lib.rs"])
        .output()
        .unwrap();

    // The parser's own wording varies between toml releases
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(stderr.contains("test-config.toml"), "{stderr}");
}

#[rstest]
fn test_copies_with_configured_command(repo_with_remote: TestRepo) {
    let clip = repo_with_remote.temp_path().join("clipboard.txt");
    repo_with_remote.write_test_config(&format!(
        "[clipboard]\ncommand = \"sh\"\nargs = [\"-c\", \"cat > '{}'\"]\n",
        clip.display()
    ));

    let mut cmd = repo_with_remote.permalink_command();
    cmd.args(["range", "src/lib.rs", "3"]);

    setup_snapshot_settings().bind(|| {
        assert_cmd_snapshot!(cmd, @r"
        success: true
        exit_code: 0
        ----- stdout -----
        https://github.com/acme/widgets/blob/[HASH]/src/lib.rs#L3

        ----- stderr -----
        ✓ Copied link to src/lib.rs at [SHORT] (origin/main)
        ");
    });
    assert_eq!(
        std::fs::read_to_string(&clip).unwrap(),
        format!(
            "{WEB_BASE}/blob/{}/src/lib.rs#L3",
            repo_with_remote.head_sha()
        )
    );
}

#[rstest]
fn test_failing_clipboard_command(repo_with_remote: TestRepo) {
    repo_with_remote.write_test_config(
        "[clipboard]\ncommand = \"sh\"\nargs = [\"-c\", \"cat >/dev/null; echo 'clipboard locked' >&2; exit 1\"]\n",
    );

    let mut cmd = repo_with_remote.permalink_command();
    cmd.args(["file", "src/lib.rs"]);

    // The link is printed before copying
    setup_snapshot_settings().bind(|| {
        assert_cmd_snapshot!(cmd, @r"
        success: false
        exit_code: 1
        ----- stdout -----
        https://github.com/acme/widgets/blob/[HASH]/src/lib.rs

        ----- stderr -----
        ✗ Failed to copy to clipboard: sh -c cat >/dev/null; echo 'clipboard locked' >&2; exit 1
          clipboard locked
        ");
    });
}

#[rstest]
fn test_change_directory_flag(repo_with_remote: TestRepo) {
    let mut cmd = repo_with_remote.permalink_command();
    cmd.current_dir(repo_with_remote.temp_path())
        .args(["-C", "repo/src", "--no-copy", "range", "lib.rs", "1"]);

    setup_snapshot_settings().bind(|| {
        assert_cmd_snapshot!(cmd, @r"
        success: true
        exit_code: 0
        ----- stdout -----
        https://github.com/acme/widgets/blob/[HASH]/src/lib.rs#L1

        ----- stderr -----
        ");
    });
}

#[rstest]
fn test_not_a_repository(repo: TestRepo) {
    let mut cmd = repo.permalink_command();
    cmd.current_dir(repo.temp_path())
        .env("GIT_CEILING_DIRECTORIES", repo.temp_path())
        .args(["--no-copy", "file", "test-gitconfig"]);

    setup_snapshot_settings().bind(|| {
        assert_cmd_snapshot!(cmd, @r"
        success: false
        exit_code: 1
        ----- stdout -----

        ----- stderr -----
        ✗ Not a repository, or no resolvable head: .
        ↳ Run from inside a repository that has at least one commit
        ");
    });
}
