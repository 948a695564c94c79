use assert_cmd::Command;
use predicates::boolean::PredicateBooleanExt;
use predicates::str::contains;

const BINARY_NAME: &str = "kingsguard";

#[test]
fn version_banner() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.write_stdin("quit\n")
            .assert()
            .success()
            .stdout(contains(BINARY_NAME).and(contains("commit"))),
    );
}

#[test]
fn play_moves() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.write_stdin("select e2\nmove e4\nclick d7\nclick d5\nclick e4\nclick d5\nboard\n")
            .assert()
            .success()
            .stdout(
                contains("selected e2: e3 e4\nturn b\n")
                    .and(contains("selected d7: d6 d5\nturn w\n"))
                    .and(contains("selected e4: e5 d5\nturn b capture\n"))
                    .and(contains("r n b k q b n r\np p p . p p p p\n")),
            ),
    );
}

#[test]
fn custom_position() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.args(["--position", "k7/4P3/8/8/8/8/8/7K", "--side", "w"])
            .write_stdin("click e7\nclick e8\npromote q\nmoves\n")
            .assert()
            .success()
            .stdout(
                contains("selected e7: e8\npromote e8\nturn b promotion check\n")
                    .and(contains("a8: a7 b7\n")),
            ),
    );
}

#[test]
fn checkmate() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.write_stdin("click c2\nclick c3\nclick d7\nclick d5\nclick b2\nclick b4\nclick e8\nclick a4\nclick d1\n")
            .assert()
            .success()
            .stdout(contains("checkmate: Black wins\ncheckmate: Black wins\n")),
    );
}

#[test]
fn unsupported_commands() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.write_stdin("castle\nselect e10\n")
            .assert()
            .success()
            .stdout(
                contains("info string Unsupported command: castle")
                    .and(contains("info string Malformed command `select e10`")),
            ),
    );
}

#[test]
fn invalid_position() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.args(["--position", "8/8/8/8/8/8/8/8"])
            .assert()
            .failure()
            .stderr(contains("expected 1 white king, got 0")),
    );
}

#[test]
fn position_with_capturable_king() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.args(["--position", "4k3/p7/8/8/8/8/8/4R2K", "--side", "w"])
            .assert()
            .failure()
            .stderr(contains("black king on e8 is in check with white to move")),
    );
}
