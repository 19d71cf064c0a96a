use assert_cmd::Command;

#[test]
fn no_arguments_prints_usage_and_fails() {
    let assert = Command::cargo_bin("moveit").unwrap().assert().failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("Usage"), "stderr was: {stderr}");
}

#[test]
fn one_argument_is_not_enough() {
    Command::cargo_bin("moveit")
        .unwrap()
        .arg("25")
        .assert()
        .failure();
}

#[test]
fn non_numeric_minutes_fail() {
    let assert = Command::cargo_bin("moveit")
        .unwrap()
        .args(["twenty-five", "5"])
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("twenty-five"), "stderr was: {stderr}");
}

#[test]
fn zero_minutes_fail() {
    Command::cargo_bin("moveit")
        .unwrap()
        .args(["0", "5"])
        .assert()
        .failure();
}
