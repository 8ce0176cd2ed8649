use assert_cmd::Command;
use predicates::prelude::*;

fn skarbnik(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("skarbnik").unwrap();
    cmd.env("HOME", home);
    cmd
}

fn setup(home: &std::path::Path) {
    let data_dir = home.join("data");
    skarbnik(home)
        .args(["init", "--data-dir"])
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized skarbnik"));
    skarbnik(home).arg("demo").assert().success();
}

#[test]
fn init_demo_and_list() {
    let home = tempfile::tempdir().unwrap();
    setup(home.path());

    skarbnik(home.path())
        .args(["rows", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("72095"))
        .stdout(predicate::str::contains("Utrzymanie systemu e-Doręczeń"));

    skarbnik(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows:          2"));
}

#[test]
fn add_requires_session() {
    let home = tempfile::tempdir().unwrap();
    setup(home.path());

    skarbnik(home.path())
        .args(["rows", "add", "--dzial", "700"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No active session"));
}

#[test]
fn add_reports_all_field_errors() {
    let home = tempfile::tempdir().unwrap();
    setup(home.path());

    skarbnik(home.path())
        .args(["session", "login", "--user", "Beata Fąk", "--rola", "bbf", "--komorka", "1"])
        .assert()
        .success();

    skarbnik(home.path())
        .args(["rows", "add", "--dzial", "700"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Pole jest wymagane."))
        .stderr(predicate::str::contains("failed validation"));
}

#[test]
fn add_valid_row_then_patch_and_history() {
    let home = tempfile::tempdir().unwrap();
    setup(home.path());

    skarbnik(home.path())
        .args(["session", "login", "--user", "Joanna Kowalska", "--rola", "kierownictwo", "--komorka", "1"])
        .assert()
        .success();

    skarbnik(home.path())
        .args([
            "rows", "add",
            "--czesc", "27",
            "--dzial", "700",
            "--rozdzial", "70001",
            "--paragraf", "4210",
            "--zrodlo", "1",
            "--grupa", "3",
            "--zadanie", "1.1.1.1",
            "--program", "Program mieszkaniowy",
            "--plan-wi", "WI/2027/01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("row 3"));

    // A reference object patches down to its code.
    skarbnik(home.path())
        .args(["rows", "set", "3", "--field", "paragraf", "--value", r#"{"kod":"4220"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("Paragraf = 4220"));

    skarbnik(home.path())
        .args(["history", "3", "--field", "paragraf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Utworzono"))
        .stdout(predicate::str::contains("Edytowano"))
        .stdout(predicate::str::contains("4220"));
}

#[test]
fn demo_row_has_creation_history() {
    let home = tempfile::tempdir().unwrap();
    setup(home.path());

    skarbnik(home.path())
        .args(["history", "1", "--field", "paragraf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Utworzono"))
        .stdout(predicate::str::contains("4300"));
}

#[test]
fn export_writes_csv() {
    let home = tempfile::tempdir().unwrap();
    setup(home.path());

    let out = home.path().join("rows.csv");
    skarbnik(home.path())
        .args(["export", "rows", "--output"])
        .arg(&out)
        .assert()
        .success();

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("id,czesc_budzetowa_kod"));
    assert!(content.contains("72095"));
}
