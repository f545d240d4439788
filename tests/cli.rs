use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn zvit(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("zvit").unwrap();
    cmd.env("HOME", home);
    cmd
}

#[test]
fn test_help_describes_the_tool() {
    let home = tempfile::tempdir().unwrap();
    zvit(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("імпорт з Excel"));
}

#[test]
fn test_record_commands_require_login() {
    let home = tempfile::tempdir().unwrap();
    let data_dir = home.path().join("data");
    zvit(home.path())
        .args(["init", "--data-dir", data_dir.to_str().unwrap()])
        .assert()
        .success();

    zvit(home.path())
        .args(["records", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Потрібно увійти"));
}

#[test]
fn test_full_flow() {
    let home = tempfile::tempdir().unwrap();
    let data_dir = home.path().join("data");

    zvit(home.path())
        .args(["init", "--data-dir", data_dir.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("zvit.db"));

    // First user bootstraps as administrator.
    zvit(home.path())
        .args(["users", "add", "admin@bank.ua", "--password", "пароль123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("адміністратором"));

    zvit(home.path())
        .args(["login", "--email", "admin@bank.ua", "--password", "пароль123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Успішний вхід"));

    zvit(home.path())
        .args([
            "records", "add",
            "--fio", "Іванов Іван Іванович",
            "--ipn", "1111111111",
            "--organization", "ТОВ \"ТЕСТ\"",
            "--date-opened", "15.01.2024",
            "--contract",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Очікує активацію"));

    zvit(home.path())
        .args(["records", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Іванов Іван Іванович"))
        .stdout(predicate::str::contains("15.01.2024"));

    zvit(home.path())
        .args(["report", "opened", "--year", "2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ТОВ \"ТЕСТ\""))
        .stdout(predicate::str::contains("Разом"));

    let csv_path = home.path().join("export.csv");
    zvit(home.path())
        .args(["export", "--output", csv_path.to_str().unwrap()])
        .assert()
        .success();
    let csv = std::fs::read(&csv_path).unwrap();
    assert!(csv.starts_with("\u{feff}".as_bytes()));
    let text = String::from_utf8(csv).unwrap();
    assert!(text.contains("\"ФІО\""));
    assert!(text.contains("\"Іванов Іван Іванович\""));

    // The template workbook re-imports cleanly.
    let template_path = home.path().join("shablon_import.xlsx");
    zvit(home.path())
        .args(["template", "--output", template_path.to_str().unwrap()])
        .assert()
        .success();
    zvit(home.path())
        .args(["import", template_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Успішно імпортовано: 1"));

    zvit(home.path())
        .args(["records", "delete", "1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("видалено"));

    zvit(home.path())
        .arg("logout")
        .assert()
        .success();
    zvit(home.path())
        .args(["records", "list"])
        .assert()
        .failure();
}

#[test]
fn test_second_user_requires_admin_session() {
    let home = tempfile::tempdir().unwrap();
    let data_dir = home.path().join("data");
    zvit(home.path())
        .args(["init", "--data-dir", data_dir.to_str().unwrap()])
        .assert()
        .success();
    zvit(home.path())
        .args(["users", "add", "admin@bank.ua", "--password", "пароль123"])
        .assert()
        .success();

    // Not signed in: adding a second user is refused.
    zvit(home.path())
        .args(["users", "add", "manager@bank.ua", "--password", "п1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Потрібно увійти"));

    zvit(home.path())
        .args(["login", "--email", "admin@bank.ua", "--password", "пароль123"])
        .assert()
        .success();
    zvit(home.path())
        .args(["users", "add", "manager@bank.ua", "--password", "п1", "--role", "Менеджер"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Менеджер"));
}
