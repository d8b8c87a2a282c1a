use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// A workbook directory with the two expected tabs as CSV files, complete
/// with the decorative preamble rows real exports carry above the header.
fn workbook_fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_sheet(
        dir.path(),
        "요약",
        concat!(
            "거래처 관리 대장,,,,,\n",
            ",,,,,\n",
            "업체명,담당자,연락처,내용,잔액,상태\n",
            "한빛상사,김민수,010-1234-5678,전자부품,\"1,304,689,660원\",정상\n",
            "동서무역,이영희,010-2222-3333,원단,\"25,000원\",거래 종료\n",
            "남도식품,박철수,010-9999-0000,식자재,0,\n",
        ),
    );
    write_sheet(
        dir.path(),
        "거래내역",
        concat!(
            "거래 내역,,,,,\n",
            "일자,업체명,매출액,수금액,잔액,비고\n",
            "2025-01-15,한빛상사,\"1,000,000원\",\"500,000원\",\"500,000원\",1월 납품\n",
            "2025-01-20,한빛상사,\"2,000,000원\",0,\"2,500,000원\",\n",
            "2025-02-03,한빛상사,0,\"1,000,000원\",\"1,500,000원\",수금\n",
            "2025-01-18,동서무역,\"50,000원\",0,\"50,000원\",\n",
        ),
    );
    dir
}

fn write_sheet(dir: &Path, sheet: &str, content: &str) {
    std::fs::write(dir.join(format!("{sheet}.csv")), content).unwrap();
}

fn clientbook(workbook: &Path) -> Command {
    let mut cmd = Command::cargo_bin("clientbook").unwrap();
    cmd.arg("--workbook").arg(workbook);
    cmd
}

#[test]
fn list_hides_ended_clients_by_default() {
    let dir = workbook_fixture();
    clientbook(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("한빛상사"))
        .stdout(predicate::str::contains("남도식품"))
        .stdout(predicate::str::contains("동서무역").not())
        .stdout(predicate::str::contains("pass --all"));
}

#[test]
fn list_all_includes_ended_clients() {
    let dir = workbook_fixture();
    clientbook(dir.path())
        .arg("list")
        .arg("--all")
        .assert()
        .success()
        .stdout(predicate::str::contains("동서무역"))
        .stdout(predicate::str::contains("거래 종료"));
}

#[test]
fn lookup_shows_details_history_and_monthly_totals() {
    let dir = workbook_fixture();
    clientbook(dir.path())
        .arg("lookup")
        .arg("한빛상사")
        .assert()
        .success()
        .stdout(predicate::str::contains("김민수"))
        .stdout(predicate::str::contains("1,304,689,660원"))
        .stdout(predicate::str::contains("1월 납품"))
        .stdout(predicate::str::contains("Monthly totals"))
        .stdout(predicate::str::contains("2025-01"))
        // January sales: 1,000,000 + 2,000,000 in one bucket.
        .stdout(predicate::str::contains("3,000,000원"))
        .stdout(predicate::str::contains("2025-02"));
}

#[test]
fn lookup_ended_client_requires_all_flag() {
    let dir = workbook_fixture();
    clientbook(dir.path())
        .arg("lookup")
        .arg("동서무역")
        .assert()
        .success()
        .stdout(predicate::str::contains("ended/suspended"));

    clientbook(dir.path())
        .arg("lookup")
        .arg("동서무역")
        .arg("--all")
        .assert()
        .success()
        .stdout(predicate::str::contains("이영희"));
}

#[test]
fn lookup_unknown_client_fails() {
    let dir = workbook_fixture();
    clientbook(dir.path())
        .arg("lookup")
        .arg("없는업체")
        .assert()
        .failure()
        .stderr(predicate::str::contains("없는업체"));
}

#[test]
fn entry_with_flags_is_noninteractive_and_simulated() {
    let dir = workbook_fixture();
    clientbook(dir.path())
        .arg("entry")
        .arg("--company")
        .arg("한빛상사")
        .arg("--date")
        .arg("2025-03-01")
        .arg("--sales")
        .arg("1000000")
        .arg("--memo")
        .arg("3월 납품")
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded:"))
        .stdout(predicate::str::contains("1,000,000원"))
        .stdout(predicate::str::contains("3월 납품"))
        .stdout(predicate::str::contains("Simulation only"));

    // The workbook really was left untouched.
    let raw = std::fs::read_to_string(dir.path().join("거래내역.csv")).unwrap();
    assert!(!raw.contains("2025-03-01"));
}

#[test]
fn entry_rejects_malformed_date() {
    let dir = workbook_fixture();
    clientbook(dir.path())
        .arg("entry")
        .arg("--company")
        .arg("한빛상사")
        .arg("--date")
        .arg("03/01/2025")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid date"));
}

#[test]
fn manage_update_marks_client_ended_without_writing() {
    let dir = workbook_fixture();
    clientbook(dir.path())
        .arg("manage")
        .arg("update")
        .arg("한빛상사")
        .arg("--end")
        .assert()
        .success()
        .stdout(predicate::str::contains("거래 종료"))
        .stdout(predicate::str::contains("Simulation only"));

    let raw = std::fs::read_to_string(dir.path().join("요약.csv")).unwrap();
    assert!(!raw.contains("한빛상사,김민수,010-1234-5678,전자부품,\"1,304,689,660원\",거래 종료"));
}

#[test]
fn manage_add_warns_on_duplicate_name() {
    let dir = workbook_fixture();
    clientbook(dir.path())
        .arg("manage")
        .arg("add")
        .arg("한빛상사")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"))
        .stdout(predicate::str::contains("Simulation only"));
}

#[test]
fn status_reports_rollup_counts() {
    let dir = workbook_fixture();
    clientbook(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("CSV directory"))
        .stdout(predicate::str::contains("요약"))
        .stdout(predicate::str::contains("거래내역"));
}

#[test]
fn unsupported_workbook_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.txt");
    std::fs::write(&path, "x").unwrap();
    clientbook(&path)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
