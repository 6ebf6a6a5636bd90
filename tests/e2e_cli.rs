use assert_cmd::{cargo, prelude::*};
use predicates::prelude::*;
use rust_xlsxwriter::Workbook;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn write_input_workbook(path: &Path) {
    let mut workbook = Workbook::new();

    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Costi").unwrap();
        worksheet.write_string(0, 0, "Data").unwrap();
        worksheet.write_string(0, 1, "Costo").unwrap();
        worksheet.write_string(1, 0, "2024-01-01").unwrap();
        worksheet.write_number(1, 1, 200.0).unwrap();
        worksheet.write_string(2, 0, "2024-01-08").unwrap();
        worksheet.write_number(2, 1, 150.0).unwrap();
    }
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Produzione").unwrap();
        worksheet.write_string(0, 0, "Data").unwrap();
        worksheet.write_string(0, 1, "Quantità Prodotte").unwrap();
        worksheet.write_string(1, 0, "2024-01-02").unwrap();
        worksheet.write_number(1, 1, 10.0).unwrap();
    }
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Cassa").unwrap();
        worksheet.write_string(0, 0, "Data").unwrap();
        worksheet.write_string(0, 1, "Entrate").unwrap();
        worksheet.write_string(0, 2, "Uscite").unwrap();
        worksheet.write_string(1, 0, "2024-01-01").unwrap();
        worksheet.write_number(1, 1, 100.0).unwrap();
        worksheet.write_number(1, 2, 40.0).unwrap();
    }

    workbook.save(path).unwrap();
}

fn setup_workspace() -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    write_input_workbook(&dir.path().join("dati_quarra.xlsx"));
    dir
}

#[test]
fn report_no_color_prints_indicators_without_ansi() {
    let dir = setup_workspace();

    let mut cmd = Command::new(cargo::cargo_bin!("quarra"));
    cmd.current_dir(dir.path())
        .arg("--no-color")
        .arg("report");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Weekly Costs"))
        .stdout(predicate::str::contains("Weekly Cash Flow"))
        .stdout(predicate::str::contains("01-Jan → 07-Jan"))
        .stdout(predicate::str::contains("\u{001b}[").not());
}

#[test]
fn report_json_emits_trend_and_values() {
    let dir = setup_workspace();

    let mut cmd = Command::new(cargo::cargo_bin!("quarra"));
    cmd.current_dir(dir.path()).arg("--json").arg("report");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"trend\": \"down\""))
        .stdout(predicate::str::contains("\"Saldo Netto\": \"60\""));
}

#[test]
fn export_writes_default_filename() {
    let dir = setup_workspace();
    let expected = dir.path().join("riepilogo_settimanale.xlsx");
    assert!(!expected.exists());

    let mut cmd = Command::new(cargo::cargo_bin!("quarra"));
    cmd.current_dir(dir.path()).arg("--no-color").arg("export");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("riepilogo_settimanale.xlsx"));

    assert!(expected.exists(), "export should create the summary workbook");
}

#[test]
fn missing_input_workbook_fails_loudly() {
    let dir = TempDir::new().expect("failed to create temp dir");

    let mut cmd = Command::new(cargo::cargo_bin!("quarra"));
    cmd.current_dir(dir.path()).arg("report");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("dati_quarra.xlsx"));
}

#[test]
fn input_override_points_the_pipeline_elsewhere() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let input = dir.path().join("altro.xlsx");
    write_input_workbook(&input);

    let mut cmd = Command::new(cargo::cargo_bin!("quarra"));
    cmd.current_dir(dir.path())
        .arg("--no-color")
        .arg("--input")
        .arg(&input)
        .arg("report");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Weekly Production"));
}

#[test]
fn inspect_lists_sheet_names() {
    let dir = setup_workspace();

    let mut cmd = Command::new(cargo::cargo_bin!("quarra"));
    cmd.current_dir(dir.path())
        .arg("--no-color")
        .arg("inspect")
        .arg("dati_quarra.xlsx");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Costi"))
        .stdout(predicate::str::contains("Produzione"))
        .stdout(predicate::str::contains("Cassa"));
}
