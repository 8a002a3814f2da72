//! End-to-end recalculation behaviour through the public API

use std::collections::BTreeSet;

use cellcalc::prelude::*;
use pretty_assertions::assert_eq;

fn names(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Snapshot of every cell a test cares about
fn snapshot(sheet: &Spreadsheet, cells: &[&str]) -> Vec<(CellContents, CellValue)> {
    cells
        .iter()
        .map(|c| (sheet.get_contents(c).clone(), sheet.get_value(c).clone()))
        .collect()
}

#[test]
fn test_propagation_returns_all_dependents() {
    let mut sheet = Spreadsheet::new();
    sheet.set_contents("A1", "3").unwrap();
    sheet.set_contents("B1", "=A1*A1").unwrap();
    sheet.set_contents("C1", "=B1+A1").unwrap();

    let affected = sheet.set_contents("A1", "3").unwrap();
    assert_eq!(affected, names(&["A1", "B1", "C1"]));
    assert_eq!(sheet.get_value("B1"), &CellValue::Number(9.0));
    assert_eq!(sheet.get_value("C1"), &CellValue::Number(12.0));
}

#[test]
fn test_indirect_dependents_in_affected_set() {
    let mut sheet = Spreadsheet::new();
    sheet.set_contents("A1", "3").unwrap();
    sheet.set_contents("B1", "=A1*A1").unwrap();
    sheet.set_contents("C1", "=B1+A1").unwrap();
    sheet.set_contents("D1", "=B1-C1").unwrap();

    assert_eq!(sheet.direct_dependents("A1").unwrap(), names(&["B1", "C1"]));
    assert_eq!(
        sheet.set_contents("B1", "=A1").unwrap(),
        names(&["B1", "C1", "D1"])
    );
    assert_eq!(sheet.get_value("D1"), &CellValue::Number(-3.0));
}

#[test]
fn test_cycle_rejected_without_side_effects() {
    let mut sheet = Spreadsheet::new();
    sheet.set_contents("A1", "=B1*2").unwrap();
    sheet.set_contents("B1", "=C1*2").unwrap();
    sheet.set_contents("C1", "4").unwrap();

    let cells = ["A1", "B1", "C1"];
    let before = snapshot(&sheet, &cells);
    let dependents_before = sheet.direct_dependents("C1").unwrap();

    let err = sheet.set_contents("C1", "=A1*2").unwrap_err();
    assert!(matches!(err, Error::CircularDependency(_)));

    assert_eq!(snapshot(&sheet, &cells), before);
    assert_eq!(sheet.direct_dependents("C1").unwrap(), dependents_before);
    assert!(sheet.direct_dependents("A1").unwrap().is_empty());
    assert_eq!(sheet.get_value("A1"), &CellValue::Number(16.0));
}

#[test]
fn test_cycle_rejected_on_first_formula() {
    let mut sheet = Spreadsheet::new();
    sheet.set_contents("A1", "=B1*2").unwrap();
    sheet.set_contents("B1", "=C1*2").unwrap();

    // C1 was never set
    let err = sheet.set_contents("C1", "=A1*2").unwrap_err();
    assert!(matches!(err, Error::CircularDependency(_)));
    assert!(sheet.get_contents("C1").is_empty());
    assert!(sheet.direct_dependents("A1").unwrap().is_empty());
    assert_eq!(sheet.direct_dependents("C1").unwrap(), names(&["B1"]));
}

#[test]
fn test_self_reference_rejected() {
    let mut sheet = Spreadsheet::new();
    sheet.set_contents("A1", "1").unwrap();
    assert!(matches!(
        sheet.set_contents("A1", "=A1+1"),
        Err(Error::CircularDependency(_))
    ));
    assert_eq!(sheet.get_contents("A1"), &CellContents::Number(1.0));
}

#[test]
fn test_error_propagation_and_recovery() {
    let mut sheet = Spreadsheet::new();
    sheet.set_contents("A1", "=1/B1").unwrap();
    sheet.set_contents("B1", "0").unwrap();
    assert_eq!(
        sheet.get_value("A1"),
        &CellValue::Error(FormulaError::DivisionByZero)
    );

    sheet.set_contents("B1", "2").unwrap();
    assert_eq!(sheet.get_value("A1"), &CellValue::Number(0.5));
}

#[test]
fn test_errors_flow_downstream_without_aborting() {
    let mut sheet = Spreadsheet::new();
    sheet.set_contents("A1", "0").unwrap();
    sheet.set_contents("B1", "=1/A1").unwrap();
    sheet.set_contents("C1", "=B1+1").unwrap();
    sheet.set_contents("D1", "=A1+1").unwrap();

    let affected = sheet.set_contents("A1", "0").unwrap();
    assert_eq!(affected, names(&["A1", "B1", "C1", "D1"]));
    assert!(sheet.get_value("B1").is_error());
    assert_eq!(
        sheet.get_value("C1"),
        &CellValue::Error(FormulaError::UndefinedVariable("B1".into()))
    );
    assert_eq!(sheet.get_value("D1"), &CellValue::Number(1.0));
    assert_eq!(sheet.get_value("C1").to_string(), "#REF!");

    sheet.set_contents("A1", "4").unwrap();
    assert_eq!(sheet.get_value("C1"), &CellValue::Number(1.25));
}

#[test]
fn test_set_contents_is_idempotent() {
    let mut sheet = Spreadsheet::new();
    sheet.set_contents("A1", "2").unwrap();
    sheet.set_contents("B1", "=A1*10").unwrap();

    let first = sheet.set_contents("A1", "=5-3").unwrap();
    let values_first = snapshot(&sheet, &["A1", "B1"]);
    let second = sheet.set_contents("A1", "=5-3").unwrap();
    let values_second = snapshot(&sheet, &["A1", "B1"]);

    assert_eq!(first, second);
    assert_eq!(values_first, values_second);
}

#[test]
fn test_never_set_cells_read_empty() {
    let sheet = Spreadsheet::new();
    for i in 1..100 {
        let name = format!("A{}", i);
        assert_eq!(sheet.get_contents(&name), &CellContents::Text(String::new()));
        assert_eq!(sheet.get_value(&name), &CellValue::Text(String::new()));
    }
    assert_eq!(sheet.nonempty_cells().count(), 0);
}

#[test]
fn test_nonempty_cells() {
    let mut sheet = Spreadsheet::new();
    sheet.set_contents("A1", "0").unwrap();
    sheet.set_contents("A1", "something different").unwrap();
    sheet.set_contents("B1", "=A1 + 1").unwrap();
    sheet.set_contents("C1", "").unwrap();

    let cells: BTreeSet<String> = sheet.nonempty_cells().map(str::to_owned).collect();
    assert_eq!(cells, names(&["A1", "B1"]));
}

#[test]
fn test_referencing_missing_cell_then_defining_it() {
    let mut sheet = Spreadsheet::new();
    sheet.set_contents("B1", "=A1+1").unwrap();
    assert!(sheet.get_value("B1").is_error());

    let affected = sheet.set_contents("A1", "41").unwrap();
    assert_eq!(affected, names(&["A1", "B1"]));
    assert_eq!(sheet.get_value("B1"), &CellValue::Number(42.0));
}

#[test]
fn test_wide_fan_out_order() {
    let mut sheet = Spreadsheet::new();
    sheet.set_contents("A1", "1").unwrap();
    for i in 1..=50 {
        sheet
            .set_contents(&format!("B{}", i), &format!("=A1+{}", i))
            .unwrap();
    }
    let sum = (1..=50)
        .map(|i| format!("B{}", i))
        .collect::<Vec<_>>()
        .join("+");
    sheet.set_contents("C1", &format!("={}", sum)).unwrap();

    let affected = sheet.set_contents("A1", "2").unwrap();
    assert_eq!(affected.len(), 52);
    let expected: f64 = (1..=50).map(|i| (2 + i) as f64).sum();
    assert_eq!(sheet.get_value("C1"), &CellValue::Number(expected));
}

#[test]
fn test_deep_chain_recalculates() {
    let mut sheet = Spreadsheet::new();
    sheet.set_contents("A1", "0").unwrap();
    for i in 2..=2000 {
        sheet
            .set_contents(&format!("A{}", i), &format!("=A{}+1", i - 1))
            .unwrap();
    }

    let affected = sheet.set_contents("A1", "10").unwrap();
    assert_eq!(affected.len(), 2000);
    assert_eq!(sheet.get_value("A2000"), &CellValue::Number(2009.0));

    let err = sheet.set_contents("A1", "=A2000").unwrap_err();
    assert!(matches!(err, Error::CircularDependency(_)));
    assert_eq!(sheet.get_value("A2000"), &CellValue::Number(2009.0));
}

#[test]
fn test_save_and_reload_pairs() {
    let mut sheet = Spreadsheet::new();
    sheet.set_contents("A1", "3").unwrap();
    sheet.set_contents("B1", "=a1 * (2 + c1)").unwrap();
    sheet.set_contents("C1", "0.5").unwrap();
    sheet.set_contents("D1", "label").unwrap();

    let pairs = sheet.contents_pairs();
    let reloaded = Spreadsheet::from_pairs(SpreadsheetOptions::default(), pairs.clone()).unwrap();

    assert!(!reloaded.is_changed());
    assert_eq!(reloaded.contents_pairs(), pairs);
    for name in ["A1", "B1", "C1", "D1"] {
        assert_eq!(reloaded.get_contents(name), sheet.get_contents(name));
        assert_eq!(reloaded.get_value(name), sheet.get_value(name));
    }
    assert_eq!(reloaded.get_value("B1"), &CellValue::Number(7.5));
}
