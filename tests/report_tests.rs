use std::path::PathBuf;

use budget_lens::errors::LensError;
use budget_lens::report::{report_to_json, BudgetSnapshot};
use budget_lens::AnalysisConfig;
use lens_core::CoreError;
use lens_domain::{AlignmentStatus, CalculationRule, DisciplineRating};
use tempfile::tempdir;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/december_2024.json")
}

fn snapshot() -> BudgetSnapshot {
    BudgetSnapshot::load(&fixture_path()).expect("fixture loads")
}

#[test]
fn fixture_report_matches_hand_computed_totals() {
    let report = snapshot().analyze(&AnalysisConfig::default()).expect("analysis");
    let analysis = &report.analysis;

    assert_eq!(analysis.budget_id, "8f3a2c1e-budget");
    assert_eq!(analysis.total_categories, 6);
    assert_eq!(analysis.total_assigned, 2_500_000);
    assert_eq!(analysis.total_targeted, 2_300_000);
    assert_eq!(analysis.on_target_amount, 1_600_000);
    assert_eq!(analysis.on_target_percentage, 64.0);
    assert_eq!(analysis.budget_discipline_rating, DisciplineRating::Good);

    let gym = report.category("Gym").expect("gym");
    assert_eq!(gym.needed_this_month, Some(100_000));
    assert_eq!(gym.alignment_status, AlignmentStatus::OnTarget);

    let wishlist = report.category("Wishlist").expect("wishlist");
    assert!(!wishlist.has_target);
    assert_eq!(wishlist.group_name, "Ungrouped");
}

#[test]
fn json_report_is_deterministic() {
    let snapshot = snapshot();
    let config = AnalysisConfig::default();
    let first = report_to_json(&snapshot.analyze(&config).expect("first")).expect("json");
    let second = report_to_json(&snapshot.analyze(&config).expect("second")).expect("json");

    assert_eq!(first, second);
}

#[test]
fn explain_finds_hidden_categories_by_name() {
    let calculation = snapshot().explain("old hobby").expect("hidden category explained");

    assert_eq!(calculation.rule, CalculationRule::MonthlyCadence);
    assert_eq!(calculation.amount, Some(50_000));
}

#[test]
fn explain_unknown_category_is_an_error() {
    let err = snapshot().explain("Vacation").expect_err("missing category");

    assert!(matches!(err, LensError::CategoryNotFound(name) if name == "Vacation"));
}

#[test]
fn snapshot_round_trips_through_disk() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("snapshot.json");
    let original = snapshot();

    original.save(&path).expect("save");
    let loaded = BudgetSnapshot::load(&path).expect("load");

    assert_eq!(loaded, original);
}

#[test]
fn unknown_goal_code_fails_to_load() {
    let json = r#"{
        "budget_id": "b",
        "month": {
            "month": "2024-12-01",
            "categories": [
                { "id": "0b6f7c2e-6b1d-4f0a-9a49-1a2b3c4d5e01", "name": "X",
                  "goal_type": "WAT", "budgeted": 0 }
            ]
        }
    }"#;

    assert!(matches!(
        BudgetSnapshot::from_json(json),
        Err(LensError::Serde(_))
    ));
}

#[test]
fn duplicate_category_ids_are_rejected() {
    let mut snapshot = snapshot();
    let copy = snapshot.month.categories[0].clone();
    snapshot.month.categories.push(copy);

    let err = snapshot
        .analyze(&AnalysisConfig::default())
        .expect_err("duplicate ids");

    assert!(matches!(
        err,
        LensError::Analysis(CoreError::DuplicateCategory(_))
    ));
}
