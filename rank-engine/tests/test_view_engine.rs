//! FILENAME: rank-engine/tests/test_view_engine.rs
//! PURPOSE: End-to-end tests for the ranked tabular view engine.

use dataset::{CellValue, Dataset, RowCategory};
use rank_engine::{SortDirection, TableViewEngine, ViewCommand};

/// A dataset shaped like one survey year: summary row plus a mix of
/// municipalities, a county and a district, two columns with one hole.
fn create_survey_dataset() -> Dataset {
    Dataset::new(
        vec![
            "Hela landet".to_string(),
            "Arvika kommun".to_string(),
            "Värmlands län".to_string(),
            "Göteborg, Centrum stadsdelsnämnd".to_string(),
            "Ale kommun".to_string(),
        ],
        vec!["Brott totalt".to_string(), "Misshandel".to_string()],
        vec![
            vec![CellValue::Number(22.5), CellValue::Number(4.1)],
            vec![CellValue::Number(19.1), CellValue::Number(3.0)],
            vec![CellValue::Number(20.7), CellValue::Missing],
            vec![CellValue::Number(25.3), CellValue::Number(5.9)],
            vec![CellValue::Number(19.1), CellValue::Number(2.2)],
        ],
    )
    .unwrap()
}

fn create_engine() -> TableViewEngine {
    let mut engine = TableViewEngine::new(create_survey_dataset());
    engine.set_column_visibility(["Brott totalt", "Misshandel"]);
    engine
}

// ============================================================================
// SUMMARY PIN
// ============================================================================

#[test]
fn test_summary_row_is_first_under_every_filter_and_sort() {
    let filter_sets: [&[&str]; 4] = [
        &["county", "district", "city"],
        &["city"],
        &["county"],
        &[],
    ];
    for categories in filter_sets {
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let mut engine = create_engine();
            engine.set_area_filters(categories.iter().copied());
            engine.set_sort("Brott totalt", direction);
            let view = engine.render().unwrap();
            assert!(view.rows[0].is_summary, "filters {:?}", categories);
            assert_eq!(view.rows[0].label, "Hela landet");
        }
    }
}

// ============================================================================
// RANK CORRECTNESS
// ============================================================================

#[test]
fn test_unique_maximum_gets_rank_one() {
    let mut engine = create_engine();
    let view = engine.render().unwrap();
    let cell = view
        .cell("Göteborg, Centrum stadsdelsnämnd", "Brott totalt")
        .unwrap();
    assert_eq!(
        cell.tooltip,
        "**Göteborg, Centrum stadsdelsnämnd / Brott totalt**\n1. farligaste av 4\n"
    );
}

#[test]
fn test_equal_values_share_rank_text_shape() {
    let mut engine = create_engine();
    let view = engine.render().unwrap();
    // Arvika and Ale tie at 19.1 at the bottom of a 4-peer pool.
    assert_eq!(
        view.cell("Arvika kommun", "Brott totalt").unwrap().tooltip,
        "**Arvika kommun / Brott totalt**\n4. farligaste av 4\n"
    );
    assert_eq!(
        view.cell("Ale kommun", "Brott totalt").unwrap().tooltip,
        "**Ale kommun / Brott totalt**\n4. farligaste av 4\n"
    );
}

#[test]
fn test_missing_cell_renders_no_data() {
    let mut engine = create_engine();
    let view = engine.render().unwrap();
    assert_eq!(
        view.cell("Värmlands län", "Misshandel").unwrap().tooltip,
        "**Värmlands län**\nuppgift saknas\n"
    );
}

// ============================================================================
// CACHE BEHAVIOR ACROSS COMMANDS
// ============================================================================

#[test]
fn test_sorting_never_changes_annotation_text() {
    let mut engine = create_engine();
    let baseline = engine.render().unwrap();

    engine.set_sort("Misshandel", SortDirection::Ascending);
    engine.set_sort("Brott totalt", SortDirection::Descending);
    engine.clear_sort();
    let after = engine.render().unwrap();

    assert_eq!(after.generation, baseline.generation);
    for row in &baseline.rows {
        for cell in &row.cells {
            assert_eq!(
                after.cell(&row.label, &cell.column).unwrap().tooltip,
                cell.tooltip,
                "tooltip drifted for {} / {}",
                row.label,
                cell.column
            );
        }
    }
}

#[test]
fn test_column_visibility_change_keeps_generation() {
    let mut engine = create_engine();
    let before = engine.render().unwrap();
    engine.set_column_visibility(["Misshandel"]);
    let after = engine.render().unwrap();
    assert_eq!(after.generation, before.generation);
    // A column brought back later still serves the original text.
    engine.set_column_visibility(["Brott totalt", "Misshandel"]);
    let restored = engine.render().unwrap();
    assert_eq!(
        restored.cell("Ale kommun", "Brott totalt").unwrap().tooltip,
        before.cell("Ale kommun", "Brott totalt").unwrap().tooltip
    );
}

#[test]
fn test_filter_round_trip_restores_rank_text_exactly() {
    // The County/City tie scenario: values X = {summary 5.0, A 3.0, B 3.0}.
    let dataset = Dataset::new(
        vec![
            "Hela landet".to_string(),
            "A kommun".to_string(),
            "B län".to_string(),
        ],
        vec!["X".to_string()],
        vec![
            vec![CellValue::Number(5.0)],
            vec![CellValue::Number(3.0)],
            vec![CellValue::Number(3.0)],
        ],
    )
    .unwrap();
    let mut engine = TableViewEngine::new(dataset);

    let initial = engine.render().unwrap();
    let a_text = initial.cell("A kommun", "X").unwrap().tooltip.clone();
    let b_text = initial.cell("B län", "X").unwrap().tooltip.clone();
    // Two-way tie: both rows share one rank over a 2-peer pool.
    assert_eq!(a_text, "**A kommun / X**\n2. farligaste av 2\n");
    assert_eq!(b_text, "**B län / X**\n2. farligaste av 2\n");

    // Disabling County shrinks the peer set to {A}: A is re-ranked, B gone.
    engine.set_area_filters(["city", "district"]);
    let narrowed = engine.render().unwrap();
    assert_eq!(narrowed.generation, initial.generation + 1);
    assert!(narrowed.row("B län").is_none());
    assert_eq!(
        narrowed.cell("A kommun", "X").unwrap().tooltip,
        "**A kommun / X**\n1. farligaste av 1\n"
    );

    // Re-enabling County restores both original texts byte-for-byte.
    engine.set_area_filters(["city", "district", "county"]);
    let restored = engine.render().unwrap();
    assert_eq!(restored.cell("A kommun", "X").unwrap().tooltip, a_text);
    assert_eq!(restored.cell("B län", "X").unwrap().tooltip, b_text);
}

#[test]
fn test_reapplied_filter_does_not_bump_generation_twice() {
    let mut engine = create_engine();
    engine.set_area_filters(["city"]);
    let first = engine.render().unwrap();
    engine.set_area_filters(["city"]);
    let second = engine.render().unwrap();
    assert_eq!(first.generation, second.generation);
    assert_eq!(first, second);
}

// ============================================================================
// COMMAND BOUNDARY
// ============================================================================

#[test]
fn test_unknown_category_token_applies_rest_of_command() {
    let mut engine = create_engine();
    engine.apply(&ViewCommand::SetAreaFilters {
        categories: vec![
            "county".to_string(),
            "suburb".to_string(),
            "city".to_string(),
        ],
    });
    let view = engine.render().unwrap();
    assert!(view.row("Värmlands län").is_some());
    assert!(view.row("Ale kommun").is_some());
    assert!(view.row("Göteborg, Centrum stadsdelsnämnd").is_none());
}

#[test]
fn test_unknown_sort_column_keeps_previous_sort() {
    let mut engine = create_engine();
    engine.apply(&ViewCommand::SetSort {
        column: "Brott totalt".to_string(),
        direction: SortDirection::Descending,
    });
    let before = engine.render().unwrap();

    engine.apply(&ViewCommand::SetSort {
        column: "Ingen sådan kolumn".to_string(),
        direction: SortDirection::Ascending,
    });
    let after = engine.render().unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_commands_deserialize_from_host_json() {
    let command: ViewCommand = serde_json::from_str(
        r#"{"command":"setSort","column":"Brott totalt","direction":"descending"}"#,
    )
    .unwrap();
    let mut engine = create_engine();
    engine.apply(&command);
    let view = engine.render().unwrap();
    assert_eq!(view.rows[1].label, "Göteborg, Centrum stadsdelsnämnd");
}

// ============================================================================
// OUTPUT SHAPE
// ============================================================================

#[test]
fn test_rows_carry_categories() {
    let mut engine = create_engine();
    let view = engine.render().unwrap();
    assert_eq!(view.row("Hela landet").unwrap().category, None);
    assert_eq!(
        view.row("Värmlands län").unwrap().category,
        Some(RowCategory::County)
    );
    assert_eq!(
        view.row("Ale kommun").unwrap().category,
        Some(RowCategory::City)
    );
}

#[test]
fn test_view_serializes_for_the_host() {
    let mut engine = create_engine();
    let view = engine.render().unwrap();
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["rows"][0]["label"], "Hela landet");
    assert_eq!(json["rows"][0]["isSummary"], true);
}
