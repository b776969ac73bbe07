use super::*;

#[test]
fn valid_output_parses_rows_and_notes() {
    let raw = r#"{
        "itinerary": [
            {"day": 1, "activity": "Giza Pyramids tour", "approx_cost_egp": 800},
            {"day": 2, "activity": "Egyptian Museum", "approx_cost_egp": 250.5}
        ],
        "notes": "Start early to beat the heat."
    }"#;

    let plan = validate_and_repair(raw, 2, 600.0);
    assert!(!plan.used_fallback);
    assert_eq!(plan.rows.len(), 2);
    assert_eq!(plan.rows[0].day, 1);
    assert_eq!(plan.rows[0].activity, "Giza Pyramids tour");
    assert_eq!(plan.rows[0].approx_cost_egp, 800.0);
    assert_eq!(plan.rows[1].approx_cost_egp, 250.5);
    assert_eq!(plan.notes, "Start early to beat the heat.");
}

#[test]
fn fenced_json_is_accepted() {
    let raw = "Here is your plan:\n```json\n{\"itinerary\": [{\"day\": 1, \"activity\": \"Walk\", \"approx_cost_egp\": 50}], \"notes\": \"ok\"}\n```";

    let plan = validate_and_repair(raw, 1, 600.0);
    assert!(!plan.used_fallback);
    assert_eq!(plan.rows.len(), 1);
    assert_eq!(plan.rows[0].activity, "Walk");
}

#[test]
fn string_costs_and_days_are_coerced() {
    let raw = r#"{
        "itinerary": [
            {"day": "2", "activity": "Khan el-Khalili", "approx_cost_egp": "120.456"}
        ],
        "notes": ""
    }"#;

    let plan = validate_and_repair(raw, 2, 600.0);
    assert!(!plan.used_fallback);
    assert_eq!(plan.rows[0].day, 2);
    assert_eq!(plan.rows[0].approx_cost_egp, 120.46);
}

#[test]
fn plain_text_output_triggers_full_fallback() {
    let plan = validate_and_repair("Sorry, I cannot plan this trip.", 3, 600.0);

    assert!(plan.used_fallback);
    assert_eq!(plan.rows.len(), 3);
    for (i, row) in plan.rows.iter().enumerate() {
        assert_eq!(row.day, i as u32 + 1);
        assert_eq!(row.activity, FALLBACK_ACTIVITY);
        assert_eq!(row.approx_cost_egp, 600.0 * FALLBACK_COST_RATIO);
    }
}

#[test]
fn missing_cost_field_triggers_full_fallback() {
    let raw = r#"{
        "itinerary": [
            {"day": 1, "activity": "Museum", "approx_cost_egp": 250},
            {"day": 2, "activity": "Citadel"}
        ]
    }"#;

    let plan = validate_and_repair(raw, 2, 500.0);
    assert!(plan.used_fallback);
    assert_eq!(plan.rows.len(), 2);
    assert_eq!(plan.rows[0].approx_cost_egp, 400.0);
}

#[test]
fn non_numeric_cost_triggers_full_fallback() {
    let raw = r#"{"itinerary": [{"day": 1, "activity": "Walk", "approx_cost_egp": "free"}]}"#;
    let plan = validate_and_repair(raw, 1, 100.0);
    assert!(plan.used_fallback);
}

#[test]
fn negative_cost_triggers_full_fallback() {
    let raw = r#"{"itinerary": [{"day": 1, "activity": "Walk", "approx_cost_egp": -5}]}"#;
    let plan = validate_and_repair(raw, 1, 100.0);
    assert!(plan.used_fallback);
}

#[test]
fn zero_day_triggers_full_fallback() {
    let raw = r#"{"itinerary": [{"day": 0, "activity": "Walk", "approx_cost_egp": 10}]}"#;
    let plan = validate_and_repair(raw, 1, 100.0);
    assert!(plan.used_fallback);
}

#[test]
fn empty_structure_triggers_full_fallback() {
    let plan = validate_and_repair("{}", 2, 100.0);
    assert!(plan.used_fallback);
    assert_eq!(plan.rows.len(), 2);
}

#[test]
fn fallback_clamps_zero_days_to_one() {
    let rows = fallback_itinerary(0, 100.0);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].day, 1);
}

#[test]
fn missing_notes_default_to_empty() {
    let raw = r#"{"itinerary": [{"day": 1, "activity": "Walk", "approx_cost_egp": 10}]}"#;
    let plan = validate_and_repair(raw, 1, 100.0);
    assert!(!plan.used_fallback);
    assert_eq!(plan.notes, "");
}

#[test]
fn day_costs_reports_cap_compliance() {
    let rows = vec![
        ItineraryRow {
            day: 1,
            activity: "Museum".to_string(),
            approx_cost_egp: 250.0,
        },
        ItineraryRow {
            day: 1,
            activity: "Bazaar".to_string(),
            approx_cost_egp: 100.0,
        },
        ItineraryRow {
            day: 2,
            activity: "Pyramids".to_string(),
            approx_cost_egp: 800.0,
        },
    ];

    let report = day_costs(&rows, 3, 600.0);
    assert_eq!(report.len(), 3);

    assert_eq!(report[0].total_cost_egp, 350.0);
    assert!(report[0].within_cap);

    assert_eq!(report[1].total_cost_egp, 800.0);
    assert!(!report[1].within_cap);

    // Day without rows costs nothing and is trivially within cap.
    assert_eq!(report[2].total_cost_egp, 0.0);
    assert!(report[2].within_cap);
}

#[test]
fn document_round_trips_field_for_field() {
    let document = ItineraryDocument::new(
        "Cairo".to_string(),
        2,
        3000.0,
        vec![900.0, 900.0],
        vec![ItineraryRow {
            day: 1,
            activity: "Giza Pyramids".to_string(),
            approx_cost_egp: 800.0,
        }],
        "Bring water.".to_string(),
    );

    let json = document.to_json().expect("should serialize");
    let parsed = ItineraryDocument::from_json(&json).expect("should parse");
    assert_eq!(parsed, document);
}

#[test]
fn document_field_order_is_stable() {
    let document = ItineraryDocument::new(
        "Cairo".to_string(),
        1,
        1000.0,
        vec![600.0],
        Vec::new(),
        String::new(),
    );

    let json = document.to_json().expect("should serialize");
    let destination_at = json.find("\"destination\"").expect("destination field");
    let days_at = json.find("\"days\"").expect("days field");
    let generated_at = json.find("\"generated_at\"").expect("generated_at field");
    assert!(destination_at < days_at);
    assert!(days_at < generated_at);
}

#[test]
fn generated_at_is_utc_iso_like() {
    let document = ItineraryDocument::new(
        "Cairo".to_string(),
        1,
        1000.0,
        vec![600.0],
        Vec::new(),
        String::new(),
    );

    assert_eq!(document.generated_at.len(), 20);
    assert!(document.generated_at.ends_with('Z'));
    assert_eq!(&document.generated_at[4..5], "-");
    assert_eq!(&document.generated_at[10..11], "T");
}
