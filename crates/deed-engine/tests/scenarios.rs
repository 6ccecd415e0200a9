//! End-to-end validation scenarios over complete extracted records

use deed_engine::{DeedValidator, ReferenceData, ValidationConfig};
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{field, Amount, Evidence, ExtractedFields, ViolationKind};
use std::sync::Arc;

fn validator() -> DeedValidator {
    let reference = Arc::new(ReferenceData::bundled().expect("bundled table"));
    DeedValidator::new(ValidationConfig::new(reference))
}

/// A record with nothing wrong in it
fn well_formed() -> ExtractedFields {
    serde_json::from_value(json!({
        "doc_number": "DEED-VALID-001",
        "county": "San Mateo",
        "state": "CA",
        "date_signed": "2024-01-10",
        "date_recorded": "2024-01-15",
        "grantor": "Valid Seller LLC",
        "grantee": "Valid Buyer",
        "amount_numeric": "$500,000.00",
        "amount_written": "Five Hundred Thousand Dollars",
        "apn": "123-456-78",
        "status": "FINAL"
    }))
    .unwrap()
}

#[test]
fn amount_mismatch_reports_fifty_thousand() {
    let fields = well_formed()
        .with(field::AMOUNT_NUMERIC, "$1,250,000.00")
        .with(field::AMOUNT_WRITTEN, "One Million Two Hundred Thousand");
    let result = validator().validate(&fields).unwrap();

    assert_eq!(result.violations().len(), 1);
    let violation = &result.violations()[0];
    assert_eq!(violation.kind, ViolationKind::AmountMismatch);
    assert!(violation.message.contains("Discrepancy: $50,000.00"));
    match &violation.evidence {
        Evidence::Amounts {
            numeric,
            written,
            discrepancy,
            ..
        } => {
            assert_eq!(*numeric, Amount::from_cents(125_000_000));
            assert_eq!(*written, Amount::from_cents(120_000_000));
            assert_eq!(*discrepancy, Amount::from_cents(5_000_000));
        }
        other => panic!("unexpected evidence {other:?}"),
    }
}

#[test]
fn backdated_recording_with_amount_mismatch_reports_both_in_order() {
    let fields = well_formed()
        .with(field::DATE_SIGNED, "2024-01-15")
        .with(field::DATE_RECORDED, "2024-01-10")
        .with(field::AMOUNT_NUMERIC, "$1,250,000.00")
        .with(field::AMOUNT_WRITTEN, "One Million Two Hundred Thousand");
    let result = validator().validate(&fields).unwrap();

    assert!(!result.is_valid());
    let kinds: Vec<_> = result.violations().iter().map(|v| v.kind).collect();
    assert_eq!(
        kinds,
        vec![ViolationKind::DateLogic, ViolationKind::AmountMismatch]
    );
    assert_eq!(
        result.violations()[0].evidence,
        Evidence::Dates {
            signed: "2024-01-15".to_string(),
            recorded: "2024-01-10".to_string(),
        }
    );
}

#[test]
fn abbreviated_county_resolves_with_reference_rate() {
    let reference = ReferenceData::bundled().unwrap();
    let fields = well_formed().with(field::COUNTY, "S. Clara");
    let result = validator().validate(&fields).unwrap();

    assert!(result.is_valid());
    let enriched = result.enriched_data();
    assert_eq!(enriched.county_normalized.as_deref(), Some("Santa Clara"));
    assert_eq!(enriched.tax_rate, reference.rate_for("Santa Clara"));
}

#[test]
fn unknown_county_lists_every_canonical_name() {
    let reference = ReferenceData::bundled().unwrap();
    let fields = well_formed().with(field::COUNTY, "Atlantis");
    let result = validator().validate(&fields).unwrap();

    assert_eq!(result.violations().len(), 1);
    let violation = &result.violations()[0];
    assert_eq!(violation.kind, ViolationKind::NameNotFound);
    for name in reference.names() {
        assert!(violation.message.contains(name.as_str()), "missing {name}");
    }
    assert_eq!(
        violation.evidence,
        Evidence::Jurisdiction {
            attempted: "Atlantis".to_string(),
            available: reference.names().to_vec(),
            ambiguous: Vec::new(),
        }
    );
    assert_eq!(result.enriched_data().county_normalized, None);
}

#[test]
fn ambiguous_county_names_its_candidates() {
    let fields = well_formed().with(field::COUNTY, "Santa");
    let result = validator().validate(&fields).unwrap();

    assert_eq!(result.violations().len(), 1);
    match &result.violations()[0].evidence {
        Evidence::Jurisdiction { ambiguous, .. } => assert_eq!(
            ambiguous,
            &vec![
                "Santa Barbara".to_string(),
                "Santa Clara".to_string(),
                "Santa Cruz".to_string()
            ]
        ),
        other => panic!("unexpected evidence {other:?}"),
    }
    assert_eq!(result.enriched_data().county_normalized, None);
}

#[test]
fn well_formed_record_is_valid() {
    let result = validator().validate(&well_formed()).unwrap();

    assert!(result.is_valid());
    assert!(result.violations().is_empty());

    let report = result.to_report();
    assert!(report.valid);
    assert!(report.errors.is_empty());
    assert_eq!(report.data["county_normalized"], json!("San Mateo"));
    assert_eq!(report.data["amount_written_parsed"], json!("500000.00"));
    assert_eq!(report.data["closing_costs"], json!("5500.00"));
    assert_eq!(report.data["grantee"], json!("Valid Buyer"));
}

#[test]
fn report_errors_are_formatted_per_kind() {
    let fields = well_formed()
        .with(field::DATE_SIGNED, "2024-01-15")
        .with(field::DATE_RECORDED, "2024-01-10")
        .with(field::COUNTY, "Atlantis");
    let report = validator().validate(&fields).unwrap().to_report();

    assert!(!report.valid);
    assert_eq!(report.errors.len(), 2);
    assert!(report.errors[0].starts_with("IMPOSSIBLE DATE SEQUENCE: Document was recorded (2024-01-10)"));
    assert!(report.errors[1].starts_with("COUNTY NOT FOUND: 'Atlantis' could not be matched"));
}

#[test]
fn numeric_amount_may_arrive_as_a_number() {
    let fields = well_formed().with(field::AMOUNT_NUMERIC, json!(500000));
    let result = validator().validate(&fields).unwrap();
    assert!(result.is_valid());
}

#[test]
fn validator_is_shared_across_threads() {
    let validator = Arc::new(validator());
    let handles: Vec<_> = ["S. Clara", "San Mateo", "Atlantis", "Sta Cruz"]
        .into_iter()
        .map(|county| {
            let validator = Arc::clone(&validator);
            std::thread::spawn(move || {
                let fields = well_formed().with(field::COUNTY, county);
                validator.validate(&fields).unwrap().is_valid()
            })
        })
        .collect();

    let outcomes: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(outcomes, vec![true, true, false, true]);
}
