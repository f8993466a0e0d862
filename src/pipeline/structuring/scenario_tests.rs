// End-to-end scenarios for the full chain: response text → payload →
// format detection → note normalization → medication normalization.

use std::sync::Arc;
use std::thread;

use serde_json::{json, Value};
use uuid::Uuid;

use super::classify::detect_format;
use super::normalize::normalize_note;
use super::orchestrator::NoteStructurer;
use super::types::*;

fn structure(payload: Value) -> StructuredNote {
    let format = detect_format(&payload, None);
    normalize_note(&payload, format)
}

#[test]
fn bare_medication_string_becomes_prescription_record() {
    let note = structure(json!({"medications": "Aspirin (Aspilets) 80mg"}));
    let json = serde_json::to_value(&note).unwrap();
    assert_eq!(
        json["medications"],
        json!([{
            "genericName": "Aspirin",
            "brandName": "Aspilets",
            "strength": "80mg",
            "dosageForm": "",
            "sigInstructions": "",
            "quantity": "",
            "refills": "",
            "specialInstructions": ""
        }])
    );
}

#[test]
fn soap_payload_yields_four_string_keys() {
    let note = structure(json!({
        "subjective": "Patient reports headache",
        "objective": "",
        "assessment": "",
        "plan": ""
    }));
    assert_eq!(note.format(), NoteFormat::Soap);
    assert_eq!(
        serde_json::to_value(&note).unwrap(),
        json!({
            "subjective": "Patient reports headache",
            "objective": "",
            "assessment": "",
            "plan": ""
        })
    );
}

#[test]
fn empty_payload_yields_empty_standard_note() {
    let note = structure(json!({}));
    assert_eq!(note.format(), NoteFormat::Standard);
    let json = serde_json::to_value(&note).unwrap();
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 8);
    assert!(obj.values().all(|v| v == ""));
}

#[test]
fn partial_patient_information_is_completed() {
    let note = structure(json!({
        "patientInformation": {"name": "Juan Dela Cruz"},
        "medications": []
    }));
    assert_eq!(
        serde_json::to_value(&note).unwrap(),
        json!({
            "patientInformation": {"name": "Juan Dela Cruz", "sex": "", "age": "", "date": ""},
            "medications": [],
            "prescriberInformation": {"name": "", "licenseNumber": "", "signature": "[SIGNATURE]"}
        })
    );
}

#[test]
fn named_medication_object_keeps_explicit_strength() {
    let note = structure(json!({
        "medications": [{"name": "Metformin (Glucophage)", "strength": "500mg"}]
    }));
    let StructuredNote::Prescription(rx) = note else {
        panic!("expected prescription");
    };
    assert_eq!(
        rx.medications,
        vec![MedicationRecord {
            generic_name: "Metformin".into(),
            brand_name: "Glucophage".into(),
            strength: "500mg".into(),
            ..Default::default()
        }]
    );
}

#[test]
fn soap_keys_outrank_prescription_keys() {
    let note = structure(json!({
        "subjective": "Follow-up",
        "objective": "BP 130/85",
        "patientInformation": {"name": "Ana"},
        "medications": ["Losartan 50mg"]
    }));
    assert_eq!(note.format(), NoteFormat::Soap);
}

#[test]
fn mixed_medication_list_keeps_count_and_order() {
    let note = structure(json!({
        "medications": [
            "Amoxicillin (Amoxil) 500mg",
            {"genericName": "Salbutamol", "dosageForm": "inhaler", "sigInstructions": "2 puffs PRN"},
            "Cetirizine 10mg",
            {"name": "Omeprazole", "refills": 1},
            null
        ]
    }));
    let StructuredNote::Prescription(rx) = note else {
        panic!("expected prescription");
    };
    let names: Vec<&str> = rx.medications.iter().map(|m| m.generic_name.as_str()).collect();
    assert_eq!(
        names,
        ["Amoxicillin", "Salbutamol", "Cetirizine 10mg", "Omeprazole", ""]
    );
    assert_eq!(rx.medications[1].sig_instructions, "2 puffs PRN");
    assert_eq!(rx.medications[3].refills, "1");
}

#[test]
fn full_llm_response_round_trip() {
    let response = r#"Here is the structured prescription:
```json
{
  "patientInformation": {"name": "Maria Santos", "sex": "F", "age": 62, "date": "2026-03-02"},
  "medications": [
    {
      "genericName": "Amlodipine (Norvasc)",
      "strength": "5mg",
      "dosageForm": "tablet",
      "sigInstructions": "1 tab once daily",
      "quantity": 30,
      "refills": 2,
      "specialInstructions": "Take in the morning"
    }
  ],
  "prescriberInformation": {"name": "Dr. Jose Rizal", "licenseNumber": "0012345"}
}
```"#;
    let result = NoteStructurer::new()
        .structure_response(Uuid::new_v4(), response, None)
        .unwrap();
    assert_eq!(result.format, NoteFormat::Prescription);
    let StructuredNote::Prescription(rx) = &result.note else {
        panic!("expected prescription");
    };
    assert_eq!(rx.patient_information.age, "62");
    assert_eq!(rx.medications[0].brand_name, "Norvasc");
    assert_eq!(rx.medications[0].quantity, "30");
    assert_eq!(rx.prescriber_information.signature, "[SIGNATURE]");
    assert!(result
        .note
        .to_markdown()
        .contains("1. Amlodipine (Norvasc) 5mg tablet — 1 tab once daily, #30, 2 refills, Take in the morning"));
}

#[test]
fn normalization_is_safe_across_threads() {
    let structurer = Arc::new(NoteStructurer::new());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let structurer = Arc::clone(&structurer);
            thread::spawn(move || {
                let payload = json!({"medications": [format!("Drug{i} (Brand{i}) {i}0mg")]});
                structurer.structure_payload(Uuid::new_v4(), &payload, None)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let result = handle.join().unwrap();
        let StructuredNote::Prescription(rx) = result.note else {
            panic!("expected prescription");
        };
        assert_eq!(rx.medications[0].generic_name, format!("Drug{i}"));
        assert_eq!(rx.medications[0].strength, format!("{i}0mg"));
    }
}
