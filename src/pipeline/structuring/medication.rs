// Medication parsing and normalization for prescription notes.
// Handles the three shapes models actually return: a bare string
// ("Aspirin (Aspilets) 80mg"), a partial object, or a complete record.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::coerce::{ensure_string, ensure_string_opt, field_string};
use super::types::MedicationRecord;

/// A trailing token counts as a strength when it carries a digit ("500mg", "5mL", "1g").
static RE_HAS_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]").unwrap());

/// Name components recovered from a free-text medication description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMedicationName {
    pub generic_name: String,
    pub brand_name: String,
    pub strength: String,
}

/// Split a free-text medication into generic name, brand name and strength.
///
/// `"Aspirin (Aspilets) 80mg"` yields generic `Aspirin`, brand `Aspilets`,
/// strength `80mg`. Without parentheses, a trailing token containing a digit
/// is taken as the strength. Anything else is kept whole as the generic name.
pub fn parse_complex_medication_string(input: &str) -> ParsedMedicationName {
    if let Some(parsed) = split_parenthesized(input) {
        return parsed;
    }

    if !(input.contains('(') && input.contains(')')) {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        if let [head @ .., last] = tokens.as_slice() {
            if !head.is_empty() && RE_HAS_DIGIT.is_match(last) {
                return ParsedMedicationName {
                    generic_name: head.join(" "),
                    brand_name: String::new(),
                    strength: (*last).to_string(),
                };
            }
        }
    }

    ParsedMedicationName {
        generic_name: input.trim().to_string(),
        ..Default::default()
    }
}

/// `generic (brand) strength`, valid only when the first `)` follows the first `(`.
fn split_parenthesized(input: &str) -> Option<ParsedMedicationName> {
    let open = input.find('(')?;
    let close = input.find(')')?;
    if close < open {
        return None;
    }

    Some(ParsedMedicationName {
        generic_name: input[..open].trim().to_string(),
        brand_name: input[open + 1..close].trim().to_string(),
        strength: input[close + 1..].trim().to_string(),
    })
}

/// A single medication entry as found in a model payload.
#[derive(Debug, Clone, Copy)]
pub enum RawMedication<'a> {
    Text(&'a str),
    Partial(&'a Map<String, Value>),
    /// Numbers, booleans, nulls and nested arrays: nothing to read fields from.
    /// Numbers and booleans keep their text as the generic name; the rest is empty.
    Other(&'a Value),
}

impl<'a> From<&'a Value> for RawMedication<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s),
            Value::Object(obj) => Self::Partial(obj),
            other => Self::Other(other),
        }
    }
}

impl RawMedication<'_> {
    /// Produce a fully populated record. Explicit fields always win over
    /// values recovered by parsing the name.
    pub fn normalize(self) -> MedicationRecord {
        match self {
            Self::Text(text) if text.contains('(') => {
                let parsed = parse_complex_medication_string(text);
                MedicationRecord {
                    generic_name: parsed.generic_name,
                    brand_name: parsed.brand_name,
                    strength: parsed.strength,
                    ..Default::default()
                }
            }
            Self::Text(text) => MedicationRecord {
                generic_name: text.to_string(),
                ..Default::default()
            },
            Self::Partial(obj) => normalize_partial(obj),
            Self::Other(value) if value.is_number() || value.is_boolean() => MedicationRecord {
                generic_name: ensure_string(value),
                ..Default::default()
            },
            Self::Other(_) => MedicationRecord::default(),
        }
    }
}

/// A key counts as explicitly given only when it holds something other than null or `""`.
fn explicit<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| match v {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    })
}

fn normalize_partial(obj: &Map<String, Value>) -> MedicationRecord {
    let explicit_brand = explicit(obj, "brandName");
    let explicit_strength = explicit(obj, "strength");

    // genericName wins over name whenever it carries a value.
    let mut generic_name =
        ensure_string_opt(explicit(obj, "genericName").or_else(|| explicit(obj, "name")));
    let mut brand_name = ensure_string_opt(explicit_brand);
    let mut strength = ensure_string_opt(explicit_strength);

    if explicit_brand.is_none() && generic_name.contains('(') && generic_name.contains(')') {
        let parsed = parse_complex_medication_string(&generic_name);
        generic_name = parsed.generic_name;
        brand_name = parsed.brand_name;
        if explicit_strength.is_none() {
            strength = parsed.strength;
        }
    }

    MedicationRecord {
        generic_name,
        brand_name,
        strength,
        dosage_form: field_string(obj, "dosageForm"),
        sig_instructions: field_string(obj, "sigInstructions"),
        quantity: field_string(obj, "quantity"),
        refills: field_string(obj, "refills"),
        special_instructions: field_string(obj, "specialInstructions"),
    }
}

/// Normalize one medication entry of unknown shape.
pub fn normalize_medication(value: &Value) -> MedicationRecord {
    RawMedication::from(value).normalize()
}

/// Normalize a medications array, preserving order and length.
/// Anything that is not an array yields an empty list.
pub fn normalize_medication_list(value: &Value) -> Vec<MedicationRecord> {
    match value {
        Value::Array(items) => items.iter().map(normalize_medication).collect(),
        _ => Vec::new(),
    }
}

/// Normalize the `medications` value of a prescription payload.
///
/// Unlike [`normalize_medication_list`], a lone object or a non-blank string
/// is treated as a single medication and wrapped into a one-element list.
pub fn normalize_medication_value(value: &Value) -> Vec<MedicationRecord> {
    match value {
        Value::Array(_) => normalize_medication_list(value),
        Value::Object(_) => vec![normalize_medication(value)],
        Value::String(s) if !s.trim().is_empty() => vec![normalize_medication(value)],
        _ => Vec::new(),
    }
}

impl MedicationRecord {
    /// One-line rendering, e.g. `Aspirin (Aspilets) 80mg tablet — 1 tab daily, #30, 2 refills`.
    pub fn display_line(&self) -> String {
        let mut head: Vec<String> = Vec::new();
        if !self.generic_name.is_empty() {
            head.push(self.generic_name.clone());
        }
        if !self.brand_name.is_empty() {
            head.push(format!("({})", self.brand_name));
        }
        for part in [&self.strength, &self.dosage_form] {
            if !part.is_empty() {
                head.push(part.clone());
            }
        }

        let mut tail: Vec<String> = Vec::new();
        if !self.sig_instructions.is_empty() {
            tail.push(self.sig_instructions.clone());
        }
        if !self.quantity.is_empty() {
            tail.push(format!("#{}", self.quantity));
        }
        if !self.refills.is_empty() {
            tail.push(format!("{} refills", self.refills));
        }
        if !self.special_instructions.is_empty() {
            tail.push(self.special_instructions.clone());
        }

        let head = head.join(" ");
        match (head.is_empty(), tail.is_empty()) {
            (_, true) => head,
            (true, false) => tail.join(", "),
            (false, false) => format!("{head} — {}", tail.join(", ")),
        }
    }
}
