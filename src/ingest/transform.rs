//! Extraction and flattening of scraped pick payloads.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{debug, instrument, warn};

use super::mapping::FieldMapping;
use crate::error::IngestError;
use crate::settlement::SettlementInput;

static NEXT_DATA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<script id="__NEXT_DATA__" type="application/json">(.*?)</script>"#)
        .expect("valid regex")
});

/// A flattened pick: target key to JSON value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PickRecord(Map<String, Value>);

impl PickRecord {
    /// Value for a target key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Game start time, if present and valid RFC 3339.
    pub fn scheduled_at(&self, mapping: &FieldMapping) -> Option<OffsetDateTime> {
        let raw = self.get(mapping.scheduled_time_field.as_str())?.as_str()?;
        OffsetDateTime::parse(raw, &Rfc3339).ok()
    }

    /// Convert to a settlement input. `index` is used for error reporting.
    pub fn settlement_input(
        &self,
        mapping: &FieldMapping,
        index: usize,
    ) -> Result<SettlementInput, IngestError> {
        let field = |key: &str| {
            self.get(key).ok_or_else(|| IngestError::MissingField {
                index,
                field: key.to_string(),
            })
        };
        let invalid = |key: &str, reason: &str| IngestError::InvalidField {
            index,
            field: key.to_string(),
            reason: reason.to_string(),
        };

        let status_key = mapping.status_field.as_str();
        let unit_key = mapping.unit_field.as_str();
        let odds_key = mapping.odds_field.as_str();

        let result_status = field(status_key)?
            .as_str()
            .ok_or_else(|| invalid(status_key, "expected a string"))?
            .to_string();
        let unit_size = decimal_value(field(unit_key)?)
            .ok_or_else(|| invalid(unit_key, "expected a number"))?;
        let odds = decimal_value(field(odds_key)?)
            .ok_or_else(|| invalid(odds_key, "expected a number"))?;

        Ok(SettlementInput {
            result_status,
            unit_size,
            odds,
        })
    }
}

/// Pull the embedded `__NEXT_DATA__` JSON out of a page.
#[instrument(skip(html), fields(len = html.len()))]
pub fn extract_embedded_json(html: &str) -> Result<Value, IngestError> {
    let captures = NEXT_DATA
        .captures(html)
        .ok_or(IngestError::EmbeddedJsonNotFound)?;
    let json = captures
        .get(1)
        .map(|m| m.as_str().trim())
        .ok_or(IngestError::EmbeddedJsonNotFound)?;

    Ok(serde_json::from_str(json)?)
}

/// Flatten the records found at `mapping.records_path`.
///
/// Values under a source path containing `odds` are truncated to integers
/// and values under a path containing `unit` are kept as numbers. Missing or
/// null fields are dropped; a record missing any required field is an error.
#[instrument(skip(json, mapping), fields(records_path = %mapping.records_path))]
pub fn transform_picks(json: &Value, mapping: &FieldMapping) -> Result<Vec<PickRecord>, IngestError> {
    let records = lookup(json, &mapping.records_path)
        .and_then(Value::as_array)
        .filter(|records| !records.is_empty())
        .ok_or_else(|| IngestError::MissingRecords(mapping.records_path.clone()))?;

    let mut picks = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let mut fields = Map::new();

        for rule in &mapping.fields {
            let Some(value) = lookup(record, &rule.source).filter(|v| !v.is_null()) else {
                continue;
            };
            fields.insert(rule.target.clone(), coerce(&rule.source, value));
        }

        for required in mapping.required_fields() {
            if !fields.contains_key(required) {
                warn!(index, field = required, "Pick missing required field");
                return Err(IngestError::MissingField {
                    index,
                    field: required.to_string(),
                });
            }
        }

        picks.push(PickRecord(fields));
    }

    debug!(count = picks.len(), "Picks transformed");
    Ok(picks)
}

/// Convert picks to settlement inputs, keeping only games at or after `since`.
///
/// Picks without a parseable start time are kept when no cutoff is given and
/// dropped otherwise.
pub fn settlement_inputs(
    picks: &[PickRecord],
    mapping: &FieldMapping,
    since: Option<OffsetDateTime>,
) -> Result<Vec<SettlementInput>, IngestError> {
    picks
        .iter()
        .enumerate()
        .filter(|(_, pick)| match since {
            Some(cutoff) => pick.scheduled_at(mapping).is_some_and(|at| at >= cutoff),
            None => true,
        })
        .map(|(index, pick)| pick.settlement_input(mapping, index))
        .collect()
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| current.get(key))
}

fn coerce(source: &str, value: &Value) -> Value {
    if source.contains("odds") {
        if let Some(n) = value.as_i64() {
            return Value::from(n);
        }
        if let Some(n) = value.as_f64() {
            return Value::from(n.trunc() as i64);
        }
    } else if source.contains("unit") {
        if let Some(n) = value.as_f64() {
            return Value::from(n);
        }
    }
    value.clone()
}

fn decimal_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            let raw = n.to_string();
            Decimal::from_str(&raw)
                .or_else(|_| Decimal::from_scientific(&raw))
                .ok()
        }
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}
