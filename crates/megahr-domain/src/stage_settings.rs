//! Known-key validation of the free-form stage settings document
//!
//! Settings are stored as arbitrary JSON. Keys the hiring pipeline understands are
//! checked for shape and range; any other key is kept as-is.

use serde_json::{Map, Value};

use crate::errors::FieldViolation;

pub const TIME_LIMIT_DAYS: std::ops::RangeInclusive<i64> = 1..=90;
pub const CRITERION_WEIGHT: std::ops::RangeInclusive<i64> = 1..=10;
pub const REMINDER_FREQUENCIES: &[&str] = &["DAILY", "WEEKLY"];

/// Validate a stage settings document, reporting every problem under `prefix`
pub fn validate_stage_settings(settings: &Value, prefix: &str) -> Vec<FieldViolation> {
    let mut out = Vec::new();
    let map = match settings {
        Value::Null => return out,
        Value::Object(map) => map,
        _ => {
            out.push(FieldViolation::new(prefix, "Expected an object"));
            return out;
        }
    };
    let at = |key: &str| format!("{prefix}.{key}");

    if let Some(value) = present(map, "timeLimit") {
        check_int_range(value, &at("timeLimit"), &TIME_LIMIT_DAYS, &mut out);
    }
    for key in ["autoProgress", "requireApproval"] {
        if let Some(value) = present(map, key) {
            if !value.is_boolean() {
                out.push(FieldViolation::new(at(key), "Expected boolean"));
            }
        }
    }
    if let Some(value) = present(map, "approvers") {
        match value.as_array() {
            Some(items) if items.iter().all(Value::is_string) => {}
            _ => out.push(FieldViolation::new(at("approvers"), "Expected an array of user ids")),
        }
    }
    if let Some(value) = present(map, "reminderSettings") {
        check_reminders(value, &at("reminderSettings"), &mut out);
    }
    if let Some(value) = present(map, "formTemplate") {
        if !value.is_string() {
            out.push(FieldViolation::new(at("formTemplate"), "Expected string"));
        }
    }
    if let Some(value) = present(map, "scoringCriteria") {
        check_criteria(value, &at("scoringCriteria"), &mut out);
    }
    if let Some(value) = present(map, "automationRules") {
        if !(value.is_object() || value.is_array()) {
            out.push(FieldViolation::new(
                at("automationRules"),
                "Expected an object or array",
            ));
        }
    }
    out
}

fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

fn check_int_range(
    value: &Value,
    path: &str,
    range: &std::ops::RangeInclusive<i64>,
    out: &mut Vec<FieldViolation>,
) {
    match value.as_i64() {
        Some(n) if range.contains(&n) => {}
        Some(n) if n < *range.start() => out.push(FieldViolation::new(
            path,
            format!("Number must be greater than or equal to {}", range.start()),
        )),
        Some(_) => out.push(FieldViolation::new(
            path,
            format!("Number must be less than or equal to {}", range.end()),
        )),
        None => out.push(FieldViolation::new(path, "Expected integer")),
    }
}

fn check_reminders(value: &Value, path: &str, out: &mut Vec<FieldViolation>) {
    let Some(map) = value.as_object() else {
        out.push(FieldViolation::new(path, "Expected an object"));
        return;
    };
    if let Some(enabled) = present(map, "enabled") {
        if !enabled.is_boolean() {
            out.push(FieldViolation::new(format!("{path}.enabled"), "Expected boolean"));
        }
    }
    if let Some(frequency) = present(map, "frequency") {
        match frequency.as_str() {
            Some(f) if REMINDER_FREQUENCIES.contains(&f) => {}
            _ => out.push(FieldViolation::new(
                format!("{path}.frequency"),
                "Expected 'DAILY' | 'WEEKLY'",
            )),
        }
    }
    if let Some(template) = present(map, "template") {
        if !template.is_string() {
            out.push(FieldViolation::new(format!("{path}.template"), "Expected string"));
        }
    }
}

fn check_criteria(value: &Value, path: &str, out: &mut Vec<FieldViolation>) {
    let Some(items) = value.as_array() else {
        out.push(FieldViolation::new(path, "Expected an array"));
        return;
    };
    for (i, item) in items.iter().enumerate() {
        let item_path = format!("{path}.{i}");
        let Some(map) = item.as_object() else {
            out.push(FieldViolation::new(item_path, "Expected an object"));
            continue;
        };
        match map.get("name").and_then(Value::as_str) {
            Some(name) if !name.trim().is_empty() => {}
            _ => out.push(FieldViolation::new(
                format!("{item_path}.name"),
                "Criterion name is required",
            )),
        }
        match map.get("weight") {
            Some(weight) => {
                check_int_range(weight, &format!("{item_path}.weight"), &CRITERION_WEIGHT, out)
            }
            None => out.push(FieldViolation::new(format!("{item_path}.weight"), "Required")),
        }
        if let Some(required) = present(map, "required") {
            if !required.is_boolean() {
                out.push(FieldViolation::new(
                    format!("{item_path}.required"),
                    "Expected boolean",
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_known_keys_in_range_and_unknown_keys() {
        let settings = json!({
            "timeLimit": 14,
            "autoProgress": true,
            "approvers": ["a", "b"],
            "reminderSettings": { "enabled": true, "frequency": "WEEKLY" },
            "scoringCriteria": [{ "name": "Communication", "weight": 10, "required": true }],
            "automationRules": { "onEnter": "email" },
            "customFlag": 42
        });
        assert!(validate_stage_settings(&settings, "settings").is_empty());
    }

    #[test]
    fn rejects_weight_above_ten() {
        let settings = json!({ "scoringCriteria": [{ "name": "Depth", "weight": 11 }] });
        let errors = validate_stage_settings(&settings, "settings");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "settings.scoringCriteria.0.weight");
    }

    #[test]
    fn rejects_time_limit_outside_window() {
        for days in [0, 91] {
            let errors = validate_stage_settings(&json!({ "timeLimit": days }), "s");
            assert_eq!(errors[0].path, "s.timeLimit");
        }
    }

    #[test]
    fn rejects_unknown_reminder_frequency() {
        let settings = json!({ "reminderSettings": { "enabled": true, "frequency": "HOURLY" } });
        let errors = validate_stage_settings(&settings, "settings");
        assert_eq!(errors[0].path, "settings.reminderSettings.frequency");
    }

    #[test]
    fn reminder_fields_are_optional() {
        for reminders in [
            json!({ "enabled": true }),
            json!({ "frequency": "DAILY" }),
            json!({}),
        ] {
            let settings = json!({ "reminderSettings": reminders });
            assert!(validate_stage_settings(&settings, "settings").is_empty());
        }

        let settings = json!({ "reminderSettings": { "enabled": "yes" } });
        let errors = validate_stage_settings(&settings, "settings");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "settings.reminderSettings.enabled");
    }

    #[test]
    fn null_settings_are_empty() {
        assert!(validate_stage_settings(&Value::Null, "settings").is_empty());
        assert_eq!(validate_stage_settings(&json!([1]), "settings").len(), 1);
    }
}
