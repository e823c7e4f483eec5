//! Profile input and normalization.
//!
//! Callers hand over a loosely-shaped [`RawProfile`] (or a raw JSON value).
//! [`normalize`] turns it into the canonical [`UserProfile`] that every
//! planning component works from:
//! - legacy field names (`medicalConditions`, `yogaPurpose`) are mapped onto canonical ones
//! - the `"none"` condition sentinel becomes the empty set
//! - absent or malformed fields fall back to documented defaults

use crate::types::{FitnessLevel, UserProfile};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Age assumed when none (or zero) is supplied
pub const DEFAULT_AGE: u32 = 30;

/// Condition value meaning "no conditions"
const NONE_SENTINEL: &str = "none";

/// Profile as supplied by a caller, before normalization
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<String>>,

    #[serde(default, alias = "medicalConditions", skip_serializing_if = "Option::is_none")]
    pub medical_conditions: Option<Vec<String>>,

    #[serde(default, alias = "fitnessLevel", skip_serializing_if = "Option::is_none")]
    pub fitness_level: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<String>>,

    #[serde(
        default,
        alias = "yogaPurpose",
        alias = "yoga_purpose",
        skip_serializing_if = "Option::is_none"
    )]
    pub purpose: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injuries: Option<String>,
}

impl RawProfile {
    /// Read a profile from an untyped JSON value.
    ///
    /// `null` is treated as an empty record. Any other non-object value is the
    /// one input the planner refuses. Individual fields of the wrong type are
    /// dropped with a warning so their defaults apply.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = match value {
            Value::Object(map) => map,
            Value::Null => return Ok(Self::default()),
            other => {
                return Err(Error::InvalidProfile(format!(
                    "expected a record, got {}",
                    json_kind(other)
                )))
            }
        };

        Ok(Self {
            age: lookup(map, &["age"]).and_then(|v| lenient_age(v)),
            conditions: lookup(map, &["conditions"]).and_then(|v| lenient_list("conditions", v)),
            medical_conditions: lookup(map, &["medicalConditions", "medical_conditions"])
                .and_then(|v| lenient_list("medical_conditions", v)),
            fitness_level: lookup(map, &["fitness_level", "fitnessLevel"])
                .and_then(|v| lenient_string("fitness_level", v)),
            goals: lookup(map, &["goals"]).and_then(|v| lenient_list("goals", v)),
            purpose: lookup(map, &["purpose", "yogaPurpose", "yoga_purpose"])
                .and_then(|v| lenient_string("purpose", v)),
            injuries: lookup(map, &["injuries"]).and_then(lenient_injuries),
        }
        .into_canonical())
    }

    /// Move legacy fields into their canonical slots.
    ///
    /// `medical_conditions` fills `conditions` when that is absent, and a
    /// lone `purpose` becomes the single goal. `normalize` gives the same
    /// profile before and after.
    pub fn into_canonical(mut self) -> Self {
        let legacy = self.medical_conditions.take();
        if self.conditions.is_none() {
            self.conditions = legacy;
        }

        let purpose = self.purpose.take();
        let no_goals = self.goals.iter().flatten().all(|g| normalize_tag(g).is_none());
        if no_goals {
            if let Some(purpose) = purpose {
                self.goals = Some(vec![purpose]);
            }
        }

        self
    }

    /// Apply a partial update: every field present in `update` replaces ours.
    ///
    /// Both sides are made canonical first, so a legacy `medicalConditions`
    /// or `yogaPurpose` update replaces stored `conditions` or `goals`.
    pub fn merge(&mut self, update: RawProfile) {
        let update = update.into_canonical();
        *self = std::mem::take(self).into_canonical();

        if update.age.is_some() {
            self.age = update.age;
        }
        if update.conditions.is_some() {
            self.conditions = update.conditions;
        }
        if update.fitness_level.is_some() {
            self.fitness_level = update.fitness_level;
        }
        if update.goals.is_some() {
            self.goals = update.goals;
        }
        if update.injuries.is_some() {
            self.injuries = update.injuries;
        }
    }
}

impl From<&UserProfile> for RawProfile {
    fn from(profile: &UserProfile) -> Self {
        Self {
            age: Some(profile.age),
            conditions: Some(profile.conditions.iter().cloned().collect()),
            medical_conditions: None,
            fitness_level: Some(profile.fitness_level.as_str().to_string()),
            goals: Some(profile.goals.clone()),
            purpose: None,
            injuries: profile.injuries.clone(),
        }
    }
}

/// Normalize a raw profile into the canonical form.
///
/// Normalizing an already-normalized profile yields the same profile.
pub fn normalize(raw: &RawProfile) -> UserProfile {
    let age = raw.age.filter(|age| *age > 0).unwrap_or(DEFAULT_AGE);

    // The canonical field wins even when it is present but empty
    let conditions: BTreeSet<String> = raw
        .conditions
        .as_ref()
        .or(raw.medical_conditions.as_ref())
        .map(|list| {
            list.iter()
                .filter_map(|c| normalize_tag(c))
                .filter(|c| c != NONE_SENTINEL)
                .collect()
        })
        .unwrap_or_default();

    // Duplicates are kept: focus cycles through the list as given
    let mut goals: Vec<String> = raw
        .goals
        .iter()
        .flatten()
        .filter_map(|g| normalize_tag(g))
        .collect();
    if goals.is_empty() {
        if let Some(purpose) = raw.purpose.as_deref().and_then(normalize_tag) {
            goals.push(purpose);
        }
    }

    let fitness_level = raw
        .fitness_level
        .as_deref()
        .map(FitnessLevel::parse)
        .unwrap_or_default();

    let injuries = raw
        .injuries
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let profile = UserProfile {
        age,
        conditions,
        fitness_level,
        goals,
        injuries,
    };

    tracing::debug!(
        "Normalized profile: age {}, {} conditions, fitness {}, goals {:?}",
        profile.age,
        profile.conditions.len(),
        profile.fitness_level,
        profile.goals
    );

    profile
}

/// Lowercase snake_case tag, or None if blank
fn normalize_tag(raw: &str) -> Option<String> {
    let tag = raw
        .trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    if tag.is_empty() {
        None
    } else {
        Some(tag)
    }
}

fn lookup<'a>(map: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| map.get(*name))
        .find(|value| !value.is_null())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn lenient_age(value: &Value) -> Option<u32> {
    let age = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match age {
        Some(age) if age.is_finite() && age >= 0.0 && age <= u32::MAX as f64 => {
            Some(age.round() as u32)
        }
        _ => {
            tracing::warn!("Ignoring malformed age {}", value);
            None
        }
    }
}

fn lenient_string(field: &str, value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        other => {
            tracing::warn!("Ignoring {} field: expected a string, got {}", field, json_kind(other));
            None
        }
    }
}

/// Accepts an array of strings or a single comma-separated string
fn lenient_list(field: &str, value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
        ),
        Value::String(s) => Some(s.split(',').map(|part| part.trim().to_string()).collect()),
        other => {
            tracing::warn!("Ignoring {} field: expected a list, got {}", field, json_kind(other));
            None
        }
    }
}

fn lenient_injuries(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let notes: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if notes.is_empty() {
                None
            } else {
                Some(notes.join(", "))
            }
        }
        Value::Bool(true) => Some("unspecified injury".to_string()),
        Value::Bool(false) => None,
        other => {
            tracing::warn!("Ignoring injuries field: got {}", json_kind(other));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_for_empty_profile() {
        let profile = normalize(&RawProfile::default());
        assert_eq!(profile.age, DEFAULT_AGE);
        assert!(profile.conditions.is_empty());
        assert_eq!(profile.fitness_level, FitnessLevel::Beginner);
        assert!(profile.goals.is_empty());
        assert!(profile.injuries.is_none());
    }

    #[test]
    fn test_zero_age_uses_default() {
        let profile = normalize(&RawProfile {
            age: Some(0),
            ..Default::default()
        });
        assert_eq!(profile.age, DEFAULT_AGE);
    }

    #[test]
    fn test_medical_conditions_alias() {
        let raw = RawProfile {
            medical_conditions: Some(vec!["Hypertension".into()]),
            ..Default::default()
        };
        let profile = normalize(&raw);
        assert!(profile.has_condition("hypertension"));
    }

    #[test]
    fn test_canonical_conditions_take_precedence() {
        let raw = RawProfile {
            conditions: Some(vec!["asthma".into()]),
            medical_conditions: Some(vec!["arthritis".into()]),
            ..Default::default()
        };
        let profile = normalize(&raw);
        assert!(profile.has_condition("asthma"));
        assert!(!profile.has_condition("arthritis"));
    }

    #[test]
    fn test_none_sentinel_stripped() {
        let raw = RawProfile {
            conditions: Some(vec!["none".into(), "arthritis".into(), "".into()]),
            ..Default::default()
        };
        let profile = normalize(&raw);
        assert_eq!(profile.conditions.len(), 1);
        assert!(profile.has_condition("arthritis"));

        let only_none = normalize(&RawProfile {
            conditions: Some(vec!["None".into()]),
            ..Default::default()
        });
        assert!(only_none.conditions.is_empty());
    }

    #[test]
    fn test_purpose_becomes_single_goal() {
        let raw = RawProfile {
            purpose: Some("Stress Relief".into()),
            ..Default::default()
        };
        assert_eq!(normalize(&raw).goals, vec!["stress_relief".to_string()]);

        let with_goals = RawProfile {
            goals: Some(vec!["strength".into()]),
            purpose: Some("flexibility".into()),
            ..Default::default()
        };
        assert_eq!(normalize(&with_goals).goals, vec!["strength".to_string()]);
    }

    #[test]
    fn test_goals_keep_order_and_duplicates() {
        let raw = RawProfile {
            goals: Some(vec![
                "strength".into(),
                "Strength".into(),
                "balance".into(),
            ]),
            ..Default::default()
        };
        assert_eq!(normalize(&raw).goals, vec!["strength", "strength", "balance"]);
    }

    #[test]
    fn test_legacy_update_replaces_stored_fields() {
        let mut stored = RawProfile {
            conditions: Some(vec!["asthma".into()]),
            goals: Some(vec!["strength".into()]),
            ..Default::default()
        };
        let update = RawProfile::from_value(&json!({
            "medicalConditions": ["hypertension"],
            "yogaPurpose": "stress_relief"
        }))
        .unwrap();
        stored.merge(update);

        let profile = normalize(&stored);
        assert!(profile.has_condition("hypertension"));
        assert!(!profile.has_condition("asthma"));
        assert_eq!(profile.goals, vec!["stress_relief"]);
    }

    #[test]
    fn test_legacy_update_through_serde_fields() {
        let mut stored = RawProfile {
            conditions: Some(vec!["arthritis".into()]),
            ..Default::default()
        };
        stored.merge(RawProfile {
            medical_conditions: Some(vec!["back_pain".into()]),
            ..Default::default()
        });

        assert_eq!(stored.conditions, Some(vec!["back_pain".to_string()]));
        assert_eq!(stored.medical_conditions, None);
    }

    #[test]
    fn test_stored_legacy_fields_survive_unrelated_update() {
        let mut stored = RawProfile {
            medical_conditions: Some(vec!["asthma".into()]),
            purpose: Some("flexibility".into()),
            ..Default::default()
        };
        stored.merge(RawProfile {
            age: Some(44),
            ..Default::default()
        });

        let profile = normalize(&stored);
        assert_eq!(profile.age, 44);
        assert!(profile.has_condition("asthma"));
        assert_eq!(profile.goals, vec!["flexibility"]);
    }

    #[test]
    fn test_canonical_form_normalizes_the_same() {
        let cases = [
            RawProfile {
                medical_conditions: Some(vec!["None".into(), "Asthma".into()]),
                purpose: Some("Better Sleep".into()),
                ..Default::default()
            },
            RawProfile {
                conditions: Some(vec![]),
                medical_conditions: Some(vec!["arthritis".into()]),
                goals: Some(vec!["  ".into()]),
                purpose: Some("balance".into()),
                ..Default::default()
            },
            RawProfile {
                goals: Some(vec!["strength".into()]),
                purpose: Some("relaxation".into()),
                ..Default::default()
            },
        ];
        for raw in cases {
            assert_eq!(normalize(&raw), normalize(&raw.clone().into_canonical()));
        }
    }

    #[test]
    fn test_fitness_level_case_insensitive() {
        let raw = RawProfile {
            fitness_level: Some("ATHLETE".into()),
            ..Default::default()
        };
        assert_eq!(normalize(&raw).fitness_level, FitnessLevel::Athlete);

        let unknown = RawProfile {
            fitness_level: Some("Elite".into()),
            ..Default::default()
        };
        assert_eq!(
            normalize(&unknown).fitness_level,
            FitnessLevel::Other("elite".into())
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = RawProfile {
            age: Some(64),
            medical_conditions: Some(vec!["none".into(), "Back Pain".into()]),
            fitness_level: Some("Moderate".into()),
            purpose: Some("better-sleep".into()),
            injuries: Some("  left knee ".into()),
            ..Default::default()
        };
        let once = normalize(&raw);
        let twice = normalize(&RawProfile::from(&once));
        assert_eq!(once, twice);
        assert!(once.has_condition("back_pain"));
        assert_eq!(once.injuries.as_deref(), Some("left knee"));
    }

    #[test]
    fn test_from_value_legacy_fields() {
        let value = json!({
            "age": "72",
            "medicalConditions": ["hypertension"],
            "yogaPurpose": "relaxation",
            "fitnessLevel": "low"
        });
        let profile = normalize(&RawProfile::from_value(&value).unwrap());
        assert_eq!(profile.age, 72);
        assert!(profile.has_condition("hypertension"));
        assert_eq!(profile.goals, vec!["relaxation"]);
        assert_eq!(profile.fitness_level, FitnessLevel::Low);
    }

    #[test]
    fn test_from_value_drops_malformed_fields() {
        let value = json!({
            "age": {"years": 40},
            "conditions": 12,
            "goals": ["strength", 7],
            "fitness_level": false
        });
        let raw = RawProfile::from_value(&value).unwrap();
        assert_eq!(raw.age, None);
        assert_eq!(raw.conditions, None);
        assert_eq!(raw.goals, Some(vec!["strength".to_string()]));
        assert_eq!(raw.fitness_level, None);
    }

    #[test]
    fn test_from_value_null_is_empty_record() {
        let raw = RawProfile::from_value(&Value::Null).unwrap();
        assert_eq!(raw, RawProfile::default());
    }

    #[test]
    fn test_from_value_rejects_non_record() {
        for value in [json!(42), json!("beginner"), json!([1, 2, 3]), json!(true)] {
            let result = RawProfile::from_value(&value);
            assert!(matches!(result, Err(Error::InvalidProfile(_))), "{}", value);
        }
    }

    #[test]
    fn test_injuries_variants() {
        let list = RawProfile::from_value(&json!({"injuries": ["wrist", "ankle"]})).unwrap();
        assert_eq!(list.injuries.as_deref(), Some("wrist, ankle"));

        let flag = RawProfile::from_value(&json!({"injuries": false})).unwrap();
        assert_eq!(flag.injuries, None);
    }

    #[test]
    fn test_merge_keeps_existing_fields() {
        let mut stored = RawProfile {
            age: Some(45),
            goals: Some(vec!["balance".into()]),
            ..Default::default()
        };
        stored.merge(RawProfile {
            fitness_level: Some("high".into()),
            ..Default::default()
        });
        assert_eq!(stored.age, Some(45));
        assert_eq!(stored.goals, Some(vec!["balance".to_string()]));
        assert_eq!(stored.fitness_level.as_deref(), Some("high"));
    }
}
