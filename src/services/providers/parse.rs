//! Lenient parsing of model output.
//!
//! Models are asked for strict JSON but regularly wrap it in markdown fences
//! or surround it with prose. Anything that cannot be salvaged becomes an empty
//! list.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use crate::models::Recommendation;

fn bracket_list() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\]]+)\]").expect("valid regex"))
}

fn json_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```json\n([\s\S]*?)\n```").expect("valid regex"))
}

fn bare_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```\n([\s\S]*?)\n```").expect("valid regex"))
}

/// Reads a list of category names.
///
/// Accepts a JSON array of strings; otherwise falls back to the first
/// `[...]` span, split on commas with quotes stripped.
pub fn parse_category_list(text: &str) -> Vec<String> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Ok(_) => Vec::new(),
        Err(_) => bracket_list()
            .captures(text)
            .map(|caps| {
                caps[1]
                    .split(',')
                    .map(|item| item.trim().replace('"', ""))
                    .filter(|item| !item.is_empty())
                    .collect()
            })
            .unwrap_or_default(),
    }
}

/// Reads `{"recommendations": [...]}`, directly or from a fenced code block.
///
/// Individual records that do not deserialize are dropped.
pub fn parse_recommendations(text: &str) -> Vec<Recommendation> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return recommendations_from_value(value);
    }

    let fenced = json_fence()
        .captures(text)
        .or_else(|| bare_fence().captures(text))
        .map(|caps| caps[1].to_string());

    match fenced {
        Some(body) => serde_json::from_str::<Value>(&body)
            .map(recommendations_from_value)
            .unwrap_or_default(),
        None => Vec::new(),
    }
}

fn recommendations_from_value(value: Value) -> Vec<Recommendation> {
    let Some(items) = value.get("recommendations").and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<Recommendation>(item.clone()) {
            Ok(rec) => Some(rec),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed recommendation record");
                None
            }
        })
        .collect()
}
