//! Street-name heuristics: problem detection, sort keys and normalization.

use std::collections::HashMap;

/// Expand a trailing street-type abbreviation and fix all-lower-case names.
///
/// The two corrections are independent: abbreviation expansion looks at the
/// final whitespace token of a multi-token value, case normalization looks at
/// the original value. A lone token is never expanded.
///
/// ```
/// use std::collections::HashMap;
/// use osm_wrangle::rules::correct_street_name;
///
/// let abbreviations = HashMap::from([("St".to_string(), "Street".to_string())]);
/// assert_eq!(correct_street_name("Mabini St", &abbreviations), "Mabini Street");
/// assert_eq!(correct_street_name("old sauyo road", &abbreviations), "Old Sauyo Road");
/// ```
pub fn correct_street_name(value: &str, abbreviations: &HashMap<String, String>) -> String {
    let mut tokens: Vec<String> = value.split_whitespace().map(str::to_string).collect();

    let expanded = match tokens.last_mut() {
        Some(last) if value.split_whitespace().nth(1).is_some() => {
            match abbreviations.get(last.as_str()) {
                Some(full) => {
                    *last = full.clone();
                    true
                }
                None => false,
            }
        }
        _ => false,
    };

    let lower = is_lower_street(value);
    if lower {
        for token in tokens.iter_mut() {
            *token = capitalize(token);
        }
    }

    if expanded || lower {
        tokens.join(" ")
    } else {
        value.to_string()
    }
}

/// True if the value is only lower-case ASCII letters, spaces, underscores and periods.
pub fn is_lower_street(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_lowercase() || matches!(c, ' ' | '_' | '.'))
}

/// Upper-case the first character of a token.
fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Normalized form used to sort values and spot near-duplicates.
///
/// Street-like identifiers go through the alias table first; then periods and
/// spaces are stripped and the result is lower-cased.
pub fn sort_key(identifier: &str, value: &str, aliases: &HashMap<String, String>) -> String {
    let value = if identifier.contains("street") {
        aliases.get(value).map(String::as_str).unwrap_or(value)
    } else {
        value
    };

    value
        .chars()
        .filter(|c| *c != '.' && *c != ' ')
        .collect::<String>()
        .to_lowercase()
}
