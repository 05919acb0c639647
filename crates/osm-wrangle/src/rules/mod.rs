//! Curated lookup tables and patterns for auditing and correcting tag values.
//!
//! The tables are plain data. [`RuleConfig`] holds them in serializable form
//! (with built-in defaults for the Quezon City extract) and can be loaded from
//! a JSON file; [`RuleSet`] is the compiled form handed to the content auditor
//! and the record transformer.
//!
//! ```json
//! {
//!   "street_abbreviations": { "St": "Street", "Ave.": "Avenue" },
//!   "postcodes": { "min": 1100, "max": 1200 },
//!   "home_city": "quezon city"
//! }
//! ```

mod postcode;
mod street;

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WrangleError};

pub use postcode::{valid_postcode, PostcodeCheck, PostcodeRange};
pub use street::{correct_street_name, is_lower_street, sort_key};

/// Serializable rule tables. Missing fields fall back to the built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Known street-name variants mapped to their canonical spelling.
    pub street_aliases: HashMap<String, String>,
    /// Street-type abbreviations mapped to the full word.
    pub street_abbreviations: HashMap<String, String>,
    /// Regex alternatives for words that don't belong in a street name.
    pub problem_words: Vec<String>,
    /// Characters that don't belong in a street name.
    pub problem_chars: String,
    /// Accepted postcode range.
    pub postcodes: PostcodeRange,
    /// City name (compared case-insensitively) kept by the QC-only filter.
    pub home_city: String,
}

impl RuleConfig {
    /// Load rule tables from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| WrangleError::io(path, e))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            WrangleError::Config(format!(
                "Failed to parse rules file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Compile into a [`RuleSet`].
    pub fn compile(self) -> Result<RuleSet> {
        if self.problem_words.is_empty() {
            return Err(WrangleError::Config(
                "problem_words must not be empty".to_string(),
            ));
        }

        let problem_words = Regex::new(&self.problem_words.join("|"))?;

        Ok(RuleSet {
            problem_words,
            config: self,
        })
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            street_aliases: pairs(DEFAULT_STREET_ALIASES),
            street_abbreviations: pairs(DEFAULT_STREET_ABBREVIATIONS),
            problem_words: DEFAULT_PROBLEM_WORDS
                .iter()
                .map(|w| (*w).to_string())
                .collect(),
            problem_chars: DEFAULT_PROBLEM_CHARS.to_string(),
            postcodes: PostcodeRange::default(),
            home_city: DEFAULT_HOME_CITY.to_string(),
        }
    }
}

/// Compiled rule tables.
#[derive(Debug, Clone)]
pub struct RuleSet {
    config: RuleConfig,
    problem_words: Regex,
}

impl RuleSet {
    /// Load and compile rule tables from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        RuleConfig::load(path)?.compile()
    }

    /// The underlying tables.
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Street alias table.
    pub fn street_aliases(&self) -> &HashMap<String, String> {
        &self.config.street_aliases
    }

    /// Street abbreviation table.
    pub fn street_abbreviations(&self) -> &HashMap<String, String> {
        &self.config.street_abbreviations
    }

    /// Accepted postcode range.
    pub fn postcodes(&self) -> PostcodeRange {
        self.config.postcodes
    }

    /// True if the value contains a word that doesn't belong in a street name.
    pub fn has_problem_words(&self, value: &str) -> bool {
        self.problem_words.is_match(value)
    }

    /// True if the value contains a character that doesn't belong in a street name.
    pub fn has_problem_chars(&self, value: &str) -> bool {
        value.chars().any(|c| self.config.problem_chars.contains(c))
    }

    /// True if `city` names the home city.
    pub fn is_home_city(&self, city: &str) -> bool {
        city.to_lowercase() == self.config.home_city.to_lowercase()
    }

    /// Normalized sort/duplicate key for a value.
    pub fn sort_key(&self, identifier: &str, value: &str) -> String {
        sort_key(identifier, value, &self.config.street_aliases)
    }

    /// Apply street-name normalization.
    pub fn correct_street_name(&self, value: &str) -> String {
        correct_street_name(value, &self.config.street_abbreviations)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleConfig::default()
            .compile()
            .expect("built-in rule tables compile")
    }
}

fn pairs(table: &[(&str, &str)]) -> HashMap<String, String> {
    table
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

const DEFAULT_HOME_CITY: &str = "quezon city";

const DEFAULT_PROBLEM_CHARS: &str = "=+/&<>;'\"?%#$@,";

const DEFAULT_PROBLEM_WORDS: &[&str] = &[
    "[Cc]or(ner)?",
    "Along",
    "Infront",
    "Intersection",
    "[Ss]ubdivision",
    "Intramuros",
    "Mall",
    "Department",
];

const DEFAULT_STREET_ABBREVIATIONS: &[(&str, &str)] = &[
    ("St", "Street"),
    ("St.", "Street"),
    ("st.", "Street"),
    ("st", "Street"),
    ("street", "Street"),
    ("Ave", "Avenue"),
    ("Ave.", "Avenue"),
    ("AVenue", "Avenue"),
    ("Hiway", "Highway"),
    ("Hoighway", "Highway"),
    ("highway", "Highway"),
    ("Ext", "Extension"),
    ("Ext.", "Extension"),
    ("ext", "Extension"),
    ("road", "Road"),
    ("Dr", "Drive"),
    ("dr", "Drive"),
    ("rd", "Road"),
];

const DEFAULT_STREET_ALIASES: &[(&str, &str)] = &[
    ("Arañeta AVenue", "Araneta Avenue"),
    ("C.M. Recto Ave.", "Claro M. Recto Ave."),
    ("Jose Laurel Street", "Jose P. Laurel"),
    ("Kabisang Imo", "Kabesang Imo"),
    ("L. SUmulong Circle", "Sen. L. Sumulong Memorial Circle"),
    ("Sen L Sumulong Mem Circle", "Sen. L. Sumulong Memorial Circle"),
    (
        "Sen L Sumulong Mem Circle cor M L Quezon St",
        "Sen. L. Sumulong Memorial Circle",
    ),
    ("F Dela Rosa", "F. B. dela Rosa"),
    ("Luna Mercias", "Luna Mencias"),
    ("Mac Arthur Hiway", "Mac Arthur Highway"),
    ("Marcos Hoighway", "Marcos Highway"),
    ("Nabigla Secod", "Nabigla Seconary Link"),
    ("Orrigas Ave Ext", "Ortigas Avenue Extension"),
    ("Ortigas Ave. Ext.", "Ortigas Avenue Extension"),
    ("Quirina Hiway", "Quirino Highway"),
    ("Quirino Hiway", "Quirino Highway"),
    ("Quirno Highway", "Quirino Highway"),
    ("Santola Road", "Santolan Road"),
    ("Sen. Jose Vera", "Sen. Jose O. Vera"),
    (
        "Sen. Lorenzo Sumulong Memorial Circle",
        "Sen. L. Sumulong Memorial Circle",
    ),
    ("Sumulong Circle", "Sen. L. Sumulong Memorial Circle"),
    ("T.M. Kalaw", "Teodoro M. Kalaw Sr. Avenue"),
    ("Talitip Road", "Taliptip Road"),
    ("United Avenue", "United Nations Avenue"),
    ("Tomast Morato", "Tomas Morato"),
    ("España", "Espana"),
    ("España Boulevard", "Espana"),
    ("Epifanio de los Santos Avenue", "EDSA"),
    ("Epifanio Delos Santos Avenue", "EDSA"),
    ("Epifanio de Los Santos Avenue", "EDSA"),
];
