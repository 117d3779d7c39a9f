use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Flag configuration: country → flag image URL
// ---------------------------------------------------------------------------

/// Country-to-flag-URL mapping used by the annotated map tooltips. Keys are
/// normalized (trimmed, lowercased) source-country names. Supplied at
/// initialization; a country without a mapping simply shows no flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagConfig {
    urls: BTreeMap<String, String>,
}

impl Default for FlagConfig {
    fn default() -> Self {
        let urls = [
            ("usa", "https://flagcdn.com/us.svg"),
            (
                "ussr",
                "https://upload.wikimedia.org/wikipedia/commons/a/a9/Flag_of_the_Soviet_Union.svg",
            ),
            ("uk", "https://flagcdn.com/gb.svg"),
            ("france", "https://flagcdn.com/fr.svg"),
            ("china", "https://flagcdn.com/cn.svg"),
            ("pakist", "https://flagcdn.com/pk.svg"),
            ("india", "https://flagcdn.com/in.svg"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        FlagConfig { urls }
    }
}

impl FlagConfig {
    /// Load an override mapping from a JSON object of country → URL.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).context("reading flag config")?;
        serde_json::from_str(&text).context("parsing flag config")
    }

    /// Flag URL for a country, after trim+lowercase normalization of the key.
    /// `None` means "no flag to display", never an error.
    pub fn url_for(&self, country: &str) -> Option<&str> {
        self.urls
            .get(&country.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Countries from `candidates` that have no mapping, normalized. Used to
    /// log a one-time warning per dataset load.
    pub fn unmapped<'a>(&self, candidates: impl Iterator<Item = &'a str>) -> Vec<String> {
        let mut missing: Vec<String> = candidates
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !self.urls.contains_key(c))
            .collect();
        missing.sort();
        missing.dedup();
        missing
    }
}
