//! Word recompose settings

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_WORDS: [&str; 5] = ["MATIJA", "LAPIN", "CAROTTE", "ECUREUIL", "PLUMES"];

/// Settings of the "rebuild the word letter by letter" exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordRecomposeSettings {
    /// Upper-case words without whitespace, never empty
    pub words: Vec<String>,
}

impl Default for WordRecomposeSettings {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl WordRecomposeSettings {
    /// Accepts `{ "words": [...] }`, `{ "words": "one\ntwo" }` or a bare
    /// string (the settings textarea content)
    pub fn from_value(value: &Value) -> Self {
        let entries: Vec<String> = match value.get("words") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    _ => String::new(),
                })
                .collect(),
            Some(Value::String(s)) => split_entries(s),
            None => match value {
                Value::String(s) => split_entries(s),
                _ => Vec::new(),
            },
            Some(_) => Vec::new(),
        };
        Self { words: entries }.sanitize()
    }

    /// Parse the settings textarea (one word per line, commas and
    /// semicolons also separate)
    pub fn from_text(text: &str) -> Self {
        Self {
            words: split_entries(text),
        }
        .sanitize()
    }

    pub fn sanitize(self) -> Self {
        let mut words: Vec<String> = Vec::with_capacity(self.words.len());
        for entry in self.words {
            let word: String = entry
                .chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_uppercase)
                .collect();
            if !word.is_empty() && !words.contains(&word) {
                words.push(word);
            }
        }
        if words.is_empty() {
            return Self::default();
        }
        Self { words }
    }

    /// Text for the settings textarea
    pub fn to_text(&self) -> String {
        self.words.join("\n")
    }
}

fn split_entries(s: &str) -> Vec<String> {
    s.split(['\n', ',', ';']).map(str::to_string).collect()
}
