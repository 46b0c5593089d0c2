//! JSON schemas of the two startup documents.
//!
//! - `questions.json`: `{ "cute": [Question], "memory": [Question] }`
//! - `quiz_config.json`: names, sample counts, final-shuffle flag, image paths
//!
//! Unknown keys are ignored. Missing optional fields fall back to defaults.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, ValidationError};

/// Fallback recipient name.
pub const DEFAULT_RECIPIENT: &str = "my love";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// File name appended to `paths.questionImageBase`.
    pub image: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl Question {
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }
}

/// The two named question pools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBank {
    #[serde(default)]
    pub cute: Vec<Question>,
    #[serde(default)]
    pub memory: Vec<Question>,
}

impl QuestionBank {
    /// Collect structural problems without rejecting the bank.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut issues = Vec::new();
        for (pool, questions) in [("cute", &self.cute), ("memory", &self.memory)] {
            for (index, q) in questions.iter().enumerate() {
                if q.options.len() < 2 {
                    issues.push(ValidationError::TooFewOptions {
                        pool: pool.to_string(),
                        index,
                        count: q.options.len(),
                    });
                }
                if q.correct_index >= q.options.len() {
                    issues.push(ValidationError::CorrectIndexOutOfBounds {
                        pool: pool.to_string(),
                        index,
                        correct_index: q.correct_index,
                        len: q.options.len(),
                    });
                }
            }
        }
        issues
    }

    /// Fail on the first validation problem.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found by [`QuestionBank::validate`].
    pub fn ensure_valid(&self) -> Result<()> {
        match self.validate().into_iter().next() {
            Some(issue) => Err(issue.into()),
            None => Ok(()),
        }
    }
}

/// Serialized with the fallbacks applied, so `config show` and `config get`
/// print the names the quiz will actually use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Names {
    #[serde(default)]
    pub gf_name: Option<String>,
    #[serde(default)]
    pub your_name: Option<String>,
}

impl Names {
    /// Trimmed recipient name, "my love" when missing or blank.
    pub fn recipient(&self) -> String {
        match self.gf_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => DEFAULT_RECIPIENT.to_string(),
        }
    }

    /// Trimmed sender name, empty when missing.
    pub fn sender(&self) -> String {
        self.your_name
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string()
    }
}

impl Serialize for Names {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut names = serializer.serialize_struct("Names", 2)?;
        names.serialize_field("gfName", &self.recipient())?;
        names.serialize_field("yourName", &self.sender())?;
        names.end()
    }
}

/// How many questions to draw from each pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleCounts {
    #[serde(default, deserialize_with = "lenient_count")]
    pub cute: usize,
    #[serde(default, deserialize_with = "lenient_count")]
    pub memory: usize,
}

/// Any JSON number (or numeric string) as a count: fractions truncate,
/// negatives and non-numbers become 0.
fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let count = match &value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if count > 0.0 {
        Ok(count.trunc() as usize)
    } else {
        Ok(0)
    }
}

impl SampleCounts {
    pub fn total(&self) -> usize {
        self.cute.saturating_add(self.memory)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPaths {
    #[serde(default)]
    pub intro_image: String,
    /// Prefix concatenated with each question's `image`.
    #[serde(default)]
    pub question_image_base: String,
    #[serde(default)]
    pub score_image: String,
    #[serde(default)]
    pub propose_image: String,
}

impl AssetPaths {
    pub fn question_image(&self, question: &Question) -> String {
        format!("{}{}", self.question_image_base, question.image)
    }

    /// Images that never depend on the drawn questions.
    pub fn static_images(&self) -> [&str; 3] {
        [&self.intro_image, &self.score_image, &self.propose_image]
    }
}

/// Quiz configuration document. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizConfig {
    #[serde(default)]
    pub names: Names,
    #[serde(default)]
    pub sample: SampleCounts,
    #[serde(default)]
    pub shuffle_final_order: bool,
    #[serde(default)]
    pub paths: AssetPaths,
}

impl QuizConfig {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// Look up a value by its dot-separated document key, e.g. `names.gfName`.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Both startup documents, as delivered by the loader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Documents {
    pub bank: QuestionBank,
    pub config: QuizConfig,
}
