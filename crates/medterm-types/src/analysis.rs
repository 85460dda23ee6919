use serde::{Deserialize, Serialize};

/// Morphological category of a single term part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermPartType {
    Prefix,
    Root,
    Suffix,
    CombiningVowel,
    CombiningForm,
    Other,
}

impl TermPartType {
    pub const ALL: [TermPartType; 6] = [
        TermPartType::Prefix,
        TermPartType::Root,
        TermPartType::Suffix,
        TermPartType::CombiningVowel,
        TermPartType::CombiningForm,
        TermPartType::Other,
    ];

    /// Wire name, as it appears in the response schema
    pub fn as_str(&self) -> &'static str {
        match self {
            TermPartType::Prefix => "prefix",
            TermPartType::Root => "root",
            TermPartType::Suffix => "suffix",
            TermPartType::CombiningVowel => "combining_vowel",
            TermPartType::CombiningForm => "combining_form",
            TermPartType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermPart {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: TermPartType,
    /// Meaning of the part, in Arabic
    pub meaning: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicExplanation {
    pub definition: String,
    pub pathophysiology: String,
    pub clinical_context: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageExample {
    /// English sentence
    pub sentence: String,
    /// Arabic rendering of the sentence
    pub translation: String,
    /// Where the sentence would appear (diagnosis, lab report, ...)
    pub context: String,
}

/// Structured analysis of one medical term, as produced by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub english_term: String,
    /// Left-to-right morpheme decomposition
    pub parts: Vec<TermPart>,
    pub arabic_translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation_note: Option<String>,
    pub academic_explanation: AcademicExplanation,
    pub examples: Vec<UsageExample>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("field `{0}` is blank")]
    BlankField(&'static str),

    #[error("part {index} has blank text")]
    BlankPart { index: usize },
}

impl AnalysisResult {
    /// Checks the invariants serde cannot express and normalises optional
    /// fields. Consumes the result so an unchecked value is never kept.
    pub fn validate(mut self) -> Result<Self, ValidationError> {
        if self.english_term.trim().is_empty() {
            return Err(ValidationError::BlankField("englishTerm"));
        }

        if self.arabic_translation.trim().is_empty() {
            return Err(ValidationError::BlankField("arabicTranslation"));
        }

        if let Some(index) = self.parts.iter().position(|p| p.text.trim().is_empty()) {
            return Err(ValidationError::BlankPart { index });
        }

        if self
            .translation_note
            .as_ref()
            .is_some_and(|note| note.trim().is_empty())
        {
            self.translation_note = None;
        }

        Ok(self)
    }

    /// The term as the morphology view shows it, parts joined in order
    pub fn joined_parts(&self, separator: &str) -> String {
        self.parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }
}
