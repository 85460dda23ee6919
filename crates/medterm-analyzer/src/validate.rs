use medterm_types::AnalysisResult;

use crate::AnalysisError;

/// Decode and check the model's text output. The text is untrusted: any
/// deviation from the schema fails the whole analysis.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, AnalysisError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }

    let result: AnalysisResult = serde_json::from_str(text)
        .map_err(|e| AnalysisError::SchemaViolation(format!("Failed to parse response: {}", e)))?;

    Ok(result.validate()?)
}

#[cfg(test)]
mod tests {
    use medterm_types::TermPartType;

    use super::*;

    const VALID: &str = r#"{
        "englishTerm": "Hyperglycemia",
        "parts": [
            {"text": "hyper-", "type": "prefix", "meaning": "فرط"},
            {"text": "glyc", "type": "root", "meaning": "سكر"},
            {"text": "-emia", "type": "suffix", "meaning": "حالة في الدم"}
        ],
        "arabicTranslation": "فرط سكر الدم",
        "translationNote": "يستخدم أيضاً: ارتفاع السكر",
        "academicExplanation": {
            "definition": "ارتفاع تركيز الجلوكوز في بلازما الدم",
            "pathophysiology": "نقص إفراز الأنسولين أو مقاومة الأنسجة له",
            "clinicalContext": "يستخدم في تشخيص ومتابعة داء السكري"
        },
        "examples": [
            {"sentence": "Fasting hyperglycemia was noted.", "translation": "لوحظ فرط سكر الدم الصيامي.", "context": "Lab Report"},
            {"sentence": "Hyperglycemia suggests diabetes.", "translation": "يشير فرط سكر الدم إلى السكري.", "context": "Diagnosis"}
        ]
    }"#;

    #[test]
    fn valid_response_is_accepted() {
        let result = parse_analysis(VALID).unwrap();

        assert_eq!(result.english_term, "Hyperglycemia");
        assert_eq!(result.arabic_translation, "فرط سكر الدم");
        assert_eq!(result.examples.len(), 2);
        assert_eq!(
            result.parts.iter().map(|p| p.kind).collect::<Vec<_>>(),
            [TermPartType::Prefix, TermPartType::Root, TermPartType::Suffix]
        );
    }

    #[test]
    fn blank_text_is_empty_response() {
        assert!(matches!(
            parse_analysis("  \n"),
            Err(AnalysisError::EmptyResponse)
        ));
    }

    #[test]
    fn malformed_json_is_schema_violation() {
        let err = parse_analysis("{\"englishTerm\": \"Hyper").unwrap_err();
        assert!(err.is_schema_violation());
    }

    #[test]
    fn missing_required_field_is_schema_violation() {
        let mut value: serde_json::Value = serde_json::from_str(VALID).unwrap();
        value.as_object_mut().unwrap().remove("academicExplanation");

        let err = parse_analysis(&value.to_string()).unwrap_err();
        assert!(err.is_schema_violation());
    }

    #[test]
    fn wrong_type_is_schema_violation() {
        let raw = VALID.replace(
            r#""examples": ["#,
            r#""examples": "none", "unused": ["#,
        );
        assert!(parse_analysis(&raw).unwrap_err().is_schema_violation());
    }

    #[test]
    fn blank_english_term_is_schema_violation() {
        let raw = VALID.replace(r#""englishTerm": "Hyperglycemia""#, r#""englishTerm": " ""#);
        assert!(parse_analysis(&raw).unwrap_err().is_schema_violation());
    }
}
