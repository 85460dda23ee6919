use medterm_types::TermPartType;
use serde_json::{Value, json};

pub const SYSTEM_INSTRUCTION: &str = "\
You are Dr. Aboudy, a specialized Medical Terminology AI.
Your task is to analyze medical terms provided in English or Arabic transliteration (e.g., \"هايبرجلايسميا\").
1. Recognize the term and convert to English if necessary.
2. Break it down morphologically (Prefix, Root, Suffix).
3. Provide an accurate Arabic medical translation.
4. Provide an academic explanation suitable for medical students (in Arabic).
5. Provide clinical usage examples.
Always output valid JSON. Use 'Tajawal' style Arabic (formal, medical).
";

pub fn user_prompt(term: &str) -> String {
    format!("Analyze this medical term: \"{term}\"")
}

/// Response schema in the OpenAPI subset accepted by `generateContent`
pub fn response_schema() -> Value {
    let part_types: Vec<&str> = TermPartType::ALL.iter().map(|t| t.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "englishTerm": {
                "type": "STRING",
                "description": "The corrected English medical term (e.g., Hyperglycemia)."
            },
            "parts": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "text": { "type": "STRING" },
                        "type": {
                            "type": "STRING",
                            "enum": part_types,
                            "description": "The morphological category of this part."
                        },
                        "meaning": {
                            "type": "STRING",
                            "description": "Meaning of this specific part in Arabic."
                        }
                    },
                    "required": ["text", "type", "meaning"]
                }
            },
            "arabicTranslation": {
                "type": "STRING",
                "description": "Accurate medical Arabic translation."
            },
            "translationNote": {
                "type": "STRING",
                "description": "Note on common vs academic usage."
            },
            "academicExplanation": {
                "type": "OBJECT",
                "properties": {
                    "definition": {
                        "type": "STRING",
                        "description": "Academic medical definition in Arabic."
                    },
                    "pathophysiology": {
                        "type": "STRING",
                        "description": "Brief pathophysiology in Arabic."
                    },
                    "clinicalContext": {
                        "type": "STRING",
                        "description": "When is this term used clinically?"
                    }
                },
                "required": ["definition", "pathophysiology", "clinicalContext"]
            },
            "examples": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "sentence": { "type": "STRING", "description": "English sentence." },
                        "translation": {
                            "type": "STRING",
                            "description": "Arabic translation of the sentence."
                        },
                        "context": {
                            "type": "STRING",
                            "description": "Context (e.g., Diagnosis, Lab Report)."
                        }
                    },
                    "required": ["sentence", "translation", "context"]
                }
            }
        },
        "required": [
            "englishTerm",
            "parts",
            "arabicTranslation",
            "academicExplanation",
            "examples"
        ]
    })
}
