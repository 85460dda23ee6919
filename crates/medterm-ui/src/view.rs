use colored::Colorize;
use medterm_types::{AnalysisResult, AnalysisState, TermPart, TermPartType};

use crate::state::ResultPanel;

const RULE: &str = "────────────────────────────────────────";

/// Terminal colouring, switched off for pipes and `NO_COLOR`
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn part(&self, text: &str, kind: TermPartType) -> String {
        if !self.enabled {
            return text.to_string();
        }

        match kind {
            TermPartType::Prefix => text.blue().bold().to_string(),
            TermPartType::Root => text.green().bold().to_string(),
            TermPartType::Suffix => text.truecolor(251, 146, 60).bold().to_string(),
            TermPartType::CombiningVowel => text.bright_black().to_string(),
            TermPartType::CombiningForm | TermPartType::Other => text.white().to_string(),
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn muted(&self, text: &str) -> String {
        if self.enabled {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn error(&self, text: &str) -> String {
        if self.enabled {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }
}

/// One card of the morphology breakdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphologyCard {
    pub text: String,
    pub kind: TermPartType,
    pub label: &'static str,
    pub meaning: String,
}

impl From<&TermPart> for MorphologyCard {
    fn from(part: &TermPart) -> Self {
        Self {
            text: part.text.clone(),
            kind: part.kind,
            label: label(part.kind),
            meaning: part.meaning.clone(),
        }
    }
}

pub fn label(kind: TermPartType) -> &'static str {
    match kind {
        TermPartType::Prefix => "Prefix (بادئة)",
        TermPartType::Root => "Root (جذر)",
        TermPartType::Suffix => "Suffix (لاحقة)",
        TermPartType::CombiningVowel => "Vowel",
        TermPartType::CombiningForm | TermPartType::Other => "Part",
    }
}

pub fn morphology_cards(result: &AnalysisResult) -> Vec<MorphologyCard> {
    result.parts.iter().map(MorphologyCard::from).collect()
}

/// The term rebuilt from its parts, e.g. `hyper-|glyc|-emia`
pub fn word_construction(result: &AnalysisResult, palette: &Palette) -> String {
    let separator = palette.muted("|");
    result
        .parts
        .iter()
        .map(|p| palette.part(&p.text, p.kind))
        .collect::<Vec<_>>()
        .join(separator.as_str())
}

pub fn render_result(panel: &ResultPanel, palette: &Palette) -> String {
    let result = &panel.result;
    let mut lines = Vec::new();

    // Term and translation
    lines.push(RULE.to_string());
    lines.push(palette.heading(&result.english_term));
    lines.push(format!("  ⟶ {}", palette.heading(&result.arabic_translation)));
    if let Some(note) = &result.translation_note {
        lines.push(format!("  {}", palette.muted(note)));
    }

    // Morphology
    lines.push(String::new());
    lines.push(palette.heading("التحليل اللغوي (Morphology)"));
    lines.push(format!("  {}", word_construction(result, palette)));
    for card in morphology_cards(result) {
        lines.push(format!(
            "  [{}] {}",
            palette.part(&card.text, card.kind),
            palette.muted(card.label)
        ));
        lines.push(format!("      {}", card.meaning));
    }

    // Academic explanation, collapsible
    lines.push(String::new());
    let marker = if panel.show_academic { "▲" } else { "▼" };
    lines.push(format!(
        "{} {} {}",
        marker,
        palette.heading("الشرح الطبي الأكاديمي"),
        palette.muted("لطلاب الطب والمختصين (:a)")
    ));
    if panel.show_academic {
        let academic = &result.academic_explanation;
        for (title, body) in [
            ("التعريف الطبي", &academic.definition),
            ("الآلية المرضية (Pathophysiology)", &academic.pathophysiology),
            ("السياق السريري", &academic.clinical_context),
        ] {
            lines.push(format!("  {}", palette.heading(title)));
            lines.push(format!("    {}", body));
        }
    }

    // Usage examples
    lines.push(String::new());
    lines.push(palette.heading("أمثلة الاستخدام (Clinical Usage)"));
    for example in &result.examples {
        lines.push(format!("  [{}]", example.context));
        lines.push(format!("    {}", example.sentence));
        lines.push(format!("    {}", palette.muted(&example.translation)));
    }
    lines.push(RULE.to_string());

    lines.join("\n")
}

/// Status line for states without a result panel
pub fn render_status(state: &AnalysisState, palette: &Palette) -> Option<String> {
    match state {
        AnalysisState::Idle | AnalysisState::Success(_) => None,
        AnalysisState::Loading { term } => Some(palette.muted(&format!("… {}", term))),
        AnalysisState::Error { message } => Some(palette.error(&format!("! {}", message))),
    }
}

pub fn help_text() -> &'static str {
    "\
أدخل المصطلح الطبي بالإنجليزية أو بنطقه العربي (مثال: Hyperglycemia أو هايبرجلايسميا)
  :a  show/hide the academic explanation
  :h  help
  :q  quit"
}
