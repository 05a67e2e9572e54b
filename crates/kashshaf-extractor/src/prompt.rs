//! Prompt templates for annotation extraction
//!
//! The instructional wording, the taxonomy and the output column labels are
//! data. A template can be loaded from TOML so the taxonomy changes without
//! code edits.

use crate::error::TemplateError;
use kashshaf_domain::FieldLabels;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Instructional template sent to the completion service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptTemplate {
    /// Opening role statement
    pub preamble: String,

    /// What to read and what to extract
    pub task: String,

    /// The taxonomy, rendered as a numbered list
    pub categories: Vec<String>,

    /// Introduces the required output format
    pub format_intro: String,

    /// Column labels in record order: locator, category, title, rationale
    pub labels: [String; 4],

    /// Final restriction on what the reply may contain
    pub closing_rule: String,

    /// Heading placed right before the source text
    pub text_heading: String,
}

impl PromptTemplate {
    /// Column labels as domain type
    pub fn field_labels(&self) -> FieldLabels {
        let [locator, category, title, rationale] = self.labels.clone();
        FieldLabels {
            locator,
            category,
            title,
            rationale,
        }
    }

    /// Validate the template
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.categories.is_empty() {
            return Err(TemplateError::Invalid("taxonomy has no categories".to_string()));
        }
        if let Some(idx) = self.categories.iter().position(|c| c.trim().is_empty()) {
            return Err(TemplateError::Invalid(format!("category #{} is blank", idx + 1)));
        }
        if self.field_labels().has_blank() {
            return Err(TemplateError::Invalid("column labels must not be blank".to_string()));
        }
        if self.labels.iter().any(|label| label.contains('|')) {
            return Err(TemplateError::Invalid(
                "column labels must not contain '|'".to_string(),
            ));
        }
        Ok(())
    }

    /// Load template from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, TemplateError> {
        let template: Self =
            toml::from_str(toml_str).map_err(|e| TemplateError::Parse(e.to_string()))?;
        template.validate()?;
        Ok(template)
    }

    /// Serialize template to TOML string
    pub fn to_toml(&self) -> Result<String, TemplateError> {
        toml::to_string_pretty(self).map_err(|e| TemplateError::Serialize(e.to_string()))
    }

    /// Load and validate a template file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }
}

impl Default for PromptTemplate {
    /// Scholarly-index taxonomy for the works of Ibn Taymiyya
    fn default() -> Self {
        Self {
            preamble: "أنت محلل نصوص شرعية.".to_string(),
            task: "اقرأ النص التالي من كتاب لشيخ الإسلام ابن تيمية، واستخرج المواضع التي تحتوي على كشاف علمي فقط، ضمن التصنيفات التالية:".to_string(),
            categories: [
                "تفسير الآيات",
                "شروح الأحاديث",
                "الأحكام الحديثية",
                "الإجماع",
                "الخلاف",
                "الترجيح",
                "القواعد والضوابط والفروق والتقاسيم",
                "المواقف الشخصية",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            format_intro: "📌 رجاءً أخرج النتائج فقط بصيغة جدول (سطر لكل كشاف) وبهذا التنسيق الدقيق:".to_string(),
            labels: FieldLabels::default().as_array().map(str::to_string),
            closing_rule: "لا تكتب أي شيء آخر، ولا تدرج سطرًا إلا إذا كان يحتوي كشافًا فعليًا.".to_string(),
            text_heading: "النص:".to_string(),
        }
    }
}

/// Builds the user prompt for one document
pub struct PromptBuilder<'a> {
    template: &'a PromptTemplate,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(template: &'a PromptTemplate) -> Self {
        Self { template }
    }

    /// Build the complete prompt around the source text
    pub fn build(&self, text: &str) -> String {
        let t = self.template;
        let mut prompt = String::new();

        // 1. Role and task
        prompt.push_str(&t.preamble);
        prompt.push_str("\n\n");
        prompt.push_str(&t.task);
        prompt.push_str("\n\n");

        // 2. Taxonomy
        for (idx, category) in t.categories.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", idx + 1, category));
        }
        prompt.push('\n');

        // 3. Output format
        prompt.push_str(&t.format_intro);
        prompt.push_str("\n\n");
        prompt.push_str(&t.field_labels().delimited());
        prompt.push_str("\n\n");
        prompt.push_str(&t.closing_rule);
        prompt.push_str("\n\n");

        // 4. The text to analyze
        prompt.push_str(&t.text_heading);
        prompt.push('\n');
        prompt.push_str(text);
        prompt.push('\n');

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_text() {
        let template = PromptTemplate::default();
        let prompt = PromptBuilder::new(&template).build("قال شيخ الإسلام");
        assert!(prompt.ends_with("النص:\nقال شيخ الإسلام\n"));
    }

    #[test]
    fn test_prompt_numbers_categories() {
        let template = PromptTemplate::default();
        let prompt = PromptBuilder::new(&template).build("x");
        assert!(prompt.contains("1. تفسير الآيات\n"));
        assert!(prompt.contains("8. المواقف الشخصية\n"));
        assert!(!prompt.contains("9. "));
    }

    #[test]
    fn test_prompt_includes_output_format() {
        let template = PromptTemplate::default();
        let prompt = PromptBuilder::new(&template).build("x");
        assert!(prompt.contains("مطلع الفقرة | نوع الكشاف | عنوان الكشاف | سبب التصنيف"));
        assert!(prompt.contains(&template.closing_rule));
    }

    #[test]
    fn test_custom_taxonomy() {
        let template = PromptTemplate {
            preamble: "You are an editor.".to_string(),
            task: "Find passages in these categories:".to_string(),
            categories: vec!["Quotation".to_string(), "Definition".to_string()],
            format_intro: "One line per finding:".to_string(),
            labels: [
                "Opening".to_string(),
                "Kind".to_string(),
                "Title".to_string(),
                "Reason".to_string(),
            ],
            closing_rule: "Nothing else.".to_string(),
            text_heading: "Text:".to_string(),
        };
        let prompt = PromptBuilder::new(&template).build("Body");

        assert!(prompt.starts_with("You are an editor.\n\n"));
        assert!(prompt.contains("2. Definition\n"));
        assert!(prompt.contains("Opening | Kind | Title | Reason"));
        assert!(!prompt.contains("تفسير"));
    }

    #[test]
    fn test_default_template_is_valid() {
        assert!(PromptTemplate::default().validate().is_ok());
        assert_eq!(PromptTemplate::default().categories.len(), 8);
    }

    #[test]
    fn test_empty_taxonomy_rejected() {
        let template = PromptTemplate {
            categories: Vec::new(),
            ..PromptTemplate::default()
        };
        assert!(matches!(template.validate(), Err(TemplateError::Invalid(_))));
    }

    #[test]
    fn test_label_with_delimiter_rejected() {
        let mut template = PromptTemplate::default();
        template.labels[2] = "a | b".to_string();
        assert!(template.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let template = PromptTemplate::default();
        let toml_str = template.to_toml().unwrap();
        let parsed = PromptTemplate::from_toml(&toml_str).unwrap();
        assert_eq!(template, parsed);
    }

    #[test]
    fn test_from_toml_rejects_missing_fields() {
        let result = PromptTemplate::from_toml("preamble = \"only this\"");
        assert!(matches!(result, Err(TemplateError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.toml");
        let mut template = PromptTemplate::default();
        template.categories.push("الفوائد".to_string());
        fs::write(&path, template.to_toml().unwrap()).unwrap();

        let loaded = PromptTemplate::load(&path).unwrap();
        assert_eq!(loaded.categories.len(), 9);
    }
}
