//! Annotation records and their column labels

/// Number of fields in an [`AnnotationRecord`]
pub const FIELD_COUNT: usize = 4;

/// One scholarly annotation identified by the model
///
/// Records carry no identity beyond their position in the reply; callers
/// keep them in a `Vec` in reply order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct AnnotationRecord {
    /// Opening words of the excerpt the annotation refers to
    pub locator: String,

    /// Annotation category (free text, not checked against the taxonomy)
    pub category: String,

    /// Short title for the annotation
    pub title: String,

    /// Why the excerpt was classified under `category`
    pub rationale: String,
}

impl AnnotationRecord {
    /// Create a record from its four fields
    pub fn new(
        locator: impl Into<String>,
        category: impl Into<String>,
        title: impl Into<String>,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            locator: locator.into(),
            category: category.into(),
            title: title.into(),
            rationale: rationale.into(),
        }
    }

    /// Build a record from the first four segments of a split line
    ///
    /// Segments past the fourth are ignored. Returns `None` when fewer than
    /// four segments are supplied.
    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Option<Self> {
        match segments {
            [locator, category, title, rationale, ..] => Some(Self::new(
                locator.as_ref(),
                category.as_ref(),
                title.as_ref(),
                rationale.as_ref(),
            )),
            _ => None,
        }
    }

    /// Fields in column order
    pub fn fields(&self) -> [&str; FIELD_COUNT] {
        [&self.locator, &self.category, &self.title, &self.rationale]
    }
}

/// Column labels for the four record fields
///
/// The same labels appear in the prompt's output-format line and in the
/// spreadsheet header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLabels {
    /// Label for [`AnnotationRecord::locator`]
    pub locator: String,
    /// Label for [`AnnotationRecord::category`]
    pub category: String,
    /// Label for [`AnnotationRecord::title`]
    pub title: String,
    /// Label for [`AnnotationRecord::rationale`]
    pub rationale: String,
}

impl FieldLabels {
    /// Labels in column order
    pub fn as_array(&self) -> [&str; FIELD_COUNT] {
        [&self.locator, &self.category, &self.title, &self.rationale]
    }

    /// Render the labels as one `|`-delimited line
    pub fn delimited(&self) -> String {
        self.as_array().join(" | ")
    }

    /// True if any label is blank
    pub fn has_blank(&self) -> bool {
        self.as_array().iter().any(|label| label.trim().is_empty())
    }
}

impl Default for FieldLabels {
    fn default() -> Self {
        Self {
            locator: "مطلع الفقرة".to_string(),
            category: "نوع الكشاف".to_string(),
            title: "عنوان الكشاف".to_string(),
            rationale: "سبب التصنيف".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_segments_exact() {
        let record = AnnotationRecord::from_segments(&["a", "b", "c", "d"]).unwrap();
        assert_eq!(record, AnnotationRecord::new("a", "b", "c", "d"));
    }

    #[test]
    fn test_from_segments_ignores_extras() {
        let record = AnnotationRecord::from_segments(&["a", "b", "c", "d", "e", "f"]).unwrap();
        assert_eq!(record.rationale, "d");
    }

    #[test]
    fn test_from_segments_too_short() {
        assert!(AnnotationRecord::from_segments(&["a", "b", "c"]).is_none());
        assert!(AnnotationRecord::from_segments::<&str>(&[]).is_none());
    }

    #[test]
    fn test_fields_order() {
        let record = AnnotationRecord::new("loc", "cat", "title", "why");
        assert_eq!(record.fields(), ["loc", "cat", "title", "why"]);
    }

    #[test]
    fn test_default_labels() {
        let labels = FieldLabels::default();
        assert_eq!(
            labels.delimited(),
            "مطلع الفقرة | نوع الكشاف | عنوان الكشاف | سبب التصنيف"
        );
        assert!(!labels.has_blank());
    }

    #[test]
    fn test_blank_label_detected() {
        let labels = FieldLabels {
            title: "  ".to_string(),
            ..FieldLabels::default()
        };
        assert!(labels.has_blank());
    }
}
