//! Integration tests for the Analyzer

#[cfg(test)]
mod tests {
    use crate::document::fixtures::{docx, paragraph};
    use crate::{
        AnalysisRequest, Analyzer, AnalyzerConfig, AnalyzerError, DocxSource, PlainTextSource,
        PromptBuilder, PromptTemplate,
    };
    use kashshaf_domain::{AnnotationRecord, CompletionProvider, CompletionRequest, ModelId};
    use kashshaf_llm::{LlmError, MockProvider};
    use std::time::Duration;

    const REPLY: &str = "إليك الكشافات:\n\
        قال شيخ الإسلام | تفسير الآيات | تفسير آية الكرسي | شرح معنى الآية\n\
        \n\
        وأما قول من قال | الخلاف | مسألة الاستواء | ذكر الأقوال في المسألة\n";

    fn request(text: &str) -> AnalysisRequest {
        AnalysisRequest {
            text: text.to_string(),
            source_id: "majmu.docx".to_string(),
            model: ModelId::Gpt4,
        }
    }

    #[tokio::test]
    async fn test_full_analysis_flow() {
        let analyzer = Analyzer::with_defaults(MockProvider::new(REPLY));

        let result = analyzer.analyze(request("قال شيخ الإسلام")).await.unwrap();

        assert_eq!(
            result.records,
            vec![
                AnnotationRecord::new(
                    "قال شيخ الإسلام",
                    "تفسير الآيات",
                    "تفسير آية الكرسي",
                    "شرح معنى الآية"
                ),
                AnnotationRecord::new(
                    "وأما قول من قال",
                    "الخلاف",
                    "مسألة الاستواء",
                    "ذكر الأقوال في المسألة"
                ),
            ]
        );
        assert_eq!(result.skipped_lines, 1);
        assert_eq!(result.raw_reply, REPLY);
        assert_eq!(result.metadata.source_id, "majmu.docx");
        assert_eq!(result.metadata.model, ModelId::Gpt4);
        assert_eq!(result.metadata.text_chars, "قال شيخ الإسلام".chars().count());
        assert!(result.metadata.timestamp > 0);
    }

    #[tokio::test]
    async fn test_request_carries_prompt_and_model() {
        let analyzer = Analyzer::with_defaults(MockProvider::new(""));

        analyzer
            .analyze(AnalysisRequest {
                model: ModelId::Gpt35Turbo,
                ..request("نص الكتاب")
            })
            .await
            .unwrap();

        let sent = analyzer.provider().last_request().unwrap();
        let expected = PromptBuilder::new(&PromptTemplate::default()).build("نص الكتاب");
        assert_eq!(sent.model, "gpt-3.5-turbo");
        assert_eq!(sent.prompt, expected);
        assert_eq!(analyzer.provider().call_count(), 1);
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let template = PromptTemplate::default();
        let prompt = PromptBuilder::new(&template).build("text");

        let mut llm = MockProvider::default();
        llm.add_error(prompt);
        let analyzer = Analyzer::new(llm, template, AnalyzerConfig::default());

        let result = analyzer.analyze(request("text")).await;
        assert!(matches!(result, Err(AnalyzerError::Llm(_))));
    }

    #[tokio::test]
    async fn test_empty_document_not_sent() {
        let analyzer = Analyzer::with_defaults(MockProvider::new(REPLY));
        let source = DocxSource::from_bytes(docx(&paragraph("   ")));

        let result = analyzer
            .analyze_source(&source, "blank.docx", ModelId::Gpt4)
            .await;

        assert!(matches!(result, Err(AnalyzerError::EmptyDocument)));
        assert_eq!(analyzer.provider().call_count(), 0);
    }

    #[tokio::test]
    async fn test_analyze_docx_source() {
        let analyzer = Analyzer::with_defaults(MockProvider::new(REPLY));
        let body = format!("{}{}", paragraph("الفصل الأول"), paragraph("قال شيخ الإسلام"));
        let source = DocxSource::from_bytes(docx(&body));

        let result = analyzer
            .analyze_source(&source, "book.docx", ModelId::Gpt4)
            .await
            .unwrap();

        assert_eq!(result.records.len(), 2);
        let sent = analyzer.provider().last_request().unwrap();
        assert!(sent.prompt.ends_with("الفصل الأول\nقال شيخ الإسلام\n"));
    }

    #[tokio::test]
    async fn test_invalid_package_surfaces_document_error() {
        let analyzer = Analyzer::with_defaults(MockProvider::new(REPLY));
        let source = DocxSource::from_bytes(b"not a zip".to_vec());

        let result = analyzer
            .analyze_source(&source, "broken.docx", ModelId::Gpt4)
            .await;

        assert!(matches!(result, Err(AnalyzerError::Document(_))));
    }

    #[tokio::test]
    async fn test_boxed_plain_text_source() {
        let analyzer = Analyzer::with_defaults(MockProvider::new(REPLY));
        let source: Box<dyn kashshaf_domain::TextSource<Error = crate::DocumentError>> =
            Box::new(PlainTextSource::new("line one\n\nline two"));

        let result = analyzer
            .analyze_source(source.as_ref(), "notes.txt", ModelId::Gpt4)
            .await
            .unwrap();

        assert_eq!(result.records.len(), 2);
        assert!(analyzer
            .provider()
            .last_request()
            .unwrap()
            .prompt
            .ends_with("line one\nline two\n"));
    }

    #[tokio::test]
    async fn test_custom_template_and_config() {
        let template = PromptTemplate {
            categories: vec!["الفوائد".to_string()],
            ..PromptTemplate::default()
        };
        let analyzer = Analyzer::new(
            MockProvider::new(""),
            template,
            AnalyzerConfig {
                temperature: 0.0,
                ..AnalyzerConfig::default()
            },
        );

        analyzer.analyze(request("text")).await.unwrap();

        let sent = analyzer.provider().last_request().unwrap();
        assert!(sent.prompt.contains("1. الفوائد\n"));
        assert!(!sent.prompt.contains("2. "));
        assert_eq!(sent.temperature, 0.0);
    }

    /// Provider that never answers within the test's timeout
    struct SlowProvider;

    impl CompletionProvider for SlowProvider {
        type Error = LlmError;

        async fn complete(&self, _request: &CompletionRequest) -> Result<String, Self::Error> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(String::new())
        }
    }

    #[tokio::test]
    async fn test_completion_timeout() {
        let config = AnalyzerConfig {
            request_timeout_secs: 1,
            ..AnalyzerConfig::default()
        };
        let analyzer = Analyzer::new(SlowProvider, PromptTemplate::default(), config);

        let result = analyzer.analyze(request("text")).await;
        assert!(matches!(result, Err(AnalyzerError::Timeout(1))));
    }
}
