//! Core Analyzer implementation

use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::parser::parse_response;
use crate::prompt::{PromptBuilder, PromptTemplate};
use crate::types::{AnalysisMetadata, AnalysisRequest, AnalysisResult};
use kashshaf_domain::{CompletionProvider, CompletionRequest, ModelId, TextSource};
use std::fmt::Display;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// The Analyzer turns one document's text into annotation records
pub struct Analyzer<P>
where
    P: CompletionProvider,
{
    provider: P,
    template: PromptTemplate,
    config: AnalyzerConfig,
}

impl<P> Analyzer<P>
where
    P: CompletionProvider,
    P::Error: Display,
{
    /// Create a new Analyzer
    pub fn new(provider: P, template: PromptTemplate, config: AnalyzerConfig) -> Self {
        Self {
            provider,
            template,
            config,
        }
    }

    /// Create an Analyzer with the default template and configuration
    pub fn with_defaults(provider: P) -> Self {
        Self::new(provider, PromptTemplate::default(), AnalyzerConfig::default())
    }

    /// The prompt template in use
    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    /// The configuration in use
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// The completion provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Build the completion request for a text without sending it
    pub fn build_request(&self, text: &str, model: ModelId) -> CompletionRequest {
        CompletionRequest {
            model: model.as_str().to_string(),
            system_instruction: self.config.system_instruction.clone(),
            prompt: PromptBuilder::new(&self.template).build(text),
            temperature: self.config.temperature,
        }
    }

    /// Analyze text: prompt, complete, parse
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalyzerError> {
        self.config.validate().map_err(AnalyzerError::Config)?;

        if request.text.trim().is_empty() {
            return Err(AnalyzerError::EmptyDocument);
        }

        let text_chars = request.text.chars().count();
        if text_chars > self.config.max_text_length {
            return Err(AnalyzerError::TextTooLong(
                text_chars,
                self.config.max_text_length,
            ));
        }

        info!(
            "Starting analysis of '{}' with {}, text length {} chars",
            request.source_id, request.model, text_chars
        );

        let start_time = Instant::now();
        let completion = self.build_request(&request.text, request.model);
        let prompt_chars = completion.prompt.chars().count();

        debug!("Prompt length: {} chars", prompt_chars);

        let reply = timeout(
            self.config.request_timeout(),
            self.provider.complete(&completion),
        )
        .await
        .map_err(|_| AnalyzerError::Timeout(self.config.request_timeout_secs))?
        .map_err(|e| AnalyzerError::Llm(e.to_string()))?;

        debug!("Reply length: {} chars", reply.chars().count());

        let parsed = parse_response(&reply);

        if parsed.skipped_lines > 0 {
            warn!(
                "{} reply line(s) had fewer than 4 fields and were skipped",
                parsed.skipped_lines
            );
        }
        if parsed.is_empty() {
            warn!("Reply for '{}' contained no annotation records", request.source_id);
        }

        let metadata = AnalysisMetadata {
            source_id: request.source_id,
            model: request.model,
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
            text_chars,
            prompt_chars,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            "Analysis complete: {} record(s), {} skipped line(s) in {} ms",
            parsed.records.len(),
            parsed.skipped_lines,
            metadata.processing_time_ms
        );

        Ok(AnalysisResult {
            records: parsed.records,
            skipped_lines: parsed.skipped_lines,
            raw_reply: reply,
            metadata,
        })
    }

    /// Read a text source, then analyze it
    pub async fn analyze_source<S>(
        &self,
        source: &S,
        source_id: impl Into<String>,
        model: ModelId,
    ) -> Result<AnalysisResult, AnalyzerError>
    where
        S: TextSource + ?Sized,
        S::Error: Into<AnalyzerError>,
    {
        let text = source.read_text().map_err(Into::into)?;

        self.analyze(AnalysisRequest {
            text,
            source_id: source_id.into(),
            model,
        })
        .await
    }
}
