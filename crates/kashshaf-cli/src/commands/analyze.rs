//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::{Formatter, NO_RECORDS_WARNING};
use crate::session::Run;
use kashshaf_domain::{CompletionProvider, FieldLabels, ModelId, RecordSink};
use kashshaf_export::XlsxExporter;
use kashshaf_extractor::{open_source, Analyzer, PromptTemplate};
use kashshaf_llm::OpenAiProvider;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use tracing::info;

/// Execute the analyze command.
pub async fn execute_analyze(args: AnalyzeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;

    let model = match args.model {
        Some(model) => model,
        None => profile.model_id()?,
    };
    let api_key = args
        .api_key
        .or_else(|| profile.api_key.clone())
        .ok_or(CliError::MissingApiKey)?;
    let template = load_template(args.template.as_deref().or(profile.template.as_deref()))?;
    let analyzer = build_analyzer(config, template, &api_key)?;

    let run = run_analysis(&analyzer, &args.file, model, formatter).await?;
    report_run(&run, &analyzer.template().field_labels(), args.show_reply, formatter)?;

    if let Some(bytes) = &run.export {
        let output = args.output.unwrap_or_else(|| config.settings.output_file.clone());
        fs::write(&output, bytes)?;
        eprintln!(
            "{}",
            formatter.success(&format!(
                "Saved {} record(s) to {}",
                run.result.records.len(),
                output.display()
            ))
        );
    }

    Ok(())
}

/// Load a prompt template file, or the built-in template.
pub fn load_template(path: Option<&Path>) -> Result<PromptTemplate> {
    match path {
        Some(path) => {
            info!("Loading prompt template from {}", path.display());
            Ok(PromptTemplate::load(path)?)
        }
        None => Ok(PromptTemplate::default()),
    }
}

/// Build the completion provider for an endpoint and key.
pub fn build_provider(endpoint: &str, api_key: &str) -> Result<OpenAiProvider> {
    if api_key.trim().is_empty() {
        return Err(CliError::MissingApiKey);
    }
    Ok(OpenAiProvider::new(api_key).with_endpoint(endpoint))
}

/// Analyzer for the active profile's endpoint and the `[analyzer]` settings.
pub fn build_analyzer(
    config: &Config,
    template: PromptTemplate,
    api_key: &str,
) -> Result<Analyzer<OpenAiProvider>> {
    config
        .analyzer
        .validate()
        .map_err(|e| CliError::Config(format!("Invalid [analyzer] settings: {}", e)))?;

    let profile = config.get_active_profile()?;
    let provider = build_provider(&profile.endpoint, api_key)?;
    Ok(Analyzer::new(provider, template, config.analyzer.clone()))
}

/// Read a document, analyze it, and serialize the records.
///
/// The export buffer is only built when the run produced records.
pub async fn run_analysis<P>(
    analyzer: &Analyzer<P>,
    path: &Path,
    model: ModelId,
    formatter: &Formatter,
) -> Result<Run>
where
    P: CompletionProvider,
    P::Error: Display,
{
    let source = open_source(path)?;
    let source_id = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    eprintln!(
        "{}",
        formatter.info(&format!("Analyzing {} with {}...", source_id, model))
    );

    let result = analyzer
        .analyze_source(source.as_ref(), source_id, model)
        .await?;

    let export = if result.is_empty() {
        None
    } else {
        let exporter = XlsxExporter::with_labels(analyzer.template().field_labels());
        Some(exporter.export(&result.records)?)
    };

    Ok(Run { result, export })
}

/// Print a finished run: reply, records, and warnings.
pub fn report_run(
    run: &Run,
    labels: &FieldLabels,
    show_reply: bool,
    formatter: &Formatter,
) -> Result<()> {
    let result = &run.result;

    if show_reply {
        println!("{}", result.raw_reply);
        println!();
    }

    if result.is_empty() {
        eprintln!("{}", formatter.warning(NO_RECORDS_WARNING));
    } else {
        println!("{}", formatter.format_records(&result.records, labels)?);
    }

    if let Some(warning) = formatter.skipped_warning(result.skipped_lines) {
        eprintln!("{}", warning);
    }
    eprintln!("{}", formatter.run_summary(result));

    Ok(())
}
