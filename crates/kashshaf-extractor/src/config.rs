//! Configuration for the Analyzer

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default system instruction sent with every completion request
pub const DEFAULT_SYSTEM_INSTRUCTION: &str =
    "أنت مساعد ذكي متخصص في تحليل النصوص الشرعية واستخراج الكشافات العلمية منها بدقة.";

/// Default sampling temperature (deterministic-leaning)
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Configuration for the Analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Fixed system instruction
    pub system_instruction: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Maximum time for the completion call (seconds)
    pub request_timeout_secs: u64,
}

impl AnalyzerConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.system_instruction.trim().is_empty() {
            return Err("system_instruction must not be empty".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature {} out of range [0.0, 2.0]",
                self.temperature
            ));
        }
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_text_length: 400_000,
            request_timeout_secs: 300,
        }
    }
}
