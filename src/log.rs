use serde::Deserialize;
use uuid::Uuid;

use crate::error::ConfigError;
use crate::request::ServerRequest;

pub const SHOW_QUERY_TIMING_VAR: &str = "SHOW_QUERY_TIMING";
pub const COLOR_VAR: &str = "QUERY_TIMELINE_COLOR";

/// Switches read by the loggers. Everything is off unless asked for,
/// except color.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggerOptions {
    pub show_query_timing: bool,
    pub color: bool,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            show_query_timing: false,
            color: true,
        }
    }
}

impl LoggerOptions {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Defaults overridden by `SHOW_QUERY_TIMING` / `QUERY_TIMELINE_COLOR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();
        if let Some(raw) = lookup(SHOW_QUERY_TIMING_VAR) {
            options.show_query_timing = parse_flag(SHOW_QUERY_TIMING_VAR, &raw)?;
        }
        if let Some(raw) = lookup(COLOR_VAR) {
            options.color = parse_flag(COLOR_VAR, &raw)?;
        }
        Ok(options)
    }
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            var,
            value: raw.to_string(),
        }),
    }
}

/// Debug sink plus the options that gate what gets written to it.
pub trait Logger {
    fn options(&self) -> &LoggerOptions;
    fn debug(&mut self, line: &str);
}

/// Request-bound logger forwarding to `tracing`.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    request_id: Uuid,
    options: LoggerOptions,
}

impl Logger for TracingLogger {
    fn options(&self) -> &LoggerOptions {
        &self.options
    }

    fn debug(&mut self, line: &str) {
        tracing::debug!(request_id = %self.request_id, "{}", line);
    }
}

pub fn logger_with_context(request: &ServerRequest, options: &LoggerOptions) -> TracingLogger {
    TracingLogger {
        request_id: request.id,
        options: options.clone(),
    }
}

/// Keeps every line in memory instead of writing it anywhere.
#[derive(Debug, Clone, Default)]
pub struct RecordingLogger {
    options: LoggerOptions,
    pub lines: Vec<String>,
}

impl RecordingLogger {
    pub fn new(options: LoggerOptions) -> Self {
        Self {
            options,
            lines: Vec::new(),
        }
    }

    pub fn debug_calls(&self) -> usize {
        self.lines.len()
    }
}

impl Logger for RecordingLogger {
    fn options(&self) -> &LoggerOptions {
        &self.options
    }

    fn debug(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}
