//! Error and result types shared by the Gemini client and the job bridge.

use thiserror::Error;

/// Errors that can occur while talking to the generative AI endpoint.
#[derive(Debug, Error)]
pub enum AiError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// Neither API key variable is set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request failed before a response arrived.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The endpoint answered with a non-success status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The response parsed but carried no usable content.
    #[error("API response contained no {0}")]
    EmptyResponse(&'static str),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// A web page cited by a search-grounded answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportSource {
    pub title: String,
    pub uri: String,
}

/// Repair shop listing plus the pages it was grounded on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SupportInfo {
    pub text: String,
    pub sources: Vec<SupportSource>,
}

/// Finished AI job, delivered to the UI thread.
#[derive(Debug, Clone)]
pub enum AiResult {
    /// Diagnostic commentary for the device with this serial number
    Diagnostic { serial: String, text: String },
    /// PNG bytes of the schematic, `None` when generation failed
    Blueprint { serial: String, png: Option<Vec<u8>> },
    Support(SupportInfo),
}
