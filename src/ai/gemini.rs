//! Gemini `generateContent` client.
//!
//! Three calls are made: free-text diagnostics for a device, a schematic
//! image, and a search-grounded repair shop lookup. The raw calls return
//! `Result<_, AiError>`; the `*_or_fallback` wrappers below turn failures
//! into the static strings the UI shows.

use std::time::Duration;

use base64::Engine;
use serde::{Deserialize, Serialize};

use super::config::AiConfig;
use super::types::{AiError, SupportInfo, SupportSource};
use crate::core::DeviceInfo;
use crate::sim::location::Coordinates;

pub const DIAGNOSTIC_ERROR: &str = "Error connecting to AI diagnostic engine.";
pub const DIAGNOSTIC_EMPTY: &str = "Diagnostic analysis unavailable.";
pub const SUPPORT_FALLBACK: &str =
    "Unable to reach the support locator. Check your connection and try again.";

const DIAGNOSTIC_TEMPERATURE: f32 = 0.7;
const SCHEMATIC_ASPECT_RATIO: &str = "9:16";

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    text_model: String,
    image_model: String,
}

impl GeminiClient {
    pub fn new(config: &AiConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| AiError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
        })
    }

    /// Health summary, known issues and maintenance advice for a device.
    pub async fn diagnose(&self, device: &DeviceInfo) -> Result<String, AiError> {
        let prompt = diagnostic_prompt(device);
        let body = GenerateRequest {
            contents: vec![RequestContent::text(&prompt)],
            generation_config: Some(GenerationConfig {
                temperature: Some(DIAGNOSTIC_TEMPERATURE),
                thinking_config: Some(ThinkingConfig { thinking_budget: 0 }),
                image_config: None,
            }),
            tools: None,
        };
        let response = self.generate(&self.text_model, &body).await?;
        Ok(response.text())
    }

    /// Hardware x-ray schematic, returned as raw image bytes.
    pub async fn schematic(&self, brand: &str, model: &str) -> Result<Vec<u8>, AiError> {
        let prompt = schematic_prompt(brand, model);
        let body = GenerateRequest {
            contents: vec![RequestContent::text(&prompt)],
            generation_config: Some(GenerationConfig {
                temperature: None,
                thinking_config: None,
                image_config: Some(ImageConfig {
                    aspect_ratio: SCHEMATIC_ASPECT_RATIO,
                }),
            }),
            tools: None,
        };
        let response = self.generate(&self.image_model, &body).await?;
        let data = response
            .inline_data()
            .ok_or(AiError::EmptyResponse("inline image"))?;
        base64::engine::general_purpose::STANDARD
            .decode(data)
            .map_err(|e| AiError::ApiParse(format!("image payload: {e}")))
    }

    /// Authorized repair centers near a position, with cited sources.
    pub async fn nearby_support(
        &self,
        coords: Coordinates,
        brand: &str,
    ) -> Result<SupportInfo, AiError> {
        let prompt = support_prompt(coords, brand);
        let body = GenerateRequest {
            contents: vec![RequestContent::text(&prompt)],
            generation_config: None,
            tools: Some(vec![Tool {
                google_search: EmptyObject {},
            }]),
        };
        let response = self.generate(&self.text_model, &body).await?;
        let text = response.text();
        if text.is_empty() {
            return Err(AiError::EmptyResponse("text"));
        }
        Ok(SupportInfo {
            text,
            sources: response.sources(),
        })
    }

    async fn generate(
        &self,
        model: &str,
        body: &GenerateRequest<'_>,
    ) -> Result<GenerateResponse, AiError> {
        let text = self
            .send_json(&format!("/models/{model}:generateContent"), body)
            .await?;
        serde_json::from_str(&text).map_err(|e| AiError::ApiParse(e.to_string()))
    }

    async fn send_json(&self, path: &str, body: &impl Serialize) -> Result<String, AiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| AiError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| AiError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(AiError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}

// =============================================================================
// FALLBACK WRAPPERS
// =============================================================================

/// Diagnostic text, or one of the two static fallbacks.
pub async fn diagnose_or_fallback(client: Option<&GeminiClient>, device: &DeviceInfo) -> String {
    let Some(client) = client else {
        tracing::error!("AI diagnostic requested without a configured client");
        return DIAGNOSTIC_ERROR.to_string();
    };
    match client.diagnose(device).await {
        Ok(text) if text.trim().is_empty() => DIAGNOSTIC_EMPTY.to_string(),
        Ok(text) => text,
        Err(e) => {
            tracing::error!(error = %e, "AI diagnostic failed");
            DIAGNOSTIC_ERROR.to_string()
        }
    }
}

/// Schematic bytes, or `None` so the panel shows its placeholder.
pub async fn schematic_or_none(
    client: Option<&GeminiClient>,
    brand: &str,
    model: &str,
) -> Option<Vec<u8>> {
    let client = client?;
    match client.schematic(brand, model).await {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::error!(error = %e, "schematic generation failed");
            None
        }
    }
}

pub async fn support_or_fallback(
    client: Option<&GeminiClient>,
    coords: Coordinates,
    brand: &str,
) -> SupportInfo {
    let fallback = || SupportInfo {
        text: SUPPORT_FALLBACK.to_string(),
        sources: Vec::new(),
    };
    let Some(client) = client else {
        return fallback();
    };
    match client.nearby_support(coords, brand).await {
        Ok(info) => info,
        Err(e) => {
            tracing::error!(error = %e, "support lookup failed");
            fallback()
        }
    }
}

// =============================================================================
// PROMPTS
// =============================================================================

fn diagnostic_prompt(device: &DeviceInfo) -> String {
    format!(
        "Perform a deep technical diagnostic analysis for the following mobile device:\n\
         Brand: {}\n\
         Model: {}\n\
         OS: {} {}\n\
         Build: {}\n\
         Battery Health: {}%\n\
         Storage: {}GB used of {}GB\n\
         CPU: {}\n\
         RAM: {}\n\
         Primary Account: {}\n\n\
         Provide a concise health summary, potential issues for this specific model and \
         firmware build, and maintenance recommendations. Include security considerations \
         related to account management. Use professional technical language.",
        device.brand,
        device.model,
        device.os.label(),
        device.os_version,
        device.os_build,
        device.battery_health,
        device.storage_used,
        device.storage_total,
        device.cpu,
        device.ram,
        device.associated_email,
    )
}

fn schematic_prompt(brand: &str, model: &str) -> String {
    format!(
        "Create a high-tech, futuristic technical x-ray blueprint of the internal hardware \
         components for a {brand} {model} smartphone. The style should be a professional \
         industrial design diagram, blue and white color scheme on a dark slate background. \
         Label the CPU, Battery, and Camera modules. High detail, 4k resolution aesthetic."
    )
}

fn support_prompt(coords: Coordinates, brand: &str) -> String {
    format!(
        "Find authorized {brand} repair and service centers near latitude {}, longitude {}. \
         For each, give the name, address and what services they offer. Keep it brief.",
        coords.lat, coords.lng
    )
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

impl<'a> RequestContent<'a> {
    fn text(text: &'a str) -> Self {
        Self {
            parts: vec![RequestPart { text }],
        }
    }
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: &'static str,
}

#[derive(Serialize)]
struct Tool {
    google_search: EmptyObject,
}

#[derive(Serialize)]
struct EmptyObject {}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    data: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    #[serde(default)]
    uri: String,
    #[serde(default)]
    title: String,
}

impl GenerateResponse {
    fn parts(&self) -> impl Iterator<Item = &ResponsePart> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .into_iter()
            .flat_map(|content| content.parts.iter())
    }

    /// Concatenated text of the first candidate
    fn text(&self) -> String {
        self.parts()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Base64 payload of the first inline part
    fn inline_data(&self) -> Option<&str> {
        self.parts()
            .find_map(|p| p.inline_data.as_ref())
            .map(|d| d.data.as_str())
    }

    fn sources(&self) -> Vec<SupportSource> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|meta| {
                meta.grounding_chunks
                    .iter()
                    .filter_map(|chunk| chunk.web.as_ref())
                    .filter(|web| !web.uri.is_empty())
                    .map(|web| SupportSource {
                        title: if web.title.is_empty() {
                            web.uri.clone()
                        } else {
                            web.title.clone()
                        },
                        uri: web.uri.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::config::AiTimeouts;

    fn unreachable_client() -> GeminiClient {
        GeminiClient::new(&AiConfig {
            api_key: "test".into(),
            base_url: "http://127.0.0.1:9".into(),
            text_model: "m".into(),
            image_model: "m".into(),
            timeouts: AiTimeouts {
                request_secs: 2,
                connect_secs: 1,
            },
        })
        .unwrap()
    }

    #[test]
    fn response_text_joins_first_candidate_parts() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"Battery "},{"text":"nominal."}]}}]}"#;
        let response: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.text(), "Battery nominal.");
        assert!(response.inline_data().is_none());
    }

    #[test]
    fn response_finds_inline_image_after_text() {
        let raw = r#"{"candidates":[{"content":{"parts":[
            {"text":"Here is your blueprint"},
            {"inlineData":{"mimeType":"image/png","data":"iVBORw0K"}}
        ]}}]}"#;
        let response: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.inline_data(), Some("iVBORw0K"));
    }

    #[test]
    fn grounding_sources_skip_chunks_without_web() {
        let raw = r#"{"candidates":[{
            "content":{"parts":[{"text":"Two shops nearby."}]},
            "groundingMetadata":{"groundingChunks":[
                {"web":{"uri":"https://a.example","title":"Shop A"}},
                {"retrievedContext":{}},
                {"web":{"uri":"https://b.example"}}
            ]}
        }]}"#;
        let response: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            response.sources(),
            vec![
                SupportSource {
                    title: "Shop A".into(),
                    uri: "https://a.example".into()
                },
                SupportSource {
                    title: "https://b.example".into(),
                    uri: "https://b.example".into()
                },
            ]
        );
    }

    #[test]
    fn empty_response_has_no_text() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.text(), "");
        assert!(response.sources().is_empty());
    }

    #[test]
    fn diagnostic_request_carries_temperature_and_thinking_budget() {
        let body = GenerateRequest {
            contents: vec![RequestContent::text("hi")],
            generation_config: Some(GenerationConfig {
                temperature: Some(DIAGNOSTIC_TEMPERATURE),
                thinking_config: Some(ThinkingConfig { thinking_budget: 0 }),
                image_config: None,
            }),
            tools: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(json["generationConfig"]["thinkingConfig"]["thinkingBudget"], 0);
        assert!(json["generationConfig"].get("imageConfig").is_none());
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn diagnostic_prompt_names_the_device() {
        let device = DeviceInfo::mock();
        let prompt = diagnostic_prompt(&device);
        assert!(prompt.contains(&device.model));
        assert!(prompt.contains(&format!("Battery Health: {}%", device.battery_health)));
        assert!(prompt.contains(&device.associated_email));
    }

    #[tokio::test]
    async fn unreachable_endpoint_falls_back() {
        let client = unreachable_client();
        let device = DeviceInfo::mock();

        let text = diagnose_or_fallback(Some(&client), &device).await;
        assert_eq!(text, DIAGNOSTIC_ERROR);

        let png = schematic_or_none(Some(&client), &device.brand, &device.model).await;
        assert!(png.is_none());

        let support = support_or_fallback(Some(&client), Coordinates::FALLBACK, "Samsung").await;
        assert_eq!(support.text, SUPPORT_FALLBACK);
        assert!(support.sources.is_empty());
    }

    #[tokio::test]
    async fn missing_client_falls_back() {
        let device = DeviceInfo::mock();
        assert_eq!(diagnose_or_fallback(None, &device).await, DIAGNOSTIC_ERROR);
        assert!(schematic_or_none(None, "Samsung", "S24").await.is_none());
    }
}
