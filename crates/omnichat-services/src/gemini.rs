//! Generative Client Adapter (Gemini `generateContent` REST API)
//!
//! [`GenerativeClient`] is an explicit context object owning the credential.
//! It is built once onboarding completes and passed to every generation
//! workflow; there is no process-wide client handle.

use serde::{Deserialize, Serialize};

use omnichat_core::prelude::*;
use omnichat_core::{strip_code_fences, DataUri};

use crate::http::{build_client, read_body, transport_error};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_LAYOUT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";

/// Generation operations used by the controller
#[trait_variant::make(GenerativeBackend: Send)]
pub trait LocalGenerativeBackend {
    /// Clone a screenshot into an HTML + Tailwind fragment
    async fn generate_layout_from_image(&self, image: &DataUri) -> Result<String>;

    /// Modify existing markup according to a natural-language instruction
    async fn refine_markup(&self, current: &str, instruction: &str) -> Result<String>;

    /// Generate a standalone overlay widget
    async fn generate_widget(&self, request: &str) -> Result<String>;
}

/// Connection settings for the generative model
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub layout_model: String,
    pub text_model: String,
    pub endpoint: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("layout_model", &self.layout_model)
            .field("text_model", &self.text_model)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            layout_model: DEFAULT_LAYOUT_MODEL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// Gemini REST client
#[derive(Debug, Clone)]
pub struct GenerativeClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GenerativeClient {
    /// Build a client. An empty key is accepted here and rejected on first use.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        Ok(Self {
            http: build_client()?,
            config,
        })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    pub fn is_ready(&self) -> bool {
        !self.config.api_key.trim().is_empty()
    }

    async fn generate(&self, model: &str, parts: Vec<Part>) -> Result<String> {
        if !self.is_ready() {
            return Err(Error::GenerativeNotReady);
        }

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            model
        );
        let request = GenerateContentRequest {
            contents: vec![Content { parts }],
        };

        debug!("generateContent model={}", model);
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let body = read_body(response)
            .await
            .map_err(|e| Error::generative(e.to_string()))?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        let text = parsed.text().ok_or(Error::EmptyResponse)?;
        Ok(strip_code_fences(&text))
    }
}

impl GenerativeBackend for GenerativeClient {
    async fn generate_layout_from_image(&self, image: &DataUri) -> Result<String> {
        let parts = vec![
            Part::inline(&image.mime, &image.payload),
            Part::text(prompts::LAYOUT),
        ];
        self.generate(&self.config.layout_model, parts).await
    }

    async fn refine_markup(&self, current: &str, instruction: &str) -> Result<String> {
        let parts = vec![Part::text(prompts::refine(current, instruction))];
        self.generate(&self.config.text_model, parts).await
    }

    async fn generate_widget(&self, request: &str) -> Result<String> {
        let parts = vec![Part::text(prompts::widget(request))];
        self.generate(&self.config.text_model, parts).await
    }
}

// ─────────────────────────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    fn inline(mime: &str, data: &str) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime.to_string(),
                data: data.to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize, Default)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, `None` if there are none
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

// ─────────────────────────────────────────────────────────────────
// Prompts
// ─────────────────────────────────────────────────────────────────

mod prompts {
    pub const LAYOUT: &str = "You are a Frontend Engineer. Analyze this UI screenshot.
Generate the HTML and Tailwind CSS code to replicate this interface EXACTLY.

Rules:
1. Return ONLY raw HTML. Do not wrap in markdown ```.
2. Do not include <html>, <head>, or <body> tags. Start with the main container <div>.
3. Use Tailwind CSS for all styling.
4. For icons, use raw SVG strings directly inline. Do not use external libraries or icon fonts.
5. Make it responsive and high fidelity.
6. Ensure the background colors and text colors match the image.
7. The output will be embedded inside a container <div>.
";

    pub fn refine(current: &str, instruction: &str) -> String {
        format!(
            "You are a helper that modifies HTML code based on user requests.

Current HTML:
{current}

User Instruction: \"{instruction}\"

Rules:
1. Modify the HTML to satisfy the instruction.
2. Keep the rest of the structure intact.
3. Return ONLY raw HTML. No markdown.
4. Use Tailwind CSS for styling changes.
"
        )
    }

    pub fn widget(request: &str) -> String {
        format!(
            "You are a UI Generator. The user wants to add a fake UI element to their screen.
Request: \"{request}\"

Rules:
1. Generate a generic HTML element (like a modal, toast, banner, or floating button) using Tailwind CSS.
2. It should look professional and polished.
3. Use inline SVGs for icons.
4. Return ONLY the raw HTML string. Do not wrap in markdown.
5. Ensure it has a high z-index (z-50) and fixed positioning so it appears over the app.
6. If it's a modal, center it. If it's a toast, place it top-right or top-center.

Example prompt: \"fake server error\"
Example output: <div class=\"fixed inset-0 z-50 flex items-center justify-center bg-black/50\"><div class=\"bg-white p-6 rounded-lg shadow-xl\"><h3 class=\"text-red-600 font-bold\">Server Error</h3>...</div></div>
"
        )
    }
}
