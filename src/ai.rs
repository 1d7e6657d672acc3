// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Chat-completion client for AI-generated file names
//!
//! Talks to any OpenAI-compatible endpoint (SiliconFlow by default). The
//! client is built from an [`AiConfig`] value per call site; it keeps no
//! process-wide state.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::AiConfig;
use crate::rename::{split_extension, FileEntry};
use crate::{FileRenamingError, Result};

const TEMPERATURE: f32 = 0.7;

const SYSTEM_PROMPT: &str = "You are a file renaming assistant. The user gives you the original \
names of a batch of files and you produce a new name (without extension) for each file.

Rules:
1. Return only the new names, never the extension
2. Names must be short, meaningful and follow the user's request
3. Answer with a JSON array with one element per file
4. The array order must match the input order exactly
5. Return only the JSON array, no explanation

Example input:
Original name: test file 1 (extension: .txt)
Original name: test file 2 (extension: .jpg)

Example output when asked to add a \"new\" prefix:
[\"new test file 1\", \"new test file 2\"]";

/// Produces one new base name per input file, in input order
#[async_trait]
pub trait NameGenerator: Send + Sync {
    async fn generate_names(&self, files: &[FileEntry], instruction: &str) -> Result<Vec<String>>;
}

/// Model listing entry
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelInfo {
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub owned_by: String,
}

#[derive(Deserialize)]
struct ModelsResponse {
    data: Vec<ModelInfo>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Error bodies come either flat (`{code, message}`) or OpenAI style
/// (`{error: {message}}`)
#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<ApiErrorDetail>,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// OpenAI-compatible chat API client
pub struct ChatClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    /// Create a client from explicit configuration
    pub fn new(config: &AiConfig) -> Result<Self> {
        if !config.has_api_key() {
            return Err(FileRenamingError::Config(
                "API key is not set; run `file-renaming config set --api-key <KEY>`".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.effective_base_url().trim_end_matches('/').to_string(),
            api_key: config.api_key.trim().to_string(),
            model: config.effective_model().to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// List available models, optionally filtered by provider-specific type
    pub async fn list_models(&self, model_type: Option<&str>) -> Result<Vec<ModelInfo>> {
        let response = self.models_request(model_type).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body = response.text().await?;
        let models: ModelsResponse = serde_json::from_str(&body).map_err(|e| {
            FileRenamingError::MalformedResponse {
                reason: e.to_string(),
                content: body.clone(),
            }
        })?;
        Ok(models.data)
    }

    fn models_request(&self, model_type: Option<&str>) -> RequestBuilder {
        let url = format!("{}/models", self.base_url);
        let request = self.client.get(&url).bearer_auth(&self.api_key);
        match model_type.filter(|t| !t.is_empty()) {
            Some(t) => request.query(&[("type", t)]),
            None => request,
        }
    }

    async fn chat(&self, user_prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT },
                ChatMessage { role: "user", content: user_prompt },
            ],
            temperature: TEMPERATURE,
        };

        debug!("Sending chat request: model={}", self.model);

        let response = self.client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body = response.text().await?;
        let result: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            FileRenamingError::MalformedResponse {
                reason: e.to_string(),
                content: body.clone(),
            }
        })?;

        result
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| FileRenamingError::Generator("Model returned no result".to_string()))
    }
}

#[async_trait]
impl NameGenerator for ChatClient {
    async fn generate_names(&self, files: &[FileEntry], instruction: &str) -> Result<Vec<String>> {
        if files.is_empty() {
            return Err(FileRenamingError::Validation("File list is empty".to_string()));
        }

        let content = self.chat(&build_user_prompt(files, instruction)).await?;
        parse_name_list(&content, files.len())
    }
}

async fn api_error(response: Response) -> FileRenamingError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<ApiErrorBody>(&body).ok().and_then(|err| {
        let message = err.message.or(err.error.map(|e| e.message))?;
        Some(match err.code {
            Some(code) => format!("API error: {} (code: {})", message, code),
            None => format!("API error: {}", message),
        })
    });

    FileRenamingError::Generator(message.unwrap_or_else(|| {
        format!("API request failed with status {}: {}", status, body)
    }))
}

/// User message: one line per file, then the instruction
pub fn build_user_prompt(files: &[FileEntry], instruction: &str) -> String {
    let lines: Vec<String> = files
        .iter()
        .map(|file| {
            let (stem, ext) = split_extension(&file.name);
            format!("Original name: {} (extension: {})", stem, ext)
        })
        .collect();

    format!(
        "Files:\n{}\n\nRequest: {}\n\nGenerate a new name for each file according to the request \
         and answer with a JSON array.",
        lines.join("\n"),
        instruction
    )
}

/// Parse the model's answer into exactly `expected` names. Markdown code
/// fences around the array are tolerated.
pub fn parse_name_list(content: &str, expected: usize) -> Result<Vec<String>> {
    let trimmed = content.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let unfenced = unfenced.strip_suffix("```").unwrap_or(unfenced).trim();

    let names: Vec<String> = serde_json::from_str(unfenced).map_err(|e| {
        FileRenamingError::MalformedResponse {
            reason: e.to_string(),
            content: unfenced.to_string(),
        }
    })?;

    if names.len() != expected {
        return Err(FileRenamingError::CountMismatch {
            files: expected,
            names: names.len(),
        });
    }
    Ok(names)
}
