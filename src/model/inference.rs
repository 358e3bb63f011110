use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::{strip_special_tokens, GenerationParams, Summarizer};
use crate::error::{Result, SummarizeError};
use crate::settings::Settings;

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParams,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

/// Client for a Hugging Face style `/models/<id>` inference endpoint.
pub struct InferenceClient {
    client: reqwest::Client,
    url: String,
    model: String,
    params: GenerationParams,
}

impl InferenceClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &settings.api_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| SummarizeError::Config("API token is not a valid header value".into()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }

        let url = model_url(&settings.endpoint, &settings.model);
        info!("Using model {} at {}", settings.model, url);

        Ok(Self {
            client: builder.build()?,
            url,
            model: settings.model.clone(),
            params: settings.generation(),
        })
    }
}

#[async_trait]
impl Summarizer for InferenceClient {
    async fn summarize(&self, paragraph: &str) -> Result<String> {
        let request = build_request(paragraph, self.params);
        let response = self.client.post(&self.url).json(&request).send().await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "inference response");

        if !status.is_success() {
            return Err(SummarizeError::Model {
                status: status.as_u16(),
                body,
            });
        }
        parse_response(&body)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

fn model_url(endpoint: &str, model: &str) -> String {
    format!("{}/models/{}", endpoint.trim_end_matches('/'), model)
}

fn build_request(paragraph: &str, params: GenerationParams) -> InferenceRequest<'_> {
    InferenceRequest {
        inputs: paragraph,
        parameters: params,
        options: InferenceOptions {
            wait_for_model: true,
        },
    }
}

/// Pull the generated text out of a summarization or text2text response.
fn parse_response(body: &str) -> Result<String> {
    let parsed: Value = serde_json::from_str(body)
        .map_err(|e| SummarizeError::ModelResponse(format!("invalid JSON: {}", e)))?;

    if let Some(err) = parsed.get("error") {
        let msg = err.as_str().map(str::to_string).unwrap_or_else(|| err.to_string());
        return Err(SummarizeError::ModelResponse(msg));
    }

    let first = match &parsed {
        Value::Array(items) => items.first(),
        obj @ Value::Object(_) => Some(obj),
        _ => None,
    };

    first
        .and_then(|obj| obj.get("summary_text").or_else(|| obj.get("generated_text")))
        .and_then(|t| t.as_str())
        .map(strip_special_tokens)
        .ok_or_else(|| SummarizeError::ModelResponse(format!("no generated text in {}", body)))
}
