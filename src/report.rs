use crate::config::AppConfig;
use crate::models::{Persona, ReportRequest};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

pub const GENERIC_INSTRUCTION: &str = "You are an AI fortune teller.";

const NONE_MARKER: &str = "none";
const UNKNOWN_MARKER: &str = "unknown";
const NOT_DRAWN_MARKER: &str = "not drawn";

const OUTPUT_FORMAT: &str = "\
Using the data above, write a narrative report in the format below.
When a tarot card was drawn, connect its meaning to today's habits and mood in detail.

[Output format]
1. **Today's spiritual condition**: a grade from S to F and a short summary.
2. **Reading**:
   - If a tarot card was drawn:
     - **Overall flow**: what the card suggests about today.
     - **Wealth**: link the card to today's actions and predict financial luck.
     - **Relationships**: predict how things go with the people around you.
   - Otherwise: an analysis of today's habits and mood.
3. **Guidance for tomorrow**: one concrete action that improves the outlook.
4. **Today's prophecy**: one memorable sentence in your persona's tone.";

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model api key missing")]
    MissingKey,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("model returned status {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },
    #[error("malformed completion: {0}")]
    Malformed(String),
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

pub fn system_instruction(persona_key: &str) -> &'static str {
    match Persona::from_key(persona_key) {
        Some(Persona::SternSeer) => {
            "You are a stern seer who sees through the future. Interpret the fortune in a factual, \
             analytical tone rather than saying what the user wants to hear."
        }
        Some(Persona::GentleWitch) => {
            "You are a wise and gentle witch of the forest. Explain the meaning of the tarot card \
             warmly and give the user courage."
        }
        Some(Persona::Trickster) => {
            "You are a jester who loves riddles. Read the fortune with humor and wit."
        }
        None => GENERIC_INSTRUCTION,
    }
}

/// Deterministic user prompt. Missing inputs are spelled out as explicit markers.
pub fn build_prompt(request: &ReportRequest) -> String {
    let snapshot = &request.snapshot;
    let habits = if snapshot.labels_completed.is_empty() {
        NONE_MARKER.to_string()
    } else {
        snapshot.labels_completed.join(", ")
    };
    let weather = request
        .weather
        .as_ref()
        .map(|w| format!("{}, {}°C", w.description, w.temperature))
        .unwrap_or_else(|| UNKNOWN_MARKER.to_string());
    let partner = request
        .dog_breed
        .as_deref()
        .filter(|breed| !breed.trim().is_empty())
        .unwrap_or(UNKNOWN_MARKER);
    let tarot = request
        .tarot
        .as_ref()
        .map(|card| format!("{} (meaning: {})", card.name, card.meaning))
        .unwrap_or_else(|| NOT_DRAWN_MARKER.to_string());

    format!(
        "[User data]\n\
         - Completed habits: {habits} (completion rate: {rate}%)\n\
         - Mood: {mood}/10\n\
         - Weather: {weather}\n\
         - Lucky partner: {partner}\n\
         - Tarot: {tarot}\n\n\
         {format}",
        rate = snapshot.completion_rate,
        mood = snapshot.mood,
        format = OUTPUT_FORMAT,
    )
}

pub fn failure_text(err: &ModelError) -> String {
    format!("The crystal ball cracked while reading your fortune... (error: {err})")
}

/// Chat-completion client for an OpenAI-compatible endpoint.
#[derive(Clone)]
pub struct ReportComposer {
    client: Client,
    base_url: String,
    model: String,
}

impl ReportComposer {
    pub fn new(client: Client, config: &AppConfig) -> Self {
        Self {
            client,
            base_url: config.model_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One model call per report. Never fails: errors become a readable report text.
    pub async fn compose(&self, api_key: &str, request: &ReportRequest) -> String {
        let system = system_instruction(&request.persona_key);
        let prompt = build_prompt(request);

        match self.complete(api_key, system, &prompt).await {
            Ok(text) => {
                info!(model = %self.model, chars = text.len(), "report generated");
                text
            }
            Err(err) => {
                warn!(model = %self.model, "report generation failed: {err}");
                failure_text(&err)
            }
        }
    }

    pub async fn complete(&self, api_key: &str, system: &str, prompt: &str) -> Result<String, ModelError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ModelError::MissingKey);
        }

        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: prompt },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Status { status, body });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|err| ModelError::Malformed(err.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ModelError::Malformed("no choices returned".into()))
    }
}
