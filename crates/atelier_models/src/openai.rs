//! OpenAI chat-completions vision client.

use crate::Summarizer;
use atelier_error::{AtelierResult, SummaryError};
use atelier_storage::urls;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o";
const MAX_TOKENS: u32 = 900;
const TEMPERATURE: f32 = 0.5;

const SYSTEM_PROMPT: &str = "\
You are a marketing copywriter who specializes in SEO. Given an image of a \
digital asset, produce a description for use on the web, in exactly this \
structure:\n\n\
<div class=\"desc\">\n\
  <div class=\"detail line-control\">\n\
    <h2>Title</h2>\n\
    A description of roughly 400 characters. Focus on shape, color and \
subject, then on what the asset is useful for producing. Always include the \
phrases: substance painter material, free texture, free download.\n\
  </div>\n\
  <div class=\"HiddenInfoForSearch\" style=\"display:none\">\n\
    Long-tail keywords: describe the shader's form and color in detail, \
about 500 characters. Do not mention software or intended use here.\n\
  </div>\n\
</div>\n\n\
Finish with a JSON-LD structured-data block in a \
<script type=\"application/ld+json\">{...}</script> tag. The @type must be \
\"ImageObject\" with fields @context, @type, name, description; omit the \
image, url and offers fields entirely when their values are unknown.\n\
Never use abstract or sentimental wording such as 'digital art' or \
'perfect'. Refer to the round object as a shader, not as 'this image'.";

const USER_PROMPT: &str = "\
1. Look at this image and write an SEO-optimized description.\n\
2. Include the JSON-LD for search inside a <script></script> tag.\n";

/// OpenAI API client implementing [`Summarizer`].
#[derive(Debug, Clone)]
pub struct OpenAiSummarizer {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiSummarizer {
    /// Creates a new summarizer with the default vision model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    /// Creates a new summarizer for a specific model.
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        debug!("Creating new OpenAI summarizer");
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: MessageContent<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum ContentPart<'a> {
    #[serde(rename = "text")]
    Text { text: &'a str },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[async_trait::async_trait]
impl Summarizer for OpenAiSummarizer {
    #[instrument(skip(self))]
    async fn summarize(&self, image_url: &str) -> AtelierResult<String> {
        // The model fetches the image itself, so it needs the raw variant.
        let (raw_url, _) = urls::model_variants(image_url);

        let request = ChatRequest {
            model: &self.model,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(SYSTEM_PROMPT),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(vec![
                        ContentPart::Text { text: USER_PROMPT },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl { url: raw_url },
                        },
                    ]),
                },
            ],
        };

        debug!(model = %self.model, "Requesting image summary");
        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send summary request");
                SummaryError::new(format!("request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "OpenAI API returned error");
            return Err(SummaryError::new(format!("API returned {status}: {body}")).into());
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| SummaryError::new(format!("failed to parse response: {e}")))?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| SummaryError::new("response carried no content"))?;

        debug!(chars = content.len(), "Received image summary");
        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_image_part() {
        let request = ChatRequest {
            model: "gpt-4o",
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            messages: vec![ChatMessage {
                role: "user",
                content: MessageContent::Parts(vec![
                    ContentPart::Text { text: "describe" },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: "https://www.dropbox.com/s/a/b.jpg?raw=1".to_string(),
                        },
                    },
                ]),
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["content"][1]["type"], "image_url");
        assert_eq!(
            json["messages"][0]["content"][1]["image_url"]["url"],
            "https://www.dropbox.com/s/a/b.jpg?raw=1"
        );
    }

    #[test]
    fn response_parses_choice_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  copy  "}}]}"#;
        let chat: ChatResponse = serde_json::from_str(body).unwrap();
        let content = chat.choices[0].message.content.as_deref().unwrap();
        assert_eq!(content.trim(), "copy");
    }
}
