use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::time::Duration;
use tracing::warn;

use crate::dto::job_dto::SubmitJobPayload;
use crate::error::{Error, Result};
use crate::models::job::JobType;

const GENERATE_CONTENT_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const FORMAT_MODEL: &str = "gemini-3-flash-preview";
const LOGO_MODEL: &str = "gemini-2.5-flash-image";

/// Job-shaped result of the formatting call. Every field is optional: the
/// adapter never rejects a thin extraction, it hands the gaps to submission
/// validation instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiProcessedJob {
    pub title: Option<String>,
    pub company: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub procedure: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<JobType>,
    pub category: Option<String>,
    pub salary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub whatsapp: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub link: Option<String>,
}

impl AiProcessedJob {
    /// Reshapes the extraction into a submission payload so it runs through
    /// the exact validation a member submission gets. Missing required
    /// fields surface there, not here.
    pub fn into_submission(self) -> Result<SubmitJobPayload> {
        let job_type = self.job_type.ok_or_else(|| {
            Error::BadRequest("The processed posting is missing an engagement type".to_string())
        })?;
        Ok(SubmitJobPayload {
            title: self.title.unwrap_or_default(),
            company: self.company.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            job_type,
            category: self.category.unwrap_or_default(),
            salary: self.salary,
            requirements: self.requirements,
            procedure: self.procedure,
            tags: self.tags.join(", "),
            whatsapp: self.whatsapp,
            phone: self.phone,
            email: self.email,
            link: self.link,
            logo: None,
        })
    }
}

#[derive(Clone)]
pub struct AiService {
    client: Client,
    api_key: String,
}

impl AiService {
    pub fn new(api_key: String, client: Client) -> Self {
        Self { client, api_key }
    }

    /// Sends raw pasted text through the formatting model and returns the
    /// structured posting. Malformed or empty model output yields an empty
    /// result rather than an error; only transport/API failures error out.
    pub async fn process_job_content(&self, raw_text: &str) -> Result<AiProcessedJob> {
        let payload = json!({
            "contents": [{ "parts": [{ "text": build_format_prompt(raw_text) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
            }
        });

        let body = self.generate_content(FORMAT_MODEL, payload).await?;
        let text = extract_text(&body).unwrap_or_default();
        Ok(parse_processed(&text))
    }

    /// Best-effort company logo synthesis. Returns a data URI, or None on
    /// any failure at all: a missing logo never blocks publishing.
    pub async fn generate_logo(&self, company_name: &str) -> Option<String> {
        let payload = json!({
            "contents": [{ "parts": [{ "text": build_logo_prompt(company_name) }] }],
            "generationConfig": {
                "imageConfig": { "aspectRatio": "1:1" }
            }
        });

        match self.generate_content(LOGO_MODEL, payload).await {
            Ok(body) => extract_inline_image(&body),
            Err(err) => {
                warn!(error = %err, "logo generation failed");
                None
            }
        }
    }

    async fn generate_content(&self, model: &str, payload: JsonValue) -> Result<JsonValue> {
        let res = self
            .client
            .post(format!("{}/{}:generateContent", GENERATE_CONTENT_BASE, model))
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .timeout(Duration::from_secs(120))
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(Error::AiFormatting(format!(
                "Generative API error {}: {}",
                status, text
            )));
        }

        Ok(res.json().await?)
    }
}

fn build_format_prompt(raw_text: &str) -> String {
    format!(
        r#"You are a professional business analyst for oGig, Nigeria's premier job nexus.
Your task is to structure the provided raw input into a professional job posting.

CRITICAL INSTRUCTIONS:
1. Output MUST be purely professional and business-oriented.
2. NEVER mention yourself, AI, or LLMs in the output.
3. Location MUST be in Nigeria. Format as "State, Area" (e.g., Lagos, Lekki).
4. Contacts: Extract every WhatsApp number, Phone, and Email found.
5. Requirements: Create a clear bulleted list of skills or qualifications.
6. Procedure: Create a step-by-step application guide.
7. Language: Professional, encouraging, and clear.

Input text: "{}""#,
        raw_text
    )
}

fn build_logo_prompt(company_name: &str) -> String {
    format!(
        "A professional, minimalist, and modern vector logo for a company named \"{}\". \
         The logo should be clean, centered, and suitable for a professional business \
         profile. High contrast, white background, square composition.",
        company_name
    )
}

/// Strict output schema sent with every formatting request; the model must
/// answer with JSON matching the posting's field set.
fn response_schema() -> JsonValue {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "company": { "type": "STRING" },
            "description": { "type": "STRING" },
            "requirements": { "type": "STRING" },
            "procedure": { "type": "STRING" },
            "location": { "type": "STRING" },
            "type": {
                "type": "STRING",
                "enum": ["Full-time", "Part-time", "Contract", "Gig", "Service"]
            },
            "category": { "type": "STRING" },
            "salary": { "type": "STRING" },
            "tags": { "type": "ARRAY", "items": { "type": "STRING" } },
            "whatsapp": { "type": "STRING" },
            "phone": { "type": "STRING" },
            "email": { "type": "STRING" },
            "link": { "type": "STRING" }
        },
        "required": [
            "title", "company", "description", "requirements",
            "procedure", "location", "type", "category", "tags"
        ]
    })
}

/// Leniency policy: anything that does not parse as the schema comes back
/// as an empty extraction, which submission validation then rejects.
fn parse_processed(text: &str) -> AiProcessedJob {
    serde_json::from_str(text).unwrap_or_default()
}

fn extract_text(body: &JsonValue) -> Option<String> {
    let parts = body
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    parts
        .iter()
        .find_map(|part| part.get("text").and_then(|t| t.as_str()))
        .map(str::to_string)
}

/// First inline image payload in the response, rendered as a data URI.
fn extract_inline_image(body: &JsonValue) -> Option<String> {
    let parts = body
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    parts.iter().find_map(|part| {
        let inline = part.get("inlineData")?;
        let mime = inline.get("mimeType")?.as_str()?;
        let data = inline.get("data")?.as_str()?;
        Some(format!("data:{};base64,{}", mime, data))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn prompt_embeds_the_raw_text_and_the_location_contract() {
        let prompt = build_format_prompt("need a driver in Lagos whatsapp 08012345678");
        assert!(prompt.contains("need a driver in Lagos whatsapp 08012345678"));
        assert!(prompt.contains("\"State, Area\""));
        assert!(prompt.contains("NEVER mention yourself"));
    }

    #[test]
    fn schema_requires_the_posting_core_fields() {
        let schema = response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        for field in ["title", "company", "description", "location", "type", "tags"] {
            assert!(required.contains(&field), "{field} must be required");
        }
        let type_values = &schema["properties"]["type"]["enum"];
        assert_eq!(type_values.as_array().unwrap().len(), 5);
    }

    #[test]
    fn malformed_model_output_becomes_an_empty_extraction() {
        let processed = parse_processed("not json at all");
        assert!(processed.title.is_none());
        assert!(processed.tags.is_empty());

        let processed = parse_processed("");
        assert!(processed.company.is_none());
    }

    #[test]
    fn empty_extraction_is_rejected_downstream_not_here() {
        let processed = parse_processed("{}");
        match processed.into_submission() {
            Err(Error::BadRequest(_)) => {}
            Ok(payload) => assert!(payload.validate().is_err()),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn well_formed_extraction_round_trips_into_a_submission() {
        let processed = parse_processed(
            r#"{
                "title": "Driver",
                "company": "Acme Logistics",
                "description": "Daily runs around Lekki",
                "requirements": "- Valid license",
                "procedure": "1. Send a message",
                "location": "Lagos, Lekki",
                "type": "Gig",
                "category": "Logistics",
                "tags": ["driver", "lagos"],
                "whatsapp": "08012345678"
            }"#,
        );
        let payload = processed.into_submission().unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.tags, "driver, lagos");
        assert_eq!(payload.whatsapp.as_deref(), Some("08012345678"));
    }

    #[test]
    fn inline_image_parts_become_data_uris() {
        let body = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "ignored" },
                        { "inlineData": { "mimeType": "image/png", "data": "QUJD" } }
                    ]
                }
            }]
        });
        assert_eq!(
            extract_inline_image(&body).as_deref(),
            Some("data:image/png;base64,QUJD")
        );
        assert_eq!(extract_text(&body).as_deref(), Some("ignored"));
    }

    #[test]
    fn responses_without_an_image_yield_none() {
        let body = serde_json::json!({ "candidates": [] });
        assert!(extract_inline_image(&body).is_none());
    }
}
