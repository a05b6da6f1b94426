use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::orchestrator::GenerationReport;
use super::records::{deck_from_values, parse_deck, DeckEntry};
use super::theme::ThemeOverride;
use super::SlideError;

/// Slide records sent either as a JSON array or as a string holding one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlidesPayload {
    Records(Vec<Value>),
    Encoded(String),
}

impl SlidesPayload {
    pub fn into_entries(self) -> Result<Vec<DeckEntry>, SlideError> {
        match self {
            SlidesPayload::Records(values) => deck_from_values(values),
            SlidesPayload::Encoded(json) => parse_deck(&json),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GeneratePresentationRequest {
    /// Array of slide records, or a JSON string holding that array.
    #[schema(value_type = Object)]
    pub slides: SlidesPayload,
    pub settings: Option<ThemeOverride>,
    /// Document title. Defaults to the first line of an opening title slide.
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResponse {
    pub fn success(report: &GenerationReport) -> Self {
        Self {
            success: true,
            url: Some(report.url.clone()),
            document_id: Some(report.document_id.clone()),
            page_count: Some(report.page_count),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            url: None,
            document_id: None,
            page_count: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slides_as_array_or_string() {
        let as_array: GeneratePresentationRequest =
            serde_json::from_value(json!({"slides": [{"kind": "closing"}]})).unwrap();
        let as_string: GeneratePresentationRequest =
            serde_json::from_value(json!({"slides": "[{\"kind\": \"closing\"}]"})).unwrap();

        assert_eq!(
            as_array.slides.into_entries().unwrap(),
            as_string.slides.into_entries().unwrap()
        );
    }

    #[test]
    fn test_bad_string_payload_is_parse_error() {
        let err = SlidesPayload::Encoded("[{".to_string()).into_entries().unwrap_err();
        assert!(matches!(err, SlideError::Parse(_)));
    }

    #[test]
    fn test_failure_omits_url() {
        let body = serde_json::to_value(GenerationResponse::failure("Slide generation failed: x")).unwrap();
        assert_eq!(body, json!({"success": false, "error": "Slide generation failed: x"}));
    }
}
