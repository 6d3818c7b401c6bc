//! Live adapter for the Stability AI text-to-image API.

use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;

use crate::error::ImageError;
use crate::model::text_to_image_url;
use crate::ports::image_generator::{
    GenerateFuture, GeneratedImage, ImageGenerator, ImageRequest, ImageResponse,
};

/// Live Stability generator that calls the REST v1 API.
pub struct StabilityGenerator {
    client: Client,
    api_key: String,
    base_url: String,
}

impl StabilityGenerator {
    /// Create a new Stability generator with the given API key and base URL.
    #[must_use]
    pub fn new(api_key: String, base_url: String) -> Self {
        Self { client: Client::new(), api_key, base_url }
    }
}

impl ImageGenerator for StabilityGenerator {
    fn generate(&self, request: &ImageRequest) -> GenerateFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let url = text_to_image_url(&self.base_url, &request.engine);
            let body = request_body(&request);

            tracing::debug!(%url, engine = %request.engine, "sending text-to-image request");

            let response = self
                .client
                .post(&url)
                .header(ACCEPT, "application/json")
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            let response_text = response.text().await?;

            if !status.is_success() {
                return Err(ImageError::Api { status: status.as_u16(), message: response_text });
            }

            let images = parse_artifacts(&response_text)?;
            tracing::debug!(count = images.len(), "text-to-image request succeeded");
            Ok(ImageResponse { images })
        })
    }
}

/// Build the JSON body for a text-to-image request.
pub(crate) fn request_body(request: &ImageRequest) -> Value {
    let params = &request.params;
    serde_json::json!({
        "text_prompts": [{ "text": request.prompt }],
        "cfg_scale": params.cfg_scale,
        "height": params.height,
        "width": params.width,
        "steps": params.steps,
        "samples": params.samples,
    })
}

/// Extract the artifact list from a success response body.
///
/// The body must be a JSON object whose `artifacts` field is an array of
/// objects each carrying a string `base64` field. Anything else is a shape
/// failure.
pub(crate) fn parse_artifacts(body: &str) -> Result<Vec<GeneratedImage>, ImageError> {
    let parsed: Value = serde_json::from_str(body)
        .map_err(|e| ImageError::MalformedResponse(format!("response is not JSON: {e}")))?;

    let artifacts = match parsed.get("artifacts") {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(ImageError::MalformedResponse("'artifacts' is not an array".into()));
        }
        None => return Err(ImageError::MalformedResponse(format!("no 'artifacts' in {}", truncate(body)))),
    };

    artifacts
        .iter()
        .enumerate()
        .map(|(i, artifact)| {
            artifact
                .get("base64")
                .and_then(Value::as_str)
                .map(GeneratedImage::from_base64)
                .ok_or_else(|| {
                    ImageError::MalformedResponse(format!("artifact {i} has no 'base64' string"))
                })
        })
        .collect()
}

fn truncate(body: &str) -> String {
    if body.len() > 500 {
        let cut = (0..=500).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
