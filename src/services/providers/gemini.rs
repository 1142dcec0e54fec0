/// Google Gemini provider
///
/// Both calls go through `POST /v1beta/models/{model}:generateContent` with a
/// single user turn. The model is asked for strict JSON, and the reply text is
/// parsed leniently by [`super::parse`].
use crate::{
    error::{AppError, AppResult},
    models::{
        gemini::{GenerateContentRequest, GenerateContentResponse},
        Product, Recommendation,
    },
    services::providers::{parse, RecommendationProvider},
};
use reqwest::Client as HttpClient;
use std::time::Duration;
use tracing::instrument;

const ADVISOR_INSTRUCTIONS: &str = "\
You are a product advisor. Recommend products from the catalog subset below that \
best match the user's request.

Rules:
- Recommend between 3 and 5 products.
- Give each product a \"why\" of 2-3 sentences explaining how it fits the request.
- Only recommend products that appear in the catalog subset.
- Favour relevance first, then value for money.
- Reply with JSON only, matching the schema, and nothing else.";

const RESPONSE_SCHEMA: &str = r#"{
  "recommendations": [
    {
      "product_name": "Product Name",
      "brand": "Brand Name",
      "price": 99.99,
      "category": "Category",
      "description": "Product description",
      "why": "2-3 sentences on why this product fits the request"
    }
  ]
}"#;

#[derive(Clone)]
pub struct GeminiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(
        api_key: String,
        api_url: String,
        model: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
            model,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }

    fn category_prompt(query: &str, available: &[String]) -> AppResult<String> {
        let available = serde_json::to_string(available)
            .map_err(|e| AppError::Internal(format!("Failed to serialize categories: {}", e)))?;

        Ok(format!(
            "Pick 2-5 product categories relevant to this request: \"{}\".\n\
             Choose only from these categories: {}\n\
             Reply with a JSON array of strings, for example [\"Audio\", \"Fitness\"].",
            query, available
        ))
    }

    fn recommendation_prompt(query: &str, candidates: &[Product]) -> AppResult<String> {
        let catalog = serde_json::to_string(candidates)
            .map_err(|e| AppError::Internal(format!("Failed to serialize catalog: {}", e)))?;

        Ok(format!(
            "{}\n\nUser request: \"{}\"\nCatalog subset: {}\n\n\
             Reply in this JSON format:\n{}",
            ADVISOR_INSTRUCTIONS, query, catalog, RESPONSE_SCHEMA
        ))
    }

    /// Sends one prompt and returns the model's reply text
    async fn generate(&self, prompt: String) -> AppResult<String> {
        let response = self
            .http_client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateContentRequest::user_prompt(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body,
                model = %self.model,
                "Gemini request failed"
            );
            return Err(AppError::ExternalApi(format!(
                "Gemini API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        tracing::debug!(response = %response_text, "Raw Gemini API response");

        let parsed: GenerateContentResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                tracing::error!(
                    error = %e,
                    response = %response_text,
                    "Failed to deserialize Gemini response"
                );
                AppError::ExternalApi(format!("Failed to parse Gemini response: {}", e))
            })?;

        Ok(parsed.first_text().unwrap_or_default().to_string())
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for GeminiProvider {
    #[instrument(skip(self, available))]
    async fn extract_categories(
        &self,
        query: &str,
        available: &[String],
    ) -> AppResult<Vec<String>> {
        let text = self.generate(Self::category_prompt(query, available)?).await?;
        let categories = parse::parse_category_list(&text);

        tracing::info!(
            query = %query,
            categories = ?categories,
            provider = self.name(),
            "Category extraction completed"
        );

        Ok(categories)
    }

    #[instrument(skip(self, candidates))]
    async fn recommend(
        &self,
        query: &str,
        candidates: &[Product],
    ) -> AppResult<Vec<Recommendation>> {
        let text = self
            .generate(Self::recommendation_prompt(query, candidates)?)
            .await?;
        let recommendations = parse::parse_recommendations(&text);

        tracing::info!(
            query = %query,
            candidates = candidates.len(),
            results = recommendations.len(),
            provider = self.name(),
            "Recommendation request completed"
        );

        Ok(recommendations)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
