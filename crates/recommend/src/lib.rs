pub mod error;
pub mod llm;
pub mod parse;
pub mod prompt;
pub mod schema;

pub use error::{RecommendError, Result};
pub use llm::{LlmConfig, OpenAiClient};
pub use parse::{ParsedOutcome, parse_recommendations};
pub use prompt::{build_recommendation_prompt, build_sample_prompt};
pub use schema::{BookRecord, ReadingList, sample_books};

use tracing::debug;

pub struct Recommender {
    llm_client: OpenAiClient,
}

impl Recommender {
    pub fn new(llm_client: OpenAiClient) -> Self {
        Self { llm_client }
    }

    /// Ask for recommendations based on `books` and decode the reply.
    ///
    /// `Ok(None)` means the service answered without any content.
    pub async fn recommend(&self, books: &[BookRecord]) -> Result<Option<ParsedOutcome>> {
        let prompt = build_recommendation_prompt(books)?;

        let Some(reply) = self.llm_client.complete(&prompt).await? else {
            return Ok(None);
        };

        let outcome = parse_recommendations(&reply);
        debug!(kind = outcome.kind(), books = books.len(), "Recommendation reply decoded");

        Ok(Some(outcome))
    }

    /// Ask using the built-in three-book example set and return the raw reply.
    pub async fn recommend_sample(&self) -> Result<Option<String>> {
        let prompt = build_sample_prompt()?;
        self.llm_client.complete(&prompt).await
    }
}
