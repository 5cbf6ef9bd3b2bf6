pub mod error;
pub mod llm;
pub mod schema;

pub use error::GenerationError;
pub use llm::{GeminiClient, GeminiConfig};
pub use schema::Schema;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A generative-text provider that can answer a prompt with JSON constrained
/// to a [`Schema`].
#[async_trait]
pub trait StructuredGenerator: Send + Sync {
    /// One outbound call. No retry.
    async fn generate(&self, prompt: &str, shape: &Schema) -> Result<Value, GenerationError>;
}

/// Generate and deserialize into `T`.
///
/// A value that parses as JSON but does not fit `T` is reported as
/// [`GenerationError::SchemaMismatch`].
pub async fn generate_structured<T>(
    generator: &dyn StructuredGenerator,
    prompt: &str,
    shape: &Schema,
) -> Result<T, GenerationError>
where
    T: DeserializeOwned,
{
    let value = generator.generate(prompt, shape).await?;
    serde_json::from_value(value).map_err(|e| GenerationError::SchemaMismatch(e.to_string()))
}
