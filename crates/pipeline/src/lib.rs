pub mod enricher;
pub mod prompt;
pub mod schema;

pub use enricher::{apply_resolution, enrich};
pub use schema::{SupplyChainNode, SupplyChainResponse, UNKNOWN_ADDRESS};

use futures::future::join_all;
use generate::{GenerationError, StructuredGenerator, generate_structured};
use places::PlaceResolver;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// What the generator is asked to return. The echoed `product` is ignored in
/// favour of the requested name.
#[derive(Debug, Deserialize)]
struct GeneratedSupplyChain {
    supply_chain: Vec<SupplyChainNode>,
}

/// Product name to generated companies to concurrently geocoded companies.
#[derive(Clone)]
pub struct SupplyChainPipeline {
    generator: Arc<dyn StructuredGenerator>,
    resolver: Arc<dyn PlaceResolver>,
}

impl SupplyChainPipeline {
    pub fn new(generator: Arc<dyn StructuredGenerator>, resolver: Arc<dyn PlaceResolver>) -> Self {
        Self {
            generator,
            resolver,
        }
    }

    /// Run the pipeline for one product.
    ///
    /// Only a generation failure is returned as an error. Place lookups are
    /// all dispatched at once and awaited together; the response keeps the
    /// generated order regardless of which lookup finishes first.
    pub async fn run(&self, product_name: &str) -> Result<SupplyChainResponse, GenerationError> {
        let product = product_name.trim().to_string();

        // Step 1: Build prompt
        let prompt = prompt::build_supply_chain_prompt(&product);

        // Step 2: Structured generation (terminal on failure)
        let generated: GeneratedSupplyChain =
            generate_structured(self.generator.as_ref(), &prompt, &schema::supply_chain_schema()).await?;

        info!(
            product = %product,
            nodes = generated.supply_chain.len(),
            "Generated supply chain"
        );

        // Step 3: Enrich every node concurrently
        let resolver = self.resolver.as_ref();
        let supply_chain = join_all(
            generated
                .supply_chain
                .into_iter()
                .map(|node| enrich(resolver, node)),
        )
        .await;

        let resolved = supply_chain.iter().filter(|n| n.found).count();
        info!(
            product = %product,
            resolved,
            unresolved = supply_chain.len() - resolved,
            "Enriched supply chain"
        );

        // Step 4: Assemble
        Ok(SupplyChainResponse {
            product,
            supply_chain,
        })
    }
}
