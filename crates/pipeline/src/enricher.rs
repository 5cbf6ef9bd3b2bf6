use places::{PlaceResolver, PlaceResult};
use tracing::warn;

use crate::schema::{SupplyChainNode, UNKNOWN_ADDRESS};

/// Resolve a node's location and merge the outcome into it.
///
/// Never fails: a provider error is logged and treated as `NotFound`.
pub async fn enrich(resolver: &dyn PlaceResolver, node: SupplyChainNode) -> SupplyChainNode {
    let outcome = match resolver.resolve(&node.location_query).await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(
                company = %node.company_name,
                query = %node.location_query,
                error = %e,
                "Place resolution failed, marking node as not found"
            );
            PlaceResult::NotFound
        }
    };

    apply_resolution(node, outcome)
}

/// Merge a resolution outcome into a node. Identity fields are untouched.
pub fn apply_resolution(mut node: SupplyChainNode, outcome: PlaceResult) -> SupplyChainNode {
    match outcome {
        PlaceResult::Found(place) => {
            node.found = true;
            node.coordinates = Some(place.coordinates);
            node.address = place.address;
        }
        PlaceResult::NotFound => {
            node.found = false;
            node.coordinates = None;
            node.address = UNKNOWN_ADDRESS.to_string();
        }
    }
    node
}
