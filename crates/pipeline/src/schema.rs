use generate::Schema;
use places::Coordinates;
use serde::{Deserialize, Serialize};

/// Address reported for a node whose location could not be resolved.
pub const UNKNOWN_ADDRESS: &str = "Unknown";

/// One company taking part in producing a product.
///
/// Parsed from generated output with only the identity fields set; the
/// enrichment fields default to "not yet resolved".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyChainNode {
    pub company_name: String,
    pub role: String,
    pub location_query: String,
    #[serde(default)]
    pub found: bool,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub address: String,
}

impl SupplyChainNode {
    pub fn new(
        company_name: impl Into<String>,
        role: impl Into<String>,
        location_query: impl Into<String>,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            role: role.into(),
            location_query: location_query.into(),
            found: false,
            coordinates: None,
            address: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyChainResponse {
    pub product: String,
    pub supply_chain: Vec<SupplyChainNode>,
}

/// Shape requested from the generator: the product plus its nodes, identity
/// fields only.
pub fn supply_chain_schema() -> Schema {
    let node = Schema::object([
        ("company_name", Schema::string().describe("Name of the company")),
        (
            "role",
            Schema::string().describe("Specific role in the supply chain, e.g. 'Battery cell supplier'"),
        ),
        (
            "location_query",
            Schema::string()
                .describe("Search string for a map lookup, e.g. 'Shimano headquarters Sakai Japan'"),
        ),
    ]);

    Schema::object([
        ("product", Schema::string()),
        ("supply_chain", Schema::array(node)),
    ])
}
