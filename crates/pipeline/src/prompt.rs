/// Number of companies requested from the generator. Only enforced through
/// the prompt wording.
pub const NODES_REQUESTED: usize = 5;

pub fn build_supply_chain_prompt(product_name: &str) -> String {
    format!(
        r#"Analyze the supply chain for the product: "{product}".

INSTRUCTIONS:
1. Identify exactly {count} distinct, real companies involved in producing this product
2. Cover different stages: raw materials, components, manufacturing, assembly, distribution
3. For each company give its name and its specific role for this product
4. For each company give a location search string that a map search can resolve,
   such as a named factory, plant or headquarters with its city and country.
   Do not give only a city.

RULES:
- Do not repeat a company
- Roles must be specific, e.g. "Lithium-ion cell supplier", not "Supplier"
- Output must follow the provided JSON schema"#,
        product = product_name.trim(),
        count = NODES_REQUESTED,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_product_and_count() {
        let prompt = build_supply_chain_prompt("  bicycle ");

        assert!(prompt.contains("\"bicycle\""));
        assert!(prompt.contains("exactly 5 distinct"));
        assert!(prompt.contains("location search string"));
    }
}
