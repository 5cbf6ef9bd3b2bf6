use generate::Schema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct RecipeRequest {
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub difficulty: String,
    pub prep_time_minutes: i64,
    pub calories: i64,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
}

pub fn recipe_schema() -> Schema {
    let ingredient = Schema::object([("name", Schema::string()), ("amount", Schema::string())]);

    Schema::object([
        ("title", Schema::string()),
        ("difficulty", Schema::string().describe("Easy, Medium or Hard")),
        ("prep_time_minutes", Schema::integer()),
        ("calories", Schema::integer().describe("Calories per serving")),
        ("ingredients", Schema::array(ingredient)),
        ("instructions", Schema::array(Schema::string())),
    ])
}

pub fn build_recipe_prompt(request: &RecipeRequest) -> String {
    let ingredients: Vec<&str> = request
        .ingredients
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .collect();

    let restrictions = match request.dietary_restrictions.as_deref().map(str::trim) {
        Some(r) if !r.is_empty() => r,
        _ => "none",
    };

    format!(
        r#"Create a recipe using these ingredients: {ingredients}.
Dietary restrictions: {restrictions}.

RULES:
- Use the listed ingredients as the base; common pantry staples may be added
- Every ingredient must have a concrete amount
- Instructions are ordered steps, one action per step
- Output must follow the provided JSON schema"#,
        ingredients = ingredients.join(", "),
    )
}
