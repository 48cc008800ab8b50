//! Basic usage example for validoctor

use serde::Serialize;
use serde_json::json;
use validoctor::prelude::*;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Product {
    name: String,
    sku_id: Option<u64>,
    nutrition_facts: Option<serde_json::Value>,
    review_scores: Vec<u8>,
}

fn main() -> Result<(), ConfigError> {
    // Nullity depends on another field of the same patient
    let nullity = MultiRule::reflective(
        "nullity",
        [
            Binding::rule("nutritionFacts", not_null()).when(|p: &Product| p.sku_id.is_some()),
            Binding::rule("nutritionFacts", null()).when(|p: &Product| p.sku_id.is_none()),
        ],
    );
    let validity = MultiRule::reflective(
        "validity",
        [
            Binding::rule("name", not_blank()),
            Binding::rule("name", matches(r"^[A-Z]")?),
            Binding::each("reviewScores", in_range(1, 5)),
        ],
    );

    let product = Product {
        name: String::new(),
        sku_id: Some(42),
        nutrition_facts: None,
        review_scores: vec![1, 6, 3],
    };

    // Pedantic: every ailment
    match Validoctor::default().examine(&product, [&nullity, &validity]) {
        Ok(diagnosis) => println!("{diagnosis}"),
        Err(error) => println!("✗ {error}"),
    }

    // Strict: stop at the first ailment and raise it
    let strict = Validoctor::from_config(ValidoctorConfig::strict());
    if let Err(ExamineError::Unhealthy(diagnosis)) = strict.examine(&product, [&nullity, &validity]) {
        println!("\nrejected with: {}", json!(diagnosis));
    }

    // Rules that do not fit the patient are configuration errors
    let typo = MultiRule::reflective("typo", [Binding::rule("nmae", not_blank())]);
    if let Err(error) = Validoctor::default().examine(&product, [&typo]) {
        println!("\nmisconfigured: {error}");
    }

    Ok(())
}
