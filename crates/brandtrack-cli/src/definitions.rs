//! Loading and display of brand and prompt definitions.

use std::path::Path;

use anyhow::Context;
use brandtrack_core::{AppConfig, Brand, Prompt};

pub(crate) struct Definitions {
    pub brands: Vec<Brand>,
    pub prompts: Vec<Prompt>,
}

/// Load both definition files, preferring explicit paths over configured ones.
///
/// # Errors
///
/// Returns an error if either file cannot be read, parsed, or validated.
pub(crate) fn load_definitions(
    config: &AppConfig,
    brands_path: Option<&Path>,
    prompts_path: Option<&Path>,
) -> anyhow::Result<Definitions> {
    let brands_path = brands_path.unwrap_or(config.brands_path.as_path());
    let prompts_path = prompts_path.unwrap_or(config.prompts_path.as_path());

    let brands = brandtrack_core::load_brands(brands_path)
        .with_context(|| format!("loading brands from {}", brands_path.display()))?
        .brands;
    let prompts = brandtrack_core::load_prompts(prompts_path)
        .with_context(|| format!("loading prompts from {}", prompts_path.display()))?
        .prompts;

    tracing::info!(
        brands = brands.len(),
        prompts = prompts.len(),
        "definitions loaded"
    );

    Ok(Definitions { brands, prompts })
}

pub(crate) fn describe_brand(brand: &Brand) -> String {
    format!(
        "{} - variants: [{}] - competitors: [{}]",
        brand.canonical,
        brand.variants.join(", "),
        brand.competitors.join(", ")
    )
}

pub(crate) fn print_definitions(defs: &Definitions) {
    println!("Brands ({}):", defs.brands.len());
    for brand in &defs.brands {
        println!("  {}", describe_brand(brand));
    }
    println!();
    println!("Prompts ({}):", defs.prompts.len());
    for prompt in &defs.prompts {
        println!("  {}: {}", prompt.id, prompt.text);
    }
}
