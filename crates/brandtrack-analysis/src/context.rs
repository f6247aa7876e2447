//! Brand-aware query composition.

use brandtrack_core::Brand;

/// Compose the text sent to the model for one (brand, prompt) pair.
///
/// Frames the brand by canonical name and variants, names its competitors,
/// then appends the prompt text. Empty variant or competitor lists render as
/// nothing after the colon.
#[must_use]
pub fn build_context(brand: &Brand, prompt_text: &str) -> String {
    format!(
        "Focus on analyzing the brand \"{}\" (also known as: {}).\n\
         Consider its competitors: {}.\n\
         \n\
         {}",
        brand.canonical,
        brand.variants.join(", "),
        brand.competitors.join(", "),
        prompt_text
    )
}
