//! Plain prompt queries without brand context.

use std::path::Path;

use anyhow::Context;

/// Send each prompt's text to the model as-is and print the replies.
///
/// Individual failures are logged and skipped.
///
/// # Errors
///
/// Returns an error if the prompts cannot be loaded, the client cannot be
/// built, or every prompt fails.
pub(crate) async fn run_ask(
    config: &brandtrack_core::AppConfig,
    prompts_path: Option<&Path>,
) -> anyhow::Result<()> {
    let path = prompts_path.unwrap_or(config.prompts_path.as_path());
    let prompts = brandtrack_core::load_prompts(path)
        .with_context(|| format!("loading prompts from {}", path.display()))?
        .prompts;

    let client = crate::build_gemini_client(config)?;

    let mut failed: usize = 0;
    for prompt in &prompts {
        println!();
        println!("--- Prompt: {}", prompt.text);
        match client.generate(&prompt.text).await {
            Ok(text) => println!("{text}"),
            Err(e) => {
                tracing::error!(prompt = %prompt.id, error = %e, "prompt query failed");
                eprintln!("error: prompt '{}' failed: {e}", prompt.id);
                failed += 1;
            }
        }
    }

    if failed == prompts.len() {
        anyhow::bail!("all {failed} prompts failed");
    }

    Ok(())
}
