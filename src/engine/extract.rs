//! Task extraction from free text via the language model.

use anyhow::Result;
use tracing::debug;

use crate::adapters::LanguageModel;

use super::parse::parse_string_array;

/// Build the extraction instruction prompt for a piece of input text
pub fn extraction_prompt(text: &str) -> String {
    format!(
        "Extract tasks from the text below.\n\
         \n\
         Return ONLY a valid JSON array of strings.\n\
         No explanations.\n\
         No markdown.\n\
         No extra text.\n\
         \n\
         Text:\n\
         {text}\n"
    )
}

/// Ask the model to extract candidate task strings from free text.
///
/// Returns an empty vec when the model response contains no parseable
/// array; callers surface that as a non-fatal "nothing extracted" notice.
pub async fn extract_tasks(model: &dyn LanguageModel, text: &str) -> Result<Vec<String>> {
    let response = model.generate(&extraction_prompt(text)).await?;
    let tasks = parse_string_array(&response);

    if tasks.is_empty() {
        debug!(backend = model.name(), "no tasks extracted from model response");
    }

    Ok(tasks)
}
