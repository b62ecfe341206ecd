use crate::application::read_models::ViewModel;
use crate::ports::outbound::ViewFormatter;
use crate::shared::Result;
use anyhow::Context;

/// JsonFormatter adapter producing pretty-printed JSON
///
/// Every view is tagged with a `view` field naming its kind.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewFormatter for JsonFormatter {
    fn format(&self, view: &ViewModel) -> Result<String> {
        let mut output =
            serde_json::to_string_pretty(view).context("Failed to serialize view to JSON")?;
        output.push('\n');
        Ok(output)
    }
}
