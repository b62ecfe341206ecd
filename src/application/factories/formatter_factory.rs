use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ViewFormatter;

/// Factory for view formatters
///
/// Picks the formatter adapter for an [`OutputFormat`]; colors only apply to
/// text output.
pub struct FormatterFactory;

impl FormatterFactory {
    /// # Examples
    /// ```
    /// use jar_hell::application::dto::OutputFormat;
    /// use jar_hell::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Json, false);
    /// ```
    pub fn create(format: OutputFormat, color: bool) -> Box<dyn ViewFormatter> {
        match format {
            OutputFormat::Text => Box::new(TextFormatter::new(color)),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::{CountView, ViewModel};

    #[test]
    fn test_json_formatter_selected() {
        let formatter = FormatterFactory::create(OutputFormat::Json, true);
        let output = formatter.format(&ViewModel::Count(CountView { count: 7 })).unwrap();
        assert!(output.contains("\"count\": 7"));
    }

    #[test]
    fn test_text_formatter_selected() {
        let formatter = FormatterFactory::create(OutputFormat::Text, false);
        let output = formatter.format(&ViewModel::Count(CountView { count: 7 })).unwrap();
        assert!(output.contains("7"));
        assert!(!output.contains('{'));
    }
}
