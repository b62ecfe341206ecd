use crate::application::read_models::ViewModel;
use crate::shared::Result;

/// ViewFormatter port for rendering read models
///
/// Implemented once per output format (colored text, JSON).
pub trait ViewFormatter {
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, view: &ViewModel) -> Result<String>;
}
