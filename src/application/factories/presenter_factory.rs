use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::ports::outbound::OutputPresenter;
use std::path::PathBuf;

/// Where rendered views go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterType {
    Stdout,
    File(PathBuf),
}

impl PresenterType {
    /// `--output <file>` selects a file, otherwise stdout
    pub fn from_output(output: Option<PathBuf>) -> Self {
        output.map_or(PresenterType::Stdout, PresenterType::File)
    }
}

/// Factory for output presenters
pub struct PresenterFactory;

impl PresenterFactory {
    /// # Examples
    /// ```
    /// use jar_hell::application::factories::{PresenterFactory, PresenterType};
    ///
    /// let presenter = PresenterFactory::create(PresenterType::from_output(None));
    /// ```
    pub fn create(presenter_type: PresenterType) -> Box<dyn OutputPresenter> {
        match presenter_type {
            PresenterType::Stdout => Box::new(StdoutPresenter::new()),
            PresenterType::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_presenter_type_from_output() {
        assert_eq!(PresenterType::from_output(None), PresenterType::Stdout);
        assert_eq!(
            PresenterType::from_output(Some(PathBuf::from("report.json"))),
            PresenterType::File(PathBuf::from("report.json"))
        );
    }

    #[test]
    fn test_file_presenter_writes_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");
        let presenter = PresenterFactory::create(PresenterType::File(path.clone()));
        presenter.present("jar hell").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "jar hell");
    }
}
