use jar_hell::prelude::*;
use std::sync::{Arc, Mutex};

/// Records every progress call as a line, prefixed by its kind
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    messages: Arc<Mutex<Vec<String>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    /// Whether any recorded line contains `text`
    pub fn contains(&self, text: &str) -> bool {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .any(|line| line.contains(text))
    }

    fn push(&self, line: String) {
        self.messages.lock().unwrap().push(line);
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.push(message.to_string());
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        self.push(match message {
            Some(detail) => format!("Progress: {}/{} - {}", current, total, detail),
            None => format!("Progress: {}/{}", current, total),
        });
    }

    fn report_error(&self, message: &str) {
        self.push(format!("Error: {}", message));
    }

    fn report_completion(&self, message: &str) {
        self.push(format!("Completed: {}", message));
    }
}
