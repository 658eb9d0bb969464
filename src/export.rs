//! Sending shopping list items to a task manager.

use log::{debug, error, info};
use reqwest::blocking::Client;
use serde_json::json;

use crate::config::TodoistSettings;
use crate::error::SousError;

/// Something that accepts tasks, one at a time.
pub trait TaskExporter {
    fn add_task(&self, content: &str, project_id: &str) -> Result<(), SousError>;
}

/// Client for the Todoist REST API.
pub struct TodoistClient {
    client: Client,
    base_url: String,
    token: String,
}

impl TodoistClient {
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, TodoistSettings::default().base_url)
    }

    pub fn with_base_url(token: String, base_url: String) -> Self {
        TodoistClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }
}

impl TaskExporter for TodoistClient {
    fn add_task(&self, content: &str, project_id: &str) -> Result<(), SousError> {
        let response = self
            .client
            .post(format!("{}/tasks", self.base_url))
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&json!({
                "content": content,
                "project_id": project_id,
            }))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SousError::Export {
                item: content.to_string(),
                message: format!("{status}: {body}"),
            });
        }

        debug!("Created task '{}'", content);
        Ok(())
    }
}

/// Outcome of [`export_items`].
#[derive(Debug, Default)]
pub struct ExportReport {
    pub exported: usize,
    pub failures: Vec<SousError>,
}

impl ExportReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Adds every item as a task. A failing item is logged and recorded, and
/// the remaining items are still sent.
pub fn export_items<S: AsRef<str>>(
    exporter: &dyn TaskExporter,
    items: &[S],
    project_id: &str,
) -> ExportReport {
    let mut report = ExportReport::default();

    for item in items {
        let item = item.as_ref();
        match exporter.add_task(item, project_id) {
            Ok(()) => report.exported += 1,
            Err(e) => {
                error!("Error exporting item: {}", item);
                error!("{}", e);
                let failure = match e {
                    export @ SousError::Export { .. } => export,
                    other => SousError::Export {
                        item: item.to_string(),
                        message: other.to_string(),
                    },
                };
                report.failures.push(failure);
            }
        }
    }

    info!(
        "Exported {} of {} item(s) to project {}",
        report.exported,
        items.len(),
        project_id
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakeExporter {
        tasks: RefCell<Vec<(String, String)>>,
    }

    impl TaskExporter for FakeExporter {
        fn add_task(&self, content: &str, project_id: &str) -> Result<(), SousError> {
            if content.starts_with("bad") {
                return Err(SousError::Selection("rejected".to_string()));
            }
            self.tasks
                .borrow_mut()
                .push((content.to_string(), project_id.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_export_items_continues_after_failure() {
        let exporter = FakeExporter {
            tasks: RefCell::new(Vec::new()),
        };

        let report = export_items(&exporter, &["eggs", "bad milk", "salt"], "42");

        assert_eq!(report.exported, 2);
        assert!(!report.is_complete());
        match &report.failures[0] {
            SousError::Export { item, .. } => assert_eq!(item, "bad milk"),
            other => panic!("Expected Export error, got {other:?}"),
        }
        assert_eq!(
            *exporter.tasks.borrow(),
            vec![
                ("eggs".to_string(), "42".to_string()),
                ("salt".to_string(), "42".to_string())
            ]
        );
    }

    #[test]
    fn test_export_nothing() {
        let exporter = FakeExporter {
            tasks: RefCell::new(Vec::new()),
        };
        let report = export_items::<&str>(&exporter, &[], "42");
        assert_eq!(report.exported, 0);
        assert!(report.is_complete());
    }
}
