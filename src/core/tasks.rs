use crate::core::client::BridgeClient;
use crate::domain::model::{CopilotTask, CopilotTaskReport, DEFAULT_TERMINAL_TIMEOUT_SECS};
use crate::domain::ports::Transport;
use crate::utils::error::Result;

/// Slack messages keep at most this many characters of run output.
const SLACK_OUTPUT_LIMIT: usize = 500;

#[derive(Debug, Clone)]
pub struct AskThenRunOptions {
    /// Run the first changed `.py`/`.js` file and capture its stdout.
    pub run_result: bool,
    /// Post a completion summary to Slack.
    pub slack_report: bool,
}

impl Default for AskThenRunOptions {
    fn default() -> Self {
        Self {
            run_result: true,
            slack_report: false,
        }
    }
}

/// Drives the ask-then-run pipeline: copilot task, then optionally run
/// the result and report to Slack.
pub struct TaskRunner<'a, T: Transport> {
    client: &'a BridgeClient<T>,
}

impl<'a, T: Transport> TaskRunner<'a, T> {
    pub fn new(client: &'a BridgeClient<T>) -> Self {
        Self { client }
    }

    pub async fn ask_then_run(
        &self,
        task_description: &str,
        options: AskThenRunOptions,
    ) -> Result<CopilotTaskReport> {
        tracing::info!("Starting copilot task");
        let mut report = self
            .client
            .copilot_task(CopilotTask::new(task_description).with_auto_accept(true))
            .await?;
        tracing::info!(
            "Copilot task done in {} ms, {} file(s) changed",
            report.elapsed_ms,
            report.files_changed.len()
        );

        let mut output = String::new();
        if options.run_result {
            for file in &report.files_changed {
                let command = if file.ends_with(".py") {
                    format!("python \"{}\"", file)
                } else if file.ends_with(".js") {
                    format!("node \"{}\"", file)
                } else {
                    continue;
                };

                tracing::info!("Running changed file: {}", file);
                output = self
                    .client
                    .run_and_capture(&command, None, DEFAULT_TERMINAL_TIMEOUT_SECS)
                    .await?;
                break;
            }
        }

        if options.slack_report {
            let message = build_slack_report(&report.files_changed, &output);
            tracing::info!("Posting task summary to Slack");
            self.client.slack_post(&message, None).await?;
        }

        report.run_output = output;
        Ok(report)
    }
}

fn build_slack_report(files_changed: &[String], output: &str) -> String {
    let changed = if files_changed.is_empty() {
        "none".to_string()
    } else {
        files_changed.join(", ")
    };

    let mut message = format!("Task complete.\nChanged: {}", changed);
    if !output.is_empty() {
        let clipped: String = output.chars().take(SLACK_OUTPUT_LIMIT).collect();
        message.push_str(&format!("\nOutput:\n```\n{}\n```", clipped));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slack_report_without_output() {
        let message = build_slack_report(&["a.py".to_string(), "b.py".to_string()], "");
        assert_eq!(message, "Task complete.\nChanged: a.py, b.py");
    }

    #[test]
    fn test_slack_report_no_changes() {
        let message = build_slack_report(&[], "");
        assert_eq!(message, "Task complete.\nChanged: none");
    }

    #[test]
    fn test_slack_report_clips_long_output() {
        let output = "x".repeat(2000);
        let message = build_slack_report(&["a.py".to_string()], &output);
        assert!(message.contains(&"x".repeat(500)));
        assert!(!message.contains(&"x".repeat(501)));
    }

    #[test]
    fn test_slack_report_clip_is_char_safe() {
        let output = "é".repeat(600);
        let message = build_slack_report(&["a.py".to_string()], &output);
        assert!(message.contains(&"é".repeat(500)));
    }
}
