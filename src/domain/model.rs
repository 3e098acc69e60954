use serde::{Deserialize, Serialize};

/// Bridge status as reported by `GET /health`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Health {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub models: Vec<String>,
    #[serde(default)]
    pub workspace: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceInfo {
    #[serde(default)]
    pub folders: Vec<String>,
    #[serde(default)]
    pub active_file: Option<String>,
}

/// Body for `POST /prompt`. Empty optional fields are omitted so the
/// sidecar picks its own model and system prompt.
#[derive(Debug, Clone, Serialize)]
pub struct PromptRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_files: Option<Vec<String>>,
    /// Seconds to wait for the LLM response.
    pub timeout: u64,
}

impl PromptRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: None,
            system: None,
            context_files: None,
            timeout: crate::core::discovery::DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_context_files(mut self, files: Vec<String>) -> Self {
        self.context_files = Some(files);
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = secs;
        self
    }
}

/// Body for `POST /copilot-task`: prompt with auto-dismiss in the
/// background, wait for file changes, auto-accept edits, save all.
#[derive(Debug, Clone, Serialize)]
pub struct CopilotTask {
    pub prompt: String,
    pub auto_accept: bool,
    pub watch_secs: u64,
    pub timeout: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_files: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl CopilotTask {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            auto_accept: true,
            watch_secs: 60,
            timeout: crate::core::discovery::DEFAULT_TIMEOUT_SECS,
            context_files: None,
            model: None,
        }
    }

    pub fn with_auto_accept(mut self, auto_accept: bool) -> Self {
        self.auto_accept = auto_accept;
        self
    }

    pub fn with_watch_secs(mut self, secs: u64) -> Self {
        self.watch_secs = secs;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_context_files(mut self, files: Vec<String>) -> Self {
        self.context_files = Some(files);
        self
    }
}

/// Result of a copilot task. `run_output` is filled in by the
/// `ask_then_run` pipeline, not by the sidecar.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CopilotTaskReport {
    #[serde(default)]
    pub llm_response: String,
    #[serde(default)]
    pub files_changed: Vec<String>,
    #[serde(default)]
    pub diff_summary: String,
    #[serde(default)]
    pub elapsed_ms: u64,
    #[serde(default)]
    pub run_output: String,
}

/// Body for `POST /run-terminal`.
///
/// With `capture_output` the command runs silently and stdout/stderr come
/// back in the response; without it a visible editor terminal opens and
/// nothing is captured.
#[derive(Debug, Clone, Serialize)]
pub struct TerminalCommand {
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
    pub capture_output: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl TerminalCommand {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            cwd: None,
            capture_output: false,
            timeout: None,
        }
    }

    pub fn captured(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            cwd: None,
            capture_output: true,
            timeout: Some(DEFAULT_TERMINAL_TIMEOUT_SECS),
        }
    }

    pub fn with_cwd(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Some(secs);
        self
    }
}

pub const DEFAULT_TERMINAL_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerminalOutput {
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    #[serde(default)]
    pub exit_code: i32,
}

/// Notification severity for `POST /show-message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Warn,
    Error,
}

impl Default for MessageLevel {
    fn default() -> Self {
        MessageLevel::Info
    }
}

/// Body for `POST /desktop-type`: open an app and type text into it.
/// The automation itself happens on the sidecar side (Windows only).
#[derive(Debug, Clone, Serialize)]
pub struct DesktopType {
    pub app: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_title: Option<String>,
    pub delay_ms: u64,
}

impl DesktopType {
    pub fn new(app: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            text: text.into(),
            window_title: None,
            delay_ms: 2000,
        }
    }

    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = Some(title.into());
        self
    }

    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}
