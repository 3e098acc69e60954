use crate::config::toml_config::BridgeSettings;
use crate::core::discovery::{self, DEFAULT_TIMEOUT_SECS, TIMEOUT_MARGIN};
use crate::core::transport::HttpTransport;
use crate::domain::model::{
    CopilotTask, CopilotTaskReport, DesktopType, Health, MessageLevel, PromptRequest,
    TerminalCommand, TerminalOutput, WorkspaceInfo, DEFAULT_TERMINAL_TIMEOUT_SECS,
};
use crate::domain::ports::Transport;
use crate::utils::error::Result;
use serde_json::{json, Value};
use std::time::Duration;

/// Wrapper around the Agent Bridge HTTP API. One round trip per method;
/// missing response fields degrade to defaults rather than errors.
pub struct BridgeClient<T: Transport = HttpTransport> {
    transport: T,
}

impl BridgeClient<HttpTransport> {
    /// Auto-discover the bridge on the default host and port list.
    pub async fn connect() -> Result<Self> {
        let port = discovery::discover_port(discovery::BRIDGE_HOST, &discovery::BRIDGE_PORTS).await?;
        Self::with_address(discovery::BRIDGE_HOST, port)
    }

    /// Connect using settings; an explicit port skips discovery.
    pub async fn connect_with(settings: &BridgeSettings) -> Result<Self> {
        let port = match settings.port {
            Some(port) => port,
            None => discovery::discover_port(&settings.host, &settings.ports).await?,
        };
        let transport = HttpTransport::with_timeout(
            &settings.host,
            port,
            Duration::from_secs(settings.prompt_timeout_secs),
        )?;
        Ok(Self::new(transport))
    }

    pub fn with_address(host: &str, port: u16) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(host, port)?))
    }
}

impl<T: Transport> BridgeClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    fn default_post_timeout() -> Duration {
        Duration::from_secs(DEFAULT_TIMEOUT_SECS) + TIMEOUT_MARGIN
    }

    // Health / info

    /// Bridge status, version, available models, and workspace path.
    pub async fn health(&self) -> Result<Health> {
        let body = self.transport.get("/health", &[]).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Open workspace folders and the active file path.
    pub async fn workspace_info(&self) -> Result<WorkspaceInfo> {
        let body = self.transport.get("/workspace-info", &[]).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// The last 100 bridge request log entries.
    pub async fn log(&self) -> Result<Vec<String>> {
        let body = self.transport.get("/log", &[]).await?;
        Ok(list_field(&body, "entries"))
    }

    // LLM

    /// Send a prompt and return the plain-text response.
    pub async fn prompt(&self, request: PromptRequest) -> Result<String> {
        let timeout = Duration::from_secs(request.timeout) + TIMEOUT_MARGIN;
        let body = self
            .transport
            .post("/prompt", serde_json::to_value(&request)?, timeout)
            .await?;
        Ok(text_field(&body, "text"))
    }

    /// Prompt with all defaults (auto model, no system prompt).
    pub async fn prompt_text(&self, prompt: &str) -> Result<String> {
        self.prompt(PromptRequest::new(prompt)).await
    }

    /// Full copilot task pipeline on the sidecar: prompt with auto-dismiss,
    /// watch for file changes, accept edits, save, and report the diff.
    pub async fn copilot_task(&self, task: CopilotTask) -> Result<CopilotTaskReport> {
        let timeout = Duration::from_secs(task.timeout + task.watch_secs + 30);
        let body = self
            .transport
            .post("/copilot-task", serde_json::to_value(&task)?, timeout)
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    // Filesystem

    pub async fn read_file(&self, path: &str) -> Result<String> {
        let body = self.transport.get("/read-file", &[("path", path)]).await?;
        Ok(text_field(&body, "content"))
    }

    /// Write content to a file, returning the number of bytes written.
    pub async fn write_file(&self, path: &str, content: &str, create_dirs: bool) -> Result<u64> {
        let body = self
            .transport
            .post(
                "/write-file",
                json!({"path": path, "content": content, "create_dirs": create_dirs}),
                Self::default_post_timeout(),
            )
            .await?;
        Ok(u64_field(&body, "bytes"))
    }

    /// Replace `old_text` with `new_text` in a file (exact string match).
    pub async fn apply_edit(&self, path: &str, old_text: &str, new_text: &str) -> Result<bool> {
        let body = self
            .transport
            .post(
                "/apply-edit",
                json!({"path": path, "old_text": old_text, "new_text": new_text}),
                Self::default_post_timeout(),
            )
            .await?;
        Ok(bool_field(&body, "ok"))
    }

    /// List entries at `path`; an empty path means the workspace root.
    pub async fn list_dir(&self, path: &str) -> Result<Vec<String>> {
        let body = self.transport.get("/list-dir", &[("path", path)]).await?;
        Ok(list_field(&body, "entries"))
    }

    // Terminal

    /// Run a shell command. Captured runs return stdout/stderr/exit code;
    /// uncaptured runs open a visible editor terminal and return defaults.
    pub async fn run_terminal(&self, command: TerminalCommand) -> Result<TerminalOutput> {
        let logical = command.timeout.unwrap_or(DEFAULT_TERMINAL_TIMEOUT_SECS);
        let timeout = Duration::from_secs(logical + 15);
        let body = self
            .transport
            .post("/run-terminal", serde_json::to_value(&command)?, timeout)
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Run a command silently and return trimmed stdout.
    pub async fn run_and_capture(
        &self,
        command: &str,
        cwd: Option<&str>,
        timeout_secs: u64,
    ) -> Result<String> {
        let mut request = TerminalCommand::captured(command).with_timeout(timeout_secs);
        if let Some(cwd) = cwd {
            request = request.with_cwd(cwd);
        }
        let output = self.run_terminal(request).await?;
        Ok(output.stdout.trim().to_string())
    }

    // Editor

    /// Open a file in the editor, optionally jumping to a line.
    pub async fn open_file(&self, path: &str, line: Option<u32>) -> Result<bool> {
        let mut request = json!({"path": path});
        if let Some(line) = line {
            request["line"] = json!(line);
        }
        let body = self
            .transport
            .post("/open-file", request, Self::default_post_timeout())
            .await?;
        Ok(bool_field(&body, "ok"))
    }

    /// Errors and warnings for a file, or for all open files when `None`.
    /// The shape varies by language server, so the body comes back raw.
    pub async fn diagnostics(&self, path: Option<&str>) -> Result<Value> {
        let query: Vec<(&str, &str)> = match path {
            Some(path) => vec![("path", path)],
            None => vec![],
        };
        self.transport.get("/diagnostics", &query).await
    }

    /// Execute an editor command by ID (e.g. `workbench.action.reloadWindow`).
    pub async fn exec_command(&self, command: &str, args: Vec<Value>) -> Result<Value> {
        let body = self
            .transport
            .post(
                "/exec-command",
                json!({"command": command, "args": args}),
                Self::default_post_timeout(),
            )
            .await?;
        Ok(body.get("result").cloned().unwrap_or(Value::Null))
    }

    /// Show a notification in the editor.
    pub async fn show_message(&self, message: &str, level: MessageLevel) -> Result<bool> {
        let body = self
            .transport
            .post(
                "/show-message",
                json!({"message": message, "level": level}),
                Self::default_post_timeout(),
            )
            .await?;
        Ok(bool_field(&body, "ok"))
    }

    // Dialog auto-dismiss

    /// Click all Allow/Continue/Keep/Accept dialogs once; returns the
    /// commands that were run.
    pub async fn keep_going(&self) -> Result<Vec<String>> {
        let body = self
            .transport
            .post("/keep-going", json!({}), Self::default_post_timeout())
            .await?;
        Ok(list_field(&body, "commands_run"))
    }

    /// Start or stop the background dialog-poking loop.
    pub async fn auto_dismiss(&self, active: bool, interval_ms: u64) -> Result<bool> {
        let body = self
            .transport
            .post(
                "/auto-dismiss",
                json!({"active": active, "interval_ms": interval_ms}),
                Self::default_post_timeout(),
            )
            .await?;
        Ok(body.get("active").and_then(Value::as_bool).unwrap_or(active))
    }

    pub async fn auto_dismiss_status(&self) -> Result<bool> {
        let body = self.transport.get("/auto-dismiss", &[]).await?;
        Ok(bool_field(&body, "active"))
    }

    // Change tracking

    /// Start a file-change watch session and return its id.
    pub async fn watch_start(&self, label: &str) -> Result<String> {
        let body = self
            .transport
            .post(
                "/watch-start",
                json!({"label": label}),
                Self::default_post_timeout(),
            )
            .await?;
        Ok(text_field(&body, "watch_id"))
    }

    /// Files changed since the matching `watch_start`.
    pub async fn watch_result(&self, watch_id: &str) -> Result<Vec<String>> {
        let body = self
            .transport
            .get("/watch-result", &[("id", watch_id)])
            .await?;
        Ok(list_field(&body, "files"))
    }

    /// Files changed since a Unix timestamp in milliseconds.
    pub async fn changes_since(&self, timestamp_ms: i64) -> Result<Vec<String>> {
        let ts = timestamp_ms.to_string();
        let body = self.transport.get("/changes-since", &[("ts", &ts)]).await?;
        Ok(list_field(&body, "files"))
    }

    /// Files changed within the given window, measured from the wall clock.
    pub async fn changes_in_last(&self, window: chrono::Duration) -> Result<Vec<String>> {
        let since = chrono::Utc::now() - window;
        self.changes_since(since.timestamp_millis()).await
    }

    /// Unsaved/dirty documents awaiting approval.
    pub async fn pending_approvals(&self) -> Result<Vec<String>> {
        let body = self.transport.get("/pending-approvals", &[]).await?;
        Ok(list_field(&body, "files"))
    }

    pub async fn accept_edits(&self) -> Result<bool> {
        let body = self
            .transport
            .post("/accept-edits", json!({}), Self::default_post_timeout())
            .await?;
        Ok(bool_field(&body, "ok"))
    }

    pub async fn reject_edits(&self) -> Result<bool> {
        let body = self
            .transport
            .post("/reject-edits", json!({}), Self::default_post_timeout())
            .await?;
        Ok(bool_field(&body, "ok"))
    }

    // Integrations

    /// Post a message to Slack. An empty channel uses the sidecar's
    /// configured default; the bot token lives in the sidecar settings.
    pub async fn slack_post(&self, text: &str, channel: Option<&str>) -> Result<bool> {
        let mut request = json!({"text": text});
        if let Some(channel) = channel {
            request["channel"] = json!(channel);
        }
        let body = self
            .transport
            .post("/slack-post", request, Self::default_post_timeout())
            .await?;
        Ok(bool_field(&body, "ok"))
    }

    /// Open an app and type text into it via the sidecar's desktop
    /// automation (Windows only on the sidecar side).
    pub async fn desktop_type(&self, request: DesktopType) -> Result<bool> {
        let body = self
            .transport
            .post(
                "/desktop-type",
                serde_json::to_value(&request)?,
                Self::default_post_timeout(),
            )
            .await?;
        Ok(bool_field(&body, "ok"))
    }
}

fn text_field(body: &Value, key: &str) -> String {
    body.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn bool_field(body: &Value, key: &str) -> bool {
    body.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn u64_field(body: &Value, key: &str) -> u64 {
    body.get(key).and_then(Value::as_u64).unwrap_or(0)
}

fn list_field(body: &Value, key: &str) -> Vec<String> {
    body.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
