//! Dispatcher backed by an external program
//!
//! Runs `<program> [args...] --phone <number> --env <credential file>` and
//! returns whatever the program printed. The child is killed if the caller
//! stops waiting for it (e.g. on timeout).

use crate::config::DispatcherConfig;
use crate::domain::dispatch::{AdapterFailure, DispatcherAdapter, TrunkProvisioner};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Process-based dispatcher
#[derive(Debug, Clone)]
pub struct ProcessDispatcher {
    program: String,
    args: Vec<String>,
    trunk_args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl ProcessDispatcher {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            trunk_args: Vec::new(),
            working_dir: None,
        }
    }

    pub fn from_config(config: &DispatcherConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            trunk_args: config.trunk_args.clone(),
            working_dir: config.working_dir.as_ref().map(PathBuf::from),
        }
    }

    pub fn with_trunk_args(mut self, trunk_args: Vec<String>) -> Self {
        self.trunk_args = trunk_args;
        self
    }

    fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        cmd
    }

    async fn run(&self, mut cmd: Command) -> Result<String, AdapterFailure> {
        let output = cmd
            .output()
            .await
            .map_err(|e| AdapterFailure::Spawn(format!("{}: {}", self.program, e)))?;

        collect(output)
    }
}

/// Combined stdout/stderr on success, the most useful stream on failure
fn collect(output: Output) -> Result<String, AdapterFailure> {
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if output.status.success() {
        if !stderr.is_empty() {
            debug!("Dispatcher stderr: {}", stderr.trim_end());
        }
        let mut combined = stdout;
        if !combined.is_empty() && !combined.ends_with('\n') && !stderr.is_empty() {
            combined.push('\n');
        }
        combined.push_str(&stderr);
        Ok(combined)
    } else {
        let code = output.status.code();
        warn!("Dispatcher exited with code {:?}", code);
        Err(AdapterFailure::Exit {
            code,
            output: if stderr.trim().is_empty() { stdout } else { stderr },
        })
    }
}

#[async_trait]
impl DispatcherAdapter for ProcessDispatcher {
    async fn dispatch(&self, phone_number: &str, credentials: &Path) -> Result<String, AdapterFailure> {
        let mut args = self.args.clone();
        args.push("--phone".to_string());
        args.push(phone_number.to_string());
        args.push("--env".to_string());
        args.push(credentials.display().to_string());

        info!("Running dispatcher {} for {}", self.program, phone_number);
        self.run(self.command(&args)).await
    }
}

#[async_trait]
impl TrunkProvisioner for ProcessDispatcher {
    async fn setup_trunk(&self) -> Result<String, AdapterFailure> {
        info!("Running trunk setup with {}", self.program);
        self.run(self.command(&self.trunk_args)).await
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> ProcessDispatcher {
        ProcessDispatcher::new("sh", vec!["-c".to_string(), script.to_string(), "dispatch".to_string()])
    }

    #[tokio::test]
    async fn test_passes_phone_and_env_arguments() {
        // $0 is "dispatch", the dispatcher flags follow as $1..$4
        let dispatcher = sh(r#"echo "$1 $2 $3 $4""#);

        let output = dispatcher
            .dispatch("+33612345678", Path::new("/tmp/creds.env"))
            .await
            .unwrap();

        assert_eq!(output.trim(), "--phone +33612345678 --env /tmp/creds.env");
    }

    #[tokio::test]
    async fn test_combines_stdout_and_stderr() {
        let dispatcher = sh("echo 'Room: demo-42'; echo 'ID: disp-7' >&2");

        let output = dispatcher.dispatch("0612345678", Path::new("x")).await.unwrap();

        assert!(output.contains("Room: demo-42"));
        assert!(output.contains("ID: disp-7"));
    }

    #[tokio::test]
    async fn test_unterminated_stdout_kept_apart_from_stderr() {
        let dispatcher = sh("printf 'Room: demo-42'; echo 'ID: disp-7' >&2");

        let output = dispatcher.dispatch("0612345678", Path::new("x")).await.unwrap();
        assert_eq!(output, "Room: demo-42\nID: disp-7\n");

        let outcome = crate::domain::dispatch::parse_dispatch_output(&output);
        assert_eq!(outcome.room_name, "demo-42");
        assert_eq!(outcome.dispatch_id, "disp-7");
    }

    #[tokio::test]
    async fn test_working_dir_from_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = DispatcherConfig {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "pwd".to_string(), "dispatch".to_string()],
            working_dir: Some(dir.path().display().to_string()),
            ..DispatcherConfig::default()
        };
        let dispatcher = ProcessDispatcher::from_config(&config);

        let output = dispatcher.dispatch("0612345678", Path::new("x")).await.unwrap();

        let expected = std::fs::canonicalize(dir.path()).unwrap();
        assert_eq!(std::fs::canonicalize(output.trim()).unwrap(), expected);
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_failure() {
        let dispatcher = sh("echo 'invalid credentials' >&2; exit 3");

        let err = dispatcher.dispatch("0612345678", Path::new("x")).await.unwrap_err();

        assert_eq!(
            err,
            AdapterFailure::Exit {
                code: Some(3),
                output: "invalid credentials\n".to_string(),
            }
        );
        assert_eq!(err.details(), "invalid credentials\n");
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_failure() {
        let dispatcher = ProcessDispatcher::new("/definitely/not/a/dispatcher", Vec::new());

        let err = dispatcher.dispatch("0612345678", Path::new("x")).await.unwrap_err();

        assert!(matches!(err, AdapterFailure::Spawn(_)));
    }

    #[tokio::test]
    async fn test_trunk_setup_uses_trunk_args() {
        let dispatcher = ProcessDispatcher::new("sh", Vec::new()).with_trunk_args(vec![
            "-c".to_string(),
            "echo 'Outbound trunk created: ID = ST_123'".to_string(),
        ]);

        let output = dispatcher.setup_trunk().await.unwrap();

        assert!(output.contains("ID = ST_123"));
    }
}
