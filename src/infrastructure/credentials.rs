//! Transient credential file handed to the dispatcher
//!
//! Each orchestration call gets its own file with a random name and
//! owner-only permissions. It is removed by [`TransientCredentialFile::release`]
//! or, on any path that skips the explicit release, when the guard is dropped.

use crate::domain::shared::error::{DomainError, Result};
use crate::domain::shared::value_objects::ApiCredentials;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Environment variable names understood by the dispatcher
pub const API_KEY_VAR: &str = "LIVEKIT_API_KEY";
pub const API_SECRET_VAR: &str = "LIVEKIT_API_SECRET";

/// Scoped credential file
#[derive(Debug)]
pub struct TransientCredentialFile {
    file: Option<NamedTempFile>,
    path: PathBuf,
}

impl TransientCredentialFile {
    /// Stage credentials in `dir`
    pub fn create_in(dir: &Path, credentials: &ApiCredentials) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("teleagent-")
            .suffix(".env")
            .rand_bytes(16)
            .tempfile_in(dir)
            .map_err(|e| DomainError::Internal(format!("Failed to create credential file: {}", e)))?;

        file.write_all(render(credentials).as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| DomainError::Internal(format!("Failed to write credential file: {}", e)))?;

        let path = file.path().to_path_buf();
        debug!("Staged credential file {}", path.display());

        Ok(Self {
            file: Some(file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the file, reporting a failure instead of swallowing it
    pub fn release(mut self) -> Result<()> {
        match self.file.take() {
            Some(file) => file.close().map_err(|e| {
                DomainError::ResourceCleanup(format!("{}: {}", self.path.display(), e))
            }),
            None => Ok(()),
        }
    }
}

/// Two `KEY=VALUE` lines; [`ApiCredentials`] never holds a line break
fn render(credentials: &ApiCredentials) -> String {
    format!(
        "{}={}\n{}={}\n",
        API_KEY_VAR,
        credentials.api_key(),
        API_SECRET_VAR,
        credentials.api_secret()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn credentials() -> ApiCredentials {
        ApiCredentials::new("APIkey123", "secret456").unwrap()
    }

    #[test]
    fn test_content_is_two_key_value_lines() {
        let dir = TempDir::new().unwrap();
        let file = TransientCredentialFile::create_in(dir.path(), &credentials()).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(
            content,
            "LIVEKIT_API_KEY=APIkey123\nLIVEKIT_API_SECRET=secret456\n"
        );
    }

    #[test]
    fn test_content_stays_two_lines_for_any_accepted_credentials() {
        let dir = TempDir::new().unwrap();
        let credentials = ApiCredentials::new("key with spaces=and=equals", "s#cr\"t").unwrap();
        let file = TransientCredentialFile::create_in(dir.path(), &credentials).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "LIVEKIT_API_KEY=key with spaces=and=equals",
                "LIVEKIT_API_SECRET=s#cr\"t"
            ]
        );
    }

    #[test]
    fn test_release_removes_file() {
        let dir = TempDir::new().unwrap();
        let file = TransientCredentialFile::create_in(dir.path(), &credentials()).unwrap();
        let path = file.path().to_path_buf();
        assert!(path.exists());

        file.release().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_drop_removes_file() {
        let dir = TempDir::new().unwrap();
        let path = {
            let file = TransientCredentialFile::create_in(dir.path(), &credentials()).unwrap();
            file.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_names_are_unique() {
        let dir = TempDir::new().unwrap();
        let a = TransientCredentialFile::create_in(dir.path(), &credentials()).unwrap();
        let b = TransientCredentialFile::create_in(dir.path(), &credentials()).unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_release_reports_cleanup_failure() {
        let dir = TempDir::new().unwrap();
        let file = TransientCredentialFile::create_in(dir.path(), &credentials()).unwrap();
        std::fs::remove_file(file.path()).unwrap();

        let err = file.release().unwrap_err();
        assert!(matches!(err, DomainError::ResourceCleanup(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let file = TransientCredentialFile::create_in(dir.path(), &credentials()).unwrap();
        let mode = std::fs::metadata(file.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
