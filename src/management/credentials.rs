use std::path::{Path, PathBuf};

use crate::{error::Result, types::Credentials};

/// Plaintext two-line file holding the client id and the client secret.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored credentials, or `None` when the file is missing,
    /// unreadable, or either line is not exactly 32 characters.
    pub async fn load(&self) -> Option<Credentials> {
        let content = async_fs::read_to_string(&self.path).await.ok()?;
        let mut lines = content.lines();
        let client_id = lines.next()?;
        let client_secret = lines.next()?;
        Credentials::new(client_id, client_secret).ok()
    }

    /// Overwrites the file with exactly two lines.
    pub async fn save(&self, credentials: &Credentials) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                async_fs::create_dir_all(parent).await?;
            }
        }

        let content = format!(
            "{}\n{}\n",
            credentials.client_id, credentials.client_secret
        );
        async_fs::write(&self.path, content).await?;
        Ok(())
    }
}
