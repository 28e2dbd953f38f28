use crate::portal::Portal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io;
use std::path::Path;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};

/// Tokens per portal, persisted between invocations.
#[derive(Default, PartialEq, Debug, Serialize, Deserialize)]
pub struct SessionStore {
    #[serde(default)]
    tokens: HashMap<Portal, String>,
}

impl SessionStore {
    #[instrument]
    pub async fn load(path: &Path) -> Result<Self, SessionError> {
        match fs::read_to_string(path).await {
            Ok(content) => {
                let store = serde_json::from_str::<SessionStore>(&content)?;
                debug!("🔑 Loaded {} portal token(s)", store.tokens.len());
                Ok(store)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(SessionStore::default()),
            Err(err) => Err(SessionError::Io(err)),
        }
    }

    #[instrument(skip(self))]
    pub async fn save(&self, path: &Path) -> Result<(), SessionError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(path).await?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600)).await?;
        }
        file.write_all(&serde_json::to_vec_pretty(self)?).await?;
        file.flush().await?;
        info!("🔑 Saved session to '{}'", path.display());
        Ok(())
    }

    pub fn token(&self, portal: Portal) -> Option<&str> {
        self.tokens.get(&portal).map(String::as_str)
    }

    pub fn set_token(&mut self, portal: Portal, token: String) {
        self.tokens.insert(portal, token);
    }

    pub fn clear(&mut self, portal: Portal) -> bool {
        self.tokens.remove(&portal).is_some()
    }

    pub fn authenticated_portals(&self) -> Vec<Portal> {
        Portal::all().into_iter().filter(|portal| self.tokens.contains_key(portal)).collect()
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("unable to access the session file: {0}")]
    Io(#[from] io::Error),
    #[error("corrupt session file: {0}")]
    Corrupt(#[from] serde_json::Error),
}
