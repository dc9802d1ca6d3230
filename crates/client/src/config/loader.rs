use std::path::Path;

use super::schema::SyncConfig;

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Parse(serde_yaml::Error),
    Validation(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Parse(e) => write!(f, "parse: {e}"),
            Self::Validation(msg) => write!(f, "validation: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_yaml::Error> for LoadError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Parse(e)
    }
}

pub fn load_from_file(path: &Path) -> Result<SyncConfig, LoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}

pub fn load_from_str(yaml: &str) -> Result<SyncConfig, LoadError> {
    let cfg: SyncConfig = serde_yaml::from_str(yaml)?;
    validate(&cfg)?;
    Ok(cfg)
}

fn validate(cfg: &SyncConfig) -> Result<(), LoadError> {
    if cfg.store.server_addr.trim().is_empty() {
        return Err(LoadError::Validation("store.server_addr must not be empty".into()));
    }
    if cfg.store.timeout_ms == 0 {
        return Err(LoadError::Validation("store.timeout_ms must be > 0".into()));
    }
    let has_user = cfg.store.username.as_deref().is_some_and(|u| !u.is_empty());
    if cfg.store.password.is_some() && !has_user {
        return Err(LoadError::Validation(
            "store.password is set without store.username".into(),
        ));
    }
    Ok(())
}
