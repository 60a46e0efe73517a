use std::{fmt, path::Path};

use serde::Deserialize;

use crate::StoreError;

/// Credential for the hosted document database, read from a local secret
/// file shaped as `{"database": "...", "token": "..."}`.
#[derive(Clone, Deserialize)]
pub struct ServiceAccount {
    pub database: String,
    token: String,
}

impl ServiceAccount {
    pub fn new(database: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            token: token.into(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Credentials(format!("{}: {e}", path.display())))?;

        let account: ServiceAccount = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Credentials(format!("{}: {e}", path.display())))?;

        if account.database.is_empty() || account.token.is_empty() {
            return Err(StoreError::Credentials(format!(
                "{}: database and token must not be empty",
                path.display()
            )));
        }

        Ok(account)
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("database", &self.database)
            .field("token", &"...")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_secret_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"database": "library", "token": "s3cret"}}"#).unwrap();

        let account = ServiceAccount::from_file(file.path()).unwrap();
        assert_eq!(account.database, "library");
        assert_eq!(account.token(), "s3cret");
    }

    #[test]
    fn rejects_empty_token() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"database": "library", "token": ""}}"#).unwrap();

        let err = ServiceAccount::from_file(file.path()).unwrap_err();
        assert!(matches!(err, StoreError::Credentials(_)));
    }

    #[test]
    fn debug_masks_token() {
        let account = ServiceAccount::new("library", "s3cret");
        let printed = format!("{account:?}");
        assert!(!printed.contains("s3cret"));
        assert!(printed.contains("library"));
    }
}
