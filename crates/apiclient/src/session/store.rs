use crate::abstract_trait::SessionStoreTrait;
use crate::session::Tokens;
use async_trait::async_trait;
use shared::errors::ClientError;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::debug;

/// Persists the token pair as a small JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Stages `contents` in a uniquely named file beside `path`, then renames
/// it into place. The staged file is created with mode 0600 on unix.
fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;

    let mut staged = NamedTempFile::new_in(parent)?;
    staged.write_all(contents)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|err| err.error)?;
    Ok(())
}

#[async_trait]
impl SessionStoreTrait for FileSessionStore {
    async fn load(&self) -> Result<Tokens, ClientError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Tokens::default()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Tokens::default()),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, tokens: &Tokens) -> Result<(), ClientError> {
        let contents = serde_json::to_vec_pretty(tokens)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomic(&path, &contents))
            .await
            .map_err(std::io::Error::other)??;

        debug!("Session written to {}", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<(), ClientError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Keeps the token pair in process memory only.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    tokens: Mutex<Tokens>,
}

impl MemorySessionStore {
    pub fn with_tokens(tokens: Tokens) -> Self {
        Self {
            tokens: Mutex::new(tokens),
        }
    }
}

#[async_trait]
impl SessionStoreTrait for MemorySessionStore {
    async fn load(&self) -> Result<Tokens, ClientError> {
        Ok(self.tokens.lock().await.clone())
    }

    async fn save(&self, tokens: &Tokens) -> Result<(), ClientError> {
        *self.tokens.lock().await = tokens.clone();
        Ok(())
    }

    async fn clear(&self) -> Result<(), ClientError> {
        *self.tokens.lock().await = Tokens::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_an_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        assert_eq!(store.load().await.unwrap(), Tokens::default());
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let store = FileSessionStore::new(&path);

        store.save(&Tokens::new("T1", "R1")).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["accessToken"], "T1");
        assert_eq!(raw["refreshToken"], "R1");
        assert_eq!(store.load().await.unwrap(), Tokens::new("T1", "R1"));
    }

    #[tokio::test]
    async fn clear_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::new(&path);

        store.save(&Tokens::new("T1", "R1")).await.unwrap();
        store.clear().await.unwrap();

        assert!(!path.exists());
        assert_eq!(store.load().await.unwrap(), Tokens::default());
    }

    #[tokio::test]
    async fn corrupt_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileSessionStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_saves_all_land() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(FileSessionStore::new(dir.path().join("session.json")));

        let mut tasks = tokio::task::JoinSet::new();
        for n in 0..64 {
            let store = store.clone();
            let tokens = Tokens::new(format!("T{n}"), format!("R{n}"));
            tasks.spawn(async move { store.save(&tokens).await });
        }
        while let Some(result) = tasks.join_next().await {
            result.unwrap().unwrap();
        }

        let saved = store.load().await.unwrap();
        assert!(saved.access_token.starts_with('T'));
        assert_eq!(saved.refresh_token[1..], saved.access_token[1..]);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        FileSessionStore::new(&path)
            .save(&Tokens::new("T1", "R1"))
            .await
            .unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
