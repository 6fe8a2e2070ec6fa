//! File-based storage implementation.

use std::fs;
use std::path::PathBuf;

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::board::BoardDocument;

/// File-based storage.
///
/// Stores each board as a JSON file named after its room key.
pub struct FileStorage {
    /// Base directory for board storage.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// On Unix: `~/.local/share/stormboard/boards/`
    /// On Windows: `%LOCALAPPDATA%\stormboard\boards\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("could not determine home directory".to_string()))?;

        let path = base.join("stormboard").join("boards");
        Self::new(path)
    }

    /// Get the file path for a room key.
    fn board_path(&self, room: &str) -> PathBuf {
        // Sanitize the key to be safe for filenames
        let safe_room: String = room
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_path.join(format!("{}.json", safe_room))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }
}

impl Storage for FileStorage {
    fn save(&self, room: &str, document: &BoardDocument) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.board_path(room);
        let json = match document.to_json() {
            Ok(j) => j,
            Err(e) => {
                return Box::pin(async move { Err(StorageError::Serialization(e.to_string())) })
            }
        };

        Box::pin(async move {
            fs::write(&path, json)
                .map_err(|e| StorageError::Io(format!("failed to write {}: {}", path.display(), e)))
        })
    }

    fn load(&self, room: &str) -> BoxFuture<'_, StorageResult<BoardDocument>> {
        let path = self.board_path(room);
        let room_owned = room.to_string();

        Box::pin(async move {
            if !path.exists() {
                return Err(StorageError::NotFound(room_owned));
            }

            let json = fs::read_to_string(&path)
                .map_err(|e| StorageError::Io(format!("failed to read {}: {}", path.display(), e)))?;

            BoardDocument::from_json(&json).map_err(|e| {
                StorageError::Serialization(format!("failed to parse {}: {}", path.display(), e))
            })
        })
    }

    fn delete(&self, room: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.board_path(room);

        Box::pin(async move {
            if path.exists() {
                fs::remove_file(&path).map_err(|e| {
                    StorageError::Io(format!("failed to delete {}: {}", path.display(), e))
                })?;
            }
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        let base = self.base_path.clone();

        Box::pin(async move {
            if !base.exists() {
                return Ok(vec![]);
            }

            let entries = fs::read_dir(&base)
                .map_err(|e| StorageError::Io(format!("failed to read directory: {}", e)))?;

            let mut rooms = Vec::new();
            for entry in entries.flatten() {
                if let Some(name) = entry.path().file_stem() {
                    if let Some(name_str) = name.to_str() {
                        if entry
                            .path()
                            .extension()
                            .map(|e| e == "json")
                            .unwrap_or(false)
                        {
                            rooms.push(name_str.to_string());
                        }
                    }
                }
            }
            Ok(rooms)
        })
    }

    fn exists(&self, room: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.board_path(room);
        Box::pin(async move { Ok(path.exists()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn block_on<F: std::future::Future>(f: F) -> F::Output {
        use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

        fn dummy_raw_waker() -> RawWaker {
            fn no_op(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                dummy_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
            RawWaker::new(std::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
        let mut cx = Context::from_waker(&waker);
        let mut f = std::pin::pin!(f);

        loop {
            match f.as_mut().poll(&mut cx) {
                Poll::Ready(result) => return result,
                Poll::Pending => {}
            }
        }
    }

    #[test]
    fn test_file_storage_save_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let mut doc = BoardDocument::new();
        doc.name = "Payments Storming".to_string();

        block_on(storage.save("payments", &doc)).unwrap();
        let loaded = block_on(storage.load("payments")).unwrap();

        assert_eq!(loaded.name, "Payments Storming");
    }

    #[test]
    fn test_file_storage_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let result = block_on(storage.load("nonexistent"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_file_storage_corrupt_snapshot_is_an_error() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        let result = block_on(storage.load("broken"));
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_file_storage_list_and_delete() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let doc = BoardDocument::new();
        block_on(storage.save("room-a", &doc)).unwrap();
        block_on(storage.save("room-b", &doc)).unwrap();

        let list = block_on(storage.list()).unwrap();
        assert_eq!(list.len(), 2);

        block_on(storage.delete("room-a")).unwrap();
        assert!(!block_on(storage.exists("room-a")).unwrap());
        assert!(block_on(storage.exists("room-b")).unwrap());
    }

    #[test]
    fn test_file_storage_sanitizes_room_key() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let doc = BoardDocument::new();
        block_on(storage.save("team/alpha:storming", &doc)).unwrap();

        let loaded = block_on(storage.load("team/alpha:storming")).unwrap();
        assert_eq!(loaded.id, doc.id);
    }
}
