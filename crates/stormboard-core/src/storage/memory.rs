//! In-memory storage implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::board::BoardDocument;

/// In-memory storage for testing and ephemeral boards.
#[derive(Default)]
pub struct MemoryStorage {
    boards: RwLock<HashMap<String, BoardDocument>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn save(&self, room: &str, document: &BoardDocument) -> BoxFuture<'_, StorageResult<()>> {
        let room = room.to_string();
        let document = document.clone();
        Box::pin(async move {
            let mut boards = self
                .boards
                .write()
                .map_err(|e| StorageError::Other(format!("lock error: {}", e)))?;
            boards.insert(room, document);
            Ok(())
        })
    }

    fn load(&self, room: &str) -> BoxFuture<'_, StorageResult<BoardDocument>> {
        let room = room.to_string();
        Box::pin(async move {
            let boards = self
                .boards
                .read()
                .map_err(|e| StorageError::Other(format!("lock error: {}", e)))?;
            boards
                .get(&room)
                .cloned()
                .ok_or(StorageError::NotFound(room))
        })
    }

    fn delete(&self, room: &str) -> BoxFuture<'_, StorageResult<()>> {
        let room = room.to_string();
        Box::pin(async move {
            let mut boards = self
                .boards
                .write()
                .map_err(|e| StorageError::Other(format!("lock error: {}", e)))?;
            boards.remove(&room);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let boards = self
                .boards
                .read()
                .map_err(|e| StorageError::Other(format!("lock error: {}", e)))?;
            Ok(boards.keys().cloned().collect())
        })
    }

    fn exists(&self, room: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let room = room.to_string();
        Box::pin(async move {
            let boards = self
                .boards
                .read()
                .map_err(|e| StorageError::Other(format!("lock error: {}", e)))?;
            Ok(boards.contains_key(&room))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_on<F: std::future::Future>(f: F) -> F::Output {
        // Simple blocking executor for tests
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
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let doc = BoardDocument::new();

        block_on(storage.save("sprint", &doc)).unwrap();
        let loaded = block_on(storage.load("sprint")).unwrap();

        assert_eq!(doc.id, loaded.id);
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("nonexistent"));

        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_exists_and_delete() {
        let storage = MemoryStorage::new();
        let doc = BoardDocument::new();

        assert!(!block_on(storage.exists("sprint")).unwrap());
        block_on(storage.save("sprint", &doc)).unwrap();
        assert!(block_on(storage.exists("sprint")).unwrap());

        block_on(storage.delete("sprint")).unwrap();
        assert!(!block_on(storage.exists("sprint")).unwrap());
    }

    #[test]
    fn test_list() {
        let storage = MemoryStorage::new();
        let doc = BoardDocument::new();

        block_on(storage.save("room-a", &doc)).unwrap();
        block_on(storage.save("room-b", &doc)).unwrap();

        let list = block_on(storage.list()).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains(&"room-a".to_string()));
        assert!(list.contains(&"room-b".to_string()));
    }
}
