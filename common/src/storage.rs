//! キー/値ストレージの抽象化
//!
//! ブラウザの localStorage / sessionStorage と同じ文字列API。
//! WASM側は web_sys::Storage、テストやネイティブ環境では MemoryStorage を使う。

use crate::error::StorageError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// 文字列キー/値ストレージ
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// メモリ上のストレージ
///
/// クローンは同じ領域を共有するため、アプリを作り直して
/// ページ再読み込みを再現できる。
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Rc<RefCell<MemoryArea>>,
}

#[derive(Debug, Default)]
struct MemoryArea {
    items: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryArea {
    fn used_bytes_with(&self, key: &str, value: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum::<usize>()
            + key.len()
            + value.len()
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 容量上限つき（キー+値のバイト数合計）
    pub fn with_quota(quota_bytes: usize) -> Self {
        let storage = Self::default();
        storage.inner.borrow_mut().quota_bytes = Some(quota_bytes);
        storage
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.inner.borrow().items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut area = self.inner.borrow_mut();
        if let Some(quota) = area.quota_bytes {
            if area.used_bytes_with(key, value) > quota {
                return Err(StorageError::QuotaExceeded);
            }
        }
        area.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.inner.borrow_mut().items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").unwrap(), None);

        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));

        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_memory_storage_clones_share_area() {
        let storage = MemoryStorage::new();
        let reloaded = storage.clone();
        storage.set_item("portfolio_auth", "true").unwrap();
        assert_eq!(reloaded.get_item("portfolio_auth").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_memory_storage_quota_exceeded() {
        let storage = MemoryStorage::with_quota(10);
        storage.set_item("k", "12345").unwrap();

        let result = storage.set_item("k2", "1234567890");
        assert_eq!(result, Err(StorageError::QuotaExceeded));
        // 失敗した書き込みは既存の値を壊さない
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("12345"));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_memory_storage_quota_counts_replacement_once() {
        let storage = MemoryStorage::with_quota(6);
        storage.set_item("k", "12345").unwrap();
        storage.set_item("k", "54321").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("54321"));
    }
}
