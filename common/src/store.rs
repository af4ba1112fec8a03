//! プロジェクトストア
//!
//! プロジェクト一覧（新しい順）を保持し、ストレージのJSON配列と同期する。
//! 読み込み失敗は空リストに戻し、呼び出し側へはエラーを返さない。

use crate::error::StorageError;
use crate::storage::KeyValueStore;
use crate::types::{Project, ProjectId};
use tracing::{debug, error, warn};

/// 永続ストレージのキー
pub const PROJECTS_KEY: &str = "portfolio_projects";

/// プロジェクト一覧とその保存先
#[derive(Debug)]
pub struct ProjectStore<S> {
    storage: S,
    key: String,
    projects: Vec<Project>,
}

impl<S: KeyValueStore> ProjectStore<S> {
    /// 空のストア（まだ読み込まない）
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            projects: Vec::new(),
        }
    }

    /// 作成して即座に読み込む
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let mut store = Self::new(storage, key);
        store.load();
        store
    }

    /// 保存済みの一覧を読み込む
    ///
    /// 未保存なら空、壊れたデータならログを出して空に戻す。
    pub fn load(&mut self) {
        self.projects = match self.storage.get_item(&self.key) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<Project>>(&json) {
                Ok(projects) => {
                    debug!(count = projects.len(), key = %self.key, "projects loaded");
                    projects
                }
                Err(e) => {
                    error!(error = %e, key = %self.key, "Error loading projects");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                error!(error = %e, key = %self.key, "Error loading projects");
                Vec::new()
            }
        };
    }

    /// 一覧全体を書き戻す
    ///
    /// 失敗してもメモリ上の一覧はそのまま残る。
    pub fn save(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.projects)
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        self.storage.set_item(&self.key, &json).map_err(|e| {
            match &e {
                StorageError::QuotaExceeded => {
                    warn!(bytes = json.len(), key = %self.key, "Error saving projects: quota exceeded");
                }
                other => {
                    error!(error = %other, key = %self.key, "Error saving projects");
                }
            }
            e
        })
    }

    /// 先頭に追加
    pub fn add(&mut self, project: Project) {
        self.projects.insert(0, project);
    }

    /// IDが一致するものを取り除く（なければ何もしない）
    pub fn remove(&mut self, id: ProjectId) -> Option<Project> {
        let index = self.projects.iter().position(|p| p.id == id)?;
        Some(self.projects.remove(index))
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: ProjectId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// 作成時刻から一意なIDを決める
    ///
    /// 同じミリ秒に作られた場合は次の空き番号にずらす。
    pub fn next_id(&self, now_ms: ProjectId) -> ProjectId {
        let mut id = now_ms;
        while self.contains(id) {
            id += 1;
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::types::Category;
    use chrono::DateTime;

    fn project(id: ProjectId, title: &str) -> Project {
        Project {
            id,
            title: title.to_string(),
            description: String::new(),
            category: Category::Web,
            links: None,
            images: vec![],
            videos: vec![],
            reports: vec![],
            created_at: DateTime::from_timestamp_millis(id as i64).unwrap(),
        }
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let store = ProjectStore::open(MemoryStorage::new(), PROJECTS_KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_corrupted_json_resets() {
        let storage = MemoryStorage::new();
        storage.set_item(PROJECTS_KEY, "{ invalid json }").unwrap();

        let store = ProjectStore::open(storage, PROJECTS_KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_wrong_shape_resets() {
        let storage = MemoryStorage::new();
        storage.set_item(PROJECTS_KEY, r#"{"id": 1}"#).unwrap();

        let store = ProjectStore::open(storage, PROJECTS_KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_prepends() {
        let mut store = ProjectStore::new(MemoryStorage::new(), PROJECTS_KEY);
        store.add(project(1, "first"));
        store.add(project(2, "second"));

        let titles: Vec<_> = store.projects().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = ProjectStore::new(MemoryStorage::new(), PROJECTS_KEY);
        store.add(project(1, "only"));

        assert!(store.remove(99).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_present_id() {
        let mut store = ProjectStore::new(MemoryStorage::new(), PROJECTS_KEY);
        store.add(project(1, "a"));
        store.add(project(2, "b"));
        store.add(project(3, "c"));

        let removed = store.remove(2).expect("削除対象が見つからない");
        assert_eq!(removed.title, "b");
        let ids: Vec<_> = store.projects().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_save_and_reload() {
        let storage = MemoryStorage::new();
        let mut store = ProjectStore::new(storage.clone(), PROJECTS_KEY);
        store.add(project(10, "older"));
        store.add(project(20, "newer"));
        store.save().expect("保存失敗");

        let reloaded = ProjectStore::open(storage, PROJECTS_KEY);
        assert_eq!(reloaded.projects(), store.projects());
    }

    #[test]
    fn test_save_keeps_sub_millisecond_created_at() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                PROJECTS_KEY,
                r#"[{"id":1,"title":"precise","createdAt":"2024-01-01T00:00:00.123456Z"}]"#,
            )
            .unwrap();

        let first = ProjectStore::open(storage.clone(), PROJECTS_KEY);
        first.save().expect("保存失敗");
        let second = ProjectStore::open(storage.clone(), PROJECTS_KEY);

        assert_eq!(first.projects(), second.projects());
        let json = storage.get_item(PROJECTS_KEY).unwrap().unwrap();
        assert!(json.contains("2024-01-01T00:00:00.123456Z"));
    }

    #[test]
    fn test_save_writes_whole_milliseconds() {
        let storage = MemoryStorage::new();
        let mut store = ProjectStore::new(storage.clone(), PROJECTS_KEY);
        store.add(project(1_704_067_200_000, "on the second"));
        store.save().expect("保存失敗");

        let json = storage.get_item(PROJECTS_KEY).unwrap().unwrap();
        assert!(json.contains("\"createdAt\":\"2024-01-01T00:00:00.000Z\""));
    }

    #[test]
    fn test_save_quota_keeps_memory_state() {
        let mut store = ProjectStore::new(MemoryStorage::with_quota(16), PROJECTS_KEY);
        store.add(project(1, "too large for the quota"));

        assert_eq!(store.save(), Err(StorageError::QuotaExceeded));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_next_id_bumps_on_collision() {
        let mut store = ProjectStore::new(MemoryStorage::new(), PROJECTS_KEY);
        assert_eq!(store.next_id(100), 100);

        store.add(project(100, "a"));
        store.add(project(101, "b"));
        assert_eq!(store.next_id(100), 102);
    }
}
