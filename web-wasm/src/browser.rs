//! ブラウザAPIのアダプタ
//!
//! - BrowserStorage: localStorage / sessionStorage を KeyValueStore として扱う
//! - BrowserFile: <input type="file"> の File を FileReader で Data URL に読む

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use portfolio_common::{Error, KeyValueStore, MediaFile, Result, StorageError};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DomException, File, FileReader, ProgressEvent, Storage};

/// ブラウザごとに異なるクォータ超過の例外名
const QUOTA_ERROR_NAMES: &[&str] = &["QuotaExceededError", "NS_ERROR_DOM_QUOTA_REACHED"];

fn is_quota_error_name(name: &str) -> bool {
    QUOTA_ERROR_NAMES.contains(&name)
}

/// JsValue から読めるメッセージを取り出す
fn js_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{:?}", value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StorageArea {
    Local,
    Session,
}

/// Web Storage のどちらか一方
#[derive(Debug, Clone, Copy)]
pub struct BrowserStorage {
    area: StorageArea,
}

impl BrowserStorage {
    pub fn local() -> Self {
        Self {
            area: StorageArea::Local,
        }
    }

    pub fn session() -> Self {
        Self {
            area: StorageArea::Session,
        }
    }

    fn raw(&self) -> std::result::Result<Storage, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("window is not available".into()))?;
        let storage = match self.area {
            StorageArea::Local => window.local_storage(),
            StorageArea::Session => window.session_storage(),
        };
        storage
            .map_err(|e| StorageError::Unavailable(js_message(&e)))?
            .ok_or_else(|| StorageError::Unavailable(format!("{:?} storage is disabled", self.area)))
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
        self.raw()?
            .get_item(key)
            .map_err(|e| StorageError::Backend(js_message(&e)))
    }

    fn set_item(&self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
        self.raw()?.set_item(key, value).map_err(|e| {
            match e.dyn_ref::<DomException>() {
                Some(ex) if is_quota_error_name(&ex.name()) => StorageError::QuotaExceeded,
                _ => StorageError::Backend(js_message(&e)),
            }
        })
    }

    fn remove_item(&self, key: &str) -> std::result::Result<(), StorageError> {
        self.raw()?
            .remove_item(key)
            .map_err(|e| StorageError::Backend(js_message(&e)))
    }
}

/// フォームで選択された1ファイル
#[derive(Debug, Clone)]
pub struct BrowserFile(File);

impl BrowserFile {
    pub fn new(file: File) -> Self {
        Self(file)
    }
}

impl MediaFile for BrowserFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn mime_type(&self) -> String {
        self.0.type_()
    }

    fn size(&self) -> u64 {
        self.0.size() as u64
    }

    fn read_data_url(&self) -> LocalBoxFuture<'_, Result<String>> {
        let name = self.name();
        let file = self.0.clone();
        async move {
            let read_error = |reason: String| Error::FileRead {
                name: name.clone(),
                reason,
            };

            let reader = FileReader::new().map_err(|e| read_error(js_message(&e)))?;
            let (tx, rx) = oneshot::channel::<std::result::Result<String, String>>();
            let tx = Rc::new(RefCell::new(Some(tx)));

            let onload = {
                let reader = reader.clone();
                let tx = tx.clone();
                Closure::<dyn FnMut(ProgressEvent)>::new(move |_: ProgressEvent| {
                    let result = reader
                        .result()
                        .ok()
                        .and_then(|value| value.as_string())
                        .ok_or_else(|| "reader produced no data URL".to_string());
                    if let Some(tx) = tx.borrow_mut().take() {
                        let _ = tx.send(result);
                    }
                })
            };
            let onerror = {
                let reader = reader.clone();
                let tx = tx.clone();
                Closure::<dyn FnMut(ProgressEvent)>::new(move |_: ProgressEvent| {
                    let reason = reader
                        .error()
                        .map(|e| e.message())
                        .unwrap_or_else(|| "unknown read error".to_string());
                    if let Some(tx) = tx.borrow_mut().take() {
                        let _ = tx.send(Err(reason));
                    }
                })
            };

            reader.set_onload(Some(onload.as_ref().unchecked_ref()));
            reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            reader
                .read_as_data_url(&file)
                .map_err(|e| read_error(js_message(&e)))?;

            // コールバックは読み込み完了までこのスコープで保持する
            let outcome = rx.await.map_err(|_| read_error("read was cancelled".into()))?;
            reader.set_onload(None);
            reader.set_onerror(None);
            drop(onload);
            drop(onerror);

            outcome.map_err(read_error)
        }
        .boxed_local()
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use portfolio_common::ingest_files;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn make_file(name: &str, mime_type: &str, bytes: &[u8]) -> File {
        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(bytes));
        let options = web_sys::FilePropertyBag::new();
        options.set_type(mime_type);
        File::new_with_u8_array_sequence_and_options(&parts, name, &options).expect("File作成失敗")
    }

    #[wasm_bindgen_test]
    fn test_session_storage_roundtrip() {
        let storage = BrowserStorage::session();
        storage.set_item("portfolio_test", "true").expect("書き込み失敗");
        assert_eq!(
            storage.get_item("portfolio_test").expect("読み込み失敗").as_deref(),
            Some("true")
        );
        storage.remove_item("portfolio_test").expect("削除失敗");
        assert_eq!(storage.get_item("portfolio_test").expect("読み込み失敗"), None);
    }

    #[wasm_bindgen_test]
    async fn test_file_reads_as_data_url() {
        let file = BrowserFile::new(make_file("a.txt", "text/plain", b"hi"));
        let data_url = file.read_data_url().await.expect("読み込み失敗");
        assert_eq!(data_url, "data:text/plain;base64,aGk=");
    }

    #[wasm_bindgen_test]
    async fn test_empty_file_skipped() {
        let files = vec![
            BrowserFile::new(make_file("empty.png", "image/png", b"")),
            BrowserFile::new(make_file("a.png", "image/png", b"\x89PNG")),
        ];
        let assets = ingest_files(&files).await;
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].name, "a.png");
    }
}
