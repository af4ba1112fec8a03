//! 添付ファイルの取り込み
//!
//! 選択されたファイルを Data URL に変換して MediaAsset にする。
//! - サイズ0のファイルはスキップ
//! - 読み込みは並行、出力は入力順
//! - 読み込みに失敗したファイルはログを出して除外

use crate::error::Result;
use crate::types::MediaAsset;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use futures::future::{join_all, LocalBoxFuture};
use futures::FutureExt;
use tracing::{debug, error};

/// MIMEタイプ不明時にブラウザが使う値
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// 取り込み対象のファイル
///
/// ブラウザの File はスレッド間で送れないため、読み込みは LocalBoxFuture を返す。
pub trait MediaFile {
    fn name(&self) -> String;
    fn mime_type(&self) -> String;
    fn size(&self) -> u64;
    fn read_data_url(&self) -> LocalBoxFuture<'_, Result<String>>;
}

/// ファイル一覧を MediaAsset に変換
pub async fn ingest_files<F: MediaFile>(files: &[F]) -> Vec<MediaAsset> {
    let reads = files
        .iter()
        .filter(|file| file.size() > 0)
        .map(|file| async move {
            match file.read_data_url().await {
                Ok(data_url) => Some(MediaAsset {
                    name: file.name(),
                    mime_type: file.mime_type(),
                    data_url,
                    size: file.size(),
                }),
                Err(e) => {
                    error!(file = %file.name(), error = %e, "Error processing file");
                    None
                }
            }
        });

    let assets: Vec<MediaAsset> = join_all(reads).await.into_iter().flatten().collect();
    debug!(requested = files.len(), ingested = assets.len(), "files ingested");
    assets
}

/// バイト列から Data URL を作る
pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
    let mime_type = if mime_type.is_empty() {
        DEFAULT_MIME_TYPE
    } else {
        mime_type
    };
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// メモリ上のファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl InMemoryFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }
}

impl MediaFile for InMemoryFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn read_data_url(&self) -> LocalBoxFuture<'_, Result<String>> {
        let data_url = encode_data_url(&self.mime_type, &self.bytes);
        async move { Ok(data_url) }.boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use futures::executor::block_on;
    use std::future::Future;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    /// 指定回数 Pending を返してから完了する
    struct YieldTimes(usize);

    impl Future for YieldTimes {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 == 0 {
                Poll::Ready(())
            } else {
                self.0 -= 1;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    /// 読み込み完了の順番を入れ替えられるファイル
    struct SlowFile {
        name: &'static str,
        delay: usize,
        fail: bool,
    }

    impl MediaFile for SlowFile {
        fn name(&self) -> String {
            self.name.to_string()
        }

        fn mime_type(&self) -> String {
            "image/png".to_string()
        }

        fn size(&self) -> u64 {
            4
        }

        fn read_data_url(&self) -> LocalBoxFuture<'_, Result<String>> {
            async move {
                YieldTimes(self.delay).await;
                if self.fail {
                    Err(Error::FileRead {
                        name: self.name.to_string(),
                        reason: "NotReadableError".to_string(),
                    })
                } else {
                    Ok(format!("data:image/png;base64,{}", self.name))
                }
            }
            .boxed_local()
        }
    }

    #[test]
    fn test_encode_data_url() {
        assert_eq!(encode_data_url("text/plain", b"hello"), "data:text/plain;base64,aGVsbG8=");
    }

    #[test]
    fn test_encode_data_url_without_mime() {
        let url = encode_data_url("", b"\x00\x01");
        assert!(url.starts_with("data:application/octet-stream;base64,"));
    }

    #[test]
    fn test_ingest_empty_list() {
        let files: Vec<InMemoryFile> = vec![];
        assert!(block_on(ingest_files(&files)).is_empty());
    }

    #[test]
    fn test_ingest_skips_zero_byte_files() {
        let files = vec![
            InMemoryFile::new("empty.png", "image/png", Vec::new()),
            InMemoryFile::new("real.png", "image/png", vec![1u8, 2, 3]),
        ];

        let assets = block_on(ingest_files(&files));
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].name, "real.png");
        assert_eq!(assets[0].size, 3);
        assert_eq!(assets[0].mime_type, "image/png");
        assert_eq!(assets[0].data_url, "data:image/png;base64,AQID");
    }

    #[test]
    fn test_ingest_preserves_input_order() {
        // 後ろのファイルほど先に読み終わる
        let files = vec![
            SlowFile { name: "a", delay: 5, fail: false },
            SlowFile { name: "b", delay: 3, fail: false },
            SlowFile { name: "c", delay: 0, fail: false },
        ];

        let names: Vec<_> = block_on(ingest_files(&files))
            .into_iter()
            .map(|asset| asset.name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_ingest_drops_failed_file_only() {
        let files = vec![
            SlowFile { name: "ok1", delay: 1, fail: false },
            SlowFile { name: "broken", delay: 0, fail: true },
            SlowFile { name: "ok2", delay: 2, fail: false },
        ];

        let names: Vec<_> = block_on(ingest_files(&files))
            .into_iter()
            .map(|asset| asset.name)
            .collect();
        assert_eq!(names, vec!["ok1", "ok2"]);
    }
}
