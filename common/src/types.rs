//! プロジェクトとメディアの型定義
//!
//! `portfolio_projects` に保存されるJSONと互換:
//! - Project: プロジェクト1件（新しい順に保存）
//! - MediaAsset: 画像・動画・資料のインライン表現
//! - Category: カテゴリ（未知の値はそのまま保持）

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// プロジェクトID（作成時刻のミリ秒）
pub type ProjectId = u64;

/// 添付ファイルのインライン表現
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaAsset {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    /// "data:image/png;base64,..." 形式
    pub data_url: String,
    pub size: u64,
}

/// ギャラリー/モーダルでの表示種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// `data-media-type` 属性値から変換（不明な値は動画扱い）
    pub fn from_attr(value: &str) -> Self {
        if value == "image" {
            MediaKind::Image
        } else {
            MediaKind::Video
        }
    }
}

/// プロジェクトカテゴリ
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Web,
    Mobile,
    Data,
    Ai,
    Hardware,
    #[default]
    Other,
    /// 対応表にない値（保存データをそのまま保持）
    Unknown(String),
}

impl Category {
    /// フォームの選択肢に並ぶ既知カテゴリ
    pub const KNOWN: [Category; 6] = [
        Category::Web,
        Category::Mobile,
        Category::Data,
        Category::Ai,
        Category::Hardware,
        Category::Other,
    ];

    pub fn parse(raw: &str) -> Self {
        match raw {
            "web" => Category::Web,
            "mobile" => Category::Mobile,
            "data" => Category::Data,
            "ai" => Category::Ai,
            "hardware" => Category::Hardware,
            "other" => Category::Other,
            other => Category::Unknown(other.to_string()),
        }
    }

    /// 保存時の値
    pub fn as_str(&self) -> &str {
        match self {
            Category::Web => "web",
            Category::Mobile => "mobile",
            Category::Data => "data",
            Category::Ai => "ai",
            Category::Hardware => "hardware",
            Category::Other => "other",
            Category::Unknown(raw) => raw,
        }
    }

    /// カードに表示するラベル
    pub fn label(&self) -> &str {
        match self {
            Category::Web => "Web Development",
            Category::Mobile => "Mobile App",
            Category::Data => "Data Science",
            Category::Ai => "AI/ML",
            Category::Hardware => "Hardware/IoT",
            Category::Other => "Other",
            Category::Unknown(raw) => raw,
        }
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        Category::parse(&raw)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// ポートフォリオのプロジェクト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub category: Category,

    /// 外部リンク（空文字は None として扱う）
    #[serde(default, deserialize_with = "empty_as_none")]
    pub links: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<MediaAsset>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub videos: Vec<MediaAsset>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub reports: Vec<MediaAsset>,

    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// サムネイルに使う先頭画像
    pub fn thumbnail(&self) -> Option<&MediaAsset> {
        self.images.first()
    }

    /// 画像→動画の順に連結したギャラリー項目
    pub fn gallery_items(&self) -> impl Iterator<Item = (MediaKind, &MediaAsset)> {
        self.images
            .iter()
            .map(|m| (MediaKind::Image, m))
            .chain(self.videos.iter().map(|m| (MediaKind::Video, m)))
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// `toISOString()` 形式（ミリ秒 + Z）
///
/// ミリ秒より細かい値を読み込んだ場合は、保存時に精度を落とさない。
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let format = if value.timestamp_subsec_nanos() % 1_000_000 == 0 {
            SecondsFormat::Millis
        } else {
            SecondsFormat::AutoSi
        };
        serializer.serialize_str(&value.to_rfc3339_opts(format, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
