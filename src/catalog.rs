//! 期待宣言カタログ
//!
//! 設定ファイル（JSON）から読み込む「期待される宣言」の集合。
//! 名前付き/無名の関数・構造体と、プレースホルダ構造体テンプレートを持つ。
//! ロードは厳格で、スキーマ違反は部分的なカタログを残さず全体を中断する。

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::shape::{FuncSig, Shape};

/// 期待宣言カタログ（設定ファイルの型付きスキーマ）
///
/// 全キーは省略可能。`params`/`return` を欠く関数シグネチャなど
/// 構造違反は serde のデシリアライズエラーとしてロード全体を失敗させる。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeclConfig {
    /// 名前付き関数（名前 → シグネチャ）
    #[serde(default)]
    pub functions: BTreeMap<String, FuncSig>,

    /// 名前付き構造体（名前 → フィールド多重集合）
    #[serde(default)]
    pub structs: BTreeMap<String, Shape>,

    /// 無名関数（構造的等価性のみで照合される）
    #[serde(rename = "functions*", default)]
    pub unnamed_functions: Vec<FuncSig>,

    /// 無名構造体
    #[serde(rename = "structs*", default)]
    pub unnamed_structs: Vec<Shape>,

    /// プレースホルダ構造体テンプレート（`%T` → 形状）
    ///
    /// メンバー型には他のプレースホルダ参照を含められる（一段階のみ）。
    #[serde(rename = "%structs", default)]
    pub var_structs: BTreeMap<String, Shape>,
}

impl DeclConfig {
    /// JSON 文字列からカタログをロードする
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }

    /// ファイルからカタログをロードする
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_json(&text)
    }

    /// 無名宣言と名前付き宣言の重複を検査する
    ///
    /// 構造的に同一な無名+名前付きのペアは観測との照合が曖昧になるため、
    /// 設定記述のエラーとして即座に中断する。有効化はオプション。
    pub fn check_overlap(&self) -> Result<(), ConfigError> {
        for sig in &self.unnamed_functions {
            if self.functions.values().any(|named| named == sig) {
                return Err(ConfigError::Overlap(format!(
                    "unnamed function declaration {} has a named counterpart",
                    sig
                )));
            }
        }
        for shape in &self.unnamed_structs {
            if self.structs.values().any(|named| named == shape) {
                return Err(ConfigError::Overlap(format!(
                    "unnamed struct declaration {} has a named counterpart",
                    shape.pretty()
                )));
            }
        }
        Ok(())
    }
}

/// カタログロードのエラー
///
/// いずれも致命的：照合フェーズに進む前に打ち切られる。
#[derive(Debug)]
pub enum ConfigError {
    /// 設定ファイルの読み込み失敗
    Io(PathBuf, io::Error),
    /// JSON の構文・スキーマ違反（違反位置付き）
    Parse(serde_json::Error),
    /// 無名宣言と名前付き宣言の重複
    Overlap(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(path, e) => {
                write!(f, "error opening declarations file {}: {}", path.display(), e)
            }
            ConfigError::Parse(e) => write!(f, "unable to parse declarations: {}", e),
            ConfigError::Overlap(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(_, e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Overlap(_) => None,
        }
    }
}
