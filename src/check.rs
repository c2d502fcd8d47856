//! チェック実行コンテキスト
//!
//! カタログ・観測・ファイルレジストリをひとつの翻訳単位チェックの
//! 寿命で所有するコンテキストオブジェクト。グローバル状態を持たず、
//! 単位ごとに新しいインスタンスを作れば残留状態は存在しない。
//!
//! 流れ: `new`/`from_file`（ロード）→ `location`+`observe_*`（収集）
//! → `run`（解決と照合）→ `ReportPrinter`（描画）。

use std::path::{Path, PathBuf};

use crate::catalog::{ConfigError, DeclConfig};
use crate::matcher::{Report, match_declarations};
use crate::observe::Observations;
use crate::resolve::resolve_catalog;
use crate::shape::{FuncSig, Shape};
use crate::source::{FileRegistry, SourceLocation};

/// チェックの動作オプション
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// 無名宣言と名前付き宣言の重複を設定エラーとして弾くか
    /// （既定は無効）
    pub overlap_check: bool,
}

/// 宣言チェックのコンテキスト
#[derive(Debug)]
pub struct DeclCheck {
    config: DeclConfig,
    observations: Observations,
    files: FileRegistry,
}

impl DeclCheck {
    /// ロード済みカタログからコンテキストを作る
    ///
    /// オプションで重複検査が有効なら、ここで失敗するとラン全体が
    /// 中断される（照合は一切行われない）。
    pub fn new(config: DeclConfig, options: &CheckOptions) -> Result<Self, ConfigError> {
        if options.overlap_check {
            config.check_overlap()?;
        }
        Ok(Self {
            config,
            observations: Observations::new(),
            files: FileRegistry::new(),
        })
    }

    /// カタログを設定ファイルからロードしてコンテキストを作る
    pub fn from_file(path: &Path, options: &CheckOptions) -> Result<Self, ConfigError> {
        let config = DeclConfig::from_file(path)?;
        Self::new(config, options)
    }

    /// 観測位置を作る（ファイルパスはレジストリに登録される）
    pub fn location(&mut self, path: PathBuf, line: u32, column: u32) -> SourceLocation {
        let file_id = self.files.register(path);
        SourceLocation::new(file_id, line, column)
    }

    /// 観測された関数を記録する（`main` は除外される）
    pub fn observe_function(&mut self, name: &str, sig: FuncSig, loc: SourceLocation) {
        self.observations.observe_function(name, sig, loc);
    }

    /// 観測された構造体を記録する
    pub fn observe_record(&mut self, name: &str, shape: Shape, loc: SourceLocation) {
        self.observations.observe_record(name, shape, loc);
    }

    /// プレースホルダを解決し、観測とカタログを照合する
    ///
    /// コンテキスト自体は変更しないので、同じ観測に対して何度でも
    /// 同じレポートが得られる。
    pub fn run(&self) -> Report {
        let resolved = resolve_catalog(&self.config, &self.observations);
        match_declarations(resolved, &self.observations)
    }

    /// 診断表示用のファイルレジストリ
    pub fn files(&self) -> &FileRegistry {
        &self.files
    }
}
