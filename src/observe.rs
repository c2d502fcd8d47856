//! 観測宣言コレクタ
//!
//! フロントエンドが翻訳単位を走査しながら供給する「観測された宣言」を
//! 蓄積する純粋なデータシンク。検証はせず、アルゴリズムも持たない。
//! 照合はパスの最後に一括で行われる。

use std::collections::BTreeMap;

use crate::shape::{FuncSig, Shape};
use crate::source::SourceLocation;

/// 観測された関数宣言
#[derive(Debug, Clone)]
pub struct ObservedFunction {
    pub sig: FuncSig,
    pub loc: SourceLocation,
}

/// 観測された構造体宣言
#[derive(Debug, Clone)]
pub struct ObservedRecord {
    pub shape: Shape,
    pub loc: SourceLocation,
}

/// 観測宣言の蓄積
///
/// どちらのマップも名前をキーとし、重複した名前は後勝ちで上書きされる
/// （フロントエンドの走査順がそのまま上書き順になる）。
/// BTreeMap なので走査順は名前ソート順で決定的。
#[derive(Debug, Default)]
pub struct Observations {
    functions: BTreeMap<String, ObservedFunction>,
    records: BTreeMap<String, ObservedRecord>,
}

impl Observations {
    pub fn new() -> Self {
        Self::default()
    }

    /// 観測された関数を記録する
    ///
    /// エントリポイント `main` は慣習としてカタログと照合しないため除外する。
    pub fn observe_function(&mut self, name: &str, sig: FuncSig, loc: SourceLocation) {
        if name == "main" {
            return;
        }
        self.functions
            .insert(name.to_string(), ObservedFunction { sig, loc });
    }

    /// 観測された構造体を記録する
    ///
    /// typedef された無名構造体は typedef 識別子の名前で渡されてくる。
    pub fn observe_record(&mut self, name: &str, shape: Shape, loc: SourceLocation) {
        self.records
            .insert(name.to_string(), ObservedRecord { shape, loc });
    }

    pub fn functions(&self) -> &BTreeMap<String, ObservedFunction> {
        &self.functions
    }

    pub fn records(&self) -> &BTreeMap<String, ObservedRecord> {
        &self.records
    }
}
