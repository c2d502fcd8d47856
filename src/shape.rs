//! 宣言の形状表現
//!
//! 関数のパラメータリストと構造体のフィールドリストを、
//! 順序と名前を捨てた「型名の多重集合」として表現する。
//! 照合は全てこの多重集合の構造的等価性で行う。

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// 型名の多重集合（型名 → 出現回数）
///
/// BTreeMap を使うことで等価判定は挿入順に依存せず、
/// 表示・走査順は常に型名ソート順で決定的になる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shape(pub BTreeMap<String, u32>);

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    /// 型名の列から出現回数を数えて多重集合を作る
    pub fn count_occurrences<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut map = BTreeMap::new();
        for t in types {
            *map.entry(t.into()).or_insert(0) += 1;
        }
        Shape(map)
    }

    /// 型名と回数を追加する（既存エントリには加算）
    pub fn add(&mut self, type_name: impl Into<String>, count: u32) {
        *self.0.entry(type_name.into()).or_insert(0) += count;
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// 構造体風の表示 `{ char: 1; int: 2; };`
    pub fn pretty(&self) -> String {
        let mut out = String::from("{ ");
        for (name, count) in self.iter() {
            out.push_str(&format!("{}: {}; ", name, count));
        }
        out.push_str("};");
        out
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for Shape {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut shape = Shape::new();
        for (name, count) in iter {
            shape.add(name, count);
        }
        shape
    }
}

/// 関数シグネチャ（パラメータ多重集合と戻り値型）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncSig {
    /// パラメータの型多重集合
    pub params: Shape,
    /// 戻り値の型名
    #[serde(rename = "return")]
    pub ret: String,
}

impl FuncSig {
    pub fn new(params: Shape, ret: impl Into<String>) -> Self {
        Self {
            params,
            ret: ret.into(),
        }
    }
}

impl fmt::Display for FuncSig {
    /// `(char: 1, int: 2) -> void` 形式
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        let mut first = true;
        for (name, count) in self.params.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, count)?;
            first = false;
        }
        write!(f, ") -> {}", self.ret)
    }
}
