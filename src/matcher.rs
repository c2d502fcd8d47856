//! 観測と期待の照合
//!
//! 解決済みカタログを観測宣言で破壊的に消費する。名前付き宣言を先に、
//! 次に無名宣言を構造的等価性で照合し（構造体はその間にプレースホルダ
//! 解決済み構造体への照合を挟む）、一致したエントリを取り除く。
//! 最後まで残ったエントリが「欠落」としてレポートされる。

use crate::observe::Observations;
use crate::resolve::ResolvedCatalog;
use crate::shape::{FuncSig, Shape};
use crate::source::SourceLocation;

/// シグネチャ不一致の診断（観測位置付き）
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub loc: SourceLocation,
    pub message: String,
}

/// 照合結果
///
/// 診断は観測の走査順（名前ソート順）、欠落は固定の5カテゴリ。
#[derive(Debug, Default)]
pub struct Report {
    /// 名前は一致したが形状が違った宣言の診断
    pub diagnostics: Vec<Diagnostic>,
    /// 観測されなかった名前付き関数
    pub missing_functions: Vec<String>,
    /// 観測されなかった名前付き構造体
    pub missing_structs: Vec<String>,
    /// 消費されなかった無名関数
    pub missing_unnamed_functions: Vec<FuncSig>,
    /// 消費されなかった無名構造体
    pub missing_unnamed_structs: Vec<Shape>,
    /// 消費されなかったプレースホルダ解決済み構造体（束縛先名と形状）
    pub missing_var_structs: Vec<(String, Shape)>,
}

impl Report {
    /// 診断も欠落もないかどうか
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
            && self.missing_functions.is_empty()
            && self.missing_structs.is_empty()
            && self.missing_unnamed_functions.is_empty()
            && self.missing_unnamed_structs.is_empty()
            && self.missing_var_structs.is_empty()
    }
}

/// 等価な要素をひとつだけ取り除く
///
/// 同一性ではなく等価性による削除なので、同値エントリが複数あっても
/// 消費されるのは常にひとつ。削除順は最終的な残存集合に影響しない。
fn remove_first_eq<T: PartialEq>(items: &mut Vec<T>, target: &T) -> bool {
    if let Some(pos) = items.iter().position(|item| item == target) {
        items.remove(pos);
        true
    } else {
        false
    }
}

/// 解決済みカタログを観測宣言と照合する
///
/// カタログは消費される（一致したエントリは削除される）。
/// 観測側が余る分は報告しない：このチェックは「期待したものが
/// 存在するか」だけを問う。
pub fn match_declarations(mut catalog: ResolvedCatalog, obs: &Observations) -> Report {
    let mut report = Report::default();

    for (name, observed) in obs.functions() {
        if let Some(expected) = catalog.functions.remove(name) {
            if expected != observed.sig {
                report.diagnostics.push(Diagnostic {
                    loc: observed.loc.clone(),
                    message: format!("expected {} but got {}", expected, observed.sig),
                });
            }
        } else {
            // 無名期待は「この形状の関数がどこかに存在する」ことしか
            // 主張しないので、一致しなくても診断は出さない
            remove_first_eq(&mut catalog.unnamed_functions, &observed.sig);
        }
    }

    for (name, observed) in obs.records() {
        if let Some(expected) = catalog.structs.remove(name) {
            if expected != observed.shape {
                report.diagnostics.push(Diagnostic {
                    loc: observed.loc.clone(),
                    message: format!(
                        "expected {} but got {}",
                        expected.pretty(),
                        observed.shape.pretty()
                    ),
                });
            }
        } else if let Some(key) = catalog
            .var_structs
            .iter()
            .find(|(_, shape)| **shape == observed.shape)
            .map(|(key, _)| key.clone())
        {
            catalog.var_structs.remove(&key);
        } else {
            remove_first_eq(&mut catalog.unnamed_structs, &observed.shape);
        }
    }

    report.missing_functions = catalog.functions.into_keys().collect();
    report.missing_structs = catalog.structs.into_keys().collect();
    report.missing_unnamed_functions = catalog.unnamed_functions;
    report.missing_unnamed_structs = catalog.unnamed_structs;
    report.missing_var_structs = catalog.var_structs.into_iter().collect();

    report
}
