//! declcheck
//!
//! C翻訳単位から抽出した宣言（関数・構造体）を、JSONで記述した
//! 期待カタログと照合するエンジン。名前付き宣言は識別子で、
//! 無名宣言は型多重集合の構造的等価性で照合し、プレースホルダ
//! 構造体テンプレートは観測された形状から具体型名へ束縛する。
//! 結果は不一致診断と欠落サマリのレポートになる。

pub mod catalog;
pub mod check;
pub mod matcher;
pub mod observe;
pub mod report;
pub mod resolve;
pub mod shape;
pub mod source;
pub mod type_spec;

// 主要な型を再エクスポート
pub use catalog::{ConfigError, DeclConfig};
pub use check::{CheckOptions, DeclCheck};
pub use matcher::{Diagnostic, Report};
pub use observe::{Observations, ObservedFunction, ObservedRecord};
pub use report::ReportPrinter;
pub use resolve::{BindingMap, ResolveError, ResolvedCatalog};
pub use shape::{FuncSig, Shape};
pub use source::{DisplayLocation, FileId, FileRegistry, SourceLocation};
pub use type_spec::{TypeParseError, TypeSpec, parse_type};
