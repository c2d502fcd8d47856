//! プレースホルダ解決
//!
//! `%structs` テンプレートを観測済み構造体と構造的に突き合わせて
//! プレースホルダ識別子 → 具体型名の束縛を作り、その束縛を
//! カタログ中の全期待宣言に代入して完全に具体的な形へ書き換える。
//!
//! 束縛の曖昧さ（複数の観測が同じテンプレートに一致）は
//! ソート順で最初の候補が勝ち、以降の候補は警告だけ出して捨てる。

use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::DeclConfig;
use crate::observe::Observations;
use crate::shape::{FuncSig, Shape};
use crate::type_spec::{TypeParseError, TypeSpec, parse_type};

/// プレースホルダ識別子から観測された具体型名への束縛
pub type BindingMap = BTreeMap<String, String>;

/// プレースホルダ解決のエラー
///
/// 回復可能：参照元の宣言ひとつをチェック対象から外すだけで、
/// 他の宣言やラン全体には影響しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// 型トークンが文法に合わない
    Syntax(TypeParseError),
    /// 束縛のないプレースホルダ参照
    UnboundVariable(String),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::Syntax(e) => write!(f, "{}", e),
            ResolveError::UnboundVariable(name) => write!(f, "no such variable: {}", name),
        }
    }
}

impl std::error::Error for ResolveError {}

impl From<TypeParseError> for ResolveError {
    fn from(e: TypeParseError) -> Self {
        ResolveError::Syntax(e)
    }
}

/// 解決済みカタログ
///
/// 全エントリが具体型名のみを含む。照合フェーズはこれを破壊的に
/// 消費し、残ったものが「欠落」になる。
#[derive(Debug, Clone, Default)]
pub struct ResolvedCatalog {
    pub functions: BTreeMap<String, FuncSig>,
    pub structs: BTreeMap<String, Shape>,
    pub unnamed_functions: Vec<FuncSig>,
    pub unnamed_structs: Vec<Shape>,
    /// プレースホルダ構造体の解決結果。キーは束縛先の観測名
    /// （プレースホルダ識別子ではない）。
    pub var_structs: BTreeMap<String, Shape>,
}

/// `%structs` テンプレートを観測済み構造体と照合して束縛を作る
///
/// テンプレート名は型トークンとしてパースでき、かつプレースホルダ
/// （`%` 付き、ポインタなし）でなければならない。違反は警告してスキップ。
pub fn bind_vars(var_structs: &BTreeMap<String, Shape>, obs: &Observations) -> BindingMap {
    let mut bindings = BindingMap::new();

    for (template_name, template_shape) in var_structs {
        let spec = match parse_type(template_name) {
            Ok(spec) => spec,
            Err(e) => {
                eprintln!("Warning: {}, skipped", e);
                continue;
            }
        };
        if !spec.is_var {
            eprintln!(
                "Warning: missing variable marker '%' in {}, skipped",
                template_name
            );
            continue;
        }
        if spec.pointers > 0 {
            eprintln!(
                "Warning: unexpected pointer asterisks in {}, skipped",
                template_name
            );
            continue;
        }

        for (observed_name, observed) in obs.records() {
            if *template_shape != observed.shape {
                continue;
            }
            if let Some(bound) = bindings.get(&spec.name) {
                eprintln!(
                    "Warning: ambiguous binding for %{}: already bound to {}, ignoring {}",
                    spec.name, bound, observed_name
                );
                continue;
            }
            bindings.insert(spec.name.clone(), observed_name.clone());
        }
    }

    bindings
}

/// 型トークンを束縛で解決して具体的な表示名に変換する
///
/// プレースホルダでなければそのまま正規形（`name *...`）に直すだけ。
/// ポインタ深度は代入後も保存される。
pub fn resolve_token(token: &str, bindings: &BindingMap) -> Result<String, ResolveError> {
    let spec = parse_type(token)?;
    if spec.is_concrete() {
        return Ok(TypeSpec::new(false, spec.name, spec.pointers).to_string());
    }
    let target = bindings
        .get(&spec.name)
        .ok_or_else(|| ResolveError::UnboundVariable(spec.name.clone()))?;
    Ok(TypeSpec::new(false, target.clone(), spec.pointers).to_string())
}

/// 形状中の全型トークンを解決する
///
/// 解決後に同じ型名へ合流したエントリは出現回数を合算する。
pub fn resolve_shape(shape: &Shape, bindings: &BindingMap) -> Result<Shape, ResolveError> {
    let mut resolved = Shape::new();
    for (token, count) in shape.iter() {
        resolved.add(resolve_token(token, bindings)?, count);
    }
    Ok(resolved)
}

/// 関数シグネチャを解決する
pub fn resolve_sig(sig: &FuncSig, bindings: &BindingMap) -> Result<FuncSig, ResolveError> {
    Ok(FuncSig {
        params: resolve_shape(&sig.params, bindings)?,
        ret: resolve_token(&sig.ret, bindings)?,
    })
}

/// カタログ全体を解決する
///
/// 束縛を作ったあと、各カテゴリのエントリを具体形へ書き換える。
/// 解決に失敗した宣言は警告を出してチェック対象から落とすだけで、
/// 他の宣言の解決は続行する。
pub fn resolve_catalog(config: &DeclConfig, obs: &Observations) -> ResolvedCatalog {
    let bindings = bind_vars(&config.var_structs, obs);
    let mut resolved = ResolvedCatalog::default();

    for (name, sig) in &config.functions {
        match resolve_sig(sig, &bindings) {
            Ok(sig) => {
                resolved.functions.insert(name.clone(), sig);
            }
            Err(e) => eprintln!("Warning: {}, skipped {}", e, name),
        }
    }

    for (name, shape) in &config.structs {
        match resolve_shape(shape, &bindings) {
            Ok(shape) => {
                resolved.structs.insert(name.clone(), shape);
            }
            Err(e) => eprintln!("Warning: {}, skipped {}", e, name),
        }
    }

    for sig in &config.unnamed_functions {
        match resolve_sig(sig, &bindings) {
            Ok(sig) => resolved.unnamed_functions.push(sig),
            Err(e) => eprintln!("Warning: {}, skipped {}", e, sig),
        }
    }

    for shape in &config.unnamed_structs {
        match resolve_shape(shape, &bindings) {
            Ok(shape) => resolved.unnamed_structs.push(shape),
            Err(e) => eprintln!("Warning: {}, skipped {}", e, shape.pretty()),
        }
    }

    // テンプレート自身も解決し、束縛先の観測名をキーに据え直す。
    // 自分の束縛が無いテンプレートは UnboundVariable で落ちる。
    for (template_name, shape) in &config.var_structs {
        let key = match resolve_token(template_name, &bindings) {
            Ok(key) => key,
            Err(e) => {
                eprintln!("Warning: {}, skipped {}", e, template_name);
                continue;
            }
        };
        match resolve_shape(shape, &bindings) {
            Ok(shape) => {
                resolved.var_structs.insert(key, shape);
            }
            Err(e) => eprintln!("Warning: {}, skipped {}", e, template_name),
        }
    }

    resolved
}
