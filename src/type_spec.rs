//! 型トークンのパーサ
//!
//! 期待宣言カタログで使われるコンパクトな型文法
//! `['%'] ['struct '] ident [' '* '*'+]` を構造化表現にパースする。
//! `%` プレフィックスはプレースホルダ（後で具体型名に束縛される型変数）を表す。

use std::fmt;

/// パース済みの型トークン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    /// プレースホルダ（`%` プレフィックス付き）かどうか
    pub is_var: bool,
    /// 基底の識別子（`struct ` プレフィックスは意味名に含めない）
    pub name: String,
    /// ポインタ深度（`*` の数）
    pub pointers: u32,
}

impl TypeSpec {
    pub fn new(is_var: bool, name: impl Into<String>, pointers: u32) -> Self {
        Self {
            is_var,
            name: name.into(),
            pointers,
        }
    }

    /// 具体型（プレースホルダでない）かどうか
    pub fn is_concrete(&self) -> bool {
        !self.is_var
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_var {
            write!(f, "%")?;
        }
        write!(f, "{}", self.name)?;
        if self.pointers > 0 {
            write!(f, " ")?;
            for _ in 0..self.pointers {
                write!(f, "*")?;
            }
        }
        Ok(())
    }
}

/// 型トークンのパースエラー
///
/// 回復可能：呼び出し側は警告を出して該当エントリをスキップする。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeParseError {
    /// 不正な文字（入力・位置・文字を保持）
    UnexpectedChar { input: String, pos: usize, ch: char },
    /// 予期しない入力終端
    UnexpectedEnd { input: String },
}

impl fmt::Display for TypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeParseError::UnexpectedChar { input, pos, ch } => {
                write!(f, "unexpected character '{}' in \"{}\" ({})", ch, input, pos)
            }
            TypeParseError::UnexpectedEnd { input } => {
                write!(f, "unexpected end of input in \"{}\"", input)
            }
        }
    }
}

impl std::error::Error for TypeParseError {}

/// 型トークンをパースする
///
/// 文法（左から右、純粋関数）:
/// - 先頭の `%` はプレースホルダマーカー（1文字消費）
/// - リテラル `struct ` プレフィックスは読み飛ばす（後続の空白も含めて）
/// - 識別子（先頭は英字か `_`、以降は英数字か `_`）
/// - 識別子で入力が尽きればポインタ深度 0
/// - 空白の連続を1回読み飛ばし、残りは全て `*` でなければならない
pub fn parse_type(input: &str) -> Result<TypeSpec, TypeParseError> {
    let s = input.as_bytes();
    let mut pos = 0usize;

    let err_at = |pos: usize| {
        if pos < s.len() {
            TypeParseError::UnexpectedChar {
                input: input.to_string(),
                pos,
                ch: s[pos] as char,
            }
        } else {
            TypeParseError::UnexpectedEnd {
                input: input.to_string(),
            }
        }
    };

    let is_var = s.first() == Some(&b'%');
    if is_var {
        pos += 1;
    }

    // "struct " プレフィックスは意味名の一部ではない
    const STRUCT_PREFIX: &[u8] = b"struct ";
    if s[pos..].starts_with(STRUCT_PREFIX) {
        pos += STRUCT_PREFIX.len();
        while pos < s.len() && s[pos] == b' ' {
            pos += 1;
        }
    }

    if pos >= s.len() || !(s[pos].is_ascii_alphabetic() || s[pos] == b'_') {
        return Err(err_at(pos));
    }

    let name_start = pos;
    pos += 1;
    while pos < s.len() && (s[pos].is_ascii_alphanumeric() || s[pos] == b'_') {
        pos += 1;
    }
    let name = input[name_start..pos].to_string();

    // 識別子で入力が尽きた（ポインタなし）
    if pos == s.len() {
        return Ok(TypeSpec::new(is_var, name, 0));
    }

    while pos < s.len() && s[pos] == b' ' {
        pos += 1;
    }

    // 空白の後に何もない（"int " のような末尾空白）は不正
    if pos == s.len() {
        return Err(err_at(pos));
    }

    let mut pointers = 0u32;
    while pos < s.len() {
        if s[pos] == b'*' {
            pointers += 1;
            pos += 1;
        } else {
            return Err(err_at(pos));
        }
    }

    Ok(TypeSpec::new(is_var, name, pointers))
}
