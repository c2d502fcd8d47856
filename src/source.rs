//! ソース位置の表現
//!
//! 観測された宣言が由来するソース位置を保持する。
//! エンジン本体にとって位置は不透明で、診断表示にのみ使われる。

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// ファイル識別子
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct FileId(u32);

/// ソース位置
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceLocation {
    pub file_id: FileId,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(file_id: FileId, line: u32, column: u32) -> Self {
        Self {
            file_id,
            line,
            column,
        }
    }

    /// ファイル名解決付きの表示アダプタを返す
    pub fn display<'a>(&'a self, files: &'a FileRegistry) -> DisplayLocation<'a> {
        DisplayLocation { loc: self, files }
    }
}

/// エラー表示用のロケーション（ファイル名解決付き）
pub struct DisplayLocation<'a> {
    loc: &'a SourceLocation,
    files: &'a FileRegistry,
}

impl fmt::Display for DisplayLocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.files.get_path(self.loc.file_id);
        write!(f, "{}:{}:{}", path.display(), self.loc.line, self.loc.column)
    }
}

/// ファイルレジストリ
///
/// パスを一度だけ登録し、以降は軽量な `FileId` で参照する。
#[derive(Debug, Default, Clone)]
pub struct FileRegistry {
    paths: Vec<PathBuf>,
    path_to_id: HashMap<PathBuf, FileId>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// パスを登録してIDを返す（登録済みなら既存のID）
    pub fn register(&mut self, path: PathBuf) -> FileId {
        if let Some(&id) = self.path_to_id.get(&path) {
            return id;
        }
        let id = FileId(self.paths.len() as u32);
        self.path_to_id.insert(path.clone(), id);
        self.paths.push(path);
        id
    }

    /// IDからパスを取得
    pub fn get_path(&self, id: FileId) -> &Path {
        &self.paths[id.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_dedup() {
        let mut files = FileRegistry::new();
        let a = files.register(PathBuf::from("a.c"));
        let b = files.register(PathBuf::from("b.c"));
        let a2 = files.register(PathBuf::from("a.c"));
        assert_ne!(a, b);
        assert_eq!(a, a2);
    }

    #[test]
    fn test_display_location() {
        let mut files = FileRegistry::new();
        let id = files.register(PathBuf::from("main.c"));
        let loc = SourceLocation::new(id, 10, 5);
        assert_eq!(loc.display(&files).to_string(), "main.c:10:5");
    }
}
