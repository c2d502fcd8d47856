//! レポート整形
//!
//! 照合結果を人間向けのテキストに描画する。診断（観測順）が先、
//! 欠落サマリ5種が固定順で後に続く。空のセクションは出力しない。

use std::io::{self, Write};

use crate::matcher::Report;
use crate::source::FileRegistry;

/// レポートを任意の出力先に描画するプリンタ
pub struct ReportPrinter<'a, W: Write> {
    out: &'a mut W,
    files: &'a FileRegistry,
}

impl<'a, W: Write> ReportPrinter<'a, W> {
    pub fn new(out: &'a mut W, files: &'a FileRegistry) -> Self {
        Self { out, files }
    }

    /// レポート全体を描画する
    pub fn print_report(&mut self, report: &Report) -> io::Result<()> {
        for diag in &report.diagnostics {
            writeln!(
                self.out,
                "{}: {}",
                diag.loc.display(self.files),
                diag.message
            )?;
        }

        if !report.missing_functions.is_empty() {
            writeln!(self.out, "MISSING NAMED FUNCTION(s):")?;
            for name in &report.missing_functions {
                writeln!(self.out, "{}", name)?;
            }
        }
        if !report.missing_structs.is_empty() {
            writeln!(self.out, "MISSING NAMED STRUCT(s):")?;
            for name in &report.missing_structs {
                writeln!(self.out, "{}", name)?;
            }
        }
        if !report.missing_unnamed_functions.is_empty() {
            writeln!(self.out, "MISSING UNNAMED FUNCTION(s):")?;
            for sig in &report.missing_unnamed_functions {
                writeln!(self.out, "{}", sig)?;
            }
        }
        if !report.missing_unnamed_structs.is_empty() {
            writeln!(self.out, "MISSING UNNAMED STRUCT(s):")?;
            for shape in &report.missing_unnamed_structs {
                writeln!(self.out, "{}", shape.pretty())?;
            }
        }
        if !report.missing_var_structs.is_empty() {
            writeln!(self.out, "MISSING VARIABLE STRUCT(s):")?;
            for (name, shape) in &report.missing_var_structs {
                writeln!(self.out, "{} {}", name, shape.pretty())?;
            }
        }

        Ok(())
    }
}
