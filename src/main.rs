//! declcheck CLI
//!
//! フロントエンドが抽出した観測宣言(JSON)を期待カタログ(JSON)と
//! 照合し、不一致診断と欠落サマリを出力する。
//!
//! 終了コード: 設定のロード/パースエラーは 2（照合前に中断）、
//! 観測入力の読み込みエラーは 1、照合の結果自体は終了コードを変えない。

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

use declcheck::{CheckOptions, DeclCheck, FuncSig, ReportPrinter, Shape};

/// コマンドライン引数
#[derive(Parser)]
#[command(name = "declcheck")]
#[command(version, about = "Check C declarations against an expected signature catalog")]
struct Cli {
    /// 観測宣言ファイル（フロントエンドの抽出結果、JSON）
    input: PathBuf,

    /// 期待宣言カタログ（JSON）
    #[arg(short = 'd', long = "decls")]
    decls: PathBuf,

    /// 出力ファイル（省略時は標準出力）
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// 無名宣言と名前付き宣言の重複を設定エラーとして弾く
    #[arg(long = "check-overlap")]
    check_overlap: bool,
}

/// 観測宣言ファイルのスキーマ
#[derive(Debug, Deserialize)]
struct ObservationFile {
    #[serde(default)]
    functions: Vec<FunctionEntry>,
    #[serde(default)]
    records: Vec<RecordEntry>,
}

/// 観測された関数（型文字列は解決済みの表示名）
#[derive(Debug, Deserialize)]
struct FunctionEntry {
    name: String,
    params: Shape,
    #[serde(rename = "return")]
    ret: String,
    file: PathBuf,
    #[serde(default)]
    line: u32,
    #[serde(default)]
    column: u32,
}

/// 観測された構造体
#[derive(Debug, Deserialize)]
struct RecordEntry {
    name: String,
    fields: Shape,
    file: PathBuf,
    #[serde(default)]
    line: u32,
    #[serde(default)]
    column: u32,
}

fn main() {
    let cli = Cli::parse();
    let options = CheckOptions {
        overlap_check: cli.check_overlap,
    };

    // 設定エラーは照合に入る前の致命的パス
    let mut check = match DeclCheck::from_file(&cli.decls, &options) {
        Ok(check) => check,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&cli, &mut check) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, check: &mut DeclCheck) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(&cli.input)?;
    let observed: ObservationFile = serde_json::from_str(&text)?;

    for func in observed.functions {
        let loc = check.location(func.file, func.line, func.column);
        check.observe_function(&func.name, FuncSig::new(func.params, func.ret), loc);
    }
    for record in observed.records {
        let loc = check.location(record.file, record.line, record.column);
        check.observe_record(&record.name, record.fields, loc);
    }

    let report = check.run();

    if let Some(ref path) = cli.output {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        ReportPrinter::new(&mut writer, check.files()).print_report(&report)?;
        writer.flush()?;
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        ReportPrinter::new(&mut handle, check.files()).print_report(&report)?;
        handle.flush()?;
    }

    Ok(())
}
