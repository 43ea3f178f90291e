use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, ValueEnum};

use revform::constants::{DEFAULT_CHANNEL_CAPACITY, MAX_PERMUTATION_LENGTH};
use revform::domain::enumeration::{ChannelCapacity, Degree, EnumerationConfig, OutputFormat};
use revform::domain::permutation::{factorial, rank_of, Permutation};
use revform::infrastructure::storage::{
    CountingWriter, SnapshotWriter, StreamWriter, UniqueCheckWriter,
};
use revform::logging::{init_logging, LogConfig};
use revform::EnumerationService;

/// 引数エラー時の終了コード
const USAGE_EXIT_CODE: u8 = 1;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Jsonl,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Jsonl => OutputFormat::Jsonl,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "revform")]
#[command(about = "逆探索で長さ n の順列をすべて列挙する")]
struct Args {
    /// 順列の長さ (1 ~ 20)
    length: usize,

    /// 出力フォーマット
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,

    /// 生産側と消費側の間のチャネル容量
    #[arg(long, default_value_t = DEFAULT_CHANNEL_CAPACITY)]
    capacity: usize,

    /// 順列を出力せず件数だけ表示
    #[arg(short, long)]
    quiet: bool,

    /// 出力の重複をチェック
    #[arg(long)]
    check_unique: bool,

    /// 出力先ファイル（未指定なら標準出力）
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 詳細ログ
    #[arg(short, long)]
    verbose: bool,

    /// ログファイル（未指定なら標準エラー）
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// 実行せずに終了する場合の出力と終了コード
struct Rejection {
    message: String,
    code: u8,
    to_stderr: bool,
}

fn main() -> ExitCode {
    let (args, config) = match parse_args(std::env::args_os()) {
        Ok(parsed) => parsed,
        Err(rejection) => {
            if rejection.to_stderr {
                eprint!("{}", rejection.message);
            } else {
                print!("{}", rejection.message);
            }
            return ExitCode::from(rejection.code);
        }
    };

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("エラー: {:#}", e);
            ExitCode::from(1)
        }
    }
}

/// 引数を解析・検証する
///
/// 長さが範囲外なら理由と usage を返す。`--help` / `--version` は終了コード0。
fn parse_args<I, T>(argv: I) -> Result<(Args, EnumerationConfig), Rejection>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = Args::try_parse_from(argv).map_err(|e| Rejection {
        message: e.render().to_string(),
        code: if e.use_stderr() { USAGE_EXIT_CODE } else { 0 },
        to_stderr: e.use_stderr(),
    })?;

    let config = build_config(&args).map_err(|e| Rejection {
        message: format!("{:#}\n{}\n", e, Args::command().render_usage()),
        code: USAGE_EXIT_CODE,
        to_stderr: true,
    })?;
    Ok((args, config))
}

/// 引数を検証して設定を組み立てる
fn build_config(args: &Args) -> Result<EnumerationConfig> {
    let degree = Degree::new(args.length).with_context(|| {
        format!("順列の長さは 1 ~ {} で指定してください", MAX_PERMUTATION_LENGTH)
    })?;
    let mut config = EnumerationConfig::new(degree);
    config.capacity = ChannelCapacity::new(args.capacity).context("チャネル容量が不正です")?;
    config.format = args.format.into();
    config.count_only = args.quiet;
    config.check_unique = args.check_unique;
    Ok(config)
}

fn run(args: &Args, config: &EnumerationConfig) -> Result<()> {
    init_logging(&LogConfig {
        verbose: args.verbose,
        file: args.log_file.clone(),
    })?;

    let n = config.degree.get();
    let permutation = Permutation::new(n)?;

    let writer: Box<dyn SnapshotWriter<Vec<u32>>> = if config.count_only {
        Box::new(CountingWriter::new())
    } else if let Some(path) = &args.output {
        Box::new(StreamWriter::create(path, config.format)?)
    } else {
        Box::new(StreamWriter::stdout(config.format))
    };
    let writer: Box<dyn SnapshotWriter<Vec<u32>>> = if config.check_unique {
        Box::new(UniqueCheckWriter::new(writer, |s: &Vec<u32>| unique_key(s)))
    } else {
        writer
    };

    let summary = EnumerationService::new(config.capacity).run(permutation, writer)?;

    if let Some(expected) = factorial(n) {
        if expected != summary.received {
            tracing::warn!(expected, received = summary.received, "件数が n! と一致しません");
        }
    }

    println!("Number of permutations is {}", summary.received);
    if let Some(unique) = summary.unique {
        println!("Unique permutations: {}", unique);
    }
    tracing::debug!(rate = summary.nodes_per_second(), "ノード/秒");

    Ok(())
}

/// 重複チェック用のキー（長さは20以下に制限済みなので順位は u64 に収まる）
fn unique_key(snapshot: &[u32]) -> u64 {
    rank_of(snapshot).unwrap_or(u64::MAX)
}
