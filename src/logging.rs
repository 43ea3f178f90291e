// ログ初期化（tracing）

use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, Once};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// ログ設定
#[derive(Clone, Debug, Default)]
pub struct LogConfig {
    /// 詳細ログ（debug レベル）
    pub verbose: bool,
    /// 指定時はこのファイルへ書き込む（未指定なら標準エラー）
    pub file: Option<PathBuf>,
}

impl LogConfig {
    /// 環境変数が無いときのフィルタ
    pub fn default_directive(&self) -> &'static str {
        if self.verbose {
            "revform=debug"
        } else {
            "revform=info"
        }
    }
}

/// ログを初期化する
///
/// `REVFORM_LOG` が設定されていればそちらを優先する。2回目以降の呼び出しは何もしない。
/// 標準出力はスナップショット用なのでログは標準エラーかファイルへ出す。
/// ログファイルも初回の呼び出しでだけ作成する。
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let mut result = Ok(());
    INIT.call_once(|| result = install_subscriber(config));
    result
}

fn install_subscriber(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    let file = match &config.file {
        Some(path) => Some(
            File::create(path)
                .with_context(|| format!("ログファイルを作成できません: {}", path.display()))?,
        ),
        None => None,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match file {
        Some(file) => registry
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_writer(Mutex::new(file)),
            )
            .try_init(),
        None => registry
            .with(fmt::layer().with_target(true).with_writer(io::stderr))
            .try_init(),
    };
    installed.map_err(|e| anyhow!("ログの初期化に失敗しました: {}", e))
}
