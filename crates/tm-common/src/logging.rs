use std::ffi::OsString;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use crate::run_id;

const LOG_DIR_ENV: &str = "TM_LOG_DIR";
const BACKTRACE_ENV: &str = "TM_LOG_INCLUDE_BACKTRACE";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// ログの出力先
///
/// ファイル指定がなければ stderr（stdout は結果 JSON 用）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    Stderr,
    /// `<dir>/<app>.log`（日次ローテーション）
    DailyFile(PathBuf),
}

impl LogDestination {
    /// `TM_LOG_DIR` の値から出力先を決める（未設定・空文字は stderr）
    pub fn resolve(log_dir: Option<OsString>) -> Self {
        match log_dir {
            Some(dir) if !dir.is_empty() => LogDestination::DailyFile(PathBuf::from(dir)),
            _ => LogDestination::Stderr,
        }
    }

    pub fn from_env() -> Self {
        Self::resolve(std::env::var_os(LOG_DIR_ENV))
    }
}

fn flag_enabled(value: Option<&str>) -> bool {
    value.is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Install a global panic hook that routes panics through `tracing`.
/// The hook is installed once per process; later calls are no-ops.
pub fn install_tracing_panic_hook(app_name: &'static str) {
    static INSTALLED: OnceLock<()> = OnceLock::new();

    INSTALLED.get_or_init(|| {
        let default_hook = panic::take_hook();
        let include_backtrace = flag_enabled(std::env::var(BACKTRACE_ENV).ok().as_deref());

        panic::set_hook(Box::new(move |info| {
            let location = info
                .location()
                .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()));
            let message = info
                .payload()
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic payload not string".into());

            tracing::error!(
                application = app_name,
                process_run_id = run_id::get(),
                location = location.as_deref().unwrap_or("unknown"),
                panic_message = %message,
                "panic captured"
            );

            if include_backtrace {
                default_hook(info);
            }
        }));
    });
}

fn daily_file_writer(app_name: &'static str, dir: &Path) -> Option<BoxMakeWriter> {
    if let Err(err) = std::fs::create_dir_all(dir) {
        tracing::warn!(
            error = %err,
            dir = %dir.display(),
            "failed to create TM_LOG_DIR; falling back to stderr"
        );
        return None;
    }

    let appender = tracing_appender::rolling::daily(dir, format!("{app_name}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);
    Some(BoxMakeWriter::new(non_blocking))
}

/// Initialize a tracing subscriber for a matching binary.
///
/// With `TM_LOG_DIR` set, logs go to `<TM_LOG_DIR>/<app>.log` with daily rotation.
/// Otherwise they are written to stderr. `RUST_LOG` controls filtering (default `info`).
/// A startup line carries the process run ID; returns the destination actually in use.
pub fn init_tracing_subscriber(app_name: &'static str) -> LogDestination {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false);

    let requested = LogDestination::from_env();
    let writer = match &requested {
        LogDestination::DailyFile(dir) => daily_file_writer(app_name, dir),
        LogDestination::Stderr => None,
    };

    let destination = match writer {
        Some(writer) => {
            let _ = builder.with_writer(writer).try_init();
            requested
        }
        None => {
            let _ = builder.with_writer(std::io::stderr).try_init();
            LogDestination::Stderr
        }
    };

    tracing::debug!(
        application = app_name,
        process_run_id = run_id::get(),
        destination = ?destination,
        "tracing initialized"
    );
    destination
}
