use cfg_if::cfg_if;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};
use tracing_subscriber::util::SubscriberInitExt;

/// Filter used when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        /// Route tracing output to the browser console. Safe to call twice.
        pub fn init() {
            let wasm_layer = tracing_wasm::WASMLayer::new(tracing_wasm::WASMLayerConfig::default());

            if tracing_subscriber::registry()
                .with(env_filter())
                .with(wasm_layer)
                .try_init()
                .is_err()
            {
                return;
            }

            // Panics with stacktrace
            #[cfg(feature = "console_error_panic_hook")]
            console_error_panic_hook::set_once();

            tracing::debug!("browser logging initialised");
        }
    } else {
        use std::path::{Path, PathBuf};

        use once_cell::sync::OnceCell;
        use tracing::Subscriber;
        use tracing_appender::non_blocking::WorkerGuard;
        use tracing_subscriber::fmt::{self, format, MakeWriter};
        use tracing_subscriber::registry::LookupSpan;

        /// Log file used when `RUST_LOG_FILE` is unset
        const DEFAULT_LOG_FILE: &str = "logs/spin-replay.log";

        static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

        /// Split a log file path into the rolling directory and file prefix
        fn log_target(path: &str) -> (PathBuf, PathBuf) {
            let path = Path::new(path);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file = path.file_name().map_or_else(
                || PathBuf::from("spin-replay.log"),
                PathBuf::from,
            );
            (dir.to_path_buf(), file)
        }

        type CompactLayer<S, W> =
            fmt::Layer<S, format::DefaultFields, format::Format<format::Compact>, W>;

        fn compact_layer<S, W>(writer: W) -> CompactLayer<S, W>
        where
            S: Subscriber + for<'a> LookupSpan<'a>,
            W: for<'w> MakeWriter<'w> + 'static,
        {
            fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .compact()
        }

        /// Log to stderr and a daily rolling file. Safe to call twice.
        pub fn init() {
            let path = std::env::var("RUST_LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
            let (dir, file) = log_target(&path);
            let (file_writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, file));

            if tracing_subscriber::registry()
                .with(env_filter())
                .with(compact_layer(std::io::stderr))
                .with(compact_layer(file_writer).with_ansi(false))
                .try_init()
                .is_err()
            {
                return;
            }
            let _ = FILE_GUARD.set(guard);

            // Route panics through tracing so they land in the log file too
            std::panic::set_hook(Box::new(|info| {
                let backtrace = std::backtrace::Backtrace::capture();
                tracing::error!(%backtrace, "{info}");
            }));
        }

    }
}
