mod banner;
mod error;
mod progress;
mod tables;

pub use banner::{banner_for_help, print_banner};
pub use error::print_error;
pub use progress::Progress;
pub use tables::{print_export_summary, print_singular_values, print_source_report};

/// How the run reports itself on stderr.
///
/// `interactive` enables spinners, the banner and colored marks. The source
/// report, singular values and written paths are printed unless `quiet`.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub interactive: bool,
    pub quiet: bool,
}

impl Context {
    pub fn detect() -> Self {
        Self {
            interactive: crate::io::stderr_is_tty(),
            quiet: false,
        }
    }

    pub fn with_quiet(self, quiet: bool) -> Self {
        if quiet {
            Self {
                interactive: false,
                quiet: true,
            }
        } else {
            self
        }
    }
}

/// Installs the logger. The source report already lists skipped sources, so
/// warnings are only logged by default when that report is suppressed.
/// `RUST_LOG` overrides either default.
pub fn init_logging(ctx: Context) {
    let default_filter = if ctx.quiet { "warn" } else { "error" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
