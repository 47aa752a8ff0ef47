#[cfg(not(target_arch = "wasm32"))]
use log::LevelFilter;

/// Environment variable that switches the CLI to debug logging.
pub const DEBUG_ENV: &str = "ANAGRAM_DEBUG";

/// Initialize logging.
///
/// * Native: logs go to stderr so stdout only carries anagrams. `debug_enabled`
///   picks `Debug` over `Info`; an explicit `RUST_LOG` overrides both.
/// * WASM: logs go to the browser console at the same two levels.
///
/// Calling it again keeps the first logger.
pub fn init_logger(debug_enabled: bool) {
    #[cfg(target_arch = "wasm32")]
    {
        let level = if debug_enabled {
            log::Level::Debug
        } else {
            log::Level::Info
        };
        if console_log::init_with_level(level).is_ok() {
            log::debug!("Console logger initialized at {level:?} level");
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let level = if debug_enabled {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };

        let mut builder = env_logger::Builder::new();
        builder
            .filter(None, level)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false);

        if let Ok(spec) = std::env::var("RUST_LOG") {
            builder.parse_filters(&spec);
        }

        if builder.try_init().is_ok() {
            log::debug!("Logger initialized at {level:?} level");
        }
    }
}
