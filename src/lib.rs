pub mod api;
pub mod core;

/// Log to stdout so every decision lands next to the tool's other output.
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
