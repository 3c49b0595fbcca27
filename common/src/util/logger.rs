use env_logger::Env;

/// Installs the global logger. `RUST_LOG` overrides the `info` default.
/// Safe to call more than once.
pub fn init() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
