use log::LevelFilter;

/// Initialize the logger from the debug flag or `RUST_LOG`
///
/// `--debug` wins; otherwise `RUST_LOG` is honored when set; otherwise only
/// warnings and errors are shown.
pub fn init_logger(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else if std::env::var_os("RUST_LOG").is_some() {
        let _ = env_logger::Builder::from_default_env().try_init();
        return;
    } else {
        LevelFilter::Warn
    };

    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .try_init();
}
