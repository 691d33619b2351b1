/// Initialize logging for the process.
///
/// The filter is taken from `RUST_LOG`, defaulting to `info`. Calling this more than once only
/// reports the error, so that tests may run several services in the same process.
pub fn init_logging(name: &str) {
    if let Err(e) = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init()
    {
        eprintln!("Error initializing logging: {:?}", e);
        return;
    }

    log::debug!("Logging initialized for {name}");
}
