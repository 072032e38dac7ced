/// Sets up structured logging once for the whole process.
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` with `verbose`.
///
/// ```bash
/// RUST_LOG=aperativo::clients=debug aperativo   # client requests only
/// RUST_LOG=warn aperativo                        # refusals and failures
/// ```
pub fn setup_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}
