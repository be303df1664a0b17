/// Install an stderr logger honoring `RUST_LOG` (default `info`).
///
/// `quiet` caps output at warnings, `verbose` raises it to debug. Safe to
/// call more than once; later calls are ignored.
pub fn init_logging(quiet: bool, verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr);

    let _ = builder.try_init();
}
