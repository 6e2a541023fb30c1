//! Logging setup. Output goes to stderr so results on stdout stay clean.

use env_logger::Env;

pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default))
        .format_timestamp(None)
        .try_init();
}
