// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

/// Silent unless `--verbose` (debug events from this crate) or `RUST_LOG`
/// (any directive, taking precedence) asks otherwise.
pub fn init_logging(verbose: bool) {
    let filter = env_filter(verbose, std::env::var("RUST_LOG").ok().as_deref());

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn env_filter(verbose: bool, from_env: Option<&str>) -> EnvFilter {
    let fallback = if verbose { "spendbook=debug" } else { "off" };
    from_env
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn rust_log_alone_enables_events() {
        let filter = env_filter(false, Some("debug"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn verbose_flag_and_default() {
        assert_eq!(env_filter(false, None).max_level_hint(), Some(LevelFilter::OFF));
        assert_eq!(
            env_filter(true, None).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }
}
