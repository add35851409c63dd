use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Filter built from a `RUST_LOG`-style spec; anything unset falls back to `warn`.
#[must_use]
pub fn log_filter(spec: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(spec.unwrap_or_default())
}

/// Installs the fmt subscriber for the binary, honouring `RUST_LOG`.
pub fn init_tracing() {
    let spec = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(spec.as_deref()))
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warn_unless_overridden() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(Some("")).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(
            log_filter(Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            log_filter(Some("rusty_golf_rounds=trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }
}
