//! Diagnostic logging setup.
//!
//! Library code logs through `tracing`; the binary installs a `fmt`
//! subscriber on stderr whose level follows the verbosity flags. The
//! environment is not consulted. The level can be changed after start-up,
//! since interactive mode learns the verbosity only at its prompts.

use crate::config::Verbosity;
use std::sync::OnceLock;
use tracing::Subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

type FilterHandle = reload::Handle<EnvFilter, Registry>;

static FILTER: OnceLock<FilterHandle> = OnceLock::new();

/// Log directive for a verbosity level.
pub fn filter_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Verbose => "sps=debug,warn",
    }
}

fn subscriber(verbosity: Verbosity) -> (impl Subscriber + Send + Sync, FilterHandle) {
    let (filter, handle) = reload::Layer::new(EnvFilter::new(filter_directive(verbosity)));
    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false),
    );
    (subscriber, handle)
}

fn apply(handle: &FilterHandle, verbosity: Verbosity) {
    let _ = handle.reload(EnvFilter::new(filter_directive(verbosity)));
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(verbosity: Verbosity) {
    let (subscriber, handle) = subscriber(verbosity);
    if subscriber.try_init().is_ok() {
        let _ = FILTER.set(handle);
    }
}

/// Change the level of the installed subscriber, if any.
pub fn set_verbosity(verbosity: Verbosity) {
    if let Some(handle) = FILTER.get() {
        apply(handle, verbosity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive(Verbosity::Quiet), "error");
        assert_eq!(filter_directive(Verbosity::Normal), "warn");
        assert_eq!(filter_directive(Verbosity::Verbose), "sps=debug,warn");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(Verbosity::Quiet);
        init(Verbosity::Verbose);
        set_verbosity(Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_can_be_raised_after_start() {
        let (subscriber, handle) = subscriber(Verbosity::Normal);
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(Level::WARN));
            assert!(!tracing::enabled!(Level::DEBUG));

            apply(&handle, Verbosity::Verbose);
            assert!(tracing::enabled!(Level::DEBUG));

            apply(&handle, Verbosity::Quiet);
            assert!(!tracing::enabled!(Level::WARN));
        });
    }
}
