use tracing::Level;
use tracing::Metadata;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::Filter;

const CRATE_TARGET: &str = "kashif";

fn is_crate_target(target: &str) -> bool {
    target.starts_with(CRATE_TARGET)
}

// Exact debug level, for the debug log file
pub struct DebugOnlyFilter;

impl DebugOnlyFilter {
    fn accepts(
        &self,
        level: &Level,
        target: &str,
    ) -> bool {
        level == &Level::DEBUG && is_crate_target(target)
    }
}

impl<S> Filter<S> for DebugOnlyFilter {
    fn enabled(
        &self,
        meta: &Metadata<'_>,
        _ctx: &Context<'_, S>,
    ) -> bool {
        self.accepts(meta.level(), meta.target())
    }
}

// Error and warn, for the error log file
pub struct ErrorWarnFilter;

impl ErrorWarnFilter {
    fn accepts(
        &self,
        level: &Level,
        target: &str,
    ) -> bool {
        (level == &Level::ERROR || level == &Level::WARN) && is_crate_target(target)
    }
}

impl<S> Filter<S> for ErrorWarnFilter {
    fn enabled(
        &self,
        meta: &Metadata<'_>,
        _ctx: &Context<'_, S>,
    ) -> bool {
        self.accepts(meta.level(), meta.target())
    }
}

// Console output: everything at or above `min_level`
pub struct ConsoleFilter {
    pub min_level: Level,
}

impl ConsoleFilter {
    fn accepts(
        &self,
        level: &Level,
        target: &str,
    ) -> bool {
        // Level ordering: ERROR < WARN < INFO < DEBUG < TRACE
        level <= &self.min_level && is_crate_target(target)
    }
}

impl<S> Filter<S> for ConsoleFilter {
    fn enabled(
        &self,
        meta: &Metadata<'_>,
        _ctx: &Context<'_, S>,
    ) -> bool {
        self.accepts(meta.level(), meta.target())
    }
}
