use log::{LevelFilter, Log, Metadata, Record};
use std::sync::RwLock;

/// Relay between the `log` macros and whatever sink the front-end picks.
///
/// The core only emits records; where they land is a front-end decision (a
/// plain terminal wants `env_logger`, a TUI wants an in-pane collector).
/// Until [`LogRelay::route`] is called the relay has no sink and records are
/// discarded, so library code can log unconditionally.
pub struct LogRelay {
    sink: RwLock<Option<Box<dyn Log>>>,
}

pub static LOGGER: LogRelay = LogRelay {
    sink: RwLock::new(None),
};

impl LogRelay {
    /// Route all subsequent records into `sink` and reset the global
    /// maximum level. The first call also installs the relay as the
    /// process-wide logger; later calls merely swap the sink, which lets a
    /// front-end take over logging mid-session.
    pub fn route<L: Log + 'static>(&'static self, sink: L, level_filter: LevelFilter) {
        *self.sink.write().unwrap() = Some(Box::new(sink));
        let _ = log::set_logger(self);
        log::set_max_level(level_filter);
    }
}

impl Log for LogRelay {
    fn enabled(&self, metadata: &Metadata) -> bool {
        match self.sink.read().unwrap().as_ref() {
            Some(sink) => sink.enabled(metadata),
            None => false,
        }
    }

    fn log(&self, record: &Record) {
        if let Some(sink) = self.sink.read().unwrap().as_ref() {
            sink.log(record);
        }
    }

    fn flush(&self) {
        if let Some(sink) = self.sink.read().unwrap().as_ref() {
            sink.flush();
        }
    }
}
