use std::fmt::{Debug, Display, Formatter};

use once_cell::sync::OnceCell;

/// A level of debug tracing for the compilation pipeline: each level
/// subsumes the ones before it, and tracing is gated behind
/// `#[cfg(debug_assertions)]` so release builds pay nothing.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Log<T> {
    None,
    Default(T),
    Success(T),
    Result(T),
    Verbose(T),
}

impl<T> Log<T> {
    /// Relative order of the log level, used to decide whether a given trace
    /// point should fire under the configured level.
    pub fn order(&self) -> u8 {
        match self {
            Log::None => 0,
            Log::Default(_) => 1,
            Log::Success(_) => 2,
            Log::Result(_) => 3,
            Log::Verbose(_) => 4,
        }
    }
}

impl<T: Display> Display for Log<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Log::None => Ok(()),
            Log::Default(s) | Log::Success(s) | Log::Result(s) | Log::Verbose(s) => {
                write!(f, "{}", s)
            }
        }
    }
}

impl<T> Log<T> {
    #[cfg(debug_assertions)]
    pub fn trace<U: Debug>(&self, at: Log<()>, label: &'static str, detail: U) {
        if self.order() >= at.order() {
            println!("[{}] {:?}", label, detail);
        }
    }

    #[cfg(not(debug_assertions))]
    pub fn trace<U: Debug>(&self, _at: Log<()>, _label: &'static str, _detail: U) {}
}

static LEVEL: OnceCell<Log<()>> = OnceCell::new();

/// Configures the global trace level for the compilation pipeline. Only the
/// first call takes effect; later calls are silently ignored.
pub fn set_level(level: Log<()>) {
    let _ = LEVEL.set(level);
}

/// Current global trace level. Defaults to `Log::None` (no tracing) until
/// `set_level` is called.
pub fn level() -> Log<()> {
    *LEVEL.get_or_init(|| Log::None)
}
