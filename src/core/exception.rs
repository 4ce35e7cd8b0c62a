//! Rendering of attached errors into the `exception` field

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt::{self, Write};
use std::panic::{self, AssertUnwindSafe};

/// Views an error value as `&(dyn Error + 'static)`
///
/// Implemented for every sized error type and for the two common trait
/// objects, so owned errors, references and `Box<dyn Error>` all reach
/// [`Logger::error_with`](crate::core::Logger::error_with) through method
/// auto-deref.
pub trait AsDynError {
    fn as_dyn_error(&self) -> &(dyn Error + 'static);
}

impl<E: Error + 'static> AsDynError for E {
    fn as_dyn_error(&self) -> &(dyn Error + 'static) {
        self
    }
}

impl AsDynError for dyn Error + 'static {
    fn as_dyn_error(&self) -> &(dyn Error + 'static) {
        self
    }
}

impl AsDynError for dyn Error + Send + Sync + 'static {
    fn as_dyn_error(&self) -> &(dyn Error + 'static) {
        self
    }
}

/// Render `error`, its `source()` chain and its debug form into one string
///
/// Returns `None` if any `Display`/`Debug` impl in the chain fails or panics;
/// the caller then omits the field instead of failing the log call. A
/// backtrace of the logging site is appended when `RUST_BACKTRACE` or
/// `RUST_LIB_BACKTRACE` enables capture.
pub fn render_error(error: &(dyn Error + 'static)) -> Option<String> {
    panic::catch_unwind(AssertUnwindSafe(|| {
        let mut report = String::new();
        write_report(&mut report, error).ok().map(|()| report)
    }))
    .ok()
    .flatten()
}

fn write_report(out: &mut String, error: &(dyn Error + 'static)) -> fmt::Result {
    write!(out, "{}", error)?;

    let mut source = error.source();
    if source.is_some() {
        out.write_str("\n\nCaused by:")?;
    }
    let mut index = 0;
    while let Some(cause) = source {
        write!(out, "\n    {}: {}", index, cause)?;
        index += 1;
        source = cause.source();
    }

    write!(out, "\n\n{:?}", error)?;

    let backtrace = Backtrace::capture();
    if backtrace.status() == BacktraceStatus::Captured {
        write!(out, "\n\nstack backtrace:\n{}", backtrace)?;
    }
    Ok(())
}
