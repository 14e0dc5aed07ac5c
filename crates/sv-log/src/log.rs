mod error;
mod filter;
pub mod fmt;

use std::{
    io::Write,
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use core::str::FromStr;

use termcolor::{WriteColor, StandardStream, ColorChoice};

pub use termcolor::{ColorSpec, Color};

use rustc_hash::FxHashMap;

use compact_str::CompactString;

use sv_mem::DynamicArray;

use crate::*;

pub use error::LogError;
pub use filter::{Filters, parse_filters};
pub use fmt::{LogFmt, LogFmtBuilder, LogSpec, SegmentSpec};

/// Handle to a format registered with [`custom_fmt`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CustomFmt(usize);

impl CustomFmt {

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0
    }
}

#[repr(i8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Level {
    Always = -1,
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

pub enum LevelFmt {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Other(CustomFmt, Level),
}

impl FromStr for Level {

    type Err = ();

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("error") {
            Ok(Self::Error)
        } else if s.eq_ignore_ascii_case("warn") {
            Ok(Self::Warn)
        } else if s.eq_ignore_ascii_case("info") {
            Ok(Self::Info)
        } else if s.eq_ignore_ascii_case("debug") {
            Ok(Self::Debug)
        } else if s.eq_ignore_ascii_case("trace") {
            Ok(Self::Trace)
        } else {
            Err(())
        }
    }
}

struct Formats {
    error: LogFmt,
    warn: LogFmt,
    info: LogFmt,
    debug: LogFmt,
    trace: LogFmt,
    custom: DynamicArray<LogFmt>,
}

impl Formats {

    fn new() -> Result<Self> {
        Ok(Self {
            error: LogFmt::level_prefix("ERROR", Color::Red)?,
            warn: LogFmt::level_prefix("WARN", Color::Yellow)?,
            info: LogFmt::level_prefix("INFO", Color::Green)?,
            debug: LogFmt::level_prefix("DEBUG", Color::Blue)?,
            trace: LogFmt::level_prefix("TRACE", Color::Magenta)?,
            custom: DynamicArray::new(),
        })
    }

    fn level_mut(&mut self, level: Level) -> Result<&mut LogFmt> {
        match level {
            Level::Always => Err(LogError::NoDefaultFormat),
            Level::Error => Ok(&mut self.error),
            Level::Warn => Ok(&mut self.warn),
            Level::Info => Ok(&mut self.info),
            Level::Debug => Ok(&mut self.debug),
            Level::Trace => Ok(&mut self.trace),
        }
    }

    fn select(&self, level: &LevelFmt) -> Result<(&LogFmt, Level)> {
        Ok(match *level {
            LevelFmt::Error => (&self.error, Level::Error),
            LevelFmt::Warn => (&self.warn, Level::Warn),
            LevelFmt::Info => (&self.info, Level::Info),
            LevelFmt::Debug => (&self.debug, Level::Debug),
            LevelFmt::Trace => (&self.trace, Level::Trace),
            LevelFmt::Other(fmt, level) => {
                let custom = self.custom
                    .at(fmt.index())
                    .map_err(|_| LogError::UnknownFormat { index: fmt.index() })?;
                (custom, level)
            },
        })
    }
}

/// Writes one line laid out by `fmt`, followed by a newline.
pub fn write_line<W: WriteColor>(out: &mut W, fmt: &LogFmt, msg: core::fmt::Arguments) -> Result<()> {
    for segment in fmt {
        let color_spec = segment.spec().color_spec.as_ref();
        if let Some(color_spec) = color_spec {
            out.set_color(color_spec)?;
        }
        match segment {
            SegmentSpec::Message(_) => write!(out, "{}", msg)?,
            SegmentSpec::Text(text, _) => out.write_all(text.as_bytes())?,
        }
        if color_spec.is_some() {
            out.reset()?;
        }
    }
    out.write_all(b"\n")?;
    Ok(())
}

struct Logger<W: WriteColor = StandardStream> {
    out: W,
    formats: Formats,
    filters: Filters,
}

impl<W: WriteColor> Logger<W> {

    fn new(out: W, filters: Filters) -> Result<Self> {
        Ok(Self {
            out,
            formats: Formats::new()?,
            filters,
        })
    }

    fn log(&mut self, target: &str, level: LevelFmt, msg: core::fmt::Arguments) -> Result<bool> {
        let (fmt, level) = self.formats.select(&level)?;
        if !self.filters.enabled(target, level) {
            return Ok(false)
        }
        write_line(&mut self.out, fmt, msg)?;
        Ok(true)
    }
}

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

fn logger() -> Result<MutexGuard<'static, Logger>> {
    Ok(LOGGER
        .get()
        .ok_or(LogError::NotInitialized)?
        .lock()
        .unwrap_or_else(PoisonError::into_inner))
}

/// Initializes the global logger with filters read from `RUST_LOG`.
///
/// Later calls do nothing.
pub fn init() -> Result<bool> {
    let filters = std::env::var("RUST_LOG")
        .map(|env| parse_filters(&env))
        .unwrap_or_default();
    init_with(filters)
}

/// Initializes the global logger with `filters`. Returns false if it was
/// already initialized, in which case `filters` is discarded.
pub fn init_with(filters: Filters) -> Result<bool> {
    if LOGGER.get().is_some() {
        return Ok(false)
    }
    let logger = Logger::new(StandardStream::stderr(ColorChoice::Auto), filters)?;
    Ok(LOGGER.set(Mutex::new(logger)).is_ok())
}

/// Rebuilds the format used for `level`.
pub fn set_fmt(level: Level, f: impl FnOnce(&mut LogFmtBuilder) -> Result<()>) -> Result<()> {
    let mut logger = logger()?;
    let fmt = logger.formats.level_mut(level)?;
    f(&mut LogFmtBuilder::new(fmt))
}

pub fn set_filters(filters: Filters) -> Result<()> {
    logger()?.filters = filters;
    Ok(())
}

pub fn custom_fmt(fmt: LogFmt) -> Result<CustomFmt> {
    let mut logger = logger()?;
    let custom = &mut logger.formats.custom;
    let index = custom.len();
    custom.push_back(fmt)?;
    Ok(CustomFmt(index))
}

#[inline(always)]
pub fn log(target: &str, level: LevelFmt, args: core::fmt::Arguments) -> Result<bool> {
    logger()?.log(target, level, args)
}

#[macro_export]
macro_rules! error {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Error, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! warn {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Warn, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! info {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Info, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! debug {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Debug, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! trace {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Trace, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

/// Logs through a format registered with [`custom_fmt`], filtered at `$level`.
#[macro_export]
macro_rules! custom {
    ($custom:expr, $level:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Other($custom, $level), format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}
