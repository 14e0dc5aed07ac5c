use std::sync::OnceLock;

use sv_log::{Color, CustomFmt, Level, LevelFmt, LogFmt};

static CAUSE_FMT: OnceLock<CustomFmt> = OnceLock::new();

/// Registers the format used for the `caused by` lines. Later calls do nothing.
pub fn init() -> sv_log::Result<()> {
    if CAUSE_FMT.get().is_some() {
        return Ok(())
    }
    let fmt = LogFmt::build(|builder| {
        builder
            .text("    caused by: ", |spec| spec.with_color_spec(|color_spec| {
                color_spec.set_fg(Some(Color::Red));
            }))?
            .message(|spec| spec)?;
        Ok(())
    })?;
    let handle = sv_log::custom_fmt(fmt)?;
    let _ = CAUSE_FMT.set(handle);
    Ok(())
}

/// Logs `err` at error level, then each error in its source chain.
pub fn report(target: &str, msg: &str, err: &(dyn core::error::Error + 'static)) -> sv_log::Result<bool> {
    if !sv_log::log(target, LevelFmt::Error, format_args!("{}: {}", msg, err))? {
        return Ok(false)
    }
    let Some(&cause_fmt) = CAUSE_FMT.get() else {
        return Ok(true)
    };
    let mut source = err.source();
    while let Some(err) = source {
        sv_log::log(target, LevelFmt::Other(cause_fmt, Level::Error), format_args!("{}", err))?;
        source = err.source();
    }
    Ok(true)
}

macro_rules! report {
    ($msg:expr, $err:expr) => {
        $crate::report::report(module_path!(), $msg, &$err)
            .unwrap_or(false)
    };
}
