use sv_mem::{DynamicArray, Iter};

use super::*;

/// Layout of one log line: a sequence of text and message segments.
#[derive(Default)]
pub struct LogFmt {
    segments: DynamicArray<SegmentSpec>,
}

impl LogFmt {

    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(f: impl FnOnce(&mut LogFmtBuilder) -> Result<()>) -> Result<Self> {
        let mut fmt = Self::new();
        f(&mut LogFmtBuilder::new(&mut fmt))?;
        Ok(fmt)
    }

    /// `[name] ` in bold `color`, then the message.
    pub(crate) fn level_prefix(name: &str, color: Color) -> Result<Self> {
        Self::build(|builder| {
            builder
                .text("[", |spec| spec)?
                .text(name, |spec| spec.with_color_spec(|color_spec| {
                    color_spec.set_fg(Some(color)).set_bold(true);
                }))?
                .text("] ", |spec| spec)?
                .message(|spec| spec)?;
            Ok(())
        })
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn clear(&mut self) {
        self.segments.clear();
    }
}

impl<'a> IntoIterator for &'a LogFmt {

    type Item = &'a SegmentSpec;
    type IntoIter = Iter<'a, SegmentSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[derive(Default, Clone)]
pub struct LogSpec {
    pub color_spec: Option<ColorSpec>,
}

impl LogSpec {

    #[inline(always)]
    pub fn with_color_spec(mut self, mut f: impl FnMut(&mut ColorSpec)) -> Self {
        let color_spec = self.color_spec.insert(ColorSpec::new());
        f(color_spec);
        self
    }
}

pub enum SegmentSpec {
    Message(LogSpec),
    Text(CompactString, LogSpec),
}

impl SegmentSpec {

    #[inline(always)]
    pub fn spec(&self) -> &LogSpec {
        match self {
            Self::Message(spec) | Self::Text(_, spec) => spec,
        }
    }
}

pub struct LogFmtBuilder<'a> {
    fmt: &'a mut LogFmt,
}

impl<'a> LogFmtBuilder<'a> {

    /// Starts over: any segments already in `fmt` are dropped.
    #[inline(always)]
    pub fn new(fmt: &'a mut LogFmt) -> Self {
        fmt.clear();
        Self {
            fmt,
        }
    }

    #[inline(always)]
    pub fn message(&mut self, f: impl FnOnce(LogSpec) -> LogSpec) -> Result<&mut Self> {
        self.fmt.segments.push_back(SegmentSpec::Message(f(Default::default())))?;
        Ok(self)
    }

    #[inline(always)]
    pub fn text(&mut self, text: &str, f: impl FnOnce(LogSpec) -> LogSpec) -> Result<&mut Self> {
        self.fmt.segments.push_back(SegmentSpec::Text(CompactString::new(text), f(Default::default())))?;
        Ok(self)
    }
}
