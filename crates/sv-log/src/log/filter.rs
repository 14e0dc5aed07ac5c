use super::*;

/// Per-target level filters with a fallback for everything else.
#[derive(Clone, Debug)]
pub struct Filters {
    targets: FxHashMap<CompactString, Level>,
    base: Level,
}

impl Default for Filters {

    fn default() -> Self {
        Self::new(Level::Error)
    }
}

impl Filters {

    #[inline(always)]
    pub fn new(base: Level) -> Self {
        Self {
            targets: FxHashMap::default(),
            base,
        }
    }

    #[inline(always)]
    pub fn base(&self) -> Level {
        self.base
    }

    #[inline(always)]
    pub fn set_target(&mut self, target: &str, level: Level) {
        self.targets.insert(CompactString::new(target), level);
    }

    /// Most verbose level enabled for `target`.
    ///
    /// `a::b::c` falls back to `a::b`, then `a`, then the base level.
    pub fn level_for(&self, target: &str) -> Level {
        let mut substr = target;
        if let Some(&level) = self.targets.get(substr) {
            return level
        }
        while let Some(i) = substr.rfind("::") {
            substr = &substr[0..i];
            if let Some(&level) = self.targets.get(substr) {
                return level
            }
        }
        self.base
    }

    #[inline(always)]
    pub fn enabled(&self, target: &str, level: Level) -> bool {
        level <= self.level_for(target)
    }
}

/// Parses `RUST_LOG` syntax: comma separated `level` or `target=level`.
///
/// Unknown levels and empty items are skipped. A bare level sets the base,
/// the last one winning. A target named twice keeps its quieter level.
pub fn parse_filters(spec: &str) -> Filters {
    let mut filters = Filters::default();
    for arg in spec.split(',') {
        let (target, level) = match arg.find('=') {
            Some(j) => (Some(arg[0..j].trim()), arg[j + 1..].trim()),
            None => (None, arg.trim()),
        };
        let Ok(level) = Level::from_str(level) else {
            continue
        };
        match target {
            Some(target) if !target.is_empty() => {
                let entry = filters.targets
                    .entry(CompactString::new(target))
                    .or_insert(level);
                *entry = (*entry).min(level);
            },
            Some(_) => {},
            None => filters.base = level,
        }
    }
    filters
}
