#[macro_use]
mod report;

use core::fmt::{self, Display, Formatter};

use sv_log::{Filters, Level, debug, info, warn, error};

use sv_mem::{ArrayError, DynamicArray, FixedArray, dynamic_array, reserve};

#[derive(Debug)]
struct StepError {
    step: &'static str,
    source: ArrayError,
}

impl Display for StepError {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "step '{}' failed", self.step)
    }
}

impl core::error::Error for StepError {

    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.source)
    }
}

fn construction() -> sv_mem::Result<()> {
    let empty: DynamicArray<i32> = DynamicArray::new();
    info!("new: len {} capacity {}", empty.len(), empty.capacity());

    let zeros: DynamicArray<u64> = DynamicArray::with_len(4)?;
    info!("with_len(4): {:?}", zeros);

    let words: DynamicArray<String> = DynamicArray::from_elem(3, "sv".to_string())?;
    info!("from_elem(3, \"sv\"): {:?}", words);

    let literal: DynamicArray<i32> = dynamic_array![1, 2, 3];
    info!("literal: {:?} capacity {}", literal, literal.capacity());

    let hinted: DynamicArray<i32> = DynamicArray::with_hint(reserve(8))?;
    info!("with_hint(reserve(8)): len {} capacity {}", hinted.len(), hinted.capacity());

    let converted: DynamicArray<i32> = reserve(2).try_into()?;
    debug!("from hint: capacity {}", converted.capacity());

    let mut source = literal.try_clone()?;
    debug!("clone: {:?} at {:p}, original at {:p}", source, source.as_ptr(), literal.as_ptr());

    let taken = source.take();
    info!("take: moved {:?}, source now len {} capacity {}", taken, source.len(), source.capacity());

    let mut adopted: DynamicArray<i32> = dynamic_array![9];
    let mut donor = taken;
    adopted.move_from(&mut donor);
    info!("move_from: {:?}, donor now capacity {}", adopted, donor.capacity());

    let mut target: DynamicArray<i32> = DynamicArray::new();
    target.try_clone_from(&adopted)?;
    debug!("clone_from: {:?}", target);
    Ok(())
}

fn access() -> sv_mem::Result<()> {
    let mut array: DynamicArray<i32> = dynamic_array![10, 20, 30];
    info!("at(1) = {}, [2] = {}", array.at(1)?, array[2]);
    if let Err(err) = array.at(3) {
        warn!("at(3): {}", err);
    }
    *array.at_mut(0)? += 1;
    if let (Some(front), Some(back)) = (array.front(), array.back()) {
        info!("front {} back {}", front, back);
    }
    let middle = unsafe { *array.get_unchecked(1) };
    debug!("get_unchecked(1) = {}", middle);

    let iter = array.iter();
    let range = array.as_ptr_range();
    debug!("begin {:p} end {:p}, range {:?}", iter.begin(), iter.end(), range);
    let sum: i32 = iter.sum();
    info!("sum over iterator: {}", sum);

    for value in &mut array {
        *value *= 2;
    }
    info!("doubled in place: {:?}", array);
    Ok(())
}

fn mutation() -> sv_mem::Result<()> {
    let mut array: DynamicArray<i32> = DynamicArray::new();
    for i in 0..5 {
        array.push_back(i)?;
        debug!("push_back({}): len {} capacity {}", i, array.len(), array.capacity());
    }
    array.pop_back();
    info!("pop_back: {:?}", array);

    let at = array.insert(2, 100)?;
    info!("insert(2, 100) -> {}: {:?}", at, array);
    let next = array.erase(at);
    info!("erase({}) -> {}: {:?}", at, next, array);

    array.resize(6)?;
    info!("resize(6): {:?}", array);
    array.resize(2)?;
    info!("resize(2): {:?} capacity {}", array, array.capacity());

    let before = array.as_ptr();
    array.reserve(4)?;
    debug!("reserve(4) below capacity kept buffer: {}", before == array.as_ptr());
    array.reserve(32)?;
    info!("reserve(32): capacity {}", array.capacity());

    let mut other: DynamicArray<i32> = dynamic_array![7, 7];
    array.swap_with(&mut other);
    info!("swap_with: {:?} and {:?}", array, other);

    array.clear();
    info!("clear: len {} capacity {}", array.len(), array.capacity());
    Ok(())
}

fn comparison() {
    let a: DynamicArray<i32> = dynamic_array![1, 2];
    let b: DynamicArray<i32> = dynamic_array![1, 2, 3];
    let c: DynamicArray<i32> = dynamic_array![1, 3];
    info!("{:?} == {:?}: {}", a, b, a == b);
    info!("{:?} < {:?}: {}", a, b, a < b);
    info!("{:?} < {:?}: {}", c, b, c < b);

    let mut nested: DynamicArray<DynamicArray<i32>> = dynamic_array![c, b, a];
    nested.sort();
    info!("sorted: {:?}", nested);
}

fn fixed() -> sv_mem::Result<()> {
    let mut array = FixedArray::<u8>::with_hint(reserve(2))?;
    array.push_back(1)?;
    array.push_back(2)?;
    match array.push_back(3) {
        Ok(_) => error!("fixed array grew past its capacity"),
        Err(err) => warn!("push_back on full fixed array: {}", err),
    };
    info!("fixed array kept {:?}", array);
    Ok(())
}

fn failures() {
    let mut array: DynamicArray<u64> = dynamic_array![1, 2, 3];
    if let Err(err) = array.reserve(usize::MAX) {
        report!("reserve(usize::MAX)", StepError { step: "reserve", source: err });
        info!("array unchanged after failed reserve: {:?}", array);
    }
    let mut units: DynamicArray<()> = DynamicArray::new();
    for _ in 0..3 {
        if let Err(err) = units.push_back(()) {
            warn!("push_back(()): {}", err);
        }
    }
    debug!("zero-sized elements: len {} capacity {}", units.len(), units.capacity());
    if let Err(err) = sv_log::set_fmt(Level::Always, |_| Ok(())) {
        warn!("set_fmt(Always): {}", err);
    }
}

fn main() {
    let filters = std::env::var("RUST_LOG")
        .map(|env| sv_log::parse_filters(&env))
        .unwrap_or_else(|_| Filters::new(Level::Info));
    if let Err(err) = sv_log::init_with(filters).and_then(|_| report::init()) {
        eprintln!("failed to initialize logger: {}", err);
        return
    }
    let steps: [(&'static str, fn() -> sv_mem::Result<()>); 4] = [
        ("construction", construction),
        ("access", access),
        ("mutation", mutation),
        ("fixed", fixed),
    ];
    for (step, run) in steps {
        info!("-- {}", step);
        if let Err(source) = run() {
            report!("demo aborted", StepError { step, source });
            return
        }
    }
    info!("-- comparison");
    comparison();
    info!("-- failures");
    failures();
}
