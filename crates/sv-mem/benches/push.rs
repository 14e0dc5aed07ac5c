use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use sv_mem::{DynamicArray, reserve};

const COUNT: usize = 10_000;

fn push(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_back");
    group.bench_function("dynamic_array", |b| {
        b.iter(|| {
            let mut array: DynamicArray<usize> = DynamicArray::new();
            for i in 0..COUNT {
                array.push_back(black_box(i)).unwrap();
            }
            array
        })
    });
    group.bench_function("dynamic_array_reserved", |b| {
        b.iter(|| {
            let mut array: DynamicArray<usize> = DynamicArray::with_hint(reserve(COUNT)).unwrap();
            for i in 0..COUNT {
                array.push_back(black_box(i)).unwrap();
            }
            array
        })
    });
    group.bench_function("std_vec", |b| {
        b.iter(|| {
            let mut vec = Vec::new();
            for i in 0..COUNT {
                vec.push(black_box(i));
            }
            vec
        })
    });
    group.finish();
}

fn iterate(c: &mut Criterion) {
    let array: DynamicArray<usize> = (0..COUNT).collect();
    let vec: Vec<usize> = (0..COUNT).collect();
    let mut group = c.benchmark_group("iter_sum");
    group.bench_function("dynamic_array", |b| {
        b.iter(|| black_box(&array).iter().sum::<usize>())
    });
    group.bench_function("std_vec", |b| {
        b.iter(|| black_box(&vec).iter().sum::<usize>())
    });
    group.finish();
}

fn insert_front(c: &mut Criterion) {
    c.bench_function("insert_front_1k", |b| {
        b.iter(|| {
            let mut array: DynamicArray<u32> = DynamicArray::new();
            for i in 0..1_000 {
                array.insert(0, black_box(i)).unwrap();
            }
            array
        })
    });
}

criterion_group!(benches, push, iterate, insert_front);
criterion_main!(benches);
