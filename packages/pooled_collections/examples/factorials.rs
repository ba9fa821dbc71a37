//! Example demonstrating pooled containers next to their standard-library
//! counterparts.
//!
//! Fills an ordered map and a list with the first ten factorials, once with
//! ordinary heap allocation and once with fixed-capacity pooled storage,
//! then shows what exhaustion looks like when the pooled variants run out.

use std::collections::BTreeMap;

use pooled_collections::{PooledList, PooledMap};

/// Entries the pooled demonstration containers are sized for.
const DEMO_ENTRIES: usize = 10;

const MAP_CAPACITY: usize = DEMO_ENTRIES + PooledMap::<u32, u64, 0>::NODE_OVERHEAD;

fn factorial(n: u64) -> u64 {
    (2..=n).product::<u64>().max(1)
}

fn main() {
    // An ordinary ordered map: allocates per node, never runs out.
    let mut heap_map = BTreeMap::new();
    for i in 0..DEMO_ENTRIES as u64 {
        heap_map.insert(i, factorial(i));
    }

    println!("BTreeMap (heap-allocated):");
    for (i, value) in &heap_map {
        println!("{i} {value}");
    }

    // The same data in a pooled map: ten entries plus the published
    // bookkeeping overhead, all claimed from one fixed arena.
    let mut pooled_map =
        PooledMap::<u32, u64, MAP_CAPACITY>::new().expect("capacity covers the sentinel");
    for i in 0..DEMO_ENTRIES as u32 {
        pooled_map
            .insert(i, factorial(u64::from(i)))
            .expect("the arena is sized for ten entries");
    }

    println!("PooledMap (arena of {MAP_CAPACITY} slots):");
    for entry in pooled_map.iter() {
        println!("{} {}", entry.0, entry.1);
    }

    // The arena is full; an eleventh entry is refused, visibly.
    if let Err(error) = pooled_map.insert(10, factorial(10)) {
        println!("eleventh entry refused: {error}");
    }

    // A pooled list sized for exactly ten elements.
    let mut pooled_list = PooledList::<u32, DEMO_ENTRIES>::new();
    for i in 0..DEMO_ENTRIES as u32 {
        pooled_list
            .push_back(i)
            .expect("the arena is sized for ten elements");
    }

    println!("PooledList (arena of {DEMO_ENTRIES} slots):");
    for value in pooled_list.iter() {
        println!("{}", *value);
    }

    if let Err(error) = pooled_list.push_back(10) {
        println!("eleventh element refused: {error}");
    }
}
