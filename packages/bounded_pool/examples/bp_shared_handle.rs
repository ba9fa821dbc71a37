//! Example demonstrating several consumers drawing from one arena through
//! cloned `PoolHandle`s.

use bounded_pool::PoolHandle;

fn main() {
    println!("=== PoolHandle: one arena, many consumers ===");

    let pool = PoolHandle::<u64, 4>::new();

    // Two consumers share the same four-slot budget.
    let producer = pool.clone();
    let archiver = pool.clone();
    assert!(producer == archiver);

    let a = producer.insert(10).unwrap();
    let b = producer.insert(20).unwrap();
    let c = archiver.insert(30).unwrap();
    let d = archiver.insert(40).unwrap();

    println!("live values: {} of {}", pool.len(), pool.capacity());

    // The shared budget is exhausted for everyone at once.
    if let Err(error) = producer.insert(50) {
        println!("producer refused: {error}");
    }

    // An independent arena of the same shape is a different pool entirely.
    let private = PoolHandle::<u64, 4>::new();
    assert!(private != pool);
    println!("independent arena accepts: {:?}", private.insert(50).is_ok());

    // Keys travel between handles of the same arena.
    for key in [a, b, c, d] {
        println!("archiver drained: {}", archiver.remove(key));
    }
}
