//! Example demonstrating basic usage of `BoundedPool`.
//!
//! Shows the full slot lifecycle: carving fresh slots, visible exhaustion,
//! and LIFO reuse of released slots.

use bounded_pool::BoundedPool;

fn main() {
    println!("=== BoundedPool: fixed capacity, recoverable exhaustion ===");

    let mut pool = BoundedPool::<String, 3>::new();

    // Fill every slot.
    let first = pool.insert("first".to_string()).unwrap();
    let second = pool.insert("second".to_string()).unwrap();
    let third = pool.insert("third".to_string()).unwrap();

    println!("live values: {}", pool.len());

    // The pool is full now; the failure is an ordinary error value.
    match pool.insert("one too many".to_string()) {
        Ok(_) => unreachable!("the pool only has three slots"),
        Err(error) => println!("fourth insertion refused: {error}"),
    }

    // Releasing a slot makes room, and the released slot is reused first.
    let released = second;
    let value = pool.remove(released);
    println!("released: {value}");

    let reused = pool.insert("recycled".to_string()).unwrap();
    assert_eq!(reused, released);
    println!("reused the released slot: {}", *pool.get(reused));

    println!("storage ever touched: {} of {}", pool.touched(), pool.capacity());

    pool.remove(first);
    pool.remove(third);
    pool.remove(reused);
}
