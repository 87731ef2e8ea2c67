//! Builds a small map of names, deletes an interior node and a leaf, and prints
//! the tree after each step.
//!
//! Run with `RUST_LOG=size_bst=trace` to see the structural events.

use size_bst::{BstMap, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut map = BstMap::new();
    for (name, age) in [("Mary", 10), ("Alice", 30), ("Vera", 60), ("Susan", 20), ("Zena", 40), ("Ursula", 50)] {
        map.insert(name, age);
    }
    tracing::info!(len = map.len(), height = map.height(), "built map");
    println!("map is {map}, size is {}.", map.len());

    // Mary has two children, so her in-order successor takes her place.
    map.remove("Mary");
    println!("map is {map}, size is {}.", map.len());

    map.remove("Zena");
    println!("map is {map}, size is {}.", map.len());

    println!("min is {}, max is {}.", map.min()?, map.max()?);
    println!("floor(\"Tom\") is {}, ceiling(\"Tom\") is {}.", map.floor("Tom")?, map.ceiling("Tom")?);
    Ok(())
}
