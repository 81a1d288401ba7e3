//! Example: Using LazyValue for compute-once initialization
//!
//! This example shows how a lazily initialized value is computed on first
//! access, cached for later accesses, and how a failed initialization is
//! remembered instead of retried.

use commons_interfaces::prelude::*;
use std::time::Duration;

/// Connection settings that are expensive to load
#[derive(Debug, Clone)]
struct Settings {
    endpoint: String,
    timeout: Duration,
}

fn load_settings(raw: &str) -> std::result::Result<Settings, Box<dyn std::error::Error + Send + Sync>> {
    println!("Loading settings...");
    let (endpoint, timeout) = raw.split_once(';').ok_or("missing ';' separator")?;
    Ok(Settings {
        endpoint: endpoint.to_string(),
        timeout: Duration::from_millis(timeout.parse()?),
    })
}

fn main() -> Result<()> {
    let settings = LazyValue::new(|| load_settings("https://api.example.com;1500"));
    println!("Created LazyValue (state: {:?})", settings.state());

    // First access - runs the initializer
    let loaded = settings.get()?;
    println!("First access: {} ({:?})", loaded.endpoint, loaded.timeout);

    // Second access - returns the cached value
    let cached = settings.get()?;
    println!("Second access: {} (state: {:?})", cached.endpoint, settings.state());

    // A provider hands out clones of the cached value
    let copy = settings.provide()?;
    println!("Provided copy: {}", copy.endpoint);

    // A broken initializer fails once and stays failed
    let broken = LazyValue::new(|| load_settings("no separator here"));
    for attempt in 1..=3 {
        match broken.get() {
            Ok(_) => unreachable!("initializer cannot succeed"),
            Err(err) => {
                println!("Attempt {attempt}: {err}");
                for cause in err.chain().skip(1) {
                    println!("  caused by: {cause}");
                }
            }
        }
    }
    println!("Final state: {:?}", broken.state());

    Ok(())
}
