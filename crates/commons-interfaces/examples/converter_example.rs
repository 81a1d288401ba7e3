//! Example: Converters, translators and error classification
//!
//! This example shows how closures become null-safe converters and how
//! failures are classified by the operation that produced them.

use commons_interfaces::prelude::*;
use std::net::Ipv4Addr;

fn main() {
    // Example 1: A converter from a closure
    let address = NullSafe::new(|s: &str| s.parse::<Ipv4Addr>());

    for input in [Some("10.0.0.1"), None, Some("10.0.0.300")] {
        match address.convert(input) {
            Ok(Some(ip)) => println!("{input:?} -> {ip}"),
            Ok(None) => println!("{input:?} -> nothing to convert"),
            Err(err) => println!("{input:?} -> {err} (kind: {:?})", err.kind()),
        }
    }

    // Example 2: A translator maps values both ways
    let octets = NullSafe::new(FnTranslator::new(
        |ip: Ipv4Addr| Ok::<_, std::convert::Infallible>(u32::from(ip)),
        |n: u32| Ok::<_, std::convert::Infallible>(Ipv4Addr::from(n)),
    ));
    let packed = octets.convert(Some(Ipv4Addr::LOCALHOST));
    println!("\nlocalhost packed: {packed:?}");
    println!("unpacked again: {:?}", octets.revert(Some(0x0a00_0001)));

    // Example 3: Errors keep their classification across layers
    let resolver = FnProvider::new(|| address.convert(Some("not an address")));
    if let Err(err) = resolver.provide() {
        println!("\nprovider failed: {err}");
        println!("report: {:?}", err.report());
    }

    // Example 4: Predicates compose
    let private = |ip: &Ipv4Addr| ip.is_private();
    let loopback = |ip: &Ipv4Addr| ip.is_loopback();
    let internal = private.or(loopback);
    for ip in [Ipv4Addr::new(192, 168, 1, 4), Ipv4Addr::LOCALHOST, Ipv4Addr::new(8, 8, 8, 8)] {
        println!("{ip} internal: {}", internal.test(&ip));
    }
}
