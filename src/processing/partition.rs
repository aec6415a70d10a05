//! Splitting a parent network into equally sized subnets.

use crate::error::Error;
use crate::models::{Network, MAX_LENGTH};
use std::net::Ipv4Addr;

/// Lazy, address ordered iterator over the subnets of a parent network.
#[derive(Debug, Clone)]
pub struct Subnets {
    base: u32,
    prefix: u8,
    step: u64,
    next: u64,
    count: u64,
}

impl Iterator for Subnets {
    type Item = Network;

    fn next(&mut self) -> Option<Network> {
        if self.next >= self.count {
            return None;
        }
        // base + next * step stays within the parent, so it fits in u32
        let addr = Ipv4Addr::from((self.base as u64 + self.next * self.step) as u32);
        self.next += 1;
        Network::from_parts(addr, self.prefix).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Number of `/target` subnets inside `parent`.
pub fn subnet_count(parent: Network, target: u8) -> Result<u64, Error> {
    if target > MAX_LENGTH || target < parent.prefix() {
        return Err(Error::InvalidPrefix { parent, target });
    }
    Ok(1u64 << (target - parent.prefix()))
}

/// Iterate over every `/target` subnet of `parent` in increasing address order.
///
/// The parent's base address is aligned to its prefix first, so
/// `10.1.2.3/8` yields the subnets of `10.0.0.0/8`.
pub fn subnets(parent: Network, target: u8) -> Result<Subnets, Error> {
    let count = subnet_count(parent, target)?;
    Ok(Subnets {
        base: u32::from(parent.lo()),
        prefix: target,
        step: 1u64 << (MAX_LENGTH - target),
        next: 0,
        count,
    })
}

/// Partition `parent` into all of its `/target` subnets.
///
/// Fails with [`Error::InvalidPrefix`] when `target` is shorter than the
/// parent prefix or longer than 32; no partial list is returned.
pub fn partition(parent: Network, target: u8) -> Result<Vec<Network>, Error> {
    Ok(subnets(parent, target)?.collect())
}
