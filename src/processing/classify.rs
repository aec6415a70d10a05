//! Assigning hosts to the subnet that contains their address.

use crate::error::Error;
use crate::models::{Host, Network};
use std::collections::BTreeMap;
use std::net::IpAddr;

/// Outcome of classifying a set of hosts against an ordered list of subnets.
///
/// Every host ends up in exactly one place: the host list of one subnet,
/// the unmatched list, or the error list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    matched: Vec<(Network, Vec<String>)>,
    unmatched: Vec<String>,
    errors: Vec<Error>,
}

impl Classification {
    /// Subnets that matched at least one host, in the order they were given,
    /// each with its host names in processing order.
    pub fn matched(&self) -> impl Iterator<Item = (&Network, &[String])> {
        self.matched
            .iter()
            .map(|(subnet, hosts)| (subnet, hosts.as_slice()))
    }

    /// Host names matched to `subnet`, if any.
    pub fn hosts_in(&self, subnet: &Network) -> Option<&[String]> {
        self.matched
            .iter()
            .find(|(s, _)| s == subnet)
            .map(|(_, hosts)| hosts.as_slice())
    }

    pub fn unmatched(&self) -> &[String] {
        &self.unmatched
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Number of hosts placed in some subnet.
    pub fn matched_count(&self) -> usize {
        self.matched.iter().map(|(_, hosts)| hosts.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty() && self.unmatched.is_empty() && self.errors.is_empty()
    }

    /// Append errors found before classification, e.g. bad inventory records.
    pub fn extend_errors(&mut self, errors: impl IntoIterator<Item = Error>) {
        self.errors.extend(errors);
    }
}

/// Index of the first subnet containing `addr`.
pub fn find_subnet(subnets: &[Network], addr: IpAddr) -> Option<usize> {
    subnets.iter().position(|s| s.contains_ip(addr))
}

/// Classify `hosts` against `subnets`, first matching subnet wins.
///
/// A host whose address does not parse is recorded as
/// [`Error::InvalidAddress`] and does not stop the remaining hosts.
pub fn classify(subnets: &[Network], hosts: &[Host]) -> Classification {
    let mut by_subnet: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    let mut unmatched = Vec::new();
    let mut errors = Vec::new();

    for host in hosts {
        let addr: IpAddr = match host.address.trim().parse() {
            Ok(addr) => addr,
            Err(_) => {
                errors.push(Error::InvalidAddress {
                    host: host.name.clone(),
                    address: host.address.clone(),
                });
                continue;
            }
        };
        match find_subnet(subnets, addr) {
            Some(i) => by_subnet.entry(i).or_default().push(host.name.clone()),
            None => unmatched.push(host.name.clone()),
        }
    }

    Classification {
        matched: by_subnet
            .into_iter()
            .map(|(i, names)| (subnets[i], names))
            .collect(),
        unmatched,
        errors,
    }
}
