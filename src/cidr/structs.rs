// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    parsing::{parse_cidr, validate_cidr},
    ranges::{cidr_to_range, ranges_overlap},
    strings::*,
    CidrError, IPV4_BITS, NUM_OCTETS,
};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, net::Ipv4Addr, str::FromStr};

/**
A syntactically valid IPv4 CIDR block: four octets and a prefix length.

Host bits are kept as written (`10.0.0.1/24` stays `10.0.0.1/24`); use
[ValidCidr::network] or [ValidCidr::range] for the masked form.
*/
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ValidCidr {
    octets: [u8; NUM_OCTETS],
    /// `0..=32`
    prefix: u8,
}

impl ValidCidr {
    /// Build from an address and prefix length. Fails if `prefix` > 32.
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<Self, CidrError> {
        if prefix > IPV4_BITS {
            return Err(CidrError::PrefixRange(prefix as u32));
        }
        Ok(Self::from_parts(addr.octets(), prefix))
    }

    /// Caller guarantees `prefix` <= 32.
    pub(crate) fn from_parts(octets: [u8; NUM_OCTETS], prefix: u8) -> Self {
        debug_assert!(prefix <= IPV4_BITS);
        Self { octets, prefix }
    }

    pub fn octets(&self) -> [u8; NUM_OCTETS] {
        self.octets
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// The address part as written (host bits not cleared).
    pub fn addr(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.octets)
    }

    /// Inclusive address range covered by this block.
    pub fn range(&self) -> AddressRange {
        cidr_to_range(*self)
    }

    /// Same block with the host bits cleared.
    pub fn network(&self) -> ValidCidr {
        Self::from_parts(self.range().start.to_be_bytes(), self.prefix)
    }

    /// Number of addresses in the block. `/0` yields 2^32, hence [u64].
    pub fn len(&self) -> u64 {
        1u64 << (IPV4_BITS - self.prefix)
    }

    /// Returns true if the block is a single host address (`/32`).
    pub fn is_host(&self) -> bool {
        self.prefix == IPV4_BITS
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.range().contains(u32::from(ip))
    }

    pub fn overlaps(&self, other: &ValidCidr) -> bool {
        ranges_overlap(self.range(), other.range())
    }
}

impl fmt::Display for ValidCidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SLASH}{}", self.addr(), self.prefix)
    }
}

impl FromStr for ValidCidr {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_cidr(s)
    }
}

impl Serialize for ValidCidr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ValidCidr {
    fn deserialize<D>(deserializer: D) -> Result<ValidCidr, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        validate_cidr(&s).map_err(de::Error::custom)
    }
}

/* -------------------------------------------------------------------------- */

/// Inclusive range of IPv4 addresses as unsigned 32-bit integers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RangeRepr", into = "RangeRepr")]
pub struct AddressRange {
    start: u32,
    /// inclusive
    end: u32,
}

impl AddressRange {
    /// Create a new [AddressRange]. Returns None if `start` > `end`.
    pub fn new(start: u32, end: u32) -> Option<Self> {
        if start > end {
            return None;
        }
        Some(Self { start, end })
    }

    /// Caller guarantees `start` <= `end`.
    pub(crate) fn from_bounds(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "{PANIC_NAUGHTY}");
        Self { start, end }
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Lowest (network) address.
    pub fn first(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.start)
    }

    /// Highest (broadcast) address.
    pub fn last(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.end)
    }

    /// Number of addresses. The full space is 2^32, hence [u64].
    pub fn len(&self) -> u64 {
        debug_assert!(self.start <= self.end, "{PANIC_NAUGHTY}");
        (self.end - self.start) as u64 + 1
    }

    pub fn contains(&self, ip: u32) -> bool {
        self.start <= ip && ip <= self.end
    }

    pub fn overlaps(&self, other: &AddressRange) -> bool {
        ranges_overlap(*self, *other)
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first(), self.last())
    }
}

/// Serialized form of [AddressRange]; ordering is checked on the way in.
#[derive(Serialize, Deserialize)]
struct RangeRepr {
    start: u32,
    end: u32,
}

impl From<AddressRange> for RangeRepr {
    fn from(r: AddressRange) -> Self {
        RangeRepr {
            start: r.start,
            end: r.end,
        }
    }
}

impl TryFrom<RangeRepr> for AddressRange {
    type Error = String;

    fn try_from(r: RangeRepr) -> Result<Self, Self::Error> {
        AddressRange::new(r.start, r.end)
            .ok_or_else(|| format!("{ERR_RNG_ORDER} ({} > {})", r.start, r.end))
    }
}

/* -------------------------------------------------------------------------- */
