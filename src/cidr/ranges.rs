// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    parsing::validate_cidr,
    structs::{AddressRange, ValidCidr},
    CidrError, IPV4_BITS,
};
use tracing::{debug, trace};

/**
Returns a u32 with `prefix` high bits set, remaining low bits zero.

`prefix` is clamped to `0..=32`. Never shifts by the full 32-bit width:
prefix 0 is answered directly, otherwise the host part is at most 31 bits.
*/
#[inline]
pub fn prefix_mask(prefix: u8) -> u32 {
    let pre: u8 = prefix.min(IPV4_BITS);
    if pre == 0 {
        return 0;
    }
    /*
    Example (prefix=24): host_bits=8, low = 2^8 - 1 = 0x000000FF,
    mask = !low = 0xFFFFFF00.
    */
    let host_bits: u32 = (IPV4_BITS - pre) as u32;
    let low: u32 = (1u32 << host_bits) - 1;
    !low
}

/// Convert a CIDR to an inclusive range.
pub fn cidr_to_range(c: ValidCidr) -> AddressRange {
    let ip: u32 = u32::from_be_bytes(c.octets());
    let mask: u32 = prefix_mask(c.prefix());
    let net: u32 = ip & mask;
    let end: u32 = net | !mask;
    trace!(cidr = %c, net, end, "derived range");
    AddressRange::from_bounds(net, end)
}

/// Closed-interval intersection: true if the ranges share at least one address.
#[inline]
pub fn ranges_overlap(a: AddressRange, b: AddressRange) -> bool {
    a.start() <= b.end() && b.start() <= a.end()
}

/**
Do two CIDR strings overlap?

Stricter variant of [cidrs_overlap]: invalid input is reported as an
error instead of being folded into `false`.
*/
pub fn check_overlap(a: impl AsRef<str>, b: impl AsRef<str>) -> Result<bool, CidrError> {
    let ra: AddressRange = validate_cidr(a.as_ref())?.range();
    let rb: AddressRange = validate_cidr(b.as_ref())?.range();
    let res: bool = ranges_overlap(ra, rb);
    trace!(a = a.as_ref(), b = b.as_ref(), overlap = res, "overlap check");
    Ok(res)
}

/**
Do two CIDR strings overlap?

If either string is not a valid CIDR the answer is `false`: an unparseable
block cannot be asserted to overlap anything. Callers which need to tell
invalid input apart from disjoint blocks should use [check_overlap] or
validate with [crate::cidr::is_valid_cidr] first.
*/
pub fn cidrs_overlap(a: impl AsRef<str>, b: impl AsRef<str>) -> bool {
    check_overlap(a, b).unwrap_or(false)
}

/**
Find every pair of mutually overlapping blocks in a list of CIDR strings,
e.g. all VSwitches planned inside one VPC.

Returns index pairs `(i, j)` with `i < j`, in ascending order.
Invalid entries are skipped.
*/
pub fn find_overlaps(input: &[impl AsRef<str>]) -> Vec<(usize, usize)> {
    let ranges: Vec<Option<AddressRange>> = input
        .iter()
        .enumerate()
        .map(|(i, s)| match validate_cidr(s.as_ref()) {
            Ok(c) => Some(c.range()),
            Err(e) => {
                debug!(index = i, "skipping invalid CIDR: {e}");
                None
            }
        })
        .collect();

    let mut out: Vec<(usize, usize)> = Vec::new();
    for (i, a) in ranges.iter().enumerate() {
        let Some(a) = a else { continue };
        for (j, b) in ranges.iter().enumerate().skip(i + 1) {
            if let Some(b) = b {
                if ranges_overlap(*a, *b) {
                    out.push((i, j));
                }
            }
        }
    }
    out
}

/* -------------------------------------------------------------------------- */
