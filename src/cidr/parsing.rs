// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{strings::*, structs::ValidCidr, CidrError, IPV4_BITS, MAX_OCTET, NUM_OCTETS};
use ipnet::Ipv4Net;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    // Plain base-10 field: ASCII digits only, no sign, no whitespace.
    static ref DEC_FIELD: Regex = Regex::new(r"^[0-9]+$").unwrap();
}

/**
Parse an IPv4 CIDR string of the form `A.B.C.D/P` into a [ValidCidr].

Rules:
- exactly one `/`, with a non-empty address and prefix on either side
- prefix: base-10 integer in `0..=32`
- address: exactly four `.`-separated base-10 integers in `0..=255`
- digits only; signs, whitespace and any other characters are rejected

Total over all inputs: never panics, the empty string is simply an error.
No arithmetic is done here, see [crate::cidr::cidr_to_range].
*/
pub fn parse_cidr(arg: impl AsRef<str>) -> Result<ValidCidr, CidrError> {
    let s: &str = arg.as_ref();
    let res = parse_cidr_inner(s);
    if let Err(e) = &res {
        debug!(cidr = s, "rejected CIDR: {e}");
    }
    res
}

fn parse_cidr_inner(s: &str) -> Result<ValidCidr, CidrError> {
    if s.is_empty() {
        return Err(CidrError::Empty);
    }

    let parts: Vec<&str> = s.split(SLASH).collect();
    if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
        return Err(CidrError::InvalidFmt(s.into()));
    }

    let prefix: u8 = parse_prefix(parts[1])?;
    let octets: [u8; NUM_OCTETS] = parse_octets(parts[0])?;

    Ok(ValidCidr::from_parts(octets, prefix))
}

fn parse_prefix(pre: &str) -> Result<u8, CidrError> {
    let val: u32 = parse_dec_field(pre).ok_or_else(|| CidrError::InvalidPrefix(pre.into()))?;
    if val > IPV4_BITS as u32 {
        return Err(CidrError::PrefixRange(val));
    }
    Ok(val as u8)
}

fn parse_octets(addr: &str) -> Result<[u8; NUM_OCTETS], CidrError> {
    let fields: Vec<&str> = addr.split(DOT).collect();
    if fields.len() != NUM_OCTETS {
        return Err(CidrError::InvalidAddrFmt(addr.into()));
    }

    let mut octets: [u8; NUM_OCTETS] = [0; NUM_OCTETS];
    for (slot, field) in octets.iter_mut().zip(fields) {
        let val: u32 = parse_dec_field(field).ok_or_else(|| CidrError::InvalidOctet(field.into()))?;
        if val > MAX_OCTET {
            return Err(CidrError::OctetRange(val));
        }
        *slot = val as u8;
    }
    Ok(octets)
}

/// Digits-only field as u32. Values past [u32::MAX] saturate, so an
/// oversized number still ends up as a range error, not a format error.
#[inline]
fn parse_dec_field(field: &str) -> Option<u32> {
    if !DEC_FIELD.is_match(field) {
        return None;
    }
    Some(field.parse::<u32>().unwrap_or(u32::MAX))
}

/**
Validate a CIDR string with both checks:
1. the general-purpose syntax check ([ipnet::Ipv4Net] parsing)
2. the strict field parser, [parse_cidr]

Both must accept the string. The first catches anything the field parser
might let through, the second yields the octets used for range arithmetic.
*/
pub fn validate_cidr(arg: impl AsRef<str>) -> Result<ValidCidr, CidrError> {
    let s: &str = arg.as_ref();
    if s.is_empty() {
        debug!("rejected CIDR: {}", CidrError::Empty);
        return Err(CidrError::Empty);
    }
    if s.parse::<Ipv4Net>().is_err() {
        let e = CidrError::Rejected(s.into());
        debug!(cidr = s, "rejected CIDR: {e}");
        return Err(e);
    }
    parse_cidr(s)
}

/// Whether `arg` is a valid IPv4 CIDR block. Never panics.
pub fn is_valid_cidr(arg: impl AsRef<str>) -> bool {
    validate_cidr(arg).is_ok()
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: [&str; 6] = [
        "0.0.0.0/0",
        "10.0.0.0/8",
        "172.16.0.0/12",
        "192.168.0.0/16",
        "10.0.0.1/32",
        "255.255.255.255/32",
    ];

    #[rustfmt::skip]
    const INVALID: [&str; 22] = [
        "",
        "/",
        "10.0.0.0",
        "10.0.0.0/",
        "/24",
        "10.0.0.0/24/8",
        "256.0.0.0/24",
        "10.0.0.0/33",
        "10.0.0.0/-1",
        "10.0.0.0/+8",
        "10.0.0/24",
        "10.0.0.0.0/24",
        "10..0.0/24",
        "10.0.0.a/24",
        "10.0.0.-1/24",
        "10.0.0.0/8a",
        " 10.0.0.0/8",
        "10.0.0.0/8 ",
        "10.0.0.0/ 8",
        "not-a-cidr",
        "１０.0.0.0/8",
        "10.0.0.0/٨",
    ];

    #[test]
    fn test_valid() {
        for s in VALID {
            assert!(parse_cidr(s).is_ok(), "Failed: '{s}'");
            assert!(is_valid_cidr(s), "Failed: '{s}'");
        }
    }

    #[test]
    fn test_invalid() {
        for s in INVALID {
            assert!(parse_cidr(s).is_err(), "Failed: '{s}'");
            assert!(!is_valid_cidr(s), "Failed: '{s}'");
        }
    }

    #[rustfmt::skip]
    #[test]
    fn test_error_kinds() {
        let tests: Vec<(&str, CidrError)> = vec![
            ("",                CidrError::Empty),
            ("10.0.0.0",        CidrError::InvalidFmt("10.0.0.0".into())),
            ("a/b/c",           CidrError::InvalidFmt("a/b/c".into())),
            ("10.0.0.0/",       CidrError::InvalidFmt("10.0.0.0/".into())),
            ("10.0.0.0/x",      CidrError::InvalidPrefix("x".into())),
            ("10.0.0.0/-1",     CidrError::InvalidPrefix("-1".into())),
            ("10.0.0.0/33",     CidrError::PrefixRange(33)),
            ("10.0.0.0/999",    CidrError::PrefixRange(999)),
            ("10.0.0.0/1000",   CidrError::PrefixRange(1000)),
            ("10.0.0.0/99999999999", CidrError::PrefixRange(u32::MAX)),
            ("1000.0.0.0/8",    CidrError::OctetRange(1000)),
            ("10.0.0.4294967296/8", CidrError::OctetRange(u32::MAX)),
            ("10.0.0/8",        CidrError::InvalidAddrFmt("10.0.0".into())),
            ("10.0.0.x/8",      CidrError::InvalidOctet("x".into())),
            ("10.0.0./8",       CidrError::InvalidOctet("".into())),
            ("256.0.0.0/24",    CidrError::OctetRange(256)),
        ];

        for (input, expected) in tests {
            assert_eq!(parse_cidr(input), Err(expected), "Failed: '{input}'");
        }
    }

    #[test]
    fn test_gate_runs_first() {
        assert_eq!(validate_cidr(""), Err(CidrError::Empty));
        assert_eq!(
            validate_cidr("not-a-cidr"),
            Err(CidrError::Rejected("not-a-cidr".into()))
        );
    }

    #[test]
    fn test_octets_kept() {
        let cidr = validate_cidr("192.168.10.77/24").unwrap();
        assert_eq!(cidr.octets(), [192, 168, 10, 77]);
        assert_eq!(cidr.prefix(), 24);
    }
}
