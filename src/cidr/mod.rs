// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! IPv4 CIDR validation, range derivation and overlap detection.

mod parsing;
mod ranges;
mod strings;
mod structs;

use std::{error, fmt};
use strings::*;

pub use parsing::*;
pub use ranges::*;
pub use structs::{AddressRange, ValidCidr};

pub(crate) const IPV4_BITS: u8 = 32;
pub(crate) const NUM_OCTETS: usize = 4;
pub(crate) const MAX_OCTET: u32 = 255;

/// Reasons a string is not a valid IPv4 CIDR block.
#[rustfmt::skip]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CidrError {
    /// empty input
    Empty,
    /// wrong number of slashes, or an empty address/prefix part
    InvalidFmt(String),
    /// prefix is not a plain base-10 integer
    InvalidPrefix(String),
    /// prefix parsed but is > 32
    PrefixRange(u32),
    /// address does not have exactly four dot-separated fields
    InvalidAddrFmt(String),
    /// octet is not a plain base-10 integer
    InvalidOctet(String),
    /// octet parsed but is > 255
    OctetRange(u32),
    /// refused by the general-purpose CIDR syntax check
    Rejected(String),
}

impl fmt::Display for CidrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CidrError::Empty => {
                write!(f, "{ERR_EMPTY}")
            }
            CidrError::InvalidFmt(cidr) => {
                write!(f, "{ERR_CIDR_FMT}: '{cidr}'")
            }
            CidrError::InvalidPrefix(pre) => {
                write!(f, "{ERR_CIDR_INV_PRE}: '{pre}'")
            }
            CidrError::PrefixRange(val) => {
                write!(f, "{ERR_PRE_RANGE} {val}")
            }
            CidrError::InvalidAddrFmt(addr) => {
                write!(f, "{ERR_ADDR_FMT}: '{addr}'")
            }
            CidrError::InvalidOctet(octet) => {
                write!(f, "{ERR_INV_OCTET}: '{octet}'")
            }
            CidrError::OctetRange(val) => {
                write!(f, "{ERR_V4_OCTET} {val}")
            }
            CidrError::Rejected(cidr) => {
                write!(f, "{ERR_REJECTED}: '{cidr}'")
            }
        }
    }
}

impl error::Error for CidrError {}

/* -------------------------------------------------------------------------- */
