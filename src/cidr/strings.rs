// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

pub(crate) static DOT: char = '.';
pub(crate) static SLASH: char = '/';

// mod.rs
pub(crate) static ERR_EMPTY: &str = "empty CIDR string";
pub(crate) static ERR_CIDR_FMT: &str = "invalid CIDR format";
pub(crate) static ERR_CIDR_INV_PRE: &str = "invalid prefix in CIDR";
pub(crate) static ERR_PRE_RANGE: &str = "IPv4 prefix must be <= 32, got";
pub(crate) static ERR_ADDR_FMT: &str = "IPv4 address must have four octets";
pub(crate) static ERR_INV_OCTET: &str = "invalid octet in IPv4 address";
pub(crate) static ERR_V4_OCTET: &str = "IPv4 octet must be <= 255, got";
pub(crate) static ERR_REJECTED: &str = "not a valid IPv4 CIDR";

// structs.rs
pub(crate) static PANIC_NAUGHTY: &str = "Naughty programmer! Range start cannot be larger than end!";
pub(crate) static ERR_RNG_ORDER: &str = "range start is greater than range end";
