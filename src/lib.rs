// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

/*!
IPv4 CIDR validation and overlap detection for VPC/VSwitch address planning.

```
use cidrcheck::{cidrs_overlap, is_valid_cidr};

assert!(is_valid_cidr("10.0.0.0/8"));
assert!(!is_valid_cidr("10.0.0.0/33"));
assert!(cidrs_overlap("10.0.0.0/8", "10.1.2.0/24"));
assert!(!cidrs_overlap("10.0.0.0/24", "10.0.1.0/24"));
```

Every function here is pure and total over its string input: malformed
CIDRs are reported as `false` (or a [CidrError] from the typed API),
never as a panic.
*/

pub mod cidr;
pub mod meta;

pub use cidr::{
    check_overlap, cidr_to_range, cidrs_overlap, find_overlaps, is_valid_cidr, parse_cidr,
    prefix_mask, ranges_overlap, validate_cidr, AddressRange, CidrError, ValidCidr,
};
pub use meta::{MetaQuery, MetaRequest, MetaResource};

/* ######################################################################### */
