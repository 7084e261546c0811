// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Time-related utility functions.

/// Extract a year from a free-form date string.
///
/// Returns the first run of exactly four ASCII digits (e.g. `"2022-06-17"`, `"17.06.2022"` and
/// `"2022"` all yield `2022`).
#[must_use]
pub fn parse_year_from_str(value: &str) -> Option<i32> {
    let mut digits = 0usize;
    let mut end = 0usize;
    for (index, byte) in value.bytes().enumerate() {
        if byte.is_ascii_digit() {
            digits += 1;
            end = index + 1;
        } else {
            if digits == 4 {
                break;
            }
            digits = 0;
        }
    }
    (digits == 4).then(|| value[end - 4..end].parse().ok())?
}
