// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Table output formatting

use comfy_table::{Table, presets::NOTHING};

/// Create a borderless table with the given column headers
pub fn create_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_header(headers);
    table
}

/// Print `label: value` rows as a two-column table
pub fn print_details(rows: Vec<(&str, String)>) {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    for (label, value) in rows {
        table.add_row(vec![format!("{}:", label), value]);
    }
    println!("{table}");
}

pub fn print_table(table: Table) {
    println!("{table}");
}
