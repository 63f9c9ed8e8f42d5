//! Output formatting module.
//!
//! Console messages and the bounded-width preview table of search results.

mod plain;
mod table;

pub use plain::{
    balance_message, print_error, print_info, print_preview, print_search_header, print_success,
    print_warning, render_preview, DEFAULT_PREVIEW_ROWS,
};
pub use table::{render_row, render_table, COLUMNS, DEFAULT_COLUMN_WIDTH, PLACEHOLDER};
