pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{
    error, format_cents, header, record_added, record_deleted, record_updated, section, success,
    summary_row, warn,
};
pub use table::{card_table, employee_table, stats_table, TableBuilder};
pub use theme::{theme, Theme};
