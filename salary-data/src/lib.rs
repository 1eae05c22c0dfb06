pub mod batting;
pub mod export;
pub mod loader;
pub mod stats;

pub use batting::{BattingTable, BattingTableError};
pub use export::{
    COMPARISON_HEADERS, ComparisonRow, ExportError, export_comparisons, export_table,
    load_comparisons,
};
pub use loader::{SeasonLoader, SeasonLoaderError};
pub use stats::{ColumnSummary, describe};
