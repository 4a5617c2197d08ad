pub mod formatter;

pub use formatter::{
    format_breakdown, format_catalog, format_json, format_modifier, format_power, format_result,
    format_summary, should_use_colors,
};
