mod formatter;

pub use formatter::{
    format_compact, format_creator_detail, format_ranked_table, should_use_colors,
};
