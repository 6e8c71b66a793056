//! 报告模块：Markdown报告追加输出
pub mod markdown;

pub use self::markdown::{
    REPORT_SUFFIX, append_markdown_report, build_report_file_name, escape_markdown_cell,
    render_section, resolve_report_path,
};
