//! 输入模块：目录扫描结果解析
pub mod input_parser;

pub use self::input_parser::{ParsedInput, parse_input_file, parse_lines};
