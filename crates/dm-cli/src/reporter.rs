use colored::Colorize;
use dm_macros::TransformError;
use std::path::Path;

/// Renders per-file failures as `file:line:col - error: message`.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    pub fn format_failure(&self, path: &Path, source: Option<&str>, error: &anyhow::Error) -> String {
        let mut location = path.display().to_string();
        let parse_pos = match error.downcast_ref::<TransformError>() {
            Some(TransformError::Parse(parse)) => Some(parse.pos),
            _ => None,
        };
        if let (Some(pos), Some(source)) = (parse_pos, source) {
            let (line, column) = line_and_column(source, pos);
            location.push_str(&format!(":{line}:{column}"));
        }

        let category = if self.color {
            "error".red().bold().to_string()
        } else {
            "error".to_string()
        };
        let location = if self.color {
            location.cyan().to_string()
        } else {
            location
        };
        format!("{location} - {category}: {error:#}")
    }
}

/// One-based line and column of a byte offset.
pub fn line_and_column(source: &str, pos: u32) -> (usize, usize) {
    let mut end = (pos as usize).min(source.len());
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    let before = &source[..end];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
