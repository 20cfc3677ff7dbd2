use std::fmt::Display;

use colored::{Color, Colorize};
use jsoncut::inspect::{format_counts, format_inspection, Field};
use jsoncut::{ArrayCounts, Error, ErrorContext, InspectedKey, ListedKey, Path};

const ACCESS_RULE: usize = 39;
const TYPE_RULE: usize = 40;

/// Terminal styling for everything the CLI prints. Disabled palettes
/// return text untouched.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn paint(&self, text: impl Display, color: Color) -> String {
        if self.enabled {
            text.to_string().color(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: impl Display, color: Color) -> String {
        if self.enabled {
            text.to_string().color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

pub fn listed_key(key: &ListedKey, palette: &Palette) -> String {
    let number = format!("{:>width$}", key.number, width = key.width);
    format!("{} {}", palette.paint(number, Color::Yellow), key.path)
}

pub fn inspection(keys: &[InspectedKey], palette: &Palette) -> Vec<String> {
    format_inspection(keys, |field, text| match field {
        Field::Key => palette.paint(text, Color::White),
        Field::Value => palette.paint(text, Color::Cyan),
    })
}

pub fn counts(counts: &ArrayCounts, palette: &Palette) -> Vec<String> {
    format_counts(counts, |field, text| match field {
        Field::Key => palette.paint(text, Color::Cyan),
        Field::Value => palette.paint(text, Color::White),
    })
}

/// Multi-line report for a library error. Errors raised inside an
/// operation get the dashed block with the operation, record number and
/// parsed keys; missing keys also list what the record does have.
pub fn error_block(err: &Error, palette: &Palette) -> String {
    let Some(context) = err.context() else {
        return headline(err.kind().name(), &detail(err), palette);
    };
    match err {
        Error::KeyNotFound { key, .. } => access_block(err, key, context, palette),
        Error::IndexOutOfRange { index, .. } => access_block(err, index, context, palette),
        _ => {
            let rule = palette.paint("-".repeat(TYPE_RULE), Color::Yellow);
            let mut out = format!("{rule}\n{}\n{rule}\n", palette.bold(err, Color::Red));
            push_context(&mut out, context, palette);
            out
        }
    }
}

fn access_block(err: &Error, name: impl Display, context: &ErrorContext, palette: &Palette) -> String {
    let rule = palette.paint("-".repeat(ACCESS_RULE), Color::Yellow);
    let mut out = format!(
        "{rule}\n{}: {}\n{rule}\n",
        err.kind().name(),
        palette.bold(name, Color::Red)
    );
    push_context(&mut out, context, palette);

    let available = err.available_keys().unwrap_or_default();
    let width = available.len().to_string().len();
    out.push_str(&format!("{rule}\nAvailable Keys:\n{rule}\n"));
    for (idx, key) in available.iter().enumerate() {
        let line = format!("{:>width$} {key}", idx + 1);
        out.push_str(&palette.paint(line, Color::White));
        out.push('\n');
    }
    out
}

fn push_context(out: &mut String, context: &ErrorContext, palette: &Palette) {
    out.push_str(&format!(
        "Operation: {}\nItem #: {}\nParsed Key List: {}\n",
        palette.paint(context.operation, Color::Red),
        palette.paint(context.item_number, Color::Red),
        palette.paint(key_list(&context.key_lists), Color::Red)
    ));
}

fn key_list(paths: &[Path]) -> String {
    let names: Vec<String> = paths.iter().map(ToString::to_string).collect();
    format!("[{}]", names.join(", "))
}

fn detail(err: &Error) -> String {
    match err {
        Error::KeyNotFound { key, .. } => key.clone(),
        Error::IndexOutOfRange { index, len, .. } => format!("{index} (length {len})"),
        Error::KeyTypeError { segment, found, .. } => format!("{segment:?} cannot address {found}"),
        Error::KeyNumberOutOfRange { token } => token.clone(),
    }
}

/// One-line `Name: message` report.
pub fn headline(name: &str, message: &str, palette: &Palette) -> String {
    format!(
        "{}: {}\n",
        palette.bold(name, Color::Red),
        palette.paint(message, Color::White)
    )
}
