/// Splits a comma-separated key expression into its tokens.
///
/// Quoting is minimal: `quote` only needs to surround tokens that contain
/// commas or significant leading/trailing spaces. A backslash before the
/// quote character yields a literal quote; any other backslash is kept so
/// escaped dots survive into key-name parsing. Whitespace around unquoted
/// text is trimmed. Token order is preserved and duplicates are kept.
pub fn parse_csv(input: &str, quote: char) -> Vec<String> {
    if input.trim().is_empty() {
        return Vec::new();
    }

    let mut tokens = Vec::new();
    let mut field = Field::default();
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\' && chars.peek() == Some(&quote) {
            chars.next();
            field.push(quote);
            continue;
        }
        if field.in_quotes {
            if ch == quote {
                field.close_quote();
            } else {
                field.push(ch);
            }
            continue;
        }
        match ch {
            ',' => tokens.push(std::mem::take(&mut field).finish()),
            c if c == quote && field.is_blank() => field.open_quote(),
            c if c.is_whitespace() && field.is_blank() => {}
            c => field.push(c),
        }
    }
    tokens.push(field.finish());
    tokens
}

#[derive(Default)]
struct Field {
    text: String,
    in_quotes: bool,
    // Length of the text that came from a quoted section; never trimmed.
    quoted_len: Option<usize>,
}

impl Field {
    fn push(&mut self, ch: char) {
        self.text.push(ch);
    }

    fn is_blank(&self) -> bool {
        self.text.is_empty() && self.quoted_len.is_none()
    }

    fn open_quote(&mut self) {
        self.in_quotes = true;
    }

    fn close_quote(&mut self) {
        self.in_quotes = false;
        self.quoted_len = Some(self.text.len());
    }

    fn finish(mut self) -> String {
        let keep = self.quoted_len.unwrap_or(0);
        let trimmed = keep + self.text[keep..].trim_end().len();
        self.text.truncate(trimmed);
        self.text
    }
}
