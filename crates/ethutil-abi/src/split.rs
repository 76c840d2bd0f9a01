//! Nesting-aware splitting of comma-separated type and value lists

/// Tracks parenthesis, bracket, and quote state while scanning text
#[derive(Debug, Default)]
struct Nesting {
    paren: usize,
    bracket: usize,
    quoted: bool,
}

impl Nesting {
    fn feed(&mut self, c: char) {
        match c {
            '"' => self.quoted = !self.quoted,
            _ if self.quoted => {}
            '(' => self.paren += 1,
            ')' => self.paren = self.paren.saturating_sub(1),
            '[' => self.bracket += 1,
            ']' => self.bracket = self.bracket.saturating_sub(1),
            _ => {}
        }
    }

    fn at_top(&self) -> bool {
        self.paren == 0 && self.bracket == 0 && !self.quoted
    }
}

/// Byte index of the delimiter closing the `(` or `[` at `open`.
///
/// Returns `None` when `open` is not an opener or the text ends first.
pub(crate) fn matching_close(text: &str, open: usize) -> Option<usize> {
    let tail = text.get(open..)?;
    if !(tail.starts_with('(') || tail.starts_with('[')) {
        return None;
    }
    let mut nesting = Nesting::default();
    for (i, c) in tail.char_indices() {
        nesting.feed(c);
        if nesting.at_top() {
            return Some(open + i);
        }
    }
    None
}

/// Interior of `input` when one `(..)` or `[..]` pair encloses all of it
pub(crate) fn strip_enclosing(input: &str) -> &str {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return input;
    }
    match matching_close(trimmed, 0) {
        Some(close) if close == trimmed.len() - 1 => &trimmed[1..close],
        _ => input,
    }
}

/// Split a list at top-level commas.
///
/// One enclosing `(..)` or `[..]` pair is removed first. Commas nested in
/// parentheses, brackets, or double quotes do not split. Items are
/// returned verbatim; an empty list yields a single empty item.
///
/// ```
/// use ethutil_abi::split_top_level;
///
/// assert_eq!(split_top_level("[[1,2],[3]]"), vec!["[1,2]", "[3]"]);
/// assert_eq!(split_top_level("(uint256,bool),(uint256,bool)").len(), 2);
/// ```
pub fn split_top_level(input: &str) -> Vec<String> {
    let interior = strip_enclosing(input);
    let mut items = Vec::new();
    let mut current = String::new();
    let mut nesting = Nesting::default();

    for c in interior.chars() {
        if c == ',' && nesting.at_top() {
            items.push(std::mem::take(&mut current));
            continue;
        }
        nesting.feed(c);
        current.push(c);
    }
    items.push(current);
    items
}

/// Trim an item and remove one pair of surrounding double quotes
pub(crate) fn unquote(item: &str) -> &str {
    let trimmed = item.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(trimmed)
}
