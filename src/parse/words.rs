/// Split `text` into words on whitespace, keeping each `%...%` span as one
/// word with its delimiters stripped and inner spacing preserved.
///
/// Inside a span `\%` is a literal `%` and `\\` a literal backslash. Empty
/// spans produce no word.
#[must_use]
pub fn tokenize_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut buffer = String::new();
    let mut in_group = false;
    let mut escaping = false;

    for c in text.chars() {
        if in_group {
            if escaping {
                escaping = false;
                if c != '%' && c != '\\' {
                    buffer.push('\\');
                }
                buffer.push(c);
            } else if c == '\\' {
                escaping = true;
            } else if c == '%' {
                in_group = false;
            } else {
                buffer.push(c);
            }
            continue;
        }

        if c.is_whitespace() {
            flush(&mut buffer, &mut words);
        } else if c == '%' {
            in_group = true;
        } else {
            buffer.push(c);
        }
    }

    if escaping {
        buffer.push('\\');
    }
    flush(&mut buffer, &mut words);
    words
}

/// Inverse of [`tokenize_words`]: join with single spaces, wrapping any
/// word that contains whitespace or `%` in a `%...%` span.
#[must_use]
pub fn join_words<S: AsRef<str>>(words: &[S]) -> String {
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let word = word.as_ref();
        if word.contains(|c: char| c.is_whitespace() || c == '%') {
            out.push_str(&quote_group(word));
        } else {
            out.push_str(word);
        }
    }
    out
}

/// `text` as a `%...%` span, escaping `%` and backslashes.
pub(crate) fn quote_group(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('%');
    for c in text.chars() {
        if c == '%' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

fn flush(buffer: &mut String, words: &mut Vec<String>) {
    if !buffer.is_empty() {
        words.push(std::mem::take(buffer));
    }
}
