/// Greedy word wrap; never splits a word.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}

/// Shortens `s` to `max_len` characters, keeping the head.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len == 0 {
        return String::new();
    }
    let head: String = s.chars().take(max_len - 1).collect();
    format!("{head}…")
}

/// Shortens `s` to `max_len` characters, keeping the tail (where a
/// snapshot path carries its timestep index).
pub fn truncate_left(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len <= max_len {
        return s.to_string();
    }
    if max_len == 0 {
        return String::new();
    }
    let tail: String = s.chars().skip(len - (max_len - 1)).collect();
    format!("…{tail}")
}
