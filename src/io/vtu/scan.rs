use crate::io::{Format, error::Error};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TagKind {
    Open,
    Close,
    Empty,
}

#[derive(Debug)]
pub(super) struct Tag<'a> {
    pub name: &'a str,
    pub kind: TagKind,
    pub line: usize,
    attrs: Vec<(&'a str, String)>,
}

impl Tag<'_> {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn usize_attr(&self, key: &str) -> Result<Option<usize>, Error> {
        self.attr(key)
            .map(|v| {
                v.trim().parse::<usize>().map_err(|_| {
                    Error::parse(
                        Format::Vtu,
                        self.line,
                        format!("attribute {key}=\"{v}\" is not a non-negative integer"),
                    )
                })
            })
            .transpose()
    }
}

/// Forward-only scanner over the tags of an XML document.
pub(super) struct TagScanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> TagScanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    pub fn line_at(&self, offset: usize) -> usize {
        self.text[..offset.min(self.text.len())]
            .bytes()
            .filter(|&b| b == b'\n')
            .count()
            + 1
    }

    pub fn next_tag(&mut self) -> Result<Option<Tag<'a>>, Error> {
        let text: &'a str = self.text;
        loop {
            let Some(rel) = text[self.pos..].find('<') else {
                return Ok(None);
            };
            let start = self.pos + rel;
            let rest = &text[start..];

            if rest.starts_with("<?") {
                self.pos = start + self.find_from(start, "?>")? + 2;
                continue;
            }
            if rest.starts_with("<!--") {
                self.pos = start + self.find_from(start, "-->")? + 3;
                continue;
            }

            let close = self.find_from(start, ">")?;
            let raw = &rest[1..close];
            self.pos = start + close + 1;

            let line = self.line_at(start);
            let (kind, inner) = if let Some(s) = raw.strip_prefix('/') {
                (TagKind::Close, s)
            } else if let Some(s) = raw.strip_suffix('/') {
                (TagKind::Empty, s)
            } else {
                (TagKind::Open, raw)
            };

            let inner = inner.trim();
            let name_end = inner
                .find(char::is_whitespace)
                .unwrap_or(inner.len());
            let name = &inner[..name_end];
            if name.is_empty() {
                return Err(Error::parse(Format::Vtu, line, "empty tag name"));
            }
            let attrs = parse_attrs(&inner[name_end..], line)?;

            return Ok(Some(Tag {
                name,
                kind,
                line,
                attrs,
            }));
        }
    }

    /// Returns the text up to the closing tag `</name>` and moves past it.
    pub fn take_body(&mut self, name: &str) -> Result<&'a str, Error> {
        let text: &'a str = self.text;
        let marker = format!("</{name}");
        let rel = text[self.pos..].find(&marker).ok_or_else(|| {
            Error::parse(
                Format::Vtu,
                self.line_at(self.pos),
                format!("missing closing tag </{name}>"),
            )
        })?;
        let body = &text[self.pos..self.pos + rel];
        let close_start = self.pos + rel;
        self.pos = close_start + self.find_from(close_start, ">")? + 1;
        Ok(body)
    }

    fn find_from(&self, start: usize, needle: &str) -> Result<usize, Error> {
        self.text[start..].find(needle).ok_or_else(|| {
            Error::parse(
                Format::Vtu,
                self.line_at(start),
                format!("unterminated markup (expected '{needle}')"),
            )
        })
    }
}

/// Character data of an element body, with nested child elements (including
/// their contents) and comments removed. Unterminated markup is kept as text.
pub(super) fn character_data(body: &str) -> Cow<'_, str> {
    if !body.contains('<') {
        return Cow::Borrowed(body);
    }

    let mut out = String::with_capacity(body.len());
    let mut depth = 0usize;
    let mut rest = body;
    while let Some(lt) = rest.find('<') {
        if depth == 0 {
            out.push_str(&rest[..lt]);
        }
        out.push(' ');

        let markup = &rest[lt..];
        let end = if markup.starts_with("<!--") {
            markup.find("-->").map(|i| i + 3)
        } else {
            markup.find('>').map(|i| i + 1)
        };
        let Some(end) = end else {
            rest = markup;
            break;
        };

        let tag = &markup[..end];
        if !tag.starts_with("<!--") && !tag.starts_with("<?") {
            if tag.starts_with("</") {
                depth = depth.saturating_sub(1);
            } else if !tag.ends_with("/>") {
                depth += 1;
            }
        }
        rest = &markup[end..];
    }
    if depth == 0 {
        out.push_str(rest);
    }
    Cow::Owned(out)
}

fn parse_attrs(mut s: &str, line: usize) -> Result<Vec<(&str, String)>, Error> {
    let mut attrs = Vec::new();
    loop {
        s = s.trim_start();
        if s.is_empty() {
            return Ok(attrs);
        }

        let eq = s
            .find('=')
            .ok_or_else(|| Error::parse(Format::Vtu, line, "attribute without a value"))?;
        let key = s[..eq].trim();
        let after = s[eq + 1..].trim_start();

        let quote = after
            .chars()
            .next()
            .filter(|c| *c == '"' || *c == '\'')
            .ok_or_else(|| {
                Error::parse(Format::Vtu, line, format!("unquoted value for '{key}'"))
            })?;
        let value_end = after[1..].find(quote).ok_or_else(|| {
            Error::parse(Format::Vtu, line, format!("unterminated value for '{key}'"))
        })?;

        attrs.push((key, unescape(&after[1..1 + value_end])));
        s = &after[value_end + 2..];
    }
}

fn unescape(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

pub(super) fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
