//! Structured model of a `setup.py` file.
//!
//! A `setup.py` is split into three parts:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ head   imports, helpers, ... │  kept verbatim
//! │        setup                 │
//! ├──────────────────────────────┤
//! │ args   (name='x', ...)       │  ordered keyword arguments
//! ├──────────────────────────────┤
//! │ tail   if __name__ == ...    │  kept verbatim
//! └──────────────────────────────┘
//! ```
//!
//! Edits are field-level operations on [`SetupArg`]s; the argument list is
//! re-rendered in a canonical layout (four-space indent, one argument per
//! line, trailing commas). Comments inside the argument list are dropped.

use std::fmt;

use crate::domain::error::DomainError;

/// Value of a keyword argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupValue {
    /// A single string literal.
    Str(String),
    /// A list whose elements are all string literals.
    List(Vec<String>),
    /// Any other Python expression, stored as written.
    Expr(String),
}

impl SetupValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Human-readable form: strings as-is, lists joined with `", "`.
    pub fn display(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::List(items) => items.join(", "),
            Self::Expr(raw) => raw.clone(),
        }
    }

    fn render(&self) -> String {
        match self {
            Self::Str(s) => quote(s),
            Self::List(items) if items.is_empty() => "[]".to_string(),
            Self::List(items) => {
                let mut out = String::from("[\n");
                for item in items {
                    out.push_str("        ");
                    out.push_str(&quote(item));
                    out.push_str(",\n");
                }
                out.push_str("    ]");
                out
            }
            Self::Expr(raw) => raw.clone(),
        }
    }
}

impl From<&str> for SetupValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for SetupValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<String>> for SetupValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// One `key=value` argument of the `setup()` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupArg {
    pub key: String,
    pub value: SetupValue,
}

/// Parsed `setup.py`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupPy {
    head: String,
    args: Vec<SetupArg>,
    tail: String,
}

impl SetupPy {
    /// Parse the first top-level `setup(...)` call of `text`.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let bytes = text.as_bytes();
        let open = find_setup_call(bytes)?;
        let (close, commas) = match_call(bytes, open)?;

        let mut args: Vec<SetupArg> = Vec::new();
        let mut start = open + 1;
        for end in commas.into_iter().chain(std::iter::once(close)) {
            let segment = strip_comments(&text[start..end])?;
            let segment = segment.trim();
            start = end + 1;
            if segment.is_empty() {
                continue;
            }
            let arg = parse_arg(segment)?;
            if args.iter().any(|a| a.key == arg.key) {
                return Err(malformed(format!("argument '{}' given twice", arg.key)));
            }
            args.push(arg);
        }

        Ok(Self {
            head: text[..open].to_string(),
            args,
            tail: text[close + 1..].to_string(),
        })
    }

    /// Value of a field, if present.
    pub fn get(&self, key: &str) -> Option<&SetupValue> {
        self.args.iter().find(|a| a.key == key).map(|a| &a.value)
    }

    /// Replace a field in place, or append it when absent.
    pub fn set(&mut self, key: &str, value: impl Into<SetupValue>) {
        let value = value.into();
        match self.args.iter_mut().find(|a| a.key == key) {
            Some(arg) => arg.value = value,
            None => self.args.push(SetupArg {
                key: key.to_string(),
                value,
            }),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<SetupValue> {
        let idx = self.args.iter().position(|a| a.key == key)?;
        Some(self.args.remove(idx).value)
    }

    /// String list stored under `key`; a missing field reads as empty.
    pub fn list(&self, key: &str) -> Result<Vec<String>, DomainError> {
        match self.get(key) {
            None => Ok(Vec::new()),
            Some(SetupValue::List(items)) => Ok(items.clone()),
            Some(_) => Err(DomainError::FieldTypeMismatch {
                field: key.to_string(),
                expected: "list of strings",
            }),
        }
    }

    pub fn args(&self) -> &[SetupArg] {
        &self.args
    }

    /// Render back to Python source.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.head.len() + self.tail.len() + 512);
        out.push_str(&self.head);
        if self.args.is_empty() {
            out.push_str("()");
        } else {
            out.push_str("(\n");
            for arg in &self.args {
                out.push_str("    ");
                out.push_str(&arg.key);
                out.push('=');
                out.push_str(&arg.value.render());
                out.push_str(",\n");
            }
            out.push(')');
        }
        out.push_str(&self.tail);
        out
    }
}

impl fmt::Display for SetupPy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// ── install_requires helpers ─────────────────────────────────────────────────

/// Normalised distribution name of a requirement specifier.
///
/// `"Requests[socks]>=2.0"` → `"requests"`, `"zope.interface"` → `"zope-interface"`.
pub fn requirement_name(spec: &str) -> String {
    let name: String = spec
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect();

    let mut out = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                out.push('-');
            }
            in_separator = true;
        } else {
            out.push(c.to_ascii_lowercase());
            in_separator = false;
        }
    }
    out
}

/// Append requirements not already listed. Returns the ones added.
pub fn add_requirements(list: &mut Vec<String>, names: &[String]) -> Vec<String> {
    let mut added = Vec::new();
    for name in names {
        let wanted = requirement_name(name);
        if list.iter().any(|r| requirement_name(r) == wanted) {
            continue;
        }
        list.push(name.trim().to_string());
        added.push(name.trim().to_string());
    }
    added
}

/// Drop requirements whose name matches one of `names`. Returns the ones removed.
pub fn remove_requirements(list: &mut Vec<String>, names: &[String]) -> Vec<String> {
    let unwanted: Vec<String> = names.iter().map(|n| requirement_name(n)).collect();
    let mut removed = Vec::new();
    list.retain(|r| {
        if unwanted.contains(&requirement_name(r)) {
            removed.push(r.clone());
            false
        } else {
            true
        }
    });
    removed
}

// ── Lexing ───────────────────────────────────────────────────────────────────

fn malformed(reason: impl Into<String>) -> DomainError {
    DomainError::MalformedSetupPy {
        reason: reason.into(),
    }
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Index just past the string literal starting at `i`.
fn skip_string(bytes: &[u8], i: usize) -> Result<usize, DomainError> {
    let quote = bytes[i];
    let triple = bytes.len() >= i + 3 && bytes[i + 1] == quote && bytes[i + 2] == quote;
    let mut j = if triple { i + 3 } else { i + 1 };

    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'\n' if !triple => break,
            b if b == quote => {
                if !triple {
                    return Ok(j + 1);
                }
                if bytes.len() >= j + 3 && bytes[j + 1] == quote && bytes[j + 2] == quote {
                    return Ok(j + 3);
                }
                j += 1;
            }
            _ => j += 1,
        }
    }
    Err(malformed("unterminated string literal"))
}

/// Index of the newline ending the comment at `i` (or end of input).
fn skip_comment(bytes: &[u8], i: usize) -> usize {
    bytes[i..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |p| i + p)
}

/// Index of the `(` opening the first `setup(` call outside strings and comments.
fn find_setup_call(bytes: &[u8]) -> Result<usize, DomainError> {
    const NAME: &[u8] = b"setup";
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' => i = skip_string(bytes, i)?,
            b'#' => i = skip_comment(bytes, i),
            _ if bytes[i..].starts_with(NAME) && (i == 0 || !is_ident_byte(bytes[i - 1])) => {
                let mut j = i + NAME.len();
                while j < bytes.len() && matches!(bytes[j], b' ' | b'\t') {
                    j += 1;
                }
                if j < bytes.len() && bytes[j] == b'(' {
                    return Ok(j);
                }
                i += NAME.len();
            }
            _ => i += 1,
        }
    }
    Err(malformed("no setup(...) call found"))
}

/// Index of the `)` closing the call at `open`, plus top-level comma positions.
fn match_call(bytes: &[u8], open: usize) -> Result<(usize, Vec<usize>), DomainError> {
    let mut stack: Vec<u8> = Vec::new();
    let mut commas = Vec::new();
    let mut i = open + 1;

    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' => {
                i = skip_string(bytes, i)?;
                continue;
            }
            b'#' => {
                i = skip_comment(bytes, i);
                continue;
            }
            b'(' | b'[' | b'{' => stack.push(bytes[i]),
            b')' if stack.is_empty() => return Ok((i, commas)),
            closer @ (b')' | b']' | b'}') => {
                let expected = match stack.pop() {
                    Some(b'(') => Some(b')'),
                    Some(b'[') => Some(b']'),
                    Some(_) => Some(b'}'),
                    None => None,
                };
                if expected != Some(closer) {
                    return Err(malformed(format!(
                        "unbalanced '{}' in setup(...) arguments",
                        closer as char
                    )));
                }
            }
            b',' if stack.is_empty() => commas.push(i),
            _ => {}
        }
        i += 1;
    }
    Err(malformed("setup( is never closed"))
}

/// Remove `#` comments that are outside string literals.
fn strip_comments(segment: &str) -> Result<String, DomainError> {
    let bytes = segment.as_bytes();
    let mut out = String::with_capacity(segment.len());
    let mut i = 0;
    let mut copied = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' => i = skip_string(bytes, i)?,
            b'#' => {
                out.push_str(&segment[copied..i]);
                i = skip_comment(bytes, i);
                copied = i;
            }
            _ => i += 1,
        }
    }
    out.push_str(&segment[copied..]);
    Ok(out)
}

/// Split `key=value` at the first top-level `=`.
fn parse_arg(segment: &str) -> Result<SetupArg, DomainError> {
    let bytes = segment.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' => {
                i = skip_string(bytes, i)?;
                continue;
            }
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b'=' if depth == 0 => {
                let next_is_eq = bytes.get(i + 1) == Some(&b'=');
                let prev_is_op = i > 0 && matches!(bytes[i - 1], b'=' | b'!' | b'<' | b'>');
                if !next_is_eq && !prev_is_op {
                    let key = segment[..i].trim();
                    if key.is_empty()
                        || !key.bytes().all(is_ident_byte)
                        || key.as_bytes()[0].is_ascii_digit()
                    {
                        break;
                    }
                    return Ok(SetupArg {
                        key: key.to_string(),
                        value: parse_value(segment[i + 1..].trim())?,
                    });
                }
            }
            _ => {}
        }
        i += 1;
    }
    Err(malformed(format!(
        "expected keyword argument, found '{}'",
        first_line(segment)
    )))
}

fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or(s)
}

fn parse_value(raw: &str) -> Result<SetupValue, DomainError> {
    if raw.is_empty() {
        return Err(malformed("keyword argument without a value"));
    }
    if let Some(s) = string_literal(raw)? {
        return Ok(SetupValue::Str(s));
    }
    if let Some(inner) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        if let Some(items) = string_list(inner)? {
            return Ok(SetupValue::List(items));
        }
    }
    Ok(SetupValue::Expr(raw.to_string()))
}

/// Elements of a list body when every element is a plain string literal.
fn string_list(inner: &str) -> Result<Option<Vec<String>>, DomainError> {
    let stripped = strip_comments(inner)?;
    let bytes = stripped.as_bytes();
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;
    let mut bounds = Vec::new();
    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' => {
                i = skip_string(bytes, i)?;
                continue;
            }
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                bounds.push((start, i));
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    bounds.push((start, bytes.len()));

    for (s, e) in bounds {
        let element = stripped[s..e].trim();
        if element.is_empty() {
            continue;
        }
        match string_literal(element)? {
            Some(value) => items.push(value),
            None => return Ok(None),
        }
    }
    Ok(Some(items))
}

/// Decode `raw` when it is exactly one single-line string literal.
fn string_literal(raw: &str) -> Result<Option<String>, DomainError> {
    let prefix_len = raw
        .bytes()
        .take_while(|b| matches!(b, b'r' | b'R' | b'u' | b'U'))
        .count();
    if prefix_len > 1 {
        return Ok(None);
    }
    let is_raw = prefix_len == 1 && raw.as_bytes()[0].eq_ignore_ascii_case(&b'r');
    let body = &raw[prefix_len..];
    let bytes = body.as_bytes();

    if bytes.len() < 2 || !matches!(bytes[0], b'\'' | b'"') {
        return Ok(None);
    }
    let quote = bytes[0];
    if bytes.len() >= 3 && bytes[1] == quote && bytes[2] == quote {
        return Ok(None);
    }
    if skip_string(bytes, 0)? != bytes.len() {
        return Ok(None);
    }

    let content = &body[1..body.len() - 1];
    if is_raw {
        return Ok(Some(content.to_string()));
    }
    // Escapes that cannot be decoded keep the literal as an expression.
    Ok(unescape(content))
}

/// Decode the escape sequences of a non-raw Python string body.
///
/// `None` for `\N{...}` and malformed `\x`/`\u`/`\U` escapes.
fn unescape(content: &str) -> Option<String> {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };
        match next {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0c}'),
            'v' => out.push('\u{0b}'),
            '\n' => {}
            '\\' | '\'' | '"' => out.push(next),
            'x' => out.push(hex_escape(&mut chars, 2)?),
            'u' => out.push(hex_escape(&mut chars, 4)?),
            'U' => out.push(hex_escape(&mut chars, 8)?),
            '0'..='7' => {
                let mut code = next.to_digit(8)?;
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            code = code * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(code)?);
            }
            'N' => return None,
            // Unknown escapes keep their backslash.
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    Some(out)
}

fn hex_escape(chars: &mut impl Iterator<Item = char>, digits: usize) -> Option<char> {
    let mut code = 0u32;
    for _ in 0..digits {
        code = code * 16 + chars.next()?.to_digit(16)?;
    }
    char::from_u32(code)
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() && (c as u32) < 0x100 => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}
