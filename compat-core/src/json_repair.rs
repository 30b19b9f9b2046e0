//! Best-effort parsing of JSON emitted by language models
//!
//! Tool-call arguments arrive as JSON-encoded strings that are frequently
//! almost, but not quite, valid: trailing commas, a truncated tail, Python
//! literals, single quotes, markdown fences. [`loads`] salvages a structured
//! value from such text instead of failing the whole response.

use serde_json::{Map, Value};
use tracing::debug;

/// Parse `text` as JSON, repairing it when the strict parse fails
///
/// Empty input yields an empty object. Text that cannot be salvaged is
/// returned as a JSON string so no payload is lost.
pub fn loads(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::Object(Map::new());
    }

    if let Ok(value) = serde_json::from_str(trimmed) {
        return value;
    }

    match repair_json(trimmed).and_then(|fixed| serde_json::from_str(&fixed).ok()) {
        Some(value) => {
            debug!("Repaired malformed JSON payload ({} bytes)", text.len());
            value
        }
        None => {
            debug!("Could not repair JSON payload ({} bytes), keeping raw text", text.len());
            Value::String(text.to_string())
        }
    }
}

/// Rewrite `text` into syntactically valid JSON, if anything can be salvaged
pub fn repair_json(text: &str) -> Option<String> {
    let body = strip_code_fence(text.trim());
    let start = body.find(['{', '['])?;
    let repaired = Repairer::default().run(&body[start..]);
    serde_json::from_str::<Value>(&repaired).ok()?;
    Some(repaired)
}

/// Remove a surrounding ```json ... ``` fence
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string (e.g. `json`) on the opening line
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

#[derive(Default)]
struct Repairer {
    out: String,
    stack: Vec<Container>,
    /// Quote character of the string currently open, if any
    quote: Option<char>,
    escaped: bool,
}

impl Repairer {
    fn run(mut self, input: &str) -> String {
        let chars: Vec<char> = input.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if let Some(quote) = self.quote {
                self.push_string_char(c, quote);
                i += 1;
                continue;
            }

            match c {
                '"' | '\'' => {
                    self.quote = Some(c);
                    self.out.push('"');
                }
                '{' => {
                    self.stack.push(Container::Object);
                    self.out.push(c);
                }
                '[' => {
                    self.stack.push(Container::Array);
                    self.out.push(c);
                }
                '}' | ']' => {
                    let expected = if c == '}' { Container::Object } else { Container::Array };
                    if self.stack.last() == Some(&expected) {
                        self.close_top();
                    }
                    // Stray closers are dropped
                }
                ',' => {
                    self.drop_trailing_comma();
                    if !self.out.trim_end().ends_with(['{', '[']) {
                        self.out.push(',');
                    }
                }
                c if c.is_alphanumeric() || c == '_' || c == '-' || c == '.' || c == '+' => {
                    let end = chars[i..]
                        .iter()
                        .position(|ch| !(ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.' | '+')))
                        .map_or(chars.len(), |offset| i + offset);
                    let word: String = chars[i..end].iter().collect();
                    self.push_bare_word(&word);
                    i = end;
                    continue;
                }
                c if c.is_whitespace() || c == ':' => self.out.push(c),
                _ => {
                    // Anything else outside a string is noise
                }
            }

            i += 1;

            // Stop after the first complete top-level value
            if self.stack.is_empty() && self.quote.is_none() && !self.out.trim().is_empty() {
                break;
            }
        }

        self.finish()
    }

    fn push_string_char(&mut self, c: char, quote: char) {
        if self.escaped {
            self.escaped = false;
            // `\'` is not a valid JSON escape
            if c == '\'' {
                self.out.pop();
            }
            self.out.push(c);
            return;
        }

        match c {
            '\\' => {
                self.escaped = true;
                self.out.push(c);
            }
            c if c == quote => {
                self.quote = None;
                self.out.push('"');
            }
            '"' => self.out.push_str("\\\""),
            '\n' => self.out.push_str("\\n"),
            '\r' => self.out.push_str("\\r"),
            '\t' => self.out.push_str("\\t"),
            c => self.out.push(c),
        }
    }

    fn push_bare_word(&mut self, word: &str) {
        let literal = match word {
            "true" | "True" => Some("true"),
            "false" | "False" => Some("false"),
            "null" | "None" | "undefined" => Some("null"),
            _ => None,
        };

        if let Some(literal) = literal {
            self.out.push_str(literal);
        } else if serde_json::from_str::<serde_json::Number>(word).is_ok() {
            self.out.push_str(word);
        } else {
            self.out.push_str(&serde_json::Value::String(word.to_string()).to_string());
        }
    }

    fn drop_trailing_comma(&mut self) {
        let trimmed_len = self.out.trim_end().len();
        if self.out[..trimmed_len].ends_with(',') {
            self.out.truncate(trimmed_len - 1);
        }
    }

    fn close_top(&mut self) {
        self.drop_trailing_comma();
        if let Some(container) = self.stack.pop() {
            if container == Container::Object {
                self.complete_dangling_key();
            }
            self.out.push(match container {
                Container::Object => '}',
                Container::Array => ']',
            });
        }
    }

    /// `{"a": ` or `{"a"` before a forced close gets a null value
    fn complete_dangling_key(&mut self) {
        let trimmed = self.out.trim_end();
        if trimmed.ends_with(':') {
            self.out.truncate(trimmed.len());
            self.out.push_str(" null");
        } else if trimmed.ends_with('"') && self.last_token_is_key() {
            self.out.truncate(trimmed.len());
            self.out.push_str(": null");
        }
    }

    /// Whether the string that ends the output sits in key position
    fn last_token_is_key(&self) -> bool {
        let trimmed = self.out.trim_end();
        let Some(body) = trimmed.strip_suffix('"') else {
            return false;
        };
        // Walk back to the opening quote, skipping escaped quotes
        let bytes = body.as_bytes();
        let mut idx = bytes.len();
        while idx > 0 {
            idx -= 1;
            if bytes[idx] == b'"' && (idx == 0 || bytes[idx - 1] != b'\\') {
                let before = body[..idx].trim_end();
                return before.ends_with('{') || before.ends_with(',');
            }
        }
        false
    }

    fn finish(mut self) -> String {
        if self.quote.take().is_some() {
            if self.escaped {
                self.out.pop();
            }
            self.out.push('"');
        }
        while !self.stack.is_empty() {
            self.close_top();
        }
        self.drop_trailing_comma();
        self.out.trim().to_string()
    }
}
