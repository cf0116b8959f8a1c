//! URL pattern compilation.
//!
//! # Responsibilities
//! - Compile URL templates (`:named`, `*splat`, `(optional)`) into anchored regexes
//! - Accept pre-built regexes as-is (unanchored search)
//! - Extract ordered parameter values for a matching URL
//!
//! # Design Decisions
//! - Templates compile to a regex once, at registration time
//! - Literal text is escaped, so a compiled template is always a valid regex
//! - Templates compile without size or nesting limits; only raw regexes can fail
//! - Splats are greedy; leftmost-first regex semantics backtrack so trailing
//!   tokens still match the remainder
//! - Non-participating captures extract as empty strings to keep positions stable

use regex::{Regex, RegexBuilder};
use std::fmt;
use thiserror::Error;

/// Regex matching one path segment (`:name`).
const NAMED_PARAM: &str = "([^/]+)";
/// Regex matching across path separators (`*name`).
const SPLAT_PARAM: &str = "(.*)";

/// Errors raised when compiling a raw regular expression.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The supplied expression is not a valid regex.
    #[error("invalid route expression `{expr}`: {source}")]
    InvalidRegex {
        expr: String,
        #[source]
        source: regex::Error,
    },
}

/// Where a compiled pattern came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSource {
    /// A URL template such as `books/:id`.
    Template(String),
    /// A caller-supplied regular expression.
    Regex,
}

/// A compiled URL matcher.
#[derive(Clone)]
pub struct Pattern {
    source: PatternSource,
    regex: Regex,
}

impl Pattern {
    /// Compile a URL template.
    pub fn template(template: &str) -> Self {
        let expr = template_to_regex(template);
        // Escaped literals plus fixed fragments always parse, and nothing caps the
        // compiled size, so this can only fail by exhausting memory.
        let regex = RegexBuilder::new(&expr)
            .size_limit(usize::MAX)
            .nest_limit(u32::MAX)
            .build()
            .expect("escaped template compiles without limits");
        Self {
            source: PatternSource::Template(template.to_string()),
            regex,
        }
    }

    /// Wrap a pre-built regular expression. Capture groups become parameters.
    pub fn regex(regex: Regex) -> Self {
        Self {
            source: PatternSource::Regex,
            regex,
        }
    }

    /// Compile a raw regular expression.
    pub fn try_regex(expr: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(expr).map_err(|source| PatternError::InvalidRegex {
            expr: expr.to_string(),
            source,
        })?;
        Ok(Self::regex(regex))
    }

    pub fn source(&self) -> &PatternSource {
        &self.source
    }

    /// The regex this pattern evaluates.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns true if `url` matches this pattern.
    pub fn matches(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }

    /// Ordered parameter values for `url`, or an empty list when it does not match.
    pub fn extract_params(&self, url: &str) -> Vec<String> {
        self.captures(url).unwrap_or_default()
    }

    /// Match and extract in one pass.
    pub fn captures(&self, url: &str) -> Option<Vec<String>> {
        let caps = self.regex.captures(url)?;
        Some(
            caps.iter()
                .skip(1)
                .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect(),
        )
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            PatternSource::Template(t) => write!(f, "Pattern::Template({t:?})"),
            PatternSource::Regex => write!(f, "Pattern::Regex({:?})", self.regex.as_str()),
        }
    }
}

impl From<&str> for Pattern {
    fn from(template: &str) -> Self {
        Self::template(template)
    }
}

impl From<String> for Pattern {
    fn from(template: String) -> Self {
        Self::template(&template)
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self::regex(regex)
    }
}

/// Template tokens.
#[derive(Debug, PartialEq)]
enum Token {
    Literal(char),
    Named,
    Splat,
    GroupOpen,
    GroupClose,
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn tokenize(template: &str) -> Vec<Token> {
    let chars: Vec<char> = template.chars().collect();
    let groups = balanced_groups(&chars);
    let mut tokens = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ':' | '*' if chars.get(i + 1).copied().is_some_and(is_word) => {
                i += 1;
                while chars.get(i).copied().is_some_and(is_word) {
                    i += 1;
                }
                tokens.push(if c == ':' { Token::Named } else { Token::Splat });
                continue;
            }
            '(' if groups[i] => tokens.push(Token::GroupOpen),
            ')' if groups[i] => {
                tokens.push(Token::GroupClose);
                // `(x)?` and `(x)` both mean optional
                if chars.get(i + 1) == Some(&'?') {
                    i += 1;
                }
            }
            _ => tokens.push(Token::Literal(c)),
        }
        i += 1;
    }
    tokens
}

/// Flags parentheses that belong to a balanced pair; the rest are literal.
fn balanced_groups(chars: &[char]) -> Vec<bool> {
    let mut flags = vec![false; chars.len()];
    let mut open = Vec::new();
    for (i, c) in chars.iter().enumerate() {
        match c {
            '(' => open.push(i),
            ')' => {
                if let Some(start) = open.pop() {
                    flags[start] = true;
                    flags[i] = true;
                }
            }
            _ => {}
        }
    }
    flags
}

fn template_to_regex(template: &str) -> String {
    let mut expr = String::from("^");
    let mut literal = String::new();

    for token in tokenize(template) {
        let fragment = match token {
            Token::Literal(c) => {
                literal.push(c);
                continue;
            }
            Token::Named => NAMED_PARAM,
            Token::Splat => SPLAT_PARAM,
            Token::GroupOpen => "(?:",
            Token::GroupClose => ")?",
        };
        expr.push_str(&regex::escape(&literal));
        literal.clear();
        expr.push_str(fragment);
    }
    expr.push_str(&regex::escape(&literal));
    expr.push('$');
    expr
}
