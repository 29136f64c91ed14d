use serde::{Deserialize, Serialize};

use crate::error::{LogStripError, Result};

/// Tokens and bracket alphabet that decide which lines get dropped
///
/// A line containing `target` (and not `exempt`) starts a statement to remove.
/// A line containing `warn` is removed on its own, without brace tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripRule {
    /// Call token that starts a removable statement
    pub target: String,
    /// Sibling token that keeps a line no matter what else it contains
    pub exempt: String,
    /// Sibling token whose line is always dropped as a single line
    pub warn: String,
    /// Characters that open a bracket level
    pub openers: String,
    /// Characters that close a bracket level
    pub closers: String,
}

impl Default for StripRule {
    fn default() -> Self {
        Self {
            target: "console.log(".to_string(),
            exempt: "console.error".to_string(),
            warn: "console.warn".to_string(),
            openers: "({".to_string(),
            closers: ")}".to_string(),
        }
    }
}

/// How a single line is treated while scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Starts a target statement (possibly spanning several lines)
    Statement,
    /// Warn line, dropped alone
    Warn,
    /// Copied verbatim
    Keep,
}

impl StripRule {
    /// Reject rules that would match every line or never balance
    pub fn validate(&self) -> Result<()> {
        for (name, token) in [
            ("target", &self.target),
            ("exempt", &self.exempt),
            ("warn", &self.warn),
            ("openers", &self.openers),
            ("closers", &self.closers),
        ] {
            if token.is_empty() {
                return Err(LogStripError::InvalidConfig {
                    details: format!("rule `{name}` must not be empty"),
                });
            }
        }

        if let Some(c) = self.openers.chars().find(|c| self.closers.contains(*c)) {
            return Err(LogStripError::InvalidConfig {
                details: format!("'{c}' cannot be both an opener and a closer"),
            });
        }

        Ok(())
    }

    pub fn classify(&self, line: &str) -> LineClass {
        if line.contains(&self.target) && !line.contains(&self.exempt) {
            LineClass::Statement
        } else if line.contains(&self.warn) {
            LineClass::Warn
        } else {
            LineClass::Keep
        }
    }

    /// Openers minus closers on one line.
    ///
    /// Brackets inside string literals and comments are counted too. This is a
    /// line heuristic, not a parser, and can over- or under-consume on such input.
    pub fn balance(&self, line: &str) -> i64 {
        line.chars().fold(0, |acc, c| {
            if self.openers.contains(c) {
                acc + 1
            } else if self.closers.contains(c) {
                acc - 1
            } else {
                acc
            }
        })
    }
}

/// Why a span of lines was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Statement,
    Warn,
}

/// Half-open range of line indices `[start, end)` removed as one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
    pub kind: MatchKind,
}

impl MatchSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Scanner state between lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Scanning,
    ConsumingMultiline { start: usize, balance: i64 },
}

/// Result of stripping one text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripOutcome {
    /// Rewritten text (equal to the input when nothing matched)
    pub content: String,
    /// Whether `content` differs from the input
    pub changed: bool,
    /// Dropped ranges, in source order
    pub spans: Vec<MatchSpan>,
}

impl StripOutcome {
    /// Total number of source lines dropped
    pub fn removed_lines(&self) -> usize {
        self.spans.iter().map(MatchSpan::len).sum()
    }
}

/// Drop target statements and warn lines from a sequence of lines
///
/// A multi-line statement whose brackets never close swallows every line up
/// to the end of input.
///
/// # Arguments
/// * `lines` - Source lines, without their separators
/// * `rule` - Tokens and brackets that decide what is dropped
///
/// # Returns
/// * `(kept, spans)` - Retained lines in their original order, and the
///   dropped `[start, end)` line ranges in source order
pub fn strip_lines<'a>(lines: &[&'a str], rule: &StripRule) -> (Vec<&'a str>, Vec<MatchSpan>) {
    let mut kept = Vec::with_capacity(lines.len());
    let mut spans = Vec::new();
    let mut state = ScanState::Scanning;

    for (i, line) in lines.iter().copied().enumerate() {
        state = match state {
            ScanState::Scanning => match rule.classify(line) {
                LineClass::Statement => {
                    let balance = rule.balance(line);
                    if balance > 0 {
                        ScanState::ConsumingMultiline { start: i, balance }
                    } else {
                        spans.push(MatchSpan {
                            start: i,
                            end: i + 1,
                            kind: MatchKind::Statement,
                        });
                        ScanState::Scanning
                    }
                }
                LineClass::Warn => {
                    spans.push(MatchSpan {
                        start: i,
                        end: i + 1,
                        kind: MatchKind::Warn,
                    });
                    ScanState::Scanning
                }
                LineClass::Keep => {
                    kept.push(line);
                    ScanState::Scanning
                }
            },
            ScanState::ConsumingMultiline { start, balance } => {
                let balance = balance + rule.balance(line);
                if balance > 0 {
                    ScanState::ConsumingMultiline { start, balance }
                } else {
                    spans.push(MatchSpan {
                        start,
                        end: i + 1,
                        kind: MatchKind::Statement,
                    });
                    ScanState::Scanning
                }
            }
        };
    }

    // Unterminated statement runs to end of input
    if let ScanState::ConsumingMultiline { start, .. } = state {
        spans.push(MatchSpan {
            start,
            end: lines.len(),
            kind: MatchKind::Statement,
        });
    }

    (kept, spans)
}

/// Strip a whole text, splitting and rejoining on `\n`
///
/// Carriage returns stay attached to their lines, so CRLF input comes back
/// as CRLF, and a trailing newline survives unless its line was dropped.
///
/// # Example
/// ```
/// use logstrip::{StripRule, strip};
/// let outcome = strip("foo();\nconsole.log(\"x\");\nbar();", &StripRule::default());
/// assert!(outcome.changed);
/// assert_eq!(outcome.content, "foo();\nbar();");
/// ```
pub fn strip(content: &str, rule: &StripRule) -> StripOutcome {
    let lines: Vec<&str> = content.split('\n').collect();
    let (kept, spans) = strip_lines(&lines, rule);
    let rewritten = kept.join("\n");
    let changed = rewritten != content;

    StripOutcome {
        content: rewritten,
        changed,
        spans,
    }
}
