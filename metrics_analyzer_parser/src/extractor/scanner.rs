use ahash::AHashSet;
use tracing::trace;

use crate::extractor::is_non_metric_keyword;
use crate::lexer::{tokenize, LexResult, Token};

/// Distinct metric names read by an expression.
pub type MetricNames = AHashSet<String>;

/// Kind of suppressed region the scan is currently inside.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum SkipState {
    #[default]
    None,
    /// Argument list of a keyword such as `by (...)` or `topk(...)`.
    Paren,
    /// Label selector body.
    Brace,
    /// Range, offset or subquery body.
    Bracket,
}

/// Single-pass metric name scanner over one token sequence.
///
/// preconditions:
/// - `tokens` is a full sequence as returned by [`tokenize`], i.e. `tokens[i].index == i`.
struct Scanner<'t, 'a> {
    tokens: &'t [Token<'a>],
    skip: SkipState,
    /// Open parens and the call targets preceding them.
    open: Vec<&'t Token<'a>>,
    /// Colon-namespaced name being assembled.
    pending: Option<String>,
    metrics: MetricNames,
}

impl<'t, 'a> Scanner<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Self {
            tokens,
            skip: SkipState::None,
            open: Vec::new(),
            pending: None,
            metrics: MetricNames::default(),
        }
    }

    fn next_token(&self, token: &Token) -> Option<&'t Token<'a>> {
        self.tokens.get(token.index + 1)
    }

    fn scan(&mut self, token: &'t Token<'a>) {
        match self.skip {
            SkipState::None => {}
            SkipState::Paren if token.is_right_paren() => {
                self.leave_paren();
                return;
            }
            SkipState::Brace if token.is_right_brace() => {
                self.skip = SkipState::None;
                self.flush_pending();
                return;
            }
            SkipState::Bracket if token.is_right_bracket() => {
                self.skip = SkipState::None;
                self.flush_pending();
                return;
            }
            _ => return,
        }

        if token.is_left_paren() {
            self.open.push(token);
        } else if token.is_left_brace() {
            self.skip = SkipState::Brace;
        } else if token.is_left_bracket() {
            self.skip = SkipState::Bracket;
        } else if token.is_colon() {
            self.append_pending(token.text);
        } else if token.is_name() {
            self.scan_name(token);
        }
    }

    fn scan_name(&mut self, token: &'t Token<'a>) {
        let next = self.next_token(token);

        if is_non_metric_keyword(token.text) {
            if next.is_some_and(|t| t.is_left_paren()) {
                self.skip = SkipState::Paren;
            }
            return;
        }

        match next {
            None => self.flush_with(token.text),
            Some(next) if next.is_left_paren() => self.open.push(token),
            Some(next)
                if next.is_left_brace()
                    || next.is_left_bracket()
                    || next.is_operator()
                    || next.is_right_paren() =>
            {
                self.flush_with(token.text)
            }
            Some(next) if next.is_colon() => self.append_pending(token.text),
            Some(_) => {}
        }
    }

    fn leave_paren(&mut self) {
        self.skip = SkipState::None;
        if self.open.last().is_some_and(|t| t.is_left_paren()) {
            self.open.pop();
            // the call target owning that paren is not a metric either
            if self.open.last().is_some_and(|t| t.is_name()) {
                self.open.pop();
            }
        }
        self.flush_pending();
    }

    fn append_pending(&mut self, text: &str) {
        match self.pending.as_mut() {
            Some(pending) => pending.push_str(text),
            None => self.pending = Some(text.to_string()),
        }
    }

    fn flush_with(&mut self, text: &str) {
        let name = match self.pending.take() {
            Some(mut pending) => {
                pending.push_str(text);
                pending
            }
            None => text.to_string(),
        };
        trace!(metric = name.as_str(), "found metric");
        self.metrics.insert(name);
    }

    fn flush_pending(&mut self) {
        if let Some(name) = self.pending.take() {
            trace!(metric = name.as_str(), "found metric");
            self.metrics.insert(name);
        }
    }

    fn finish(self) -> MetricNames {
        trace!(
            tokens = self.tokens.len(),
            unclosed = self.open.len(),
            metrics = self.metrics.len(),
            "scan complete"
        );
        self.metrics
    }
}

/// Returns the distinct metric names referenced by a tokenized expression.
///
/// Function and aggregation names, label selector bodies (`{...}`), range and offset bodies
/// (`[...]`) and the argument lists of grouping keywords (`by (...)`, `topk(...)`, ...) never
/// contribute names. Colon-namespaced recording rule names are reassembled into one name.
pub fn extract(tokens: &[Token]) -> MetricNames {
    let mut scanner = Scanner::new(tokens);
    for token in tokens {
        scanner.scan(token);
    }
    scanner.finish()
}

/// Tokenizes `expression` and extracts its metric names.
pub fn extract_metric_names(expression: &str) -> LexResult<MetricNames> {
    let tokens = tokenize(expression)?;
    Ok(extract(&tokens))
}
