//! トークンコレクタ
//!
//! [`ScanSession`](crate::engine::ScanSession) に入力を1行ずつ渡し、報告された
//! 区間を [`TokenStream`] にまとめます。カテゴリテーブルのエントリごとに
//! [`TokenFormatter`] を1つ登録し、すべてが `collect` 呼び出しの持つ同じ列に
//! 追加します。

use std::cell::RefCell;

use crate::category::{self, DEFAULT_TOKEN_TYPE, NORMAL};
use crate::engine::{BuiltinEngine, Formatter, FormatterManager, FormatterParams, ScanEngine};
use crate::error::{HiliteResult, SpanFault};
use crate::stream::{TokenPair, TokenStream};

/// ペアを生成しなかった行の扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlankLinePolicy {
    /// 行末だけを持つ通常テキストのペアを追加
    #[default]
    Carrier,
    /// 何も追加しない (改行は出力に現れない)
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorOptions {
    /// カテゴリテーブルにないカテゴリの型
    pub default_token_type: String,
    pub blank_lines: BlankLinePolicy,
    /// 改行で終わる行の最後のペアに追加する文字
    pub terminator: char,
}

impl Default for CollectorOptions {
    fn default() -> Self {
        Self {
            default_token_type: DEFAULT_TOKEN_TYPE.to_string(),
            blank_lines: BlankLinePolicy::default(),
            terminator: '\n',
        }
    }
}

/// 1つのカテゴリの区間を共有の列に追加する
struct TokenFormatter<'a> {
    token_type: &'a str,
    tokens: &'a RefCell<Vec<TokenPair>>,
}

impl<'a> TokenFormatter<'a> {
    fn new(token_type: &'a str, tokens: &'a RefCell<Vec<TokenPair>>) -> Self {
        Self { token_type, tokens }
    }

    fn append(&self, text: &str) -> Result<(), SpanFault> {
        let mut tokens = self
            .tokens
            .try_borrow_mut()
            .map_err(|_| SpanFault::Reentrant {
                token_type: self.token_type.to_string(),
            })?;
        tokens.try_reserve(1).map_err(|_| SpanFault::Allocation {
            token_type: self.token_type.to_string(),
            len: text.len(),
        })?;
        tokens.push(TokenPair::new(self.token_type, text));
        Ok(())
    }
}

impl Formatter for TokenFormatter<'_> {
    fn format(&self, text: &str, params: Option<&FormatterParams>) {
        if text.is_empty() {
            return;
        }
        if let Err(fault) = self.append(text) {
            match params {
                Some(params) => log::warn!("dropping span at column {}: {}", params.start, fault),
                None => log::warn!("dropping span: {}", fault),
            }
        }
    }
}

/// 行末を除いた入力の1行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SourceLine<'a> {
    text: &'a str,
    terminated: bool,
}

/// `\n` で分割する (直前の `\r` も改行の一部とみなす)
fn split_lines(code: &str) -> impl Iterator<Item = SourceLine<'_>> {
    code.split_inclusive('\n')
        .map(|chunk| match chunk.strip_suffix('\n') {
            Some(body) => SourceLine {
                text: body.strip_suffix('\r').unwrap_or(body),
                terminated: true,
            },
            None => SourceLine {
                text: chunk,
                terminated: false,
            },
        })
}

/// スキャナエンジンからトークンペアを集める
#[derive(Debug, Clone, Default)]
pub struct TokenCollector<E> {
    engine: E,
    options: CollectorOptions,
}

impl<E: ScanEngine> TokenCollector<E> {
    pub fn new(engine: E) -> Self {
        Self::with_options(engine, CollectorOptions::default())
    }

    pub fn with_options(engine: E, options: CollectorOptions) -> Self {
        Self { engine, options }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn options(&self) -> &CollectorOptions {
        &self.options
    }

    /// `search_context` 内の `selector` として `code` をスキャンする
    ///
    /// 失敗するのはエンジンがセッションを開けない場合だけで、
    /// スキャンが始まればすべての行を処理する。
    pub fn collect(
        &self,
        code: &str,
        selector: &str,
        search_context: &str,
    ) -> HiliteResult<TokenStream> {
        category::ensure_populated();

        let tokens = RefCell::new(Vec::new());
        let mut session = self.engine.open(selector, search_context)?;

        let mut formatters = FormatterManager::new(Box::new(TokenFormatter::new(
            &self.options.default_token_type,
            &tokens,
        )));
        for (internal, public) in category::entries() {
            formatters.add_formatter(internal, Box::new(TokenFormatter::new(public, &tokens)));
        }
        let carrier_type =
            category::lookup(NORMAL).unwrap_or(self.options.default_token_type.as_str());

        let mut line_ends = Vec::new();
        for line in split_lines(code) {
            let before = tokens.borrow().len();
            session.scan_line(line.text, &formatters);
            if line.terminated {
                self.terminate_line(&mut tokens.borrow_mut(), before, carrier_type);
            }
            line_ends.push(tokens.borrow().len());
        }
        drop(formatters);

        let tokens = tokens.into_inner();
        log::debug!(
            "collected {} tokens from {} lines of {} ({})",
            tokens.len(),
            line_ends.len(),
            selector,
            session.grammar()
        );
        Ok(TokenStream::new(tokens, line_ends))
    }

    fn terminate_line(&self, tokens: &mut Vec<TokenPair>, before: usize, carrier_type: &str) {
        let terminator = self.options.terminator;
        if tokens.len() > before {
            if let Some(last) = tokens.last_mut() {
                last.text.push(terminator);
            }
            return;
        }
        match self.options.blank_lines {
            BlankLinePolicy::Carrier => {
                tokens.push(TokenPair::new(carrier_type, terminator.to_string()))
            }
            BlankLinePolicy::Skip => log::trace!("no tokens on line, terminator skipped"),
        }
    }
}

/// 組み込みエンジンと既定の設定で `code` をスキャンする
pub fn scan_to_tokens(
    code: &str,
    selector: &str,
    search_context: &str,
) -> HiliteResult<TokenStream> {
    TokenCollector::new(BuiltinEngine::default()).collect(code, selector, search_context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(code: &str) -> Vec<(&str, bool)> {
        split_lines(code).map(|l| (l.text, l.terminated)).collect()
    }

    #[test]
    fn test_split_lines() {
        assert!(lines("").is_empty());
        assert_eq!(lines("a"), vec![("a", false)]);
        assert_eq!(lines("a\n"), vec![("a", true)]);
        assert_eq!(lines("a\r\n\nb"), vec![("a", true), ("", true), ("b", false)]);
    }

    #[test]
    fn test_formatter_ignores_empty_text() {
        let tokens = RefCell::new(Vec::new());
        let formatter = TokenFormatter::new("Keyword", &tokens);
        formatter.format("", None);
        formatter.format("if", None);
        assert_eq!(tokens.into_inner(), vec![TokenPair::new("Keyword", "if")]);
    }

    #[test]
    fn test_formatter_drops_span_when_sequence_is_borrowed() {
        let tokens = RefCell::new(Vec::new());
        let formatter = TokenFormatter::new("Keyword", &tokens);
        {
            let _held = tokens.borrow();
            formatter.format("if", Some(&FormatterParams { start: 0 }));
        }
        formatter.format("else", None);
        assert_eq!(tokens.into_inner(), vec![TokenPair::new("Keyword", "else")]);
    }

    #[test]
    fn test_append_reports_reentrant_fault() {
        let tokens = RefCell::new(Vec::new());
        let formatter = TokenFormatter::new("Comment", &tokens);
        let _held = tokens.borrow_mut();
        assert_eq!(
            formatter.append("# x"),
            Err(SpanFault::Reentrant {
                token_type: "Comment".to_string(),
            })
        );
    }

    #[test]
    fn test_terminate_line_appends_to_last_pair() {
        let collector = TokenCollector::new(BuiltinEngine::default());
        let mut tokens = vec![TokenPair::new("Keyword", "if")];
        collector.terminate_line(&mut tokens, 0, "Text");
        assert_eq!(tokens, vec![TokenPair::new("Keyword", "if\n")]);
    }

    #[test]
    fn test_terminate_line_policies() {
        let carrier = TokenCollector::new(BuiltinEngine::default());
        let mut tokens = vec![TokenPair::new("Keyword", "if\n")];
        carrier.terminate_line(&mut tokens, 1, "Text");
        assert_eq!(tokens[1], TokenPair::new("Text", "\n"));

        let skip = TokenCollector::with_options(
            BuiltinEngine::default(),
            CollectorOptions {
                blank_lines: BlankLinePolicy::Skip,
                ..CollectorOptions::default()
            },
        );
        let mut tokens = vec![TokenPair::new("Keyword", "if\n")];
        skip.terminate_line(&mut tokens, 1, "Text");
        assert_eq!(tokens.len(), 1);
    }
}
