//! 組み込みスキャナエンジン
//!
//! 名前付きの検索コンテキストごとに言語マップを持ち、セレクタを
//! [`Grammar`] に解決してセッションを開きます。

use indexmap::IndexMap;
use std::ops::Range;

use super::grammar::{Construct, Grammar, SpanSink, Step};
use super::{FormatterManager, FormatterParams, LanguageMap, ScanEngine, ScanSession};
use crate::category::NORMAL;
use crate::error::{HiliteError, HiliteResult};

/// 組み込み言語マップの検索コンテキスト名 (空文字列も同じ扱い)
pub const BUILTIN_CONTEXT: &str = "builtin";

/// logosベースの文法を使うスキャナエンジン
#[derive(Debug, Clone)]
pub struct BuiltinEngine {
    contexts: IndexMap<String, LanguageMap>,
}

impl Default for BuiltinEngine {
    fn default() -> Self {
        let mut contexts = IndexMap::new();
        contexts.insert(BUILTIN_CONTEXT.to_string(), LanguageMap::builtin());
        Self { contexts }
    }
}

impl BuiltinEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// 検索コンテキストを追加したエンジンを返す
    pub fn with_context(mut self, name: impl Into<String>, map: LanguageMap) -> Self {
        self.add_context(name, map);
        self
    }

    /// 検索コンテキストを追加 (同名のものは置き換え)
    pub fn add_context(&mut self, name: impl Into<String>, map: LanguageMap) {
        let mut name = name.into();
        if name.is_empty() {
            name = BUILTIN_CONTEXT.to_string();
        }
        self.contexts.insert(name, map);
    }

    /// 検索コンテキストの言語マップを取得
    pub fn context(&self, name: &str) -> Option<&LanguageMap> {
        let name = if name.is_empty() { BUILTIN_CONTEXT } else { name };
        self.contexts.get(name)
    }

    /// 検索コンテキスト名の一覧
    pub fn contexts(&self) -> impl Iterator<Item = &str> {
        self.contexts.keys().map(String::as_str)
    }
}

impl ScanEngine for BuiltinEngine {
    fn open(&self, selector: &str, search_context: &str) -> HiliteResult<Box<dyn ScanSession>> {
        let not_found = || HiliteError::LanguageNotFound {
            selector: selector.to_string(),
            search_context: search_context.to_string(),
        };
        let map = self.context(search_context).ok_or_else(not_found)?;
        let name = map.resolve(selector).ok_or_else(not_found)?;
        let grammar = Grammar::from_name(name).ok_or_else(|| HiliteError::EngineInit {
            grammar: name.to_string(),
            message: "no grammar definition available".to_string(),
        })?;

        log::debug!(
            "resolved '{}' in context '{}' to grammar '{}'",
            selector,
            search_context,
            grammar.name()
        );
        Ok(Box::new(BuiltinSession::new(grammar)))
    }
}

/// 1つの入力に対するスキャン状態
#[derive(Debug)]
pub struct BuiltinSession {
    grammar: Grammar,
    /// 前の行から続いている構文
    open: Option<Construct>,
}

impl BuiltinSession {
    pub fn new(grammar: Grammar) -> Self {
        Self {
            grammar,
            open: None,
        }
    }
}

impl ScanSession for BuiltinSession {
    fn grammar(&self) -> &str {
        self.grammar.name()
    }

    fn scan_line(&mut self, line: &str, formatters: &FormatterManager<'_>) {
        let mut writer = SpanWriter::new(line, formatters);
        let mut pos = 0;
        // 開始区切りの長さ (前の行からの継続なら0)
        let mut skip = 0;

        loop {
            if let Some(construct) = self.open {
                let search_from = pos + skip;
                let end = match line[search_from..].find(construct.closer()) {
                    Some(found) => {
                        self.open = None;
                        search_from + found + construct.closer().len()
                    }
                    None => line.len(),
                };
                writer.span(construct.category(), pos..end);
                pos = end;
            }
            if pos >= line.len() {
                break;
            }
            match self.grammar.lex(&line[pos..], pos, &mut writer) {
                Step::Done => break,
                Step::Open { construct, start } => {
                    self.open = Some(construct);
                    pos = start;
                    skip = construct.opener().len();
                }
            }
        }

        writer.flush();
    }
}

/// 隣接する通常テキストをまとめてからフォーマッタに渡す
struct SpanWriter<'s, 'a> {
    line: &'s str,
    formatters: &'s FormatterManager<'a>,
    pending: Option<Range<usize>>,
}

impl<'s, 'a> SpanWriter<'s, 'a> {
    fn new(line: &'s str, formatters: &'s FormatterManager<'a>) -> Self {
        Self {
            line,
            formatters,
            pending: None,
        }
    }

    fn emit(&self, category: &str, range: Range<usize>) {
        let params = FormatterParams { start: range.start };
        log::trace!("{} {:?}", category, range);
        self.formatters
            .format(category, &self.line[range], Some(&params));
    }

    fn flush(&mut self) {
        if let Some(range) = self.pending.take() {
            self.emit(NORMAL, range);
        }
    }
}

impl SpanSink for SpanWriter<'_, '_> {
    fn span(&mut self, category: &'static str, range: Range<usize>) {
        if category == NORMAL {
            self.pending = match self.pending.take() {
                Some(pending) if pending.end == range.start => Some(pending.start..range.end),
                Some(pending) => {
                    self.emit(NORMAL, pending);
                    Some(range)
                }
                None => Some(range),
            };
        } else {
            self.flush();
            self.emit(category, range);
        }
    }
}
