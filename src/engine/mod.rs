//! スキャナエンジンとの境界
//!
//! スキャナエンジンは言語セレクタを [`ScanSession`] に解決し、渡された各行の
//! 区間を分類します。分類結果は [`FormatterManager`] からカテゴリ名で引いた
//! [`Formatter`] に報告され、登録のないカテゴリは既定のフォーマッタに渡ります。
//! すべて [`ScanSession::scan_line`] の中で同期的に行われます。

pub mod builtin;
pub mod grammar;
pub mod lang_map;

use indexmap::IndexMap;

use crate::error::HiliteResult;

pub use builtin::{BuiltinEngine, BUILTIN_CONTEXT};
pub use grammar::Grammar;
pub use lang_map::LanguageMap;

/// エンジンが区間に付けられる位置情報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatterParams {
    /// 行内での区間のバイト位置
    pub start: usize,
}

/// スキャンセッションから分類済みの区間を受け取る
///
/// 実装はパニックしてはならない。行の途中で失敗したコールバックから
/// エンジンは回復できない。
pub trait Formatter {
    fn format(&self, text: &str, params: Option<&FormatterParams>);
}

/// [`ScanSession::scan_line`] に渡すカテゴリ名からフォーマッタへの登録表
pub struct FormatterManager<'a> {
    formatters: IndexMap<String, Box<dyn Formatter + 'a>>,
    default: Box<dyn Formatter + 'a>,
}

impl<'a> FormatterManager<'a> {
    pub fn new(default: Box<dyn Formatter + 'a>) -> Self {
        Self {
            formatters: IndexMap::new(),
            default,
        }
    }

    /// `category` に `formatter` を登録する
    ///
    /// 同じ名前は最初の登録が残り、以降の登録は無視して `false` を返す。
    pub fn add_formatter(
        &mut self,
        category: impl Into<String>,
        formatter: Box<dyn Formatter + 'a>,
    ) -> bool {
        let category = category.into();
        if self.formatters.contains_key(&category) {
            log::debug!("formatter for '{}' already registered", category);
            return false;
        }
        self.formatters.insert(category, formatter);
        true
    }

    pub fn has_formatter(&self, category: &str) -> bool {
        self.formatters.contains_key(category)
    }

    /// `category` のフォーマッタ (なければ既定のもの)
    pub fn get(&self, category: &str) -> &(dyn Formatter + 'a) {
        match self.formatters.get(category) {
            Some(formatter) => &**formatter,
            None => &*self.default,
        }
    }

    /// 分類済みの区間を `category` のフォーマッタに渡す
    pub fn format(&self, category: &str, text: &str, params: Option<&FormatterParams>) {
        self.get(category).format(text, params);
    }

    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }
}

/// 言語ごとのスキャン状態
pub trait ScanSession {
    /// セッションを開いた文法の名前
    fn grammar(&self) -> &str;

    /// `line` (行末を除く) のすべての区間を左から順に分類し、
    /// 行全体を報告し終えてから戻る
    fn scan_line(&mut self, line: &str, formatters: &FormatterManager<'_>);
}

/// 言語をスキャンセッションに解決する
pub trait ScanEngine {
    /// `search_context` 内の `selector` に対する新しいセッションを開く
    ///
    /// セレクタが見つからなければ
    /// [`HiliteError::LanguageNotFound`](crate::HiliteError::LanguageNotFound) を返す。
    fn open(&self, selector: &str, search_context: &str) -> HiliteResult<Box<dyn ScanSession>>;
}

impl<E: ScanEngine + ?Sized> ScanEngine for &E {
    fn open(&self, selector: &str, search_context: &str) -> HiliteResult<Box<dyn ScanSession>> {
        (**self).open(selector, search_context)
    }
}
