//! 組み込み文法
//!
//! 各文法はlogosのトークン列挙型で、1行ずつ分類します。行をまたぐ可能性のある
//! 構文 (ブロックコメント、三重引用符の文字列) は開始区切りだけを認識し、
//! 終了区切りの探索はセッションが行います。

mod c;
mod python;

use std::ops::Range;

use crate::category::NORMAL;

/// 組み込みエンジンが扱える文法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    Python,
    C,
    Text,
}

impl Grammar {
    pub const ALL: [Grammar; 3] = [Grammar::Python, Grammar::C, Grammar::Text];

    /// 言語マップが解決した名前から文法を取得
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "python" => Some(Grammar::Python),
            "c" => Some(Grammar::C),
            "text" => Some(Grammar::Text),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Grammar::Python => "python",
            Grammar::C => "c",
            Grammar::Text => "text",
        }
    }

    /// 行のバイト位置 `offset` から始まる `text` を、末尾または
    /// 複数行構文の開始まで分類する
    pub(crate) fn lex(self, text: &str, offset: usize, out: &mut dyn SpanSink) -> Step {
        match self {
            Grammar::Python => python::lex(text, offset, out),
            Grammar::C => c::lex(text, offset, out),
            Grammar::Text => {
                out.span(NORMAL, offset..offset + text.len());
                Step::Done
            }
        }
    }
}

/// 文法から `(カテゴリ, 行内のバイト範囲)` を受け取る
pub(crate) trait SpanSink {
    fn span(&mut self, category: &'static str, range: Range<usize>);
}

/// [`Grammar::lex`] がどこまで進んだか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Done,
    /// 行のバイト位置 `start` で複数行構文が始まった
    Open { construct: Construct, start: usize },
}

/// 次の行以降に続きうる構文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Construct {
    BlockComment,
    /// 値として使われる三重引用符の文字列
    TripleDouble,
    TripleSingle,
    /// 文の先頭に置かれた三重引用符の文字列 (docstring)
    DocDouble,
    DocSingle,
}

impl Construct {
    pub(crate) fn opener(self) -> &'static str {
        match self {
            Construct::BlockComment => "/*",
            Construct::TripleDouble | Construct::DocDouble => "\"\"\"",
            Construct::TripleSingle | Construct::DocSingle => "'''",
        }
    }

    pub(crate) fn closer(self) -> &'static str {
        match self {
            Construct::BlockComment => "*/",
            Construct::TripleDouble | Construct::DocDouble => "\"\"\"",
            Construct::TripleSingle | Construct::DocSingle => "'''",
        }
    }

    pub(crate) fn category(self) -> &'static str {
        match self {
            Construct::BlockComment => "comment",
            Construct::TripleDouble | Construct::TripleSingle => "string",
            Construct::DocDouble | Construct::DocSingle => "Token_Literal_String_Doc",
        }
    }
}

/// logosのレキサーを回し、各トークンを `classify` でカテゴリに変換する
///
/// 複数行構文を開くトークンには `classify` が `Err(construct)` を返す。
/// どのトークンにも一致しない入力は通常テキストとして報告する。
pub(crate) fn drive<'s, T>(
    mut lexer: logos::Lexer<'s, T>,
    offset: usize,
    out: &mut dyn SpanSink,
    mut classify: impl FnMut(T) -> Result<&'static str, Construct>,
) -> Step
where
    T: logos::Logos<'s, Source = str>,
{
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let range = offset + span.start..offset + span.end;
        match result.map(&mut classify) {
            Ok(Ok(category)) => out.span(category, range),
            Ok(Err(construct)) => {
                return Step::Open {
                    construct,
                    start: range.start,
                }
            }
            Err(_) => out.span(NORMAL, range),
        }
    }
    Step::Done
}
