//! 言語マップ
//!
//! `lang.map` 形式のテキスト (`python = python.lang` を1行ずつ) を解析し、
//! 言語セレクタから文法名を引けるようにします。

use indexmap::IndexMap;
use nom::bytes::complete::take_till1;
use nom::character::complete::{char, space0};
use nom::combinator::all_consuming;
use nom::sequence::{delimited, separated_pair, terminated};
use nom::IResult;
use std::fs;
use std::path::Path;

use crate::error::{HiliteResult, LangMapError};

/// 文法ファイルの拡張子
const GRAMMAR_SUFFIX: &str = ".lang";

/// セレクタから文法名への対応表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanguageMap {
    entries: IndexMap<String, String>,
}

impl LanguageMap {
    /// 空の言語マップを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 組み込み文法用の言語マップ
    pub fn builtin() -> Self {
        let mut map = Self::new();
        for selector in ["python", "Python", "py", "python3", "pyw"] {
            map.insert(selector, "python.lang");
        }
        for selector in ["c", "C", "h"] {
            map.insert(selector, "c.lang");
        }
        for selector in ["text", "txt", "plain"] {
            map.insert(selector, "text.lang");
        }
        map
    }

    /// `lang.map` 形式のテキストを解析
    pub fn parse(source: &str) -> Result<Self, LangMapError> {
        let mut map = Self::new();
        for (index, raw) in source.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (_, (selector, grammar)) = all_consuming(terminated(entry, space0))(line)
                .map_err(|_| LangMapError::MalformedEntry {
                    line: index + 1,
                    content: line.to_string(),
                })?;
            if grammar_name(grammar).is_empty() {
                return Err(LangMapError::EmptyGrammar {
                    line: index + 1,
                    selector: selector.to_string(),
                });
            }
            map.insert(selector, grammar);
        }
        Ok(map)
    }

    /// ファイルから言語マップを読み込む
    pub fn load<P: AsRef<Path>>(path: P) -> HiliteResult<Self> {
        let source = fs::read_to_string(path.as_ref())?;
        Ok(Self::parse(&source)?)
    }

    /// エントリを追加 (既存のセレクタは上書き)
    pub fn insert(&mut self, selector: impl Into<String>, grammar: &str) {
        self.entries
            .insert(selector.into(), grammar_name(grammar).to_string());
    }

    /// 別のマップのエントリを取り込む
    pub fn extend(&mut self, other: LanguageMap) {
        self.entries.extend(other.entries);
    }

    /// セレクタを文法名に解決 (完全一致、次に小文字で検索)
    pub fn resolve(&self, selector: &str) -> Option<&str> {
        self.entries
            .get(selector)
            .or_else(|| self.entries.get(&selector.to_lowercase()))
            .map(String::as_str)
    }

    /// 登録済みのセレクタと文法名
    pub fn selectors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn grammar_name(grammar: &str) -> &str {
    grammar.strip_suffix(GRAMMAR_SUFFIX).unwrap_or(grammar)
}

/// `selector = grammar`
fn entry(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(
        take_till1(|c: char| c == '=' || c.is_whitespace()),
        delimited(space0, char('='), space0),
        take_till1(|c: char| c.is_whitespace()),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_entries() {
        let map = LanguageMap::parse("# generated\npy = python.lang\n\nc=c.lang\n").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.resolve("py"), Some("python"));
        assert_eq!(map.resolve("c"), Some("c"));
    }

    #[test]
    fn test_parse_keeps_last_duplicate() {
        let map = LanguageMap::parse("py = python.lang\npy = text.lang").unwrap();
        assert_eq!(map.resolve("py"), Some("text"));
    }

    #[test]
    fn test_parse_malformed_line() {
        let err = LanguageMap::parse("py = python.lang\nbroken line here").unwrap_err();
        assert_eq!(
            err,
            LangMapError::MalformedEntry {
                line: 2,
                content: "broken line here".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_empty_grammar() {
        let err = LanguageMap::parse("py = .lang").unwrap_err();
        assert!(matches!(err, LangMapError::EmptyGrammar { line: 1, .. }));
    }

    #[test]
    fn test_resolve_falls_back_to_lowercase() {
        let map = LanguageMap::parse("python = python.lang").unwrap();
        assert_eq!(map.resolve("PYTHON"), Some("python"));
        assert_eq!(map.resolve("ruby"), None);
    }

    #[test]
    fn test_builtin_selectors() {
        let map = LanguageMap::builtin();
        assert_eq!(map.resolve("py"), Some("python"));
        assert_eq!(map.resolve("h"), Some("c"));
        assert_eq!(map.resolve("txt"), Some("text"));
    }
}
