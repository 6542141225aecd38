//! トークンペアと、コレクタが返す順序付きストリーム

use serde::Serialize;
use std::fmt;
use std::ops::Range;

use crate::category;

/// 分類済みの1区間: 公開トークン型とその範囲のテキスト
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TokenPair {
    pub token_type: String,
    pub text: String,
}

impl TokenPair {
    pub fn new(token_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            token_type: token_type.into(),
            text: text.into(),
        }
    }
}

impl From<TokenPair> for (String, String) {
    fn from(pair: TokenPair) -> Self {
        (pair.token_type, pair.text)
    }
}

impl<T: Into<String>, U: Into<String>> From<(T, U)> for TokenPair {
    fn from((token_type, text): (T, U)) -> Self {
        Self::new(token_type, text)
    }
}

impl fmt::Display for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{:?}", self.token_type, self.text)
    }
}

/// ソース順のトークンペアと、元の行の境界
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenStream {
    pairs: Vec<TokenPair>,
    /// 各行の最後のペアの次のインデックス
    line_ends: Vec<usize>,
}

impl TokenStream {
    pub(crate) fn new(pairs: Vec<TokenPair>, line_ends: Vec<usize>) -> Self {
        debug_assert!(line_ends.windows(2).all(|w| w[0] <= w[1]));
        debug_assert!(line_ends.last().map_or(true, |&end| end == pairs.len()));
        Self { pairs, line_ends }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TokenPair> {
        self.pairs.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TokenPair> {
        self.pairs.iter()
    }

    pub fn as_slice(&self) -> &[TokenPair] {
        &self.pairs
    }

    pub fn into_vec(self) -> Vec<TokenPair> {
        self.pairs
    }

    /// `(token_type, text)` のタプル列
    pub fn to_tuples(&self) -> Vec<(String, String)> {
        self.pairs.iter().cloned().map(Into::into).collect()
    }

    /// 全ペアのテキストを連結したもの
    pub fn reconstruct(&self) -> String {
        self.pairs.iter().map(|pair| pair.text.as_str()).collect()
    }

    /// スキャンした行数
    pub fn line_count(&self) -> usize {
        self.line_ends.len()
    }

    /// 行ごとのペア (何も生成しなかった行は空スライス)
    pub fn lines(&self) -> impl Iterator<Item = &[TokenPair]> + '_ {
        self.line_ranges().map(move |range| &self.pairs[range])
    }

    /// `index` 行目 (0始まり) のペア
    pub fn line(&self, index: usize) -> Option<&[TokenPair]> {
        self.line_ranges().nth(index).map(|range| &self.pairs[range])
    }

    /// 型が `ancestor` またはその下位型であるペア
    pub fn of_type<'s>(&'s self, ancestor: &'s str) -> impl Iterator<Item = &'s TokenPair> + 's {
        self.pairs
            .iter()
            .filter(move |pair| category::is_subtype(&pair.token_type, ancestor))
    }

    fn line_ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        let starts = std::iter::once(0).chain(self.line_ends.iter().copied());
        starts.zip(self.line_ends.iter().copied()).map(|(s, e)| s..e)
    }
}

impl IntoIterator for TokenStream {
    type Item = TokenPair;
    type IntoIter = std::vec::IntoIter<TokenPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a TokenPair;
    type IntoIter = std::slice::Iter<'a, TokenPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> TokenStream {
        TokenStream::new(
            vec![
                TokenPair::new("Keyword", "if"),
                TokenPair::new("Text", " x\n"),
                TokenPair::new("Text", "\n"),
                TokenPair::new("Literal.String", "'s'"),
            ],
            vec![2, 3, 4],
        )
    }

    #[test]
    fn test_reconstruct() {
        assert_eq!(sample().reconstruct(), "if x\n\n's'");
    }

    #[test]
    fn test_lines() {
        let stream = sample();
        let lines: Vec<_> = stream.lines().map(|l| l.len()).collect();
        assert_eq!(lines, vec![2, 1, 1]);
        assert_eq!(stream.line_count(), 3);
        assert_eq!(stream.line(2), Some(&stream.as_slice()[3..]));
        assert_eq!(stream.line(3), None);
    }

    #[test]
    fn test_empty_line_slice() {
        let stream = TokenStream::new(vec![TokenPair::new("Text", "a\n")], vec![1, 1]);
        let lines: Vec<_> = stream.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].is_empty());
    }

    #[test]
    fn test_of_type() {
        let stream = sample();
        let literals: Vec<_> = stream.of_type("Literal").map(|p| p.text.as_str()).collect();
        assert_eq!(literals, vec!["'s'"]);
    }

    #[test]
    fn test_tuples() {
        let stream = TokenStream::new(vec![("Keyword", "if").into()], vec![1]);
        assert_eq!(
            stream.to_tuples(),
            vec![("Keyword".to_string(), "if".to_string())]
        );
    }
}
