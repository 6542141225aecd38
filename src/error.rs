//! 統一的なエラーハンドリングモジュール
//!
//! トークン収集で使用されるエラー型を提供します。
//! 言語解決とエンジン初期化の失敗は呼び出し元に返され、
//! スパン単位の失敗 (`SpanFault`) はログに記録されるだけです。

use thiserror::Error;

/// hiliteの統一エラー型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HiliteError {
    /// 言語セレクタが既知の文法に解決できない
    #[error("language '{selector}' not found in search context '{search_context}'")]
    LanguageNotFound {
        selector: String,
        search_context: String,
    },

    /// スキャンエンジンの初期化エラー
    #[error("failed to initialize scanner for grammar '{grammar}': {message}")]
    EngineInit { grammar: String, message: String },

    /// 言語マップの構文エラー
    #[error("invalid language map")]
    LangMap(#[from] LangMapError),

    /// ファイルI/Oエラー
    #[error("file error: {0}")]
    Io(String),

    /// その他のエラー
    #[error("{0}")]
    Other(String),
}

/// 言語マップの解析エラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LangMapError {
    #[error("line {line}: expected 'name = grammar', found '{content}'")]
    MalformedEntry { line: usize, content: String },

    #[error("line {line}: empty grammar name for '{selector}'")]
    EmptyGrammar { line: usize, selector: String },
}

/// 1つのスパンを追加できなかった理由。スキャンは中断されない
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpanFault {
    #[error("could not reserve space for a '{token_type}' span of {len} bytes")]
    Allocation { token_type: String, len: usize },

    #[error("token sequence already borrowed while appending a '{token_type}' span")]
    Reentrant { token_type: String },
}

/// Result型のエイリアス
pub type HiliteResult<T> = Result<T, HiliteError>;

impl From<std::io::Error> for HiliteError {
    fn from(e: std::io::Error) -> Self {
        HiliteError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_not_found_message() {
        let err = HiliteError::LanguageNotFound {
            selector: "cobol".to_string(),
            search_context: "builtin".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "language 'cobol' not found in search context 'builtin'"
        );
    }

    #[test]
    fn test_lang_map_error_converts() {
        let err: HiliteError = LangMapError::MalformedEntry {
            line: 3,
            content: "py python.lang".to_string(),
        }
        .into();
        assert!(matches!(
            err,
            HiliteError::LangMap(LangMapError::MalformedEntry { line: 3, .. })
        ));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: HiliteError = io.into();
        assert_eq!(err, HiliteError::Io("missing".to_string()));
    }
}
