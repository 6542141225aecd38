//! エンジン境界テスト
//!
//! テスト用のエンジンを使い、カテゴリ名の正規化、既定型へのフォールバック、
//! 空スパンの除外、初期化エラーの伝播を確認する。

#[cfg(test)]
mod tests {
    use hilite::engine::{FormatterManager, FormatterParams, ScanEngine, ScanSession};
    use hilite::{
        CollectorOptions, HiliteError, HiliteResult, TokenCollector, TokenPair,
    };
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    /// 各行を `category=text` の `;` 区切りリストとして報告するエンジン
    struct ScriptedEngine {
        opened: Cell<usize>,
    }

    impl ScriptedEngine {
        fn new() -> Self {
            Self {
                opened: Cell::new(0),
            }
        }
    }

    struct ScriptedSession;

    impl ScanSession for ScriptedSession {
        fn grammar(&self) -> &str {
            "scripted"
        }

        fn scan_line(&mut self, line: &str, formatters: &FormatterManager<'_>) {
            let mut start = 0;
            for item in line.split(';') {
                if let Some((category, text)) = item.split_once('=') {
                    formatters.format(category, text, Some(&FormatterParams { start }));
                }
                start += item.len() + 1;
            }
        }
    }

    impl ScanEngine for ScriptedEngine {
        fn open(&self, selector: &str, search_context: &str) -> HiliteResult<Box<dyn ScanSession>> {
            self.opened.set(self.opened.get() + 1);
            match selector {
                "scripted" => Ok(Box::new(ScriptedSession)),
                "broken" => Err(HiliteError::EngineInit {
                    grammar: "broken".to_string(),
                    message: "regex failed to compile".to_string(),
                }),
                _ => Err(HiliteError::LanguageNotFound {
                    selector: selector.to_string(),
                    search_context: search_context.to_string(),
                }),
            }
        }
    }

    fn collect(code: &str) -> Vec<TokenPair> {
        TokenCollector::new(ScriptedEngine::new())
            .collect(code, "scripted", "test")
            .unwrap()
            .into_vec()
    }

    #[test]
    fn test_duplicate_spellings_share_public_type() {
        assert_eq!(
            collect("const=A;constant=B\n"),
            vec![
                TokenPair::new("Name.Constant", "A"),
                TokenPair::new("Name.Constant", "B\n"),
            ]
        );
    }

    #[test]
    fn test_internal_names_never_leak() {
        let tokens = collect("keyword=if;Token_Literal_String=\"s\";string='t'\n");
        let types: Vec<_> = tokens.iter().map(|p| p.token_type.as_str()).collect();
        assert_eq!(types, vec!["Keyword", "Literal.String", "Literal.String"]);
    }

    #[test]
    fn test_unknown_category_uses_default_type() {
        assert_eq!(
            collect("mystery=x\n"),
            vec![TokenPair::new("Other", "x\n")]
        );
    }

    #[test]
    fn test_configured_default_type() {
        let options = CollectorOptions {
            default_token_type: "Unknown".to_string(),
            ..CollectorOptions::default()
        };
        let tokens = TokenCollector::with_options(ScriptedEngine::new(), options)
            .collect("mystery=x;keyword=y", "scripted", "test")
            .unwrap()
            .into_vec();
        assert_eq!(
            tokens,
            vec![TokenPair::new("Unknown", "x"), TokenPair::new("Keyword", "y")]
        );
    }

    #[test]
    fn test_empty_spans_are_dropped() {
        assert_eq!(
            collect("keyword=;comment=# c;symbol=\n"),
            vec![TokenPair::new("Comment", "# c\n")]
        );
    }

    #[test]
    fn test_line_of_empty_spans_gets_carrier() {
        assert_eq!(
            collect("keyword=\nkeyword=if\n"),
            vec![TokenPair::new("Text", "\n"), TokenPair::new("Keyword", "if\n")]
        );
    }

    #[test]
    fn test_language_not_found_is_propagated() {
        let collector = TokenCollector::new(ScriptedEngine::new());
        let err = collector.collect("keyword=if\n", "ruby", "test").unwrap_err();
        assert_eq!(
            err,
            HiliteError::LanguageNotFound {
                selector: "ruby".to_string(),
                search_context: "test".to_string(),
            }
        );
    }

    #[test]
    fn test_engine_init_error_is_propagated() {
        let collector = TokenCollector::new(ScriptedEngine::new());
        let result = collector.collect("keyword=if\n", "broken", "test");
        assert!(matches!(result, Err(HiliteError::EngineInit { .. })));
    }

    #[test]
    fn test_session_per_invocation() {
        let engine = ScriptedEngine::new();
        let collector = TokenCollector::new(&engine);
        collector.collect("keyword=if\n", "scripted", "test").unwrap();
        collector.collect("", "scripted", "test").unwrap();
        assert_eq!(engine.opened.get(), 2);
    }
}
