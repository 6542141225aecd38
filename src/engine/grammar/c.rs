//! C言語の文法

use logos::Logos;

use super::{drive, Construct, SpanSink, Step};

#[derive(Logos, Debug, PartialEq, Clone, Copy)]
enum CToken {
    #[regex(r"[ \t\f\r]+")]
    Whitespace,

    #[token("auto")]
    #[token("break")]
    #[token("case")]
    #[token("const")]
    #[token("continue")]
    #[token("default")]
    #[token("do")]
    #[token("else")]
    #[token("enum")]
    #[token("extern")]
    #[token("for")]
    #[token("goto")]
    #[token("if")]
    #[token("inline")]
    #[token("register")]
    #[token("restrict")]
    #[token("return")]
    #[token("sizeof")]
    #[token("static")]
    #[token("struct")]
    #[token("switch")]
    #[token("typedef")]
    #[token("union")]
    #[token("volatile")]
    #[token("while")]
    Keyword,

    #[token("void")]
    #[token("char")]
    #[token("short")]
    #[token("int")]
    #[token("long")]
    #[token("float")]
    #[token("double")]
    #[token("signed")]
    #[token("unsigned")]
    #[token("_Bool")]
    #[token("bool")]
    #[token("size_t")]
    Type,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", priority = 1)]
    Identifier,

    #[regex(r"#[ \t]*[A-Za-z_]+")]
    Preproc,

    // 拡張子は問わない
    #[regex(r"<[A-Za-z0-9_./]+>")]
    Header,

    #[regex(r"(0[xX][0-9a-fA-F]+|[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?)[uUlLfF]*")]
    Number,

    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    #[regex(r"'([^'\\]|\\.)'")]
    Char,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*")]
    BlockComment,

    #[regex(r"[{}]")]
    Brace,

    #[regex(r"[-+*/%=<>!&|^~?:;,.()\[\]]")]
    Symbol,
}

pub(super) fn lex(text: &str, offset: usize, out: &mut dyn SpanSink) -> Step {
    drive(CToken::lexer(text), offset, out, |token| {
        Ok(match token {
            CToken::Whitespace | CToken::Identifier => "normal",
            CToken::Keyword => "keyword",
            CToken::Type => "type",
            CToken::Preproc => "preproc",
            CToken::Header | CToken::String => "string",
            CToken::Char => "Token_Literal_String_Char",
            CToken::Number => "number",
            CToken::LineComment => "comment",
            CToken::Brace => "cbracket",
            CToken::Symbol => "symbol",
            CToken::BlockComment => return Err(Construct::BlockComment),
        })
    })
}
