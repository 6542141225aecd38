//! Pythonの文法

use logos::Logos;

use super::{drive, Construct, SpanSink, Step};

#[derive(Logos, Debug, PartialEq, Clone, Copy)]
enum PyToken {
    #[regex(r"[ \t\f\r]+")]
    Whitespace,

    // Keywords
    #[token("and")]
    #[token("as")]
    #[token("assert")]
    #[token("async")]
    #[token("await")]
    #[token("break")]
    #[token("class")]
    #[token("continue")]
    #[token("def")]
    #[token("del")]
    #[token("elif")]
    #[token("else")]
    #[token("except")]
    #[token("exec")]
    #[token("finally")]
    #[token("for")]
    #[token("from")]
    #[token("global")]
    #[token("if")]
    #[token("import")]
    #[token("in")]
    #[token("is")]
    #[token("lambda")]
    #[token("nonlocal")]
    #[token("not")]
    #[token("or")]
    #[token("pass")]
    #[token("print")]
    #[token("raise")]
    #[token("return")]
    #[token("try")]
    #[token("while")]
    #[token("with")]
    #[token("yield")]
    Keyword,

    #[token("None")]
    #[token("True")]
    #[token("False")]
    Constant,

    #[token("self")]
    #[token("cls")]
    PredefVar,

    #[token("abs")]
    #[token("all")]
    #[token("any")]
    #[token("bool")]
    #[token("dict")]
    #[token("enumerate")]
    #[token("float")]
    #[token("int")]
    #[token("isinstance")]
    #[token("len")]
    #[token("list")]
    #[token("map")]
    #[token("max")]
    #[token("min")]
    #[token("open")]
    #[token("range")]
    #[token("set")]
    #[token("sorted")]
    #[token("str")]
    #[token("super")]
    #[token("tuple")]
    #[token("type")]
    #[token("zip")]
    Builtin,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", priority = 1)]
    Identifier,

    #[regex(r"@[A-Za-z_][A-Za-z0-9_.]*")]
    Decorator,

    #[regex(r"(0[xXoObB][0-9a-fA-F_]+|[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9]+)?)[jJlL]?")]
    Number,

    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r#"'([^'\\]|\\.)*'"#)]
    String,

    #[token("\"\"\"")]
    TripleDouble,
    #[token("'''")]
    TripleSingle,

    #[regex(r"#[^\n]*")]
    Comment,

    #[regex(r"[-+*/%=<>!&|^~.,:;@()\[\]{}]")]
    Symbol,
}

pub(super) fn lex(text: &str, offset: usize, out: &mut dyn SpanSink) -> Step {
    // 行頭から空白しか出ていなければ文の先頭
    let mut at_statement_start = offset == 0;
    drive(PyToken::lexer(text), offset, out, move |token| {
        let docstring = at_statement_start;
        at_statement_start &= token == PyToken::Whitespace;
        Ok(match token {
            PyToken::Whitespace | PyToken::Identifier => "normal",
            PyToken::Keyword => "keyword",
            PyToken::Constant => "Token_Keyword_Constant",
            PyToken::PredefVar => "predef_var",
            PyToken::Builtin => "Token_Name_Builtin",
            PyToken::Decorator => "Token_Name_Decorator",
            PyToken::Number => "number",
            PyToken::String => "string",
            PyToken::Comment => "comment",
            PyToken::Symbol => "symbol",
            PyToken::TripleDouble if docstring => return Err(Construct::DocDouble),
            PyToken::TripleSingle if docstring => return Err(Construct::DocSingle),
            PyToken::TripleDouble => return Err(Construct::TripleDouble),
            PyToken::TripleSingle => return Err(Construct::TripleSingle),
        })
    })
}
