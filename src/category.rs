//! カテゴリ名テーブル
//!
//! スキャナエンジンが報告する分類名 ("keyword", "Token_Literal_String" など) を、
//! 呼び出し側に返す公開トークン型 ("Keyword", "Literal.String" など) に対応付けます。
//! テーブルは最初の利用時に一度だけ構築され、以降は読み取り専用です。

use indexmap::IndexMap;
use std::sync::OnceLock;

/// テーブルにないカテゴリに使う型
pub const DEFAULT_TOKEN_TYPE: &str = "Other";

/// 強調されない通常テキストの内部名
pub const NORMAL: &str = "normal";

/// source-highlight形式の文法で使われる要素名
///
/// 文法ファイルによって `const` と `constant` の両方が使われており、同じ型に対応する。
const ELEMENT_NAMES: &[(&str, &str)] = &[
    ("keyword", "Keyword"),
    ("type", "Keyword.Type"),
    ("usertype", "Name.Class"),
    ("classname", "Name.Class"),
    ("string", "Literal.String"),
    ("regexp", "Literal.String.Regex"),
    ("specialchar", "Literal.String.Escape"),
    ("quotation", "Literal.String.Double"),
    ("symbol", "Literal.String.Symbol"),
    ("atom", "Literal.String.Symbol"),
    ("comment", "Comment"),
    ("todo", "Comment.Special"),
    ("preproc", "Comment.Preproc"),
    ("number", "Literal.Number"),
    ("value", "Literal"),
    ("date", "Literal.Date"),
    ("time", "Literal.Date"),
    ("function", "Name.Function"),
    ("predef_func", "Name.Builtin"),
    ("predef_var", "Name.Builtin.Pseudo"),
    ("variable", "Name.Variable"),
    ("const", "Name.Constant"),
    ("constant", "Name.Constant"),
    ("label", "Name.Label"),
    ("name", "Name"),
    ("tag", "Name.Tag"),
    ("attribute", "Name.Attribute"),
    ("argument", "Name.Attribute"),
    ("optionalargument", "Name.Attribute"),
    ("property", "Name.Property"),
    ("selector", "Name.Tag"),
    ("url", "Name.Entity"),
    ("ip", "Literal.Number"),
    ("file", "Literal.String.Other"),
    ("math", "Literal.String.Other"),
    ("bibtex", "Keyword"),
    ("cbracket", "Punctuation"),
    ("section", "Generic.Heading"),
    ("paragraph", "Generic.Subheading"),
    ("italics", "Generic.Emph"),
    ("underline", "Generic.Emph"),
    ("bold", "Generic.Strong"),
    ("fixed", "Text"),
    ("linenum", "Generic.Output"),
    ("difflines", "Generic.Subheading"),
    ("oldfile", "Generic.Deleted"),
    ("newfile", "Generic.Inserted"),
    ("error", "Error"),
    (NORMAL, "Text"),
];

/// pygmentsのレキサーから生成した文法のトークン型。ルール名は `Token_` に
/// `.` を `_` に置き換えた型名を続けたもの。
const GENERATED_TYPES: &[&str] = &[
    "Text",
    "Text.Whitespace",
    "Whitespace",
    "Escape",
    "Error",
    "Other",
    "Keyword",
    "Keyword.Constant",
    "Keyword.Declaration",
    "Keyword.Namespace",
    "Keyword.Pseudo",
    "Keyword.Reserved",
    "Keyword.Type",
    "Name",
    "Name.Attribute",
    "Name.Builtin",
    "Name.Builtin.Pseudo",
    "Name.Class",
    "Name.Constant",
    "Name.Decorator",
    "Name.Entity",
    "Name.Exception",
    "Name.Function",
    "Name.Function.Magic",
    "Name.Label",
    "Name.Namespace",
    "Name.Other",
    "Name.Property",
    "Name.Tag",
    "Name.Variable",
    "Name.Variable.Class",
    "Name.Variable.Global",
    "Name.Variable.Instance",
    "Name.Variable.Magic",
    "Literal",
    "Literal.Date",
    "Literal.String",
    "Literal.String.Affix",
    "Literal.String.Backtick",
    "Literal.String.Char",
    "Literal.String.Delimiter",
    "Literal.String.Doc",
    "Literal.String.Double",
    "Literal.String.Escape",
    "Literal.String.Heredoc",
    "Literal.String.Interpol",
    "Literal.String.Other",
    "Literal.String.Regex",
    "Literal.String.Single",
    "Literal.String.Symbol",
    "Literal.Number",
    "Literal.Number.Bin",
    "Literal.Number.Float",
    "Literal.Number.Hex",
    "Literal.Number.Integer",
    "Literal.Number.Integer.Long",
    "Literal.Number.Oct",
    "Operator",
    "Operator.Word",
    "Punctuation",
    "Punctuation.Marker",
    "Comment",
    "Comment.Hashbang",
    "Comment.Multiline",
    "Comment.Preproc",
    "Comment.PreprocFile",
    "Comment.Single",
    "Comment.Special",
    "Generic",
    "Generic.Deleted",
    "Generic.Emph",
    "Generic.Error",
    "Generic.Heading",
    "Generic.Inserted",
    "Generic.Output",
    "Generic.Prompt",
    "Generic.Strong",
    "Generic.Subheading",
    "Generic.Traceback",
];

static TABLE: OnceLock<IndexMap<String, &'static str>> = OnceLock::new();

fn table() -> &'static IndexMap<String, &'static str> {
    TABLE.get_or_init(|| {
        let mut entries: Vec<(String, &'static str)> = ELEMENT_NAMES
            .iter()
            .map(|&(internal, public)| (internal.to_owned(), public))
            .collect();
        entries.extend(
            GENERATED_TYPES
                .iter()
                .map(|&public| (rule_name(public), public)),
        );
        build(entries)
    })
}

/// 対応表を構築する (同じ内部名は最初のエントリを残す)
pub(crate) fn build<I>(entries: I) -> IndexMap<String, &'static str>
where
    I: IntoIterator<Item = (String, &'static str)>,
{
    let mut map = IndexMap::new();
    for (internal, public) in entries {
        if let Some(existing) = map.get(&internal) {
            log::debug!(
                "category '{}' already maps to '{}', ignoring '{}'",
                internal,
                existing,
                public
            );
            continue;
        }
        map.insert(internal, public);
    }
    map
}

/// 生成文法でのルール名 (`Literal.String` -> `Token_Literal_String`)
pub fn rule_name(token_type: &str) -> String {
    format!("Token_{}", token_type.replace('.', "_"))
}

/// プロセス内で初めての呼び出しならテーブルを構築する
pub fn ensure_populated() {
    table();
}

/// 内部カテゴリ名に対応する公開トークン型
pub fn lookup(internal_name: &str) -> Option<&'static str> {
    table().get(internal_name).copied()
}

/// 登録順のエントリ
pub fn entries() -> impl Iterator<Item = (&'static str, &'static str)> {
    table().iter().map(|(internal, public)| (internal.as_str(), *public))
}

/// 内部名の数
pub fn len() -> usize {
    table().len()
}

/// `token_type` が `ancestor` 自身か、ドット区切りの階層でその下にあるか
/// (`Literal.String.Symbol` は `Literal.String` の下)
pub fn is_subtype(token_type: &str, ancestor: &str) -> bool {
    match token_type.strip_prefix(ancestor) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

/// ドット区切りの型の最上位 (`Literal.String` なら `Literal`)
pub fn root(token_type: &str) -> &str {
    token_type.split('.').next().unwrap_or(token_type)
}
