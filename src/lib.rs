//! hilite library
//!
//! Turns the classified spans a highlighting engine reports into an ordered
//! stream of `(token type, text)` pairs.
//!
//! ```
//! let tokens = hilite::scan_to_tokens("if x:\n", "py", "builtin").unwrap();
//! assert_eq!(tokens.reconstruct(), "if x:\n");
//! ```

pub mod category;
pub mod collector;
pub mod engine;
pub mod error;
pub mod stream;

// Re-export commonly used types
pub use collector::{scan_to_tokens, BlankLinePolicy, CollectorOptions, TokenCollector};
pub use engine::{BuiltinEngine, LanguageMap, ScanEngine, ScanSession};
pub use error::{HiliteError, HiliteResult, LangMapError, SpanFault};
pub use stream::{TokenPair, TokenStream};
