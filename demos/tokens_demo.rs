//! Demonstrates collecting tokens with the builtin engine

use hilite::scan_to_tokens;

fn main() {
    let samples = vec![
        (
            "Python",
            "py",
            r#"@cached
def greet(name):
    """Say hello."""
    print('hello', name)  # greet
"#,
        ),
        (
            "C",
            "c",
            r#"#include <stdio.h>

/* entry
   point */
int main(void) {
    return 0;
}
"#,
        ),
        ("Unknown language", "cobol", "DISPLAY 'HI'.\n"),
    ];

    for (name, selector, code) in samples {
        println!("\n=== {} ===", name);
        println!("Code:\n{}", code);

        match scan_to_tokens(code, selector, "builtin") {
            Ok(stream) => {
                println!("✓ {} tokens on {} lines", stream.len(), stream.line_count());
                for pair in &stream {
                    println!("  {}", pair);
                }
            }
            Err(e) => {
                println!("✗ {}", e);
            }
        }
    }
}
