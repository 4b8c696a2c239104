#![no_main]

use jjkw_syntax::{jjtree, lexer, parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Fuzz descriptor expansion and the lexer
        if let Ok(tokens) = jjtree::expand(s).and_then(|expanded| lexer::lex(&expanded)) {
            // If lexing succeeds, fuzz the parser
            let _ = parser::parse(&tokens);
        }
        // Full pipeline, including semantic analysis
        let _ = jjkw_syntax::compile(s);
    }
});
