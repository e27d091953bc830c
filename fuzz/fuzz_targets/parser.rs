#![no_main]

use libfuzzer_sys::fuzz_target;

// Scanning and parsing must accept any input, and whatever parses cleanly
// must survive a render and re-parse unchanged
fuzz_target!(|source: &str| {
    let tokens = atomscript::tokenize(source);
    assert_eq!(tokens.last().map(|token| token.kind), Some(atomscript::TokenKind::Eof));

    let (program, errors) = atomscript::parse(source);
    if errors.is_empty() {
        let rendered = program.to_string();
        let (reparsed, errors) = atomscript::parse(&rendered);
        assert!(errors.is_empty(), "{:?} rendered as {:?} fails to parse: {:?}", source, rendered, errors);
        assert_eq!(reparsed, program);
    }
});
