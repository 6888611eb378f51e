//! Fuzz smoke tests for the lexer and transforms.
//!
//! Random, adversarial, and edge-case inputs must never panic, and the
//! structural properties that hold for every input are checked on each one.
//!
//! No external crate dependencies are used; a simple deterministic PRNG
//! provides reproducible randomness.

use lua_toolkit_core::lexer::segment;
use lua_toolkit_core::{
    DeleteOptions, OneLinerMode, beautify, delete_all_comments, delete_custom_comments,
    extract_comments, has_comments, protect, restore, reverse, to_one_liner,
};

// ─── Simple deterministic PRNG (LCG) ────────────────────────────────────────

struct SimpleRng(u64);

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range(&mut self, max: usize) -> usize {
        (self.next() as usize) % max
    }

    fn gen_bytes(&mut self, len: usize) -> Vec<u8> {
        (0..len).map(|_| self.next() as u8).collect()
    }

    fn gen_from(&mut self, alphabet: &[u8], len: usize) -> String {
        (0..len)
            .map(|_| alphabet[self.gen_range(alphabet.len())] as char)
            .collect()
    }
}

/// Truncate a string for error messages (safe for multi-byte UTF-8).
fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let safe_end = (0..=max)
            .rev()
            .find(|&i| s.is_char_boundary(i))
            .unwrap_or(0);
        format!("{}…({} bytes total)", &s[..safe_end], s.len())
    }
}

// ─── Invariant checking ─────────────────────────────────────────────────────

/// Run every transform on `input` and check the invariants that hold for
/// arbitrary text.
fn fuzz_all(input: &str) {
    let segs = segment(input);
    let mut expected_start = 0;
    for seg in &segs {
        assert_eq!(
            seg.start,
            expected_start,
            "segments not contiguous in {:?}",
            truncate(input, 120)
        );
        assert_eq!(&input[seg.start..seg.end], seg.text);
        expected_start = seg.end;
    }
    assert_eq!(expected_start, input.len());

    let p = protect(input);
    assert_eq!(
        restore(&p.text, &p.literals),
        input,
        "round trip failed for {:?}",
        truncate(input, 120)
    );

    assert_eq!(reverse(&reverse(input)), input);

    let line_count = input.matches('\n').count() + 1;
    for record in extract_comments(input) {
        assert!(record.line >= 1 && record.line <= line_count);
        assert!(record.content.starts_with("--"));
    }

    let _ = has_comments(input);
    let _ = delete_all_comments(input);
    let _ = delete_custom_comments(
        input,
        &DeleteOptions {
            single_line: true,
            custom_single_prefix: "//".into(),
            custom_block_start: "/*".into(),
            custom_block_end: "*/".into(),
            ..DeleteOptions::default()
        },
    );
    let one = to_one_liner(input, OneLinerMode::Preserve);
    assert!(one.trim() == one, "one-liner not trimmed");
    let _ = to_one_liner(input, OneLinerMode::Delete);
    let _ = beautify(input);
}

// ═══════════════════════════════════════════════════════════════════════════════
// Category A: Random strings
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn no_panic_random_bytes() {
    let mut rng = SimpleRng::new(0xDEAD_BEEF);
    for len in [0, 1, 2, 5, 10, 50, 100, 500, 1000] {
        for _ in 0..20 {
            let bytes = rng.gen_bytes(len);
            let input = String::from_utf8_lossy(&bytes);
            fuzz_all(&input);
        }
    }
}

#[test]
fn no_panic_random_ascii() {
    let mut rng = SimpleRng::new(0x1234_5678);
    let ascii: Vec<u8> = (0x20..=0x7E).chain([b'\n', b'\t', b'\r']).collect();
    for len in [0, 1, 5, 20, 100, 500, 2000] {
        for _ in 0..20 {
            let s = rng.gen_from(&ascii, len);
            fuzz_all(&s);
        }
    }
}

#[test]
fn no_panic_random_lua_like() {
    let mut rng = SimpleRng::new(0xBAAD_F00D);
    let alphabet: &[u8] = b"--[[]]==\"'\\ \n\tabc()endthenif;do";
    for len in [1, 5, 20, 100, 500] {
        for _ in 0..50 {
            let s = rng.gen_from(alphabet, len);
            fuzz_all(&s);
        }
    }
}

#[test]
fn no_panic_placeholder_fragments() {
    let mut rng = SimpleRng::new(0x5EED_CAFE);
    let pieces = [
        "__LUA_STRING_",
        "__LUA_COMMENT_",
        "__LUA_STRING",
        "_",
        "__",
        "0",
        "12",
        "'a'",
        "\"b\"",
        "[[c]]",
        "-- d\n",
        "--[[e]]",
        " ",
    ];
    for len in [1, 3, 8, 20] {
        for _ in 0..100 {
            let s: String = (0..len)
                .map(|_| pieces[rng.gen_range(pieces.len())])
                .collect();
            fuzz_all(&s);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Category B: Adversarial delimiter sequences
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn no_panic_adversarial_delimiters() {
    let cases = [
        "-",
        "--",
        "---",
        "--[",
        "--[[",
        "--[=[",
        "--[[]]",
        "--[==[]=]",
        "[",
        "[[",
        "[=",
        "[==[",
        "]]",
        "]=]",
        "\"",
        "'",
        "\\",
        "\"\\",
        "'\\'",
        "\"\\\r\n",
        "--\r",
        "a = [[x]] .. [=[y]=] .. 'z' .. \"w\" --[[c]] -- d",
        "end end end",
        "then else elseif",
        "))))",
        ";;;;",
        "é--ü[[日]]",
        "if é then ü end",
        "__LUA_STRING_0__",
        "s = \"__LUA_STRING_0__\" .. [[a]]",
        "__LUA_STRING__LUA_STRING_'x'",
        "__LUA_COMMENT_0__ -- c",
    ];
    for case in cases {
        fuzz_all(case);
    }
}

#[test]
fn no_panic_deeply_repeated_openers() {
    for n in [10, 100, 1000] {
        fuzz_all(&"[[".repeat(n));
        fuzz_all(&"--[[".repeat(n));
        fuzz_all(&"'".repeat(n));
        fuzz_all(&"if x then\n".repeat(n));
    }
}
