//! AFL++ fuzz target for `wikipreview`.
//!
//! Reads one input from stdin, so it can be driven by AFL++ via `cargo-afl`:
//!
//! ```bash
//! cargo install cargo-afl
//!
//! cargo afl build --release --features afl_fuzz --bin wikipreview_afl_transform
//!
//! mkdir -p fuzz/afl/out
//!
//! cargo afl fuzz -i fuzz/afl/in -o fuzz/afl/out target/release/wikipreview_afl_transform
//! ```
//!
//! AFL++ only treats signals as crashes, so any unwind is turned into `abort()`.

use std::io::Read;

use wikipreview::{TransformOutput, extract_headings, render_toc, transform};

const MAX_INPUT_LEN: usize = 1_000_000;

fn run_one_input(data: &[u8]) {
    if data.len() > MAX_INPUT_LEN {
        return;
    }

    // arbitrary bytes; lossy conversion keeps the harness total.
    let src = String::from_utf8_lossy(data).to_string();

    let out = transform(&src);
    assert_eq!(out, transform(&src), "transform must be deterministic");

    let json = serde_json::to_vec(&out).unwrap();
    let back: TransformOutput = serde_json::from_slice(&json).unwrap();
    assert_eq!(back, out);

    let headings = extract_headings(&src);
    let toc = render_toc(&headings);
    assert_eq!(toc.is_empty(), headings.is_empty());
}

fn main() {
    let mut data = Vec::new();
    std::io::stdin().read_to_end(&mut data).unwrap();

    if std::panic::catch_unwind(|| run_one_input(&data)).is_err() {
        std::process::abort();
    }
}
