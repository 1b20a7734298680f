// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_document(size: usize) -> String {
    let base = "Set up the toolchain first.\n$ rustup update\n  The update can take a while\n  on slow connections.\n\n    $ cargo build --release\nCheck the <target> directory & run it.\n\n";
    base.repeat(size)
}
