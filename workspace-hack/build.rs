// This is a stub build.rs managed by cargo-hakari. It is needed so the
// build-dependencies section of Cargo.toml takes effect.
fn main() {}
