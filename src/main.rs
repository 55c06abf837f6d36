// This binary crate is intentionally minimal.
// All training and inference logic lives in the library (src/lib.rs and its
// modules). Run demos with:
//   cargo run --example xor
fn main() {
    println!("magnetite-nn: a from-scratch multilayer perceptron trainer in Rust.");
    println!("Run `cargo run --example xor` to see the XOR demo,");
    println!("or `cargo run --example mnist --release` for the MNIST CSV pipeline.");
}
