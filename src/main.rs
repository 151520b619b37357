// This binary crate is intentionally minimal.
// All matrix and network logic lives in the library (src/lib.rs and its
// modules). Run examples with:
//   cargo run --example or_gate
fn main() {
    println!("magnetite-nn: a dense matrix kernel and feedforward network trainer.");
    println!("Run `cargo run --example or_gate` to see a logic-gate demo.");
}
