// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with **some** content.\n\n- Bullet point\n    - Nested item\n- [ ] Task item\n1. Numbered\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n---\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_code_heavy_content(blocks: usize, lines_per_block: usize) -> String {
    let mut content = String::new();

    for block in 0..blocks {
        content.push_str(&format!("# Block {}\n", block));
        content.push_str("```rust\n");
        for line in 0..lines_per_block {
            content.push_str(&format!("let value_{} = {};\n", line, line * block));
        }
        content.push_str("```\n");
    }

    content
}
