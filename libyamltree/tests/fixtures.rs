//! Test harness for the parser against token fixture files.
//!
//! Reads every .tokens file from test/tokens/ and parses it, comparing the
//! compact Debug rendering of the value against the matching .value file.
//! Every .tokens file in test/nay/ is expected to fail with the message in
//! the matching .error file.
//!
//! Fixture format: one token per line, `<kind-name> <text>`. In the text,
//! `\n` is a line feed, `\s` a space and `\\` a backslash. Empty lines and
//! lines starting with `#` are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use libyamltree::{parse, parse_all, Token, TokenKind};

/// Root test directory.
fn test_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("test")
}

/// Get all .tokens files in a subdirectory of test/.
fn get_token_files(subdir: &str) -> Vec<PathBuf> {
    let pattern = test_root().join(subdir).join("*.tokens");
    let mut files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())
        .expect("valid glob pattern")
        .flatten()
        .collect();
    files.sort();
    files
}

/// Read the sibling file with the given extension, if present.
fn read_sibling(path: &Path, ext: &str) -> Option<String> {
    fs::read_to_string(path.with_extension(ext)).ok()
}

fn unescape(text: &str) -> Result<String, String> {
    let mut out = String::new();
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('s') => out.push(' '),
            Some('\\') => out.push('\\'),
            other => return Err(format!("bad escape \\{:?} in {:?}", other, text)),
        }
    }
    Ok(out)
}

/// Load a fixture into a token stream terminated by the end sentinel.
fn load_tokens(path: &Path) -> Result<Vec<Token>, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let mut tokens = Vec::new();
    for (n, line) in content.lines().enumerate() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (name, text) = line.split_once(' ').unwrap_or((line, ""));
        let kind: TokenKind = name
            .parse()
            .map_err(|e| format!("{}:{}: {}", path.display(), n + 1, e))?;
        tokens.push(Token::new(kind, unescape(text)?));
    }
    if tokens.last().map(|t| t.kind) != Some(TokenKind::End) {
        tokens.push(Token::end());
    }
    Ok(tokens)
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().to_string()
}

/// Run a single fixture expected to succeed.
fn run_value_test(path: &Path) -> Result<(), String> {
    let filename = file_name(path);
    let tokens = load_tokens(path)?;

    // Fixtures named multi-* hold several documents.
    let actual = if filename.starts_with("multi-") {
        parse_all(&tokens).map(|docs| format!("{:?}", docs))
    } else {
        parse(&tokens).map(|value| format!("{:?}", value))
    }
    .map_err(|e| format!("{}: Unexpected parse error: {}", filename, e))?;

    match read_sibling(path, "value") {
        Some(expected) if expected.trim() == actual => {
            println!("  {} => {}", filename, actual);
            Ok(())
        }
        Some(expected) => Err(format!(
            "{}: Output mismatch\n    expected: {}\n    actual:   {}",
            filename,
            expected.trim(),
            actual
        )),
        None => {
            println!("  {} => {} (no expected output)", filename, actual);
            Ok(())
        }
    }
}

/// Run a single fixture expected to fail with a specific error.
fn run_nay_test(path: &Path) -> Result<(), String> {
    let filename = file_name(path);
    let tokens = load_tokens(path)?;

    match parse(&tokens) {
        Ok(value) => Err(format!(
            "{}: Expected parse error, but got success: {:?}",
            filename, value
        )),
        Err(e) => {
            // Contexts often end in line breaks, which the .error files drop.
            let actual_error = e.to_string().trim_end().to_string();
            match read_sibling(path, "error") {
                Some(expected) if expected.trim_end() == actual_error => {
                    println!("  {} => error (as expected)", filename);
                    Ok(())
                }
                Some(expected) => Err(format!(
                    "{}: Error mismatch\n    expected: {:?}\n    actual:   {:?}",
                    filename,
                    expected.trim_end(),
                    actual_error
                )),
                None => {
                    println!(
                        "  {} => error: {} (no .error file to compare)",
                        filename, actual_error
                    );
                    Ok(())
                }
            }
        }
    }
}

fn run_all(subdir: &str, run: fn(&Path) -> Result<(), String>) {
    let files = get_token_files(subdir);
    assert!(!files.is_empty(), "no fixtures found in test/{}", subdir);

    println!("\nRunning {} test/{} fixtures:", files.len(), subdir);

    let errors: Vec<String> = files.iter().filter_map(|f| run(f).err()).collect();

    println!(
        "\nResults: {} passed, {} failed",
        files.len() - errors.len(),
        errors.len()
    );

    if !errors.is_empty() {
        println!("\nErrors:");
        for error in &errors {
            println!("  - {}", error);
        }
    }

    assert!(errors.is_empty(), "{} fixtures failed", errors.len());
}

#[test]
fn test_all_value_fixtures() {
    run_all("tokens", run_value_test);
}

#[test]
fn test_all_nay_fixtures() {
    run_all("nay", run_nay_test);
}
