// Integration tests for the full precompile pipeline

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use cpre::errors::{PrecompileError, Warning};
use cpre::pipeline;
use cpre::source;
use cpre::stats::ProcessingStats;

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

/// A private scratch directory; include directives use absolute paths so
/// the tests do not depend on the process working directory.
struct TestDir {
    root: PathBuf,
}

impl TestDir {
    fn new(tag: &str) -> Self {
        let n = NEXT_DIR.fetch_add(1, Ordering::Relaxed);
        let root = std::env::temp_dir().join(format!(
            "cpre_test_{}_{}_{}",
            std::process::id(),
            tag,
            n
        ));
        fs::create_dir_all(&root).expect("failed to create test dir");
        Self { root }
    }

    fn write(&self, name: &str, content: &str) -> String {
        let path = self.root.join(name);
        fs::write(&path, content).expect("failed to write test file");
        path.to_string_lossy().into_owned()
    }

    fn path(&self, name: &str) -> String {
        self.root.join(name).to_string_lossy().into_owned()
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

#[test]
fn test_include_flattened_in_place() {
    let dir = TestDir::new("flatten");
    let b = dir.write("b.c", "int from_b;\n");
    let a = dir.write("a.c", &format!("#include \"{}\"\nint from_a;\n", b));

    let mut stats = ProcessingStats::new();
    let outcome = pipeline::run(&a, &mut stats).expect("pipeline failed");

    assert_eq!(outcome.text, "int from_b;\nint from_a;\n");
    assert_eq!(stats.includes_processed, 1);
    assert_eq!(stats.included.len(), 1);

    let metrics = stats.included[0].metrics.expect("include should be readable");
    assert_eq!(metrics.bytes, "int from_b;\n".len() as u64);
    assert_eq!(metrics.lines, 1);

    // Input totals describe the flattened blob.
    assert_eq!(stats.input_lines, 2);
    assert_eq!(stats.input_bytes, outcome.text.len() as u64);
}

#[test]
fn test_nested_includes_depth_first() {
    let dir = TestDir::new("nested");
    let c = dir.write("c.c", "int from_c;\n");
    let b = dir.write("b.c", &format!("#include \"{}\"\nint from_b;\n", c));
    let a = dir.write("a.c", &format!("#include \"{}\"\nint from_a;\n", b));

    let mut stats = ProcessingStats::new();
    let outcome = pipeline::run(&a, &mut stats).expect("pipeline failed");

    assert_eq!(outcome.text, "int from_c;\nint from_b;\nint from_a;\n");
    assert_eq!(stats.includes_processed, 2);
    // Records follow encounter order: b when its directive is seen, then c
    // while expanding b.
    assert_eq!(stats.included[0].name, b);
    assert_eq!(stats.included[1].name, c);
}

#[test]
fn test_self_include_hits_depth_guard() {
    let dir = TestDir::new("cycle");
    let a = dir.path("a.c");
    fs::write(&a, format!("#include \"{}\"\n", a)).expect("failed to write test file");

    let mut stats = ProcessingStats::new();
    let result = pipeline::run(&a, &mut stats);

    match result {
        Err(PrecompileError::TooDeep { depth, .. }) => assert_eq!(depth, 11),
        other => panic!("expected TooDeep, got {:?}", other.map(|o| o.text)),
    }
}

#[test]
fn test_missing_include_is_recoverable() {
    let dir = TestDir::new("missing");
    let ghost = dir.path("ghost.h");
    let a = dir.write("a.c", &format!("#include \"{}\"\nint x;\n", ghost));

    let mut stats = ProcessingStats::new();
    let outcome = pipeline::run(&a, &mut stats).expect("missing include must not be fatal");

    // Directive dropped, processing continued.
    assert_eq!(outcome.text, "int x;\n");
    assert_eq!(stats.includes_processed, 1);
    assert_eq!(stats.included[0].metrics, None);
    assert!(outcome
        .warnings
        .iter()
        .any(|w| matches!(w, Warning::UnreadableInclude { name, .. } if *name == ghost)));
}

#[test]
fn test_system_include_passes_through() {
    let dir = TestDir::new("system");
    let a = dir.write("a.c", "#include <stdio.h>\nint x;\n");

    let mut stats = ProcessingStats::new();
    let outcome = pipeline::run(&a, &mut stats).expect("pipeline failed");

    assert_eq!(outcome.text, "#include <stdio.h>\nint x;\n");
    assert_eq!(stats.includes_processed, 0);
    assert!(outcome.warnings.is_empty());
}

#[test]
fn test_malformed_directive_kept_as_code() {
    let dir = TestDir::new("malformed");
    let a = dir.write("a.c", "#include \"broken\nint x;\n");

    let mut stats = ProcessingStats::new();
    let outcome = pipeline::run(&a, &mut stats).expect("pipeline failed");

    assert!(outcome.text.contains("#include \"broken"));
    assert_eq!(stats.includes_processed, 0);
    assert!(outcome
        .warnings
        .iter()
        .any(|w| matches!(w, Warning::MalformedDirective { line: 1, .. })));
}

#[test]
fn test_missing_top_level_file_is_fatal() {
    let dir = TestDir::new("noinput");
    let mut stats = ProcessingStats::new();
    let result = pipeline::run(&dir.path("nope.c"), &mut stats);
    assert!(matches!(result, Err(PrecompileError::NotFound { .. })));
}

#[test]
fn test_duplicate_include_counted_per_directive() {
    let dir = TestDir::new("dup");
    let b = dir.write("b.c", "int from_b;\n");
    let a = dir.write(
        "a.c",
        &format!("#include \"{}\"\n#include \"{}\"\n", b, b),
    );

    let mut stats = ProcessingStats::new();
    let outcome = pipeline::run(&a, &mut stats).expect("pipeline failed");

    assert_eq!(outcome.text, "int from_b;\nint from_b;\n");
    assert_eq!(stats.includes_processed, 2);
    assert_eq!(stats.included.len(), 2);
}

#[test]
fn test_unterminated_block_comment_warns() {
    let dir = TestDir::new("unterminated");
    let a = dir.write("a.c", "int x;\n/* left open\n");

    let mut stats = ProcessingStats::new();
    let outcome = pipeline::run(&a, &mut stats).expect("pipeline failed");

    assert!(outcome
        .warnings
        .iter()
        .any(|w| matches!(w, Warning::UnterminatedBlockComment { .. })));
    assert_eq!(stats.comments_removed, 1);
}

#[test]
fn test_findings_attributed_to_included_file() {
    let dir = TestDir::new("attribution");
    let b = dir.write("b.c", "int ok;\nint 7bad;\n");
    let a = dir.write("a.c", &format!("#include \"{}\"\nint also_ok;\n", b));

    let mut stats = ProcessingStats::new();
    pipeline::run(&a, &mut stats).expect("pipeline failed");

    assert_eq!(stats.invalid_identifiers, 1);
    assert_eq!(stats.findings[0].file, b);
    assert_eq!(stats.findings[0].line, 2);
    assert_eq!(stats.findings[0].name, "7bad");
}

#[test]
fn test_end_to_end_scenario() {
    let dir = TestDir::new("e2e");
    let a = dir.write(
        "a.c",
        "int x;\nint 2y;\n// c\nint main(){int z;int 3w;return 0;}\n",
    );
    let out = dir.root.join("out.c");

    let mut stats = ProcessingStats::new();
    let outcome = pipeline::run(&a, &mut stats).expect("pipeline failed");

    assert_eq!(stats.identifiers_checked, 4);
    assert_eq!(stats.invalid_identifiers, 2);
    assert_eq!(stats.findings[0].name, "2y");
    assert_eq!(stats.findings[0].line, 2);
    assert_eq!(stats.findings[1].name, "3w");
    assert_eq!(stats.findings[1].line, 4);
    assert_eq!(stats.comments_removed, 1);

    source::write_output(&outcome.text, Some(&out), &mut stats).expect("write failed");
    let written = fs::read_to_string(&out).expect("failed to read output");

    // The commented-out line became blank and was elided at emission.
    assert_eq!(written, "int x;\nint 2y;\nint main(){int z;int 3w;return 0;}\n");
    assert_eq!(stats.output_lines, 3);
    assert_eq!(stats.output_bytes, written.len() as u64);
    assert!(stats.output_bytes <= stats.input_bytes);
}
