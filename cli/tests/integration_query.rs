use boolir_cli::{load_corpus, read_documents, repl, run_query};
use boolir_core::InvertedIndex;
use std::fs;
use std::io::Cursor;
use tempfile::tempdir;

fn build_tiny_corpus(dir: &std::path::Path) {
    fs::write(dir.join("d1.txt"), "the cat sat").unwrap();
    fs::write(dir.join("d2.txt"), "the dog ran").unwrap();
    fs::write(dir.join("d3.txt"), "cat and dog").unwrap();
    // Non-.txt and nested files are ignored
    fs::write(dir.join("notes.md"), "cat dog").unwrap();
    fs::create_dir(dir.join("nested")).unwrap();
    fs::write(dir.join("nested/d4.txt"), "cat").unwrap();
}

#[test]
fn reads_only_top_level_txt_files_sorted() {
    let dir = tempdir().unwrap();
    build_tiny_corpus(dir.path());
    let docs = read_documents(dir.path()).unwrap();
    let names: Vec<&str> = docs.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["d1.txt", "d2.txt", "d3.txt"]);
}

#[test]
fn missing_folder_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(read_documents(&dir.path().join("absent")).is_err());
}

#[test]
fn empty_corpus_is_rejected_at_load() {
    let dir = tempdir().unwrap();
    // Only a non-.txt file: reading succeeds with an empty map, loading
    // refuses to start a session over it.
    fs::write(dir.path().join("notes.md"), "cat dog").unwrap();
    assert!(read_documents(dir.path()).unwrap().is_empty());
    let err = load_corpus(dir.path()).unwrap_err();
    assert!(err.to_string().contains("no .txt documents"));
}

#[test]
fn end_to_end_query_over_loaded_corpus() {
    let dir = tempdir().unwrap();
    build_tiny_corpus(dir.path());
    let docs = read_documents(dir.path()).unwrap();
    let index = InvertedIndex::build(docs.iter().map(|(n, t)| (n.as_str(), t.as_str())));

    let report = run_query(&index, "(cat OR dog) AND NOT sat").unwrap();
    assert_eq!(report.results, vec!["d2.txt", "d3.txt"]);
    assert_eq!(report.total_hits, 2);
    assert_eq!(report.postfix, vec!["cat", "dog", "OR", "sat", "NOT", "AND"]);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["query"], "(cat OR dog) AND NOT sat");
    assert_eq!(json["results"][0], "d2.txt");
}

#[test]
fn malformed_query_is_recoverable() {
    let index = InvertedIndex::build(vec![("d1", "cat")]);
    assert!(run_query(&index, "AND dog").is_err());
    // The index is untouched and the next query still works.
    assert_eq!(run_query(&index, "cat").unwrap().results, vec!["d1"]);
}

#[test]
fn repl_reports_errors_and_exits_cleanly() {
    let index = InvertedIndex::build(vec![("d1", "the cat sat"), ("d2", "the dog ran")]);
    let input = Cursor::new("cat\nAND dog\n\nexit\ncat OR dog\n");
    let mut output = Vec::new();
    repl(&index, input, &mut output, false).unwrap();
    let text = String::from_utf8(output).unwrap();
    assert!(text.contains(" - d1"));
    assert!(text.contains("Error evaluating query:"));
    assert!(text.contains("Exiting."));
    // Nothing after `exit` is evaluated.
    assert!(!text.contains(" - d2"));
}
