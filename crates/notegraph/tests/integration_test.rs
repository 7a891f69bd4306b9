//! End-to-end tests over small exported notebooks

use notegraph::prelude::*;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use zip::write::FileOptions;

const ID1: &str = "evernote:///view/100/s1/id1/id1/";
const ID2: &str = "evernote:///view/100/s1/id2/id2/";
const ID3: &str = "evernote:///view/100/s1/id3/id3/";

fn notebook_files() -> Vec<(String, String)> {
    vec![
        ("mydict.txt".to_string(), format!("A\t{ID1}\nB\t{ID2}\n")),
        (
            "A.html".to_string(),
            format!(
                r#"<html><head><title>A</title></head><body>
<div>See <a href="{ID2}">B</a> and <a href="{ID3}">External</a>.</div>
<div><a href="https://example.com">web</a></div>
</body></html>"#
            ),
        ),
        (
            "B.html".to_string(),
            "<html><body><p>Leaf note</p></body></html>".to_string(),
        ),
    ]
}

fn write_notebook(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    for (name, content) in notebook_files() {
        fs::write(dir.join(name), content).unwrap();
    }
}

fn write_zip(path: &Path, top: &str) {
    let file = fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    for (name, content) in notebook_files() {
        zip.start_file(format!("{top}/{name}"), FileOptions::default())
            .unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

#[test]
fn test_restricted_analysis() {
    let temp = TempDir::new().unwrap();
    write_notebook(temp.path());

    let config = AnalysisConfig::builder().query("B").build().unwrap();
    let analysis = analyze(temp.path(), &config).unwrap();

    assert_eq!(analysis.graph.node_count(), 2);
    assert_eq!(analysis.graph.edge_count(), 1);
    assert!(analysis.graph.has_edge(ID1, ID2));

    let rank1 = analysis.ranking.score(ID1).unwrap();
    let rank2 = analysis.ranking.score(ID2).unwrap();
    assert!(rank2 > rank1);
    assert!((analysis.ranking.total() - 1.0).abs() < 1e-9);

    let query = analysis.query.as_ref().unwrap();
    assert_eq!(query.target().unwrap().as_str(), ID2);
    assert_eq!(analysis.displayed_graph().node_count(), 2);
    assert_eq!(analysis.view.nodes.len(), 2);
    assert!(analysis.database.warnings.is_empty());
}

#[test]
fn test_unrestricted_analysis_discovers_external_note() {
    let temp = TempDir::new().unwrap();
    write_notebook(temp.path());

    let config = AnalysisConfig::builder().restrict(false).build().unwrap();
    let analysis = analyze(temp.path(), &config).unwrap();

    let index = &analysis.database.index;
    assert_eq!(index.len(), 3);
    assert_eq!(index.title(ID3).unwrap().as_str(), "External");
    assert!(analysis.database.content(ID3).is_none());
    assert!(analysis.graph.has_edge(ID1, ID3));

    let external = analysis.view.node(ID3).unwrap();
    assert_eq!(external.label, "External");
    assert!(external.hover.is_none());
}

#[test]
fn test_zip_input() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("Notebook.zip");
    write_zip(&archive, "Notebook");

    let analysis = analyze(&archive, &AnalysisConfig::default()).unwrap();

    assert!(matches!(analysis.toc_source, TocSource::Tsv(_)));
    assert_eq!(analysis.graph.node_count(), 2);
    assert_eq!(analysis.database.content(ID2).unwrap().as_str(), "Leaf note");
}

#[test]
fn test_html_index_fallback() {
    let temp = TempDir::new().unwrap();
    write_notebook(temp.path());
    fs::remove_file(temp.path().join("mydict.txt")).unwrap();
    fs::write(
        temp.path().join("Table of Contents.html"),
        format!(r#"<ul><li><a href="{ID1}">A</a></li><li><a href="{ID2}">B</a></li></ul>"#),
    )
    .unwrap();

    let analysis = analyze(temp.path(), &AnalysisConfig::default()).unwrap();
    assert!(matches!(analysis.toc_source, TocSource::Html(_)));
    assert_eq!(analysis.graph.edge_count(), 1);
}

#[test]
fn test_missing_index_is_fatal() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("A.html"), "<p>A</p>").unwrap();

    let result = analyze(temp.path(), &AnalysisConfig::default());
    assert!(matches!(result, Err(Error::MissingTableOfContents { .. })));
}

#[test]
fn test_query_without_match_renders_full_graph() {
    let temp = TempDir::new().unwrap();
    write_notebook(temp.path());

    let config = AnalysisConfig::builder().query("Nope").build().unwrap();
    let analysis = analyze(temp.path(), &config).unwrap();

    let query = analysis.query.as_ref().unwrap();
    assert!(matches!(query.outcome, SubgraphQuery::NoMatch));
    assert_eq!(analysis.view.nodes.len(), 2);
}

#[test]
fn test_missing_note_is_reported() {
    let temp = TempDir::new().unwrap();
    write_notebook(temp.path());
    fs::remove_file(temp.path().join("B.html")).unwrap();

    let analysis = analyze(temp.path(), &AnalysisConfig::default()).unwrap();
    assert_eq!(analysis.database.warnings.len(), 1);
    assert_eq!(analysis.graph.node_count(), 2);
    assert!(analysis.report().warnings[0].title.as_str() == "B");

    let strict = AnalysisConfig::builder().fail_fast(true).build().unwrap();
    assert!(analyze(temp.path(), &strict).is_err());
}

#[test]
fn test_unlisted_note_files_are_reported() {
    let temp = TempDir::new().unwrap();
    write_notebook(temp.path());
    fs::write(temp.path().join("Orphan.html"), "<p>not listed</p>").unwrap();

    let analysis = analyze(temp.path(), &AnalysisConfig::default()).unwrap();
    assert_eq!(analysis.unlisted_files, vec![temp.path().join("Orphan.html")]);
    assert_eq!(analysis.graph.node_count(), 2);

    let json = analysis
        .export(ExportFormat::Json, &RenderConfig::default())
        .unwrap();
    assert!(json.contains("Orphan.html"));
}

#[test]
fn test_exports() {
    let temp = TempDir::new().unwrap();
    write_notebook(temp.path());

    let config = AnalysisConfig::default();
    let analysis = analyze(temp.path(), &config).unwrap();

    let html = analysis.export(ExportFormat::Html, &config.render).unwrap();
    assert!(html.contains("<title>Visualization of Notes</title>"));
    assert!(html.contains(ID2));

    let json = analysis.export(ExportFormat::Json, &config.render).unwrap();
    let report: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(report["stats"]["total_notes"], 2);
    assert_eq!(report["notes"][0]["id"], ID2);

    let csv = analysis.export(ExportFormat::Csv, &config.render).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.lines().nth(1).unwrap().starts_with("1,B,"));
}
