//! End-to-end index builds over a temporary site directory.

use std::{fs, path::Path};

use folio_core::{Config, SearchIndex};
use folio_index::{IndexBuilder, IndexError};

fn write_site(root: &Path) {
    fs::write(
        root.join("index.html"),
        r#"<!DOCTYPE html>
<html>
  <body>
    <aside>
      <button class="part-button" data-file="part1.html">1990</button>
      <button class="part-button" data-file="part2.html">1991</button>
    </aside>
    <main id="content-area"></main>
  </body>
</html>"#,
    )
    .unwrap();

    fs::write(
        root.join("part1.html"),
        r#"<p class="MsoNormal">Foreword for the year.</p>
<p class="MsoHeading1">First Article</p>
<p class="MsoNormal">Alpha beta.</p>
<h2>Details</h2>
<p>Gamma&nbsp;delta.</p>
<h1></h1>
<p>Under an empty heading.</p>"#,
    )
    .unwrap();

    fs::write(
        root.join("part2.html"),
        r#"<h1>Second Year</h1><p>Alpha again.</p><h1>Nothing here</h1>"#,
    )
    .unwrap();
}

#[test]
fn test_full_build() {
    let dir = tempfile::tempdir().expect("create temp dir");
    write_site(dir.path());

    let builder = IndexBuilder::new(Config::default(), dir.path());
    let stats = builder.build_and_write().expect("build succeeds");

    let index = SearchIndex::read_from_file(&dir.path().join("search-index.json")).unwrap();
    let headings: Vec<_> = index.articles().iter().map(|a| a.heading.as_str()).collect();
    assert_eq!(
        headings,
        vec![
            "(opening article - 1990)",
            "First Article",
            "(empty heading)",
            "Second Year",
        ]
    );

    assert_eq!(index.articles()[1].text, "alpha beta. details gamma\u{a0}delta. ");
    assert_eq!(stats.chapters[0].articles, 3);
    assert_eq!(stats.chapters[1].articles, 1);
    assert_eq!(stats.total_articles(), 4);
}

#[test]
fn test_rebuild_is_idempotent() {
    let dir = tempfile::tempdir().expect("create temp dir");
    write_site(dir.path());

    let builder = IndexBuilder::new(Config::default(), dir.path());
    builder.build_and_write().unwrap();
    let first = fs::read_to_string(dir.path().join("search-index.json")).unwrap();

    builder.build_and_write().unwrap();
    let second = fs::read_to_string(dir.path().join("search-index.json")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_manifest_without_chapters_aborts() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(dir.path().join("index.html"), "<html><body></body></html>").unwrap();

    let builder = IndexBuilder::new(Config::default(), dir.path());
    let err = builder.build_and_write().unwrap_err();

    assert!(matches!(err, IndexError::Manifest { .. }));
    assert!(!dir.path().join("search-index.json").exists());
}

#[test]
fn test_custom_config_layout() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::create_dir(dir.path().join("chapters")).unwrap();
    fs::write(
        dir.path().join("folio.toml"),
        r#"
[site]
index_file = "articles.json"
"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("index.html"),
        r#"<button class="part-button" data-file="chapters/one.html">One</button>"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("chapters/one.html"),
        "<h1>Only</h1><p>Text</p>",
    )
    .unwrap();

    let config = Config::load_with_env(&dir.path().join("folio.toml")).unwrap();
    let stats = IndexBuilder::new(config, dir.path()).build_and_write().unwrap();

    assert_eq!(stats.output, Some(dir.path().join("articles.json")));
    assert_eq!(stats.total_articles(), 1);

    let index = SearchIndex::read_from_file(&dir.path().join("articles.json")).unwrap();
    assert_eq!(index.articles()[0].file, "chapters/one.html");
}

#[test]
fn test_duplicate_button_is_indexed_once() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(
        dir.path().join("index.html"),
        r#"<button class="part-button" data-file="one.html"> Draft </button>
<button class="part-button" data-file="one.html">1990</button>"#,
    )
    .unwrap();
    fs::write(dir.path().join("one.html"), "<h1>Only</h1><p>Text</p>").unwrap();

    let stats = IndexBuilder::new(Config::default(), dir.path())
        .build_and_write()
        .unwrap();

    assert_eq!(stats.chapters.len(), 1);
    let index = SearchIndex::read_from_file(&dir.path().join("search-index.json")).unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index.articles()[0].year, "1990");
}
