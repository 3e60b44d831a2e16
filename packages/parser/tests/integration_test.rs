//! End-to-end tests for the parsing pipeline.
//!
//! Parses the fixture editions and checks the structural guarantees the
//! query and diff layers rely on.

use std::path::PathBuf;

use pretty_assertions::assert_eq;

use rulebook_parser::{diff_files, parse_file, RulesData, VersionDiff};

/// Path to a fixture file.
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Parse the 2.1 fixture edition.
fn parse_fixture() -> RulesData {
    parse_file(&fixture_path("rules-2.1.txt")).expect("fixture should parse")
}

#[test]
fn test_document_metadata_from_filename_and_text() {
    let data = parse_fixture();
    assert_eq!(data.version, "2.1");
    assert_eq!(data.last_updated, "March 3, 2025");
}

#[test]
fn test_document_structure() {
    let data = parse_fixture();

    let ids: Vec<&str> = data.sections.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "100", "100.1", "100.2", "100.3", "103", "103.1", "103.1.a", "103.1.b", "103.2",
            "105", "105.1.a", "400", "400.1", "400.1.a", "601", "601.1",
        ]
    );

    let top: Vec<&str> = data
        .top_level_sections()
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(top, vec!["100", "103", "105", "400", "601"]);

    assert_eq!(
        data.section("103").expect("known id").children,
        vec!["103.1", "103.2"]
    );
    assert_eq!(
        data.section("103.1").expect("known id").children,
        vec!["103.1.a", "103.1.b"]
    );
}

#[test]
fn test_index_completeness() {
    let data = parse_fixture();

    assert_eq!(data.index.len(), data.sections.len());
    for section in &data.sections {
        let indexed = data.section(&section.id).expect("every id is indexed");
        assert_eq!(indexed.id, section.id);
    }
}

#[test]
fn test_level_monotonicity() {
    let data = parse_fixture();

    for section in &data.sections {
        if let Some(parent_id) = &section.parent_id {
            let parent = data.section(parent_id).expect("parent exists in index");
            assert!(
                parent.level < section.level,
                "{} (level {}) must be deeper than parent {} (level {})",
                section.id,
                section.level,
                parent.id,
                parent.level
            );
        }
    }
}

#[test]
fn test_children_parent_symmetry() {
    let data = parse_fixture();

    for parent in &data.sections {
        for child_id in &parent.children {
            let child = data.section(child_id).expect("child exists in index");
            assert_eq!(child.parent_id.as_deref(), Some(parent.id.as_str()));
        }
    }
    for section in &data.sections {
        if let Some(parent_id) = &section.parent_id {
            let parent = data.section(parent_id).expect("parent exists in index");
            assert!(parent.children.contains(&section.id));
        }
    }
}

#[test]
fn test_skipped_level_tolerance() {
    let data = parse_fixture();

    // 105.1 never appears in the source; 105.1.a links straight to 105
    let detail = data.section("105.1.a").expect("known id");
    assert_eq!(detail.level, 2);
    assert_eq!(detail.parent_id.as_deref(), Some("105"));
}

#[test]
fn test_multi_line_body_and_paragraph_break() {
    let data = parse_fixture();

    let section = data.section("100.2").expect("known id");
    assert_eq!(
        section.content,
        "When the text of a card contradicts these rules, the card takes\nprecedence. See rule 601."
    );
    assert_eq!(
        section.title,
        "When the text of a card contradicts these rules, the card takes"
    );

    let spell = data.section("601.1").expect("known id");
    assert_eq!(
        spell.content,
        "A spell is cast in several steps.\n\nCasting a spell requires announcing it and paying its costs."
    );
}

#[test]
fn test_cross_references_and_backlinks() {
    let data = parse_fixture();

    assert_eq!(data.section("100.2").expect("known id").cross_refs, vec!["601"]);
    assert_eq!(data.section("103.2").expect("known id").cross_refs, vec!["400.1"]);

    let referencing: Vec<&str> = data
        .referencing_sections("400.1")
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(referencing, vec!["103.2"]);
}

#[test]
fn test_idempotence() {
    let first = parse_fixture();
    let second = parse_fixture();
    assert_eq!(first, second);
}

#[test]
fn test_json_round_trip_preserves_structure() {
    let data = parse_fixture();
    let json = rulebook_parser::json::generate_json(&data).expect("serializable");
    let restored = RulesData::from_json_str(&json).expect("well-formed JSON");
    assert_eq!(restored, data);
}

#[test]
fn test_edition_diff() {
    let diff = diff_files(
        &fixture_path("rules-2.1.txt"),
        &fixture_path("rules-2.2.txt"),
    )
    .expect("both fixtures parse");

    assert_eq!(diff.old_version, "2.1");
    assert_eq!(diff.new_version, "2.2");
    assert_eq!(diff.added, vec!["103.3"]);
    assert_eq!(diff.modified, vec!["103.2"]);
    assert_eq!(diff.removed, vec!["400.1.a"]);
}

#[test]
fn test_diff_partition_over_fixtures() {
    let old = parse_file(&fixture_path("rules-2.1.txt")).expect("fixture should parse");
    let new = parse_file(&fixture_path("rules-2.2.txt")).expect("fixture should parse");
    let diff = VersionDiff::between(&old, &new);

    for id in &diff.added {
        assert!(!old.index.contains_key(id));
        assert!(new.index.contains_key(id));
    }
    for id in &diff.removed {
        assert!(old.index.contains_key(id));
        assert!(!new.index.contains_key(id));
    }
    for id in &diff.modified {
        assert!(old.index.contains_key(id));
        assert!(new.index.contains_key(id));
    }

    for id in old.index.keys() {
        if new.index.contains_key(id) && !diff.modified.contains(id) {
            assert_eq!(old.index[id].content, new.index[id].content);
        }
    }
}

#[test]
fn test_missing_source_file_is_fatal() {
    let err = parse_file(&fixture_path("rules-9.9.txt")).expect_err("read must fail");
    assert!(err.to_string().contains("rules-9.9.txt"));
}
