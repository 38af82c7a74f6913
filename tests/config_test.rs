//! Configuration file handling against real conversions.

use std::fs;

use pdfreflow::config::{section_for_input, CONFIG_FILE_NAME};
use pdfreflow::{Block, ConfigFile, Error, Reflow, SuppressReason};

const BOOK: &str = r##"<pdf2xml>
<page number="1">
<fontspec id="0" size="12" family="Times" color="#000000"/>
<text top="300" left="60" width="400" height="13" font="0">A TALE OF TWO CITIES</text>
</page>
<page number="2">
<text top="20" left="60" width="120" height="13" font="0">Book the First</text>
<text top="100" left="100" width="360" height="13" font="0">It was the best of times,</text>
<text top="114" left="60" width="400" height="13" font="0">it was the worst of times, it was</text>
<text top="128" left="60" width="200" height="13" font="0">the age of wisdom.</text>
</page>
</pdf2xml>"##;

const CONFIG: &str = r#"
["*.xml"]
skip_generator = true

["tale-*.xml"]
title = "A Tale of Two Cities"
header_pos = 40
skip_initial_pages = 1
"#;

#[test]
fn test_matching_sections_drive_conversion() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), CONFIG).unwrap();
    let input = dir.path().join("tale-of-two-cities.xml");
    fs::write(&input, BOOK).unwrap();

    let section = section_for_input(&input).unwrap();
    let result = Reflow::new().with_section(&section).parse(&input).unwrap();

    assert!(matches!(result.blocks[0], Block::Heading { level: 1, .. }));
    assert!(matches!(
        result.blocks[1],
        Block::Suppressed {
            reason: SuppressReason::InitialPages,
            ..
        }
    ));
    assert!(matches!(
        result.blocks[2],
        Block::Suppressed {
            reason: SuppressReason::Header,
            ..
        }
    ));
    assert_eq!(
        result.blocks[3].plain_text(),
        "It was the best of times,\nit was the worst of times, it was\nthe age of wisdom."
    );

    let html = result.to_html().unwrap();
    assert!(html.contains("<title>A Tale of Two Cities</title>"));
    assert!(!html.contains("name=\"generator\""));
}

#[test]
fn test_other_files_only_get_wildcard_section() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), CONFIG).unwrap();
    let input = dir.path().join("notes.xml");
    fs::write(&input, BOOK).unwrap();

    let section = section_for_input(&input).unwrap();
    assert_eq!(section.skip_generator, Some(true));
    assert!(section.title.is_none());

    let result = Reflow::new().with_section(&section).parse(&input).unwrap();
    assert!(!result.blocks.iter().any(Block::is_suppressed));
}

#[test]
fn test_missing_config_file_is_empty_section() {
    let dir = tempfile::tempdir().unwrap();
    let section = section_for_input(dir.path().join("book.pdf")).unwrap();
    assert_eq!(section, Default::default());
}

#[test]
fn test_invalid_config_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "[\"*.pdf\"]\nheader_pos = \"top\"\n").unwrap();

    let err = ConfigFile::load(&path).unwrap_err();
    match err {
        Error::Config(msg) => {
            assert!(msg.contains(CONFIG_FILE_NAME));
            assert!(!msg.contains("Configuration error"));
        }
        other => panic!("unexpected error: {}", other),
    }
}
