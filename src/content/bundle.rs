//! Data bundle: the four JSON sources merged into one script-loadable object.

use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Map, Value};
use std::path::{Path, PathBuf};

use super::models::Bundle;

/// Global the generated script assigns the bundle to.
pub const GLOBAL_NAME: &str = "window.INSURANCE_DATA";

/// Source files, in bundle key order.
pub const SOURCES: [&str; 4] = ["categories", "authors", "pages", "posts"];

#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("script does not assign window.INSURANCE_DATA")]
    NotABundleScript,
    #[error("invalid bundle contents: {0}")]
    Shape(#[source] serde_json::Error),
}

/// Read the four source documents from `dir` as untyped JSON.
///
/// The values are kept untyped so that writing them back out loses nothing.
pub fn read_sources(dir: &Path) -> Result<Map<String, Value>, BundleError> {
    let mut bundle = Map::new();
    for name in SOURCES {
        let path = dir.join(format!("{}.json", name));
        let text = std::fs::read_to_string(&path).map_err(|source| BundleError::Read {
            path: path.clone(),
            source,
        })?;
        let value = serde_json::from_str(&text).map_err(|source| BundleError::Parse {
            path: path.clone(),
            source,
        })?;
        bundle.insert(name.to_string(), value);
    }
    Ok(bundle)
}

/// Render the bundle as the `data.js` script body.
pub fn to_script(bundle: &Map<String, Value>) -> Result<String, BundleError> {
    let mut json = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut json, formatter);
    bundle.serialize(&mut serializer).map_err(BundleError::Shape)?;
    let json = String::from_utf8(json).unwrap_or_default();
    Ok(format!("{} = {};", GLOBAL_NAME, json))
}

pub fn write_script(bundle: &Map<String, Value>, output: &Path) -> Result<(), BundleError> {
    let script = to_script(bundle)?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| BundleError::Write {
            path: output.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(output, script).map_err(|source| BundleError::Write {
        path: output.to_path_buf(),
        source,
    })
}

/// Extract the JSON object from a generated script.
pub fn parse_script(script: &str) -> Result<Value, BundleError> {
    let json = script
        .trim()
        .strip_prefix(GLOBAL_NAME)
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix('='))
        .map(|rest| rest.trim().trim_end_matches(';'))
        .ok_or(BundleError::NotABundleScript)?;
    serde_json::from_str(json).map_err(BundleError::Shape)
}

/// Load a typed bundle from a generated `data.js`.
pub fn load_script(path: &Path) -> Result<Bundle, BundleError> {
    let text = std::fs::read_to_string(path).map_err(|source| BundleError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value = parse_script(&text)?;
    serde_json::from_value(value).map_err(BundleError::Shape)
}

/// Load a typed bundle straight from the source directory.
pub fn load_dir(dir: &Path) -> Result<Bundle, BundleError> {
    let raw = read_sources(dir)?;
    serde_json::from_value(Value::Object(raw)).map_err(BundleError::Shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_sources(dir: &Path) -> Map<String, Value> {
        let docs = [
            (
                "categories",
                json!([{ "id": "life", "name": "Life", "description": "Life cover", "icon": "L" }]),
            ),
            (
                "authors",
                json!([{ "id": "jane", "name": "Jane Doe", "bio": "Editor", "avatar": "/a.png", "extra": 1 }]),
            ),
            (
                "pages",
                json!({ "about": { "title": "About", "content": "## Who we are" } }),
            ),
            (
                "posts",
                json!([{
                    "id": "term-life", "title": "Term Life", "excerpt": "e", "content": "c",
                    "date": "2025-06-01", "category": "life", "author": "jane",
                    "image": "/t.jpg", "altText": "t", "featured": true
                }]),
            ),
        ];
        let mut expected = Map::new();
        for (name, value) in docs {
            let text = serde_json::to_string_pretty(&value).unwrap();
            std::fs::write(dir.join(format!("{}.json", name)), text).unwrap();
            expected.insert(name.to_string(), value);
        }
        expected
    }

    #[test]
    fn test_bundle_round_trip_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let expected = write_sources(dir.path());

        let bundle = read_sources(dir.path()).unwrap();
        let output = dir.path().join("scripts").join("data.js");
        write_script(&bundle, &output).unwrap();

        let script = std::fs::read_to_string(&output).unwrap();
        assert!(script.starts_with("window.INSURANCE_DATA = {"));
        assert!(script.ends_with("};"));

        let parsed = parse_script(&script).unwrap();
        for name in SOURCES {
            assert_eq!(parsed[name], expected[name], "{} differs", name);
        }
    }

    #[test]
    fn test_script_uses_four_space_indent_and_source_order() {
        let mut bundle = Map::new();
        for name in SOURCES {
            bundle.insert(name.to_string(), json!([]));
        }
        let script = to_script(&bundle).unwrap();
        assert!(script.contains("\n    \"categories\": []"));
        let positions: Vec<usize> = SOURCES.iter().map(|n| script.find(n).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_typed_load_from_dir_and_script_agree() {
        let dir = tempfile::tempdir().unwrap();
        write_sources(dir.path());
        let from_dir = load_dir(dir.path()).unwrap();

        let output = dir.path().join("data.js");
        write_script(&read_sources(dir.path()).unwrap(), &output).unwrap();
        let from_script = load_script(&output).unwrap();

        assert_eq!(from_dir, from_script);
        assert_eq!(from_dir.posts[0].alt(), "t");
        assert!(from_dir.pages.contains_key("about"));
    }

    #[test]
    fn test_missing_source_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        write_sources(dir.path());
        std::fs::remove_file(dir.path().join("authors.json")).unwrap();

        let err = read_sources(dir.path()).unwrap_err();
        assert!(matches!(err, BundleError::Read { .. }));
        assert!(err.to_string().contains("authors.json"));
    }

    #[test]
    fn test_malformed_source_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        write_sources(dir.path());
        std::fs::write(dir.path().join("posts.json"), "[{ not json").unwrap();

        let err = read_sources(dir.path()).unwrap_err();
        assert!(matches!(err, BundleError::Parse { .. }));
        assert!(err.to_string().contains("posts.json"));
    }

    #[test]
    fn test_parse_script_rejects_other_scripts() {
        assert!(matches!(
            parse_script("console.log(1);"),
            Err(BundleError::NotABundleScript)
        ));
    }
}
