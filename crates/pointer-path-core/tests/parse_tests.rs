#![allow(clippy::unwrap_used, clippy::expect_used)]

use pointer_path_core::path::Stage;
use pointer_path_core::{PathCompiler, Pointer, PointerError};

#[test]
fn test_parse_nested_paths() {
    let compiler = PathCompiler::new();
    for path in [
        "",
        "/*",
        "/*/foo",
        "/foo",
        "/foo/bar",
        "/foo/bar/2",
        "/foo/bar/*/baz",
        "/foo/bar/**/baz",
        "/foo/bar/*/*/baz",
        "/foo/bar/**/*/baz",
        "/foo/bar/**/**/baz",
        "/foo/bar/*/**/baz",
    ] {
        let pointer = compiler.compile_nested(path).unwrap();
        assert_eq!(pointer.path(), path);
        assert_eq!(pointer.stages().last(), Some(&Stage::Terminal));
    }
}

#[test]
fn test_parse_absolute_paths() {
    let compiler = PathCompiler::new();
    for path in ["", "/", "/foo", "/foo/bar/2", "/a~0b/c~1d"] {
        assert_eq!(compiler.compile(path).unwrap().to_string(), path);
    }
}

#[test]
fn test_nested_without_wildcards_is_absolute() {
    let compiler = PathCompiler::new();
    let pointer = compiler.compile_nested("/foo/bar/2").unwrap();
    assert!(pointer.is_absolute());
    assert_eq!(pointer.as_pointer().map(|p| p.segments().len()), Some(3));

    assert!(!compiler.compile_nested("/foo/*").unwrap().is_absolute());
}

#[test]
fn test_escaped_segments() {
    let pointer = Pointer::parse("/a~1b/c~0d").unwrap();
    let keys: Vec<&str> = pointer.segments().iter().map(|s| s.key()).collect();
    assert_eq!(keys, vec!["a/b", "c~d"]);
}

#[test]
fn test_parse_malformed_nested() {
    let compiler = PathCompiler::new();
    for path in ["foo", "foo/*", "/foo*", "/***", "/foo/b*r", "/foo/~2"] {
        let err = compiler.compile_nested(path).unwrap_err();
        assert!(
            matches!(err, PointerError::MalformedPath { .. }),
            "{} should be malformed, got {:?}",
            path,
            err
        );
    }
}

#[test]
fn test_parse_wildcard_in_absolute_fails() {
    let compiler = PathCompiler::new();
    for path in ["/*", "/foo/**/bar"] {
        assert!(matches!(
            compiler.compile(path),
            Err(PointerError::MalformedPath { .. })
        ));
    }
}

#[test]
fn test_malformed_error_names_path() {
    let err = PathCompiler::new().compile_nested("foo/bar").unwrap_err();
    assert!(err.to_string().contains("'foo/bar'"));
}
