#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn IncludePattern___parse___literal_file() {
    let pattern = IncludePattern::parse("README.md").unwrap();

    assert_eq!(pattern, IncludePattern::Literal(PathBuf::from("README.md")));
}

#[test]
fn IncludePattern___parse___wildcard_splits_directory_and_glob() {
    let pattern = IncludePattern::parse("dist/*.js.map").unwrap();

    assert_eq!(
        pattern,
        IncludePattern::Wildcard {
            dir: PathBuf::from("dist"),
            glob: "*.js.map".to_string(),
        }
    );
}

#[test]
fn IncludePattern___parse___recursive_assets_subtree() {
    let pattern = IncludePattern::parse("assets/**/*").unwrap();

    assert_eq!(
        pattern,
        IncludePattern::Recursive {
            dir: PathBuf::from("assets"),
        }
    );
}

#[test]
fn IncludePattern___parse___wildcard_without_directory() {
    let pattern = IncludePattern::parse("*.md").unwrap();

    assert_eq!(pattern.base(), Path::new(""));
    assert!(pattern.matches_file_name("README.md"));
}

#[test_case(""; "empty")]
#[test_case("/etc/passwd"; "absolute")]
#[test_case("../secret"; "parent escape")]
#[test_case("dist/**/*.js"; "recursive with file glob")]
#[test_case("**/*"; "recursive without directory")]
#[test_case("src/*/index.js"; "wildcard in directory")]
#[test_case("assets*/**/*"; "wildcard recursive directory")]
#[test_case("dist/"; "trailing separator")]
fn IncludePattern___parse___rejects_unsupported_syntax(pattern: &str) {
    let err = IncludePattern::parse(pattern).unwrap_err();

    assert!(matches!(err, PackError::InvalidPattern(_)));
}

#[test]
fn IncludePattern___defaults___parses_every_default_pattern() {
    let patterns = IncludePattern::defaults().unwrap();

    assert_eq!(patterns.len(), DEFAULT_INCLUDE_PATTERNS.len());
    assert!(matches!(patterns[0], IncludePattern::Wildcard { .. }));
    assert!(matches!(patterns[3], IncludePattern::Literal(_)));
    assert!(matches!(patterns[8], IncludePattern::Recursive { .. }));
}

#[test_case("dist/*.js")]
#[test_case("package.json")]
#[test_case("assets/**/*")]
#[test_case("*.md")]
fn IncludePattern___display___renders_original_form(pattern: &str) {
    assert_eq!(IncludePattern::parse(pattern).unwrap().to_string(), pattern);
}

#[test]
fn IncludePattern___matches_file_name___false_for_literal_and_recursive() {
    let literal = IncludePattern::parse("README.md").unwrap();
    let recursive = IncludePattern::parse("assets/**/*").unwrap();

    assert!(!literal.matches_file_name("README.md"));
    assert!(!recursive.matches_file_name("logo.png"));
}

// ============================================================================
// Glob matching
// ============================================================================

#[test_case("*.js", "index.js", true)]
#[test_case("*.js", ".js", true; "star matches empty")]
#[test_case("*.js", "index.js.map", false; "suffix must end the name")]
#[test_case("*.js", "index.json", false; "dot is literal")]
#[test_case("*.js", "indexjs", false)]
#[test_case("*.js.map", "index.js.map", true)]
#[test_case("*.d.ts", "index.d.ts", true)]
#[test_case("*.d.ts", "index.ts", false)]
#[test_case("*", "anything", true)]
#[test_case("*", "", true; "star matches empty name")]
#[test_case("icon.*", "icon.png", true)]
#[test_case("icon.*", "favicon.png", false; "prefix must start the name")]
#[test_case("a*b*c", "aXXbYYc", true)]
#[test_case("a*b*c", "abcabc", true; "backtracks past early match")]
#[test_case("a*b*c", "aXXbYY", false)]
#[test_case("**", "x", true; "double star is two stars")]
#[test_case("exact", "exact", true)]
#[test_case("exact", "exactly", false)]
fn glob_match___matches_whole_name(glob: &str, name: &str, expected: bool) {
    assert_eq!(glob_match(glob, name), expected);
}

#[test]
fn slash_path___joins_components_with_forward_slash() {
    let path: PathBuf = ["assets", "img", "logo.png"].iter().collect();

    assert_eq!(slash_path(&path), "assets/img/logo.png");
}
