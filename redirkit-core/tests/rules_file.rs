//! End-to-end rules file generation: documents in, rules text out.

use redirkit_core::{
    build_rules, scan, DocPath, Document, ExistingRules, Metadata, RedirectConfig,
};

fn doc(destination: &str) -> Document {
    Document::new(format!("{}.md", destination), Some(DocPath::parse(destination).unwrap()))
}

fn redirected(destination: &str, from: &str) -> Document {
    doc(destination).with_metadata(Metadata::new().with("RedirectFrom", from))
}

fn netlify() -> RedirectConfig {
    RedirectConfig {
        netlify: true,
        ..RedirectConfig::default()
    }
}

fn rules(docs: &[Document], existing: Option<&str>, config: &RedirectConfig) -> Option<String> {
    let existing = existing.map(|content| ExistingRules {
        path: "_redirects".to_string(),
        content: content.to_string(),
    });
    let set = scan(docs, config).unwrap();
    build_rules(&set, existing.as_ref(), config).map(|artifact| {
        assert_eq!(artifact.destination, "_redirects");
        artifact.content
    })
}

#[test]
fn generates_automatic_redirects() {
    let config = RedirectConfig {
        meta_refresh: false,
        ..netlify()
    };
    let content = rules(&[redirected("a/b/c", "x/y"), doc("d/e")], None, &config).unwrap();
    insta::assert_snapshot!(content, @r"
    # Automatic redirects generated by redirkit
    /x/y /a/b/c
    ");
}

#[test]
fn outputs_existing_file_unchanged() {
    assert_eq!(rules(&[], Some("foobar"), &netlify()).as_deref(), Some("foobar"));
}

#[test]
fn combines_with_existing_file() {
    let content = rules(
        &[redirected("a/b/c", "x/y"), doc("d/e")],
        Some("foobar"),
        &netlify(),
    )
    .unwrap();
    assert_eq!(
        content,
        "foobar\n\n# Automatic redirects generated by redirkit\n/x/y /a/b/c"
    );
}

#[test]
fn no_rules_file_without_redirects() {
    assert_eq!(rules(&[doc("a/b/c"), doc("d/e")], None, &netlify()), None);
}

#[test]
fn prefix_redirects_by_default() {
    let content = rules(&[doc("^.a/c"), doc("d/e")], None, &netlify()).unwrap();
    assert_eq!(content, "# Prefix redirects generated by redirkit\n/.a /^.a");
}

#[test]
fn prefix_redirects_can_be_disabled() {
    let config = RedirectConfig {
        netlify_prefix: false,
        ..netlify()
    };
    assert_eq!(rules(&[doc("^.a/c"), doc("d/e")], None, &config), None);
}

#[test]
fn nested_prefix_folder() {
    for docs in [
        vec![doc("a/b/^.c/d"), doc("x/y")],
        vec![doc("a/b/^.c/d/e/f"), doc("x/y")],
        vec![doc("a/b/^.c/d/e/f"), doc("a/b/^.c/d/g"), doc("x/y")],
        vec![doc("a/b/^.c/d/^.e"), doc("x/y")],
    ] {
        assert_eq!(
            rules(&docs, None, &netlify()).as_deref(),
            Some("# Prefix redirects generated by redirkit\n/a/b/.c /a/b/^.c")
        );
    }
}

#[test]
fn alternate_prefix() {
    let config = RedirectConfig {
        prefix: "foo".to_string(),
        ..netlify()
    };
    let content = rules(&[doc("foo.a/c"), doc("d/e")], None, &config).unwrap();
    assert_eq!(content, "# Prefix redirects generated by redirkit\n/.a /foo.a");
}

#[test]
fn prefix_redirect_for_files() {
    assert_eq!(
        rules(&[doc("^.a"), doc("x/y")], None, &netlify()).as_deref(),
        Some("# Prefix redirects generated by redirkit\n/.a /^.a")
    );
    assert_eq!(
        rules(&[doc("fizz/^.a"), doc("x/y")], None, &netlify()).as_deref(),
        Some("# Prefix redirects generated by redirkit\n/fizz/.a /fizz/^.a")
    );
}

#[test]
fn combines_all_sections() {
    let config = RedirectConfig {
        meta_refresh: false,
        ..netlify()
    };
    let docs = [
        redirected("a/b/c", "x/y"),
        doc("d/e"),
        doc("a/b/^.c/d/e/f"),
        doc("a/b/^.c/d/g"),
    ];
    let content = rules(&docs, Some("foobar"), &config).unwrap();
    insta::assert_snapshot!(content, @r"
    foobar

    # Prefix redirects generated by redirkit
    /a/b/.c /a/b/^.c

    # Automatic redirects generated by redirkit
    /x/y /a/b/c
    ");
}

#[test]
fn output_is_idempotent() {
    let docs = [
        redirected("a/b/c", "x/y"),
        redirected("q", "old/q"),
        doc("^.well-known/security"),
    ];
    let first = rules(&docs, Some("/legacy /new 301\n"), &netlify());
    let second = rules(&docs, Some("/legacy /new 301\n"), &netlify());
    assert!(first.is_some());
    assert_eq!(first, second);
}
