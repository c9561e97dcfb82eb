//! Parser behavior on hand-picked queries
//!
//! Each case lists the expected ordered (category, value) pairs.

use facetq::query::testing::assert_facets;
use facetq::query::{parse, FacetList, QueryConfig};
use rstest::rstest;

fn pairs(query: &str) -> Vec<(String, String)> {
    parse(query, &QueryConfig::default())
        .into_iter()
        .map(|facet| (facet.category.clone(), facet.value().to_string()))
        .collect()
}

#[rstest]
#[case::free_text("hello world", &[("text", "hello world")])]
#[case::pair_then_text("category: value hello world", &[("category", "value"), ("text", "hello world")])]
#[case::text_then_pair("hello category: value", &[("text", "hello"), ("category", "value")])]
#[case::mixed(
    r#"status: open priority: "very high" free text"#,
    &[("status", "open"), ("priority", "very high"), ("text", "free text")]
)]
#[case::no_space_after_colon("tag:a tag:b", &[("tag", "a"), ("tag", "b")])]
#[case::quoted_category(r#""due date": today"#, &[("due date", "today")])]
#[case::quoted_category_with_colon(r#""a:b": c"#, &[("a:b", "c")])]
#[case::single_quotes_keep_double(r#"note: 'say "hi"'"#, &[("note", r#"say "hi""#)])]
#[case::double_quotes_keep_single(r#"note: "it's""#, &[("note", "it's")])]
#[case::single_char_fields("a: b", &[("a", "b")])]
#[case::bare_category_takes_last_colon("key:value:more", &[("key:value", "more")])]
#[case::url_value("link: http://example.com", &[("link", "http://example.com")])]
#[case::dangling_category("category:    ", &[])]
#[case::dangling_quoted_category(r#""due date":"#, &[])]
#[case::dangling_category_after_pair("a: b foo:", &[("a", "b")])]
#[case::dangling_category_after_text("hello foo:", &[("text", "hello foo:")])]
#[case::trailing_colon_in_value("a:b:", &[("a", "b:")])]
#[case::trailing_colon_after_value("status:open:", &[("status", "open:")])]
#[case::spaced_trailing_colon_in_value("a: b:", &[("a", "b:")])]
#[case::empty_quoted_value_is_text("tag: ''", &[("text", "tag: ''")])]
#[case::unbalanced_quote(r#"title: "open ended"#, &[("text", r#"title: "open ended"#)])]
#[case::stray_colons(": : :", &[("text", ": : :")])]
#[case::empty("", &[])]
fn parses_query(#[case] query: &str, #[case] expected: &[(&str, &str)]) {
    let expected: Vec<(String, String)> = expected
        .iter()
        .map(|(c, v)| (c.to_string(), v.to_string()))
        .collect();
    assert_eq!(pairs(query), expected, "query: {:?}", query);
}

#[rstest]
#[case("::::")]
#[case("'''")]
#[case("\"\"\"\"")]
#[case("a:'")]
#[case("'a':\"b\":'c'")]
#[case(":a:b:c:")]
#[case("\u{a0}tag:\u{a0}x\u{a0}")]
fn pathological_input_terminates(#[case] query: &str) {
    let facets = parse(query, &QueryConfig::default());
    assert!(facets.iter().all(|facet| !facet.value().is_empty()));
    assert!(facets.iter().all(|facet| !facet.category.is_empty()));
}

#[test]
fn same_category_facets_keep_order() {
    let list = FacetList::from(parse("tag:a tag:b", &QueryConfig::default()));
    assert_facets(&list)
        .count(2)
        .facet(0, "tag", "a")
        .facet(1, "tag", "b");
    assert_eq!(list.count("tag"), 2);
    assert_eq!(list.values("tag"), vec!["a", "b"]);
}

#[test]
fn remainder_category_is_configurable() {
    let config = QueryConfig::new("keyword");
    assert_facets(&parse("rust owner: me async", &config))
        .categories(&["keyword", "owner", "keyword"])
        .values(&["rust", "me", "async"]);
}
