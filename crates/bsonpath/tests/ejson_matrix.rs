//! Text codec round-trips and the scalar-to-text asymmetries.

use bsonpath::{ejson, equal, RawDocument};

fn roundtrips(text: &str) {
    let bytes = ejson::parse(text).expect("valid ejson");
    let doc = RawDocument::parse(&bytes).unwrap();

    let relaxed = ejson::to_relaxed_string(&doc).unwrap();
    let from_relaxed = ejson::parse(&relaxed).expect("relaxed output re-parses");
    assert!(
        equal(&bytes, &from_relaxed).unwrap(),
        "relaxed round-trip of {text} via {relaxed}"
    );

    let canonical = ejson::to_canonical_string(&doc).unwrap();
    let from_canonical = ejson::parse(&canonical).expect("canonical output re-parses");
    assert!(
        equal(&bytes, &from_canonical).unwrap(),
        "canonical round-trip of {text} via {canonical}"
    );
    // Canonical preserves the exact wire type, so the bytes come back
    // identical, not merely value-equal.
    assert_eq!(bytes, from_canonical, "canonical bytes of {text}");
}

#[test]
fn roundtrip_matrix() {
    for text in [
        r#"{}"#,
        r#"{"a":1}"#,
        r#"{"a":-2147483648,"b":2147483647}"#,
        r#"{"l":{"$numberLong":"9223372036854775807"}}"#,
        r#"{"l":{"$numberLong":"-9223372036854775808"}}"#,
        r#"{"f":0.5,"g":-1.25e10}"#,
        r#"{"x":{"$numberDouble":"NaN"}}"#,
        r#"{"x":{"$numberDouble":"-Infinity"}}"#,
        r#"{"amt":{"$numberDecimal":"77777809838.97"}}"#,
        r#"{"amt":{"$numberDecimal":"-1.5E+6111"}}"#,
        r#"{"amt":{"$numberDecimal":"0.00"}}"#,
        r#"{"s":"","t":"with \"quotes\" and \\ slashes"}"#,
        r#"{"u":"snowman ☃ and emoji 😀"}"#,
        r#"{"b":true,"n":null}"#,
        r#"{"ts":{"$date":"2022-03-03T12:13:14.456Z"}}"#,
        r#"{"ts":{"$date":0}}"#,
        r#"{"ts":{"$date":-62135596800000}}"#,
        r#"{"bin":{"$binary":{"base64":"","subType":"00"}}}"#,
        r#"{"bin":{"$binary":{"base64":"UHJldGVuZCB0aGlzIGlzIGEgSlBFRw==","subType":"80"}}}"#,
        r#"{"v":[]}"#,
        r#"{"v":[1,[2,[3,[4]]]]}"#,
        r#"{"deep":{"sub1":{"sub2":{"corn":"dog"}}}}"#,
        r#"{"userPrefs":[{"type":"DEP","u":{"favoriteCar":"Bugatti"}},{"type":"X2A","u":{"listOfPrimes":[2,3,5,7,11,13,17,19],"pi":3.1415926}}]}"#,
    ] {
        roundtrips(text);
    }
}

#[test]
fn relaxed_and_canonical_forms_differ_as_specified() {
    let bytes = ejson::parse(
        r#"{"i":42,"ts":{"$date":"2022-03-03T12:13:14.456Z"},"amt":{"$numberDecimal":"10.09"}}"#,
    )
    .unwrap();
    let doc = RawDocument::parse(&bytes).unwrap();
    assert_eq!(
        ejson::to_relaxed_string(&doc).unwrap(),
        r#"{"i":42,"ts":{"$date":"2022-03-03T12:13:14.456Z"},"amt":{"$numberDecimal":"10.09"}}"#
    );
    assert_eq!(
        ejson::to_canonical_string(&doc).unwrap(),
        r#"{"i":{"$numberInt":"42"},"ts":{"$date":1646309594456},"amt":{"$numberDecimal":"10.09"}}"#
    );
}

#[test]
fn scalar_text_and_document_text_disagree_on_purpose() {
    let bytes = ejson::parse(r#"{"ts":{"$date":1646309594456}}"#).unwrap();
    let doc = RawDocument::parse(&bytes).unwrap();

    // Leaf rendering: bare ISO-8601.
    assert_eq!(
        doc.as_text("ts").unwrap().unwrap(),
        "2022-03-03T12:13:14.456Z"
    );
    // Whole-document relaxed rendering: wrapped.
    assert_eq!(
        ejson::to_relaxed_string(&doc).unwrap(),
        r#"{"ts":{"$date":"2022-03-03T12:13:14.456Z"}}"#
    );
}

#[test]
fn scalar_text_binary_is_hex_while_document_text_is_base64() {
    let bytes = ejson::parse(
        r#"{"bin":{"$binary":{"base64":"3q2+7w==","subType":"00"}}}"#,
    )
    .unwrap();
    let doc = RawDocument::parse(&bytes).unwrap();
    assert_eq!(doc.as_text("bin").unwrap().unwrap(), "\\xdeadbeef");
    assert_eq!(
        ejson::to_relaxed_string(&doc).unwrap(),
        r#"{"bin":{"$binary":{"base64":"3q2+7w==","subType":"00"}}}"#
    );
}

#[test]
fn scalar_text_double_uses_fixed_precision() {
    let bytes = ejson::parse(r#"{"pi":3.1415926}"#).unwrap();
    let doc = RawDocument::parse(&bytes).unwrap();
    assert_eq!(doc.as_text("pi").unwrap().unwrap(), "3.141593");
    // Document text keeps the shortest faithful form instead.
    assert_eq!(
        ejson::to_relaxed_string(&doc).unwrap(),
        r#"{"pi":3.1415926}"#
    );
}

#[test]
fn parse_accepts_mixed_forms_in_one_document() {
    let bytes = ejson::parse(
        r#"{"a":{"$numberInt":"5"},"b":6,"ts":{"$date":{"$numberLong":"0"}},"u":{"$date":"1970-01-01T00:00:00Z"}}"#,
    )
    .unwrap();
    let doc = RawDocument::parse(&bytes).unwrap();
    assert_eq!(doc.get_i32("a").unwrap(), Some(5));
    assert_eq!(doc.get_i32("b").unwrap(), Some(6));
    let epoch = doc.get_datetime("ts").unwrap().unwrap();
    assert_eq!(doc.get_datetime("u").unwrap(), Some(epoch));
}

#[test]
fn int64_relaxed_output_may_narrow_but_stays_value_equal() {
    let bytes = ejson::parse(r#"{"l":{"$numberLong":"5"}}"#).unwrap();
    let doc = RawDocument::parse(&bytes).unwrap();
    let relaxed = ejson::to_relaxed_string(&doc).unwrap();
    assert_eq!(relaxed, r#"{"l":5}"#);
    let back = ejson::parse(&relaxed).unwrap();
    assert!(equal(&bytes, &back).unwrap());
    assert!(!bsonpath::binary_equal(&bytes, &back));
}
