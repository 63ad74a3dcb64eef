mod common;

use common::{context_recording, TestResult};
use jsonskim::{surf_str, surf_value, SurferBuilder};
use serde_json::json;

#[test]
fn definite_child_binding_fires_once() -> TestResult {
    let (mut context, recorders) = context_recording(&["$.a"])?;
    surf_str(&mut context, r#"{"a":1,"b":2}"#)?;
    assert_eq!(
        recorders[0].notifications(),
        vec![("$.a".to_owned(), json!(1))]
    );
    Ok(())
}

#[test]
fn deep_scan_fires_in_document_order() -> TestResult {
    let (mut context, recorders) = context_recording(&["$..author"])?;
    surf_str(
        &mut context,
        r#"{"store":{"book":[{"author":"A"},{"author":"B"}]}}"#,
    )?;
    assert_eq!(
        recorders[0].notifications(),
        vec![
            ("$.store.book[0].author".to_owned(), json!("A")),
            ("$.store.book[1].author".to_owned(), json!("B")),
        ]
    );
    Ok(())
}

#[test]
fn array_index_binding_assembles_the_element() -> TestResult {
    let (mut context, recorders) = context_recording(&["$.x[1]"])?;
    surf_str(&mut context, r#"{"x":[{"v":1},{"v":2},{"v":3}]}"#)?;
    assert_eq!(
        recorders[0].notifications(),
        vec![("$.x[1]".to_owned(), json!({"v": 2}))]
    );
    Ok(())
}

#[test]
fn multi_index_binding_fires_per_index() -> TestResult {
    let (mut context, recorders) = context_recording(&["$.x[0,2]"])?;
    surf_str(&mut context, r#"{"x":[{"v":1},{"v":2},{"v":3}]}"#)?;
    assert_eq!(
        recorders[0].values(),
        vec![json!({"v": 1}), json!({"v": 3})]
    );
    Ok(())
}

#[test]
fn array_slice_binding() -> TestResult {
    let (mut context, recorders) = context_recording(&["$.x[1:3]"])?;
    surf_str(&mut context, r#"{"x":[10,20,30,40]}"#)?;
    assert_eq!(recorders[0].values(), vec![json!(20), json!(30)]);
    Ok(())
}

#[test]
fn wildcard_binding_spans_entries() -> TestResult {
    let (mut context, recorders) = context_recording(&["$.a.*"])?;
    surf_str(&mut context, r#"{"a":{"x":1,"y":{"z":2}}}"#)?;
    assert_eq!(recorders[0].values(), vec![json!(1), json!({"z": 2})]);
    Ok(())
}

#[test]
fn top_level_array_elements() -> TestResult {
    let (mut context, recorders) = context_recording(&["$[*]"])?;
    surf_str(&mut context, r#"[1,[2,3],{"k":4}]"#)?;
    assert_eq!(
        recorders[0].notifications(),
        vec![
            ("$[0]".to_owned(), json!(1)),
            ("$[1]".to_owned(), json!([2, 3])),
            ("$[2]".to_owned(), json!({"k": 4})),
        ]
    );
    Ok(())
}

#[test]
fn sibling_bindings_at_different_depths_coexist() -> TestResult {
    let (mut context, recorders) = context_recording(&["$.store.book", "$..price"])?;
    surf_str(
        &mut context,
        r#"{"store":{"book":[{"price":8},{"price":12}]}}"#,
    )?;
    // The book collector is recording while both price matches fire inside
    // it; every value is still delivered.
    assert_eq!(
        recorders[0].values(),
        vec![json!([{"price": 8}, {"price": 12}])]
    );
    assert_eq!(recorders[1].values(), vec![json!(8), json!(12)]);
    Ok(())
}

#[test]
fn listeners_fire_in_registration_order() -> TestResult {
    use jsonskim::{JsonPathListener, ListenerError, MatchContext};
    use serde_json::Value;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Tag(&'static str, Rc<RefCell<Vec<&'static str>>>);

    impl JsonPathListener<Value> for Tag {
        fn on_value(&self, _: &Value, _: &MatchContext<'_>) -> Result<(), ListenerError> {
            self.1.borrow_mut().push(self.0);
            Ok(())
        }
    }

    let order = Rc::new(RefCell::new(Vec::new()));
    let mut builder = SurferBuilder::new();
    builder.bind("$.a", Tag("first", Rc::clone(&order)))?;
    builder.bind("$.a", Tag("second", Rc::clone(&order)))?;
    let mut context = builder.build()?;
    surf_str(&mut context, r#"{"a":"x"}"#)?;
    assert_eq!(*order.borrow(), vec!["first", "second"]);
    Ok(())
}

#[test]
fn root_binding_receives_the_whole_document() -> TestResult {
    let doc = json!({"a": {"b": [1, 2, {"c": null}]}, "d": true});
    let (mut context, recorders) = context_recording(&["$"])?;
    surf_value(&mut context, &doc)?;
    assert_eq!(recorders[0].notifications(), vec![("$".to_owned(), doc)]);
    Ok(())
}

#[test]
fn nested_arrays_track_indices() -> TestResult {
    let (mut context, recorders) = context_recording(&["$.m[1][0]"])?;
    surf_str(&mut context, r#"{"m":[[1,2],[3,4]]}"#)?;
    assert_eq!(
        recorders[0].notifications(),
        vec![("$.m[1][0]".to_owned(), json!(3))]
    );
    Ok(())
}

#[test]
fn deep_scan_into_array_entry() -> TestResult {
    // The two-pop rule on array close keeps entry frames balanced for
    // shapes like this one.
    let (mut context, recorders) = context_recording(&["$..a[0]"])?;
    surf_str(&mut context, r#"{"x":{"a":[5,6]},"y":{"a":[7]}}"#)?;
    assert_eq!(recorders[0].values(), vec![json!(5), json!(7)]);
    Ok(())
}
