mod common;

use common::{Recorder, StoppingRecorder, TestResult};
use jsonskim::{surf_str, JsonSaxHandler, SurferBuilder};
use serde_json::json;

#[test]
fn nested_match_suppressed_while_outer_collector_records() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();
    let book = Recorder::new();
    let author = Recorder::new();
    let mut builder = SurferBuilder::new();
    builder.bind("$.store.book", book.clone())?;
    builder.bind("$..author", author.clone())?;
    builder.skip_overlapped_path()?;
    let mut context = builder.build()?;
    surf_str(&mut context, r#"{"store":{"book":[{"author":"A"}]}}"#)?;

    assert_eq!(book.values(), vec![json!([{"author": "A"}])]);
    assert!(author.is_empty());
    Ok(())
}

#[test]
fn without_suppression_both_bindings_fire() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();
    let book = Recorder::new();
    let author = Recorder::new();
    let mut builder = SurferBuilder::new();
    builder.bind("$.store.book", book.clone())?;
    builder.bind("$..author", author.clone())?;
    let mut context = builder.build()?;
    surf_str(&mut context, r#"{"store":{"book":[{"author":"A"}]}}"#)?;

    assert_eq!(book.values(), vec![json!([{"author": "A"}])]);
    assert_eq!(author.values(), vec![json!("A")]);
    Ok(())
}

#[test]
fn recursive_shape_fires_only_at_the_outermost_position() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();
    // Both bindings match the outer "$.a.b" position (a deep scan spans
    // zero levels); the repetition of the same shape further down is
    // suppressed while the outer collector records.
    let indefinite = Recorder::new();
    let definite = Recorder::new();
    let mut builder = SurferBuilder::new();
    builder.bind("$..a.b", indefinite.clone())?;
    builder.bind("$.a.b", definite.clone())?;
    builder.skip_overlapped_path()?;
    let mut context = builder.build()?;
    surf_str(&mut context, r#"{"a":{"b":{"a":{"b":42}}}}"#)?;

    let outer = json!({"a": {"b": 42}});
    assert_eq!(definite.notifications(), vec![("$.a.b".to_owned(), outer.clone())]);
    assert_eq!(indefinite.notifications(), vec![("$.a.b".to_owned(), outer)]);
    // The inner 42 never fires for either binding.
    Ok(())
}

#[test]
fn suppression_resumes_after_the_outer_match_closes() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();
    let item = Recorder::new();
    let value = Recorder::new();
    let mut builder = SurferBuilder::new();
    builder.bind("$.outer", item.clone())?;
    builder.bind("$..v", value.clone())?;
    builder.skip_overlapped_path()?;
    let mut context = builder.build()?;
    surf_str(&mut context, r#"{"outer":{"v":1},"after":{"v":2}}"#)?;

    assert_eq!(item.values(), vec![json!({"v": 1})]);
    // The "$..v" match inside "outer" is suppressed; the one after it fires.
    assert_eq!(value.notifications(), vec![("$.after.v".to_owned(), json!(2))]);
    Ok(())
}

#[test]
fn listener_stop_halts_remaining_notifications() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();
    let listener = StoppingRecorder::new(2);
    let mut builder = SurferBuilder::new();
    builder.bind("$[*]", listener.clone())?;
    let mut context = builder.build()?;
    surf_str(&mut context, r#"[1,2,3,4]"#)?;

    assert_eq!(listener.recorder.values(), vec![json!(1), json!(2)]);
    assert!(context.is_stopped());
    Ok(())
}

#[test]
fn stop_is_idempotent_and_latched() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();
    let recorder = Recorder::new();
    let mut builder = SurferBuilder::new();
    builder.bind("$..n", recorder.clone())?;
    let mut context = builder.build()?;

    context.start_document()?;
    context.start_object()?;
    context.start_object_entry("n")?;
    context.primitive(jsonskim::JsonPrimitive::Int(1))?;
    assert_eq!(recorder.len(), 1);

    context.stop_parsing();
    context.stop_parsing();
    assert!(context.is_stopped());

    // Post-stop events are no-ops and never reach a listener.
    context.start_object_entry("n")?;
    context.primitive(jsonskim::JsonPrimitive::Int(2))?;
    context.end_object()?;
    context.end_document()?;
    assert_eq!(recorder.len(), 1);
    Ok(())
}

#[test]
fn stopping_inside_a_recording_collector_drops_it() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();
    // The collector for "$.a" is still open when the listener stops the
    // parse; it never reaches its closing frame, so it never fires.
    let open = Recorder::new();
    let trigger = StoppingRecorder::new(1);
    let mut builder = SurferBuilder::new();
    builder.bind("$.a", open.clone())?;
    builder.bind("$..k", trigger.clone())?;
    let mut context = builder.build()?;
    surf_str(&mut context, r#"{"a":{"k":1,"rest":[2,3]}}"#)?;

    assert_eq!(trigger.recorder.values(), vec![json!(1)]);
    assert!(open.is_empty());
    Ok(())
}
