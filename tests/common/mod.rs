use jsonskim::{
    JsonPathListener, ListenerError, MatchContext, SurfError, SurferBuilder, SurfingContext,
};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A listener that records every (path, value) notification it receives.
#[derive(Clone, Default)]
pub struct Recorder {
    seen: Rc<RefCell<Vec<(String, Value)>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded values, in notification order.
    pub fn values(&self) -> Vec<Value> {
        self.seen.borrow().iter().map(|(_, v)| v.clone()).collect()
    }

    /// The recorded (path, value) pairs, in notification order.
    pub fn notifications(&self) -> Vec<(String, Value)> {
        self.seen.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.seen.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.borrow().is_empty()
    }
}

impl JsonPathListener<Value> for Recorder {
    fn on_value(&self, value: &Value, context: &MatchContext<'_>) -> Result<(), ListenerError> {
        self.seen
            .borrow_mut()
            .push((context.json_path().to_owned(), value.clone()));
        Ok(())
    }
}

/// A listener that records values and stops the parse once it has seen
/// `stop_after` of them.
#[derive(Clone)]
pub struct StoppingRecorder {
    pub recorder: Recorder,
    stop_after: usize,
}

impl StoppingRecorder {
    pub fn new(stop_after: usize) -> Self {
        StoppingRecorder {
            recorder: Recorder::new(),
            stop_after,
        }
    }
}

impl JsonPathListener<Value> for StoppingRecorder {
    fn on_value(&self, value: &Value, context: &MatchContext<'_>) -> Result<(), ListenerError> {
        self.recorder.on_value(value, context)?;
        if self.recorder.len() >= self.stop_after {
            context.stop_parsing();
        }
        Ok(())
    }
}

/// A listener that always fails.
pub struct FailingListener;

impl JsonPathListener<Value> for FailingListener {
    fn on_value(&self, _value: &Value, _context: &MatchContext<'_>) -> Result<(), ListenerError> {
        Err("listener exploded".into())
    }
}

/// Builds a context with one recorded binding per expression.
pub fn context_recording(
    expressions: &[&str],
) -> Result<(SurfingContext, Vec<Recorder>), SurfError> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut builder = SurferBuilder::new();
    let mut recorders = Vec::new();
    for expression in expressions {
        let recorder = Recorder::new();
        builder.bind(expression, recorder.clone())?;
        recorders.push(recorder);
    }
    Ok((builder.build()?, recorders))
}
