// src/collect.rs
//! One-shot convenience entry points over the builder and the bundled
//! driver: bind a single expression, surf the document, return the typed
//! results.

use crate::context::SurfingContext;
use crate::emitter::surf_str;
use crate::error::SurfError;
use crate::listener::MatchContext;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// Collects every value matched by `expression` in `json`, cast to `T`.
pub fn collect_all<T: DeserializeOwned + 'static>(
    json: &str,
    expression: &str,
) -> Result<Vec<T>, SurfError> {
    let results: Rc<RefCell<Vec<T>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&results);
    let mut builder = SurfingContext::builder();
    builder.bind_typed::<T, _>(expression, move |value, _context: &MatchContext<'_>| {
        sink.borrow_mut().push(value);
        Ok(())
    })?;
    let mut context = builder.build()?;
    surf_str(&mut context, json)?;
    let collected = std::mem::take(&mut *results.borrow_mut());
    Ok(collected)
}

/// Collects the first value matched by `expression` in `json` and stops
/// the parse as soon as it fires.
pub fn collect_one<T: DeserializeOwned + 'static>(
    json: &str,
    expression: &str,
) -> Result<Option<T>, SurfError> {
    let result: Rc<RefCell<Option<T>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&result);
    let mut builder = SurfingContext::builder();
    builder.bind_typed::<T, _>(expression, move |value, context: &MatchContext<'_>| {
        let mut slot = sink.borrow_mut();
        if slot.is_none() {
            *slot = Some(value);
            context.stop_parsing();
        }
        Ok(())
    })?;
    let mut context = builder.build()?;
    surf_str(&mut context, json)?;
    let collected = result.borrow_mut().take();
    Ok(collected)
}

/// Collects every raw value matched by `expression`, without casting.
pub fn select_all(json: &str, expression: &str) -> Result<Vec<Value>, SurfError> {
    collect_all::<Value>(json, expression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    const SAMPLE: &str = r#"{
        "store": {
            "book": [
                {"author": "Nigel Rees", "price": 8.95},
                {"author": "Evelyn Waugh", "price": 12.99}
            ]
        }
    }"#;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Book {
        author: String,
        price: f64,
    }

    #[test]
    fn collect_all_casts_every_match() {
        let books: Vec<Book> = collect_all(SAMPLE, "$.store.book[*]").unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].author, "Nigel Rees");
        assert_eq!(books[1].author, "Evelyn Waugh");
    }

    #[test]
    fn collect_one_stops_after_first_match() {
        let author: Option<String> = collect_one(SAMPLE, "$..author").unwrap();
        assert_eq!(author.as_deref(), Some("Nigel Rees"));
    }

    #[test]
    fn collect_one_returns_none_without_match() {
        let missing: Option<String> = collect_one(SAMPLE, "$.store.magazine").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn select_all_keeps_raw_values() {
        let prices = select_all(SAMPLE, "$..price").unwrap();
        assert_eq!(prices, vec![serde_json::json!(8.95), serde_json::json!(12.99)]);
    }
}
