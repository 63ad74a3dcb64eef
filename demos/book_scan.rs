//! Scans a bookstore document while it streams through the matcher:
//! authors are printed as they are encountered, cheap books are assembled
//! and printed as whole objects, and the bicycle is fetched as one typed
//! value.

use jsonskim::{collect_one, surf_str, MatchContext, SurferBuilder};
use serde::Deserialize;
use serde_json::Value;

const DOCUMENT: &str = r#"{
    "store": {
        "book": [
            {"category": "reference", "author": "Nigel Rees", "title": "Sayings of the Century", "price": 8.95},
            {"category": "fiction", "author": "Evelyn Waugh", "title": "Sword of Honour", "price": 12.99},
            {"category": "fiction", "author": "Herman Melville", "title": "Moby Dick", "price": 8.99}
        ],
        "bicycle": {"color": "red", "price": 19.95}
    }
}"#;

#[derive(Deserialize, Debug)]
struct Bicycle {
    color: String,
    price: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut builder = SurferBuilder::new();
    builder.bind("$.store.book[*].author", |author: &Value, ctx: &MatchContext| {
        println!("author at {}: {}", ctx.json_path(), author);
        Ok::<(), jsonskim::ListenerError>(())
    })?;
    builder.bind("$..book[0,2]", |book: &Value, _: &MatchContext| {
        println!("cheap shelf: {book}");
        Ok::<(), jsonskim::ListenerError>(())
    })?;
    let mut context = builder.build()?;
    surf_str(&mut context, DOCUMENT)?;

    let bicycle: Option<Bicycle> = collect_one(DOCUMENT, "$.store.bicycle")?;
    if let Some(bicycle) = bicycle {
        println!("the {} bicycle costs {}", bicycle.color, bicycle.price);
    }
    Ok(())
}
