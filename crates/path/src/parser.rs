//! A `nom`-based compiler for textual JSONPath expressions.
//!
//! Supported forms: `$` root, `.key` / `['key']` children, `.*` / `[*]`
//! wildcards, `[3]` indices, `[1:4]` half-open slices with optional bounds,
//! and `..` deep scan. A comma-separated index list (`[0,2]`) fans out into
//! one compiled path per index, which is why [`compile`] returns a `Vec`.

use crate::error::PathError;
use crate::expression::JsonPath;
use crate::operator::PathOperator;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{is_not, tag, take_while},
    character::complete::{alpha1, char, u64 as nom_u64},
    combinator::{map, opt, recognize},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, separated_pair},
};

// A segment may fan out into several alternative operator sequences
// (multi-index brackets); everything else yields exactly one.
type SegmentAlternatives = Vec<Vec<PathOperator>>;

// --- Main Public Compiler ---

/// Compiles a JSONPath expression into one or more operator sequences.
pub fn compile(input: &str) -> Result<Vec<JsonPath>, PathError> {
    match json_path(input.trim()) {
        Ok(("", alternatives)) => alternatives.into_iter().map(JsonPath::new).collect(),
        Ok((rem, _)) => Err(PathError::Parse(
            input.to_string(),
            format!("Compiler did not consume all input. Remainder: '{}'", rem),
        )),
        Err(e) => Err(PathError::Parse(input.to_string(), e.to_string())),
    }
}

/// Compiles an expression that must denote a single path.
pub fn compile_one(input: &str) -> Result<JsonPath, PathError> {
    let mut paths = compile(input)?;
    if paths.len() != 1 {
        return Err(PathError::Parse(
            input.to_string(),
            "Expression expands to more than one path".to_string(),
        ));
    }
    Ok(paths.remove(0))
}

// --- Combinators ---

fn json_path(input: &str) -> IResult<&str, Vec<Vec<PathOperator>>> {
    let (input, _) = char('$').parse(input)?;
    let (input, segments) = many0(segment).parse(input)?;

    // Cross-product of per-segment alternatives; all but multi-index
    // segments contribute a single alternative.
    let mut paths: Vec<Vec<PathOperator>> = vec![vec![PathOperator::Root]];
    for alternatives in segments {
        let mut expanded = Vec::with_capacity(paths.len() * alternatives.len());
        for prefix in &paths {
            for alternative in &alternatives {
                let mut path = prefix.clone();
                path.extend(alternative.iter().cloned());
                expanded.push(path);
            }
        }
        paths = expanded;
    }
    Ok((input, paths))
}

fn segment(input: &str) -> IResult<&str, SegmentAlternatives> {
    // `..` must be tried before `.`; both before brackets.
    alt((deep_scan_segment, dot_segment, bracket_segment)).parse(input)
}

// --- Deep Scan ---

fn deep_scan_segment(input: &str) -> IResult<&str, SegmentAlternatives> {
    let (input, _) = tag("..").parse(input)?;
    let (input, target) = opt(deep_scan_target).parse(input)?;
    let alternatives = match target {
        Some(target) => target
            .into_iter()
            .map(|ops| {
                let mut seq = vec![PathOperator::DeepScan];
                seq.extend(ops);
                seq
            })
            .collect(),
        // A trailing `..` stands on its own and matches everything below.
        None => vec![vec![PathOperator::DeepScan]],
    };
    Ok((input, alternatives))
}

fn deep_scan_target(input: &str) -> IResult<&str, SegmentAlternatives> {
    alt((
        map(char('*'), |_| vec![vec![PathOperator::Wildcard]]),
        map(identifier, |key| {
            vec![vec![PathOperator::Child(key.to_string())]]
        }),
        bracket_segment,
    ))
    .parse(input)
}

// --- Dot Segments ---

fn dot_segment(input: &str) -> IResult<&str, SegmentAlternatives> {
    preceded(
        char('.'),
        alt((
            map(char('*'), |_| vec![vec![PathOperator::Wildcard]]),
            map(identifier, |key| {
                vec![vec![PathOperator::Child(key.to_string())]]
            }),
        )),
    )
    .parse(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))
    .parse(input)
}

// --- Bracket Segments ---

fn bracket_segment(input: &str) -> IResult<&str, SegmentAlternatives> {
    delimited(char('['), bracket_body, char(']')).parse(input)
}

fn bracket_body(input: &str) -> IResult<&str, SegmentAlternatives> {
    alt((
        map(char('*'), |_| vec![vec![PathOperator::Wildcard]]),
        map(quoted_key, |key| {
            vec![vec![PathOperator::Child(key.to_string())]]
        }),
        map(slice, |op| vec![vec![op]]),
        map(index_list, |indices| {
            indices
                .into_iter()
                .map(|i| vec![PathOperator::ArrayIndex(i as usize)])
                .collect()
        }),
    ))
    .parse(input)
}

fn quoted_key(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('\''), is_not("'"), char('\'')),
        delimited(char('"'), is_not("\""), char('"')),
    ))
    .parse(input)
}

fn slice(input: &str) -> IResult<&str, PathOperator> {
    map(
        separated_pair(opt(nom_u64), char(':'), opt(nom_u64)),
        |(start, end)| PathOperator::ArraySlice {
            start: start.map(|v| v as usize),
            end: end.map(|v| v as usize),
        },
    )
    .parse(input)
}

fn index_list(input: &str) -> IResult<&str, Vec<u64>> {
    separated_list1(char(','), nom_u64).parse(input)
}
