//! Parser for declared type expressions with support for nested generics
//!
//! This module uses nom to parse type expressions like:
//! - `PropertyBox`
//! - `Vec<PropertyBox>`
//! - `std::collections::HashMap<String, PropertyBox>`
//! - `Option<Vec<T>>`
//!
//! Module paths are stripped so `std::collections::HashMap` is recorded as `HashMap`.

use nom::bytes::complete::{tag, take_while, take_while1};
use nom::character::complete::{char, multispace0};
use nom::combinator::{opt, recognize};
use nom::multi::separated_list1;
use nom::sequence::{delimited, pair, preceded};
use nom::{IResult, Parser};

use super::declared_type::{DeclaredType, TypeArgument};

/// Parse an identifier (alphanumeric + underscore, not starting with digit)
fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_alphabetic() || c == '_'),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))
    .parse(input)
}

/// Parse a module qualified path (`std::collections::HashMap`)
fn type_path(input: &str) -> IResult<&str, &str> {
    recognize(separated_list1(tag("::"), identifier)).parse(input)
}

/// Parse generic arguments recursively
fn generics(input: &str) -> IResult<&str, Vec<TypeArgument>> {
    delimited(
        preceded(multispace0, char('<')),
        separated_list1(preceded(multispace0, char(',')), type_argument),
        preceded(multispace0, char('>')),
    )
    .parse(input)
}

fn type_argument(input: &str) -> IResult<&str, TypeArgument> {
    let (input, declared) = declared_type(input)?;
    Ok((input, TypeArgument::from_parsed(declared)))
}

fn declared_type(input: &str) -> IResult<&str, DeclaredType> {
    let (input, path) = preceded(multispace0, type_path).parse(input)?;
    let (input, arguments) = opt(generics).parse(input)?;
    Ok((
        input,
        DeclaredType::with_arguments(simplify_path(path), arguments.unwrap_or_default()),
    ))
}

/// Take just the type name without module path
/// "std::collections::HashMap" -> "HashMap"
fn simplify_path(path: &str) -> &str { path.rsplit("::").next().unwrap_or(path) }

/// Parse a complete type expression
pub fn parse_declared_type(input: &str) -> Result<DeclaredType, String> {
    match declared_type(input) {
        Ok((remaining, declared)) => {
            if !remaining.trim().is_empty() {
                return Err(format!(
                    "Unexpected characters after type expression: {}",
                    remaining.trim()
                ));
            }
            Ok(declared)
        }
        Err(e) => Err(format!("Failed to parse type expression: {e:?}")),
    }
}
