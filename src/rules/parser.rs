//! Rule text parser
//!
//! Grammar:
//!
//! ```text
//! rule        := "if" disjunction "then" consequent ("and" consequent)* ["with" number]
//! disjunction := conjunction ("or" conjunction)*
//! conjunction := primary ("and" primary)*
//! primary     := "(" disjunction ")" | ident "is" hedge* ident
//! consequent  := ident "is" ident
//! hedge       := "not" | "very" | "somewhat"
//! ```

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, alphanumeric1, char, multispace0};
use nom::combinator::{all_consuming, opt, recognize};
use nom::error::{Error as NomError, ErrorKind};
use nom::multi::{many0, many0_count, separated_list1};
use nom::number::complete::double;
use nom::sequence::{delimited, pair, preceded};
use nom::{IResult, Parser};

use crate::rules::norms::Hedge;

/// Rule premise as written, before names are resolved to slots
#[derive(Debug, Clone, PartialEq)]
pub enum Antecedent {
    Proposition {
        variable: String,
        hedges: Vec<Hedge>,
        term: String,
    },
    And(Box<Antecedent>, Box<Antecedent>),
    Or(Box<Antecedent>, Box<Antecedent>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Consequent {
    pub variable: String,
    pub term: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleSyntax {
    pub antecedent: Antecedent,
    pub consequents: Vec<Consequent>,
    pub weight: f64,
}

type PResult<'a, O> = IResult<&'a str, O>;

fn skip_ws(input: &str) -> PResult<'_, &str> {
    multispace0(input)
}

fn identifier(input: &str) -> PResult<'_, &str> {
    preceded(
        multispace0,
        recognize(pair(
            alt((alpha1, tag("_"))),
            many0_count(alt((alphanumeric1, tag("_")))),
        )),
    )
    .parse(input)
}

fn keyword<'a>(kw: &'static str) -> impl FnMut(&'a str) -> PResult<'a, &'a str> {
    move |input: &'a str| {
        let (rest, word) = identifier(input)?;
        if word == kw {
            Ok((rest, word))
        } else {
            Err(nom::Err::Error(NomError::new(input, ErrorKind::Tag)))
        }
    }
}

fn symbol<'a>(c: char) -> impl FnMut(&'a str) -> PResult<'a, char> {
    move |input: &'a str| preceded(multispace0, char(c)).parse(input)
}

fn hedge(input: &str) -> PResult<'_, Hedge> {
    let (rest, word) = identifier(input)?;
    match Hedge::from_keyword(word) {
        Some(h) => Ok((rest, h)),
        None => Err(nom::Err::Error(NomError::new(input, ErrorKind::Tag))),
    }
}

fn proposition(input: &str) -> PResult<'_, Antecedent> {
    let (input, variable) = identifier(input)?;
    let (input, _) = keyword("is")(input)?;
    let (input, hedges) = many0(hedge).parse(input)?;
    let (input, term) = identifier(input)?;
    Ok((
        input,
        Antecedent::Proposition {
            variable: variable.to_string(),
            hedges,
            term: term.to_string(),
        },
    ))
}

fn primary(input: &str) -> PResult<'_, Antecedent> {
    alt((
        delimited(symbol('('), disjunction, symbol(')')),
        proposition,
    ))
    .parse(input)
}

fn conjunction(input: &str) -> PResult<'_, Antecedent> {
    let (input, first) = primary(input)?;
    let (input, rest) = many0(preceded(keyword("and"), primary)).parse(input)?;
    let folded = rest
        .into_iter()
        .fold(first, |acc, next| Antecedent::And(Box::new(acc), Box::new(next)));
    Ok((input, folded))
}

fn disjunction(input: &str) -> PResult<'_, Antecedent> {
    let (input, first) = conjunction(input)?;
    let (input, rest) = many0(preceded(keyword("or"), conjunction)).parse(input)?;
    let folded = rest
        .into_iter()
        .fold(first, |acc, next| Antecedent::Or(Box::new(acc), Box::new(next)));
    Ok((input, folded))
}

fn consequent(input: &str) -> PResult<'_, Consequent> {
    let (input, variable) = identifier(input)?;
    let (input, _) = keyword("is")(input)?;
    let (input, term) = identifier(input)?;
    Ok((
        input,
        Consequent {
            variable: variable.to_string(),
            term: term.to_string(),
        },
    ))
}

fn rule(input: &str) -> PResult<'_, RuleSyntax> {
    let (input, _) = keyword("if")(input)?;
    let (input, antecedent) = disjunction(input)?;
    let (input, _) = keyword("then")(input)?;
    let (input, consequents) = separated_list1(keyword("and"), consequent).parse(input)?;
    let (input, weight) =
        opt(preceded(keyword("with"), preceded(multispace0, double))).parse(input)?;
    let (input, _) = skip_ws(input)?;
    Ok((
        input,
        RuleSyntax {
            antecedent,
            consequents,
            weight: weight.unwrap_or(1.0),
        },
    ))
}

/// Parse one rule of the form `if ... then ... [with w]`
pub fn parse_rule(text: &str) -> Result<RuleSyntax, String> {
    all_consuming(rule)
        .parse(text)
        .map(|(_, parsed)| parsed)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop(variable: &str, hedges: Vec<Hedge>, term: &str) -> Antecedent {
        Antecedent::Proposition {
            variable: variable.to_string(),
            hedges,
            term: term.to_string(),
        }
    }

    #[test]
    fn test_simple_rule() {
        let rule = parse_rule("if strength is low then Lumberjack is high").unwrap();
        assert_eq!(rule.antecedent, prop("strength", vec![], "low"));
        assert_eq!(
            rule.consequents,
            vec![Consequent {
                variable: "Lumberjack".into(),
                term: "high".into()
            }]
        );
        assert_eq!(rule.weight, 1.0);
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let rule = parse_rule("if a is x or b is y and c is z then o is t").unwrap();
        let expected = Antecedent::Or(
            Box::new(prop("a", vec![], "x")),
            Box::new(Antecedent::And(
                Box::new(prop("b", vec![], "y")),
                Box::new(prop("c", vec![], "z")),
            )),
        );
        assert_eq!(rule.antecedent, expected);
    }

    #[test]
    fn test_parentheses_and_hedges() {
        let rule = parse_rule("if (a is not x or b is very y) and c is z then o is t").unwrap();
        let expected = Antecedent::And(
            Box::new(Antecedent::Or(
                Box::new(prop("a", vec![Hedge::Not], "x")),
                Box::new(prop("b", vec![Hedge::Very], "y")),
            )),
            Box::new(prop("c", vec![], "z")),
        );
        assert_eq!(rule.antecedent, expected);
    }

    #[test]
    fn test_multiple_consequents_and_weight() {
        let rule = parse_rule("if a is x then o is low and p is high with 0.5").unwrap();
        assert_eq!(rule.consequents.len(), 2);
        assert_eq!(rule.consequents[1].variable, "p");
        assert_eq!(rule.weight, 0.5);
    }

    #[test]
    fn test_identifiers_with_keyword_prefix() {
        let rule = parse_rule("if android is on then orbit is isolated").unwrap();
        assert_eq!(rule.antecedent, prop("android", vec![], "on"));
        assert_eq!(rule.consequents[0].variable, "orbit");
    }

    #[test]
    fn test_syntax_errors() {
        assert!(parse_rule("a is x then o is t").is_err());
        assert!(parse_rule("if a is x").is_err());
        assert!(parse_rule("if a is x then o is t trailing").is_err());
        assert!(parse_rule("if (a is x then o is t").is_err());
    }
}
