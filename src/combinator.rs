//! Nondeterministic backtracking parser combinators.
//!
//! A [`Parser`] is a pure function from an input position to the *set* of
//! ways it can match there, each paired with the remaining input. An empty
//! result set means the branch failed; more than one entry means the input
//! matched in more than one structurally distinct way. There is no mutable
//! parser state and no exception-driven backtracking: alternatives are
//! explored by unioning result sets.
//!
//! [`satisfy`] is the sole token-level building block and [`Parser::bind`]
//! is the only primitive that threads the input position; everything else
//! is derived from those two plus [`succeed`].
//!
//! ## Examples
//!
//! ```rust
//! use wifi_qr::combinator::{expect, one_or_more_string};
//!
//! let digits = one_or_more_string(wifi_qr::combinator::satisfy(|c| c.is_ascii_digit()));
//! let results = digits.run("123abc");
//! // Every prefix length survives; the longest match comes first.
//! assert_eq!(results[0], ("123".to_string(), "abc"));
//! assert_eq!(results.len(), 3);
//! # let _ = expect('a');
//! ```

use std::rc::Rc;

/// A backtracking parser over a borrowed character sequence.
///
/// Running a parser yields every surviving parse as a `(value, remaining)`
/// pair. Parsers are cheap to clone (they share their underlying closure)
/// and are total: absence of a match is an empty result set, never a panic
/// or an error.
pub struct Parser<'a, A>(Rc<dyn Fn(&'a str) -> Vec<(A, &'a str)> + 'a>);

impl<'a, A> Clone for Parser<'a, A> {
    fn clone(&self) -> Self {
        Parser(Rc::clone(&self.0))
    }
}

impl<'a, A: 'a> Parser<'a, A> {
    fn new(run: impl Fn(&'a str) -> Vec<(A, &'a str)> + 'a) -> Self {
        Parser(Rc::new(run))
    }

    /// Runs the parser, returning every surviving `(value, remaining)` pair.
    pub fn run(&self, input: &'a str) -> Vec<(A, &'a str)> {
        (self.0)(input)
    }

    /// Monadic sequential composition.
    ///
    /// For every `(value, remaining)` this parser produces, runs `f(value)`
    /// against `remaining` and flattens all results into one set. This is
    /// the only combinator that threads the input position.
    pub fn bind<B: 'a>(self, f: impl Fn(A) -> Parser<'a, B> + 'a) -> Parser<'a, B> {
        Parser::new(move |input| {
            self.run(input)
                .into_iter()
                .flat_map(|(value, rest)| f(value).run(rest))
                .collect()
        })
    }
}

/// Always matches, consumes nothing, produces exactly one result.
pub fn succeed<'a, A: Clone + 'a>(value: A) -> Parser<'a, A> {
    Parser::new(move |input| vec![(value.clone(), input)])
}

/// Never matches.
pub fn fail<'a, A: 'a>() -> Parser<'a, A> {
    Parser::new(|_| Vec::new())
}

fn uncons(input: &str) -> Option<(char, &str)> {
    let mut chars = input.chars();
    let first = chars.next()?;
    Some((first, chars.as_str()))
}

/// Consumes exactly one character; fails on empty input.
pub fn any_token<'a>() -> Parser<'a, char> {
    Parser::new(|input| match uncons(input) {
        Some((first, rest)) => vec![(first, rest)],
        None => Vec::new(),
    })
}

/// Consumes one character iff the predicate holds.
pub fn satisfy<'a>(predicate: impl Fn(char) -> bool + 'a) -> Parser<'a, char> {
    any_token().bind(move |c| if predicate(c) { succeed(c) } else { fail() })
}

/// Consumes the expected character.
pub fn expect<'a>(expected: char) -> Parser<'a, char> {
    satisfy(move |c| c == expected)
}

/// Consumes one character that is a member of `set`.
pub fn one_of<'a>(set: &'a str) -> Parser<'a, char> {
    satisfy(move |c| set.contains(c))
}

/// Consumes one character that is *not* a member of `set`.
pub fn none_of<'a>(set: &'a str) -> Parser<'a, char> {
    satisfy(move |c| !set.contains(c))
}

/// Pairs the results of two parsers run in sequence.
pub fn sequence<'a, A, B>(p: Parser<'a, A>, q: Parser<'a, B>) -> Parser<'a, (A, B)>
where
    A: Clone + 'a,
    B: Clone + 'a,
{
    p.bind(move |x| q.clone().bind(move |y| succeed((x.clone(), y))))
}

/// Unions the result sets of both parsers over the same input.
///
/// Both branches are always tried; this is what makes the engine
/// backtracking rather than first-match, and what surfaces grammar
/// ambiguity as multiple surviving results.
pub fn alternative<'a, A: 'a>(p: Parser<'a, A>, q: Parser<'a, A>) -> Parser<'a, A> {
    Parser::new(move |input| {
        let mut results = p.run(input);
        results.extend(q.run(input));
        results
    })
}

/// Zero-or-more repetition.
///
/// Because [`alternative`] does not short-circuit, every repetition length
/// that parses survives as its own result.
pub fn many<'a, A: Clone + 'a>(p: Parser<'a, A>) -> Parser<'a, Vec<A>> {
    let rest_of = p.clone();
    let repeat = p.bind(move |first| {
        many(rest_of.clone()).bind(move |rest| {
            let mut items = Vec::with_capacity(rest.len() + 1);
            items.push(first.clone());
            items.extend(rest);
            succeed(items)
        })
    });
    alternative(repeat, succeed(Vec::new()))
}

/// One-or-more repetition.
pub fn one_or_more<'a, A: Clone + 'a>(p: Parser<'a, A>) -> Parser<'a, Vec<A>> {
    let rest_of = p.clone();
    p.bind(move |first| {
        many(rest_of.clone()).bind(move |rest| {
            let mut items = Vec::with_capacity(rest.len() + 1);
            items.push(first.clone());
            items.extend(rest);
            succeed(items)
        })
    })
}

/// Zero-or-more repetition of a character parser, collected into a `String`.
pub fn many_string<'a>(p: Parser<'a, char>) -> Parser<'a, String> {
    let rest_of = p.clone();
    let repeat = p.bind(move |first| {
        many_string(rest_of.clone()).bind(move |rest| {
            let mut text = String::with_capacity(first.len_utf8() + rest.len());
            text.push(first);
            text.push_str(&rest);
            succeed(text)
        })
    });
    alternative(repeat, succeed(String::new()))
}

/// One-or-more repetition of a character parser, collected into a `String`.
pub fn one_or_more_string<'a>(p: Parser<'a, char>) -> Parser<'a, String> {
    let rest_of = p.clone();
    p.bind(move |first| {
        many_string(rest_of.clone()).bind(move |rest| {
            let mut text = String::with_capacity(first.len_utf8() + rest.len());
            text.push(first);
            text.push_str(&rest);
            succeed(text)
        })
    })
}

/// Matches the expected string, derived from [`expect`] by recursion.
pub fn literal<'a>(expected: &'static str) -> Parser<'a, &'static str> {
    match uncons(expected) {
        None => succeed(expected),
        Some((first, rest)) => {
            expect(first).bind(move |_| literal(rest).bind(move |_| succeed(expected)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn succeed_consumes_nothing() {
        assert_eq!(succeed(7).run("abc"), vec![(7, "abc")]);
    }

    #[test]
    fn fail_produces_empty_result_set() {
        assert!(fail::<i32>().run("abc").is_empty());
    }

    #[test]
    fn any_token_consumes_one_char() {
        assert_eq!(any_token().run("ab"), vec![('a', "b")]);
        assert!(any_token().run("").is_empty());
    }

    #[test]
    fn any_token_is_char_aligned() {
        assert_eq!(any_token().run("\u{1F1EF}x"), vec![('\u{1F1EF}', "x")]);
    }

    #[test]
    fn satisfy_filters() {
        let digit = satisfy(|c| c.is_ascii_digit());
        assert_eq!(digit.run("1a"), vec![('1', "a")]);
        assert!(digit.run("a1").is_empty());
    }

    #[test]
    fn alternative_unions_both_branches() {
        // Overlapping alternatives surface ambiguity as two results.
        let ambiguous = alternative(expect('a'), expect('a'));
        assert_eq!(ambiguous.run("a"), vec![('a', ""), ('a', "")]);
    }

    #[test]
    fn many_keeps_every_repetition_length() {
        let results = many(any_token()).run("ab");
        let lengths: Vec<usize> = results.iter().map(|(items, _)| items.len()).collect();
        assert_eq!(lengths, vec![2, 1, 0]);
    }

    #[test]
    fn one_or_more_requires_a_match() {
        assert!(one_or_more(expect('a')).run("b").is_empty());
        assert!(one_or_more_string(expect('a')).run("").is_empty());
    }

    #[test]
    fn one_or_more_string_collects() {
        let results = one_or_more_string(satisfy(|c| c.is_ascii_alphabetic())).run("ab1");
        assert_eq!(results[0], ("ab".to_string(), "1"));
    }

    #[test]
    fn literal_matches_prefix() {
        assert_eq!(literal("WIFI:").run("WIFI:rest"), vec![("WIFI:", "rest")]);
        assert!(literal("WIFI:").run("WIF").is_empty());
    }

    #[test]
    fn sequence_pairs_results() {
        let pair = sequence(expect('a'), expect('b'));
        assert_eq!(pair.run("abc"), vec![(('a', 'b'), "c")]);
    }
}
