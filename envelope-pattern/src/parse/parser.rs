use super::lexer::{Lexer, Token};
use crate::error::{Error, Result};
use crate::pattern::{Greediness, Pattern, Quantifier};

/// Recursive-descent parser for the textual pattern grammar.
///
/// Precedence, loosest to tightest: `->` (traverse), `|` (or), `&` (and),
/// `!` (not, prefix), postfix group quantifiers, atoms.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

pub fn parse(input: &str) -> Result<Pattern> {
    let tokens = Lexer::new(input).tokenize()?;
    let mut parser = Parser { tokens, pos: 0 };
    let pattern = parser.parse_traverse()?;
    parser.expect_eof()?;
    Ok(pattern)
}

impl Parser {
    fn peek(&self) -> &Token { &self.tokens[self.pos] }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn err(&self, description: impl Into<String>) -> Error {
        Error::Parse { offset: self.pos, description: description.into() }
    }

    fn expect_eof(&self) -> Result<()> {
        if matches!(self.peek(), Token::Eof) {
            Ok(())
        } else {
            Err(self.err(format!("unexpected trailing token {:?}", self.peek())))
        }
    }

    fn eat(&mut self, tok: &Token) -> bool {
        if self.peek() == tok {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, tok: &Token) -> Result<()> {
        if self.eat(tok) {
            Ok(())
        } else {
            Err(self.err(format!("expected {tok:?}, found {:?}", self.peek())))
        }
    }

    fn ident(&mut self) -> Option<String> {
        if let Token::Ident(s) = self.peek() {
            let s = s.clone();
            self.advance();
            Some(s)
        } else {
            None
        }
    }

    // traverse := or ( "->" or )*
    fn parse_traverse(&mut self) -> Result<Pattern> {
        let mut parts = vec![self.parse_or()?];
        while self.eat(&Token::Arrow) {
            parts.push(self.parse_or()?);
        }
        Ok(if parts.len() == 1 { parts.remove(0) } else { Pattern::traverse(parts) })
    }

    // or := and ( "|" and )*
    fn parse_or(&mut self) -> Result<Pattern> {
        let mut parts = vec![self.parse_and()?];
        while self.eat(&Token::Pipe) {
            parts.push(self.parse_and()?);
        }
        Ok(if parts.len() == 1 { parts.remove(0) } else { Pattern::or(parts) })
    }

    // and := unary ( "&" unary )*
    fn parse_and(&mut self) -> Result<Pattern> {
        let mut parts = vec![self.parse_unary()?];
        while self.eat(&Token::Amp) {
            parts.push(self.parse_unary()?);
        }
        Ok(if parts.len() == 1 { parts.remove(0) } else { Pattern::and(parts) })
    }

    // unary := "!" unary | postfix
    fn parse_unary(&mut self) -> Result<Pattern> {
        if self.eat(&Token::Bang) {
            let inner = self.parse_unary()?;
            Ok(Pattern::not_matching(inner))
        } else {
            self.parse_postfix()
        }
    }

    // postfix := atom ( "{" quantifier "}" greediness? | "+" )?
    //
    // Group quantifiers only apply to a parenthesized group atom; this is
    // enforced by only attempting to read one when the atom we just parsed
    // was a `(...)` group.
    fn parse_postfix(&mut self) -> Result<Pattern> {
        let (pattern, was_group) = self.parse_atom()?;
        if was_group && matches!(self.peek(), Token::LBrace) {
            let (min, max) = self.parse_quantifier_braces()?;
            let mode = self.parse_greediness_suffix();
            Ok(Pattern::repeat(pattern, Quantifier::new(min, max, mode)))
        } else if was_group && self.eat(&Token::Plus) {
            Ok(Pattern::one_or_more(pattern))
        } else {
            Ok(pattern)
        }
    }

    fn parse_greediness_suffix(&mut self) -> Greediness {
        if self.eat(&Token::Question) {
            Greediness::Lazy
        } else if self.eat(&Token::Plus) {
            Greediness::Possessive
        } else {
            Greediness::Greedy
        }
    }

    fn parse_quantifier_braces(&mut self) -> Result<(usize, Option<usize>)> {
        self.expect(&Token::LBrace)?;
        let min = self.parse_usize()?;
        let max = if self.eat(&Token::Comma) {
            if matches!(self.peek(), Token::RBrace) { None } else { Some(self.parse_usize()?) }
        } else {
            Some(min)
        };
        self.expect(&Token::RBrace)?;
        Ok((min, max))
    }

    fn parse_usize(&mut self) -> Result<usize> {
        match self.advance() {
            Token::Number(n) if n >= 0.0 && n.fract() == 0.0 => Ok(n as usize),
            other => Err(self.err(format!("expected an unsigned integer, found {other:?}"))),
        }
    }

    /// Returns the parsed pattern and whether it was a literal `(...)` group
    /// (the only atom form a postfix quantifier may attach to).
    fn parse_atom(&mut self) -> Result<(Pattern, bool)> {
        match self.peek().clone() {
            Token::Star => { self.advance(); Ok((Pattern::any(), false)) }
            Token::LParen => {
                self.advance();
                let inner = self.parse_traverse()?;
                self.expect(&Token::RParen)?;
                Ok((inner, true))
            }
            Token::At => {
                self.advance();
                let name = self.ident().ok_or_else(|| self.err("expected a capture name after '@'"))?;
                self.expect(&Token::LParen)?;
                let inner = self.parse_traverse()?;
                self.expect(&Token::RParen)?;
                Ok((Pattern::capture(name, inner), false))
            }
            Token::LBracket => { self.advance(); Ok((self.parse_array_body()?, false)) }
            Token::LBrace => { self.advance(); Ok((self.parse_map_body()?, false)) }
            Token::StringLit(s) => { self.advance(); Ok((Pattern::text(s), false)) }
            Token::Regex(r) => {
                self.advance();
                let re = regex::Regex::new(&r).map_err(|e| self.err(format!("invalid text regex: {e}")))?;
                Ok((Pattern::text_regex(re), false))
            }
            Token::HexString(hex) => {
                self.advance();
                let bytes = decode_hex(&hex).map_err(|e| self.err(e))?;
                Ok((Pattern::byte_string(bytes), false))
            }
            Token::HexRegex(r) => {
                self.advance();
                let re = regex::bytes::Regex::new(&r)
                    .map_err(|e| self.err(format!("invalid byte-string regex: {e}")))?;
                Ok((Pattern::byte_string_regex(re), false))
            }
            Token::Number(n) => { self.advance(); Ok((self.parse_number_tail(n)?, false)) }
            Token::Gt => { self.advance(); Ok((Pattern::number_greater_than(self.parse_number_literal()?), false)) }
            Token::Ge => { self.advance(); Ok((Pattern::number_greater_than_or_equal(self.parse_number_literal()?), false)) }
            Token::Lt => { self.advance(); Ok((Pattern::number_less_than(self.parse_number_literal()?), false)) }
            Token::Le => { self.advance(); Ok((Pattern::number_less_than_or_equal(self.parse_number_literal()?), false)) }
            Token::Ident(name) => { self.advance(); Ok((self.parse_keyword(&name)?, false)) }
            other => Err(self.err(format!("unexpected token {other:?}"))),
        }
    }

    fn parse_number_tail(&mut self, first: f64) -> Result<Pattern> {
        if self.eat(&Token::DotDot) {
            let hi = self.parse_number_literal()?;
            Ok(Pattern::number_range(first..=hi))
        } else {
            Ok(Pattern::number_exact(first))
        }
    }

    fn parse_number_literal(&mut self) -> Result<f64> {
        match self.advance() {
            Token::Number(n) => Ok(n),
            Token::Ident(name) if name == "Infinity" => Ok(f64::INFINITY),
            other => Err(self.err(format!("expected a number, found {other:?}"))),
        }
    }

    fn parse_paren_pattern(&mut self) -> Result<Pattern> {
        self.expect(&Token::LParen)?;
        let inner = self.parse_traverse()?;
        self.expect(&Token::RParen)?;
        Ok(inner)
    }

    fn parse_array_body(&mut self) -> Result<Pattern> {
        if self.eat(&Token::Star) {
            self.expect(&Token::RBracket)?;
            return Ok(Pattern::array_any());
        }
        if self.eat(&Token::LBrace) {
            let n = self.parse_usize()?;
            self.expect(&Token::RBrace)?;
            self.expect(&Token::RBracket)?;
            return Ok(Pattern::array_count(n..=n));
        }
        let mut elements = vec![self.parse_traverse()?];
        while self.eat(&Token::Comma) {
            elements.push(self.parse_traverse()?);
        }
        self.expect(&Token::RBracket)?;
        Ok(Pattern::array_elements(elements))
    }

    fn parse_map_body(&mut self) -> Result<Pattern> {
        if self.eat(&Token::Star) {
            self.expect(&Token::RBrace)?;
            return Ok(Pattern::map_any());
        }
        if self.eat(&Token::LBrace) {
            let n = self.parse_usize()?;
            self.expect(&Token::RBrace)?;
            self.expect(&Token::RBrace)?;
            return Ok(Pattern::map_count(n..=n));
        }
        Err(self.err("map key/value patterns are not supported; use {*} or {{n}}"))
    }

    fn parse_keyword(&mut self, name: &str) -> Result<Pattern> {
        match name {
            "bool" => Ok(Pattern::bool_any()),
            "true" => Ok(Pattern::bool_exact(true)),
            "false" => Ok(Pattern::bool_exact(false)),
            "number" => Ok(Pattern::number_any()),
            "NaN" => Ok(Pattern::number_nan()),
            "Infinity" => Ok(Pattern::number_infinity()),
            "text" => Ok(Pattern::text_any()),
            "bstr" => Ok(Pattern::byte_string_any()),
            "subj" => self.parse_axis_keyword(Pattern::subject_any, |_| {
                Err(Error::Compile("subj does not take an argument".into()))
            }),
            "pred" => self.parse_axis_keyword(Pattern::predicate_any, |p| Ok(Pattern::predicate(p))),
            "obj" => self.parse_axis_keyword(Pattern::object_any, |p| Ok(Pattern::object(p))),
            "assert" => self.parse_assert_keyword(),
            "assertpred" => {
                let p = self.parse_paren_pattern()?;
                Ok(Pattern::assertions_with_predicate(p))
            }
            "assertobj" => {
                let p = self.parse_paren_pattern()?;
                Ok(Pattern::assertions_with_object(p))
            }
            "digest" => self.parse_digest_keyword(),
            "obscured" => Ok(Pattern::obscured_any()),
            "elided" => Ok(Pattern::elided()),
            "encrypted" => Ok(Pattern::encrypted()),
            "compressed" => Ok(Pattern::compressed()),
            "wrapped" => Ok(Pattern::wrapped_any()),
            "unwrap" => {
                if matches!(self.peek(), Token::LParen) {
                    let inner = self.parse_paren_pattern()?;
                    Ok(Pattern::traverse(vec![Pattern::wrapped_unwrap(), inner]))
                } else {
                    Ok(Pattern::wrapped_unwrap())
                }
            }
            "search" => {
                let inner = self.parse_paren_pattern()?;
                Ok(Pattern::search(inner))
            }
            "node" => Ok(Pattern::node_any()),
            "tagged" => Ok(Pattern::tagged_any()),
            "known" => Ok(Pattern::known_value_any()),
            "null" => Ok(Pattern::null()),
            other => Err(self.err(format!("unknown pattern keyword {other:?}"))),
        }
    }

    fn parse_axis_keyword(
        &mut self,
        any_ctor: fn() -> Pattern,
        with_pattern: impl FnOnce(Pattern) -> Result<Pattern>,
    ) -> Result<Pattern> {
        if matches!(self.peek(), Token::LParen) {
            let inner = self.parse_paren_pattern()?;
            with_pattern(inner)
        } else {
            Ok(any_ctor())
        }
    }

    fn parse_assert_keyword(&mut self) -> Result<Pattern> {
        if matches!(self.peek(), Token::LParen) {
            self.advance();
            let pp = self.parse_traverse()?;
            self.expect(&Token::Comma)?;
            let op = self.parse_traverse()?;
            self.expect(&Token::RParen)?;
            Ok(Pattern::assertions_with_both(pp, op))
        } else {
            Ok(Pattern::assertions_any())
        }
    }

    fn parse_digest_keyword(&mut self) -> Result<Pattern> {
        if !self.eat(&Token::LParen) {
            // Every envelope carries a digest; a bare `digest` with no
            // constraint matches anything.
            return Ok(Pattern::any());
        }
        let pattern = match self.advance() {
            Token::HexString(hex) => {
                let bytes = decode_hex(&hex).map_err(|e| self.err(e))?;
                if bytes.len() == 32 {
                    let digest = gordian_envelope::Digest::from_bytes(
                        bytes.try_into().expect("checked length"),
                    );
                    Pattern::digest(digest)
                } else {
                    Pattern::digest_hex_prefix(hex)
                }
            }
            Token::HexRegex(r) => {
                let re = regex::bytes::Regex::new(&r)
                    .map_err(|e| self.err(format!("invalid digest regex: {e}")))?;
                Pattern::digest_regex(re)
            }
            other => return Err(self.err(format!("expected a hex digest or regex, found {other:?}"))),
        };
        self.expect(&Token::RParen)?;
        Ok(pattern)
    }
}

fn decode_hex(s: &str) -> std::result::Result<Vec<u8>, String> {
    if s.len() % 2 != 0 {
        return Err(format!("hex literal {s:?} has odd length"));
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| format!("invalid hex byte in {s:?}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Matcher;
    use gordian_envelope::Envelope;

    #[test]
    fn parses_any() {
        let p = parse("*").unwrap();
        assert!(p.matches(&Envelope::from("hello")));
    }

    #[test]
    fn parses_bool_literals() {
        assert!(parse("true").unwrap().matches(&Envelope::from(true)));
        assert!(!parse("false").unwrap().matches(&Envelope::from(true)));
        assert!(parse("bool").unwrap().matches(&Envelope::from(false)));
    }

    #[test]
    fn parses_number_forms() {
        assert!(parse("42").unwrap().matches(&Envelope::from(42)));
        assert!(parse("1..10").unwrap().matches(&Envelope::from(5)));
        assert!(!parse("1..10").unwrap().matches(&Envelope::from(50)));
        assert!(parse(">10").unwrap().matches(&Envelope::from(11)));
        assert!(parse(">=10").unwrap().matches(&Envelope::from(10)));
        assert!(parse("<10").unwrap().matches(&Envelope::from(9)));
        assert!(parse("<=10").unwrap().matches(&Envelope::from(10)));
        assert!(parse("NaN").unwrap().matches(&Envelope::from(f64::NAN)));
    }

    #[test]
    fn parses_text_forms() {
        assert!(parse("text").unwrap().matches(&Envelope::from("hi")));
        assert!(parse("\"hi\"").unwrap().matches(&Envelope::from("hi")));
        assert!(parse("/^h.$/").unwrap().matches(&Envelope::from("hi")));
    }

    #[test]
    fn parses_byte_string_forms() {
        let bytes = Envelope::new_leaf(dcbor::CBOR::from(vec![1u8, 2, 3]));
        assert!(parse("bstr").unwrap().matches(&bytes));
        assert!(parse("h'010203'").unwrap().matches(&bytes));
    }

    #[test]
    fn parses_and_or_not() {
        let e = Envelope::from(5);
        assert!(parse("number & >0").unwrap().matches(&e));
        assert!(parse("text | number").unwrap().matches(&e));
        assert!(parse("!text").unwrap().matches(&e));
    }

    #[test]
    fn parses_subject_predicate_object_assert() {
        let e = Envelope::from("subj").add_assertion_with("knows", "Bob");
        assert!(parse("subj").unwrap().matches(&e));
        assert!(parse("assert").unwrap().matches(&e));
        assert!(parse("assertpred(\"knows\")").unwrap().matches(&e));
        assert!(parse("assertobj(\"Bob\")").unwrap().matches(&e));
    }

    #[test]
    fn parses_capture_and_search() {
        let e = Envelope::from("subj").add_assertion_with("knows", "Bob");
        let p = parse("search(@found(\"Bob\"))").unwrap();
        assert!(p.matches(&e));
    }

    #[test]
    fn parses_traverse_and_group_quantifier() {
        let inner = gordian_envelope::Envelope::from("x");
        let wrapped = inner.wrap().wrap();
        let p = parse("(unwrap){0,}").unwrap();
        assert!(p.matches(&wrapped));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("@@@").is_err());
        assert!(parse("number(").is_err());
    }
}
