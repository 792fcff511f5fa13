#[cfg(test)]
mod tests {
    use crate::lexer::{tokenize, LexError, Lexer, TokenKind, TokenKind::*};
    use strum::IntoEnumIterator;
    use test_case::test_case;

    macro_rules! test_tokens {
        ($src:expr, [$(
          $kind:expr
          $(=> $val:expr)?
        ),*$(,)?]) => {#[allow(unused_mut)] {
          let src: &str = $src;
          let tokens = tokenize(src).unwrap_or_else(|e| panic!("error tokenizing {src:?}: {e}"));
          let mut index = 0;
          $({
            let actual = tokens
                .get(index)
                .unwrap_or_else(|| panic!("Expected token {}", index + 1));
            let expected: TokenKind = $kind;
            assert_eq!(actual.kind, expected, "index: {}", index);
            assert_eq!(actual.index, index);
            $(
              assert_eq!(actual.text, $val, "index: {}", index);
            )?
            index += 1;
          })*

          assert_eq!(
              tokens.len(),
              index,
              "Expected exactly {} tokens, but got {:#?}",
              index,
              tokens
          );
        }};
    }

    #[test]
    fn empty() {
        test_tokens!("", []);
    }

    #[test]
    fn whitespace() {
        test_tokens!("  \t\n\r\r\n", []);
    }

    #[test_case("(" ; "left_paren")]
    #[test_case(")" ; "right_paren")]
    #[test_case("{" ; "left_brace")]
    #[test_case("}" ; "right_brace")]
    #[test_case("[" ; "left_bracket")]
    #[test_case("]" ; "right_bracket")]
    #[test_case(":" ; "colon")]
    fn punctuation(src: &str) {
        test_tokens!(src, [Punctuation => src]);
    }

    #[test_case("+" ; "plus")]
    #[test_case("-" ; "minus")]
    #[test_case("*" ; "mul")]
    #[test_case("/" ; "div")]
    #[test_case("%" ; "modulo")]
    #[test_case("^" ; "pow")]
    #[test_case("==" ; "equal")]
    #[test_case("!=" ; "not_equal")]
    #[test_case(">" ; "greater")]
    #[test_case("<" ; "less")]
    #[test_case(">=" ; "greater_or_equal")]
    #[test_case("<=" ; "less_or_equal")]
    fn operator(src: &str) {
        test_tokens!(src, [Operator => src]);
    }

    #[test_case("," ; "comma")]
    #[test_case("=" ; "assign")]
    #[test_case("=~" ; "regex_equal")]
    #[test_case("!~" ; "regex_not_equal")]
    #[test_case("@" ; "at")]
    #[test_case(";" ; "semicolon")]
    #[test_case("." ; "dot")]
    #[test_case("$job" ; "template_variable")]
    #[test_case("$__rate_interval" ; "builtin_template_variable")]
    #[test_case("${instance:regex}" ; "braced_template_variable")]
    fn other(src: &str) {
        test_tokens!(src, [Other => src]);
    }

    #[test_case("1")]
    #[test_case("1.0")]
    #[test_case("0.10")]
    #[test_case("1e100")]
    #[test_case("1.2e-100")]
    #[test_case("1.3e+100")]
    #[test_case(".5" ; "leading_dot")]
    #[test_case("0x1F" ; "hex")]
    fn number(src: &str) {
        test_tokens!(src, [Number => src]);
    }

    #[test_case("5m")]
    #[test_case("30s")]
    #[test_case("500ms")]
    #[test_case("1h30m")]
    #[test_case("1.5h")]
    #[test_case("2w")]
    fn duration(src: &str) {
        test_tokens!(src, [Number => src]);
    }

    #[test]
    fn number_10_p_11() {
        test_tokens!("10+11", [Number => "10", Operator => "+", Number => "11"]);
    }

    #[test_case("\"hi\"" ; "double")]
    #[test_case("\"hi\\\"there\"" ; "double_escaped_quote")]
    #[test_case("'hi'" ; "single")]
    #[test_case("'hi\\''" ; "single_escaped_quote")]
    #[test_case("`hi\\d+`" ; "backtick")]
    fn string(src: &str) {
        test_tokens!(src, [String => src]);
    }

    #[test_case("\"hi", 0 ; "double_unterminated")]
    #[test_case("'hi", 0 ; "single_unterminated")]
    #[test_case("`hi", 0 ; "backtick_unterminated")]
    #[test_case("foo{job=\"bar}", 8 ; "unterminated_inside_selector")]
    fn string_unterminated(src: &str, position: usize) {
        assert_eq!(
            tokenize(src),
            Err(LexError::UnterminatedString { position })
        );
    }

    #[test_case("foo ? bar", '?', 4 ; "question_mark")]
    #[test_case("a ! b", '!', 2 ; "lone_bang")]
    #[test_case("métrica", 'é', 1 ; "non_ascii")]
    #[test_case("$", '$', 0 ; "bare_dollar")]
    fn invalid_character(src: &str, ch: char, position: usize) {
        assert_eq!(
            tokenize(src),
            Err(LexError::InvalidCharacter { ch, position })
        );
    }

    #[test]
    fn identifier() {
        test_tokens!("foobar123", [Name => "foobar123"]);
    }

    #[test]
    fn identifiers() {
        test_tokens!("foo bar123 _under", [Name => "foo", Name => "bar123", Name => "_under"]);
    }

    #[test]
    fn colon_separates_identifiers() {
        test_tokens!(
            "job:http_requests:rate5m",
            [
                Name => "job",
                Punctuation => ":",
                Name => "http_requests",
                Punctuation => ":",
                Name => "rate5m",
            ]
        );
    }

    #[test]
    fn selector() {
        test_tokens!(
            r#"node_cpu_seconds_total{mode!="idle", cpu=~"0|1"}[5m]"#,
            [
                Name => "node_cpu_seconds_total",
                Punctuation => "{",
                Name => "mode",
                Operator => "!=",
                String => "\"idle\"",
                Other => ",",
                Name => "cpu",
                Other => "=~",
                String => "\"0|1\"",
                Punctuation => "}",
                Punctuation => "[",
                Number => "5m",
                Punctuation => "]",
            ]
        );
    }

    #[test]
    fn line_breaks_and_comments_are_dropped() {
        test_tokens!(
            "sum(\n  rate(foo[5m]) # per-second rate\n)\n",
            [
                Name => "sum",
                Punctuation => "(",
                Name => "rate",
                Punctuation => "(",
                Name => "foo",
                Punctuation => "[",
                Number => "5m",
                Punctuation => "]",
                Punctuation => ")",
                Punctuation => ")",
            ]
        );
    }

    #[test]
    fn spans_point_into_source() {
        let src = "rate(foo[5m])";
        let tokens = tokenize(src).expect("tokenize");
        for token in &tokens {
            assert_eq!(&src[token.span.clone()], token.text);
        }
        assert_eq!(tokens[2].span, 5..8);
    }

    #[test]
    fn indexes_are_consecutive() {
        let tokens = tokenize("a + b * (c - 1)").expect("tokenize");
        let indexes: Vec<_> = tokens.iter().map(|t| t.index).collect();
        assert_eq!(indexes, (0..tokens.len()).collect::<Vec<_>>());
    }

    #[test]
    fn lexer_stops_after_first_error() {
        let mut lex = Lexer::new("up ? down");
        assert!(matches!(lex.next(), Some(Ok(t)) if t.text == "up"));
        assert!(matches!(lex.next(), Some(Err(_))));
        assert!(lex.is_eof());
        assert!(lex.next().is_none());
    }

    #[test]
    fn kind_display() {
        assert_eq!(Name.to_string(), "name");
        assert_eq!(Punctuation.to_string(), "punctuation");

        let names: Vec<_> = TokenKind::iter().map(|k| k.to_string()).collect();
        assert_eq!(
            names,
            vec!["name", "string", "number", "operator", "punctuation", "other"]
        );
    }
}
