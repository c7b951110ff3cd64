//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs including:
//! - Let and return statements
//! - Operator precedence
//! - If expressions and function literals
//! - Calls, arrays, indexing and hash literals
//! - Error recovery and reporting

use crate::{
    ast::{
        ast::Node,
        expressions::Expression,
        statements::{Program, Statement},
    },
    errors::errors::ErrorImpl,
    lexer::{
        lexer::{tokenize, Lexer},
        tokens::{TokenKind, TokenStream},
    },
};

use super::parser::{parse, parse_source, Parsed, Parser, MAX_NESTING};

fn parse_str(source: &str) -> Parsed {
    parse_source(source.to_string(), Some("test.lang".to_string()))
}

fn parse_ok(source: &str) -> Program {
    let parsed = parse_str(source);
    assert!(parsed.is_ok(), "unexpected errors: {:?}", parsed.messages());
    parsed.program
}

fn single_expression(source: &str) -> Expression {
    let program = parse_ok(source);
    assert_eq!(program.len(), 1, "expected one statement in {:?}", source);

    match &program.statements[0] {
        Statement::Expression(stmt) => stmt.expression.clone(),
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test_log::test]
fn test_parse_let_statements() {
    let program = parse_ok("let x = 5; let y = true; let foobar = y;");
    assert_eq!(program.len(), 3);

    let expected = [("x", "5"), ("y", "true"), ("foobar", "y")];
    for (stmt, (name, value)) in program.iter().zip(expected) {
        let Statement::Let(let_stmt) = stmt else {
            panic!("expected let statement, got {:?}", stmt);
        };
        assert_eq!(let_stmt.name.value, name);
        assert_eq!(let_stmt.value.to_string(), value);
        assert_eq!(stmt.token_literal(), "let");
    }
}

#[test_log::test]
fn test_parse_let_integer_value() {
    let program = parse_ok("let x = 5;");

    match &program.statements[0] {
        Statement::Let(stmt) => {
            assert_eq!(stmt.name.value, "x");
            assert!(matches!(stmt.value, Expression::Integer(ref int) if int.value == 5));
        }
        other => panic!("expected let statement, got {:?}", other),
    }
}

#[test_log::test]
fn test_let_consumes_repeated_semicolons() {
    let program = parse_ok("let x = 5;;; x");
    assert_eq!(program.len(), 2);
}

#[test_log::test]
fn test_let_missing_assign_reports_once() {
    let parsed = parse_str("let x 5;");

    assert_eq!(
        parsed.messages(),
        vec!["expected next token to be =, got INT instead"]
    );
    assert!(matches!(
        parsed.errors[0].get_kind(),
        ErrorImpl::UnexpectedToken {
            expected: TokenKind::Assign,
            got: TokenKind::Int
        }
    ));
    // Recovery resumes at `5`, which parses on its own
    assert_eq!(parsed.program.len(), 1);
}

#[test_log::test]
fn test_errors_are_recorded_in_order() {
    let parsed = parse_str("let = 10; let 838383;");

    assert_eq!(
        parsed.messages(),
        vec![
            "expected next token to be IDENT, got = instead",
            "no prefix parse function for = found",
            "expected next token to be IDENT, got INT instead",
        ]
    );
    assert!(!parsed.is_ok());
}

#[test_log::test]
fn test_parse_return_statements() {
    let program = parse_ok("return 5; return 10; return add(15);");
    assert_eq!(program.len(), 3);

    let values: Vec<String> = program
        .iter()
        .map(|stmt| match stmt {
            Statement::Return(ret) => ret.value.as_ref().map(|value| value.to_string()),
            other => panic!("expected return statement, got {:?}", other),
        })
        .map(|value| value.unwrap_or_default())
        .collect();

    assert_eq!(values, vec!["5", "10", "add(15)"]);
}

#[test_log::test]
fn test_parse_bare_return() {
    for source in ["return;", "return", "fn() { return }"] {
        let program = parse_ok(source);
        assert_eq!(program.len(), 1, "{}", source);
    }

    let program = parse_ok("return;");
    assert!(matches!(&program.statements[0], Statement::Return(ret) if ret.value.is_none()));
    assert_eq!(program.to_string(), "return;");

    let program = parse_ok("fn() { return }");
    assert_eq!(program.to_string(), "fn() { return; }");
}

#[test_log::test]
fn test_parse_identifier_and_literals() {
    let Expression::Identifier(identifier) = single_expression("foobar;") else {
        panic!("expected identifier");
    };
    assert_eq!(identifier.value, "foobar");

    let Expression::Integer(integer) = single_expression("5;") else {
        panic!("expected integer");
    };
    assert_eq!(integer.value, 5);

    let Expression::String(string) = single_expression("\"hello world\";") else {
        panic!("expected string");
    };
    assert_eq!(string.value, "hello world");

    for (source, value) in [("true;", true), ("false;", false)] {
        let Expression::Boolean(boolean) = single_expression(source) else {
            panic!("expected boolean");
        };
        assert_eq!(boolean.value, value);
    }
}

#[test_log::test]
fn test_parse_prefix_expressions() {
    let cases = [("!5;", "!", "5"), ("-15;", "-", "15"), ("!true;", "!", "true")];

    for (source, operator, operand) in cases {
        let Expression::Prefix(prefix) = single_expression(source) else {
            panic!("expected prefix expression for {}", source);
        };
        assert_eq!(prefix.operator, operator);
        assert_eq!(prefix.right.to_string(), operand);
    }
}

#[test_log::test]
fn test_parse_infix_expressions() {
    for operator in ["+", "-", "*", "/", ">", "<", "==", "!="] {
        let source = format!("5 {} 5;", operator);

        let Expression::Infix(infix) = single_expression(&source) else {
            panic!("expected infix expression for {}", source);
        };
        assert_eq!(infix.operator, operator);
        assert_eq!(infix.left.to_string(), "5");
        assert_eq!(infix.right.to_string(), "5");
    }
}

#[test_log::test]
fn test_operator_precedence() {
    let cases = [
        ("a + b * c", "(a + (b * c))"),
        ("a - b - c", "((a - b) - c)"),
        ("-a * b", "((-a) * b)"),
        ("(a + b) * c", "((a + b) * c)"),
        ("!-a", "(!(-a))"),
        ("a + b + c", "((a + b) + c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b / c", "(a + (b / c))"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        ("3 + 4; -5 * 5", "(3 + 4); ((-5) * 5)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
        (
            "3 + 4 * 5 == 3 * 1 + 4 * 5",
            "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
        ),
        ("3 > 5 == false", "((3 > 5) == false)"),
        ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
        ("-(5 + 5)", "(-(5 + 5))"),
        ("!(true == true)", "(!(true == true))"),
        ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
        (
            "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
            "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
        ),
        (
            "add(a + b + c * d / f + g)",
            "add((((a + b) + ((c * d) / f)) + g))",
        ),
        (
            "a * [1, 2, 3, 4][b * c] * d",
            "((a * ([1, 2, 3, 4][(b * c)])) * d)",
        ),
        (
            "add(a * b[2], b[1], 2 * [1, 2][1])",
            "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))",
        ),
    ];

    for (source, expected) in cases {
        assert_eq!(parse_ok(source).to_string(), expected, "source: {}", source);
    }
}

#[test_log::test]
fn test_parse_if_expression() {
    let Expression::If(if_expr) = single_expression("if (x < y) { x }") else {
        panic!("expected if expression");
    };

    assert_eq!(if_expr.condition.to_string(), "(x < y)");
    assert_eq!(if_expr.consequence.len(), 1);
    assert_eq!(if_expr.consequence.to_string(), "{ x }");
    assert!(if_expr.alternative.is_none());
}

#[test_log::test]
fn test_parse_if_else_expression() {
    let Expression::If(if_expr) = single_expression("if (x < y) { x } else { y }") else {
        panic!("expected if expression");
    };

    let alternative = if_expr.alternative.expect("else branch");
    assert_eq!(alternative.len(), 1);
    assert_eq!(alternative.to_string(), "{ y }");
}

#[test_log::test]
fn test_parse_function_literal() {
    let Expression::Function(function) = single_expression("fn(x, y) { x + y; }") else {
        panic!("expected function literal");
    };

    let names: Vec<&str> = function.parameters.iter().map(|p| p.value.as_str()).collect();
    assert_eq!(names, vec!["x", "y"]);
    assert_eq!(function.body.len(), 1);

    match &function.body.body[0] {
        Statement::Expression(stmt) => {
            assert!(matches!(stmt.expression, Expression::Infix(_)));
            assert_eq!(stmt.expression.to_string(), "(x + y)");
        }
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test_log::test]
fn test_parse_function_parameters() {
    let cases: [(&str, &[&str]); 3] = [
        ("fn() {};", &[]),
        ("fn(x) {};", &["x"]),
        ("fn(x, y, z) {};", &["x", "y", "z"]),
    ];

    for (source, expected) in cases {
        let Expression::Function(function) = single_expression(source) else {
            panic!("expected function literal for {}", source);
        };
        let names: Vec<&str> = function.parameters.iter().map(|p| p.value.as_str()).collect();
        assert_eq!(names, expected);
    }
}

#[test_log::test]
fn test_non_identifier_parameter_is_rejected() {
    let parsed = parse_str("fn(1) {}");

    assert!(!parsed.is_ok());
    assert_eq!(
        parsed.messages()[0],
        "expected next token to be IDENT, got INT instead"
    );
}

#[test_log::test]
fn test_parse_call_expression() {
    let Expression::Call(call) = single_expression("add(1, 2 * 3, 4 + 5);") else {
        panic!("expected call expression");
    };

    assert_eq!(call.function.to_string(), "add");
    assert_eq!(call.arguments.len(), 3);
    assert_eq!(call.arguments[0].to_string(), "1");
    assert_eq!(call.arguments[1].to_string(), "(2 * 3)");
    assert_eq!(call.arguments[2].to_string(), "(4 + 5)");
}

#[test_log::test]
fn test_parse_array_literal() {
    let Expression::Array(array) = single_expression("[1, 2 * 2, 3 + 3]") else {
        panic!("expected array literal");
    };
    assert_eq!(array.elements.len(), 3);
    assert_eq!(array.elements[1].to_string(), "(2 * 2)");

    let Expression::Array(empty) = single_expression("[]") else {
        panic!("expected array literal");
    };
    assert!(empty.elements.is_empty());
}

#[test_log::test]
fn test_parse_index_expression() {
    let Expression::Index(index) = single_expression("myArray[1 + 1]") else {
        panic!("expected index expression");
    };

    assert_eq!(index.left.to_string(), "myArray");
    assert!(matches!(*index.index, Expression::Infix(_)));
    assert_eq!(index.index.to_string(), "(1 + 1)");
}

#[test_log::test]
fn test_parse_hash_literal_keeps_source_order() {
    let Expression::Hash(hash) = single_expression("{\"one\": 1, \"two\": 2, \"three\": 3}")
    else {
        panic!("expected hash literal");
    };

    assert_eq!(hash.len(), 3);
    let rendered: Vec<(String, String)> = hash
        .pairs
        .iter()
        .map(|(key, value)| {
            assert!(matches!(key, Expression::String(_)));
            assert!(matches!(value, Expression::Integer(_)));
            (key.token_literal(), value.to_string())
        })
        .collect();

    assert_eq!(
        rendered,
        vec![
            (String::from("one"), String::from("1")),
            (String::from("two"), String::from("2")),
            (String::from("three"), String::from("3")),
        ]
    );
}

#[test_log::test]
fn test_parse_hash_literal_variants() {
    let Expression::Hash(empty) = single_expression("{}") else {
        panic!("expected hash literal");
    };
    assert!(empty.is_empty());

    let expression = single_expression("{\"one\": 0 + 1, \"two\": 10 - 8, \"three\": 15 / 5}");
    assert_eq!(
        expression.to_string(),
        "{\"one\": (0 + 1), \"two\": (10 - 8), \"three\": (15 / 5)}"
    );

    let expression = single_expression("{1: true, false: \"no\"}");
    assert_eq!(expression.to_string(), "{1: true, false: \"no\"}");
}

#[test_log::test]
fn test_hash_missing_colon() {
    let parsed = parse_str("{\"one\" 1}");

    assert!(!parsed.is_ok());
    assert_eq!(
        parsed.messages()[0],
        "expected next token to be :, got INT instead"
    );
}

#[test_log::test]
fn test_integer_overflow() {
    let parsed = parse_str("9223372036854775808");

    assert_eq!(
        parsed.messages(),
        vec!["could not parse \"9223372036854775808\" as integer"]
    );
    assert_eq!(parsed.errors[0].get_error_name(), "IntegerParse");
    assert!(parsed.program.is_empty());

    let Expression::Integer(max) = single_expression("9223372036854775807") else {
        panic!("expected integer");
    };
    assert_eq!(max.value, i64::MAX);
}

#[test_log::test]
fn test_unterminated_block() {
    for source in ["if (x) { x", "fn(x) {", "let f = fn() { return 1;"] {
        let parsed = parse_str(source);

        assert_eq!(
            parsed.messages(),
            vec!["expected next token to be }, got EOF instead"],
            "source: {}",
            source
        );
        assert_eq!(parsed.errors[0].get_error_name(), "UnterminatedBlock");
        assert!(parsed.program.is_empty());
    }
}

#[test_log::test]
fn test_block_recovers_from_bad_statement() {
    let parsed = parse_str("fn() { let = 1; x }");

    assert_eq!(
        parsed.messages(),
        vec![
            "expected next token to be IDENT, got = instead",
            "no prefix parse function for = found",
        ]
    );
    assert_eq!(parsed.program.len(), 1);
    assert_eq!(parsed.program.to_string(), "fn() { 1; x }");
}

#[test_log::test]
fn test_illegal_token_has_no_prefix_parser() {
    let parsed = parse_str("let x = @;");

    assert!(!parsed.is_ok());
    assert_eq!(parsed.messages()[0], "no prefix parse function for ILLEGAL found");
}

#[test_log::test]
fn test_empty_input() {
    let parsed = parse_str("");

    assert!(parsed.is_ok());
    assert!(parsed.program.is_empty());
    assert_eq!(parsed.program.token_literal(), "");
}

#[test_log::test]
fn test_rendering_reparses_to_same_rendering() {
    let sources = [
        "let x = 5; x + 1; return x;",
        "if (a) { b; c } else { d }",
        "let f = fn(x, y) { return x * y; }; f(1, 2)[0]",
        "{\"a\": [1, 2], \"b\": {}}",
        "a; (b)",
        "-a * !b",
        "return; x",
        "let s = \"hi there\"; len(s) == 8",
    ];

    for source in sources {
        let first = parse_ok(source).to_string();
        let second = parse_ok(&first).to_string();
        assert_eq!(first, second, "source: {}", source);
    }
}

#[test_log::test]
fn test_parse_from_token_stream() {
    let tokens = tokenize("let x = 1 + 2;".to_string(), None);
    let parsed = parse(TokenStream::from(tokens));

    assert!(parsed.is_ok());
    assert_eq!(parsed.program.to_string(), "let x = (1 + 2);");
}

#[test_log::test]
fn test_parser_primes_cursor() {
    let mut parser = Parser::new(Lexer::new("let x".to_string(), None));

    assert!(parser.current_is(TokenKind::Let));
    assert!(parser.peek_is(TokenKind::Identifier));

    assert!(parser.expect_peek(TokenKind::Assign).is_err());
    assert!(parser.current_is(TokenKind::Let));

    assert!(parser.expect_peek(TokenKind::Identifier).is_ok());
    assert_eq!(parser.current_token().value, "x");
    assert!(parser.peek_is(TokenKind::EOF));
}

#[test_log::test]
fn test_lookup_tables() {
    let parser = Parser::new(Lexer::new(String::new(), None));

    assert!(parser.get_stmt_lookup().contains_key(&TokenKind::Let));
    assert!(parser.get_stmt_lookup().contains_key(&TokenKind::Return));
    assert!(parser.get_nud_lookup().contains_key(&TokenKind::OpenCurly));
    assert!(parser.get_led_lookup().contains_key(&TokenKind::OpenBracket));
    assert!(!parser.get_bp_lookup().contains_key(&TokenKind::Bang));
}

#[test_log::test]
fn test_error_position_points_at_token() {
    let parsed = parse_str("let x 5;");

    assert_eq!(parsed.errors[0].get_position().0, 6);
}

fn has_nesting_error(parsed: &Parsed) -> bool {
    parsed
        .errors
        .iter()
        .any(|error| matches!(error.get_kind(), ErrorImpl::NestingTooDeep { limit } if *limit == MAX_NESTING))
}

#[test_log::test]
fn test_deeply_nested_groups_report_nesting() {
    let depth = 10_000;
    let source = format!("{}a{}", "(".repeat(depth), ")".repeat(depth));
    let parsed = parse_str(&source);

    assert_eq!(parsed.errors[0].get_error_name(), "NestingTooDeep");
    assert_eq!(
        parsed.messages()[0],
        format!("expression nested deeper than {} levels", MAX_NESTING)
    );
}

#[test_log::test]
fn test_nesting_below_limit_parses() {
    let depth = 200;
    let source = format!("{}a{}", "(".repeat(depth), ")".repeat(depth));

    assert_eq!(parse_ok(&source).to_string(), "a");

    let negations = format!("{}a", "-".repeat(100));
    assert!(parse_ok(&negations).to_string().starts_with("(-(-"));
}

#[test_log::test]
fn test_deeply_nested_blocks_report_nesting() {
    let source = "if (a) { ".repeat(10_000);
    let parsed = parse_str(&source);

    assert!(has_nesting_error(&parsed));
    assert!(parsed.program.is_empty());
}

#[test_log::test]
fn test_long_operator_chain_reports_nesting() {
    let source = vec!["1"; 5_000].join(" + ");
    let parsed = parse_str(&source);

    assert_eq!(parsed.errors[0].get_error_name(), "NestingTooDeep");

    let short = vec!["1"; 100].join(" + ");
    assert!(parse_str(&short).is_ok());
}

#[test_log::test]
fn test_nesting_resets_between_statements() {
    let nested = format!("{}a{}", "(".repeat(200), ")".repeat(200));
    let source = format!("{0}; {0}; {0}", nested);

    assert_eq!(parse_ok(&source).to_string(), "a; a; a");
}
