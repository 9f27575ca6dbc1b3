use monkey_parser::ast::{Expression, Statement};
use monkey_parser::{Lexer, Parser, Program};

fn parse(input: &str) -> (Program, Vec<String>) {
    let mut parser = Parser::new(Lexer::new(input));
    let program = parser.parse_program();
    (program, parser.errors().to_vec())
}

fn render(input: &str) -> String {
    let (program, errors) = parse(input);
    assert!(errors.is_empty(), "{:?}: {:?}", input, errors);
    program.to_string()
}

#[test]
fn prefix_binds_tighter_than_product() {
    insta::assert_snapshot!(render("-a * b"), @"((-a) * b)");
    insta::assert_snapshot!(render("!-a"), @"(!(-a))");
}

#[test]
fn equal_precedence_groups_left() {
    insta::assert_snapshot!(render("a + b + c"), @"((a + b) + c)");
    insta::assert_snapshot!(render("a + b / c"), @"(a + (b / c))");
}

#[test]
fn statements_render_back_to_back() {
    insta::assert_snapshot!(render("3 + 4; -5 * 5"), @"(3 + 4)((-5) * 5)");
}

#[test]
fn comparison_and_equality() {
    insta::assert_snapshot!(
        render("3 + 4 * 5 == 3 * 1 + 4 * 5"),
        @"((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))"
    );
    insta::assert_snapshot!(render("3 > 5 == false"), @"((3 > 5) == false)");
}

#[test]
fn let_and_return_render() {
    insta::assert_snapshot!(
        render("let x = 1 + 2; return x * 3"),
        @"let x = (1 + 2);return (x * 3);"
    );
}

#[test]
fn function_and_call_render() {
    insta::assert_snapshot!(
        render("let add = fn(a, b) { return a + b; }; add(1, -2)"),
        @"let add = fn(a, b) return (a + b);;add(1, (-2))"
    );
}

#[test]
fn missing_identifier_keeps_going() {
    let (program, errors) = parse("let = 5;");
    insta::assert_debug_snapshot!(errors, @r###"
    [
        "expected next token to be IDENT, got = instead",
        "no prefix parse function for = found",
    ]
    "###);
    assert_eq!(program.statements().len(), 2);
}

#[test]
fn unclosed_group_records_expectation() {
    let (program, errors) = parse("(1 + 2; 3");
    insta::assert_debug_snapshot!(errors, @r###"
    [
        "expected next token to be ), got ; instead",
    ]
    "###);
    // The failed group is an empty statement; `3` still parses.
    assert_eq!(program.to_string(), "3");
}

#[test]
fn integer_value_round_trips_to_literal() {
    let (program, errors) = parse("0; 42; 9223372036854775807");
    assert!(errors.is_empty());
    assert_eq!(program.statements().len(), 3);
    for stmt in program.statements() {
        match stmt {
            Statement::ExpressionStatement {
                expression: Some(Expression::IntegerLiteral { token, value }),
                ..
            } => assert_eq!(value.to_string(), token.literal),
            stmt => panic!("not an integer literal statement: {:?}", stmt),
        }
    }
}

#[test]
fn illegal_token_has_no_prefix_parser() {
    let (_, errors) = parse("let a = @;");
    assert_eq!(errors, vec!["no prefix parse function for ILLEGAL found"]);
}
