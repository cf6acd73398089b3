use std::fs;

use chonker::{
    ast::{BinaryOperator, Expr, Literal, Stmt},
    error::{Error, Stage},
    interpreter::{
        evaluator::{core::Interpreter, function::core::MAX_CALL_DEPTH},
        lexer::{Token, TokenKind},
        value::core::Value,
    },
    run,
};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

fn output_of(src: &str) -> String {
    let mut out = Vec::new();
    if let Err(errors) = run(src, &mut out) {
        let rendered: String = errors.iter().map(ToString::to_string).collect();
        panic!("Script failed:\n{src}\n{rendered}");
    }
    String::from_utf8(out).expect("program output is UTF-8")
}

fn assert_output(src: &str, expected: &str) {
    assert_eq!(output_of(src), expected, "output of:\n{src}");
}

fn errors_of(src: &str) -> Vec<Error> {
    match run(src, &mut Vec::new()) {
        Ok(()) => panic!("Script succeeded but was expected to fail:\n{src}"),
        Err(errors) => errors,
    }
}

fn assert_failure(src: &str, stage: Stage) -> Error {
    let mut errors = errors_of(src);
    assert_eq!(errors[0].stage(), stage, "stage of:\n{src}\n{}", errors[0]);
    errors.remove(0)
}

#[test]
fn script_corpus_matches_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "chonk"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                             panic!("Failed to read {expected_path:?}: {e}")
                                                         });

        count += 1;
        assert_eq!(output_of(&source), expected, "script {path:?}");
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

#[test]
fn end_to_end_programs() {
    assert_output("number x = 21; puts x * 2;", "42\n");
    assert_output("string s = \"foo\" + \"bar\"; puts s;", "foobar\n");
    assert_output("function number add(number a, number b) { return a + b; }\nputs add(2, 3);",
                  "5\n");
    assert_output("for (number i = 0; i < 3; i = i + 1) { puts i; }", "0\n1\n2\n");
    assert_output("list xs = [1, 2, 3]; puts count(xs); add(xs, 4); puts count(xs);",
                  "3\n4\n");
    assert_output("bool b = true && false; puts b;", "false\n");
}

#[test]
fn number_display() {
    assert_output("puts 3.0;", "3\n");
    assert_output("puts 2.50;", "2.5\n");
    assert_output("puts 1000000;", "1000000\n");
    assert_output("puts 0 - 7;", "-7\n");
    assert_output("number x = 10; while (x < x * 10) x = x * 10; puts x; puts -x;",
                  "Infinity\n-Infinity\n");
}

#[test]
fn tiny_divisors_overflow_instead_of_failing() {
    assert_output("number tiny = 1; for (number i = 0; i < 400; i = i + 1) tiny = tiny / 10;\n\
                   puts tiny == 0;",
                  "true\n");
    assert_output("number d = 0.5; for (number i = 0; i < 1073; i = i + 1) d = d / 2;\n\
                   puts d == 0; puts 1 / d > 1;",
                  "false\ntrue\n");
}

#[test]
fn values_print_in_text_form() {
    assert_output("puts null; puts true; puts [1, 2];", "null\ntrue\nlist\n");
    assert_output("function number twice(number n) { return n * 2; } puts twice;",
                  "<fn twice>\n");
    assert_output("puts count;", "<native fn count>\n");
}

#[test]
fn equality() {
    assert_output("puts 1 == 1; puts \"a\" == \"a\"; puts true != false; puts null == false;",
                  "true\ntrue\ntrue\nfalse\n");
    assert_output("number x = 4; puts x == x; puts null == null;", "true\ntrue\n");
    assert_output("function void f() {} puts f == f; puts count == count;", "true\ntrue\n");
}

#[test]
fn logical_operators_short_circuit() {
    let src = "list calls = [];
               function bool touch(bool result) { add(calls, result); return result; }
               bool a = true || touch(true);
               bool b = false && touch(true);
               bool c = false || touch(false);
               bool d = true and touch(true);
               puts count(calls);
               puts a; puts b; puts c; puts d;";
    assert_output(src, "2\ntrue\nfalse\nfalse\ntrue\n");
}

#[test]
fn logical_operators_yield_an_operand() {
    assert_output("puts null || \"fallback\";", "fallback\n");
    assert_output("puts 0 && \"zero is truthy\";", "zero is truthy\n");
    assert_output("puts false or null;", "null\n");
}

#[test]
fn operands_evaluate_left_to_right() {
    let src = "list order = [];
               function number note(number n) { add(order, n); return n; }
               puts note(1) - note(2) * note(3);
               puts order[0]; puts order[1]; puts order[2];";
    assert_output(src, "-5\n1\n2\n3\n");
}

#[test]
fn dangling_else_binds_to_nearest_if() {
    assert_output("if (false) if (true) puts 1; else puts 2; puts 3;", "3\n");
    assert_output("if (true) if (false) puts 1; else puts 2;", "2\n");
}

#[test]
fn comma_declarations() {
    assert_output("number a = 1, b, string s = \"x\", t; puts a + b; puts s + t;",
                  "1\nx\n");
    assert_output("var number n; var list l; bool flag; puts n; puts count(l); puts flag;",
                  "0\n0\nfalse\n");
}

#[test]
fn null_fits_any_binding() {
    assert_output("string s = null; puts s; s = \"x\"; puts s; s = null; puts s;",
                  "null\nx\nnull\n");
    assert_output("function number id(number n) { return n; } puts id(null);", "null\n");
    assert_output("function list nothing() { return null; } puts nothing();", "null\n");
}

#[test]
fn functions_fall_back_to_null_or_void() {
    assert_output("function number f() { if (false) return 1; } puts f();", "null\n");
    assert_output("function number f() { if (false) return 1; return; } puts f();",
                  "null\n");
    assert_output("function void g() { return; } puts g();", "void\n");
}

#[test]
fn nested_returns_satisfy_the_return_check() {
    assert_output("function number f() { if (true) { return 1; } } puts f();", "1\n");
    assert_output("function number g() { while (true) { return 2; } } puts g();", "2\n");
    assert_output("function string h(number n) {
                       switch (n) { case 1: return \"one\"; default: return \"other\"; }
                   }
                   puts h(1); puts h(5);",
                  "one\nother\n");
}

#[test]
fn scopes_shadow_and_restore() {
    assert_output("number x = 1; { number x = 2; puts x; } puts x;", "2\n1\n");
    assert_output("number x = 1; { x = 5; } puts x;", "5\n");
    assert_output("number x = 1; while (x < 3) { number y = x; x = y + 1; } puts x;",
                  "3\n");
}

#[test]
fn scopes_are_restored_after_early_exit() {
    let src = "number depth = 0;
               function number find() {
                   { number depth = 10; { return depth; } }
               }
               puts find();
               puts depth;
               while (true) { number depth = 3; break; }
               puts depth;";
    assert_output(src, "10\n0\n0\n");

    let mut interpreter = Interpreter::new(Vec::new());
    assert!(interpreter.run_source("number x = 1; { number x = 2; puts y; }").is_err());
    interpreter.run_source("puts x;").unwrap();
    assert_eq!(interpreter.into_output(), b"1\n");
}

#[test]
fn redeclaration_in_the_same_scope_fails() {
    let error = assert_failure("number x = 1; number x = 2;", Stage::Interpreter);
    assert_eq!(error.to_string(),
               "Interpreter error:\n[ 1 ] Tried to declare 'x', but it already exists. at x.\n");

    assert_failure("function void f(number a, number a) {} f(1, 2);", Stage::Interpreter);
    assert_failure("{ string s; bool s; }", Stage::Interpreter);
}

#[test]
fn functions_only_see_globals_and_parameters() {
    assert_output("number g = 5; function number get() { return g; } puts get();", "5\n");

    let error = assert_failure("function number peek() { return secret; }
                                { number secret = 1; puts peek(); }",
                               Stage::Interpreter);
    assert_eq!(error.location(), Some("secret"));

    assert_failure("{ number hidden = 1; function number peek() { return hidden; } puts peek(); }",
                   Stage::Interpreter);
}

#[test]
fn recursion_sees_the_global_binding() {
    assert_output("function number fact(number n) { return n <= 1 ? 1 : n * fact(n - 1); }
                   puts fact(10);",
                  "3628800\n");
}

#[test]
fn interpreter_keeps_state_between_runs() {
    let mut interpreter = Interpreter::new(Vec::new());
    interpreter.run_source("number x = 20;").unwrap();
    interpreter.run_source("function number inc(number n) { return n + 1; }").unwrap();
    interpreter.run_source("puts inc(x);").unwrap();

    assert_eq!(interpreter.into_output(), b"21\n");
}

#[test]
fn nothing_runs_when_parsing_fails() {
    let mut out = Vec::new();
    let errors = run("puts 1; puts ;", &mut out).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(out.is_empty());
}

#[test]
fn execution_stops_at_the_first_runtime_error() {
    let mut out = Vec::new();
    let errors = run("puts 1; puts y; puts 2;", &mut out).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(out, b"1\n");
}

#[test]
fn diagnostics_render_stage_line_and_location() {
    let error = assert_failure("puts 1;\nputs 1 / 0;", Stage::Interpreter);
    assert_eq!(error.to_string(),
               "Interpreter error:\n[ 2 ] Attempt to divide by zero. at /.\n");

    let error = assert_failure("puts 1", Stage::Parser);
    assert_eq!(error.to_string(),
               "Parser error:\n[ 1 ] Expect ';' after value. at end.\n");

    let error = assert_failure("\"abc", Stage::Scanner);
    assert_eq!(error.to_string(), "Scanner error:\n[ 1 ] Unterminated string.\n");

    let error = assert_failure("sleep(1.5);", Stage::NativeFunction);
    assert_eq!(error.to_string(),
               "Native Function error:\n[ 1 ] Function sleep expected an integer. Round your number \
                with round() if needed. at sleep.\n");
}

#[test]
fn lexing_errors_are_all_reported() {
    let errors = errors_of("@ puts 1; # \"x");
    assert_eq!(errors.len(), 3);
    assert!(errors.iter().all(|e| e.stage() == Stage::Scanner));

    let error = assert_failure("bool b = true & false;", Stage::Scanner);
    assert_eq!(error.to_string(),
               "Scanner error:\n[ 1 ] Another '&' expected after single '&'.\n");
    assert_failure("bool b = true | false;", Stage::Scanner);
}

#[test]
fn parse_errors_are_all_reported() {
    let errors = errors_of("number = 1;\nputs 2");
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].to_string(),
               "Parser error:\n[ 1 ] Expect variable name. at =.\n");
    assert_eq!(errors[1].line(), 2);

    let error = assert_failure("1 = 2;", Stage::Parser);
    assert_eq!(error.location(), Some("="));

    assert_failure("function number f() { puts 1; }", Stage::Parser);
    assert_failure("switch (1) { default: puts 1; default: puts 2; }", Stage::Parser);
    assert_failure("void v;", Stage::Parser);
}

#[test]
fn division_by_zero_fails() {
    let error = assert_failure("puts 1 / 0;", Stage::Interpreter);
    assert_eq!(error.location(), Some("/"));
    assert_failure("number zero = 0; puts 5 / -zero;", Stage::Interpreter);
}

#[test]
fn type_mismatches_fail() {
    assert_failure("number x = \"s\";", Stage::Interpreter);
    assert_failure("list l = 1;", Stage::Interpreter);
    assert_failure("number x = 1; x = \"s\";", Stage::Interpreter);
    assert_failure("function number id(number n) { return n; } id(\"x\");",
                   Stage::Interpreter);
    assert_failure("function number f() { return \"x\"; } f();", Stage::Interpreter);
    assert_failure("add(1, 2);", Stage::Interpreter);
}

#[test]
fn void_functions_cannot_return_values() {
    let error = assert_failure("function void f() { return 1; } f();", Stage::Interpreter);
    assert_eq!(error.location(), Some("f"));
    assert_failure("function void f() { return null; } f();", Stage::Interpreter);
}

#[test]
fn every_numeric_operator_applies() {
    assert_output("puts 7 - 2; puts 7 * 2; puts 7 / 2;", "5\n14\n3.5\n");
    assert_output("puts 1 < 2; puts 2 <= 2; puts 1 > 2; puts 1 >= 2;",
                  "true\ntrue\nfalse\nfalse\n");

    let error = assert_failure("puts 1 / 0;", Stage::Interpreter);
    assert_eq!(error.to_string(),
               "Interpreter error:\n[ 1 ] Attempt to divide by zero. at /.\n");
    let error = assert_failure("puts 1 >= \"1\";", Stage::Interpreter);
    assert_eq!(error.to_string(),
               "Interpreter error:\n[ 1 ] Both operands should be numbers. at >=.\n");
}

#[test]
fn operand_errors() {
    assert_failure("puts \"a\" + 1;", Stage::Interpreter);
    assert_failure("puts \"a\" < \"b\";", Stage::Interpreter);
    assert_failure("puts -\"a\";", Stage::Interpreter);
    assert_failure("puts true * 2;", Stage::Interpreter);
}

#[test]
fn call_errors() {
    let error = assert_failure("function number id(number n) { return n; } id(1, 2);",
                               Stage::Interpreter);
    assert!(error.to_string().contains("Expected 1 arguments but got 2"));

    assert_failure("number x = 1; x();", Stage::Interpreter);
    assert_failure("puts y;", Stage::Interpreter);
    assert_failure("y = 1;", Stage::Interpreter);
}

#[test]
fn subscript_errors() {
    let error = assert_failure("list xs = [1, 2, 3]; puts xs[3];", Stage::Interpreter);
    assert_eq!(error.to_string(),
               "Interpreter error:\n[ 1 ] Index 3 out of bounds for list of length 3. at [.\n");

    assert_failure("list xs = [1]; puts xs[-1];", Stage::Interpreter);
    assert_failure("list xs = [1]; puts xs[0.5];", Stage::Interpreter);
    assert_failure("list xs = [1]; puts xs[\"0\"];", Stage::Interpreter);
    assert_failure("number n = 1; puts n[0];", Stage::Interpreter);
}

#[test]
fn misplaced_control_flow_fails() {
    let error = assert_failure("return 1;", Stage::Interpreter);
    assert_eq!(error.to_string(),
               "Interpreter error:\n[ 1 ] Unexpected return statement. at return.\n");

    assert_failure("{ break; }", Stage::Interpreter);
    assert_failure("function void f() { break; } while (true) { f(); }", Stage::Interpreter);
}

/// Runs `test` on a thread with the stack size the command-line binary uses.
fn with_interpreter_stack(test: impl FnOnce() + Send + 'static) {
    std::thread::Builder::new().stack_size(512 * 1024 * 1024)
                               .spawn(test)
                               .expect("spawn interpreter thread")
                               .join()
                               .expect("interpreter thread finished");
}

#[test]
fn deep_recursion_within_the_limit_runs() {
    with_interpreter_stack(|| {
        assert_output("function number f(number n) { if (n == 0) return 0; return f(n - 1); }\n\
                       puts f(1000);",
                      "0\n");
    });
}

#[test]
fn runaway_recursion_is_an_interpreter_error() {
    with_interpreter_stack(|| {
        let error = assert_failure("function number f(number n) {\n  return f(n + 1);\n}\nf(0);",
                                   Stage::Interpreter);
        assert_eq!(error.to_string(),
                   format!("Interpreter error:\n[ 2 ] Maximum call depth of {MAX_CALL_DEPTH} \
                            exceeded. at f.\n"));
    });
}

#[test]
fn builtins() {
    assert_output("number t = clock(); puts t >= 0; puts clock() >= t;", "true\ntrue\n");
    assert_output("puts sleep(0);", "null\n");
    assert_output("puts round(0.5); puts round(1.5); puts round(-2.5);", "0\n2\n-2\n");
    assert_output("list xs = [1, 2, 3]; remove(xs, 1); puts xs[1]; puts count(xs);",
                  "3\n2\n");

    assert_failure("sleep(-1);", Stage::NativeFunction);
    assert_failure("list xs = []; remove(xs, 0);", Stage::NativeFunction);
    assert_failure("list xs = [1]; remove(xs, 0.5);", Stage::NativeFunction);
    assert_failure("round(1, 2);", Stage::Interpreter);
}

#[test]
fn list_literals_evaluate_once() {
    let src = "number n = 0;
               function number next() { n = n + 1; return n; }
               list xs = [next(), next()];
               puts xs[0]; puts xs[0]; puts xs[1]; puts n;";
    assert_output(src, "1\n1\n2\n2\n");
}

#[test]
fn sequence_operator_yields_its_right_operand() {
    let comma = Token::synthetic(TokenKind::Comma, ",", 1);
    let expr = Expr::Binary { left:     Box::new(Expr::Literal(Literal::from(1.0))),
                              op:       BinaryOperator::Sequence,
                              operator: comma,
                              right:    Box::new(Expr::Literal(Literal::from("last"))), };

    let mut interpreter = Interpreter::new(Vec::new());
    assert_eq!(interpreter.evaluate(&expr).unwrap(), Value::from("last"));
}

#[test]
fn switch_statements_run_the_first_matching_case() {
    let print = |text: &str| Stmt::Print { expr:    Expr::Literal(Literal::from(text)),
                                           newline: true, };
    let switch = Stmt::Switch { cases:   vec![(Expr::Literal(Literal::Bool(false)), print("a")),
                                              (Expr::Literal(Literal::Bool(true)), print("b")),
                                              (Expr::Literal(Literal::Bool(true)), print("c")),],
                                default: Some(Box::new(print("default"))), };
    let fallback = Stmt::Switch { cases:   vec![(Expr::Literal(Literal::Null), print("x"))],
                                  default: Some(Box::new(print("default"))), };

    let mut interpreter = Interpreter::new(Vec::new());
    interpreter.interpret(&[switch, fallback]).unwrap();

    assert_eq!(String::from_utf8(interpreter.into_output()).unwrap(), "b\ndefault\n");
}
