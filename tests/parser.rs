use chonker::{
    ast::{BinaryOperator, DeclaredType, Expr, Literal, Stmt, UnaryOperator},
    error::{Error, Stage},
    interpreter::{
        lexer::scan,
        parser::{core::parse_program, desugar::desugar_switch},
    },
};
use pretty_assertions::assert_eq;

fn parse(src: &str) -> Vec<Stmt> {
    let tokens = scan(src).unwrap_or_else(|e| panic!("Failed to scan {src:?}: {e:?}"));
    parse_program(&tokens).unwrap_or_else(|e| panic!("Failed to parse {src:?}: {e:?}"))
}

fn parse_errors(src: &str) -> Vec<Error> {
    let tokens = scan(src).unwrap_or_else(|e| panic!("Failed to scan {src:?}: {e:?}"));
    match parse_program(&tokens) {
        Ok(program) => panic!("Parsing {src:?} succeeded: {program:?}"),
        Err(errors) => errors,
    }
}

fn print_expr(stmt: &Stmt) -> &Expr {
    match stmt {
        Stmt::Print { expr, .. } => expr,
        other => panic!("Expected a print statement, got {other:?}"),
    }
}

fn number(expr: &Expr) -> f64 {
    match expr {
        Expr::Literal(Literal::Number(n)) => *n,
        other => panic!("Expected a number literal, got {other:?}"),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let program = parse("puts 1 + 2 * 3;");

    let Expr::Binary { left, op, right, .. } = print_expr(&program[0]) else {
        panic!("Expected a binary expression");
    };
    assert_eq!(*op, BinaryOperator::Add);
    assert_eq!(number(left), 1.0);
    assert!(matches!(right.as_ref(),
                     Expr::Binary { op: BinaryOperator::Multiply, .. }));
}

#[test]
fn assignment_is_right_associative() {
    let program = parse("a = b = 3;");

    let Stmt::Expression(Expr::Assign { name, value }) = &program[0] else {
        panic!("Expected an assignment");
    };
    assert_eq!(name.lexeme, "a");
    assert!(matches!(value.as_ref(), Expr::Assign { name, .. } if name.lexeme == "b"));
}

#[test]
fn ternary_nests_in_its_else_branch() {
    let program = parse("puts a ? 1 : b ? 2 : 3;");

    let Expr::Ternary { else_branch, .. } = print_expr(&program[0]) else {
        panic!("Expected a ternary");
    };
    assert!(matches!(else_branch.as_ref(), Expr::Ternary { .. }));
}

#[test]
fn unary_operators_apply_to_postfix_operands() {
    let program = parse("puts -f(1); puts !!b; puts -xs[0];");

    assert!(matches!(print_expr(&program[0]),
                     Expr::Unary { op: UnaryOperator::Negate, right, .. }
                     if matches!(right.as_ref(), Expr::Call { .. })));
    assert!(matches!(print_expr(&program[1]),
                     Expr::Unary { op: UnaryOperator::Not, right, .. }
                     if matches!(right.as_ref(), Expr::Unary { op: UnaryOperator::Not, .. })));
    assert!(matches!(print_expr(&program[2]),
                     Expr::Unary { right, .. } if matches!(right.as_ref(), Expr::Subscript { .. })));
}

#[test]
fn calls_and_subscripts_chain() {
    let program = parse("puts f(1)[0](2, 3);");

    let Expr::Call { callee, arguments, .. } = print_expr(&program[0]) else {
        panic!("Expected a call");
    };
    assert_eq!(arguments.len(), 2);
    let Expr::Subscript { list, .. } = callee.as_ref() else {
        panic!("Expected a subscript");
    };
    assert!(matches!(list.as_ref(), Expr::Call { arguments, .. } if arguments.len() == 1));
}

#[test]
fn comma_declarations_split_into_typed_vars() {
    let program = parse("number a = 1, b, string c; var list d;");

    let declared: Vec<(&str, DeclaredType)> =
        program.iter()
               .map(|stmt| match stmt {
                   Stmt::Var { name, ty, .. } => (name.lexeme.as_str(), *ty),
                   other => panic!("Expected a declaration, got {other:?}"),
               })
               .collect();

    assert_eq!(declared,
               vec![("a", DeclaredType::Number),
                    ("b", DeclaredType::Number),
                    ("c", DeclaredType::String),
                    ("d", DeclaredType::List),]);

    let Stmt::Var { initializer, .. } = &program[1] else {
        panic!("Expected a declaration");
    };
    assert_eq!(number(initializer), 0.0);
}

#[test]
fn for_loops_become_while_loops() {
    let program = parse("for (number i = 0; i < 3; i = i + 1) puts i;");
    assert_eq!(program.len(), 1);

    let Stmt::Block(statements) = &program[0] else {
        panic!("Expected the initializer block");
    };
    assert!(matches!(&statements[0], Stmt::Var { name, .. } if name.lexeme == "i"));

    let Stmt::While { condition, body } = &statements[1] else {
        panic!("Expected a while loop");
    };
    assert!(matches!(condition, Expr::Binary { op: BinaryOperator::Less, .. }));

    let Stmt::Block(body) = body.as_ref() else {
        panic!("Expected the body and increment block");
    };
    assert!(matches!(&body[0], Stmt::Print { .. }));
    assert!(matches!(&body[1], Stmt::Expression(Expr::Assign { .. })));
}

#[test]
fn empty_for_clauses_loop_forever() {
    let program = parse("for (;;) break;");

    assert!(matches!(&program[0],
                     Stmt::While { condition: Expr::Literal(Literal::Bool(true)), body }
                     if matches!(body.as_ref(), Stmt::Break { .. })));
}

#[test]
fn switches_become_if_chains() {
    let program = parse("switch (x) { case 1: puts 1; case 2: puts 2; default: puts 3; }");

    let Stmt::If { condition,
                   then_branch,
                   else_branch, } = &program[0]
    else {
        panic!("Expected an if chain");
    };
    let Expr::Binary { left, op, right, .. } = condition else {
        panic!("Expected a comparison");
    };
    assert_eq!(*op, BinaryOperator::Equal);
    assert_eq!(number(left), 1.0);
    assert!(matches!(right.as_ref(), Expr::Variable { name } if name.lexeme == "x"));
    assert_eq!(number(print_expr(then_branch)), 1.0);

    let Some(Stmt::If { then_branch,
                        else_branch,
                        .. }) = else_branch.as_deref()
    else {
        panic!("Expected the second case");
    };
    assert_eq!(number(print_expr(then_branch)), 2.0);
    assert_eq!(number(print_expr(else_branch.as_deref().expect("default branch"))), 3.0);
}

#[test]
fn empty_switch_is_an_empty_block() {
    assert_eq!(parse("switch (x) {}"), vec![Stmt::Block(Vec::new())]);
    assert_eq!(desugar_switch(Vec::new(), None), Stmt::Block(Vec::new()));
}

#[test]
fn declarations_carry_their_lines() {
    let program = parse("\n\nfunction void f(number a, list b) {\n}\n");

    let Stmt::Function(decl) = &program[0] else {
        panic!("Expected a function");
    };
    assert_eq!(decl.name.line, 3);
    assert_eq!(decl.return_type, DeclaredType::Void);
    assert_eq!(decl.params.iter().map(|p| p.ty).collect::<Vec<_>>(),
               vec![DeclaredType::Number, DeclaredType::List]);
}

#[test]
fn recovery_reports_independent_errors() {
    let errors = parse_errors("puts 1 puts 2;\nnumber;\nputs (3;\nputs 4;");

    let lines: Vec<usize> = errors.iter().map(Error::line).collect();
    assert_eq!(lines, vec![1, 2, 3]);
    assert!(errors.iter().all(|e| e.stage() == Stage::Parser));
    assert_eq!(errors[1].to_string(),
               "Parser error:\n[ 2 ] Expect variable name. at ;.\n");
}

#[test]
fn errors_inside_blocks_resume_at_top_level() {
    let errors = parse_errors("{ puts 1 }\nputs 2;");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].location(), Some("}"));
}

#[test]
fn blocks_recover_without_leaving_the_block() {
    let errors = parse_errors("{ puts 1 puts 2; puts 3; }");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(),
               "Parser error:\n[ 1 ] Expect ';' after value. at puts.\n");

    let errors = parse_errors("{\n  puts (1;\n  number;\n  puts 3;\n}\nputs 4 puts 5;");
    let lines: Vec<usize> = errors.iter().map(Error::line).collect();
    assert_eq!(lines, vec![2, 3, 6]);
}

#[test]
fn nested_block_errors_are_reported_once() {
    let errors = parse_errors("while (true) { if (x) { puts 1 } puts 2; }");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].location(), Some("}"));
}

#[test]
fn function_bodies_recover_without_a_missing_return() {
    let errors = parse_errors("function number f() { number x = ; return 1; }");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(),
               "Parser error:\n[ 1 ] Expect expression. at ;.\n");

    let errors = parse_errors("function number g() { puts 1 }\nputs 2;");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].location(), Some("}"));
}

#[test]
fn invalid_assignment_target() {
    let errors = parse_errors("a + b = 3;");
    assert_eq!(errors[0].to_string(),
               "Parser error:\n[ 1 ] Invalid assignment target. at =.\n");
}

#[test]
fn non_void_functions_need_a_return() {
    let errors = parse_errors("function number f() { puts 1; }");
    assert_eq!(errors[0].to_string(),
               "Parser error:\n[ 1 ] Function 'f' must return a value of type number. at f.\n");

    parse("function number f() { if (true) { return 1; } }");
    parse("function void g() { puts 1; }");
}

#[test]
fn duplicate_default_is_rejected() {
    let errors = parse_errors("switch (1) { default: puts 1; default: puts 2; }");
    assert_eq!(errors[0].to_string(),
               "Parser error:\n[ 1 ] One switch statement can't have more than one 'default' \
                branch. at default.\n");
}

#[test]
fn malformed_headers() {
    for src in ["if true) puts 1;",
                "while (true puts 1;",
                "for (number i = 0 i < 3;) {}",
                "switch (1) { puts 1; }",
                "function f() {}",
                "function number (number a) { return a; }",
                "function number f(a) { return 1; }",
                "[1, 2;",
                "puts xs[0;",
                "puts f(1;",
                "puts (1;",
                "puts true ? 1;",
                "{ puts 1;",
                "break"]
    {
        let errors = parse_errors(src);
        assert!(errors.iter().all(|e| e.stage() == Stage::Parser), "{src}");
    }
}
