use loxide as lox;

use lox::ast::{Expr, ExprId, Stmt};
use lox::interpreter::Interpreter;
use lox::parser::Parser;
use lox::report::ErrorReporter;
use lox::resolver::Resolver;
use lox::scanner::Scanner;
use lox::token::Token;

fn resolve_source(source: &str) -> (Interpreter, Vec<Stmt>, ErrorReporter) {
    let mut reporter = ErrorReporter::new();

    let tokens: Vec<Token> = Scanner::new(source).filter_map(Result::ok).collect();

    let mut parser = Parser::new(tokens, 0, &mut reporter);
    let statements = parser.parse();
    drop(parser);

    assert!(!reporter.had_static_error(), "test source must parse");

    let mut interpreter = Interpreter::new();
    Resolver::new(&mut interpreter, &mut reporter).resolve(&statements);

    (interpreter, statements, reporter)
}

/// Every variable-referencing occurrence in source order, as (name, id).
fn occurrences(statements: &[Stmt]) -> Vec<(String, ExprId)> {
    let mut out = Vec::new();
    for stmt in statements {
        walk_stmt(stmt, &mut out);
    }
    out
}

fn walk_stmt(stmt: &Stmt, out: &mut Vec<(String, ExprId)>) {
    match stmt {
        Stmt::Expression(e) | Stmt::Print(e) => walk_expr(e, out),

        Stmt::Assert { expression, .. } => walk_expr(expression, out),

        Stmt::Var { initializer, .. } => {
            if let Some(e) = initializer {
                walk_expr(e, out);
            }
        }

        Stmt::Block(items) => {
            for s in items {
                walk_stmt(s, out);
            }
        }

        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            walk_expr(condition, out);
            walk_stmt(then_branch, out);
            if let Some(s) = else_branch {
                walk_stmt(s, out);
            }
        }

        Stmt::While { condition, body } => {
            walk_expr(condition, out);
            walk_stmt(body, out);
        }

        Stmt::Function(decl) => {
            for s in &decl.body {
                walk_stmt(s, out);
            }
        }

        Stmt::Return { value, .. } => {
            if let Some(e) = value {
                walk_expr(e, out);
            }
        }

        Stmt::Class {
            superclass,
            methods,
            ..
        } => {
            if let Some(e) = superclass {
                walk_expr(e, out);
            }
            for m in methods {
                for s in &m.body {
                    walk_stmt(s, out);
                }
            }
        }
    }
}

fn walk_expr(expr: &Expr, out: &mut Vec<(String, ExprId)>) {
    match expr {
        Expr::Literal(_) => {}

        Expr::Grouping(inner) => walk_expr(inner, out),

        Expr::Unary { right, .. } => walk_expr(right, out),

        Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
            walk_expr(left, out);
            walk_expr(right, out);
        }

        Expr::Variable { name, id } => out.push((name.lexeme.clone(), *id)),

        Expr::Assign { name, id, value } => {
            out.push((name.lexeme.clone(), *id));
            walk_expr(value, out);
        }

        Expr::Call {
            callee, arguments, ..
        } => {
            walk_expr(callee, out);
            for a in arguments {
                walk_expr(a, out);
            }
        }

        Expr::Get { object, .. } => walk_expr(object, out),

        Expr::Set { object, value, .. } => {
            walk_expr(object, out);
            walk_expr(value, out);
        }

        Expr::This { keyword, id } => out.push((keyword.lexeme.clone(), *id)),

        Expr::Super { keyword, id, .. } => out.push((keyword.lexeme.clone(), *id)),
    }
}

/// Depth recorded for the `nth` occurrence of `name`, `None` meaning global.
fn depth_of(
    interpreter: &Interpreter,
    occurrences: &[(String, ExprId)],
    name: &str,
    nth: usize,
) -> Option<usize> {
    let (_, id) = occurrences
        .iter()
        .filter(|(n, _)| n == name)
        .nth(nth)
        .expect("occurrence not found");

    interpreter.resolved_depth(*id)
}

#[test]
fn locals_get_depths_and_globals_stay_unrecorded() {
    let (interpreter, statements, reporter) = resolve_source(
        "var a = \"global\";\n{\n  var b = \"local\";\n  {\n    print b;\n    print a;\n  }\n}\n",
    );

    assert!(!reporter.had_static_error());

    let occ = occurrences(&statements);
    assert_eq!(depth_of(&interpreter, &occ, "b", 0), Some(1));
    assert_eq!(depth_of(&interpreter, &occ, "a", 0), None);
}

#[test]
fn parameters_resolve_at_depth_zero() {
    let (interpreter, statements, reporter) = resolve_source("fun f(x) { print x; }");

    assert!(!reporter.had_static_error());

    let occ = occurrences(&statements);
    assert_eq!(depth_of(&interpreter, &occ, "x", 0), Some(0));
}

#[test]
fn closures_see_enclosing_function_locals_one_hop_up() {
    let (interpreter, statements, reporter) =
        resolve_source("fun outer() { var x = 1; fun inner() { print x; } }");

    assert!(!reporter.had_static_error());

    let occ = occurrences(&statements);
    assert_eq!(depth_of(&interpreter, &occ, "x", 0), Some(1));
}

#[test]
fn this_resolves_through_the_class_scope() {
    let (interpreter, statements, reporter) =
        resolve_source("class C { m() { print this; } }");

    assert!(!reporter.had_static_error());

    let occ = occurrences(&statements);
    // One hop out of the method scope into the implicit `this` scope.
    assert_eq!(depth_of(&interpreter, &occ, "this", 0), Some(1));
}

#[test]
fn super_resolves_one_scope_beyond_this() {
    let (interpreter, statements, reporter) = resolve_source(
        "class A { m() {} }\nclass B < A { m() { super.m(); } }",
    );

    assert!(!reporter.had_static_error());

    let occ = occurrences(&statements);
    assert_eq!(depth_of(&interpreter, &occ, "super", 0), Some(2));
}

#[test]
fn reading_a_local_in_its_own_initializer_is_an_error() {
    let (_, _, reporter) = resolve_source("{ var a = a; }");

    assert_eq!(reporter.static_error_count(), 1);
    assert!(reporter.diagnostics()[0]
        .contains("Can't read local variable in its own initializer."));
}

#[test]
fn duplicate_declaration_in_a_local_scope_is_an_error() {
    let (_, _, reporter) = resolve_source("{ var a = 1; var a = 2; }");

    assert_eq!(reporter.static_error_count(), 1);
    assert!(reporter.diagnostics()[0]
        .contains("Already a variable with this name in this scope."));
}

#[test]
fn global_redeclaration_is_allowed() {
    let (_, _, reporter) = resolve_source("var a = 1; var a = 2;");

    assert_eq!(reporter.static_error_count(), 0);
}

#[test]
fn top_level_return_is_an_error() {
    let (_, _, reporter) = resolve_source("return 1;");

    assert_eq!(reporter.static_error_count(), 1);
    assert!(reporter.diagnostics()[0].contains("Can't return from top-level code."));
}

#[test]
fn returning_a_value_from_an_initializer_is_an_error() {
    let (_, _, reporter) = resolve_source("class A { init() { return 1; } }");

    assert_eq!(reporter.static_error_count(), 1);
    assert!(reporter.diagnostics()[0]
        .contains("Can't return a value from an initializer."));
}

#[test]
fn bare_return_in_an_initializer_is_fine() {
    let (_, _, reporter) = resolve_source("class A { init() { return; } }");

    assert_eq!(reporter.static_error_count(), 0);
}

#[test]
fn this_outside_a_class_is_an_error() {
    let (_, _, reporter) = resolve_source("print this;");

    assert_eq!(reporter.static_error_count(), 1);
    assert!(reporter.diagnostics()[0].contains("Can't use 'this' outside of a class."));
}

#[test]
fn super_outside_a_class_is_an_error() {
    let (_, _, reporter) = resolve_source("fun f() { super.m(); }");

    assert_eq!(reporter.static_error_count(), 1);
    assert!(reporter.diagnostics()[0].contains("Can't use 'super' outside of a class."));
}

#[test]
fn super_without_a_superclass_is_an_error() {
    let (_, _, reporter) = resolve_source("class A { m() { super.m(); } }");

    assert_eq!(reporter.static_error_count(), 1);
    assert!(reporter.diagnostics()[0]
        .contains("Can't use 'super' in a class with no superclass."));
}

#[test]
fn a_class_cannot_inherit_from_itself() {
    let (_, _, reporter) = resolve_source("class A < A {}");

    assert_eq!(reporter.static_error_count(), 1);
    assert!(reporter.diagnostics()[0].contains("A class can't inherit from itself."));
}

#[test]
fn resolution_continues_past_the_first_error() {
    let (_, _, reporter) = resolve_source("return 1;\nprint this;");

    assert_eq!(reporter.static_error_count(), 2);
}

#[test]
fn resolving_the_same_tree_twice_assigns_identical_depths() {
    let (mut interpreter, statements, reporter) = resolve_source(
        "var g = 1;\nfun outer() { var x = 2; fun inner(y) { print g + x + y; } }",
    );

    assert!(!reporter.had_static_error());

    let occ = occurrences(&statements);
    let first: Vec<Option<usize>> = occ
        .iter()
        .map(|(_, id)| interpreter.resolved_depth(*id))
        .collect();

    let mut reporter = ErrorReporter::new();
    Resolver::new(&mut interpreter, &mut reporter).resolve(&statements);
    assert!(!reporter.had_static_error());

    let second: Vec<Option<usize>> = occ
        .iter()
        .map(|(_, id)| interpreter.resolved_depth(*id))
        .collect();

    assert_eq!(first, second);
}
