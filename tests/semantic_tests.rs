// Integration tests for semantic analysis

use teachlang::parser::parse;
use teachlang::semantic::{analyze, Analyzer, SemanticError, SemanticErrorKind};

fn analyze_source(source: &str) -> Result<teachlang::semantic::SymbolTable, Vec<SemanticError>> {
    let program = parse(source).expect("Parsing failed");
    analyze(&program)
}

fn kinds(errors: &[SemanticError]) -> Vec<SemanticErrorKind> {
    errors.iter().map(|e| e.kind).collect()
}

#[test]
fn test_well_formed_program_passes() {
    let source = r#"
        int n = 5;
        int acc = 1;
        while (n > 1) {
            int step = n;
            acc = acc * step;
            n = n - 1;
        }
        repeat {
            int shown = factorial(acc);
            print shown;
        } until (acc == acc);
        if (acc != 120) { print 0; } else { print acc / 2; }
    "#;

    let symbols = analyze_source(source).expect("Analysis failed");
    let names: Vec<_> = symbols.iter().map(|sym| sym.name.as_str()).collect();
    assert_eq!(names, vec!["n", "acc"]);
}

#[test_log::test]
fn test_redeclaration_reported_once() {
    let errors = analyze_source("int x;\nint x;\nx = 2;\nprint x;").unwrap_err();

    assert_eq!(kinds(&errors), vec![SemanticErrorKind::RedeclaredVariable]);
    assert_eq!(errors[0].name, "x");
    assert_eq!(errors[0].line(), 2);
}

#[test]
fn test_redeclaration_inside_block() {
    let errors = analyze_source("{\n  int a = 1;\n  int a = 2;\n}").unwrap_err();
    assert_eq!(kinds(&errors), vec![SemanticErrorKind::RedeclaredVariable]);
    assert_eq!(errors[0].line(), 3);
}

#[test_log::test]
fn test_shadowing_keeps_outer_state() {
    let source = "int x;\n{ int x; x = 1; }\nprint x;";
    let program = parse(source).unwrap();

    let mut analyzer = Analyzer::new();
    assert!(!analyzer.analyze(&program));

    let errors = analyzer.diagnostics();
    assert_eq!(kinds(errors), vec![SemanticErrorKind::UninitializedVariable]);
    assert_eq!(errors[0].name, "x");
    assert_eq!(errors[0].line(), 3);

    // The inner `x` was purged when its block closed
    let symbols = analyzer.symbols();
    assert_eq!(symbols.len(), 1);
    let outer = symbols.find("x").unwrap();
    assert_eq!(outer.scope_level, 0);
    assert!(!outer.initialized);
    assert_eq!(symbols.current_scope(), 0);
}

#[test]
fn test_inner_declaration_not_visible_after_block() {
    let errors = analyze_source("{ int t = 1; }\nt = 2;").unwrap_err();
    assert_eq!(kinds(&errors), vec![SemanticErrorKind::UndeclaredVariable]);
    assert_eq!(errors[0].line(), 2);
}

#[test]
fn test_use_before_init() {
    let errors = analyze_source("int x;\nprint x;").unwrap_err();

    assert_eq!(kinds(&errors), vec![SemanticErrorKind::UninitializedVariable]);
    assert_eq!(errors[0].line(), 2);
    assert_eq!(
        errors[0].to_string(),
        "Semantic error at line 2: Variable 'x' used without initialization"
    );
}

#[test]
fn test_assignment_initializes() {
    assert!(analyze_source("int x; x = 1; print x;").is_ok());
}

#[test]
fn test_assignment_may_read_its_target() {
    assert!(analyze_source("int x;\nx = x + 1;\nprint x;").is_ok());
}

#[test]
fn test_undeclared_target_read_on_right_side() {
    let errors = analyze_source("z = z * 2;").unwrap_err();
    assert_eq!(kinds(&errors), vec![SemanticErrorKind::UndeclaredVariable]);
    assert_eq!(errors[0].name, "z");
}

#[test]
fn test_assignment_in_inner_block_initializes_outer() {
    assert!(analyze_source("int x; { x = 4; } print x;").is_ok());
}

#[test]
fn test_undeclared_reported_once() {
    let errors = analyze_source("y = 1;").unwrap_err();
    assert_eq!(kinds(&errors), vec![SemanticErrorKind::UndeclaredVariable]);

    let errors = analyze_source("y = y + y;\nprint y * y;").unwrap_err();
    assert_eq!(kinds(&errors), vec![SemanticErrorKind::UndeclaredVariable]);
    assert_eq!(errors[0].name, "y");
    assert_eq!(errors[0].line(), 1);
}

#[test]
fn test_distinct_undeclared_names_each_reported() {
    let errors = analyze_source("print a + b;\nprint a;").unwrap_err();
    let names: Vec<_> = errors.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_uninitialized_reported_every_time() {
    let errors = analyze_source("int x;\nprint x + x;").unwrap_err();
    assert_eq!(
        kinds(&errors),
        vec![
            SemanticErrorKind::UninitializedVariable,
            SemanticErrorKind::UninitializedVariable
        ]
    );
}

#[test]
fn test_invalid_builtin_call() {
    let errors = analyze_source("int n = 3;\nprint fact(n);").unwrap_err();

    assert_eq!(kinds(&errors), vec![SemanticErrorKind::InvalidOperation]);
    assert_eq!(errors[0].name, "fact");
    assert_eq!(errors[0].line(), 2);
}

#[test]
fn test_builtin_call_checks_argument() {
    let errors = analyze_source("int n;\nprint factorial(n);").unwrap_err();
    assert_eq!(kinds(&errors), vec![SemanticErrorKind::UninitializedVariable]);
}

#[test]
fn test_repeat_scoping() {
    // The body sees the enclosing scope
    assert!(analyze_source("int i = 0; repeat { i = i + 1; } until (i == 3);").is_ok());

    // The condition does not see the body's declarations
    let errors = analyze_source("repeat { int done = 1; } until (done == 1);").unwrap_err();
    assert_eq!(kinds(&errors), vec![SemanticErrorKind::UndeclaredVariable]);
}

#[test]
fn test_every_branch_is_checked() {
    let source = "int c = 1;\nif (c > 0) { print a; } else { print b; }\nwhile (c < 0) { print d; }";
    let errors = analyze_source(source).unwrap_err();

    let names: Vec<_> = errors.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "d"]);
}
