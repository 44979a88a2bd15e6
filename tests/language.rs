use std::fs;

use jal::{
    interpreter::{
        checker::core::check, evaluator::core::Context, lexer::tokenize, parser::core::parse,
        value::Value,
    },
    run_source, run_source_with_context,
};
use walkdir::WalkDir;

#[test]
fn sample_scripts_run() {
    let mut count = 0;

    for entry in
        WalkDir::new("scripts").into_iter()
                               .filter_map(Result::ok)
                               .filter(|e| e.path().extension().is_some_and(|ext| ext == "jal"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = run_source(&source) {
            panic!("Sample script {path:?} failed:\n{e}");
        }
    }

    assert!(count > 0, "No sample scripts found in scripts/");
}

fn assert_success(src: &str) {
    if let Err(e) = run_source(src) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure_containing(src: &str, needle: &str) {
    match run_source(src) {
        Ok(()) => panic!("Script succeeded but was expected to fail"),
        Err(e) => {
            let message = e.to_string();
            assert!(message.contains(needle),
                    "error {message:?} does not mention {needle:?}");
        },
    }
}

fn global_value(src: &str, name: &str) -> Value {
    let context = run_source_with_context(src, false).unwrap_or_else(|e| {
                                                         panic!("Script failed: {e}");
                                                     });
    context.get_variable(name)
           .unwrap_or_else(|| panic!("no global named '{name}'"))
           .clone()
}

fn global_number(src: &str, name: &str) -> f64 {
    global_value(src, name).as_number().unwrap()
}

fn global_string(src: &str, name: &str) -> String {
    match global_value(src, name) {
        Value::Str(value) => value,
        other => panic!("expected a string, found {other:?}"),
    }
}

#[test]
fn arithmetic_and_precedence() {
    assert_eq!(global_number("let x := 2 + 3 * 4", "x"), 14.0);
    assert_eq!(global_number("let x := (2 + 3) * 4", "x"), 20.0);
    assert_eq!(global_number("let x := 10 - 2 - 3", "x"), 5.0);
}

#[test]
fn integer_division_truncates() {
    assert_eq!(global_number("let q := 7 / 2", "q"), 3.0);
    assert_eq!(global_number("let q := 0 - 7 / 2", "q"), -3.0);
    assert_eq!(global_number("let r := 7 % 3", "r"), 1.0);

    // Runtime numbers are unified: an integral float divides like an
    // integer, while a fractional operand keeps the exact quotient.
    assert_eq!(global_number("let q := 7.0 / 2", "q"), 3.0);
    assert_eq!(global_number("let q := 7.5 / 2", "q"), 3.75);
}

#[test]
fn comparisons_bind_looser_than_arithmetic() {
    assert_eq!(global_value("let b := 1 + 2 < 2 * 2", "b"), Value::Bool(true));
    assert_eq!(global_value("let b := 2 * 3 <= 5", "b"), Value::Bool(false));
}

#[test]
fn if_else_picks_the_truthy_branch() {
    let src = r#"
        let result := 0
        fn main() : void {
            let s := "hi"
            if (s == "hi") {
                result = 1
            } else {
                result = 0
            }
        }
    "#;
    assert_eq!(global_number(src, "result"), 1.0);
}

#[test]
fn for_in_iterates_elements() {
    let src = "let xs := [10, 20, 30]\nlet sum := 0\nfor v in xs { sum = sum + v }";
    assert_eq!(global_number(src, "sum"), 60.0);
}

#[test]
fn for_of_iterates_indices() {
    let src = "let xs := [10, 20, 30]\nlet sum := 0\nfor i of xs { sum = sum + i }";
    assert_eq!(global_number(src, "sum"), 3.0);
}

#[test]
fn assigning_to_const_is_a_type_error() {
    let src = "fn main() : void { const k := 1 k = 2 }";
    assert_failure_containing(src, "immutable");
    assert_failure_containing(src, "k");
}

#[test]
fn list_push_and_spread_append() {
    let src = "let a := [1]\na << 2\na << [3, 4]\nlet n := len(a)";
    assert_eq!(global_number(src, "n"), 4.0);
}

#[test]
fn pushing_a_list_spreads_its_elements() {
    let src = "let a := [1]\na << [2, 3]\nlet first := a[1]";
    assert_eq!(global_number(src, "first"), 2.0);
}

#[test]
fn recursive_function_calls() {
    let src = r"
        fn fact(n : int) : int {
            if (n == 0) {
                return 1
            } else {
                return n * fact(n - 1)
            }
        }
        let f := fact(5)
    ";
    assert_eq!(global_number(src, "f"), 120.0);
}

#[test]
fn stringify_and_to_number_round_trip() {
    let src = "let n := 42\nlet back := toNumber(stringify(n))";
    assert_eq!(global_number(src, "back"), 42.0);
}

#[test]
fn type_builtin_names_runtime_kinds() {
    assert_eq!(global_string("let t := type([1])", "t"), "array");
    assert_eq!(global_string("let t := type(1)", "t"), "number");
    assert_eq!(global_string("let t := type(\"s\")", "t"), "string");
    assert_eq!(global_string("let t := type(true)", "t"), "boolean");
}

#[test]
fn out_of_range_index_yields_null() {
    assert_eq!(global_string("let xs := [1]\nlet t := type(xs[5])", "t"), "null");
}

#[test]
fn missing_return_in_non_void_function_yields_null() {
    let src = r#"
        fn f() : int {
            if (false) {
                return 1
            }
        }
        let t := type(f())
    "#;
    assert_eq!(global_string(src, "t"), "null");
}

#[test]
fn callee_sees_globals_but_not_caller_locals() {
    let src = r"
        let x := 1
        let result := 0
        fn get_x() : int {
            return x
        }
        fn main() : void {
            let x := 99
            result = get_x()
        }
    ";
    assert_eq!(global_number(src, "result"), 1.0);
}

#[test]
fn while_loop_unwinds_on_return() {
    let src = r"
        fn find() : int {
            let i := 0
            while (true) {
                if (i == 3) {
                    return i
                }
                i = i + 1
            }
            return 0 - 1
        }
        let found := find()
    ";
    assert_eq!(global_number(src, "found"), 3.0);
}

#[test]
fn block_shadowing_restores_the_outer_binding() {
    let src = r"
        let x := 1
        let inner := 0
        {
            let x := 2
            inner = x
        }
        let outer := x
    ";
    assert_eq!(global_number(src, "inner"), 2.0);
    assert_eq!(global_number(src, "outer"), 1.0);
}

#[test]
fn shadowing_a_const_is_rejected() {
    assert_failure_containing("const k := 1\nfn main() : void { let k := 2 }", "shadow");
}

#[test]
fn duplicate_declaration_in_one_scope_is_rejected() {
    assert_failure_containing("fn main() : void { let x := 1 let x := 2 }", "already declared");
}

#[test]
fn undefined_variable_is_rejected() {
    assert_failure_containing("fn main() : void { print(y) }", "not defined");
}

#[test]
fn non_boolean_condition_is_rejected() {
    assert_failure_containing("fn main() : void { if (1) { print(1) } }", "condition must be bool");
}

#[test]
fn return_type_mismatch_is_rejected() {
    assert_failure_containing("fn f() : int { return \"no\" }", "return type");
}

#[test]
fn return_outside_a_function_is_rejected() {
    assert_failure_containing("return 1", "outside");
}

#[test]
fn wrong_arity_is_rejected() {
    let src = "fn f(a : int) : int { return a }\nfn main() : void { print(f()) }";
    assert_failure_containing(src, "argument");
}

#[test]
fn argument_type_mismatch_is_rejected() {
    let src = "fn f(a : int) : int { return a }\nfn main() : void { print(f(\"s\")) }";
    assert_failure_containing(src, "argument 0");
}

#[test]
fn pushing_into_a_const_list_is_rejected() {
    assert_failure_containing("const xs := [1]\nfn main() : void { xs << 2 }", "immutable");
}

#[test]
fn mixed_list_elements_are_rejected() {
    assert_failure_containing("let xs := [1, \"two\"]", "list elements");
}

#[test]
fn duplicate_function_names_are_rejected() {
    let src = "fn f() : void { }\nfn f() : void { }";
    assert_failure_containing(src, "already defined");
}

#[test]
fn declaration_annotation_must_match_initializer() {
    assert_failure_containing("let x : string = 1", "declared as string");
}

#[test]
fn checker_accumulates_multiple_errors() {
    let tokens = tokenize("fn main() : void { k = 1 if (2) { } }").unwrap();
    let program = parse(&tokens).unwrap();
    let errors = check(&program);

    assert_eq!(errors.len(), 2);
}

#[test]
fn earlier_statements_cannot_use_later_siblings() {
    // Execution is strictly in order, so an initializer referencing a
    // sibling declared further down would read an unbound name at runtime;
    // the checker rejects it up front.
    let tokens = tokenize("fn main() : void { let a := b let b := 1 print(a) }").unwrap();
    let program = parse(&tokens).unwrap();
    let errors = check(&program);

    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("'b'"), "got {:?}", errors[0]);
}

#[test]
fn function_bodies_see_globals_declared_later() {
    // Top-level declarations all run before main is invoked, so a body may
    // reference a global declared below the function.
    let src = "fn main() : void { total = total + 1 }\nlet total := 0";
    assert_eq!(global_number(src, "total"), 1.0);
}

#[test]
fn nested_functions_cannot_see_enclosing_locals() {
    // A call frame holds globals and the callee's own locals only, so an
    // enclosing body's local is out of reach; the checker agrees.
    let src = "fn outer() : void { let x := 1 fn inner() : void { print(x) } inner() }\n\
               fn main() : void { outer() }";
    assert_failure_containing(src, "'x' is not defined");
}

#[test]
fn nested_functions_see_globals() {
    let src = r"
        let hits := 0
        fn outer() : void {
            fn bump() : void {
                hits = hits + 1
            }
            bump()
            bump()
        }
        fn main() : void { outer() }
    ";
    assert_eq!(global_number(src, "hits"), 2.0);
}

#[test]
fn parse_errors_are_fatal_and_positioned() {
    match run_source("let := 1") {
        Ok(()) => panic!("expected a parse error"),
        Err(e) => {
            let message = e.to_string();
            assert!(message.contains("Parse error at token 1"), "got {message:?}");
        },
    }
}

#[test]
fn unterminated_strings_are_lex_errors() {
    assert_failure_containing("let s := \"oops", "unterminated");
}

#[test]
fn division_by_zero_is_a_runtime_error() {
    assert_failure_containing("fn main() : void { print(1 / 0) }", "ivision by zero");
    assert_failure_containing("fn main() : void { print(1 % 0) }", "odulo by zero");
}

#[test]
fn runaway_recursion_hits_the_depth_limit() {
    let tokens = tokenize("fn spin() : int { return spin() }\nfn main() : void { print(spin()) }")
        .unwrap();
    let program = parse(&tokens).unwrap();
    assert!(check(&program).is_empty());

    let mut context = Context::new().with_max_depth(64);
    let error = context.run(&program).unwrap_err();

    assert!(error.to_string().contains("stack overflow"), "got {error}");
}

#[test]
fn to_number_parses_strings_and_rejects_garbage() {
    assert_eq!(global_number("let n := toNumber(\"41\") + 1", "n"), 42.0);
    assert_eq!(global_number("let n := toNumber(true)", "n"), 1.0);
    assert_failure_containing("fn main() : void { print(toNumber(\"nope\")) }", "cannot convert");
}

#[test]
fn lists_are_shared_by_reference() {
    let src = r"
        let a := [1]
        let b := a
        fn main() : void {
            b << 2
        }
        let same := a == b
    ";
    // `same` is computed before main runs, but reference equality already
    // holds; after main, the shared list has both elements.
    let context = run_source_with_context(src, false).unwrap();
    assert_eq!(context.get_variable("same").cloned(), Some(Value::Bool(true)));

    let a = context.get_variable("a").unwrap().as_list().unwrap();
    assert_eq!(a.borrow().len(), 2);
}

#[test]
fn list_equality_is_by_reference() {
    assert_eq!(global_value("let same := [1] == [1]", "same"), Value::Bool(false));
    assert_eq!(global_value("let a := [1]\nlet b := a\nlet same := a == b", "same"),
               Value::Bool(true));
}

#[test]
fn top_level_expression_statements_are_skipped() {
    // The bare `toNumber("nope")` would be a runtime error if executed; at
    // the top level it is skipped by design.
    assert_success("toNumber(\"nope\")\nlet x := 1");
}

#[test]
fn empty_list_element_type_is_open() {
    let src = "let xs := []\nxs << 1\nxs << \"mixed later is fine statically\"\nlet n := len(xs)";
    assert_eq!(global_number(src, "n"), 2.0);
}

#[test]
fn step_log_records_execution_order() {
    let context = run_source_with_context("let x := 1\nfn main() : void { x = 2 }", true).unwrap();
    let steps = context.steps().unwrap();

    assert!(!steps.is_empty());
    assert_eq!(steps[0].kind, "VariableDeclaration");
    assert_eq!(steps[0].detail, "x");
    assert!(steps.iter().any(|step| step.kind == "AssignmentStatement"));
}

#[test]
fn semicolons_separate_statements_but_are_optional() {
    assert_success("fn main() : void { let x := 2 + 3 * 4; print(x) }");
    assert_eq!(global_number("let a := 1; let b := a + 1", "b"), 2.0);
}

#[test]
fn len_counts_characters_and_elements() {
    assert_eq!(global_number("let n := len(\"hello\")", "n"), 5.0);
    assert_eq!(global_number("let n := len([1, 2, 3])", "n"), 3.0);
}
