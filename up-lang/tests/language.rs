use up_lang::error::UpError;
use up_lang::interpret;
use up_lang::ir::ast::{BlockKind, StatementKind};
use up_lang::parser;
use up_lang::runtime::{StreamConsole, Value, VarKind};

fn run_with_input(src: &str, input: &str) -> Result<String, UpError> {
    let mut console = StreamConsole::memory(input);
    interpret(src, &mut console, false)?;
    Ok(console.output())
}

fn assert_output(src: &str, input: &str, expected: &str) {
    match run_with_input(src, input) {
        Ok(output) => assert_eq!(output, expected, "program:\n{src}"),
        Err(e) => panic!("Script failed: {e}\nprogram:\n{src}"),
    }
}

fn assert_failure(src: &str) -> UpError {
    match run_with_input(src, "") {
        Ok(output) => panic!("Script succeeded with output {output:?} but was expected to fail"),
        Err(e) => e,
    }
}

#[test]
fn declarations_start_zeroed() {
    let src = "number n\nsymbol c\nbool b\nline t\nwrite n\nwrite b\nwrite t";
    assert_output(src, "", "0false");

    let mut console = StreamConsole::memory("");
    let env = interpret(src, &mut console, false).unwrap();
    assert_eq!(env.kind_of("c"), Some(VarKind::Symbol));
    assert_eq!(env.load("c", 0).unwrap(), Value::Symbol('\0'));
}

#[test]
fn every_kind_reads_and_writes() {
    let src = "number n\nsymbol c\nbool b\nline t\nread n\nread c\nread b\nread t\n\
               write n\nwrite c\nwrite b\nwrite t";
    assert_output(src, "12.5 x true\n  hello up world\n", "12.5xtruehello up world");
}

#[test]
fn read_write_round_trip() {
    assert_output("number n\nread n\nwrite n", "42", "42");
}

#[test]
fn assignment_overwrites_previous_value() {
    let src = "number n\nassign 1 to n\nwrite n\nassign 2.25 to n\nwrite n";
    assert_output(src, "", "12.25");
}

#[test]
fn boolean_assignment_from_comparison() {
    let src = "number a\nnumber b\nbool less\nassign 3 to a\nassign 5 to b\n\
               assign a lt b to less\nwrite less\nassign not less to less\nwrite less";
    assert_output(src, "", "truefalse");
}

#[test]
fn line_assignment_joins_words() {
    assert_output("line t\nassign hello   there to t\nwrite t", "", "hello there");
}

#[test]
fn conditional_block_runs_on_true_only() {
    let src = "number n\nnumber limit\nread n\nread limit\n\
               if n lt limit\n\t write n\nif limit lt n\n\t write limit";
    assert_output(src, "1 9", "1");
    assert_output(src, "9 1", "1");
}

#[test]
fn loop_counts_with_input() {
    let src = "number i\nnumber stop\nread stop\nwhile i lt stop\n\t write i\n\t read i\nwrite stop";
    assert_output(src, "3\n1\n2\n3\n", "0123");
}

#[test]
fn grouping_matches_textual_structure() {
    let src = "number n\nwrite n\nif n eq n\n\t write n\nwrite n";
    let blocks = parser::parse(src);

    let kinds: Vec<BlockKind> = blocks.iter().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        vec![BlockKind::Simple, BlockKind::Conditional, BlockKind::Simple]
    );
    assert_eq!(blocks[0].statements[0].kind, StatementKind::Declaration);
    assert_eq!(blocks[0].statements[1].kind, StatementKind::Write);
    assert_eq!(blocks[1].statements[0].kind, StatementKind::Directive);
    assert!(blocks[1].statements[1].subordinate);
    assert_output(src, "", "000");
}

#[test]
fn blank_lines_are_skipped_but_counted() {
    let err = assert_failure("number n\n\n\nnumber n");
    assert!(matches!(err, UpError::DuplicateName { line: 4, .. }));
}

#[test]
fn duplicate_names_fail_across_kinds() {
    let err = assert_failure("number x\n->line x");
    assert!(matches!(err, UpError::DuplicateName { line: 2, .. }));
}

#[test]
fn unknown_type_is_a_syntax_error() {
    let err = assert_failure("n x");
    assert!(matches!(err, UpError::Syntax { line: 1, .. }));
}

#[test]
fn assignment_to_undeclared_is_a_compile_error() {
    let err = assert_failure("assign 1 to ghost");
    assert!(matches!(err, UpError::Compile { .. }));
}

#[test]
fn mismatched_comparison_is_a_type_error() {
    let err = assert_failure("number n\nsymbol c\nif n eq c\n\t write n");
    assert!(matches!(err, UpError::Type { line: 3, .. }));
}

#[test]
fn unbound_reference_fails_on_write() {
    let err = assert_failure("->number p\nwrite p");
    assert!(matches!(err, UpError::UnboundReference { line: 2, .. }));
}

#[test]
fn nested_directive_is_unsupported() {
    let err = assert_failure("number n\nif n eq n\n\t if n eq n");
    assert!(matches!(err, UpError::Unsupported { line: 3, .. }));
}

#[test]
fn error_messages_carry_the_line() {
    let err = assert_failure("number n\nwrite m");
    assert_eq!(err.line(), Some(2));
    assert_eq!(err.to_string(), "undeclared variable at line 2: 'm'");
}

#[test]
fn long_fractional_literal_keeps_its_value() {
    let src = format!("number n\nassign 1.{} to n\nwrite n\nif n eq n\n\t write n", "5".repeat(320));
    assert_output(&src, "", "1.55555555555555561.5555555555555556");
}
