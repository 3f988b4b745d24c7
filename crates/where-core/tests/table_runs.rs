//! End-to-end runs over embedded tables.

use std::sync::Arc;

use where_core::strategy::{self, ExpectStrategy};
use where_core::{Failure, Options, Scope, Strategy, Value, WhereError, parse_table, run, to_precision};

fn max_of_a_b_is_c(scope: &Scope<'_>) -> Result<(), Failure> {
    let max = scope.number("a")?.max(scope.number("b")?);
    scope.expect(max).to_be(scope.value("c")?)
}

fn sum_of_a_b_is_c(scope: &Scope<'_>) -> Result<(), Failure> {
    let sum = scope.number("a")? + scope.number("b")?;
    scope.expect(sum).to_be(scope.value("c")?)
}

const MAX_TABLE: &str = r"
    it('passes', function () {
      /***
        a  |  b  |  c
        1  |  2  |  2
        4  |  3  |  4
        6  |  6  |  6
      ***/
      expect(Math.max(a, b)).toBe(c);
    });
";

const MAX_TABLE_WITH_FAILURE: &str = r"
    /***
      a  |  b  |  c
      1  |  1  |  1
      1  |  2  |  2
      4  |  2  |  4
      4  |  8  |  7
    ***/
";

#[test]
fn test_all_rows_pass() {
    let results = run(MAX_TABLE, &Options::new(), max_of_a_b_is_c).unwrap();
    assert_eq!(results.passing.len(), 3);
    assert!(results.failing.is_empty());
    assert!(results.is_success());
}

#[test]
fn test_intercepted_failure() {
    let options = Options::new().with_intercept(true);
    let results = run(MAX_TABLE_WITH_FAILURE, &options, max_of_a_b_is_c).unwrap();

    assert_eq!(results.failing.len(), 1);
    assert_eq!(results.passing.len(), 3);
    let message = &results.failing[0].message;
    assert!(message.contains("[a | b | c]"));
    assert!(message.contains("[4 | 8 | 7]"));
    assert!(message.contains("Expected 8 to be 7."));
    assert_eq!(results.failing[0].index, 3);
}

#[test]
fn test_logging_does_not_change_results() {
    let options = Options::new().with_intercept(true).with_log(true);
    let results = run(MAX_TABLE_WITH_FAILURE, &options, max_of_a_b_is_c).unwrap();
    assert_eq!(results.failing.len(), 1);
    assert_eq!(results.passing.len(), 3);
}

#[test]
fn test_failure_aborts_without_intercept() {
    let mut seen = Vec::new();
    let err = run(MAX_TABLE_WITH_FAILURE, &Options::new(), |scope| {
        seen.push(scope.row_index());
        max_of_a_b_is_c(scope)
    })
    .unwrap_err();

    assert_eq!(seen, vec![0, 1, 2, 3]);
    match err {
        WhereError::Assertion { row, message } => {
            assert_eq!(row, 4);
            assert!(message.contains("[4 | 8 | 7]"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
#[should_panic(expected = "loud row")]
fn test_panic_propagates_without_intercept() {
    let _ = run(MAX_TABLE, &Options::new(), |_| panic!("loud row"));
}

#[test]
fn test_missing_expectation_passes() {
    let results = run(MAX_TABLE, &Options::new(), |_| Ok(())).unwrap();
    assert_eq!(results.passing.len(), 3);
}

#[test]
fn test_results_expose_data() {
    let source = "/***\n  a  |  b  |  c\n  6  |  6  |  6\n***/";
    let results = run(source, &Options::new(), max_of_a_b_is_c).unwrap();
    assert_eq!(results.passing.len(), 1);
    assert_eq!(results.data.values.len(), 1);
    assert_eq!(results.data.labels.join(","), "a,b,c");
}

#[test]
fn test_line_comments_are_ignored() {
    let source = r"
      /***
        | a | b | c |
        | 1 | 2 | 2 | // should pass
      //| 4 | 3 | x | (should not execute)
      ***/
    ";
    let results = run(source, &Options::new(), max_of_a_b_is_c).unwrap();
    assert_eq!(results.total(), 1);
}

#[test]
fn test_all_rows_commented_is_rejected() {
    let source = "/***\n    a  |  b  |  c\n//  1  |  2  |  2 // should fail\n***/";
    let err = parse_table(source).unwrap_err();
    assert!(matches!(err, WhereError::InsufficientRows { found: 1 }));
}

#[test]
fn test_borders_and_padding() {
    let bordered = "/***\n | d | e | f |\n | 1 | 2 | 2 |\n | 4 | 3 | 4 |\n***/";
    let results = run(bordered, &Options::new(), |scope| {
        let max = scope.number("d")?.max(scope.number("e")?);
        scope.expect(max).to_be(scope.value("f")?)
    })
    .unwrap();
    assert_eq!(results.passing.len(), 2);

    let padded = "/***\n    a | b|c\n     6|4 |10\n***/";
    let results = run(padded, &Options::new(), sum_of_a_b_is_c).unwrap();
    assert_eq!(results.passing.len(), 1);
}

#[test]
fn test_empty_rows_are_ignored() {
    let source = "/***\n  a  |  b  |  c\n\n  6  |  6  |  6\n***/";
    assert_eq!(parse_table(source).unwrap().values.len(), 1);
}

#[test]
fn test_numeric_conversion_with_precision() {
    let source = r"
      /***
        a        | b      | c       | p

        0        | 1      | 1       | 1
        0.0      | 1.0    | 1       | 1
        -1       | +1     | 0       | 1
        +1.1     | -1.2   | -0.1    | 2
        08       | 08     | 16      | 2
        6        | 4      | 10.0    | 3
        8.030    | -2.045 | 5.985   | 4
        1,000.67 | 1345   | 2345.67 | 6
        5        | 5      | 10      | 1
      ***/
    ";
    let results = run(source, &Options::new(), |scope| {
        let digits = scope.number("p")? as usize;
        let sum = scope.number("a")? + scope.number("b")?;
        scope.expect(to_precision(sum, digits)).to_be(scope.value("c")?)
    })
    .unwrap();
    assert_eq!(results.passing.len(), 9);
}

#[test]
fn test_keywords_are_typed() {
    let source = "/***\n a    | b         | c     | d\n null | undefined | false | true\n***/";
    run(source, &Options::new(), |scope| {
        scope.expect(scope.value("a")?).to_be(Value::Null)?;
        scope.expect(scope.value("b")?).to_be(Value::Undefined)?;
        scope.expect(scope.value("c")?).to_be(false)?;
        scope.expect(scope.value("d")?).to_be(true)
    })
    .unwrap();
}

#[test]
fn test_quoted_strings_keep_quotes() {
    let source = r#"
      /***
        a  | b  | c    | d    | e   | f        | g           | h | normal
        '' | "" | "''" | '""' | ' ' | ' faff ' | 'undefined' |   |   a b
      ***/
    "#;
    let table = parse_table(source).unwrap();
    let row = &table.values[0];
    let expected = [
        "''",
        "\"\"",
        "\"''\"",
        "'\"\"'",
        "' '",
        "' faff '",
        "'undefined'",
        "",
        "a b",
    ];
    for (value, want) in row.iter().zip(expected) {
        assert_eq!(value, &Value::from(want));
    }
}

#[test]
fn test_numeric_strings() {
    let source = r"
      /***
        date        | dataString   | number | numberString
        1973-01-01  | '2014-01-01' | 2      | '4'
      ***/
    ";
    let table = parse_table(source).unwrap();
    assert_eq!(
        table.values[0],
        vec![
            Value::from("1973-01-01"),
            Value::from("'2014-01-01'"),
            Value::Number(2.0),
            Value::from("'4'"),
        ]
    );
}

#[test]
fn test_slashes_survive_comment_stripping() {
    let source = "/***\n    date\n    01/01/1970   // comment\n // 02/02/1972\n ***/";
    let table = parse_table(source).unwrap();
    assert_eq!(table.values, vec![vec![Value::from("01/01/1970")]]);
}

#[test]
fn test_empty_versus_bordered_cells() {
    let missing_row = "/***\n a\n    // interpreted as missing row\n***/";
    assert!(matches!(
        parse_table(missing_row),
        Err(WhereError::InsufficientRows { found: 1 })
    ));

    let bordered_empty = "/***\n| a |\n|   | // row with empty data\n***/";
    let results = run(bordered_empty, &Options::new(), |scope| {
        scope.expect(scope.value("a")?).to_be("")
    })
    .unwrap();
    assert_eq!(results.passing.len(), 1);

    let missing_last = "/***\n  a  |  b  |  c\n  1  |  2  |\n***/";
    assert!(matches!(
        parse_table(missing_last),
        Err(WhereError::MalformedRow { .. })
    ));

    let bordered_last = "/***\n|  a  |  b  |  c |\n|  1  |  2  |    |\n***/";
    assert!(parse_table(bordered_last).is_ok());

    let missing_first = "/***\n  a  |  b  |  c\n     |  1  |  2\n***/";
    assert!(matches!(
        parse_table(missing_first),
        Err(WhereError::MalformedRow { .. })
    ));

    let bordered_first = "/***\n|  a  |  b  |  c |\n|     |  1  |  2|\n***/";
    assert!(parse_table(bordered_first).is_ok());

    let inner = "/***\n  a  |  b  |  c\n  1  |     | 2\n***/";
    assert_eq!(parse_table(inner).unwrap().values[0][1], Value::from(""));
}

#[test]
fn test_malformed_tables() {
    assert!(matches!(
        parse_table("function () {}"),
        Err(WhereError::NoTableFound)
    ));

    let err = parse_table("/***\n***/").unwrap_err();
    assert_eq!(err.to_string(), "table should contain at least 2 rows but has 0");

    assert!(matches!(
        parse_table("/***\n  a  |  b  |  c\n***/"),
        Err(WhereError::InsufficientRows { found: 1 })
    ));

    assert!(matches!(
        parse_table("/***\n  a | a\n  0 | 1\n***/"),
        Err(WhereError::DuplicateLabel { ref label }) if label == "a"
    ));

    assert!(matches!(
        parse_table("/***\n  a  |  b  |  c\n  6     4     0\n***/"),
        Err(WhereError::MalformedRow { .. })
    ));

    assert!(matches!(
        parse_table("/***\n  | a | b | c\n  | t | o | to\n***/"),
        Err(WhereError::MalformedRow { .. })
    ));

    assert!(matches!(
        parse_table("/***\n  | a | b | c |\n  | 1 | 2 | 3\n***/"),
        Err(WhereError::MalformedRow { .. })
    ));
}

#[test]
fn test_string_literal_tables() {
    let source = r#"function() {
        "a | b | c\n1 | 2 | 3\n4 | 5 | 9";
        return expect(a + b).toBe(c);
    }"#;
    let results = run(source, &Options::new(), sum_of_a_b_is_c).unwrap();
    assert_eq!(results.passing.len(), 2);

    let failing = r#""a | b | c\n1 | 2 | 3\n4 | 5 | 6";"#;
    let results = run(failing, &Options::new().with_intercept(true), sum_of_a_b_is_c).unwrap();
    assert_eq!(results.failing.len(), 1);
    assert_eq!(results.passing.len(), 1);

    let commented = r#""a | b | c\n# 1 | 2 | 3 # should be removed\n4 | 5 | 9";"#;
    let results = run(commented, &Options::new(), sum_of_a_b_is_c).unwrap();
    assert_eq!(results.passing.len(), 1);
}

#[test]
fn test_scope_sees_strategy_and_context() {
    let source = "/***\n a | b | c\n 1 | 2 | 3\n***/";

    run(source, &Options::new(), |scope| {
        scope.expect(scope.value("strategy")?).to_be("expect")
    })
    .unwrap();

    let options = Options::new().with_strategy("assert").with("length", 2);
    run(source, &options, |scope| {
        scope.expect(scope.value("strategy")?).to_be("assert")?;
        scope.expect(scope.value("length")?).to_be(2)
    })
    .unwrap();
}

#[test]
fn test_labels_shadow_context() {
    let source = "/***\n a\n 1\n***/";
    let options = Options::new().with("a", 100);
    run(source, &options, |scope| scope.expect(scope.value("a")?).to_be(1)).unwrap();
}

#[test]
fn test_unknown_strategy() {
    let options = Options::new().with_strategy("no-such-strategy");
    let err = run(MAX_TABLE, &options, max_of_a_b_is_c).unwrap_err();
    assert!(matches!(err, WhereError::UnknownStrategy { ref name } if name == "no-such-strategy"));
}

#[test]
fn test_registered_strategies_self_test() {
    let source = "/***\n name\n expect\n assert\n***/";
    let results = run(source, &Options::new(), |scope| {
        let name = scope.string("name")?;
        scope
            .expect(strategy::lookup(&name).is_some())
            .to_be(true)
    })
    .unwrap();
    assert_eq!(results.passing.len(), 2);
}

/// Compares printed forms, so `2` equals `'2'` once quotes are dropped.
struct LooseStrategy;

impl Strategy for LooseStrategy {
    fn name(&self) -> &str {
        "loose"
    }

    fn assert(&self, actual: &Value, expected: &Value) -> Result<(), Failure> {
        let strip = |v: &Value| v.to_string().trim_matches('\'').to_string();
        if strip(actual) == strip(expected) {
            Ok(())
        } else {
            Err(Failure::custom(format!("{actual} is not loosely {expected}")))
        }
    }

    fn pass_detail(&self) -> String {
        "loosely equal".to_string()
    }
}

#[test]
fn test_custom_strategy_round_trip() {
    strategy::register("loose-integration", Arc::new(LooseStrategy));
    assert!(strategy::list().contains(&"loose-integration".to_string()));

    let source = "/***\n n | s\n 2 | '2'\n 3 | '4'\n***/";
    let options = Options::new()
        .with_strategy("loose-integration")
        .with_intercept(true);
    let results = run(source, &options, |scope| {
        scope.expect(scope.value("n")?).to_be(scope.value("s")?)
    })
    .unwrap();

    assert_eq!(results.passing.len(), 1);
    assert!(results.passing[0].message.contains("(loosely equal)"));
    assert_eq!(results.failing[0].error.as_deref(), Some("3 is not loosely '4'"));

    assert!(strategy::unregister("loose-integration").is_some());
    let err = run(source, &options, |_| Ok(())).unwrap_err();
    assert!(matches!(err, WhereError::UnknownStrategy { .. }));

    strategy::register("loose-integration", Arc::new(ExpectStrategy));
    let results = run(source, &options, |scope| {
        scope.expect(scope.value("strategy")?).to_be("loose-integration")
    })
    .unwrap();
    assert_eq!(results.passing.len(), 2);
    strategy::unregister("loose-integration");
}
