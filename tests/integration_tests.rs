use calckit::calculator::{BinaryOperator, MemoryOp, UnaryFunction};
use calckit::domains::date_time::{add_business_days, business_days};
use calckit::format::ERROR_SENTINEL;
use calckit::input::{raw_inputs, InputKind, RawInputs};
use calckit::*;
use chrono::{NaiveDate, NaiveTime};

fn fixed_context() -> EvalContext {
    EvalContext::fixed(
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
    )
}

fn enter(calc: &mut Calculator, digits: &str) {
    for digit in digits.chars() {
        calc.input_digit(digit).unwrap();
    }
}

fn sample_inputs(spec: &FormulaSpec) -> RawInputs {
    raw_inputs(spec.inputs.iter().map(|input| {
        let text = match input.kind {
            InputKind::Numeric => "2",
            InputKind::Text => "1010",
            InputKind::Date => "2024-03-15",
            InputKind::Time => "09:30",
        };
        (input.id, text)
    }))
}

/// Converting forward then back returns the original value for every unit pair.
#[test]
fn test_conversion_round_trip_all_pairs() {
    let converter = UnitConverter::builtin();
    let value = 123.456;

    for (category, _) in converter.list_categories() {
        let units = converter.list_units(category).unwrap();
        for (from, _) in &units {
            for (to, _) in &units {
                let there = converter.convert(category, value, from, to).unwrap();
                let back = converter.convert(category, there, to, from).unwrap();
                let relative = ((back - value) / value).abs();
                assert!(
                    relative < 1e-6,
                    "{}: {} -> {} -> {} drifted to {}",
                    category,
                    from,
                    to,
                    from,
                    back
                );
            }
            assert_eq!(converter.convert(category, value, from, from).unwrap(), value);
        }
    }
}

/// Temperature conversion hits the well-known fixed points.
#[test]
fn test_temperature_fixed_points() {
    let converter = UnitConverter::builtin();
    let convert = |v, from, to| converter.convert("temperature", v, from, to).unwrap();

    assert!((convert(100.0, "celsius", "fahrenheit") - 212.0).abs() < 1e-9);
    assert!((convert(0.0, "celsius", "fahrenheit") - 32.0).abs() < 1e-9);
    assert!((convert(32.0, "fahrenheit", "celsius")).abs() < 1e-9);
    assert!((convert(0.0, "kelvin", "celsius") + 273.15).abs() < 1e-9);
    assert!((convert(0.0, "celsius", "kelvin") - 273.15).abs() < 1e-9);
    assert!((convert(-40.0, "celsius", "fahrenheit") + 40.0).abs() < 1e-9);
}

/// The panel keeps the to-field in sync and swaps back to where it started.
#[test]
fn test_conversion_panel_flow() {
    let converter = UnitConverter::builtin();
    let mut panel = ConversionPanel::new(&converter, "length").unwrap();

    panel.set_units("kilometer", "meter").unwrap();
    panel.set_from_value("2.5");
    assert_eq!(panel.to_value(), "2500");

    panel.swap();
    assert_eq!(panel.from_unit(), "meter");
    assert_eq!(panel.to_unit(), "kilometer");
    assert_eq!(panel.from_value(), "2500");
    assert_eq!(panel.to_value(), "2.5");

    assert!(panel.set_units("kilometer", "parsec").unwrap_err().is_not_found());
    assert_eq!(panel.to_unit(), "kilometer");

    panel.set_units("meter", "mile").unwrap();
    panel.set_from_value("1");
    panel.swap();
    panel.swap();
    assert_eq!(panel.from_value(), "1");
    assert_eq!(panel.to_value(), "0.000621");
}

/// Operators apply immediately, left to right.
#[test]
fn test_calculator_immediate_execution() {
    let mut calc = Calculator::new();
    enter(&mut calc, "2");
    calc.input_operator(BinaryOperator::Add);
    enter(&mut calc, "3");
    calc.input_operator(BinaryOperator::Multiply);
    enter(&mut calc, "4");
    calc.calculate();

    assert_eq!(calc.display_value(), "20");
    assert_eq!(calc.history()[0].expression, "5 × 4");
    assert_eq!(calc.history()[0].result, 20.0);
}

/// Division by zero shows the sentinel and leaves memory untouched.
#[test]
fn test_division_by_zero() {
    let mut calc = Calculator::new();
    enter(&mut calc, "7");
    calc.memory_op(MemoryOp::Store);
    calc.clear();

    enter(&mut calc, "5");
    calc.input_operator(BinaryOperator::Divide);
    enter(&mut calc, "0");
    calc.calculate();

    assert_eq!(calc.display_value(), ERROR_SENTINEL);
    assert_eq!(calc.memory(), 7.0);
    assert!(calc.history().is_empty());

    enter(&mut calc, "9");
    assert_eq!(calc.display_value(), "9");
}

/// Factorial accepts non-negative integers only.
#[test]
fn test_factorial_via_calculator() {
    let mut calc = Calculator::new();
    enter(&mut calc, "5");
    calc.apply_unary_function(UnaryFunction::Factorial);
    assert_eq!(calc.display_value(), "120");

    calc.clear();
    enter(&mut calc, "1");
    calc.toggle_sign();
    calc.apply_unary_function(UnaryFunction::Factorial);
    assert_eq!(calc.display_value(), ERROR_SENTINEL);

    calc.clear();
    enter(&mut calc, "2.5");
    calc.apply_unary_function(UnaryFunction::Factorial);
    assert_eq!(calc.display_value(), ERROR_SENTINEL);
}

/// History is bounded and ordered most recent first.
#[test]
fn test_history_bound() {
    let mut calc = Calculator::new();
    for i in 0..25 {
        enter(&mut calc, "1");
        calc.input_operator(BinaryOperator::Add);
        enter(&mut calc, &i.to_string());
        calc.calculate();
        calc.clear();
    }

    assert_eq!(calc.history().len(), 20);
    assert_eq!(calc.history()[0].expression, "1 + 24");
    assert_eq!(calc.history()[19].expression, "1 + 5");

    calc.recall_history(0).unwrap();
    assert_eq!(calc.display_value(), "25");
    assert!(calc.recall_history(20).unwrap_err().is_not_found());
}

/// Expression entry honours precedence and records history.
#[test]
fn test_expression_entry() {
    let mut calc = Calculator::new();
    assert_eq!(calc.evaluate_expression("2 + 3 * 4").unwrap(), 14.0);
    assert_eq!(calc.display_value(), "14");
    assert_eq!(calc.history()[0].expression, "2 + 3 * 4");

    assert!(calc.evaluate_expression("2 +").unwrap_err().is_invalid_input());
    assert_eq!(calc.display_value(), "14");

    let nested = format!("{}1{}", "(".repeat(5_000), ")".repeat(5_000));
    assert!(calc.evaluate_expression(&nested).unwrap_err().is_invalid_input());
    let nested = format!("{}1{}", "(".repeat(1_000), ")".repeat(1_000));
    assert!(calc.evaluate_expression(&nested).unwrap_err().is_invalid_input());
    assert_eq!(calc.display_value(), "14");
    assert_eq!(calc.history().len(), 1);

    calc.evaluate_expression("random()").unwrap();
    assert_eq!(calc.history()[0].expression, "random()");
}

/// The same formula, inputs and context always give the same result.
#[test]
fn test_evaluation_is_deterministic() {
    let registry = FormulaRegistry::builtin();
    let evaluator = Evaluator::new();
    let ctx = fixed_context();

    for (_, _, spec) in registry.iter_formulas() {
        let raw = sample_inputs(spec);
        let first = evaluator.evaluate(spec, &raw, &ctx).unwrap();
        let second = evaluator.evaluate(spec, &raw, &ctx).unwrap();
        assert_eq!(first, second, "{} is not deterministic", spec.id);
    }
}

/// Every built-in formula accepts its declared inputs.
#[test]
fn test_every_builtin_formula_evaluates() {
    let registry = FormulaRegistry::builtin();
    let evaluator = Evaluator::new();
    let ctx = fixed_context();
    let mut count = 0;

    for (domain, category, spec) in registry.iter_formulas() {
        let raw = sample_inputs(spec);
        let result = evaluator.evaluate(spec, &raw, &ctx);
        assert!(
            result.is_ok(),
            "{}/{}/{} failed: {:?}",
            domain,
            category,
            spec.id,
            result
        );
        count += 1;
    }

    assert!(count > 100);
}

/// A single bad field rejects the whole evaluation and names every bad field.
#[test]
fn test_invalid_input_is_all_or_nothing() {
    let registry = FormulaRegistry::builtin();
    let spec = registry
        .select_formula("physics", "kinematics", "velocity")
        .unwrap();
    let evaluator = Evaluator::new();

    let raw = raw_inputs([("distance", "abc"), ("time", "")]);
    match evaluator.evaluate(spec, &raw, &fixed_context()) {
        Err(CalcError::InvalidInput { fields, .. }) => {
            assert_eq!(fields, vec!["distance".to_string(), "time".to_string()]);
        }
        other => panic!("expected InvalidInput, got {:?}", other),
    }
}

/// A session keeps its previous result when a later evaluation is rejected.
#[test]
fn test_session_keeps_result_on_rejection() {
    let registry = FormulaRegistry::builtin();
    let mut session = FormulaSession::new(&registry);
    let ctx = fixed_context();

    session
        .select_formula("chemistry", "solutions", "molarity")
        .unwrap();
    session
        .evaluate(&raw_inputs([("moles", "2"), ("volume", "0.5")]), &ctx)
        .unwrap();
    assert_eq!(session.display().as_deref(), Some("4"));

    assert!(session
        .evaluate(&raw_inputs([("moles", "2")]), &ctx)
        .is_err());
    assert_eq!(session.display().as_deref(), Some("4"));

    assert!(session.select_formula("chemistry", "solutions", "nope").is_err());
    assert_eq!(session.active().map(|s| s.id), Some("molarity"));
}

/// Business days count both ends; adding starts from the next day.
#[test]
fn test_business_day_semantics() {
    let monday = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
    let next_monday = NaiveDate::from_ymd_opt(2024, 3, 18).unwrap();
    let saturday = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();

    assert_eq!(business_days(monday, next_monday), 6);
    assert_eq!(business_days(saturday, saturday), 0);
    assert_eq!(business_days(next_monday, monday), 0);

    assert_eq!(add_business_days(monday, 5).unwrap(), next_monday);
    assert_eq!(add_business_days(saturday, 1).unwrap(), next_monday);
}

/// Domain failures render as the sentinel rather than an error.
#[test]
fn test_domain_failure_renders_sentinel() {
    let registry = FormulaRegistry::builtin();
    let evaluator = Evaluator::new();
    let spec = registry
        .select_formula("computer-science", "number-systems", "binaryToDecimal")
        .unwrap();

    let result = evaluator
        .evaluate(spec, &raw_inputs([("binary", "1021")]), &fixed_context())
        .unwrap();
    assert!(!result.is_ok());
    assert_eq!(result.display(evaluator.options()), ERROR_SENTINEL);
}

/// The catalog lists every domain and never exposes compute functions.
#[test]
fn test_catalog_json() {
    let registry = FormulaRegistry::builtin();
    let json: serde_json::Value =
        serde_json::from_str(&registry.catalog().to_json().unwrap()).unwrap();

    let domains = json["domains"].as_array().unwrap();
    assert_eq!(domains.len(), 6);
    assert_eq!(domains[5]["key"], "date-time");

    let first = &domains[0]["categories"][0]["formulas"][0];
    assert!(first.get("compute").is_none());
    assert!(first["inputs"].is_array());
}

/// Configuration drives every component.
#[test]
fn test_config_drives_components() {
    let config = EngineConfig::from_toml_str(
        r#"
        [calculator]
        history_limit = 2

        [converter]
        exponent_digits = 3
        "#,
    )
    .unwrap();

    let mut calc = config.calculator();
    for _ in 0..3 {
        calc.evaluate_expression("1 + 1").unwrap();
    }
    assert_eq!(calc.history().len(), 2);

    let converter = config.unit_converter();
    assert_eq!(converter.format(12_345_678.0), "1.235e+7");
}
