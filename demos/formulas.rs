//! Formula registry demo: browse domains, then evaluate a few formulas
//!
//! Run with `RUST_LOG=calckit=debug` to see the evaluation trace.

use calckit::input::raw_inputs;
use calckit::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Formula Registry ===\n");

    let registry = FormulaRegistry::builtin();
    for (key, title) in registry.list_domains() {
        let categories = registry.list_categories(key)?;
        println!("{} ({}): {} categories", title, key, categories.len());
    }

    println!("\n=== Evaluations ===\n");

    let ctx = EvalContext::current();
    let evaluator = Evaluator::new();
    let cases = [
        (
            "chemistry",
            "solutions",
            "molarity",
            vec![("moles", "0.5"), ("volume", "2")],
        ),
        (
            "electricity",
            "ohms-law",
            "ohms-law-voltage",
            vec![("current", "2"), ("resistance", "10")],
        ),
        (
            "computer-science",
            "number-systems",
            "decimalToBinary",
            vec![("decimal", "42")],
        ),
        (
            "computer-science",
            "number-systems",
            "binaryToDecimal",
            vec![("binary", "1021")],
        ),
    ];

    for (domain, category, id, fields) in cases {
        let spec = registry.select_formula(domain, category, id)?;
        let result = evaluator.evaluate(spec, &raw_inputs(fields), &ctx)?;
        println!(
            "{:<28} {:<16} {}",
            spec.name,
            spec.formula,
            result.display(evaluator.options())
        );
    }

    println!("\n=== Session ===\n");

    let mut session = FormulaSession::new(&registry);
    session.select_formula("physics", "kinematics", "velocity")?;
    let labels: Vec<_> = session.inputs().iter().map(|i| i.label).collect();
    println!("Inputs: {}", labels.join(", "));

    match session.evaluate(&raw_inputs([("distance", "100")]), &ctx) {
        Ok(_) => println!("unexpected success"),
        Err(err) => println!("Rejected: {}", err),
    }
    session.evaluate(&raw_inputs([("distance", "100"), ("time", "9.58")]), &ctx)?;
    println!("Velocity: {}", session.display().unwrap_or_default());

    Ok(())
}
