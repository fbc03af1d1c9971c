//! Calculator demo: button presses, scientific functions, memory and history

use calckit::calculator::{AngleMode, BinaryOperator, MemoryOp, Mode, UnaryFunction};
use calckit::*;
use tracing_subscriber::EnvFilter;

fn press(calc: &mut Calculator, digits: &str) -> Result<()> {
    for digit in digits.chars() {
        calc.input_digit(digit)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = EngineConfig::from_toml_str(
        r#"
        [calculator]
        history_limit = 5
        mode = "scientific"
        "#,
    )?;
    let mut calc = config.calculator();
    println!("Mode: {:?}, angle: {:?}\n", calc.mode(), calc.angle_mode());

    // 2 + 3 × 4 with immediate execution
    press(&mut calc, "2")?;
    calc.input_operator(BinaryOperator::Add);
    press(&mut calc, "3")?;
    calc.input_operator(BinaryOperator::Multiply);
    println!("Expression: {}", calc.expression());
    press(&mut calc, "4")?;
    calc.calculate();
    println!("2 + 3 × 4 = {}", calc.display_value());

    calc.memory_op(MemoryOp::Store);
    calc.clear();

    press(&mut calc, "30")?;
    calc.apply_unary_function(UnaryFunction::Sin);
    println!("sin(30°) = {}", calc.display_value());

    calc.set_angle_mode(AngleMode::Rad);
    calc.evaluate_expression("sin(pi / 2) + 2^10")?;
    println!("sin(π/2) + 2^10 = {}", calc.display_value());

    calc.clear();
    press(&mut calc, "5")?;
    calc.input_operator(BinaryOperator::Divide);
    press(&mut calc, "0")?;
    calc.calculate();
    println!("5 ÷ 0 = {}", calc.display_value());

    calc.memory_op(MemoryOp::Recall);
    println!("MR = {}", calc.display_value());

    calc.set_mode(Mode::Advanced);
    press(&mut calc, "12")?;
    calc.input_operator(BinaryOperator::Gcd);
    press(&mut calc, "18")?;
    calc.calculate();
    println!("gcd(12, 18) = {}", calc.display_value());

    println!("\nHistory (most recent first):");
    for entry in calc.history() {
        println!("  {} = {}", entry.expression, entry.result);
    }

    Ok(())
}
