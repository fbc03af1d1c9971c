//! Unit converter demo: direct conversions and the two-field panel

use calckit::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let converter = UnitConverter::builtin();

    for (key, title) in converter.list_categories() {
        let units: Vec<_> = converter
            .list_units(key)?
            .into_iter()
            .map(|(unit, _)| unit)
            .collect();
        println!("{:<12} {}", title, units.join(", "));
    }

    println!();
    for (category, value, from, to) in [
        ("length", 1.0, "mile", "kilometer"),
        ("temperature", 100.0, "celsius", "fahrenheit"),
        ("data", 1.0, "gigabyte", "megabyte"),
        ("area", 1.0, "square-meter", "square-mile"),
    ] {
        let result = converter.convert(category, value, from, to)?;
        println!("{} {} = {} {}", value, from, converter.format(result), to);
    }

    println!();
    let mut panel = ConversionPanel::new(&converter, "temperature")?;
    panel.set_units("fahrenheit", "kelvin")?;
    panel.set_from_value("98.6");
    println!("{} {} = {} {}", panel.from_value(), panel.from_unit(), panel.to_value(), panel.to_unit());
    panel.swap();
    println!("{} {} = {} {}", panel.from_value(), panel.from_unit(), panel.to_value(), panel.to_unit());

    Ok(())
}
