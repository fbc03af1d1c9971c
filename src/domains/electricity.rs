//! Electrical engineering formulas, grouped by circuit topic.

use crate::formula::{Category, Domain, FormulaSpec};
use crate::input::InputSpec;
use std::f64::consts::PI;

pub fn domain() -> Domain {
    Domain::new(
        "electricity",
        "Electricity",
        vec![
            ohms_law(),
            power(),
            networks(),
            ac_circuits(),
            energy_storage(),
        ],
    )
}

/// Equivalent of two impedances combined reciprocally (parallel resistors,
/// series capacitors).
fn reciprocal_pair(a: f64, b: f64) -> f64 {
    a * b / (a + b)
}

fn ohms_law() -> Category {
    Category::new(
        "ohms-law",
        "Ohm's Law & Conductors",
        vec![
            FormulaSpec {
                id: "ohms-law-voltage",
                name: "V = IR (Ohm's Law - Voltage)",
                formula: "V = IR",
                inputs: vec![
                    InputSpec::numeric("current", "Current", "I", "A"),
                    InputSpec::numeric("resistance", "Resistance", "R", "Ω"),
                ],
                compute: |i| Ok((i.number("current")? * i.number("resistance")?).into()),
                result_unit: "V",
                explanation: "Calculate voltage from current and resistance.",
            },
            FormulaSpec {
                id: "ohms-law-current",
                name: "I = V/R (Ohm's Law - Current)",
                formula: "I = V/R",
                inputs: vec![
                    InputSpec::numeric("voltage", "Voltage", "V", "V"),
                    InputSpec::numeric("resistance", "Resistance", "R", "Ω"),
                ],
                compute: |i| Ok((i.number("voltage")? / i.number("resistance")?).into()),
                result_unit: "A",
                explanation: "Calculate current from voltage and resistance.",
            },
            FormulaSpec {
                id: "ohms-law-resistance",
                name: "R = V/I (Ohm's Law - Resistance)",
                formula: "R = V/I",
                inputs: vec![
                    InputSpec::numeric("voltage", "Voltage", "V", "V"),
                    InputSpec::numeric("current", "Current", "I", "A"),
                ],
                compute: |i| Ok((i.number("voltage")? / i.number("current")?).into()),
                result_unit: "Ω",
                explanation: "Calculate resistance from voltage and current.",
            },
            FormulaSpec {
                id: "wire-resistance",
                name: "R = ρL/A (Wire Resistance)",
                formula: "R = ρL/A",
                inputs: vec![
                    InputSpec::numeric("resistivity", "Resistivity", "ρ", "Ω·m"),
                    InputSpec::numeric("length", "Length", "L", "m"),
                    InputSpec::numeric("area", "Cross-section Area", "A", "m²"),
                ],
                compute: |i| {
                    let rho_l = i.number("resistivity")? * i.number("length")?;
                    Ok((rho_l / i.number("area")?).into())
                },
                result_unit: "Ω",
                explanation: "Resistance of a wire.",
            },
            FormulaSpec {
                id: "current-density",
                name: "J = I/A (Current Density)",
                formula: "J = I/A",
                inputs: vec![
                    InputSpec::numeric("current", "Current", "I", "A"),
                    InputSpec::numeric("area", "Cross-section Area", "A", "m²"),
                ],
                compute: |i| Ok((i.number("current")? / i.number("area")?).into()),
                result_unit: "A/m²",
                explanation: "Current density in a conductor.",
            },
            FormulaSpec {
                id: "charge",
                name: "Q = It (Electric Charge)",
                formula: "Q = It",
                inputs: vec![
                    InputSpec::numeric("current", "Current", "I", "A"),
                    InputSpec::numeric("time", "Time", "t", "s"),
                ],
                compute: |i| Ok((i.number("current")? * i.number("time")?).into()),
                result_unit: "C",
                explanation: "Charge from current and time.",
            },
        ],
    )
}

fn power() -> Category {
    Category::new(
        "power",
        "Power & Energy",
        vec![
            FormulaSpec {
                id: "power-vi",
                name: "P = VI (Electric Power)",
                formula: "P = VI",
                inputs: vec![
                    InputSpec::numeric("voltage", "Voltage", "V", "V"),
                    InputSpec::numeric("current", "Current", "I", "A"),
                ],
                compute: |i| Ok((i.number("voltage")? * i.number("current")?).into()),
                result_unit: "W",
                explanation: "Power from voltage and current.",
            },
            FormulaSpec {
                id: "power-ir",
                name: "P = I²R (Power Loss)",
                formula: "P = I²R",
                inputs: vec![
                    InputSpec::numeric("current", "Current", "I", "A"),
                    InputSpec::numeric("resistance", "Resistance", "R", "Ω"),
                ],
                compute: |i| Ok((i.number("current")?.powi(2) * i.number("resistance")?).into()),
                result_unit: "W",
                explanation: "Power dissipated in a resistance.",
            },
            FormulaSpec {
                id: "power-vr",
                name: "P = V²/R (Power from Voltage)",
                formula: "P = V²/R",
                inputs: vec![
                    InputSpec::numeric("voltage", "Voltage", "V", "V"),
                    InputSpec::numeric("resistance", "Resistance", "R", "Ω"),
                ],
                compute: |i| Ok((i.number("voltage")?.powi(2) / i.number("resistance")?).into()),
                result_unit: "W",
                explanation: "Power from voltage and resistance.",
            },
            FormulaSpec {
                id: "energy",
                name: "E = Pt (Electrical Energy)",
                formula: "E = Pt",
                inputs: vec![
                    InputSpec::numeric("power", "Power", "P", "W"),
                    InputSpec::numeric("time", "Time", "t", "hours"),
                ],
                compute: |i| Ok((i.number("power")? * i.number("time")?).into()),
                result_unit: "Wh",
                explanation: "Energy consumption over time.",
            },
            FormulaSpec {
                id: "energy-kwh",
                name: "E = Pt (Energy in kWh)",
                formula: "E = Pt",
                inputs: vec![
                    InputSpec::numeric("power", "Power", "P", "kW"),
                    InputSpec::numeric("time", "Time", "t", "hours"),
                ],
                compute: |i| Ok((i.number("power")? * i.number("time")?).into()),
                result_unit: "kWh",
                explanation: "Energy consumption in kilowatt-hours.",
            },
            FormulaSpec {
                id: "efficiency",
                name: "η = (Pout/Pin) × 100% (Efficiency)",
                formula: "η = (P_out/P_in) × 100%",
                inputs: vec![
                    InputSpec::numeric("outputPower", "Output Power", "P_out", "W"),
                    InputSpec::numeric("inputPower", "Input Power", "P_in", "W"),
                ],
                compute: |i| {
                    Ok((i.number("outputPower")? / i.number("inputPower")? * 100.0).into())
                },
                result_unit: "%",
                explanation: "Efficiency of an electrical device.",
            },
            FormulaSpec {
                id: "three-phase-power",
                name: "P = √3 × VL × IL × PF (3-Phase Power)",
                formula: "P = √3 × V_L × I_L × PF",
                inputs: vec![
                    InputSpec::numeric("lineVoltage", "Line Voltage", "V_L", "V"),
                    InputSpec::numeric("lineCurrent", "Line Current", "I_L", "A"),
                    InputSpec::numeric("powerFactor", "Power Factor", "PF", ""),
                ],
                compute: |i| {
                    let vi = i.number("lineVoltage")? * i.number("lineCurrent")?;
                    Ok((3f64.sqrt() * vi * i.number("powerFactor")?).into())
                },
                result_unit: "W",
                explanation: "Real power in a balanced three-phase system.",
            },
            FormulaSpec {
                id: "electricity-cost",
                name: "Cost = Power × Time × Rate (Electricity Cost)",
                formula: "Cost = Power × Time × Rate",
                inputs: vec![
                    InputSpec::numeric("power", "Power", "P", "kW"),
                    InputSpec::numeric("time", "Time", "t", "hours"),
                    InputSpec::numeric("rate", "Rate", "r", "$/kWh"),
                ],
                compute: |i| {
                    Ok((i.number("power")? * i.number("time")? * i.number("rate")?).into())
                },
                result_unit: "$",
                explanation: "Cost of electricity consumption.",
            },
        ],
    )
}

fn networks() -> Category {
    Category::new(
        "networks",
        "Series, Parallel & Dividers",
        vec![
            FormulaSpec {
                id: "resistors-series",
                name: "R = R₁ + R₂ + R₃ (Series Resistors)",
                formula: "R_total = R₁ + R₂ + R₃",
                inputs: vec![
                    InputSpec::numeric("r1", "Resistor 1", "R₁", "Ω"),
                    InputSpec::numeric("r2", "Resistor 2", "R₂", "Ω"),
                    InputSpec::numeric("r3", "Resistor 3", "R₃", "Ω"),
                ],
                compute: |i| Ok((i.number("r1")? + i.number("r2")? + i.number("r3")?).into()),
                result_unit: "Ω",
                explanation: "Total resistance in series.",
            },
            FormulaSpec {
                id: "resistors-parallel-2",
                name: "1/R = 1/R₁ + 1/R₂ (Parallel - 2 Resistors)",
                formula: "1/R = 1/R₁ + 1/R₂",
                inputs: vec![
                    InputSpec::numeric("r1", "Resistor 1", "R₁", "Ω"),
                    InputSpec::numeric("r2", "Resistor 2", "R₂", "Ω"),
                ],
                compute: |i| Ok(reciprocal_pair(i.number("r1")?, i.number("r2")?).into()),
                result_unit: "Ω",
                explanation: "Total resistance of two resistors in parallel.",
            },
            FormulaSpec {
                id: "resistors-parallel-3",
                name: "1/R = 1/R₁ + 1/R₂ + 1/R₃ (Parallel - 3 Resistors)",
                formula: "1/R = 1/R₁ + 1/R₂ + 1/R₃",
                inputs: vec![
                    InputSpec::numeric("r1", "Resistor 1", "R₁", "Ω"),
                    InputSpec::numeric("r2", "Resistor 2", "R₂", "Ω"),
                    InputSpec::numeric("r3", "Resistor 3", "R₃", "Ω"),
                ],
                compute: |i| {
                    let conductance =
                        1.0 / i.number("r1")? + 1.0 / i.number("r2")? + 1.0 / i.number("r3")?;
                    Ok((1.0 / conductance).into())
                },
                result_unit: "Ω",
                explanation: "Total resistance of three resistors in parallel.",
            },
            FormulaSpec {
                id: "capacitors-series",
                name: "1/C = 1/C₁ + 1/C₂ (Series Capacitors)",
                formula: "1/C = 1/C₁ + 1/C₂",
                inputs: vec![
                    InputSpec::numeric("c1", "Capacitor 1", "C₁", "F"),
                    InputSpec::numeric("c2", "Capacitor 2", "C₂", "F"),
                ],
                compute: |i| Ok(reciprocal_pair(i.number("c1")?, i.number("c2")?).into()),
                result_unit: "F",
                explanation: "Total capacitance in series.",
            },
            FormulaSpec {
                id: "capacitors-parallel",
                name: "C = C₁ + C₂ + C₃ (Parallel Capacitors)",
                formula: "C_total = C₁ + C₂ + C₃",
                inputs: vec![
                    InputSpec::numeric("c1", "Capacitor 1", "C₁", "F"),
                    InputSpec::numeric("c2", "Capacitor 2", "C₂", "F"),
                    InputSpec::numeric("c3", "Capacitor 3", "C₃", "F"),
                ],
                compute: |i| Ok((i.number("c1")? + i.number("c2")? + i.number("c3")?).into()),
                result_unit: "F",
                explanation: "Total capacitance in parallel.",
            },
            FormulaSpec {
                id: "voltage-divider",
                name: "Vout = Vin × (R2/(R1+R2)) (Voltage Divider)",
                formula: "V_out = V_in × (R₂/(R₁+R₂))",
                inputs: vec![
                    InputSpec::numeric("inputVoltage", "Input Voltage", "V_in", "V"),
                    InputSpec::numeric("r1", "Resistor 1", "R₁", "Ω"),
                    InputSpec::numeric("r2", "Resistor 2", "R₂", "Ω"),
                ],
                compute: |i| {
                    let r2 = i.number("r2")?;
                    Ok((i.number("inputVoltage")? * (r2 / (i.number("r1")? + r2))).into())
                },
                result_unit: "V",
                explanation: "Output voltage of a voltage divider.",
            },
            FormulaSpec {
                id: "current-divider",
                name: "I1 = Itotal × (R2/(R1+R2)) (Current Divider)",
                formula: "I₁ = I_total × (R₂/(R₁+R₂))",
                inputs: vec![
                    InputSpec::numeric("totalCurrent", "Total Current", "I_total", "A"),
                    InputSpec::numeric("r1", "Resistor 1", "R₁", "Ω"),
                    InputSpec::numeric("r2", "Resistor 2", "R₂", "Ω"),
                ],
                compute: |i| {
                    let r2 = i.number("r2")?;
                    Ok((i.number("totalCurrent")? * (r2 / (i.number("r1")? + r2))).into())
                },
                result_unit: "A",
                explanation: "Current through R₁ in a two-branch parallel circuit.",
            },
        ],
    )
}

fn ac_circuits() -> Category {
    Category::new(
        "ac-circuits",
        "AC Circuits",
        vec![
            FormulaSpec {
                id: "capacitive-reactance",
                name: "Xc = 1/(2πfC) (Capacitive Reactance)",
                formula: "Xc = 1/(2πfC)",
                inputs: vec![
                    InputSpec::numeric("frequency", "Frequency", "f", "Hz"),
                    InputSpec::numeric("capacitance", "Capacitance", "C", "F"),
                ],
                compute: |i| {
                    let omega_c = 2.0 * PI * i.number("frequency")? * i.number("capacitance")?;
                    Ok((1.0 / omega_c).into())
                },
                result_unit: "Ω",
                explanation: "Reactance of a capacitor in an AC circuit.",
            },
            FormulaSpec {
                id: "inductive-reactance",
                name: "XL = 2πfL (Inductive Reactance)",
                formula: "XL = 2πfL",
                inputs: vec![
                    InputSpec::numeric("frequency", "Frequency", "f", "Hz"),
                    InputSpec::numeric("inductance", "Inductance", "L", "H"),
                ],
                compute: |i| {
                    Ok((2.0 * PI * i.number("frequency")? * i.number("inductance")?).into())
                },
                result_unit: "Ω",
                explanation: "Reactance of an inductor in an AC circuit.",
            },
            FormulaSpec {
                id: "impedance-rc",
                name: "Z = √(R² + Xc²) (RC Impedance)",
                formula: "Z = √(R² + Xc²)",
                inputs: vec![
                    InputSpec::numeric("resistance", "Resistance", "R", "Ω"),
                    InputSpec::numeric("reactance", "Capacitive Reactance", "Xc", "Ω"),
                ],
                compute: |i| Ok(i.number("resistance")?.hypot(i.number("reactance")?).into()),
                result_unit: "Ω",
                explanation: "Impedance of an RC circuit.",
            },
            FormulaSpec {
                id: "impedance-rl",
                name: "Z = √(R² + XL²) (RL Impedance)",
                formula: "Z = √(R² + XL²)",
                inputs: vec![
                    InputSpec::numeric("resistance", "Resistance", "R", "Ω"),
                    InputSpec::numeric("reactance", "Inductive Reactance", "XL", "Ω"),
                ],
                compute: |i| Ok(i.number("resistance")?.hypot(i.number("reactance")?).into()),
                result_unit: "Ω",
                explanation: "Impedance of an RL circuit.",
            },
            FormulaSpec {
                id: "power-factor",
                name: "PF = cos(φ) = R/Z (Power Factor)",
                formula: "PF = R/Z",
                inputs: vec![
                    InputSpec::numeric("resistance", "Resistance", "R", "Ω"),
                    InputSpec::numeric("impedance", "Impedance", "Z", "Ω"),
                ],
                compute: |i| Ok((i.number("resistance")? / i.number("impedance")?).into()),
                result_unit: "",
                explanation: "Power factor of an AC circuit.",
            },
            FormulaSpec {
                id: "resonance-frequency",
                name: "f = 1/(2π√(LC)) (Resonance Frequency)",
                formula: "f = 1/(2π√(LC))",
                inputs: vec![
                    InputSpec::numeric("inductance", "Inductance", "L", "H"),
                    InputSpec::numeric("capacitance", "Capacitance", "C", "F"),
                ],
                compute: |i| {
                    let lc = i.number("inductance")? * i.number("capacitance")?;
                    Ok((1.0 / (2.0 * PI * lc.sqrt())).into())
                },
                result_unit: "Hz",
                explanation: "Resonant frequency of an LC circuit.",
            },
            FormulaSpec {
                id: "transformer-ratio",
                name: "Vs/Vp = Ns/Np (Transformer)",
                formula: "V_s/V_p = N_s/N_p",
                inputs: vec![
                    InputSpec::numeric("primaryVoltage", "Primary Voltage", "V_p", "V"),
                    InputSpec::numeric("primaryTurns", "Primary Turns", "N_p", "turns"),
                    InputSpec::numeric("secondaryTurns", "Secondary Turns", "N_s", "turns"),
                ],
                compute: |i| {
                    let ratio = i.number("secondaryTurns")? / i.number("primaryTurns")?;
                    Ok((i.number("primaryVoltage")? * ratio).into())
                },
                result_unit: "V",
                explanation: "Secondary voltage of an ideal transformer.",
            },
        ],
    )
}

fn energy_storage() -> Category {
    Category::new(
        "energy-storage",
        "Stored Energy & Time Constants",
        vec![
            FormulaSpec {
                id: "capacitor-energy",
                name: "E = ½CV² (Capacitor Energy)",
                formula: "E = ½CV²",
                inputs: vec![
                    InputSpec::numeric("capacitance", "Capacitance", "C", "F"),
                    InputSpec::numeric("voltage", "Voltage", "V", "V"),
                ],
                compute: |i| {
                    Ok((0.5 * i.number("capacitance")? * i.number("voltage")?.powi(2)).into())
                },
                result_unit: "J",
                explanation: "Energy stored in a capacitor.",
            },
            FormulaSpec {
                id: "inductor-energy",
                name: "E = ½LI² (Inductor Energy)",
                formula: "E = ½LI²",
                inputs: vec![
                    InputSpec::numeric("inductance", "Inductance", "L", "H"),
                    InputSpec::numeric("current", "Current", "I", "A"),
                ],
                compute: |i| {
                    Ok((0.5 * i.number("inductance")? * i.number("current")?.powi(2)).into())
                },
                result_unit: "J",
                explanation: "Energy stored in an inductor.",
            },
            FormulaSpec {
                id: "time-constant-rc",
                name: "τ = RC (RC Time Constant)",
                formula: "τ = RC",
                inputs: vec![
                    InputSpec::numeric("resistance", "Resistance", "R", "Ω"),
                    InputSpec::numeric("capacitance", "Capacitance", "C", "F"),
                ],
                compute: |i| Ok((i.number("resistance")? * i.number("capacitance")?).into()),
                result_unit: "s",
                explanation: "Time constant of an RC circuit.",
            },
            FormulaSpec {
                id: "time-constant-rl",
                name: "τ = L/R (RL Time Constant)",
                formula: "τ = L/R",
                inputs: vec![
                    InputSpec::numeric("inductance", "Inductance", "L", "H"),
                    InputSpec::numeric("resistance", "Resistance", "R", "Ω"),
                ],
                compute: |i| Ok((i.number("inductance")? / i.number("resistance")?).into()),
                result_unit: "s",
                explanation: "Time constant of an RL circuit.",
            },
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reciprocal_pair() {
        assert_eq!(reciprocal_pair(100.0, 100.0), 50.0);
        assert!((reciprocal_pair(3.0, 6.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_category_sizes() {
        let domain = domain();
        assert_eq!(domain.formula_count(), 32);
        domain.validate().unwrap();
    }
}
