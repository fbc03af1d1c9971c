//! Chemistry formulas: solutions, stoichiometry, gases, acids and bases,
//! thermochemistry, electrochemistry, kinetics and nuclear chemistry.

use crate::formula::{Category, Domain, FormulaSpec};
use crate::input::InputSpec;

/// Ideal gas constant in L·atm/(mol·K).
const GAS_CONSTANT_L_ATM: f64 = 0.0821;
/// Ideal gas constant in J/(mol·K).
const GAS_CONSTANT_J: f64 = 8.314;
/// Faraday constant in C/mol.
const FARADAY: f64 = 96485.0;
/// Nernst slope at 25 °C, in volts.
const NERNST_SLOPE_25C: f64 = 0.0592;
/// Speed of light in m/s.
const SPEED_OF_LIGHT: f64 = 299_792_458.0;

pub fn domain() -> Domain {
    Domain::new(
        "chemistry",
        "Chemistry",
        vec![
            solutions(),
            stoichiometry(),
            gas_laws(),
            acids_bases(),
            thermochemistry(),
            electrochemistry(),
            kinetics(),
            nuclear(),
        ],
    )
}

fn solutions() -> Category {
    Category::new(
        "solutions",
        "Solutions & Concentration",
        vec![
            FormulaSpec {
                id: "molarity",
                name: "Molarity",
                formula: "M = n / V",
                inputs: vec![
                    InputSpec::numeric("moles", "Moles of Solute", "n", "mol"),
                    InputSpec::numeric("volume", "Volume of Solution", "V", "L"),
                ],
                compute: |i| Ok((i.number("moles")? / i.number("volume")?).into()),
                result_unit: "M (mol/L)",
                explanation: "Molarity is the concentration of a solution expressed as moles of solute per liter of solution.",
            },
            FormulaSpec {
                id: "molality",
                name: "Molality",
                formula: "m = n / mass",
                inputs: vec![
                    InputSpec::numeric("moles", "Moles of Solute", "n", "mol"),
                    InputSpec::numeric("mass", "Mass of Solvent", "kg", "kg"),
                ],
                compute: |i| Ok((i.number("moles")? / i.number("mass")?).into()),
                result_unit: "molal (mol/kg)",
                explanation: "Molality is concentration expressed as moles of solute per kilogram of solvent. Unlike molarity, it does not change with temperature.",
            },
            FormulaSpec {
                id: "dilution",
                name: "Dilution (M₁V₁ = M₂V₂)",
                formula: "V₂ = (M₁ × V₁) / M₂",
                inputs: vec![
                    InputSpec::numeric("concentration1", "Initial Molarity", "M₁", "M"),
                    InputSpec::numeric("volume1", "Initial Volume", "V₁", "L"),
                    InputSpec::numeric("concentration2", "Final Molarity", "M₂", "M"),
                ],
                compute: |i| {
                    let moles = i.number("concentration1")? * i.number("volume1")?;
                    Ok((moles / i.number("concentration2")?).into())
                },
                result_unit: "L",
                explanation: "Relates concentration and volume before and after dilution. The number of moles stays constant.",
            },
            FormulaSpec {
                id: "percentComposition",
                name: "Mass Percent",
                formula: "% = (mass_solute / mass_solution) × 100",
                inputs: vec![
                    InputSpec::numeric("soluteMass", "Mass of Solute", "m_solute", "g"),
                    InputSpec::numeric("solutionMass", "Mass of Solution", "m_total", "g"),
                ],
                compute: |i| Ok((i.number("soluteMass")? / i.number("solutionMass")? * 100.0).into()),
                result_unit: "%",
                explanation: "Mass of solute divided by total mass of solution, multiplied by 100.",
            },
        ],
    )
}

fn stoichiometry() -> Category {
    Category::new(
        "stoichiometry",
        "Stoichiometry",
        vec![
            FormulaSpec {
                id: "molesFromMass",
                name: "Moles from Mass",
                formula: "n = m / M",
                inputs: vec![
                    InputSpec::numeric("mass", "Mass", "m", "g"),
                    InputSpec::numeric("molarMass", "Molar Mass", "M", "g/mol"),
                ],
                compute: |i| Ok((i.number("mass")? / i.number("molarMass")?).into()),
                result_unit: "mol",
                explanation: "Converts mass to moles using the molar mass.",
            },
            FormulaSpec {
                id: "massFromMoles",
                name: "Mass from Moles",
                formula: "m = n × M",
                inputs: vec![
                    InputSpec::numeric("moles", "Moles", "n", "mol"),
                    InputSpec::numeric("molarMass", "Molar Mass", "M", "g/mol"),
                ],
                compute: |i| Ok((i.number("moles")? * i.number("molarMass")?).into()),
                result_unit: "g",
                explanation: "Converts moles to mass by multiplying by the molar mass of the substance.",
            },
            FormulaSpec {
                id: "limitingReactant",
                name: "Theoretical Yield",
                formula: "Theoretical Yield = moles × Molar Mass",
                inputs: vec![
                    InputSpec::numeric("moles", "Moles of Product", "n", "mol"),
                    InputSpec::numeric("molarMass", "Molar Mass of Product", "M", "g/mol"),
                ],
                compute: |i| Ok((i.number("moles")? * i.number("molarMass")?).into()),
                result_unit: "g",
                explanation: "Maximum amount of product that can form, assuming complete reaction.",
            },
            FormulaSpec {
                id: "percentYield",
                name: "Percent Yield",
                formula: "% Yield = (Actual / Theoretical) × 100",
                inputs: vec![
                    InputSpec::numeric("actual", "Actual Yield", "Actual", "g"),
                    InputSpec::numeric("theoretical", "Theoretical Yield", "Theoretical", "g"),
                ],
                compute: |i| Ok((i.number("actual")? / i.number("theoretical")? * 100.0).into()),
                result_unit: "%",
                explanation: "Compares the product actually obtained to the theoretical maximum.",
            },
        ],
    )
}

fn gas_laws() -> Category {
    Category::new(
        "gas-laws",
        "Gas Laws",
        vec![
            FormulaSpec {
                id: "idealGas",
                name: "Ideal Gas Law (PV = nRT)",
                formula: "P = (n × R × T) / V",
                inputs: vec![
                    InputSpec::numeric("moles", "Moles", "n", "mol"),
                    InputSpec::numeric("temperature", "Temperature", "T", "K"),
                    InputSpec::numeric("volume", "Volume", "V", "L"),
                ],
                compute: |i| {
                    let nrt = i.number("moles")? * GAS_CONSTANT_L_ATM * i.number("temperature")?;
                    Ok((nrt / i.number("volume")?).into())
                },
                result_unit: "atm",
                explanation: "Relates pressure, volume, temperature and moles of an ideal gas. R = 0.0821 L·atm/(mol·K).",
            },
            FormulaSpec {
                id: "boyles",
                name: "Boyle's Law (P₁V₁ = P₂V₂)",
                formula: "P₂ = (P₁ × V₁) / V₂",
                inputs: vec![
                    InputSpec::numeric("pressure1", "Initial Pressure", "P₁", "atm"),
                    InputSpec::numeric("volume1", "Initial Volume", "V₁", "L"),
                    InputSpec::numeric("volume2", "Final Volume", "V₂", "L"),
                ],
                compute: |i| {
                    let pv = i.number("pressure1")? * i.number("volume1")?;
                    Ok((pv / i.number("volume2")?).into())
                },
                result_unit: "atm",
                explanation: "Pressure and volume are inversely proportional at constant temperature.",
            },
            FormulaSpec {
                id: "charles",
                name: "Charles' Law (V₁/T₁ = V₂/T₂)",
                formula: "V₂ = (V₁ × T₂) / T₁",
                inputs: vec![
                    InputSpec::numeric("volume1", "Initial Volume", "V₁", "L"),
                    InputSpec::numeric("temp1", "Initial Temperature", "T₁", "K"),
                    InputSpec::numeric("temp2", "Final Temperature", "T₂", "K"),
                ],
                compute: |i| {
                    let vt = i.number("volume1")? * i.number("temp2")?;
                    Ok((vt / i.number("temp1")?).into())
                },
                result_unit: "L",
                explanation: "Volume and temperature are directly proportional at constant pressure.",
            },
            FormulaSpec {
                id: "combined",
                name: "Combined Gas Law",
                formula: "P₂ = (P₁ × V₁ × T₂) / (T₁ × V₂)",
                inputs: vec![
                    InputSpec::numeric("pressure1", "Initial Pressure", "P₁", "atm"),
                    InputSpec::numeric("volume1", "Initial Volume", "V₁", "L"),
                    InputSpec::numeric("temp1", "Initial Temperature", "T₁", "K"),
                    InputSpec::numeric("volume2", "Final Volume", "V₂", "L"),
                    InputSpec::numeric("temp2", "Final Temperature", "T₂", "K"),
                ],
                compute: |i| {
                    let top = i.number("pressure1")? * i.number("volume1")? * i.number("temp2")?;
                    let bottom = i.number("temp1")? * i.number("volume2")?;
                    Ok((top / bottom).into())
                },
                result_unit: "atm",
                explanation: "Combines Boyle's, Charles' and Gay-Lussac's laws for changing conditions.",
            },
        ],
    )
}

fn acids_bases() -> Category {
    Category::new(
        "acids-bases",
        "Acids & Bases",
        vec![
            FormulaSpec {
                id: "pH",
                name: "pH from [H⁺]",
                formula: "pH = -log₁₀[H⁺]",
                inputs: vec![InputSpec::numeric("concentration", "H⁺ Concentration", "[H⁺]", "M")],
                compute: |i| Ok((-i.number("concentration")?.log10()).into()),
                result_unit: "",
                explanation: "Negative logarithm of hydrogen ion concentration. Below 7 is acidic, above 7 is basic.",
            },
            FormulaSpec {
                id: "pOH",
                name: "pOH from [OH⁻]",
                formula: "pOH = -log₁₀[OH⁻]",
                inputs: vec![InputSpec::numeric("concentration", "OH⁻ Concentration", "[OH⁻]", "M")],
                compute: |i| Ok((-i.number("concentration")?.log10()).into()),
                result_unit: "",
                explanation: "Negative logarithm of hydroxide ion concentration. pH + pOH = 14 at 25 °C.",
            },
            FormulaSpec {
                id: "hydrogenConc",
                name: "[H⁺] from pH",
                formula: "[H⁺] = 10^(-pH)",
                inputs: vec![InputSpec::numeric("pH", "pH", "pH", "")],
                compute: |i| Ok(10f64.powf(-i.number("pH")?).into()),
                result_unit: "M",
                explanation: "Each pH unit represents a 10-fold change in [H⁺].",
            },
            FormulaSpec {
                id: "bufferHH",
                name: "Henderson-Hasselbalch",
                formula: "pH = pKa + log₁₀([A⁻]/[HA])",
                inputs: vec![
                    InputSpec::numeric("pKa", "pKa", "pKa", ""),
                    InputSpec::numeric("base", "Base Concentration", "[A⁻]", "M"),
                    InputSpec::numeric("acid", "Acid Concentration", "[HA]", "M"),
                ],
                compute: |i| {
                    let ratio = i.number("base")? / i.number("acid")?;
                    Ok((i.number("pKa")? + ratio.log10()).into())
                },
                result_unit: "",
                explanation: "pH of a buffer from pKa and the ratio of conjugate base to weak acid.",
            },
        ],
    )
}

fn thermochemistry() -> Category {
    Category::new(
        "thermochemistry",
        "Thermochemistry",
        vec![
            FormulaSpec {
                id: "heatCapacity",
                name: "Heat (q = mcΔT)",
                formula: "q = m × c × ΔT",
                inputs: vec![
                    InputSpec::numeric("mass", "Mass", "m", "g"),
                    InputSpec::numeric("specificHeat", "Specific Heat", "c", "J/(g·°C)"),
                    InputSpec::numeric("tempChange", "Temperature Change", "ΔT", "°C"),
                ],
                compute: |i| {
                    Ok((i.number("mass")? * i.number("specificHeat")? * i.number("tempChange")?).into())
                },
                result_unit: "J",
                explanation: "Heat absorbed or released when temperature changes.",
            },
            FormulaSpec {
                id: "enthalpyReaction",
                name: "Enthalpy Change (ΔH = q/n)",
                formula: "ΔH = q / n",
                inputs: vec![
                    InputSpec::numeric("heat", "Heat", "q", "J"),
                    InputSpec::numeric("moles", "Moles", "n", "mol"),
                ],
                compute: |i| Ok((i.number("heat")? / i.number("moles")?).into()),
                result_unit: "J/mol",
                explanation: "Heat per mole of substance. Negative values indicate exothermic reactions.",
            },
            FormulaSpec {
                id: "heatFusion",
                name: "Heat of Fusion (q = nΔHfus)",
                formula: "q = n × ΔHfus",
                inputs: vec![
                    InputSpec::numeric("moles", "Moles", "n", "mol"),
                    InputSpec::numeric("heatFusion", "Heat of Fusion", "ΔHfus", "kJ/mol"),
                ],
                compute: |i| Ok((i.number("moles")? * i.number("heatFusion")?).into()),
                result_unit: "kJ",
                explanation: "Heat required to melt a substance at its melting point.",
            },
            FormulaSpec {
                id: "gibbsFreeEnergy",
                name: "Gibbs Free Energy (ΔG = ΔH - TΔS)",
                formula: "ΔG = ΔH - T × ΔS",
                inputs: vec![
                    InputSpec::numeric("enthalpy", "Enthalpy Change", "ΔH", "kJ"),
                    InputSpec::numeric("temperature", "Temperature", "T", "K"),
                    InputSpec::numeric("entropy", "Entropy Change", "ΔS", "kJ/K"),
                ],
                compute: |i| {
                    let t_ds = i.number("temperature")? * i.number("entropy")?;
                    Ok((i.number("enthalpy")? - t_ds).into())
                },
                result_unit: "kJ",
                explanation: "ΔG < 0 is spontaneous, ΔG = 0 is equilibrium, ΔG > 0 is non-spontaneous.",
            },
        ],
    )
}

fn electrochemistry() -> Category {
    Category::new(
        "electrochemistry",
        "Electrochemistry",
        vec![
            FormulaSpec {
                id: "nernst",
                name: "Nernst Equation",
                formula: "E = E° - (0.0592/n) × log₁₀Q  (at 25°C)",
                inputs: vec![
                    InputSpec::numeric("standardPotential", "Standard Potential", "E°", "V"),
                    InputSpec::numeric("electrons", "Electrons Transferred", "n", ""),
                    InputSpec::numeric("reactionQuotient", "Reaction Quotient", "Q", ""),
                ],
                compute: |i| {
                    let slope = NERNST_SLOPE_25C / i.number("electrons")?;
                    let shift = slope * i.number("reactionQuotient")?.log10();
                    Ok((i.number("standardPotential")? - shift).into())
                },
                result_unit: "V",
                explanation: "Cell potential under non-standard conditions. At equilibrium, E = 0 and Q = K.",
            },
            FormulaSpec {
                id: "faradays",
                name: "Faraday's Law",
                formula: "m = (Q × M) / (n × F)",
                inputs: vec![
                    InputSpec::numeric("charge", "Charge", "Q", "C"),
                    InputSpec::numeric("molarMass", "Molar Mass", "M", "g/mol"),
                    InputSpec::numeric("electrons", "Electrons Transferred", "n", ""),
                ],
                compute: |i| {
                    let top = i.number("charge")? * i.number("molarMass")?;
                    Ok((top / (i.number("electrons")? * FARADAY)).into())
                },
                result_unit: "g",
                explanation: "Mass deposited or dissolved for the charge passed. F = 96,485 C/mol.",
            },
            FormulaSpec {
                id: "cellPotential",
                name: "Cell Potential",
                formula: "E°cell = E°cathode - E°anode",
                inputs: vec![
                    InputSpec::numeric("cathode", "Cathode Potential", "E°cathode", "V"),
                    InputSpec::numeric("anode", "Anode Potential", "E°anode", "V"),
                ],
                compute: |i| Ok((i.number("cathode")? - i.number("anode")?).into()),
                result_unit: "V",
                explanation: "Difference between reduction potentials. Positive values indicate a spontaneous reaction.",
            },
        ],
    )
}

fn kinetics() -> Category {
    Category::new(
        "kinetics",
        "Chemical Kinetics",
        vec![
            FormulaSpec {
                id: "rateConstant",
                name: "Rate Constant (first order)",
                formula: "k = ln(2) / t₁/₂",
                inputs: vec![InputSpec::numeric("halfLife", "Half-life", "t₁/₂", "s")],
                compute: |i| Ok((std::f64::consts::LN_2 / i.number("halfLife")?).into()),
                result_unit: "s⁻¹",
                explanation: "For first-order reactions the rate constant is inversely proportional to half-life.",
            },
            FormulaSpec {
                id: "halfLife",
                name: "Half-life (first order)",
                formula: "t₁/₂ = ln(2) / k",
                inputs: vec![InputSpec::numeric("rateConstant", "Rate Constant", "k", "s⁻¹")],
                compute: |i| Ok((std::f64::consts::LN_2 / i.number("rateConstant")?).into()),
                result_unit: "s",
                explanation: "Time for concentration to fall to half its initial value.",
            },
            FormulaSpec {
                id: "arrhenius",
                name: "Arrhenius Equation",
                formula: "k = A × e^(-Ea/(R×T))",
                inputs: vec![
                    InputSpec::numeric("preExponential", "Pre-exponential Factor", "A", "s⁻¹"),
                    InputSpec::numeric("activationEnergy", "Activation Energy", "Ea", "J/mol"),
                    InputSpec::numeric("temperature", "Temperature", "T", "K"),
                ],
                compute: |i| {
                    let exponent =
                        -i.number("activationEnergy")? / (GAS_CONSTANT_J * i.number("temperature")?);
                    Ok((i.number("preExponential")? * exponent.exp()).into())
                },
                result_unit: "s⁻¹",
                explanation: "Rate constant as a function of temperature and activation energy.",
            },
        ],
    )
}

fn nuclear() -> Category {
    Category::new(
        "nuclear",
        "Nuclear Chemistry",
        vec![
            FormulaSpec {
                id: "radioactiveDecay",
                name: "Radioactive Decay",
                formula: "N = N₀ × e^(-λt)",
                inputs: vec![
                    InputSpec::numeric("initial", "Initial Amount", "N₀", "atoms"),
                    InputSpec::numeric("decayConstant", "Decay Constant", "λ", "s⁻¹"),
                    InputSpec::numeric("time", "Time", "t", "s"),
                ],
                compute: |i| {
                    let decay = (-i.number("decayConstant")? * i.number("time")?).exp();
                    Ok((i.number("initial")? * decay).into())
                },
                result_unit: "atoms",
                explanation: "Number of radioactive nuclei remaining after a given time.",
            },
            FormulaSpec {
                id: "nuclearHalfLife",
                name: "Nuclear Half-life",
                formula: "t₁/₂ = ln(2) / λ",
                inputs: vec![InputSpec::numeric("decayConstant", "Decay Constant", "λ", "s⁻¹")],
                compute: |i| Ok((std::f64::consts::LN_2 / i.number("decayConstant")?).into()),
                result_unit: "s",
                explanation: "Time for half the radioactive nuclei to decay.",
            },
            FormulaSpec {
                id: "massDefect",
                name: "Mass-Energy (E = mc²)",
                formula: "E = Δm × c²",
                inputs: vec![InputSpec::numeric("massDefect", "Mass Defect", "Δm", "kg")],
                compute: |i| Ok((i.number("massDefect")? * SPEED_OF_LIGHT.powi(2)).into()),
                result_unit: "J",
                explanation: "Converts a mass defect to binding energy. c = 2.998×10⁸ m/s.",
            },
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EvalContext;
    use crate::input::{InputValue, Inputs};

    fn eval(category: Category, id: &str, values: &[(&'static str, f64)]) -> f64 {
        let spec = category.formula(id).unwrap();
        let mut inputs = Inputs::new(EvalContext::current());
        for (key, value) in values {
            inputs.insert(*key, InputValue::Number(*value));
        }
        (spec.compute)(&inputs).unwrap().as_number().unwrap()
    }

    #[test]
    fn test_molarity() {
        let m = eval(solutions(), "molarity", &[("moles", 2.0), ("volume", 0.5)]);
        assert_eq!(m, 4.0);
    }

    #[test]
    fn test_ideal_gas() {
        let p = eval(
            gas_laws(),
            "idealGas",
            &[("moles", 1.0), ("temperature", 273.0), ("volume", 22.4)],
        );
        assert!((p - 1.0006).abs() < 1e-3);
    }

    #[test]
    fn test_ph_neutral() {
        let ph = eval(acids_bases(), "pH", &[("concentration", 1e-7)]);
        assert!((ph - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_half_life_round_trip() {
        let k = eval(kinetics(), "rateConstant", &[("halfLife", 10.0)]);
        let t = eval(kinetics(), "halfLife", &[("rateConstant", k)]);
        assert!((t - 10.0).abs() < 1e-12);
    }
}
