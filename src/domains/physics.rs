//! Physics formulas from kinematics through optics.

use crate::formula::{Category, Domain, FormulaSpec};
use crate::input::InputSpec;

/// Standard gravity in m/s².
const STANDARD_GRAVITY: f64 = 9.81;
/// Gravitational constant in N·m²/kg².
const GRAVITATIONAL_CONSTANT: f64 = 6.674e-11;
/// Universal gas constant in J/(mol·K).
const GAS_CONSTANT: f64 = 8.314;

pub fn domain() -> Domain {
    Domain::new(
        "physics",
        "Physics",
        vec![
            kinematics(),
            dynamics(),
            energy(),
            momentum(),
            gravity(),
            waves(),
            thermodynamics(),
            electricity(),
            magnetism(),
            optics(),
        ],
    )
}

fn kinematics() -> Category {
    Category::new(
        "kinematics",
        "Kinematics",
        vec![
            FormulaSpec {
                id: "velocity",
                name: "Velocity (v = d/t)",
                formula: "v = d / t",
                inputs: vec![
                    InputSpec::numeric("distance", "Distance", "d", "m"),
                    InputSpec::numeric("time", "Time", "t", "s"),
                ],
                compute: |i| Ok((i.number("distance")? / i.number("time")?).into()),
                result_unit: "m/s",
                explanation: "Rate of change of position: distance divided by time.",
            },
            FormulaSpec {
                id: "acceleration",
                name: "Acceleration (a = Δv/t)",
                formula: "a = (vf - vi) / t",
                inputs: vec![
                    InputSpec::numeric("finalVelocity", "Final Velocity", "vf", "m/s"),
                    InputSpec::numeric("initialVelocity", "Initial Velocity", "vi", "m/s"),
                    InputSpec::numeric("time", "Time", "t", "s"),
                ],
                compute: |i| {
                    let dv = i.number("finalVelocity")? - i.number("initialVelocity")?;
                    Ok((dv / i.number("time")?).into())
                },
                result_unit: "m/s²",
                explanation: "Rate of change of velocity over time.",
            },
            FormulaSpec {
                id: "displacement",
                name: "Displacement (s = ut + ½at²)",
                formula: "s = u×t + ½×a×t²",
                inputs: vec![
                    InputSpec::numeric("initialVelocity", "Initial Velocity", "u", "m/s"),
                    InputSpec::numeric("acceleration", "Acceleration", "a", "m/s²"),
                    InputSpec::numeric("time", "Time", "t", "s"),
                ],
                compute: |i| {
                    let t = i.number("time")?;
                    let s = i.number("initialVelocity")? * t + 0.5 * i.number("acceleration")? * t * t;
                    Ok(s.into())
                },
                result_unit: "m",
                explanation: "Displacement from initial velocity, constant acceleration and time.",
            },
            FormulaSpec {
                id: "finalVelocity",
                name: "Final Velocity (v² = u² + 2as)",
                formula: "v = √(u² + 2as)",
                inputs: vec![
                    InputSpec::numeric("initialVelocity", "Initial Velocity", "u", "m/s"),
                    InputSpec::numeric("acceleration", "Acceleration", "a", "m/s²"),
                    InputSpec::numeric("displacement", "Displacement", "s", "m"),
                ],
                compute: |i| {
                    let u = i.number("initialVelocity")?;
                    let v2 = u * u + 2.0 * i.number("acceleration")? * i.number("displacement")?;
                    Ok(v2.sqrt().into())
                },
                result_unit: "m/s",
                explanation: "Final velocity from initial velocity, acceleration and displacement, without time.",
            },
        ],
    )
}

fn dynamics() -> Category {
    Category::new(
        "dynamics",
        "Dynamics (Forces)",
        vec![
            FormulaSpec {
                id: "force",
                name: "Force (F = ma)",
                formula: "F = m × a",
                inputs: vec![
                    InputSpec::numeric("mass", "Mass", "m", "kg"),
                    InputSpec::numeric("acceleration", "Acceleration", "a", "m/s²"),
                ],
                compute: |i| Ok((i.number("mass")? * i.number("acceleration")?).into()),
                result_unit: "N",
                explanation: "Newton's second law: force equals mass times acceleration.",
            },
            FormulaSpec {
                id: "weight",
                name: "Weight (W = mg)",
                formula: "W = m × g",
                inputs: vec![InputSpec::numeric("mass", "Mass", "m", "kg")],
                compute: |i| Ok((i.number("mass")? * STANDARD_GRAVITY).into()),
                result_unit: "N",
                explanation: "Force of gravity on an object at the Earth's surface, g = 9.81 m/s².",
            },
            FormulaSpec {
                id: "friction",
                name: "Friction Force (f = μN)",
                formula: "f = μ × N",
                inputs: vec![
                    InputSpec::numeric("coefficient", "Coefficient of Friction", "μ", ""),
                    InputSpec::numeric("normalForce", "Normal Force", "N", "N"),
                ],
                compute: |i| Ok((i.number("coefficient")? * i.number("normalForce")?).into()),
                result_unit: "N",
                explanation: "Friction opposes motion and is proportional to the normal force.",
            },
            FormulaSpec {
                id: "pressure",
                name: "Pressure (P = F/A)",
                formula: "P = F / A",
                inputs: vec![
                    InputSpec::numeric("force", "Force", "F", "N"),
                    InputSpec::numeric("area", "Area", "A", "m²"),
                ],
                compute: |i| Ok((i.number("force")? / i.number("area")?).into()),
                result_unit: "Pa",
                explanation: "Force per unit area.",
            },
        ],
    )
}

fn energy() -> Category {
    Category::new(
        "energy",
        "Energy & Work",
        vec![
            FormulaSpec {
                id: "kineticEnergy",
                name: "Kinetic Energy (KE = ½mv²)",
                formula: "KE = ½ × m × v²",
                inputs: vec![
                    InputSpec::numeric("mass", "Mass", "m", "kg"),
                    InputSpec::numeric("velocity", "Velocity", "v", "m/s"),
                ],
                compute: |i| Ok((0.5 * i.number("mass")? * i.number("velocity")?.powi(2)).into()),
                result_unit: "J",
                explanation: "Energy of motion. Doubling speed quadruples kinetic energy.",
            },
            FormulaSpec {
                id: "potentialEnergy",
                name: "Gravitational PE (PE = mgh)",
                formula: "PE = m × g × h",
                inputs: vec![
                    InputSpec::numeric("mass", "Mass", "m", "kg"),
                    InputSpec::numeric("height", "Height", "h", "m"),
                ],
                compute: |i| Ok((i.number("mass")? * STANDARD_GRAVITY * i.number("height")?).into()),
                result_unit: "J",
                explanation: "Energy stored by an object's height in a gravitational field.",
            },
            FormulaSpec {
                id: "work",
                name: "Work (W = Fd cosθ)",
                formula: "W = F × d × cos(θ)",
                inputs: vec![
                    InputSpec::numeric("force", "Force", "F", "N"),
                    InputSpec::numeric("distance", "Distance", "d", "m"),
                    InputSpec::numeric("angle", "Angle", "θ", "°"),
                ],
                compute: |i| {
                    let along = i.number("angle")?.to_radians().cos();
                    Ok((i.number("force")? * i.number("distance")? * along).into())
                },
                result_unit: "J",
                explanation: "Work done by a force, counting only the component along the displacement.",
            },
            FormulaSpec {
                id: "power",
                name: "Power (P = W/t)",
                formula: "P = W / t",
                inputs: vec![
                    InputSpec::numeric("work", "Work", "W", "J"),
                    InputSpec::numeric("time", "Time", "t", "s"),
                ],
                compute: |i| Ok((i.number("work")? / i.number("time")?).into()),
                result_unit: "W",
                explanation: "Rate at which work is done. One watt is one joule per second.",
            },
        ],
    )
}

fn momentum() -> Category {
    Category::new(
        "momentum",
        "Momentum & Collisions",
        vec![
            FormulaSpec {
                id: "momentum",
                name: "Momentum (p = mv)",
                formula: "p = m × v",
                inputs: vec![
                    InputSpec::numeric("mass", "Mass", "m", "kg"),
                    InputSpec::numeric("velocity", "Velocity", "v", "m/s"),
                ],
                compute: |i| Ok((i.number("mass")? * i.number("velocity")?).into()),
                result_unit: "kg·m/s",
                explanation: "Mass in motion. Conserved in collisions.",
            },
            FormulaSpec {
                id: "impulse",
                name: "Impulse (J = FΔt)",
                formula: "J = F × Δt",
                inputs: vec![
                    InputSpec::numeric("force", "Force", "F", "N"),
                    InputSpec::numeric("time", "Time Interval", "Δt", "s"),
                ],
                compute: |i| Ok((i.number("force")? * i.number("time")?).into()),
                result_unit: "N·s",
                explanation: "Impulse equals the change in momentum.",
            },
        ],
    )
}

fn gravity() -> Category {
    Category::new(
        "gravity",
        "Gravity & Orbits",
        vec![
            FormulaSpec {
                id: "gravitationalForce",
                name: "Gravitational Force (F = Gm₁m₂/r²)",
                formula: "F = G × m₁ × m₂ / r²",
                inputs: vec![
                    InputSpec::numeric("mass1", "Mass 1", "m₁", "kg"),
                    InputSpec::numeric("mass2", "Mass 2", "m₂", "kg"),
                    InputSpec::numeric("distance", "Distance", "r", "m"),
                ],
                compute: |i| {
                    let masses = GRAVITATIONAL_CONSTANT * i.number("mass1")? * i.number("mass2")?;
                    Ok((masses / i.number("distance")?.powi(2)).into())
                },
                result_unit: "N",
                explanation: "Newton's law of universal gravitation.",
            },
            FormulaSpec {
                id: "orbitalVelocity",
                name: "Orbital Velocity (v = √(GM/r))",
                formula: "v = √(G × M / r)",
                inputs: vec![
                    InputSpec::numeric("centralMass", "Central Mass", "M", "kg"),
                    InputSpec::numeric("radius", "Orbital Radius", "r", "m"),
                ],
                compute: |i| {
                    let gm = GRAVITATIONAL_CONSTANT * i.number("centralMass")?;
                    Ok((gm / i.number("radius")?).sqrt().into())
                },
                result_unit: "m/s",
                explanation: "Speed needed to hold a circular orbit around a massive body.",
            },
        ],
    )
}

fn waves() -> Category {
    Category::new(
        "waves",
        "Waves & Sound",
        vec![
            FormulaSpec {
                id: "waveSpeed",
                name: "Wave Speed (v = fλ)",
                formula: "v = f × λ",
                inputs: vec![
                    InputSpec::numeric("frequency", "Frequency", "f", "Hz"),
                    InputSpec::numeric("wavelength", "Wavelength", "λ", "m"),
                ],
                compute: |i| Ok((i.number("frequency")? * i.number("wavelength")?).into()),
                result_unit: "m/s",
                explanation: "Frequency times wavelength, for any kind of wave.",
            },
            FormulaSpec {
                id: "frequency",
                name: "Frequency (f = 1/T)",
                formula: "f = 1 / T",
                inputs: vec![InputSpec::numeric("period", "Period", "T", "s")],
                compute: |i| Ok((1.0 / i.number("period")?).into()),
                result_unit: "Hz",
                explanation: "Oscillations per second, the inverse of the period.",
            },
        ],
    )
}

fn thermodynamics() -> Category {
    Category::new(
        "thermodynamics",
        "Thermodynamics",
        vec![
            FormulaSpec {
                id: "heatTransfer",
                name: "Heat Transfer (Q = mcΔT)",
                formula: "Q = m × c × ΔT",
                inputs: vec![
                    InputSpec::numeric("mass", "Mass", "m", "kg"),
                    InputSpec::numeric("specificHeat", "Specific Heat", "c", "J/(kg·K)"),
                    InputSpec::numeric("tempChange", "Temperature Change", "ΔT", "K"),
                ],
                compute: |i| {
                    Ok((i.number("mass")? * i.number("specificHeat")? * i.number("tempChange")?).into())
                },
                result_unit: "J",
                explanation: "Heat needed to change the temperature of a substance.",
            },
            FormulaSpec {
                id: "idealGas",
                name: "Ideal Gas Law (PV = nRT)",
                formula: "P = (n × R × T) / V",
                inputs: vec![
                    InputSpec::numeric("moles", "Amount (moles)", "n", "mol"),
                    InputSpec::numeric("temperature", "Temperature", "T", "K"),
                    InputSpec::numeric("volume", "Volume", "V", "m³"),
                ],
                compute: |i| {
                    let nrt = i.number("moles")? * GAS_CONSTANT * i.number("temperature")?;
                    Ok((nrt / i.number("volume")?).into())
                },
                result_unit: "Pa",
                explanation: "Pressure of an ideal gas, with R = 8.314 J/(mol·K).",
            },
        ],
    )
}

fn electricity() -> Category {
    Category::new(
        "electricity",
        "Electricity",
        vec![
            FormulaSpec {
                id: "ohmsLaw",
                name: "Ohm's Law (V = IR)",
                formula: "V = I × R",
                inputs: vec![
                    InputSpec::numeric("current", "Current", "I", "A"),
                    InputSpec::numeric("resistance", "Resistance", "R", "Ω"),
                ],
                compute: |i| Ok((i.number("current")? * i.number("resistance")?).into()),
                result_unit: "V",
                explanation: "Voltage equals current times resistance.",
            },
            FormulaSpec {
                id: "electricPower",
                name: "Electric Power (P = VI)",
                formula: "P = V × I",
                inputs: vec![
                    InputSpec::numeric("voltage", "Voltage", "V", "V"),
                    InputSpec::numeric("current", "Current", "I", "A"),
                ],
                compute: |i| Ok((i.number("voltage")? * i.number("current")?).into()),
                result_unit: "W",
                explanation: "Rate of energy transfer in a circuit.",
            },
            FormulaSpec {
                id: "electricField",
                name: "Electric Field (E = F/q)",
                formula: "E = F / q",
                inputs: vec![
                    InputSpec::numeric("force", "Force", "F", "N"),
                    InputSpec::numeric("charge", "Charge", "q", "C"),
                ],
                compute: |i| Ok((i.number("force")? / i.number("charge")?).into()),
                result_unit: "N/C",
                explanation: "Force per unit charge.",
            },
        ],
    )
}

fn magnetism() -> Category {
    Category::new(
        "magnetism",
        "Magnetism",
        vec![FormulaSpec {
            id: "magneticForce",
            name: "Magnetic Force (F = qvB)",
            formula: "F = q × v × B × sin(θ)",
            inputs: vec![
                InputSpec::numeric("charge", "Charge", "q", "C"),
                InputSpec::numeric("velocity", "Velocity", "v", "m/s"),
                InputSpec::numeric("magneticField", "Magnetic Field", "B", "T"),
                InputSpec::numeric("angle", "Angle", "θ", "°"),
            ],
            compute: |i| {
                let qvb = i.number("charge")? * i.number("velocity")? * i.number("magneticField")?;
                Ok((qvb * i.number("angle")?.to_radians().sin()).into())
            },
            result_unit: "N",
            explanation: "Lorentz force on a moving charge. Largest when motion is perpendicular to the field.",
        }],
    )
}

fn optics() -> Category {
    Category::new(
        "optics",
        "Optics",
        vec![
            FormulaSpec {
                id: "lensEquation",
                name: "Thin Lens Equation (1/f = 1/u + 1/v)",
                formula: "1/f = 1/u + 1/v → v = (u×f)/(u-f)",
                inputs: vec![
                    InputSpec::numeric("objectDistance", "Object Distance", "u", "m"),
                    InputSpec::numeric("focalLength", "Focal Length", "f", "m"),
                ],
                compute: |i| {
                    let u = i.number("objectDistance")?;
                    let f = i.number("focalLength")?;
                    Ok((u * f / (u - f)).into())
                },
                result_unit: "m",
                explanation: "Image distance from object distance and focal length. Negative means a virtual image.",
            },
            FormulaSpec {
                id: "magnification",
                name: "Magnification (M = v/u)",
                formula: "M = v / u",
                inputs: vec![
                    InputSpec::numeric("imageDistance", "Image Distance", "v", "m"),
                    InputSpec::numeric("objectDistance", "Object Distance", "u", "m"),
                ],
                compute: |i| Ok((i.number("imageDistance")? / i.number("objectDistance")?).into()),
                result_unit: "",
                explanation: "Ratio of image size to object size. Negative means inverted.",
            },
            FormulaSpec {
                id: "snellsLaw",
                name: "Snell's Law (n₁sinθ₁ = n₂sinθ₂)",
                formula: "θ₂ = arcsin((n₁/n₂) × sin(θ₁))",
                inputs: vec![
                    InputSpec::numeric("n1", "Refractive Index 1", "n₁", ""),
                    InputSpec::numeric("angle1", "Incident Angle", "θ₁", "°"),
                    InputSpec::numeric("n2", "Refractive Index 2", "n₂", ""),
                ],
                compute: |i| {
                    let ratio = i.number("n1")? / i.number("n2")?;
                    let refracted = (ratio * i.number("angle1")?.to_radians().sin()).asin();
                    Ok(refracted.to_degrees().into())
                },
                result_unit: "°",
                explanation: "How light bends between media with different refractive indices.",
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
    fn test_kinetic_energy() {
        let ke = eval(energy(), "kineticEnergy", &[("mass", 2.0), ("velocity", 3.0)]);
        assert_eq!(ke, 9.0);
    }

    #[test]
    fn test_work_at_right_angle_is_zero() {
        let w = eval(
            energy(),
            "work",
            &[("force", 10.0), ("distance", 5.0), ("angle", 90.0)],
        );
        assert!(w.abs() < 1e-9);
    }

    #[test]
    fn test_total_internal_reflection_is_nan() {
        let angle = eval(
            optics(),
            "snellsLaw",
            &[("n1", 1.5), ("angle1", 80.0), ("n2", 1.0)],
        );
        assert!(angle.is_nan());
    }

    #[test]
    fn test_lens_at_focal_point_diverges() {
        let v = eval(
            optics(),
            "lensEquation",
            &[("objectDistance", 0.5), ("focalLength", 0.5)],
        );
        assert!(v.is_infinite());
    }
}
