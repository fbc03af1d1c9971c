//! Computer science formulas: number bases, storage, complexity,
//! networking, cryptography, bitwise operations, graphics and performance.
//!
//! Number-system inputs are text: the digits only mean something once the
//! formula knows the radix. Bitwise operations work on 32-bit signed
//! integers, truncating their operands the way calculator users expect
//! from `&`, `|` and shifts.

use crate::error::{CalcError, Result};
use crate::formula::{Category, Domain, FormulaSpec};
use crate::input::InputSpec;

const KIB: f64 = 1024.0;
const SECONDS_PER_YEAR: f64 = 86_400.0 * 365.0;

pub fn domain() -> Domain {
    Domain::new(
        "computer-science",
        "Computer Science",
        vec![
            number_systems(),
            data_storage(),
            algorithms(),
            networking(),
            cryptography(),
            bitwise(),
            graphics(),
            performance(),
        ],
    )
}

/// Parse an integer written in `radix`, with an optional sign.
///
/// Surrounding whitespace is ignored. Any digit outside the radix fails.
pub fn parse_radix(text: &str, radix: u32) -> Result<i64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CalcError::compute("empty number"));
    }
    i64::from_str_radix(trimmed, radix)
        .map_err(|err| CalcError::compute(format!("'{}' is not a base-{} integer: {}", trimmed, radix, err)))
}

/// Render an integer in `radix` using upper-case digits.
pub fn format_radix(value: i64, radix: u32) -> String {
    let mut magnitude = value.unsigned_abs();
    if magnitude == 0 {
        return "0".to_string();
    }
    let radix_wide = u64::from(radix);
    let mut digits = Vec::new();
    while magnitude > 0 {
        let digit = (magnitude % radix_wide) as u32;
        digits.push(
            char::from_digit(digit, radix)
                .unwrap_or('?')
                .to_ascii_uppercase(),
        );
        magnitude /= radix_wide;
    }
    if value < 0 {
        digits.push('-');
    }
    digits.iter().rev().collect()
}

/// Wrap a number to a 32-bit signed integer, truncating any fraction.
pub fn to_int32(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let wrapped = value.trunc().rem_euclid(4_294_967_296.0);
    wrapped as u32 as i32
}

fn radix_input(value: f64) -> Result<u32> {
    if value.fract() != 0.0 || !(2.0..=36.0).contains(&value) {
        return Err(CalcError::compute(format!("base {} is outside 2-36", value)));
    }
    Ok(value as u32)
}

/// Dotted-decimal subnet mask for a CIDR prefix length.
pub fn subnet_mask(prefix: f64) -> Result<String> {
    if prefix.fract() != 0.0 || !(0.0..=32.0).contains(&prefix) {
        return Err(CalcError::compute(format!("prefix /{} is outside 0-32", prefix)));
    }
    let bits = prefix as u32;
    let mask: u32 = if bits == 0 { 0 } else { u32::MAX << (32 - bits) };
    let [a, b, c, d] = mask.to_be_bytes();
    Ok(format!("{}.{}.{}.{}", a, b, c, d))
}

fn number_systems() -> Category {
    Category::new(
        "number-systems",
        "Number System Conversions",
        vec![
            FormulaSpec {
                id: "decimalToBinary",
                name: "Decimal to Binary",
                formula: "Divide by 2, record remainders",
                inputs: vec![InputSpec::text("decimal", "Decimal Number", "Dec", "")],
                compute: |i| Ok(format_radix(parse_radix(i.text("decimal")?, 10)?, 2).into()),
                result_unit: "Binary",
                explanation: "Converts base 10 to base 2 by repeatedly dividing by 2.",
            },
            FormulaSpec {
                id: "binaryToDecimal",
                name: "Binary to Decimal",
                formula: "Sum of (digit × 2^position)",
                inputs: vec![InputSpec::text("binary", "Binary Number", "Bin", "")],
                compute: |i| Ok(parse_radix(i.text("binary")?, 2)?.into()),
                result_unit: "Decimal",
                explanation: "Converts base 2 to base 10. Each digit is a power of 2.",
            },
            FormulaSpec {
                id: "decimalToHex",
                name: "Decimal to Hexadecimal",
                formula: "Divide by 16, use 0-9,A-F",
                inputs: vec![InputSpec::text("decimal", "Decimal Number", "Dec", "")],
                compute: |i| Ok(format_radix(parse_radix(i.text("decimal")?, 10)?, 16).into()),
                result_unit: "Hexadecimal",
                explanation: "Converts base 10 to base 16, using A-F for 10-15.",
            },
            FormulaSpec {
                id: "hexToDecimal",
                name: "Hexadecimal to Decimal",
                formula: "Sum of (digit × 16^position)",
                inputs: vec![InputSpec::text("hex", "Hex Number (0-9, A-F)", "Hex", "")],
                compute: |i| Ok(parse_radix(i.text("hex")?, 16)?.into()),
                result_unit: "Decimal",
                explanation: "Converts base 16 to base 10. A=10 through F=15.",
            },
            FormulaSpec {
                id: "decimalToOctal",
                name: "Decimal to Octal",
                formula: "Divide by 8, record remainders",
                inputs: vec![InputSpec::text("decimal", "Decimal Number", "Dec", "")],
                compute: |i| Ok(format_radix(parse_radix(i.text("decimal")?, 10)?, 8).into()),
                result_unit: "Octal",
                explanation: "Converts base 10 to base 8, digits 0-7.",
            },
            FormulaSpec {
                id: "binaryToHex",
                name: "Binary to Hexadecimal",
                formula: "Group 4 bits = 1 hex digit",
                inputs: vec![InputSpec::text("binary", "Binary Number", "Bin", "")],
                compute: |i| Ok(format_radix(parse_radix(i.text("binary")?, 2)?, 16).into()),
                result_unit: "Hexadecimal",
                explanation: "Each group of four bits, from the right, is one hex digit.",
            },
            FormulaSpec {
                id: "baseConversion",
                name: "Any Base to Any Base",
                formula: "Parse in base b₁, write in base b₂",
                inputs: vec![
                    InputSpec::text("number", "Number", "N", ""),
                    InputSpec::numeric("fromBase", "From Base (2-36)", "b₁", ""),
                    InputSpec::numeric("toBase", "To Base (2-36)", "b₂", ""),
                ],
                compute: |i| {
                    let from = radix_input(i.number("fromBase")?)?;
                    let to = radix_input(i.number("toBase")?)?;
                    Ok(format_radix(parse_radix(i.text("number")?, from)?, to).into())
                },
                result_unit: "",
                explanation: "Converts an integer between any two bases from 2 to 36.",
            },
        ],
    )
}

fn data_storage() -> Category {
    Category::new(
        "data-storage",
        "Data Storage & Memory",
        vec![
            FormulaSpec {
                id: "bitsToBytes",
                name: "Bits to Bytes",
                formula: "Bytes = Bits / 8",
                inputs: vec![InputSpec::numeric("bits", "Bits", "b", "bits")],
                compute: |i| Ok((i.number("bits")? / 8.0).into()),
                result_unit: "Bytes",
                explanation: "One byte groups 8 bits.",
            },
            FormulaSpec {
                id: "bytesToKB",
                name: "Bytes to Kilobytes",
                formula: "KB = Bytes / 1024",
                inputs: vec![InputSpec::numeric("bytes", "Bytes", "B", "bytes")],
                compute: |i| Ok((i.number("bytes")? / KIB).into()),
                result_unit: "KB",
                explanation: "1 KB = 1024 bytes (2^10).",
            },
            FormulaSpec {
                id: "kbToMB",
                name: "Kilobytes to Megabytes",
                formula: "MB = KB / 1024",
                inputs: vec![InputSpec::numeric("kb", "Kilobytes", "KB", "KB")],
                compute: |i| Ok((i.number("kb")? / KIB).into()),
                result_unit: "MB",
                explanation: "1 MB = 1024 KB.",
            },
            FormulaSpec {
                id: "mbToGB",
                name: "Megabytes to Gigabytes",
                formula: "GB = MB / 1024",
                inputs: vec![InputSpec::numeric("mb", "Megabytes", "MB", "MB")],
                compute: |i| Ok((i.number("mb")? / KIB).into()),
                result_unit: "GB",
                explanation: "1 GB = 1024 MB.",
            },
            FormulaSpec {
                id: "downloadTime",
                name: "Download Time Calculator",
                formula: "Time = FileSize / Speed",
                inputs: vec![
                    InputSpec::numeric("fileSize", "File Size", "Size", "MB"),
                    InputSpec::numeric("speed", "Speed", "Mbps", "Mbps"),
                ],
                compute: |i| Ok((i.number("fileSize")? * 8.0 / i.number("speed")?).into()),
                result_unit: "seconds",
                explanation: "Converts megabytes to megabits (×8), then divides by the link speed.",
            },
            FormulaSpec {
                id: "addressableMemory",
                name: "Addressable Memory (n-bit)",
                formula: "2^n bytes",
                inputs: vec![InputSpec::numeric("bits", "Address Bits", "n", "bits")],
                compute: |i| Ok((2f64.powf(i.number("bits")?) / KIB / KIB).into()),
                result_unit: "MB",
                explanation: "n address bits reach 2^n locations. Shown in MB.",
            },
        ],
    )
}

fn algorithms() -> Category {
    Category::new(
        "algorithms",
        "Algorithm Complexity",
        vec![
            FormulaSpec {
                id: "bigOConstant",
                name: "O(1) - Constant Time",
                formula: "Operations = 1 (regardless of n)",
                inputs: vec![InputSpec::numeric("n", "Input Size", "n", "items")],
                compute: |i| {
                    i.number("n")?;
                    Ok(1.0.into())
                },
                result_unit: "operations",
                explanation: "Operations do not grow with input size, as with array access.",
            },
            FormulaSpec {
                id: "bigOLinear",
                name: "O(n) - Linear Time",
                formula: "Operations = n",
                inputs: vec![InputSpec::numeric("n", "Input Size", "n", "items")],
                compute: |i| Ok(i.number("n")?.into()),
                result_unit: "operations",
                explanation: "Operations grow directly with input, as with linear search.",
            },
            FormulaSpec {
                id: "bigOQuadratic",
                name: "O(n²) - Quadratic Time",
                formula: "Operations = n²",
                inputs: vec![InputSpec::numeric("n", "Input Size", "n", "items")],
                compute: |i| Ok(i.number("n")?.powi(2).into()),
                result_unit: "operations",
                explanation: "Operations grow with the square of input, as with nested loops.",
            },
            FormulaSpec {
                id: "bigOLogarithmic",
                name: "O(log n) - Logarithmic Time",
                formula: "Operations = log₂(n)",
                inputs: vec![InputSpec::numeric("n", "Input Size", "n", "items")],
                compute: |i| Ok(i.number("n")?.log2().into()),
                result_unit: "operations",
                explanation: "Halves the problem each step, as with binary search.",
            },
            FormulaSpec {
                id: "bigONLogN",
                name: "O(n log n) - Linearithmic",
                formula: "Operations = n × log₂(n)",
                inputs: vec![InputSpec::numeric("n", "Input Size", "n", "items")],
                compute: |i| {
                    let n = i.number("n")?;
                    Ok((n * n.log2()).into())
                },
                result_unit: "operations",
                explanation: "Efficient comparison sorting, such as merge sort.",
            },
            FormulaSpec {
                id: "sortingComparison",
                name: "Sorting Comparisons (worst case)",
                formula: "Comparisons ≈ n²/2",
                inputs: vec![InputSpec::numeric("items", "Items to Sort", "n", "items")],
                compute: |i| Ok((i.number("items")?.powi(2) / 2.0).into()),
                result_unit: "comparisons",
                explanation: "Worst-case comparisons of simple sorts like bubble sort.",
            },
        ],
    )
}

fn networking() -> Category {
    Category::new(
        "networking",
        "Networking & IP",
        vec![
            FormulaSpec {
                id: "subnetHosts",
                name: "Usable Hosts in Subnet",
                formula: "Hosts = 2^(32-prefix) - 2",
                inputs: vec![InputSpec::numeric("prefix", "Subnet Prefix", "CIDR", "/bits")],
                compute: |i| Ok((2f64.powf(32.0 - i.number("prefix")?) - 2.0).into()),
                result_unit: "hosts",
                explanation: "Addresses in the subnet minus the network and broadcast addresses. /24 gives 254.",
            },
            FormulaSpec {
                id: "subnetMask",
                name: "Subnet Mask from CIDR",
                formula: "Convert prefix to dotted decimal",
                inputs: vec![InputSpec::numeric("cidr", "CIDR Prefix", "/n", "")],
                compute: |i| Ok(subnet_mask(i.number("cidr")?)?.into()),
                result_unit: "",
                explanation: "Converts a prefix such as /24 to dotted decimal, 255.255.255.0.",
            },
            FormulaSpec {
                id: "bandwidth",
                name: "Bandwidth (bits per second)",
                formula: "Bandwidth = DataSize / Time",
                inputs: vec![
                    InputSpec::numeric("dataSize", "Data Size", "Data", "MB"),
                    InputSpec::numeric("time", "Time", "Time", "s"),
                ],
                compute: |i| Ok((i.number("dataSize")? * 8.0 / i.number("time")?).into()),
                result_unit: "Mbps",
                explanation: "Megabytes to megabits (×8), divided by seconds.",
            },
            FormulaSpec {
                id: "latency",
                name: "Network Latency (RTT)",
                formula: "RTT = 2 × (Distance / Speed)",
                inputs: vec![
                    InputSpec::numeric("distance", "Distance", "D", "km"),
                    InputSpec::numeric("speed", "Signal Speed", "v", "km/s"),
                ],
                compute: |i| Ok((2.0 * i.number("distance")? / i.number("speed")? * 1000.0).into()),
                result_unit: "ms",
                explanation: "Round-trip time. Light in fiber travels about 200,000 km/s.",
            },
        ],
    )
}

fn cryptography() -> Category {
    Category::new(
        "cryptography",
        "Cryptography & Security",
        vec![
            FormulaSpec {
                id: "passwordEntropy",
                name: "Password Entropy (bits)",
                formula: "Entropy = Length × log₂(CharSetSize)",
                inputs: vec![
                    InputSpec::numeric("length", "Password Length", "L", "chars"),
                    InputSpec::numeric("charset", "Character Set Size", "N", "chars"),
                ],
                compute: |i| Ok((i.number("length")? * i.number("charset")?.log2()).into()),
                result_unit: "bits",
                explanation: "Password strength. 26 lowercase, 62 alphanumeric, 94 with symbols. 80+ bits is strong.",
            },
            FormulaSpec {
                id: "bruteForceTime",
                name: "Brute Force Attack Time",
                formula: "Time = (CharSet^Length) / (Attempts/sec)",
                inputs: vec![
                    InputSpec::numeric("charset", "Character Set", "N", "chars"),
                    InputSpec::numeric("length", "Password Length", "L", "chars"),
                    InputSpec::numeric("speed", "Attempts/Second", "Rate", "/s"),
                ],
                compute: |i| {
                    let space = i.number("charset")?.powf(i.number("length")?);
                    Ok((space / i.number("speed")? / SECONDS_PER_YEAR).into())
                },
                result_unit: "years",
                explanation: "Time to try every combination at a given attempt rate.",
            },
            FormulaSpec {
                id: "hashCollisions",
                name: "Hash Collision Probability",
                formula: "Birthday paradox: ~√(2×HashSpace)",
                inputs: vec![InputSpec::numeric("bits", "Hash Bits", "n", "bits")],
                compute: |i| Ok((2.0 * 2f64.powf(i.number("bits")?)).sqrt().into()),
                result_unit: "hashes",
                explanation: "Hashes needed for roughly even odds of a collision.",
            },
        ],
    )
}

fn bitwise() -> Category {
    Category::new(
        "bitwise",
        "Bitwise Operations",
        vec![
            FormulaSpec {
                id: "bitwiseAND",
                name: "Bitwise AND",
                formula: "Result = A & B",
                inputs: vec![
                    InputSpec::numeric("a", "Number A", "A", ""),
                    InputSpec::numeric("b", "Number B", "B", ""),
                ],
                compute: |i| {
                    let r = to_int32(i.number("a")?) & to_int32(i.number("b")?);
                    Ok(i64::from(r).into())
                },
                result_unit: "decimal",
                explanation: "Both bits must be 1. 1010 & 1100 = 1000.",
            },
            FormulaSpec {
                id: "bitwiseOR",
                name: "Bitwise OR",
                formula: "Result = A | B",
                inputs: vec![
                    InputSpec::numeric("a", "Number A", "A", ""),
                    InputSpec::numeric("b", "Number B", "B", ""),
                ],
                compute: |i| {
                    let r = to_int32(i.number("a")?) | to_int32(i.number("b")?);
                    Ok(i64::from(r).into())
                },
                result_unit: "decimal",
                explanation: "Either bit may be 1. 1010 | 1100 = 1110.",
            },
            FormulaSpec {
                id: "bitwiseXOR",
                name: "Bitwise XOR",
                formula: "Result = A ^ B",
                inputs: vec![
                    InputSpec::numeric("a", "Number A", "A", ""),
                    InputSpec::numeric("b", "Number B", "B", ""),
                ],
                compute: |i| {
                    let r = to_int32(i.number("a")?) ^ to_int32(i.number("b")?);
                    Ok(i64::from(r).into())
                },
                result_unit: "decimal",
                explanation: "Bits must differ. 1010 ^ 1100 = 0110.",
            },
            FormulaSpec {
                id: "leftShift",
                name: "Left Shift (×2^n)",
                formula: "Result = Value << n",
                inputs: vec![
                    InputSpec::numeric("value", "Value", "V", ""),
                    InputSpec::numeric("positions", "Positions", "n", "bits"),
                ],
                compute: |i| {
                    let shift = to_int32(i.number("positions")?) as u32 & 31;
                    let r = to_int32(i.number("value")?).wrapping_shl(shift);
                    Ok(i64::from(r).into())
                },
                result_unit: "decimal",
                explanation: "Each shift left multiplies by 2. 5 << 2 = 20.",
            },
            FormulaSpec {
                id: "rightShift",
                name: "Right Shift (÷2^n)",
                formula: "Result = Value >> n",
                inputs: vec![
                    InputSpec::numeric("value", "Value", "V", ""),
                    InputSpec::numeric("positions", "Positions", "n", "bits"),
                ],
                compute: |i| {
                    let shift = to_int32(i.number("positions")?) as u32 & 31;
                    let r = to_int32(i.number("value")?) >> shift;
                    Ok(i64::from(r).into())
                },
                result_unit: "decimal",
                explanation: "Each shift right halves, rounding toward negative infinity. 20 >> 2 = 5.",
            },
        ],
    )
}

fn graphics() -> Category {
    Category::new(
        "graphics",
        "Graphics & Display",
        vec![
            FormulaSpec {
                id: "pixelCount",
                name: "Total Pixels",
                formula: "Pixels = Width × Height",
                inputs: vec![
                    InputSpec::numeric("width", "Width", "W", "px"),
                    InputSpec::numeric("height", "Height", "H", "px"),
                ],
                compute: |i| Ok((i.number("width")? * i.number("height")?).into()),
                result_unit: "pixels",
                explanation: "1920×1080 is 2,073,600 pixels.",
            },
            FormulaSpec {
                id: "aspectRatio",
                name: "Aspect Ratio",
                formula: "Ratio = Width / Height",
                inputs: vec![
                    InputSpec::numeric("width", "Width", "W", "px"),
                    InputSpec::numeric("height", "Height", "H", "px"),
                ],
                compute: |i| Ok((i.number("width")? / i.number("height")?).into()),
                result_unit: ":1",
                explanation: "1.778 is 16:9, 1.6 is 16:10.",
            },
            FormulaSpec {
                id: "imageSize",
                name: "Image File Size (uncompressed)",
                formula: "Size = Width × Height × ColorDepth",
                inputs: vec![
                    InputSpec::numeric("width", "Width", "W", "px"),
                    InputSpec::numeric("height", "Height", "H", "px"),
                    InputSpec::numeric("depth", "Bits per Pixel", "BPP", "bits"),
                ],
                compute: |i| {
                    let bits = i.number("width")? * i.number("height")? * i.number("depth")?;
                    Ok((bits / 8.0 / KIB / KIB).into())
                },
                result_unit: "MB",
                explanation: "24-bit is RGB, 32-bit adds an alpha channel.",
            },
            FormulaSpec {
                id: "frameRate",
                name: "Frame Data Rate",
                formula: "Rate = Pixels × FPS × ColorDepth",
                inputs: vec![
                    InputSpec::numeric("width", "Width", "W", "px"),
                    InputSpec::numeric("height", "Height", "H", "px"),
                    InputSpec::numeric("fps", "Frames/Second", "FPS", "fps"),
                    InputSpec::numeric("depth", "Bits/Pixel", "BPP", "bits"),
                ],
                compute: |i| {
                    let pixels = i.number("width")? * i.number("height")?;
                    let bits = pixels * i.number("fps")? * i.number("depth")?;
                    Ok((bits / KIB / KIB / 8.0).into())
                },
                result_unit: "MB/s",
                explanation: "Uncompressed video data rate.",
            },
        ],
    )
}

fn performance() -> Category {
    Category::new(
        "performance",
        "Performance Metrics",
        vec![
            FormulaSpec {
                id: "cpuUtilization",
                name: "CPU Utilization",
                formula: "Utilization = (BusyTime / TotalTime) × 100",
                inputs: vec![
                    InputSpec::numeric("busyTime", "Busy Time", "T_busy", "s"),
                    InputSpec::numeric("totalTime", "Total Time", "T_total", "s"),
                ],
                compute: |i| Ok((i.number("busyTime")? / i.number("totalTime")? * 100.0).into()),
                result_unit: "%",
                explanation: "Share of time the CPU is busy.",
            },
            FormulaSpec {
                id: "throughput",
                name: "System Throughput",
                formula: "Throughput = Tasks / Time",
                inputs: vec![
                    InputSpec::numeric("tasks", "Tasks Completed", "N", "tasks"),
                    InputSpec::numeric("time", "Time Period", "T", "s"),
                ],
                compute: |i| Ok((i.number("tasks")? / i.number("time")?).into()),
                result_unit: "tasks/s",
                explanation: "Tasks completed per second.",
            },
            FormulaSpec {
                id: "cacheHitRatio",
                name: "Cache Hit Ratio",
                formula: "Hit Ratio = Hits / (Hits + Misses)",
                inputs: vec![
                    InputSpec::numeric("hits", "Cache Hits", "H", "requests"),
                    InputSpec::numeric("misses", "Cache Misses", "M", "requests"),
                ],
                compute: |i| {
                    let hits = i.number("hits")?;
                    Ok((hits / (hits + i.number("misses")?) * 100.0).into())
                },
                result_unit: "%",
                explanation: "Share of requests served from cache.",
            },
            FormulaSpec {
                id: "speedup",
                name: "Parallel Speedup",
                formula: "Speedup = T_serial / T_parallel",
                inputs: vec![
                    InputSpec::numeric("serial", "Serial Time", "T_s", "s"),
                    InputSpec::numeric("parallel", "Parallel Time", "T_p", "s"),
                ],
                compute: |i| Ok((i.number("serial")? / i.number("parallel")?).into()),
                result_unit: "x faster",
                explanation: "How many times faster the parallel run is.",
            },
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_radix() {
        assert_eq!(parse_radix("1010", 2).unwrap(), 10);
        assert_eq!(parse_radix("ff", 16).unwrap(), 255);
        assert_eq!(parse_radix(" -42 ", 10).unwrap(), -42);
        assert!(parse_radix("102", 2).is_err());
        assert!(parse_radix("", 10).is_err());
    }

    #[test]
    fn test_format_radix() {
        assert_eq!(format_radix(10, 2), "1010");
        assert_eq!(format_radix(255, 16), "FF");
        assert_eq!(format_radix(0, 8), "0");
        assert_eq!(format_radix(-255, 16), "-FF");
        assert_eq!(format_radix(35, 36), "Z");
    }

    #[test]
    fn test_to_int32_wraps() {
        assert_eq!(to_int32(5.9), 5);
        assert_eq!(to_int32(-5.9), -5);
        assert_eq!(to_int32(4_294_967_296.0), 0);
        assert_eq!(to_int32(2_147_483_648.0), i32::MIN);
        assert_eq!(to_int32(f64::NAN), 0);
    }

    #[test]
    fn test_subnet_mask() {
        assert_eq!(subnet_mask(24.0).unwrap(), "255.255.255.0");
        assert_eq!(subnet_mask(20.0).unwrap(), "255.255.240.0");
        assert_eq!(subnet_mask(32.0).unwrap(), "255.255.255.255");
        assert_eq!(subnet_mask(0.0).unwrap(), "0.0.0.0");
        assert!(subnet_mask(33.0).is_err());
    }

    #[test]
    fn test_radix_input_bounds() {
        assert!(radix_input(1.0).is_err());
        assert!(radix_input(37.0).is_err());
        assert!(radix_input(2.5).is_err());
        assert_eq!(radix_input(36.0).unwrap(), 36);
    }
}
