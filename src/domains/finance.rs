//! Finance formulas: interest, loans, investments, savings, retirement,
//! business, mortgages and currency.
//!
//! Rates are entered as annual percentages. Loan and savings formulas
//! compound monthly.

use crate::formula::{Category, Domain, FormulaSpec};
use crate::input::InputSpec;

/// Share of gross monthly income available for a mortgage payment.
const HOUSING_INCOME_SHARE: f64 = 0.28;
/// Sustainable annual withdrawal share of a retirement portfolio.
const SAFE_WITHDRAWAL_RATE: f64 = 0.04;

/// Monthly rate and number of payments for an annual percentage and term.
fn monthly_terms(annual_percent: f64, years: f64) -> (f64, f64) {
    (annual_percent / 100.0 / 12.0, years * 12.0)
}

/// Fixed payment that amortizes `principal` over `periods` at `rate` per period.
pub(crate) fn amortized_payment(principal: f64, rate: f64, periods: f64) -> f64 {
    let growth = (1.0 + rate).powf(periods);
    principal * (rate * growth) / (growth - 1.0)
}

/// Principal that a fixed `payment` amortizes over `periods` at `rate`.
fn annuity_present_value(payment: f64, rate: f64, periods: f64) -> f64 {
    let growth = (1.0 + rate).powf(periods);
    payment * (growth - 1.0) / (rate * growth)
}

/// Balance reached by depositing `payment` every period at `rate`.
fn annuity_future_value(payment: f64, rate: f64, periods: f64) -> f64 {
    payment * ((1.0 + rate).powf(periods) - 1.0) / rate
}

pub fn domain() -> Domain {
    Domain::new(
        "finance",
        "Finance",
        vec![
            interest(),
            loans(),
            investments(),
            savings(),
            retirement(),
            business(),
            mortgage(),
            currency(),
        ],
    )
}

fn interest() -> Category {
    Category::new(
        "interest",
        "Interest Calculations",
        vec![
            FormulaSpec {
                id: "simpleInterest",
                name: "Simple Interest (I = P×r×t)",
                formula: "I = P × r × t",
                inputs: vec![
                    InputSpec::numeric("principal", "Principal Amount", "P", "$"),
                    InputSpec::numeric("rate", "Annual Rate", "r", "%"),
                    InputSpec::numeric("time", "Time Period", "t", "years"),
                ],
                compute: |i| {
                    let rate = i.number("rate")? / 100.0;
                    Ok((i.number("principal")? * rate * i.number("time")?).into())
                },
                result_unit: "$",
                explanation: "Interest on the principal only. Used for short-term loans and bonds.",
            },
            FormulaSpec {
                id: "compoundInterest",
                name: "Compound Interest (A = P(1+r/n)^(nt))",
                formula: "A = P × (1 + r/n)^(n×t)",
                inputs: vec![
                    InputSpec::numeric("principal", "Principal Amount", "P", "$"),
                    InputSpec::numeric("rate", "Annual Rate", "r", "%"),
                    InputSpec::numeric("time", "Time Period", "t", "years"),
                    InputSpec::numeric("frequency", "Compounds/Year", "n", ""),
                ],
                compute: |i| {
                    let n = i.number("frequency")?;
                    let per_period = i.number("rate")? / 100.0 / n;
                    let growth = (1.0 + per_period).powf(n * i.number("time")?);
                    Ok((i.number("principal")? * growth).into())
                },
                result_unit: "$",
                explanation: "Interest earned on interest. More frequent compounding gives higher returns.",
            },
            FormulaSpec {
                id: "continuousCompound",
                name: "Continuous Compound (A = Pe^(rt))",
                formula: "A = P × e^(r×t)",
                inputs: vec![
                    InputSpec::numeric("principal", "Principal Amount", "P", "$"),
                    InputSpec::numeric("rate", "Annual Rate", "r", "%"),
                    InputSpec::numeric("time", "Time Period", "t", "years"),
                ],
                compute: |i| {
                    let exponent = i.number("rate")? / 100.0 * i.number("time")?;
                    Ok((i.number("principal")? * exponent.exp()).into())
                },
                result_unit: "$",
                explanation: "The limit of compounding frequency. Highest possible return for a given rate.",
            },
            FormulaSpec {
                id: "effectiveRate",
                name: "Effective Annual Rate (EAR)",
                formula: "EAR = (1 + r/n)^n - 1",
                inputs: vec![
                    InputSpec::numeric("nominal", "Nominal Rate", "r", "%"),
                    InputSpec::numeric("frequency", "Compounds/Year", "n", ""),
                ],
                compute: |i| {
                    let n = i.number("frequency")?;
                    let growth = (1.0 + i.number("nominal")? / 100.0 / n).powf(n);
                    Ok(((growth - 1.0) * 100.0).into())
                },
                result_unit: "%",
                explanation: "True annual return accounting for compounding.",
            },
        ],
    )
}

fn loans() -> Category {
    Category::new(
        "loans",
        "Loan Calculations",
        vec![
            FormulaSpec {
                id: "loanPayment",
                name: "Monthly Loan Payment (PMT)",
                formula: "PMT = P × [r(1+r)^n] / [(1+r)^n - 1]",
                inputs: vec![
                    InputSpec::numeric("principal", "Loan Amount", "P", "$"),
                    InputSpec::numeric("rate", "Annual Rate", "r", "%"),
                    InputSpec::numeric("years", "Loan Term", "n", "years"),
                ],
                compute: |i| {
                    let (rate, periods) = monthly_terms(i.number("rate")?, i.number("years")?);
                    Ok(amortized_payment(i.number("principal")?, rate, periods).into())
                },
                result_unit: "$/month",
                explanation: "Fixed monthly payment of a fully amortizing loan, principal and interest.",
            },
            FormulaSpec {
                id: "totalLoanCost",
                name: "Total Loan Cost",
                formula: "Total = Monthly Payment × Months",
                inputs: vec![
                    InputSpec::numeric("principal", "Loan Amount", "P", "$"),
                    InputSpec::numeric("rate", "Annual Rate", "r", "%"),
                    InputSpec::numeric("years", "Loan Term", "n", "years"),
                ],
                compute: |i| {
                    let (rate, periods) = monthly_terms(i.number("rate")?, i.number("years")?);
                    let payment = amortized_payment(i.number("principal")?, rate, periods);
                    Ok((payment * periods).into())
                },
                result_unit: "$",
                explanation: "Total paid over the life of the loan. The excess over principal is interest.",
            },
            FormulaSpec {
                id: "loanAffordability",
                name: "Affordable Loan Amount",
                formula: "P = PMT × [(1+r)^n - 1] / [r(1+r)^n]",
                inputs: vec![
                    InputSpec::numeric("payment", "Monthly Payment", "PMT", "$"),
                    InputSpec::numeric("rate", "Annual Rate", "r", "%"),
                    InputSpec::numeric("years", "Loan Term", "n", "years"),
                ],
                compute: |i| {
                    let (rate, periods) = monthly_terms(i.number("rate")?, i.number("years")?);
                    Ok(annuity_present_value(i.number("payment")?, rate, periods).into())
                },
                result_unit: "$",
                explanation: "Largest loan a given monthly payment can repay.",
            },
        ],
    )
}

fn investments() -> Category {
    Category::new(
        "investments",
        "Investment Analysis",
        vec![
            FormulaSpec {
                id: "roi",
                name: "Return on Investment (ROI)",
                formula: "ROI = [(FV - IV) / IV] × 100",
                inputs: vec![
                    InputSpec::numeric("initial", "Initial Investment", "IV", "$"),
                    InputSpec::numeric("final", "Final Value", "FV", "$"),
                ],
                compute: |i| {
                    let initial = i.number("initial")?;
                    Ok(((i.number("final")? - initial) / initial * 100.0).into())
                },
                result_unit: "%",
                explanation: "Profitability of an investment. 100% means the money doubled.",
            },
            FormulaSpec {
                id: "cagr",
                name: "Compound Annual Growth Rate",
                formula: "CAGR = [(FV/IV)^(1/t) - 1] × 100",
                inputs: vec![
                    InputSpec::numeric("initial", "Initial Value", "IV", "$"),
                    InputSpec::numeric("final", "Final Value", "FV", "$"),
                    InputSpec::numeric("years", "Years", "t", "years"),
                ],
                compute: |i| {
                    let ratio = i.number("final")? / i.number("initial")?;
                    Ok(((ratio.powf(1.0 / i.number("years")?) - 1.0) * 100.0).into())
                },
                result_unit: "%",
                explanation: "Smoothed annual growth rate over a period.",
            },
            FormulaSpec {
                id: "futureValue",
                name: "Future Value of Investment",
                formula: "FV = PV × (1 + r)^t",
                inputs: vec![
                    InputSpec::numeric("present", "Present Value", "PV", "$"),
                    InputSpec::numeric("rate", "Annual Return", "r", "%"),
                    InputSpec::numeric("years", "Years", "t", "years"),
                ],
                compute: |i| {
                    let growth = (1.0 + i.number("rate")? / 100.0).powf(i.number("years")?);
                    Ok((i.number("present")? * growth).into())
                },
                result_unit: "$",
                explanation: "Value of money in the future under compound growth.",
            },
            FormulaSpec {
                id: "presentValue",
                name: "Present Value (Discount)",
                formula: "PV = FV / (1 + r)^t",
                inputs: vec![
                    InputSpec::numeric("future", "Future Value", "FV", "$"),
                    InputSpec::numeric("rate", "Discount Rate", "r", "%"),
                    InputSpec::numeric("years", "Years", "t", "years"),
                ],
                compute: |i| {
                    let growth = (1.0 + i.number("rate")? / 100.0).powf(i.number("years")?);
                    Ok((i.number("future")? / growth).into())
                },
                result_unit: "$",
                explanation: "What future money is worth today.",
            },
            FormulaSpec {
                id: "dividendYield",
                name: "Dividend Yield",
                formula: "Yield = (Annual Dividend / Price) × 100",
                inputs: vec![
                    InputSpec::numeric("dividend", "Annual Dividend", "D", "$"),
                    InputSpec::numeric("price", "Stock Price", "P", "$"),
                ],
                compute: |i| Ok((i.number("dividend")? / i.number("price")? * 100.0).into()),
                result_unit: "%",
                explanation: "Income return from a stock relative to its price.",
            },
        ],
    )
}

fn savings() -> Category {
    Category::new(
        "savings",
        "Savings & Goals",
        vec![
            FormulaSpec {
                id: "savingsGoal",
                name: "Monthly Savings for Goal",
                formula: "PMT = FV × [r / ((1+r)^n - 1)]",
                inputs: vec![
                    InputSpec::numeric("goal", "Savings Goal", "FV", "$"),
                    InputSpec::numeric("rate", "Annual Return", "r", "%"),
                    InputSpec::numeric("years", "Time to Goal", "t", "years"),
                ],
                compute: |i| {
                    let (rate, periods) = monthly_terms(i.number("rate")?, i.number("years")?);
                    Ok((i.number("goal")? * rate / ((1.0 + rate).powf(periods) - 1.0)).into())
                },
                result_unit: "$/month",
                explanation: "Monthly deposit needed to reach a goal with compound interest.",
            },
            FormulaSpec {
                id: "savingsGrowth",
                name: "Savings with Regular Deposits",
                formula: "FV = PMT × [((1+r)^n - 1) / r]",
                inputs: vec![
                    InputSpec::numeric("monthly", "Monthly Deposit", "PMT", "$"),
                    InputSpec::numeric("rate", "Annual Return", "r", "%"),
                    InputSpec::numeric("years", "Years", "t", "years"),
                ],
                compute: |i| {
                    let (rate, periods) = monthly_terms(i.number("rate")?, i.number("years")?);
                    Ok(annuity_future_value(i.number("monthly")?, rate, periods).into())
                },
                result_unit: "$",
                explanation: "Future value of regular monthly deposits.",
            },
            FormulaSpec {
                id: "emergencyFund",
                name: "Emergency Fund Calculator",
                formula: "Emergency Fund = Monthly Expenses × Months",
                inputs: vec![
                    InputSpec::numeric("expenses", "Monthly Expenses", "E", "$"),
                    InputSpec::numeric("months", "Months Coverage", "n", "months"),
                ],
                compute: |i| Ok((i.number("expenses")? * i.number("months")?).into()),
                result_unit: "$",
                explanation: "Three to six months of expenses is the usual recommendation.",
            },
        ],
    )
}

fn retirement() -> Category {
    Category::new(
        "retirement",
        "Retirement Planning",
        vec![
            FormulaSpec {
                id: "retirementSavings",
                name: "Retirement Nest Egg",
                formula: "FV = PMT × [((1+r)^n - 1) / r]",
                inputs: vec![
                    InputSpec::numeric("monthly", "Monthly Contribution", "PMT", "$"),
                    InputSpec::numeric("rate", "Annual Return", "r", "%"),
                    InputSpec::numeric("years", "Years to Retirement", "t", "years"),
                ],
                compute: |i| {
                    let (rate, periods) = monthly_terms(i.number("rate")?, i.number("years")?);
                    Ok(annuity_future_value(i.number("monthly")?, rate, periods).into())
                },
                result_unit: "$",
                explanation: "Retirement savings built from monthly contributions.",
            },
            FormulaSpec {
                id: "retirementIncome",
                name: "Retirement Monthly Income",
                formula: "4% Rule: Annual = Portfolio × 0.04",
                inputs: vec![InputSpec::numeric("portfolio", "Retirement Portfolio", "P", "$")],
                compute: |i| Ok((i.number("portfolio")? * SAFE_WITHDRAWAL_RATE / 12.0).into()),
                result_unit: "$/month",
                explanation: "Monthly income from withdrawing 4% of the portfolio each year.",
            },
            FormulaSpec {
                id: "socialSecurityReplace",
                name: "Income Replacement Ratio",
                formula: "Ratio = (Retirement Income / Current Income) × 100",
                inputs: vec![
                    InputSpec::numeric("retirement", "Retirement Income", "R", "$"),
                    InputSpec::numeric("current", "Current Income", "C", "$"),
                ],
                compute: |i| Ok((i.number("retirement")? / i.number("current")? * 100.0).into()),
                result_unit: "%",
                explanation: "Share of current income replaced in retirement. 70-80% is a common target.",
            },
        ],
    )
}

fn business() -> Category {
    Category::new(
        "business",
        "Business Finance",
        vec![
            FormulaSpec {
                id: "breakEven",
                name: "Break-Even Point (Units)",
                formula: "BEP = Fixed Costs / (Price - Variable Cost)",
                inputs: vec![
                    InputSpec::numeric("fixed", "Fixed Costs", "FC", "$"),
                    InputSpec::numeric("price", "Unit Price", "P", "$"),
                    InputSpec::numeric("variable", "Variable Cost/Unit", "VC", "$"),
                ],
                compute: |i| {
                    let margin = i.number("price")? - i.number("variable")?;
                    Ok((i.number("fixed")? / margin).into())
                },
                result_unit: "units",
                explanation: "Units that must be sold to cover all costs.",
            },
            FormulaSpec {
                id: "profitMargin",
                name: "Profit Margin",
                formula: "Margin = [(Revenue - Cost) / Revenue] × 100",
                inputs: vec![
                    InputSpec::numeric("revenue", "Revenue", "R", "$"),
                    InputSpec::numeric("cost", "Total Cost", "C", "$"),
                ],
                compute: |i| {
                    let revenue = i.number("revenue")?;
                    Ok(((revenue - i.number("cost")?) / revenue * 100.0).into())
                },
                result_unit: "%",
                explanation: "Percentage of revenue that becomes profit.",
            },
            FormulaSpec {
                id: "markupPrice",
                name: "Markup Pricing",
                formula: "Price = Cost × (1 + Markup/100)",
                inputs: vec![
                    InputSpec::numeric("cost", "Cost", "C", "$"),
                    InputSpec::numeric("markup", "Markup", "M", "%"),
                ],
                compute: |i| Ok((i.number("cost")? * (1.0 + i.number("markup")? / 100.0)).into()),
                result_unit: "$",
                explanation: "Selling price from cost plus a markup percentage.",
            },
            FormulaSpec {
                id: "cashFlow",
                name: "Operating Cash Flow",
                formula: "OCF = Revenue - Operating Expenses",
                inputs: vec![
                    InputSpec::numeric("revenue", "Revenue", "R", "$"),
                    InputSpec::numeric("expenses", "Operating Expenses", "E", "$"),
                ],
                compute: |i| Ok((i.number("revenue")? - i.number("expenses")?).into()),
                result_unit: "$",
                explanation: "Cash generated from operations.",
            },
        ],
    )
}

fn mortgage() -> Category {
    Category::new(
        "mortgage",
        "Mortgage & Real Estate",
        vec![
            FormulaSpec {
                id: "mortgagePayment",
                name: "Monthly Mortgage Payment",
                formula: "PMT = P × [r(1+r)^n] / [(1+r)^n - 1]",
                inputs: vec![
                    InputSpec::numeric("price", "Home Price", "P", "$"),
                    InputSpec::numeric("down", "Down Payment", "D", "%"),
                    InputSpec::numeric("rate", "Annual Rate", "r", "%"),
                    InputSpec::numeric("years", "Loan Term", "n", "years"),
                ],
                compute: |i| {
                    let principal = i.number("price")? * (1.0 - i.number("down")? / 100.0);
                    let (rate, periods) = monthly_terms(i.number("rate")?, i.number("years")?);
                    Ok(amortized_payment(principal, rate, periods).into())
                },
                result_unit: "$/month",
                explanation: "Principal and interest payment, before taxes and insurance.",
            },
            FormulaSpec {
                id: "affordableHome",
                name: "Affordable Home Price",
                formula: "Price = (Income × 0.28) / Payment Ratio",
                inputs: vec![
                    InputSpec::numeric("income", "Annual Income", "I", "$"),
                    InputSpec::numeric("rate", "Mortgage Rate", "r", "%"),
                    InputSpec::numeric("years", "Loan Term", "n", "years"),
                ],
                compute: |i| {
                    let max_payment = i.number("income")? / 12.0 * HOUSING_INCOME_SHARE;
                    let (rate, periods) = monthly_terms(i.number("rate")?, i.number("years")?);
                    Ok(annuity_present_value(max_payment, rate, periods).into())
                },
                result_unit: "$",
                explanation: "Largest loan whose payment stays within 28% of gross monthly income.",
            },
            FormulaSpec {
                id: "refinanceSavings",
                name: "Refinance Savings",
                formula: "Savings = (Old Payment - New Payment) × Months",
                inputs: vec![
                    InputSpec::numeric("oldRate", "Current Rate", "r₁", "%"),
                    InputSpec::numeric("newRate", "New Rate", "r₂", "%"),
                    InputSpec::numeric("balance", "Loan Balance", "B", "$"),
                    InputSpec::numeric("years", "Remaining Years", "n", "years"),
                ],
                compute: |i| {
                    let balance = i.number("balance")?;
                    let years = i.number("years")?;
                    let (old_rate, periods) = monthly_terms(i.number("oldRate")?, years);
                    let (new_rate, _) = monthly_terms(i.number("newRate")?, years);
                    let old_payment = amortized_payment(balance, old_rate, periods);
                    let new_payment = amortized_payment(balance, new_rate, periods);
                    Ok(((old_payment - new_payment) * periods).into())
                },
                result_unit: "$",
                explanation: "Total saved by refinancing, to compare against closing costs.",
            },
        ],
    )
}

fn currency() -> Category {
    Category::new(
        "currency",
        "Currency & Exchange",
        vec![
            FormulaSpec {
                id: "currencyConversion",
                name: "Currency Conversion",
                formula: "Converted = Amount × Exchange Rate",
                inputs: vec![
                    InputSpec::numeric("amount", "Amount", "A", ""),
                    InputSpec::numeric("rate", "Exchange Rate", "R", ""),
                ],
                compute: |i| Ok((i.number("amount")? * i.number("rate")?).into()),
                result_unit: "",
                explanation: "Converts an amount with a given exchange rate.",
            },
            FormulaSpec {
                id: "inflation",
                name: "Inflation-Adjusted Value",
                formula: "Adjusted = Amount × (1 + inflation)^years",
                inputs: vec![
                    InputSpec::numeric("amount", "Amount", "A", "$"),
                    InputSpec::numeric("inflation", "Inflation Rate", "i", "%"),
                    InputSpec::numeric("years", "Years", "t", "years"),
                ],
                compute: |i| {
                    let growth = (1.0 + i.number("inflation")? / 100.0).powf(i.number("years")?);
                    Ok((i.number("amount")? * growth).into())
                },
                result_unit: "$",
                explanation: "Future cost of an amount after inflation.",
            },
            FormulaSpec {
                id: "realReturn",
                name: "Real Return (After Inflation)",
                formula: "Real Return = [(1+nominal)/(1+inflation) - 1] × 100",
                inputs: vec![
                    InputSpec::numeric("nominal", "Nominal Return", "r_n", "%"),
                    InputSpec::numeric("inflation", "Inflation Rate", "i", "%"),
                ],
                compute: |i| {
                    let nominal = 1.0 + i.number("nominal")? / 100.0;
                    let inflation = 1.0 + i.number("inflation")? / 100.0;
                    Ok(((nominal / inflation - 1.0) * 100.0).into())
                },
                result_unit: "%",
                explanation: "Purchasing-power gain after inflation.",
            },
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amortized_payment() {
        // 200k over 30 years at 6%: the textbook 1199.10 payment.
        let (rate, periods) = monthly_terms(6.0, 30.0);
        let payment = amortized_payment(200_000.0, rate, periods);
        assert!((payment - 1199.10).abs() < 0.01);
    }

    #[test]
    fn test_affordability_inverts_payment() {
        let (rate, periods) = monthly_terms(4.5, 15.0);
        let payment = amortized_payment(150_000.0, rate, periods);
        let principal = annuity_present_value(payment, rate, periods);
        assert!((principal - 150_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_rate_is_not_finite() {
        let payment = amortized_payment(1000.0, 0.0, 12.0);
        assert!(!payment.is_finite());
    }

    #[test]
    fn test_annuity_future_value() {
        let fv = annuity_future_value(100.0, 0.01, 2.0);
        assert!((fv - 201.0).abs() < 1e-9);
    }
}
