use specreport_demo::{CalcError, Calculator};

use super::assert_close;
use crate::runner::Suite;

pub(super) fn suite() -> Suite {
    Suite::new("Calculator")
        .describe(
            Suite::new("basic operations")
                .it("adds", || {
                    let calc = Calculator::new();
                    assert_eq!(calc.add(2.0, 3.0), 5.0);
                    assert_eq!(calc.add(-1.0, 1.0), 0.0);
                    assert_eq!(calc.add(0.0, 0.0), 0.0);
                })
                .it("subtracts", || {
                    let calc = Calculator::new();
                    assert_eq!(calc.subtract(5.0, 3.0), 2.0);
                    assert_eq!(calc.subtract(0.0, 5.0), -5.0);
                    assert_eq!(calc.subtract(10.0, 10.0), 0.0);
                })
                .it("multiplies", || {
                    let calc = Calculator::new();
                    assert_eq!(calc.multiply(3.0, 4.0), 12.0);
                    assert_eq!(calc.multiply(-2.0, 3.0), -6.0);
                    assert_eq!(calc.multiply(0.0, 100.0), 0.0);
                })
                .it("divides", || {
                    let calc = Calculator::new();
                    assert_eq!(calc.divide(10.0, 2.0), Ok(5.0));
                    assert_eq!(calc.divide(9.0, 3.0), Ok(3.0));
                    assert_close(calc.divide(7.0, 2.0).unwrap_or(f64::NAN), 3.5, 2);
                })
                .it("rejects division by zero", || {
                    let err = Calculator::new().divide(10.0, 0.0);
                    assert_eq!(err, Err(CalcError::DivisionByZero));
                    assert_eq!(CalcError::DivisionByZero.to_string(), "Cannot divide by zero");
                }),
        )
        .describe(
            Suite::new("advanced operations")
                .it("raises to a power", || {
                    let calc = Calculator::new();
                    assert_eq!(calc.power(2.0, 3.0), 8.0);
                    assert_eq!(calc.power(5.0, 2.0), 25.0);
                    assert_eq!(calc.power(10.0, 0.0), 1.0);
                })
                .it("computes percentages", || {
                    let calc = Calculator::new();
                    assert_eq!(calc.percentage(200.0, 50.0), 100.0);
                    assert_eq!(calc.percentage(150.0, 20.0), 30.0);
                    assert_eq!(calc.percentage(1000.0, 5.0), 50.0);
                }),
        )
        .describe(
            Suite::new("floating point precision")
                .it("adds decimals", || {
                    assert_close(Calculator::new().add(0.1, 0.2), 0.3, 5);
                })
                .it("divides into repeating decimals", || {
                    assert_close(Calculator::new().divide(1.0, 3.0).unwrap_or(f64::NAN), 0.333, 2);
                }),
        )
}
