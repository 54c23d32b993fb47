//! A simple calculator over `f64`.

use crate::errors::CalcError;

#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator;

impl Calculator {
    pub fn new() -> Self {
        Self
    }

    pub fn add(&self, a: f64, b: f64) -> f64 {
        a + b
    }

    pub fn subtract(&self, a: f64, b: f64) -> f64 {
        a - b
    }

    pub fn multiply(&self, a: f64, b: f64) -> f64 {
        a * b
    }

    /// Divide `a` by `b`.
    ///
    /// ## Errors
    ///
    /// Returns [`CalcError::DivisionByZero`] when `b` is zero (either sign).
    pub fn divide(&self, a: f64, b: f64) -> Result<f64, CalcError> {
        if b == 0.0 {
            return Err(CalcError::DivisionByZero);
        }
        Ok(a / b)
    }

    pub fn power(&self, base: f64, exponent: f64) -> f64 {
        base.powf(exponent)
    }

    /// `percent` percent of `value`.
    pub fn percentage(&self, value: f64, percent: f64) -> f64 {
        (value * percent) / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_arithmetic() {
        let calc = Calculator::new();
        assert_eq!(calc.add(2.0, 3.0), 5.0);
        assert_eq!(calc.subtract(5.0, 3.0), 2.0);
        assert_eq!(calc.multiply(-2.0, 3.0), -6.0);
    }

    #[test]
    fn test_divide() {
        let calc = Calculator::new();
        assert_eq!(calc.divide(6.0, 3.0), Ok(2.0));
        assert_eq!(calc.divide(1.0, 0.0), Err(CalcError::DivisionByZero));
        assert_eq!(calc.divide(1.0, -0.0), Err(CalcError::DivisionByZero));
        assert_eq!(CalcError::DivisionByZero.to_string(), "Cannot divide by zero");
    }

    #[test]
    fn test_power_and_percentage() {
        let calc = Calculator::new();
        assert_eq!(calc.power(2.0, 3.0), 8.0);
        assert_eq!(calc.power(5.0, 0.0), 1.0);
        assert_eq!(calc.power(2.0, -1.0), 0.5);
        assert_eq!(calc.percentage(200.0, 15.0), 30.0);
    }
}
