use std::borrow::Cow;

use rust_decimal::Decimal;
use validator::{Validate, ValidationError, ValidationErrors};

/// NUMERIC(10, 2): ten significant digits, two of them after the point.
pub const SALARY_MAX_DIGITS: u32 = 10;
pub const SALARY_DECIMAL_PLACES: u32 = 2;

pub fn validate<T: Validate>(val: &T) -> Result<(), validator::ValidationErrors> {
    val.validate()
}

/// Required text must carry something besides whitespace.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::from("must not be blank"));
        return Err(err);
    }
    Ok(())
}

/// Checks that an amount fits the salary column without rounding.
pub fn check_salary(value: &Decimal) -> Result<(), ValidationError> {
    let normalized = value.normalize();
    if normalized.scale() > SALARY_DECIMAL_PLACES {
        let mut err = ValidationError::new("decimal_places");
        err.message = Some(Cow::from(format!(
            "at most {} decimal places allowed",
            SALARY_DECIMAL_PLACES
        )));
        return Err(err);
    }

    let integer_digits = SALARY_MAX_DIGITS - SALARY_DECIMAL_PLACES;
    let limit = Decimal::from(10_i64.pow(integer_digits));
    if normalized.abs().trunc() >= limit {
        let mut err = ValidationError::new("max_digits");
        err.message = Some(Cow::from(format!(
            "at most {} digits before the decimal point allowed",
            integer_digits
        )));
        return Err(err);
    }

    Ok(())
}

pub fn validate_salaries(
    min_salary: Option<&Decimal>,
    max_salary: Option<&Decimal>,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if let Some(Err(err)) = min_salary.map(check_salary) {
        errors.add("min_salary", err);
    }
    if let Some(Err(err)) = max_salary.map(check_salary) {
        errors.add("max_salary", err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
