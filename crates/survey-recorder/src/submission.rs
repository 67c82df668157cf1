//! Form submission handling.
//!
//! Turns the raw fields of a survey POST into a [`SurveyResponse`]. Required
//! fields are checked before anything is parsed; expense amounts are lenient
//! and fall back to zero.

use tracing::debug;

use crate::error::{Error, Result};
use crate::survey::{ExpenseCategory, Expenses, SurveyResponse};

/// Form field holding the respondent age.
pub const FIELD_AGE: &str = "age";
/// Form field holding the respondent gender.
pub const FIELD_GENDER: &str = "gender";
/// Form field holding the monthly income.
pub const FIELD_INCOME: &str = "income";
/// Repeated form field listing the selected expense categories.
pub const FIELD_EXPENSES_SELECTED: &str = "expenses_selected";

/// Submitted form fields, in the order they were received.
///
/// Keys may repeat (checkbox groups submit one pair per checked box).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    /// Wrap decoded `(name, value)` pairs.
    #[must_use]
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value submitted for `name`.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Every value submitted for `name`.
    pub fn all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Number of submitted pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True when nothing was submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl From<Vec<(String, String)>> for FormFields {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::new(pairs)
    }
}

impl<K, V> FromIterator<(K, V)> for FormFields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// How strictly required numbers are validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Report an unparseable age or income as a client error instead of a
    /// server failure.
    pub strict_numeric: bool,
}

/// Build a [`SurveyResponse`] from submitted form fields.
///
/// # Errors
///
/// Returns [`Error::MissingRequiredField`] if age, income or gender is blank,
/// and [`Error::UnparseableNumeric`] if age is not an integer or income is not
/// a number.
pub fn parse_submission(fields: &FormFields, policy: ValidationPolicy) -> Result<SurveyResponse> {
    let age_raw = required(fields, FIELD_AGE);
    let income_raw = required(fields, FIELD_INCOME);
    let gender = required(fields, FIELD_GENDER);

    for (field, value) in [
        (FIELD_AGE, age_raw),
        (FIELD_INCOME, income_raw),
        (FIELD_GENDER, gender),
    ] {
        if value.is_empty() {
            return Err(Error::missing(field));
        }
    }

    let age: i64 = age_raw
        .parse()
        .map_err(|_| Error::unparseable(FIELD_AGE, "integer", age_raw, policy.strict_numeric))?;
    let income: f64 = income_raw.parse().map_err(|_| {
        Error::unparseable(
            FIELD_INCOME,
            "decimal number",
            income_raw,
            policy.strict_numeric,
        )
    })?;

    let selected: Vec<ExpenseCategory> = fields
        .all(FIELD_EXPENSES_SELECTED)
        .filter_map(ExpenseCategory::from_name)
        .collect();

    let mut expenses = Expenses::new();
    for category in ExpenseCategory::ALL {
        if selected.contains(&category) {
            let raw = fields.first(&category.amount_field()).unwrap_or("0");
            expenses.set(category, parse_amount(category, raw));
        }
    }

    Ok(SurveyResponse::new(age, gender.to_string(), income, expenses))
}

/// Trimmed value of a field, or `""` when absent.
fn required<'a>(fields: &'a FormFields, name: &str) -> &'a str {
    fields.first(name).map_or("", str::trim)
}

/// Parse an expense amount, treating blanks and garbage as zero.
fn parse_amount(category: ExpenseCategory, raw: &str) -> f64 {
    let trimmed = raw.trim();
    trimmed.parse().unwrap_or_else(|_| {
        debug!(%category, value = trimmed, "Unparseable expense amount, using 0");
        0.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        pairs.iter().copied().collect()
    }

    fn base() -> Vec<(&'static str, &'static str)> {
        vec![("age", "30"), ("gender", "male"), ("income", "3000")]
    }

    #[test]
    fn test_form_fields_first_and_all() {
        let f = fields(&[
            ("expenses_selected", "utilities"),
            ("age", "30"),
            ("expenses_selected", "healthcare"),
            ("age", "99"),
        ]);
        assert_eq!(f.first("age"), Some("30"));
        assert_eq!(f.first("income"), None);
        let selected: Vec<_> = f.all("expenses_selected").collect();
        assert_eq!(selected, vec!["utilities", "healthcare"]);
        assert_eq!(f.len(), 4);
        assert!(!f.is_empty());
    }

    #[test]
    fn test_reference_submission() {
        let mut pairs = base();
        pairs.extend([
            ("expenses_selected", "utilities"),
            ("expenses_selected", "healthcare"),
            ("utilities_amount", "100"),
            ("healthcare_amount", "50"),
            ("shopping_amount", "9999"),
        ]);
        let response = parse_submission(&fields(&pairs), ValidationPolicy::default()).unwrap();

        let e = response.expenses();
        assert_eq!(e.get(ExpenseCategory::Utilities), 100.0);
        assert_eq!(e.get(ExpenseCategory::Healthcare), 50.0);
        assert_eq!(e.get(ExpenseCategory::Shopping), 0.0);
        assert_eq!(e.get(ExpenseCategory::Entertainment), 0.0);
        assert_eq!(e.get(ExpenseCategory::SchoolFees), 0.0);
        assert_eq!(response.total_expenses(), 150.0);
        assert_eq!(response.age, 30);
        assert_eq!(response.gender, "male");
        assert_eq!(response.income, 3000.0);
    }

    #[test]
    fn test_required_fields_are_trimmed() {
        let f = fields(&[("age", " 42 "), ("gender", "  female\t"), ("income", " 12.5 ")]);
        let response = parse_submission(&f, ValidationPolicy::default()).unwrap();
        assert_eq!(response.age, 42);
        assert_eq!(response.gender, "female");
        assert_eq!(response.income, 12.5);
    }

    #[test]
    fn test_missing_age() {
        let f = fields(&[("age", ""), ("gender", "male"), ("income", "3000")]);
        let err = parse_submission(&f, ValidationPolicy::default()).unwrap_err();
        assert!(matches!(err, Error::MissingRequiredField { field: "age" }));
    }

    #[test]
    fn test_absent_age() {
        let f = fields(&[("gender", "male"), ("income", "3000")]);
        let err = parse_submission(&f, ValidationPolicy::default()).unwrap_err();
        assert!(err.is_missing_field());
    }

    #[test]
    fn test_whitespace_gender_is_missing() {
        let f = fields(&[("age", "30"), ("gender", "   "), ("income", "3000")]);
        let err = parse_submission(&f, ValidationPolicy::default()).unwrap_err();
        assert!(matches!(err, Error::MissingRequiredField { field: "gender" }));
    }

    #[test]
    fn test_missing_takes_precedence_over_unparseable() {
        let f = fields(&[("age", "abc"), ("gender", ""), ("income", "3000")]);
        let err = parse_submission(&f, ValidationPolicy::default()).unwrap_err();
        assert!(err.is_missing_field());
    }

    #[test]
    fn test_unparseable_income_is_server_error_by_default() {
        let f = fields(&[("age", "30"), ("gender", "male"), ("income", "abc")]);
        let err = parse_submission(&f, ValidationPolicy::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::UnparseableNumeric {
                field: "income",
                strict: false,
                ..
            }
        ));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_fractional_age_is_unparseable() {
        let f = fields(&[("age", "30.5"), ("gender", "male"), ("income", "3000")]);
        let err = parse_submission(&f, ValidationPolicy::default()).unwrap_err();
        assert!(matches!(err, Error::UnparseableNumeric { field: "age", .. }));
    }

    #[test]
    fn test_unparseable_age_strict_is_client_error() {
        let f = fields(&[("age", "thirty"), ("gender", "male"), ("income", "3000")]);
        let policy = ValidationPolicy {
            strict_numeric: true,
        };
        let err = parse_submission(&f, policy).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_unselected_amount_ignored() {
        let mut pairs = base();
        pairs.push(("entertainment_amount", "75"));
        let response = parse_submission(&fields(&pairs), ValidationPolicy::default()).unwrap();
        assert_eq!(response.expenses().get(ExpenseCategory::Entertainment), 0.0);
        assert_eq!(response.total_expenses(), 0.0);
    }

    #[test]
    fn test_selected_amount_garbage_is_zero() {
        let mut pairs = base();
        pairs.extend([
            ("expenses_selected", "shopping"),
            ("shopping_amount", "lots"),
            ("expenses_selected", "school_fees"),
            ("school_fees_amount", "200"),
        ]);
        let response = parse_submission(&fields(&pairs), ValidationPolicy::default()).unwrap();
        assert_eq!(response.expenses().get(ExpenseCategory::Shopping), 0.0);
        assert_eq!(response.total_expenses(), 200.0);
    }

    #[test]
    fn test_selected_amount_blank_or_absent_is_zero() {
        let mut pairs = base();
        pairs.extend([
            ("expenses_selected", "utilities"),
            ("utilities_amount", "  "),
            ("expenses_selected", "healthcare"),
        ]);
        let response = parse_submission(&fields(&pairs), ValidationPolicy::default()).unwrap();
        assert_eq!(response.total_expenses(), 0.0);
    }

    #[test]
    fn test_unknown_category_ignored() {
        let mut pairs = base();
        pairs.extend([
            ("expenses_selected", "rent"),
            ("rent_amount", "1200"),
            ("expenses_selected", "utilities"),
            ("utilities_amount", "80.25"),
        ]);
        let response = parse_submission(&fields(&pairs), ValidationPolicy::default()).unwrap();
        assert_eq!(response.total_expenses(), 80.25);
    }

    #[test]
    fn test_total_matches_sum_of_amounts() {
        let mut pairs: Vec<(String, String)> = base()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        for (category, amount) in ExpenseCategory::ALL
            .into_iter()
            .zip(["10", "20.5", "30", "40", "0.25"])
        {
            pairs.push((FIELD_EXPENSES_SELECTED.to_string(), category.to_string()));
            pairs.push((category.amount_field(), amount.to_string()));
        }
        let response =
            parse_submission(&FormFields::new(pairs), ValidationPolicy::default()).unwrap();
        let sum: f64 = response.expenses().iter().map(|(_, a)| a).sum();
        assert_eq!(response.total_expenses(), sum);
        assert_eq!(response.total_expenses(), 100.75);
    }
}
