//! Core survey types for survey-recorder.
//!
//! This module defines the fixed expense categories, the gender options the
//! form offers, and the [`SurveyResponse`] record that is persisted once per
//! accepted submission.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Gender options offered by the form, as `(value, label)` pairs.
///
/// Submissions are not checked against this list; the trimmed value is
/// stored as given.
pub const GENDER_OPTIONS: [(&str, &str); 4] = [
    ("female", "Female"),
    ("male", "Male"),
    ("non-binary", "Non-binary"),
    ("prefer_not_to_say", "Prefer not to say"),
];

/// One of the five fixed expense categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    /// Household utilities.
    Utilities,
    /// Entertainment and leisure.
    Entertainment,
    /// School fees.
    SchoolFees,
    /// Shopping.
    Shopping,
    /// Healthcare.
    Healthcare,
}

impl ExpenseCategory {
    /// All categories, in column order.
    pub const ALL: [Self; 5] = [
        Self::Utilities,
        Self::Entertainment,
        Self::SchoolFees,
        Self::Shopping,
        Self::Healthcare,
    ];

    /// The category name used in forms and as the column header.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Utilities => "utilities",
            Self::Entertainment => "entertainment",
            Self::SchoolFees => "school_fees",
            Self::Shopping => "shopping",
            Self::Healthcare => "healthcare",
        }
    }

    /// Human readable label for the form.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::SchoolFees => "School Fees",
            Self::Shopping => "Shopping",
            Self::Healthcare => "Healthcare",
        }
    }

    /// Name of the form field carrying this category's amount.
    #[must_use]
    pub fn amount_field(self) -> String {
        format!("{}_amount", self.as_str())
    }

    /// Look up a category by its form name. Unknown names yield `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category expense amounts. Categories never set are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Expenses {
    utilities: f64,
    entertainment: f64,
    school_fees: f64,
    shopping: f64,
    healthcare: f64,
}

impl Expenses {
    /// Create an expense set with every category at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the amount for a category.
    #[must_use]
    pub fn get(&self, category: ExpenseCategory) -> f64 {
        match category {
            ExpenseCategory::Utilities => self.utilities,
            ExpenseCategory::Entertainment => self.entertainment,
            ExpenseCategory::SchoolFees => self.school_fees,
            ExpenseCategory::Shopping => self.shopping,
            ExpenseCategory::Healthcare => self.healthcare,
        }
    }

    /// Set the amount for a category.
    pub fn set(&mut self, category: ExpenseCategory, amount: f64) {
        let slot = match category {
            ExpenseCategory::Utilities => &mut self.utilities,
            ExpenseCategory::Entertainment => &mut self.entertainment,
            ExpenseCategory::SchoolFees => &mut self.school_fees,
            ExpenseCategory::Shopping => &mut self.shopping,
            ExpenseCategory::Healthcare => &mut self.healthcare,
        };
        *slot = amount;
    }

    /// Iterate over `(category, amount)` in column order.
    pub fn iter(&self) -> impl Iterator<Item = (ExpenseCategory, f64)> + '_ {
        ExpenseCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Sum of all five amounts.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.iter().map(|(_, amount)| amount).sum()
    }
}

/// A single accepted survey submission.
///
/// The expense total is derived from `expenses` when the record is built and
/// cannot be supplied independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyResponse {
    /// Respondent age.
    pub age: i64,
    /// Respondent gender, as submitted.
    pub gender: String,
    /// Monthly income.
    pub income: f64,
    expenses: Expenses,
    total_expenses: f64,
    timestamp: DateTime<Utc>,
}

impl SurveyResponse {
    /// Create a new response stamped with the current UTC time.
    #[must_use]
    pub fn new(age: i64, gender: String, income: f64, expenses: Expenses) -> Self {
        Self::recorded_at(age, gender, income, expenses, Utc::now())
    }

    /// Create a response with an explicit capture time.
    #[must_use]
    pub fn recorded_at(
        age: i64,
        gender: String,
        income: f64,
        expenses: Expenses,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            age,
            gender,
            income,
            total_expenses: expenses.total(),
            expenses,
            timestamp,
        }
    }

    /// Per-category amounts.
    #[must_use]
    pub fn expenses(&self) -> &Expenses {
        &self.expenses
    }

    /// Sum of all expense amounts.
    #[must_use]
    pub fn total_expenses(&self) -> f64 {
        self.total_expenses
    }

    /// When the response was captured.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The record as unescaped field values, in store column order.
    #[must_use]
    pub fn to_fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(10);
        fields.push(
            self.timestamp
                .to_rfc3339_opts(SecondsFormat::Micros, false),
        );
        fields.push(self.age.to_string());
        fields.push(self.gender.clone());
        fields.push(format_decimal(self.income));
        fields.extend(self.expenses.iter().map(|(_, amount)| format_decimal(amount)));
        fields.push(format_decimal(self.total_expenses));
        fields
    }
}

/// Format a decimal so whole numbers keep a fractional part (`150.0`).
#[must_use]
pub fn format_decimal(value: f64) -> String {
    format!("{value:?}")
}
