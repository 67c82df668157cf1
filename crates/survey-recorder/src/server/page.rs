//! HTML served by the survey form.

use std::fmt::Write;

use crate::submission::{FIELD_AGE, FIELD_EXPENSES_SELECTED, FIELD_GENDER, FIELD_INCOME};
use crate::survey::{ExpenseCategory, GENDER_OPTIONS};

/// Body of a successful submission.
pub const CONFIRMATION_HTML: &str =
    "<h3>Thank you! Your response has been recorded.</h3><a href='/'>Submit another response</a>";

/// Body of a 400 response.
pub const MISSING_INPUTS_MESSAGE: &str = "Missing required inputs";

/// Body of a 500 response.
pub const SERVER_ERROR_MESSAGE: &str = "Server error during form processing.";

const HEAD: &str = r#"<!doctype html>
<html>
<head>
  <title>Income Survey</title>
  <style>
    body { font-family: Arial, sans-serif; max-width: 600px; margin: 40px auto; color: #222; }
    h2 { margin-bottom: 20px; }
    label { display: block; margin-top: 15px; font-weight: bold; }
    input[type=text], input[type=number], select {
      width: 100%; padding: 8px; margin-top: 5px; box-sizing: border-box;
    }
    fieldset { margin-top: 20px; padding: 10px; border: 1px solid #ccc; }
    legend { font-weight: bold; }
    .expense-item { margin-top: 10px; }
    .submit-btn { margin-top: 20px; padding: 10px 20px; }
    .hint { font-size: 0.9em; color: #666; }
  </style>
  <script>
    function toggleInput(checkbox, id) {
      const input = document.getElementById(id);
      input.style.display = checkbox.checked ? 'block' : 'none';
      if (!checkbox.checked) input.value = '';
    }
  </script>
</head>
"#;

/// Render the survey form.
#[must_use]
pub fn render_form() -> String {
    let mut html = String::from(HEAD);
    html.push_str("<body>\n  <h2>Income &amp; Expense Survey</h2>\n  <form method=\"POST\">\n");

    let _ = write!(
        html,
        r#"    <label>Age:
      <input type="number" name="{FIELD_AGE}" required min="0" placeholder="Enter your age">
      <div class="hint">Enter your age as a number (e.g., 30)</div>
    </label>

    <label>Gender:
      <select name="{FIELD_GENDER}" required>
        <option value="" disabled selected>Select gender</option>
"#
    );
    for (value, label) in GENDER_OPTIONS {
        let _ = writeln!(html, r#"        <option value="{value}">{label}</option>"#);
    }
    let _ = write!(
        html,
        r#"      </select>
      <div class="hint">Please choose one option from the list</div>
    </label>

    <label>Total Income (Monthly in USD):
      <input type="number" name="{FIELD_INCOME}" required min="0" placeholder="e.g., 3000">
      <div class="hint">Enter your total monthly income in dollars (e.g., 3200)</div>
    </label>

    <fieldset>
      <legend>Expenses (check and enter amount for each)</legend>
"#
    );

    for category in ExpenseCategory::ALL {
        let name = category.as_str();
        let label = category.label();
        let field = category.amount_field();
        let _ = write!(
            html,
            r#"
      <div class="expense-item">
        <input type="checkbox" name="{FIELD_EXPENSES_SELECTED}" value="{name}"
               onchange="toggleInput(this, '{field}')"> {label}
        <input type="number" name="{field}" id="{field}"
               placeholder="Amount for {label}" min="0" style="display:none;">
      </div>
"#
        );
    }

    html.push_str(
        r#"    </fieldset>

    <button class="submit-btn" type="submit">Submit</button>
  </form>
</body>
</html>
"#,
    );
    html
}
