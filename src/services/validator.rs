//! Expense form validation
//!
//! The form holds raw user input. Validation only checks that the required
//! fields are present; parsing the amount and date is left to the backend,
//! and installment counts are never required.

use std::fmt;

use crate::models::{CategoryId, Installment, NewExpense};

/// Transient input for a new expense
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    pub description: String,
    pub amount: String,
    pub date: String,
    pub category_id: Option<CategoryId>,
    pub is_installment: bool,
    pub current_installment: String,
    pub total_installments: String,
}

impl ExpenseForm {
    /// Check the form and build the request body.
    ///
    /// The installment variant is decided here, once.
    pub fn to_submission(&self) -> Result<NewExpense, InvalidReason> {
        if let FormCheck::Invalid(reason) = validate_expense_form(self) {
            return Err(reason);
        }
        let category_id = self.category_id.ok_or(InvalidReason::MissingCategory)?;

        Ok(NewExpense {
            description: self.description.clone(),
            amount: self.amount.clone(),
            date: self.date.clone(),
            category_id,
            installment: Installment::from_form(
                self.is_installment,
                &self.current_installment,
                &self.total_installments,
            ),
        })
    }
}

/// Outcome of validating an [`ExpenseForm`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormCheck {
    Valid,
    Invalid(InvalidReason),
}

impl FormCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Why a form was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    MissingDescription,
    MissingAmount,
    MissingDate,
    MissingCategory,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDescription => write!(f, "Description is required"),
            Self::MissingAmount => write!(f, "Amount is required"),
            Self::MissingDate => write!(f, "Date is required"),
            Self::MissingCategory => write!(f, "A category must be selected"),
        }
    }
}

impl std::error::Error for InvalidReason {}

/// Check the required fields in order; the first failure wins.
///
/// Id `0` counts as "nothing selected", matching the empty option of the
/// category picker.
pub fn validate_expense_form(form: &ExpenseForm) -> FormCheck {
    if form.description.is_empty() {
        return FormCheck::Invalid(InvalidReason::MissingDescription);
    }
    if form.amount.is_empty() {
        return FormCheck::Invalid(InvalidReason::MissingAmount);
    }
    if form.date.is_empty() {
        return FormCheck::Invalid(InvalidReason::MissingDate);
    }
    match form.category_id {
        Some(id) if id.get() != 0 => FormCheck::Valid,
        _ => FormCheck::Invalid(InvalidReason::MissingCategory),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> ExpenseForm {
        ExpenseForm {
            description: "Supermercado".into(),
            amount: "15300".into(),
            date: "2025-06-01".into(),
            category_id: Some(CategoryId::new(2)),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_form_is_valid() {
        assert!(validate_expense_form(&complete_form()).is_valid());
    }

    #[test]
    fn test_first_failure_wins() {
        let form = ExpenseForm::default();
        assert_eq!(
            validate_expense_form(&form),
            FormCheck::Invalid(InvalidReason::MissingDescription)
        );

        let form = ExpenseForm {
            description: "x".into(),
            ..Default::default()
        };
        assert_eq!(
            validate_expense_form(&form),
            FormCheck::Invalid(InvalidReason::MissingAmount)
        );

        let form = ExpenseForm {
            description: "x".into(),
            amount: "1".into(),
            ..Default::default()
        };
        assert_eq!(
            validate_expense_form(&form),
            FormCheck::Invalid(InvalidReason::MissingDate)
        );
    }

    #[test]
    fn test_category_must_be_selected() {
        let mut form = complete_form();
        form.category_id = None;
        assert_eq!(
            validate_expense_form(&form),
            FormCheck::Invalid(InvalidReason::MissingCategory)
        );

        form.category_id = Some(CategoryId::new(0));
        assert_eq!(
            validate_expense_form(&form),
            FormCheck::Invalid(InvalidReason::MissingCategory)
        );
    }

    #[test]
    fn test_amount_is_not_parsed() {
        let mut form = complete_form();
        form.amount = "twelve".into();
        assert!(validate_expense_form(&form).is_valid());
    }

    #[test]
    fn test_installment_counts_not_required() {
        let mut form = complete_form();
        form.is_installment = true;
        assert!(validate_expense_form(&form).is_valid());

        let body = form.to_submission().unwrap();
        assert_eq!(
            body.installment,
            Installment::Plan {
                current: None,
                total: None
            }
        );
    }

    #[test]
    fn test_submission_ignores_counts_when_unchecked() {
        let mut form = complete_form();
        form.current_installment = "3".into();
        form.total_installments = "12".into();

        let body = form.to_submission().unwrap();
        assert_eq!(body.installment, Installment::NotInstallment);

        form.is_installment = true;
        let body = form.to_submission().unwrap();
        assert_eq!(body.installment, Installment::plan(3, 12));
    }

    #[test]
    fn test_invalid_submission_reports_reason() {
        let mut form = complete_form();
        form.date.clear();
        assert_eq!(form.to_submission(), Err(InvalidReason::MissingDate));
        assert_eq!(InvalidReason::MissingDate.to_string(), "Date is required");
    }
}
