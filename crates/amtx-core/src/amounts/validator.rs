//! Arithmetic reconciliation of total, paid and due amounts.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{AmountType, ClassifiedAmount, ValidationStatus};

/// Default reconciliation tolerance (0.01).
pub const DEFAULT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

fn first_of(amounts: &[ClassifiedAmount], kind: AmountType) -> Option<Decimal> {
    amounts.iter().find(|a| a.kind == kind).map(|a| a.value)
}

/// Check that the first total equals the first paid plus the first due.
pub fn validate(amounts: Vec<ClassifiedAmount>) -> (Vec<ClassifiedAmount>, ValidationStatus) {
    validate_with_tolerance(amounts, DEFAULT_TOLERANCE)
}

/// [`validate`] with an explicit tolerance.
///
/// On mismatch a `validation_error` entry holding `total - (paid + due)` is
/// appended; existing entries are never touched.
pub fn validate_with_tolerance(
    mut amounts: Vec<ClassifiedAmount>,
    tolerance: Decimal,
) -> (Vec<ClassifiedAmount>, ValidationStatus) {
    let total = first_of(&amounts, AmountType::TotalBill);
    let paid = first_of(&amounts, AmountType::Paid);
    let due = first_of(&amounts, AmountType::Due);

    let (Some(total), Some(paid), Some(due)) = (total, paid, due) else {
        debug!(
            "Partial reconciliation: total={:?} paid={:?} due={:?}",
            total, paid, due
        );
        return (amounts, ValidationStatus::ValidationPartial);
    };

    let expected = paid + due;
    let difference = total - expected;

    if difference.abs() <= tolerance {
        return (amounts, ValidationStatus::ValidationOk);
    }

    debug!("Reconciliation off by {}", difference);
    amounts.push(ClassifiedAmount::new(
        AmountType::ValidationError,
        difference,
        format!(
            "Inconsistency: Total ({}) != Paid ({}) + Due ({})",
            total, paid, due
        ),
    ));

    (amounts, ValidationStatus::ValidationInconsistent)
}
