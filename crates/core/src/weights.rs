//! Weight budget and export gate for evaluation plans.
//!
//! An evaluation plan distributes 100 percentage points over its items. Every
//! mutation must keep the running sum at or below [`WEIGHT_BUDGET`]; a report
//! may only be exported once the sum is exactly 100 and every item is tied to
//! at least one learning objective.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// Total percentage an evaluation plan distributes over its items.
pub const WEIGHT_BUDGET: i32 = 100;

/// Discrete weights an item may carry.
pub const WEIGHT_OPTIONS: &[i16] = &[5, 10, 15, 20, 25];

/// Weight applied when a new item does not specify one.
pub const DEFAULT_WEIGHT: i16 = 15;

/// Minimal view of an item needed to check the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedItem {
    pub id: DbId,
    pub weight: i16,
}

/// Adding or updating an item would push the plan above 100%.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error(
    "La suma de los pesos de los ítems no puede exceder el 100% \
     (peso solicitado {attempted_weight}%, asignado {current_total}%, disponible {remaining}%)"
)]
pub struct OverBudgetError {
    /// Weight of the item being written.
    pub attempted_weight: i32,
    /// Sum of the other items' weights.
    pub current_total: i32,
    /// Percentage still available to the candidate.
    pub remaining: i32,
}

/// Reasons an evaluation plan cannot be exported yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExportBlockedError {
    #[error("La suma de los pesos debe ser exactamente 100% (actual: {current_total}%)")]
    IncompleteWeight { current_total: i32 },

    #[error("Hay ítems sin objetivos asociados: {}", .item_descriptions.join("; "))]
    MissingObjectives { item_descriptions: Vec<String> },
}

/// Item as seen by the export gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportItem {
    pub id: DbId,
    pub weight: i16,
    /// Short human-readable label used in error messages (usually the skills text).
    pub description: String,
    pub objective_count: usize,
}

/// Validate that a discrete weight option was chosen.
pub fn validate_weight_option(weight: i16) -> Result<(), CoreError> {
    if WEIGHT_OPTIONS.contains(&weight) {
        Ok(())
    } else {
        Err(CoreError::invalid(
            "weight",
            format!("Peso inválido: {weight}%. Debe ser uno de: 5, 10, 15, 20, 25."),
        ))
    }
}

/// Sum of item weights, skipping `excluded_item_id` when given.
pub fn weight_total(items: &[WeightedItem], excluded_item_id: Option<DbId>) -> i32 {
    items
        .iter()
        .filter(|item| Some(item.id) != excluded_item_id)
        .map(|item| i32::from(item.weight))
        .sum()
}

/// Check that writing an item with `candidate_weight` keeps the plan within budget.
///
/// `existing_items` are all items currently stored for the plan. On update,
/// pass the id of the item being replaced as `excluded_item_id` so its old
/// weight is not counted twice.
pub fn validate_weight_budget(
    existing_items: &[WeightedItem],
    candidate_weight: i16,
    excluded_item_id: Option<DbId>,
) -> Result<(), OverBudgetError> {
    let current_total = weight_total(existing_items, excluded_item_id);
    let attempted_weight = i32::from(candidate_weight);

    if current_total + attempted_weight > WEIGHT_BUDGET {
        return Err(OverBudgetError {
            attempted_weight,
            current_total,
            remaining: (WEIGHT_BUDGET - current_total).max(0),
        });
    }
    Ok(())
}

/// Fail-fast export check: weight sum first, then objective coverage.
pub fn can_export(items: &[ExportItem]) -> Result<(), ExportBlockedError> {
    match export_violations(items).into_iter().next() {
        Some(violation) => Err(violation),
        None => Ok(()),
    }
}

/// Every reason the plan cannot be exported, in the order [`can_export`] checks them.
pub fn export_violations(items: &[ExportItem]) -> Vec<ExportBlockedError> {
    let mut violations = Vec::new();

    let current_total: i32 = items.iter().map(|item| i32::from(item.weight)).sum();
    if current_total != WEIGHT_BUDGET {
        violations.push(ExportBlockedError::IncompleteWeight { current_total });
    }

    let item_descriptions: Vec<String> = items
        .iter()
        .filter(|item| item.objective_count == 0)
        .map(|item| format!("#{} {}", item.id, item.description))
        .collect();
    if !item_descriptions.is_empty() {
        violations.push(ExportBlockedError::MissingObjectives { item_descriptions });
    }

    violations
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn items(weights: &[i16]) -> Vec<WeightedItem> {
        weights
            .iter()
            .enumerate()
            .map(|(i, &weight)| WeightedItem {
                id: i as DbId + 1,
                weight,
            })
            .collect()
    }

    fn export_items(weights: &[i16], objectives: &[usize]) -> Vec<ExportItem> {
        weights
            .iter()
            .zip(objectives)
            .enumerate()
            .map(|(i, (&weight, &objective_count))| ExportItem {
                id: i as DbId + 1,
                weight,
                description: format!("item {}", i + 1),
                objective_count,
            })
            .collect()
    }

    // -- budget --------------------------------------------------------------

    #[test]
    fn accepts_exactly_full_budget() {
        assert!(validate_weight_budget(&items(&[25, 25, 25]), 25, None).is_ok());
    }

    #[test]
    fn rejects_over_budget_with_details() {
        let err = validate_weight_budget(&items(&[25, 25, 25, 20]), 10, None).unwrap_err();
        assert_eq!(
            err,
            OverBudgetError {
                attempted_weight: 10,
                current_total: 95,
                remaining: 5,
            }
        );
    }

    #[test]
    fn update_excludes_the_replaced_item() {
        let existing = items(&[25, 25, 25, 25]);
        // Replacing item 4 (25) with 20 is fine; counting it twice would not be.
        assert!(validate_weight_budget(&existing, 20, Some(4)).is_ok());
        assert!(validate_weight_budget(&existing, 20, None).is_err());
    }

    #[test]
    fn running_sum_never_exceeds_budget() {
        let mut stored: Vec<WeightedItem> = Vec::new();
        let mut next_id = 1;
        for &w in &[25, 10, 20, 25, 15, 25, 5, 10, 5, 20] {
            if validate_weight_budget(&stored, w, None).is_ok() {
                stored.push(WeightedItem { id: next_id, weight: w });
                next_id += 1;
            }
            assert!(weight_total(&stored, None) <= WEIGHT_BUDGET);
        }
        assert_eq!(weight_total(&stored, None), 100);
    }

    #[test]
    fn weight_options() {
        for w in WEIGHT_OPTIONS {
            assert!(validate_weight_option(*w).is_ok());
        }
        assert_matches!(
            validate_weight_option(30),
            Err(CoreError::InvalidField { field: "weight", .. })
        );
        assert!(validate_weight_option(0).is_err());
        assert!(validate_weight_option(DEFAULT_WEIGHT).is_ok());
    }

    // -- export gate ---------------------------------------------------------

    #[test]
    fn export_allowed_when_complete_and_covered() {
        assert!(can_export(&export_items(&[40, 35, 25], &[1, 1, 1])).is_ok());
    }

    #[test]
    fn export_blocked_on_incomplete_weight() {
        assert_eq!(
            can_export(&export_items(&[40, 35, 20], &[1, 1, 1])),
            Err(ExportBlockedError::IncompleteWeight { current_total: 95 })
        );
        assert_eq!(
            can_export(&[]),
            Err(ExportBlockedError::IncompleteWeight { current_total: 0 })
        );
    }

    #[test]
    fn export_blocked_on_items_without_objectives() {
        let result = can_export(&export_items(&[40, 35, 25], &[1, 0, 0]));
        assert_matches!(
            result,
            Err(ExportBlockedError::MissingObjectives { item_descriptions })
                if item_descriptions == vec!["#2 item 2".to_string(), "#3 item 3".to_string()]
        );
    }

    #[test]
    fn can_export_fails_fast_on_weight() {
        let items = export_items(&[40, 20], &[0, 0]);
        assert_matches!(can_export(&items), Err(ExportBlockedError::IncompleteWeight { .. }));
        assert_eq!(export_violations(&items).len(), 2);
    }

    #[test]
    fn blocked_error_serializes_with_kind_tag() {
        let json = serde_json::to_value(ExportBlockedError::IncompleteWeight { current_total: 80 })
            .unwrap();
        assert_eq!(json["kind"], "incomplete_weight");
        assert_eq!(json["current_total"], 80);
    }
}
