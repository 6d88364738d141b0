//! Net balance computation for shared-expense groups.

use crate::errors::{Result, TrackerError};

use super::group::{Expense, Settlement};

/// A member's net position: positive means the member is owed money,
/// negative means the member owes money.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberBalance {
    pub member: String,
    pub amount: f64,
}

/// Computes every member's net balance as a pure fold over the group's
/// expenses and settlements.
///
/// The result keeps the declared member order. Names referenced by an expense
/// or settlement but absent from `members` are tolerated: they get their own
/// entry appended after the roster in first-seen order instead of being
/// dropped or merged. Expense shares are always split over the declared
/// roster only.
///
/// Applying the same expenses and settlements in any order yields the same
/// balances, and every individual operation redistributes value without
/// creating or destroying it, so roster-only ledgers always sum to zero.
pub fn compute_balances(
    members: &[String],
    expenses: &[Expense],
    settlements: &[Settlement],
) -> Result<Vec<MemberBalance>> {
    if members.is_empty() {
        return Err(TrackerError::InvalidGroupState(
            "cannot compute balances for a group with no members".into(),
        ));
    }

    let mut balances: Vec<MemberBalance> = members
        .iter()
        .map(|member| MemberBalance {
            member: member.clone(),
            amount: 0.0,
        })
        .collect();
    let roster_len = members.len();
    let share_divisor = roster_len as f64;

    for expense in expenses {
        let share = expense.amount / share_divisor;
        for balance in balances.iter_mut().take(roster_len) {
            balance.amount -= share;
        }
        *entry(&mut balances, &expense.payer) += expense.amount;
    }

    for settlement in settlements {
        *entry(&mut balances, &settlement.from) += settlement.amount;
        *entry(&mut balances, &settlement.to) -= settlement.amount;
    }

    Ok(balances)
}

/// Looks up a member's balance by name.
pub fn balance_of(balances: &[MemberBalance], member: &str) -> Option<f64> {
    balances
        .iter()
        .find(|balance| balance.member == member)
        .map(|balance| balance.amount)
}

fn entry<'a>(balances: &'a mut Vec<MemberBalance>, name: &str) -> &'a mut f64 {
    let index = match balances.iter().position(|b| b.member == name) {
        Some(index) => index,
        None => {
            balances.push(MemberBalance {
                member: name.to_string(),
                amount: 0.0,
            });
            balances.len() - 1
        }
    };
    &mut balances[index].amount
}
