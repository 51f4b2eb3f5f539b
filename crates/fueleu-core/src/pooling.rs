use crate::types::{PoolAllocation, PoolMemberInput};

/// Reallocate CB inside a pool from surplus members to deficit members.
///
/// Allocation policy, in order of precedence:
/// 1. surplus members act in descending order of CB (largest first);
/// 2. during one surplus member's turn, deficits are serviced from the most
///    negative upwards;
/// 3. equal CB values keep their input order.
///
/// Each transfer is `min(surplus remaining, deficit magnitude)`, so no
/// surplus member ends below zero and no deficit member ends above zero.
/// Members with CB exactly zero (or NaN) are left untouched. The result has
/// one allocation per input member, in input order, and
/// `Σ cb_after == Σ cb_before` up to floating-point rounding.
///
/// The policy is greedy, not proportional: when total surplus is short,
/// the largest deficits are closed first and smaller ones may get nothing.
pub fn create_pool(members: &[PoolMemberInput]) -> Vec<PoolAllocation> {
    let mut allocations: Vec<PoolAllocation> = members
        .iter()
        .map(|member| PoolAllocation {
            ship_id: member.ship_id.clone(),
            cb_before: member.cb,
            cb_after: member.cb,
        })
        .collect();

    let mut surplus: Vec<usize> = (0..allocations.len())
        .filter(|&i| allocations[i].cb_before > 0.0)
        .collect();
    let mut deficit: Vec<usize> = (0..allocations.len())
        .filter(|&i| allocations[i].cb_before < 0.0)
        .collect();

    // `sort_by` is stable, which pins the tie-break to input order.
    surplus.sort_by(|&a, &b| allocations[b].cb_before.total_cmp(&allocations[a].cb_before));
    deficit.sort_by(|&a, &b| allocations[a].cb_before.total_cmp(&allocations[b].cb_before));

    let (mut s, mut d) = (0, 0);
    while s < surplus.len() && d < deficit.len() {
        let (giver, taker) = (surplus[s], deficit[d]);
        let give = allocations[giver]
            .cb_after
            .min(-allocations[taker].cb_after);

        allocations[giver].cb_after -= give;
        allocations[taker].cb_after += give;

        // Negated comparisons so a NaN remainder also advances the cursor.
        if !(allocations[giver].cb_after > 0.0) {
            s += 1;
        }
        if !(allocations[taker].cb_after < 0.0) {
            d += 1;
        }
    }

    allocations
}

/// Pool total before reallocation.
pub fn pool_total_before(allocations: &[PoolAllocation]) -> f64 {
    allocations.iter().fold(0.0, |acc, a| acc + a.cb_before)
}

/// Pool total after reallocation; equal to [`pool_total_before`].
pub fn pool_total_after(allocations: &[PoolAllocation]) -> f64 {
    allocations.iter().fold(0.0, |acc, a| acc + a.cb_after)
}
