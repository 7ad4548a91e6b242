//! Least-loaded assignment policy.

use super::{LoadLedger, Member, MemberId, Team};

/// Picks the member that should receive one more task.
///
/// Only members whose load would stay within capacity after receiving the
/// task are eligible. Among those the strictly smallest load wins and ties
/// go to the member declared first in the team. `exclude` removes the
/// current holder from candidacy. Returns `None` when nobody qualifies.
#[must_use]
pub fn select_target<'team>(
    team: &'team Team,
    ledger: &LoadLedger,
    exclude: Option<MemberId>,
) -> Option<&'team Member> {
    let mut best: Option<(&Member, u32)> = None;
    for member in team.members() {
        if exclude == Some(member.id()) {
            continue;
        }
        let load = ledger.load_of(member.id());
        if !member.capacity().admits_one_more(load) {
            continue;
        }
        match best {
            Some((_, best_load)) if best_load <= load => {}
            _ => best = Some((member, load)),
        }
    }
    best.map(|(member, _)| member)
}
