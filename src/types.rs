use crate::error::{Result, SpinbiasError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One roulette outcome, 0..=36.
pub type Symbol = u8;

pub const MAX_SYMBOL: Symbol = 36;
pub const SYMBOL_COUNT: usize = MAX_SYMBOL as usize + 1;

pub fn is_valid_symbol(value: i64) -> bool {
    (0..=MAX_SYMBOL as i64).contains(&value)
}

/// Reject the first sequence element outside 0..=36.
pub fn ensure_sequence(sequence: &[Symbol]) -> Result<()> {
    match sequence.iter().position(|&s| s > MAX_SYMBOL) {
        Some(index) => Err(SpinbiasError::Data {
            index,
            value: sequence[index] as i64,
        }),
        None => Ok(()),
    }
}

/// Named subset of symbols. Construct through [`Group::new`] so the
/// name and member invariants always hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    name: String,
    members: BTreeSet<Symbol>,
}

impl Group {
    pub fn new<I>(name: &str, members: I) -> Result<Self>
    where
        I: IntoIterator<Item = i64>,
    {
        let name = name.trim();
        if name.is_empty() {
            return Err(SpinbiasError::Validation(
                "Group name must not be blank".to_string(),
            ));
        }

        let mut set = BTreeSet::new();
        for member in members {
            if !is_valid_symbol(member) {
                return Err(SpinbiasError::Validation(format!(
                    "Group '{}' member {} is outside 0..=36",
                    name, member
                )));
            }
            set.insert(member as Symbol);
        }

        Ok(Self {
            name: name.to_string(),
            members: set,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &BTreeSet<Symbol> {
        &self.members
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.members.contains(&symbol)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Serialized form of a group, used by config and registry files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSpec {
    pub name: String,
    pub members: Vec<i64>,
}

impl TryFrom<GroupSpec> for Group {
    type Error = SpinbiasError;

    fn try_from(spec: GroupSpec) -> Result<Self> {
        Group::new(&spec.name, spec.members)
    }
}

impl From<&Group> for GroupSpec {
    fn from(group: &Group) -> Self {
        Self {
            name: group.name.clone(),
            members: group.members.iter().map(|&s| s as i64).collect(),
        }
    }
}

/// Maximal span of consecutive indices resolved to one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub group_name: String,
    pub start_index: usize,
    pub length: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreakStats {
    pub runs: Vec<usize>,
    pub run_count: usize,
    pub total_after_first: usize,
    pub avg_run_length: f64,
}

/// Which out-of-group neighbours a bridging subsequence keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundaryMode {
    None,
    Leading,
    #[default]
    Trailing,
    Both,
}

impl BoundaryMode {
    pub fn leading(self) -> bool {
        matches!(self, Self::Leading | Self::Both)
    }

    pub fn trailing(self) -> bool {
        matches!(self, Self::Trailing | Self::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TriplePolicy {
    /// Every window start is evaluated, triples may overlap.
    #[default]
    Overlapping,
    /// A successful triple consumes all three symbols before scanning resumes.
    Consume,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InvalidSymbolPolicy {
    #[default]
    Reject,
    Skip,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairStats {
    pub doubles: usize,
    pub failed_doubles: usize,
    pub triples: usize,
    pub failed_triples: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossFollowStats {
    pub a_follows_b: usize,
    pub b_follows_a: usize,
    pub a_not_follows_b: usize,
    pub b_not_follows_a: usize,
}

/// Buckets for the first two symbols of a subsequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedMembership {
    pub a_then_b: usize,
    pub b_then_a: usize,
    pub a_then_a: usize,
    pub b_then_b: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborStats {
    pub matches: usize,
    pub non_matches: usize,
}

/// One simulated bet: the symbols it covers and its base stake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetDefinition {
    pub target_set: BTreeSet<Symbol>,
    pub base_amount: f64,
}

impl BetDefinition {
    pub fn new<I>(targets: I, base_amount: f64) -> Self
    where
        I: IntoIterator<Item = Symbol>,
    {
        Self {
            target_set: targets.into_iter().collect(),
            base_amount,
        }
    }

    pub fn on_group(group: &Group, base_amount: f64) -> Self {
        Self {
            target_set: group.members().clone(),
            base_amount,
        }
    }
}

/// Ledger entry for one spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub index: usize,
    pub symbol: Symbol,
    pub amount_at_risk: f64,
    pub delta: f64,
    pub balance: f64,
    pub cumulative_profit: f64,
    pub cumulative_loss: f64,
    pub bet_deltas: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WagerOutcome {
    pub final_balance: f64,
    pub history: Vec<f64>,
    pub ledger: Vec<RoundRecord>,
}
