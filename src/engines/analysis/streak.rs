use crate::{
    error::{Result, SpinbiasError},
    types::{ensure_sequence, BoundaryMode, Group, Run, StreakStats, Symbol},
};
use std::collections::{HashMap, HashSet};

/// First group in priority order that contains `symbol`.
pub fn resolve_owner(symbol: Symbol, ordered_groups: &[Group]) -> Option<usize> {
    ordered_groups.iter().position(|g| g.contains(symbol))
}

/// Split the sequence into maximal runs, resolving overlaps first-match-wins.
pub fn detect_runs(sequence: &[Symbol], ordered_groups: &[Group]) -> Result<Vec<Run>> {
    ensure_sequence(sequence)?;
    ensure_unique_names(ordered_groups)?;

    let mut runs = Vec::new();
    // (group index, start, length)
    let mut current: Option<(usize, usize, usize)> = None;

    for (i, &symbol) in sequence.iter().enumerate() {
        match (resolve_owner(symbol, ordered_groups), current) {
            (Some(owner), Some((group, start, length))) if owner == group => {
                current = Some((group, start, length + 1));
            }
            (Some(owner), open) => {
                if let Some(run) = open {
                    runs.push(close_run(run, ordered_groups));
                }
                current = Some((owner, i, 1));
            }
            (None, open) => {
                if let Some(run) = open {
                    runs.push(close_run(run, ordered_groups));
                }
                current = None;
            }
        }
    }

    if let Some(run) = current {
        runs.push(close_run(run, ordered_groups));
    }

    Ok(runs)
}

/// Run lengths and summary statistics for every group in `ordered_groups`.
pub fn compute_streaks(
    sequence: &[Symbol],
    ordered_groups: &[Group],
) -> Result<HashMap<String, StreakStats>> {
    let runs = detect_runs(sequence, ordered_groups)?;

    let mut lengths: HashMap<String, Vec<usize>> = ordered_groups
        .iter()
        .map(|g| (g.name().to_string(), Vec::new()))
        .collect();
    for run in runs {
        lengths.entry(run.group_name).or_default().push(run.length);
    }

    let stats = lengths
        .into_iter()
        .map(|(name, runs)| (name, StreakStats::from_runs(runs)))
        .collect();

    Ok(stats)
}

/// Split groups into families of mutually disjoint groups, in order. Each
/// group joins the first family it shares no symbol with, so a later group
/// is never shadowed by an earlier overlapping one.
pub fn disjoint_families(groups: &[Group]) -> Vec<Vec<Group>> {
    let mut families: Vec<Vec<Group>> = Vec::new();

    for group in groups {
        let home = families.iter_mut().find(|family| {
            family
                .iter()
                .all(|member| member.members().is_disjoint(group.members()))
        });
        match home {
            Some(family) => family.push(group.clone()),
            None => families.push(vec![group.clone()]),
        }
    }

    families
}

/// Streaks for every group, each resolved within its disjoint family.
pub fn compute_family_streaks(
    sequence: &[Symbol],
    groups: &[Group],
) -> Result<HashMap<String, StreakStats>> {
    ensure_unique_names(groups)?;

    let mut stats = HashMap::with_capacity(groups.len());
    for family in disjoint_families(groups) {
        stats.extend(compute_streaks(sequence, &family)?);
    }
    Ok(stats)
}

impl StreakStats {
    pub fn from_runs(runs: Vec<usize>) -> Self {
        let run_count = runs.len();
        let avg_run_length = if run_count > 0 {
            runs.iter().sum::<usize>() as f64 / run_count as f64
        } else {
            0.0
        };

        Self {
            run_count,
            total_after_first: run_count.saturating_sub(1),
            avg_run_length,
            runs,
        }
    }

    pub fn longest(&self) -> usize {
        self.runs.iter().copied().max().unwrap_or(0)
    }
}

/// Each maximal in-group run, optionally with the out-of-group symbol
/// before and/or after it. Sequence edges add nothing.
pub fn bridging_subsequences(
    group: &Group,
    sequence: &[Symbol],
    boundary: BoundaryMode,
) -> Result<Vec<Vec<Symbol>>> {
    ensure_sequence(sequence)?;

    let n = sequence.len();
    let mut subsequences = Vec::new();
    let mut i = 0;

    while i < n {
        if !group.contains(sequence[i]) {
            i += 1;
            continue;
        }

        let start = i;
        while i < n && group.contains(sequence[i]) {
            i += 1;
        }
        let end = i;

        let from = if boundary.leading() && start > 0 { start - 1 } else { start };
        let to = if boundary.trailing() && end < n { end + 1 } else { end };
        subsequences.push(sequence[from..to].to_vec());
    }

    Ok(subsequences)
}

fn close_run((group, start, length): (usize, usize, usize), groups: &[Group]) -> Run {
    Run {
        group_name: groups[group].name().to_string(),
        start_index: start,
        length,
    }
}

fn ensure_unique_names(groups: &[Group]) -> Result<()> {
    let mut seen = HashSet::new();
    for group in groups {
        if !seen.insert(group.name()) {
            return Err(SpinbiasError::Validation(format!(
                "Group '{}' listed twice in priority order",
                group.name()
            )));
        }
    }
    Ok(())
}
