use crate::{
    error::Result,
    groups::presets::dozen_of,
    types::{ensure_sequence, Group, Symbol, SYMBOL_COUNT},
};

/// Hits per group. A symbol counts toward every group that contains it.
pub fn count_by_group(sequence: &[Symbol], groups: &[Group]) -> Result<Vec<(String, usize)>> {
    ensure_sequence(sequence)?;

    Ok(groups
        .iter()
        .map(|g| {
            let count = sequence.iter().filter(|&&s| g.contains(s)).count();
            (g.name().to_string(), count)
        })
        .collect())
}

pub fn occurrences(sequence: &[Symbol], symbol: Symbol) -> usize {
    sequence.iter().filter(|&&s| s == symbol).count()
}

/// (spins inside the group, total spins)
pub fn total_matches(sequence: &[Symbol], group: &Group) -> (usize, usize) {
    let matches = sequence.iter().filter(|&&s| group.contains(s)).count();
    (matches, sequence.len())
}

pub fn dozen_counts(sequence: &[Symbol]) -> [usize; 3] {
    let mut counts = [0; 3];
    for dozen in sequence.iter().filter_map(|&s| dozen_of(s)) {
        counts[dozen] += 1;
    }
    counts
}

/// Occurrence count for every symbol 0..=36.
pub fn histogram(sequence: &[Symbol]) -> Result<[usize; SYMBOL_COUNT]> {
    ensure_sequence(sequence)?;

    let mut counts = [0; SYMBOL_COUNT];
    for &s in sequence {
        counts[s as usize] += 1;
    }
    Ok(counts)
}
