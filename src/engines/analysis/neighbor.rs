use crate::{
    error::{Result, SpinbiasError},
    types::{ensure_sequence, NeighborStats, Symbol, SYMBOL_COUNT},
};

pub const DEFAULT_RADIUS: usize = 3;

/// Circular symbol ordering with O(1) position lookup.
#[derive(Debug, Clone)]
pub struct CircularLayout {
    order: Vec<Symbol>,
    positions: [Option<usize>; SYMBOL_COUNT],
}

impl CircularLayout {
    pub fn new(order: &[Symbol]) -> Result<Self> {
        if order.is_empty() {
            return Err(SpinbiasError::Validation(
                "Circular layout must not be empty".to_string(),
            ));
        }

        let mut positions = [None; SYMBOL_COUNT];
        for (position, &symbol) in order.iter().enumerate() {
            let slot = positions.get_mut(symbol as usize).ok_or_else(|| {
                SpinbiasError::Validation(format!("Layout symbol {} is outside 0..=36", symbol))
            })?;
            if slot.is_some() {
                return Err(SpinbiasError::Validation(format!(
                    "Layout symbol {} appears more than once",
                    symbol
                )));
            }
            *slot = Some(position);
        }

        Ok(Self {
            order: order.to_vec(),
            positions,
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn position(&self, symbol: Symbol) -> Option<usize> {
        self.positions.get(symbol as usize).copied().flatten()
    }

    /// Symbols at offsets ±1..=±radius around `symbol`, `None` when the
    /// symbol is not on the layout.
    pub fn neighbors(&self, symbol: Symbol, radius: usize) -> Option<Vec<Symbol>> {
        let position = self.position(symbol)?;
        let len = self.order.len();

        let neighbors = (1..=radius)
            .flat_map(|offset| {
                let offset = offset % len;
                [(position + len - offset) % len, (position + offset) % len]
            })
            .map(|p| self.order[p])
            .collect();

        Some(neighbors)
    }

    pub fn is_neighbor(&self, symbol: Symbol, candidate: Symbol, radius: usize) -> bool {
        self.neighbors(symbol, radius)
            .map(|n| n.contains(&candidate))
            .unwrap_or(false)
    }
}

/// Whether each next spin landed within `radius` pockets of the previous one.
pub fn compute_neighbor_match(
    sequence: &[Symbol],
    circular_layout: &[Symbol],
    radius: usize,
) -> Result<NeighborStats> {
    let layout = CircularLayout::new(circular_layout)?;
    compute_with_layout(sequence, &layout, radius)
}

pub fn compute_with_layout(
    sequence: &[Symbol],
    layout: &CircularLayout,
    radius: usize,
) -> Result<NeighborStats> {
    if radius == 0 {
        return Err(SpinbiasError::Configuration(
            "Neighbor radius must be at least 1".to_string(),
        ));
    }
    ensure_sequence(sequence)?;

    let mut stats = NeighborStats::default();
    for pair in sequence.windows(2) {
        if layout.is_neighbor(pair[0], pair[1], radius) {
            stats.matches += 1;
        } else {
            stats.non_matches += 1;
        }
    }

    Ok(stats)
}
