use crate::error::{Result, SpinbiasError};
use crate::types::{is_valid_symbol, InvalidSymbolPolicy, Symbol};
use serde::{Deserialize, Serialize};

/// Recorded spins in order. Appends and undo mirror a live logger; the
/// analyzers only ever see `as_slice()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinSequence {
    spins: Vec<Symbol>,
}

impl SpinSequence {
    pub fn new() -> Self {
        Self { spins: Vec::new() }
    }

    /// Convert raw values, rejecting or skipping anything outside 0..=36.
    pub fn from_raw(raw: &[i64], policy: InvalidSymbolPolicy) -> Result<Self> {
        let mut spins = Vec::with_capacity(raw.len());
        let mut skipped = 0;

        for (index, &value) in raw.iter().enumerate() {
            if is_valid_symbol(value) {
                spins.push(value as Symbol);
                continue;
            }
            match policy {
                InvalidSymbolPolicy::Reject => {
                    return Err(SpinbiasError::Data { index, value });
                }
                InvalidSymbolPolicy::Skip => skipped += 1,
            }
        }

        if skipped > 0 {
            log::warn!("Skipped {} spins outside 0..=36", skipped);
        }

        Ok(Self { spins })
    }

    pub fn push(&mut self, value: i64) -> Result<()> {
        if !is_valid_symbol(value) {
            return Err(SpinbiasError::Validation(format!(
                "Spin {} is outside 0..=36",
                value
            )));
        }
        self.spins.push(value as Symbol);
        Ok(())
    }

    /// Remove the most recent spin.
    pub fn undo(&mut self) -> Option<Symbol> {
        self.spins.pop()
    }

    pub fn as_slice(&self) -> &[Symbol] {
        &self.spins
    }

    pub fn len(&self) -> usize {
        self.spins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spins.is_empty()
    }

    pub fn last(&self) -> Option<Symbol> {
        self.spins.last().copied()
    }

    /// Most recent first, as the logger history displays it.
    pub fn recent(&self, count: usize) -> Vec<Symbol> {
        self.spins.iter().rev().take(count).copied().collect()
    }
}

impl AsRef<[Symbol]> for SpinSequence {
    fn as_ref(&self) -> &[Symbol] {
        &self.spins
    }
}

/// Drop out-of-range symbols from an already typed sequence under `Skip`,
/// or fail on the first one under `Reject`.
pub fn apply_policy(sequence: &[Symbol], policy: InvalidSymbolPolicy) -> Result<Vec<Symbol>> {
    let raw: Vec<i64> = sequence.iter().map(|&s| s as i64).collect();
    Ok(SpinSequence::from_raw(&raw, policy)?.spins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_reports_index() {
        let err = SpinSequence::from_raw(&[1, 2, -3, 40], InvalidSymbolPolicy::Reject).unwrap_err();
        assert!(matches!(err, SpinbiasError::Data { index: 2, value: -3 }));
    }

    #[test]
    fn test_skip_drops_invalid() {
        let seq = SpinSequence::from_raw(&[1, 2, -3, 40, 36], InvalidSymbolPolicy::Skip).unwrap();
        assert_eq!(seq.as_slice(), &[1, 2, 36]);
    }

    #[test]
    fn test_push_and_undo() {
        let mut seq = SpinSequence::new();
        seq.push(5).unwrap();
        seq.push(17).unwrap();
        assert!(seq.push(37).is_err());
        assert_eq!(seq.recent(5), vec![17, 5]);
        assert_eq!(seq.undo(), Some(17));
        assert_eq!(seq.last(), Some(5));
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn test_apply_policy() {
        assert_eq!(apply_policy(&[1, 50, 2], InvalidSymbolPolicy::Skip).unwrap(), vec![1, 2]);
        assert!(apply_policy(&[1, 50], InvalidSymbolPolicy::Reject).is_err());
    }
}
