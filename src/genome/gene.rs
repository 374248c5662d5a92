use crate::error::{GeneticError, Result};

/// The concrete kind of a [`Gene`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneKind {
    Scalar,
    Integer,
}

/// The smallest mutable unit of a genome.
///
/// A gene's kind is fixed when it is created. [`Gene::copy_from`] only accepts a peer of
/// the same kind, and the operators match on the kind before touching a value.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gene {
    /// A floating-point gene. Model parameters are always encoded as this kind.
    Scalar(f64),
    Integer(i64),
}

impl Gene {
    pub fn kind(&self) -> GeneKind {
        match self {
            Gene::Scalar(_) => GeneKind::Scalar,
            Gene::Integer(_) => GeneKind::Integer,
        }
    }

    /// The gene's value as an `f64`.
    pub fn value(&self) -> f64 {
        match *self {
            Gene::Scalar(v) => v,
            Gene::Integer(v) => v as f64,
        }
    }

    /// Overwrites this gene's value with `other`'s.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::GeneKindMismatch`] if the kinds differ; the gene is left
    /// unchanged.
    pub fn copy_from(&mut self, other: &Gene) -> Result<()> {
        match (self, other) {
            (Gene::Scalar(dst), Gene::Scalar(src)) => *dst = *src,
            (Gene::Integer(dst), Gene::Integer(src)) => *dst = *src,
            (dst, src) => {
                return Err(GeneticError::GeneKindMismatch {
                    expected: dst.kind(),
                    actual: src.kind(),
                })
            }
        }
        Ok(())
    }
}
