//! Scalar and N-best vector quantization helpers

/// Index of the quantization cell containing `value`
///
/// `boundaries` holds the `entries - 1` decision thresholds in increasing
/// order.
pub fn scal_quant(value: f32, boundaries: &[f32], entries: usize) -> usize {
    let mut i = 0;
    while i + 1 < entries && value > boundaries[i] {
        i += 1;
    }
    i
}

/// Running list of the `n` smallest distances seen so far
///
/// Equal distances keep their arrival order.
#[derive(Debug, Clone)]
pub struct NBest {
    capacity: usize,
    entries: Vec<(f32, usize)>,
}

impl NBest {
    /// Empty list keeping at most `capacity` candidates
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Vec::with_capacity(capacity.max(1) + 1),
        }
    }

    /// Offer a candidate, returning whether it was kept
    pub fn offer(&mut self, dist: f32, index: usize) -> bool {
        let pos = self.entries.partition_point(|&(d, _)| d <= dist);
        if pos >= self.capacity {
            return false;
        }
        self.entries.insert(pos, (dist, index));
        self.entries.truncate(self.capacity);
        true
    }

    /// Candidates ordered by increasing distance
    pub fn as_slice(&self) -> &[(f32, usize)] {
        &self.entries
    }

    /// Best candidate, if any
    pub fn best(&self) -> Option<(f32, usize)> {
        self.entries.first().copied()
    }
}

/// N-best search over `codebook` rows of `input.len()` values
///
/// The distance is `0.5 * energy[i] - <input, row_i>`, which ranks rows the
/// same way as the squared error once the constant target energy is removed.
pub fn vq_nbest(input: &[f32], codebook: &[f32], energy: &[f32], n: usize) -> NBest {
    let len = input.len();
    let mut best = NBest::new(n);
    for (i, (row, &e)) in codebook.chunks_exact(len).zip(energy).enumerate() {
        let dot: f32 = input.iter().zip(row).map(|(a, b)| a * b).sum();
        best.offer(0.5 * e - dot, i);
    }
    best
}

/// Signed variant of [`vq_nbest`]
///
/// Each row may also be used negated. Negated rows are reported with
/// `entries` added to their index.
pub fn vq_nbest_sign(input: &[f32], codebook: &[f32], energy: &[f32], n: usize) -> NBest {
    let len = input.len();
    let entries = energy.len();
    let mut best = NBest::new(n);
    for (i, (row, &e)) in codebook.chunks_exact(len).zip(energy).enumerate() {
        let dot: f32 = input.iter().zip(row).map(|(a, b)| a * b).sum();
        let (dist, index) = if dot > 0.0 { (-dot, i) } else { (dot, i + entries) };
        best.offer(dist + 0.5 * e, index);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scal_quant_cells() {
        let bounds = [1.0f32, 2.0, 3.0];
        assert_eq!(scal_quant(0.5, &bounds, 4), 0);
        assert_eq!(scal_quant(1.0, &bounds, 4), 0);
        assert_eq!(scal_quant(1.5, &bounds, 4), 1);
        assert_eq!(scal_quant(10.0, &bounds, 4), 3);
    }

    #[test]
    fn test_nbest_keeps_smallest_in_order() {
        let mut best = NBest::new(2);
        assert!(best.offer(3.0, 0));
        assert!(best.offer(1.0, 1));
        assert!(!best.offer(5.0, 2));
        assert!(best.offer(1.0, 3));
        assert_eq!(best.as_slice(), &[(1.0, 1), (1.0, 3)]);
    }

    #[test]
    fn test_vq_nbest_finds_exact_row() {
        let codebook = [1.0f32, 0.0, 0.0, 1.0, 1.0, 1.0];
        let energy: Vec<f32> = codebook
            .chunks_exact(2)
            .map(|r| r.iter().map(|v| v * v).sum())
            .collect();
        let best = vq_nbest(&[0.0, 1.0], &codebook, &energy, 2);
        assert_eq!(best.best().map(|b| b.1), Some(1));
    }

    #[test]
    fn test_vq_nbest_sign_uses_negation() {
        let codebook = [1.0f32, 0.0, 0.0, 1.0];
        let energy = [1.0f32, 1.0];
        let best = vq_nbest_sign(&[0.0, -1.0], &codebook, &energy, 1);
        assert_eq!(best.best().map(|b| b.1), Some(3));
    }
}
