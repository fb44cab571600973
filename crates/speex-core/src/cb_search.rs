//! Innovation (fixed codebook) search
//!
//! The split-shape search cuts the subframe target into sub-vectors and
//! runs a beam search over them: each surviving path keeps its own residual
//! target, and the codeword chosen for one sub-vector is convolved with the
//! impulse response and removed from the rest of that path's target before
//! the next sub-vector is searched.

use crate::bits::Bits;
use crate::filters::{residue_percep_zero16, syn_percep_zero16};
use crate::ltp::SubframeFilters;
use crate::vq::{vq_nbest, vq_nbest_sign};
use rand::rngs::SmallRng;
use rand::Rng;

const SHAPE_SCALE: f32 = 0.03125;

/// Shape codebook parameters
#[derive(Debug, Clone, Copy)]
pub struct SplitCbParams {
    /// Samples per sub-vector
    pub subvect_size: usize,
    /// Sub-vectors per subframe
    pub nb_subvect: usize,
    /// Shape codebook, `subvect_size` values per entry
    pub shape_cb: &'static [i8],
    /// Bits of a shape index
    pub shape_bits: u32,
    /// Whether each index carries an extra sign bit
    pub have_sign: bool,
}

impl SplitCbParams {
    fn entries(&self) -> usize {
        1 << self.shape_bits
    }

    fn index_bits(&self) -> u32 {
        self.shape_bits + u32::from(self.have_sign)
    }

    /// Signed, scaled codeword for a possibly sign-extended index
    fn codeword(&self, index: usize) -> (f32, &'static [i8]) {
        let (sign, row) = if index >= self.entries() {
            (-1.0, index - self.entries())
        } else {
            (1.0, index)
        };
        let start = row * self.subvect_size;
        (sign * SHAPE_SCALE, &self.shape_cb[start..start + self.subvect_size])
    }
}

/// Innovation coder family
#[derive(Debug, Clone, Copy)]
pub enum Innovation {
    /// Split-shape codebook search
    SplitShape(SplitCbParams),
    /// Perceptually shaped noise, nothing transmitted
    Noise,
}

/// Uniform noise with standard deviation `std`
pub fn white_noise(std: f32, rng: &mut SmallRng) -> f32 {
    3.4642 * std * (rng.gen::<f32>() - 0.5)
}

impl Innovation {
    /// Bits written per subframe
    pub fn bits_per_subframe(&self) -> usize {
        match self {
            Self::SplitShape(p) => p.nb_subvect * p.index_bits() as usize,
            Self::Noise => 0,
        }
    }

    /// Search the innovation for `target` and add it to `exc`
    ///
    /// With `update_target` the filtered innovation is removed from
    /// `target`, so a second search can refine what is left.
    pub fn quant(
        &self,
        target: &mut [f32],
        filters: &SubframeFilters<'_>,
        exc: &mut [f32],
        complexity: i32,
        update_target: bool,
        bits: &mut Bits,
    ) {
        match self {
            Self::SplitShape(params) => {
                split_cb_search(target, filters, params, exc, complexity, update_target, bits)
            }
            Self::Noise => {
                let mut tmp = target.to_vec();
                residue_percep_zero16(&mut tmp, filters.ak, filters.awk1, filters.awk2);
                for (e, t) in exc.iter_mut().zip(&tmp) {
                    *e += t;
                }
                target.iter_mut().for_each(|t| *t = 0.0);
            }
        }
    }

    /// Decode an innovation into `exc`
    ///
    /// The shape variant adds to `exc`, the noise variant overwrites it.
    pub fn unquant(&self, exc: &mut [f32], bits: &mut Bits, rng: &mut SmallRng) {
        match self {
            Self::SplitShape(params) => {
                let mut indices = Vec::with_capacity(params.nb_subvect);
                for _ in 0..params.nb_subvect {
                    let negative = params.have_sign && bits.unpack(1) == 1;
                    let row = bits.unpack(params.shape_bits) as usize;
                    indices.push(if negative { row + params.entries() } else { row });
                }
                for (chunk, &index) in exc.chunks_mut(params.subvect_size).zip(&indices) {
                    let (scale, row) = params.codeword(index);
                    for (e, &c) in chunk.iter_mut().zip(row) {
                        *e += scale * f32::from(c);
                    }
                }
            }
            Self::Noise => {
                for e in exc.iter_mut() {
                    *e = white_noise(1.0, rng);
                }
            }
        }
    }
}

/// Filtered response and energy of every codeword
fn weighted_codebook(params: &SplitCbParams, r: &[f32]) -> (Vec<f32>, Vec<f32>) {
    let sv = params.subvect_size;
    let mut resp = vec![0.0f32; params.entries() * sv];
    let mut energy = vec![0.0f32; params.entries()];
    for (i, (shape, res)) in params
        .shape_cb
        .chunks_exact(sv)
        .zip(resp.chunks_exact_mut(sv))
        .enumerate()
    {
        let mut e = 0.0f32;
        for j in 0..sv {
            let acc: f32 = (0..=j).map(|k| f32::from(shape[k]) * r[j - k]).sum();
            res[j] = SHAPE_SCALE * acc;
            e += res[j] * res[j];
        }
        energy[i] = e;
    }
    (resp, energy)
}

#[derive(Clone)]
struct Path {
    target: Vec<f32>,
    indices: Vec<usize>,
    dist: f32,
}

fn split_cb_search(
    target: &mut [f32],
    filters: &SubframeFilters<'_>,
    params: &SplitCbParams,
    exc: &mut [f32],
    complexity: i32,
    update_target: bool,
    bits: &mut Bits,
) {
    let nsf = target.len();
    let sv = params.subvect_size;
    let r = filters.impulse;
    let n = ((2 * complexity.min(10)) / 3).max(1) as usize;

    let (resp, energy) = weighted_codebook(params, r);

    let mut paths = vec![
        Path {
            target: target.to_vec(),
            indices: vec![0; params.nb_subvect],
            dist: 0.0,
        };
        n
    ];

    for i in 0..params.nb_subvect {
        // (distance, index, source path), sorted by distance
        let mut next: Vec<(f32, usize, usize)> = Vec::with_capacity(n + 1);
        for (j, path) in paths.iter().enumerate() {
            let x = &path.target[i * sv..(i + 1) * sv];
            let tener = 0.5 * x.iter().map(|v| v * v).sum::<f32>();
            let best = if params.have_sign {
                vq_nbest_sign(x, &resp, &energy, n)
            } else {
                vq_nbest(x, &resp, &energy, n)
            };
            for &(dist, index) in best.as_slice() {
                let err = path.dist + dist + tener;
                let pos = next.partition_point(|&(d, _, _)| d <= err);
                if pos < n {
                    next.insert(pos, (err, index, j));
                    next.truncate(n);
                }
            }
            if i == 0 {
                break;
            }
        }

        let mut new_paths = Vec::with_capacity(n);
        for slot in 0..n {
            let (dist, index, source) = next.get(slot).copied().unwrap_or((f32::MAX, 0, 0));
            let mut path = paths[source].clone();
            path.dist = dist;
            path.indices[i] = index;
            let (scale, row) = params.codeword(index);
            let tail = (i + 1) * sv;
            for (m, &c) in row.iter().enumerate() {
                let g = scale * f32::from(c);
                let q = sv - m;
                for (k, t) in path.target[tail..].iter_mut().enumerate() {
                    *t -= g * r[q + k];
                }
            }
            new_paths.push(path);
        }
        paths = new_paths;
    }

    let mut e = vec![0.0f32; nsf];
    for (chunk, &index) in e.chunks_mut(sv).zip(&paths[0].indices) {
        bits.pack(index as u32, params.index_bits());
        let (scale, row) = params.codeword(index);
        for (v, &c) in chunk.iter_mut().zip(row) {
            *v = scale * f32::from(c);
        }
    }
    for (x, v) in exc.iter_mut().zip(&e) {
        *x += v;
    }

    if update_target {
        syn_percep_zero16(&mut e, filters.ak, filters.awk1, filters.awk2);
        for (t, v) in target.iter_mut().zip(&e) {
            *t -= v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::compute_impulse_response;
    use crate::tables::excitation::{EXC_10_16, EXC_5_64};
    use rand::SeedableRng;

    fn flat_filters(impulse: &mut [f32]) -> ([f32; 10], [f32; 10]) {
        let ak = [0.0f32; 10];
        compute_impulse_response(&ak, &ak, &ak, impulse);
        (ak, ak)
    }

    fn energy(x: &[f32]) -> f32 {
        x.iter().map(|v| v * v).sum()
    }

    #[test]
    fn test_split_search_reduces_error_and_decodes() {
        let params = SplitCbParams {
            subvect_size: 5,
            nb_subvect: 8,
            shape_cb: &EXC_5_64,
            shape_bits: 6,
            have_sign: false,
        };
        let innovation = Innovation::SplitShape(params);
        let mut impulse = [0.0f32; 40];
        let (ak, _) = flat_filters(&mut impulse);
        let filters = SubframeFilters {
            ak: &ak,
            awk1: &ak,
            awk2: &ak,
            impulse: &impulse,
        };

        let original: Vec<f32> = (0..40).map(|i| (i as f32 * 0.7).sin() * 2.0).collect();
        let mut target = original.clone();
        let mut exc = vec![0.0f32; 40];
        let mut bits = Bits::new();
        innovation.quant(&mut target, &filters, &mut exc, 4, true, &mut bits);
        assert_eq!(bits.bit_len(), innovation.bits_per_subframe());
        assert!(energy(&target) < energy(&original));

        let mut reader = Bits::from_bytes(&bits.to_bytes());
        let mut decoded = vec![0.0f32; 40];
        let mut rng = SmallRng::seed_from_u64(0);
        innovation.unquant(&mut decoded, &mut reader, &mut rng);
        for (a, b) in exc.iter().zip(&decoded) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_signed_search_uses_negated_codewords() {
        let params = SplitCbParams {
            subvect_size: 10,
            nb_subvect: 4,
            shape_cb: &EXC_10_16,
            shape_bits: 4,
            have_sign: true,
        };
        let innovation = Innovation::SplitShape(params);
        let mut impulse = [0.0f32; 40];
        let (ak, _) = flat_filters(&mut impulse);
        let filters = SubframeFilters {
            ak: &ak,
            awk1: &ak,
            awk2: &ak,
            impulse: &impulse,
        };

        let row: Vec<f32> = EXC_10_16[..10].iter().map(|&c| -SHAPE_SCALE * f32::from(c)).collect();
        let mut target: Vec<f32> = row.iter().cycle().take(40).copied().collect();
        let mut exc = vec![0.0f32; 40];
        let mut bits = Bits::new();
        innovation.quant(&mut target, &filters, &mut exc, 1, false, &mut bits);
        assert_eq!(bits.bit_len(), 20);

        let mut reader = Bits::from_bytes(&bits.to_bytes());
        assert_eq!(reader.unpack(1), 1);
        assert_eq!(reader.unpack(4), 0);
    }

    #[test]
    fn test_noise_innovation() {
        let mut impulse = [0.0f32; 40];
        let (ak, _) = flat_filters(&mut impulse);
        let filters = SubframeFilters {
            ak: &ak,
            awk1: &ak,
            awk2: &ak,
            impulse: &impulse,
        };
        let mut target = vec![1.0f32; 40];
        let mut exc = vec![0.0f32; 40];
        let mut bits = Bits::new();
        Innovation::Noise.quant(&mut target, &filters, &mut exc, 2, false, &mut bits);
        assert_eq!(bits.bit_len(), 0);
        assert!(target.iter().all(|&t| t == 0.0));
        assert!(exc.iter().all(|&e| (e - 1.0).abs() < 1e-4));

        let mut rng = SmallRng::seed_from_u64(3);
        let mut out = vec![0.0f32; 160];
        Innovation::Noise.unquant(&mut out, &mut bits, &mut rng);
        assert!(out.iter().all(|v| v.abs() <= 1.7322));
        let rms = (energy(&out) / 160.0).sqrt();
        assert!(rms > 0.7 && rms < 1.3);
    }
}
