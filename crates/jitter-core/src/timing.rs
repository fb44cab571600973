//! Arrival-timing history and the optimal-delay estimate
//!
//! Every packet that reaches its playout slot (or arrives after it) leaves
//! one timing sample: how far ahead of its deadline it was, negative when
//! late. Samples go into the newest of three sub-windows; when that one has
//! seen `subwindow_size` samples the oldest sub-window is recycled. Each
//! sub-window only keeps its 40 earliest (most late) samples, sorted, since
//! the delay estimate never looks further.

use tracing::trace;

/// Samples kept per sub-window
pub const MAX_TIMINGS: usize = 40;
/// Number of sub-windows
pub const MAX_BUFFERS: usize = 3;
/// Latest samples examined by the delay estimate
pub const TOP_DELAY: usize = 40;

/// Round toward negative infinity to a multiple of `step`
pub fn round_down(x: i32, step: i32) -> i32 {
    if x < 0 {
        (x - step + 1) / step * step
    } else {
        x / step * step
    }
}

/// One sub-window of timing samples
#[derive(Debug, Clone, Default)]
pub struct TimingBuffer {
    timing: Vec<i32>,
    counts: Vec<u32>,
    curr_count: u32,
}

impl TimingBuffer {
    /// Empty sub-window
    pub fn new() -> Self {
        Self {
            timing: Vec::with_capacity(MAX_TIMINGS),
            counts: Vec::with_capacity(MAX_TIMINGS),
            curr_count: 0,
        }
    }

    /// Forget every sample
    pub fn clear(&mut self) {
        self.timing.clear();
        self.counts.clear();
        self.curr_count = 0;
    }

    /// Samples seen, including the ones not kept
    pub fn curr_count(&self) -> u32 {
        self.curr_count
    }

    /// Kept samples, earliest first
    pub fn timings(&self) -> &[i32] {
        &self.timing
    }

    /// Record one sample
    pub fn add(&mut self, timing: i32) {
        if self.timing.len() >= MAX_TIMINGS
            && self.timing.last().is_some_and(|&last| timing >= last)
        {
            self.curr_count += 1;
            return;
        }

        let pos = self.timing.partition_point(|&t| t <= timing);
        if self.timing.len() >= MAX_TIMINGS {
            self.timing.pop();
            self.counts.pop();
        }
        self.timing.insert(pos, timing);
        self.counts.insert(pos, self.curr_count);
        self.curr_count += 1;
    }

    /// Move every kept sample by `amount`
    pub fn shift(&mut self, amount: i32) {
        for t in &mut self.timing {
            *t += amount;
        }
    }
}

/// Rotating set of sub-windows covering the analysis window
#[derive(Debug, Clone)]
pub struct TimingHistory {
    /// Newest sub-window first
    buffers: [TimingBuffer; MAX_BUFFERS],
    subwindow_size: u32,
    window_size: u32,
}

impl TimingHistory {
    /// History sized for a tolerated late rate of `max_late_rate` percent
    pub fn new(max_late_rate: u32) -> Self {
        let mut history = Self {
            buffers: Default::default(),
            subwindow_size: 0,
            window_size: 0,
        };
        history.set_max_late_rate(max_late_rate);
        history
    }

    /// Resize the analysis window: the fewer late packets tolerated, the
    /// more samples are needed to see them
    pub fn set_max_late_rate(&mut self, max_late_rate: u32) {
        let rate = max_late_rate.max(1);
        self.window_size = 100 * TOP_DELAY as u32 / rate;
        self.subwindow_size = self.window_size / MAX_BUFFERS as u32;
    }

    /// Samples covered by the whole window
    pub fn window_size(&self) -> u32 {
        self.window_size
    }

    /// Samples per sub-window before rotation
    pub fn subwindow_size(&self) -> u32 {
        self.subwindow_size
    }

    /// Forget every sample
    pub fn clear(&mut self) {
        for buffer in &mut self.buffers {
            buffer.clear();
        }
    }

    /// Record a timing sample, clamped to 16 bits
    pub fn update(&mut self, timing: i32) {
        let timing = timing.clamp(-32767, 32767);
        if self.buffers[0].curr_count() >= self.subwindow_size {
            self.buffers.rotate_right(1);
            self.buffers[0].clear();
            trace!("timing sub-window rotated");
        }
        self.buffers[0].add(timing);
    }

    /// Move every sample by `amount`, after the playout pointer moved
    pub fn shift(&mut self, amount: i32) {
        for buffer in &mut self.buffers {
            buffer.shift(amount);
        }
    }

    /// Samples seen across all sub-windows
    pub fn total_count(&self) -> u32 {
        self.buffers.iter().map(TimingBuffer::curr_count).sum()
    }

    /// Delay adjustment minimizing `-delay + late_factor * late_count`
    ///
    /// Negative means the buffer should grow by that much, positive that it
    /// can shrink. `latency_tradeoff` of 0 selects the automatic tradeoff,
    /// which is re-estimated here from the spread of the latest samples.
    pub fn optimal_delay(&self, delay_step: i32, latency_tradeoff: i32, auto_tradeoff: &mut i32) -> i32 {
        let tot_count = self.total_count() as i32;
        if tot_count == 0 {
            return 0;
        }

        let late_factor = if latency_tradeoff != 0 {
            latency_tradeoff as f32 * 100.0 / tot_count as f32
        } else {
            (*auto_tradeoff * self.window_size as i32 / tot_count) as f32
        };

        let mut pos = [0usize; MAX_BUFFERS];
        let mut opt = 0;
        let mut best_cost = i32::MAX;
        let mut late = 0;
        let mut penalty_taken = false;
        let mut best = 0;
        let mut worst = 0;

        for i in 0..TOP_DELAY {
            let next = (0..MAX_BUFFERS)
                .filter_map(|j| self.buffers[j].timings().get(pos[j]).map(|&t| (j, t)))
                .fold(None, |acc: Option<(usize, i32)>, (j, t)| match acc {
                    Some((_, latest)) if latest <= t => acc,
                    _ => Some((j, t)),
                });
            let Some((j, timing)) = next else {
                break;
            };

            if i == 0 {
                worst = timing;
            }
            best = timing;
            let latest = round_down(timing, delay_step);
            pos[j] += 1;

            let cost = (-latest as f32 + late_factor * late as f32) as i32;
            if cost < best_cost {
                best_cost = cost;
                opt = latest;
            }

            late += 1;
            // extra penalty the first time the choice would add late packets
            if latest >= 0 && !penalty_taken {
                penalty_taken = true;
                late += 4;
            }
        }

        *auto_tradeoff = 1 + (best - worst) / TOP_DELAY as i32;

        // Too little data to justify shrinking
        if tot_count < TOP_DELAY as i32 && opt > 0 {
            return 0;
        }
        opt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_down() {
        assert_eq!(round_down(250, 100), 200);
        assert_eq!(round_down(-250, 100), -300);
        assert_eq!(round_down(-200, 100), -200);
        assert_eq!(round_down(0, 20), 0);
    }

    #[test]
    fn test_timing_buffer_keeps_earliest_sorted() {
        let mut tb = TimingBuffer::new();
        for t in (0..100).rev() {
            tb.add(t);
        }
        assert_eq!(tb.curr_count(), 100);
        assert_eq!(tb.timings().len(), MAX_TIMINGS);
        assert_eq!(tb.timings()[0], 0);
        assert_eq!(tb.timings()[MAX_TIMINGS - 1], 39);
        assert!(tb.timings().windows(2).all(|w| w[0] <= w[1]));

        // later than everything kept: counted only
        tb.add(500);
        assert_eq!(tb.curr_count(), 101);
        assert_eq!(tb.timings()[MAX_TIMINGS - 1], 39);
    }

    #[test]
    fn test_history_rotates_sub_windows() {
        let mut history = TimingHistory::new(4);
        assert_eq!(history.window_size(), 1000);
        assert_eq!(history.subwindow_size(), 333);
        for _ in 0..(333 * 4) {
            history.update(10);
        }
        // the oldest sub-window has been recycled
        assert!(history.total_count() <= 1000);
        history.clear();
        assert_eq!(history.total_count(), 0);
    }

    #[test]
    fn test_update_clamps_to_16_bits() {
        let mut history = TimingHistory::new(4);
        history.update(-100_000);
        history.update(100_000);
        assert_eq!(history.buffers[0].timings(), &[-32767, 32767]);
    }

    #[test]
    fn test_late_packets_ask_for_more_delay() {
        let mut history = TimingHistory::new(4);
        let mut auto = 32000;
        for _ in 0..50 {
            history.update(-300);
        }
        let opt = history.optimal_delay(20, 0, &mut auto);
        assert_eq!(opt, -300);
        assert_eq!(auto, 1);
    }

    #[test]
    fn test_early_packets_allow_less_delay() {
        let mut history = TimingHistory::new(4);
        let mut auto = 32000;
        for _ in 0..50 {
            history.update(400);
        }
        // a handful of packets is not enough to shrink
        let mut few = TimingHistory::new(4);
        for _ in 0..10 {
            few.update(400);
        }
        assert_eq!(few.optimal_delay(20, 0, &mut auto), 0);
        assert_eq!(history.optimal_delay(20, 0, &mut auto), 400);
    }

    #[test]
    fn test_shift_moves_samples() {
        let mut history = TimingHistory::new(4);
        history.update(-100);
        history.shift(100);
        let mut auto = 32000;
        assert_eq!(history.optimal_delay(20, 0, &mut auto), 0);
    }

    #[test]
    fn test_empty_history_keeps_delay() {
        let history = TimingHistory::new(4);
        let mut auto = 32000;
        assert_eq!(history.optimal_delay(20, 0, &mut auto), 0);
        assert_eq!(auto, 32000);
    }
}
