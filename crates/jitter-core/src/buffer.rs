//! Adaptive jitter buffer
//!
//! The buffer holds up to 200 packets in fixed slots and plays them out
//! against a playout pointer that only the consumer moves. The producer
//! calls [`JitterBuffer::put`] as packets arrive; the consumer calls
//! [`JitterBuffer::get`] once per output step followed by
//! [`JitterBuffer::tick`]. Timing samples gathered along the way feed the
//! delay estimate in [`crate::timing`], which either asks the caller to
//! insert filler (grow the delay) or silently skips ahead (shrink it).
//!
//! The buffer does no locking; a producer and consumer on different
//! threads must share it behind one mutex.

use crate::config::JitterBufferConfig;
use crate::error::{JitterError, Result};
use crate::packet::{JitterBufferPacket, JitterOutput};
use crate::timing::{round_down, TimingHistory};
use tracing::{debug, trace, warn};

/// Packet slots
pub const MAX_BUFFER_SIZE: usize = 200;
/// Consecutive failed gets after which the next put resynchronizes
pub const MAX_LOST_BEFORE_RESET: u32 = 20;
/// Initial automatic latency tradeoff
const INITIAL_AUTO_TRADEOFF: i32 = 32000;

fn lt32(a: u32, b: u32) -> bool {
    (a.wrapping_sub(b) as i32) < 0
}

fn le32(a: u32, b: u32) -> bool {
    (a.wrapping_sub(b) as i32) <= 0
}

fn gt32(a: u32, b: u32) -> bool {
    (a.wrapping_sub(b) as i32) > 0
}

fn ge32(a: u32, b: u32) -> bool {
    (a.wrapping_sub(b) as i32) >= 0
}

#[derive(Debug, Clone)]
struct Slot {
    packet: JitterBufferPacket,
    /// Playout deadline seen at arrival, 0 when unknown
    arrival: u32,
}

/// Statistics for the jitter buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JitterBufferStats {
    /// Packets offered to `put`
    pub packets_received: u64,
    /// Packets returned by `get` or `get_another`
    pub packets_returned: u64,
    /// Packets that arrived after their playout deadline
    pub late_packets: u64,
    /// Packets dropped because their span had already been played
    pub discarded_packets: u64,
    /// Packets evicted to make room in a full buffer
    pub overflow_evictions: u64,
    /// `get` calls that found nothing to play
    pub missing: u64,
    /// `get` calls that asked for filler
    pub insertions: u64,
    /// Resynchronizations after a long run of failed gets
    pub resets: u64,
}

/// Adaptive jitter buffer for timestamped packets
#[derive(Debug, Clone)]
pub struct JitterBuffer {
    slots: Vec<Option<Slot>>,
    /// Next timestamp to be played
    pointer_timestamp: u32,
    /// Timestamp of the last packet returned, for `get_another`
    last_returned_timestamp: u32,
    /// Packets starting before this are late
    next_stop: u32,
    /// Data the caller still holds from the last get, in timestamp units
    buffered: i32,
    /// Filler requested by a delay update, served by the next get
    interp_requested: i32,
    lost_count: u32,
    reset_state: bool,

    delay_step: i32,
    concealment_size: i32,
    buffer_margin: i32,
    max_late_rate: u32,
    latency_tradeoff: i32,
    auto_adjust: bool,
    auto_tradeoff: i32,
    timings: TimingHistory,

    stats: JitterBufferStats,
}

impl JitterBuffer {
    /// Buffer with default settings and the given step size
    pub fn new(step_size: i32) -> Result<Self> {
        Self::with_config(JitterBufferConfig::new(step_size))
    }

    /// Buffer with every setting of `config` applied
    pub fn with_config(config: JitterBufferConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            step = config.step_size,
            max_late_rate = config.max_late_rate,
            "jitter buffer created"
        );
        Ok(Self {
            slots: vec![None; MAX_BUFFER_SIZE],
            pointer_timestamp: 0,
            last_returned_timestamp: 0,
            next_stop: 0,
            buffered: 0,
            interp_requested: 0,
            lost_count: 0,
            reset_state: true,
            delay_step: config.step_size,
            concealment_size: config.effective_concealment_size(),
            buffer_margin: config.buffer_margin,
            max_late_rate: config.max_late_rate,
            latency_tradeoff: config.latency_tradeoff,
            auto_adjust: config.auto_adjust,
            auto_tradeoff: INITIAL_AUTO_TRADEOFF,
            timings: TimingHistory::new(config.max_late_rate),
            stats: JitterBufferStats::default(),
        })
    }

    /// Drop every packet and timing sample; the next get resynchronizes on
    /// the oldest packet put after this
    pub fn reset(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.pointer_timestamp = 0;
        self.next_stop = 0;
        self.reset_state = true;
        self.lost_count = 0;
        self.buffered = 0;
        self.auto_tradeoff = INITIAL_AUTO_TRADEOFF;
        self.timings.clear();
        debug!("jitter buffer reset");
    }

    /// Hand a packet to the buffer
    ///
    /// Packets whose whole span has already been played are dropped.
    pub fn put(&mut self, packet: JitterBufferPacket) {
        self.stats.packets_received += 1;

        if !self.reset_state {
            for slot in &mut self.slots {
                if slot
                    .as_ref()
                    .is_some_and(|s| le32(s.packet.end(), self.pointer_timestamp))
                {
                    *slot = None;
                    self.stats.discarded_packets += 1;
                }
            }
        }

        let late = !self.reset_state && lt32(packet.timestamp, self.next_stop);
        if late {
            let timing = packet.timestamp.wrapping_sub(self.next_stop) as i32 - self.buffer_margin;
            self.timings.update(timing);
            self.stats.late_packets += 1;
            trace!(timestamp = packet.timestamp, timing, "late packet");
        }

        if self.lost_count > MAX_LOST_BEFORE_RESET {
            debug!(lost = self.lost_count, "resynchronizing after repeated losses");
            self.reset();
            self.stats.resets += 1;
        }

        let useful = self.reset_state
            || ge32(
                packet.end().wrapping_add(self.delay_step as u32),
                self.pointer_timestamp,
            );
        if !useful {
            trace!(timestamp = packet.timestamp, "packet too late to be useful");
            self.stats.discarded_packets += 1;
            return;
        }

        let index = match self.slots.iter().position(Option::is_none) {
            Some(free) => free,
            None => {
                let earliest = self.earliest_slot().unwrap_or(0);
                self.stats.overflow_evictions += 1;
                debug!(
                    timestamp = packet.timestamp,
                    pointer = self.pointer_timestamp,
                    "buffer full, discarding earliest packet"
                );
                earliest
            }
        };

        let arrival = if self.reset_state || late { 0 } else { self.next_stop };
        trace!(timestamp = packet.timestamp, span = packet.span, slot = index, "packet buffered");
        self.slots[index] = Some(Slot { packet, arrival });
    }

    /// Index of the packet with the earliest timestamp
    fn earliest_slot(&self) -> Option<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (i, s.packet.timestamp)))
            .fold(None, |acc: Option<(usize, u32)>, (i, ts)| match acc {
                Some((_, earliest)) if !lt32(ts, earliest) => acc,
                _ => Some((i, ts)),
            })
            .map(|(i, _)| i)
    }

    /// First slot whose packet satisfies `pred`
    fn find_slot(&self, pred: impl Fn(&JitterBufferPacket) -> bool) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.as_ref().is_some_and(|s| pred(&s.packet)))
    }

    /// Fetch what should be played for the next `desired_span` units
    ///
    /// Prefers, in order: a packet starting exactly at the pointer and
    /// covering the window, an older one covering it, an older one covering
    /// part of it, and the earliest one starting inside it.
    pub fn get(&mut self, desired_span: i32) -> Result<JitterOutput> {
        if desired_span <= 0 {
            return Err(JitterError::invalid_argument("desired_span", desired_span));
        }

        if self.reset_state {
            let Some(oldest) = self.earliest_slot() else {
                return Ok(JitterOutput::Missing {
                    timestamp: 0,
                    span: self.interp_requested.max(0) as u32,
                });
            };
            let ts = self.slots[oldest]
                .as_ref()
                .map_or(0, |s| s.packet.timestamp);
            self.reset_state = false;
            self.pointer_timestamp = ts;
            self.next_stop = ts;
            debug!(timestamp = ts, "jitter buffer synchronized");
        }

        self.last_returned_timestamp = self.pointer_timestamp;

        if self.interp_requested != 0 {
            let span = self.interp_requested;
            let timestamp = self.pointer_timestamp;
            // the delay update moved the pointer back by the same amount
            self.pointer_timestamp = self.pointer_timestamp.wrapping_add(span as u32);
            self.interp_requested = 0;
            self.buffered = span - desired_span;
            self.stats.insertions += 1;
            trace!(timestamp, span, "deferred insertion");
            return Ok(JitterOutput::Insertion {
                timestamp,
                span: span as u32,
            });
        }

        let pointer = self.pointer_timestamp;
        let window_end = pointer.wrapping_add(desired_span as u32);
        let found = self
            .find_slot(|p| p.timestamp == pointer && ge32(p.end(), window_end))
            .or_else(|| self.find_slot(|p| le32(p.timestamp, pointer) && ge32(p.end(), window_end)))
            .or_else(|| self.find_slot(|p| le32(p.timestamp, pointer) && gt32(p.end(), pointer)))
            .or_else(|| self.earliest_in_window(pointer, window_end));

        if let Some(index) = found {
            if let Some(Slot { packet, arrival }) = self.slots[index].take() {
                self.lost_count = 0;
                if arrival != 0 {
                    let timing = packet.timestamp.wrapping_sub(arrival) as i32 - self.buffer_margin;
                    self.timings.update(timing);
                }

                let start_offset = packet.timestamp.wrapping_sub(pointer) as i32;
                self.last_returned_timestamp = packet.timestamp;
                self.pointer_timestamp = packet.end();
                self.buffered = packet.span as i32 - desired_span + start_offset;
                self.stats.packets_returned += 1;
                trace!(timestamp = packet.timestamp, span = packet.span, start_offset, "packet returned");
                return Ok(JitterOutput::Packet {
                    packet,
                    start_offset,
                });
            }
        }

        self.lost_count += 1;
        let opt = self.optimal_delay();
        if opt < 0 {
            self.timings.shift(-opt);
            self.buffered = -opt - desired_span;
            self.stats.insertions += 1;
            debug!(timestamp = pointer, span = -opt, "growing buffer with filler");
            Ok(JitterOutput::Insertion {
                timestamp: pointer,
                span: (-opt) as u32,
            })
        } else {
            let span = round_down(desired_span, self.concealment_size);
            self.pointer_timestamp = pointer.wrapping_add(span as u32);
            self.buffered = 0;
            self.stats.missing += 1;
            trace!(timestamp = pointer, span, lost = self.lost_count, "nothing to play");
            Ok(JitterOutput::Missing {
                timestamp: pointer,
                span: span.max(0) as u32,
            })
        }
    }

    /// Earliest packet starting inside `[start, end)`, longer span first on
    /// equal timestamps
    fn earliest_in_window(&self, start: u32, end: u32) -> Option<usize> {
        let mut best: Option<(usize, u32, u32)> = None;
        for (i, slot) in self.slots.iter().enumerate() {
            let Some(slot) = slot else { continue };
            let p = &slot.packet;
            if !(lt32(p.timestamp, end) && ge32(p.timestamp, start)) {
                continue;
            }
            let better = match best {
                None => true,
                Some((_, time, span)) => {
                    lt32(p.timestamp, time) || (p.timestamp == time && p.span > span)
                }
            };
            if better {
                best = Some((i, p.timestamp, p.span));
            }
        }
        best.map(|(i, _, _)| i)
    }

    /// Another packet with the same timestamp as the one just returned,
    /// for streams that split a frame across several packets
    pub fn get_another(&mut self) -> Option<JitterBufferPacket> {
        let last = self.last_returned_timestamp;
        let index = self.find_slot(|p| p.timestamp == last)?;
        let slot = self.slots[index].take()?;
        self.stats.packets_returned += 1;
        Some(slot.packet)
    }

    fn optimal_delay(&mut self) -> i32 {
        self.timings
            .optimal_delay(self.delay_step, self.latency_tradeoff, &mut self.auto_tradeoff)
    }

    fn apply_delay_update(&mut self) -> i32 {
        let opt = self.optimal_delay();
        if opt != 0 {
            self.timings.shift(-opt);
            self.pointer_timestamp = self.pointer_timestamp.wrapping_add(opt as u32);
            if opt < 0 {
                self.interp_requested = -opt;
                debug!(samples = -opt, "delay update: insert filler");
            } else {
                debug!(samples = opt, "delay update: drop samples");
            }
        }
        opt
    }

    /// Re-evaluate the delay now and return the adjustment made
    ///
    /// Negative values grow the buffer (the next get returns filler),
    /// positive values shrink it. Calling this turns automatic adjustment
    /// off, since the caller has taken over.
    pub fn update_delay(&mut self) -> i32 {
        self.auto_adjust = false;
        self.apply_delay_update()
    }

    /// Advance one output step
    ///
    /// Call once after each get. Runs the automatic delay update and moves
    /// the lateness deadline to what the caller has actually consumed.
    pub fn tick(&mut self) {
        if self.auto_adjust {
            self.apply_delay_update();
        }
        if self.buffered >= 0 {
            self.next_stop = self.pointer_timestamp.wrapping_sub(self.buffered as u32);
        } else {
            self.next_stop = self.pointer_timestamp;
            warn!(buffered = self.buffered, "negative buffering, get spans inconsistent");
        }
        self.buffered = 0;
    }

    /// Report that `remaining` units of the last returned packet are still
    /// unplayed, in place of [`tick`](Self::tick)
    pub fn remaining_span(&mut self, remaining: u32) {
        if self.auto_adjust {
            self.apply_delay_update();
        }
        if self.buffered < 0 {
            warn!(buffered = self.buffered, "negative buffering, get spans inconsistent");
        }
        self.next_stop = self.pointer_timestamp.wrapping_sub(remaining);
    }

    /// Next timestamp to be played
    pub fn pointer_timestamp(&self) -> u32 {
        self.pointer_timestamp
    }

    /// Packets buffered at or after the playout pointer
    pub fn available_count(&self) -> usize {
        self.slots
            .iter()
            .flatten()
            .filter(|s| le32(self.pointer_timestamp, s.packet.timestamp))
            .count()
    }

    /// Extra margin kept on top of the delay estimate
    pub fn margin(&self) -> i32 {
        self.buffer_margin
    }

    /// Set the extra margin
    pub fn set_margin(&mut self, margin: i32) -> Result<()> {
        if margin < 0 {
            return Err(JitterError::invalid_argument("margin", margin));
        }
        self.buffer_margin = margin;
        Ok(())
    }

    /// Granularity of delay changes
    pub fn delay_step(&self) -> i32 {
        self.delay_step
    }

    /// Set the granularity of delay changes
    pub fn set_delay_step(&mut self, step: i32) -> Result<()> {
        if step <= 0 {
            return Err(JitterError::invalid_argument("delay_step", step));
        }
        self.delay_step = step;
        Ok(())
    }

    /// Granularity of concealed windows
    pub fn concealment_size(&self) -> i32 {
        self.concealment_size
    }

    /// Set the granularity of concealed windows
    pub fn set_concealment_size(&mut self, size: i32) -> Result<()> {
        if size <= 0 {
            return Err(JitterError::invalid_argument("concealment_size", size));
        }
        self.concealment_size = size;
        Ok(())
    }

    /// Tolerated late rate in percent
    pub fn max_late_rate(&self) -> u32 {
        self.max_late_rate
    }

    /// Set the tolerated late rate, resizing the analysis window
    pub fn set_max_late_rate(&mut self, percent: u32) -> Result<()> {
        if !(1..=100).contains(&percent) {
            return Err(JitterError::invalid_argument("max_late_rate", percent));
        }
        self.max_late_rate = percent;
        self.timings.set_max_late_rate(percent);
        Ok(())
    }

    /// Cost of a late packet, 0 when automatic
    pub fn late_cost(&self) -> i32 {
        self.latency_tradeoff
    }

    /// Set the cost of a late packet, 0 for automatic
    pub fn set_late_cost(&mut self, cost: i32) -> Result<()> {
        if cost < 0 {
            return Err(JitterError::invalid_argument("late_cost", cost));
        }
        self.latency_tradeoff = cost;
        Ok(())
    }

    /// Current automatic tradeoff estimate
    pub fn auto_tradeoff(&self) -> i32 {
        self.auto_tradeoff
    }

    /// Whether `tick` adjusts the delay
    pub fn auto_adjust(&self) -> bool {
        self.auto_adjust
    }

    /// Enable or disable automatic delay adjustment
    pub fn set_auto_adjust(&mut self, on: bool) {
        self.auto_adjust = on;
    }

    /// Get the current jitter buffer statistics
    pub fn stats(&self) -> &JitterBufferStats {
        &self.stats
    }
}
