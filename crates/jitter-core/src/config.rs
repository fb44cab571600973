//! Jitter buffer configuration

use crate::error::{JitterError, Result};

/// Configuration for the jitter buffer
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JitterBufferConfig {
    /// Granularity of delay changes, in timestamp units
    pub step_size: i32,
    /// Late packets tolerated by the delay estimate, in percent
    pub max_late_rate: u32,
    /// Cost of one late packet relative to added delay, 0 for automatic
    pub latency_tradeoff: i32,
    /// Granularity of concealed windows, defaults to `step_size`
    pub concealment_size: Option<i32>,
    /// Extra delay kept on top of the estimate, in timestamp units
    pub buffer_margin: i32,
    /// Re-evaluate the delay on every tick
    pub auto_adjust: bool,
}

impl Default for JitterBufferConfig {
    fn default() -> Self {
        Self {
            step_size: 160, // 20 ms at 8 kHz
            max_late_rate: 4,
            latency_tradeoff: 0,
            concealment_size: None,
            buffer_margin: 0,
            auto_adjust: true,
        }
    }
}

impl JitterBufferConfig {
    /// Configuration with a given step size and defaults elsewhere
    pub fn new(step_size: i32) -> Self {
        Self {
            step_size,
            ..Self::default()
        }
    }

    /// Set the tolerated late rate
    pub fn with_max_late_rate(mut self, percent: u32) -> Self {
        self.max_late_rate = percent;
        self
    }

    /// Set a fixed latency tradeoff
    pub fn with_latency_tradeoff(mut self, tradeoff: i32) -> Self {
        self.latency_tradeoff = tradeoff;
        self
    }

    /// Set the concealment granularity
    pub fn with_concealment_size(mut self, size: i32) -> Self {
        self.concealment_size = Some(size);
        self
    }

    /// Set the extra margin
    pub fn with_buffer_margin(mut self, margin: i32) -> Self {
        self.buffer_margin = margin;
        self
    }

    /// Enable or disable automatic delay adjustment
    pub fn with_auto_adjust(mut self, on: bool) -> Self {
        self.auto_adjust = on;
        self
    }

    /// Concealment granularity in effect
    pub fn effective_concealment_size(&self) -> i32 {
        self.concealment_size.unwrap_or(self.step_size)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.step_size <= 0 {
            return Err(JitterError::invalid_config(format!(
                "step size must be positive, got {}",
                self.step_size
            )));
        }
        if !(1..=100).contains(&self.max_late_rate) {
            return Err(JitterError::invalid_config(format!(
                "max late rate {}% outside 1-100",
                self.max_late_rate
            )));
        }
        if self.latency_tradeoff < 0 {
            return Err(JitterError::invalid_config("latency tradeoff cannot be negative"));
        }
        if self.effective_concealment_size() <= 0 {
            return Err(JitterError::invalid_config("concealment size must be positive"));
        }
        if self.buffer_margin < 0 {
            return Err(JitterError::invalid_config("buffer margin cannot be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = JitterBufferConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.effective_concealment_size(), 160);
    }

    #[test]
    fn test_builder() {
        let config = JitterBufferConfig::new(320)
            .with_max_late_rate(10)
            .with_concealment_size(160)
            .with_auto_adjust(false);
        assert_eq!(config.step_size, 320);
        assert_eq!(config.effective_concealment_size(), 160);
        assert!(!config.auto_adjust);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_configs() {
        assert!(JitterBufferConfig::new(0).validate().is_err());
        assert!(JitterBufferConfig::new(-20).validate().is_err());
        assert!(JitterBufferConfig::default().with_max_late_rate(0).validate().is_err());
        assert!(JitterBufferConfig::default().with_concealment_size(0).validate().is_err());
        assert!(JitterBufferConfig::default().with_latency_tradeoff(-1).validate().is_err());
        assert!(JitterBufferConfig::default().with_buffer_margin(-5).validate().is_err());
    }
}
