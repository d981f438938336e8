use serde::{Deserialize, Serialize};

/// Engine-wide settings fixed when the engine is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Initial master gain, 0-1
    pub master_volume: f32,
    /// Share of the dry voice signal sent to the reverb
    pub reverb_send: f32,
    /// Level of the reverb return on the master bus
    pub reverb_return: f32,
    /// Length of the synthesized room response
    pub reverb_seconds: f32,
    /// Polynomial decay of the room response
    pub reverb_decay: f32,
    /// Capacity of the control → audio command ring
    pub command_queue: usize,
    /// Voices sounding at once; notes beyond this are dropped
    pub max_voices: usize,
    /// Seed for the reverb room; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            master_volume: 0.3,
            reverb_send: 0.2,
            reverb_return: 0.3,
            reverb_seconds: 2.0,
            reverb_decay: 3.0,
            command_queue: 1024,
            max_voices: 64,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"max_voices": 8, "seed": 42}"#).unwrap();
        assert_eq!(config.max_voices, 8);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.master_volume, 0.3);
        assert_eq!(config.command_queue, 1024);
    }
}
