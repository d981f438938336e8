//! Real-time output through the default `cpal` device.

use super::renderer::Renderer;
use crate::error::EngineError;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{info, warn};

/// The default output device with its preferred configuration.
pub struct OutputDevice {
    device: cpal::Device,
    config: cpal::SupportedStreamConfig,
}

impl OutputDevice {
    pub fn open_default() -> Result<Self, EngineError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| EngineError::AudioDevice("no default output device available".into()))?;
        let config = device.default_output_config().map_err(|err| {
            EngineError::AudioDevice(format!("failed to fetch default output config: {err}"))
        })?;

        Ok(Self { device, config })
    }

    pub fn sample_rate(&self) -> f32 {
        self.config.sample_rate().0 as f32
    }

    pub fn channels(&self) -> usize {
        self.config.channels() as usize
    }

    /// Move `renderer` onto the audio thread and start the stream.
    pub fn start(self, mut renderer: Renderer) -> Result<OutputStream, EngineError> {
        let channels = self.channels();
        let name = self
            .device
            .name()
            .unwrap_or_else(|_| "unknown device".to_string());

        let stream = self
            .device
            .build_output_stream(
                &self.config.into(),
                move |data: &mut [f32], _| renderer.render_interleaved(data, channels),
                |err| warn!("audio stream error: {err}"),
                None,
            )
            .map_err(|err| EngineError::AudioDevice(format!("failed to build output stream: {err}")))?;

        stream
            .play()
            .map_err(|err| EngineError::AudioDevice(format!("failed to start output stream: {err}")))?;

        info!(device = %name, channels, "output stream started");
        Ok(OutputStream { _stream: stream })
    }
}

/// Keeps the device stream alive. Dropping it stops playback.
pub struct OutputStream {
    _stream: cpal::Stream,
}
