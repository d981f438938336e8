/// Context passed to graph nodes during rendering
///
/// Carries the sample rate of the stream the node is rendering into.
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx {
    pub sample_rate: f32,
}

impl RenderCtx {
    pub fn new(sample_rate: f32) -> Self {
        Self { sample_rate }
    }
}

/// Core trait for audio processing graph nodes
///
/// Effect nodes process a mono block in place.
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    /// Clear delay lines, filter state and LFO phase.
    ///
    /// Default implementation does nothing (stateless nodes).
    fn reset(&mut self) {}
}

/// Nodes driven by a typed settings struct
///
/// Settings hold the user-facing knob values (percent, ms, dB). A node keeps
/// its topology for its whole life and only re-derives coefficients when a
/// knob moves.
pub trait Configurable: GraphNode {
    type Param: Copy + Send;
    type Settings: Copy + Send;

    /// Move one knob; takes effect from the next rendered sample.
    fn set_param(&mut self, param: Self::Param, value: f32);

    /// Move every knob at once.
    fn configure(&mut self, settings: &Self::Settings);

    fn settings(&self) -> Self::Settings;
}
