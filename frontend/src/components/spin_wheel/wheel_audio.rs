use log::warn;
use wasm_bindgen::JsValue;
use web_sys::AudioContext;

/// Oscillator cues for the wheel. Playback is best-effort: a missing or
/// broken audio subsystem never stalls the visual spin.
pub struct WheelSounds {
    context: Option<AudioContext>,
}

impl WheelSounds {
    pub fn new() -> Self {
        let context = match AudioContext::new() {
            Ok(context) => Some(context),
            Err(err) => {
                warn!("audio context unavailable, spinning silently: {:?}", err);
                None
            }
        };
        Self { context }
    }

    /// Releases the audio context. Called on component teardown.
    pub fn close(&mut self) {
        if let Some(context) = self.context.take() {
            let _ = context.close();
        }
    }

    /// Short click when the pointer crosses into a new segment.
    pub fn play_tick(&self) {
        self.play(800.0, None, 0.1, 0.1);
    }

    /// Low rising sweep used during the dramatic return.
    pub fn play_dramatic(&self) {
        self.play(200.0, Some((400.0, 0.2)), 0.15, 0.3);
    }

    /// Rising chirp once the winner is resolved.
    pub fn play_win(&self) {
        self.play(500.0, Some((800.0, 0.3)), 0.2, 0.5);
    }

    fn play(&self, start_hz: f32, ramp: Option<(f32, f64)>, volume: f32, length_secs: f64) {
        if let Some(context) = &self.context {
            if let Err(err) = beep(context, start_hz, ramp, volume, length_secs) {
                warn!("sound cue failed: {:?}", err);
            }
        }
    }
}

fn beep(
    context: &AudioContext,
    start_hz: f32,
    ramp: Option<(f32, f64)>,
    volume: f32,
    length_secs: f64,
) -> Result<(), JsValue> {
    let oscillator = context.create_oscillator()?;
    let gain = context.create_gain()?;
    oscillator.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&context.destination())?;

    let now = context.current_time();
    oscillator.frequency().set_value_at_time(start_hz, now)?;
    if let Some((target_hz, ramp_secs)) = ramp {
        oscillator
            .frequency()
            .exponential_ramp_to_value_at_time(target_hz, now + ramp_secs)?;
    }
    gain.gain().set_value_at_time(volume, now)?;
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, now + length_secs)?;

    oscillator.start()?;
    oscillator.stop_with_when(now + length_secs)?;
    Ok(())
}
