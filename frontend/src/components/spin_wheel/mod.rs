mod wheel_audio;
mod wheel_canvas;

use std::cell::RefCell;
use std::rc::Rc;

use gloo_render::{request_animation_frame, AnimationFrame};
use log::{debug, warn};
use rand::Rng;
use yew::prelude::*;

use shared::shared_wheel_game::{Segment, WinnerResult, IDLE_TURN_SECONDS};
use shared::suspense::SuspenseProfile;
use shared::wheel_math::{
    plan_spin, resolve_winner_index, segment_at, solve_target_angle, SpinPhase,
};

use wheel_audio::WheelSounds;
use wheel_canvas::WheelCanvas;

/// Which driver may advance the shared rotation value. Exactly one owner is
/// active at any instant; spin start takes the token from the idle loop and
/// hands it back once the winner is resolved.
#[derive(Clone, Copy, PartialEq, Eq)]
enum MotionOwner {
    Idle,
    Spinning,
}

#[derive(Properties, PartialEq)]
pub struct SpinWheelProps {
    /// Current entrants, one segment each, in roster order.
    pub segments: Vec<Segment>,
    /// Entrant chosen by the server, matched against segment label or id.
    #[prop_or_default]
    pub predetermined_winner: Option<String>,
    /// Named suspense level; missing or unknown names mean `moderate`.
    #[prop_or_default]
    pub suspense_level: Option<String>,
    /// Edge-triggered start signal. Pulses during a running spin are ignored.
    #[prop_or(false)]
    pub auto_spin: bool,
    /// Set while the surrounding app wants the wheel kept visually alive
    /// (e.g. a pre-spin countdown with late joiners watching).
    #[prop_or(false)]
    pub should_continue_animation: bool,
    #[prop_or(false)]
    pub is_realtime: bool,
    #[prop_or_default]
    pub server_calculation_time: Option<f64>,
    /// Called exactly once per spin with the label of the landed segment.
    #[prop_or_default]
    pub on_spin_complete: Callback<String>,
}

// Re-arms requestAnimationFrame until `step` returns false. The pending
// frame handle lives in `slot`; taking it out cancels the loop.
fn run_frame_loop<F>(slot: Rc<RefCell<Option<AnimationFrame>>>, mut step: F)
where
    F: FnMut() -> bool + 'static,
{
    let next = slot.clone();
    let frame = request_animation_frame(move |_timestamp| {
        if step() {
            run_frame_loop(next, step);
        }
    });
    *slot.borrow_mut() = Some(frame);
}

/// Everything the spin driver needs across frames.
struct SpinContext {
    rotation: UseStateHandle<f64>,
    spinning: UseStateHandle<bool>,
    current_phase: UseStateHandle<Option<SpinPhase>>,
    winner: UseStateHandle<Option<WinnerResult>>,
    rotation_value: Rc<RefCell<f64>>,
    motion_owner: Rc<RefCell<MotionOwner>>,
    frozen_segments: Rc<RefCell<Vec<Segment>>>,
    sounds: Rc<RefCell<WheelSounds>>,
    spin_raf: Rc<RefCell<Option<AnimationFrame>>>,
    on_spin_complete: Callback<String>,
}

fn start_spin(
    ctx: SpinContext,
    segments: Vec<Segment>,
    predetermined_winner: Option<String>,
    suspense_level: Option<String>,
) {
    if segments.is_empty() || *ctx.motion_owner.borrow() == MotionOwner::Spinning {
        return;
    }

    let profile = SuspenseProfile::resolve(suspense_level.as_deref());
    let base_rotations = profile.roll_rotations();
    let current = *ctx.rotation_value.borrow();

    let resolved = predetermined_winner.as_deref().and_then(|wanted| {
        let index = resolve_winner_index(&segments, wanted);
        if index.is_none() {
            warn!("announced winner {:?} is not on the wheel, landing at random", wanted);
        }
        index
    });
    let final_rotation = match resolved {
        Some(index) => solve_target_angle(current, index, segments.len(), base_rotations),
        None => current + base_rotations * 360.0 + rand::thread_rng().gen_range(0.0..360.0),
    };
    let plan = plan_spin(current, final_rotation, &profile);
    debug!(
        "spin started over {} segments, {:.1} rotations, {} phases",
        segments.len(),
        base_rotations,
        plan.len()
    );

    // Take the rotation over from the idle loop. The roster is frozen for
    // the whole spin so entrant churn cannot move the landing.
    *ctx.motion_owner.borrow_mut() = MotionOwner::Spinning;
    *ctx.frozen_segments.borrow_mut() = segments.clone();
    ctx.spinning.set(true);
    ctx.winner.set(None);
    ctx.current_phase.set(Some(plan[0].phase));

    let segment_count = segments.len();
    let spin_raf = ctx.spin_raf.clone();
    let mut phase_index = 0usize;
    let mut phase_started = js_sys::Date::now();
    let mut last_segment: Option<usize> = None;

    run_frame_loop(spin_raf, move || {
        let now = js_sys::Date::now();
        let tween = plan[phase_index].clone();
        let elapsed = (now - phase_started) / 1000.0;
        let rot = tween.rotation_at(elapsed);

        let pointed = segment_at(rot, segment_count);
        if last_segment != Some(pointed) {
            match tween.phase {
                SpinPhase::Dramatic => ctx.sounds.borrow().play_dramatic(),
                _ => ctx.sounds.borrow().play_tick(),
            }
            last_segment = Some(pointed);
        }
        *ctx.rotation_value.borrow_mut() = rot;
        ctx.rotation.set(rot);

        if elapsed < tween.duration_secs {
            return true;
        }
        if phase_index + 1 < plan.len() {
            phase_index += 1;
            phase_started = now;
            ctx.current_phase.set(Some(plan[phase_index].phase));
            return true;
        }

        // Terminal phase finished: snap to the target and resolve.
        let landed = segment_at(final_rotation, segment_count);
        let segment = &segments[landed];
        let result = WinnerResult {
            segment_id: segment.id.clone(),
            label: segment.label.clone(),
        };
        *ctx.rotation_value.borrow_mut() = final_rotation;
        ctx.rotation.set(final_rotation);
        ctx.current_phase.set(None);
        ctx.winner.set(Some(result.clone()));
        ctx.sounds.borrow().play_win();
        *ctx.motion_owner.borrow_mut() = MotionOwner::Idle;
        ctx.spinning.set(false);
        ctx.on_spin_complete.emit(result.label);
        false
    });
}

#[function_component(SpinWheel)]
pub fn spin_wheel(props: &SpinWheelProps) -> Html {
    let rotation = use_state(|| 0.0_f64);
    let spinning = use_state(|| false);
    let current_phase = use_state(|| None::<SpinPhase>);
    let winner = use_state(|| None::<WinnerResult>);

    // Authoritative rotation scalar; the state above only mirrors it for
    // rendering.
    let rotation_value = use_mut_ref(|| 0.0_f64);
    let motion_owner = use_mut_ref(|| MotionOwner::Idle);
    let frozen_segments = use_mut_ref(Vec::<Segment>::new);
    let sounds = use_mut_ref(WheelSounds::new);
    let idle_raf = use_mut_ref(|| None::<AnimationFrame>);
    let spin_raf = use_mut_ref(|| None::<AnimationFrame>);

    // Cancel any in-flight spin and release the audio context on teardown.
    {
        let spin_raf = spin_raf.clone();
        let sounds = sounds.clone();
        use_effect_with((), move |_| {
            move || {
                spin_raf.borrow_mut().take();
                sounds.borrow_mut().close();
            }
        });
    }

    // Idle motion: a slow continuous turn whenever no spin owns the wheel.
    {
        let rotation = rotation.clone();
        let rotation_value = rotation_value.clone();
        let motion_owner = motion_owner.clone();
        let idle_raf = idle_raf.clone();
        let segment_count = props.segments.len();
        use_effect_with(
            (*spinning, props.should_continue_animation, segment_count),
            move |(is_spinning, keep_alive, count)| {
                if !*is_spinning && *count > 0 {
                    debug!(
                        "idle motion running ({})",
                        if *keep_alive { "holding for late joiners" } else { "waiting for a round" }
                    );
                    *motion_owner.borrow_mut() = MotionOwner::Idle;
                    let owner = motion_owner.clone();
                    let mut last_tick = js_sys::Date::now();
                    run_frame_loop(idle_raf.clone(), move || {
                        if *owner.borrow() != MotionOwner::Idle {
                            return false;
                        }
                        let now = js_sys::Date::now();
                        let dt = (now - last_tick) / 1000.0;
                        last_tick = now;
                        let next = *rotation_value.borrow() + dt * 360.0 / IDLE_TURN_SECONDS;
                        *rotation_value.borrow_mut() = next;
                        rotation.set(next);
                        true
                    });
                }
                move || {
                    idle_raf.borrow_mut().take();
                }
            },
        );
    }

    // Edge-triggered spin start. The guard in start_spin makes repeated
    // pulses during a running spin no-ops.
    {
        let segments = props.segments.clone();
        let predetermined_winner = props.predetermined_winner.clone();
        let suspense_level = props.suspense_level.clone();
        let ctx = SpinContext {
            rotation: rotation.clone(),
            spinning: spinning.clone(),
            current_phase: current_phase.clone(),
            winner: winner.clone(),
            rotation_value: rotation_value.clone(),
            motion_owner: motion_owner.clone(),
            frozen_segments: frozen_segments.clone(),
            sounds: sounds.clone(),
            spin_raf: spin_raf.clone(),
            on_spin_complete: props.on_spin_complete.clone(),
        };
        use_effect_with(props.auto_spin, move |auto_spin| {
            if *auto_spin {
                start_spin(ctx, segments, predetermined_winner, suspense_level);
            }
            || ()
        });
    }

    // While a spin runs the frozen roster is shown, so entrants leaving
    // mid-spin cannot blank or reshuffle the wheel under the animation.
    let display_segments: Vec<Segment> = if *spinning {
        frozen_segments.borrow().clone()
    } else {
        props.segments.clone()
    };

    if display_segments.is_empty() {
        return html! {
            <div class="flex flex-col items-center justify-center p-8">
                <div class="text-lg text-gray-600 dark:text-gray-300">{"Waiting for players..."}</div>
            </div>
        };
    }

    html! {
        <div class="flex flex-col items-center">
            if props.is_realtime {
                <div class="mb-4 flex gap-4 text-sm text-gray-500 dark:text-gray-400">
                    <div class="flex items-center gap-2">
                        <span class="w-2 h-2 bg-green-500 rounded-full animate-pulse"></span>
                        <span>{"Real-time"}</span>
                    </div>
                    if let Some(ms) = props.server_calculation_time {
                        <span>{format!("Server: {:.0}ms", ms)}</span>
                    }
                </div>
            }

            <div class="relative">
                <WheelCanvas
                    segments={display_segments.clone()}
                    rotation={*rotation}
                    is_spinning={*spinning}
                />
                if let Some(phase) = *current_phase {
                    <div class="absolute -bottom-8 left-1/2 -translate-x-1/2 text-xs text-gray-400 whitespace-nowrap">
                        {phase.status_line()}
                    </div>
                }
            </div>

            if let Some(result) = (*winner).clone() {
                if !*spinning {
                    <div class="mt-10 p-4 bg-gradient-to-r from-green-600 to-green-700 rounded-lg text-white shadow-lg">
                        <div class="text-2xl font-bold">{format!("Winner: {}", result.label)}</div>
                    </div>
                }
            }
        </div>
    }
}
