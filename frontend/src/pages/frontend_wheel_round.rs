use gloo_timers::future::TimeoutFuture;
use log::info;
use rand::Rng;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use shared::shared_wheel_game::{mask_username, Segment, SpinAnnouncement};
use shared::suspense::SuspenseLevel;

use crate::components::SpinWheel;
use crate::styles;

const COUNTDOWN_SECONDS: u32 = 5;
const STAKE_PER_PLAYER: u32 = 50;
const HOUSE_CUT: f64 = 0.1;

const STARTING_ROSTER: [&str; 4] = ["nova_rider", "pixel_witch", "lucky_hare", "stack_joy"];
const RESERVE_PLAYERS: [&str; 4] = ["tilt_proof", "wheel_wizard", "last_copper", "midnight_ox"];

#[derive(Clone, Copy, PartialEq)]
enum RoundStatus {
    Waiting,
    Countdown,
    Spinning,
    Finished,
}

/// One staked round against a simulated backend. The page plays the part of
/// the realtime channel: it runs the pre-spin countdown, picks the winner
/// the way the server would, and pushes a spin announcement to the wheel.
#[function_component(FrontendWheelRound)]
pub fn frontend_wheel_round() -> Html {
    let players = use_state(|| {
        STARTING_ROSTER.iter().map(|p| p.to_string()).collect::<Vec<_>>()
    });
    let status = use_state(|| RoundStatus::Waiting);
    let countdown = use_state(|| None::<u32>);
    let suspense_level = use_state(|| SuspenseLevel::Moderate.name().to_string());
    let announcement = use_state(|| None::<SpinAnnouncement>);
    let last_winner = use_state(|| None::<String>);

    let segments: Vec<Segment> = players
        .iter()
        .enumerate()
        .map(|(index, name)| Segment::for_entrant(name, name, index))
        .collect();

    let start_round = {
        let players = players.clone();
        let status = status.clone();
        let countdown = countdown.clone();
        let suspense_level = suspense_level.clone();
        let announcement = announcement.clone();
        let last_winner = last_winner.clone();

        Callback::from(move |_: MouseEvent| {
            if matches!(*status, RoundStatus::Countdown | RoundStatus::Spinning)
                || players.is_empty()
            {
                return;
            }
            last_winner.set(None);
            announcement.set(None);
            status.set(RoundStatus::Countdown);

            let players = players.clone();
            let status = status.clone();
            let countdown = countdown.clone();
            let suspense_level = suspense_level.clone();
            let announcement = announcement.clone();
            spawn_local(async move {
                for remaining in (1..=COUNTDOWN_SECONDS).rev() {
                    countdown.set(Some(remaining));
                    TimeoutFuture::new(1_000).await;
                }
                countdown.set(None);

                let roster = (*players).clone();
                if roster.is_empty() {
                    status.set(RoundStatus::Waiting);
                    return;
                }
                let (winner, calc_ms) = {
                    let mut rng = rand::thread_rng();
                    (
                        roster[rng.gen_range(0..roster.len())].clone(),
                        rng.gen_range(3.0..45.0),
                    )
                };
                info!("round resolved, announcing spin for {}", winner);
                announcement.set(Some(SpinAnnouncement {
                    winner,
                    suspense_level: (*suspense_level).clone(),
                    calculation_time_ms: Some(calc_ms),
                }));
                status.set(RoundStatus::Spinning);
            });
        })
    };

    let on_spin_complete = {
        let status = status.clone();
        let last_winner = last_winner.clone();
        Callback::from(move |label: String| {
            info!("wheel landed on {}", label);
            last_winner.set(Some(label));
            status.set(RoundStatus::Finished);
        })
    };

    let add_player = {
        let players = players.clone();
        Callback::from(move |_: MouseEvent| {
            let mut roster = (*players).clone();
            if let Some(next) = RESERVE_PLAYERS
                .iter()
                .find(|p| !roster.iter().any(|r| r == *p))
            {
                roster.push(next.to_string());
                players.set(roster);
            }
        })
    };

    let remove_player = {
        let players = players.clone();
        Callback::from(move |_: MouseEvent| {
            let mut roster = (*players).clone();
            roster.pop();
            players.set(roster);
        })
    };

    let on_level_change = {
        let suspense_level = suspense_level.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            suspense_level.set(select.value());
        })
    };

    let auto_spin = *status == RoundStatus::Spinning && announcement.is_some();
    let spin_locked = matches!(*status, RoundStatus::Countdown | RoundStatus::Spinning);
    let pot = players.len() as u32 * STAKE_PER_PLAYER;
    let payout = (pot as f64 * (1.0 - HOUSE_CUT)).round() as u32;

    html! {
        <div class="container mx-auto px-4 py-8">
            <h1 class={classes!(styles::TEXT_H1, "mb-6", "text-center")}>
                <span class="bg-clip-text text-transparent bg-gradient-to-r from-yellow-400 to-orange-500">
                    {"Spin Wheel"}
                </span>
            </h1>

            <div class={classes!(styles::CARD, "max-w-2xl", "mx-auto")}>
                <div class="flex justify-center gap-6 mb-6">
                    <span class={styles::TEXT_SMALL}>{format!("Stake: {} pax", STAKE_PER_PLAYER)}</span>
                    <span class={styles::TEXT_SMALL}>{format!("Pot: {} pax", pot)}</span>
                    <span class={styles::TEXT_SMALL}>{format!("Winner takes: {} pax", payout)}</span>
                </div>

                <SpinWheel
                    segments={segments.clone()}
                    predetermined_winner={(*announcement).as_ref().map(|a| a.winner.clone())}
                    suspense_level={Some((*suspense_level).clone())}
                    auto_spin={auto_spin}
                    should_continue_animation={*status == RoundStatus::Countdown}
                    is_realtime={true}
                    server_calculation_time={(*announcement).as_ref().and_then(|a| a.calculation_time_ms)}
                    on_spin_complete={on_spin_complete}
                />

                <div class="mt-12 flex flex-col items-center gap-4">
                    if let Some(remaining) = *countdown {
                        <div class={styles::TEXT_H3}>{format!("Spinning in {}...", remaining)}</div>
                    }
                    if let Some(winner) = (*last_winner).clone() {
                        <div class={styles::ALERT_SUCCESS}>
                            {format!("{} takes the pot of {} pax", mask_username(&winner), payout)}
                        </div>
                    }
                    <button
                        class={styles::BUTTON_PRIMARY}
                        onclick={start_round}
                        disabled={spin_locked || players.is_empty()}
                    >
                        { if spin_locked { "Round in progress..." } else { "Start round" } }
                    </button>
                </div>

                <div class="mt-8">
                    <div class="flex items-center justify-between mb-3">
                        <h3 class={styles::TEXT_H3}>{format!("Players ({})", players.len())}</h3>
                        <div class="flex gap-2">
                            <button class={styles::BUTTON_SECONDARY} onclick={add_player}>{"Join"}</button>
                            <button
                                class={styles::BUTTON_SECONDARY}
                                onclick={remove_player}
                                disabled={players.is_empty()}
                            >
                                {"Leave"}
                            </button>
                        </div>
                    </div>
                    <ul class="grid grid-cols-2 gap-2">
                        { for segments.iter().map(|segment| html! {
                            <li class="flex items-center gap-2">
                                <span
                                    class="w-3 h-3 rounded-full flex-shrink-0"
                                    style={format!("background-color: {}", segment.fill_color)}
                                ></span>
                                <span class={styles::TEXT_BODY}>{mask_username(&segment.label)}</span>
                            </li>
                        }) }
                    </ul>
                </div>

                <div class="mt-8 flex items-center gap-3">
                    <label class={styles::TEXT_SMALL} for="suspense-level">{"Suspense"}</label>
                    <select
                        id="suspense-level"
                        class={styles::SELECT}
                        onchange={on_level_change}
                        disabled={spin_locked}
                    >
                        { for SuspenseLevel::ALL.iter().map(|level| html! {
                            <option value={level.name()} selected={*suspense_level == level.name()}>
                                {level.name().replace('_', " ")}
                            </option>
                        }) }
                    </select>
                </div>

                <p class={classes!(styles::TEXT_SMALL, "mt-6", "text-center")}>
                    {"Players joining or leaving while the wheel is spinning do not change the result of the running round."}
                </p>
            </div>
        </div>
    }
}
