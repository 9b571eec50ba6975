//! Per-question result popup shown during the reveal window.

use leptos::prelude::*;

use crate::state::game::GameState;
use crate::util::format::{format_score, streak_label};

/// Correct/incorrect popup with points, streak, and multiplier. Renders
/// nothing outside the reveal window; dismissal is timer-driven, not manual.
#[component]
pub fn ResultPopup() -> impl IntoView {
    let game = expect_context::<RwSignal<GameState>>();

    view! {
        <Show when=move || game.get().popup.is_some()>
            {move || {
                game.get().popup.map(|result| {
                    let verdict = if result.is_correct { "Correct!" } else { "Wrong" };
                    let points = if result.points_awarded > 0 {
                        format!("+{}", format_score(result.points_awarded))
                    } else {
                        format_score(result.points_awarded)
                    };
                    let streak = streak_label(result.streak_count);
                    let multiplier = (result.streak_multiplier - 1.0).abs() > f64::EPSILON;
                    view! {
                        <div class="result-popup" class:result-popup--correct=result.is_correct>
                            <span class="result-popup__verdict">{verdict}</span>
                            <span class="result-popup__points">{points}</span>
                            <Show when={
                                let streak = streak.clone();
                                move || !streak.is_empty()
                            }>
                                <span class="result-popup__streak">{streak.clone()}</span>
                            </Show>
                            <Show when=move || multiplier>
                                <span class="result-popup__multiplier">
                                    {format!("{:.1}x", result.streak_multiplier)}
                                </span>
                            </Show>
                        </div>
                    }
                })
            }}
        </Show>
    }
}
