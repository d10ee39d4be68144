//! Markup for the DOM overlays (menu, leaderboard, game-over card, HUD)
//!
//! Built as strings here so the browser glue only swaps `innerHTML`.

use std::fmt::Write;

use super::menu::{Menu, MenuScreen};
use crate::highscores::HighScores;
use crate::sim::{ActivePowerUps, GameOverAnimation, GameResult};

pub const TITLE: &str = "Snake Game";

pub fn menu_html(menu: &Menu) -> String {
    let mut html = format!("<h1>{}</h1><ul>", TITLE);
    for (i, label) in menu.labels().into_iter().enumerate() {
        let class = if i == menu.selected { " class=\"selected\"" } else { "" };
        let _ = write!(html, "<li{}>{}</li>", class, label);
        if i == menu.selected
            && let Some(desc) = menu.selected_description()
        {
            let _ = write!(html, "<li class=\"description\">{}</li>", desc);
        }
    }
    html.push_str("</ul>");
    let hint = match menu.screen {
        MenuScreen::Main => "Use arrow keys to select<br>Press Enter to confirm",
        MenuScreen::ModeSelect => "Press Enter to play<br>Press Escape to go back",
    };
    let _ = write!(html, "<p class=\"hint\">{}</p>", hint);
    html
}

pub fn high_scores_html(scores: &HighScores) -> String {
    let mut html = String::from("<h2>High Scores</h2>");
    if scores.is_empty() {
        html.push_str("<p>No scores yet</p>");
    } else {
        html.push_str("<ol>");
        for score in &scores.scores {
            let _ = write!(html, "<li>{}</li>", score);
        }
        html.push_str("</ol>");
    }
    html.push_str("<p class=\"hint\">Press Escape to return</p>");
    html
}

pub fn game_over_html(result: &GameResult) -> String {
    let mut html = format!(
        "<h2>Game Over!</h2><p>{}: {}</p><p class=\"score\">Score: {}</p>",
        result.mode,
        capitalize(result.cause.as_str()),
        result.score
    );
    if let Some(rank) = result.rank {
        let _ = write!(html, "<p class=\"rank\">New high score: #{}</p>", rank);
    }
    html.push_str("<p>Press Enter to restart</p><p>Press Escape for menu</p>");
    html
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Inline style applying the card's fade, zoom and sway
pub fn game_over_style(anim: &GameOverAnimation) -> String {
    format!(
        "opacity: {:.3}; transform: translate(-50%, -50%) rotate({:.4}rad) scale({:.3});",
        anim.alpha, anim.rotation, anim.scale
    )
}

/// Score line with each active buff and its whole seconds left
pub fn score_text(score: u32, power_ups: &ActivePowerUps, now: u64) -> String {
    let mut text = format!("Score: {}", score);
    for kind in power_ups.active_kinds() {
        let left = power_ups
            .deadline(kind)
            .map_or(0, |d| d.saturating_sub(now).div_ceil(1000));
        let _ = write!(text, " [{} {}s]", kind.label(), left);
    }
    text
}
