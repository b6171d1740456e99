//! Command handlers

use tracing::{error, info, warn};

use crate::{
    services::{find_font, label_for, FONT_CATEGORIES},
    state::{AppState, PointerOutcome, Session, Snapshot, StylePatch},
    presentation::KeyDisposition,
};
use super::{
    commands::Command,
    responses::{ApiResponse, FontsResponse, HealthResponse, Response, StatusResponse},
};

/// Dispatch one command against the session and build its response
pub fn handle_command(state: &AppState, command: Command) -> Response {
    let action = command.action();
    let result = match command {
        Command::Status => return status_response(state),
        Command::Health => return Response::Health(HealthResponse::ok()),
        Command::Fonts => return fonts_response(state),
        Command::Quit => {
            let snapshot = state.get_snapshot().ok();
            return Response::Api(ApiResponse::new("ok".to_string(), "Shutting down".to_string(), snapshot));
        }
        command => apply(state, action, command),
    };

    match result {
        Ok(response) => Response::Api(response),
        Err(e) => {
            error!("Command {} failed: {}", action, e);
            Response::Api(ApiResponse::error(e))
        }
    }
}

/// Handle a command that mutates the session
fn apply(state: &AppState, action: &str, command: Command) -> Result<ApiResponse, String> {
    match command {
        Command::Url(url) => {
            let (id, snapshot) = state.update_session(action, |s| s.set_url(&url))?;
            Ok(match id {
                Some(id) => ApiResponse::ok(format!("Overlay target set to {}", id), snapshot),
                None => ApiResponse::ignored("No video identifier found; controls disabled".to_string(), snapshot),
            })
        }
        Command::Duration(seconds) => {
            let (stored, snapshot) = state.update_session(action, |s| s.set_duration(seconds))?;
            Ok(ApiResponse::ok(format!("Duration set to {}s", stored), snapshot))
        }
        Command::Play => transition(state, action, Session::play, "Countdown running", "Play unavailable"),
        Command::Pause => transition(state, action, Session::pause, "Countdown paused", "Countdown not running"),
        Command::Toggle => {
            let ((was_running, running), snapshot) = state.update_session(action, |s| {
                let was_running = s.timer().is_running();
                s.toggle_play();
                (was_running, s.timer().is_running())
            })?;
            Ok(match (was_running, running) {
                (true, false) => ApiResponse::ok("Countdown paused".to_string(), snapshot),
                (false, true) => ApiResponse::ok("Countdown running".to_string(), snapshot),
                _ => ApiResponse::ignored("Play unavailable".to_string(), snapshot),
            })
        }
        Command::Reset => {
            let (_, snapshot) = state.update_session(action, Session::reset)?;
            Ok(ApiResponse::ok("Countdown reset".to_string(), snapshot))
        }
        Command::FontSize(px) => {
            let (_, snapshot) = state.update_session(action, |s| {
                s.apply_style(&StylePatch::font_size(px));
            })?;
            let fitted = snapshot.style.font_size_px;
            if fitted == px {
                return Ok(ApiResponse::ok(describe_style(&snapshot), snapshot));
            }
            Ok(ApiResponse::adjusted(
                format!("Font {}px requested, box fits {}px; {}", px, fitted, describe_style(&snapshot)),
                snapshot,
            ))
        }
        Command::Font(family) => {
            if find_font(&family).is_none() {
                warn!("Font {:?} is not in the catalog", family);
            }
            style(state, action, StylePatch::font_family(family))
        }
        Command::Opacity(percent) => style(state, action, StylePatch::background_opacity(percent)),
        Command::Position(position) => {
            let (_, snapshot) = state.update_session(action, |s| s.set_position(position))?;
            Ok(ApiResponse::ok("Overlay moved".to_string(), snapshot))
        }
        Command::PointerDown(point) => pointer(state, action, |s| s.pointer_down(point)),
        Command::PointerMove(point) => pointer(state, action, |s| s.pointer_move(point)),
        Command::PointerUp => pointer(state, action, Session::pointer_up),
        Command::Container(size) => {
            let (_, snapshot) = state.update_session(action, |s| s.set_container(size))?;
            Ok(ApiResponse::ok(
                format!("Container measured at {}x{}", size.width, size.height),
                snapshot,
            ))
        }
        Command::Measure(size) => {
            let (changed, snapshot) = state.update_session(action, |s| s.report_element_size(size))?;
            Ok(if changed {
                ApiResponse::ok(
                    format!("Overlay measured, font {}px", snapshot.style.font_size_px),
                    snapshot,
                )
            } else {
                ApiResponse::ignored("Overlay size unchanged".to_string(), snapshot)
            })
        }
        Command::EmbedError => {
            let (changed, snapshot) = state.update_session(action, Session::report_embed_error)?;
            Ok(if changed {
                ApiResponse::ok("Embed failed; countdown still available".to_string(), snapshot)
            } else {
                ApiResponse::ignored("No embed to fail".to_string(), snapshot)
            })
        }
        Command::Fullscreen => {
            let (toggled, snapshot) = state.update_session(action, Session::toggle_fullscreen)?;
            Ok(match toggled {
                Some((true, _)) => ApiResponse::ok("Entered fullscreen".to_string(), snapshot),
                Some((false, _)) => ApiResponse::ok("Exited fullscreen".to_string(), snapshot),
                None => ApiResponse::ignored("Fullscreen unavailable".to_string(), snapshot),
            })
        }
        Command::Key(key, phase) => {
            let (disposition, snapshot) = state.update_session(action, |s| s.handle_key(&key, phase))?;
            Ok(match disposition {
                KeyDisposition::Consumed => ApiResponse::ok(format!("{:?} consumed", key), snapshot),
                KeyDisposition::PassThrough => ApiResponse::ignored(format!("{:?} passed through", key), snapshot),
            })
        }
        Command::Status | Command::Health | Command::Fonts | Command::Quit => {
            Err(format!("{} does not change the session", action))
        }
    }
}

fn transition(
    state: &AppState,
    action: &str,
    op: fn(&mut Session) -> bool,
    done: &str,
    skipped: &str,
) -> Result<ApiResponse, String> {
    let (changed, snapshot) = state.update_session(action, op)?;
    if changed {
        info!("{}", done);
        Ok(ApiResponse::ok(done.to_string(), snapshot))
    } else {
        Ok(ApiResponse::ignored(skipped.to_string(), snapshot))
    }
}

fn style(state: &AppState, action: &str, patch: StylePatch) -> Result<ApiResponse, String> {
    let (_, snapshot) = state.update_session(action, |s| {
        s.apply_style(&patch);
    })?;
    Ok(ApiResponse::ok(describe_style(&snapshot), snapshot))
}

fn pointer<F>(state: &AppState, action: &str, op: F) -> Result<ApiResponse, String>
where
    F: FnOnce(&mut Session) -> PointerOutcome,
{
    let (outcome, snapshot) = state.update_session(action, op)?;
    Ok(match outcome {
        PointerOutcome::Ignored => ApiResponse::ignored("Pointer event not consumed".to_string(), snapshot),
        PointerOutcome::Deferred => {
            ApiResponse::ignored("Container not laid out; interaction deferred".to_string(), snapshot)
        }
        PointerOutcome::GestureStarted(mode) => ApiResponse::ok(format!("Gesture started: {:?}", mode), snapshot),
        PointerOutcome::Moved(position) => ApiResponse::ok(
            format!("Overlay at {:.1}%, {:.1}%", position.x_percent, position.y_percent),
            snapshot,
        ),
        PointerOutcome::Resized { dimensions, font_size_px } => ApiResponse::ok(
            format!(
                "Overlay resized to {}x{}, font {}px",
                dimensions.width, dimensions.height, font_size_px
            ),
            snapshot,
        ),
        PointerOutcome::GestureEnded(mode) => ApiResponse::ok(format!("Gesture ended: {:?}", mode), snapshot),
    })
}

fn describe_style(snapshot: &Snapshot) -> String {
    format!(
        "Style: {}px {} at {}% opacity",
        snapshot.style.font_size_px, snapshot.font_label, snapshot.style.background_opacity_percent
    )
}

fn status_response(state: &AppState) -> Response {
    match state.get_snapshot() {
        Ok(session) => {
            let (last_action, last_action_time) = state.get_last_action();
            Response::Status(StatusResponse {
                session,
                countdown_scheduled: state.countdown_scheduled(),
                uptime: state.get_uptime(),
                last_action,
                last_action_time,
            })
        }
        Err(e) => {
            error!("Failed to read status: {}", e);
            Response::Api(ApiResponse::error(e))
        }
    }
}

fn fonts_response(state: &AppState) -> Response {
    match state.read_session(|s| s.style().font_family.clone()) {
        Ok(selected) => Response::Fonts(FontsResponse {
            selected_label: label_for(&selected).to_string(),
            selected,
            categories: FONT_CATEGORIES,
        }),
        Err(e) => {
            error!("Failed to read font selection: {}", e);
            Response::Api(ApiResponse::error(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::{
        overlay::InteractionMode,
        presentation::DEFAULT_HIDE_DELAY,
        state::DEFAULT_CONTAINER,
    };

    fn fresh() -> Arc<AppState> {
        AppState::new(Session::new(120, DEFAULT_CONTAINER), DEFAULT_HIDE_DELAY)
    }

    fn run(state: &AppState, line: &str) -> ApiResponse {
        let command = Command::parse(line).expect("valid command");
        match handle_command(state, command) {
            Response::Api(response) => response,
            other => panic!("unexpected response {:?}", other),
        }
    }

    fn session(response: &ApiResponse) -> &Snapshot {
        response.session.as_ref().expect("response carries a snapshot")
    }

    #[tokio::test]
    async fn controls_stay_disabled_without_a_target() {
        let state = fresh();
        let response = run(&state, "play");
        assert_eq!(response.status, "ignored");
        assert!(!session(&response).controls.play_enabled);

        let response = run(&state, "url not a url");
        assert_eq!(response.status, "ignored");
        assert_eq!(run(&state, "fullscreen").status, "ignored");
    }

    #[tokio::test]
    async fn toggle_switches_between_running_and_paused() {
        let state = fresh();
        run(&state, "url https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10s");
        let response = run(&state, "toggle");
        assert_eq!(response.message, "Countdown running");
        assert!(session(&response).timer.running);
        let response = run(&state, "toggle");
        assert_eq!(response.message, "Countdown paused");
        assert!(!session(&response).timer.running);
        state.teardown().expect("teardown");
    }

    #[tokio::test]
    async fn style_commands_merge_fields() {
        let state = fresh();
        run(&state, "font Georgia");
        run(&state, "opacity 40");
        let response = run(&state, "font-size 30");
        let snapshot = session(&response);
        assert_eq!(snapshot.style.font_size_px, 30);
        assert_eq!(snapshot.style.font_family, "Georgia");
        assert_eq!(snapshot.style.background_opacity_percent, 40);
        assert_eq!(response.message, "Style: 30px Georgia at 40% opacity");
    }

    #[tokio::test]
    async fn unreachable_font_sizes_are_reported_as_adjusted() {
        let state = fresh();
        let response = run(&state, "font-size 12");
        assert_eq!(response.status, "adjusted");
        assert_eq!(session(&response).style.font_size_px, 22);

        run(&state, "container 400x300");
        let response = run(&state, "font-size 200");
        assert_eq!(response.status, "adjusted");
        let snapshot = session(&response);
        assert_eq!(snapshot.style.font_size_px, 122);
        assert!(snapshot.element.expect("laid out").fits_within(snapshot.container));
    }

    #[tokio::test]
    async fn pointer_gesture_round_trip() {
        let state = fresh();
        let response = run(&state, "down 400 45");
        assert_eq!(session(&response).interaction, InteractionMode::Dragging);
        let response = run(&state, "move 420 45");
        assert_eq!(response.status, "ok");
        let response = run(&state, "up");
        assert_eq!(session(&response).interaction, InteractionMode::Idle);
        assert_eq!(run(&state, "up").status, "ignored");
    }

    #[tokio::test]
    async fn embed_error_keeps_play_available() {
        let state = fresh();
        run(&state, "url https://youtu.be/dQw4w9WgXcQ");
        let response = run(&state, "embed-error");
        let snapshot = session(&response);
        assert!(snapshot.controls.embed_degraded);
        assert!(snapshot.controls.play_enabled);
        assert_eq!(
            snapshot.fallback_link.as_deref(),
            Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
        );
        assert_eq!(run(&state, "play").status, "ok");
        state.teardown().expect("teardown");
    }

    #[tokio::test]
    async fn escape_is_consumed_only_in_fullscreen() {
        let state = fresh();
        assert_eq!(run(&state, "key Escape").status, "ignored");
        run(&state, "url https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(run(&state, "fullscreen").message, "Entered fullscreen");
        let response = run(&state, "key Escape");
        assert_eq!(response.status, "ok");
        assert!(!session(&response).fullscreen.active);
        state.teardown().expect("teardown");
    }

    #[tokio::test]
    async fn read_only_commands_have_their_own_shapes() {
        let state = fresh();
        run(&state, "duration 92");
        match handle_command(&state, Command::Status) {
            Response::Status(status) => {
                assert_eq!(status.session.timer.duration_seconds, 90);
                assert_eq!(status.last_action.as_deref(), Some("duration"));
            }
            other => panic!("unexpected response {:?}", other),
        }
        match handle_command(&state, Command::Fonts) {
            Response::Fonts(fonts) => {
                assert_eq!(fonts.selected_label, "Sans Serif");
                assert_eq!(fonts.categories.len(), 4);
            }
            other => panic!("unexpected response {:?}", other),
        }
        let json = handle_command(&state, Command::Health).to_json().expect("json");
        assert!(json.contains(env!("CARGO_PKG_VERSION")));
    }
}
