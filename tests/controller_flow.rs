//! End-to-end behavior of the control overlay against the headless host
//!
//! These tests drive the controller the way a page would: bind, forward
//! gestures and media events, and check what the widgets show.

use player_overlay::display::{HeadlessDocument, WidgetRole};
use player_overlay::media::{AutoplayPolicy, HeadlessMedia, MediaElement, MediaEvent};
use player_overlay::player::{ControlEvent, OverlayActions, PlayerController};
use player_overlay::utils::Config;
use proptest::prelude::*;
use std::time::{Duration, Instant};

type Controller = PlayerController<HeadlessMedia, HeadlessDocument>;

fn bind(media: HeadlessMedia) -> Controller {
    PlayerController::bind(HeadlessDocument::complete(), Some(media), &Config::default())
}

fn play_glyph(ctl: &Controller) -> String {
    ctl.widgets().play_button.as_ref().unwrap().text().to_string()
}

fn volume_glyph(ctl: &Controller) -> String {
    ctl.widgets().volume_button.as_ref().unwrap().text().to_string()
}

fn volume_fill(ctl: &Controller) -> String {
    ctl.widgets().volume_fill.as_ref().unwrap().width().to_string()
}

#[test]
fn test_play_pause_cycle() {
    let mut config = Config::default();
    config.player.autoplay_muted = false;
    let mut ctl: Controller = PlayerController::bind(
        HeadlessDocument::complete(),
        Some(HeadlessMedia::loaded(200.0, AutoplayPolicy::Allow)),
        &config,
    );
    assert!(ctl.media().unwrap().is_paused());

    ctl.dispatch(ControlEvent::PlayClicked);
    assert!(!ctl.media().unwrap().is_paused());
    assert_eq!(play_glyph(&ctl), "⏸");

    ctl.dispatch(ControlEvent::PlayClicked);
    assert!(ctl.media().unwrap().is_paused());
    assert_eq!(play_glyph(&ctl), "▶");
}

#[test]
fn test_seek_to_middle() {
    let mut ctl = bind(HeadlessMedia::loaded(200.0, AutoplayPolicy::Allow));
    ctl.dispatch(ControlEvent::ScrubTrackClicked { offset_x: 300.0, track_width: 600.0 });

    assert_eq!(ctl.media().unwrap().current_time(), 100.0);
    assert_eq!(ctl.widgets().progress_fill.as_ref().unwrap().width(), "50%");
    assert_eq!(ctl.widgets().current_time.as_ref().unwrap().text(), "1:40");
}

#[test]
fn test_seek_with_unknown_duration_keeps_position() {
    let mut ctl = bind(HeadlessMedia::new(200.0, AutoplayPolicy::Allow));
    ctl.media_mut().unwrap().set_current_time(12.0);

    ctl.dispatch(ControlEvent::ScrubTrackClicked { offset_x: 50.0, track_width: 100.0 });
    assert_eq!(ctl.media().unwrap().current_time(), 12.0);
}

#[test]
fn test_volume_track_quarter() {
    let mut ctl = bind(HeadlessMedia::loaded(200.0, AutoplayPolicy::Muted));
    ctl.dispatch(ControlEvent::VolumeTrackClicked { offset_x: 20.0, track_width: 80.0 });

    let media = ctl.media().unwrap();
    assert_eq!(media.volume(), 0.25);
    assert!(!media.is_muted());
    assert_eq!(volume_glyph(&ctl), "🔊");
    assert_eq!(volume_fill(&ctl), "25%");
    assert!(ctl.has_user_unmuted());
}

#[test]
fn test_mute_from_unmuted() {
    let mut ctl = bind(HeadlessMedia::loaded(200.0, AutoplayPolicy::Allow));
    ctl.dispatch(ControlEvent::VolumeTrackClicked { offset_x: 60.0, track_width: 100.0 });
    assert!(!ctl.media().unwrap().is_muted());

    ctl.dispatch(ControlEvent::VolumeButtonClicked);
    let media = ctl.media().unwrap();
    assert!(media.is_muted());
    assert_eq!(media.volume(), 0.0);
    assert_eq!(volume_glyph(&ctl), "🔇");
    assert_eq!(volume_fill(&ctl), "0%");
}

#[test]
fn test_toggle_mute_twice_restores_state() {
    // Starting muted at full volume, as after autoplay
    let mut ctl = bind(HeadlessMedia::loaded(200.0, AutoplayPolicy::Allow));
    ctl.dispatch(ControlEvent::VolumeButtonClicked);
    ctl.dispatch(ControlEvent::VolumeButtonClicked);
    assert!(ctl.media().unwrap().is_muted());
    assert_eq!(ctl.media().unwrap().volume(), 0.0);

    // From muted=true, volume=0 the cycle is exact
    ctl.dispatch(ControlEvent::VolumeButtonClicked);
    ctl.dispatch(ControlEvent::VolumeButtonClicked);
    assert!(ctl.media().unwrap().is_muted());
    assert_eq!(ctl.media().unwrap().volume(), 0.0);

    // And from muted=false, volume=1
    ctl.dispatch(ControlEvent::VolumeButtonClicked);
    assert!(!ctl.media().unwrap().is_muted());
    ctl.dispatch(ControlEvent::VolumeButtonClicked);
    ctl.dispatch(ControlEvent::VolumeButtonClicked);
    assert!(!ctl.media().unwrap().is_muted());
    assert_eq!(ctl.media().unwrap().volume(), 1.0);
}

#[test]
fn test_unmute_from_overlay_resumes_and_hides() {
    let mut ctl = bind(HeadlessMedia::loaded(200.0, AutoplayPolicy::Blocked));
    assert!(ctl.media().unwrap().is_muted());
    assert!(ctl.media().unwrap().is_paused());

    ctl.unmute_from_overlay();
    let media = ctl.media().unwrap();
    assert!(!media.is_muted());
    assert_eq!(media.volume(), 1.0);
    // The blocked resume attempt is swallowed
    assert!(media.is_paused());
    assert_eq!(ctl.widgets().unmute_overlay.as_ref().unwrap().opacity(), 0.0);

    ctl.tick(Instant::now() + Duration::from_secs(1));
    assert!(!ctl.widgets().unmute_overlay.as_ref().unwrap().is_displayed());
}

#[test]
fn test_unmute_from_overlay_starts_paused_media() {
    let mut config = Config::default();
    config.player.autoplay_muted = false;
    let mut ctl: Controller = PlayerController::bind(
        HeadlessDocument::complete(),
        Some(HeadlessMedia::loaded(200.0, AutoplayPolicy::Allow)),
        &config,
    );
    ctl.media_mut().unwrap().set_muted(true);

    let actions: &mut dyn OverlayActions = &mut ctl;
    actions.unmute_from_overlay();

    assert!(!ctl.media().unwrap().is_paused());
    assert!(!ctl.media().unwrap().is_muted());
}

#[test]
fn test_playback_to_end() {
    let mut ctl = bind(HeadlessMedia::new(1.0, AutoplayPolicy::Muted));
    ctl.dispatch(ControlEvent::PlayClicked);
    ctl.dispatch(ControlEvent::PlayClicked);
    assert_eq!(play_glyph(&ctl), "⏸");

    for _ in 0..6 {
        let events = ctl.media_mut().unwrap().advance(Duration::from_millis(250));
        for event in events {
            ctl.dispatch_media(event);
        }
    }

    assert_eq!(play_glyph(&ctl), "▶");
    assert_eq!(ctl.widgets().duration.as_ref().unwrap().text(), "0:01");
    assert_eq!(ctl.widgets().progress_fill.as_ref().unwrap().width(), "100%");
}

#[test]
fn test_missing_widgets_degrade() {
    let doc = HeadlessDocument::complete().without(&[
        WidgetRole::PlayButton,
        WidgetRole::VolumeFill,
        WidgetRole::Container,
        WidgetRole::UnmuteOverlay,
    ]);
    let mut ctl: Controller =
        PlayerController::bind(doc, Some(HeadlessMedia::loaded(30.0, AutoplayPolicy::Allow)), &Config::default());

    ctl.dispatch(ControlEvent::PlayClicked);
    assert!(!ctl.media().unwrap().is_paused());

    ctl.dispatch(ControlEvent::FullscreenClicked);
    assert!(ctl.display().fullscreen_element().is_none());

    ctl.dispatch(ControlEvent::VolumeButtonClicked);
    assert_eq!(volume_glyph(&ctl), "🔊");

    ctl.unmute_from_overlay();
    ctl.dispatch_media(MediaEvent::TimeUpdate);
    assert_eq!(ctl.widgets().current_time.as_ref().unwrap().text(), "0:00");
}

proptest! {
    #[test]
    fn volume_click_stays_in_unit_range(offset in -1.0e4f64..1.0e4, width in 1.0f64..2.0e3) {
        let mut ctl = bind(HeadlessMedia::loaded(60.0, AutoplayPolicy::Allow));
        ctl.dispatch(ControlEvent::VolumeTrackClicked { offset_x: offset, track_width: width });

        let volume = ctl.media().unwrap().volume();
        prop_assert!((0.0..=1.0).contains(&volume));
        if offset <= 0.0 {
            prop_assert_eq!(volume, 0.0);
        }
        if offset >= width {
            prop_assert_eq!(volume, 1.0);
        }
    }
}
