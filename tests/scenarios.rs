//! End-to-end layout scenarios driven through the public engine API.

mod common;

use common::{entries, recorder, EventLog, FakeSurface};
use std::time::Duration;
use wordcloud::layout::{LayoutConfig, PassState, SpiralParams};
use wordcloud::model::{Canvas, CloudError, Point};
use wordcloud::{CloudEvent, WordCloud};

const LIMIT: Duration = Duration::from_secs(60);

fn cloud_with(config: LayoutConfig, surface: FakeSurface) -> WordCloud<FakeSurface> {
    WordCloud::seeded(config, Canvas::new(100.0, 100.0), surface, 99).expect("valid config")
}

#[test]
fn two_squares_are_placed_without_overlap_nearest_first() {
    let mut cloud = cloud_with(LayoutConfig::default(), FakeSurface::uniform(10.0, 10.0));
    cloud.submit(entries(&["cat", "dog"]));

    assert!(cloud.advance_until_idle(LIMIT));

    let placed: Vec<_> = cloud.placements().iter().collect();
    assert_eq!(placed.len(), 2);
    let (cat, dog) = (placed[0], placed[1]);
    assert_eq!(cat.word.as_str(), "cat");
    assert_eq!(dog.word.as_str(), "dog");
    assert!(
        !cat.rect().overlaps(&dog.rect()),
        "cat {:?} and dog {:?} overlap",
        cat.rect(),
        dog.rect()
    );
    let center = Point::new(50.0, 50.0);
    assert!(cat.center.distance_to(center) <= dog.center.distance_to(center));
}

#[test]
fn oversized_word_fails_after_iteration_ceiling() {
    let config = LayoutConfig {
        spiral: SpiralParams {
            max_iterations: 500,
            ..SpiralParams::default()
        },
        ..LayoutConfig::default()
    };
    let mut cloud = cloud_with(config, FakeSurface::uniform(200.0, 200.0));
    let log = EventLog::default();
    cloud.on_event(recorder(&log));
    cloud.submit(entries(&["huge"]));

    assert!(cloud.advance_until_idle(LIMIT), "pass must terminate");

    let events = log.borrow();
    let failure = events
        .iter()
        .find_map(|e| match e {
            CloudEvent::PlacementFailed { word, error } => Some((word.clone(), error.clone())),
            _ => None,
        })
        .expect("failure reported");
    assert_eq!(failure.0.as_str(), "huge");
    assert!(
        matches!(failure.1, CloudError::PlacementUnresolved { iterations: 500, .. }),
        "got {:?}",
        failure.1
    );
    assert!(cloud.placements().is_empty());
    assert_eq!(events.last(), Some(&CloudEvent::PostPopulate));
}

#[test]
fn reset_after_pass_leaves_nothing_behind() {
    let mut cloud = cloud_with(LayoutConfig::default(), FakeSurface::uniform(10.0, 10.0));
    let log = EventLog::default();
    cloud.on_event(recorder(&log));
    cloud.submit(entries(&["a"]));
    cloud.advance_until_idle(LIMIT);
    assert!(log.borrow().contains(&CloudEvent::PostPopulate));

    cloud.reset();

    assert!(cloud.collision_index().is_empty());
    assert!(cloud.placements().is_empty());
    assert_eq!(cloud.pending_timers(), 0);
    assert_eq!(cloud.state(), PassState::Idle);
}

#[test]
fn superseded_submission_is_never_committed() {
    let mut cloud = cloud_with(LayoutConfig::default(), FakeSurface::uniform(10.0, 10.0));
    cloud.submit(entries(&["one", "two", "three"]));
    cloud.advance(Duration::from_millis(105));
    assert!(
        matches!(cloud.state(), PassState::Running(_)),
        "first pass has started, got {:?}",
        cloud.state()
    );
    assert!(cloud.placements().is_empty());

    cloud.submit(entries(&["four", "five"]));
    cloud.advance_until_idle(LIMIT);

    assert_eq!(cloud.surface().inserted, vec!["four", "five"]);
}

#[test]
fn submission_mid_pass_replaces_scene_with_single_post_populate() {
    let mut cloud = cloud_with(LayoutConfig::default(), FakeSurface::uniform(10.0, 10.0));
    let log = EventLog::default();
    cloud.on_event(recorder(&log));
    cloud.submit(entries(&["one", "two", "three"]));
    cloud.advance(Duration::from_millis(115));
    assert_eq!(cloud.placements().len(), 1, "first pass is under way");

    cloud.submit(entries(&["four", "five"]));
    cloud.advance_until_idle(LIMIT);

    let words: Vec<_> = cloud.placements().iter().map(|p| p.word.to_string()).collect();
    assert_eq!(words, vec!["four", "five"]);
    assert_eq!(
        cloud.surface().visible.len(),
        2,
        "stale visuals must be removed"
    );
    let events = log.borrow();
    assert_eq!(
        events.iter().filter(|e| **e == CloudEvent::PostPopulate).count(),
        1
    );
    assert_eq!(events.first(), Some(&CloudEvent::PrePopulate));
}

#[test]
fn highlights_only_target_current_words() {
    let mut cloud = cloud_with(LayoutConfig::default(), FakeSurface::uniform(10.0, 10.0));
    cloud.submit(entries(&["old"]));
    cloud.advance_until_idle(LIMIT);
    cloud.advance(Duration::from_secs(2));

    cloud.submit(entries(&["new"]));
    let before = cloud.surface().highlighted.len();
    cloud.advance_until_idle(LIMIT);
    cloud.advance(Duration::from_secs(5));

    let later = &cloud.surface().highlighted[before..];
    assert!(!later.is_empty());
    assert!(
        later.iter().all(|w| w == "new"),
        "highlights after resubmission: {later:?}"
    );
}

#[test]
fn footprints_are_measured_once_across_passes() {
    let mut cloud = cloud_with(LayoutConfig::default(), FakeSurface::uniform(10.0, 10.0));
    cloud.submit(entries(&["cat", "dog"]));
    cloud.advance_until_idle(LIMIT);

    cloud.relayout();
    cloud.advance_until_idle(LIMIT);
    cloud.submit(entries(&["dog", "cat"]));
    cloud.advance_until_idle(LIMIT);

    assert_eq!(cloud.surface().measured, vec!["cat", "dog"]);
}
