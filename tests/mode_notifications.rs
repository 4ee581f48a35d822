use scriptswitch::config::Config;
use scriptswitch::platform::SetupError;
use scriptswitch::{Engine, Mode, RequestOutcome, TapDecision, Task};
use tracing_test::traced_test;

mod support;
use support::{TestHost, letter_down, letter_up};

fn engine() -> Engine {
    Engine::new(&Config::default())
}

/// Drives one full consumed keystroke so the engine has requested `Latin`
/// and armed its enforcement window.
fn commit_latin_switch(engine: &mut Engine, host: &mut TestHost) {
    assert_eq!(
        engine.handle_key(host, &letter_down(b'k', 1_000)),
        TapDecision::Swallow
    );
    let tasks = host.drain_tasks();
    assert_eq!(tasks.len(), 1);
    let (delay, task) = tasks.into_iter().next().unwrap();
    let at = 1_000 + delay;
    engine.run_task(host, task, at);
    assert_eq!(host.selects, vec![Mode::Latin]);
    assert_eq!(
        engine.handle_key(host, &letter_up(b'k', at + 10)),
        TapDecision::Swallow
    );
}

#[test]
fn external_reversal_inside_the_window_is_reverted() {
    let mut engine = engine();
    let mut host = TestHost::with_context(Mode::Foreign, 5, 't');
    commit_latin_switch(&mut engine, &mut host);

    // Something flips the source back right after our switch.
    host.mode = Some(Mode::Foreign);
    engine.on_source_change(&mut host, "com.example.foreign", 1_100);

    // One corrective request plus one scheduled re-check.
    assert_eq!(host.selects, vec![Mode::Latin, Mode::Latin]);
    assert_eq!(host.mode, Some(Mode::Latin));
    let tasks = host.drain_tasks();
    assert_eq!(tasks, vec![(20, Task::EnforceRecheck)]);

    // The mode reads right by the time the re-check fires: nothing more.
    engine.run_task(&mut host, Task::EnforceRecheck, 1_120);
    assert_eq!(host.selects.len(), 2);
    assert!(host.tasks.is_empty());
}

#[test]
fn switch_still_in_flight_is_caught_by_the_recheck() {
    let mut engine = engine();
    let mut host = TestHost::with_context(Mode::Foreign, 5, 't');
    host.apply_selects = false;
    commit_latin_switch(&mut engine, &mut host);

    // A change notification arrives but the read-back still says Foreign.
    engine.on_source_change(&mut host, "com.example.stale", 1_100);
    assert_eq!(host.selects.len(), 2);

    let tasks = host.drain_tasks();
    assert_eq!(tasks, vec![(20, Task::EnforceRecheck)]);

    // Still reverted at the re-check: one more corrective, then silence.
    engine.run_task(&mut host, Task::EnforceRecheck, 1_120);
    assert_eq!(host.selects.len(), 3);
    assert!(host.tasks.is_empty());
}

#[test]
fn duplicate_notifications_are_absorbed() {
    let mut engine = engine();
    let mut host = TestHost::with_context(Mode::Foreign, 5, 't');
    host.apply_selects = false;
    commit_latin_switch(&mut engine, &mut host);

    engine.on_source_change(&mut host, "com.example.foreign", 1_100);
    assert_eq!(host.selects.len(), 2);
    assert_eq!(host.tasks.len(), 1);

    // The platform fires the same notification twice more; the window slides
    // with each duplicate.
    engine.on_source_change(&mut host, "com.example.foreign", 1_250);
    engine.on_source_change(&mut host, "com.example.foreign", 1_420);
    assert_eq!(host.selects.len(), 2);
    assert_eq!(host.tasks.len(), 1);

    // A different id is a real change and is fought again.
    engine.on_source_change(&mut host, "com.example.other", 1_430);
    assert_eq!(host.selects.len(), 3);
    // The pending re-check is not stacked.
    assert_eq!(host.tasks.len(), 1);
}

#[test]
fn enforcement_expires_after_its_window() {
    let mut engine = engine();
    let mut host = TestHost::with_context(Mode::Foreign, 5, 't');
    commit_latin_switch(&mut engine, &mut host);

    // Well past the window: an external change is the user's business.
    host.mode = Some(Mode::Foreign);
    engine.on_source_change(&mut host, "com.example.foreign", 1_700);

    assert_eq!(host.selects.len(), 1);
    assert!(host.tasks.is_empty());
}

#[test]
fn unreadable_mode_in_a_notification_changes_nothing() {
    let mut engine = engine();
    let mut host = TestHost::with_context(Mode::Foreign, 5, 't');
    commit_latin_switch(&mut engine, &mut host);

    host.mode = None;
    engine.on_source_change(&mut host, "com.example.mystery", 1_100);

    assert_eq!(host.selects.len(), 1);
    assert!(host.tasks.is_empty());
}

#[test]
fn pausing_disarms_enforcement() {
    let mut engine = engine();
    let mut host = TestHost::with_context(Mode::Foreign, 5, 't');
    commit_latin_switch(&mut engine, &mut host);

    engine.set_paused(true);

    // A manual change while paused is deliberate; it must not be fought.
    host.mode = Some(Mode::Foreign);
    engine.on_source_change(&mut host, "com.example.foreign", 1_100);

    assert_eq!(host.selects.len(), 1);
    assert!(host.tasks.is_empty());
}

#[test]
fn disabled_engine_ignores_notifications() {
    let mut engine = engine();
    let mut host = TestHost::with_context(Mode::Foreign, 5, 't');
    commit_latin_switch(&mut engine, &mut host);

    engine.on_setup_failure(&SetupError::TapUnavailable("tap died".into()));

    host.mode = Some(Mode::Foreign);
    engine.on_source_change(&mut host, "com.example.foreign", 1_100);

    assert_eq!(host.selects.len(), 1);
    assert!(host.tasks.is_empty());
}

#[traced_test]
#[test]
fn missing_source_is_reported_and_typing_flows_on() {
    let mut engine = engine();
    let mut host = TestHost::with_context(Mode::Foreign, 5, 't');
    host.missing_source = Some(Mode::Latin);

    assert_eq!(
        engine.handle_key(&mut host, &letter_down(b'k', 1_000)),
        TapDecision::Swallow
    );
    let tasks = host.drain_tasks();
    let (delay, task) = tasks.into_iter().next().unwrap();
    engine.run_task(&mut host, task, 1_000 + delay);

    // The request failed, but the keystroke is replayed and its up consumed.
    assert_eq!(host.selects, vec![Mode::Latin]);
    assert_eq!(host.posted.len(), 2);
    assert!(logs_contain("input source switch failed"));
    assert_eq!(
        engine.handle_key(&mut host, &letter_up(b'k', 1_040)),
        TapDecision::Swallow
    );

    // No latch and no fallback: the next qualifying keystroke tries again.
    assert_eq!(
        engine.handle_key(&mut host, &letter_down(b'm', 1_500)),
        TapDecision::Swallow
    );
    let tasks = host.drain_tasks();
    let (delay, task) = tasks.into_iter().next().unwrap();
    engine.run_task(&mut host, task, 1_500 + delay);

    assert_eq!(host.selects, vec![Mode::Latin, Mode::Latin]);
    assert_eq!(host.posted.len(), 4);
}

#[test]
fn force_mode_switches_without_arming_enforcement() {
    let mut engine = engine();
    let mut host = TestHost::with_context(Mode::Foreign, 5, 't');

    assert_eq!(
        engine.force_mode(&mut host, Mode::Latin, 1_000),
        RequestOutcome::Requested
    );
    assert_eq!(host.selects, vec![Mode::Latin]);

    // The user changes their mind straight away; a forced switch is not
    // defended the way a decided one is.
    host.mode = Some(Mode::Foreign);
    engine.on_source_change(&mut host, "com.example.foreign", 1_050);
    assert_eq!(host.selects.len(), 1);
    assert!(host.tasks.is_empty());

    // Decisions stay suspended for the grace window.
    assert_eq!(
        engine.handle_key(&mut host, &letter_down(b'k', 1_200)),
        TapDecision::Pass
    );

    // And resume once it lapses.
    assert_eq!(
        engine.handle_key(&mut host, &letter_down(b'm', 1_600)),
        TapDecision::Swallow
    );
}

#[test]
fn forcing_the_current_mode_is_a_quiet_noop() {
    let mut engine = engine();
    let mut host = TestHost::with_context(Mode::Latin, 5, 't');

    assert_eq!(
        engine.force_mode(&mut host, Mode::Latin, 1_000),
        RequestOutcome::AlreadyCurrent
    );
    assert!(host.selects.is_empty());
}
