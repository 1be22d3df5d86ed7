use neotype::language::Language;
use neotype::session::{Mode, Session, SessionConfig, Status};
use neotype::stats;
use neotype::word_generator::{FixedTextProvider, TextProvider, WordGenerator};

fn config(mode: Mode) -> SessionConfig {
    SessionConfig {
        mode,
        seconds: 15,
        words: 2,
    }
}

#[test]
fn typing_and_correcting_updates_counters_per_snapshot() {
    let provider = FixedTextProvider::new("the cat sat");
    let mut session = Session::new(config(Mode::WordLimited), &provider);

    session.apply_input("the");
    assert_eq!(session.status(), Status::Running);
    assert_eq!(session.correct_chars(), 3);
    assert_eq!(session.error_chars(), 0);
    assert_eq!(session.total_keystrokes(), 1);

    session.apply_input("thx");
    assert_eq!(session.correct_chars(), 2);
    assert_eq!(session.error_chars(), 1);
    assert_eq!(session.total_keystrokes(), 2);
}

#[test]
fn word_session_finishes_on_full_length_without_any_tick() {
    let provider = FixedTextProvider::new("cat dog");
    let mut session = Session::new(config(Mode::WordLimited), &provider);

    session.apply_input("cat dog");

    assert_eq!(session.status(), Status::Finished);
    assert_eq!(session.correct_chars(), 7);
    assert_eq!(session.error_chars(), 0);
}

#[test]
fn timed_session_finishes_when_the_countdown_reports_zero() {
    let provider = FixedTextProvider::new("the cat sat");
    let mut session = Session::new(config(Mode::TimeLimited), &provider);
    assert_eq!(session.remaining_secs(), 15);

    session.apply_input("t");
    session.tick(0, 15);

    assert_eq!(session.status(), Status::Finished);
    assert_eq!(session.remaining_secs(), 0);
}

#[test]
fn reset_mid_session_yields_a_fresh_idle_session() {
    let generator = WordGenerator::new(Language::new("common"));
    let mut session = Session::new(
        SessionConfig {
            mode: Mode::WordLimited,
            seconds: 60,
            words: 10,
        },
        &generator,
    );

    let first_reference = session.reference().to_string();
    assert_eq!(first_reference.split(' ').count(), 10);

    session.apply_input("x");
    session.tick(0, 3);
    assert_eq!(session.status(), Status::Running);

    session.reset(&generator);

    assert_eq!(session.status(), Status::Idle);
    assert_eq!(session.typed(), "");
    assert_eq!(session.total_keystrokes(), 0);
    assert_eq!(session.correct_chars(), 0);
    assert_eq!(session.error_chars(), 0);
    assert_eq!(session.elapsed_secs(), 0);
    assert_eq!(session.reference().split(' ').count(), 10);
}

#[test]
fn timed_session_requests_the_fixed_word_buffer() {
    let generator = WordGenerator::new(Language::new("common"));
    let session = Session::new(config(Mode::TimeLimited), &generator);

    // Timed sessions always draw the generous fixed buffer, not the
    // configured word count.
    assert_eq!(session.reference().split(' ').count(), 100);
}

#[test]
fn engine_invariants_hold_across_a_noisy_edit_sequence() {
    let provider = FixedTextProvider::new("cat dog");
    let mut session = Session::new(config(Mode::WordLimited), &provider);
    let reference_len = session.reference().chars().count();

    let inputs = [
        "c", "cx", "c", "ca", "cat", "cat ", "cat x", "cat ", "cat d", "way too long to accept",
        "cat do",
    ];
    for input in inputs {
        session.apply_input(input);
        assert!(session.typed().chars().count() <= reference_len);
        assert_eq!(
            session.correct_chars() + session.error_chars(),
            session.typed().chars().count()
        );
    }

    // The overlong snapshot was rejected, everything else accepted.
    assert_eq!(session.total_keystrokes(), inputs.len() as u32 - 1);
    assert_eq!(session.typed(), "cat do");
}

#[test]
fn stats_functions_match_their_documented_fixpoints() {
    assert_eq!(stats::wpm(0, 0), 0);
    assert_eq!(stats::wpm(250, 60), 50);
    assert_eq!(stats::accuracy(0, 0), 100);
    assert_eq!(stats::accuracy(50, 100), 50);
    assert_eq!(stats::accuracy(100, 100), 100);
}

#[test]
fn generated_text_satisfies_the_provider_contract() {
    let generator = WordGenerator::new(Language::merged("mixed", &["common", "cyber"]));

    for count in [10, 25, 50, 100] {
        let text = generator.generate(count);
        assert_eq!(text.split(' ').count(), count);
        assert_eq!(text, text.to_lowercase());
    }
}
