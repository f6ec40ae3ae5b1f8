//! Renderer behavior through a recording transport.

use std::time::Duration;

use wopr_core::{Beat, Passage, RenderConfig, Renderer, Screen, ansi, step};
use wopr_harness::{CaptureTransport, SimEnv};

fn embedded_newlines(beats: &[Beat]) -> usize {
    beats
        .iter()
        .map(|beat| match beat {
            Beat::Type { text, .. } => text.matches('\n').count(),
            _ => 0,
        })
        .sum()
}

fn capture() -> CaptureTransport {
    CaptureTransport::console(Vec::<String>::new())
}

#[tokio::test]
async fn every_step_renders_its_transcript() {
    for screen in Screen::ALL {
        let step = step(screen);
        let mut transport = capture();
        let mut renderer = Renderer::new(SimEnv::instant(), RenderConfig::instant());

        renderer.render_step(&mut transport, step).await;

        assert_eq!(transport.text(), step.transcript(), "{screen}");
        assert_eq!(
            transport.newline_writes(),
            step.line_bumps() + embedded_newlines(&step.beats),
            "{screen}"
        );
    }
}

#[tokio::test]
async fn passages_render_their_transcript() {
    for passage in [Passage::Help, Passage::GameList, Passage::NotRecognized] {
        let mut transport = capture();
        let mut renderer = Renderer::new(SimEnv::instant(), RenderConfig::instant());

        renderer.render_beats(&mut transport, passage.beats()).await;

        assert_eq!(transport.text(), passage.transcript(), "{passage:?}");
    }
}

#[tokio::test]
async fn typed_text_goes_out_one_character_at_a_time() {
    let mut transport = capture();
    let mut renderer = Renderer::new(SimEnv::instant(), RenderConfig::instant());

    renderer.render_step(&mut transport, step(Screen::Logon)).await;

    assert_eq!(transport.writes(), ["\n", "L", "O", "G", "O", "N", ":", " "]);
}

#[tokio::test]
async fn clear_screen_homes_cursor_and_resets_row() {
    let mut transport = capture();
    let mut renderer = Renderer::new(SimEnv::instant(), RenderConfig::instant());

    renderer.bump(&mut transport, 5).await;
    assert_eq!(renderer.row(), 5);

    renderer.render_step(&mut transport, step(Screen::Greeting)).await;

    assert_eq!(transport.writes()[5], ansi::CLEAR);
    assert_eq!(transport.writes()[6], "\x1b[1;1f");
    assert_eq!(renderer.row(), 2);
}

#[tokio::test]
async fn pauses_follow_pace() {
    let env = SimEnv::instant();
    let mut transport = capture();
    let mut renderer = Renderer::new(env.clone(), RenderConfig::default());

    renderer.render_step(&mut transport, step(Screen::Greeting)).await;

    let typed = "GREETINGS PROFESSOR FALKEN.".len() as u64;
    assert_eq!(env.pauses(), typed);
    assert_eq!(env.total_paused(), Duration::from_millis(20 * typed));
}

#[tokio::test]
async fn maps_render_at_art_pace() {
    let env = SimEnv::instant();
    let mut transport = capture();
    let config = RenderConfig { typing_delay: Duration::ZERO, ..RenderConfig::default() };
    let mut renderer = Renderer::new(env.clone(), config);

    renderer.render_step(&mut transport, step(Screen::GlobalWar)).await;

    let art_chars: usize = step(Screen::GlobalWar)
        .beats
        .iter()
        .map(|beat| match beat {
            Beat::Type { text, pace: wopr_core::Pace::Art } => text.chars().count(),
            _ => 0,
        })
        .sum();
    assert!(art_chars > 0);
    assert_eq!(env.pauses(), art_chars as u64);
    assert_eq!(env.total_paused(), Duration::from_millis(5) * art_chars as u32);
}

#[tokio::test]
async fn zero_delays_never_pause() {
    let env = SimEnv::instant();
    let mut transport = capture();
    let mut renderer = Renderer::new(env.clone(), RenderConfig::instant());

    renderer.identify(&mut transport).await;
    renderer.render_step(&mut transport, step(Screen::GlobalWar)).await;

    assert_eq!(env.pauses(), 0);
}

#[tokio::test]
async fn identify_sweeps_twice_across_the_width() {
    let env = SimEnv::instant();
    let mut transport = capture();
    let config = RenderConfig { terminal_width: 10, ..RenderConfig::default() };
    let mut renderer = Renderer::new(env.clone(), config);

    renderer.identify(&mut transport).await;

    let writes = transport.writes();
    assert_eq!(writes.len(), 2 + 10 + 1 + 1 + 10 + 1);
    assert_eq!(writes[0], ansi::CLEAR);
    assert_eq!(writes[2], format!("\r{}", ansi::FULL_BLOCK));
    assert_eq!(writes[11], format!("\r{}{}", " ".repeat(8), ansi::FULL_BLOCK));
    assert_eq!(writes[12], ansi::CLEAR_AND_RESTORE);
    assert_eq!(writes[13], "\n");
    assert_eq!(writes.last().map(String::as_str), Some(ansi::CLEAR_AND_RESTORE));

    assert_eq!(env.pauses(), 20);
    assert_eq!(env.total_paused(), Duration::from_millis(15 * 20));
    assert_eq!(renderer.row(), 1);
}

#[tokio::test(start_paused = true)]
async fn virtual_time_matches_requested_pauses() {
    let env = SimEnv::virtual_time();
    let mut transport = capture();
    let mut renderer = Renderer::new(env.clone(), RenderConfig::default());
    let start = tokio::time::Instant::now();

    renderer.render_step(&mut transport, step(Screen::PlayGame)).await;

    assert_eq!(start.elapsed(), env.total_paused());
    assert_eq!(env.total_paused(), Duration::from_millis(20) * 35);
}
