//! Kick Résumé entry point
//!
//! Natively this runs a headless demo session: autoplay takes every kick,
//! events are logged, and lifetime progress is merged into an in-memory store.
//! The browser build drives the library directly from the page.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use kick_resume::persistence::MemoryStore;
    use kick_resume::sim::{GameEvent, GamePhase, GameState, TickInput, choose_launch, tick};
    use kick_resume::{Progress, ResumeData, Tuning};

    #[derive(Parser, Debug)]
    #[command(author, version, about = "Run a headless Kick Résumé session", long_about = None)]
    pub struct Args {
        /// Session seed (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Surface width in pixels
        #[arg(long, default_value_t = 800.0)]
        width: f32,
        /// Surface height in pixels
        #[arg(long, default_value_t = 900.0)]
        height: f32,
        /// Number of levels to play before stopping
        #[arg(long, default_value_t = 3)]
        levels: u32,
        /// Safety cap on simulated frames
        #[arg(long, default_value_t = 200_000)]
        max_ticks: u64,
        /// JSON tuning overrides
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Résumé document to show on hits
        #[arg(long)]
        resume: Option<PathBuf>,
    }

    pub fn run(args: Args) -> Result<()> {
        let tuning = match &args.tuning {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("read tuning {:?}", path))?;
                Tuning::from_json_or_default(&json)
            }
            None => Tuning::default(),
        };

        // A missing résumé is fine; an unreadable path the user named is not
        let resume = match &args.resume {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("read resume {:?}", path))?;
                ResumeData::from_json_or_default(&json)
            }
            None => ResumeData::default(),
        };

        let seed = args.seed.unwrap_or_else(rand::random);
        let mut state = GameState::new(seed, args.width, args.height, tuning);
        let mut store = MemoryStore::new();
        Progress::load(&store).apply(&mut state);
        log::info!("Kick Résumé (native) starting with seed {}", seed);

        let mut input = TickInput {
            start: true,
            dismiss_tutorial: true,
            ..Default::default()
        };

        for _ in 0..args.max_ticks {
            if input.launch.is_none() && state.can_aim() {
                input.launch = choose_launch(&state);
            }

            let events = tick(&mut state, &input);
            input = TickInput::default();

            for event in events {
                match event {
                    GameEvent::TutorialDismissed => Progress::mark_tutorial_seen(&mut store),
                    GameEvent::TargetHit { section, points, combo } => {
                        let popup = resume.popup(section.label());
                        log::info!("{} +{} (combo {}): {}", popup.title, points, combo, popup.lines.join(" | "));
                    }
                    GameEvent::Saved { .. } => log::info!("Saved! {} lives left", state.lives),
                    GameEvent::Missed => log::info!("Missed, {} lives left", state.lives),
                    GameEvent::AchievementUnlocked(id) => {
                        let info = id.info();
                        log::info!("{} {}: {}", info.icon, info.title, info.description);
                    }
                    GameEvent::LevelCleared { .. } | GameEvent::GameOver { .. } => {
                        Progress::record_session(&mut store, &state);
                    }
                    _ => {}
                }
            }

            match state.phase {
                GamePhase::LevelComplete { delay_ticks: 0 } => {
                    if state.level >= args.levels {
                        break;
                    }
                    input.advance = true;
                }
                GamePhase::GameOver => break,
                _ => {}
            }
        }

        let progress = Progress::load(&store);
        println!(
            "seed {} | level {} | score {} | targets {} | best combo {} | achievements {}",
            seed,
            state.level,
            state.score,
            state.total_targets_hit,
            state.combo.best,
            progress.unlocked_achievements.join(",")
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    kick_resume::init_logging();
    demo::run(demo::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts call into the library directly
}
