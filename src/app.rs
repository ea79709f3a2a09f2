use crate::clock::{pace, FixedStep};
use crate::config::{load_catalog, load_settings, Paths, Settings};
use crate::input::{drain_inputs, Input};
use crate::model::Rates;
use crate::render::{compose, Screen};
use crate::rng::BugRng;
use crate::session::{Session, Signal};
use crate::shop::Catalog;
use crate::Args;
use anyhow::Context;
use std::time::{Duration, Instant};
use tracing::info;

/// Most simulation steps run in one frame after a stall.
const MAX_CATCH_UP_STEPS: u32 = 250;

pub(crate) struct App {
    settings: Settings,
    session: Session,
    screen: Screen,
    should_quit: bool,
}

impl App {
    fn init(args: &Args, paths: &Paths) -> anyhow::Result<Self> {
        let settings = merge_settings(load_settings(&paths.settings_path), args);

        let catalog = match &settings.catalog_path {
            Some(path) => load_catalog(path).context("loading shop catalog")?,
            None => Catalog::default(),
        };
        let rng = match settings.seed {
            Some(seed) => BugRng::seeded(seed),
            None => BugRng::from_entropy(),
        };
        info!(
            tick_ms = settings.tick_ms,
            items = catalog.len(),
            seeded = settings.seed.is_some(),
            "session ready"
        );

        let session = Session::new(catalog, Rates::default(), rng);
        let screen = Screen::begin(settings.enable_color)?;

        Ok(Self {
            settings,
            session,
            screen,
            should_quit: false,
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let fps = self.settings.fps_cap.clamp(10, 240);
        let frame_dt = Duration::from_secs_f32(1.0 / fps as f32);
        let mut clock = FixedStep::new(
            Duration::from_millis(self.settings.tick_ms),
            MAX_CATCH_UP_STEPS,
        );
        let mut last_frame = Instant::now();

        while !self.should_quit {
            let frame_start = Instant::now();
            self.screen.resize_if_needed()?;

            for input in drain_inputs()? {
                let signal = match input {
                    Input::Interrupt => Signal::Quit,
                    Input::Key(key) => self.session.handle_input(key),
                };
                if signal == Signal::Quit {
                    info!("quit requested");
                    self.should_quit = true;
                    break;
                }
            }

            let now = Instant::now();
            let steps = clock.advance(now.saturating_duration_since(last_frame));
            last_frame = now;
            for _ in 0..steps {
                self.session.update();
            }

            self.render_frame()?;
            pace(frame_start, frame_dt);
        }

        self.screen.end()?;
        Ok(())
    }

    fn render_frame(&mut self) -> anyhow::Result<()> {
        let lines = compose(&self.session, self.screen.width(), self.settings.tick_ms);
        self.screen.present(&lines)
    }
}

/// Command-line flags win over the settings file.
pub(crate) fn merge_settings(mut settings: Settings, args: &Args) -> Settings {
    if let Some(ms) = args.tick_ms {
        settings.tick_ms = ms;
    }
    if let Some(fps) = args.fps {
        settings.fps_cap = fps;
    }
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(path) = &args.catalog {
        settings.catalog_path = Some(path.clone());
    }
    if args.no_color {
        settings.enable_color = false;
    }
    settings.tick_ms = settings.tick_ms.max(1);
    settings
}

pub(crate) fn run(args: &Args, paths: &Paths) -> anyhow::Result<()> {
    let mut app = App::init(args, paths)?;
    let result = app.run();
    if result.is_err() {
        // leave the terminal usable even when the loop bailed
        let _ = app.screen.end();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn flags_override_settings() {
        let args = Args::parse_from([
            "debug-rpg",
            "--tick-ms",
            "20",
            "--seed",
            "4",
            "--catalog",
            "shop.json",
            "--no-color",
        ]);
        let s = merge_settings(Settings::default(), &args);
        assert_eq!(s.tick_ms, 20);
        assert_eq!(s.seed, Some(4));
        assert_eq!(s.catalog_path, Some(PathBuf::from("shop.json")));
        assert!(!s.enable_color);
        assert_eq!(s.fps_cap, 30);
    }

    #[test]
    fn no_flags_keep_file_settings() {
        let args = Args::parse_from(["debug-rpg"]);
        let file = Settings {
            tick_ms: 15,
            seed: Some(8),
            ..Settings::default()
        };
        assert_eq!(merge_settings(file.clone(), &args), file);
    }

    #[test]
    fn zero_tick_is_clamped() {
        let args = Args::parse_from(["debug-rpg", "--tick-ms", "0"]);
        assert_eq!(merge_settings(Settings::default(), &args).tick_ms, 1);
    }
}
