use serde::{Deserialize, Serialize};

pub(crate) const DAY_MAX: u32 = 30;
pub(crate) const TIME_MAX: f64 = 20.0;
pub(crate) const BUG_MAX: f64 = 500.0;
pub(crate) const BUG_WARNING: f64 = 400.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    Main,
    Debug,
    Write,
    Buy,
    About,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    Fired,
    Survived,
}

/// Economy parameters. Purchases rewrite some of these for the rest of the run.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Rates {
    pub(crate) bugs_per_size: f64,
    pub(crate) cash_per_bug: f64,
    pub(crate) code_per_monkey: f64,
    pub(crate) debug_per_intern: f64,
    pub(crate) time_per_tick: f64,
    pub(crate) code_per_keystroke: f64,
}

impl Default for Rates {
    fn default() -> Self {
        Self {
            bugs_per_size: 0.001,
            cash_per_bug: 2.0,
            code_per_monkey: 0.01,
            debug_per_intern: 0.01,
            time_per_tick: 0.006,
            code_per_keystroke: 0.05,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct ShopItem {
    pub(crate) text: String,
    pub(crate) cost: f64,
}

/// Text the render side shows under the status line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Panel {
    pub(crate) commands: String,
    pub(crate) display: String,
}

#[derive(Clone, Debug)]
pub(crate) struct GameState {
    pub(crate) cash: f64,
    pub(crate) bugs: f64,
    pub(crate) size: f64,
    pub(crate) size_unit: &'static str,
    pub(crate) day: u32,
    pub(crate) day_max: u32,
    pub(crate) time: f64,
    pub(crate) time_max: f64,
    pub(crate) bug_max: f64,
    pub(crate) bug_warning: f64,
    pub(crate) started: bool,
    pub(crate) ended: bool,
    pub(crate) loss: bool,
    pub(crate) current_bug: u8,
    pub(crate) mode: Mode,
    pub(crate) shop_index: usize,
    pub(crate) owned: Vec<u32>,
    pub(crate) write_buffer: String,
    pub(crate) panel: Panel,
}

impl GameState {
    pub(crate) fn new(item_count: usize) -> Self {
        Self {
            cash: 0.0,
            bugs: 0.0,
            size: 1.0,
            size_unit: "kb",
            day: 1,
            day_max: DAY_MAX,
            time: 0.0,
            time_max: TIME_MAX,
            bug_max: BUG_MAX,
            bug_warning: BUG_WARNING,
            started: false,
            ended: false,
            loss: false,
            current_bug: 1,
            mode: Mode::Main,
            shop_index: 0,
            owned: vec![0; item_count],
            write_buffer: String::new(),
            panel: Panel::default(),
        }
    }

    pub(crate) fn owned_count(&self, index: usize) -> u32 {
        self.owned.get(index).copied().unwrap_or(0)
    }

    pub(crate) fn outcome(&self) -> Option<Outcome> {
        if !self.ended {
            return None;
        }
        Some(if self.loss {
            Outcome::Fired
        } else {
            Outcome::Survived
        })
    }
}
