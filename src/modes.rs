use crate::input::Key;
use crate::model::{GameState, Mode, Panel};
use crate::session::{Session, Signal};
use crate::shop::{purchase, Catalog};
use tracing::{debug, info};

pub(crate) const WRITE_BUFFER_MAX: usize = 50;
pub(crate) const BUG_ROW: &str = "[1] [2] [3] [4] [5] [6] [7] [8] [9] [0]";

impl Session {
    pub(crate) fn handle_input(&mut self, key: Key) -> Signal {
        let st = &mut self.state;

        if !st.started && key == Key::Confirm {
            st.started = true;
            st.mode = Mode::Main;
            info!("game started");
            return Signal::Continue;
        }
        if st.ended && key == Key::Cancel {
            return Signal::Quit;
        }

        match st.mode {
            Mode::Main => {
                let next = match key {
                    Key::Cancel => return Signal::Quit,
                    Key::Char(c) => match c.to_ascii_lowercase() {
                        'd' => {
                            st.current_bug = self.rng.next_bug();
                            Some(Mode::Debug)
                        }
                        'w' => Some(Mode::Write),
                        'b' => {
                            st.shop_index = 0;
                            Some(Mode::Buy)
                        }
                        'a' => Some(Mode::About),
                        _ => None,
                    },
                    Key::Confirm | Key::Left | Key::Right => None,
                };
                if let Some(mode) = next {
                    debug!(?mode, "mode change");
                    st.mode = mode;
                }
            }
            _ if key == Key::Cancel => {
                debug!(from = ?st.mode, "back to main");
                st.mode = Mode::Main;
            }
            Mode::Debug => {
                if let Key::Char(c) = key {
                    if c.to_digit(10) == Some(st.current_bug as u32) && st.bugs >= 1.0 {
                        st.bugs -= 1.0;
                        st.cash += self.rates.cash_per_bug;
                        st.current_bug = self.rng.next_bug();
                    }
                }
            }
            Mode::Write => {
                if let Key::Char(c) = key {
                    st.write_buffer.push(c);
                    let excess = st.write_buffer.chars().count().saturating_sub(WRITE_BUFFER_MAX);
                    if excess > 0 {
                        st.write_buffer = st.write_buffer.chars().skip(excess).collect();
                    }
                    st.size += self.rates.code_per_keystroke;
                }
            }
            Mode::Buy => {
                let count = self.catalog.len();
                match key {
                    Key::Left if count > 0 => {
                        st.shop_index = (st.shop_index + count - 1) % count;
                    }
                    Key::Right if count > 0 => {
                        st.shop_index = (st.shop_index + 1) % count;
                    }
                    Key::Confirm => {
                        let index = st.shop_index;
                        purchase(st, &mut self.rates, &self.catalog, index);
                    }
                    _ => {}
                }
            }
            Mode::About => {}
        }
        Signal::Continue
    }
}

/// Control hints and body text for the current mode. No side effects.
pub(crate) fn describe(st: &GameState, catalog: &Catalog) -> Panel {
    let (commands, display) = match st.mode {
        Mode::Main => (
            "Commands: [D]ebug code, [W]rite code, [B]uy stuff, [A]bout, [ESC] to go back",
            "[AWAITING INPUT...]".to_string(),
        ),
        Mode::Debug => (
            "Commands: Type the correct number to debug. [ESC] to go back.",
            if st.bugs >= 1.0 {
                BUG_ROW.to_string()
            } else {
                "All bugs squashed!".to_string()
            },
        ),
        Mode::Write => (
            "Commands: Mash keys write code. [ESC] to go back.",
            format!("+{}", st.write_buffer),
        ),
        Mode::Buy => (
            "Commands: [<-][->] to browse. [ENTER] to purchase. [ESC] to go back.",
            shop_line(st, catalog),
        ),
        Mode::About => (
            "Commands: [ESC] to go back.",
            format!(
                "You are a person. If you hit {} bugs, you lose.\nGame ends after {} days. Get as much money as you can.",
                st.bug_max, st.day_max
            ),
        ),
    };
    Panel {
        commands: commands.to_string(),
        display,
    }
}

fn shop_line(st: &GameState, catalog: &Catalog) -> String {
    let Some(item) = catalog.item(st.shop_index) else {
        return String::new();
    };
    let left = if st.shop_index == 0 { "---" } else { "<---" };
    let right = if st.shop_index + 1 == catalog.len() {
        "---"
    } else {
        "--->"
    };
    format!(
        "{left} {} Cost: ({}$) {right}",
        item.text,
        catalog.cost(st, st.shop_index)
    )
}
