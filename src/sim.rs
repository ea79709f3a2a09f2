use crate::model::{GameState, Rates};
use crate::shop::{INTERN, MONKEY};
use tracing::info;

/// Income and growth per real second at a given tick cadence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PerSecond {
    pub(crate) cash: f64,
    pub(crate) bugs: f64,
    pub(crate) code: f64,
}

impl GameState {
    /// One fixed step. Stages run in order and each sees the previous one's result.
    pub(crate) fn advance(&mut self, rates: &Rates) {
        // interns
        if self.bugs.floor() >= 1.0 {
            let solved = (self.owned_count(INTERN) as f64 * rates.debug_per_intern).min(self.bugs);
            self.cash += rates.cash_per_bug * solved;
            self.bugs -= solved;
        }

        // monkeys
        self.size += self.owned_count(MONKEY) as f64 * rates.code_per_monkey;

        self.bugs += rates.bugs_per_size * self.size;
        if self.bugs > self.bug_max && !self.loss {
            self.loss = true;
            info!(bugs = self.bugs.floor(), day = self.day, "bug limit exceeded");
        }

        self.time += rates.time_per_tick;
        if self.time > self.time_max {
            self.time = 0.0;
            self.day += 1;
            info!(day = self.day, cash = self.cash.floor(), "new day");
        }

        if (self.day > self.day_max || self.loss) && !self.ended {
            self.ended = true;
            info!(
                loss = self.loss,
                cash = self.cash.floor(),
                day = self.day,
                "game over"
            );
        }
    }
}

impl Rates {
    pub(crate) fn per_second(&self, st: &GameState, tick_ms: u64) -> PerSecond {
        let ticks = 1000.0 / tick_ms.max(1) as f64;
        PerSecond {
            cash: self.cash_per_bug * st.owned_count(INTERN) as f64 * self.debug_per_intern * ticks,
            bugs: self.bugs_per_size * st.size * ticks,
            code: self.code_per_monkey * st.owned_count(MONKEY) as f64 * ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Outcome;

    fn started(items: usize) -> GameState {
        let mut st = GameState::new(items);
        st.started = true;
        st
    }

    #[test]
    fn idle_codebase_only_breeds_bugs() {
        let rates = Rates::default();
        let mut st = started(5);
        let mut prev = st.clone();
        for _ in 0..100 {
            st.advance(&rates);
            assert!(st.size >= prev.size);
            assert!(st.bugs > prev.bugs);
            assert_eq!(st.cash, 0.0);
            prev = st.clone();
        }
        assert!((st.bugs - 0.1).abs() < 1e-9);
    }

    #[test]
    fn interns_wait_for_a_whole_bug() {
        let rates = Rates::default();
        let mut st = started(5);
        st.owned[INTERN] = 10;
        st.bugs = 0.9;
        st.advance(&rates);
        assert_eq!(st.cash, 0.0);
        assert!((st.bugs - 0.901).abs() < 1e-12);
    }

    #[test]
    fn interns_solve_and_earn() {
        let rates = Rates::default();
        let mut st = started(5);
        st.owned[INTERN] = 10;
        st.bugs = 5.0;
        st.advance(&rates);
        // 10 * 0.01 = 0.1 solved, then +0.001 growth
        assert!((st.cash - 0.2).abs() < 1e-12);
        assert!((st.bugs - 4.901).abs() < 1e-12);
    }

    #[test]
    fn interns_clamp_to_remaining_bugs() {
        let rates = Rates::default();
        let mut st = started(5);
        st.owned[INTERN] = 1_000;
        st.bugs = 1.5;
        st.advance(&rates);
        assert!((st.cash - 3.0).abs() < 1e-12);
        // all 1.5 solved, only this tick's growth is left
        assert!((st.bugs - 0.001).abs() < 1e-12);
    }

    #[test]
    fn monkeys_grow_size_before_bugs_are_counted() {
        let rates = Rates::default();
        let mut st = started(5);
        st.owned[MONKEY] = 100;
        st.advance(&rates);
        assert!((st.size - 2.0).abs() < 1e-12);
        assert!((st.bugs - 0.002).abs() < 1e-12);
    }

    #[test]
    fn day_rolls_over_after_time_max() {
        let rates = Rates::default();
        let mut st = started(5);
        let ticks = (st.time_max / rates.time_per_tick).ceil() as usize + 1;
        let mut reset_seen = false;
        for _ in 0..ticks {
            let before = st.time;
            st.advance(&rates);
            if st.time < before {
                reset_seen = true;
            }
        }
        assert!(reset_seen);
        assert_eq!(st.day, 2);
        assert!(!st.ended);
    }

    #[test]
    fn last_day_ending_is_a_win() {
        let rates = Rates::default();
        let mut st = started(5);
        st.day = st.day_max;
        st.time = st.time_max;
        st.advance(&rates);
        assert_eq!(st.day, st.day_max + 1);
        assert!(st.ended);
        assert_eq!(st.outcome(), Some(Outcome::Survived));
    }

    #[test]
    fn loss_is_sticky_and_ends_the_same_tick() {
        let rates = Rates::default();
        let mut st = started(5);
        st.bugs = st.bug_max;
        st.advance(&rates);
        assert!(st.loss);
        assert!(st.ended);

        st.owned[INTERN] = 1_000_000;
        for _ in 0..10 {
            st.advance(&rates);
            assert!(st.loss);
        }
        assert_eq!(st.outcome(), Some(Outcome::Fired));
    }

    #[test]
    fn per_second_matches_tick_rates() {
        let rates = Rates::default();
        let mut st = started(5);
        st.owned[INTERN] = 2;
        st.owned[MONKEY] = 3;
        let ps = rates.per_second(&st, 10);
        assert!((ps.cash - 2.0 * 2.0 * 0.01 * 100.0).abs() < 1e-9);
        assert!((ps.bugs - 0.001 * 1.0 * 100.0).abs() < 1e-9);
        assert!((ps.code - 0.01 * 3.0 * 100.0).abs() < 1e-9);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_tick_keeps_quantities_non_negative(
            cash in 0.0f64..1_000.0,
            bugs in 0.0f64..600.0,
            size in 0.01f64..100.0,
            interns in 0u32..5_000,
            monkeys in 0u32..50,
            ticks in 1usize..200,
        ) {
            let rates = Rates::default();
            let mut st = GameState::new(5);
            st.started = true;
            st.cash = cash;
            st.bugs = bugs;
            st.size = size;
            st.owned[0] = interns;
            st.owned[1] = monkeys;
            for _ in 0..ticks {
                let size_before = st.size;
                st.advance(&rates);
                prop_assert!(st.cash >= 0.0);
                prop_assert!(st.bugs >= 0.0);
                prop_assert!(st.size >= size_before);
            }
        }

        #[test]
        fn prop_loss_never_clears(bugs in 501.0f64..10_000.0, ticks in 1usize..50) {
            let rates = Rates::default();
            let mut st = GameState::new(5);
            st.bugs = bugs;
            st.advance(&rates);
            prop_assert!(st.loss && st.ended);
            st.owned[0] = 100_000;
            for _ in 0..ticks {
                st.advance(&rates);
                prop_assert!(st.loss);
            }
        }
    }
}
