use crate::model::{GameState, Rates, ShopItem};
use tracing::info;

pub(crate) const INTERN: usize = 0;
pub(crate) const MONKEY: usize = 1;
pub(crate) const BANANAS: usize = 2;
pub(crate) const LUNCHES: usize = 3;
pub(crate) const LINTER: usize = 4;

/// Permanent rate change applied once per purchase, keyed by catalog slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Effect {
    None,
    HalveCodeGrowth,
    DoubleDebugRate,
    HalveBugGrowth,
}

impl Effect {
    pub(crate) fn for_index(index: usize) -> Self {
        match index {
            BANANAS => Effect::HalveCodeGrowth,
            LUNCHES => Effect::DoubleDebugRate,
            LINTER => Effect::HalveBugGrowth,
            _ => Effect::None,
        }
    }

    fn apply(self, rates: &mut Rates) {
        match self {
            Effect::None => {}
            Effect::HalveCodeGrowth => rates.code_per_monkey /= 2.0,
            Effect::DoubleDebugRate => rates.debug_per_intern *= 2.0,
            Effect::HalveBugGrowth => rates.bugs_per_size /= 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Catalog {
    items: Vec<ShopItem>,
}

impl Catalog {
    /// Callers guarantee `items` is non-empty; `config::load_catalog` checks it.
    pub(crate) fn new(items: Vec<ShopItem>) -> Self {
        Self { items }
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn item(&self, index: usize) -> Option<&ShopItem> {
        self.items.get(index)
    }

    /// Linear in units already owned: `base * (1 + owned)`.
    pub(crate) fn cost(&self, state: &GameState, index: usize) -> f64 {
        let base = self.items.get(index).map_or(0.0, |it| it.cost);
        base * (1.0 + state.owned_count(index) as f64)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let item = |text: &str, cost: f64| ShopItem {
            text: text.to_string(),
            cost,
        };
        Self::new(vec![
            item("Intern: debugs a little every tick", 5.0),
            item("Code monkey: writes code for you", 8.0),
            item("Bananas: monkeys write half as much", 10.0),
            item("Catered lunches: interns debug twice as fast", 25.0),
            item("Linter: code breeds half as many bugs", 40.0),
        ])
    }
}

/// Charges only when affordable, but the unit is granted and its effect applied
/// either way.
pub(crate) fn purchase(state: &mut GameState, rates: &mut Rates, catalog: &Catalog, index: usize) {
    if state.ended || index >= catalog.len() {
        return;
    }
    let cost = catalog.cost(state, index);
    let paid = state.cash >= cost;
    if paid {
        state.cash -= cost;
    }
    if let Some(n) = state.owned.get_mut(index) {
        *n += 1;
    }
    Effect::for_index(index).apply(rates);

    info!(
        item = index,
        cost,
        paid,
        owned = state.owned_count(index),
        "purchase"
    );
}
