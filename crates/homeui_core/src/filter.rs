/// Quiet period after the last keystroke before the filter recomputes.
pub const DEBOUNCE_MS: u64 = 100;

/// One row in the app listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppItem {
    pub name: String,
    pub visible: bool,
}

/// Search-box filter over the app listing.
///
/// Debouncing uses a single-slot generation counter: every keystroke bumps
/// the generation and asks the host to arm a fresh timer, which replaces any
/// timer armed earlier. A timer that fires with an old generation is stale
/// and ignored, so exactly one recomputation happens per quiet period.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    query: String,
    items: Vec<AppItem>,
    generation: u64,
    pending: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterMsg {
    /// Raw text from the search box, one per input event.
    InputChanged(String),
    /// The host timer armed by `ScheduleDebounce` fired.
    DebounceElapsed { generation: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEffect {
    /// Arm a timer; arming replaces any previously requested timer.
    ScheduleDebounce { generation: u64, delay_ms: u64 },
}

/// Projection of the filter for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterView {
    pub rows: Vec<AppRowView>,
    pub visible_count: usize,
    pub noun: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRowView {
    pub name: String,
    pub visible: bool,
}

impl FilterState {
    /// Builds the filter over the given app names; everything starts visible.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = names
            .into_iter()
            .map(|name| AppItem {
                name: name.into(),
                visible: true,
            })
            .collect();
        Self {
            query: String::new(),
            items,
            generation: 0,
            pending: None,
        }
    }

    pub fn view(&self) -> FilterView {
        let rows: Vec<AppRowView> = self
            .items
            .iter()
            .map(|item| AppRowView {
                name: item.name.clone(),
                visible: item.visible,
            })
            .collect();
        let visible_count = rows.iter().filter(|row| row.visible).count();
        FilterView {
            rows,
            visible_count,
            noun: app_noun(visible_count),
        }
    }

    fn recompute_visibility(&mut self) {
        let needle = normalize(&self.query);
        for item in &mut self.items {
            item.visible = needle.is_empty() || normalize(&item.name).contains(&needle);
        }
    }
}

/// Pure update function: applies a message to the filter and returns any effects.
pub fn update_filter(mut state: FilterState, msg: FilterMsg) -> (FilterState, Vec<FilterEffect>) {
    let effects = match msg {
        FilterMsg::InputChanged(text) => {
            state.query = text;
            state.generation += 1;
            state.pending = Some(state.generation);
            vec![FilterEffect::ScheduleDebounce {
                generation: state.generation,
                delay_ms: DEBOUNCE_MS,
            }]
        }
        FilterMsg::DebounceElapsed { generation } => {
            if state.pending == Some(generation) {
                state.pending = None;
                state.recompute_visibility();
            }
            Vec::new()
        }
    };

    (state, effects)
}

/// Normalizes a name or query for matching: trim, lowercase, keep `[a-z0-9]`.
/// Idempotent.
pub fn normalize(input: &str) -> String {
    input
        .trim()
        .chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Singular for exactly one visible app, plural otherwise (including zero).
pub fn app_noun(count: usize) -> &'static str {
    if count == 1 {
        "app"
    } else {
        "apps"
    }
}
