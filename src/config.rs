//! Solver configuration: initial label, "infinite" sentinel and which nodes may relay paths.
//! Values come from code, JSON, or the `MLC_*` environment namespace.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Cost assigned to every node that has not been reached. Finite so that hosts
/// comparing against it with plain arithmetic never see `inf`.
pub const DEFAULT_MAX_LABEL_COST: f64 = 2147483647.0;
/// Query value (and per-link marker) meaning "all modes" for single-character descriptors.
pub const DEFAULT_CHAR_WILDCARD: u8 = b'a';
/// Query value (and per-link marker) meaning "all modes" for token descriptors.
pub const DEFAULT_TOKEN_WILDCARD: &str = "all";

/// Which nodes may be used as intermediate hops. The origin always may.
///
/// Trip-end (centroid) nodes sit at one end of the index range, so the bound is a
/// single cutoff, either a floor or a ceiling depending on how the network was numbered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "node", rename_all = "snake_case")]
pub enum ThroughNodes {
    #[default]
    All,
    /// Nodes with index `>= first_thru_node`.
    AtLeast(usize),
    /// Nodes with index `<= last_thru_node`.
    AtMost(usize),
    /// Nothing but the origin relays; every path is a single link.
    OriginOnly,
}

impl ThroughNodes {
    /// Floor form as passed over the C ABI; non-positive means no floor.
    pub fn from_first_thru(first_thru_node: i64) -> Self {
        if first_thru_node <= 0 { ThroughNodes::All } else { ThroughNodes::AtLeast(first_thru_node as usize) }
    }

    /// Ceiling form as passed over the C ABI; negative means only the origin relays.
    pub fn from_last_thru(last_thru_node: i64) -> Self {
        if last_thru_node < 0 { ThroughNodes::OriginOnly } else { ThroughNodes::AtMost(last_thru_node as usize) }
    }

    #[inline(always)]
    pub fn permits(&self, node: usize, origin: usize) -> bool {
        node == origin
            || match *self {
                ThroughNodes::All => true,
                ThroughNodes::AtLeast(first) => node >= first,
                ThroughNodes::AtMost(last) => node <= last,
                ThroughNodes::OriginOnly => false,
            }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Label of the origin: 0 for static costs, a departure time for time-dependent runs.
    pub departure: f64,
    /// Initial label of every other node; still present after the run means unreachable.
    pub max_label_cost: f64,
    pub through: ThroughNodes,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { departure: 0.0, max_label_cost: DEFAULT_MAX_LABEL_COST, through: ThroughNodes::All }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

impl SolverConfig {
    pub fn with_departure(mut self, departure: f64) -> Self { self.departure = departure; self }
    pub fn with_max_label_cost(mut self, max_label_cost: f64) -> Self { self.max_label_cost = max_label_cost; self }
    pub fn with_through(mut self, through: ThroughNodes) -> Self { self.through = through; self }

    /// Parse from JSON; missing fields fall back to [`SolverConfig::default`].
    pub fn from_json(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Defaults overridden by `MLC_DEPARTURE`, `MLC_MAX_LABEL_COST`,
    /// `MLC_FIRST_THRU_NODE` and `MLC_LAST_THRU_NODE` (the latter wins if both are set).
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(d) = env_parse::<f64>("MLC_DEPARTURE") { cfg.departure = d; }
        if let Some(m) = env_parse::<f64>("MLC_MAX_LABEL_COST") { cfg.max_label_cost = m; }
        if let Some(f) = env_parse::<i64>("MLC_FIRST_THRU_NODE") { cfg.through = ThroughNodes::from_first_thru(f); }
        if let Some(l) = env_parse::<i64>("MLC_LAST_THRU_NODE") { cfg.through = ThroughNodes::from_last_thru(l); }
        cfg
    }
}

/// Process-wide values the C entry points need but do not take as parameters.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EngineDefaults {
    pub max_label_cost: f64,
    pub char_wildcard: u8,
    pub token_wildcard: String,
}

impl Default for EngineDefaults {
    fn default() -> Self {
        Self {
            max_label_cost: DEFAULT_MAX_LABEL_COST,
            char_wildcard: DEFAULT_CHAR_WILDCARD,
            token_wildcard: DEFAULT_TOKEN_WILDCARD.to_string(),
        }
    }
}

impl EngineDefaults {
    fn load() -> Self {
        let mut d = Self::default();
        if let Some(m) = env_parse::<f64>("MLC_MAX_LABEL_COST") { d.max_label_cost = m; }
        if let Ok(w) = std::env::var("MLC_CHAR_WILDCARD") {
            match w.as_bytes() {
                [c] => d.char_wildcard = *c,
                _ => log::warn!("ignoring MLC_CHAR_WILDCARD={w:?}: expected a single byte"),
            }
        }
        if let Ok(w) = std::env::var("MLC_TOKEN_WILDCARD") {
            if w.is_empty() { log::warn!("ignoring empty MLC_TOKEN_WILDCARD"); } else { d.token_wildcard = w; }
        }
        log::debug!("engine defaults: {d:?}");
        d
    }
}

static ENGINE_DEFAULTS: OnceLock<EngineDefaults> = OnceLock::new();

/// Read once per process; later changes to the environment are not observed.
pub fn engine_defaults() -> &'static EngineDefaults {
    ENGINE_DEFAULTS.get_or_init(EngineDefaults::load)
}
