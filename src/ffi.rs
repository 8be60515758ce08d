//! C ABI entry points for hosts that own the graph and label arrays.
//!
//! Return codes: 0 success, -1 empty graph, -2 origin out of range,
//! -3 null required pointer, -4 adjacency validation failed (debug builds or the
//! `validate` feature only).
//!
//! Mode descriptors are passed as an array of NUL-terminated strings, one per link;
//! a null array disables mode filtering.

use crate::config::{engine_defaults, SolverConfig, ThroughNodes};
use crate::graph::GraphView;
use crate::mode::{AllModes, CharMode, ModeFilter, RawDescriptors, TokenMode};
use crate::path;
use crate::solver::{label_correcting, LabelState, MlcStats};
use core::ffi::{c_char, c_int, CStr};
use core::slice;
use std::cell::Cell;

pub const MLC_OK: c_int = 0;
pub const MLC_ERR_EMPTY: c_int = -1;
pub const MLC_ERR_ORIGIN: c_int = -2;
pub const MLC_ERR_NULL: c_int = -3;
pub const MLC_ERR_GRAPH: c_int = -4;

thread_local! {
    static LAST_STATS: Cell<MlcStats> = Cell::new(MlcStats::default());
}

/// Stats of the last successful run on the calling thread.
#[no_mangle]
pub unsafe extern "C" fn mlc_get_last_stats(out: *mut MlcStats) {
    if out.is_null() { return; }
    *out = LAST_STATS.with(|s| s.get());
}

/// Route `log` output to stderr, filtered by `RUST_LOG` (default `warn`). Safe to call repeatedly.
#[no_mangle]
pub extern "C" fn mlc_init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).try_init();
}

#[inline(always)]
unsafe fn as_slice<'a, T>(ptr: *const T, len: usize) -> &'a [T] {
    if len == 0 { &[] } else { slice::from_raw_parts(ptr, len) }
}
#[inline(always)]
unsafe fn as_mut_slice<'a, T>(ptr: *mut T, len: usize) -> &'a mut [T] {
    if len == 0 { &mut [] } else { slice::from_raw_parts_mut(ptr, len) }
}

struct Bound<'a> {
    graph: GraphView<'a>,
    labels: LabelState<'a>,
    uses: Option<RawDescriptors<'a>>,
    origin: usize,
}

#[allow(clippy::too_many_arguments)]
unsafe fn bind<'a>(
    o_node_no: c_int,
    node_size: c_int,
    from_node_no_arr: *const c_int,
    to_node_no_arr: *const c_int,
    first_link_from: *const c_int,
    last_link_from: *const c_int,
    sorted_link_no_arr: *const c_int,
    allowed_uses: *const *const c_char,
    link_cost: *const f64,
    label_cost: *mut f64,
    node_pred: *mut c_int,
    link_pred: *mut c_int,
    deque_next: *mut c_int,
) -> Result<Bound<'a>, c_int> {
    if node_size <= 0 { return Err(MLC_ERR_EMPTY); }
    if o_node_no < 0 || o_node_no >= node_size { return Err(MLC_ERR_ORIGIN); }
    if from_node_no_arr.is_null() || to_node_no_arr.is_null() || first_link_from.is_null()
        || last_link_from.is_null() || sorted_link_no_arr.is_null() || link_cost.is_null()
        || label_cost.is_null() || node_pred.is_null() || link_pred.is_null() || deque_next.is_null()
    {
        return Err(MLC_ERR_NULL);
    }
    let n = node_size as usize;
    let first = as_slice(first_link_from, n);
    let last = as_slice(last_link_from, n);
    // ranges are exhaustive over the sorted array, so its length is the largest range end
    let m = last.iter().copied().max().unwrap_or(0).max(0) as usize;
    let graph = GraphView::new(
        as_slice(from_node_no_arr, m),
        as_slice(to_node_no_arr, m),
        first,
        last,
        as_slice(sorted_link_no_arr, m),
        as_slice(link_cost, m),
    );
    #[cfg(any(debug_assertions, feature = "validate"))]
    if let Err(e) = graph.validate() {
        log::error!("rejecting shortest path request: {e}");
        return Err(MLC_ERR_GRAPH);
    }
    let uses = if allowed_uses.is_null() { None } else { Some(RawDescriptors::new(as_slice(allowed_uses, m))) };
    Ok(Bound {
        graph,
        labels: LabelState {
            label_cost: as_mut_slice(label_cost, n),
            node_pred: as_mut_slice(node_pred, n),
            link_pred: as_mut_slice(link_pred, n),
            deque_next: as_mut_slice(deque_next, n),
        },
        uses,
        origin: o_node_no as usize,
    })
}

fn run<F: ModeFilter + ?Sized>(b: &mut Bound<'_>, filter: &F, config: &SolverConfig) -> c_int {
    let stats = label_correcting(&b.graph, b.origin, filter, config, &mut b.labels);
    log::trace!("origin={} scans={} relaxations={} reached={}", b.origin, stats.scans, stats.relaxations, stats.reached);
    LAST_STATS.with(|s| s.set(stats));
    MLC_OK
}

/// Single-character mode, floor-form through-node bound (`first_thru_node <= 0`: no bound).
/// Unreached nodes keep the process-wide sentinel (`MLC_MAX_LABEL_COST`, default 2147483647).
///
/// # Safety
/// Node-indexed arrays must hold `node_size` entries, link-indexed arrays as many entries
/// as the largest `last_link_from` value, and `allowed_uses` (if non-null) one valid
/// NUL-terminated string or null per link. Output arrays must not alias the inputs.
#[no_mangle]
pub unsafe extern "C" fn shortest_path(
    o_node_no: c_int,
    node_size: c_int,
    from_node_no_arr: *const c_int,
    to_node_no_arr: *const c_int,
    first_link_from: *const c_int,
    last_link_from: *const c_int,
    sorted_link_no_arr: *const c_int,
    allowed_uses: *const *const c_char,
    link_cost: *const f64,
    label_cost: *mut f64,
    node_pred: *mut c_int,
    link_pred: *mut c_int,
    deque_next: *mut c_int,
    mode: c_char,
    departure_time: f64,
    first_thru_node: c_int,
) -> c_int {
    let mut b = match bind(
        o_node_no, node_size, from_node_no_arr, to_node_no_arr, first_link_from, last_link_from,
        sorted_link_no_arr, allowed_uses, link_cost, label_cost, node_pred, link_pred, deque_next,
    ) {
        Ok(b) => b,
        Err(rc) => { log::warn!("shortest_path rejected: rc={rc} origin={o_node_no} nodes={node_size}"); return rc; }
    };
    let defaults = engine_defaults();
    let config = SolverConfig::default()
        .with_departure(departure_time)
        .with_max_label_cost(defaults.max_label_cost)
        .with_through(ThroughNodes::from_first_thru(first_thru_node as i64));
    match b.uses {
        Some(uses) => run(&mut b, &CharMode::new(&uses, mode as u8).with_wildcard(defaults.char_wildcard), &config),
        None => run(&mut b, &AllModes, &config),
    }
}

/// Token mode, explicit sentinel, ceiling-form through-node bound (`last_thru_node < 0`:
/// only the origin relays). A null `mode` queries the wildcard token (`MLC_TOKEN_WILDCARD`,
/// default `"all"`).
///
/// # Safety
/// Same contract as [`shortest_path`]; `mode`, if non-null, must be NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn shortest_path_n(
    o_node_no: c_int,
    node_size: c_int,
    from_node_no_arr: *const c_int,
    to_node_no_arr: *const c_int,
    first_link_from: *const c_int,
    last_link_from: *const c_int,
    sorted_link_no_arr: *const c_int,
    allowed_uses: *const *const c_char,
    link_cost: *const f64,
    label_cost: *mut f64,
    node_pred: *mut c_int,
    link_pred: *mut c_int,
    deque_next: *mut c_int,
    mode: *const c_char,
    max_label_cost: f64,
    last_thru_node: c_int,
    departure_time: f64,
) -> c_int {
    let mut b = match bind(
        o_node_no, node_size, from_node_no_arr, to_node_no_arr, first_link_from, last_link_from,
        sorted_link_no_arr, allowed_uses, link_cost, label_cost, node_pred, link_pred, deque_next,
    ) {
        Ok(b) => b,
        Err(rc) => { log::warn!("shortest_path_n rejected: rc={rc} origin={o_node_no} nodes={node_size}"); return rc; }
    };
    let config = SolverConfig::default()
        .with_departure(departure_time)
        .with_max_label_cost(max_label_cost)
        .with_through(ThroughNodes::from_last_thru(last_thru_node as i64));
    let wildcard = engine_defaults().token_wildcard.as_bytes();
    let token = if mode.is_null() { wildcard } else { CStr::from_ptr(mode).to_bytes() };
    match b.uses {
        Some(uses) => run(&mut b, &TokenMode::from_bytes(&uses, token, wildcard), &config),
        None => run(&mut b, &AllModes, &config),
    }
}

/// Write the node path from `o_node_no` to `d_node_no` into `out` (capacity `cap`).
/// Returns the path length, -1 if unreachable, -2 if `cap` is too small,
/// -3 on null pointers or out-of-range nodes.
///
/// # Safety
/// `node_pred` must hold `node_size` entries and `out` at least `cap`.
#[no_mangle]
pub unsafe extern "C" fn mlc_node_sequence(
    node_pred: *const c_int,
    node_size: c_int,
    o_node_no: c_int,
    d_node_no: c_int,
    out: *mut c_int,
    cap: c_int,
) -> c_int {
    if node_pred.is_null() || out.is_null() || node_size <= 0 { return -3; }
    if o_node_no < 0 || o_node_no >= node_size || d_node_no < 0 || d_node_no >= node_size { return -3; }
    let preds = as_slice(node_pred, node_size as usize);
    let Some(seq) = path::node_sequence(preds, o_node_no as usize, d_node_no as usize) else { return -1 };
    if cap < 0 || seq.len() > cap as usize { return -2; }
    let dst = as_mut_slice(out, seq.len());
    for (d, &s) in dst.iter_mut().zip(&seq) { *d = s as c_int; }
    seq.len() as c_int
}

/// Bumped whenever an exported signature or `MlcStats` layout changes.
#[no_mangle]
pub extern "C" fn mlc_version() -> u32 { 1 }
