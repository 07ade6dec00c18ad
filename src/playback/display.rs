//! Read-only views for the rendering collaborator.
//!
//! Every emitted point is normalized once: the static alias table in
//! [`crate::channel`] maps wire mnemonics onto canonical names, aliases
//! applied first and canonical keys second so the canonical spelling wins
//! when a point carries both. Fields missing from a point read 0.

use std::collections::{HashMap, VecDeque};

use crate::channel;
use crate::dataset::DataPoint;

/// Maximum number of rows the history window retains.
pub const HISTORY_CAPACITY: usize = 50;

/// The latest normalized readings, one field per display channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrentReadings {
    /// Time index of the emitted point (raw text).
    pub timestamp: String,
    /// Bit depth, m.
    pub bit_depth: f64,
    /// Hole depth, m.
    pub hole_depth: f64,
    /// Hook load, kips.
    pub hook_load: f64,
    /// Traveling block position, ft.
    pub block_position: f64,
    /// Weight on bit, klbs.
    pub weight_on_bit: f64,
    /// Rate of penetration, ft/hr.
    pub rop: f64,
    /// Rotary speed, rpm.
    pub rotary_speed: f64,
    /// Rotary torque, ft-lbs.
    pub torque: f64,
    /// Mud flow in, gal/min.
    pub mud_flow_in: f64,
    /// Pump pressure, psi.
    pub pump_pressure: f64,
    /// Pump stroke rate 1, spm.
    pub stroke1: f64,
    /// Pump stroke rate 2, spm.
    pub stroke2: f64,
    /// Pump stroke rate 3, spm.
    pub stroke3: f64,
    /// Mud flow out, gal/min.
    pub mud_flow_out: f64,
    /// Mud inlet temperature, °F.
    pub temp_in: f64,
    /// Mud outlet temperature, °F.
    pub temp_out: f64,
}

impl CurrentReadings {
    /// Temperature differential across the mud system.
    pub fn temp_delta(&self) -> f64 {
        self.temp_out - self.temp_in
    }

    fn from_point(point: &DataPoint) -> Self {
        let values = normalize(point);
        let get = |name: &str| values.get(name).copied().unwrap_or(0.0);
        Self {
            timestamp: point.timestamp().unwrap_or_default().to_string(),
            bit_depth: get(channel::BIT_DEPTH),
            hole_depth: get(channel::HOLE_DEPTH),
            hook_load: get(channel::HOOK_LOAD),
            block_position: get(channel::BLOCK_POSITION),
            weight_on_bit: get(channel::WEIGHT_ON_BIT),
            rop: get(channel::ROP),
            rotary_speed: get(channel::ROTARY_SPEED),
            torque: get(channel::TORQUE),
            mud_flow_in: get(channel::MUD_FLOW_IN),
            pump_pressure: get(channel::PUMP_PRESSURE),
            stroke1: get(channel::STROKE1),
            stroke2: get(channel::STROKE2),
            stroke3: get(channel::STROKE3),
            mud_flow_out: get(channel::MUD_FLOW_OUT),
            temp_in: get(channel::TEMP_IN),
            temp_out: get(channel::TEMP_OUT),
        }
    }
}

/// Apply the alias map once: wire spellings first, canonical second.
fn normalize(point: &DataPoint) -> HashMap<&'static str, f64> {
    let mut values = HashMap::new();
    for (key, _) in point.iter() {
        if let Some(name) = channel::canonical(key) {
            if name != key {
                if let Some(value) = point.number(key) {
                    values.insert(name, value);
                }
            }
        }
    }
    for (key, _) in point.iter() {
        if let Some(name) = channel::canonical(key) {
            if name == key {
                if let Some(value) = point.number(key) {
                    values.insert(name, value);
                }
            }
        }
    }
    values
}

/// One row of the chart-driving history window.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    /// Dataset index of the point this row was derived from.
    pub index: usize,
    /// Time index of the point (raw text).
    pub timestamp: String,
    /// Bit depth, m.
    pub depth: f64,
    /// Rate of penetration, ft/hr.
    pub rop: f64,
    /// Rotary torque, ft-lbs.
    pub torque: f64,
    /// Rotary speed, rpm.
    pub rotary_speed: f64,
    /// Mud flow in, gal/min.
    pub mud_flow_in: f64,
    /// Mud flow out, gal/min.
    pub mud_flow_out: f64,
    /// Pump pressure, psi.
    pub pump_pressure: f64,
}

/// Latest readings plus a bounded history of derived chart rows.
#[derive(Debug, Clone, Default)]
pub struct DisplayState {
    current: CurrentReadings,
    history: VecDeque<HistoryRow>,
}

impl DisplayState {
    /// Empty display state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The latest normalized readings.
    pub fn current(&self) -> &CurrentReadings {
        &self.current
    }

    /// The history window, oldest row first.
    pub fn history(&self) -> &VecDeque<HistoryRow> {
        &self.history
    }

    /// Ingest an emitted point: refresh the current readings and append a
    /// derived row, evicting the oldest beyond [`HISTORY_CAPACITY`].
    pub(crate) fn apply(&mut self, index: usize, point: &DataPoint) {
        self.current = CurrentReadings::from_point(point);
        self.history.push_back(HistoryRow {
            index,
            timestamp: self.current.timestamp.clone(),
            depth: self.current.bit_depth,
            rop: self.current.rop,
            torque: self.current.torque,
            rotary_speed: self.current.rotary_speed,
            mud_flow_in: self.current.mud_flow_in,
            mud_flow_out: self.current.mud_flow_out,
            pump_pressure: self.current.pump_pressure,
        });
        while self.history.len() > HISTORY_CAPACITY {
            self.history.pop_front();
        }
    }

    /// Drop all readings and history.
    pub(crate) fn clear(&mut self) {
        self.current = CurrentReadings::default();
        self.history.clear();
    }
}
