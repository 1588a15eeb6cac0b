// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The inter-phase message bus (§4.3): the updater's only channel to the
//! monitor, and the monitor's only channel to the builder.

use crate::git::updater::UpdateErrorKind;

/// One message on the bus, always tagged with the project it concerns.
#[derive(Debug, Clone)]
pub struct BusMessage {
    pub project: String,
    pub payload: Payload,
}

/// The seven message kinds defined in §4.3.
#[derive(Debug, Clone)]
pub enum Payload {
    UpdateOk { revision: String, files_changed: usize },
    UpdateSkipped { reason: String },
    UpdateFailed { error_kind: UpdateErrorKind, error_text: String },
    LogLine { phase: String, line: String },
    PersistentOptionDelta { key: String, value: String },
    PostBuildMessage { text: String },
    EndOfStream,
}

impl Payload {
    /// Whether this payload is one of the three terminal update messages
    /// the builder must wait for before starting a project's build (§4.3).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::UpdateOk { .. } | Self::UpdateSkipped { .. } | Self::UpdateFailed { .. })
    }
}

/// Bounded high-water mark for the updater -> monitor channel (§5
/// "Backpressure"): the updater blocks on send once the monitor is this
/// far behind the builder.
pub const BACKPRESSURE_CAPACITY: usize = 64;

/// The sending half of the bus, shared by producers (updater, builder-side
/// post-build notices).
pub type Sender = flume::Sender<BusMessage>;
/// The receiving half of the bus.
pub type Receiver = flume::Receiver<BusMessage>;

/// Creates a bounded channel sized to [`BACKPRESSURE_CAPACITY`].
#[must_use]
pub fn channel() -> (Sender, Receiver) {
    flume::bounded(BACKPRESSURE_CAPACITY)
}
