// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The monitor peer (§4.3): sits between updater and builder so the
//! updater never blocks on a slow builder. Forwards every message
//! verbatim, but enforces at-most-once delivery of a project's terminal
//! message, per the bus contract.

use std::collections::HashSet;

use tracing::warn;

use super::bus::{BusMessage, Receiver, Sender};
use crate::error::MobResult;

/// Drains `rx` and forwards onto `tx` until the channel closes, dropping
/// any duplicate terminal message for a project already marked terminal.
///
/// # Errors
///
/// Returns an error if the downstream channel closes while messages are
/// still pending.
pub async fn run(rx: Receiver, tx: Sender) -> MobResult<()> {
    let mut terminated: HashSet<String> = HashSet::new();

    while let Ok(msg) = rx.recv_async().await {
        if msg.payload.is_terminal() {
            if !terminated.insert(msg.project.clone()) {
                warn!(project = %msg.project, "monitor: dropping duplicate terminal message");
                continue;
            }
        }
        tx.send_async(msg)
            .await
            .map_err(|e| crate::error::SchedulerError::IPCError(e.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
