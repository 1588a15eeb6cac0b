// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::run;
use crate::scheduler::bus::{channel, BusMessage, Payload};

#[tokio::test]
async fn forwards_messages_in_arrival_order() {
    let (in_tx, in_rx) = channel();
    let (out_tx, out_rx) = channel();

    in_tx
        .send_async(BusMessage { project: "a".into(), payload: Payload::UpdateOk { revision: "1".into(), files_changed: 0 } })
        .await
        .unwrap();
    in_tx
        .send_async(BusMessage { project: "a".into(), payload: Payload::EndOfStream })
        .await
        .unwrap();
    drop(in_tx);

    run(in_rx, out_tx).await.unwrap();

    let first = out_rx.recv_async().await.unwrap();
    assert_eq!(first.project, "a");
    assert!(matches!(first.payload, Payload::UpdateOk { .. }));
}

#[tokio::test]
async fn drops_duplicate_terminal_messages_for_the_same_project() {
    let (in_tx, in_rx) = channel();
    let (out_tx, out_rx) = channel();

    in_tx
        .send_async(BusMessage { project: "a".into(), payload: Payload::UpdateOk { revision: "1".into(), files_changed: 0 } })
        .await
        .unwrap();
    in_tx
        .send_async(BusMessage { project: "a".into(), payload: Payload::UpdateFailed {
            error_kind: crate::git::updater::UpdateErrorKind::NetworkError,
            error_text: "spurious resend".into(),
        } })
        .await
        .unwrap();
    drop(in_tx);

    run(in_rx, out_tx).await.unwrap();

    let mut terminal_count = 0;
    while let Ok(msg) = out_rx.try_recv() {
        if msg.payload.is_terminal() {
            terminal_count += 1;
        }
    }
    assert_eq!(terminal_count, 1);
}
