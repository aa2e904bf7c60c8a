/////////////////////////////////////////////////////////////////////////////////////////////
//
// Defines progress reporting messages, sinks, and helper functions for interpolant construction.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! Progress reporting primitives for interpolant construction.
//!
//! Attach a sink with [`crate::RBFInterpolatorBuilder::progress_callback`] to
//! observe each construction stage. Nothing is reported when no sink is attached.

use std::fmt::Debug;
use std::sync::{Arc, mpsc};
use std::thread;

/// Progress events emitted while an interpolant is constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMsg {
    /// The raw pairwise distance matrix has been assembled.
    DistanceMatrixBuilt { num_points: usize, dimensions: usize },

    /// No epsilon was supplied and one was estimated from the distances.
    EpsilonEstimated { epsilon: f64 },

    /// The system matrix has been factorised and the weights solved.
    SystemSolved { num_points: usize },

    /// Arbitrary informational message.
    Message { message: String },
}

/// Sink that consumes progress messages.
pub trait ProgressSink: Send + Sync + Debug {
    fn emit(&self, msg: ProgressMsg);
}

/// Forwards construction events to a listener thread.
///
/// Delivery waits for room in the channel, so the final summary is never lost.
/// Events sent after the listener has exited are discarded.
#[derive(Debug)]
pub struct ChannelSink {
    tx: mpsc::SyncSender<ProgressMsg>,
}

impl ProgressSink for ChannelSink {
    #[inline]
    fn emit(&self, msg: ProgressMsg) {
        let _ = self.tx.send(msg);
    }
}

/// Runs `handler` on a listener thread for every event sent to the returned sink.
///
/// `buffer` bounds the number of undelivered events (at least one). The
/// listener exits once every clone of the sink has been dropped; join the
/// returned handle to wait for the last event to be handled.
pub fn closure_sink<F>(
    buffer: usize,
    mut handler: F,
) -> (Arc<dyn ProgressSink>, thread::JoinHandle<()>)
where
    F: FnMut(ProgressMsg) + Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel(buffer.max(1));

    let listener = thread::spawn(move || {
        for msg in rx {
            handler(msg);
        }
    });

    (Arc::new(ChannelSink { tx }), listener)
}
