//! Background tasks driven by timers.
//!
//! Each submodule provides a long-running async function intended to be
//! spawned via `tokio::spawn` that stops when its
//! [`CancellationToken`](tokio_util::sync::CancellationToken) is cancelled.

pub mod status_cache;
