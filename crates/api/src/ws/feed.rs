//! Outbound half of one WebSocket connection.
//!
//! Change events come from the connection's own bus [`Subscription`], so a
//! client that asked for one entity type never sees the others. Control
//! frames (pings, shutdown closes) come from the [`WsManager`](super::WsManager)
//! channel.

use axum::extract::ws::Message;
use futures::{Sink, SinkExt};
use hopelink_events::{ChangeEvent, Subscription};
use tokio::sync::{broadcast, mpsc};

/// Serialize a change event into a JSON text frame.
pub fn change_frame(event: &ChangeEvent) -> Option<Message> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Message::Text(json.into())),
        Err(e) => {
            tracing::error!(error = %e, event = %event.name(), "Failed to serialize change event");
            None
        }
    }
}

/// Write control frames and matching change events to `sink` until the
/// client goes away, a Close frame is sent or the bus closes.
pub async fn pump<S>(
    conn_id: &str,
    mut sink: S,
    mut control: mpsc::UnboundedReceiver<Message>,
    mut changes: Subscription,
) where
    S: Sink<Message> + Unpin,
{
    loop {
        // Both branches are cancel-safe.
        let msg = tokio::select! {
            frame = control.recv() => match frame {
                Some(frame) => frame,
                None => break,
            },
            change = changes.recv() => match change {
                Ok(event) => match change_frame(&event) {
                    Some(frame) => frame,
                    None => continue,
                },
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(conn_id, skipped = n, "WebSocket feed lagged, some changes were dropped");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::debug!(conn_id, "Event bus closed, ending WebSocket feed");
                    break;
                }
            },
        };

        let closing = matches!(msg, Message::Close(_));
        if sink.send(msg).await.is_err() || closing {
            tracing::debug!(conn_id, "WebSocket sink closed");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;
    use hopelink_core::workflow::{Actor, EntityType};
    use hopelink_events::EventBus;

    use super::*;

    fn json(message: Message) -> serde_json::Value {
        match message {
            Message::Text(body) => serde_json::from_str(body.as_str()).unwrap(),
            other => panic!("expected a text frame, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn filtered_feed_forwards_only_its_entity_type() {
        let bus = EventBus::default();
        let (_control_tx, control_rx) = mpsc::unbounded_channel();
        let (sink, mut frames) = futures::channel::mpsc::unbounded::<Message>();

        let feed = {
            let changes = bus.subscribe_to(EntityType::Delivery);
            tokio::spawn(async move { pump("c1", sink, control_rx, changes).await })
        };

        bus.publish(ChangeEvent::created(EntityType::Donation, 1, "available", Actor::Donor));
        bus.publish(ChangeEvent::status_changed(
            EntityType::Delivery,
            4,
            "pending",
            "assigned",
            Actor::System,
        ));
        drop(bus);
        feed.await.unwrap();

        let frame = json(frames.next().await.unwrap());
        assert_eq!(frame["entity_type"], "delivery");
        assert_eq!(frame["entity_id"], 4);
        assert_eq!(frame["change"]["to"], "assigned");
        assert!(frames.next().await.is_none());
    }

    #[tokio::test]
    async fn unfiltered_feed_forwards_everything() {
        let bus = EventBus::default();
        let (_control_tx, control_rx) = mpsc::unbounded_channel();
        let (sink, frames) = futures::channel::mpsc::unbounded::<Message>();

        let feed = {
            let changes = Subscription::from(bus.subscribe());
            tokio::spawn(async move { pump("c2", sink, control_rx, changes).await })
        };

        bus.publish(ChangeEvent::created(EntityType::Donation, 1, "available", Actor::Donor));
        bus.publish(ChangeEvent::created(EntityType::Request, 2, "open", Actor::Recipient));
        drop(bus);
        feed.await.unwrap();

        let types: Vec<String> = frames
            .map(|m| json(m)["entity_type"].as_str().unwrap().to_string())
            .collect()
            .await;
        assert_eq!(types, vec!["donation", "request"]);
    }

    #[tokio::test]
    async fn close_frame_ends_the_feed() {
        let bus = EventBus::default();
        let (control_tx, control_rx) = mpsc::unbounded_channel();
        let (sink, mut frames) = futures::channel::mpsc::unbounded::<Message>();

        control_tx.send(Message::Close(None)).unwrap();
        pump("c3", sink, control_rx, Subscription::from(bus.subscribe())).await;

        assert!(matches!(frames.next().await, Some(Message::Close(None))));
        assert!(frames.next().await.is_none());
    }
}
