//! Resolver worker thread and the systems that bridge it with the ECS world.
//!
//! - [`resolver_thread`] runs on its own OS thread and owns the
//!   [`ContentResolver`]. Resolution may block on a network fetch, which
//!   must never stall the render loop.
//! - [`poll_resolver_messages`] non-blockingly drains the thread's replies
//!   into the ECS message queue each frame.
//! - [`update_resolver_messages`] advances the queue so readers see them.
//!
//! See also: [`crate::events::resolver`] and
//! [`crate::resources::resolverbridge`].

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use log::{info, warn};

use crate::content::ContentResolver;
use crate::events::resolver::{ResolveCmd, ResolveMessage};
use crate::resources::resolverbridge::ResolverBridge;

/// Drain pending replies from the resolver thread into
/// `Messages<ResolveMessage>`.
pub fn poll_resolver_messages(
    bridge: Option<ResMut<ResolverBridge>>,
    mut writer: MessageWriter<ResolveMessage>,
) {
    let Some(mut bridge) = bridge else {
        return;
    };
    let replies: Vec<ResolveMessage> = bridge.rx_msg.try_iter().collect();
    for reply in replies {
        bridge.complete(reply.name());
        writer.write(reply);
    }
}

/// Advance the ECS message queue for [`ResolveMessage`].
///
/// Run this after [`poll_resolver_messages`] and before the playback systems.
pub fn update_resolver_messages(mut msgs: ResMut<Messages<ResolveMessage>>) {
    msgs.update();
}

/// Entry point of the resolver thread.
///
/// Blocks on the command channel, resolves each requested name in order and
/// sends one reply per request. Returns on [`ResolveCmd::Shutdown`] or when
/// the main thread drops its sender.
pub fn resolver_thread(
    resolver: Box<dyn ContentResolver>,
    rx_cmd: Receiver<ResolveCmd>,
    tx_msg: Sender<ResolveMessage>,
) {
    info!(
        "[resolver] thread starting (id={:?}) using {}",
        std::thread::current().id(),
        resolver.describe()
    );

    for cmd in rx_cmd.iter() {
        match cmd {
            ResolveCmd::Resolve { name } => {
                let reply = match resolver.resolve(&name) {
                    Ok(path) => {
                        info!("[resolver] {} -> {}", name, path.display());
                        ResolveMessage::Resolved { name, path }
                    }
                    Err(error) => {
                        warn!("[resolver] {} failed: {}", name, error);
                        ResolveMessage::Failed { name, error }
                    }
                };
                if tx_msg.send(reply).is_err() {
                    break;
                }
            }
            ResolveCmd::Shutdown => break,
        }
    }

    info!("[resolver] thread exiting");
}
