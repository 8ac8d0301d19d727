//! ECS resources that bridge the main thread with the background resolver thread.
//!
//! Use [`setup_resolver`] once during initialization to spawn the resolver
//! thread and insert the [`ResolverBridge`] and `Messages<ResolveMessage>`
//! resources. Call [`shutdown_resolver`] during teardown to stop the thread.

use crate::content::ContentResolver;
use crate::events::resolver::{ResolveCmd, ResolveMessage};
use crate::systems::resolver::resolver_thread;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::warn;
use rustc_hash::FxHashSet;

/// Shared bridge between the ECS world and the resolver thread.
///
/// Systems request files with [`ResolverBridge::request`] and receive the
/// replies as [`ResolveMessage`]s once
/// [`poll_resolver_messages`](crate::systems::resolver::poll_resolver_messages)
/// has drained them.
#[derive(Resource)]
pub struct ResolverBridge {
    /// Sender for [`ResolveCmd`] messages (ECS -> resolver thread).
    pub tx_cmd: Sender<ResolveCmd>,
    /// Receiver for [`ResolveMessage`] replies (resolver thread -> ECS).
    pub rx_msg: Receiver<ResolveMessage>,
    /// Join handle for the background resolver thread.
    pub handle: std::thread::JoinHandle<()>,
    /// Names requested but not answered yet.
    pending: FxHashSet<String>,
}

impl ResolverBridge {
    /// Ask the resolver thread for `name`.
    ///
    /// A name that is already in flight is not requested twice.
    pub fn request(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.pending.insert(name.clone()) {
            return;
        }
        if self.tx_cmd.send(ResolveCmd::Resolve { name: name.clone() }).is_err() {
            warn!("Resolver thread is gone; dropping request for {}", name);
            self.pending.remove(&name);
        }
    }

    /// Mark `name` as answered.
    pub fn complete(&mut self, name: &str) {
        self.pending.remove(name);
    }

    pub fn is_pending(&self, name: &str) -> bool {
        self.pending.contains(name)
    }
}

/// Spawn the resolver thread and register bridge resources.
///
/// This function:
/// - Creates command/reply channels.
/// - Spawns the background thread running [`resolver_thread`] with `resolver`.
/// - Inserts [`ResolverBridge`] and initializes `Messages<ResolveMessage>`.
pub fn setup_resolver(world: &mut World, resolver: Box<dyn ContentResolver>) {
    let (tx_cmd, rx_cmd) = unbounded::<ResolveCmd>();
    let (tx_msg, rx_msg) = unbounded::<ResolveMessage>();

    let handle = std::thread::spawn(move || resolver_thread(resolver, rx_cmd, tx_msg));

    world.insert_resource(ResolverBridge {
        tx_cmd,
        rx_msg,
        handle,
        pending: FxHashSet::default(),
    });
    world.insert_resource(Messages::<ResolveMessage>::default());
}

/// Request shutdown of the resolver thread and join it.
///
/// A fetch that is still in progress finishes first; there is no timeout.
pub fn shutdown_resolver(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<ResolverBridge>() {
        let _ = bridge.tx_cmd.send(ResolveCmd::Shutdown);
        let _ = bridge.handle.join();
    }
}
