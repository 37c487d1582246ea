/*
 * component.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Components: a container re-rendered from state-store notifications.
//!
//! The engine does not own a state store. [`StateStore`] is the contract it
//! needs from one: deliver the changed value for a subscribed path, and stop
//! when the returned [`Subscription`] is released.

use vanilla_dom::NodeRef;

use crate::config::RenderConfig;
use crate::context::RenderContext;
use crate::render::{MountResult, render_with};
use crate::value::Value;

/// A reactive store a [`Component`] can subscribe to.
pub trait StateStore {
    type Value;

    /// Call `callback` with the new value whenever `path` changes.
    fn subscribe(&self, path: &str, callback: Box<dyn Fn(&Self::Value)>) -> Subscription;
}

/// Handle to a store subscription. Unsubscribes on [`Subscription::off`] or
/// when dropped.
pub struct Subscription {
    off: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(off: impl FnOnce() + 'static) -> Self {
        Self {
            off: Some(Box::new(off)),
        }
    }

    pub fn off(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(off) = self.off.take() {
            off();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.off.is_some())
            .finish()
    }
}

/// A container whose children are rebuilt on every render.
#[derive(Debug)]
pub struct Component {
    container: NodeRef,
    config: RenderConfig,
    subscriptions: Vec<Subscription>,
}

impl Component {
    pub fn new(container: NodeRef) -> Self {
        Self::with_config(container, RenderConfig::default())
    }

    pub fn with_config(container: NodeRef, config: RenderConfig) -> Self {
        Self {
            container,
            config,
            subscriptions: Vec::new(),
        }
    }

    pub fn container(&self) -> &NodeRef {
        &self.container
    }

    /// Replace the container's children with `value`.
    pub fn render(&self, value: impl Into<Value>) -> MountResult {
        let mut ctx = RenderContext::with_config(self.config.clone());
        render_with(value, Some(&self.container), &mut ctx)
    }

    /// Re-render `view(value)` into the container whenever `path` changes in
    /// `store`.
    pub fn bind<S, F, V>(&mut self, store: &S, path: &str, view: F)
    where
        S: StateStore,
        F: Fn(&S::Value) -> V + 'static,
        V: Into<Value>,
    {
        let container = self.container.clone();
        let config = self.config.clone();
        let path_name = path.to_string();
        let subscription = store.subscribe(
            path,
            Box::new(move |value: &S::Value| {
                tracing::debug!(path = %path_name, "State changed; re-rendering component");
                let mut ctx = RenderContext::with_config(config.clone());
                render_with(view(value), Some(&container), &mut ctx);
            }),
        );
        self.subscriptions.push(subscription);
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Release every subscription. The rendered children stay in place.
    pub fn disconnect(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.off();
        }
    }
}
