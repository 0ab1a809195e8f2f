//! Named flows chaining several text boxes into one stream of content.

use crate::layout::PageLayout;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Maps a flow name to the page holding that flow's unconsumed content.
///
/// The registry only holds weak references: pages belong to the drawing tree,
/// and an entry whose page was dropped simply has nothing left to give. It is
/// reset at the start of every document evaluation.
#[derive(Debug, Default)]
pub struct FlowRegistry {
    flows: HashMap<String, Weak<RefCell<PageLayout>>>,
}

impl FlowRegistry {
    pub fn new() -> FlowRegistry {
        FlowRegistry::default()
    }

    /// Make `page` the source of the named flow
    pub fn register<S: Into<String>>(&mut self, name: S, page: &Rc<RefCell<PageLayout>>) {
        self.flows.insert(name.into(), Rc::downgrade(page));
    }

    /// The page currently feeding the named flow, if it is still alive
    pub fn current(&self, name: &str) -> Option<Rc<RefCell<PageLayout>>> {
        self.flows.get(name).and_then(Weak::upgrade)
    }

    /// Move the named flow on to `page`, so the next overflow box continues
    /// from it instead of consuming the same remainder again
    pub fn advance(&mut self, name: &str, page: &Rc<RefCell<PageLayout>>) {
        log::debug!("flow '{name}' continues in a new overflow box");
        self.flows.insert(name.to_string(), Rc::downgrade(page));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.flows.contains_key(name)
    }

    pub fn clear(&mut self) {
        self.flows.clear();
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }
}
