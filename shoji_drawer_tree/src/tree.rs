// Copyright 2025 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core drawer tree: structure, render passes, height propagation.

use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::store::OpenStore;
use crate::types::{DrawerFlags, DrawerId, DrawerState};

/// Probe resolving a drawer key to the measured height of its own directly
/// rendered content, excluding nested drawers.
///
/// Returning `None` means the content container is empty: the drawer gets no
/// content flag and can never open. A host that fails to measure a node should
/// return `None` rather than propagate the failure; a render pass never aborts
/// mid-traversal over one bad measurement.
pub type MeasureFn<'a> = &'a dyn Fn(&str) -> Option<f64>;

/// Tree of collapsible drawers.
///
/// Nodes live in a generational slot arena: a [`DrawerId`] stays valid until
/// its drawer is removed, after which the id reads as stale and every accessor
/// answers `None` or a no-op. The tree also maintains a key → id map so that
/// persisted open/closed state (addressed by key, see [`OpenStore`]) can be
/// re-associated across rebuilds.
///
/// Heights are bookkept per node as two accumulators:
///
/// - `data_height`: the drawer's own content height, seeded by render passes.
/// - `extra_height`: the signed sum of height deltas contributed by descendant
///   drawers opening and closing, relayed upward unchanged.
///
/// The effective max-height applied to a drawer's content container is the sum
/// of the two; see [`DrawerTree::effective_max_height`]. Opening or closing a
/// drawer adjusts every ancestor's accumulator by exactly that drawer's own
/// `data_height` in O(depth), rather than recomputing subtree totals.
///
/// ## Example
///
/// ```rust
/// use shoji_drawer_tree::{DrawerTree, MemoryStore, OpenStore};
///
/// let mut tree = DrawerTree::new();
/// let root = tree.insert(None, "members");
/// let group = tree.insert(Some(root), "members.accessors");
///
/// let mut store = MemoryStore::new();
/// store.set_open("members.accessors");
///
/// let measure = |key: &str| match key {
///     "members" => Some(24.0),
///     "members.accessors" => Some(120.0),
///     _ => None,
/// };
/// tree.render(root, &measure, &mut store);
///
/// // The pre-opened group already contributes its height to the root.
/// assert_eq!(tree.effective_max_height(root), Some(144.0));
///
/// // Settle the initial state, then enable transitions on what was rendered.
/// let rendered = tree.commit();
/// assert_eq!(rendered.len(), 2);
/// ```
pub struct DrawerTree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    by_key: HashMap<String, DrawerId>,
}

impl core::fmt::Debug for DrawerTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("DrawerTree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

impl Default for DrawerTree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<DrawerId>,
    children: Vec<DrawerId>,
    key: String,
    state: DrawerState,
    data_height: f64,
    extra_height: f64,
    flags: DrawerFlags,
    options: SmallVec<[(String, String); 2]>,
}

impl Node {
    fn new(generation: u32, key: String) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            key,
            state: DrawerState::Closed,
            data_height: 0.0,
            extra_height: 0.0,
            flags: DrawerFlags::empty(),
            options: SmallVec::new(),
        }
    }
}

impl DrawerTree {
    /// Creates a new empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    /// Inserts a new drawer as a child of `parent` (or as a root if `None`).
    ///
    /// The drawer starts `Closed` with zero heights and no content flag; a
    /// subsequent [`DrawerTree::render`] from its root seeds the heights and
    /// applies persisted state. Keys must be unique within the tree — a
    /// duplicate insert is a caller bug caught by a debug assertion.
    pub fn insert(&mut self, parent: Option<DrawerId>, key: impl Into<String>) -> DrawerId {
        let key = key.into();
        debug_assert!(
            !self.by_key.contains_key(&key),
            "duplicate drawer key {key:?}"
        );
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, key.clone()));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "DrawerId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, key.clone())));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "DrawerId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = DrawerId::new(idx, generation);
        if let Some(p) = parent {
            self.link_parent(id, p);
        }
        self.by_key.insert(key, id);
        id
    }

    /// Removes a drawer (and its subtree) from the tree.
    ///
    /// The ids become stale immediately and the removed keys are freed for
    /// reuse. The persisted store is not touched: a later rebuild under the
    /// same keys picks the stored state back up.
    pub fn remove(&mut self, id: DrawerId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove(child);
        }
        let key = self.node(id).key.clone();
        self.by_key.remove(&key);
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Returns true if `id` refers to a live drawer.
    ///
    /// A `DrawerId` is considered live if its slot exists and its generation
    /// matches the current generation stored in that slot.
    #[must_use]
    pub fn is_alive(&self, id: DrawerId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Returns the parent of a drawer if live, or `None` for roots or stale ids.
    #[must_use]
    pub fn parent_of(&self, id: DrawerId) -> Option<DrawerId> {
        if !self.is_alive(id) {
            return None;
        }
        self.node(id).parent
    }

    /// Returns the children of a drawer, or an empty slice if the id is stale.
    #[must_use]
    pub fn children_of(&self, id: DrawerId) -> &[DrawerId] {
        if !self.is_alive(id) {
            return &[];
        }
        &self.node(id).children
    }

    /// Returns true iff `id` is live and has no parent.
    #[must_use]
    pub fn is_root(&self, id: DrawerId) -> bool {
        self.is_alive(id) && self.node(id).parent.is_none()
    }

    /// Returns the key of a live drawer.
    #[must_use]
    pub fn key_of(&self, id: DrawerId) -> Option<&str> {
        if !self.is_alive(id) {
            return None;
        }
        Some(self.node(id).key.as_str())
    }

    /// Resolves a drawer key to its current id.
    #[must_use]
    pub fn id_of(&self, key: &str) -> Option<DrawerId> {
        self.by_key.get(key).copied()
    }

    /// Returns the open/closed state of a live drawer.
    #[must_use]
    pub fn state(&self, id: DrawerId) -> Option<DrawerState> {
        if !self.is_alive(id) {
            return None;
        }
        Some(self.node(id).state)
    }

    /// Returns the flags of a live drawer.
    #[must_use]
    pub fn flags(&self, id: DrawerId) -> Option<DrawerFlags> {
        if !self.is_alive(id) {
            return None;
        }
        Some(self.node(id).flags)
    }

    /// The drawer's own content height, seeded by render passes.
    #[must_use]
    pub fn data_height(&self, id: DrawerId) -> Option<f64> {
        if !self.is_alive(id) {
            return None;
        }
        Some(self.node(id).data_height)
    }

    /// The accumulated signed height contributed by descendant drawers.
    #[must_use]
    pub fn extra_height(&self, id: DrawerId) -> Option<f64> {
        if !self.is_alive(id) {
            return None;
        }
        Some(self.node(id).extra_height)
    }

    /// The max-height the host should style onto the content container:
    /// `data_height + extra_height`.
    ///
    /// This is the *stored* height. A closed drawer keeps accumulating
    /// descendant deltas here, but visually collapses through its closed
    /// class; the stored value is what makes reopening cheap.
    #[must_use]
    pub fn effective_max_height(&self, id: DrawerId) -> Option<f64> {
        if !self.is_alive(id) {
            return None;
        }
        let n = self.node(id);
        Some(n.data_height + n.extra_height)
    }

    /// Sets a display-option attribute on the drawer.
    ///
    /// Options are pure styling hooks (for example "show private members")
    /// forwarded for the host's CSS layer; they never touch the height
    /// machinery. Setting an existing key replaces its value.
    pub fn set_option(&mut self, id: DrawerId, key: &str, value: &str) {
        if !self.is_alive(id) {
            return;
        }
        let options = &mut self.node_mut(id).options;
        if let Some(slot) = options.iter_mut().find(|(k, _)| k == key) {
            slot.1 = String::from(value);
        } else {
            options.push((String::from(key), String::from(value)));
        }
    }

    /// Reads a display-option attribute from a live drawer.
    #[must_use]
    pub fn option(&self, id: DrawerId, key: &str) -> Option<&str> {
        if !self.is_alive(id) {
            return None;
        }
        self.node(id)
            .options
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Runs the initializing render pass for the tree rooted at `root`.
    ///
    /// This is a no-op unless `root` actually is a root: only the top of a
    /// tree may trigger an initializing pass, which guarantees a single
    /// top-down traversal per tree. For each drawer, top-down:
    ///
    /// - derives the content flag from `measure` (`None` = empty container),
    /// - adds the measured height to `data_height` (the probe feeds an
    ///   accumulator; render a tree once per construction, and use
    ///   [`DrawerTree::reset_heights`] when content changes),
    /// - defaults the drawer to `Closed`, then applies persisted state —
    ///   drawers recorded open in `store` open immediately, seeding every
    ///   ancestor's extra height without any user interaction,
    /// - marks the drawer render-pending.
    ///
    /// Call [`DrawerTree::commit`] once layout has settled to promote pending
    /// drawers to rendered, which is the host's cue to enable CSS transitions
    /// (avoiding a visible animation on first paint).
    pub fn render<S: OpenStore>(&mut self, root: DrawerId, measure: MeasureFn<'_>, store: &mut S) {
        if !self.is_root(root) {
            log::debug!("ignoring render for non-root drawer {root:?}");
            return;
        }
        log::debug!("render pass from {:?}", self.node(root).key);
        self.render_node(root, measure, store);
    }

    fn render_node<S: OpenStore>(&mut self, id: DrawerId, measure: MeasureFn<'_>, store: &mut S) {
        let measured = measure(self.node(id).key.as_str());
        let (has_content, mut height) = match measured {
            Some(h) => (true, h),
            None => (false, 0.0),
        };
        debug_assert!(
            height.is_finite(),
            "measured drawer heights must be finite; got {height:?}"
        );
        if height.is_sign_negative() {
            height = 0.0;
        }

        {
            let n = self.node_mut(id);
            n.flags.set(DrawerFlags::HAS_CONTENT, has_content);
            n.data_height += height;
            n.state = DrawerState::Closed;
        }

        let open_in_store = store.is_open(self.node(id).key.as_str());
        if open_in_store {
            self.open(id, store);
        } else {
            self.close(id, store);
        }

        let children = self.node(id).children.clone();
        for child in children {
            self.render_node(child, measure, store);
        }

        self.node_mut(id).flags.insert(DrawerFlags::RENDER_PENDING);
    }

    /// Promotes every render-pending drawer to rendered and reports which.
    ///
    /// Hosts call this one tick after a render pass, once layout has settled,
    /// and enable CSS transitions on the returned drawers. A second call with
    /// no intervening render returns an empty list.
    pub fn commit(&mut self) -> Vec<DrawerId> {
        let mut rendered = Vec::new();
        for (i, slot) in self.nodes.iter_mut().enumerate() {
            let Some(n) = slot.as_mut() else { continue };
            if n.flags.contains(DrawerFlags::RENDER_PENDING) {
                n.flags.remove(DrawerFlags::RENDER_PENDING);
                n.flags.insert(DrawerFlags::RENDERED);
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "DrawerId uses 32-bit indices by design."
                )]
                rendered.push(DrawerId::new(i as u32, n.generation));
            }
        }
        rendered
    }

    /// Opens a drawer, relaying its own height to every ancestor.
    ///
    /// Returns `true` if the state actually changed. A drawer that is already
    /// open, has no content, or is stale is a no-op — repeated calls never
    /// double-count ancestor heights. On success the open state is persisted
    /// under the drawer's key.
    pub fn open<S: OpenStore>(&mut self, id: DrawerId, store: &mut S) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let n = self.node(id);
        if n.state.is_open() || !n.flags.contains(DrawerFlags::HAS_CONTENT) {
            return false;
        }
        let delta = n.data_height;
        let parent = n.parent;
        let key = n.key.clone();

        self.propagate_above(parent, delta);
        self.node_mut(id).state = DrawerState::Open;
        store.set_open(&key);
        log::trace!("opened {key:?} (+{delta})");
        true
    }

    /// Closes a drawer, subtracting its own height from every ancestor.
    ///
    /// Returns `true` if the state actually changed. Contributions that open
    /// descendants relayed through this drawer stay in the ancestors'
    /// accumulators: closing collapses only this drawer's own height, so a
    /// later reopen restores the stored subtree height without recomputation.
    /// On success the key is removed from the store's open set.
    pub fn close<S: OpenStore>(&mut self, id: DrawerId, store: &mut S) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let n = self.node(id);
        if !n.state.is_open() || !n.flags.contains(DrawerFlags::HAS_CONTENT) {
            return false;
        }
        let delta = n.data_height;
        let parent = n.parent;
        let key = n.key.clone();

        self.propagate_above(parent, -delta);
        self.node_mut(id).state = DrawerState::Closed;
        store.set_closed(&key);
        log::trace!("closed {key:?} (-{delta})");
        true
    }

    /// Toggles a drawer between open and closed.
    pub fn toggle<S: OpenStore>(&mut self, id: DrawerId, store: &mut S) -> bool {
        match self.state(id) {
            Some(DrawerState::Open) => self.close(id, store),
            Some(DrawerState::Closed) => self.open(id, store),
            None => false,
        }
    }

    /// Rebuilds all heights in the tree rooted at `root` from scratch.
    ///
    /// A no-op unless `root` is a root, like [`DrawerTree::render`]. Used
    /// after global content or layout changes (a resize, or a display option
    /// that shows/hides members and changes every node's content height):
    /// zeroes both height accumulators and strips the rendered/content flags
    /// across the subtree, children before parents, then re-renders from the
    /// persisted store, which re-seeds ancestor heights through the normal
    /// open path.
    pub fn reset_heights<S: OpenStore>(
        &mut self,
        root: DrawerId,
        measure: MeasureFn<'_>,
        store: &mut S,
    ) {
        if !self.is_root(root) {
            log::debug!("ignoring height reset for non-root drawer {root:?}");
            return;
        }
        log::debug!("height reset from {:?}", self.node(root).key);
        self.clear_subtree(root);
        self.render(root, measure, store);
    }

    // --- internals ---

    fn clear_subtree(&mut self, id: DrawerId) {
        let children = self.node(id).children.clone();
        for child in children {
            self.clear_subtree(child);
        }
        let n = self.node_mut(id);
        n.data_height = 0.0;
        n.extra_height = 0.0;
        n.state = DrawerState::Closed;
        n.flags.remove(
            DrawerFlags::HAS_CONTENT | DrawerFlags::RENDER_PENDING | DrawerFlags::RENDERED,
        );
    }

    /// Relays a signed height delta to every ancestor, terminating at the root.
    ///
    /// Each ancestor's accumulator moves by exactly the toggling drawer's own
    /// height; intermediate drawers never re-derive subtree totals.
    fn propagate_above(&mut self, mut cur: Option<DrawerId>, delta: f64) {
        while let Some(id) = cur {
            let n = self.node_mut(id);
            n.extra_height += delta;
            cur = n.parent;
        }
    }

    /// Access a node; panics if `id` is stale.
    fn node(&self, id: DrawerId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling DrawerId")
    }

    /// Access a node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: DrawerId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling DrawerId")
    }

    fn link_parent(&mut self, id: DrawerId, parent: DrawerId) {
        let parent_node = self.node_mut(parent);
        parent_node.children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: DrawerId, parent: DrawerId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}
