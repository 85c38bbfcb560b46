//! Bookkeeping for the outline panels mounted in editor panes.
//!
//! Each pane shows at most one outline, and a document open in several panes gets one
//! outline per pane. The registry keeps two maps in step:
//!
//! ```text
//! pane     -> instance          (at most one)
//! document -> [pane, ...]       (one entry per pane showing it, removed when empty)
//! ```
//!
//! Only the operations on [`OutlineRegistry`] write these maps. Every operation finishes
//! its bookkeeping before calling into the [`OutlineSurface`], so a misbehaving renderer
//! can never leave a dangling entry behind. Events that make no sense for the current
//! state (closing an unknown pane, refreshing a document nobody shows) are ignored.

use crate::config::Config;
use crate::frontmatter::TocDirective;
use crate::metadata::{DocumentId, DocumentMetadata, MetadataSink, MetadataSource, PaneId};
use crate::tree::{self, TreeNode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
/// Identity of one outline instance, unique within its registry.
pub struct InstanceId(pub u64);

#[derive(Clone, Debug, PartialEq, Serialize)]
/// One outline panel: a document's heading tree shown in a specific pane.
pub struct OutlineInstance {
    id: InstanceId,
    pane: PaneId,
    document: DocumentId,
    tree: TreeNode,
    mounted: bool,
}

impl OutlineInstance {
    #[must_use]
    /// Identity of this instance.
    pub fn id(&self) -> InstanceId {
        self.id
    }

    #[must_use]
    /// Pane the panel is docked to.
    pub fn pane(&self) -> PaneId {
        self.pane
    }

    #[must_use]
    /// Document whose headings are shown.
    pub fn document(&self) -> &DocumentId {
        &self.document
    }

    #[must_use]
    /// Root of the heading tree. Renderers show its children, never the root itself.
    pub fn tree(&self) -> &TreeNode {
        &self.tree
    }

    #[must_use]
    /// Whether the rendering surface has been asked to show this instance.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }
}

/// Rendering side of the outline.
///
/// The registry calls these after its own state is consistent. Implementations decide how
/// (and whether) to draw; the registry does not depend on them succeeding.
pub trait OutlineSurface {
    /// Show a newly created instance.
    fn mount(&mut self, instance: &OutlineInstance);
    /// Redisplay an instance whose tree was rebuilt.
    fn redraw(&mut self, instance: &OutlineInstance);
    /// Remove an instance's panel.
    fn unmount(&mut self, instance: &OutlineInstance);
    /// Scroll `pane` to `line` after the user picked a heading.
    fn navigate(&mut self, pane: PaneId, line: u32);
}

#[derive(Clone, Copy, Debug, Default)]
/// Surface that draws nothing.
pub struct NullSurface;

impl OutlineSurface for NullSurface {
    fn mount(&mut self, _instance: &OutlineInstance) {}
    fn redraw(&mut self, _instance: &OutlineInstance) {}
    fn unmount(&mut self, _instance: &OutlineInstance) {}
    fn navigate(&mut self, _pane: PaneId, _line: u32) {}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
/// Pane lifecycle and metadata notifications delivered by the host.
pub enum HostEvent {
    /// A pane was created. It shows nothing until a document becomes active in it.
    PaneOpened {
        /// The new pane.
        pane: PaneId,
    },
    /// The pane's active view changed. `None` means it left document view entirely.
    DocumentChanged {
        /// Pane whose content changed.
        pane: PaneId,
        /// Document now shown, if any.
        document: Option<DocumentId>,
    },
    /// A pane was closed.
    PaneClosed {
        /// The closed pane.
        pane: PaneId,
    },
    /// The metadata cache has new headings or front matter for a document.
    MetadataChanged {
        /// Document whose metadata changed.
        document: DocumentId,
        /// New metadata to store before refreshing. Absent when the host already updated
        /// the source itself.
        #[serde(default)]
        metadata: Option<DocumentMetadata>,
    },
}

/// Tracks outline instances per pane and per document.
pub struct OutlineRegistry<S> {
    source: S,
    config: Config,
    surface: Box<dyn OutlineSurface>,
    panes: HashMap<PaneId, OutlineInstance>,
    documents: HashMap<DocumentId, Vec<PaneId>>,
    next_id: u64,
}

impl<S: MetadataSource> OutlineRegistry<S> {
    #[must_use]
    /// Creates an empty registry reading metadata from `source`.
    pub fn new(source: S, config: Config) -> Self {
        Self {
            source,
            config,
            surface: Box::new(NullSurface),
            panes: HashMap::new(),
            documents: HashMap::new(),
            next_id: 0,
        }
    }

    #[must_use]
    /// Replaces the rendering surface.
    pub fn with_surface(mut self, surface: impl OutlineSurface + 'static) -> Self {
        self.surface = Box::new(surface);
        self
    }

    /// Shows `document`'s outline in `pane`.
    ///
    /// Re-activating the document a pane already shows returns the existing instance. If the
    /// pane held an outline for another document, that outline is torn down first, even when
    /// the new document turns out to be excluded. Returns `None` for excluded documents.
    pub fn activate(&mut self, pane: PaneId, document: DocumentId) -> Option<&OutlineInstance> {
        match self.panes.get(&pane).map(|i| i.document == document) {
            Some(true) => {
                trace!(%pane, %document, "outline already active");
                return self.panes.get(&pane);
            }
            Some(false) => self.deactivate(pane),
            None => {}
        }

        if self.exclude(&document) {
            debug!(%pane, %document, "document excluded from outline");
            return None;
        }

        let id = InstanceId(self.next_id);
        self.next_id += 1;
        let instance = OutlineInstance {
            id,
            pane,
            tree: self.build_tree(&document),
            document: document.clone(),
            mounted: false,
        };
        debug!(
            %pane,
            %document,
            instance = id.0,
            headings = instance.tree.len(),
            "outline activated"
        );

        self.documents.entry(document).or_default().push(pane);
        let instance = self.panes.entry(pane).insert_entry(instance).into_mut();

        instance.mounted = true;
        self.surface.mount(instance);
        Some(&*instance)
    }

    /// Removes the outline shown in `pane`, if any, and unmounts it.
    pub fn deactivate(&mut self, pane: PaneId) {
        let Some(mut instance) = self.panes.remove(&pane) else {
            trace!(%pane, "no outline to deactivate");
            return;
        };

        if let Some(panes) = self.documents.get_mut(&instance.document) {
            panes.retain(|p| *p != pane);
            if panes.is_empty() {
                self.documents.remove(&instance.document);
            }
        }
        debug!(
            %pane,
            document = %instance.document,
            instance = instance.id.0,
            "outline deactivated"
        );

        if std::mem::replace(&mut instance.mounted, false) {
            self.surface.unmount(&instance);
        }
    }

    /// Rebuilds the tree of every outline showing `document`.
    ///
    /// A document whose front matter now opts out loses all of its outlines instead.
    pub fn refresh(&mut self, document: &DocumentId) {
        let Some(panes) = self.documents.get(document) else {
            trace!(%document, "no outline to refresh");
            return;
        };

        if self.directive(document) == TocDirective::OptOut {
            debug!(%document, "document opted out, removing outlines");
            for pane in panes.clone() {
                self.deactivate(pane);
            }
            return;
        }

        let tree = self.build_tree(document);
        debug!(
            %document,
            instances = panes.len(),
            headings = tree.len(),
            "refreshing outlines"
        );
        for pane in panes {
            if let Some(instance) = self.panes.get_mut(pane) {
                instance.tree = tree.clone();
                self.surface.redraw(instance);
            }
        }
    }

    #[must_use]
    /// Whether `document` should get no outline.
    ///
    /// An explicit front matter opt-out wins, then an explicit opt-in, and only then are the
    /// configured path prefixes consulted.
    pub fn exclude(&self, document: &DocumentId) -> bool {
        match self.directive(document) {
            TocDirective::OptOut => true,
            TocDirective::OptIn => false,
            TocDirective::Unset => self.config.is_excluded_path(document.path()),
        }
    }

    /// Handles the user picking a heading in `pane`'s outline.
    ///
    /// Returns `false` when the pane has no outline.
    pub fn select_heading(&mut self, pane: PaneId, line: u32) -> bool {
        if !self.panes.contains_key(&pane) {
            trace!(%pane, line, "heading selected in unknown pane");
            return false;
        }
        debug!(%pane, line, "navigating to heading");
        self.surface.navigate(pane, line);
        true
    }

    /// Handles the user closing `pane`'s outline from its menu.
    pub fn dismiss(&mut self, pane: PaneId) {
        debug!(%pane, "outline dismissed");
        self.deactivate(pane);
    }

    #[must_use]
    /// The outline shown in `pane`.
    pub fn instance(&self, pane: PaneId) -> Option<&OutlineInstance> {
        self.panes.get(&pane)
    }

    /// Every outline showing `document`, in activation order.
    pub fn instances_for<'a>(
        &'a self,
        document: &DocumentId,
    ) -> impl Iterator<Item = &'a OutlineInstance> + 'a {
        self.documents
            .get(document)
            .into_iter()
            .flatten()
            .filter_map(|pane| self.panes.get(pane))
    }

    /// All live outlines, ordered by pane.
    pub fn instances(&self) -> impl Iterator<Item = &OutlineInstance> {
        let mut instances: Vec<_> = self.panes.values().collect();
        instances.sort_by_key(|i| i.pane);
        instances.into_iter()
    }

    #[must_use]
    /// Number of panes with an outline.
    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    #[must_use]
    /// Number of documents with at least one outline.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    fn directive(&self, document: &DocumentId) -> TocDirective {
        self.source
            .metadata(document)
            .map_or(TocDirective::Unset, |m| m.frontmatter.toc_directive())
    }

    fn build_tree(&self, document: &DocumentId) -> TreeNode {
        self.source
            .metadata(document)
            .map_or_else(TreeNode::root, |m| tree::build(&m.headings))
    }
}

impl<S: MetadataSource + MetadataSink> OutlineRegistry<S> {
    /// Applies one host notification.
    pub fn handle(&mut self, event: HostEvent) {
        trace!(?event, "host event");
        match event {
            HostEvent::PaneOpened { .. } => {}
            HostEvent::DocumentChanged {
                pane,
                document: Some(document),
            } => {
                self.activate(pane, document);
            }
            HostEvent::DocumentChanged {
                pane,
                document: None,
            }
            | HostEvent::PaneClosed { pane } => self.deactivate(pane),
            HostEvent::MetadataChanged { document, metadata } => {
                if let Some(metadata) = metadata {
                    self.source.update(document.clone(), metadata);
                }
                self.refresh(&document);
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/registry.rs"]
mod tests;
