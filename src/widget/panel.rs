use crate::layout::Layout;
use crate::tree::ComponentId;

/// A container. Children are painted in insertion order, back to front.
#[derive(Debug, Default)]
pub struct Panel {
    pub(crate) children: Vec<ComponentId>,
    layout: Option<Box<dyn Layout>>,
}

impl Panel {
    /// Creates a panel whose children keep the positions they're given.
    pub fn new() -> Panel {
        Panel::default()
    }

    /// Creates a panel that positions its children with `layout` on every layout pass.
    pub fn with_layout<L: Layout + 'static>(layout: L) -> Panel {
        Panel {
            children: Vec::new(),
            layout: Some(Box::new(layout)),
        }
    }

    pub fn children(&self) -> &[ComponentId] {
        &self.children
    }

    pub fn layout(&self) -> Option<&dyn Layout> {
        self.layout.as_deref()
    }

    pub fn set_layout(&mut self, layout: Option<Box<dyn Layout>>) {
        self.layout = layout;
    }
}
