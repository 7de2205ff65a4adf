//! Overlay Injection Registry

use omnichat_core::{DynamicElement, ElementId};

/// Injected overlay elements in insertion order
#[derive(Debug, Clone, Default)]
pub struct OverlayRegistry {
    elements: Vec<DynamicElement>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: DynamicElement) -> ElementId {
        let id = element.id;
        self.elements.push(element);
        id
    }

    /// Remove by id. Removing an absent id is a no-op returning `false`.
    pub fn remove(&mut self, id: ElementId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| e.id != id);
        self.elements.len() != before
    }

    pub fn get(&self, index: usize) -> Option<&DynamicElement> {
        self.elements.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DynamicElement> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Most recently injected element
    pub fn topmost(&self) -> Option<&DynamicElement> {
        self.elements.last()
    }
}
