//! Documentation page composition.

use std::fmt;
use std::sync::Arc;

use crate::render::context::RenderContext;
use crate::store::{ContentStore, DocsParameters, UNIVERSAL_STORY_ID};

/// Component wrapping the documentation page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocsContainer {
    /// Renders the page as-is
    PassThrough,
    Named(String),
}

/// Documentation page component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocsPage {
    /// Placeholder shown when the story declares no page
    NoDocs,
    Named(String),
}

/// A container around a page, with the store handle and the render context as its data.
#[derive(Clone)]
pub struct DocsComposition {
    pub container: DocsContainer,
    pub page: DocsPage,
    pub store: Arc<dyn ContentStore>,
    pub context: RenderContext,
}

impl fmt::Debug for DocsComposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocsComposition")
            .field("container", &self.container)
            .field("page", &self.page)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

fn components(docs: Option<&DocsParameters>) -> (DocsContainer, DocsPage) {
    let container = docs
        .and_then(|d| d.container.clone())
        .map_or(DocsContainer::PassThrough, DocsContainer::Named);
    let page = docs
        .and_then(|d| d.page.clone())
        .map_or(DocsPage::NoDocs, DocsPage::Named);
    (container, page)
}

/// Compose the documentation view for `context`.
///
/// Returns `None` for the universal selection or a story without parameters, since there is
/// nothing to document.
pub fn compose(context: &RenderContext, store: Arc<dyn ContentStore>) -> Option<DocsComposition> {
    if context.id == UNIVERSAL_STORY_ID {
        return None;
    }
    let parameters = context.parameters()?;
    let (container, page) = components(parameters.docs.as_ref());
    Some(DocsComposition {
        container,
        page,
        store,
        context: context.clone(),
    })
}
