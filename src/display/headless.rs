//! Headless host document
//!
//! Holds the set of widgets that "exist" and a fullscreen state, so the
//! controller can be driven without a real display.

use crate::display::{Document, DisplaySurface, FullscreenApi, WidgetRole};
use crate::utils::error::{OverlayError, Result};
use std::collections::BTreeSet;

/// Simulated document with configurable widgets and fullscreen support
#[derive(Debug, Clone)]
pub struct HeadlessDocument {
    present: BTreeSet<WidgetRole>,
    fullscreen_apis: Vec<FullscreenApi>,
    fullscreen_element: Option<WidgetRole>,
}

impl HeadlessDocument {
    /// Document with every widget present and every entry point supported
    pub fn complete() -> Self {
        Self {
            present: WidgetRole::ALL.into_iter().collect(),
            fullscreen_apis: FullscreenApi::DEFAULT_ORDER.to_vec(),
            fullscreen_element: None,
        }
    }

    /// Remove widgets from the document
    pub fn without(mut self, roles: &[WidgetRole]) -> Self {
        for role in roles {
            self.present.remove(role);
        }
        self
    }

    /// Restrict the supported fullscreen entry points
    pub fn with_fullscreen_apis(mut self, apis: &[FullscreenApi]) -> Self {
        self.fullscreen_apis = apis.to_vec();
        self
    }

    pub fn contains(&self, role: WidgetRole) -> bool {
        self.present.contains(&role)
    }

    /// Element currently shown fullscreen
    pub fn fullscreen_element(&self) -> Option<WidgetRole> {
        self.fullscreen_element
    }

    fn supports(&self, api: FullscreenApi) -> bool {
        self.fullscreen_apis.contains(&api)
    }
}

impl Document for HeadlessDocument {
    fn query(&self, selector: &str) -> bool {
        self.present.iter().any(|role| role.selector() == selector)
    }
}

impl DisplaySurface for HeadlessDocument {
    fn is_fullscreen(&self) -> bool {
        self.fullscreen_element.is_some()
    }

    fn can_enter(&self, api: FullscreenApi) -> bool {
        self.supports(api)
    }

    fn can_exit(&self, api: FullscreenApi) -> bool {
        self.supports(api)
    }

    fn request_fullscreen(&mut self, api: FullscreenApi, target: WidgetRole) -> Result<()> {
        if !self.supports(api) {
            return Err(OverlayError::Fullscreen(format!("{} entry point is not available", api)));
        }
        if !self.contains(target) {
            return Err(OverlayError::Fullscreen(format!("{} is not in the document", target)));
        }
        self.fullscreen_element = Some(target);
        Ok(())
    }

    fn exit_fullscreen(&mut self, api: FullscreenApi) -> Result<()> {
        if !self.supports(api) {
            return Err(OverlayError::Fullscreen(format!("{} entry point is not available", api)));
        }
        self.fullscreen_element = None;
        Ok(())
    }
}
