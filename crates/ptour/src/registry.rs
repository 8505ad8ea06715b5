#![forbid(unsafe_code)]

//! Step Registry: the ordered, immutable catalog of tour steps.
//!
//! Order is navigation order. The registry is validated once when it is
//! built (non-empty, unique ids, parseable selectors) and never mutated
//! afterwards; the controller only ever reads from it.

use std::collections::HashSet;

use crate::error::{Result, TourError};
use crate::placement::Side;
use crate::selector::Selector;

/// One annotated stop on the tour.
#[derive(Debug, Clone, PartialEq)]
pub struct TourStep {
    pub id: String,
    pub title: String,
    pub description: String,
    pub target: Selector,
    pub preferred_side: Side,
}

impl TourStep {
    /// Build a step, parsing its target selector.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        target: &str,
        preferred_side: Side,
    ) -> Result<Self> {
        let id = id.into();
        let target = Selector::parse(target).map_err(|source| TourError::InvalidSelector {
            step: id.clone(),
            selector: target.to_string(),
            source,
        })?;
        Ok(Self {
            id,
            title: title.into(),
            description: description.into(),
            target,
            preferred_side,
        })
    }
}

/// Static step description, for registries compiled into the binary.
#[derive(Debug, Clone, Copy)]
pub struct StepDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub target: &'static str,
    pub side: Side,
}

/// Non-empty, insertion-ordered sequence of [`TourStep`].
#[derive(Debug, Clone)]
pub struct StepRegistry {
    steps: Vec<TourStep>,
}

impl StepRegistry {
    pub fn new(steps: Vec<TourStep>) -> Result<Self> {
        if steps.is_empty() {
            return Err(TourError::EmptyRegistry);
        }
        let mut seen = HashSet::with_capacity(steps.len());
        for step in &steps {
            if !seen.insert(step.id.as_str()) {
                return Err(TourError::DuplicateStepId {
                    id: step.id.clone(),
                });
            }
        }
        Ok(Self { steps })
    }

    pub fn from_defs(defs: &[StepDef]) -> Result<Self> {
        let steps = defs
            .iter()
            .map(|def| TourStep::new(def.id, def.title, def.description, def.target, def.side))
            .collect::<Result<Vec<_>>>()?;
        Self::new(steps)
    }

    /// The onboarding tour of the solar proposal editor.
    pub fn solar_proposal() -> Result<Self> {
        Self::from_defs(SOLAR_PROPOSAL_STEPS)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&TourStep> {
        self.steps.get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|step| step.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TourStep> {
        self.steps.iter()
    }
}

impl<'a> IntoIterator for &'a StepRegistry {
    type Item = &'a TourStep;
    type IntoIter = std::slice::Iter<'a, TourStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Welcome step on `body`, then the seven editor regions in reading order.
pub const SOLAR_PROPOSAL_STEPS: &[StepDef] = &[
    StepDef {
        id: "step1",
        title: "Welcome to Solar Proposal Tool",
        description: "Let's take a quick tour of the main features to help you get started.",
        target: "body",
        side: Side::Bottom,
    },
    StepDef {
        id: "step2",
        title: "Navigation Sidebar",
        description: "Access different tools like Dashboard, Design Tool, and Proposal Tool from here.",
        target: "[data-tutorial='left-sidebar']",
        side: Side::Right,
    },
    StepDef {
        id: "step3",
        title: "Document Controls",
        description: "Manage versions, sections, and document structure from this dropdown.",
        target: "[data-tutorial='document-controls']",
        side: Side::Bottom,
    },
    StepDef {
        id: "step4",
        title: "Design Controls",
        description: "Customize colors, fonts, and templates to match your brand.",
        target: "[data-tutorial='design-controls']",
        side: Side::Bottom,
    },
    StepDef {
        id: "step5",
        title: "Team Collaboration",
        description: "Invite team members, manage comments, and collaborate in real-time.",
        target: "[data-tutorial='team-controls']",
        side: Side::Bottom,
    },
    StepDef {
        id: "step6",
        title: "Preview & Send",
        description: "Preview your proposal and send it to clients directly from here.",
        target: "[data-tutorial='preview-send']",
        side: Side::Bottom,
    },
    StepDef {
        id: "step7",
        title: "Quick Stats",
        description: "Monitor key metrics like ROI, savings, and carbon offset at a glance.",
        target: "[data-tutorial='quick-stats']",
        side: Side::Left,
    },
    StepDef {
        id: "step8",
        title: "Financing Options",
        description: "Switch between different financing scenarios to show clients their options.",
        target: "[data-tutorial='financing-options']",
        side: Side::Left,
    },
];
