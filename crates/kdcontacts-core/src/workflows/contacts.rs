use crate::core::models::contact::Contact;
use crate::core::models::point_set::PointSet;
use crate::core::spatial::kdtree::KdTree;
use crate::engine::config::ContactConfig;
use crate::engine::contacts::find_contacts;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct ContactSearchResult {
    /// Contacts grouped by query atom in point-set order. Every pair appears in both
    /// directions.
    pub contacts: Vec<Contact>,
    /// Height of the tree that was searched, 0 for an empty point set.
    pub tree_height: usize,
}

#[instrument(skip_all, name = "contact_workflow", fields(points = points.len(), radius = config.radius))]
pub fn run(
    points: &PointSet,
    config: &ContactConfig,
    reporter: &ProgressReporter,
) -> Result<ContactSearchResult, EngineError> {
    // === Phase 1: Spatial index ===
    reporter.report(Progress::PhaseStart {
        name: "Building k-d tree",
    });
    let tree = KdTree::build(points)?;
    let tree_height = tree.height();
    info!(height = tree_height, "k-d tree ready.");
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Per-atom range queries ===
    reporter.report(Progress::PhaseStart {
        name: "Searching contacts",
    });
    let contacts = find_contacts(points, &tree, config.radius, reporter);
    reporter.report(Progress::PhaseFinish);

    info!(
        "Workflow complete. Found {} directed contact(s).",
        contacts.len()
    );
    Ok(ContactSearchResult {
        contacts,
        tree_height,
    })
}
