use crate::core::models::bounds::BoundingBox;
use crate::core::models::contact::Contact;
use crate::core::models::point_set::PointSet;
use crate::core::spatial::kdtree::KdTree;
use crate::engine::progress::{Progress, ProgressReporter};
use std::ops::Range;
use tracing::{info, instrument, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Atoms searched between two progress events.
const PROGRESS_BATCH: usize = 512;

/// Finds every atom within `radius` of the atom at index `query`.
///
/// The tree is searched with the cube inscribing the sphere and every candidate is
/// then checked against the true distance, so points a leaf reports from outside the
/// cube are dropped here. The query atom itself is never reported.
pub fn contacts_of(points: &PointSet, tree: &KdTree, query: usize, radius: f64) -> Vec<Contact> {
    let center = &points[query];
    let range = BoundingBox::around(&center.position, radius);

    let mut found = Vec::new();
    tree.for_each_in_range(&range, |target| {
        if target == query {
            return;
        }
        let distance = center.distance_to(&points[target]);
        if distance <= radius {
            found.push(Contact {
                query,
                target,
                distance,
            });
        }
    });
    trace!(query, contacts = found.len(), "Searched neighbourhood.");
    found
}

fn contacts_in_batch(
    points: &PointSet,
    tree: &KdTree,
    batch: Range<usize>,
    radius: f64,
    reporter: &ProgressReporter,
) -> Vec<Contact> {
    let steps = batch.len() as u64;
    let found = batch
        .flat_map(|query| contacts_of(points, tree, query, radius))
        .collect();
    reporter.report(Progress::TaskAdvance { steps });
    found
}

/// Runs [`contacts_of`] for every atom, in point-set order.
///
/// Contacts are grouped by query atom following the order of `points`; within one
/// atom they follow the tree traversal. Each unordered pair therefore appears twice,
/// once from each side, with the same distance.
#[instrument(skip_all, name = "contact_search", fields(points = points.len(), radius))]
pub fn find_contacts(
    points: &PointSet,
    tree: &KdTree,
    radius: f64,
    reporter: &ProgressReporter,
) -> Vec<Contact> {
    let batches: Vec<Range<usize>> = (0..points.len())
        .step_by(PROGRESS_BATCH)
        .map(|start| start..(start + PROGRESS_BATCH).min(points.len()))
        .collect();

    reporter.report(Progress::TaskStart {
        total_steps: points.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = batches.into_iter();

    #[cfg(feature = "parallel")]
    let iterator = batches.into_par_iter();

    let per_batch: Vec<Vec<Contact>> = iterator
        .map(|batch| contacts_in_batch(points, tree, batch, radius, reporter))
        .collect();

    reporter.report(Progress::TaskFinish);

    let contacts: Vec<Contact> = per_batch.into_iter().flatten().collect();
    info!(contacts = contacts.len(), "Contact search complete.");
    contacts
}
