//! # Settlement
//!
//! When an extraction finishes, spawned items sitting in an extraction region
//! are recorded as purchases and removed from the world.

use crate::{EntityId, Host, LifecycleLedger, PurchaseRecorder, SkipReason};

/// Aggregate outcome of one settlement pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettlementReport {
    pub skipped: Option<SkipReason>,
    /// Entities tracked when the pass started
    pub tracked: usize,
    /// Entities settled, with the item name recorded for each
    pub settled: Vec<(EntityId, String)>,
    /// Entities left in place for a later extraction
    pub untouched: usize,
    /// Entities the host no longer knows about, dropped from tracking
    pub vanished: usize,
}

impl SettlementReport {
    pub(crate) fn skipped(reason: SkipReason) -> Self {
        Self {
            skipped: Some(reason),
            ..Self::default()
        }
    }

    pub fn settled_count(&self) -> usize {
        self.settled.len()
    }
}

/// Settles every tracked entity that is inside an extraction region.
///
/// Settled and vanished entities leave the ledger, so no entity is ever
/// settled twice. The order entities are visited in is not defined.
pub fn settle_extracted<H, P>(
    host: &mut H,
    purchases: &mut P,
    lifecycle: &mut LifecycleLedger,
) -> SettlementReport
where
    H: Host + ?Sized,
    P: PurchaseRecorder + ?Sized,
{
    let mut report = SettlementReport {
        tracked: lifecycle.len(),
        ..SettlementReport::default()
    };

    for id in lifecycle.ids() {
        let regions = match host.entity_regions(id) {
            Some(regions) => regions,
            None => {
                log::debug!("Spawned item {} no longer exists, forgetting it", id);
                lifecycle.remove(id);
                report.vanished += 1;
                continue;
            }
        };

        if !regions.iter().any(|&region| host.is_extraction_region(region)) {
            report.untouched += 1;
            continue;
        }

        if let Some(entity) = lifecycle.remove(id) {
            log::info!("Adding item {} to purchased items", entity.item_name);
            purchases.record_purchase(&entity.item_name);

            log::info!("Destroying spawned item {} in extraction point", entity.item_name);
            host.destroy_entity(id);
            report.settled.push((id, entity.item_name));
        }
    }

    report
}
