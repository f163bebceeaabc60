//! Live head-count per agent type.

use hive_core::protocol::NUM_AGENT_TYPES;
use hive_core::{AgentReport, AgentType};

/// Counts of living agents by type, recounted from each turn's reports.
///
/// Recounting (rather than incrementing on `WasCreated` and decrementing on
/// death) means a dropped turn can never leave the counts drifting.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct ColonyCensus {
    counts: [u32; NUM_AGENT_TYPES],
}

impl ColonyCensus {
    pub fn from_reports(reports: &[AgentReport]) -> Self {
        let mut census = Self::default();
        census.recount(reports);
        census
    }

    pub fn recount(&mut self, reports: &[AgentReport]) {
        self.counts = [0; NUM_AGENT_TYPES];
        for r in reports.iter().filter(|r| !r.is_dead()) {
            self.counts[r.agent_type.index()] += 1;
        }
    }

    #[inline]
    pub fn count(&self, agent_type: AgentType) -> u32 {
        self.counts[agent_type.index()]
    }

    #[inline]
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}
